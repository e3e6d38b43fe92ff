use crate::store::{model::ReservationRecord, SharedStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_new::new;
use kernel::model::id::{ReservationId, RoomId, UserId};
use kernel::model::reservation::{
    event::{CancelReservation, CreateReservation},
    policy::{AdmissionContext, ReservationPolicy},
    rules, BookedInterval, Reservation,
};
use kernel::model::role::Role;
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};
use std::sync::Arc;

#[derive(new)]
pub struct ReservationRepositoryImpl {
    store: SharedStore,
    policy: Arc<dyn ReservationPolicy>,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation> {
        let now = Utc::now();

        let user = self
            .store
            .users_read()
            .await
            .get(&event.reserved_by)
            .cloned()
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("user {} not found", event.reserved_by))
            })?;

        // Admission critical section. Anything read from here on is
        // the latest committed state; the availability grid a client
        // looked at beforehand may be stale, this check is not.
        let mut reservations = self.store.admission_guard().await?;

        let room = self
            .store
            .rooms_read()
            .await
            .get(&event.room_id)
            .cloned();

        let active: Vec<BookedInterval> = reservations
            .values()
            .filter(|r| r.is_active())
            .map(|r| r.interval())
            .collect();
        rules::check_admission(
            event.room_id,
            event.start_at,
            event.end_at,
            now,
            room.is_some(),
            &active,
        )?;

        let user_booked: Vec<BookedInterval> = reservations
            .values()
            .filter(|r| r.is_active() && r.user_id == event.reserved_by)
            .map(|r| r.interval())
            .collect();
        self.policy.check(
            event.start_at,
            event.end_at,
            &AdmissionContext {
                role: user.role,
                self_service: !event.on_behalf,
                now,
                user_booked: &user_booked,
            },
        )?;

        let room = room.ok_or_else(|| {
            AppError::UnknownRoom(format!("room {} is not in the catalog", event.room_id))
        })?;

        let record = ReservationRecord {
            reservation_id: ReservationId::new(),
            room_id: event.room_id,
            user_id: event.reserved_by,
            start_at: event.start_at,
            end_at: event.end_at,
            reserved_at: now,
            google_event_id: None,
            cancelled_at: None,
        };
        let reservation = record.clone().hydrate(&room, &user);
        reservations.insert(record.reservation_id, record);

        Ok(reservation)
    }

    async fn cancel(&self, event: CancelReservation) -> AppResult<()> {
        let now = Utc::now();

        let requester = self
            .store
            .users_read()
            .await
            .get(&event.requested_by)
            .cloned()
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("user {} not found", event.requested_by))
            })?;

        let mut reservations = self.store.reservations_write().await;
        let record = reservations
            .get_mut(&event.reservation_id)
            .ok_or_else(|| {
                AppError::EntityNotFound(format!(
                    "reservation {} not found",
                    event.reservation_id
                ))
            })?;

        let is_owner = record.user_id == event.requested_by;
        let is_admin = match requester.role {
            Role::Admin => true,
            Role::Student => false,
        };
        if !is_owner && !is_admin {
            return Err(AppError::NotOwner(
                "only the reservation owner or an administrator may cancel it".into(),
            ));
        }

        if record.cancelled_at.is_some() {
            return Err(AppError::AlreadyPast(
                "the reservation is already cancelled".into(),
            ));
        }
        if record.end_at <= now {
            return Err(AppError::AlreadyPast(
                "the reservation has already finished".into(),
            ));
        }

        record.cancelled_at = Some(now);
        Ok(())
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
        let record = self
            .store
            .reservations_read()
            .await
            .get(&reservation_id)
            .cloned()
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("reservation {reservation_id} not found"))
            })?;
        self.hydrate_all(vec![record])
            .await?
            .pop()
            .ok_or_else(|| {
                AppError::ConversionEntityError(format!(
                    "reservation {reservation_id} references missing room or user data"
                ))
            })
    }

    async fn find_active_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>> {
        let mut records: Vec<ReservationRecord> = self
            .store
            .reservations_read()
            .await
            .values()
            .filter(|r| r.is_active() && r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.start_at);
        self.hydrate_all(records).await
    }

    async fn find_active_by_room_id(&self, room_id: RoomId) -> AppResult<Vec<Reservation>> {
        let mut records: Vec<ReservationRecord> = self
            .store
            .reservations_read()
            .await
            .values()
            .filter(|r| r.is_active() && r.room_id == room_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.start_at);
        self.hydrate_all(records).await
    }

    async fn find_active_between(
        &self,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> AppResult<Vec<BookedInterval>> {
        Ok(self
            .store
            .reservations_read()
            .await
            .values()
            .filter(|r| r.is_active() && rules::overlaps(r.start_at, r.end_at, start_at, end_at))
            .map(|r| r.interval())
            .collect())
    }

    async fn set_google_event_id(
        &self,
        reservation_id: ReservationId,
        event_id: String,
    ) -> AppResult<()> {
        let mut reservations = self.store.reservations_write().await;
        let record = reservations.get_mut(&reservation_id).ok_or_else(|| {
            AppError::EntityNotFound(format!("reservation {reservation_id} not found"))
        })?;
        record.google_event_id = Some(event_id);
        Ok(())
    }
}

impl ReservationRepositoryImpl {
    /// Joins reservation records against the room and user tables.
    /// Locks are taken one at a time; the records were cloned out of
    /// the reservation table beforehand.
    async fn hydrate_all(&self, records: Vec<ReservationRecord>) -> AppResult<Vec<Reservation>> {
        let rooms = self.store.rooms_read().await.clone();
        let users = self.store.users_read().await.clone();

        records
            .into_iter()
            .map(|record| {
                let room = rooms.get(&record.room_id).ok_or_else(|| {
                    AppError::ConversionEntityError(format!(
                        "room {} referenced by reservation {} is gone",
                        record.room_id, record.reservation_id
                    ))
                })?;
                let user = users.get(&record.user_id).ok_or_else(|| {
                    AppError::ConversionEntityError(format!(
                        "user {} referenced by reservation {} is gone",
                        record.user_id, record.reservation_id
                    ))
                })?;
                Ok(record.hydrate(room, user))
            })
            .collect()
    }
}
