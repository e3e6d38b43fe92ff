use crate::model::{
    id::{ReservationId, RoomId, UserId},
    reservation::{
        event::{CancelReservation, CreateReservation},
        BookedInterval, Reservation,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::error::AppResult;

/// The reservation ledger: the single owner of reservation state.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Validates and commits a reservation atomically against the
    /// latest committed state, returning the stored reservation.
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation>;
    /// Marks a reservation cancelled. Terminal; history is kept.
    async fn cancel(&self, event: CancelReservation) -> AppResult<()>;
    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Reservation>;
    /// A user's active reservations, ordered by start.
    async fn find_active_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>>;
    /// A room's active reservations, ordered by start.
    async fn find_active_by_room_id(&self, room_id: RoomId) -> AppResult<Vec<Reservation>>;
    /// Active intervals intersecting `[start_at, end_at)`, the input
    /// of the availability computation.
    async fn find_active_between(
        &self,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> AppResult<Vec<BookedInterval>>;
    /// Records the calendar event id captured after a successful sync.
    async fn set_google_event_id(
        &self,
        reservation_id: ReservationId,
        event_id: String,
    ) -> AppResult<()>;
}
