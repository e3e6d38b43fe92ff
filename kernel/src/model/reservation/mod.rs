use crate::model::id::{ReservationId, RoomId};
use crate::model::user::ReservationUser;
use chrono::{DateTime, Utc};

pub mod event;
pub mod policy;
pub mod rules;

/// A committed booking. Never mutated in place: cancellation stamps
/// `cancelled_at` and the row stays queryable as history.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub reserved_by: ReservationUser,
    pub reserved_at: DateTime<Utc>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub google_event_id: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub room: ReservationRoom,
}

impl Reservation {
    pub fn is_active(&self) -> bool {
        self.cancelled_at.is_none()
    }

    pub fn has_finished(&self, now: DateTime<Utc>) -> bool {
        self.end_at <= now
    }
}

/// The slice of a room that travels embedded in a reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRoom {
    pub room_id: RoomId,
    pub name: String,
    pub capacity: i32,
    pub equipment: Vec<String>,
    pub floor: i32,
    pub image_url: Option<String>,
}

/// Interval view of a committed reservation, enough for overlap and
/// policy arithmetic without joining room and user data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookedInterval {
    pub reservation_id: ReservationId,
    pub room_id: RoomId,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

impl From<&Reservation> for BookedInterval {
    fn from(value: &Reservation) -> Self {
        Self {
            reservation_id: value.reservation_id,
            room_id: value.room.room_id,
            start_at: value.start_at,
            end_at: value.end_at,
        }
    }
}

/// A user's reservations split relative to a query instant. Recomputed
/// per query, never cached.
#[derive(Debug, Default)]
pub struct MyReservations {
    pub current: Option<Reservation>,
    pub future: Vec<Reservation>,
    pub past: Vec<Reservation>,
}

impl MyReservations {
    /// Splits `reservations` into past (`end_at <= now`), future
    /// (`start_at > now`) and the block containing `now`. A
    /// reservation ending exactly at `now` is already past; one
    /// starting exactly at `now` is current.
    pub fn classify(now: DateTime<Utc>, mut reservations: Vec<Reservation>) -> Self {
        reservations.sort_by_key(|r| r.start_at);

        let mut partitioned = Self::default();
        for reservation in reservations {
            if reservation.end_at <= now {
                partitioned.past.push(reservation);
            } else if reservation.start_at > now {
                partitioned.future.push(reservation);
            } else {
                partitioned.current = Some(reservation);
            }
        }
        partitioned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::id::UserId;
    use crate::model::role::Role;
    use chrono::Duration;
    use std::collections::BTreeSet;

    fn reservation(start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Reservation {
        Reservation {
            reservation_id: ReservationId::new(),
            reserved_by: ReservationUser {
                user_id: UserId::new(),
                user_name: "Test User".into(),
                email: "test@example.com".into(),
                role: Role::Student,
            },
            reserved_at: start_at - Duration::days(1),
            start_at,
            end_at,
            google_event_id: None,
            cancelled_at: None,
            room: ReservationRoom {
                room_id: RoomId::new(),
                name: "R1".into(),
                capacity: 4,
                equipment: vec![],
                floor: 1,
                image_url: None,
            },
        }
    }

    #[test]
    fn partitions_are_disjoint_and_cover_the_input() {
        let now = Utc::now();
        let hour = Duration::hours(1);
        let input = vec![
            reservation(now - hour * 3, now - hour * 2),
            reservation(now - hour, now + hour),
            reservation(now + hour * 2, now + hour * 3),
            reservation(now + hour * 4, now + hour * 5),
        ];
        let input_ids: BTreeSet<_> = input.iter().map(|r| r.reservation_id).collect();

        let view = MyReservations::classify(now, input);

        let mut seen = BTreeSet::new();
        for r in view
            .past
            .iter()
            .chain(view.future.iter())
            .chain(view.current.iter())
        {
            assert!(seen.insert(r.reservation_id), "reservation classified twice");
        }
        assert_eq!(seen, input_ids);
        assert_eq!(view.past.len(), 1);
        assert_eq!(view.future.len(), 2);
        assert!(view.current.is_some());
    }

    #[test]
    fn ending_exactly_now_is_past() {
        let now = Utc::now();
        let view = MyReservations::classify(now, vec![reservation(now - Duration::hours(1), now)]);
        assert_eq!(view.past.len(), 1);
        assert!(view.current.is_none());
    }

    #[test]
    fn starting_exactly_now_is_current() {
        let now = Utc::now();
        let view = MyReservations::classify(now, vec![reservation(now, now + Duration::hours(1))]);
        assert!(view.current.is_some());
        assert!(view.future.is_empty());
    }

    #[test]
    fn future_reservations_are_ordered_by_start() {
        let now = Utc::now();
        let hour = Duration::hours(1);
        let later = reservation(now + hour * 4, now + hour * 5);
        let sooner = reservation(now + hour, now + hour * 2);
        let view = MyReservations::classify(now, vec![later, sooner]);
        assert!(view.future[0].start_at < view.future[1].start_at);
    }
}
