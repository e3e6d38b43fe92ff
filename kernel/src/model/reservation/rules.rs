use super::BookedInterval;
use crate::model::id::RoomId;
use chrono::{DateTime, Utc};
use shared::error::{AppError, AppResult};

/// Half-open interval intersection: `[a_start, a_end)` and
/// `[b_start, b_end)` overlap iff `a_start < b_end && b_start < a_end`.
/// Back-to-back intervals do not collide.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

pub fn find_conflict<'a>(
    room_id: RoomId,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    booked: &'a [BookedInterval],
) -> Option<&'a BookedInterval> {
    booked
        .iter()
        .find(|b| b.room_id == room_id && overlaps(start_at, end_at, b.start_at, b.end_at))
}

/// Admission gate, checked in a fixed order; the first failed rule
/// decides the rejection. `booked` must be the committed active set
/// the caller intends to admit against.
pub fn check_admission(
    room_id: RoomId,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    now: DateTime<Utc>,
    room_in_catalog: bool,
    booked: &[BookedInterval],
) -> AppResult<()> {
    if start_at >= end_at {
        return Err(AppError::InvalidInterval(format!(
            "the start ({start_at}) must be before the end ({end_at})"
        )));
    }
    if start_at < now {
        return Err(AppError::PastBooking(format!(
            "the reservation starts in the past ({start_at})"
        )));
    }
    if !room_in_catalog {
        return Err(AppError::UnknownRoom(format!(
            "room {room_id} is not in the catalog"
        )));
    }
    if let Some(conflict) = find_conflict(room_id, start_at, end_at, booked) {
        return Err(AppError::ReservationConflict {
            conflicting: conflict.reservation_id.into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::id::ReservationId;
    use chrono::Duration;

    fn booked(
        room_id: RoomId,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> BookedInterval {
        BookedInterval {
            reservation_id: ReservationId::new(),
            room_id,
            start_at,
            end_at,
        }
    }

    #[test]
    fn empty_interval_is_rejected_first() {
        let now = Utc::now();
        let room = RoomId::new();
        // Also in the past and against an unknown room; the interval
        // rule must still win.
        let err = check_admission(room, now - Duration::hours(2), now - Duration::hours(2), now, false, &[])
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInterval(_)));
    }

    #[test]
    fn past_start_is_rejected_before_catalog_lookup() {
        let now = Utc::now();
        let err = check_admission(
            RoomId::new(),
            now - Duration::minutes(1),
            now + Duration::hours(1),
            now,
            false,
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, AppError::PastBooking(_)));
    }

    #[test]
    fn unknown_room_is_rejected_before_conflicts() {
        let now = Utc::now();
        let room = RoomId::new();
        let existing = [booked(room, now, now + Duration::hours(1))];
        let err = check_admission(
            room,
            now + Duration::minutes(10),
            now + Duration::minutes(40),
            now,
            false,
            &existing,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::UnknownRoom(_)));
    }

    #[test]
    fn conflict_carries_the_existing_reservation_id() {
        let now = Utc::now();
        let room = RoomId::new();
        let existing = [booked(
            room,
            now + Duration::hours(1),
            now + Duration::hours(2),
        )];
        let err = check_admission(
            room,
            now + Duration::minutes(90),
            now + Duration::minutes(150),
            now,
            true,
            &existing,
        )
        .unwrap_err();
        match err {
            AppError::ReservationConflict { conflicting } => {
                assert_eq!(conflicting, existing[0].reservation_id.into());
            }
            other => panic!("expected a conflict, got {other:?}"),
        }
    }

    #[test]
    fn back_to_back_is_not_a_conflict() {
        let now = Utc::now();
        let room = RoomId::new();
        let existing = [booked(
            room,
            now + Duration::hours(1),
            now + Duration::hours(2),
        )];
        check_admission(
            room,
            now + Duration::hours(2),
            now + Duration::hours(3),
            now,
            true,
            &existing,
        )
        .unwrap();
    }

    #[test]
    fn another_rooms_booking_is_not_a_conflict() {
        let now = Utc::now();
        let existing = [booked(
            RoomId::new(),
            now + Duration::hours(1),
            now + Duration::hours(2),
        )];
        check_admission(
            RoomId::new(),
            now + Duration::hours(1),
            now + Duration::hours(2),
            now,
            true,
            &existing,
        )
        .unwrap();
    }

    #[test]
    fn starting_exactly_now_is_allowed() {
        let now = Utc::now();
        check_admission(RoomId::new(), now, now + Duration::hours(1), now, true, &[]).unwrap();
    }
}
