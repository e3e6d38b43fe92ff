use crate::model::id::{ReservationId, RoomId, UserId};
use chrono::{DateTime, Utc};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateReservation {
    pub room_id: RoomId,
    pub reserved_by: UserId,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    /// Set when an admin books for somebody else; such bookings skip
    /// the requester-side weekly limit.
    pub on_behalf: bool,
}

#[derive(Debug, new)]
pub struct CancelReservation {
    pub reservation_id: ReservationId,
    pub requested_by: UserId,
}
