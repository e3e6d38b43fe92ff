use chrono::{DateTime, Utc};
use kernel::model::id::{ReservationId, RoomId, UserId};
use kernel::model::reservation::{BookedInterval, Reservation, ReservationRoom};
use kernel::model::role::Role;
use kernel::model::room::Room;
use kernel::model::user::{ReservationUser, User};

/// Stored user row. The calendar token never leaves the adapter except
/// through the dedicated accessor.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub role: Role,
    pub google_access_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(value: UserRecord) -> Self {
        let UserRecord {
            user_id,
            user_name,
            email,
            role,
            google_access_token: _,
            created_at: _,
        } = value;
        User {
            user_id,
            user_name,
            email,
            role,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RoomRecord {
    pub room_id: RoomId,
    pub name: String,
    pub capacity: i32,
    pub equipment: Vec<String>,
    pub floor: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<RoomRecord> for Room {
    fn from(value: RoomRecord) -> Self {
        let RoomRecord {
            room_id,
            name,
            capacity,
            equipment,
            floor,
            image_url,
            created_at: _,
        } = value;
        Room {
            room_id,
            name,
            capacity,
            equipment,
            floor,
            image_url,
        }
    }
}

/// Stored reservation row; room and user data are joined in when a
/// full `Reservation` is needed.
#[derive(Debug, Clone)]
pub struct ReservationRecord {
    pub reservation_id: ReservationId,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub reserved_at: DateTime<Utc>,
    pub google_event_id: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl ReservationRecord {
    pub fn is_active(&self) -> bool {
        self.cancelled_at.is_none()
    }

    pub fn interval(&self) -> BookedInterval {
        BookedInterval {
            reservation_id: self.reservation_id,
            room_id: self.room_id,
            start_at: self.start_at,
            end_at: self.end_at,
        }
    }

    pub fn hydrate(self, room: &RoomRecord, user: &UserRecord) -> Reservation {
        Reservation {
            reservation_id: self.reservation_id,
            reserved_by: ReservationUser {
                user_id: user.user_id,
                user_name: user.user_name.clone(),
                email: user.email.clone(),
                role: user.role,
            },
            reserved_at: self.reserved_at,
            start_at: self.start_at,
            end_at: self.end_at,
            google_event_id: self.google_event_id,
            cancelled_at: self.cancelled_at,
            room: ReservationRoom {
                room_id: room.room_id,
                name: room.name.clone(),
                capacity: room.capacity,
                equipment: room.equipment.clone(),
                floor: room.floor,
                image_url: room.image_url.clone(),
            },
        }
    }
}
