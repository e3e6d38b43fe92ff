use crate::model::id::RoomId;

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub room_id: RoomId,
    pub name: String,
    pub capacity: i32,
    pub equipment: Vec<String>,
    pub floor: i32,
    pub image_url: Option<String>,
}
