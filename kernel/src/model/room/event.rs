use crate::model::id::{RoomId, UserId};

pub struct CreateRoom {
    pub name: String,
    pub capacity: i32,
    pub equipment: Vec<String>,
    pub floor: i32,
    pub image_url: Option<String>,
}

#[derive(Debug)]
pub struct UpdateRoom {
    pub room_id: RoomId,
    pub name: Option<String>,
    pub capacity: Option<i32>,
    pub equipment: Option<Vec<String>>,
    pub floor: Option<i32>,
    pub image_url: Option<String>,
    pub requested_user: UserId,
}

#[derive(Debug)]
pub struct DeleteRoom {
    pub room_id: RoomId,
    pub requested_user: UserId,
}
