use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{RoomId, UserId},
    reservation::ReservationRoom,
    room::{
        event::{CreateRoom, UpdateRoom},
        Room,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(range(min = 1))]
    pub capacity: i32,
    #[garde(skip)]
    #[serde(default)]
    pub equipment: Vec<String>,
    #[garde(skip)]
    #[serde(default)]
    pub floor: i32,
    #[garde(skip)]
    pub image_url: Option<String>,
}

impl From<CreateRoomRequest> for CreateRoom {
    fn from(value: CreateRoomRequest) -> Self {
        let CreateRoomRequest {
            name,
            capacity,
            equipment,
            floor,
            image_url,
        } = value;
        CreateRoom {
            name,
            capacity,
            equipment,
            floor,
            image_url,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    #[garde(inner(length(min = 1)))]
    pub name: Option<String>,
    #[garde(inner(range(min = 1)))]
    pub capacity: Option<i32>,
    #[garde(skip)]
    pub equipment: Option<Vec<String>>,
    #[garde(skip)]
    pub floor: Option<i32>,
    #[garde(skip)]
    pub image_url: Option<String>,
}

#[derive(new)]
pub struct UpdateRoomRequestWithIds(RoomId, UserId, UpdateRoomRequest);

impl From<UpdateRoomRequestWithIds> for UpdateRoom {
    fn from(value: UpdateRoomRequestWithIds) -> Self {
        let UpdateRoomRequestWithIds(
            room_id,
            user_id,
            UpdateRoomRequest {
                name,
                capacity,
                equipment,
                floor,
                image_url,
            },
        ) = value;
        UpdateRoom {
            room_id,
            name,
            capacity,
            equipment,
            floor,
            image_url,
            requested_user: user_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: RoomId,
    pub name: String,
    pub capacity: i32,
    pub equipment: Vec<String>,
    pub floor: i32,
    pub image_url: Option<String>,
}

impl From<Room> for RoomResponse {
    fn from(value: Room) -> Self {
        let Room {
            room_id,
            name,
            capacity,
            equipment,
            floor,
            image_url,
        } = value;
        Self {
            id: room_id,
            name,
            capacity,
            equipment,
            floor,
            image_url,
        }
    }
}

impl From<ReservationRoom> for RoomResponse {
    fn from(value: ReservationRoom) -> Self {
        let ReservationRoom {
            room_id,
            name,
            capacity,
            equipment,
            floor,
            image_url,
        } = value;
        Self {
            id: room_id,
            name,
            capacity,
            equipment,
            floor,
            image_url,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomsResponse {
    pub items: Vec<RoomResponse>,
}

impl From<Vec<Room>> for RoomsResponse {
    fn from(value: Vec<Room>) -> Self {
        Self {
            items: value.into_iter().map(RoomResponse::from).collect(),
        }
    }
}
