use crate::{
    extractor::AuthorizedUser,
    model::room::{
        CreateRoomRequest, RoomResponse, RoomsResponse, UpdateRoomRequest,
        UpdateRoomRequestWithIds,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::model::{id::RoomId, room::event::DeleteRoom};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_room(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateRoomRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_admin(&user, "manage the room catalog")?;
    req.validate(&())?;

    let room = registry.room_repository().create(req.into()).await?;
    tracing::info!(room_id = %room.room_id, "room registered");

    Ok((StatusCode::CREATED, Json(RoomResponse::from(room))))
}

pub async fn show_room_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomsResponse>> {
    registry
        .room_repository()
        .find_all()
        .await
        .map(RoomsResponse::from)
        .map(Json)
}

pub async fn show_room(
    _user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomResponse>> {
    registry
        .room_repository()
        .find_by_id(room_id)
        .await
        .and_then(|room| match room {
            Some(room) => Ok(Json(room.into())),
            None => Err(AppError::EntityNotFound(format!("room {room_id} not found"))),
        })
}

pub async fn update_room(
    user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateRoomRequest>,
) -> AppResult<Json<RoomResponse>> {
    ensure_admin(&user, "manage the room catalog")?;
    req.validate(&())?;

    let update_room = UpdateRoomRequestWithIds::new(room_id, user.id(), req);
    registry
        .room_repository()
        .update(update_room.into())
        .await
        .map(RoomResponse::from)
        .map(Json)
}

pub async fn delete_room(
    user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    ensure_admin(&user, "manage the room catalog")?;

    let delete_room = DeleteRoom {
        room_id,
        requested_user: user.id(),
    };
    registry
        .room_repository()
        .delete(delete_room)
        .await
        .map(|_| StatusCode::OK)
}

fn ensure_admin(user: &AuthorizedUser, action: &str) -> AppResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::ForbiddenOperation(format!(
            "only administrators may {action}"
        )))
    }
}
