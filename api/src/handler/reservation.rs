use crate::{
    extractor::AuthorizedUser,
    model::reservation::{
        CreateOnBehalfRequest, CreateReservationRequest, MyReservationsResponse,
        ReservationDetailResponse, ReservationResponse, ReservationsResponse,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use garde::Validate;
use kernel::model::{
    id::{ReservationId, RoomId, UserId},
    reservation::{
        event::{CancelReservation, CreateReservation},
        MyReservations, Reservation,
    },
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn reserve(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;

    let event = CreateReservation::new(req.room_id, user.id(), req.start_at, req.end_at, false);
    let reservation = registry.reservation_repository().create(event).await?;
    tracing::info!(
        reservation_id = %reservation.reservation_id,
        user_id = %user.id(),
        "reservation committed"
    );

    // Post-commit, best effort: a sync failure becomes a warning on an
    // otherwise successful response, never a rollback.
    let calendar_warning = if req.add_to_google_calendar {
        sync_calendar_event(&registry, &reservation).await
    } else {
        None
    };

    Ok((
        StatusCode::CREATED,
        Json(ReservationResponse {
            id: reservation.reservation_id,
            calendar_warning,
        }),
    ))
}

pub async fn reserve_on_behalf(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateOnBehalfRequest>,
) -> AppResult<impl IntoResponse> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation(
            "only administrators may book on behalf of another user".into(),
        ));
    }
    req.validate(&())?;

    let target = registry
        .user_repository()
        .find_by_email(&req.others_email)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("user {} not found", req.others_email))
        })?;

    let event = CreateReservation::new(req.room_id, target.user_id, req.start_at, req.end_at, true);
    let reservation = registry.reservation_repository().create(event).await?;
    tracing::info!(
        reservation_id = %reservation.reservation_id,
        admin_id = %user.id(),
        on_behalf_of = %target.user_id,
        "reservation committed on behalf of another user"
    );

    // On-behalf bookings never touch the other user's calendar.
    Ok((
        StatusCode::CREATED,
        Json(ReservationResponse {
            id: reservation.reservation_id,
            calendar_warning: None,
        }),
    ))
}

pub async fn my_reservations(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MyReservationsResponse>> {
    let reservations = registry
        .reservation_repository()
        .find_active_by_user_id(user.id())
        .await?;
    let view = MyReservations::classify(Utc::now(), reservations);
    Ok(Json(view.into()))
}

pub async fn show_reservation(
    _user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationDetailResponse>> {
    registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await
        .map(ReservationDetailResponse::from)
        .map(Json)
}

pub async fn cancel_reservation(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let reservation = registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await?;

    registry
        .reservation_repository()
        .cancel(CancelReservation::new(reservation_id, user.id()))
        .await?;
    tracing::info!(%reservation_id, user_id = %user.id(), "reservation cancelled");

    if let Some(event_id) = reservation.google_event_id.as_deref() {
        delete_calendar_event(&registry, reservation.reserved_by.user_id, event_id).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Admin view of a room's upcoming calendar.
pub async fn room_reservations(
    user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation(
            "only administrators may list a room's reservations".into(),
        ));
    }

    registry
        .room_repository()
        .find_by_id(room_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("room {room_id} not found")))?;

    registry
        .reservation_repository()
        .find_active_by_room_id(room_id)
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}

async fn sync_calendar_event(
    registry: &AppRegistry,
    reservation: &Reservation,
) -> Option<String> {
    let owner_id = reservation.reserved_by.user_id;
    let token = match registry.user_repository().google_access_token(owner_id).await {
        Ok(Some(token)) => token,
        Ok(None) => {
            tracing::warn!(%owner_id, "calendar sync skipped: no credentials on file");
            return Some(
                "the reservation was not added to Google Calendar: no calendar credentials on file"
                    .into(),
            );
        }
        Err(e) => {
            tracing::warn!(error = %e, %owner_id, "calendar sync skipped");
            return Some(format!("the reservation was not added to Google Calendar: {e}"));
        }
    };

    match registry
        .calendar_gateway()
        .create_event(&token, reservation)
        .await
    {
        Ok(event_id) => {
            tracing::info!(
                reservation_id = %reservation.reservation_id,
                event_id,
                "calendar event created"
            );
            if let Err(e) = registry
                .reservation_repository()
                .set_google_event_id(reservation.reservation_id, event_id)
                .await
            {
                tracing::warn!(error = %e, "failed to record the calendar event id");
            }
            None
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                reservation_id = %reservation.reservation_id,
                "calendar sync failed after commit"
            );
            Some(format!(
                "the reservation is confirmed but calendar sync failed: {e}"
            ))
        }
    }
}

async fn delete_calendar_event(registry: &AppRegistry, owner_id: UserId, event_id: &str) {
    match registry.user_repository().google_access_token(owner_id).await {
        Ok(Some(token)) => {
            if let Err(e) = registry
                .calendar_gateway()
                .delete_event(&token, event_id)
                .await
            {
                tracing::warn!(error = %e, event_id, "calendar event deletion failed");
            }
        }
        Ok(None) => {
            tracing::warn!(event_id, "calendar event left in place: no credentials on file");
        }
        Err(e) => tracing::warn!(error = %e, event_id, "calendar event deletion skipped"),
    }
}
