use crate::model::availability::{
    AvailabilityCellResponse, AvailabilityQuery, DailyAvailabilityResponse, TimeSlotResponse,
};
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use kernel::model::{availability, time_grid};
use registry::AppRegistry;
use shared::error::AppResult;

/// Public availability grid for one day. Recomputed from the ledger
/// snapshot on every call.
pub async fn daily_availability(
    Query(query): Query<AvailabilityQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<DailyAvailabilityResponse>> {
    let offset = registry.grid_offset();
    let date = query
        .date
        .unwrap_or_else(|| Utc::now().with_timezone(&offset).date_naive());

    let rooms = registry.room_repository().find_all().await?;
    let grid = registry.time_grid();

    let (day_start, day_end) = time_grid::day_bounds(date, offset);
    let booked = registry
        .reservation_repository()
        .find_active_between(day_start, day_end)
        .await?;

    let cells = availability::daily_availability(date, &rooms, &grid, &booked, offset);

    tracing::debug!(
        %date,
        rooms = rooms.len(),
        reservations = booked.len(),
        "computed daily availability"
    );

    Ok(Json(DailyAvailabilityResponse {
        slots: grid.slots().iter().map(TimeSlotResponse::from).collect(),
        availability: cells
            .into_iter()
            .map(AvailabilityCellResponse::from)
            .collect(),
        rooms: rooms.into_iter().map(Into::into).collect(),
    }))
}
