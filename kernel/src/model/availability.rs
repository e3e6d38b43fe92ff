use crate::model::id::RoomId;
use crate::model::reservation::{rules, BookedInterval};
use crate::model::room::Room;
use crate::model::time_grid::TimeGrid;
use chrono::{FixedOffset, NaiveDate};
use std::collections::HashMap;

/// One cell of the (room × slot) grid. Derived per query, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityCell {
    pub room_id: RoomId,
    pub slot_id: String,
    pub available: bool,
}

/// Computes the day's availability matrix. A cell is unavailable iff
/// any booked interval for that room intersects the slot's half-open
/// window, so a booking spanning several slots blocks them all and a
/// mid-slot booking still blocks the slot it touches.
pub fn daily_availability(
    date: NaiveDate,
    rooms: &[Room],
    grid: &TimeGrid,
    booked: &[BookedInterval],
    offset: FixedOffset,
) -> Vec<AvailabilityCell> {
    let windows = grid.windows_on(date, offset);

    let mut by_room: HashMap<RoomId, Vec<&BookedInterval>> = HashMap::new();
    for interval in booked {
        by_room.entry(interval.room_id).or_default().push(interval);
    }

    let mut cells = Vec::with_capacity(rooms.len() * windows.len());
    for room in rooms {
        let room_booked = by_room.get(&room.room_id);
        for window in &windows {
            let occupied = room_booked.is_some_and(|intervals| {
                intervals.iter().any(|b| {
                    rules::overlaps(b.start_at, b.end_at, window.start_at, window.end_at)
                })
            });
            cells.push(AvailabilityCell {
                room_id: room.room_id,
                slot_id: window.slot_id.clone(),
                available: !occupied,
            });
        }
    }
    cells
}
