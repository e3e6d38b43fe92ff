use crate::model::room::RoomResponse;
use chrono::NaiveDate;
use kernel::model::{availability::AvailabilityCell, id::RoomId, time_grid::TimeSlot};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// ISO date (`YYYY-MM-DD`); defaults to today in the app offset.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotResponse {
    pub id: String,
    pub label: String,
    pub start: String,
    pub end: String,
}

impl From<&TimeSlot> for TimeSlotResponse {
    fn from(value: &TimeSlot) -> Self {
        Self {
            id: value.id.clone(),
            label: value.label.clone(),
            start: value.start.format("%H:%M").to_string(),
            end: value.end.format("%H:%M").to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityCellResponse {
    pub room_id: RoomId,
    pub slot_id: String,
    pub available: bool,
}

impl From<AvailabilityCell> for AvailabilityCellResponse {
    fn from(value: AvailabilityCell) -> Self {
        let AvailabilityCell {
            room_id,
            slot_id,
            available,
        } = value;
        Self {
            room_id,
            slot_id,
            available,
        }
    }
}

/// Matches the frontend `DailyAvailabilityResponse` contract.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAvailabilityResponse {
    pub rooms: Vec<RoomResponse>,
    pub slots: Vec<TimeSlotResponse>,
    pub availability: Vec<AvailabilityCellResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_times_serialize_as_wall_clock_strings() {
        let slot = TimeSlot {
            id: "08:30-09:30".into(),
            label: "1° (08:30-09:30)".into(),
            start: chrono::NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            end: chrono::NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        };
        let json = serde_json::to_value(TimeSlotResponse::from(&slot)).unwrap();
        assert_eq!(json["start"], "08:30");
        assert_eq!(json["end"], "09:30");
        assert_eq!(json["id"], "08:30-09:30");
    }
}
