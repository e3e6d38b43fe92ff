use crate::model::{room::RoomResponse, user::UserResponse};
use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{ReservationId, RoomId},
    reservation::{MyReservations, Reservation},
};
use serde::{Deserialize, Serialize};

/// Matches the frontend `ReservationRequest` contract.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[garde(skip)]
    pub room_id: RoomId,
    #[garde(skip)]
    pub start_at: DateTime<Utc>,
    #[garde(skip)]
    pub end_at: DateTime<Utc>,
    #[garde(skip)]
    #[serde(default)]
    pub add_to_google_calendar: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOnBehalfRequest {
    #[garde(skip)]
    pub room_id: RoomId,
    #[garde(skip)]
    pub start_at: DateTime<Utc>,
    #[garde(skip)]
    pub end_at: DateTime<Utc>,
    #[garde(email)]
    pub others_email: String,
}

/// Admission success body. The warning appears only when calendar sync
/// was requested and could not be completed; the reservation itself is
/// committed either way.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: ReservationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_warning: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDetailResponse {
    pub id: ReservationId,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub room: RoomResponse,
    pub user: UserResponse,
}

impl From<Reservation> for ReservationDetailResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            reservation_id,
            reserved_by,
            reserved_at: _,
            start_at,
            end_at,
            google_event_id: _,
            cancelled_at: _,
            room,
        } = value;
        Self {
            id: reservation_id,
            start_at,
            end_at,
            room: room.into(),
            user: reserved_by.into(),
        }
    }
}

/// `current` serializes as `null` when the user has no reservation in
/// progress, per the `MyReservationsResponse` contract.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyReservationsResponse {
    pub current: Option<ReservationDetailResponse>,
    pub future: Vec<ReservationDetailResponse>,
    pub past: Vec<ReservationDetailResponse>,
}

impl From<MyReservations> for MyReservationsResponse {
    fn from(value: MyReservations) -> Self {
        let MyReservations {
            current,
            future,
            past,
        } = value;
        Self {
            current: current.map(ReservationDetailResponse::from),
            future: future.into_iter().map(ReservationDetailResponse::from).collect(),
            past: past.into_iter().map(ReservationDetailResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationsResponse {
    pub items: Vec<ReservationDetailResponse>,
}

impl From<Vec<Reservation>> for ReservationsResponse {
    fn from(value: Vec<Reservation>) -> Self {
        Self {
            items: value
                .into_iter()
                .map(ReservationDetailResponse::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_the_contract_payload() {
        let json = serde_json::json!({
            "roomId": "7b1f4be0-9d25-4ff0-9d5f-8b2c6e0f8f10",
            "startAt": "2026-03-02T09:00:00Z",
            "endAt": "2026-03-02T10:00:00Z",
            "addToGoogleCalendar": true,
        });
        let req: CreateReservationRequest = serde_json::from_value(json).unwrap();
        assert!(req.add_to_google_calendar);
        assert!(req.start_at < req.end_at);
    }

    #[test]
    fn missing_calendar_flag_defaults_to_false() {
        let json = serde_json::json!({
            "roomId": "7b1f4be0-9d25-4ff0-9d5f-8b2c6e0f8f10",
            "startAt": "2026-03-02T09:00:00Z",
            "endAt": "2026-03-02T10:00:00Z",
        });
        let req: CreateReservationRequest = serde_json::from_value(json).unwrap();
        assert!(!req.add_to_google_calendar);
    }

    #[test]
    fn absent_current_serializes_as_null() {
        let response = MyReservationsResponse {
            current: None,
            future: vec![],
            past: vec![],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["current"].is_null());
    }

    #[test]
    fn success_body_hides_the_warning_field_when_clean() {
        let response = ReservationResponse {
            id: ReservationId::new(),
            calendar_warning: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("calendarWarning").is_none());
        assert!(json.get("id").is_some());
    }
}
