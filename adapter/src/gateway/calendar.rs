use async_trait::async_trait;
use kernel::gateway::calendar::CalendarSyncGateway;
use kernel::model::reservation::Reservation;
use reqwest::{Client, StatusCode};
use shared::config::CalendarConfig;
use shared::error::{AppError, AppResult};

/// Google Calendar v3 client. Every failure maps to
/// `ExternalServiceError`; callers downgrade those to warnings since
/// the reservation is already committed by the time this runs.
pub struct GoogleCalendarGatewayImpl {
    client: Client,
    events_url: String,
}

impl GoogleCalendarGatewayImpl {
    pub fn new(cfg: &CalendarConfig) -> Self {
        Self {
            client: Client::new(),
            events_url: cfg.events_url.clone(),
        }
    }
}

#[async_trait]
impl CalendarSyncGateway for GoogleCalendarGatewayImpl {
    async fn create_event(
        &self,
        access_token: &str,
        reservation: &Reservation,
    ) -> AppResult<String> {
        let body = serde_json::json!({
            "summary": format!("Reserva de Sala: {}", reservation.room.name),
            "description": "Reserva realizada a través de Frontera.",
            "location": reservation.room.name,
            "start": { "dateTime": reservation.start_at.to_rfc3339() },
            "end": { "dateTime": reservation.end_at.to_rfc3339() },
        });

        let res = self
            .client
            .post(&self.events_url)
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("calendar request failed: {e}")))?;

        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "calendar event creation failed with status {}",
                res.status()
            )));
        }

        let created: serde_json::Value = res.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("calendar response unreadable: {e}"))
        })?;
        created
            .get("id")
            .and_then(|id| id.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::ExternalServiceError("calendar response carried no event id".into())
            })
    }

    async fn delete_event(&self, access_token: &str, event_id: &str) -> AppResult<()> {
        let url = format!("{}/{}", self.events_url, event_id);
        let res = self
            .client
            .delete(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("calendar request failed: {e}")))?;

        match res.status() {
            status if status.is_success() => Ok(()),
            // The event being gone already is the outcome we wanted.
            StatusCode::NOT_FOUND | StatusCode::GONE => {
                tracing::warn!(event_id, "calendar event was already gone");
                Ok(())
            }
            status => Err(AppError::ExternalServiceError(format!(
                "calendar event deletion failed with status {status}"
            ))),
        }
    }
}
