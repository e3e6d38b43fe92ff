use crate::model::reservation::Reservation;
use async_trait::async_trait;
use shared::error::AppResult;

/// External calendar collaborator. Called only after a reservation is
/// committed; a failure here never affects the reservation itself.
#[async_trait]
pub trait CalendarSyncGateway: Send + Sync {
    /// Creates a calendar event for the reservation and returns the
    /// provider's event id.
    async fn create_event(&self, access_token: &str, reservation: &Reservation)
        -> AppResult<String>;
    async fn delete_event(&self, access_token: &str, event_id: &str) -> AppResult<()>;
}
