use kernel::model::id::{ReservationId, RoomId, UserId};
use shared::error::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::time::timeout;

pub mod model;

use model::{ReservationRecord, RoomRecord, UserRecord};

/// Shared in-memory state behind the repository seam, playing the
/// role the connection pool plays in a database-backed deployment.
/// Each table has its own lock; repository code never holds two locks
/// at once, and reservation admission is serialized through the
/// reservations write guard.
#[derive(Clone)]
pub struct SharedStore {
    users: Arc<RwLock<HashMap<UserId, UserRecord>>>,
    tokens: Arc<RwLock<HashMap<String, UserId>>>,
    rooms: Arc<RwLock<HashMap<RoomId, RoomRecord>>>,
    reservations: Arc<RwLock<HashMap<ReservationId, ReservationRecord>>>,
    admission_timeout: Duration,
}

impl SharedStore {
    pub fn new(admission_timeout: Duration) -> Self {
        Self {
            users: Arc::default(),
            tokens: Arc::default(),
            rooms: Arc::default(),
            reservations: Arc::default(),
            admission_timeout,
        }
    }

    pub(crate) async fn users_read(&self) -> RwLockReadGuard<'_, HashMap<UserId, UserRecord>> {
        self.users.read().await
    }

    pub(crate) async fn users_write(&self) -> RwLockWriteGuard<'_, HashMap<UserId, UserRecord>> {
        self.users.write().await
    }

    pub(crate) async fn tokens_read(&self) -> RwLockReadGuard<'_, HashMap<String, UserId>> {
        self.tokens.read().await
    }

    pub(crate) async fn tokens_write(&self) -> RwLockWriteGuard<'_, HashMap<String, UserId>> {
        self.tokens.write().await
    }

    pub(crate) async fn rooms_read(&self) -> RwLockReadGuard<'_, HashMap<RoomId, RoomRecord>> {
        self.rooms.read().await
    }

    pub(crate) async fn rooms_write(&self) -> RwLockWriteGuard<'_, HashMap<RoomId, RoomRecord>> {
        self.rooms.write().await
    }

    pub(crate) async fn reservations_read(
        &self,
    ) -> RwLockReadGuard<'_, HashMap<ReservationId, ReservationRecord>> {
        self.reservations.read().await
    }

    pub(crate) async fn reservations_write(
        &self,
    ) -> RwLockWriteGuard<'_, HashMap<ReservationId, ReservationRecord>> {
        self.reservations.write().await
    }

    /// The admission critical section: exclusive access to the
    /// reservation table, bounded so a congested ledger rejects with a
    /// retryable timeout instead of blocking indefinitely.
    pub(crate) async fn admission_guard(
        &self,
    ) -> AppResult<RwLockWriteGuard<'_, HashMap<ReservationId, ReservationRecord>>> {
        timeout(self.admission_timeout, self.reservations.write())
            .await
            .map_err(|_| AppError::AdmissionTimeout)
    }

    /// Cheap liveness probe for the health endpoint.
    pub async fn ping(&self) -> bool {
        let _ = self.reservations.read().await;
        true
    }
}
