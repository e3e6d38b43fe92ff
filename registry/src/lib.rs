use std::sync::Arc;

use adapter::gateway::calendar::GoogleCalendarGatewayImpl;
use adapter::repository::auth::AuthRepositoryImpl;
use adapter::repository::health::HealthCheckRepositoryImpl;
use adapter::repository::reservation::ReservationRepositoryImpl;
use adapter::repository::room::RoomRepositoryImpl;
use adapter::repository::user::UserRepositoryImpl;
use adapter::store::SharedStore;
use chrono::FixedOffset;
use kernel::gateway::calendar::CalendarSyncGateway;
use kernel::model::reservation::policy::{ReservationPolicy, StandardPolicy};
use kernel::model::time_grid::TimeGrid;
use kernel::repository::auth::AuthRepository;
use kernel::repository::health::HealthCheckRepository;
use kernel::repository::reservation::ReservationRepository;
use kernel::repository::room::RoomRepository;
use kernel::repository::user::UserRepository;
use shared::config::AppConfig;
use shared::error::{AppError, AppResult};

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    user_repository: Arc<dyn UserRepository>,
    room_repository: Arc<dyn RoomRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    calendar_gateway: Arc<dyn CalendarSyncGateway>,
    time_grid: Arc<TimeGrid>,
    grid_offset: FixedOffset,
}

impl AppRegistry {
    /// Wires every implementation once. A malformed slot grid fails
    /// here, before the server starts taking requests.
    pub fn new(store: SharedStore, app_config: AppConfig) -> AppResult<Self> {
        let time_grid = match &app_config.time.grid_spec {
            Some(spec) => TimeGrid::parse(spec)?,
            None => TimeGrid::standard()?,
        };
        let grid_offset = FixedOffset::east_opt(app_config.time.tz_offset_hours * 3600)
            .ok_or_else(|| {
                AppError::ConfigError(format!(
                    "invalid timezone offset {} hours",
                    app_config.time.tz_offset_hours
                ))
            })?;

        let policy: Arc<dyn ReservationPolicy> =
            Arc::new(StandardPolicy::new(&app_config.policy));

        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(store.clone()));
        let user_repository = Arc::new(UserRepositoryImpl::new(store.clone()));
        let room_repository = Arc::new(RoomRepositoryImpl::new(store.clone()));
        let reservation_repository =
            Arc::new(ReservationRepositoryImpl::new(store.clone(), policy));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(store.clone()));
        let calendar_gateway = Arc::new(GoogleCalendarGatewayImpl::new(&app_config.calendar));

        Ok(Self {
            health_check_repository,
            user_repository,
            room_repository,
            reservation_repository,
            auth_repository,
            calendar_gateway,
            time_grid: Arc::new(time_grid),
            grid_offset,
        })
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn room_repository(&self) -> Arc<dyn RoomRepository> {
        self.room_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn calendar_gateway(&self) -> Arc<dyn CalendarSyncGateway> {
        self.calendar_gateway.clone()
    }

    pub fn time_grid(&self) -> Arc<TimeGrid> {
        self.time_grid.clone()
    }

    pub fn grid_offset(&self) -> FixedOffset {
        self.grid_offset
    }
}
