use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::availability::daily_availability;

pub fn build_availability_routers() -> Router<AppRegistry> {
    Router::new().route("/availability", get(daily_availability))
}
