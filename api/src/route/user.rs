use axum::{routing::post, Router};
use registry::AppRegistry;

use crate::handler::user::register_user;

pub fn build_user_routers() -> Router<AppRegistry> {
    Router::new().route("/users", post(register_user))
}
