use axum::{
    routing::{delete, get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::reservation::{
    cancel_reservation, my_reservations, reserve, reserve_on_behalf, show_reservation,
};

pub fn build_reservation_routers() -> Router<AppRegistry> {
    let reservation_routers = Router::new()
        .route("/", post(reserve))
        .route("/on-behalf", post(reserve_on_behalf))
        .route("/my-reservations", get(my_reservations))
        .route("/{reservation_id}", get(show_reservation))
        .route("/{reservation_id}", delete(cancel_reservation));

    Router::new().nest("/reservations", reservation_routers)
}
