pub mod auth;
pub mod availability;
pub mod id;
pub mod reservation;
pub mod role;
pub mod room;
pub mod time_grid;
pub mod user;
