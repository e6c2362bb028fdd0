pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::{create_router, create_router_with_limit};
pub use state::AppState;
