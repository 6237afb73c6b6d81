pub mod app;
pub mod config;
pub mod errors;
pub mod jobs;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod utils;

pub use app::create_app;
pub use state::AppState;
