pub mod app_state;
pub mod errors;

pub use app_state::AppState;
pub use errors::{AppError, AppResult};
