pub mod error;
pub mod handlers;
mod query;
pub mod router;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::build_router;
