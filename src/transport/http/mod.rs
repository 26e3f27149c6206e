pub mod error;
pub mod extract;
pub mod router;
pub mod types;
pub mod handlers {
    pub mod cars;
    pub mod health;
    pub mod mechanics;
    pub mod orders;
}

pub use error::ApiError;
pub use router::{create_router, ApiDoc};
pub use types::{ApiResponse, AppState};
