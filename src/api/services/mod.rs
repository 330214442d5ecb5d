pub mod health;
pub mod helpers;
pub mod links;
pub mod page;

pub use health::{AppStartTime, HealthService, health_routes};
pub use helpers::ApiResponse;
pub use links::{LinkService, api_routes};
pub use page::{PageService, PageView, page_routes};
