pub mod analytics_service;
pub mod analytics_service_impl;
pub use analytics_service::{AnalyticsError, AnalyticsService};
pub use analytics_service_impl::SeaOrmAnalyticsService;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService};
pub use auth_service_impl::SeaOrmAuthService;

pub mod catalog_service;
pub mod catalog_service_impl;
pub use catalog_service::{CatalogError, CatalogService};
pub use catalog_service_impl::SeaOrmCatalogService;

pub mod drama_service;
pub mod drama_service_impl;
pub use drama_service::{DramaError, DramaService};
pub use drama_service_impl::SeaOrmDramaService;

pub mod engagement_service;
pub mod engagement_service_impl;
pub use engagement_service::{EngagementError, EngagementService};
pub use engagement_service_impl::SeaOrmEngagementService;
