pub mod analytics;
pub mod dao;

pub use analytics::AnalyticsService;
pub use dao::*;
