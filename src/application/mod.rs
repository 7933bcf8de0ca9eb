pub mod analytics_cache;
pub mod driver_analytics_service;
