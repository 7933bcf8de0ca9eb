// Performance analytics domain
pub mod analytics;

// Race result model and value normalization
pub mod race;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
