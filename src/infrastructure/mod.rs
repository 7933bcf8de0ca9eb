pub mod ergast_json;
pub mod mock;
