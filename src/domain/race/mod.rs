// Race results as supplied by the data feed
pub mod normalize;
pub mod types;

pub use normalize::{DnfCategory, is_dnf, round_to, safe_divide, to_float, to_int, to_position};
pub use types::{DriverResult, FastestLap, RaceResult, RawValue};
