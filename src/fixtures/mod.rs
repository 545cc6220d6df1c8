pub mod dataset;
pub mod generator;
pub mod model;
pub mod totals;

pub use dataset::Dataset;
pub use generator::{FixtureConfig, FixtureCounts};
