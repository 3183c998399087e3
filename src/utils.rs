pub mod data_uri;
pub mod names;
pub mod state;
pub mod telemetry;
