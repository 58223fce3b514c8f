pub mod error;
pub mod log_rate;
pub mod types;
