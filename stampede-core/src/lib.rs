mod config;
mod constants;
mod data;
mod plan;

pub use config::*;
pub use constants::*;
pub use data::*;
pub use plan::*;
