//! API module - Simulation service client

mod client;
mod response;

pub use client::{ApiError, SimulationBackend, SimulationClient};
pub use response::{ResponseData, SimulationResponse, STATUS_OK};
