//! Simulation Client Module
//! Posts the constants payload to the simulation service using ureq.

use crate::api::SimulationResponse;
use crate::form::ConstantsPayload;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        source: ureq::Error,
    },
    #[error("Invalid response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: ureq::Error,
    },
}

/// Anything that can run a simulation for a constants payload.
pub trait SimulationBackend: Send + Sync {
    fn simulate(&self, payload: &ConstantsPayload) -> Result<SimulationResponse, ApiError>;
}

/// Blocking HTTP client for the simulation endpoint.
pub struct SimulationClient {
    agent: ureq::Agent,
    endpoint: String,
}

impl SimulationClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SimulationBackend for SimulationClient {
    fn simulate(&self, payload: &ConstantsPayload) -> Result<SimulationResponse, ApiError> {
        tracing::debug!(endpoint = %self.endpoint, rlc = payload.rlc, "posting constants");

        let mut response = self
            .agent
            .post(&self.endpoint)
            .send_json(payload)
            .map_err(|source| ApiError::Request {
                endpoint: self.endpoint.clone(),
                source,
            })?;

        response
            .body_mut()
            .read_json::<SimulationResponse>()
            .map_err(|source| ApiError::Decode {
                endpoint: self.endpoint.clone(),
                source,
            })
    }
}
