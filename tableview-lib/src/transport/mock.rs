//! In-process transport over the mock service.

use std::sync::Arc;

use async_trait::async_trait;
use log::trace;

use crate::error::FetchError;
use crate::mock::MockVehicleService;
use crate::mock::Vehicle;
use crate::mock::VehicleQuery;
use crate::view::FetchKey;

use super::Transport;

/// Answers fetches directly from a [`MockVehicleService`].
#[derive(Debug, Clone)]
pub struct MockTransport {
    service: Arc<MockVehicleService>,
}

impl MockTransport {
    /// Wraps a service.
    pub fn new(service: MockVehicleService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Returns the wrapped service.
    pub fn service(&self) -> &MockVehicleService {
        &self.service
    }
}

#[async_trait]
impl Transport for MockTransport {
    type Row = Vehicle;

    async fn fetch(&self, key: &FetchKey) -> Result<Vec<Vehicle>, FetchError> {
        trace!("Mock fetch {}", key);
        Ok(self.service.page(&VehicleQuery::from(key)))
    }
}
