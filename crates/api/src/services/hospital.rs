//! Hospital catalog service

use std::sync::Arc;

use neumoapp_gateway::renewal::RenewalClient;
use neumoapp_gateway::session::storage::StorageBackend;
use neumoapp_gateway::{Gateway, HttpRenewalClient, KeyringStorage, RequestSpec};

use crate::config::endpoints;
use crate::error::ApiResult;
use crate::models::Hospital;

pub struct HospitalService<R = HttpRenewalClient, S = KeyringStorage>
where
    R: RenewalClient + 'static,
    S: StorageBackend + 'static,
{
    gateway: Arc<Gateway<R, S>>,
}

impl<R, S> HospitalService<R, S>
where
    R: RenewalClient + 'static,
    S: StorageBackend + 'static,
{
    #[must_use]
    pub fn new(gateway: Arc<Gateway<R, S>>) -> Self {
        Self { gateway }
    }

    /// List all hospitals.
    pub async fn list(&self) -> ApiResult<Vec<Hospital>> {
        let response = self.gateway.call(RequestSpec::get(endpoints::HOSPITALS)).await?;
        Ok(response.json()?)
    }

    /// Fetch one hospital by id.
    pub async fn get(&self, id: i64) -> ApiResult<Hospital> {
        let response = self.gateway.call(RequestSpec::get(endpoints::hospital_by_id(id))).await?;
        Ok(response.json()?)
    }
}
