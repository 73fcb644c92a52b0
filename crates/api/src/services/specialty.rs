//! Specialty catalog service

use std::sync::Arc;

use neumoapp_gateway::renewal::RenewalClient;
use neumoapp_gateway::session::storage::StorageBackend;
use neumoapp_gateway::{Gateway, HttpRenewalClient, KeyringStorage, RequestSpec};

use crate::config::endpoints;
use crate::error::ApiResult;
use crate::models::Specialty;

pub struct SpecialtyService<R = HttpRenewalClient, S = KeyringStorage>
where
    R: RenewalClient + 'static,
    S: StorageBackend + 'static,
{
    gateway: Arc<Gateway<R, S>>,
}

impl<R, S> SpecialtyService<R, S>
where
    R: RenewalClient + 'static,
    S: StorageBackend + 'static,
{
    #[must_use]
    pub fn new(gateway: Arc<Gateway<R, S>>) -> Self {
        Self { gateway }
    }

    /// List all active specialties.
    pub async fn list(&self) -> ApiResult<Vec<Specialty>> {
        let response = self.gateway.call(RequestSpec::get(endpoints::SPECIALTIES)).await?;
        Ok(response.json()?)
    }

    /// Fetch one specialty by id.
    pub async fn get(&self, id: i64) -> ApiResult<Specialty> {
        let response = self.gateway.call(RequestSpec::get(endpoints::specialty_by_id(id))).await?;
        Ok(response.json()?)
    }
}
