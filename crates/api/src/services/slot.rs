//! Available-slot service

use std::sync::Arc;

use neumoapp_gateway::renewal::RenewalClient;
use neumoapp_gateway::session::storage::StorageBackend;
use neumoapp_gateway::{Gateway, HttpRenewalClient, KeyringStorage, RequestSpec};

use crate::config::endpoints;
use crate::error::ApiResult;
use crate::models::{AvailableSlotsResponse, SlotQuery};

pub struct SlotService<R = HttpRenewalClient, S = KeyringStorage>
where
    R: RenewalClient + 'static,
    S: StorageBackend + 'static,
{
    gateway: Arc<Gateway<R, S>>,
}

impl<R, S> SlotService<R, S>
where
    R: RenewalClient + 'static,
    S: StorageBackend + 'static,
{
    #[must_use]
    pub fn new(gateway: Arc<Gateway<R, S>>) -> Self {
        Self { gateway }
    }

    /// Query bookable slots for a hospital, specialty, date, and shift.
    ///
    /// The date is sent as `YYYY-MM-DD`, matching the server's query schema.
    pub async fn available(&self, query: SlotQuery) -> ApiResult<AvailableSlotsResponse> {
        let spec = RequestSpec::get(endpoints::SLOTS_AVAILABLE)
            .with_query("hospital_id", query.hospital_id)
            .with_query("specialty_id", query.specialty_id)
            .with_query("date", query.date.format("%Y-%m-%d"))
            .with_query("shift", query.shift.as_str());

        let response = self.gateway.call(spec).await?;
        Ok(response.json()?)
    }
}
