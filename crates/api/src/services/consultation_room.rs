//! Consultation room catalog service

use std::sync::Arc;

use neumoapp_gateway::renewal::RenewalClient;
use neumoapp_gateway::session::storage::StorageBackend;
use neumoapp_gateway::{Gateway, HttpRenewalClient, KeyringStorage, RequestSpec};

use crate::config::endpoints;
use crate::error::ApiResult;
use crate::models::{ConsultationRoom, ConsultationRoomWithSpecialties};

pub struct ConsultationRoomService<R = HttpRenewalClient, S = KeyringStorage>
where
    R: RenewalClient + 'static,
    S: StorageBackend + 'static,
{
    gateway: Arc<Gateway<R, S>>,
}

impl<R, S> ConsultationRoomService<R, S>
where
    R: RenewalClient + 'static,
    S: StorageBackend + 'static,
{
    #[must_use]
    pub fn new(gateway: Arc<Gateway<R, S>>) -> Self {
        Self { gateway }
    }

    /// List all rooms with their specialty assignments.
    pub async fn list(&self) -> ApiResult<Vec<ConsultationRoomWithSpecialties>> {
        let response = self.gateway.call(RequestSpec::get(endpoints::CONSULTATION_ROOMS)).await?;
        Ok(response.json()?)
    }

    /// Fetch one room by id.
    pub async fn get(&self, id: i64) -> ApiResult<ConsultationRoom> {
        let response =
            self.gateway.call(RequestSpec::get(endpoints::consultation_room_by_id(id))).await?;
        Ok(response.json()?)
    }

    /// List the rooms assigned to a specialty.
    pub async fn by_specialty(&self, specialty_id: i64) -> ApiResult<Vec<ConsultationRoom>> {
        let spec = RequestSpec::get(endpoints::consultation_rooms_by_specialty(specialty_id));
        let response = self.gateway.call(spec).await?;
        Ok(response.json()?)
    }
}
