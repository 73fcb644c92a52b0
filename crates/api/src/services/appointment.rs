//! Appointment service
//!
//! Booking and management of the patient's own appointments. The server
//! scopes every listing to the authenticated patient; there is no patient id
//! parameter on this surface.

use std::sync::Arc;

use neumoapp_gateway::renewal::RenewalClient;
use neumoapp_gateway::session::storage::StorageBackend;
use neumoapp_gateway::{Gateway, GatewayError, HttpRenewalClient, KeyringStorage, RequestSpec};

use crate::config::endpoints;
use crate::error::ApiResult;
use crate::models::{Appointment, AppointmentCreate, AppointmentDetail, AppointmentUpdate};

pub struct AppointmentService<R = HttpRenewalClient, S = KeyringStorage>
where
    R: RenewalClient + 'static,
    S: StorageBackend + 'static,
{
    gateway: Arc<Gateway<R, S>>,
}

impl<R, S> AppointmentService<R, S>
where
    R: RenewalClient + 'static,
    S: StorageBackend + 'static,
{
    #[must_use]
    pub fn new(gateway: Arc<Gateway<R, S>>) -> Self {
        Self { gateway }
    }

    /// Book a new appointment.
    ///
    /// # Errors
    /// A slot taken between the availability query and this call surfaces as
    /// a server rejection with the conflict detail.
    pub async fn create(&self, appointment: &AppointmentCreate) -> ApiResult<Appointment> {
        let body = serde_json::to_value(appointment)
            .map_err(|e| GatewayError::Internal(e.to_string()))?;
        let spec = RequestSpec::post(endpoints::APPOINTMENTS).with_json(body);

        let response = self.gateway.call(spec).await?;
        Ok(response.json()?)
    }

    /// Fetch one appointment with its related records expanded.
    pub async fn get(&self, id: i64) -> ApiResult<AppointmentDetail> {
        let response =
            self.gateway.call(RequestSpec::get(endpoints::appointment_by_id(id))).await?;
        Ok(response.json()?)
    }

    /// List the patient's appointments (dashboard view).
    pub async fn my_appointments(&self) -> ApiResult<Vec<AppointmentDetail>> {
        let response = self.gateway.call(RequestSpec::get(endpoints::MY_APPOINTMENTS)).await?;
        Ok(response.json()?)
    }

    /// Page through the patient's upcoming appointments.
    pub async fn upcoming(&self, skip: u32, limit: u32) -> ApiResult<Vec<AppointmentDetail>> {
        let spec = RequestSpec::get(endpoints::UPCOMING_APPOINTMENTS)
            .with_query("skip", skip)
            .with_query("limit", limit);

        let response = self.gateway.call(spec).await?;
        Ok(response.json()?)
    }

    /// Apply a partial update (status change, observations).
    pub async fn update(&self, id: i64, update: &AppointmentUpdate) -> ApiResult<Appointment> {
        let body = serde_json::to_value(update)
            .map_err(|e| GatewayError::Internal(e.to_string()))?;
        let spec = RequestSpec::patch(endpoints::appointment_by_id(id)).with_json(body);

        let response = self.gateway.call(spec).await?;
        Ok(response.json()?)
    }

    /// Cancel an appointment.
    pub async fn cancel(&self, id: i64) -> ApiResult<()> {
        self.gateway.call(RequestSpec::delete(endpoints::appointment_by_id(id))).await?;
        Ok(())
    }
}
