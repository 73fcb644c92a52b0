//! # Neumoapp API
//!
//! Typed client for the Neumoapp scheduling server, built on
//! [`neumoapp_gateway`]: every call goes through the gateway facade, which
//! attaches the session credential, renews it single-flight on expiry, and
//! replays interrupted requests transparently. This crate adds the REST
//! surface on top — endpoint map, wire types, and one service per resource.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use neumoapp_api::services::{AppointmentService, AuthService};
//! use neumoapp_gateway::{Gateway, GatewayConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GatewayConfig::default();
//! let gateway = Arc::new(Gateway::with_defaults(&config, "Neumoapp")?);
//! gateway.initialize().await?;
//!
//! let auth = AuthService::new(Arc::clone(&gateway));
//! auth.login("12345678", "secret").await?;
//!
//! let appointments = AppointmentService::new(gateway);
//! let upcoming = appointments.upcoming(0, 5).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use error::{ApiError, ApiResult};
