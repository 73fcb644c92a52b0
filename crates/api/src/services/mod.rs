//! Typed service wrappers over the gateway
//!
//! One service per server resource. Every service holds a shared gateway
//! handle, so all of them ride the same credential store and single-flight
//! renewal: a burst of dashboard calls that hits an expired token still
//! produces exactly one renewal.

pub mod appointment;
pub mod auth;
pub mod consultation_room;
pub mod hospital;
pub mod slot;
pub mod specialty;

pub use appointment::AppointmentService;
pub use auth::AuthService;
pub use consultation_room::ConsultationRoomService;
pub use hospital::HospitalService;
pub use slot::SlotService;
pub use specialty::SpecialtyService;
