//! Wire types for the Neumoapp REST API
//!
//! Field names and encodings follow the server's schemas exactly; dates and
//! times use `chrono` types so callers never handle raw strings.

pub mod appointment;
pub mod consultation_room;
pub mod hospital;
pub mod patient;
pub mod slot;
pub mod specialty;

pub use appointment::{
    Appointment, AppointmentCreate, AppointmentDetail, AppointmentStatus, AppointmentUpdate,
};
pub use consultation_room::{
    ConsultationRoom, ConsultationRoomSimple, ConsultationRoomWithSpecialties, SpecialtyRef,
};
pub use hospital::Hospital;
pub use patient::{Gender, Patient, PatientCreate, PatientLogin};
pub use slot::{AvailableSlotsResponse, Shift, SlotQuery, TimeSlot};
pub use specialty::Specialty;
