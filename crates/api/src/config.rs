//! Neumoapp API endpoint map
//!
//! One place for every server route, so services never format paths inline.

/// Endpoint paths, grouped the way the server mounts its routers.
pub mod endpoints {
    pub const AUTH_REGISTER: &str = "/auth/register";
    pub const AUTH_LOGIN: &str = "/auth/login";
    pub const AUTH_ME: &str = "/auth/me";
    pub const AUTH_REFRESH: &str = "/auth/refresh";

    pub const SPECIALTIES: &str = "/specialties";
    pub const HOSPITALS: &str = "/hospitals";
    pub const CONSULTATION_ROOMS: &str = "/consultation-rooms";
    pub const SLOTS_AVAILABLE: &str = "/slots/available";

    pub const APPOINTMENTS: &str = "/appointments";
    pub const MY_APPOINTMENTS: &str = "/appointments/my-appointments";
    pub const UPCOMING_APPOINTMENTS: &str = "/appointments/upcoming";

    #[must_use]
    pub fn specialty_by_id(id: i64) -> String {
        format!("{SPECIALTIES}/{id}")
    }

    #[must_use]
    pub fn hospital_by_id(id: i64) -> String {
        format!("{HOSPITALS}/{id}")
    }

    #[must_use]
    pub fn consultation_room_by_id(id: i64) -> String {
        format!("{CONSULTATION_ROOMS}/{id}")
    }

    #[must_use]
    pub fn consultation_rooms_by_specialty(specialty_id: i64) -> String {
        format!("{CONSULTATION_ROOMS}/by-specialty/{specialty_id}")
    }

    #[must_use]
    pub fn appointment_by_id(id: i64) -> String {
        format!("{APPOINTMENTS}/{id}")
    }
}
