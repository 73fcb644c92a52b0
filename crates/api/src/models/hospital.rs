//! Hospital types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hospital site as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub address: String,
    pub district: Option<String>,
    pub city: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
    pub active: bool,
    // Timezone-aware server columns, unlike the rest of the catalog.
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
