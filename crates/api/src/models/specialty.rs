//! Medical specialty types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Medical specialty as returned by the server.
///
/// `consultation_rooms` is the number of rooms the specialty can run in
/// parallel, not a list of room records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialty {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub consultation_rooms: i64,
    pub active: bool,
    // Naive server column; serialized without an offset.
    pub created_at: NaiveDateTime,
}
