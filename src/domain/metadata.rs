//! Free-form tag metadata attached to an uploaded session recording.

use serde::{Deserialize, Serialize};

/// Flat tag bundle describing one recorded session. All fields are free-form
/// text; nothing is validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionMetadata {
    pub group_name: String,
    pub teacher: String,
    /// "in-person" or "virtual"
    pub session_type: String,
    pub songs_taught: Vec<String>,
    pub ragas: Vec<String>,
    pub talas: Vec<String>,
    pub composers: Vec<String>,
}

impl SessionMetadata {
    pub fn new(
        group_name: String,
        teacher: String,
        session_type: String,
        songs_taught: Vec<String>,
        ragas: Vec<String>,
        talas: Vec<String>,
        composers: Vec<String>,
    ) -> Self {
        Self {
            group_name,
            teacher,
            session_type,
            songs_taught,
            ragas,
            talas,
            composers,
        }
    }
}
