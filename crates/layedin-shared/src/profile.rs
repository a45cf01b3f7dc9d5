//! The editable profile entity and its canonical serialized form.
//!
//! The autosave controller decides whether anything changed by comparing
//! canonical JSON strings byte for byte, so every editable field must live
//! on this struct. Optional fields are explicit `Option`s rather than a
//! loose key/value map.

use serde::{Deserialize, Serialize};

/// Complete snapshot of a user's editable profile at one instant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSnapshot {
    pub display_name: String,
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub location: Option<String>,
    pub years_experience: Option<u32>,
    pub last_company: Option<String>,
    pub open_to_work: bool,
    pub skills: Vec<String>,
    pub desired_roles: Vec<String>,
    pub contact_email: Option<String>,
}

impl ProfileSnapshot {
    /// Canonical serialized form. Two snapshots are considered equal iff
    /// these strings are byte-equal; field order is fixed by the struct
    /// definition so the output is deterministic.
    pub fn canonical_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
