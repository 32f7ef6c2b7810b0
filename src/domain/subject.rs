//! Subject (patient) identity and personal information

use super::ids::SubjectId;
use serde::{Deserialize, Serialize};

/// Personal and identity information of the exported subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Subject identifier
    pub id: SubjectId,

    /// Full display name
    pub name: String,

    /// Date of birth as a display string
    pub date_of_birth: String,

    /// Gender / sex
    #[serde(default)]
    pub gender: String,

    /// Blood type (e.g. "O+")
    #[serde(default)]
    pub blood_type: String,

    /// Postal address
    #[serde(default)]
    pub address: String,

    /// Phone number
    #[serde(default)]
    pub phone: String,

    /// Email address
    #[serde(default)]
    pub email: String,

    /// Emergency contact, free text
    #[serde(default)]
    pub emergency_contact: String,

    /// Known allergies, in display order
    #[serde(default)]
    pub allergies: Vec<String>,

    /// Chronic conditions, in display order
    #[serde(default)]
    pub chronic_conditions: Vec<String>,
}

impl Subject {
    /// Label/value pairs shown on the personal information page, in order
    pub fn personal_details(&self) -> [(&'static str, &str); 8] {
        [
            ("Name", self.name.as_str()),
            ("Date of Birth", self.date_of_birth.as_str()),
            ("Gender", self.gender.as_str()),
            ("Blood Type", self.blood_type.as_str()),
            ("Address", self.address.as_str()),
            ("Phone", self.phone.as_str()),
            ("Email", self.email.as_str()),
            ("Emergency Contact", self.emergency_contact.as_str()),
        ]
    }
}
