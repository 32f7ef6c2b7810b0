//! Domain identifier types with validation
//!
//! Newtype wrappers keep subject and record identifiers from being mixed up.
//! Both are stored trimmed and reject empty or whitespace-only values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subject (patient) identifier
///
/// # Examples
///
/// ```
/// use medirecord::domain::ids::SubjectId;
/// use std::str::FromStr;
///
/// let subject = SubjectId::from_str("P-1001").unwrap();
/// assert_eq!(subject.as_str(), "P-1001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubjectId(String);

impl SubjectId {
    /// Creates a new SubjectId from a string
    ///
    /// Surrounding whitespace is dropped. Returns `Err` if nothing is left.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = trimmed(id.into());
        if id.is_empty() {
            return Err("Subject ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the subject ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SubjectId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for SubjectId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SubjectId> for String {
    fn from(id: SubjectId) -> Self {
        id.0
    }
}

impl AsRef<str> for SubjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Record identifier, unique within one category list of a bundle
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Creates a new RecordId from a string
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = trimmed(id.into());
        if id.is_empty() {
            return Err("Record ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the record ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RecordId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn trimmed(id: String) -> String {
    if id.trim().len() == id.len() {
        id
    } else {
        id.trim().to_string()
    }
}
