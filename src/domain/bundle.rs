//! Record bundle: the read-only snapshot exported in one operation
//!
//! A [`RecordBundle`] is built fresh for each export and never mutated once it
//! has been handed to the layout engine or the archive builder. Code that needs
//! to treat records of any category uniformly goes through [`RecordEntry`] and
//! matches on it exhaustively.

use super::errors::MedirecordError;
use super::ids::RecordId;
use super::records::{Certificate, MedicalImage, Prescription, TestResult, VisitRecord};
use super::result::Result;
use super::subject::Subject;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// The five record categories, in canonical export order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    VisitRecords,
    Prescriptions,
    TestResults,
    Images,
    Certificates,
}

impl Category {
    /// All categories in canonical order
    pub const ALL: [Category; 5] = [
        Category::VisitRecords,
        Category::Prescriptions,
        Category::TestResults,
        Category::Images,
        Category::Certificates,
    ];

    /// Archive folder holding this category's assets
    pub fn folder_name(&self) -> &'static str {
        match self {
            Category::VisitRecords => "medical_records",
            Category::Prescriptions => "prescriptions",
            Category::TestResults => "test_results",
            Category::Images => "medical_images",
            Category::Certificates => "certificates",
        }
    }

    /// Section header used in the summary document
    pub fn section_title(&self) -> &'static str {
        match self {
            Category::VisitRecords => "MEDICAL RECORDS SUMMARY",
            Category::Prescriptions => "PRESCRIPTIONS SUMMARY",
            Category::TestResults => "TEST RESULTS SUMMARY",
            Category::Images => "MEDICAL IMAGES SUMMARY",
            Category::Certificates => "CERTIFICATES SUMMARY",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.folder_name())
    }
}

/// One record of any category, borrowed from a bundle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordEntry<'a> {
    Visit(&'a VisitRecord),
    Prescription(&'a Prescription),
    TestResult(&'a TestResult),
    Image(&'a MedicalImage),
    Certificate(&'a Certificate),
}

impl<'a> RecordEntry<'a> {
    /// Category this entry belongs to
    pub fn category(&self) -> Category {
        match self {
            RecordEntry::Visit(_) => Category::VisitRecords,
            RecordEntry::Prescription(_) => Category::Prescriptions,
            RecordEntry::TestResult(_) => Category::TestResults,
            RecordEntry::Image(_) => Category::Images,
            RecordEntry::Certificate(_) => Category::Certificates,
        }
    }

    pub fn id(&self) -> &'a RecordId {
        match self {
            RecordEntry::Visit(r) => &r.id,
            RecordEntry::Prescription(r) => &r.id,
            RecordEntry::TestResult(r) => &r.id,
            RecordEntry::Image(r) => &r.id,
            RecordEntry::Certificate(r) => &r.id,
        }
    }

    pub fn title(&self) -> &'a str {
        match self {
            RecordEntry::Visit(r) => &r.title,
            RecordEntry::Prescription(r) => &r.title,
            RecordEntry::TestResult(r) => &r.title,
            RecordEntry::Image(r) => &r.title,
            RecordEntry::Certificate(r) => &r.title,
        }
    }

    /// Locator of the remote asset attached to this record, if any
    ///
    /// Blank locators count as absent.
    pub fn asset_locator(&self) -> Option<&'a str> {
        let locator = match self {
            RecordEntry::Visit(r) => r.asset_url.as_deref(),
            RecordEntry::Prescription(r) => Some(r.asset_url.as_str()),
            RecordEntry::TestResult(r) => r.asset_url.as_deref(),
            RecordEntry::Image(r) => Some(r.asset_url.as_str()),
            RecordEntry::Certificate(r) => Some(r.asset_url.as_str()),
        };
        locator.filter(|l| !l.trim().is_empty())
    }
}

/// Complete snapshot of one subject's exportable records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordBundle {
    /// Identity and personal information
    #[serde(rename = "personalInfo")]
    pub subject: Subject,

    #[serde(rename = "medicalRecords", default)]
    pub visit_records: Vec<VisitRecord>,

    #[serde(default)]
    pub prescriptions: Vec<Prescription>,

    #[serde(default)]
    pub test_results: Vec<TestResult>,

    #[serde(rename = "medicalImages", default)]
    pub images: Vec<MedicalImage>,

    #[serde(default)]
    pub certificates: Vec<Certificate>,
}

impl RecordBundle {
    /// Create a bundle with no records
    pub fn new(subject: Subject) -> Self {
        Self {
            subject,
            visit_records: Vec::new(),
            prescriptions: Vec::new(),
            test_results: Vec::new(),
            images: Vec::new(),
            certificates: Vec::new(),
        }
    }

    /// Entries of one category, in list order
    pub fn entries(&self, category: Category) -> Vec<RecordEntry<'_>> {
        match category {
            Category::VisitRecords => self.visit_records.iter().map(RecordEntry::Visit).collect(),
            Category::Prescriptions => self
                .prescriptions
                .iter()
                .map(RecordEntry::Prescription)
                .collect(),
            Category::TestResults => self
                .test_results
                .iter()
                .map(RecordEntry::TestResult)
                .collect(),
            Category::Images => self.images.iter().map(RecordEntry::Image).collect(),
            Category::Certificates => self
                .certificates
                .iter()
                .map(RecordEntry::Certificate)
                .collect(),
        }
    }

    /// Number of records in a category
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::VisitRecords => self.visit_records.len(),
            Category::Prescriptions => self.prescriptions.len(),
            Category::TestResults => self.test_results.len(),
            Category::Images => self.images.len(),
            Category::Certificates => self.certificates.len(),
        }
    }

    /// Total number of records across all categories
    pub fn total_records(&self) -> usize {
        Category::ALL.iter().map(|c| self.count(*c)).sum()
    }

    /// Check the bundle invariants
    ///
    /// # Errors
    ///
    /// Returns [`MedirecordError::Validation`] when the subject name is blank or
    /// a record id repeats within its own category.
    pub fn validate(&self) -> Result<()> {
        if self.subject.name.trim().is_empty() {
            return Err(MedirecordError::Validation(format!(
                "subject {} has an empty name",
                self.subject.id
            )));
        }

        for category in Category::ALL {
            let mut seen = HashSet::new();
            for entry in self.entries(category) {
                if !seen.insert(entry.id()) {
                    return Err(MedirecordError::Validation(format!(
                        "duplicate record id '{}' in {}",
                        entry.id(),
                        category
                    )));
                }
            }
        }

        Ok(())
    }
}
