//! Record types for the five exportable categories

use super::ids::RecordId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A clinical visit record (consultation note, report, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRecord {
    pub id: RecordId,
    pub title: String,
    pub date: String,
    /// Authoring clinician
    #[serde(rename = "doctor")]
    pub clinician: String,
    /// Free-form category tag (e.g. "consultation")
    #[serde(rename = "type")]
    pub category: String,
    pub content: String,
    /// Optional locator of the full report document
    #[serde(rename = "pdfUrl", default, skip_serializing_if = "Option::is_none")]
    pub asset_url: Option<String>,
}

/// Prescription lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrescriptionStatus {
    Active,
    Completed,
}

impl fmt::Display for PrescriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrescriptionStatus::Active => write!(f, "active"),
            PrescriptionStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A prescription with its signed document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: RecordId,
    pub title: String,
    pub date: String,
    #[serde(rename = "doctor")]
    pub clinician: String,
    pub status: PrescriptionStatus,
    /// Dosage instructions
    pub details: String,
    pub expiry_date: String,
    #[serde(rename = "pdfUrl")]
    pub asset_url: String,
}

/// A laboratory or imaging test result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: RecordId,
    pub title: String,
    pub date: String,
    /// Free-form category tag (e.g. "blood", "imaging")
    #[serde(rename = "type")]
    pub category: String,
    #[serde(rename = "doctor")]
    pub clinician: String,
    pub results: String,
    #[serde(rename = "pdfUrl", default, skip_serializing_if = "Option::is_none")]
    pub asset_url: Option<String>,
}

/// A medical image (X-ray, MRI, ultrasound, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalImage {
    pub id: RecordId,
    pub title: String,
    pub date: String,
    /// Imaging modality
    #[serde(rename = "type")]
    pub modality: String,
    #[serde(rename = "doctor")]
    pub clinician: String,
    #[serde(rename = "imageUrl")]
    pub asset_url: String,
    pub description: String,
}

/// Certificate validity status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateStatus {
    Valid,
    Expired,
    Revoked,
}

impl fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CertificateStatus::Valid => write!(f, "valid"),
            CertificateStatus::Expired => write!(f, "expired"),
            CertificateStatus::Revoked => write!(f, "revoked"),
        }
    }
}

/// A medical certificate (fitness, vaccination, sick leave, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: RecordId,
    pub title: String,
    pub date: String,
    #[serde(rename = "doctor")]
    pub clinician: String,
    /// End of validity; a date or a label such as "Permanent"
    pub valid_until: String,
    pub status: CertificateStatus,
    /// Free-form certificate type (e.g. "vaccination")
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "pdfUrl")]
    pub asset_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prescription_wire_format() {
        let json = r#"{
            "id": "presc-001",
            "title": "Lisinopril 10mg",
            "date": "April 10, 2023",
            "doctor": "Dr. Sarah Johnson",
            "status": "active",
            "details": "Take one tablet by mouth once daily.",
            "expiryDate": "October 10, 2023",
            "pdfUrl": "/sample-pdfs/prescription-lisinopril.pdf"
        }"#;

        let prescription: Prescription = serde_json::from_str(json).unwrap();
        assert_eq!(prescription.status, PrescriptionStatus::Active);
        assert_eq!(prescription.clinician, "Dr. Sarah Johnson");
        assert_eq!(prescription.expiry_date, "October 10, 2023");
    }

    #[test]
    fn test_visit_record_optional_asset() {
        let json = r#"{
            "id": "rec-009",
            "title": "Phone consultation",
            "date": "May 1, 2023",
            "doctor": "Dr. Emily Rodriguez",
            "type": "consultation",
            "content": "Follow-up call."
        }"#;

        let record: VisitRecord = serde_json::from_str(json).unwrap();
        assert!(record.asset_url.is_none());

        let back = serde_json::to_value(&record).unwrap();
        assert!(back.get("pdfUrl").is_none());
        assert_eq!(back["type"], "consultation");
    }

    #[test]
    fn test_unknown_status_rejected() {
        let json = r#"{
            "id": "cert-1", "title": "t", "date": "d", "doctor": "c",
            "validUntil": "Permanent", "status": "pending", "type": "fitness",
            "pdfUrl": "/x.pdf"
        }"#;
        assert!(serde_json::from_str::<Certificate>(json).is_err());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(PrescriptionStatus::Completed.to_string(), "completed");
        assert_eq!(CertificateStatus::Expired.to_string(), "expired");
    }
}
