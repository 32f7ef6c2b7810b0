//! Integration tests for summary document layout and pagination

mod common;

use chrono::NaiveDate;
use common::sample_bundle;
use medirecord::core::layout::{
    FontWeight, LayoutEngine, LayoutOptions, PageKind, SummaryComposer,
};
use medirecord::domain::{Category, RecordId};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

#[test]
fn test_sample_bundle_outline() {
    let doc = SummaryComposer::default().compose(&sample_bundle(), date());

    assert_eq!(
        doc.outline(),
        vec![
            PageKind::Cover,
            PageKind::PersonalInformation,
            PageKind::Section(Category::VisitRecords),
            PageKind::Section(Category::Prescriptions),
            PageKind::Section(Category::TestResults),
            PageKind::Section(Category::Images),
            PageKind::Section(Category::Certificates),
            PageKind::Disclaimer,
        ]
    );
    assert_eq!(doc.title, "Patient Medical Records - John Doe");
}

#[test]
fn test_sample_bundle_text() {
    let doc = SummaryComposer::default().compose(&sample_bundle(), date());

    let cover = &doc.pages[0];
    assert!(cover.contains_text("PATIENT MEDICAL RECORDS"));
    assert!(cover.contains_text("ID: P-1001"));
    assert!(cover.contains_text("Generated on: 2024-03-01"));

    let personal = &doc.pages[1];
    assert!(personal.contains_text("Blood Type: O+"));
    assert!(personal.contains_text("• Peanuts"));
    assert!(personal.contains_text("• Type 2 Diabetes"));

    let prescriptions = doc
        .section_pages(Category::Prescriptions)
        .next()
        .unwrap();
    assert!(prescriptions.contains_text("PRESCRIPTIONS SUMMARY"));
    assert!(prescriptions
        .contains_text("Date: December 15, 2022 | Status: completed | Doctor: Dr. Sarah Johnson"));

    let certificates = doc.section_pages(Category::Certificates).next().unwrap();
    assert!(certificates
        .contains_text("Date: January 15, 2023 | Valid Until: Permanent | Status: valid"));

    let disclaimer = doc.pages.last().unwrap();
    assert!(disclaimer.contains_text("Patient ID: P-1001"));
}

#[test]
fn test_many_certificates_paginate_without_splitting_blocks() {
    let mut bundle = sample_bundle();
    let template = bundle.certificates[0].clone();
    bundle.certificates = (0..25)
        .map(|n| {
            let mut cert = template.clone();
            cert.id = RecordId::new(format!("cert-{n:03}")).unwrap();
            cert.title = format!("Certificate {n}");
            cert
        })
        .collect();

    let doc = SummaryComposer::default().compose(&bundle, date());
    let pages: Vec<_> = doc.section_pages(Category::Certificates).collect();
    assert_eq!(pages.len(), 3);

    assert!(!pages[0].continued);
    assert!(pages[1].continued && pages[2].continued);
    assert!(!pages[1].contains_text("CERTIFICATES SUMMARY"));

    // Every block keeps its title and both metadata lines on the same page
    for page in &pages {
        let titles = page
            .lines
            .iter()
            .filter(|l| l.weight == FontWeight::Bold && l.text.starts_with("Certificate "))
            .count();
        let doctors = page
            .lines
            .iter()
            .filter(|l| l.text.starts_with("Doctor: "))
            .count();
        assert_eq!(titles, doctors);
    }

    let per_page: Vec<usize> = pages
        .iter()
        .map(|p| p.lines.iter().filter(|l| l.text.starts_with("Doctor: ")).count())
        .collect();
    assert_eq!(per_page, vec![10, 10, 5]);
}

#[test]
fn test_empty_sections_can_be_omitted() {
    let mut bundle = sample_bundle();
    bundle.images.clear();
    bundle.test_results.clear();

    let doc = SummaryComposer::new(LayoutOptions {
        render_empty_sections: false,
    })
    .compose(&bundle, date());

    assert_eq!(doc.section_pages(Category::Images).count(), 0);
    assert_eq!(doc.section_pages(Category::TestResults).count(), 0);
    assert_eq!(doc.page_count(), 6);

    let with_empty = SummaryComposer::default().compose(&bundle, date());
    let images: Vec<_> = with_empty.section_pages(Category::Images).collect();
    assert_eq!(images.len(), 1);
    assert!(images[0].contains_text("MEDICAL IMAGES SUMMARY"));
}

#[test]
fn test_synthesized_pdf() {
    let engine = LayoutEngine::default();
    let bytes = engine.synthesize_at(&sample_bundle(), date()).unwrap();

    assert!(bytes.starts_with(b"%PDF"));
    assert!(bytes.len() > 1000);
}
