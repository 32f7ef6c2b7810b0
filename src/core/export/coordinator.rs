//! Export coordinator - main orchestrator for the export process
//!
//! This module sequences one export: fetch the bundle, synthesize the summary,
//! build the archive and hand it to the delivery sink, reporting progress on
//! the way. Fatal errors are logged once here and returned unchanged.

use super::progress::{ProgressSink, ProgressTracker, BUNDLE_RECEIVED, COMPLETE, FETCH_STARTED};
use super::report::{sha256_hex, ExportReport};
use super::state::{ActiveExport, ExportPhase, PhaseTracker};
use crate::adapters::assets::{create_fetcher, AssetFetcher};
use crate::adapters::delivery::{ArchiveSink, DirectorySink};
use crate::adapters::provider::{create_provider, RecordBundleProvider};
use crate::config::MedirecordConfig;
use crate::core::archive::{ArchiveBuilder, ArchiveOutcome, ArchiveSettings};
use crate::core::layout::{LayoutEngine, LayoutOptions};
use crate::domain::ids::SubjectId;
use crate::domain::{MedirecordError, ProviderError, RecordBundle, Result};
use chrono::{NaiveDate, Utc};
use futures::FutureExt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

/// Archive file name for a subject and date
///
/// ```
/// use medirecord::core::export::archive_file_name;
/// use medirecord::domain::SubjectId;
/// use chrono::NaiveDate;
///
/// let subject = SubjectId::new("P-1001").unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// assert_eq!(archive_file_name(&subject, date), "patient_data_P-1001_2024-03-01.zip");
/// ```
pub fn archive_file_name(subject: &SubjectId, date: NaiveDate) -> String {
    format!("patient_data_{}_{}.zip", subject, date.format("%Y-%m-%d"))
}

/// Timing and layout settings of the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSettings {
    /// Interval between progress ticks while archiving
    pub progress_tick: Duration,
    /// Grace delay before progress returns to idle after success
    pub reset_delay: Duration,
    pub layout: LayoutOptions,
    pub archive: ArchiveSettings,
}

impl ExportSettings {
    pub fn from_config(config: &MedirecordConfig) -> Self {
        Self {
            progress_tick: Duration::from_millis(config.export.progress_tick_ms),
            reset_delay: Duration::from_millis(config.export.reset_delay_ms),
            layout: LayoutOptions {
                render_empty_sections: config.export.render_empty_sections,
            },
            archive: ArchiveSettings::from_config(&config.assets),
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            progress_tick: Duration::from_millis(500),
            reset_delay: Duration::from_millis(1000),
            layout: LayoutOptions::default(),
            archive: ArchiveSettings::default(),
        }
    }
}

/// Export coordinator
pub struct ExportCoordinator {
    provider: Arc<dyn RecordBundleProvider>,
    layout: LayoutEngine,
    archive: ArchiveBuilder,
    sink: Arc<dyn ArchiveSink>,
    settings: ExportSettings,
    phase: PhaseTracker,
}

impl ExportCoordinator {
    /// Create a coordinator from its collaborators
    pub fn new(
        provider: Arc<dyn RecordBundleProvider>,
        fetcher: Arc<dyn AssetFetcher>,
        sink: Arc<dyn ArchiveSink>,
        settings: ExportSettings,
    ) -> Self {
        Self {
            provider,
            layout: LayoutEngine::new(settings.layout),
            archive: ArchiveBuilder::new(fetcher, settings.archive),
            sink,
            settings,
            phase: PhaseTracker::default(),
        }
    }

    /// Create a coordinator with the adapters selected by configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if an adapter cannot be built.
    pub fn from_config(config: &MedirecordConfig) -> Result<Self> {
        let provider = create_provider(&config.provider)?;
        let fetcher = create_fetcher(&config.assets)?;
        let sink = Arc::new(DirectorySink::new(&config.export.output_dir));

        tracing::debug!(
            provider = provider.name(),
            output_dir = %config.export.output_dir,
            "Export coordinator configured"
        );

        Ok(Self::new(
            provider,
            fetcher,
            sink,
            ExportSettings::from_config(config),
        ))
    }

    /// Phase of the export currently running, `Idle` when none is
    pub fn phase(&self) -> ExportPhase {
        self.phase.current()
    }

    /// Export one subject's records
    ///
    /// On success the archive has been delivered and progress has gone to 100
    /// and, after the reset delay, back to 0. On failure progress returns to 0
    /// immediately and nothing is delivered.
    ///
    /// The phase is back to `Idle` as soon as delivery completes, so a new export
    /// may start while this call is still waiting out the reset delay.
    ///
    /// # Errors
    ///
    /// - `ExportInProgress` if this coordinator is already exporting
    /// - `BundleUnavailable` / `Validation` if the bundle cannot be used, including
    ///   a bundle that belongs to a different subject
    /// - `Layout`, `Archive` or `Delivery` for failures in the later steps
    pub async fn export_records(
        &self,
        subject: &SubjectId,
        progress: &dyn ProgressSink,
    ) -> Result<ExportReport> {
        self.export_records_until(subject, progress, std::future::pending())
            .await
    }

    /// Export one subject's records, stopping early when `shutdown` completes
    ///
    /// Shutdown is honoured up to the start of delivery; a delivery already under
    /// way runs to completion. A cancelled export fails with `Cancelled`, resets
    /// progress and delivers nothing.
    pub async fn export_records_until<S>(
        &self,
        subject: &SubjectId,
        progress: &dyn ProgressSink,
        shutdown: S,
    ) -> Result<ExportReport>
    where
        S: Future<Output = ()>,
    {
        let active = match self.phase.begin() {
            Ok(active) => active,
            Err(e) => {
                tracing::warn!(subject_id = %subject, "Export rejected, another export is running");
                return Err(e);
            }
        };

        let export_id = Uuid::new_v4();
        crate::log_export_start!(subject, export_id);

        tokio::pin!(shutdown);
        let mut tracker = ProgressTracker::new(progress);
        let result = self
            .run(&active, subject, export_id, &mut tracker, shutdown.as_mut())
            .await;
        drop(active);

        match result {
            Ok(report) => {
                report.log_summary();
                crate::log_export_complete!(report.file_name, report.entries.len(), report.duration);
                tracker.reset_after(self.settings.reset_delay).await;
                Ok(report)
            }
            Err(MedirecordError::Cancelled) => {
                tracing::warn!(subject_id = %subject, export_id = %export_id, "Export cancelled");
                tracker.reset();
                Err(MedirecordError::Cancelled)
            }
            Err(e) => {
                tracing::error!(
                    subject_id = %subject,
                    export_id = %export_id,
                    error = %e,
                    "Export failed"
                );
                tracker.reset();
                Err(e)
            }
        }
    }

    async fn run<S>(
        &self,
        active: &ActiveExport<'_>,
        subject: &SubjectId,
        export_id: Uuid,
        tracker: &mut ProgressTracker<'_>,
        mut shutdown: Pin<&mut S>,
    ) -> Result<ExportReport>
    where
        S: Future<Output = ()>,
    {
        let started = Instant::now();
        let today = Utc::now().date_naive();

        tracker.advance_to(FETCH_STARTED);
        let bundle = tokio::select! {
            biased;
            _ = shutdown.as_mut() => return Err(MedirecordError::Cancelled),
            fetched = self.provider.fetch_bundle(subject) => fetched?,
        };
        bundle.validate()?;
        if bundle.subject.id != *subject {
            return Err(ProviderError::InvalidResponse(format!(
                "requested subject '{subject}' but received records for '{}'",
                bundle.subject.id
            ))
            .into());
        }
        tracker.advance_to(BUNDLE_RECEIVED);
        tracing::info!(
            subject_id = %subject,
            records = bundle.total_records(),
            "Record bundle received"
        );

        active.advance(ExportPhase::Synthesizing)?;
        let summary = self.layout.synthesize_at(&bundle, today)?;

        active.advance(ExportPhase::Archiving)?;
        let outcome = self
            .archive_with_progress(&bundle, &summary, tracker, shutdown.as_mut())
            .await?;

        if shutdown.as_mut().now_or_never().is_some() {
            return Err(MedirecordError::Cancelled);
        }

        active.advance(ExportPhase::Delivering)?;
        let file_name = archive_file_name(subject, today);
        let delivered = self.sink.deliver(&file_name, &outcome.bytes).await?;
        tracker.advance_to(COMPLETE);

        active.advance(ExportPhase::Idle)?;

        Ok(ExportReport {
            export_id,
            subject_id: subject.clone(),
            file_name,
            location: delivered.location,
            archive_size: outcome.bytes.len(),
            sha256: sha256_hex(&outcome.bytes),
            record_count: bundle.total_records(),
            entries: outcome.entries,
            skipped: outcome.skipped,
            duration: started.elapsed(),
        })
    }

    /// Build the archive while ticking progress toward the archiving ceiling
    async fn archive_with_progress<S>(
        &self,
        bundle: &RecordBundle,
        summary: &[u8],
        tracker: &mut ProgressTracker<'_>,
        mut shutdown: Pin<&mut S>,
    ) -> Result<ArchiveOutcome>
    where
        S: Future<Output = ()>,
    {
        let build = self.archive.build(bundle, summary);
        tokio::pin!(build);

        let period = self.settings.progress_tick.max(Duration::from_millis(1));
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.as_mut() => return Err(MedirecordError::Cancelled),
                result = &mut build => return result,
                _ = ticker.tick() => tracker.tick(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::delivery::Delivered;
    use crate::core::export::progress::NoProgress;
    use crate::domain::records::{Prescription, PrescriptionStatus};
    use crate::domain::{AssetError, Subject};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StaticProvider(Option<RecordBundle>);

    #[async_trait]
    impl RecordBundleProvider for StaticProvider {
        async fn fetch_bundle(
            &self,
            subject: &SubjectId,
        ) -> std::result::Result<RecordBundle, ProviderError> {
            self.0
                .clone()
                .ok_or_else(|| ProviderError::NotFound(subject.to_string()))
        }

        fn name(&self) -> &'static str {
            "static"
        }
    }

    struct NoAssets;

    #[async_trait]
    impl AssetFetcher for NoAssets {
        async fn fetch(&self, locator: &str) -> std::result::Result<Vec<u8>, AssetError> {
            Err(AssetError::Unresolvable(locator.to_string()))
        }
    }

    #[derive(Default)]
    struct MemorySink {
        delivered: Mutex<Vec<(String, usize)>>,
    }

    #[async_trait]
    impl ArchiveSink for MemorySink {
        async fn deliver(&self, file_name: &str, bytes: &[u8]) -> Result<Delivered> {
            self.delivered
                .lock()
                .unwrap()
                .push((file_name.to_string(), bytes.len()));
            Ok(Delivered {
                location: file_name.into(),
            })
        }
    }

    fn subject() -> SubjectId {
        SubjectId::new("P-1001").unwrap()
    }

    fn bundle() -> RecordBundle {
        RecordBundle::new(Subject {
            id: subject(),
            name: "John Doe".to_string(),
            date_of_birth: "1980-05-15".to_string(),
            gender: String::new(),
            blood_type: String::new(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            emergency_contact: String::new(),
            allergies: vec![],
            chronic_conditions: vec![],
        })
    }

    fn settings() -> ExportSettings {
        ExportSettings {
            progress_tick: Duration::from_millis(5),
            reset_delay: Duration::ZERO,
            ..Default::default()
        }
    }

    #[test]
    fn test_archive_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 5).unwrap();
        assert_eq!(
            archive_file_name(&subject(), date),
            "patient_data_P-1001_2024-12-05.zip"
        );
        assert_eq!(
            archive_file_name(&SubjectId::new(" P-1001 ").unwrap(), date),
            "patient_data_P-1001_2024-12-05.zip"
        );
    }

    #[tokio::test]
    async fn test_export_empty_bundle() {
        let sink = Arc::new(MemorySink::default());
        let coordinator = ExportCoordinator::new(
            Arc::new(StaticProvider(Some(bundle()))),
            Arc::new(NoAssets),
            sink.clone(),
            settings(),
        );

        let report = coordinator.export_records(&subject(), &NoProgress).await.unwrap();

        assert!(report.is_complete());
        assert_eq!(report.entries.len(), 6);
        assert_eq!(report.sha256.len(), 64);
        assert_eq!(sink.delivered.lock().unwrap().len(), 1);
        assert_eq!(coordinator.phase(), ExportPhase::Idle);
    }

    #[tokio::test]
    async fn test_missing_bundle_is_fatal() {
        let sink = Arc::new(MemorySink::default());
        let coordinator = ExportCoordinator::new(
            Arc::new(StaticProvider(None)),
            Arc::new(NoAssets),
            sink.clone(),
            settings(),
        );
        let seen = Mutex::new(Vec::new());
        let progress = |p: u8| seen.lock().unwrap().push(p);

        let err = coordinator
            .export_records(&subject(), &progress)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            MedirecordError::BundleUnavailable(ProviderError::NotFound(_))
        ));
        assert!(sink.delivered.lock().unwrap().is_empty());
        assert_eq!(*seen.lock().unwrap(), vec![10, 0]);
        assert_eq!(coordinator.phase(), ExportPhase::Idle);
    }

    #[tokio::test]
    async fn test_invalid_bundle_is_fatal() {
        let mut invalid = bundle();
        invalid.subject.name = "  ".to_string();
        let coordinator = ExportCoordinator::new(
            Arc::new(StaticProvider(Some(invalid))),
            Arc::new(NoAssets),
            Arc::new(MemorySink::default()),
            settings(),
        );

        let err = coordinator
            .export_records(&subject(), &NoProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, MedirecordError::Validation(_)));
    }

    #[tokio::test]
    async fn test_bundle_for_other_subject_is_rejected() {
        let mut other = bundle();
        other.subject.id = SubjectId::new("P-2002").unwrap();
        let sink = Arc::new(MemorySink::default());
        let coordinator = ExportCoordinator::new(
            Arc::new(StaticProvider(Some(other))),
            Arc::new(NoAssets),
            sink.clone(),
            settings(),
        );

        let err = coordinator
            .export_records(&subject(), &NoProgress)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            MedirecordError::BundleUnavailable(ProviderError::InvalidResponse(_))
        ));
        assert!(sink.delivered.lock().unwrap().is_empty());
    }

    struct StalledAssets;

    #[async_trait]
    impl AssetFetcher for StalledAssets {
        async fn fetch(&self, _locator: &str) -> std::result::Result<Vec<u8>, AssetError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_shutdown_before_fetch_delivers_nothing() {
        let sink = Arc::new(MemorySink::default());
        let coordinator = ExportCoordinator::new(
            Arc::new(StaticProvider(Some(bundle()))),
            Arc::new(NoAssets),
            sink.clone(),
            settings(),
        );
        let seen = Mutex::new(Vec::new());
        let progress = |p: u8| seen.lock().unwrap().push(p);

        let err = coordinator
            .export_records_until(&subject(), &progress, std::future::ready(()))
            .await
            .unwrap_err();

        assert!(matches!(err, MedirecordError::Cancelled));
        assert_eq!(*seen.lock().unwrap(), vec![10, 0]);
        assert!(sink.delivered.lock().unwrap().is_empty());
        assert_eq!(coordinator.phase(), ExportPhase::Idle);
    }

    #[tokio::test]
    async fn test_shutdown_while_archiving_resets_progress() {
        let mut with_asset = bundle();
        with_asset.prescriptions.push(Prescription {
            id: crate::domain::RecordId::new("presc-001").unwrap(),
            title: "Amoxicillin".to_string(),
            date: "2024-02-01".to_string(),
            clinician: "Dr. Smith".to_string(),
            status: PrescriptionStatus::Active,
            details: "Twice daily".to_string(),
            expiry_date: "2024-03-01".to_string(),
            asset_url: "/pdfs/presc-001.pdf".to_string(),
        });
        let sink = Arc::new(MemorySink::default());
        let coordinator = ExportCoordinator::new(
            Arc::new(StaticProvider(Some(with_asset))),
            Arc::new(StalledAssets),
            sink.clone(),
            settings(),
        );
        let seen = Mutex::new(Vec::new());
        let progress = |p: u8| seen.lock().unwrap().push(p);

        let err = coordinator
            .export_records_until(
                &subject(),
                &progress,
                tokio::time::sleep(Duration::from_millis(50)),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, MedirecordError::Cancelled));
        let seen = seen.lock().unwrap();
        assert_eq!(&seen[..2], &[10, 30]);
        assert_eq!(seen.last(), Some(&0));
        assert!(!seen.contains(&100));
        assert!(sink.delivered.lock().unwrap().is_empty());
        assert_eq!(coordinator.phase(), ExportPhase::Idle);
    }

    #[tokio::test]
    async fn test_phase_is_idle_during_reset_delay() {
        let coordinator = ExportCoordinator::new(
            Arc::new(StaticProvider(Some(bundle()))),
            Arc::new(NoAssets),
            Arc::new(MemorySink::default()),
            ExportSettings {
                reset_delay: Duration::from_millis(200),
                ..settings()
            },
        );
        let seen = Mutex::new(Vec::new());
        let progress = |p: u8| seen.lock().unwrap().push(p);

        let export_subject = subject();
        let export = coordinator.export_records(&export_subject, &progress);
        let observe = async {
            while seen.lock().unwrap().last() != Some(&100) {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
            coordinator.phase()
        };

        let (report, phase_at_complete) = tokio::join!(export, observe);
        assert!(report.is_ok());
        assert_eq!(phase_at_complete, ExportPhase::Idle);
        assert_eq!(seen.lock().unwrap().last(), Some(&0));
    }
}
