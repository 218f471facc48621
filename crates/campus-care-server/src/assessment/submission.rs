// crates/campus-care-server/src/assessment/submission.rs
// Single-flight submission guard and the progress sink seam

use async_trait::async_trait;
use campus_care_types::{AssessmentResponse, Instrument, SeverityResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::scoring::score;
use crate::error::{CareError, Result};

type SubmissionKey = (String, Instrument);

/// At most one in-flight submission per (student, instrument).
#[derive(Debug, Clone, Default)]
pub struct SubmissionGuard {
    in_flight: Arc<Mutex<HashSet<SubmissionKey>>>,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the key, or fail with `SubmissionInFlight` if it is already held.
    /// The claim is released when the returned permit is dropped.
    pub fn try_acquire(&self, student_id: &str, instrument: Instrument) -> Result<SubmissionPermit> {
        let key = (student_id.to_string(), instrument);
        if !self.lock().insert(key.clone()) {
            debug!(student_id = %student_id, instrument = %instrument, "Submission already in flight");
            return Err(CareError::SubmissionInFlight);
        }
        Ok(SubmissionPermit {
            in_flight: Arc::clone(&self.in_flight),
            key,
        })
    }

    pub fn is_in_flight(&self, student_id: &str, instrument: Instrument) -> bool {
        self.lock().contains(&(student_id.to_string(), instrument))
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<SubmissionKey>> {
        // The set is always left consistent, so a poisoned lock is still usable
        self.in_flight.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// RAII claim on a submission key
#[derive(Debug)]
pub struct SubmissionPermit {
    in_flight: Arc<Mutex<HashSet<SubmissionKey>>>,
    key: SubmissionKey,
}

impl Drop for SubmissionPermit {
    fn drop(&mut self) {
        let mut set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        set.remove(&self.key);
    }
}

// ═══════════════════════════════════════
// PROGRESS SINK
// ═══════════════════════════════════════

/// A scored submission handed to persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub id: String,
    pub student_id: String,
    pub instrument: Instrument,
    pub responses: AssessmentResponse,
    pub result: SeverityResult,
    pub submitted_at: DateTime<Utc>,
}

/// Where scored submissions go. The production implementation lives with the
/// document store; `InMemoryProgress` serves local runs and tests.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    async fn record(&self, record: ProgressRecord) -> Result<()>;
}

/// Default bound on records kept by `InMemoryProgress`
pub const DEFAULT_PROGRESS_CAPACITY: usize = 10_000;

/// Non-persistent sink. Keeps the most recent `capacity` records and drops
/// the oldest beyond that.
#[derive(Debug)]
pub struct InMemoryProgress {
    records: Mutex<VecDeque<ProgressRecord>>,
    capacity: usize,
}

impl Default for InMemoryProgress {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_PROGRESS_CAPACITY)
    }
}

impl InMemoryProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records for one student, oldest first
    pub fn records_for(&self, student_id: &str) -> Vec<ProgressRecord> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProgressSink for InMemoryProgress {
    async fn record(&self, record: ProgressRecord) -> Result<()> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        if records.len() >= self.capacity {
            records.pop_front();
            debug!(capacity = self.capacity, "In-memory progress full, dropped oldest record");
        }
        records.push_back(record);
        Ok(())
    }
}

// ═══════════════════════════════════════
// SUBMISSION SERVICE
// ═══════════════════════════════════════

/// Scores a submission and records it, one in-flight write per key
#[derive(Clone)]
pub struct AssessmentService {
    guard: SubmissionGuard,
    sink: Arc<dyn ProgressSink>,
}

impl AssessmentService {
    pub fn new(sink: Arc<dyn ProgressSink>) -> Self {
        Self {
            guard: SubmissionGuard::new(),
            sink,
        }
    }

    pub fn guard(&self) -> &SubmissionGuard {
        &self.guard
    }

    #[instrument(skip(self, responses))]
    pub async fn submit(
        &self,
        student_id: &str,
        instrument: Instrument,
        responses: AssessmentResponse,
    ) -> Result<SeverityResult> {
        let student_id = student_id.trim();
        if student_id.is_empty() {
            return Err(CareError::InvalidInput("student_id is required".to_string()));
        }

        let _permit = self.guard.try_acquire(student_id, instrument)?;

        let result = score(&responses, instrument);
        let record = ProgressRecord {
            id: Uuid::new_v4().to_string(),
            student_id: student_id.to_string(),
            instrument,
            responses,
            result: result.clone(),
            submitted_at: Utc::now(),
        };
        let record_id = record.id.clone();

        if let Err(e) = self.sink.record(record).await {
            warn!(record_id = %record_id, error = %e, "Failed to record assessment");
            return Err(e);
        }

        info!(
            record_id = %record_id,
            total_score = result.total_score,
            tier = %result.tier,
            safety_alert = result.safety_alert,
            "Assessment recorded"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_care_types::SeverityTier;
    use tokio::sync::Notify;

    // ========================================================================
    // Guard
    // ========================================================================

    #[test]
    fn test_second_acquire_fails_until_release() {
        let guard = SubmissionGuard::new();
        let permit = guard.try_acquire("s1", Instrument::Gad7).unwrap();
        assert!(guard.is_in_flight("s1", Instrument::Gad7));
        assert!(matches!(
            guard.try_acquire("s1", Instrument::Gad7),
            Err(CareError::SubmissionInFlight)
        ));

        drop(permit);
        assert!(!guard.is_in_flight("s1", Instrument::Gad7));
        assert!(guard.try_acquire("s1", Instrument::Gad7).is_ok());
    }

    #[test]
    fn test_distinct_keys_are_independent() {
        let guard = SubmissionGuard::new();
        let _a = guard.try_acquire("s1", Instrument::Gad7).unwrap();
        let _b = guard.try_acquire("s1", Instrument::Phq9).unwrap();
        let _c = guard.try_acquire("s2", Instrument::Gad7).unwrap();
    }

    #[test]
    fn test_clones_share_state() {
        let guard = SubmissionGuard::new();
        let other = guard.clone();
        let _p = guard.try_acquire("s1", Instrument::Who5).unwrap();
        assert!(other.try_acquire("s1", Instrument::Who5).is_err());
    }

    // ========================================================================
    // Service
    // ========================================================================

    #[tokio::test]
    async fn test_submit_records_result() {
        let sink = Arc::new(InMemoryProgress::new());
        let service = AssessmentService::new(sink.clone());
        let responses: AssessmentResponse = (1..=5).map(|id| (id, 5)).collect();

        let result = service.submit(" s1 ", Instrument::Who5, responses).await.unwrap();
        assert_eq!(result.tier, SeverityTier::Good);

        let records = sink.records_for("s1");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].result, result);
        assert!(!service.guard().is_in_flight("s1", Instrument::Who5));
    }

    #[tokio::test]
    async fn test_submit_requires_student_id() {
        let service = AssessmentService::new(Arc::new(InMemoryProgress::new()));
        let err = service
            .submit("  ", Instrument::Gad7, AssessmentResponse::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CareError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_in_memory_progress_drops_oldest_beyond_capacity() {
        let sink = Arc::new(InMemoryProgress::with_capacity(2));
        let service = AssessmentService::new(sink.clone());
        for student in ["a", "b", "c"] {
            service
                .submit(student, Instrument::Who5, AssessmentResponse::new())
                .await
                .unwrap();
        }
        assert_eq!(sink.len(), 2);
        assert!(sink.records_for("a").is_empty());
        assert_eq!(sink.records_for("c").len(), 1);
    }

    /// Sink that parks until released, to hold a submission in flight
    struct ParkedSink {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl ProgressSink for ParkedSink {
        async fn record(&self, _record: ProgressRecord) -> Result<()> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_submission_rejected() {
        let sink = Arc::new(ParkedSink {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let service = AssessmentService::new(sink.clone());

        let first = {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .submit("s1", Instrument::Phq9, AssessmentResponse::new())
                    .await
            })
        };
        sink.entered.notified().await;

        let second = service
            .submit("s1", Instrument::Phq9, AssessmentResponse::new())
            .await;
        assert!(matches!(second, Err(CareError::SubmissionInFlight)));

        sink.release.notify_one();
        assert!(first.await.unwrap().is_ok());
        assert!(!service.guard().is_in_flight("s1", Instrument::Phq9));
    }

    /// Sink that always fails
    struct FailingSink;

    #[async_trait]
    impl ProgressSink for FailingSink {
        async fn record(&self, _record: ProgressRecord) -> Result<()> {
            Err(CareError::Anyhow(anyhow::anyhow!("store unavailable")))
        }
    }

    #[tokio::test]
    async fn test_failed_write_releases_key() {
        let service = AssessmentService::new(Arc::new(FailingSink));
        let err = service
            .submit("s1", Instrument::Gad7, AssessmentResponse::new())
            .await;
        assert!(err.is_err());
        assert!(!service.guard().is_in_flight("s1", Instrument::Gad7));
    }
}
