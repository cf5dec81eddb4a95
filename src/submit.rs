//! Submission sink abstraction
//!
//! There is no real backend; the reference sink logs the finalized record
//! and reports success. The trait seam keeps the app testable and leaves
//! room for a wired-up endpoint later.

use crate::draft::encode_record;
use crate::state::{IntakeRecord, PRODUCT_NAME};
use anyhow::Result;
use async_trait::async_trait;

/// Destination for finalized intake records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Deliver a finalized record (approval stamp already applied)
    async fn submit(&mut self, record: &IntakeRecord) -> Result<()>;
}

/// Reference sink: logs the record and always succeeds
pub struct ConsoleSink;

#[async_trait]
impl SubmissionSink for ConsoleSink {
    async fn submit(&mut self, record: &IntakeRecord) -> Result<()> {
        let payload = encode_record(record)?;
        tracing::info!(
            vessel = %record.vessel_name,
            product = PRODUCT_NAME,
            %payload,
            "intake record submitted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_sink_accepts_any_record() {
        let mut sink = ConsoleSink;
        let record = IntakeRecord::default();
        tokio_test::block_on(sink.submit(&record)).unwrap();
    }

    #[test]
    fn test_mock_sink_observes_the_finalized_record() {
        let mut sink = MockSubmissionSink::new();
        sink.expect_submit()
            .withf(|record: &IntakeRecord| record.vessel_name == "MT Kestrel")
            .once()
            .returning(|_| Ok(()));

        let mut record = IntakeRecord::default();
        record.vessel_name = "MT Kestrel".to_string();
        tokio_test::block_on(sink.submit(&record)).unwrap();
    }
}
