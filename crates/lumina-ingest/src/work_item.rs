use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use treadle::WorkItem;

/// An image folder being processed through the pipeline.
///
/// This is the treadle `WorkItem` that flows through the ingest stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestJob {
    /// Unique ID for this work item.
    id: String,
    /// Folder being ingested.
    pub folder: PathBuf,
}

impl IngestJob {
    #[must_use]
    pub fn new(id: impl Into<String>, folder: PathBuf) -> Self {
        Self {
            id: id.into(),
            folder,
        }
    }
}

impl WorkItem for IngestJob {
    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for IngestJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.folder.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_job_creation() {
        let job = IngestJob::new("ingest-job", PathBuf::from("/photos/holiday"));
        assert_eq!(job.id(), "ingest-job");
        assert_eq!(job.folder, PathBuf::from("/photos/holiday"));
    }

    #[test]
    fn test_ingest_job_display() {
        let job = IngestJob::new("ingest-job", PathBuf::from("/photos/holiday"));
        let display = format!("{job}");
        assert!(display.contains("holiday"));
    }
}
