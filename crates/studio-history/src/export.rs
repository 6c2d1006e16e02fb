//! Serializable snapshot of a result history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use studio_contracts::record::ResultRecord;

/// The gallery as it stood at `exported_at`, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryExport {
    pub count: usize,
    pub records: Vec<ResultRecord>,
    pub exported_at: DateTime<Utc>,
}
