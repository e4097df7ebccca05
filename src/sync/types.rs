use serde::Serialize;

use super::SyncReport;

// Plan envelope types
#[derive(Serialize)]
pub struct SyncPlan {
    pub source: String,
    pub entity: String,
    pub records: usize,
    pub sample_ids: Vec<String>,
}

// Apply/result envelope types
#[derive(Serialize)]
pub struct SyncApply {
    pub source: String,
    pub entity: String,
    pub records: usize,
    #[serde(flatten)]
    pub report: SyncReport,
}
