pub mod normalize;
pub mod writer;

pub use normalize::{Normalizer, SENTINEL};
pub use writer::{indexed_path, write_csv, write_csv_to};

use crate::model::ReportRow;

pub const REVIEW_LABEL: &str = "Review:";

/// Normalized table for one review plus the review itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewReport {
    pub review: String,
    /// Header row first, then one row per model.
    pub table: Vec<ReportRow>,
    /// Models reported with a failed row.
    pub failed_models: Vec<String>,
}

impl ReviewReport {
    pub fn has_failures(&self) -> bool {
        !self.failed_models.is_empty()
    }

    /// Table rows, a blank row, then `["Review:", review]`.
    pub fn records(&self) -> Vec<Vec<String>> {
        let mut records = self.table.clone();
        records.push(Vec::new());
        records.push(vec![REVIEW_LABEL.to_string(), self.review.clone()]);
        records
    }
}
