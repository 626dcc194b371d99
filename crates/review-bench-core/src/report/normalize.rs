use crate::engine::ModelOutcome;
use crate::model::{ExtractionRecord, ReportRow, SelectedResponse, Sentiment};
use serde_json::Value;

pub const MODEL_HEADER: &str = "Model";
pub const TIME_HEADER: &str = "Time In Seconds";
pub const SENTINEL: &str = "No extracted fact for this category or data was in wrong format.";
pub const FAILED_TIME_CELL: &str = "FAILED";

/// Maps free-form category JSON onto the fixed taxonomy columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    categories: Vec<String>,
}

impl Normalizer {
    pub fn new(categories: Vec<String>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Cells per row: model, time, one per category.
    pub fn width(&self) -> usize {
        2 + self.categories.len()
    }

    pub fn header(&self) -> ReportRow {
        let mut row = Vec::with_capacity(self.width());
        row.push(MODEL_HEADER.to_string());
        row.push(TIME_HEADER.to_string());
        row.extend(self.categories.iter().cloned());
        row
    }

    pub fn to_row(&self, selected: &SelectedResponse) -> ReportRow {
        let mut row = Vec::with_capacity(self.width());
        row.push(selected.model.clone());
        row.push(selected.elapsed_secs.to_string());
        row.extend(
            self.categories
                .iter()
                .map(|c| category_cell(selected.categories.get(c))),
        );
        row
    }

    pub fn failed_row(&self, model: &str, reason: &str) -> ReportRow {
        let mut row = Vec::with_capacity(self.width());
        row.push(model.to_string());
        row.push(FAILED_TIME_CELL.to_string());
        let cell = format!("Model failed: {}", reason);
        row.extend(std::iter::repeat(cell).take(self.categories.len()));
        row
    }

    pub fn row(&self, outcome: &ModelOutcome) -> ReportRow {
        match outcome {
            ModelOutcome::Selected(s) => self.to_row(s),
            ModelOutcome::Failed { model, reason } => self.failed_row(model, reason),
        }
    }

    /// Header followed by one row per outcome, in order.
    pub fn table(&self, outcomes: &[ModelOutcome]) -> Vec<ReportRow> {
        std::iter::once(self.header())
            .chain(outcomes.iter().map(|o| self.row(o)))
            .collect()
    }
}

fn category_cell(value: Option<&Value>) -> String {
    match value.and_then(ExtractionRecord::from_value) {
        Some(rec) if rec.is_complete() => format_record(&rec),
        _ => SENTINEL.to_string(),
    }
}

fn format_record(rec: &ExtractionRecord) -> String {
    let sentiment = rec.sentiment.unwrap_or_default();
    let label = match Sentiment::from_score(sentiment) {
        Some(s) => format!("{} ({})", sentiment, s.as_str()),
        None => sentiment.to_string(),
    };
    format!(
        "Sentiment: {},\nIntensity: {},\nFact: {}",
        label,
        rec.intensity.unwrap_or_default(),
        rec.fact.as_deref().unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategoryMap;
    use crate::prompt::default_categories;
    use serde_json::json;

    fn selected(categories: CategoryMap) -> SelectedResponse {
        SelectedResponse {
            model: "qwen2.5:7b".into(),
            elapsed_secs: 4,
            categories,
        }
    }

    #[test]
    fn empty_mapping_is_all_sentinel() {
        let n = Normalizer::new(default_categories());
        let row = n.to_row(&selected(CategoryMap::new()));
        assert_eq!(row.len(), 2 + n.categories().len());
        assert_eq!(row[0], "qwen2.5:7b");
        assert_eq!(row[1], "4");
        assert!(row[2..].iter().all(|c| c == SENTINEL));
    }

    #[test]
    fn complete_record_keeps_fact_verbatim() {
        let n = Normalizer::new(default_categories());
        let mut cats = CategoryMap::new();
        cats.insert(
            "Product Quality".into(),
            json!({ "sntm": -1, "score": 4, "eF": "The food was cold." }),
        );
        let row = n.to_row(&selected(cats));
        let idx = 2 + n
            .categories()
            .iter()
            .position(|c| c == "Product Quality")
            .unwrap();

        let cell = &row[idx];
        assert!(cell.contains("-1"));
        assert!(cell.contains("4"));
        assert!(cell.contains("The food was cold."));
        assert_eq!(
            cell,
            "Sentiment: -1 (negative),\nIntensity: 4,\nFact: The food was cold."
        );
    }

    #[test]
    fn partial_zero_or_non_object_records_fall_back_to_sentinel() {
        let n = Normalizer::new(vec![
            "Timing".into(),
            "Service Quality".into(),
            "Uniqueness".into(),
            "Restrictions".into(),
        ]);
        let mut cats = CategoryMap::new();
        cats.insert("Timing".into(), json!({ "sntm": 1, "score": 3 }));
        cats.insert(
            "Service Quality".into(),
            json!({ "sntm": 0, "score": 3, "eF": "ok" }),
        );
        cats.insert("Uniqueness".into(), json!("very unique"));
        cats.insert(
            "Restrictions".into(),
            json!({ "sntm": 1, "score": 2, "eF": "" }),
        );
        let row = n.to_row(&selected(cats));
        assert!(row[2..].iter().all(|c| c == SENTINEL));
    }

    #[test]
    fn to_row_is_idempotent() {
        let n = Normalizer::new(default_categories());
        let mut cats = CategoryMap::new();
        cats.insert(
            "Atmosphere & Comfort".into(),
            json!({ "sntm": -1, "score": 4, "eF": "The place was so hot." }),
        );
        let s = selected(cats);
        assert_eq!(n.to_row(&s), n.to_row(&s));
    }

    #[test]
    fn table_has_header_and_fixed_width_rows() {
        let n = Normalizer::new(default_categories());
        let outcomes = vec![
            ModelOutcome::Selected(selected(CategoryMap::new())),
            ModelOutcome::Failed {
                model: "qwen2.5:14b".into(),
                reason: "no valid trial".into(),
            },
        ];
        let table = n.table(&outcomes);
        assert_eq!(table.len(), 3);
        assert_eq!(table[0][..2], [MODEL_HEADER.to_string(), TIME_HEADER.to_string()]);
        assert!(table.iter().all(|r| r.len() == n.width()));
        assert_eq!(table[2][0], "qwen2.5:14b");
        assert_eq!(table[2][1], FAILED_TIME_CELL);
    }
}
