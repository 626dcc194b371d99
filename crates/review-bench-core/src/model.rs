use serde_json::Value;
use std::collections::BTreeMap;

/// Category name -> raw extraction JSON, exactly as the model produced it.
pub type CategoryMap = serde_json::Map<String, Value>;

/// One report row, aligned to `[Model, Time In Seconds, *Categories]`.
pub type ReportRow = Vec<String>;

/// Raw result of a single `generate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutcome {
    pub response_text: String,
    /// Total duration reported by the backend, if any.
    pub elapsed_nanos: Option<u64>,
}

impl GenerateOutcome {
    pub fn new(response_text: impl Into<String>, elapsed_nanos: Option<u64>) -> Self {
        Self {
            response_text: response_text.into(),
            elapsed_nanos,
        }
    }

    /// Outcome standing in for a call that hit the per-call timeout.
    pub fn timed_out() -> Self {
        Self {
            response_text: String::new(),
            elapsed_nanos: None,
        }
    }
}

/// A validated, parsed trial.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialResult {
    pub trial: u32,
    pub elapsed_secs: u64,
    pub categories: CategoryMap,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BundleStats {
    /// Trials started.
    pub attempted: u32,
    /// Trials that produced a valid, parsed response.
    pub recorded: u32,
    /// Trials that needed the single retry.
    pub retried: u32,
    /// Trials dropped because the retry was invalid too.
    pub abandoned: u32,
    /// Recorded trials that replaced an earlier one with the same elapsed seconds.
    pub collisions: u32,
}

/// Per-model results keyed by elapsed whole seconds.
///
/// Two trials with the same elapsed seconds collide and the later one wins;
/// `stats.collisions` counts how often that happened.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelBundle {
    pub model: String,
    entries: BTreeMap<u64, CategoryMap>,
    pub stats: BundleStats,
}

impl ModelBundle {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            entries: BTreeMap::new(),
            stats: BundleStats::default(),
        }
    }

    /// Store a trial. Returns the mapping it replaced, if any.
    pub fn insert(&mut self, elapsed_secs: u64, categories: CategoryMap) -> Option<CategoryMap> {
        self.stats.recorded += 1;
        let replaced = self.entries.insert(elapsed_secs, categories);
        if replaced.is_some() {
            self.stats.collisions += 1;
        }
        replaced
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, elapsed_secs: u64) -> Option<&CategoryMap> {
        self.entries.get(&elapsed_secs)
    }

    /// Entries in ascending elapsed-seconds order.
    pub fn entries(&self) -> impl Iterator<Item = (u64, &CategoryMap)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}

/// Fastest valid response of one model.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedResponse {
    pub model: String,
    pub elapsed_secs: u64,
    pub categories: CategoryMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    pub fn from_score(score: i64) -> Option<Self> {
        match score {
            1 => Some(Self::Positive),
            -1 => Some(Self::Negative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

/// One category's extracted fact.
///
/// Wire keys: `sntm` (or `sentiment`) -> `sentiment`, `score` (or
/// `intensity`) -> `intensity`, `eF` (or `fact`) -> `fact`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionRecord {
    pub sentiment: Option<i64>,
    pub intensity: Option<i64>,
    pub fact: Option<String>,
}

impl ExtractionRecord {
    /// Read a record from arbitrary JSON. `None` if the value is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let field = |keys: &[&str]| keys.iter().find_map(|k| obj.get(*k));
        Some(Self {
            sentiment: field(&["sntm", "sentiment"]).and_then(lenient_int),
            intensity: field(&["score", "intensity"]).and_then(lenient_int),
            fact: field(&["eF", "fact"])
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    /// All three fields present, non-zero and non-empty.
    pub fn is_complete(&self) -> bool {
        matches!(self.sentiment, Some(s) if s != 0)
            && matches!(self.intensity, Some(i) if i != 0)
            && self.fact.as_deref().is_some_and(|f| !f.trim().is_empty())
    }
}

fn lenient_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_reads_prompt_wire_keys() {
        let rec = ExtractionRecord::from_value(
            &json!({ "sntm": -1, "score": 4, "eF": "The food was cold." }),
        )
        .unwrap();
        assert_eq!(rec.sentiment, Some(-1));
        assert_eq!(rec.intensity, Some(4));
        assert_eq!(rec.fact.as_deref(), Some("The food was cold."));
        assert!(rec.is_complete());
    }

    #[test]
    fn record_accepts_descriptive_aliases_and_numeric_strings() {
        let rec = ExtractionRecord::from_value(
            &json!({ "sentiment": "1", "intensity": 3.0, "fact": "Great wine list." }),
        )
        .unwrap();
        assert_eq!(rec.sentiment, Some(1));
        assert_eq!(rec.intensity, Some(3));
        assert!(rec.is_complete());
    }

    #[test]
    fn zero_and_absent_are_distinct_but_both_incomplete() {
        let zero = ExtractionRecord::from_value(&json!({ "sntm": 0, "score": 2, "eF": "x" }))
            .unwrap();
        assert_eq!(zero.sentiment, Some(0));
        assert!(!zero.is_complete());

        let absent = ExtractionRecord::from_value(&json!({ "score": 2, "eF": "x" })).unwrap();
        assert_eq!(absent.sentiment, None);
        assert!(!absent.is_complete());
    }

    #[test]
    fn non_object_is_not_a_record() {
        assert!(ExtractionRecord::from_value(&json!("Product Quality")).is_none());
        assert!(ExtractionRecord::from_value(&json!([1, 2])).is_none());
    }

    #[test]
    fn bundle_counts_collisions_and_keeps_later_trial() {
        let mut bundle = ModelBundle::new("llama3.2");
        let mut first = CategoryMap::new();
        first.insert("Timing".into(), json!("first"));
        let mut second = CategoryMap::new();
        second.insert("Timing".into(), json!("second"));

        assert!(bundle.insert(4, first).is_none());
        assert!(bundle.insert(4, second.clone()).is_some());

        assert_eq!(bundle.len(), 1);
        assert_eq!(bundle.get(4), Some(&second));
        assert_eq!(bundle.stats.recorded, 2);
        assert_eq!(bundle.stats.collisions, 1);
    }

    #[test]
    fn sentiment_polarity() {
        assert_eq!(Sentiment::from_score(-1), Some(Sentiment::Negative));
        assert_eq!(Sentiment::from_score(1).map(|s| s.as_str()), Some("positive"));
        assert_eq!(Sentiment::from_score(3), None);
    }
}
