use crate::model::GenerateOutcome;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// An outcome is usable only if it carries timing metadata.
pub fn is_valid(outcome: &GenerateOutcome) -> bool {
    timing(outcome).is_some()
}

pub fn timing(outcome: &GenerateOutcome) -> Option<u64> {
    outcome.elapsed_nanos
}

/// Whole seconds, truncated.
pub fn elapsed_seconds(nanos: u64) -> u64 {
    nanos / NANOS_PER_SEC
}
