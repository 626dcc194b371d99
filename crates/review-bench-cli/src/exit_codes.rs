//! Process exit codes. Part of the CLI contract.

use review_bench_core::BenchError;

pub const SUCCESS: i32 = 0;
pub const RUN_FAILED: i32 = 1; // Report written, but at least one model had no valid trial
pub const CONFIG_ERROR: i32 = 2;

/// Library errors carry their own code; anything else is a config/usage problem.
pub fn from_error(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<BenchError>()
        .map(BenchError::exit_code)
        .unwrap_or(CONFIG_ERROR)
}
