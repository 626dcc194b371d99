use super::ReviewReport;
use crate::errors::{BenchError, BenchResult};
use csv::WriterBuilder;
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn write_csv_to<W: Write>(out: W, report: &ReviewReport) -> BenchResult<()> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(out);
    for record in report.records() {
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_csv(path: &Path, report: &ReviewReport) -> BenchResult<()> {
    let file = std::fs::File::create(path).map_err(|e| BenchError::Report {
        message: format!("failed to create {}: {}", path.display(), e),
    })?;
    write_csv_to(file, report)
}

/// `result.csv` -> `result_3.csv`, used when one run covers several reviews.
pub fn indexed_path(path: &Path, index: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "result".to_string());
    let name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}_{}", stem, index),
    };
    path.with_file_name(name)
}
