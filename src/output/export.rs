use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::ingest::AppId;
use crate::scoring::{Component, ScoredResult};

const CSV_HEADER: &str = "job_app_id,total_score,core_skills_raw,core_skills_weighted,experience_raw,experience_weighted,education_raw,education_weighted,certifications_raw,certifications_weighted";

/// Quote a CSV field if it contains a delimiter, quote or newline
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Results as CSV, one row per result with raw and weighted scores.
pub fn results_to_csv(results: &[ScoredResult]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for result in results {
        let mut fields = vec![
            csv_field(&result.job_app_id.to_string()),
            result.total_score.to_string(),
        ];
        for (_, score) in result.scores.iter() {
            fields.push(score.raw_score.to_string());
            fields.push(score.weighted_score.to_string());
        }
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

#[derive(Debug, Serialize)]
struct ComponentRaw {
    core_skills: f64,
    experience: f64,
    education: f64,
    certifications: f64,
}

#[derive(Debug, Serialize)]
struct ExportRecord<'a> {
    job_app_id: &'a AppId,
    total_score: f64,
    component_scores: ComponentRaw,
}

/// Simplified JSON: id, total and raw component scores only.
pub fn results_to_export_json(results: &[ScoredResult]) -> Result<String> {
    let records: Vec<ExportRecord> = results
        .iter()
        .map(|r| ExportRecord {
            job_app_id: &r.job_app_id,
            total_score: r.total_score,
            component_scores: ComponentRaw {
                core_skills: r.scores.get(Component::CoreSkills).raw_score,
                experience: r.scores.get(Component::Experience).raw_score,
                education: r.scores.get(Component::Education).raw_score,
                certifications: r.scores.get(Component::Certifications).raw_score,
            },
        })
        .collect();
    serde_json::to_string_pretty(&records).context("Failed to serialize results")
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(())
}

pub fn export_csv(path: &Path, results: &[ScoredResult]) -> Result<()> {
    write_atomic(path, &results_to_csv(results))?;
    info!("Results exported to {}", path.display());
    Ok(())
}

pub fn export_json(path: &Path, results: &[ScoredResult]) -> Result<()> {
    write_atomic(path, &results_to_export_json(results)?)?;
    info!("Results exported to {}", path.display());
    Ok(())
}
