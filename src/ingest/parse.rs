use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use super::types::{AppId, MatchRequest};

const SAMPLE_JOBS: &str = include_str!("../../data/sample_jobs.json");

/// Describe an id for error messages, falling back to "unknown".
fn describe_id(record: &Value) -> String {
    match record.get("job_app_id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "unknown".to_string(),
        Some(other) => other.to_string(),
    }
}

/// A list-typed field must be a list when present. `null` counts as absent.
fn check_list(section: &Value, field: &str, id: &str) -> Result<(), String> {
    match section.get(field) {
        None | Some(Value::Null) | Some(Value::Array(_)) => Ok(()),
        Some(_) => Err(format!(
            "{} must be a list in job application {}",
            field, id
        )),
    }
}

/// Check the shape of decoded JSON before typed deserialization.
///
/// Returns the first problem found as a human-readable reason.
pub fn validate_job_data(data: &Value) -> Result<(), String> {
    let records = data
        .as_array()
        .ok_or_else(|| "Data must be a list of job applications".to_string())?;

    if records.is_empty() {
        return Err("Data list is empty".to_string());
    }

    for record in records {
        if !record.is_object() {
            return Err("Each job application must be an object".to_string());
        }
        let id = describe_id(record);

        match record.get("job_app_id") {
            None => return Err("Missing job_app_id in job application".to_string()),
            Some(Value::String(_)) => {}
            Some(Value::Number(n)) if n.is_i64() => {}
            Some(_) => {
                return Err(format!(
                    "job_app_id must be an integer or string in job application {}",
                    id
                ))
            }
        }
        let requirements = record
            .get("job_requirements")
            .ok_or_else(|| format!("Missing job_requirements in job application {}", id))?;
        let profile = record
            .get("talent_profile")
            .ok_or_else(|| format!("Missing talent_profile in job application {}", id))?;

        check_list(requirements, "core_skills", &id)?;
        check_list(requirements, "certifications", &id)?;
        check_list(profile, "skills", &id)?;
        check_list(profile, "certifications", &id)?;
    }

    Ok(())
}

fn check_experience(request: &MatchRequest) -> Result<(), String> {
    let pairs = [
        ("min_experience", request.job_requirements.min_experience),
        ("experience", request.talent_profile.experience),
    ];
    for (field, value) in pairs {
        if !value.is_finite() || value < 0.0 {
            return Err(format!(
                "{} must be a non-negative number in job application {}",
                field, request.job_app_id
            ));
        }
    }
    Ok(())
}

/// Parse and validate uploaded JSON content into match requests.
///
/// On failure the error is a reason string suitable for showing the user.
pub fn parse_applications(content: &str) -> Result<Vec<MatchRequest>, String> {
    let data: Value =
        serde_json::from_str(content).map_err(|e| format!("Invalid JSON format: {}", e))?;

    validate_job_data(&data)?;

    let Value::Array(records) = data else {
        return Err("Data must be a list of job applications".to_string());
    };

    let mut requests = Vec::with_capacity(records.len());
    for record in records {
        let id = describe_id(&record);
        let request: MatchRequest = serde_json::from_value(record)
            .map_err(|e| format!("Invalid job application {}: {}", id, e))?;
        check_experience(&request)?;
        requests.push(request);
    }

    debug!(count = requests.len(), "parsed job applications");
    Ok(requests)
}

/// Read a JSON file of job applications.
///
/// I/O problems are errors; content problems are reported as the reason
/// string from [`parse_applications`].
pub fn load_applications(path: &Path) -> Result<Vec<MatchRequest>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read job applications from {}", path.display()))?;
    parse_applications(&content).map_err(|reason| anyhow::anyhow!("{}: {}", path.display(), reason))
}

/// The bundled sample data set.
pub fn sample_applications() -> Result<Vec<MatchRequest>> {
    parse_applications(SAMPLE_JOBS).map_err(|reason| anyhow::anyhow!("bundled sample data: {}", reason))
}

/// Find a request by id.
pub fn find_by_id<'a>(requests: &'a [MatchRequest], id: &AppId) -> Option<&'a MatchRequest> {
    requests.iter().find(|r| &r.job_app_id == id)
}
