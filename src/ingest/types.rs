use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Opaque application id, passed through to results unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AppId {
    Number(i64),
    Text(String),
}

impl AppId {
    /// Match against user-typed text (CLI `show 3` or `show abc`)
    pub fn matches_str(&self, s: &str) -> bool {
        match self {
            AppId::Number(n) => s.trim().parse::<i64>().map(|v| v == *n).unwrap_or(false),
            AppId::Text(t) => t == s,
        }
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppId::Number(n) => write!(f, "{}", n),
            AppId::Text(t) => f.write_str(t),
        }
    }
}

impl From<i64> for AppId {
    fn from(n: i64) -> Self {
        AppId::Number(n)
    }
}

impl From<&str> for AppId {
    fn from(s: &str) -> Self {
        AppId::Text(s.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct JobRequirements {
    #[serde(deserialize_with = "null_as_default")]
    pub core_skills: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub min_experience: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub education: String,
    #[serde(deserialize_with = "null_as_default")]
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TalentProfile {
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub experience: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub education: String,
    #[serde(deserialize_with = "null_as_default")]
    pub certifications: Vec<String>,
}

/// One job/talent pair submitted for scoring.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MatchRequest {
    pub job_app_id: AppId,
    pub job_requirements: JobRequirements,
    pub talent_profile: TalentProfile,
}
