use serde::{Deserialize, Serialize};

use crate::scoring::Weights;

pub fn default_education_hierarchy() -> Vec<String> {
    [
        "PhD",
        "Master's",
        "Bachelor's",
        "Associate's",
        "Diploma",
        "High School",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Top-level configuration file.
///
/// Every key is optional; missing keys take their defaults.
///
/// Example YAML:
/// ```yaml
/// weights:
///   core_skills: 0.5
///   experience: 0.2
///   education: 0.15
///   certifications: 0.15
/// education_hierarchy: ["PhD", "Master's", "Bachelor's"]
/// thresholds:
///   minimum_match_score: 40
/// debug_mode: false
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub weights: Weights,

    /// Education levels, most senior first
    pub education_hierarchy: Vec<String>,

    pub thresholds: Thresholds,

    /// Show per-component detail under each result
    pub debug_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            education_hierarchy: default_education_hierarchy(),
            thresholds: Thresholds::default(),
            debug_mode: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Thresholds {
    /// Results below this total are highlighted or filtered. Not used by scoring.
    pub minimum_match_score: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            minimum_match_score: 40.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.weights.core_skills, 0.5);
        assert_eq!(config.education_hierarchy.len(), 6);
        assert_eq!(config.education_hierarchy[0], "PhD");
        assert_eq!(config.thresholds.minimum_match_score, 40.0);
        assert!(!config.debug_mode);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config_parse() {
        let yaml = r#"
weights:
  core_skills: 0.4
  certifications: 0.25
education_hierarchy:
  - "Doctorate"
  - "Degree"
thresholds:
  minimum_match_score: 55
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.weights.core_skills, 0.4);
        assert_eq!(config.weights.experience, 0.2);
        assert_eq!(config.weights.certifications, 0.25);
        assert_eq!(config.education_hierarchy, vec!["Doctorate".to_string(), "Degree".to_string()]);
        assert_eq!(config.thresholds.minimum_match_score, 55.0);
        assert!(!config.debug_mode);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let parsed: Result<Config, _> = serde_saphyr::from_str("queries: []\n");
        assert!(parsed.is_err());
    }
}
