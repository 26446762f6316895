use std::collections::HashSet;

use super::weights::{Component, Weights};
use crate::config::{default_education_hierarchy, Config, Thresholds};

fn weight_error(component: Component, weight: f64) -> Option<String> {
    if !weight.is_finite() {
        Some(format!("weights.{}: must be a number", component))
    } else if weight < 0.0 {
        Some(format!("weights.{}: must be non-negative", component))
    } else {
        None
    }
}

fn hierarchy_errors(levels: &[String]) -> Vec<String> {
    if levels.is_empty() {
        return vec!["education_hierarchy: must list at least one level".to_string()];
    }

    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for (i, level) in levels.iter().enumerate() {
        if level.trim().is_empty() {
            errors.push(format!("education_hierarchy[{}]: level name is empty", i));
        } else if !seen.insert(level.as_str()) {
            errors.push(format!(
                "education_hierarchy[{}]: duplicate level '{}'",
                i, level
            ));
        }
    }
    errors
}

fn threshold_error(threshold: f64) -> Option<String> {
    if (0.0..=100.0).contains(&threshold) {
        None
    } else {
        Some(format!(
            "thresholds.minimum_match_score: must be between 0 and 100, got {}",
            threshold
        ))
    }
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
///
/// Weights that don't sum to 1 are not an error; see `Weights::sum_warning`.
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Component::ALL
        .into_iter()
        .filter_map(|c| weight_error(c, config.weights.get(c)))
        .collect();
    errors.extend(hierarchy_errors(&config.education_hierarchy));
    errors.extend(threshold_error(config.thresholds.minimum_match_score));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Reset each invalid setting to its default, leaving valid ones alone.
///
/// A bad weight resets only that weight. Any problem in the education
/// hierarchy resets the whole list, since its order is what matters.
/// Returns one message per reset.
pub fn repair_config(config: &mut Config) -> Vec<String> {
    let mut problems = Vec::new();
    let defaults = Weights::default();

    for component in Component::ALL {
        if let Some(error) = weight_error(component, config.weights.get(component)) {
            let fallback = defaults.get(component);
            problems.push(format!("{}; using default {}", error, fallback));
            config.weights.set(component, fallback);
        }
    }

    let errors = hierarchy_errors(&config.education_hierarchy);
    if !errors.is_empty() {
        problems.extend(
            errors
                .into_iter()
                .map(|e| format!("{}; using default levels", e)),
        );
        config.education_hierarchy = default_education_hierarchy();
    }

    if let Some(error) = threshold_error(config.thresholds.minimum_match_score) {
        let fallback = Thresholds::default();
        problems.push(format!(
            "{}; using default {}",
            error, fallback.minimum_match_score
        ));
        config.thresholds = fallback;
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_unnormalized_weights_are_valid() {
        let config = Config {
            weights: Weights {
                core_skills: 0.9,
                experience: 0.9,
                education: 0.0,
                certifications: 0.0,
            },
            ..Config::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_negative_weight() {
        let config = Config {
            weights: Weights {
                experience: -0.2,
                ..Weights::default()
            },
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("weights.experience"));
    }

    #[test]
    fn test_empty_hierarchy() {
        let config = Config {
            education_hierarchy: vec![],
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("education_hierarchy"));
    }

    #[test]
    fn test_duplicate_hierarchy_level() {
        let config = Config {
            education_hierarchy: vec![
                "PhD".to_string(),
                "Master's".to_string(),
                "PhD".to_string(),
            ],
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("education_hierarchy[2]"));
    }

    #[test]
    fn test_threshold_out_of_range() {
        let config = Config {
            thresholds: Thresholds {
                minimum_match_score: 140.0,
            },
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("minimum_match_score"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = Config {
            weights: Weights {
                core_skills: -1.0,        // Error 1
                certifications: f64::NAN, // Error 2
                ..Weights::default()
            },
            education_hierarchy: vec![], // Error 3
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_repair_resets_only_offending_weight() {
        let mut config = Config {
            weights: Weights {
                core_skills: 0.6,
                education: -0.5,
                ..Weights::default()
            },
            debug_mode: true,
            ..Config::default()
        };
        let problems = repair_config(&mut config);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].starts_with("weights.education: must be non-negative"));
        assert_eq!(config.weights.education, 0.15);
        assert_eq!(config.weights.core_skills, 0.6);
        assert!(config.debug_mode);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_repair_threshold_keeps_hierarchy() {
        let custom = vec!["Senior".to_string(), "Junior".to_string()];
        let mut config = Config {
            education_hierarchy: custom.clone(),
            thresholds: Thresholds {
                minimum_match_score: 140.0,
            },
            ..Config::default()
        };
        let problems = repair_config(&mut config);
        assert_eq!(problems.len(), 1);
        assert_eq!(config.thresholds.minimum_match_score, 40.0);
        assert_eq!(config.education_hierarchy, custom);
    }

    #[test]
    fn test_repair_duplicate_level_resets_hierarchy() {
        let mut config = Config {
            education_hierarchy: vec!["A".to_string(), "A".to_string()],
            ..Config::default()
        };
        let problems = repair_config(&mut config);
        assert_eq!(problems.len(), 1);
        assert_eq!(config.education_hierarchy, default_education_hierarchy());
    }

    #[test]
    fn test_repair_valid_config_is_noop() {
        let mut config = Config::default();
        assert!(repair_config(&mut config).is_empty());
        assert_eq!(config, Config::default());
    }
}
