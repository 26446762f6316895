use serde::{Deserialize, Serialize};
use std::fmt;

/// The four scored components, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    CoreSkills,
    Experience,
    Education,
    Certifications,
}

impl Component {
    pub const ALL: [Component; 4] = [
        Component::CoreSkills,
        Component::Experience,
        Component::Education,
        Component::Certifications,
    ];

    /// Config/wire key, e.g. `core_skills`
    pub fn key(&self) -> &'static str {
        match self {
            Component::CoreSkills => "core_skills",
            Component::Experience => "experience",
            Component::Education => "education",
            Component::Certifications => "certifications",
        }
    }

    /// Human label for tables
    pub fn label(&self) -> &'static str {
        match self {
            Component::CoreSkills => "Core Skills",
            Component::Experience => "Experience",
            Component::Education => "Education",
            Component::Certifications => "Certifications",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Component::ALL.into_iter().find(|c| c.key() == key.trim())
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-component weights.
///
/// Weights are fractions in `[0, 1]`. They are not required to sum to 1;
/// see [`Weights::sum_warning`]. Any key missing from a config file keeps
/// its default.
///
/// Example YAML:
/// ```yaml
/// weights:
///   core_skills: 0.5
///   experience: 0.2
///   education: 0.15
///   certifications: 0.15
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Weights {
    pub core_skills: f64,
    pub experience: f64,
    pub education: f64,
    pub certifications: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            core_skills: 0.5,
            experience: 0.2,
            education: 0.15,
            certifications: 0.15,
        }
    }
}

impl Weights {
    pub fn get(&self, component: Component) -> f64 {
        match component {
            Component::CoreSkills => self.core_skills,
            Component::Experience => self.experience,
            Component::Education => self.education,
            Component::Certifications => self.certifications,
        }
    }

    pub fn set(&mut self, component: Component, weight: f64) {
        match component {
            Component::CoreSkills => self.core_skills = weight,
            Component::Experience => self.experience = weight,
            Component::Education => self.education = weight,
            Component::Certifications => self.certifications = weight,
        }
    }

    pub fn sum(&self) -> f64 {
        self.core_skills + self.experience + self.education + self.certifications
    }

    /// Warning text when the weights don't add up to 100%.
    /// Scoring still works, but totals are no longer percentages.
    pub fn sum_warning(&self) -> Option<String> {
        let sum = self.sum();
        if (sum - 1.0).abs() < 1e-6 {
            None
        } else {
            Some(format!(
                "weights sum to {:.0}%, expected 100%; results may be skewed",
                sum * 100.0
            ))
        }
    }
}

/// Parse a `key=value` weight override such as `core_skills=0.6`.
pub fn parse_weight_override(s: &str) -> anyhow::Result<(Component, f64)> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("expected KEY=VALUE, got '{}'", s))?;
    let component = Component::from_key(key).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown component '{}' (expected one of core_skills, experience, education, certifications)",
            key.trim()
        )
    })?;
    let weight: f64 = value.trim().parse()?;
    if !weight.is_finite() || weight < 0.0 {
        anyhow::bail!("weight for {} must be a non-negative number", component);
    }
    Ok((component, weight))
}
