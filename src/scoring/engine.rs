use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::factors::{education_score, experience_score, overlap_score, EmptyRequired};
use super::weights::{Component, Weights};
use crate::config::Config;
use crate::ingest::{AppId, MatchRequest};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ComponentScore {
    pub raw_score: f64,      // 0-100
    pub weighted_score: f64, // raw_score * weight
}

impl ComponentScore {
    pub fn new(raw_score: f64, weight: f64) -> Self {
        Self {
            raw_score,
            weighted_score: raw_score * weight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ComponentScores {
    pub core_skills: ComponentScore,
    pub experience: ComponentScore,
    pub education: ComponentScore,
    pub certifications: ComponentScore,
}

impl ComponentScores {
    pub fn get(&self, component: Component) -> &ComponentScore {
        match component {
            Component::CoreSkills => &self.core_skills,
            Component::Experience => &self.experience,
            Component::Education => &self.education,
            Component::Certifications => &self.certifications,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Component, &ComponentScore)> {
        Component::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScoredResult {
    pub job_app_id: AppId,
    pub total_score: f64,
    pub scores: ComponentScores,
    /// Total could not be computed and was replaced by 0
    #[serde(default, skip_serializing_if = "is_false")]
    pub degraded: bool,
}

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sum weighted scores, rejecting anything that isn't a finite number.
fn checked_total(scores: &ComponentScores) -> Result<f64> {
    let mut total = 0.0;
    for (component, score) in scores.iter() {
        if !score.raw_score.is_finite() || !score.weighted_score.is_finite() {
            bail!(
                "{} score is not a finite number (raw {}, weighted {})",
                component,
                score.raw_score,
                score.weighted_score
            );
        }
        total += score.weighted_score;
    }
    if !total.is_finite() {
        bail!("total score overflowed");
    }
    Ok(round2(total))
}

/// Scores match requests against a fixed set of weights and an education
/// hierarchy. Built once per session and shared by reference.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    weights: Weights,
    education_hierarchy: Vec<String>,
}

impl ScoringEngine {
    pub fn new(weights: Weights, education_hierarchy: Vec<String>) -> Self {
        Self {
            weights,
            education_hierarchy,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.weights, config.education_hierarchy.clone())
    }

    /// Same hierarchy, different weights (per-call override)
    pub fn with_weights(&self, weights: Weights) -> Self {
        Self::new(weights, self.education_hierarchy.clone())
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn education_hierarchy(&self) -> &[String] {
        &self.education_hierarchy
    }

    fn component(&self, component: Component, raw_score: f64) -> ComponentScore {
        ComponentScore::new(raw_score, self.weights.get(component))
    }

    pub fn score_core_skills(&self, request: &MatchRequest) -> ComponentScore {
        let raw = overlap_score(
            &request.job_requirements.core_skills,
            &request.talent_profile.skills,
            EmptyRequired::Zero,
        );
        self.component(Component::CoreSkills, raw)
    }

    pub fn score_experience(&self, request: &MatchRequest) -> ComponentScore {
        let raw = experience_score(
            request.job_requirements.min_experience,
            request.talent_profile.experience,
        );
        self.component(Component::Experience, raw)
    }

    pub fn score_education(&self, request: &MatchRequest) -> ComponentScore {
        let raw = education_score(
            &self.education_hierarchy,
            &request.job_requirements.education,
            &request.talent_profile.education,
        );
        self.component(Component::Education, raw)
    }

    pub fn score_certifications(&self, request: &MatchRequest) -> ComponentScore {
        let raw = overlap_score(
            &request.job_requirements.certifications,
            &request.talent_profile.certifications,
            EmptyRequired::Full,
        );
        self.component(Component::Certifications, raw)
    }

    /// Score one application.
    ///
    /// A total that can't be computed is logged and replaced by 0 so a
    /// single bad record never aborts a batch.
    pub fn score_application(&self, request: &MatchRequest) -> ScoredResult {
        let scores = ComponentScores {
            core_skills: self.score_core_skills(request),
            experience: self.score_experience(request),
            education: self.score_education(request),
            certifications: self.score_certifications(request),
        };

        let (total_score, degraded) = match checked_total(&scores) {
            Ok(total) => (total, false),
            Err(e) => {
                error!(job_app_id = %request.job_app_id, "Error calculating total score: {}", e);
                (0.0, true)
            }
        };

        debug!(job_app_id = %request.job_app_id, total_score, "scored application");

        ScoredResult {
            job_app_id: request.job_app_id.clone(),
            total_score,
            scores,
            degraded,
        }
    }

    /// Score every application, preserving input order.
    pub fn score_all(&self, requests: &[MatchRequest]) -> Vec<ScoredResult> {
        requests.iter().map(|r| self.score_application(r)).collect()
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Find a result by id.
pub fn find_result<'a>(results: &'a [ScoredResult], id: &AppId) -> Option<&'a ScoredResult> {
    results.iter().find(|r| &r.job_app_id == id)
}
