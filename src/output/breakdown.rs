use std::collections::HashSet;

use crate::scoring::{Component, ScoredResult};

/// One component's share of a result
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentRow {
    pub component: Component,
    pub raw_score: f64,
    pub weighted_score: f64,
    pub contribution: f64, // % of total, 0 when total <= 0
}

pub fn component_breakdown(result: &ScoredResult) -> Vec<ComponentRow> {
    let total = result.total_score;
    result
        .scores
        .iter()
        .map(|(component, score)| ComponentRow {
            component,
            raw_score: score.raw_score,
            weighted_score: score.weighted_score,
            contribution: if total > 0.0 {
                score.weighted_score / total * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

/// How a provided list lines up against a required one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemGaps {
    pub matching: Vec<String>,
    pub missing: Vec<String>,
    pub extra: Vec<String>,
}

/// Compare lists by exact string equality, keeping first-seen order and
/// collapsing duplicates.
pub fn item_gaps(required: &[String], provided: &[String]) -> ItemGaps {
    let required_set: HashSet<&str> = required.iter().map(String::as_str).collect();
    let provided_set: HashSet<&str> = provided.iter().map(String::as_str).collect();

    let mut gaps = ItemGaps::default();
    let mut seen = HashSet::new();
    for item in required {
        if !seen.insert(item.as_str()) {
            continue;
        }
        if provided_set.contains(item.as_str()) {
            gaps.matching.push(item.clone());
        } else {
            gaps.missing.push(item.clone());
        }
    }

    let mut seen = HashSet::new();
    for item in provided {
        if seen.insert(item.as_str()) && !required_set.contains(item.as_str()) {
            gaps.extra.push(item.clone());
        }
    }
    gaps
}

/// Batch-level averages
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean_total: f64,
    pub component_means: Vec<(Component, f64)>, // mean raw score per component
    pub at_or_above_threshold: usize,
}

pub fn summarize(results: &[ScoredResult], minimum_match_score: f64) -> Summary {
    let count = results.len();
    let mean = |f: &dyn Fn(&ScoredResult) -> f64| {
        if count == 0 {
            0.0
        } else {
            results.iter().map(f).sum::<f64>() / count as f64
        }
    };

    Summary {
        count,
        mean_total: mean(&|r| r.total_score),
        component_means: Component::ALL
            .into_iter()
            .map(|c| (c, mean(&|r| r.scores.get(c).raw_score)))
            .collect(),
        at_or_above_threshold: results
            .iter()
            .filter(|r| r.total_score >= minimum_match_score)
            .count(),
    }
}
