use std::collections::HashSet;

/// What an overlap score is when nothing is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyRequired {
    /// Unscoreable: raw score 0 (core skills)
    Zero,
    /// Automatically satisfied: raw score 100 (certifications)
    Full,
}

/// Percentage of `required` items present in `candidate`.
///
/// Both lists are treated as sets: exact string equality, duplicates
/// collapsed, no case folding.
pub fn overlap_score(required: &[String], candidate: &[String], empty: EmptyRequired) -> f64 {
    let required: HashSet<&str> = required.iter().map(String::as_str).collect();
    if required.is_empty() {
        return match empty {
            EmptyRequired::Zero => 0.0,
            EmptyRequired::Full => 100.0,
        };
    }

    let candidate: HashSet<&str> = candidate.iter().map(String::as_str).collect();
    let matched = required.intersection(&candidate).count();
    100.0 * matched as f64 / required.len() as f64
}

/// Linear ramp up to the minimum, capped at 100. No minimum means full marks.
pub fn experience_score(min_experience: f64, candidate_experience: f64) -> f64 {
    if min_experience == 0.0 {
        return 100.0;
    }
    (100.0 * candidate_experience / min_experience).min(100.0)
}

/// Score the candidate's education level against the required one.
///
/// `hierarchy` is ordered most senior first. Meeting or exceeding the
/// requirement scores 100; each level below loses `100 / (len - 1)`.
/// Empty or unknown levels score 0.
pub fn education_score(hierarchy: &[String], required: &str, candidate: &str) -> f64 {
    if required.is_empty() || candidate.is_empty() {
        return 0.0;
    }

    let position = |level: &str| hierarchy.iter().position(|h| h == level);
    let (Some(required_idx), Some(candidate_idx)) = (position(required), position(candidate))
    else {
        return 0.0;
    };

    if candidate_idx <= required_idx {
        return 100.0;
    }

    // A single-level hierarchy has no room to decay.
    if hierarchy.len() <= 1 {
        return 100.0;
    }

    let max_distance = (hierarchy.len() - 1) as f64;
    let distance = (candidate_idx - required_idx) as f64;
    (100.0 - 100.0 * distance / max_distance).max(0.0)
}
