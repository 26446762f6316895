pub mod engine;
pub mod factors;
pub mod validation;
pub mod weights;

pub use engine::{find_result, round2, ComponentScore, ComponentScores, ScoredResult, ScoringEngine};
pub use factors::{education_score, experience_score, overlap_score, EmptyRequired};
pub use validation::{repair_config, validate_config};
pub use weights::{parse_weight_override, Component, Weights};
