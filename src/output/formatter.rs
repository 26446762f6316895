use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use super::breakdown::{component_breakdown, item_gaps, ItemGaps, Summary};
use crate::ingest::MatchRequest;
use crate::scoring::{Component, ScoredResult};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with 2 decimals; degraded totals get an asterisk
pub fn format_score(score: f64, degraded: bool) -> String {
    if degraded {
        format!("{:.2}*", score)
    } else {
        format!("{:.2}", score)
    }
}

/// Results ordered by total descending. Ties keep input order.
pub fn rank_results(results: &[ScoredResult]) -> Vec<&ScoredResult> {
    let mut ranked: Vec<&ScoredResult> = results.iter().collect();
    ranked.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

/// Results at or above `threshold`, in input order.
pub fn filter_above_threshold(results: &[ScoredResult], threshold: f64) -> Vec<&ScoredResult> {
    results.iter().filter(|r| r.total_score >= threshold).collect()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate an id to fit available width, accounting for Unicode
fn truncate_id(id: &str, max_width: usize) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() <= max_width {
        id.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

const SCORE_WIDTH: usize = 8; // fits "100.00*"
const COMPONENT_WIDTH: usize = 7; // fits "100.00"

/// Format results as a ranked table:
/// Rank, Id, Total, then the four raw component scores.
///
/// Totals below `minimum_match_score` are dimmed when colors are on.
pub fn format_results_table(
    results: &[&ScoredResult],
    minimum_match_score: f64,
    use_colors: bool,
) -> String {
    if results.is_empty() {
        return "No job applications to show.".to_string();
    }

    let ids: Vec<String> = results.iter().map(|r| r.job_app_id.to_string()).collect();
    let longest_id = ids.iter().map(|id| id.chars().count()).max().unwrap_or(2);

    // Rank 4 + total + 4 components, each with 2-space separators
    let fixed_width = 4 + 2 + SCORE_WIDTH + 4 * (2 + COMPONENT_WIDTH) + 2;
    let id_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 6 => longest_id.min(width - fixed_width),
        Some(_) => longest_id.min(6),
        None => longest_id,
    }
    .max(2);

    let mut lines = Vec::with_capacity(results.len() + 1);
    let header = format!(
        "{:>4}  {:<id_width$}  {:>SCORE_WIDTH$}  {:>COMPONENT_WIDTH$}  {:>COMPONENT_WIDTH$}  {:>COMPONENT_WIDTH$}  {:>COMPONENT_WIDTH$}",
        "#", "ID", "Total", "Skills", "Exp", "Edu", "Certs",
    );
    lines.push(if use_colors {
        header.bold().to_string()
    } else {
        header
    });

    for (idx, (result, id)) in results.iter().zip(ids.iter()).enumerate() {
        let rank = format!("{:>3}.", idx + 1);
        let id = format!("{:<id_width$}", truncate_id(id, id_width));
        let total = format!(
            "{:>SCORE_WIDTH$}",
            format_score(result.total_score, result.degraded)
        );
        let components = Component::ALL
            .iter()
            .map(|c| format!("{:>COMPONENT_WIDTH$.2}", result.scores.get(*c).raw_score))
            .collect::<Vec<_>>()
            .join("  ");

        let below = result.total_score < minimum_match_score;
        let line = if use_colors {
            let total = if below {
                total.red().to_string()
            } else {
                total.green().bold().to_string()
            };
            format!("{}  {}  {}  {}", rank.dimmed(), id, total, components)
        } else {
            format!("{}  {}  {}  {}", rank, id, total, components)
        };
        lines.push(line);
    }

    lines.join("\n")
}

/// Format results as tab-separated values for scripting
/// Columns: id, total, core_skills, experience, education, certifications (raw)
pub fn format_tsv(results: &[&ScoredResult]) -> String {
    results
        .iter()
        .map(|r| {
            let mut fields = vec![r.job_app_id.to_string(), format!("{:.2}", r.total_score)];
            fields.extend(
                r.scores
                    .iter()
                    .map(|(_, score)| format!("{:.2}", score.raw_score)),
            );
            fields.join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full results as pretty JSON
pub fn format_json(results: &[&ScoredResult]) -> Result<String> {
    serde_json::to_string_pretty(results).context("Failed to serialize results")
}

fn format_gap_line(label: &str, gaps: &ItemGaps, use_colors: bool) -> String {
    let join = |items: &[String]| {
        if items.is_empty() {
            "-".to_string()
        } else {
            items.join(", ")
        }
    };
    let matching = join(&gaps.matching);
    let missing = join(&gaps.missing);
    let extra = join(&gaps.extra);
    if use_colors {
        format!(
            "  {}: matched {} | missing {} | extra {}",
            label,
            matching.green(),
            missing.red(),
            extra.dimmed()
        )
    } else {
        format!(
            "  {}: matched {} | missing {} | extra {}",
            label, matching, missing, extra
        )
    }
}

/// Detailed multi-line view of one result: component breakdown and, when
/// the request is available, which skills and certifications matched.
pub fn format_result_detail(
    result: &ScoredResult,
    request: Option<&MatchRequest>,
    minimum_match_score: f64,
    use_colors: bool,
) -> String {
    let mut lines = Vec::new();

    let total = format_score(result.total_score, result.degraded);
    let verdict = if result.total_score >= minimum_match_score {
        "meets minimum"
    } else {
        "below minimum"
    };
    if use_colors {
        lines.push(format!(
            "{} {}  Total: {} ({} of {:.0})",
            "Job application".bold(),
            result.job_app_id.to_string().cyan(),
            total.bold(),
            verdict,
            minimum_match_score
        ));
    } else {
        lines.push(format!(
            "Job application {}  Total: {} ({} of {:.0})",
            result.job_app_id, total, verdict, minimum_match_score
        ));
    }

    if result.degraded {
        lines.push("  Total could not be computed; reported as 0".to_string());
    }

    lines.push(format!(
        "  {:<16}{:>10}{:>10}{:>14}",
        "Component", "Raw", "Weighted", "Contribution"
    ));
    for row in component_breakdown(result) {
        lines.push(format!(
            "  {:<16}{:>10.2}{:>10.2}{:>13.1}%",
            row.component.label(),
            row.raw_score,
            row.weighted_score,
            row.contribution
        ));
    }

    if let Some(request) = request {
        let job = &request.job_requirements;
        let talent = &request.talent_profile;
        lines.push(format_gap_line(
            "Skills",
            &item_gaps(&job.core_skills, &talent.skills),
            use_colors,
        ));
        lines.push(format_gap_line(
            "Certifications",
            &item_gaps(&job.certifications, &talent.certifications),
            use_colors,
        ));
        lines.push(format!(
            "  Experience: {} years (minimum {})",
            talent.experience, job.min_experience
        ));
        let or_dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };
        lines.push(format!(
            "  Education: {} (required {})",
            or_dash(&talent.education),
            or_dash(&job.education)
        ));
    }

    lines.join("\n")
}

pub fn format_summary(summary: &Summary, minimum_match_score: f64) -> String {
    let components = summary
        .component_means
        .iter()
        .map(|(c, mean)| format!("{} {:.1}", c.label(), mean))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} applications, mean total {:.2}, {} at or above {:.0}\nMean component scores: {}",
        summary.count,
        summary.mean_total,
        summary.at_or_above_threshold,
        minimum_match_score,
        components
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{AppId, JobRequirements, TalentProfile};
    use crate::output::summarize;
    use crate::scoring::{ComponentScore, ComponentScores};

    fn sample_result(id: i64, total: f64) -> ScoredResult {
        ScoredResult {
            job_app_id: AppId::Number(id),
            total_score: total,
            scores: ComponentScores {
                core_skills: ComponentScore::new(50.0, 0.5),
                experience: ComponentScore::new(100.0, 0.2),
                education: ComponentScore::new(100.0, 0.15),
                certifications: ComponentScore::new(0.0, 0.15),
            },
            degraded: false,
        }
    }

    fn sample_request() -> MatchRequest {
        MatchRequest {
            job_app_id: AppId::Number(1),
            job_requirements: JobRequirements {
                core_skills: vec!["Python".to_string(), "SQL".to_string()],
                min_experience: 3.0,
                education: "Bachelor's".to_string(),
                certifications: vec!["AWS Certified".to_string()],
            },
            talent_profile: TalentProfile {
                skills: vec!["Python".to_string(), "ML".to_string()],
                experience: 6.0,
                education: "Master's".to_string(),
                certifications: vec![],
            },
        }
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(60.0, false), "60.00");
        assert_eq!(format_score(51.666, false), "51.67");
        assert_eq!(format_score(0.0, true), "0.00*");
    }

    #[test]
    fn test_rank_results_descending_stable() {
        let results = vec![
            sample_result(1, 40.0),
            sample_result(2, 75.5),
            sample_result(3, 40.0),
        ];
        let ranked = rank_results(&results);
        let ids: Vec<String> = ranked.iter().map(|r| r.job_app_id.to_string()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);
    }

    #[test]
    fn test_filter_above_threshold_keeps_input_order() {
        let results = vec![
            sample_result(1, 40.0),
            sample_result(2, 75.5),
            sample_result(3, 39.99),
            sample_result(4, 90.0),
        ];
        let kept = filter_above_threshold(&results, 40.0);
        let ids: Vec<String> = kept.iter().map(|r| r.job_app_id.to_string()).collect();
        assert_eq!(ids, vec!["1", "2", "4"]);
    }

    #[test]
    fn test_format_json_keeps_given_order() {
        let results = vec![sample_result(1, 10.0), sample_result(2, 90.0)];
        let all: Vec<&ScoredResult> = results.iter().collect();
        let value: serde_json::Value = serde_json::from_str(&format_json(&all).unwrap()).unwrap();
        assert_eq!(value[0]["job_app_id"], 1);
        assert_eq!(value[1]["job_app_id"], 2);
    }

    #[test]
    fn test_truncate_id() {
        assert_eq!(truncate_id("short", 10), "short");
        assert_eq!(truncate_id("a-very-long-identifier", 10), "a-very-...");
        assert_eq!(truncate_id("abcdef", 3), "abc");
    }

    #[test]
    fn test_format_results_table_empty() {
        assert_eq!(
            format_results_table(&[], 40.0, false),
            "No job applications to show."
        );
    }

    #[test]
    fn test_format_results_table_rows() {
        let first = sample_result(7, 60.0);
        let second = sample_result(8, 12.5);
        let result = format_results_table(&[&first, &second], 40.0, false);
        let lines: Vec<&str> = result.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Total"));
        assert!(lines[1].starts_with("  1."));
        assert!(lines[1].contains("60.00"));
        assert!(lines[1].contains("50.00"));
        assert!(lines[2].starts_with("  2."));
        assert!(lines[2].contains("12.50"));
    }

    #[test]
    fn test_format_tsv() {
        let first = sample_result(1, 60.0);
        let tsv = format_tsv(&[&first]);
        assert_eq!(tsv, "1\t60.00\t50.00\t100.00\t100.00\t0.00");
        assert_eq!(format_tsv(&[]), "");
    }

    #[test]
    fn test_format_json() {
        let first = sample_result(1, 60.0);
        let json = format_json(&[&first]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["job_app_id"], 1);
        assert_eq!(value[0]["scores"]["education"]["raw_score"], 100.0);
    }

    #[test]
    fn test_format_result_detail() {
        let result = sample_result(1, 60.0);
        let request = sample_request();
        let detail = format_result_detail(&result, Some(&request), 40.0, false);

        assert!(detail.contains("Job application 1  Total: 60.00 (meets minimum of 40)"));
        assert!(detail.contains("Core Skills"));
        assert!(detail.contains("41.7%"));
        assert!(detail.contains("Skills: matched Python | missing SQL | extra ML"));
        assert!(detail.contains("Certifications: matched - | missing AWS Certified | extra -"));
        assert!(detail.contains("Education: Master's (required Bachelor's)"));
    }

    #[test]
    fn test_format_result_detail_without_request() {
        let result = sample_result(2, 10.0);
        let detail = format_result_detail(&result, None, 40.0, false);
        assert!(detail.contains("below minimum"));
        assert!(!detail.contains("Skills:"));
    }

    #[test]
    fn test_format_summary() {
        let results = vec![sample_result(1, 60.0), sample_result(2, 20.0)];
        let text = format_summary(&summarize(&results, 40.0), 40.0);
        assert!(text.starts_with("2 applications, mean total 40.00, 1 at or above 40"));
        assert!(text.contains("Core Skills 50.0"));
    }
}
