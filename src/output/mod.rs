pub mod breakdown;
pub mod export;
pub mod formatter;

pub use breakdown::{component_breakdown, item_gaps, summarize, ComponentRow, ItemGaps, Summary};
pub use export::{export_csv, export_json, results_to_csv, results_to_export_json};
pub use formatter::{
    filter_above_threshold, format_json, format_result_detail, format_results_table, format_score, format_summary,
    format_tsv, rank_results, should_use_colors,
};
