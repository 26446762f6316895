pub mod form;
pub mod parse;
pub mod types;

pub use form::{build_custom_application, split_list, CustomApplicationForm, CUSTOM_APP_ID};
pub use parse::{find_by_id, load_applications, parse_applications, sample_applications, validate_job_data};
pub use types::{AppId, JobRequirements, MatchRequest, TalentProfile};
