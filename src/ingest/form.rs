use super::types::{AppId, JobRequirements, MatchRequest, TalentProfile};

/// Id assigned to ad-hoc applications built from form input
pub const CUSTOM_APP_ID: i64 = 999;

/// Raw form fields for a single ad-hoc application.
/// List fields are comma-separated text.
#[derive(Debug, Clone, Default)]
pub struct CustomApplicationForm {
    pub core_skills: String,
    pub min_experience: f64,
    pub education: String,
    pub certifications: String,
    pub talent_skills: String,
    pub talent_experience: f64,
    pub talent_education: String,
    pub talent_certifications: String,
}

/// Split comma-separated text, trimming entries and dropping empty ones.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn build_custom_application(form: &CustomApplicationForm) -> MatchRequest {
    MatchRequest {
        job_app_id: AppId::Number(CUSTOM_APP_ID),
        job_requirements: JobRequirements {
            core_skills: split_list(&form.core_skills),
            min_experience: form.min_experience,
            education: form.education.trim().to_string(),
            certifications: split_list(&form.certifications),
        },
        talent_profile: TalentProfile {
            skills: split_list(&form.talent_skills),
            experience: form.talent_experience,
            education: form.talent_education.trim().to_string(),
            certifications: split_list(&form.talent_certifications),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_trims_and_drops_empty() {
        assert_eq!(
            split_list(" Python, SQL ,,  ,Go"),
            vec!["Python".to_string(), "SQL".to_string(), "Go".to_string()]
        );
        assert!(split_list("").is_empty());
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn test_build_custom_application() {
        let form = CustomApplicationForm {
            core_skills: "Python, SQL".to_string(),
            min_experience: 3.0,
            education: "Bachelor's".to_string(),
            certifications: "AWS Certified".to_string(),
            talent_skills: "Python,ML".to_string(),
            talent_experience: 6.0,
            talent_education: " Master's ".to_string(),
            talent_certifications: String::new(),
        };
        let request = build_custom_application(&form);

        assert_eq!(request.job_app_id, AppId::Number(CUSTOM_APP_ID));
        assert_eq!(request.job_requirements.core_skills.len(), 2);
        assert_eq!(request.job_requirements.certifications, vec!["AWS Certified".to_string()]);
        assert_eq!(request.talent_profile.education, "Master's");
        assert!(request.talent_profile.certifications.is_empty());
    }
}
