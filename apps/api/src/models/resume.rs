use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tag written into every stored resume.
pub const RESUME_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub id: String,
    pub company: String,
    pub position: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub year: String,
    pub description: String,
}

/// The resume document as edited by the client. List order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    #[serde(rename = "personalInfo")]
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
}

/// A resume plus server-assigned metadata. Never mutated after save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResume {
    pub id: String,
    pub data: Resume,
    pub saved_at: DateTime<Utc>,
    pub version: String,
}

impl StoredResume {
    pub fn new(id: String, data: Resume, saved_at: DateTime<Utc>) -> Self {
        StoredResume {
            id,
            data,
            saved_at,
            version: RESUME_SCHEMA_VERSION.to_string(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resume_uses_camel_case_personal_info() {
        let value = serde_json::to_value(fixtures::sample_resume()).unwrap();
        assert!(value.get("personalInfo").is_some());
        assert!(value.get("personal_info").is_none());
    }

    #[test]
    fn test_resume_accepts_empty_strings_and_lists() {
        let raw = json!({
            "personalInfo": {"name": "", "email": "", "phone": "", "location": ""},
            "summary": "",
            "experience": [],
            "education": [],
            "skills": []
        });
        let resume: Resume = serde_json::from_value(raw).unwrap();
        assert!(resume.experience.is_empty());
        assert_eq!(resume.personal_info.name, "");
    }

    #[test]
    fn test_resume_rejects_missing_field() {
        let raw = json!({
            "personalInfo": {"name": "A", "email": "a@b.c", "phone": "1"},
            "summary": "",
            "experience": [],
            "education": [],
            "skills": []
        });
        let err = serde_json::from_value::<Resume>(raw).unwrap_err();
        assert!(err.to_string().contains("location"), "got: {err}");
    }

    #[test]
    fn test_resume_rejects_mistyped_skills() {
        let raw = json!({
            "personalInfo": {"name": "A", "email": "a@b.c", "phone": "1", "location": "X"},
            "summary": "",
            "experience": [],
            "education": [],
            "skills": "Rust"
        });
        assert!(serde_json::from_value::<Resume>(raw).is_err());
    }

    #[test]
    fn test_stored_resume_carries_version_tag() {
        let stored = StoredResume::new("1".to_string(), fixtures::sample_resume(), Utc::now());
        assert_eq!(stored.version, "1.0");
        let value = serde_json::to_value(&stored).unwrap();
        assert_eq!(value["data"]["experience"][0]["company"], "Acme");
    }
}
