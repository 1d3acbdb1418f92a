use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Segmented document: section name (as it appeared in the source, colon and
/// whitespace stripped) to section text. Keeps document order so downstream
/// consolidation is deterministic.
pub type SectionMap = IndexMap<String, String>;

/// The fixed six-field shape every segmented document is consolidated onto.
/// Every field defaults to the empty string; sections with no canonical home
/// are appended to `experience` under a visible marker, never dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidatedSections {
    pub profile: String,
    pub personal_details: String,
    pub country_experience: String,
    pub qualifications: String,
    pub publications: String,
    pub experience: String,
}

// ── Structured output record ──────────────────────────────────

/// Contact and identity block. All fields possibly empty, never absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub nationality: String,
}

/// One role, as authored (reverse-chronological order is preserved from the
/// source document, not re-sorted).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkExperience {
    pub dates: String,
    pub role: String,
    pub client: String,
    pub location: String,
    pub description: String,
    pub responsibilities: Vec<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub year: String,
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Publication {
    pub citation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageSkill {
    pub language: String,
    pub proficiency: String,
}

/// The final extraction record. Every field is always present; arrays are
/// never null. Consumers never need null checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredCv {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub publications: Vec<Publication>,
    pub languages: Vec<LanguageSkill>,
    pub country_work_experience: Vec<String>,
}

impl StructuredCv {
    /// The record returned when extraction fails outright. The placeholder
    /// text stays visible in rendered output.
    pub fn failure_placeholder() -> Self {
        Self {
            personal_info: PersonalInfo {
                name: "Processing failed".to_string(),
                ..PersonalInfo::default()
            },
            summary: "The document could not be processed. Check the LLM configuration and retry."
                .to_string(),
            ..Self::default()
        }
    }

    /// True when nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.personal_info == PersonalInfo::default()
            && self.summary.is_empty()
            && self.work_experience.is_empty()
            && self.education.is_empty()
            && self.publications.is_empty()
            && self.languages.is_empty()
            && self.country_work_experience.is_empty()
    }
}
