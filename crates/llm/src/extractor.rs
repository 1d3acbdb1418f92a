//! The extraction orchestrator: fan out one LLM call per field and per
//! experience entry, await them jointly, and assemble a fully-populated
//! record no matter what failed.

use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use cvforge_core::{
    Config, ConsolidatedSections, Education, LanguageSkill, PersonalInfo, Publication,
    StructuredCv, WorkExperience,
};

use crate::client::LlmClient;
use crate::merge::merge_records;
use crate::prompts;
use crate::provider::LlmError;

/// Placeholder written into a scalar field whose extraction failed. Arrays
/// drop their failed units instead.
pub const FAILED_FIELD_PLACEHOLDER: &str = "[extraction failed]";

/// The orchestrator's envelope: the record is always fully populated, and
/// the flag tells transports whether anything failed along the way.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ExtractionReport {
    pub cv: StructuredCv,
    pub complete: bool,
    pub failed_fields: Vec<String>,
}

pub struct CvExtractor {
    client: LlmClient,
}

enum FieldOutcome {
    Value(Value),
    /// Source text was empty; nothing to extract, nothing failed.
    Empty,
    Failed,
}

impl CvExtractor {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    /// Build from config. Fails fast when the configured provider has no
    /// credential.
    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        Ok(Self::new(LlmClient::from_config(config)?))
    }

    /// Extract a structured record from consolidated sections plus the
    /// pre-split experience entries. All calls run concurrently; per-unit
    /// failures are recorded and never abort the record.
    pub async fn extract(
        &self,
        sections: &ConsolidatedSections,
        experience_entries: &[String],
    ) -> ExtractionReport {
        info!(entries = experience_entries.len(), "extracting CV fields");

        // Names and contact lines often live in the profile when no personal
        // details section exists.
        let personal_input = if sections.personal_details.trim().is_empty() {
            sections.profile.clone()
        } else {
            sections.personal_details.clone()
        };
        let languages_input =
            [sections.personal_details.as_str(), sections.profile.as_str()].join("\n\n");

        let (summary, personal, countries, education, publications, languages, entry_outcomes) =
            tokio::join!(
                self.field("summary", &sections.profile, prompts::profile),
                self.field("personal_info", &personal_input, prompts::personal_info),
                self.field(
                    "country_work_experience",
                    &sections.country_experience,
                    prompts::country_experience,
                ),
                self.field("education", &sections.qualifications, prompts::qualifications),
                self.field("publications", &sections.publications, prompts::publications),
                self.field("languages", &languages_input, prompts::languages),
                join_all(
                    experience_entries
                        .iter()
                        .map(|entry| self.field("experience", entry, prompts::experience_entry)),
                ),
            );

        let mut attempted = 0usize;
        let mut failed: Vec<String> = Vec::new();
        let mut cv = StructuredCv::default();

        if let Some(dto) =
            apply::<SummaryDto>(summary, "summary", &mut attempted, &mut failed)
        {
            cv.summary = dto.summary;
        } else if failed.last().map(String::as_str) == Some("summary") {
            cv.summary = FAILED_FIELD_PLACEHOLDER.to_string();
        }

        if let Some(info) =
            apply::<PersonalInfo>(personal, "personal_info", &mut attempted, &mut failed)
        {
            cv.personal_info = info;
        } else if failed.last().map(String::as_str) == Some("personal_info") {
            cv.personal_info.name = FAILED_FIELD_PLACEHOLDER.to_string();
        }

        if let Some(dto) = apply::<CountriesDto>(
            countries,
            "country_work_experience",
            &mut attempted,
            &mut failed,
        ) {
            cv.country_work_experience = dto.countries;
        }

        if let Some(dto) =
            apply::<EducationDto>(education, "education", &mut attempted, &mut failed)
        {
            cv.education = dto.education;
        }

        if let Some(dto) =
            apply::<PublicationsDto>(publications, "publications", &mut attempted, &mut failed)
        {
            cv.publications = dto.publications;
        }

        if let Some(dto) =
            apply::<LanguagesDto>(languages, "languages", &mut attempted, &mut failed)
        {
            cv.languages = dto.languages;
        }

        // Failed entries are filtered out; original document order is kept.
        for (i, outcome) in entry_outcomes.into_iter().enumerate() {
            let name = format!("experience[{i}]");
            if let Some(entry) = apply::<WorkExperience>(outcome, &name, &mut attempted, &mut failed)
            {
                cv.work_experience.push(entry);
            }
        }

        self.finish(cv, attempted, failed)
    }

    /// Whole-document fallback for unsegmented text: one call per chunk,
    /// partial records merged.
    pub async fn extract_chunks(&self, chunks: &[String]) -> ExtractionReport {
        info!(chunks = chunks.len(), "extracting CV from unsegmented chunks");

        let outcomes = join_all(chunks.iter().map(|chunk| async move {
            match self
                .client
                .complete_json(prompts::SYSTEM_PROMPT, &prompts::full_record(chunk))
                .await
            {
                Ok(value) => serde_json::from_value::<StructuredCv>(value).map_err(|e| {
                    warn!(error = %e, "chunk produced a malformed record");
                }),
                Err(e) => {
                    warn!(error = %e, "chunk extraction failed after retries");
                    Err(())
                }
            }
        }))
        .await;

        let mut failed = Vec::new();
        let mut records = Vec::new();
        for (i, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(record) => records.push(record),
                Err(()) => failed.push(format!("chunk[{i}]")),
            }
        }

        let attempted = chunks.len();
        self.finish(merge_records(records), attempted, failed)
    }

    async fn field(
        &self,
        name: &str,
        input: &str,
        build: fn(&str) -> String,
    ) -> FieldOutcome {
        if input.trim().is_empty() {
            return FieldOutcome::Empty;
        }
        match self
            .client
            .complete_json(prompts::SYSTEM_PROMPT, &build(input))
            .await
        {
            Ok(value) => FieldOutcome::Value(value),
            Err(e) => {
                warn!(field = name, error = %e, "field extraction failed after retries");
                FieldOutcome::Failed
            }
        }
    }

    fn finish(&self, cv: StructuredCv, attempted: usize, failed: Vec<String>) -> ExtractionReport {
        // Every attempted unit failed: return the marked fallback record.
        let cv = if attempted > 0 && failed.len() == attempted {
            StructuredCv::failure_placeholder()
        } else {
            cv
        };

        if failed.is_empty() {
            info!("extraction complete");
        } else {
            warn!(failed = failed.len(), "extraction finished with failed units");
        }

        ExtractionReport {
            cv,
            complete: failed.is_empty(),
            failed_fields: failed,
        }
    }
}

/// Unpack a field outcome into its typed DTO, tracking attempts and
/// failures. A malformed value counts as a failure, an empty source does not.
fn apply<T: DeserializeOwned>(
    outcome: FieldOutcome,
    name: &str,
    attempted: &mut usize,
    failed: &mut Vec<String>,
) -> Option<T> {
    match outcome {
        FieldOutcome::Empty => None,
        FieldOutcome::Failed => {
            *attempted += 1;
            failed.push(name.to_string());
            None
        }
        FieldOutcome::Value(value) => {
            *attempted += 1;
            match serde_json::from_value(value) {
                Ok(dto) => Some(dto),
                Err(e) => {
                    warn!(field = name, error = %e, "field result had the wrong shape");
                    failed.push(name.to_string());
                    None
                }
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SummaryDto {
    summary: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CountriesDto {
    countries: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EducationDto {
    education: Vec<Education>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PublicationsDto {
    publications: Vec<Publication>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LanguagesDto {
    languages: Vec<LanguageSkill>,
}
