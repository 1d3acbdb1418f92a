//! Orchestrator tests against a scripted in-process provider.

use std::time::Duration;

use async_trait::async_trait;
use cvforge_core::ConsolidatedSections;
use cvforge_llm::{CvExtractor, LlmClient, LlmError, LlmProvider, Message, RetryPolicy};

/// Routes prompts to canned JSON by their instruction phrasing; prompts
/// containing `fail_marker` fail every attempt.
#[derive(Debug)]
struct RoutingProvider {
    fail_marker: Option<&'static str>,
}

impl RoutingProvider {
    fn ok() -> Self {
        Self { fail_marker: None }
    }

    fn failing_on(marker: &'static str) -> Self {
        Self { fail_marker: Some(marker) }
    }
}

#[async_trait]
impl LlmProvider for RoutingProvider {
    async fn complete(
        &self,
        messages: Vec<Message>,
        _temperature: f32,
        _max_tokens: u32,
    ) -> Result<String, LlmError> {
        let user = &messages[1].content;

        if let Some(marker) = self.fail_marker {
            if user.contains(marker) {
                return Err(LlmError::Api { status: 500, body: "scripted failure".into() });
            }
        }

        if user.contains("Extract the professional summary") {
            return Ok(r#"{"summary": "Seasoned water-resources engineer."}"#.into());
        }
        if user.contains("personal information") {
            return Ok(
                r#"{"name": "Jane Doe", "title": "Engineer", "email": "jane@example.org"}"#.into(),
            );
        }
        if user.contains("countries the candidate has worked in") {
            return Ok(r#"{"countries": ["Kenya", "Nepal"]}"#.into());
        }
        if user.contains("education history") {
            return Ok(
                r#"{"education": [{"degree": "MSc Hydrology", "institution": "TU Delft", "year": "2008"}]}"#
                    .into(),
            );
        }
        if user.contains("Extract the publications") {
            return Ok(r#"{"publications": [{"citation": "Doe, J. (2019). Rivers."}]}"#.into());
        }
        if user.contains("languages the candidate speaks") {
            return Ok(
                r#"{"languages": [{"language": "English", "proficiency": "Fluent"}]}"#.into(),
            );
        }
        if user.contains("single work-experience entry") {
            let entry = user.rsplit("Experience entry:\n").next().unwrap_or("");
            let year: String = entry.chars().take(4).collect();
            return Ok(format!(r#"{{"dates": "{year}", "role": "Role {year}"}}"#));
        }
        if user.contains("document excerpt") {
            if user.contains("CHUNK-A") {
                return Ok(r#"{
                    "personal_info": {"name": "Ada Lovelace"},
                    "summary": "Short.",
                    "work_experience": [{"dates": "2020", "role": "Analyst"}],
                    "languages": [{"language": "English", "proficiency": "Fluent"}]
                }"#
                .into());
            }
            if user.contains("CHUNK-B") {
                return Ok(r#"{
                    "summary": "A longer summary from the second chunk.",
                    "work_experience": [{"dates": "2016", "role": "Engineer"}],
                    "languages": [
                        {"language": "English", "proficiency": "Fluent"},
                        {"language": "Dutch", "proficiency": "Native"}
                    ]
                }"#
                .into());
            }
        }

        Err(LlmError::Parse("unroutable prompt".into()))
    }
}

fn extractor(provider: RoutingProvider) -> CvExtractor {
    let client = LlmClient::new(Box::new(provider), 0.0, 1024).with_retry(RetryPolicy {
        max_attempts: 2,
        base_delay: Duration::ZERO,
    });
    CvExtractor::new(client)
}

fn sample_sections() -> ConsolidatedSections {
    ConsolidatedSections {
        profile: "Water-resources engineer.".into(),
        personal_details: "Jane Doe, Dutch national.".into(),
        country_experience: "Kenya, Nepal".into(),
        qualifications: "MSc Hydrology, TU Delft, 2008".into(),
        publications: "Doe, J. (2019). Rivers.".into(),
        experience: "2020 - Team lead\n2016 - Engineer".into(),
    }
}

fn sample_entries() -> Vec<String> {
    vec!["2020 - Team lead".into(), "2016 - Engineer".into()]
}

#[tokio::test]
async fn all_fields_populate_on_success() {
    let report = extractor(RoutingProvider::ok())
        .extract(&sample_sections(), &sample_entries())
        .await;

    assert!(report.complete, "failed: {:?}", report.failed_fields);
    assert_eq!(report.cv.summary, "Seasoned water-resources engineer.");
    assert_eq!(report.cv.personal_info.name, "Jane Doe");
    assert_eq!(report.cv.country_work_experience, vec!["Kenya", "Nepal"]);
    assert_eq!(report.cv.education.len(), 1);
    assert_eq!(report.cv.publications.len(), 1);
    assert_eq!(report.cv.languages.len(), 1);
}

#[tokio::test]
async fn experience_entries_keep_document_order() {
    let report = extractor(RoutingProvider::ok())
        .extract(&sample_sections(), &sample_entries())
        .await;

    let dates: Vec<&str> = report.cv.work_experience.iter().map(|w| w.dates.as_str()).collect();
    assert_eq!(dates, vec!["2020", "2016"]);
}

#[tokio::test]
async fn one_failed_field_does_not_sink_the_record() {
    let report = extractor(RoutingProvider::failing_on("Extract the publications"))
        .extract(&sample_sections(), &sample_entries())
        .await;

    assert!(!report.complete);
    assert_eq!(report.failed_fields, vec!["publications"]);
    assert!(report.cv.publications.is_empty());
    // The other four field calls and both entries still landed.
    assert_eq!(report.cv.personal_info.name, "Jane Doe");
    assert_eq!(report.cv.education.len(), 1);
    assert_eq!(report.cv.work_experience.len(), 2);
}

#[tokio::test]
async fn failed_entries_are_filtered_in_order() {
    let report = extractor(RoutingProvider::failing_on("2018"))
        .extract(
            &sample_sections(),
            &["2020 - A".to_string(), "2018 - B".to_string(), "2016 - C".to_string()],
        )
        .await;

    assert!(!report.complete);
    assert_eq!(report.failed_fields, vec!["experience[1]"]);
    let dates: Vec<&str> = report.cv.work_experience.iter().map(|w| w.dates.as_str()).collect();
    assert_eq!(dates, vec!["2020", "2016"]);
}

#[tokio::test]
async fn total_failure_returns_the_placeholder_record() {
    #[derive(Debug)]
    struct AlwaysFails;
    #[async_trait]
    impl LlmProvider for AlwaysFails {
        async fn complete(
            &self,
            _messages: Vec<Message>,
            _temperature: f32,
            _max_tokens: u32,
        ) -> Result<String, LlmError> {
            Err(LlmError::Api { status: 500, body: "down".into() })
        }
    }

    let client = LlmClient::new(Box::new(AlwaysFails), 0.0, 1024).with_retry(RetryPolicy {
        max_attempts: 2,
        base_delay: Duration::ZERO,
    });
    let report = CvExtractor::new(client)
        .extract(&sample_sections(), &sample_entries())
        .await;

    assert!(!report.complete);
    assert_eq!(report.cv.personal_info.name, "Processing failed");
    assert!(!report.cv.summary.is_empty());
}

#[tokio::test]
async fn empty_sections_make_no_calls_and_succeed() {
    let report = extractor(RoutingProvider::ok())
        .extract(&ConsolidatedSections::default(), &[])
        .await;

    assert!(report.complete);
    assert!(report.cv.is_empty());
}

#[tokio::test]
async fn chunked_extraction_merges_partial_records() {
    let chunks = vec![
        "CHUNK-A early career details".to_string(),
        "CHUNK-B later career details".to_string(),
    ];
    let report = extractor(RoutingProvider::ok()).extract_chunks(&chunks).await;

    assert!(report.complete);
    assert_eq!(report.cv.personal_info.name, "Ada Lovelace");
    assert_eq!(report.cv.summary, "A longer summary from the second chunk.");
    assert_eq!(report.cv.work_experience.len(), 2);
    // Exact-duplicate language collapses across chunks.
    assert_eq!(report.cv.languages.len(), 2);
}

#[tokio::test]
async fn failed_chunks_are_reported_not_fatal() {
    let chunks = vec![
        "CHUNK-A early career details".to_string(),
        "CHUNK-X unroutable content".to_string(),
    ];
    let report = extractor(RoutingProvider::ok()).extract_chunks(&chunks).await;

    assert!(!report.complete);
    assert_eq!(report.failed_fields, vec!["chunk[1]"]);
    assert_eq!(report.cv.personal_info.name, "Ada Lovelace");
}
