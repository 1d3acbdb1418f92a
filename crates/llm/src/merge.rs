//! Merging partial records from chunked whole-document extraction.

use std::collections::HashSet;

use cvforge_core::StructuredCv;

/// Merge per-chunk records into one, producing a new record:
/// scalar personal fields keep the first non-empty value, the summary keeps
/// the longest non-empty value, arrays concatenate in chunk order, and
/// `languages` / `country_work_experience` drop exact duplicates.
pub fn merge_records(records: Vec<StructuredCv>) -> StructuredCv {
    let mut merged = StructuredCv::default();
    let mut seen_languages = HashSet::new();
    let mut seen_countries = HashSet::new();

    for record in records {
        first_wins(&mut merged.personal_info.name, record.personal_info.name);
        first_wins(&mut merged.personal_info.title, record.personal_info.title);
        first_wins(&mut merged.personal_info.email, record.personal_info.email);
        first_wins(&mut merged.personal_info.phone, record.personal_info.phone);
        first_wins(&mut merged.personal_info.location, record.personal_info.location);
        first_wins(&mut merged.personal_info.nationality, record.personal_info.nationality);

        if record.summary.len() > merged.summary.len() {
            merged.summary = record.summary;
        }

        merged.work_experience.extend(record.work_experience);
        merged.education.extend(record.education);
        merged.publications.extend(record.publications);

        for language in record.languages {
            if seen_languages.insert(language.clone()) {
                merged.languages.push(language);
            }
        }
        for country in record.country_work_experience {
            if seen_countries.insert(country.clone()) {
                merged.country_work_experience.push(country);
            }
        }
    }

    merged
}

fn first_wins(slot: &mut String, candidate: String) {
    if slot.is_empty() && !candidate.is_empty() {
        *slot = candidate;
    }
}
