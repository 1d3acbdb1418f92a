//! Consolidation: collapse a segmented document onto the fixed six-field
//! shape. Nothing is dropped: sections with no canonical home are appended to
//! `experience` under a visible marker.

use cvforge_core::{ConsolidatedSections, SectionMap};

use crate::headers::{canonical_field, CanonicalField};

/// Map every segmented section onto its canonical field. Sections mapping to
/// the same field are concatenated in encounter order with a blank line
/// between them.
pub fn consolidate(sections: &SectionMap) -> ConsolidatedSections {
    let mut out = ConsolidatedSections::default();

    for (name, content) in sections {
        let content = content.trim();
        if content.is_empty() {
            continue;
        }
        match canonical_field(name) {
            Some(field) => append_block(field_slot(&mut out, field), content),
            None => {
                let marked = format!("--- {name} ---\n{content}");
                append_block(&mut out.experience, &marked);
            }
        }
    }

    out
}

fn field_slot(out: &mut ConsolidatedSections, field: CanonicalField) -> &mut String {
    match field {
        CanonicalField::Profile => &mut out.profile,
        CanonicalField::PersonalDetails => &mut out.personal_details,
        CanonicalField::CountryExperience => &mut out.country_experience,
        CanonicalField::Qualifications => &mut out.qualifications,
        CanonicalField::Publications => &mut out.publications,
        CanonicalField::Experience => &mut out.experience,
    }
}

fn append_block(target: &mut String, content: &str) {
    if !target.is_empty() {
        target.push_str("\n\n");
    }
    target.push_str(content);
}
