//! Section header vocabulary and the canonical-field mapping.
//!
//! The segmenter recognizes more headers than the consolidator maps: a header
//! like "Volunteering" is worth segmenting on even though it has no canonical
//! home, so its content can be preserved in the catch-all bucket instead of
//! bleeding into the previous section.

/// The fixed logical CV categories all source header variants map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    Profile,
    PersonalDetails,
    CountryExperience,
    Qualifications,
    Publications,
    Experience,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 6] = [
        CanonicalField::Profile,
        CanonicalField::PersonalDetails,
        CanonicalField::CountryExperience,
        CanonicalField::Qualifications,
        CanonicalField::Publications,
        CanonicalField::Experience,
    ];

    /// The header spelling used when a canonical section has to be
    /// materialized as an explicit empty entry.
    pub fn primary_header(self) -> &'static str {
        match self {
            CanonicalField::Profile => "profile",
            CanonicalField::PersonalDetails => "personal details",
            CanonicalField::CountryExperience => "country work experience",
            CanonicalField::Qualifications => "education",
            CanonicalField::Publications => "publications",
            CanonicalField::Experience => "work experience",
        }
    }
}

/// Every header phrase the segmenter recognizes, lowercase.
pub const HEADER_VOCABULARY: &[&str] = &[
    // profile
    "profile",
    "professional summary",
    "personal statement",
    "summary",
    "about me",
    "objective",
    // personal details
    "personal details",
    "personal information",
    "personal data",
    "contact details",
    "contact information",
    "contact",
    "languages",
    "language skills",
    // country experience
    "country work experience",
    "countries of work experience",
    "country experience",
    "international experience",
    // qualifications
    "education and training",
    "academic qualifications",
    "academic background",
    "qualifications",
    "education",
    "certifications",
    "training",
    // publications
    "selected publications",
    "publications",
    "research",
    "papers",
    // experience
    "professional experience",
    "employment history",
    "work experience",
    "career history",
    "work history",
    "relevant experience",
    "employment",
    "experience",
    // recognized but unmapped: consolidation routes these to the catch-all
    "volunteering",
    "volunteer work",
    "key skills",
    "skills",
    "projects",
    "awards",
    "honors",
    "interests",
    "hobbies",
    "professional memberships",
    "memberships",
    "references",
    "referees",
];

/// Header phrase -> canonical field, many-to-one. Phrases absent here (e.g.
/// "volunteering") are recognized for segmentation but unmapped.
const CANONICAL_MAP: &[(&str, CanonicalField)] = &[
    ("profile", CanonicalField::Profile),
    ("professional summary", CanonicalField::Profile),
    ("personal statement", CanonicalField::Profile),
    ("summary", CanonicalField::Profile),
    ("about me", CanonicalField::Profile),
    ("objective", CanonicalField::Profile),
    ("personal details", CanonicalField::PersonalDetails),
    ("personal information", CanonicalField::PersonalDetails),
    ("personal data", CanonicalField::PersonalDetails),
    ("contact details", CanonicalField::PersonalDetails),
    ("contact information", CanonicalField::PersonalDetails),
    ("contact", CanonicalField::PersonalDetails),
    ("languages", CanonicalField::PersonalDetails),
    ("language skills", CanonicalField::PersonalDetails),
    ("country work experience", CanonicalField::CountryExperience),
    ("countries of work experience", CanonicalField::CountryExperience),
    ("country experience", CanonicalField::CountryExperience),
    ("international experience", CanonicalField::CountryExperience),
    ("education and training", CanonicalField::Qualifications),
    ("academic qualifications", CanonicalField::Qualifications),
    ("academic background", CanonicalField::Qualifications),
    ("qualifications", CanonicalField::Qualifications),
    ("education", CanonicalField::Qualifications),
    ("certifications", CanonicalField::Qualifications),
    ("training", CanonicalField::Qualifications),
    ("selected publications", CanonicalField::Publications),
    ("publications", CanonicalField::Publications),
    ("research", CanonicalField::Publications),
    ("papers", CanonicalField::Publications),
    ("professional experience", CanonicalField::Experience),
    ("employment history", CanonicalField::Experience),
    ("work experience", CanonicalField::Experience),
    ("career history", CanonicalField::Experience),
    ("work history", CanonicalField::Experience),
    ("relevant experience", CanonicalField::Experience),
    ("employment", CanonicalField::Experience),
    ("experience", CanonicalField::Experience),
];

/// Allowed length beyond the matched phrase: decorations like numbering,
/// colons or parentheticals around a recognized header.
const HEADER_SLACK_CHARS: usize = 15;

/// Case-insensitive substring match against the vocabulary. Returns the
/// longest matching phrase so "country work experience" is not shadowed by
/// "experience". The phrase must account for most of the candidate's length,
/// otherwise prose that merely mentions a header word would match.
pub fn match_header(text: &str) -> Option<&'static str> {
    let lowered = clean_header(text).to_lowercase();
    HEADER_VOCABULARY
        .iter()
        .filter(|phrase| lowered.contains(*phrase) && lowered.len() <= phrase.len() + HEADER_SLACK_CHARS)
        .max_by_key(|phrase| phrase.len())
        .copied()
}

/// The canonical field a header belongs to, or None for recognized-but-unmapped
/// and unknown headers. Longest phrase wins, as in [`match_header`].
pub fn canonical_field(header: &str) -> Option<CanonicalField> {
    let lowered = header.to_lowercase();
    CANONICAL_MAP
        .iter()
        .filter(|(phrase, _)| lowered.contains(phrase))
        .max_by_key(|(phrase, _)| phrase.len())
        .map(|(_, field)| *field)
}

/// Normalize a header as a section key: trimmed, trailing colon stripped,
/// original casing kept (the catch-all marker shows it verbatim).
pub fn clean_header(text: &str) -> String {
    text.trim().trim_end_matches(':').trim().to_string()
}
