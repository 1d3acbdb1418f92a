//! Prompt builders. Each field gets its own instruction with an exact JSON
//! output contract, so every model call has one simple, bounded task.

/// Shared system instruction for every extraction call.
pub const SYSTEM_PROMPT: &str = "You are a precise CV data extraction engine. \
You read CV text and answer with a single JSON object matching the requested \
shape exactly. Respond ONLY with valid JSON: no explanation, no markdown \
fences, no extra keys. Use empty strings or empty arrays for information \
that is not present. Never invent information.";

pub fn profile(text: &str) -> String {
    format!(
        "Extract the professional summary from this CV profile section. \
         Keep the candidate's own wording, lightly cleaned up.\n\n\
         Return JSON with exactly this shape:\n\
         {{\"summary\": \"...\"}}\n\n\
         Profile section:\n{text}"
    )
}

pub fn personal_info(text: &str) -> String {
    format!(
        "Extract the candidate's personal information from this CV text.\n\n\
         Return JSON with exactly this shape:\n\
         {{\"name\": \"...\", \"title\": \"...\", \"email\": \"...\", \
         \"phone\": \"...\", \"location\": \"...\", \"nationality\": \"...\"}}\n\n\
         CV text:\n{text}"
    )
}

pub fn country_experience(text: &str) -> String {
    format!(
        "List the countries the candidate has worked in, based on this CV \
         text. Use plain English country names, one entry per country.\n\n\
         Return JSON with exactly this shape:\n\
         {{\"countries\": [\"...\"]}}\n\n\
         CV text:\n{text}"
    )
}

pub fn qualifications(text: &str) -> String {
    format!(
        "Extract the education history from this CV section, one entry per \
         degree or qualification, in the order they appear.\n\n\
         Return JSON with exactly this shape:\n\
         {{\"education\": [{{\"degree\": \"...\", \"institution\": \"...\", \
         \"year\": \"...\", \"details\": \"...\"}}]}}\n\n\
         Education section:\n{text}"
    )
}

pub fn publications(text: &str) -> String {
    format!(
        "Extract the publications from this CV section, one entry per \
         publication, keeping each citation as a single string.\n\n\
         Return JSON with exactly this shape:\n\
         {{\"publications\": [{{\"citation\": \"...\"}}]}}\n\n\
         Publications section:\n{text}"
    )
}

pub fn languages(text: &str) -> String {
    format!(
        "Extract the languages the candidate speaks and their proficiency \
         levels from this CV text.\n\n\
         Return JSON with exactly this shape:\n\
         {{\"languages\": [{{\"language\": \"...\", \"proficiency\": \"...\"}}]}}\n\n\
         CV text:\n{text}"
    )
}

/// One prompt per pre-split experience entry, not one for the whole block.
pub fn experience_entry(entry: &str) -> String {
    format!(
        "Extract this single work-experience entry from a CV. The dates \
         field keeps the date range as written in the source.\n\n\
         Return JSON with exactly this shape:\n\
         {{\"dates\": \"...\", \"role\": \"...\", \"client\": \"...\", \
         \"location\": \"...\", \"description\": \"...\", \
         \"responsibilities\": [\"...\"], \"achievements\": [\"...\"]}}\n\n\
         Experience entry:\n{entry}"
    )
}

/// Whole-record prompt for one chunk of an unsegmented document.
pub fn full_record(chunk: &str) -> String {
    format!(
        "Extract all CV data you can find in this document excerpt. The \
         excerpt may cover only part of the CV; extract only what is \
         present.\n\n\
         Return JSON with exactly this shape:\n\
         {{\"personal_info\": {{\"name\": \"...\", \"title\": \"...\", \
         \"email\": \"...\", \"phone\": \"...\", \"location\": \"...\", \
         \"nationality\": \"...\"}}, \"summary\": \"...\", \
         \"work_experience\": [{{\"dates\": \"...\", \"role\": \"...\", \
         \"client\": \"...\", \"location\": \"...\", \"description\": \"...\", \
         \"responsibilities\": [\"...\"], \"achievements\": [\"...\"]}}], \
         \"education\": [{{\"degree\": \"...\", \"institution\": \"...\", \
         \"year\": \"...\", \"details\": \"...\"}}], \
         \"publications\": [{{\"citation\": \"...\"}}], \
         \"languages\": [{{\"language\": \"...\", \"proficiency\": \"...\"}}], \
         \"country_work_experience\": [\"...\"]}}\n\n\
         Document excerpt:\n{chunk}"
    )
}
