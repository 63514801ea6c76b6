use super::model::CandidateName;

/// Upper bound on candidates per prescription, which caps catalog calls.
pub const MAX_CANDIDATES: usize = 5;

/// Line and clause boundaries are the only segmentation OCR text reliably has.
const SEPARATORS: [char; 3] = ['\n', ',', ';'];

/// Turns raw OCR text into candidate medication names.
///
/// Rules:
/// - Text is lower-cased, then split on newline, comma and semicolon
/// - Each fragment is trimmed; fragments of three characters or fewer are dropped
/// - At most [`MAX_CANDIDATES`] survive, in first-seen order
/// - Duplicates are kept
pub fn extract_candidates(raw_text: &str) -> Vec<CandidateName> {
    raw_text
        .to_lowercase()
        .split(SEPARATORS)
        .filter_map(CandidateName::parse)
        .take(MAX_CANDIDATES)
        .collect()
}
