//! Prompt assembly for the summarization adapter.

use super::SummaryBounds;

/// Character budget for document text included in a prompt. Inputs beyond this
/// are truncated before prompting so the request stays inside the model's
/// context window.
pub(crate) const MAX_INPUT_CHARS: usize = 24_000;

/// Build the instruction prompt for a single summarization call.
pub(crate) fn build_summary_prompt(text: &str, bounds: &SummaryBounds) -> String {
    let SummaryBounds {
        min_words,
        max_words,
    } = bounds;
    let document = truncate_input(text, MAX_INPUT_CHARS);

    let mut prompt = String::new();
    prompt.push_str(&format!(
        "System: You summarize documents. Write a concise, factual summary of the \
         document below in no fewer than {min_words} and no more than {max_words} words. \
         Output only the summary text.\n\n"
    ));
    prompt.push_str("Document:\n");
    prompt.push_str(document);
    prompt
}

/// Truncate text to a character budget, landing on a char boundary.
pub(crate) fn truncate_input(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_offset, _)) => &text[..byte_offset],
        None => text,
    }
}
