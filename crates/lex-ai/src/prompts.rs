//! Prompt builders.

use crate::AgreementContext;

/// Instruction to draft one clause for `context`, with `company` as our side.
#[must_use]
pub fn draft_prompt(clause_title: &str, context: &AgreementContext, company: &str) -> String {
    format!(
        "You are an expert legal AI assistant.\n\
         Draft a professional, concise, and legally sound text for the \"{clause_title}\" \
         section of a \"{kind}\" agreement between \"{company}\" and \"{counterparty}\".\n\
         The agreement title is \"{title}\".\n\
         Return ONLY the text content of the clause, no markdown formatting headers.",
        kind = context.kind,
        counterparty = context.counterparty,
        title = context.title,
    )
}

/// Instruction to rate the first `excerpt_chars` characters of `text`.
#[must_use]
pub fn risk_prompt(text: &str, excerpt_chars: usize) -> String {
    format!(
        "Analyze the following agreement text summary for risk.\n\
         Determine if the Risk Level is 'Low', 'Medium', or 'High'. Provide a one sentence reason.\n\n\
         Agreement Text: \"{}...\"\n\n\
         Output format: Risk Level: [Level] | Reason: [Reason]",
        excerpt(text, excerpt_chars)
    )
}

/// Leading `max_chars` characters, never splitting a code point.
fn excerpt(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(byte_index, _)| &text[..byte_index])
}
