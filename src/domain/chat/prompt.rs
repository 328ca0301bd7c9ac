//! Outgoing prompt composition.
//!
//! When a document is attached, every user question is wrapped with a bounded
//! excerpt of the document text. The excerpt is a hard cut at
//! [`CONTEXT_CHAR_LIMIT`] characters, not sentence aware, and is always
//! followed by [`TRUNCATION_MARKER`] so the model knows content may be missing.

use super::document::AttachedDocument;

/// Number of document characters included in a grounded prompt.
pub const CONTEXT_CHAR_LIMIT: usize = 2000;

/// Label that opens a grounded prompt.
pub const CONTEXT_INTRO: &str = "Here is the content of the uploaded PDF:\n";

/// Appended right after the excerpt.
pub const TRUNCATION_MARKER: &str = "... (truncated)";

/// Separates the excerpt from the user's question.
pub const QUESTION_LABEL: &str = "\n\nQuestion: ";

/// Returns the first [`CONTEXT_CHAR_LIMIT`] characters of `text`.
///
/// Cuts on a char boundary; shorter text is returned whole.
pub fn context_excerpt(text: &str) -> &str {
    match text.char_indices().nth(CONTEXT_CHAR_LIMIT) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Builds the prompt sent to the model for `question`.
///
/// Without a document the question is passed through untouched.
pub fn compose_prompt(document: Option<&AttachedDocument>, question: &str) -> String {
    let Some(document) = document else {
        return question.to_string();
    };

    let excerpt = context_excerpt(document.text());
    let mut prompt = String::with_capacity(
        CONTEXT_INTRO.len()
            + excerpt.len()
            + TRUNCATION_MARKER.len()
            + QUESTION_LABEL.len()
            + question.len(),
    );
    prompt.push_str(CONTEXT_INTRO);
    prompt.push_str(excerpt);
    prompt.push_str(TRUNCATION_MARKER);
    prompt.push_str(QUESTION_LABEL);
    prompt.push_str(question);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn document(text: &str) -> AttachedDocument {
        AttachedDocument::new("doc.pdf", text).unwrap()
    }

    #[test]
    fn no_document_passes_question_through() {
        assert_eq!(compose_prompt(None, "hello"), "hello");
    }

    #[test]
    fn short_document_is_included_whole() {
        let doc = document("Hello World");
        let prompt = compose_prompt(Some(&doc), "What does it say?");

        assert_eq!(
            prompt,
            "Here is the content of the uploaded PDF:\nHello World... (truncated)\n\nQuestion: What does it say?"
        );
    }

    #[test]
    fn long_document_is_cut_at_limit() {
        let text = format!("{}{}", "a".repeat(CONTEXT_CHAR_LIMIT), "TAIL");
        let doc = document(&text);
        let prompt = compose_prompt(Some(&doc), "q");

        assert!(prompt.contains(&"a".repeat(CONTEXT_CHAR_LIMIT)));
        assert!(!prompt.contains("TAIL"));
        assert!(prompt.contains(TRUNCATION_MARKER));
    }

    #[test]
    fn excerpt_respects_multibyte_boundaries() {
        let text = "é".repeat(CONTEXT_CHAR_LIMIT + 5);
        let excerpt = context_excerpt(&text);
        assert_eq!(excerpt.chars().count(), CONTEXT_CHAR_LIMIT);
    }

    #[test]
    fn excerpt_of_exact_limit_is_unchanged() {
        let text = "b".repeat(CONTEXT_CHAR_LIMIT);
        assert_eq!(context_excerpt(&text), text);
    }

    proptest! {
        #[test]
        fn excerpt_is_a_bounded_prefix(text in "\\PC{0,2600}") {
            let excerpt = context_excerpt(&text);
            let expected = text.chars().count().min(CONTEXT_CHAR_LIMIT);

            prop_assert!(text.starts_with(excerpt));
            prop_assert_eq!(excerpt.chars().count(), expected);
        }

        #[test]
        fn grounded_prompt_has_fixed_layout(
            text in "[a-zA-Z0-9 ]{0,2600}[a-z]",
            question in "[a-zA-Z ?]{1,40}",
        ) {
            let doc = AttachedDocument::new("doc.pdf", &text).unwrap();
            let prompt = compose_prompt(Some(&doc), &question);
            let expected = format!(
                "{}{}{}{}{}",
                CONTEXT_INTRO,
                context_excerpt(doc.text()),
                TRUNCATION_MARKER,
                QUESTION_LABEL,
                question
            );

            prop_assert_eq!(prompt, expected);
        }
    }
}
