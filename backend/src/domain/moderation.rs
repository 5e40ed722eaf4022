//! Moderation rules applied to submitted comment text.

use crate::domain::error::Error;

/// Words that are rejected wherever they appear in a comment.
pub const FORBIDDEN_WORDS: &[&str] = &["rascal", "scoundrel"];

/// Fixed user-facing message attached to a rejected comment.
pub const WARNING: &str = "Watch your language!";

/// A single validation predicate: `None` means the text passes.
type Rule = fn(&str) -> Option<Error>;

/// Ordered set of moderation predicates. The first failure wins.
pub struct RuleSet {
    rules: &'static [Rule],
}

impl RuleSet {
    /// Run every rule against `text`.
    pub fn evaluate(&self, text: &str) -> Result<(), Error> {
        match self.rules.iter().find_map(|rule| rule(text)) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Rules applied to comment submissions.
pub fn comment_rules() -> RuleSet {
    RuleSet {
        rules: &[forbidden_word_rule],
    }
}

/// Case- and position-insensitive forbidden-word match.
fn forbidden_word_rule(text: &str) -> Option<Error> {
    let lowered = text.to_lowercase();
    FORBIDDEN_WORDS
        .iter()
        .any(|word| lowered.contains(word))
        .then(|| Error::validation("text", WARNING))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("Some text, rascal, more text")]
    #[case("SCOUNDREL")]
    #[case("embedded ScOuNdReLs everywhere")]
    fn forbidden_words_are_rejected_anywhere(#[case] text: &str) {
        let error = comment_rules().evaluate(text).expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::InvalidForm);
        assert_eq!(error.message(), WARNING);
        assert_eq!(error.field(), Some("text"));
    }

    #[rstest]
    #[case("A perfectly civil comment")]
    #[case("")]
    fn clean_text_passes(#[case] text: &str) {
        assert!(comment_rules().evaluate(text).is_ok());
    }
}
