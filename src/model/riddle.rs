use serde::{Deserialize, Serialize};

use crate::helpers::AnswerText;

/// A riddle and the name of the figure it describes.
///
/// The serialized field names follow the generator's structured response:
/// `{"riddle": "...", "name": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Riddle {
    #[serde(rename = "riddle", default)]
    pub text: String,
    #[serde(rename = "name", default)]
    pub answer_name: String,
}

impl Riddle {
    pub fn new(text: impl Into<String>, answer_name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            answer_name: answer_name.into(),
        }
    }

    /// Served whenever the generator cannot produce a usable riddle.
    pub fn fallback() -> Self {
        Self::new(
            "I am the king of the gods, wielding a thunderbolt (Vajra) and riding a white \
             elephant named Airavata. Who am I?",
            "Indra",
        )
    }

    /// Exact match after trimming and case folding; no partial credit.
    pub fn matches_guess(&self, guess: &str) -> bool {
        guess.normalized_answer() == self.answer_name.normalized_answer()
    }

    pub fn reveals_answer(&self) -> bool {
        self.text.mentions(&self.answer_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_guess_ignores_case_and_whitespace() {
        let riddle = Riddle::new("Who wields the Vajra?", "Indra");
        assert!(riddle.matches_guess("  indra  "));
        assert!(riddle.matches_guess("INDRA"));
        assert!(!riddle.matches_guess("Indr"));
        assert!(!riddle.matches_guess("Lord Indra"));
    }

    #[test]
    fn test_fallback_does_not_reveal_answer() {
        assert!(!Riddle::fallback().reveals_answer());
    }

    #[test]
    fn test_deserializes_generator_field_names() {
        let riddle: Riddle =
            serde_json::from_str(r#"{"riddle": "I carry offerings.", "name": "Agni"}"#).unwrap();
        assert_eq!(riddle, Riddle::new("I carry offerings.", "Agni"));
    }
}
