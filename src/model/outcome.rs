/// Terminal classification of a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Correct {
        answer: String,
        points_awarded: i64,
        message: String,
    },
    IncorrectGuess {
        answer: String,
        message: String,
    },
    TimedOut {
        answer: String,
        message: String,
    },
}

impl Outcome {
    pub fn correct(answer: &str, points_awarded: i64) -> Self {
        Outcome::Correct {
            answer: answer.to_string(),
            points_awarded,
            message: format!("Correct! +{points_awarded} points. The answer is {answer}."),
        }
    }

    pub fn incorrect_guess(answer: &str) -> Self {
        Outcome::IncorrectGuess {
            answer: answer.to_string(),
            message: format!("Not quite. The correct answer was {answer}."),
        }
    }

    pub fn timed_out(answer: &str) -> Self {
        Outcome::TimedOut {
            answer: answer.to_string(),
            message: format!("Time's up! The correct answer was {answer}."),
        }
    }

    pub fn answer(&self) -> &str {
        match self {
            Outcome::Correct { answer, .. }
            | Outcome::IncorrectGuess { answer, .. }
            | Outcome::TimedOut { answer, .. } => answer,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Outcome::Correct { message, .. }
            | Outcome::IncorrectGuess { message, .. }
            | Outcome::TimedOut { message, .. } => message,
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, Outcome::Correct { .. })
    }

    /// Losing outcomes end the session; the next round starts from zero.
    pub fn ends_session(&self) -> bool {
        !self.is_correct()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_reveal_answer() {
        assert_eq!(
            Outcome::correct("Indra", 60).message(),
            "Correct! +60 points. The answer is Indra."
        );
        assert_eq!(
            Outcome::incorrect_guess("Agni").message(),
            "Not quite. The correct answer was Agni."
        );
        assert_eq!(
            Outcome::timed_out("Soma").message(),
            "Time's up! The correct answer was Soma."
        );
    }

    #[test]
    fn test_only_losses_end_the_session() {
        assert!(!Outcome::correct("Indra", 10).ends_session());
        assert!(Outcome::incorrect_guess("Indra").ends_session());
        assert!(Outcome::timed_out("Indra").ends_session());
        assert_eq!(Outcome::timed_out("Varuna").answer(), "Varuna");
    }
}
