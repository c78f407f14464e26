pub trait AnswerText {
    /// Trimmed, lowercased form used when comparing a guess against an answer.
    fn normalized_answer(&self) -> String;

    /// True when `name` appears anywhere in `self`, ignoring case.
    fn mentions(&self, name: &str) -> bool;
}

impl AnswerText for str {
    fn normalized_answer(&self) -> String {
        self.trim().to_lowercase()
    }

    fn mentions(&self, name: &str) -> bool {
        let needle = name.normalized_answer();
        if needle.is_empty() {
            return false;
        }
        self.to_lowercase().contains(&needle)
    }
}
