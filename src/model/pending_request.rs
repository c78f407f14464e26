use super::{Difficulty, RequestTag};

/// Work the controller needs done by the text generator. The response is fed
/// back as a command carrying the same tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingRequest {
    Riddle {
        tag: RequestTag,
        difficulty: Difficulty,
    },
    Hint {
        tag: RequestTag,
        answer_name: String,
    },
}

impl PendingRequest {
    pub fn tag(&self) -> RequestTag {
        match self {
            PendingRequest::Riddle { tag, .. } | PendingRequest::Hint { tag, .. } => *tag,
        }
    }
}
