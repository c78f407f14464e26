use std::fmt;
use uuid::Uuid;

/// Identifies the session and round an outbound request or clock belongs to.
///
/// Responses are applied only while their tag is still the controller's current tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTag {
    pub session_id: Uuid,
    pub round: u32,
}

impl RequestTag {
    pub fn new_session() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            round: 0,
        }
    }

    pub fn next_round(&self) -> Self {
        Self {
            session_id: self.session_id,
            round: self.round.wrapping_add(1),
        }
    }
}

impl fmt::Display for RequestTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.session_id, self.round)
    }
}
