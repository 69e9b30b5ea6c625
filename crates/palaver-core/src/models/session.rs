use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Session lifecycle state. The server only promises `active`; anything
/// else is preserved as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    #[serde(other)]
    Other,
}

impl SessionStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionStatus::Active)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Active => write!(f, "active"),
            SessionStatus::Other => write!(f, "closed"),
        }
    }
}

/// A server-tracked conversation between two or more agents. Read-mostly
/// on the client: the server owns status and membership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    /// Participant agent ids, in server order.
    pub parties: Vec<String>,
    pub status: SessionStatus,
    pub created_at: String,
}

/// Request body for opening a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionDraft {
    pub party_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capability_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_message: Option<Value>,
}

/// One message inside a session. The payload is free-form JSON; the
/// platform imposes no envelope on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub session_id: String,
    /// Sending agent's id.
    pub sender: String,
    pub payload: Value,
    pub created_at: String,
}
