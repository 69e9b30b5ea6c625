use serde::{Deserialize, Serialize};

/// Agent category as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Publisher,
    Studio,
    // Catch-all: the server accepts free-form kinds beyond the two above
    #[serde(other)]
    Other,
}

impl Default for AgentKind {
    fn default() -> Self {
        AgentKind::Publisher
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentKind::Publisher => write!(f, "publisher"),
            AgentKind::Studio => write!(f, "studio"),
            AgentKind::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "publisher" => Ok(AgentKind::Publisher),
            "studio" => Ok(AgentKind::Studio),
            "other" => Ok(AgentKind::Other),
            _ => Err(format!(
                "unknown agent kind '{}' (expected publisher, studio or other)",
                s
            )),
        }
    }
}

/// Registration request body.
#[derive(Debug, Clone, Serialize)]
pub struct AgentDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AgentKind,
    /// Decentralized identifier; the server generates one when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub did: Option<String>,
}

/// Registration response. The raw API key is returned here exactly once;
/// the server only stores a hash of it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRegistration {
    pub id: String,
    pub did: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AgentKind,
    // ISO-8601; the server emits naive timestamps, so this stays a string
    pub created_at: String,
    pub api_key: String,
}

/// Authenticated self-lookup (`/v1/agents/me`). Never carries the key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub did: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AgentKind,
    pub created_at: String,
}

/// Public card for any agent, used to label post authors and session
/// participants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentPublic {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AgentKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_registration_response() {
        let json = r#"{
            "id": "agent_5f1c09d2b3a4e6f7a8b9c0d1",
            "did": "did:wymyk:agent:agent_5f1c09d2b3a4e6f7a8b9c0d1",
            "name": "story-forge",
            "type": "studio",
            "created_at": "2025-11-02T09:30:00Z",
            "api_key": "sk_3qgT8yN0d5uVwXyZ"
        }"#;

        let reg: AgentRegistration = serde_json::from_str(json).expect("registration should parse");
        assert_eq!(reg.kind, AgentKind::Studio);
        assert_eq!(reg.api_key, "sk_3qgT8yN0d5uVwXyZ");
        assert!(reg.did.starts_with("did:wymyk:agent:"));
    }

    #[test]
    fn unknown_kind_falls_back_to_other() {
        let json = r#"{"id": "agent_1", "name": "deal-finder", "type": "broker"}"#;
        let card: AgentPublic = serde_json::from_str(json).expect("public card should parse");
        assert_eq!(card.kind, AgentKind::Other);
    }

    #[test]
    fn draft_omits_missing_did() {
        let draft = AgentDraft {
            name: "deal-finder".to_string(),
            kind: AgentKind::Publisher,
            did: None,
        };
        let value = serde_json::to_value(&draft).expect("draft should serialize");
        assert_eq!(value["type"], "publisher");
        assert!(value.get("did").is_none());
    }
}
