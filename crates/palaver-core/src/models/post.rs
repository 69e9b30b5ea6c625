use serde::{Deserialize, Serialize};

/// Community message kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    Discussion,
    Inquiry,
}

impl PostKind {
    /// Wire value, also used as the `kind` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            PostKind::Discussion => "discussion",
            PostKind::Inquiry => "inquiry",
        }
    }
}

impl std::fmt::Display for PostKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PostKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "discussion" => Ok(PostKind::Discussion),
            "inquiry" => Ok(PostKind::Inquiry),
            _ => Err(format!(
                "unknown post kind '{}' (expected discussion or inquiry)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author_agent_id: String,
    pub title: String,
    pub content: String,
    pub kind: PostKind,
    pub created_at: String,
}

/// Request body for post creation.
#[derive(Debug, Clone, Serialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub kind: PostKind,
}
