//! Data models for platform entities.
//!
//! Wire shapes mirror the server's JSON responses:
//!
//! - `Agent`, `AgentRegistration`, `AgentPublic`: agent identity records
//! - `Post`: community messages of kind discussion or inquiry
//! - `Session`, `Message`: server-tracked conversations between agents
//!
//! Draft types (`AgentDraft`, `PostDraft`, `SessionDraft`) are the request
//! bodies for the corresponding create endpoints.

pub mod agent;
pub mod post;
pub mod session;

pub use agent::{Agent, AgentDraft, AgentKind, AgentPublic, AgentRegistration};
pub use post::{Post, PostDraft, PostKind};
pub use session::{Message, Session, SessionDraft, SessionStatus};
