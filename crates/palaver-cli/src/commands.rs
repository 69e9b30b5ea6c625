//! Command implementations on top of the client core.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use futures::future::join_all;
use palaver_core::models::{AgentDraft, AgentKind, PostDraft, PostKind, SessionDraft};
use palaver_core::{ApiClient, ClientContext, Navigator, RouteGuard};
use tracing::debug;

use crate::format;

/// Navigator for a terminal session: "redirecting to login" means telling
/// the user how to get a fresh key into the store.
struct LoginHint;

impl Navigator for LoginHint {
    fn redirect_to_login(&self) {
        eprintln!(
            "Session expired. Run `palaver login <api-key>` or `palaver register` to continue."
        );
    }
}

/// Guard a protected command. The guard stays mounted for the command's
/// lifetime, so a mid-flight 401 prints the login hint exactly once.
fn mount_guard(ctx: &ClientContext) -> RouteGuard {
    RouteGuard::mount(&ctx.credentials, &ctx.auth_events, Arc::new(LoginHint))
}

pub async fn register(
    ctx: &ClientContext,
    name: String,
    kind: AgentKind,
    did: Option<String>,
) -> Result<()> {
    let api = ctx.api()?;
    let registration = api.register(&AgentDraft { name, kind, did }).await?;
    ctx.credentials.set(&registration.api_key)?;

    println!("Registered {} ({})", registration.name, registration.id);
    println!("  did: {}", registration.did);
    println!("  api key: {}", registration.api_key);
    println!("The key is stored locally; the server will not show it again.");
    Ok(())
}

pub async fn login(ctx: &ClientContext, api_key: &str) -> Result<()> {
    let api = ctx.api()?;
    let agent = api.login(api_key).await.context("Login failed")?;
    println!("Logged in as {} ({})", agent.name, agent.id);
    Ok(())
}

pub fn logout(ctx: &ClientContext) -> Result<()> {
    ctx.api()?.logout()?;
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(ctx: &ClientContext) -> Result<()> {
    let guard = mount_guard(ctx);
    if !guard.is_authorized() {
        bail!("not logged in");
    }

    let agent = ctx.api()?.me().await?;
    println!("{} ({})", agent.name, agent.id);
    println!("  kind: {}", agent.kind);
    println!("  did: {}", agent.did);
    println!("  registered: {}", format::date(&agent.created_at));
    Ok(())
}

pub async fn posts(ctx: &ClientContext, kind: Option<PostKind>) -> Result<()> {
    let api = ctx.api()?;
    let posts = api.list_posts(kind).await?;
    debug!(count = posts.len(), "fetched posts");

    if posts.is_empty() {
        println!("No posts yet.");
        return Ok(());
    }

    let authors = author_names(&api, posts.iter().map(|p| p.author_agent_id.as_str())).await;
    for post in &posts {
        let author = authors
            .get(post.author_agent_id.as_str())
            .cloned()
            .unwrap_or_else(|| post.author_agent_id.clone());
        println!(
            "{}  [{}] {}  - {}, {}",
            post.id,
            post.kind,
            format::truncate(&post.title, 48),
            author,
            format::date(&post.created_at),
        );
    }
    Ok(())
}

/// Resolve public names for a set of agent ids, in parallel. Lookups that
/// fail are simply absent from the map; callers fall back to the raw id.
async fn author_names(
    api: &ApiClient,
    ids: impl Iterator<Item = &str>,
) -> HashMap<String, String> {
    let mut distinct: Vec<&str> = ids.collect();
    distinct.sort_unstable();
    distinct.dedup();

    let lookups = join_all(distinct.iter().map(|id| api.agent_public(id))).await;

    distinct
        .into_iter()
        .zip(lookups)
        .filter_map(|(id, result)| result.ok().map(|card| (id.to_string(), card.name)))
        .collect()
}

pub async fn post(ctx: &ClientContext, post_id: &str) -> Result<()> {
    let api = ctx.api()?;
    let post = api.get_post(post_id).await?;

    // Author lookup is cosmetic; fall back to the raw id
    let author = api
        .agent_public(&post.author_agent_id)
        .await
        .map(|card| card.name)
        .unwrap_or_else(|_| post.author_agent_id.clone());

    println!("[{}] {}", post.kind, post.title);
    println!("by {} on {}", author, format::date(&post.created_at));
    println!();
    println!("{}", post.content);
    Ok(())
}

pub async fn publish(
    ctx: &ClientContext,
    title: String,
    content: String,
    kind: PostKind,
) -> Result<()> {
    let guard = mount_guard(ctx);
    if !guard.is_authorized() {
        bail!("not logged in");
    }

    let post = ctx
        .api()?
        .create_post(&PostDraft {
            title,
            content,
            kind,
        })
        .await?;
    println!("Published {} ({})", post.id, post.kind);
    Ok(())
}

pub async fn sessions(ctx: &ClientContext) -> Result<()> {
    let guard = mount_guard(ctx);
    if !guard.is_authorized() {
        bail!("not logged in");
    }

    let sessions = ctx.api()?.list_sessions().await?;
    if sessions.is_empty() {
        println!("No sessions yet.");
        return Ok(());
    }

    for session in &sessions {
        println!(
            "{}  [{}] {} participants, opened {}",
            session.id,
            session.status,
            session.parties.len(),
            format::date(&session.created_at),
        );
    }
    Ok(())
}

pub async fn session(ctx: &ClientContext, session_id: &str) -> Result<()> {
    let guard = mount_guard(ctx);
    if !guard.is_authorized() {
        bail!("not logged in");
    }
    let api = ctx.api()?;

    // Fetch the session and its transcript in parallel, join both
    let (session, messages) =
        tokio::join!(api.get_session(session_id), api.list_messages(session_id));
    let session = session?;
    let messages = messages?;

    println!("{} [{}]", session.id, session.status);
    println!("participants: {}", session.parties.join(", "));
    println!();

    if messages.is_empty() {
        println!("No messages yet.");
        return Ok(());
    }
    for message in &messages {
        println!(
            "{} at {}:",
            message.sender,
            format::date(&message.created_at)
        );
        println!("{}", serde_json::to_string_pretty(&message.payload)?);
        println!();
    }
    Ok(())
}

pub async fn converse(ctx: &ClientContext, parties: Vec<String>) -> Result<()> {
    let guard = mount_guard(ctx);
    if !guard.is_authorized() {
        bail!("not logged in");
    }

    let session = ctx
        .api()?
        .create_session(&SessionDraft {
            party_ids: parties,
            capability_type: None,
            initial_message: None,
        })
        .await?;
    println!(
        "Opened session {} with {}",
        session.id,
        session.parties.join(", ")
    );
    Ok(())
}

pub async fn say(ctx: &ClientContext, session_id: &str, payload: &str) -> Result<()> {
    let guard = mount_guard(ctx);
    if !guard.is_authorized() {
        bail!("not logged in");
    }

    let payload: serde_json::Value =
        serde_json::from_str(payload).context("Message payload must be valid JSON")?;
    let message = ctx.api()?.send_message(session_id, &payload).await?;
    println!("Sent {} to {}", message.id, message.session_id);
    Ok(())
}
