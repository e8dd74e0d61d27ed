use async_trait::async_trait;

use glossa_types::Session;

/// Where the current user session comes from. Handlers ask per action
/// and nothing caches the answer, so a session that expires mid-run is
/// noticed on the next action.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn session(&self) -> Option<Session>;
}

/// Session from environment variables. Stands in for a full OAuth flow
/// in this single-user process.
pub struct EnvSessionProvider;

#[async_trait]
impl SessionProvider for EnvSessionProvider {
    async fn session(&self) -> Option<Session> {
        let user_id = std::env::var("GLOSSA_USER_ID").ok()?;
        let access_token = std::env::var("GLOSSA_ACCESS_TOKEN").ok()?;
        let provider_token = std::env::var("GOOGLE_ACCESS_TOKEN").ok();

        Some(Session {
            user_id,
            access_token,
            provider_token,
        })
    }
}
