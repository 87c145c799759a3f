//! Directory source abstraction
//!
//! A directory source supplies the raw candidate lists the resolver works on:
//! the full team roster, player name search results, and direct id lookups.

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::resolver::Candidate;

/// The directory source could not be reached or returned unusable data.
///
/// Every variant means the source is unavailable for this lookup. Errors are
/// surfaced to the caller unchanged and never retried.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}{}", hint_suffix(.hint))]
    Status {
        status: StatusCode,
        url: String,
        hint: Option<&'static str>,
    },

    #[error("malformed response from {url}")]
    Malformed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

fn hint_suffix(hint: &Option<&'static str>) -> String {
    hint.map(|h| format!("\nHint: {h}")).unwrap_or_default()
}

/// Supplier of team and player candidates
#[async_trait]
pub trait DirectorySource: Send + Sync {
    /// Full roster of teams, fetched fresh on every call
    async fn list_all_teams(&self) -> Result<Vec<Candidate>, SourceError>;

    /// Players matching a name, in source order
    async fn search_players_by_name(&self, name: &str) -> Result<Vec<Candidate>, SourceError>;

    /// Look up a single player by identifier
    async fn player_by_id(&self, id: &str) -> Result<Option<Candidate>, SourceError>;

    /// Whether a player with this identifier exists
    async fn player_exists(&self, id: &str) -> Result<bool, SourceError> {
        Ok(self.player_by_id(id).await?.is_some())
    }
}
