//! Entity resolution for team and player search input
//!
//! Teams are resolved by scoring the query against every team name and
//! accepting the single best match above [`ACCEPT_THRESHOLD`]. Players are
//! classified from the source's own name search by result count, or looked
//! up directly when the query is a numeric id.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::directory::{DirectorySource, SourceError};
use crate::score::weighted_ratio;

/// Best team score must be strictly greater than this to be accepted
pub const ACCEPT_THRESHOLD: u8 = 80;

/// Opaque entity identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandidateId {
    Numeric(u64),
    Text(String),
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateId::Numeric(id) => write!(f, "{id}"),
            CandidateId::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for CandidateId {
    fn from(id: u64) -> Self {
        CandidateId::Numeric(id)
    }
}

impl From<&str> for CandidateId {
    fn from(id: &str) -> Self {
        CandidateId::Text(id.to_string())
    }
}

/// A named team or player returned by a directory source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub display_name: String,
    pub id: CandidateId,
    /// Disambiguating context: current team for a player, division for a team
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Candidate {
    pub fn new(display_name: impl Into<String>, id: impl Into<CandidateId>) -> Self {
        Self {
            display_name: display_name.into(),
            id: id.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// "Name (detail)" for listing, or just the name
    pub fn label(&self) -> String {
        match &self.detail {
            Some(detail) => format!("{} ({detail})", self.display_name),
            None => self.display_name.clone(),
        }
    }
}

/// Outcome of a single resolution call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchResult {
    /// Exactly one candidate, no scoring involved
    Exact { candidate: Candidate },
    /// Best-scoring candidate above the acceptance threshold
    FuzzyMatch { candidate: Candidate, score: u8 },
    /// Several candidates; the caller has to pick
    Ambiguous { candidates: Vec<Candidate> },
    NotFound,
}

impl MatchResult {
    /// The resolved candidate, if there is exactly one
    pub fn candidate(&self) -> Option<&Candidate> {
        match self {
            MatchResult::Exact { candidate } | MatchResult::FuzzyMatch { candidate, .. } => {
                Some(candidate)
            }
            MatchResult::Ambiguous { .. } | MatchResult::NotFound => None,
        }
    }
}

/// Whether a player query is a direct numeric id
pub fn is_player_id(query: &str) -> bool {
    !query.is_empty() && query.bytes().all(|b| b.is_ascii_digit())
}

/// Resolve a team name against the full team list.
///
/// Candidates sharing a display name collapse to the last one seen, keeping
/// the position of the first. Equal top scores go to the earliest name.
pub fn resolve_team(query: &str, candidates: &[Candidate]) -> MatchResult {
    let query = query.trim();
    let mut best: Option<(&Candidate, u8)> = None;

    for candidate in name_lookup(candidates) {
        let score = weighted_ratio(query, &candidate.display_name);
        log::trace!("score {score:>3} for '{}'", candidate.display_name);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((candidate, score));
        }
    }

    match best {
        Some((candidate, score)) if score > ACCEPT_THRESHOLD => {
            log::debug!(
                "team query '{query}' matched '{}' with score {score}",
                candidate.display_name
            );
            MatchResult::FuzzyMatch {
                candidate: candidate.clone(),
                score,
            }
        }
        Some((candidate, score)) => {
            log::debug!(
                "team query '{query}' best was '{}' at {score}, below threshold",
                candidate.display_name
            );
            MatchResult::NotFound
        }
        None => MatchResult::NotFound,
    }
}

fn name_lookup(candidates: &[Candidate]) -> Vec<&Candidate> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut unique: Vec<&Candidate> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        match slots.get(candidate.display_name.as_str()) {
            Some(&slot) => unique[slot] = candidate,
            None => {
                slots.insert(&candidate.display_name, unique.len());
                unique.push(candidate);
            }
        }
    }

    unique
}

/// Classify player search results.
///
/// A numeric query goes straight to the source by id and ignores
/// `candidates`. Otherwise the already-searched list decides by count:
/// none, one, or several in source order.
pub async fn resolve_player<S>(
    source: &S,
    query: &str,
    candidates: Vec<Candidate>,
) -> Result<MatchResult, SourceError>
where
    S: DirectorySource + ?Sized,
{
    let query = query.trim();

    if is_player_id(query) {
        log::debug!("player query '{query}' treated as an id");
        return Ok(match source.player_by_id(query).await? {
            Some(candidate) => MatchResult::Exact { candidate },
            None => MatchResult::NotFound,
        });
    }

    Ok(classify(candidates))
}

fn classify(mut candidates: Vec<Candidate>) -> MatchResult {
    match candidates.len() {
        0 => MatchResult::NotFound,
        1 => MatchResult::Exact {
            candidate: candidates.remove(0),
        },
        _ => MatchResult::Ambiguous { candidates },
    }
}

/// Fetches candidates from a directory source and resolves them in one step
pub struct Resolver<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S> Resolver<'a, S>
where
    S: DirectorySource + ?Sized,
{
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    pub async fn team(&self, query: &str) -> Result<MatchResult, SourceError> {
        let teams = self.source.list_all_teams().await?;
        log::debug!("resolving team '{}' against {} teams", query.trim(), teams.len());
        Ok(resolve_team(query, &teams))
    }

    pub async fn player(&self, query: &str) -> Result<MatchResult, SourceError> {
        let query = query.trim();
        let candidates = if is_player_id(query) {
            Vec::new()
        } else {
            self.source.search_players_by_name(query).await?
        };
        resolve_player(self.source, query, candidates).await
    }
}
