//! Interactive search state
//!
//! The state of an interactive search (what is being searched for, which
//! candidates are waiting on a choice, what has been picked) lives in a plain
//! value that each step consumes and returns.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Error};

use crate::resolver::{Candidate, MatchResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Team,
    Player,
}

impl FromStr for SearchKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "team" | "t" => Ok(SearchKind::Team),
            "player" | "p" => Ok(SearchKind::Player),
            other => bail!("Invalid search type '{other}'. Please enter 'team' or 'player'."),
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchKind::Team => f.write_str("team"),
            SearchKind::Player => f.write_str("player"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSession {
    pub kind: Option<SearchKind>,
    /// Candidates waiting for the user to pick one
    pub pending: Vec<Candidate>,
    pub selected: Option<Candidate>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search, dropping anything left from the previous one
    pub fn begin(self, kind: SearchKind) -> Self {
        Self {
            kind: Some(kind),
            pending: Vec::new(),
            selected: None,
        }
    }

    /// Fold a resolution outcome into the session
    pub fn apply(self, result: &MatchResult) -> Self {
        let kind = self.kind;
        match result {
            MatchResult::Exact { candidate } | MatchResult::FuzzyMatch { candidate, .. } => Self {
                kind,
                pending: Vec::new(),
                selected: Some(candidate.clone()),
            },
            MatchResult::Ambiguous { candidates } => Self {
                kind,
                pending: candidates.clone(),
                selected: None,
            },
            MatchResult::NotFound => Self {
                kind,
                pending: Vec::new(),
                selected: None,
            },
        }
    }

    /// Pick a pending candidate by 1-based position; out of range leaves the session as is
    pub fn choose(mut self, choice: usize) -> Self {
        if choice == 0 || choice > self.pending.len() {
            return self;
        }
        let picked = self.pending.swap_remove(choice - 1);
        self.pending.clear();
        self.selected = Some(picked);
        self
    }

    pub fn is_awaiting_choice(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn judges() -> Vec<Candidate> {
        vec![
            Candidate::new("Aaron Judge", 592450u64).with_detail("New York Yankees"),
            Candidate::new("Judge Smith", 1u64),
            Candidate::new("Judge Jones", 2u64),
        ]
    }

    #[test]
    fn test_search_kind_parse() {
        assert_eq!("Team".parse::<SearchKind>().unwrap(), SearchKind::Team);
        assert_eq!(" player ".parse::<SearchKind>().unwrap(), SearchKind::Player);
        assert_eq!("p".parse::<SearchKind>().unwrap(), SearchKind::Player);
        assert!("coach".parse::<SearchKind>().is_err());
    }

    #[test]
    fn test_apply_single_selects() {
        let judge = Candidate::new("Aaron Judge", 592450u64);
        let session = SearchSession::new()
            .begin(SearchKind::Player)
            .apply(&MatchResult::Exact {
                candidate: judge.clone(),
            });
        assert_eq!(session.selected, Some(judge));
        assert!(!session.is_awaiting_choice());
        assert_eq!(session.kind, Some(SearchKind::Player));
    }

    #[test]
    fn test_apply_ambiguous_then_choose() {
        let session = SearchSession::new()
            .begin(SearchKind::Player)
            .apply(&MatchResult::Ambiguous {
                candidates: judges(),
            });
        assert!(session.is_awaiting_choice());
        assert_eq!(session.selected, None);

        let session = session.choose(2);
        assert_eq!(
            session.selected.as_ref().map(|c| c.display_name.as_str()),
            Some("Judge Smith")
        );
        assert!(!session.is_awaiting_choice());
    }

    #[test]
    fn test_choose_out_of_range_keeps_state() {
        let session = SearchSession::new().apply(&MatchResult::Ambiguous {
            candidates: judges(),
        });
        let before = session.clone();
        assert_eq!(session.clone().choose(0), before);
        assert_eq!(session.choose(4), before);
    }

    #[test]
    fn test_not_found_clears_previous_selection() {
        let session = SearchSession::new()
            .apply(&MatchResult::Exact {
                candidate: Candidate::new("Aaron Judge", 592450u64),
            })
            .apply(&MatchResult::NotFound);
        assert_eq!(session.selected, None);
        assert!(session.pending.is_empty());
    }

    #[test]
    fn test_begin_resets() {
        let session = SearchSession::new()
            .apply(&MatchResult::Ambiguous {
                candidates: judges(),
            })
            .begin(SearchKind::Team);
        assert_eq!(session.kind, Some(SearchKind::Team));
        assert!(session.pending.is_empty());
    }
}
