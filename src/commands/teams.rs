//! Team listing command

use anyhow::Result;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::Serialize;
use tabled::Tabled;

use crate::api::{NamedRef, StatsClient, Team};
use crate::config::RuntimeContext;
use crate::output::{output_for_format, print_table};

#[derive(Debug, Tabled, Serialize)]
struct TeamRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "ABBR")]
    abbreviation: String,
    #[tabled(rename = "LEAGUE")]
    league: String,
    #[tabled(rename = "DIVISION")]
    division: String,
}

impl From<&Team> for TeamRow {
    fn from(team: &Team) -> Self {
        let name_of = |r: &Option<NamedRef>| {
            r.as_ref()
                .and_then(|r| r.name.clone())
                .unwrap_or_else(|| "-".to_string())
        };

        Self {
            id: team.id,
            name: team.name.clone(),
            abbreviation: team
                .abbreviation
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            league: name_of(&team.league),
            division: name_of(&team.division),
        }
    }
}

pub async fn run(ctx: &RuntimeContext, filter: Option<String>) -> Result<()> {
    let client = StatsClient::new(ctx)?;
    let teams = client.get_teams().await?;
    let filtered = filter_teams(&teams, filter.as_deref());

    output_for_format(ctx, &filtered, || {
        if filtered.is_empty() {
            if filter.is_some() {
                println!("No teams found matching filter");
            } else {
                println!("No teams found");
            }
        } else {
            let rows: Vec<TeamRow> = filtered.iter().map(|t| TeamRow::from(*t)).collect();
            print_table(ctx, &rows)?;
        }
        Ok(())
    })
}

fn filter_teams<'a>(teams: &'a [Team], filter: Option<&str>) -> Vec<&'a Team> {
    let Some(filter) = filter else {
        return teams.iter().collect();
    };

    let matcher = SkimMatcherV2::default().ignore_case();
    teams
        .iter()
        .filter(|t| {
            matcher.fuzzy_match(&t.name, filter).is_some()
                || t
                    .abbreviation
                    .as_deref()
                    .is_some_and(|abbr| matcher.fuzzy_match(abbr, filter).is_some())
        })
        .collect()
}
