//! Standings command

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use crate::api::{StandingsRecord, StatsClient, TeamRecord};
use crate::config::RuntimeContext;
use crate::output::{or_na, output_for_format, print_table};

#[derive(Debug, Tabled, Serialize)]
struct StandingsRow {
    #[tabled(rename = "TEAM")]
    team: String,
    #[tabled(rename = "W")]
    wins: u32,
    #[tabled(rename = "L")]
    losses: u32,
    #[tabled(rename = "PCT")]
    pct: String,
}

impl From<&TeamRecord> for StandingsRow {
    fn from(record: &TeamRecord) -> Self {
        Self {
            team: record.team.name_or("Unknown").to_string(),
            wins: record.wins,
            losses: record.losses,
            pct: or_na(record.winning_percentage.as_deref()),
        }
    }
}

#[derive(Debug, Serialize)]
struct LeagueStandings {
    league: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    division: Option<String>,
    teams: Vec<StandingsRow>,
}

impl From<&StandingsRecord> for LeagueStandings {
    fn from(record: &StandingsRecord) -> Self {
        Self {
            league: record.league_name(),
            division: record.division_name(),
            teams: record.team_records.iter().map(StandingsRow::from).collect(),
        }
    }
}

pub async fn run(
    ctx: &RuntimeContext,
    season: Option<&str>,
    leagues: Option<&str>,
) -> Result<()> {
    let season = ctx.season(season);
    let leagues = ctx.leagues(leagues);

    let client = StatsClient::new(ctx)?;
    let records = client.get_standings(&season, &leagues).await?;
    let standings: Vec<LeagueStandings> = records.iter().map(LeagueStandings::from).collect();

    output_for_format(ctx, &standings, || {
        if standings.is_empty() {
            println!("Could not retrieve team standings for {season}.");
            return Ok(());
        }

        println!("MLB Team Standings ({season})");
        for group in &standings {
            println!();
            match &group.division {
                Some(division) => println!("{division}:"),
                None => println!("{}:", group.league),
            }
            print_table(ctx, &group.teams)?;
        }
        Ok(())
    })
}
