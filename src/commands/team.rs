//! Team lookup command

use anyhow::{bail, Result};
use serde::Serialize;

use crate::api::{NamedRef, RecordingSource, StatsClient, Team};
use crate::config::RuntimeContext;
use crate::output::output_for_format;
use crate::resolver::{MatchResult, Resolver};

#[derive(Debug, Serialize)]
struct TeamLookup<'a> {
    query: &'a str,
    #[serde(flatten)]
    result: &'a MatchResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    team: Option<&'a Team>,
}

pub async fn run(ctx: &RuntimeContext, query: &[String]) -> Result<()> {
    let query = query.join(" ");
    let query = query.trim();
    if query.is_empty() {
        bail!("Team name must not be empty");
    }

    let client = StatsClient::new(ctx)?;
    let source = RecordingSource::new(&client);
    log::info!("Searching for MLB team '{query}'");

    let result = Resolver::new(&source).team(query).await?;
    let team = result.candidate().and_then(|c| source.team(&c.id));

    let lookup = TeamLookup {
        query,
        result: &result,
        team: team.as_ref(),
    };

    output_for_format(ctx, &lookup, || {
        if let Some(team) = &team {
            print_team(team);
        }
        Ok(())
    })?;

    if team.is_none() {
        bail!("Team '{query}' not found. Please check the name and try again.");
    }
    Ok(())
}

pub(crate) fn print_team(team: &Team) {
    let name_of = |r: &Option<NamedRef>| {
        r.as_ref()
            .map(|r| r.name_or("N/A").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    };

    println!("Team Information");
    println!("================");
    println!("Team Name:  {}", team.name);
    println!(
        "Location:   {}",
        team.location_name.as_deref().unwrap_or("N/A")
    );
    println!("Division:   {}", name_of(&team.division));
    println!("League:     {}", name_of(&team.league));
    println!("Venue:      {}", name_of(&team.venue));
    println!("Team ID:    {}", team.id);
}
