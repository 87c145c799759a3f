//! Player lookup command

use anyhow::{bail, Result};
use serde::Serialize;

use crate::api::{Person, RecordingSource, StatsClient};
use crate::config::RuntimeContext;
use crate::output::output_for_format;
use crate::resolver::{MatchResult, Resolver};

#[derive(Debug, Serialize)]
struct PlayerLookup<'a> {
    query: &'a str,
    #[serde(flatten)]
    result: &'a MatchResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    player: Option<&'a Person>,
}

pub async fn run(ctx: &RuntimeContext, query: &[String]) -> Result<()> {
    let query = query.join(" ");
    let query = query.trim();
    if query.is_empty() {
        bail!("Player name must not be empty");
    }

    let client = StatsClient::new(ctx)?;
    let source = RecordingSource::new(&client);
    log::info!("Searching for MLB player '{query}'");

    let result = Resolver::new(&source).player(query).await?;
    let player = result.candidate().and_then(|c| source.person(&c.id));

    let lookup = PlayerLookup {
        query,
        result: &result,
        player: player.as_ref(),
    };

    output_for_format(ctx, &lookup, || {
        match (&result, &player) {
            (_, Some(person)) => print_person(person),
            (MatchResult::Ambiguous { candidates }, _) => {
                println!("Found multiple players for '{query}'. Please be more specific.");
                println!("Possible matches:");
                for candidate in candidates {
                    println!(
                        "- {} ({}) [id {}]",
                        candidate.display_name,
                        candidate.detail.as_deref().unwrap_or("N/A"),
                        candidate.id
                    );
                }
            }
            _ => println!("Player '{query}' not found. Please check the spelling."),
        }
        Ok(())
    })
}

pub(crate) fn print_person(person: &Person) {
    let position = person
        .primary_position
        .as_ref()
        .and_then(|p| p.name.as_deref())
        .unwrap_or("N/A");
    let team = person
        .current_team
        .as_ref()
        .map(|t| t.name_or("N/A"))
        .unwrap_or("N/A");

    println!("Player Information");
    println!("==================");
    println!("Name:              {}", person.full_name);
    println!("Primary Position:  {position}");
    println!("Current Team:      {team}");
    println!("Player ID:         {}", person.id);
}
