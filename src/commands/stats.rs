//! Player season stats command

use anyhow::{bail, Result};
use serde::Serialize;

use crate::api::{HittingLine, StatsClient};
use crate::config::RuntimeContext;
use crate::directory::DirectorySource;
use crate::output::{or_na, output_for_format};
use crate::resolver::is_player_id;

#[derive(Debug, Serialize)]
struct SeasonStats<'a> {
    player_id: &'a str,
    season: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<&'a HittingLine>,
}

pub async fn run(ctx: &RuntimeContext, player_id: &str, season: Option<&str>) -> Result<()> {
    let player_id = player_id.trim();
    if !is_player_id(player_id) {
        bail!("Invalid player id '{player_id}'. Please enter a numeric player ID.");
    }
    let season = ctx.season(season);

    let client = StatsClient::new(ctx)?;
    if !client.player_exists(player_id).await? {
        bail!("Player ID {player_id} not found.");
    }
    let line = client.get_season_stats(player_id, &season).await?;

    let report = SeasonStats {
        player_id,
        season: &season,
        stats: line.as_ref(),
    };

    output_for_format(ctx, &report, || {
        match &line {
            Some(line) => print_line(player_id, &season, line),
            None => println!("No stats found for player ID {player_id} (season {season})."),
        }
        Ok(())
    })
}

fn print_line(player_id: &str, season: &str, line: &HittingLine) {
    println!("Player ID {player_id} Stats ({season}):");
    for (label, value) in stat_lines(line) {
        println!("  {label}: {value}");
    }
}

fn stat_lines(line: &HittingLine) -> [(&'static str, String); 4] {
    [
        ("AVG", or_na(line.avg.as_deref())),
        ("HR", or_na(line.home_runs)),
        ("RBI", or_na(line.rbi)),
        ("OPS", or_na(line.ops.as_deref())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_lines_fill_missing() {
        let line = HittingLine {
            avg: Some(".322".to_string()),
            home_runs: Some(58),
            rbi: None,
            ops: None,
        };
        let lines = stat_lines(&line);
        assert_eq!(lines[0], ("AVG", ".322".to_string()));
        assert_eq!(lines[1], ("HR", "58".to_string()));
        assert_eq!(lines[2], ("RBI", "N/A".to_string()));
        assert_eq!(lines[3], ("OPS", "N/A".to_string()));
    }
}
