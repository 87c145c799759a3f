//! Live scores command

use anyhow::Result;
use tabled::Tabled;

use crate::api::{GameScore, StatsClient};
use crate::config::RuntimeContext;
use crate::output::{output_for_format, print_table};

#[derive(Debug, Tabled)]
struct ScoreRow<'a> {
    #[tabled(rename = "MATCHUP")]
    matchup: &'a str,
    #[tabled(rename = "SCORE")]
    score: &'a str,
    #[tabled(rename = "STATUS")]
    status: &'a str,
}

impl<'a> From<&'a GameScore> for ScoreRow<'a> {
    fn from(game: &'a GameScore) -> Self {
        Self {
            matchup: &game.matchup,
            score: &game.score,
            status: &game.status,
        }
    }
}

pub async fn run(ctx: &RuntimeContext) -> Result<()> {
    let client = StatsClient::new(ctx)?;
    let games = client.get_scoreboard().await?;

    output_for_format(ctx, &games, || {
        if games.is_empty() {
            println!("No MLB games on the scoreboard right now.");
        } else {
            let rows: Vec<ScoreRow> = games.iter().map(ScoreRow::from).collect();
            print_table(ctx, &rows)?;
        }
        Ok(())
    })
}
