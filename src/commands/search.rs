//! Interactive team/player search

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use crate::api::{RecordingSource, StatsClient};
use crate::commands::player::print_person;
use crate::commands::team::print_team;
use crate::config::RuntimeContext;
use crate::resolver::{Candidate, MatchResult, Resolver};
use crate::session::{SearchKind, SearchSession};

pub async fn run(ctx: &RuntimeContext) -> Result<()> {
    let client = StatsClient::new(ctx)?;
    let source = RecordingSource::new(&client);
    let resolver = Resolver::new(&source);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut session = SearchSession::new();

    loop {
        let Some(answer) = prompt(&mut input, "\nSearch for a 'team' or a 'player' ('exit' to quit): ")?
        else {
            break;
        };
        if is_exit(&answer) {
            println!("Goodbye!");
            break;
        }

        let kind = match answer.parse::<SearchKind>() {
            Ok(kind) => kind,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        session = session.begin(kind);

        let Some(query) = prompt(&mut input, &format!("Enter the MLB {kind} name: "))? else {
            break;
        };
        if query.is_empty() {
            println!("Please enter a name.");
            continue;
        }

        let outcome = match kind {
            SearchKind::Team => resolver.team(&query).await,
            SearchKind::Player => resolver.player(&query).await,
        };
        let result = match outcome {
            Ok(result) => result,
            Err(err) => {
                log::debug!("lookup failed: {err:?}");
                println!("Error fetching {kind} information: {err}");
                continue;
            }
        };

        session = session.apply(&result);

        if session.is_awaiting_choice() {
            println!("\nFound multiple players for '{query}'.");
            print_choices(&session.pending);
            let Some(choice) = prompt(&mut input, "Pick a number (Enter to skip): ")? else {
                break;
            };
            session = match choice.parse::<usize>() {
                Ok(n) => session.choose(n),
                Err(_) => session,
            };
        }

        match (&result, &session.selected) {
            (_, Some(selected)) => show_selected(&source, kind, selected),
            (MatchResult::Ambiguous { .. }, None) => println!("Nothing selected."),
            (_, None) => println!("{kind} '{query}' not found. Please check the name and try again."),
        }
    }

    Ok(())
}

/// Print a prompt and read one trimmed line; `None` at end of input
fn prompt(input: &mut impl BufRead, label: &str) -> Result<Option<String>> {
    print!("{label}");
    io::stdout().flush().context("flushing stdout")?;
    read_answer(input)
}

fn read_answer(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("reading input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn is_exit(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "exit" | "q" | "quit")
}

fn print_choices(candidates: &[Candidate]) {
    for (i, candidate) in candidates.iter().enumerate() {
        println!("  {}. {}", i + 1, candidate.label());
    }
}

fn show_selected(source: &RecordingSource<'_>, kind: SearchKind, selected: &Candidate) {
    println!();
    match kind {
        SearchKind::Team => match source.team(&selected.id) {
            Some(team) => print_team(&team),
            None => println!("No details for team {} ({}).", selected.display_name, selected.id),
        },
        SearchKind::Player => match source.person(&selected.id) {
            Some(person) => print_person(&person),
            None => println!("No details for player {} ({}).", selected.display_name, selected.id),
        },
    }
}
