//! A simple CLI tool for reading election results straight from a file store.
//! This uses the server's own storage and results code, so it reads exactly
//! what the server wrote.

use std::path::Path;

use clap::{Arg, ArgAction, ArgMatches, Command};

use civic_vote::{
    election::results::results_view,
    model::{
        api::results::{ResultsView, Standing},
        db::{Candidates, VoteTally, VotedUsers},
        storage::{FileStore, StorageError, TypedStore},
    },
};

const PROGRAM_NAME: &str = "tally-cli";

const ABOUT_TEXT: &str = "Print the standings of an election kept in a file store.

EXIT CODES:
     0: Results printed.
     1: The store could not be read.";

const STORE_PATH: &str = "STORE_PATH";

const STORE_PATH_HELP: &str = "The path to the server's file store,\n\
as configured by `store_path`";

/// Construct the CLI configuration.
fn cli() -> Command {
    // Make the build dirty when the toml changes.
    include_str!("../Cargo.toml");

    clap::command!(PROGRAM_NAME).about(ABOUT_TEXT).arg(
        Arg::new(STORE_PATH)
            .help(STORE_PATH_HELP)
            .action(ArgAction::Set)
            .required(true),
    )
}

/// Load everything needed for the results view.
fn load(path: &Path) -> Result<ResultsView, StorageError> {
    if !path.is_file() {
        return Err(StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("no store at {}", path.display()),
        )));
    }
    let store = FileStore::open(path)?;
    let candidates: Candidates = store.load()?;
    let tally: VoteTally = store.load()?;
    let voted: VotedUsers = store.load()?;
    Ok(results_view(&candidates, &tally, &voted))
}

/// One line per candidate, e.g. `#1 Sarah Johnson (Progressive Party): 3 votes (60.0%)`.
fn describe(standing: &Standing) -> String {
    format!(
        "#{} {} ({}): {} vote{} ({:.1}%)",
        standing.rank,
        standing.candidate.name,
        standing.candidate.party,
        standing.votes,
        if standing.votes != 1 { "s" } else { "" },
        standing.percentage
    )
}

/// Print the results and return the exit code.
fn run(args: &ArgMatches) -> u8 {
    let path: &String = args.get_one(STORE_PATH).unwrap(); // Required argument is guaranteed to be present.
    match load(Path::new(path)) {
        Ok(view) => {
            println!(
                "{} vote{} cast by {} voter{} across {} candidate{}.",
                view.total_votes,
                if view.total_votes != 1 { "s" } else { "" },
                view.turnout,
                if view.turnout != 1 { "s" } else { "" },
                view.total_candidates,
                if view.total_candidates != 1 { "s" } else { "" },
            );
            for standing in &view.standings {
                println!("{}", describe(standing));
            }
            0
        }
        Err(StorageError::Io(e)) => {
            println!("IO error: {e}");
            1
        }
        Err(e) => {
            println!("Invalid store: {e}");
            1
        }
    }
}

fn main() {
    let args = cli().get_matches();
    let exit_code = run(&args);
    std::process::exit(exit_code.into())
}
