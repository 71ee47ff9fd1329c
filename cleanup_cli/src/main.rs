use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use env_logger::{Builder, Env};
use log::error;
use serde_json::json;

use cleanup_core::config::Config;
use cleanup_core::fs_host::FsHost;
use cleanup_core::outcome::Summary;
use cleanup_core::preview::ViewState;
use cleanup_core::session::{Event, Invocation, Session};
use cleanup_core::{sanitize, Outcome};

#[derive(Debug, Parser)]
#[command(
    name = "cleanup-name",
    version,
    about = "remove symbols from clip names and convert spaces to underscores"
)]
struct Cli {
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count, help = "Sets the level of verbosity")]
    verbose: u8,

    #[arg(short = 'c', long = "config", global = true, help = "read settings from a TOML file")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(name = "sanitize", about = "print the cleaned up form of each [text]")]
    Sanitize {
        #[arg(required = true)]
        text: Vec<String>,
    },

    #[command(name = "preview", about = "show how the files in [dir] would be renamed")]
    Preview {
        dir: String,
        #[arg(short = 'm', long = "match", help = "only select file names matching this regex")]
        pattern: Option<String>,
        #[arg(long = "original", action = ArgAction::SetTrue, help = "show the current names instead")]
        original: bool,
    },

    #[command(name = "rename", about = "clean up the names of the files in [dir]")]
    Rename {
        dir: String,
        #[arg(short = 'm', long = "match", help = "only select file names matching this regex")]
        pattern: Option<String>,
        #[arg(short = 'y', long = "yes", action = ArgAction::SetTrue, help = "do not ask for confirmation")]
        yes: bool,
        #[arg(long = "json", action = ArgAction::SetTrue, help = "print the outcomes as JSON")]
        json: bool,
    },
}

fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn Error>> {
    match path {
        Some(path) => Ok(Config::new(path)?),
        None => Ok(Config::default()),
    }
}

fn print_sanitized(texts: &[String]) {
    for text in texts {
        println!("{}", sanitize(text));
    }
}

fn preview(dir: &str, pattern: Option<&str>, original: bool, config: &Config) -> Result<(), Box<dyn Error>> {
    let mut host = FsHost::new(dir)?;
    let selection = host.select(pattern)?;
    let mut session = Session::open(&mut host, &selection, config)?;

    if original {
        session.toggle_view(ViewState::Original);
    }

    println!("{}", session.preview().render());
    println!("{} of {} names would change", session.pending(), session.snapshot().len());

    session.cancel();
    Ok(())
}

fn ask_confirmation<R: BufRead, W: Write>(input: &mut R, out: &mut W, preview: &str, pending: usize) -> io::Result<Event> {
    writeln!(out, "{}", preview)?;
    write!(out, "rename {} file(s)? [y/N] ", pending)?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    match answer.trim() {
        "y" | "Y" | "yes" => Ok(Event::Confirm),
        _ => Ok(Event::Cancel),
    }
}

fn outcome_to_json(outcome: &Outcome) -> serde_json::Value {
    match outcome {
        Outcome::Renamed { original, candidate } => json!({ "status": "renamed", "original": original, "name": candidate }),
        Outcome::Skipped { name } => json!({ "status": "skipped", "original": name, "name": name }),
        Outcome::Failed { original, error } => {
            json!({ "status": "failed", "original": original, "error": error.to_string() })
        }
    }
}

fn print_outcomes(outcomes: &[Outcome], as_json: bool) -> Result<(), Box<dyn Error>> {
    if as_json {
        let values: Vec<serde_json::Value> = outcomes.iter().map(outcome_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
    } else {
        for outcome in outcomes {
            println!("{}", outcome);
        }
        println!("{}", Summary::of(outcomes));
    }
    Ok(())
}

fn rename(dir: &str, pattern: Option<&str>, yes: bool, as_json: bool, config: &Config) -> Result<bool, Box<dyn Error>> {
    let mut host = FsHost::new(dir)?;
    let selection = host.select(pattern)?;
    let session = Session::open(&mut host, &selection, config)?;

    let event = if yes {
        Event::Confirm
    } else {
        let preview = session.preview().render().to_string();
        let stdin = io::stdin();
        let mut input = stdin.lock();

        // keep stdout parseable when it carries JSON
        if as_json {
            ask_confirmation(&mut input, &mut io::stderr(), &preview, session.pending())?
        } else {
            ask_confirmation(&mut input, &mut io::stdout(), &preview, session.pending())?
        }
    };

    match session.dispatch(vec![event])? {
        Invocation::Applied(outcomes) => {
            print_outcomes(&outcomes, as_json)?;
            Ok(!outcomes.iter().any(Outcome::is_failure))
        }
        Invocation::Cancelled => {
            if as_json {
                println!("[]");
            } else {
                println!("cancelled, no files renamed");
            }
            Ok(true)
        }
    }
}

fn run(cli: &Cli) -> Result<bool, Box<dyn Error>> {
    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Sanitize { text } => {
            print_sanitized(text);
            Ok(true)
        }
        Commands::Preview { dir, pattern, original } => {
            preview(dir, pattern.as_deref(), *original, &config)?;
            Ok(true)
        }
        Commands::Rename { dir, pattern, yes, json } => rename(dir, pattern.as_deref(), *yes, *json, &config),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let min_log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let mut builder = Builder::from_env(Env::default().default_filter_or(min_log_level));
    builder.init();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("an unexpected error occured ({})", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sanitize() {
        let cli = Cli::parse_from(["cleanup-name", "sanitize", "Hello World!!", "a__b"]);

        match cli.command {
            Commands::Sanitize { text } => assert_eq!(text, vec!["Hello World!!", "a__b"]),
            _ => panic!("expected sanitize command"),
        }
    }

    #[test]
    fn parse_rename_with_options() {
        let cli = Cli::parse_from([
            "cleanup-name",
            "-vv",
            "--config",
            "cleanup.toml",
            "rename",
            "/media",
            "--match",
            r"\.mov$",
            "--yes",
            "--json",
        ]);

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config.as_deref(), Some(Path::new("cleanup.toml")));
        match cli.command {
            Commands::Rename { dir, pattern, yes, json } => {
                assert_eq!(dir, "/media");
                assert_eq!(pattern.as_deref(), Some(r"\.mov$"));
                assert!(yes);
                assert!(json);
            }
            _ => panic!("expected rename command"),
        }
    }

    #[test]
    fn parse_preview_original() {
        let cli = Cli::parse_from(["cleanup-name", "preview", "/media", "--original"]);

        match cli.command {
            Commands::Preview { dir, pattern, original } => {
                assert_eq!(dir, "/media");
                assert!(pattern.is_none());
                assert!(original);
            }
            _ => panic!("expected preview command"),
        }
    }

    #[test]
    fn sanitize_requires_text() {
        assert!(Cli::try_parse_from(["cleanup-name", "sanitize"]).is_err());
    }

    #[test]
    fn confirmation_prompt() {
        let mut out = Vec::new();
        let event = ask_confirmation(&mut "y\n".as_bytes(), &mut out, "| * | x_y |", 1).unwrap();
        assert_eq!(event, Event::Confirm);

        let written = String::from_utf8(out).unwrap();
        assert!(written.starts_with("| * | x_y |\n"));
        assert!(written.ends_with("rename 1 file(s)? [y/N] "));

        let mut out = Vec::new();
        assert_eq!(ask_confirmation(&mut "\n".as_bytes(), &mut out, "", 1).unwrap(), Event::Cancel);
        assert_eq!(ask_confirmation(&mut "nope\n".as_bytes(), &mut out, "", 1).unwrap(), Event::Cancel);
    }

    #[test]
    fn outcome_json() {
        let value = outcome_to_json(&Outcome::renamed("A!", "A"));
        assert_eq!(value["status"], "renamed");
        assert_eq!(value["original"], "A!");
        assert_eq!(value["name"], "A");

        let value = outcome_to_json(&Outcome::skipped("B"));
        assert_eq!(value["status"], "skipped");
    }
}
