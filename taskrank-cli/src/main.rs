use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use taskrank_core::{Profile, ScoringEngine, Suggestions, suggest, time};
use taskrank_ingest::{
    AnalyzeRequest, PayloadError, load_request, render_analysis, render_no_tasks,
    render_payload_error, render_suggest_failure, render_suggestions,
};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, prelude::*};

mod config;
mod output;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "taskrank",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TASKRANK_BUILD_SHA"), ")"),
    about = "Rank tasks by urgency, importance, effort and dependencies"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score and rank every task in a JSON or CSV file
    Analyze {
        /// Task file (.json request/list or .csv export)
        #[arg(long)]
        file: PathBuf,

        /// Weighting profile (overrides the file and config)
        #[arg(long)]
        profile: Option<String>,

        /// Reference date, YYYY-MM-DD (default: today in the configured timezone)
        #[arg(long)]
        today: Option<String>,

        /// Print the JSON response instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the top tasks to work on next
    Suggest {
        /// Task file (defaults to ~/.taskrank/tasks.json)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Number of suggestions (default from config, else 3)
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        profile: Option<String>,

        #[arg(long)]
        today: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// List the built-in weighting profiles
    Profiles,

    /// Manage ~/.taskrank/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            file,
            profile,
            today,
            json,
        } => {
            let cfg = config::load_config()?;
            analyze(&cfg, &file, profile.as_deref(), today.as_deref(), json)?;
        }

        Command::Suggest {
            file,
            limit,
            profile,
            today,
            json,
        } => {
            let cfg = config::load_config()?;
            let file = match file {
                Some(f) => f,
                None => state::tasks_path()?,
            };
            let limit = limit.unwrap_or(cfg.suggest.limit);
            suggest_next(&cfg, &file, limit, profile.as_deref(), today.as_deref(), json)?;
        }

        Command::Profiles => {
            print!("{}", output::profiles());
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,taskrank=info"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(env_filter),
        )
        .init();
}

/// Flag beats the file's own profile, which beats the config default.
fn resolve_profile(flag: Option<&str>, request: &AnalyzeRequest, cfg: &Config) -> Result<Profile> {
    match flag {
        Some(name) => Ok(name.parse::<Profile>()?),
        None => Ok(request.profile.unwrap_or(cfg.scoring.default_profile)),
    }
}

fn resolve_today(flag: Option<&str>, cfg: &Config) -> Result<NaiveDate> {
    match flag {
        Some(d) => time::parse_date(d),
        None => time::today_in_timezone(&cfg.scoring.timezone)
            .with_context(|| format!("config timezone '{}'", cfg.scoring.timezone)),
    }
}

fn analyze(
    cfg: &Config,
    file: &Path,
    profile: Option<&str>,
    today: Option<&str>,
    json: bool,
) -> Result<()> {
    let request = load_tasks(file, json)?;
    let engine = ScoringEngine::new(resolve_profile(profile, &request, cfg)?);
    let today = resolve_today(today, cfg)?;

    info!(tasks = request.tasks.len(), profile = %engine.profile(), %today, "analyzing");
    let result = engine.analyze(request.tasks, today);

    if json {
        let response = render_analysis(result);
        println!("{}", serde_json::to_string_pretty(&response)?);
        if !response.is_success() {
            bail!("scoring errors occurred");
        }
        return Ok(());
    }

    if result.has_errors() {
        for e in &result.errors {
            eprintln!("error: {e}");
        }
        bail!("scoring errors occurred ({} error(s))", result.errors.len());
    }

    print!("{}", output::ranking(&result));
    Ok(())
}

/// Load a task file. Under `--json` a rejected file is also printed as an
/// error body before failing.
fn load_tasks(file: &Path, json: bool) -> Result<AnalyzeRequest> {
    match load_request(file) {
        Ok(request) => Ok(request),
        Err(e) if json => {
            println!("{}", serde_json::to_string_pretty(&load_error_body(&e))?);
            bail!("invalid task file {}", file.display());
        }
        Err(e) => Err(e.context(format!("loading {}", file.display()))),
    }
}

fn load_error_body(err: &anyhow::Error) -> Value {
    match err.downcast_ref::<PayloadError>() {
        Some(payload) => render_payload_error(payload),
        None => json!({ "error": format!("{err:#}") }),
    }
}

#[derive(Debug, PartialEq)]
enum SuggestOutcome {
    NoTasks,
    Failed(Vec<String>),
    Picked(Suggestions),
}

fn no_tasks_message(file: &Path) -> String {
    format!("No tasks found. Add tasks to {} or pass --file.", file.display())
}

/// A missing file and an empty task list both mean there is nothing to suggest.
fn plan_suggestions(
    cfg: &Config,
    request: Option<AnalyzeRequest>,
    limit: usize,
    profile: Option<&str>,
    today: Option<&str>,
) -> Result<SuggestOutcome> {
    let Some(request) = request.filter(|r| !r.tasks.is_empty()) else {
        return Ok(SuggestOutcome::NoTasks);
    };

    let engine = ScoringEngine::new(resolve_profile(profile, &request, cfg)?);
    let today = resolve_today(today, cfg)?;
    let result = engine.analyze(request.tasks, today);

    if result.has_errors() {
        return Ok(SuggestOutcome::Failed(result.errors));
    }

    let picks = suggest(&result, limit);
    debug!(picked = picks.suggestions.len(), "suggestions ready");
    Ok(SuggestOutcome::Picked(picks))
}

fn suggest_next(
    cfg: &Config,
    file: &Path,
    limit: usize,
    profile: Option<&str>,
    today: Option<&str>,
    json: bool,
) -> Result<()> {
    let request = if file.exists() {
        Some(load_tasks(file, json)?)
    } else {
        None
    };

    match plan_suggestions(cfg, request, limit, profile, today)? {
        SuggestOutcome::NoTasks => {
            let message = no_tasks_message(file);
            if json {
                println!("{}", serde_json::to_string_pretty(&render_no_tasks(&message))?);
            } else {
                println!("{message}");
            }
        }
        SuggestOutcome::Failed(errors) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&render_suggest_failure(&errors))?);
            } else {
                for e in &errors {
                    eprintln!("error: {e}");
                }
            }
            bail!("error analyzing tasks ({} error(s))", errors.len());
        }
        SuggestOutcome::Picked(picks) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&render_suggestions(&picks))?);
            } else {
                print!("{}", output::suggestions(&picks));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("taskrank-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let p = dir.join(name);
        std::fs::write(&p, contents).unwrap();
        p
    }

    fn task_json(id: i64, title: &str, due: &str, importance: i64, deps: &[i64]) -> Value {
        json!({
            "id": id,
            "title": title,
            "due_date": due,
            "estimated_hours": 1,
            "importance": importance,
            "dependencies": deps,
        })
    }

    fn request(profile: Option<Profile>) -> AnalyzeRequest {
        AnalyzeRequest {
            tasks: vec![],
            profile,
        }
    }

    #[test]
    fn test_profile_precedence() {
        let mut cfg = Config::default();
        cfg.scoring.default_profile = Profile::HighImpact;

        assert_eq!(resolve_profile(None, &request(None), &cfg).unwrap(), Profile::HighImpact);
        assert_eq!(
            resolve_profile(None, &request(Some(Profile::FastestWins)), &cfg).unwrap(),
            Profile::FastestWins
        );
        assert_eq!(
            resolve_profile(Some("deadline_driven"), &request(Some(Profile::FastestWins)), &cfg)
                .unwrap(),
            Profile::DeadlineDriven
        );
        assert!(resolve_profile(Some("nope"), &request(None), &cfg).is_err());
    }

    #[test]
    fn test_today_flag_wins() {
        let cfg = Config::default();
        let d = resolve_today(Some("2026-02-19"), &cfg).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2026, 2, 19).unwrap());
        assert!(resolve_today(Some("tomorrow"), &cfg).is_err());
    }

    #[test]
    fn test_cli_parses_analyze() {
        let cli = Cli::try_parse_from([
            "taskrank",
            "analyze",
            "--file",
            "t.json",
            "--profile",
            "high_impact",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Command::Analyze { file, profile, json, .. } => {
                assert_eq!(file, PathBuf::from("t.json"));
                assert_eq!(profile.as_deref(), Some("high_impact"));
                assert!(json);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_empty_task_file_has_nothing_to_suggest() {
        let cfg = Config::default();
        let p = scratch("empty.json", "[]");
        let req = load_tasks(&p, true).unwrap();
        let outcome = plan_suggestions(&cfg, Some(req), 3, None, Some("2026-02-19")).unwrap();
        assert_eq!(outcome, SuggestOutcome::NoTasks);

        let outcome = plan_suggestions(&cfg, None, 3, None, Some("2026-02-19")).unwrap();
        assert_eq!(outcome, SuggestOutcome::NoTasks);

        let body = render_no_tasks(&no_tasks_message(&p));
        assert_eq!(body["suggestions"], json!([]));
        assert!(body["message"].as_str().unwrap().starts_with("No tasks found. Add tasks to "));
    }

    #[test]
    fn test_suggest_reports_cycle_as_failure() {
        let tasks = json!([
            task_json(1, "a", "2026-03-01", 3, &[2]),
            task_json(2, "b", "2026-03-01", 3, &[1]),
        ]);
        let p = scratch("cycle.json", &tasks.to_string());
        let req = load_tasks(&p, true).unwrap();
        let outcome =
            plan_suggestions(&Config::default(), Some(req), 3, None, Some("2026-02-19")).unwrap();
        match outcome {
            SuggestOutcome::Failed(errors) => {
                let body = render_suggest_failure(&errors);
                assert_eq!(body["error"], "Error analyzing tasks");
                assert_eq!(
                    body["details"][0],
                    "Circular dependency detected involving tasks: [1, 2]"
                );
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_suggest_picks_top_tasks() {
        let tasks = json!([
            task_json(1, "a", "2026-03-01", 3, &[]),
            task_json(2, "b", "2026-02-19", 9, &[]),
        ]);
        let p = scratch("two.json", &tasks.to_string());
        let req = load_tasks(&p, false).unwrap();
        let outcome =
            plan_suggestions(&Config::default(), Some(req), 1, None, Some("2026-02-19")).unwrap();
        match outcome {
            SuggestOutcome::Picked(picks) => {
                assert_eq!(picks.suggestions.len(), 1);
                assert_eq!(picks.suggestions[0].task.title, "b");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_rejected_payload_renders_error_body() {
        let p = scratch("bad.json", &json!([task_json(1, "a", "2026-03-01", 11, &[])]).to_string());
        let err = load_request(&p).unwrap_err();
        let body = load_error_body(&err);
        assert_eq!(
            body["error"],
            "Task \"a\" has invalid importance. Must be integer between 1 and 10."
        );
        assert_eq!(body["received"], 11);
        assert!(load_tasks(&p, true).is_err());
    }

    #[test]
    fn test_unparseable_file_still_renders_error_body() {
        let p = scratch("garbled.json", "{not json");
        let body = load_error_body(&load_request(&p).unwrap_err());
        assert!(body["error"].as_str().unwrap().starts_with("parse "));
        assert!(body.get("received").is_none());
    }
}
