//! Earn-task farming client.
//!
//! Authenticates with a mini-app launch query, then claims farming and daily
//! rewards, works through the task catalog and spends play passes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use taskfarm::core::report::RunReport;
use taskfarm::execute::ExecuteOptions;
use taskfarm::exit_codes;
use taskfarm::farm::run_farm_cycle;
use taskfarm::game::{GameOptions, play_games};
use taskfarm::io::config::{DEFAULT_CONFIG_PATH, FarmConfig, load_config, write_config};
use taskfarm::io::gateway::{HttpGateway, TaskGateway};
use taskfarm::io::http::ApiClient;
use taskfarm::io::session::authenticate;
use taskfarm::logging;
use taskfarm::render::{render_catalog, render_farm, render_games, render_report};
use taskfarm::run::run_catalog;

#[derive(Parser)]
#[command(
    name = "taskfarm",
    version,
    about = "Claim farming rewards and complete earn tasks"
)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Mini-app launch query used to authenticate.
    #[arg(long, global = true, env = "QUERY_ID", hide_env_values = true)]
    query_id: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
    /// Show the task catalog and the action each task needs, without acting.
    Tasks {
        #[arg(long)]
        json: bool,
    },
    /// Start and claim every eligible task.
    Claim {
        #[arg(long)]
        json: bool,
    },
    /// Claim farming and daily rewards; restart farming when idle.
    Farm,
    /// Spend play passes on game rounds.
    Play,
    /// Farm, claim tasks, then play.
    All,
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    if let Command::Init { force } = cli.command {
        cmd_init(&cli.config, force)?;
        return Ok(exit_codes::OK);
    }

    let cfg = load_config(&cli.config)?;
    let gateway = connect(&cfg, cli.query_id.as_deref())?;
    match cli.command {
        Command::Init { .. } => Ok(exit_codes::OK),
        Command::Tasks { json } => cmd_tasks(&gateway, json),
        Command::Claim { json } => cmd_claim(&gateway, &cfg, json),
        Command::Farm => cmd_farm(&gateway),
        Command::Play => cmd_play(&gateway, &cfg),
        Command::All => {
            cmd_farm(&gateway)?;
            let code = cmd_claim(&gateway, &cfg, false)?;
            if code != exit_codes::OK {
                return Ok(code);
            }
            cmd_play(&gateway, &cfg)
        }
    }
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("{} already exists (use --force to overwrite)", path.display());
        return Ok(());
    }
    write_config(path, &FarmConfig::default())
        .with_context(|| format!("write {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}

fn connect(cfg: &FarmConfig, query_id: Option<&str>) -> Result<HttpGateway> {
    let query_id = query_id
        .filter(|id| !id.trim().is_empty())
        .context("missing launch query: pass --query-id or set QUERY_ID")?;
    let client = ApiClient::new(cfg.api.request_timeout()).context("build http client")?;
    let session = authenticate(&client, &cfg.api, query_id).context("authenticate")?;
    Ok(HttpGateway::new(
        client.with_session(&session),
        cfg.api.clone(),
    ))
}

fn cmd_tasks(gateway: &HttpGateway, json: bool) -> Result<i32> {
    let catalog = gateway.fetch_catalog().context("fetch task catalog")?;
    if json {
        print_json(&catalog)?;
    } else {
        print!("{}", render_catalog(&catalog));
    }
    Ok(exit_codes::OK)
}

fn cmd_claim(gateway: &HttpGateway, cfg: &FarmConfig, json: bool) -> Result<i32> {
    let catalog = gateway.fetch_catalog().context("fetch task catalog")?;
    let options = ExecuteOptions {
        claim_delay: Duration::from_millis(cfg.tasks.claim_delay_ms),
    };
    match run_catalog(gateway, &catalog, &options) {
        Ok(report) => {
            print_report(&report, json)?;
            Ok(exit_codes::OK)
        }
        Err(aborted) => {
            eprint!("{}", render_report(&aborted.completed));
            eprintln!("{:#}", anyhow::Error::new(aborted));
            Ok(exit_codes::ABORTED)
        }
    }
}

fn cmd_farm(gateway: &HttpGateway) -> Result<i32> {
    let summary = run_farm_cycle(gateway)?;
    print!("{}", render_farm(&summary));
    Ok(exit_codes::OK)
}

fn cmd_play(gateway: &HttpGateway, cfg: &FarmConfig) -> Result<i32> {
    let options = GameOptions::from(&cfg.game);
    let rounds = play_games(gateway, &options, &mut rand::thread_rng())?;
    print!("{}", render_games(&rounds));
    Ok(exit_codes::OK)
}

fn print_report(report: &RunReport, json: bool) -> Result<()> {
    if json {
        return print_json(report);
    }
    print!("{}", render_report(report));
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value).context("serialize json")?;
    println!("{payload}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_claim_json() {
        let cli = Cli::parse_from(["taskfarm", "claim", "--json"]);
        assert!(matches!(cli.command, Command::Claim { json: true }));
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "taskfarm",
            "farm",
            "--config",
            "alt.toml",
            "--query-id",
            "query_id=abc",
        ]);
        assert!(matches!(cli.command, Command::Farm));
        assert_eq!(cli.config, PathBuf::from("alt.toml"));
        assert_eq!(cli.query_id.as_deref(), Some("query_id=abc"));
    }

    #[test]
    fn parse_init_force() {
        let cli = Cli::parse_from(["taskfarm", "init", "--force"]);
        assert!(matches!(cli.command, Command::Init { force: true }));
    }

    #[test]
    fn connect_requires_query_id() {
        let err = connect(&FarmConfig::default(), Some("  "))
            .err()
            .expect("blank query id must be rejected");
        assert!(err.to_string().contains("QUERY_ID"));
    }
}
