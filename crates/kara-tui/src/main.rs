mod action;
mod app;
mod app_state;
mod component;
mod components;
mod focus;
mod theme;
mod widgets;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use kara_core::config::Config;
use kara_core::index::Library;
use kara_core::player::{Dispatcher, PlayerCommand};
use kara_core::playlog::PlayLog;

/// Pick and play videos from a pre-organized karaoke library.
#[derive(Debug, Parser)]
#[command(name = "kara", version, about)]
struct Args {
    /// Library root (overrides KARAOKE_DIR and the config file).
    #[arg(short = 'd', long = "directory", value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Refuse to replay a title already played this session.
    #[arg(short, long)]
    unique: bool,

    /// Player command override, e.g. "mpv --fs". The file path is appended.
    #[arg(long, value_name = "CMD")]
    player: Option<String>,

    /// Search term to run before the first frame.
    #[arg(value_name = "SEARCHTERM")]
    searchterm: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let data_dir = kara_core::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("kara.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; the terminal is in raw mode so everything
    // goes to the file, never stdout.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("kara log: {}", log_path.display());

    tracing::info!("kara starting…");

    let config = Config::load().unwrap_or_default();

    // Root resolution: flag > KARAOKE_DIR > config.
    let root = args
        .directory
        .clone()
        .or_else(|| std::env::var_os("KARAOKE_DIR").map(PathBuf::from))
        .unwrap_or_else(|| config.paths.root_dir.clone());

    let library = Library::build(&root)
        .with_context(|| format!("indexing karaoke library at {}", root.display()))?;
    tracing::info!(
        "library indexed: {} titles under {}",
        library.titles().entries.len(),
        root.display()
    );

    let player = match &args.player {
        Some(line) => parse_player_command(line)?,
        None => PlayerCommand::from(&config.player),
    };
    let unique = args.unique || config.play.unique;

    let play_log = PlayLog::new(config.paths.play_log.clone(), root);
    play_log
        .open_session()
        .with_context(|| "writing play-log session marker")?;

    let dispatcher = Dispatcher::new(player, play_log, unique);

    let app = app::App::new(library, dispatcher, args.searchterm.clone());
    app.run().await
}

/// Split a `--player` override on whitespace: first token is the executable,
/// the rest are fixed arguments.
fn parse_player_command(line: &str) -> anyhow::Result<PlayerCommand> {
    let mut parts = line.split_whitespace().map(str::to_owned);
    let command = parts.next().context("--player command is empty")?;
    Ok(PlayerCommand {
        command,
        args: parts.collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_override_splits_command_and_args() {
        let cmd = parse_player_command("open -W -n -a iina").unwrap();
        assert_eq!(cmd.command, "open");
        assert_eq!(cmd.args, vec!["-W", "-n", "-a", "iina"]);
    }

    #[test]
    fn empty_player_override_is_rejected() {
        assert!(parse_player_command("  ").is_err());
    }
}
