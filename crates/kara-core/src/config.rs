use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::platform;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub play: PlayConfig,
}

/// User-configurable paths for the video library and the play log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root of the pre-organized karaoke directory tree
    /// (by-artist-first/, by-decade/, …). Defaults to `~/karaoke`.
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,
    /// Append-only play log. Defaults to `<data dir>/playlist.txt`.
    #[serde(default = "default_play_log")]
    pub play_log: PathBuf,
}

/// External media player invocation. The configured command is spawned
/// with its args followed by the file path, and must not return until
/// the player exits (wait-for-exit semantics).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_player_command")]
    pub command: String,
    #[serde(default = "default_player_args")]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlayConfig {
    /// Refuse to play the same title twice in one session.
    #[serde(default)]
    pub unique: bool,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            play_log: default_play_log(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            command: default_player_command(),
            args: default_player_args(),
        }
    }
}

fn default_root_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("karaoke")
}

fn default_play_log() -> PathBuf {
    platform::data_dir().join("playlist.txt")
}

#[cfg(target_os = "macos")]
fn default_player_command() -> String {
    "open".to_string()
}

// open: -W = wait until app exits, -n = force new instance, -a iina = use IINA
#[cfg(target_os = "macos")]
fn default_player_args() -> Vec<String> {
    vec![
        "-W".to_string(),
        "-n".to_string(),
        "-a".to_string(),
        "iina".to_string(),
    ]
}

#[cfg(not(target_os = "macos"))]
fn default_player_command() -> String {
    "mpv".to_string()
}

#[cfg(not(target_os = "macos"))]
fn default_player_args() -> Vec<String> {
    vec!["--fs".to_string()]
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            player: PlayerConfig::default(),
            play: PlayConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.paths.root_dir.ends_with("karaoke"));
        assert!(config.paths.play_log.ends_with("playlist.txt"));
        assert!(!config.player.command.is_empty());
        assert!(!config.play.unique);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[play]\nunique = true\n").unwrap();
        assert!(config.play.unique);
        assert!(config.paths.root_dir.ends_with("karaoke"));
        assert_eq!(config.player.command, PlayerConfig::default().command);
    }
}
