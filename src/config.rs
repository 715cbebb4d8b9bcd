/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub speed: SpeedConfig,
    pub maze: MazeConfig,
}

#[derive(Clone, Debug)]
pub struct SpeedConfig {
    /// Frame cadence of the render loop.
    pub tick_rate_ms: u64,
    /// Repeat cadence while a direction key is held.
    pub move_repeat_ms: u64,
}

#[derive(Clone, Debug)]
pub struct MazeConfig {
    /// Fixed seed for reproducible layouts; unset = fresh maze every run.
    pub seed: Option<u64>,
    /// Fraction of carved openings to try re-closing (harder).
    pub close_fraction: f64,
    /// Fraction of interior walls to open into loops (easier).
    pub open_fraction: f64,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    maze: TomlMaze,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default = "default_move_repeat")]
    move_repeat_ms: u64,
}

#[derive(Deserialize, Debug, Default)]
struct TomlMaze {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    close_fraction: f64,
    #[serde(default)]
    open_fraction: f64,
}

// ── Defaults ──

fn default_tick_rate() -> u64 { 33 }
fn default_move_repeat() -> u64 { 160 }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed {
            tick_rate_ms: default_tick_rate(),
            move_repeat_ms: default_move_repeat(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let toml_cfg = load_toml(&candidate_dirs());

        GameConfig {
            speed: SpeedConfig {
                tick_rate_ms: toml_cfg.speed.tick_rate_ms.max(1),
                move_repeat_ms: toml_cfg.speed.move_repeat_ms.max(1),
            },
            maze: MazeConfig {
                seed: toml_cfg.maze.seed,
                close_fraction: toml_cfg.maze.close_fraction.clamp(0.0, 1.0),
                open_fraction: toml_cfg.maze.open_fraction.clamp(0.0, 1.0),
            },
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        // Resolve symlinks so a linked binary still finds its config.
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.speed.tick_rate_ms, 33);
        assert_eq!(cfg.speed.move_repeat_ms, 160);
        assert_eq!(cfg.maze.seed, None);
        assert_eq!(cfg.maze.close_fraction, 0.0);
    }

    #[test]
    fn partial_sections_fill_in() {
        let cfg: TomlConfig = toml::from_str(
            "[maze]\nseed = 42\nclose_fraction = 0.2\n",
        )
        .unwrap();
        assert_eq!(cfg.maze.seed, Some(42));
        assert_eq!(cfg.maze.close_fraction, 0.2);
        assert_eq!(cfg.speed.tick_rate_ms, 33);
    }
}
