use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root match-harness configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MatchConfig {
    pub run_id: String,
    pub games: GamesConfig,
    pub players: Vec<PlayerConfig>,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MatchConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: MatchConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.games.validate()?;
        self.outputs.validate()?;
        self.logging.validate()?;
        validate_players(&self.players)?;
        Ok(())
    }

    /// Resolve output templates (`{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
        }
    }
}

/// Game sampling configuration block.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GamesConfig {
    pub seed: Option<u64>,
    pub count: usize,
}

impl GamesConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.count == 0 {
            return Err(ValidationError::InvalidField {
                field: "games.count".to_string(),
                message: "number of games must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Definition of one seat's player. The first entry sits North, the second
/// South.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlayerConfig {
    pub name: String,
    pub kind: PlayerKind,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    Random,
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [("outputs.jsonl", &self.jsonl), ("outputs.summary_md", &self.summary_md)] {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: field.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default)]
    pub level: Option<String>,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(raw) = &self.level {
            if raw.parse::<Level>().is_err() {
                return Err(ValidationError::InvalidField {
                    field: "logging.level".to_string(),
                    message: format!("unknown level `{raw}`"),
                });
            }
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        self.level.as_deref().and_then(|raw| raw.parse().ok())
    }
}

/// Concrete output paths after template resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config at {path}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid config at {path}")]
    Invalid {
        #[source]
        source: ValidationError,
        path: PathBuf,
    },
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }
    if let Some(bad) = run_id.chars().find(|c| !RUN_ID_ALLOWED.contains(*c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: format!("character `{bad}` is not allowed"),
        });
    }
    Ok(())
}

fn validate_players(players: &[PlayerConfig]) -> Result<(), ValidationError> {
    if players.len() != 2 {
        return Err(ValidationError::InvalidField {
            field: "players".to_string(),
            message: format!("exactly two players are required, found {}", players.len()),
        });
    }
    let mut names = HashSet::new();
    for player in players {
        if player.name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "players.name".to_string(),
                message: "player names must not be empty".to_string(),
            });
        }
        if !names.insert(player.name.as_str()) {
            return Err(ValidationError::InvalidField {
                field: "players.name".to_string(),
                message: format!("duplicate player name `{}`", player.name),
            });
        }
    }
    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{run_id}", run_id))
}

#[cfg(test)]
mod tests {
    use super::MatchConfig;

    fn base_yaml() -> String {
        r#"
run_id: "test_run"
games:
  seed: 7
  count: 5
players:
  - name: "a"
    kind: "random"
  - name: "b"
    kind: "random"
    seed: 99
outputs:
  jsonl: "out/{run_id}/games.jsonl"
  summary_md: "out/{run_id}/summary.md"
"#
        .to_string()
    }

    fn parse(yaml: &str) -> MatchConfig {
        serde_yaml::from_str(yaml).expect("yaml parses")
    }

    #[test]
    fn valid_config_passes_and_resolves_templates() {
        let mut cfg = parse(&base_yaml());
        cfg.validate().unwrap();
        let outputs = cfg.resolved_outputs();
        assert_eq!(
            outputs.jsonl.to_string_lossy(),
            "out/test_run/games.jsonl"
        );
        assert_eq!(cfg.players[1].seed, Some(99));
        assert!(!cfg.logging.enable_structured);
    }

    #[test]
    fn zero_games_is_rejected() {
        let mut cfg = parse(&base_yaml().replace("count: 5", "count: 0"));
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn bad_run_id_characters_are_rejected() {
        let mut cfg = parse(&base_yaml().replace("test_run", "bad run"));
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn duplicate_player_names_are_rejected() {
        let mut cfg = parse(&base_yaml().replace("name: \"b\"", "name: \"a\""));
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn a_single_player_is_rejected() {
        let yaml = base_yaml().replace(
            "  - name: \"b\"\n    kind: \"random\"\n    seed: 99\n",
            "",
        );
        let mut cfg = parse(&yaml);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn unknown_logging_level_is_rejected() {
        let mut cfg = parse(&format!("{}logging:\n  level: \"shout\"\n", base_yaml()));
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn logging_level_parses_into_tracing() {
        let cfg = parse(&format!(
            "{}logging:\n  enable_structured: true\n  level: \"debug\"\n",
            base_yaml()
        ));
        assert_eq!(cfg.logging.level(), Some(tracing::Level::DEBUG));
    }
}
