use fish_bot::BotParams;
use fish_core::model::call::CallResult;
use fish_core::model::catalog::{Catalog, DEFAULT_PLAYER_NAMES};
use fish_core::model::{HAND_SIZE, PLAYER_COUNT};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root replay configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReplayConfig {
    pub run_id: String,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_players")]
    pub players: Vec<String>,
    /// Agent's starting hand by card name. Dealt from `seed` when absent.
    #[serde(default)]
    pub hand: Option<Vec<String>>,
    #[serde(default)]
    pub params: BotParams,
    #[serde(default)]
    pub moves: Vec<ScriptEvent>,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ReplayConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: ReplayConfig =
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
        let catalog = self.catalog()?;
        if let Some(hand) = self.hand.as_ref() {
            validate_hand(&catalog, hand)?;
        }
        for (index, event) in self.moves.iter().enumerate() {
            event.validate(&catalog, index)?;
        }
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        Ok(())
    }

    /// Builds the standard catalog seated with the configured player names.
    pub fn catalog(&self) -> Result<Catalog, ValidationError> {
        if self.players.len() != PLAYER_COUNT {
            return Err(invalid(
                "players",
                format!("exactly {PLAYER_COUNT} players are required, found {}", self.players.len()),
            ));
        }
        if let Some(name) = self.players.iter().find(|name| name.trim().is_empty()) {
            return Err(invalid("players", format!("player name '{name}' is blank")));
        }
        let names: [&str; PLAYER_COUNT] = std::array::from_fn(|i| self.players[i].as_str());
        Catalog::standard(&names).map_err(|err| invalid("players", err.to_string()))
    }

    /// Resolve output templates (e.g., `{run_id}` placeholders) into concrete paths.
    /// Without an explicit `outputs.telemetry`, the log lands beside the
    /// event stream as `<run_id>.telemetry.jsonl`.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        let jsonl = resolve_template(&self.run_id, &self.outputs.jsonl);
        let telemetry = match self.outputs.telemetry.as_deref() {
            Some(template) => resolve_template(&self.run_id, template),
            None => jsonl.with_file_name(format!("{}.telemetry.jsonl", self.run_id)),
        };
        ResolvedOutputs {
            snapshot: self
                .outputs
                .snapshot
                .as_deref()
                .map(|template| resolve_template(&self.run_id, template)),
            telemetry,
            jsonl,
        }
    }
}

fn default_players() -> Vec<String> {
    DEFAULT_PLAYER_NAMES.iter().map(|name| name.to_string()).collect()
}

/// One scripted step of a match, seen from the agent's seat.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Another player's resolved card call.
    Call {
        sender: String,
        target: String,
        card: String,
        result: CallResult,
    },
    /// A resolved declaration made by `sender` for their team. A miss carries
    /// the true per-seat counts of the group.
    Declare {
        sender: String,
        group: String,
        result: CallResult,
        #[serde(default)]
        counts: Option<[u8; PLAYER_COUNT]>,
    },
    /// The agent's turn: ask for advice, then report `result` for that call.
    Advise { result: CallResult },
}

impl ScriptEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            ScriptEvent::Call { .. } => "call",
            ScriptEvent::Declare { .. } => "declare",
            ScriptEvent::Advise { .. } => "advise",
        }
    }

    fn validate(&self, catalog: &Catalog, index: usize) -> Result<(), ValidationError> {
        let field = format!("moves[{index}]");
        let resolved = |result: CallResult| {
            if result == CallResult::Unknown {
                Err(invalid(&field, "result must be 'hit' or 'miss'".to_string()))
            } else {
                Ok(())
            }
        };
        match self {
            ScriptEvent::Call {
                sender,
                target,
                card,
                result,
            } => {
                known(&field, "player", sender, catalog.player_by_name(sender))?;
                known(&field, "player", target, catalog.player_by_name(target))?;
                known(&field, "card", card, catalog.card_by_name(card))?;
                resolved(*result)
            }
            ScriptEvent::Declare {
                sender,
                group,
                result,
                counts,
            } => {
                known(&field, "player", sender, catalog.player_by_name(sender))?;
                known(&field, "group", group, catalog.half_suit_by_name(group))?;
                resolved(*result)?;
                if *result == CallResult::Miss && counts.is_none() {
                    return Err(invalid(
                        &field,
                        "a missed declaration needs per-player counts".to_string(),
                    ));
                }
                Ok(())
            }
            ScriptEvent::Advise { result } => resolved(*result),
        }
    }
}

fn known<T>(field: &str, what: &str, name: &str, found: Option<T>) -> Result<(), ValidationError> {
    match found {
        Some(_) => Ok(()),
        None => Err(invalid(field, format!("unknown {what} '{name}'"))),
    }
}

fn validate_hand(catalog: &Catalog, hand: &[String]) -> Result<(), ValidationError> {
    if hand.len() != HAND_SIZE {
        return Err(invalid(
            "hand",
            format!("hand must list exactly {HAND_SIZE} cards, found {}", hand.len()),
        ));
    }
    let mut seen = HashSet::new();
    for name in hand {
        let Some(card) = catalog.card_by_name(name) else {
            return Err(invalid("hand", format!("unknown card '{name}'")));
        };
        if !seen.insert(card) {
            return Err(invalid("hand", format!("card '{name}' listed more than once")));
        }
    }
    Ok(())
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    /// Final belief state as pretty JSON.
    #[serde(default)]
    pub snapshot: Option<String>,
    /// Structured tracing log, written only when `logging.enable_structured` is set.
    #[serde(default)]
    pub telemetry: Option<String>,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        let mut paths = vec![("outputs.jsonl", self.jsonl.as_str())];
        if let Some(snapshot) = self.snapshot.as_deref() {
            paths.push(("outputs.snapshot", snapshot));
        }
        if let Some(telemetry) = self.telemetry.as_deref() {
            paths.push(("outputs.telemetry", telemetry));
        }
        for (label, value) in paths {
            if value.trim().is_empty() {
                return Err(invalid(label, "path must not be empty".to_string()));
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(invalid(label, "resolved path is invalid".to_string()));
            }
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(invalid("run_id", "run_id must not be empty".to_string()));
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(invalid(
            "run_id",
            "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        ));
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{run_id}", run_id))
}

fn invalid(field: &str, message: String) -> ValidationError {
    ValidationError::InvalidField {
        field: field.to_string(),
        message,
    }
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub snapshot: Option<PathBuf>,
    pub telemetry: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
