//! Diagram options.
//!
//! Validates a raw JSON options object into the board size and the flatten
//! options. Every recognized key is checked up front so a bad value fails
//! before any flattening starts; unrecognized keys are logged and ignored.
//!
//! Recognized keys:
//!
//! | key               | value                                          | default |
//! |-------------------|------------------------------------------------|---------|
//! | `intersections`   | board size, 1..=52                             | 19      |
//! | `boardRegion`     | region name or `AUTO`                          | `ALL`   |
//! | `showVariations`  | `NEVER`, `ALWAYS`, `MORE_THAN_ONE`             | `NEVER` |
//! | `nextMovesPath`   | treepath string or array of child indices      | empty   |
//! | `startingMoveNum` | positive integer                               | 1       |
//! | `markLastMove`    | boolean                                        | false   |

use serde_json::{Map, Value};

use crate::board::region::{RegionError, RegionSpec};
use crate::flatten::{FlattenOptions, UnknownVariationMode};
use crate::movetree::{NextMoves, TreepathError};

/// Largest board size SGF can describe.
pub const MAX_INTERSECTIONS: u8 = 52;

/// Default board size.
pub const DEFAULT_INTERSECTIONS: u8 = 19;

/// Errors that can occur while validating diagram options.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("options must be a JSON object")]
    NotAnObject,

    #[error("failed to parse options JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid intersections value: {0}")]
    InvalidIntersections(Value),

    #[error("invalid starting move number: {0}")]
    InvalidMoveNumber(Value),

    #[error("invalid value for '{key}': {value}")]
    InvalidValue { key: String, value: Value },

    #[error(transparent)]
    Region(#[from] RegionError),

    #[error(transparent)]
    VariationMode(#[from] UnknownVariationMode),

    #[error(transparent)]
    Treepath(#[from] TreepathError),
}

/// Validated diagram options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramConfig {
    pub intersections: u8,
    pub flatten: FlattenOptions,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        DiagramConfig {
            intersections: DEFAULT_INTERSECTIONS,
            flatten: FlattenOptions::default(),
        }
    }
}

impl DiagramConfig {
    /// Parses and validates options from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Validates options from a parsed JSON value. `null` yields the defaults.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::Null => Ok(DiagramConfig::default()),
            Value::Object(map) => Self::from_map(map),
            _ => Err(ConfigError::NotAnObject),
        }
    }

    fn from_map(map: &Map<String, Value>) -> Result<Self, ConfigError> {
        let mut config = DiagramConfig::default();
        for (key, value) in map {
            match key.as_str() {
                "intersections" => {
                    config.intersections = positive_int(value)
                        .filter(|&n| n <= u64::from(MAX_INTERSECTIONS))
                        .and_then(|n| u8::try_from(n).ok())
                        .ok_or_else(|| ConfigError::InvalidIntersections(value.clone()))?;
                }
                "boardRegion" => {
                    config.flatten.region = expect_str(key, value)?.parse::<RegionSpec>()?;
                }
                "showVariations" => {
                    config.flatten.show_variations = expect_str(key, value)?.parse()?;
                }
                "nextMovesPath" => {
                    let next_moves: NextMoves =
                        serde_json::from_value(value.clone()).map_err(|_| ConfigError::InvalidValue {
                            key: key.clone(),
                            value: value.clone(),
                        })?;
                    next_moves.decode()?;
                    config.flatten.next_moves = next_moves;
                }
                "startingMoveNum" => {
                    config.flatten.starting_move_num = positive_int(value)
                        .and_then(|n| u32::try_from(n).ok())
                        .ok_or_else(|| ConfigError::InvalidMoveNumber(value.clone()))?;
                }
                "markLastMove" => {
                    config.flatten.mark_last_move = value.as_bool().ok_or_else(|| ConfigError::InvalidValue {
                        key: key.clone(),
                        value: value.clone(),
                    })?;
                }
                other => {
                    tracing::warn!(key = other, "ignoring unknown option");
                }
            }
        }
        Ok(config)
    }
}

/// Reads a positive integer given either as a JSON number or a numeric string.
fn positive_int(value: &Value) -> Option<u64> {
    let n = match value {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    (n > 0).then_some(n)
}

fn expect_str<'v>(key: &str, value: &'v Value) -> Result<&'v str, ConfigError> {
    value.as_str().ok_or_else(|| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.clone(),
    })
}
