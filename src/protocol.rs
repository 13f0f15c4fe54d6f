#![cfg(feature = "std")]
//! JSON bodies exchanged with HTTP clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::board::BoardSnapshot;
use crate::common::{ShotError, ShotOutcome};
use crate::resolver::Shot;

/// Body of a shot request: `{"row": 3, "col": 4, "result": "hit"}`.
///
/// Fields are kept as raw JSON so that type errors surface as
/// [`ShotError::InvalidCoordinates`] instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShotRequest {
    pub row: Option<Value>,
    pub col: Option<Value>,
    pub result: Option<Value>,
}

impl ShotRequest {
    /// Decode a request body. Anything that is not a JSON object decodes to an
    /// empty request, which then fails coordinate validation.
    pub fn decode(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    pub fn into_shot(self) -> Result<Shot, ShotError> {
        let row = self
            .row
            .as_ref()
            .and_then(integer_coordinate)
            .ok_or(ShotError::InvalidCoordinates)?;
        let col = self
            .col
            .as_ref()
            .and_then(integer_coordinate)
            .ok_or(ShotError::InvalidCoordinates)?;
        let result = self.result.map(|v| match v {
            Value::String(s) => s,
            other => other.to_string(),
        });
        Ok(Shot { row, col, result })
    }
}

/// Accept JSON numbers with no fractional part; reject strings, booleans and
/// non-integers.
fn integer_coordinate(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    pub success: bool,
    pub game_state: BoardSnapshot,
}

impl StateResponse {
    pub fn new(game_state: BoardSnapshot) -> Self {
        Self {
            success: true,
            game_state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotResponse {
    pub success: bool,
    pub result: ShotOutcome,
    pub game_state: BoardSnapshot,
}

impl ShotResponse {
    pub fn new(result: ShotOutcome, game_state: BoardSnapshot) -> Self {
        Self {
            success: true,
            result,
            game_state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl From<&ShotError> for ErrorResponse {
    fn from(err: &ShotError) -> Self {
        Self {
            success: false,
            error: err.to_string(),
        }
    }
}
