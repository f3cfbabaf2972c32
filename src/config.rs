use std::path::Path;

use crate::error::DecodeError;
use crate::types::ScoreLayout;

/// How relative lengths outside `(0, 1]` are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthPolicy {
    /// Fail the whole batch with `OutOfRangeLength`.
    #[default]
    Reject,
    /// Clamp finite values into `[0, 1]`; a clamped length of 0 decodes to
    /// an empty sequence. NaN is still rejected.
    Clamp,
}

impl LengthPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Clamp => "clamp",
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub blank_id: usize,
    pub layout: ScoreLayout,
    pub length_policy: LengthPolicy,
}

impl DecoderConfig {
    pub const DEFAULT_BLANK_ID: usize = 0;

    pub fn load(path: &Path) -> Result<Self, DecodeError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| DecodeError::io("read decoder config", e))?;
        serde_json::from_str(&data).map_err(|e| DecodeError::json("parse decoder config", e))
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            blank_id: Self::DEFAULT_BLANK_ID,
            layout: ScoreLayout::default(),
            length_policy: LengthPolicy::default(),
        }
    }
}
