//! Inclusive frame range value object.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HuskError;

/// Lowest frame the farm accepts.
pub const MIN_FRAME: i64 = -65535;
/// Highest frame the farm accepts.
pub const MAX_FRAME: i64 = 65535;

/// Inclusive `start-end` frame range. `end >= start` always holds, and both
/// ends lie within `MIN_FRAME..=MAX_FRAME`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FrameRange {
    start: i64,
    end: i64,
}

impl FrameRange {
    pub fn new(start: i64, end: i64) -> Result<Self, HuskError> {
        let invalid = |reason: String| HuskError::InvalidFrameRange {
            value: format!("{}-{}", start, end),
            reason,
        };
        if end < start {
            return Err(invalid(
                "End Frame must be higher than Start Frame".to_string(),
            ));
        }
        if start < MIN_FRAME || end > MAX_FRAME {
            return Err(invalid(format!(
                "frames must lie within {} and {}",
                MIN_FRAME, MAX_FRAME
            )));
        }
        Ok(Self { start, end })
    }

    /// Build a range from layer time codes, which may be fractional.
    pub fn from_time_codes(start: f64, end: f64) -> Result<Self, HuskError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(HuskError::InvalidFrameRange {
                value: format!("{}-{}", start, end),
                reason: "time codes must be finite".to_string(),
            });
        }
        // Saturating casts; out-of-range values are rejected by `new`.
        Self::new(start.floor() as i64, end.ceil() as i64)
    }

    pub fn single(frame: i64) -> Self {
        Self {
            start: frame,
            end: frame,
        }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// Number of frames in the range (at least 1).
    pub fn len(&self) -> u64 {
        self.end.abs_diff(self.start) + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn frames(&self) -> impl Iterator<Item = i64> {
        self.start..=self.end
    }
}

impl fmt::Display for FrameRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for FrameRange {
    type Err = HuskError;

    /// Parses `1001-1250`, `-10--1`, `-5-5` or a single frame `42`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = |reason: &str| HuskError::InvalidFrameRange {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        if text.is_empty() {
            return Err(invalid("empty"));
        }

        // Skip a leading sign so "-10--1" splits on the separator dash.
        let split_at = text
            .char_indices()
            .skip(1)
            .find(|(_, c)| *c == '-')
            .map(|(i, _)| i);

        let (start, end) = match split_at {
            Some(i) => (&text[..i], &text[i + 1..]),
            None => (text, text),
        };

        let start: i64 = start
            .trim()
            .parse()
            .map_err(|_| invalid("start is not an integer"))?;
        let end: i64 = end
            .trim()
            .parse()
            .map_err(|_| invalid("end is not an integer"))?;

        Self::new(start, end)
    }
}

impl TryFrom<String> for FrameRange {
    type Error = HuskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FrameRange> for String {
    fn from(range: FrameRange) -> Self {
        range.to_string()
    }
}
