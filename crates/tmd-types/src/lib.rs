//! Shared value types for the diagnostic criteria engine.
//!
//! These types are deliberately small and free of rule knowledge so that the boundary crate
//! (`tmd-forms`), the fingerprint crate and the engine (`tmd-core`) can all agree on them.

use std::fmt;
use std::str::FromStr;

/// Errors that can occur when parsing shared value types from text.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TypesError {
    /// The input did not name a known examination region
    #[error("unknown region: {0}")]
    UnknownRegion(String),

    /// The input did not name a side
    #[error("unknown side: {0}")]
    UnknownSide(String),

    /// The input was not a `region:side` pair
    #[error("invalid location (expected region:side): {0}")]
    InvalidLocation(String),

    /// The input was not a criterion status
    #[error("unknown criterion status: {0}")]
    UnknownStatus(String),
}

/// Tri-state verdict for a criterion, a location or a whole diagnosis.
///
/// `Pending` means the data needed to decide has not been recorded yet. It is never the same
/// thing as `Negative` and consumers must handle all three cases explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionStatus {
    /// Criterion met.
    Positive,
    /// Criterion evaluated and not met.
    Negative,
    /// Not enough data to decide.
    Pending,
}

impl CriterionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Pending => "pending",
        }
    }

    pub fn is_positive(self) -> bool {
        matches!(self, Self::Positive)
    }

    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Maps a three-valued truth value onto a status: `None` (unknown) becomes `Pending`.
    pub fn from_truth(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Positive,
            Some(false) => Self::Negative,
            None => Self::Pending,
        }
    }
}

impl fmt::Display for CriterionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CriterionStatus {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            "pending" => Ok(Self::Pending),
            other => Err(TypesError::UnknownStatus(other.to_owned())),
        }
    }
}

/// Side of a bilateral structure. Each side is evaluated independently.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Both sides, in evaluation order.
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(TypesError::UnknownSide(other.to_owned())),
        }
    }
}

/// Anatomical examination site.
///
/// The set is fixed; diagnoses restrict themselves to a subset of it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Temporalis,
    Masseter,
    /// Temporomandibular joint, including the area around the lateral pole.
    Tmj,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Temporalis, Region::Masseter, Region::Tmj];

    /// Stable identifier, identical to the serialised form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Temporalis => "temporalis",
            Self::Masseter => "masseter",
            Self::Tmj => "tmj",
        }
    }

    /// Human-readable label for reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Temporalis => "Temporalis",
            Self::Masseter => "Masseter",
            Self::Tmj => "Jaw joint (TMJ)",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "temporalis" => Ok(Self::Temporalis),
            "masseter" => Ok(Self::Masseter),
            "tmj" => Ok(Self::Tmj),
            other => Err(TypesError::UnknownRegion(other.to_owned())),
        }
    }
}

/// A (region, side) pair.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Location {
    pub region: Region,
    pub side: Side,
}

impl Location {
    pub fn new(region: Region, side: Side) -> Self {
        Self { region, side }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.region, self.side)
    }
}

impl FromStr for Location {
    type Err = TypesError;

    /// Parses the `region:side` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (region, side) = s
            .split_once(':')
            .ok_or_else(|| TypesError::InvalidLocation(s.to_owned()))?;
        Ok(Self {
            region: region.parse()?,
            side: side.parse()?,
        })
    }
}
