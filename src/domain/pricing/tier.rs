//! Slider tier positions and the fixed range bands they map to.
//!
//! Every slider in the quote wizard has exactly four positions. A position
//! never exists outside `1..=4`: construction fails fast, so lookups are
//! total over the type.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// A discrete slider position, always within `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TierPosition(u8);

impl TierPosition {
    /// Lowest slider position.
    pub const MIN: u8 = 1;
    /// Highest slider position.
    pub const MAX: u8 = 4;
    /// Position every slider starts at.
    pub const FIRST: TierPosition = TierPosition(1);

    /// Creates a tier position, rejecting anything outside `1..=4`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::OutOfRange` for out-of-range positions.
    pub fn new(position: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&position) {
            Ok(Self(position))
        } else {
            Err(ValidationError::out_of_range(
                "tier_position",
                Self::MIN as i32,
                Self::MAX as i32,
                position as i32,
            ))
        }
    }

    /// Returns the raw slider value.
    pub fn get(self) -> u8 {
        self.0
    }

    /// All positions in ascending order.
    pub fn all() -> [TierPosition; 4] {
        [TierPosition(1), TierPosition(2), TierPosition(3), TierPosition(4)]
    }

    /// Position one step higher, if any.
    pub fn next(self) -> Option<TierPosition> {
        Self::new(self.0 + 1).ok()
    }

    fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl Default for TierPosition {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u8> for TierPosition {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TierPosition> for u8 {
    fn from(position: TierPosition) -> Self {
        position.0
    }
}

impl fmt::Display for TierPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An inclusive numeric band, e.g. 11-50 team members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TierRange {
    pub low: u32,
    pub high: u32,
}

impl TierRange {
    pub const fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    /// Display label such as `"11-50"`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.low, self.high)
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.low..=self.high).contains(&value)
    }
}

impl fmt::Display for TierRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

const TEAM_SIZE: [TierRange; 4] = [
    TierRange::new(1, 10),
    TierRange::new(11, 50),
    TierRange::new(51, 200),
    TierRange::new(201, 1000),
];

const OPERATING_ENTITIES: [TierRange; 4] = [
    TierRange::new(1, 5),
    TierRange::new(6, 20),
    TierRange::new(21, 50),
    TierRange::new(51, 100),
];

const NON_OPERATING_ENTITIES: [TierRange; 4] = [
    TierRange::new(0, 10),
    TierRange::new(11, 50),
    TierRange::new(51, 200),
    TierRange::new(201, 500),
];

const DATA_SOURCES: [TierRange; 4] = [
    TierRange::new(1, 5),
    TierRange::new(6, 15),
    TierRange::new(16, 50),
    TierRange::new(51, 100),
];

/// The four slider lookup tables.
///
/// | Position | Team size | Operating | Non-operating | Data sources |
/// |----------|-----------|-----------|---------------|--------------|
/// | 1 | 1-10 | 1-5 | 0-10 | 1-5 |
/// | 2 | 11-50 | 6-20 | 11-50 | 6-15 |
/// | 3 | 51-200 | 21-50 | 51-200 | 16-50 |
/// | 4 | 201-1000 | 51-100 | 201-500 | 51-100 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierTable {
    TeamSize,
    OperatingEntities,
    NonOperatingEntities,
    DataSources,
}

impl TierTable {
    /// Resolves a slider position to its range band.
    pub fn range(self, position: TierPosition) -> TierRange {
        self.bands()[position.index()]
    }

    /// All four bands in slider order.
    pub fn bands(self) -> &'static [TierRange; 4] {
        match self {
            TierTable::TeamSize => &TEAM_SIZE,
            TierTable::OperatingEntities => &OPERATING_ENTITIES,
            TierTable::NonOperatingEntities => &NON_OPERATING_ENTITIES,
            TierTable::DataSources => &DATA_SOURCES,
        }
    }
}
