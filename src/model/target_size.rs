use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unsupported target size {0}, expected one of 512, 1024 or 2048")]
pub struct UnsupportedTargetSize(pub u32);

/// Output dimensions applied to the cropped region before it is written.
#[derive(Debug, Default, PartialEq, Eq, EnumIter, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TargetSize {
    Square512,
    #[default]
    Square1024,
    Square2048,
}

impl TargetSize {
    pub fn pixels(&self) -> u32 {
        match self {
            TargetSize::Square512 => 512,
            TargetSize::Square1024 => 1024,
            TargetSize::Square2048 => 2048,
        }
    }
}

impl Display for TargetSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {}", self.pixels(), self.pixels())
    }
}

impl TryFrom<u32> for TargetSize {
    type Error = UnsupportedTargetSize;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            512 => Ok(TargetSize::Square512),
            1024 => Ok(TargetSize::Square1024),
            2048 => Ok(TargetSize::Square2048),
            other => Err(UnsupportedTargetSize(other)),
        }
    }
}

impl From<TargetSize> for u32 {
    fn from(size: TargetSize) -> Self {
        size.pixels()
    }
}
