//! Leitner box numbers
//!
//! A card's box is its mastery tier. Box 1 holds new or recently failed cards
//! and is reviewed daily; box 7 holds the best-known cards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LeitnerError;

/// Review delay in days for boxes 1 through 7
const DELAYS: [i64; 7] = [1, 2, 4, 7, 15, 30, 60];

/// A box number, guaranteed to be within 1..=7
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct BoxNumber(u8);

impl BoxNumber {
    pub const FIRST: BoxNumber = BoxNumber(1);
    pub const LAST: BoxNumber = BoxNumber(7);
    pub const COUNT: usize = 7;

    /// Create a box number, failing outside 1..=7
    pub fn new(number: i64) -> Result<Self, LeitnerError> {
        if (1..=Self::COUNT as i64).contains(&number) {
            Ok(Self(number as u8))
        } else {
            Err(LeitnerError::InvalidBox(number))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Number of days a card waits in this box before it is due again
    pub fn delay_days(self) -> i64 {
        DELAYS[(self.0 - 1) as usize]
    }

    /// The next box up, staying at the last box
    pub fn promoted(self) -> Self {
        Self((self.0 + 1).min(Self::LAST.0))
    }

    /// All boxes in ascending order
    pub fn all() -> impl Iterator<Item = BoxNumber> {
        (Self::FIRST.0..=Self::LAST.0).map(BoxNumber)
    }
}

impl Default for BoxNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<i64> for BoxNumber {
    type Error = LeitnerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BoxNumber> for i64 {
    fn from(number: BoxNumber) -> Self {
        number.0 as i64
    }
}

impl FromStr for BoxNumber {
    type Err = LeitnerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: i64 = s
            .trim()
            .parse()
            .map_err(|_| LeitnerError::Validation(format!("Not a box number: '{}'", s)))?;
        Self::new(number)
    }
}

impl fmt::Display for BoxNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
