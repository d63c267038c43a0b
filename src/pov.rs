// Copyright 2026 stickstate Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! POV (hat switch) directions.
//!
//! Devices report a POV as a raw bitmask with one hex digit per cardinal direction: North is
//! `0x1`, South is `0x10`, East is `0x100` and West is `0x1000`. Diagonals are the bitwise OR
//! of two adjacent cardinals. Only nine combinations are valid; anything else means the driver
//! and this crate disagree about the encoding, so decoding refuses it instead of guessing.

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use std::error;
use std::fmt::{self, Display, Formatter};

/// Raw bits of the cardinal directions. Backends that build POV values from separate X/Y hat
/// axes combine these.
///
/// ```
/// use stickstate::pov::raw;
/// use stickstate::PovDirection;
///
/// let value = raw::SOUTH | raw::WEST;
/// assert_eq!(PovDirection::from_raw(value), Ok(PovDirection::SouthWest));
/// ```
pub mod raw {
    pub const CENTERED: i32 = 0x0000;
    pub const NORTH: i32 = 0x0001;
    pub const SOUTH: i32 = 0x0010;
    pub const EAST: i32 = 0x0100;
    pub const WEST: i32 = 0x1000;
}

/// Decoded direction of a POV switch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum PovDirection {
    #[default]
    Centered,
    North,
    South,
    East,
    West,
    NorthEast,
    SouthEast,
    NorthWest,
    SouthWest,
}

impl PovDirection {
    /// Decodes raw POV value.
    ///
    /// Returns `Err` for every value that isn't one of the nine known bit patterns.
    ///
    /// ```
    /// use stickstate::PovDirection;
    ///
    /// assert_eq!(PovDirection::from_raw(0x0101), Ok(PovDirection::NorthEast));
    /// assert!(PovDirection::from_raw(0x0111).is_err());
    /// ```
    pub fn from_raw(raw: i32) -> Result<Self, UnexpectedPovValue> {
        match raw {
            0x0000 => Ok(PovDirection::Centered),
            0x0001 => Ok(PovDirection::North),
            0x0010 => Ok(PovDirection::South),
            0x0100 => Ok(PovDirection::East),
            0x1000 => Ok(PovDirection::West),
            0x0101 => Ok(PovDirection::NorthEast),
            0x0110 => Ok(PovDirection::SouthEast),
            0x1001 => Ok(PovDirection::NorthWest),
            0x1010 => Ok(PovDirection::SouthWest),
            other => Err(UnexpectedPovValue(other)),
        }
    }

    /// Returns raw bitmask for this direction. `from_raw(dir.to_raw())` always yields `dir`.
    pub fn to_raw(self) -> i32 {
        match self {
            PovDirection::Centered => 0x0000,
            PovDirection::North => 0x0001,
            PovDirection::South => 0x0010,
            PovDirection::East => 0x0100,
            PovDirection::West => 0x1000,
            PovDirection::NorthEast => 0x0101,
            PovDirection::SouthEast => 0x0110,
            PovDirection::NorthWest => 0x1001,
            PovDirection::SouthWest => 0x1010,
        }
    }

    pub fn is_centered(self) -> bool {
        self == PovDirection::Centered
    }
}

impl TryFrom<i32> for PovDirection {
    type Error = UnexpectedPovValue;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        PovDirection::from_raw(raw)
    }
}

impl Display for PovDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match *self {
            PovDirection::Centered => "centered",
            PovDirection::North => "north",
            PovDirection::South => "south",
            PovDirection::East => "east",
            PovDirection::West => "west",
            PovDirection::NorthEast => "north-east",
            PovDirection::SouthEast => "south-east",
            PovDirection::NorthWest => "north-west",
            PovDirection::SouthWest => "south-west",
        };

        f.write_str(s)
    }
}

/// Raw POV value reported by device is not one of the known directions.
///
/// This usually means that driver uses different encoding than expected. The offending value is
/// kept so it can be reported.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnexpectedPovValue(pub i32);

impl UnexpectedPovValue {
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl Display for UnexpectedPovValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("unexpected POV value reported by device: {:#06x}", self.0))
    }
}

impl error::Error for UnexpectedPovValue {}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: [(i32, PovDirection); 9] = [
        (0x0000, PovDirection::Centered),
        (0x0001, PovDirection::North),
        (0x0010, PovDirection::South),
        (0x0100, PovDirection::East),
        (0x1000, PovDirection::West),
        (0x0101, PovDirection::NorthEast),
        (0x0110, PovDirection::SouthEast),
        (0x1001, PovDirection::NorthWest),
        (0x1010, PovDirection::SouthWest),
    ];

    #[test]
    fn decode_known_values() {
        for &(raw, dir) in TABLE.iter() {
            assert_eq!(PovDirection::from_raw(raw), Ok(dir));
            assert_eq!(dir.to_raw(), raw);
        }
    }

    #[test]
    fn cardinals_combine_into_diagonals() {
        assert_eq!(
            PovDirection::from_raw(raw::NORTH | raw::EAST),
            Ok(PovDirection::NorthEast)
        );
        assert_eq!(
            PovDirection::from_raw(raw::SOUTH | raw::WEST),
            Ok(PovDirection::SouthWest)
        );
        assert_eq!(
            PovDirection::from_raw(raw::CENTERED),
            Ok(PovDirection::Centered)
        );
    }

    #[test]
    fn unknown_values_are_rejected() {
        for &raw in [0x0111, 0x0011, 0x1100, 0x1111, 0x2, 0x10000, -1, 1 << 20].iter() {
            assert_eq!(PovDirection::from_raw(raw), Err(UnexpectedPovValue(raw)));
        }
    }

    #[test]
    fn unexpected_value_display() {
        let err = PovDirection::try_from(0x0111).unwrap_err();
        assert_eq!(err.value(), 0x0111);
        assert_eq!(
            err.to_string(),
            "unexpected POV value reported by device: 0x0111"
        );
    }
}
