// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadrant digits and the addresses built from them.
//!
//! ```text
//! +---+---+
//! | 2 | 3 |
//! +---+---+
//! | 0 | 1 |
//! +---+---+
//! ```
//!
//! Bit 0 of a digit selects the right half, bit 1 the upper half.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::config::MAX_SUPPORTED_DEPTH;
use crate::error::{Result, XzError};

/// One of the four children of a quadtree cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Quadrant {
    /// Digit `0`.
    LowerLeft = 0,
    /// Digit `1`.
    LowerRight = 1,
    /// Digit `2`.
    UpperLeft = 2,
    /// Digit `3`.
    UpperRight = 3,
}

impl Quadrant {
    /// All quadrants in digit order.
    pub const ALL: [Self; 4] = [
        Self::LowerLeft,
        Self::LowerRight,
        Self::UpperLeft,
        Self::UpperRight,
    ];

    /// The quadrant on the given halves.
    pub const fn from_halves(right: bool, upper: bool) -> Self {
        match (right, upper) {
            (false, false) => Self::LowerLeft,
            (true, false) => Self::LowerRight,
            (false, true) => Self::UpperLeft,
            (true, true) => Self::UpperRight,
        }
    }

    /// Whether this is one of the right-hand quadrants.
    pub const fn is_right(self) -> bool {
        (self as u8) & 1 != 0
    }

    /// Whether this is one of the upper quadrants.
    pub const fn is_upper(self) -> bool {
        (self as u8) & 2 != 0
    }

    /// The ASCII digit for this quadrant.
    pub const fn digit(self) -> char {
        (b'0' + self as u8) as char
    }

    /// Parse an ASCII digit.
    pub const fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '0' => Some(Self::LowerLeft),
            '1' => Some(Self::LowerRight),
            '2' => Some(Self::UpperLeft),
            '3' => Some(Self::UpperRight),
            _ => None,
        }
    }
}

/// Path from the domain root to a quadtree cell, as a string of quadrant digits.
///
/// The empty address is the root. Every prefix of an address is itself an
/// address, and ordering is plain lexicographic string order, so a subtree is
/// one contiguous key range in any ordered store.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Address(String);

impl Address {
    /// The root address (empty string).
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Parse an address no deeper than `max_depth`.
    ///
    /// # Errors
    ///
    /// [`XzError::InvalidDigit`] for characters outside `0..=3`,
    /// [`XzError::AddressTooDeep`] when longer than `max_depth`.
    pub fn parse_with_depth(s: &str, max_depth: u8) -> Result<Self> {
        if let Some((position, digit)) = s
            .chars()
            .enumerate()
            .find(|(_, c)| Quadrant::from_digit(*c).is_none())
        {
            return Err(XzError::InvalidDigit { digit, position });
        }
        if s.len() > usize::from(max_depth) {
            return Err(XzError::AddressTooDeep {
                depth: s.len(),
                max_depth,
            });
        }
        Ok(Self(String::from(s)))
    }

    /// Number of digits; the root has depth 0.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the root address.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The digit string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append one level.
    pub fn push(&mut self, quadrant: Quadrant) {
        self.0.push(quadrant.digit());
    }

    /// The address one level below this one.
    #[must_use]
    pub fn child(&self, quadrant: Quadrant) -> Self {
        let mut child = self.clone();
        child.push(quadrant);
        child
    }

    /// The address one level up, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let mut parent = self.clone();
        parent.0.pop()?;
        Some(parent)
    }

    /// The quadrants along the path, root first.
    pub fn quadrants(&self) -> impl DoubleEndedIterator<Item = Quadrant> + '_ {
        self.0.chars().filter_map(Quadrant::from_digit)
    }

    /// Whether this address equals `other` or is one of its ancestors.
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.0.starts_with(&self.0)
    }

    /// The smallest address ordered after every address in this subtree.
    ///
    /// `None` when the subtree runs to the end of the key space, which is the
    /// case for the root and for any address made only of `3`s.
    #[must_use]
    pub fn successor(&self) -> Option<Self> {
        let trimmed = self.0.trim_end_matches('3');
        let last = trimmed.chars().next_back()?;
        let mut next = String::from(&trimmed[..trimmed.len() - 1]);
        next.push(match last {
            '0' => '1',
            '1' => '2',
            _ => '3',
        });
        Some(Self(next))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = XzError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_with_depth(s, MAX_SUPPORTED_DEPTH)
    }
}

impl TryFrom<String> for Address {
    type Error = XzError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl FromIterator<Quadrant> for Address {
    fn from_iter<I: IntoIterator<Item = Quadrant>>(iter: I) -> Self {
        Self(iter.into_iter().map(Quadrant::digit).collect())
    }
}
