//! Outer-totalistic birth/survival rules over the Moore neighborhood.

use crate::{Error, Result};
use itertools::Itertools;
use std::fmt;
use std::str::FromStr;

/// What a rule says about a cell with a given neighbor count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The count is in the birth set: the cell is alive next generation.
    Birth,
    /// The count is only in the survival set: a cell keeps its state.
    Survive,
    /// The count is in neither set.
    Death,
}

/// A rule in `B<digits>/S<digits>` notation, stored as two bitmasks over `0..=8`.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    birth: u16,
    survival: u16,
}

impl Default for Rule {
    fn default() -> Self {
        Rule::conway()
    }
}

impl Rule {
    /// Build a rule from the neighbor counts that cause birth and survival.
    ///
    /// Counts above 8 cannot occur on a square grid and are ignored.
    pub fn new(birth: impl IntoIterator<Item = u8>, survival: impl IntoIterator<Item = u8>) -> Self {
        Rule {
            birth: mask(birth),
            survival: mask(survival),
        }
    }

    /// Conway's Game of Life, B3/S23.
    pub fn conway() -> Self {
        Rule::new([3], [2, 3])
    }

    /// B36/S23.
    pub fn highlife() -> Self {
        Rule::new([3, 6], [2, 3])
    }

    /// B2/S.
    pub fn seeds() -> Self {
        Rule::new([2], [])
    }

    /// B3678/S34678.
    pub fn day_and_night() -> Self {
        Rule::new([3, 6, 7, 8], [3, 4, 6, 7, 8])
    }

    /// Parse a rule string.
    ///
    /// Accepts `B3/S23`, `S23/B3`, `b3s23` and the bare `23/3` form, where the bare
    /// form lists the survival counts first. Anything after two complete sections is
    /// ignored, so `B3S23asd` reads as `B3/S23`.
    pub fn parse(input: &str) -> Result<Self> {
        let text = input.trim().to_ascii_lowercase();
        let bytes = text.as_bytes();
        let rule = match bytes.first() {
            Some(b'b') | Some(b's') => parse_lettered(bytes),
            Some(c) if c.is_ascii_digit() || *c == b'/' => parse_bare(bytes),
            _ => None,
        };
        match rule {
            Some(rule) if rule.birth != 0 || rule.survival != 0 => Ok(rule),
            _ => Err(Error::UnknownRuleFormat(input.to_owned())),
        }
    }

    /// The outcome for a neighbor count, independent of the cell's own state.
    #[inline]
    pub fn apply(&self, neighbors: u8) -> Outcome {
        debug_assert!(neighbors <= 8);
        if self.birth >> neighbors & 1 != 0 {
            Outcome::Birth
        } else if self.survival >> neighbors & 1 != 0 {
            Outcome::Survive
        } else {
            Outcome::Death
        }
    }

    /// Whether a cell is alive in the next generation.
    ///
    /// A birth count makes any cell alive, a survival count keeps the cell as it is and every
    /// other count leaves it dead.
    #[inline]
    pub fn next_state(&self, alive: bool, neighbors: u8) -> bool {
        match self.apply(neighbors) {
            Outcome::Birth => true,
            Outcome::Survive => alive,
            Outcome::Death => false,
        }
    }

    pub fn birth(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=8).filter(move |&n| self.birth >> n & 1 != 0)
    }

    pub fn survival(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=8).filter(move |&n| self.survival >> n & 1 != 0)
    }
}

fn mask(counts: impl IntoIterator<Item = u8>) -> u16 {
    counts
        .into_iter()
        .filter(|&n| n <= 8)
        .fold(0, |mask, n| mask | 1 << n)
}

/// Reads a run of neighbor-count digits starting at `*pos`. A `9` is rejected.
fn digits(bytes: &[u8], pos: &mut usize) -> Option<u16> {
    let mut mask = 0u16;
    while let Some(&c) = bytes.get(*pos) {
        match c {
            b'0'..=b'8' => mask |= 1 << (c - b'0'),
            b'9' => return None,
            _ => break,
        }
        *pos += 1;
    }
    Some(mask)
}

fn parse_lettered(bytes: &[u8]) -> Option<Rule> {
    let first = bytes[0];
    let other = if first == b'b' { b's' } else { b'b' };
    let mut pos = 1;
    let first_mask = digits(bytes, &mut pos)?;
    let second_mask = match bytes.get(pos) {
        None => 0,
        Some(b'/') => {
            if bytes.get(pos + 1) != Some(&other) {
                return None;
            }
            pos += 2;
            digits(bytes, &mut pos)?
        }
        Some(&c) if c == other => {
            pos += 1;
            digits(bytes, &mut pos)?
        }
        Some(_) => return None,
    };
    Some(if first == b'b' {
        Rule {
            birth: first_mask,
            survival: second_mask,
        }
    } else {
        Rule {
            birth: second_mask,
            survival: first_mask,
        }
    })
}

fn parse_bare(bytes: &[u8]) -> Option<Rule> {
    let mut pos = 0;
    let survival = digits(bytes, &mut pos)?;
    if bytes.get(pos) != Some(&b'/') {
        return None;
    }
    pos += 1;
    let birth = digits(bytes, &mut pos)?;
    Some(Rule { birth, survival })
}

impl FromStr for Rule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Rule::parse(s)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "B{}/S{}",
            self.birth().join(""),
            self.survival().join("")
        )
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule({})", self)
    }
}

#[cfg(feature = "serialize")]
impl serde::Serialize for Rule {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serialize")]
impl<'de> serde::Deserialize<'de> for Rule {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Rule::parse(&text).map_err(serde::de::Error::custom)
    }
}
