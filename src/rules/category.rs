//! Rule categories
//!
//! Every rule carries a [`Category`] bitmask. The aggregate tokens accepted
//! by `-i`/`-x` map to these masks; `all` is the union of every bit.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Serialize, Serializer};

/// Bitmask of rule categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Category(u8);

impl Category {
    pub const NONE: Self = Self(0);
    /// Unfinished text, wording, and general writing issues
    pub const GENERAL: Self = Self(1);
    /// Spacing, punctuation, and number formatting
    pub const TYPOGRAPHY: Self = Self(2);
    /// Visual layout of headers, tables, and lists
    pub const VISUAL: Self = Self(4);
    /// Style conventions of floats and citations
    pub const STYLE: Self = Self(8);
    /// Labels, captions, and cross-reference integrity
    pub const REFERENCE: Self = Self(16);
    pub const ALL: Self = Self(1 | 2 | 4 | 8 | 16);

    const SINGLE: &'static [(&'static str, Category)] = &[
        ("general", Self::GENERAL),
        ("typography", Self::TYPOGRAPHY),
        ("visual", Self::VISUAL),
        ("style", Self::STYLE),
        ("reference", Self::REFERENCE),
    ];

    /// Look up an aggregate token (`all`, `general`, `reference`, ...).
    pub fn from_token(token: &str) -> Option<Self> {
        if token == "all" {
            return Some(Self::ALL);
        }
        Self::SINGLE
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, category)| *category)
    }

    /// Every accepted aggregate token, `all` first.
    pub fn tokens() -> impl Iterator<Item = &'static str> {
        std::iter::once("all").chain(Self::SINGLE.iter().map(|(name, _)| *name))
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when the two masks share at least one bit.
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Names of the single categories set in this mask.
    pub fn names(self) -> Vec<&'static str> {
        Self::SINGLE
            .iter()
            .filter(|(_, category)| self.intersects(*category))
            .map(|(name, _)| *name)
            .collect()
    }
}

impl BitOr for Category {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Category {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        f.write_str(&self.names().join("|"))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
