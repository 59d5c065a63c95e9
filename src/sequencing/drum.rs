use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The three drums a pattern can name.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Drum {
    Kick,
    Snare,
    #[cfg_attr(feature = "serde", serde(alias = "hi-hat"))]
    HiHat,
}

impl Drum {
    /// All drums, in grid order (top to bottom: hi-hat, snare, kick).
    pub const ALL: [Drum; 3] = [Drum::HiHat, Drum::Snare, Drum::Kick];

    pub fn name(self) -> &'static str {
        match self {
            Drum::Kick => "kick",
            Drum::Snare => "snare",
            Drum::HiHat => "hihat",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Drum::Kick => 0b001,
            Drum::Snare => 0b010,
            Drum::HiHat => 0b100,
        }
    }
}

impl fmt::Display for Drum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of drums struck (or expected) on one step.
///
/// Stored as a 3-bit mask so records stay `Copy` and comparisons are cheap.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<Drum>", into = "Vec<Drum>"))]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DrumSet(u8);

impl DrumSet {
    pub const EMPTY: DrumSet = DrumSet(0);

    pub fn new() -> Self {
        Self::EMPTY
    }

    pub fn single(drum: Drum) -> Self {
        DrumSet(drum.bit())
    }

    pub fn insert(&mut self, drum: Drum) {
        self.0 |= drum.bit();
    }

    pub fn contains(&self, drum: Drum) -> bool {
        self.0 & drum.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// True when every drum in `other` is also in `self`.
    pub fn is_superset(&self, other: DrumSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Drum> + '_ {
        Drum::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl fmt::Debug for DrumSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Drum> for DrumSet {
    fn from_iter<I: IntoIterator<Item = Drum>>(iter: I) -> Self {
        let mut set = DrumSet::EMPTY;
        for drum in iter {
            set.insert(drum);
        }
        set
    }
}

impl From<&[Drum]> for DrumSet {
    fn from(drums: &[Drum]) -> Self {
        drums.iter().copied().collect()
    }
}

impl From<Vec<Drum>> for DrumSet {
    fn from(drums: Vec<Drum>) -> Self {
        drums.into_iter().collect()
    }
}

impl From<DrumSet> for Vec<Drum> {
    fn from(set: DrumSet) -> Self {
        set.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let mut set = DrumSet::new();
        set.insert(Drum::Kick);
        set.insert(Drum::Kick);

        assert_eq!(set.len(), 1);
        assert!(set.contains(Drum::Kick));
        assert!(!set.contains(Drum::Snare));
    }

    #[test]
    fn superset_allows_extras() {
        let expected: DrumSet = [Drum::Kick, Drum::HiHat].into_iter().collect();
        let struck: DrumSet = [Drum::Kick, Drum::HiHat, Drum::Snare].into_iter().collect();

        assert!(struck.is_superset(expected));
        assert!(!expected.is_superset(struck));
        assert!(struck.is_superset(DrumSet::EMPTY));
    }

    #[test]
    fn iterates_in_grid_order() {
        let set: DrumSet = [Drum::Kick, Drum::HiHat].into_iter().collect();
        let drums: Vec<Drum> = set.iter().collect();

        assert_eq!(drums, vec![Drum::HiHat, Drum::Kick]);
    }
}
