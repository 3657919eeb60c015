//! Edge sides, edge sets and corner sets.
//!
//! A rectangular part has two long edges (`L1`, `L2`) and two width edges
//! (`W1`, `W2`). `W1` is the front edge and `W2` the back edge; `L1` is the
//! left long edge and `L2` the right one. Corners are named from that
//! orientation (`FL` sits where `W1` meets `L1`).
//!
//! Both [`EdgeSet`] and [`CornerSet`] are bit sets, so a duplicate entry is
//! unrepresentable. They serialize as ordered lists and refuse to deserialize
//! a list that repeats an entry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// One of the four edges of a rectangular part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EdgeSide {
    /// First long edge (left).
    L1,
    /// Second long edge (right).
    L2,
    /// First width edge (front).
    W1,
    /// Second width edge (back).
    W2,
}

impl EdgeSide {
    /// All sides in canonical order.
    pub const ALL: [EdgeSide; 4] = [EdgeSide::L1, EdgeSide::L2, EdgeSide::W1, EdgeSide::W2];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeSide::L1 => "L1",
            EdgeSide::L2 => "L2",
            EdgeSide::W1 => "W1",
            EdgeSide::W2 => "W2",
        }
    }

    /// Returns true for the two long edges.
    pub fn is_long(&self) -> bool {
        matches!(self, EdgeSide::L1 | EdgeSide::L2)
    }

    fn bit(self) -> u8 {
        match self {
            EdgeSide::L1 => 0b0001,
            EdgeSide::L2 => 0b0010,
            EdgeSide::W1 => 0b0100,
            EdgeSide::W2 => 0b1000,
        }
    }
}

impl fmt::Display for EdgeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeSide {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "L1" => Ok(EdgeSide::L1),
            "L2" => Ok(EdgeSide::L2),
            "W1" => Ok(EdgeSide::W1),
            "W2" => Ok(EdgeSide::W2),
            _ => Err(ModelError::UnknownEdge(s.to_string())),
        }
    }
}

/// A set of edge sides without duplicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<EdgeSide>", try_from = "Vec<EdgeSide>")]
pub struct EdgeSet(u8);

impl EdgeSet {
    pub const EMPTY: EdgeSet = EdgeSet(0);
    pub const ALL: EdgeSet = EdgeSet(0b1111);
    /// Both long edges.
    pub const LONG: EdgeSet = EdgeSet(0b0011);
    /// Both width edges.
    pub const WIDTH: EdgeSet = EdgeSet(0b1100);

    pub fn new() -> Self {
        Self::EMPTY
    }

    pub fn single(side: EdgeSide) -> Self {
        EdgeSet(side.bit())
    }

    /// Insert a side. Returns true if it was not already present.
    pub fn insert(&mut self, side: EdgeSide) -> bool {
        let added = !self.contains(side);
        self.0 |= side.bit();
        added
    }

    /// Remove a side. Returns true if it was present.
    pub fn remove(&mut self, side: EdgeSide) -> bool {
        let present = self.contains(side);
        self.0 &= !side.bit();
        present
    }

    pub fn contains(&self, side: EdgeSide) -> bool {
        self.0 & side.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn is_all(&self) -> bool {
        self.0 == Self::ALL.0
    }

    #[must_use]
    pub fn union(self, other: EdgeSet) -> EdgeSet {
        EdgeSet(self.0 | other.0)
    }

    /// Sides in canonical order (`L1`, `L2`, `W1`, `W2`).
    pub fn iter(&self) -> impl Iterator<Item = EdgeSide> + use<> {
        let set = *self;
        EdgeSide::ALL.into_iter().filter(move |side| set.contains(*side))
    }
}

impl FromIterator<EdgeSide> for EdgeSet {
    fn from_iter<I: IntoIterator<Item = EdgeSide>>(iter: I) -> Self {
        let mut set = EdgeSet::new();
        for side in iter {
            set.insert(side);
        }
        set
    }
}

impl Extend<EdgeSide> for EdgeSet {
    fn extend<I: IntoIterator<Item = EdgeSide>>(&mut self, iter: I) {
        for side in iter {
            self.insert(side);
        }
    }
}

impl From<EdgeSide> for EdgeSet {
    fn from(side: EdgeSide) -> Self {
        EdgeSet::single(side)
    }
}

impl From<EdgeSet> for Vec<EdgeSide> {
    fn from(set: EdgeSet) -> Self {
        set.iter().collect()
    }
}

impl TryFrom<Vec<EdgeSide>> for EdgeSet {
    type Error = ModelError;

    fn try_from(sides: Vec<EdgeSide>) -> Result<Self, Self::Error> {
        let mut set = EdgeSet::new();
        for side in sides {
            if !set.insert(side) {
                return Err(ModelError::DuplicateEdge(side));
            }
        }
        Ok(set)
    }
}

impl fmt::Display for EdgeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<&str> = self.iter().map(|side| side.as_str()).collect();
        f.write_str(&names.join(","))
    }
}

/// A corner of a rectangular part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Corner {
    #[serde(rename = "FL")]
    FrontLeft,
    #[serde(rename = "FR")]
    FrontRight,
    #[serde(rename = "BL")]
    BackLeft,
    #[serde(rename = "BR")]
    BackRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::FrontLeft,
        Corner::FrontRight,
        Corner::BackLeft,
        Corner::BackRight,
    ];

    pub fn as_code(&self) -> &'static str {
        match self {
            Corner::FrontLeft => "FL",
            Corner::FrontRight => "FR",
            Corner::BackLeft => "BL",
            Corner::BackRight => "BR",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Corner::FrontLeft => 0b0001,
            Corner::FrontRight => 0b0010,
            Corner::BackLeft => 0b0100,
            Corner::BackRight => 0b1000,
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for Corner {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FL" => Ok(Corner::FrontLeft),
            "FR" => Ok(Corner::FrontRight),
            "BL" => Ok(Corner::BackLeft),
            "BR" => Ok(Corner::BackRight),
            _ => Err(ModelError::UnknownCorner(s.to_string())),
        }
    }
}

/// A set of corners without duplicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Corner>", try_from = "Vec<Corner>")]
pub struct CornerSet(u8);

/// Named corner groups and their shortcode spelling.
const CORNER_GROUPS: [(&str, u8); 5] = [
    ("ALL", 0b1111),
    ("FRONT", 0b0011),
    ("BACK", 0b1100),
    ("LEFT", 0b0101),
    ("RIGHT", 0b1010),
];

impl CornerSet {
    pub const EMPTY: CornerSet = CornerSet(0);
    pub const ALL: CornerSet = CornerSet(0b1111);
    pub const FRONT: CornerSet = CornerSet(0b0011);
    pub const BACK: CornerSet = CornerSet(0b1100);

    pub fn insert(&mut self, corner: Corner) -> bool {
        let added = !self.contains(corner);
        self.0 |= corner.bit();
        added
    }

    pub fn contains(&self, corner: Corner) -> bool {
        self.0 & corner.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Corner> + use<> {
        let set = *self;
        Corner::ALL.into_iter().filter(move |corner| set.contains(*corner))
    }

    /// Shortcode spelling: a group name (`ALL`, `FRONT`, ...), a single corner
    /// (`FL`), or corners joined with `+`.
    pub fn code(&self) -> String {
        if let Some((name, _)) = CORNER_GROUPS.iter().find(|(_, bits)| *bits == self.0) {
            return (*name).to_string();
        }
        let names: Vec<&str> = self.iter().map(|corner| corner.as_code()).collect();
        names.join("+")
    }

    /// Parse a corner code produced by [`CornerSet::code`].
    pub fn parse_code(code: &str) -> Option<CornerSet> {
        let upper = code.trim().to_uppercase();
        if upper.is_empty() {
            return None;
        }
        if let Some((_, bits)) = CORNER_GROUPS.iter().find(|(name, _)| *name == upper) {
            return Some(CornerSet(*bits));
        }
        let mut set = CornerSet::EMPTY;
        for part in upper.split('+') {
            let corner = part.parse::<Corner>().ok()?;
            if !set.insert(corner) {
                return None;
            }
        }
        Some(set)
    }
}

impl FromIterator<Corner> for CornerSet {
    fn from_iter<I: IntoIterator<Item = Corner>>(iter: I) -> Self {
        let mut set = CornerSet::EMPTY;
        for corner in iter {
            set.insert(corner);
        }
        set
    }
}

impl From<CornerSet> for Vec<Corner> {
    fn from(set: CornerSet) -> Self {
        set.iter().collect()
    }
}

impl TryFrom<Vec<Corner>> for CornerSet {
    type Error = ModelError;

    fn try_from(corners: Vec<Corner>) -> Result<Self, Self::Error> {
        let mut set = CornerSet::EMPTY;
        for corner in corners {
            if !set.insert(corner) {
                return Err(ModelError::DuplicateCorner(corner));
            }
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_set_has_no_duplicates() {
        let mut set = EdgeSet::new();
        assert!(set.insert(EdgeSide::L1));
        assert!(!set.insert(EdgeSide::L1));
        assert_eq!(set.len(), 1);
        assert!(set.remove(EdgeSide::L1));
        assert!(set.is_empty());
    }

    #[test]
    fn edge_set_iterates_in_canonical_order() {
        let set: EdgeSet = [EdgeSide::W2, EdgeSide::L1, EdgeSide::W1].into_iter().collect();
        let sides: Vec<EdgeSide> = set.iter().collect();
        assert_eq!(sides, vec![EdgeSide::L1, EdgeSide::W1, EdgeSide::W2]);
        assert_eq!(set.to_string(), "L1,W1,W2");
    }

    #[test]
    fn edge_set_rejects_duplicate_list() {
        let result = EdgeSet::try_from(vec![EdgeSide::L1, EdgeSide::L1]);
        assert_eq!(result, Err(ModelError::DuplicateEdge(EdgeSide::L1)));
    }

    #[test]
    fn edge_side_parses_case_insensitively() {
        assert_eq!("w2".parse::<EdgeSide>().unwrap(), EdgeSide::W2);
        assert!("L3".parse::<EdgeSide>().is_err());
    }

    #[test]
    fn corner_codes() {
        assert_eq!(CornerSet::ALL.code(), "ALL");
        assert_eq!(CornerSet::FRONT.code(), "FRONT");
        let diagonal: CornerSet = [Corner::FrontLeft, Corner::BackRight].into_iter().collect();
        assert_eq!(diagonal.code(), "FL+BR");
        assert_eq!(CornerSet::parse_code("fl+br"), Some(diagonal));
        assert_eq!(CornerSet::parse_code("FL+FL"), None);
        assert_eq!(CornerSet::parse_code("LEFT").map(|c| c.len()), Some(2));
    }
}
