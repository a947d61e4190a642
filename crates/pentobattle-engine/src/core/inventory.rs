use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::shape::ShapeKind;
use crate::UnknownShapeError;

/// Multiset of shapes a player still holds.
///
/// Written as a string of shape letters (`"FILX"`). Order is preserved but
/// carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Inventory {
    shapes: Vec<ShapeKind>,
}

impl Inventory {
    #[must_use]
    pub fn new(shapes: impl IntoIterator<Item = ShapeKind>) -> Self {
        Self {
            shapes: shapes.into_iter().collect(),
        }
    }

    /// One of each shape.
    #[must_use]
    pub fn full_set() -> Self {
        Self::new(ShapeKind::ALL)
    }

    #[must_use]
    pub fn shapes(&self) -> &[ShapeKind] {
        &self.shapes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[must_use]
    pub fn contains(&self, shape: ShapeKind) -> bool {
        self.shapes.contains(&shape)
    }

    /// Set of distinct shapes as a bit mask (see [`ShapeKind::bit`]).
    #[must_use]
    pub fn shape_mask(&self) -> u16 {
        self.shapes.iter().fold(0, |mask, s| mask | s.bit())
    }

    /// Distinct shapes in order of first appearance.
    pub fn distinct(&self) -> impl Iterator<Item = ShapeKind> + '_ {
        let mut seen = 0u16;
        self.shapes.iter().copied().filter(move |s| {
            let new = seen & s.bit() == 0;
            seen |= s.bit();
            new
        })
    }

    pub fn push(&mut self, shape: ShapeKind) {
        self.shapes.push(shape);
    }

    /// Removes one instance of `shape`. Returns `false` if none was held.
    pub fn remove(&mut self, shape: ShapeKind) -> bool {
        match self.shapes.iter().position(|&s| s == shape) {
            Some(index) => {
                self.shapes.remove(index);
                true
            }
            None => false,
        }
    }

    /// Copy with one instance of `shape` removed.
    #[must_use]
    pub fn without(&self, shape: ShapeKind) -> Self {
        let mut next = self.clone();
        next.remove(shape);
        next
    }
}

impl FromIterator<ShapeKind> for Inventory {
    fn from_iter<T: IntoIterator<Item = ShapeKind>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for shape in &self.shapes {
            write!(f, "{shape}")?;
        }
        Ok(())
    }
}

impl FromStr for Inventory {
    type Err = UnknownShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(ShapeKind::try_from)
            .collect()
    }
}

impl From<Inventory> for String {
    fn from(inventory: Inventory) -> Self {
        inventory.to_string()
    }
}

impl TryFrom<String> for Inventory {
    type Error = UnknownShapeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
