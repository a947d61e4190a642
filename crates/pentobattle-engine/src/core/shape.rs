use std::{fmt, sync::LazyLock};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::UnknownShapeError;

/// One of the twelve free pentominoes.
///
/// Shapes are named after the letters they resemble. The discriminant doubles
/// as the index into the shape tables and as the bit position in shape masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
#[repr(u8)]
pub enum ShapeKind {
    F = 0,
    I = 1,
    L = 2,
    N = 3,
    P = 4,
    T = 5,
    U = 6,
    V = 7,
    W = 8,
    X = 9,
    Y = 10,
    Z = 11,
}

impl ShapeKind {
    /// Number of shape kinds (12).
    pub const LEN: usize = 12;

    /// All shape kinds in table order.
    pub const ALL: [Self; Self::LEN] = [
        Self::F,
        Self::I,
        Self::L,
        Self::N,
        Self::P,
        Self::T,
        Self::U,
        Self::V,
        Self::W,
        Self::X,
        Self::Y,
        Self::Z,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Bit of this shape in a `u16` shape mask.
    #[must_use]
    pub const fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// Returns the letter of this shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use pentobattle_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::X.as_char(), 'X');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::F => 'F',
            Self::I => 'I',
            Self::L => 'L',
            Self::N => 'N',
            Self::P => 'P',
            Self::T => 'T',
            Self::U => 'U',
            Self::V => 'V',
            Self::W => 'W',
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
        }
    }

    /// Parses a shape from its letter. Lowercase letters are accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use pentobattle_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_char('t'), Some(ShapeKind::T));
    /// assert_eq!(ShapeKind::from_char('O'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'F' => Some(Self::F),
            'I' => Some(Self::I),
            'L' => Some(Self::L),
            'N' => Some(Self::N),
            'P' => Some(Self::P),
            'T' => Some(Self::T),
            'U' => Some(Self::U),
            'V' => Some(Self::V),
            'W' => Some(Self::W),
            'X' => Some(Self::X),
            'Y' => Some(Self::Y),
            'Z' => Some(Self::Z),
            _ => None,
        }
    }

    /// Canonical (un-rotated, un-mirrored) cell offsets of this shape.
    #[must_use]
    pub const fn canonical_offsets(self) -> [(i8, i8); 5] {
        CANONICAL_OFFSETS[self as usize]
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl From<ShapeKind> for char {
    fn from(shape: ShapeKind) -> Self {
        shape.as_char()
    }
}

impl TryFrom<char> for ShapeKind {
    type Error = UnknownShapeError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c).ok_or(UnknownShapeError(c))
    }
}

// Offsets are (x, y) with y growing downward.
const CANONICAL_OFFSETS: [[(i8, i8); 5]; ShapeKind::LEN] = [
    // F: .##
    //    ##.
    //    .#.
    [(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    // I
    [(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)],
    // L
    [(0, 0), (0, 1), (0, 2), (0, 3), (1, 3)],
    // N
    [(1, 0), (1, 1), (0, 2), (1, 2), (0, 3)],
    // P
    [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)],
    // T
    [(0, 0), (1, 0), (2, 0), (1, 1), (1, 2)],
    // U
    [(0, 0), (2, 0), (0, 1), (1, 1), (2, 1)],
    // V
    [(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)],
    // W
    [(0, 0), (0, 1), (1, 1), (1, 2), (2, 2)],
    // X
    [(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)],
    // Y
    [(1, 0), (0, 1), (1, 1), (1, 2), (1, 3)],
    // Z
    [(0, 0), (1, 0), (1, 1), (1, 2), (2, 2)],
];

/// Non-negative offset of one cell inside an [`Orientation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Offset {
    pub dx: u8,
    pub dy: u8,
}

/// A shape after rotation and optional mirroring, shifted so that its minimum
/// x and y are 0.
///
/// Offsets are kept sorted, so two orientations are the same placement
/// pattern exactly when they compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orientation {
    offsets: [Offset; 5],
    width: u8,
    height: u8,
}

impl Orientation {
    #[expect(clippy::cast_sign_loss)]
    fn normalized(points: [(i8, i8); 5]) -> Self {
        let min_x = points.iter().fold(i8::MAX, |acc, &(x, _)| acc.min(x));
        let min_y = points.iter().fold(i8::MAX, |acc, &(_, y)| acc.min(y));
        let mut offsets = points.map(|(x, y)| Offset {
            dx: (x - min_x) as u8,
            dy: (y - min_y) as u8,
        });
        offsets.sort_unstable();
        let width = offsets.iter().map(|o| o.dx).fold(0, u8::max) + 1;
        let height = offsets.iter().map(|o| o.dy).fold(0, u8::max) + 1;
        Self {
            offsets,
            width,
            height,
        }
    }

    #[must_use]
    pub fn offsets(&self) -> &[Offset; 5] {
        &self.offsets
    }

    #[must_use]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u8 {
        self.height
    }
}

fn rotate90((x, y): (i8, i8)) -> (i8, i8) {
    (y, -x)
}

fn mirror((x, y): (i8, i8)) -> (i8, i8) {
    (-x, y)
}

/// Applies `rotation` quarter turns, then an optional mirror, then normalizes.
#[must_use]
pub fn transform(shape: ShapeKind, rotation: u8, mirrored: bool) -> Orientation {
    let mut points = shape.canonical_offsets();
    for _ in 0..rotation % 4 {
        points = points.map(rotate90);
    }
    if mirrored {
        points = points.map(mirror);
    }
    Orientation::normalized(points)
}

/// Deduplicated orientations of one shape.
///
/// Rotation-only orientations come first, so an orientation index refers to
/// the same pattern whether or not mirrored orientations are allowed.
#[derive(Debug, Clone)]
pub struct ShapeOrientations {
    orientations: ArrayVec<Orientation, 8>,
    rotation_only: usize,
}

impl ShapeOrientations {
    fn build(shape: ShapeKind) -> Self {
        let mut orientations = ArrayVec::<Orientation, 8>::new();
        let mut rotation_only = 0;
        for mirrored in [false, true] {
            for rotation in 0..4 {
                let orientation = transform(shape, rotation, mirrored);
                if !orientations.contains(&orientation) {
                    orientations.push(orientation);
                }
            }
            if !mirrored {
                rotation_only = orientations.len();
            }
        }
        Self {
            orientations,
            rotation_only,
        }
    }

    #[must_use]
    pub fn get(&self, allow_mirror: bool) -> &[Orientation] {
        if allow_mirror {
            &self.orientations
        } else {
            &self.orientations[..self.rotation_only]
        }
    }
}

static STANDARD_LIBRARY: LazyLock<ShapeLibrary> = LazyLock::new(ShapeLibrary::new);

/// Immutable registry of every shape's orientation set.
///
/// Built once; [`ShapeLibrary::standard`] hands out a process-wide instance that
/// the move generator and the search borrow.
#[derive(Debug, Clone)]
pub struct ShapeLibrary {
    shapes: [ShapeOrientations; ShapeKind::LEN],
}

impl Default for ShapeLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self {
            shapes: ShapeKind::ALL.map(ShapeOrientations::build),
        }
    }

    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD_LIBRARY
    }

    #[must_use]
    pub fn orientations(&self, shape: ShapeKind, allow_mirror: bool) -> &[Orientation] {
        self.shapes[shape.index()].get(allow_mirror)
    }

    #[must_use]
    pub fn orientation(&self, shape: ShapeKind, index: u8) -> Option<&Orientation> {
        self.orientations(shape, true).get(usize::from(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_orientation_counts() {
        let library = ShapeLibrary::new();
        let expected = [
            (ShapeKind::F, 8),
            (ShapeKind::I, 2),
            (ShapeKind::L, 8),
            (ShapeKind::N, 8),
            (ShapeKind::P, 8),
            (ShapeKind::T, 4),
            (ShapeKind::U, 4),
            (ShapeKind::V, 4),
            (ShapeKind::W, 4),
            (ShapeKind::X, 1),
            (ShapeKind::Y, 8),
            (ShapeKind::Z, 4),
        ];
        for (shape, count) in expected {
            assert_eq!(
                library.orientations(shape, true).len(),
                count,
                "free orientations of {shape}"
            );
        }
        let total: usize = ShapeKind::ALL
            .iter()
            .map(|&s| library.orientations(s, true).len())
            .sum();
        assert_eq!(total, 63);
    }

    #[test]
    fn test_rotation_only_counts() {
        let library = ShapeLibrary::new();
        assert_eq!(library.orientations(ShapeKind::Z, false).len(), 2);
        assert_eq!(library.orientations(ShapeKind::I, false).len(), 2);
        assert_eq!(library.orientations(ShapeKind::X, false).len(), 1);
        assert_eq!(library.orientations(ShapeKind::F, false).len(), 4);
        let total: usize = ShapeKind::ALL
            .iter()
            .map(|&s| library.orientations(s, false).len())
            .sum();
        assert_eq!(total, 41);
    }

    #[test]
    fn test_rotation_only_is_prefix() {
        let library = ShapeLibrary::new();
        for shape in ShapeKind::ALL {
            let free = library.orientations(shape, true);
            let fixed = library.orientations(shape, false);
            assert_eq!(&free[..fixed.len()], fixed);
        }
    }

    #[test]
    fn test_orientations_are_normalized() {
        let library = ShapeLibrary::new();
        for shape in ShapeKind::ALL {
            for orientation in library.orientations(shape, true) {
                let offsets = orientation.offsets();
                assert_eq!(offsets.iter().map(|o| o.dx).min(), Some(0));
                assert_eq!(offsets.iter().map(|o| o.dy).min(), Some(0));
                assert!(offsets.windows(2).all(|w| w[0] < w[1]), "{shape}: {offsets:?}");
                assert!(orientation.width() * orientation.height() >= 5);
            }
        }
    }

    #[test]
    fn test_full_turn_is_identity() {
        for shape in ShapeKind::ALL {
            assert_eq!(transform(shape, 0, false), transform(shape, 4, false));
            assert_eq!(transform(shape, 1, true), transform(shape, 5, true));
        }
    }

    #[test]
    fn test_shape_char_conversion() {
        for shape in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_char(shape.as_char()), Some(shape));
            assert_eq!(ShapeKind::try_from(shape.as_char()), Ok(shape));
        }
        assert_eq!(ShapeKind::try_from('Q'), Err(UnknownShapeError('Q')));
    }

    #[test]
    fn test_shape_serialization() {
        let json = serde_json::to_string(&ShapeKind::W).unwrap();
        assert_eq!(json, "\"W\"");
        let shape: ShapeKind = serde_json::from_str("\"n\"").unwrap();
        assert_eq!(shape, ShapeKind::N);
        assert!(serde_json::from_str::<ShapeKind>("\"O\"").is_err());
    }
}
