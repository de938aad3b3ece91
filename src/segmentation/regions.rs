//! Triangular partition of a square tile into its four edge regions
//!
//! Each pixel is classified by the signs of its offsets from the main diagonal
//! (`row - col`) and the anti-diagonal (`row - (height - 1 - col)`), combined
//! with a half-plane test against the tile center. Pixels lying exactly on either
//! diagonal belong to no region, so the masks are pairwise disjoint and their
//! union is the grid minus the diagonal boundary.

use bitvec::prelude::*;
use serde::Serialize;
use std::fmt;

/// One of the four faces of a tile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Direction {
    /// Top face
    North,
    /// Right face
    East,
    /// Bottom face
    South,
    /// Left face
    West,
}

impl Direction {
    /// All directions in output column order
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Position of this direction in output column order
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Single-letter label used in logs and reports
    pub const fn label(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Boolean membership mask over a tile's pixel grid, stored row-major
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionMask {
    bits: BitVec,
    height: usize,
    width: usize,
}

impl RegionMask {
    /// Create a mask with no pixels selected
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            bits: bitvec![0; height * width],
            height,
            width,
        }
    }

    /// Create a mask selecting every pixel
    pub fn full(height: usize, width: usize) -> Self {
        Self {
            bits: bitvec![1; height * width],
            height,
            width,
        }
    }

    /// Mask dimensions as (height, width)
    pub const fn dim(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Whether the pixel at (row, col) is selected; out-of-bounds is never selected
    pub fn contains(&self, row: usize, col: usize) -> bool {
        if row >= self.height || col >= self.width {
            return false;
        }
        self.bits
            .get(row * self.width + col)
            .is_some_and(|bit| *bit)
    }

    /// Select the pixel at (row, col); out-of-bounds positions are ignored
    pub fn insert(&mut self, row: usize, col: usize) {
        if row < self.height && col < self.width {
            self.bits.set(row * self.width + col, true);
        }
    }

    /// Number of selected pixels
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Whether no pixel is selected
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Selected positions as (row, col) in row-major order
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width.max(1);
        self.bits
            .iter_ones()
            .map(move |index| (index / width, index % width))
    }

    /// Whether this mask and `other` share no selected pixel position
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.bits
            .iter_ones()
            .all(|index| !other.bits.get(index).is_some_and(|bit| *bit))
    }
}

/// The four directional masks of one tile
#[derive(Clone, Debug)]
pub struct RegionMasks {
    masks: [RegionMask; 4],
}

impl RegionMasks {
    /// Mask for a direction
    pub const fn get(&self, direction: Direction) -> &RegionMask {
        let [north, east, south, west] = &self.masks;
        match direction {
            Direction::North => north,
            Direction::East => east,
            Direction::South => south,
            Direction::West => west,
        }
    }

    /// Masks paired with their direction, in N, E, S, W order
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &RegionMask)> {
        Direction::ALL.into_iter().zip(self.masks.iter())
    }
}

/// Classify one pixel of a `height` x `width` grid
///
/// Returns `None` for pixels on either diagonal. On a non-square grid the
/// diagonals follow the height, so a wide band of pixels fails every half-plane
/// test and stays unassigned: an 8x16 grid leaves 28 of 128 pixels out, and a
/// tall grid can leave a whole face empty.
pub const fn classify_pixel(
    row: usize,
    col: usize,
    height: usize,
    width: usize,
) -> Option<Direction> {
    let (r, c, h) = (row as i64, col as i64, height as i64);
    let main_diag = r - c;
    let anti_diag = r - (h - 1 - c);

    if row < height / 2 && main_diag < 0 && anti_diag < 0 {
        Some(Direction::North)
    } else if col >= width / 2 && main_diag < 0 && anti_diag > 0 {
        Some(Direction::East)
    } else if row >= height / 2 && main_diag > 0 && anti_diag > 0 {
        Some(Direction::South)
    } else if col < width / 2 && main_diag > 0 && anti_diag < 0 {
        Some(Direction::West)
    } else {
        None
    }
}

/// Partition a `height` x `width` grid into its four directional masks
pub fn segment(height: usize, width: usize) -> RegionMasks {
    let mut masks = [
        RegionMask::new(height, width),
        RegionMask::new(height, width),
        RegionMask::new(height, width),
        RegionMask::new(height, width),
    ];

    for row in 0..height {
        for col in 0..width {
            if let Some(direction) = classify_pixel(row, col, height, width) {
                if let Some(mask) = masks.get_mut(direction.index()) {
                    mask.insert(row, col);
                }
            }
        }
    }

    RegionMasks { masks }
}

/// Number of pixels lying on either diagonal of a `size` x `size` grid
///
/// For even sizes the diagonals never cross on a pixel, giving `2 * size`.
pub const fn diagonal_boundary_len(size: usize) -> usize {
    if size % 2 == 0 {
        2 * size
    } else {
        (2 * size).saturating_sub(1)
    }
}
