//! Per-tile pattern assignments and the whitespace-separated output file
//!
//! One line per tile in ascending tile id order:
//!
//! ```text
//! <tile_id> <north> <east> <south> <west>
//! ```
//!
//! Lines starting with `#` and blank lines are comments. Column order is a
//! contract with downstream solvers and format converters.

use crate::io::error::{Result, WithPath, malformed_assignment};
use crate::matching::{PatternId, UNMATCHED};
use crate::segmentation::Direction;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Pattern ids of one tile, indexed by [`Direction::index`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatternAssignment {
    /// Tile identifier
    pub tile_id: u32,
    /// Patterns in N, E, S, W order
    pub patterns: [PatternId; 4],
}

impl PatternAssignment {
    /// Assignment with every face unmatched
    pub const fn unmatched(tile_id: u32) -> Self {
        Self {
            tile_id,
            patterns: [UNMATCHED; 4],
        }
    }

    /// Pattern on one face
    pub const fn get(&self, direction: Direction) -> PatternId {
        let [north, east, south, west] = self.patterns;
        match direction {
            Direction::North => north,
            Direction::East => east,
            Direction::South => south,
            Direction::West => west,
        }
    }

    /// Set the pattern on one face
    pub fn set(&mut self, direction: Direction, pattern: PatternId) {
        if let Some(slot) = self.patterns.get_mut(direction.index()) {
            *slot = pattern;
        }
    }
}

/// Assignments keyed and iterated by ascending tile id
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssignmentTable {
    tiles: BTreeMap<u32, [PatternId; 4]>,
}

impl AssignmentTable {
    /// Create an empty table
    pub const fn new() -> Self {
        Self {
            tiles: BTreeMap::new(),
        }
    }

    /// Add or replace a tile's assignment
    pub fn insert(&mut self, assignment: PatternAssignment) {
        self.tiles.insert(assignment.tile_id, assignment.patterns);
    }

    /// Assignment for a tile
    pub fn get(&self, tile_id: u32) -> Option<PatternAssignment> {
        self.tiles.get(&tile_id).map(|&patterns| PatternAssignment {
            tile_id,
            patterns,
        })
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the table has no tiles
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Assignments in ascending tile id order
    pub fn iter(&self) -> impl Iterator<Item = PatternAssignment> + '_ {
        self.tiles
            .iter()
            .map(|(&tile_id, &patterns)| PatternAssignment { tile_id, patterns })
    }

    /// Occurrences of each pattern id over every face of every tile
    pub fn pattern_usage(&self) -> BTreeMap<PatternId, usize> {
        let mut usage = BTreeMap::new();
        for patterns in self.tiles.values() {
            for &pattern in patterns {
                *usage.entry(pattern).or_insert(0) += 1;
            }
        }
        usage
    }

    /// Write the table, preceded by `header` lines prefixed with `# `
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `writer` fails
    pub fn write_to<W: Write>(&self, writer: &mut W, header: &[&str]) -> Result<()> {
        for line in header {
            writeln!(writer, "# {line}")?;
        }
        if !header.is_empty() {
            writeln!(writer)?;
        }
        for assignment in self.iter() {
            let [n, e, s, w] = assignment.patterns;
            writeln!(writer, "{} {n} {e} {s} {w}", assignment.tile_id)?;
        }
        Ok(())
    }

    /// Write the table to a file, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created or written
    pub fn save(&self, path: &Path, header: &[&str]) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
        }
        let file = File::create(path).with_path(path, "create file")?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer, header)
            .with_path(path, "write assignments")?;
        writer.flush().with_path(path, "write assignments")?;
        Ok(())
    }

    /// Parse a table, skipping blank and `#` lines
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails, or a line does not hold exactly five
    /// integers, or a tile id appears twice
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = Self::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let assignment = parse_line(trimmed, index + 1)?;
            if table.tiles.contains_key(&assignment.tile_id) {
                return Err(malformed_assignment(
                    index + 1,
                    &format!("duplicate tile id {}", assignment.tile_id),
                ));
            }
            table.insert(assignment);
        }
        Ok(table)
    }

    /// Parse a table from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or contains a malformed line
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_path(path, "open file")?;
        Self::read_from(BufReader::new(file)).with_path(path, "read assignments")
    }
}

impl FromIterator<PatternAssignment> for AssignmentTable {
    fn from_iter<I: IntoIterator<Item = PatternAssignment>>(iter: I) -> Self {
        let mut table = Self::new();
        for assignment in iter {
            table.insert(assignment);
        }
        table
    }
}

fn parse_line(line: &str, line_number: usize) -> Result<PatternAssignment> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [tile, n, e, s, w] = fields.as_slice() else {
        return Err(malformed_assignment(
            line_number,
            &format!("expected 5 fields, found {}", fields.len()),
        ));
    };

    let tile_id = tile
        .parse::<u32>()
        .map_err(|e| malformed_assignment(line_number, &format!("tile id '{tile}': {e}")))?;

    let mut patterns = [UNMATCHED; 4];
    for (slot, field) in patterns.iter_mut().zip([n, e, s, w]) {
        let pattern = field.parse::<PatternId>().map_err(|e| {
            malformed_assignment(line_number, &format!("pattern '{field}': {e}"))
        })?;
        if pattern < UNMATCHED {
            return Err(malformed_assignment(
                line_number,
                &format!("pattern {pattern} is below {UNMATCHED}"),
            ));
        }
        *slot = pattern;
    }

    Ok(PatternAssignment { tile_id, patterns })
}
