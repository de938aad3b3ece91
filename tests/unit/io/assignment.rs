//! Tests for the assignment table and its text format

#[cfg(test)]
mod tests {
    use edgemotif::ExtractionError;
    use edgemotif::io::assignment::{AssignmentTable, PatternAssignment};
    use edgemotif::segmentation::Direction;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn sample_table() -> AssignmentTable {
        [
            PatternAssignment {
                tile_id: 12,
                patterns: [3, -1, 0, 7],
            },
            PatternAssignment {
                tile_id: 2,
                patterns: [0, 0, 5, 5],
            },
            PatternAssignment {
                tile_id: 7,
                patterns: [1, 2, 3, 4],
            },
        ]
        .into_iter()
        .collect()
    }

    // Tests the exact line format and ascending tile order
    // Verified by writing tiles in insertion order
    #[test]
    fn test_write_format() {
        let mut buffer = Vec::new();
        assert!(sample_table().write_to(&mut buffer, &[]).is_ok());

        let text = String::from_utf8(buffer).unwrap_or_default();
        assert_eq!(text, "2 0 0 5 5\n7 1 2 3 4\n12 3 -1 0 7\n");
    }

    // Tests that header lines are commented and separated by a blank line
    // Verified by omitting the comment prefix
    #[test]
    fn test_write_header() {
        let mut buffer = Vec::new();
        assert!(
            sample_table()
                .write_to(&mut buffer, &["Format: tile_id north east south west"])
                .is_ok()
        );

        let text = String::from_utf8(buffer).unwrap_or_default();
        assert!(text.starts_with("# Format: tile_id north east south west\n\n2 0 0 5 5\n"));
    }

    // Tests that writing then parsing reproduces the tuples in order
    // Verified by swapping the east and west columns on write
    #[test]
    fn test_file_round_trip() {
        let Ok(dir) = TempDir::new() else {
            unreachable!("temporary directory");
        };
        let path = dir.path().join("nested").join("pieces.txt");
        let table = sample_table();

        assert!(table.save(&path, &["header"]).is_ok());
        let Ok(parsed) = AssignmentTable::load(&path) else {
            unreachable!("saved table parses");
        };

        assert_eq!(parsed, table);
        let tuples: Vec<_> = parsed.iter().map(|a| (a.tile_id, a.patterns)).collect();
        assert_eq!(
            tuples,
            vec![(2, [0, 0, 5, 5]), (7, [1, 2, 3, 4]), (12, [3, -1, 0, 7])]
        );
    }

    // Tests that comments, blank lines and extra spacing are tolerated
    // Verified by splitting on single spaces
    #[test]
    fn test_parse_comments_and_spacing() {
        let text = "# Eternity\n\n  5   1 2\t3 4  \n# trailing\n";
        let Ok(table) = AssignmentTable::read_from(Cursor::new(text)) else {
            unreachable!("valid input");
        };
        assert_eq!(
            table.get(5),
            Some(PatternAssignment {
                tile_id: 5,
                patterns: [1, 2, 3, 4]
            })
        );
    }

    // Tests rejection of malformed lines with their line number
    // Verified by skipping unparsable lines
    #[test]
    fn test_parse_errors_report_line() {
        let cases = [
            ("1 2 3 4\n", 1),
            ("# ok\n1 2 3 4 x\n", 2),
            ("1 0 0 0 0\n\n2 0 0 0 -2\n", 3),
            ("-1 0 0 0 0\n", 1),
            ("1 0 0 0 0\n1 1 1 1 1\n", 2),
            ("1 0 0 0 0 0\n", 1),
        ];
        for (text, expected_line) in cases {
            match AssignmentTable::read_from(Cursor::new(text)) {
                Err(ExtractionError::MalformedAssignment { line, .. }) => {
                    assert_eq!(line, expected_line, "input {text:?}");
                }
                other => unreachable!("expected malformed assignment for {text:?}, got {other:?}"),
            }
        }
    }

    // Tests per-face access and pattern usage counts
    // Verified by indexing faces in reverse order
    #[test]
    fn test_faces_and_usage() {
        let mut assignment = PatternAssignment::unmatched(4);
        assignment.set(Direction::East, 9);
        assert_eq!(assignment.get(Direction::East), 9);
        assert_eq!(assignment.get(Direction::West), -1);

        let usage = sample_table().pattern_usage();
        assert_eq!(usage.get(&0), Some(&3));
        assert_eq!(usage.get(&5), Some(&2));
        assert_eq!(usage.get(&-1), Some(&1));
        assert_eq!(usage.values().sum::<usize>(), 12);
    }

    // Tests that loading a missing file reports the path
    // Verified by dropping the path context
    #[test]
    fn test_load_missing_file() {
        let Ok(dir) = TempDir::new() else {
            unreachable!("temporary directory");
        };
        let path = dir.path().join("absent.txt");
        match AssignmentTable::load(&path) {
            Err(ExtractionError::FileSystem { path: reported, .. }) => assert_eq!(reported, path),
            other => unreachable!("expected file system error, got {other:?}"),
        }
    }
}
