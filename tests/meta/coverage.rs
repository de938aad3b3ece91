//! Layout checks: `tests/unit` mirrors `src`, and every unit file is compiled

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";

    /// Entry points and module organization files don't need a mirror
    fn is_exempt(relative: &str) -> bool {
        relative == "main.rs" || relative == "lib.rs" || relative.ends_with("mod.rs")
    }

    fn tree(dir: &str) -> BTreeSet<String> {
        let root = Path::new(dir);
        collect_relative_paths(root, root).unwrap_or_else(|error| {
            assert!(!root.exists(), "Failed to read {dir}: {error}");
            BTreeSet::new()
        })
    }

    // Tests every source file has a unit test file at the same relative path
    // Verified by adding an untested source file
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let src_paths = tree(SRC_DIR);
        let test_paths = tree(UNIT_DIR);

        let missing: Vec<String> = src_paths
            .iter()
            .filter(|path| !is_exempt(path) && !test_paths.contains(*path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "The following src files/directories are missing unit test counterparts:\n{}",
            missing.join("\n")
        );
    }

    // Tests no unit test file outlives its source file
    // Verified by adding a unit test for a removed module
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let src_paths = tree(SRC_DIR);
        let test_paths = tree(UNIT_DIR);

        let orphaned: Vec<String> = test_paths
            .iter()
            .filter(|path| !path.ends_with("mod.rs") && !src_paths.contains(*path))
            .map(|path| format!("  - tests/unit/{path} -> src/{path} (missing)"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "The following unit test files/directories have no corresponding src files:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests every unit test file is declared in its parent mod.rs
    // Verified by removing a module declaration
    #[test]
    fn test_all_unit_tests_are_declared() {
        let mut undeclared = Vec::new();

        for relative in tree(UNIT_DIR) {
            let path = Path::new(UNIT_DIR).join(&relative);
            if relative.ends_with("mod.rs") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Some(parent) = path.parent() else {
                continue;
            };
            let declarations = fs::read_to_string(parent.join("mod.rs")).unwrap_or_default();
            if !declarations.contains(&format!("mod {stem};")) {
                undeclared.push(format!("  - {}", path.display()));
            }
        }

        assert!(
            undeclared.is_empty(),
            "The following unit test files are never compiled:\n{}",
            undeclared.join("\n")
        );
    }

    fn collect_relative_paths(dir: &Path, base: &Path) -> Result<BTreeSet<String>, io::Error> {
        let mut paths = BTreeSet::new();

        if dir.is_dir() {
            for entry_result in fs::read_dir(dir)? {
                let path = entry_result?.path();

                let Ok(stripped) = path.strip_prefix(base) else {
                    return Err(io::Error::other("Failed to strip prefix"));
                };
                let relative_path = stripped.to_string_lossy().to_string();

                if path.is_dir() {
                    paths.insert(relative_path);
                    paths.extend(collect_relative_paths(&path, base)?);
                } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                    paths.insert(relative_path);
                }
            }
        }

        Ok(paths)
    }

    // Tests every file under tests contains at least one test function
    // Verified by adding an empty test file
    #[test]
    fn test_all_test_files_contain_tests() {
        let tests_dir = Path::new("tests");
        let mut files_without_tests = Vec::new();

        if let Err(error) = check_test_files(tests_dir, tests_dir, &mut files_without_tests) {
            assert!(
                !tests_dir.exists(),
                "Failed to scan tests directory: {error}"
            );
        }

        assert!(
            files_without_tests.is_empty(),
            "The following test files don't contain any #[test] functions:\n{}",
            files_without_tests.join("\n")
        );
    }

    fn check_test_files(
        dir: &Path,
        base_dir: &Path,
        files_without_tests: &mut Vec<String>,
    ) -> Result<(), io::Error> {
        for entry_result in fs::read_dir(dir)? {
            let path = entry_result?.path();

            if path.is_dir() {
                check_test_files(&path, base_dir, files_without_tests)?;
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };

            // Harness root and module organization files hold no tests
            if (path.parent() == Some(base_dir) && file_name == "main.rs") || file_name == "mod.rs"
            {
                continue;
            }

            if !fs::read_to_string(&path)?.contains("#[test]") {
                files_without_tests.push(format!("  - {}", path.display()));
            }
        }

        Ok(())
    }
}
