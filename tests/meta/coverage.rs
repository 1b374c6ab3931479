//! Meta tests keeping the unit test tree in step with the source tree

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";
    const TESTS_DIR: &str = "tests";

    /// Rust files below `root`, relative to it
    fn rust_files(root: &Path) -> io::Result<BTreeSet<PathBuf>> {
        let mut files = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    let relative = path
                        .strip_prefix(root)
                        .map_err(|e| io::Error::other(e.to_string()))?;
                    files.insert(relative.to_path_buf());
                }
            }
        }

        Ok(files)
    }

    // Crate roots and module declarations carry no behaviour of their own
    fn is_module_root(path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| name == "main.rs" || name == "lib.rs" || name == "mod.rs")
    }

    fn listing(paths: &[&PathBuf], from: &str, to: &str) -> String {
        paths
            .iter()
            .map(|path| format!("  - {from}/{} -> {to}/{}", path.display(), path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // Tests every source module has a mirrored unit test file
    // Verified by deleting tests/unit/geometry/hatching.rs
    #[test]
    fn test_every_source_file_has_unit_tests() {
        let sources = rust_files(Path::new(SRC_DIR)).expect("Source tree should be readable");
        let units = rust_files(Path::new(UNIT_DIR)).expect("Unit test tree should be readable");

        let missing: Vec<&PathBuf> = sources
            .iter()
            .filter(|path| !is_module_root(path) && !units.contains(*path))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without unit tests:\n{}",
            listing(&missing, SRC_DIR, UNIT_DIR)
        );
    }

    // Tests no unit test file outlives the module it covers
    // Verified by adding tests/unit/render/unknown.rs
    #[test]
    fn test_every_unit_test_file_has_source() {
        let sources = rust_files(Path::new(SRC_DIR)).expect("Source tree should be readable");
        let units = rust_files(Path::new(UNIT_DIR)).expect("Unit test tree should be readable");

        let orphaned: Vec<&PathBuf> = units
            .iter()
            .filter(|path| !is_module_root(path) && !sources.contains(*path))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files without a source module:\n{}",
            listing(&orphaned, UNIT_DIR, SRC_DIR)
        );
    }

    // Tests every unit test file is compiled into the unit test harness
    // Verified by removing a declaration from tests/unit/io/mod.rs
    #[test]
    fn test_unit_files_are_declared() {
        let root = Path::new(UNIT_DIR);
        let units = rust_files(root).expect("Unit test tree should be readable");
        let harness = fs::read_to_string(root.join("main.rs")).expect("Harness root should exist");

        let mut undeclared = Vec::new();
        for path in units.iter().filter(|path| !is_module_root(path)) {
            let (Some(area), Some(stem)) = (
                path.parent().and_then(Path::to_str),
                path.file_stem().and_then(|stem| stem.to_str()),
            ) else {
                continue;
            };

            if !harness.contains(&format!("mod {area};")) {
                undeclared.push(format!("  - {area} in {UNIT_DIR}/main.rs"));
                continue;
            }

            let declarations = fs::read_to_string(root.join(area).join("mod.rs")).unwrap_or_default();
            if !declarations.contains(&format!("pub mod {stem};")) {
                undeclared.push(format!("  - {stem} in {UNIT_DIR}/{area}/mod.rs"));
            }
        }

        assert!(
            undeclared.is_empty(),
            "Unit test modules that are never compiled:\n{}",
            undeclared.join("\n")
        );
    }

    // Tests each unit test states what it checks and which defect would fail it
    // Verified by dropping the second comment line above a test
    #[test]
    fn test_unit_tests_state_intent() {
        let root = Path::new(UNIT_DIR);
        let units = rust_files(root).expect("Unit test tree should be readable");

        let mut undocumented = Vec::new();
        for path in &units {
            let content = fs::read_to_string(root.join(path)).expect("Test file should be readable");
            let lines: Vec<&str> = content.lines().map(str::trim).collect();

            for (index, line) in lines.iter().enumerate() {
                if *line != "#[test]" {
                    continue;
                }
                let verified = index
                    .checked_sub(1)
                    .and_then(|above| lines.get(above))
                    .is_some_and(|above| above.starts_with("// Verified by"));
                let tests = index
                    .checked_sub(2)
                    .and_then(|above| lines.get(above))
                    .is_some_and(|above| above.starts_with("// Tests"));
                if !(verified && tests) {
                    undocumented.push(format!("  - {UNIT_DIR}/{}:{}", path.display(), index + 1));
                }
            }
        }

        assert!(
            undocumented.is_empty(),
            "Tests without a `// Tests` / `// Verified by` comment pair:\n{}",
            undocumented.join("\n")
        );
    }

    // Tests every test file below tests/ contains at least one test
    // Verified by adding an empty tests/unit/catalog/table.rs
    #[test]
    fn test_all_test_files_contain_tests() {
        let root = Path::new(TESTS_DIR);
        let files = rust_files(root).expect("Test tree should be readable");

        let mut empty = Vec::new();
        for path in files.iter().filter(|path| !is_module_root(path)) {
            let content = fs::read_to_string(root.join(path)).expect("Test file should be readable");
            if !content.contains("#[test]") {
                empty.push(format!("  - {TESTS_DIR}/{}", path.display()));
            }
        }

        assert!(
            empty.is_empty(),
            "Test files without any #[test] function:\n{}",
            empty.join("\n")
        );
    }
}
