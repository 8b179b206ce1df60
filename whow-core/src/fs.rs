//! Filesystem helpers shared by the stores.

use std::path::{Path, PathBuf};

use crate::error::{WhowError, WhowResult};

pub const RECORD_EXTENSION: &str = "toml";

const TEMP_SUFFIX: &str = ".tmp";

/// Replace spaces with underscores to build a filename stem.
pub fn sanitize_name(name: &str) -> String {
    name.trim().replace(' ', "_")
}

/// Reject names that cannot become a single filename.
pub fn validate_name(kind: &str, name: &str) -> WhowResult<()> {
    if name.trim().is_empty() {
        return Err(WhowError::InvalidInput(format!("{kind} name cannot be empty")));
    }

    if name.contains(['/', '\\']) || name.trim() == "." || name.trim() == ".." {
        return Err(WhowError::InvalidInput(format!(
            "{kind} name '{name}' cannot contain path separators"
        )));
    }

    Ok(())
}

/// Path of the record file for a sanitized stem.
pub fn record_path(dir: &Path, stem: &str) -> PathBuf {
    dir.join(format!("{stem}.{RECORD_EXTENSION}"))
}

/// Write `content` to a temporary sibling and rename it over `path`.
pub fn write_atomic(path: &Path, content: &str) -> WhowResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut temp = path.as_os_str().to_owned();
    temp.push(TEMP_SUFFIX);
    let temp = PathBuf::from(temp);

    std::fs::write(&temp, content)?;
    // rename is atomic on POSIX when both paths share a filesystem
    if let Err(e) = std::fs::rename(&temp, path) {
        let _ = std::fs::remove_file(&temp);
        return Err(e.into());
    }

    Ok(())
}

/// All `.toml` files in `dir`, sorted by path. A missing directory is empty.
pub fn record_files(dir: &Path) -> WhowResult<Vec<PathBuf>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().is_some_and(|e| e == RECORD_EXTENSION))
        .collect();

    files.sort();
    Ok(files)
}

/// Filename stem as a string, if it is valid UTF-8.
pub fn file_stem(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Buy milk"), "Buy_milk");
        assert_eq!(sanitize_name("  padded name "), "padded_name");
        assert_eq!(sanitize_name("single"), "single");
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("to-do", "Buy milk").is_ok());
        assert!(matches!(
            validate_name("to-do", "   "),
            Err(WhowError::InvalidInput(_))
        ));
        assert!(matches!(
            validate_name("to-do", "../escape"),
            Err(WhowError::InvalidInput(_))
        ));
    }

    #[test]
    fn write_atomic_creates_parent_and_leaves_no_temp() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/dir/file.toml");

        write_atomic(&path, "a = 1\n").unwrap();
        write_atomic(&path, "a = 2\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a = 2\n");
        assert!(!tmp.path().join("nested/dir/file.toml.tmp").exists());
    }

    #[test]
    fn record_files_skips_temp_and_missing_dirs() {
        let tmp = TempDir::new().unwrap();
        assert!(record_files(&tmp.path().join("missing")).unwrap().is_empty());

        std::fs::write(tmp.path().join("b.toml"), "").unwrap();
        std::fs::write(tmp.path().join("a.toml"), "").unwrap();
        std::fs::write(tmp.path().join("a.toml.tmp"), "").unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "").unwrap();

        let files = record_files(tmp.path()).unwrap();
        let names: Vec<_> = files.iter().filter_map(|p| file_stem(p)).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
