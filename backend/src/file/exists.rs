use std::path::Path;

/// Reports whether `path` exists and is a regular file.
pub fn file_exists(path: impl AsRef<Path>) -> bool {
    std::fs::metadata(path)
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

/// Reports whether `path` exists and is a directory.
pub fn dir_exists(path: impl AsRef<Path>) -> bool {
    std::fs::metadata(path)
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn regular_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.txt");
        std::fs::write(&path, "x").unwrap();

        assert!(file_exists(&path));
        assert!(!dir_exists(&path));
    }

    #[test]
    fn directory() {
        let tmp = TempDir::new().unwrap();

        assert!(dir_exists(tmp.path()));
        assert!(!file_exists(tmp.path()));
    }

    #[test]
    fn missing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope");

        assert!(!file_exists(&path));
        assert!(!dir_exists(&path));
    }
}
