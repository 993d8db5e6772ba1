use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const DELIV_DIR: &str = ".deliverables";
pub const CONFIG_FILE: &str = ".deliverables/config.yaml";
pub const DEFAULT_STATUS_FILE: &str = ".deliverables/status.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn deliv_dir(root: &Path) -> PathBuf {
    root.join(DELIV_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Resolve a configured status file against the project root. Absolute paths
/// are used as given.
pub fn status_path(root: &Path, status_file: &str) -> PathBuf {
    let p = Path::new(status_file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        root.join(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/proj");
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/proj/.deliverables/config.yaml")
        );
        assert_eq!(
            status_path(root, DEFAULT_STATUS_FILE),
            PathBuf::from("/tmp/proj/.deliverables/status.json")
        );
        assert_eq!(
            status_path(root, "/var/lib/deliv/status.json"),
            PathBuf::from("/var/lib/deliv/status.json")
        );
    }
}
