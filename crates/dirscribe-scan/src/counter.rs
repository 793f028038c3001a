//! Entry counting used to size progress displays.

use std::path::Path;

use dirscribe_core::{ScanConfig, ScanWarning, WarningKind};

use crate::observer::ScanObserver;
use crate::walk::{WalkEntry, error_path, is_directory, read_failure, walk_dir};

/// Counts entries below a root ahead of a real scan.
///
/// Counts are best-effort: the first walk error is reported and the partial
/// count returned.
pub struct EntryCounter {
    config: ScanConfig,
}

impl EntryCounter {
    /// Create a counter.
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Count files and directories at every level below `root`.
    pub fn count(&self, root: &Path, observer: &mut dyn ScanObserver) -> u64 {
        self.count_matching(root, observer, |_| true)
    }

    /// Count only entries that would appear in a flat listing below `root`.
    ///
    /// Symlinks to directories are excluded, matching [`FlatLister`](crate::FlatLister).
    pub fn count_files(&self, root: &Path, observer: &mut dyn ScanObserver) -> u64 {
        self.count_matching(root, observer, |entry| !is_directory(entry))
    }

    fn count_matching(
        &self,
        root: &Path,
        observer: &mut dyn ScanObserver,
        matches: impl Fn(&WalkEntry) -> bool,
    ) -> u64 {
        let mut total = 0;

        for entry_result in walk_dir(root, &self.config) {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(err) => {
                    report(observer, &err, root);
                    break;
                }
            };

            if let Some(err) = read_failure(&entry) {
                report(observer, err, &entry.path());
                break;
            }

            if entry.depth > 0 && matches(&entry) {
                total += 1;
            }
        }

        tracing::debug!(root = %root.display(), total, "counted entries");
        total
    }
}

fn report(observer: &mut dyn ScanObserver, err: &jwalk::Error, fallback: &Path) {
    observer.warning(&ScanWarning::new(
        error_path(err, fallback),
        format!("Error counting entries: {err}"),
        WarningKind::ReadError,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::CollectingObserver;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir_all(root.join("dir1/subdir")).unwrap();
        fs::create_dir(root.join("dir2")).unwrap();
        fs::write(root.join("file1.txt"), "hello").unwrap();
        fs::write(root.join("dir1/file2.txt"), "world").unwrap();
        fs::write(root.join("dir1/subdir/file3.txt"), "test").unwrap();

        temp
    }

    #[test]
    fn test_count_includes_nested_entries() {
        let temp = create_test_tree();
        let counter = EntryCounter::new(&ScanConfig::new(temp.path()));
        let mut observer = CollectingObserver::new();

        // dir1, dir2, subdir + 3 files; the root itself is not counted
        assert_eq!(counter.count(temp.path(), &mut observer), 6);
        assert_eq!(counter.count_files(temp.path(), &mut observer), 3);
        assert!(!observer.has_warnings());
    }

    #[test]
    fn test_count_empty_directory() {
        let temp = TempDir::new().unwrap();
        let counter = EntryCounter::new(&ScanConfig::new(temp.path()));
        let mut observer = CollectingObserver::new();

        assert_eq!(counter.count(temp.path(), &mut observer), 0);
    }

    #[test]
    fn test_count_respects_hidden_setting() {
        let temp = create_test_tree();
        fs::write(temp.path().join(".hidden"), "x").unwrap();

        let mut config = ScanConfig::new(temp.path());
        let mut observer = CollectingObserver::new();
        assert_eq!(
            EntryCounter::new(&config).count(temp.path(), &mut observer),
            7
        );

        config.include_hidden = false;
        assert_eq!(
            EntryCounter::new(&config).count(temp.path(), &mut observer),
            6
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_count_files_skips_directory_links() {
        let temp = create_test_tree();
        std::os::unix::fs::symlink(temp.path().join("dir1"), temp.path().join("link")).unwrap();
        let counter = EntryCounter::new(&ScanConfig::new(temp.path()));
        let mut observer = CollectingObserver::new();

        assert_eq!(counter.count(temp.path(), &mut observer), 7);
        assert_eq!(counter.count_files(temp.path(), &mut observer), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_count_reports_unreadable_directory() {
        use std::os::unix::fs::PermissionsExt;

        let temp = create_test_tree();
        let locked = temp.path().join("dir2");
        fs::write(locked.join("secret.txt"), "x").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        if fs::read_dir(&locked).is_ok() {
            // Running with privileges that bypass permission bits
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let mut observer = CollectingObserver::new();
        let total = EntryCounter::new(&ScanConfig::new(temp.path())).count(temp.path(), &mut observer);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(total <= 6);
        assert_eq!(observer.warnings.len(), 1);
        assert_eq!(observer.warnings[0].kind, WarningKind::ReadError);
        assert!(observer.warnings[0].path.ends_with("dir2"));
    }
}
