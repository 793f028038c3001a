use std::fs;
use std::path::Path;

use dirscribe_core::{ListSummary, NO_EXTENSION, to_json_string};
use dirscribe_scan::{
    CollectingObserver, EntryCounter, FlatLister, FsNode, ScanConfig, TreeBuilder, WarningKind,
};
use tempfile::TempDir;

fn scan_tree(root: &Path) -> (FsNode, CollectingObserver) {
    let mut observer = CollectingObserver::new();
    let tree = TreeBuilder::new(&ScanConfig::new(root)).build(root, &mut observer);
    (tree, observer)
}

fn create_sample_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::create_dir_all(root.join("src/nested")).unwrap();
    fs::create_dir(root.join("docs")).unwrap();
    fs::write(root.join("README"), "readme").unwrap();
    fs::write(root.join("Cargo.toml"), "[package]").unwrap();
    fs::write(root.join("src/main.rs"), "fn main() {}").unwrap();
    fs::write(root.join("src/lib.rs"), "").unwrap();
    fs::write(root.join("src/nested/mod.rs"), "mod a;").unwrap();
    fs::write(root.join("docs/guide.md"), "# guide").unwrap();

    temp
}

fn assert_sorted(node: &FsNode) {
    let names: Vec<&str> = node.children().iter().map(|c| c.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted, "children of {} not sorted", node.path);

    for child in node.children() {
        assert_sorted(child);
    }
}

fn count_files(node: &FsNode) -> usize {
    if node.is_file() {
        1
    } else {
        node.children().iter().map(count_files).sum()
    }
}

#[test]
fn test_empty_directory() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("root");
    fs::create_dir(&root).unwrap();

    let (tree, _) = scan_tree(&root);
    assert_eq!(tree.name.as_str(), "root");
    assert_eq!(tree.path, root.to_string_lossy());
    assert!(tree.is_dir());
    assert!(tree.children().is_empty());
    assert!(tree.error.is_none());

    let mut observer = CollectingObserver::new();
    let listing = FlatLister::new(&ScanConfig::new(&root)).list(&root, &mut observer);
    assert!(listing.records.is_empty());
    assert_eq!(to_json_string(&listing.records).unwrap(), "[]");
}

#[test]
fn test_two_file_scenario() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("a.txt"), "12345").unwrap();
    fs::write(root.join("sub/b.txt"), "123").unwrap();

    let mut observer = CollectingObserver::new();
    let listing = FlatLister::new(&ScanConfig::new(root)).list(root, &mut observer);

    let mut records = listing.records.clone();
    records.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].relative_path, "a.txt");
    assert_eq!(records[0].size, 5);
    assert_eq!(records[1].relative_path, "sub/b.txt");
    assert_eq!(records[1].size, 3);

    let summary = ListSummary::from_records(&listing.records);
    assert_eq!(summary.total_size, 8);
    assert_eq!(summary.extensions.top(10), vec![(".txt", 2)]);
}

#[test]
fn test_flat_list_matches_files_on_disk() {
    let temp = create_sample_tree();
    let (tree, _) = scan_tree(temp.path());

    let mut observer = CollectingObserver::new();
    let listing = FlatLister::new(&ScanConfig::new(temp.path())).list(temp.path(), &mut observer);

    assert!(!listing.has_errors());
    assert_eq!(listing.records.len(), 6);
    assert_eq!(listing.records.len(), count_files(&tree));
}

#[test]
fn test_tree_children_sorted_at_every_level() {
    let temp = create_sample_tree();
    let (tree, observer) = scan_tree(temp.path());

    assert_sorted(&tree);
    assert!(!observer.has_warnings());
}

#[test]
fn test_no_extension_sentinel() {
    let temp = create_sample_tree();
    let mut observer = CollectingObserver::new();
    let listing = FlatLister::new(&ScanConfig::new(temp.path())).list(temp.path(), &mut observer);
    let summary = ListSummary::from_records(&listing.records);

    assert_eq!(summary.extensions.get(NO_EXTENSION), Some(1));
    assert_eq!(summary.extensions.get(".rs"), Some(3));
    assert_eq!(summary.extensions.get(""), None);
}

#[test]
fn test_scans_are_idempotent() {
    let temp = create_sample_tree();

    let (first, _) = scan_tree(temp.path());
    let (second, _) = scan_tree(temp.path());
    assert_eq!(
        to_json_string(&first).unwrap(),
        to_json_string(&second).unwrap()
    );

    let lister = FlatLister::new(&ScanConfig::new(temp.path()));
    let mut observer = CollectingObserver::new();
    let first = lister.list(temp.path(), &mut observer);
    let second = lister.list(temp.path(), &mut observer);
    assert_eq!(
        to_json_string(&first.records).unwrap(),
        to_json_string(&second.records).unwrap()
    );
}

#[test]
fn test_tree_round_trip() {
    let temp = create_sample_tree();
    let (tree, _) = scan_tree(temp.path());

    let parsed: FsNode = serde_json::from_str(&to_json_string(&tree).unwrap()).unwrap();
    assert_eq!(parsed, tree);
}

#[test]
fn test_counter_matches_tree() {
    let temp = create_sample_tree();
    let (tree, _) = scan_tree(temp.path());

    let mut observer = CollectingObserver::new();
    let count = EntryCounter::new(&ScanConfig::new(temp.path())).count(temp.path(), &mut observer);

    // The tree also contains the root node
    assert_eq!(count + 1, tree.node_count());
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory() {
    use std::os::unix::fs::PermissionsExt;

    let temp = create_sample_tree();
    let locked = temp.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("hidden.txt"), "secret").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can read it anyway
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let (tree, observer) = scan_tree(temp.path());

    let mut lister_observer = CollectingObserver::new();
    let listing =
        FlatLister::new(&ScanConfig::new(temp.path())).list(temp.path(), &mut lister_observer);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let node = tree
        .children()
        .iter()
        .find(|c| c.name.as_str() == "locked")
        .unwrap();
    assert!(node.is_dir());
    assert_eq!(node.error.as_deref(), Some("Permission denied"));
    assert!(node.children().is_empty());
    assert_eq!(observer.warnings.len(), 1);
    assert_eq!(observer.warnings[0].kind, WarningKind::PermissionDenied);

    // Siblings were still scanned
    assert!(tree.children().iter().any(|c| c.name.as_str() == "src"));

    // The listing skips the locked directory and still finds everything else
    assert_eq!(listing.records.len(), 6);
    assert!(listing.records.iter().all(|r| r.name.as_str() != "hidden.txt"));
    assert_eq!(listing.errors.len(), 1);
    assert_eq!(lister_observer.warnings.len(), 1);
    assert_eq!(lister_observer.warnings[0].kind, WarningKind::ReadError);
}
