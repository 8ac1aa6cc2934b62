//! Location/File behavior that must hold on every backend.
//!
//! Each check runs against the in-memory backend and a disk backend rooted
//! in a temporary directory.

use std::sync::Arc;

use locus_vfs::{DiskFileSystem, File, FileSystem, Location, MemoryFileSystem, VfsError};
use regex::Regex;
use tempfile::TempDir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("locus_vfs=debug")
        .with_test_writer()
        .try_init();
}

/// A backend plus whatever keeps its storage alive.
struct Fixture {
    fs: Arc<dyn FileSystem>,
    _dir: Option<TempDir>,
}

fn backends() -> Vec<Fixture> {
    init_tracing();
    let dir = TempDir::new().unwrap();
    vec![
        Fixture {
            fs: Arc::new(MemoryFileSystem::new()),
            _dir: None,
        },
        Fixture {
            fs: Arc::new(DiskFileSystem::rooted(dir.path())),
            _dir: Some(dir),
        },
    ]
}

/// Seeds `test_files/test.txt` and `test_files/prefix-file.txt`.
fn seed(fs: &Arc<dyn FileSystem>) -> File {
    let test = File::new(Arc::clone(fs), "test_files/test.txt").unwrap();
    test.write(b"hello world").unwrap();
    File::new(Arc::clone(fs), "test_files/prefix-file.txt")
        .unwrap()
        .write(b"prefixed")
        .unwrap();
    test
}

#[test]
fn list_returns_sorted_file_names() {
    for fx in backends() {
        let test_file = seed(&fx.fs);
        let listed = test_file.location().list().unwrap();
        assert_eq!(listed, vec!["prefix-file.txt", "test.txt"], "{}", fx.fs.scheme());
    }
}

#[test]
fn list_skips_nested_entries() {
    for fx in backends() {
        let test_file = seed(&fx.fs);
        test_file
            .location()
            .new_file("nested/deeper.txt")
            .unwrap()
            .write(b"x")
            .unwrap();
        assert_eq!(test_file.location().list().unwrap().len(), 2);
    }
}

#[test]
fn listing_missing_directory_is_empty() {
    for fx in backends() {
        let test_file = seed(&fx.fs);
        let location = test_file.location().new_location("not/a/directory/").unwrap();

        assert!(!location.exists().unwrap());
        assert!(location.list().unwrap().is_empty());
        assert!(location.list_by_prefix("anything").unwrap().is_empty());
        let regex = Regex::new("[-]+").unwrap();
        assert!(location.list_by_regex(&regex).unwrap().is_empty());
    }
}

#[test]
fn list_by_prefix() {
    for fx in backends() {
        let location = seed(&fx.fs).location();
        assert_eq!(location.list_by_prefix("prefix").unwrap(), vec!["prefix-file.txt"]);
        assert!(matches!(
            location.list_by_prefix("bad/prefix"),
            Err(VfsError::BadFilePrefix(p)) if p == "bad/prefix"
        ));
    }
}

#[test]
fn list_by_regex() {
    for fx in backends() {
        let location = seed(&fx.fs).location();
        let regex = Regex::new("[-]+").unwrap();
        assert_eq!(location.list_by_regex(&regex).unwrap(), vec!["prefix-file.txt"]);

        let all_txt = Regex::new(r"\.txt$").unwrap();
        assert_eq!(location.list_by_regex(&all_txt).unwrap().len(), 2);
    }
}

#[test]
fn location_exists() {
    for fx in backends() {
        let test_file = seed(&fx.fs);
        let other = File::new(Arc::clone(&fx.fs), "foo/foo.txt").unwrap();
        assert!(test_file.location().exists().unwrap());
        assert!(!other.location().exists().unwrap());
        assert!(Location::root(Arc::clone(&fx.fs)).exists().unwrap());
    }
}

#[test]
fn new_location_dot_paths() {
    for fx in backends() {
        let other = File::new(Arc::clone(&fx.fs), "/foo/foo.txt").unwrap();
        let sub = other.location().new_location("other/").unwrap();
        assert_eq!(sub.path(), "/foo/other/");

        let rel = sub.new_location("../../bar/").unwrap();
        assert_eq!(rel.path(), "/bar/", "relative dot path works");

        let clamped = rel.new_location("../../../../up/").unwrap();
        assert_eq!(clamped.path(), "/up/");
    }
}

#[test]
fn new_file_dot_paths() {
    for fx in backends() {
        let loc = Location::new(Arc::clone(&fx.fs), "/foo/bar/baz/").unwrap();
        let file = loc.new_file("../../bam/this.txt").unwrap();
        assert_eq!(file.path(), "/foo/bam/this.txt");
    }
}

#[test]
fn change_dir() {
    for fx in backends() {
        let location = File::new(Arc::clone(&fx.fs), "foo/foo.txt").unwrap().location();
        let moved = location.change_dir("other/").unwrap();
        assert_eq!(moved.path(), "/foo/other/");
        assert_eq!(location.path(), "/foo/");
    }
}

#[test]
fn path_and_root() {
    for fx in backends() {
        let file = File::new(Arc::clone(&fx.fs), "/some/file/test.txt").unwrap();
        assert_eq!(file.location().path(), "/some/file/");
        assert_eq!(Location::root(Arc::clone(&fx.fs)).path(), "/");
    }
}

#[test]
fn uri_and_display() {
    init_tracing();
    let fs: Arc<dyn FileSystem> = Arc::new(DiskFileSystem::new());
    let location = File::new(fs, "/some/file/test.txt").unwrap().location();
    assert_eq!(location.uri(), "file:///some/file/");
    assert_eq!(format!("{location}"), "file:///some/file/");

    let mem: Arc<dyn FileSystem> = Arc::new(MemoryFileSystem::new());
    let location = Location::new(mem, "/some/file/").unwrap();
    assert_eq!(location.to_string(), "mem:///some/file/");
}

#[test]
fn volume_is_empty_on_unix_style_backends() {
    for fx in backends() {
        let location = seed(&fx.fs).location();
        if cfg!(unix) || fx.fs.scheme() == "mem" {
            assert_eq!(location.volume(), "");
        }
    }
}

#[test]
fn existence_asymmetry() {
    for fx in backends() {
        let file = File::new(Arc::clone(&fx.fs), "/fresh/nothing-here.txt").unwrap();
        assert!(!file.exists().unwrap());

        file.write(b"now here").unwrap();
        assert!(file.exists().unwrap());
        assert_eq!(file.read_to_end().unwrap(), b"now here");

        file.delete().unwrap();
        assert!(!file.exists().unwrap());
    }
}

#[test]
fn delete_file_from_location() {
    for fx in backends() {
        let location = Location::new(Arc::clone(&fx.fs), "/example/").unwrap();
        let file = location.new_file("test.txt").unwrap();
        file.write(b"file to delete").unwrap();
        assert!(file.exists().unwrap());

        location.delete_file("test.txt").unwrap();
        assert!(!file.exists().unwrap());

        assert!(matches!(
            location.delete_file("test.txt"),
            Err(VfsError::NotFound(_))
        ));
        assert!(matches!(location.delete_file(""), Err(VfsError::InvalidPath(_))));
    }
}

#[test]
fn copy_between_disk_and_memory() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let disk: Arc<dyn FileSystem> = Arc::new(DiskFileSystem::rooted(dir.path()));
    let mem: Arc<dyn FileSystem> = Arc::new(MemoryFileSystem::new());

    let source = File::new(disk, "/src/data.bin").unwrap();
    source.write(&[0u8, 1, 2, 3, 255]).unwrap();

    let copied = source.copy_to_location(&Location::root(Arc::clone(&mem))).unwrap();
    assert_eq!(copied.uri(), "mem:///data.bin");
    assert_eq!(copied.size().unwrap(), 5);

    let back = File::new(mem, "/data.bin").unwrap();
    back.move_to_file(&source.location().new_file("returned.bin").unwrap()).unwrap();
    assert!(!back.exists().unwrap());
    assert!(dir.path().join("src/returned.bin").is_file());
}

#[test]
fn file_and_directory_names_conflict() {
    for fx in backends() {
        let scheme = fx.fs.scheme().to_string();
        let file = File::new(Arc::clone(&fx.fs), "/a").unwrap();
        file.write(b"plain file").unwrap();

        let nested = File::new(Arc::clone(&fx.fs), "/a/b.txt").unwrap();
        assert!(matches!(nested.write(b"x"), Err(VfsError::Backend { .. })), "{scheme}");
        let deeper = File::new(Arc::clone(&fx.fs), "/a/x/y.txt").unwrap();
        assert!(matches!(deeper.write(b"x"), Err(VfsError::Backend { .. })), "{scheme}");
        assert!(file.exists().unwrap(), "{scheme}");
        assert!(!Location::new(Arc::clone(&fx.fs), "/a/").unwrap().exists().unwrap(), "{scheme}");
        assert_eq!(file.read_to_end().unwrap(), b"plain file");

        File::new(Arc::clone(&fx.fs), "/d/inner.txt").unwrap().write(b"x").unwrap();
        let over_dir = File::new(Arc::clone(&fx.fs), "/d").unwrap();
        assert!(matches!(over_dir.write(b"x"), Err(VfsError::Backend { .. })), "{scheme}");
        assert!(!over_dir.exists().unwrap(), "{scheme}");
        assert!(Location::new(Arc::clone(&fx.fs), "/d/").unwrap().exists().unwrap());
    }
}
