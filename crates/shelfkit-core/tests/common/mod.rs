//! Shared fixtures for shelfkit-core integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use shelfkit_core::{CommandSpec, SystemRunner, run_checked};

/// Whether `program` can be found on `PATH`.
pub fn tool_available(program: &str) -> bool {
    which::which(program).is_ok()
}

/// Build a small item directory: `<root>/<name>/{meta.xml, pages/0001.txt}`.
pub fn make_item(root: &Path, name: &str) -> PathBuf {
    let item = root.join(name);
    fs::create_dir_all(item.join("pages")).unwrap();
    fs::write(item.join("meta.xml"), "<item/>").unwrap();
    fs::write(item.join("pages/0001.txt"), "page one").unwrap();
    item
}

/// Write `<dir>/<archive>` as a gzip-compressed tar of `item`.
pub fn make_tar_gz(item: &Path, dir: &Path, archive: &str) -> PathBuf {
    let path = dir.join(archive);
    let spec = CommandSpec::new("tar")
        .arg("-czf")
        .arg(&path)
        .arg(item.file_name().unwrap())
        .current_dir(item.parent().unwrap());
    run_checked(&SystemRunner::new(), &spec).unwrap();
    path
}
