#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use catalog_server::catalog::{Catalog, RedirectTable};
use catalog_server::http::response::CannedResponses;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// Scratch directory removed on drop.
pub struct TestDir {
    path: PathBuf,
}

impl TestDir {
    pub fn new(name: &str) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "catalog-server-{}-{}-{}",
            name,
            std::process::id(),
            id
        ));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).unwrap();
        Self {
            path: std::fs::canonicalize(&path).unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, rel: &str, contents: &[u8]) -> PathBuf {
        let path = self.path.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.path.join(rel);
        std::fs::create_dir_all(&path).unwrap();
        path
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Layout used by most tests:
///
/// ```text
/// <dir>/www/            catalogue root
/// <dir>/secret.txt      outside the root
/// <dir>/redirects.txt   redirect table
/// ```
pub struct Fixture {
    pub dir: TestDir,
    pub root: PathBuf,
    pub table: PathBuf,
}

impl Fixture {
    pub fn new(name: &str, table: &str) -> Self {
        let dir = TestDir::new(name);
        let root = dir.mkdir("www");
        dir.write("secret.txt", b"top secret");
        let table = dir.write("redirects.txt", table.as_bytes());
        Self { dir, root, table }
    }

    pub fn file(&self, rel: &str, contents: &[u8]) -> PathBuf {
        self.dir.write(&format!("www/{rel}"), contents)
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::new(Catalog::new(
            Arc::from(self.root.as_path()),
            RedirectTable::new(&self.table),
            CannedResponses::new("test-server"),
        ))
    }
}
