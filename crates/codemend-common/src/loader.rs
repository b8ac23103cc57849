//! Resource loading context for the configuration pipeline.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

static NEXT_LOADER_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity token for a [`ResourceLoader`].
///
/// Two loaders never share a token, so comparing tokens answers "is this the
/// same loading context?" without inspecting root directories. The component
/// registry uses this as its rebuild signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoaderId(u64);

/// Ordered set of resource roots searched by relative path.
///
/// Descriptor fragments and other well-known resources are resolved against
/// each root in order; the first root containing the path wins.
#[derive(Debug)]
pub struct ResourceLoader {
    id: LoaderId,
    roots: Vec<PathBuf>,
}

impl ResourceLoader {
    /// Create a loader over the given roots with a fresh identity token.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        let id = LoaderId(NEXT_LOADER_ID.fetch_add(1, Ordering::Relaxed));
        Self { id, roots }
    }

    /// The identity token assigned at construction.
    pub fn id(&self) -> LoaderId {
        self.id
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Resolve a relative resource path to the first root that contains it.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> Option<PathBuf> {
        let relative = relative.as_ref();
        let resolved = self
            .roots
            .iter()
            .map(|root| root.join(relative))
            .find(|candidate| candidate.is_file());
        if resolved.is_none() {
            trace!(resource = %relative.display(), "resource not found in any root");
        }
        resolved
    }

    /// Read a resource to a string, failing with `NotFound` if no root
    /// contains it.
    pub fn read(&self, relative: impl AsRef<Path>) -> io::Result<String> {
        let relative = relative.as_ref();
        match self.resolve(relative) {
            Some(path) => fs::read_to_string(path),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("resource not found: {}", relative.display()),
            )),
        }
    }

    /// List file names under a relative directory, merged across every root.
    ///
    /// Names are sorted and de-duplicated; roots missing the directory are
    /// skipped.
    pub fn list(&self, relative_dir: impl AsRef<Path>) -> Vec<String> {
        let relative_dir = relative_dir.as_ref();
        let mut names = BTreeSet::new();
        for root in &self.roots {
            let dir = root.join(relative_dir);
            let Ok(entries) = fs::read_dir(&dir) else {
                continue;
            };
            for entry in entries.flatten() {
                if entry.path().is_file() {
                    if let Some(name) = entry.file_name().to_str() {
                        names.insert(name.to_string());
                    }
                }
            }
        }
        names.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn root_with(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, contents) in files {
            let path = dir.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }
        dir
    }

    #[test]
    fn loaders_get_distinct_ids() {
        let a = ResourceLoader::new(vec![]);
        let b = ResourceLoader::new(vec![]);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn resolve_prefers_earlier_roots() {
        let first = root_with(&[("conf/app.toml", "first")]);
        let second = root_with(&[("conf/app.toml", "second")]);
        let loader =
            ResourceLoader::new(vec![first.path().to_path_buf(), second.path().to_path_buf()]);

        let resolved = loader.resolve("conf/app.toml").unwrap();
        assert!(resolved.starts_with(first.path()));
        assert_eq!(loader.read("conf/app.toml").unwrap(), "first");
    }

    #[test]
    fn read_missing_resource_is_not_found() {
        let root = root_with(&[]);
        let loader = ResourceLoader::new(vec![root.path().to_path_buf()]);

        let err = loader.read("nope.toml").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn list_merges_and_sorts_across_roots() {
        let first = root_with(&[("meta/b.toml", ""), ("meta/a.toml", "")]);
        let second = root_with(&[("meta/c.toml", ""), ("meta/a.toml", "")]);
        let loader =
            ResourceLoader::new(vec![first.path().to_path_buf(), second.path().to_path_buf()]);

        assert_eq!(loader.list("meta"), vec!["a.toml", "b.toml", "c.toml"]);
        assert!(loader.list("missing").is_empty());
    }
}
