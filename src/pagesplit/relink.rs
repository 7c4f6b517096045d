//! # Relinking
//!
//! When a project's images move on disk, every stored [`ImageId`](crate::model::ImageId)
//! has to be rewritten to point at the new location. The store does not know how
//! paths moved; it asks a [`Relinker`] for each stored path and rebuilds its map
//! from the answers.
//!
//! A relinker must map distinct old paths to distinct new paths. The store does
//! not merge records whose keys collide after substitution.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// An image file path handed to a [`Relinker`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelinkablePath {
    path: PathBuf,
}

impl RelinkablePath {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub trait Relinker {
    /// Returns the path that should replace `path`. Unknown paths come back unchanged.
    fn substitution_path_for(&self, path: &RelinkablePath) -> PathBuf;
}

impl<F> Relinker for F
where
    F: Fn(&RelinkablePath) -> PathBuf,
{
    fn substitution_path_for(&self, path: &RelinkablePath) -> PathBuf {
        self(path)
    }
}

/// Relinker driven by explicit `from -> to` mappings.
///
/// An exact mapping for the path wins. Otherwise the longest mapped ancestor
/// directory is substituted and the rest of the path is re-appended, so mapping
/// `/scans -> /archive/scans` moves `/scans/book/001.tif` as well.
#[derive(Debug, Clone, Default)]
pub struct PathMapRelinker {
    mappings: BTreeMap<PathBuf, PathBuf>,
}

impl PathMapRelinker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mapping(&mut self, from: impl Into<PathBuf>, to: impl Into<PathBuf>) {
        self.mappings.insert(from.into(), to.into());
    }

    pub fn with_mapping(mut self, from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        self.add_mapping(from, to);
        self
    }
}

impl Relinker for PathMapRelinker {
    fn substitution_path_for(&self, path: &RelinkablePath) -> PathBuf {
        let path = path.path();
        if let Some(to) = self.mappings.get(path) {
            return to.clone();
        }

        // `ancestors()` yields the longest prefix first.
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            if let Some(to) = self.mappings.get(ancestor) {
                if let Ok(rest) = path.strip_prefix(ancestor) {
                    return to.join(rest);
                }
            }
        }

        path.to_path_buf()
    }
}
