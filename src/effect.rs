//! Effects - side effects declared by the reducer

use std::path::PathBuf;

/// File reads the runtime performs on the reducer's behalf
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Read and parse the catalog file
    LoadCatalog { path: PathBuf },
    /// Decode an image asset; `key` is the path as written in the data
    LoadImage { key: String, path: PathBuf },
}
