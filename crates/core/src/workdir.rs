//! The shared working directory holding downloaded pages and converted books.
//!
//! Every request writes into the same flat directory. File names are derived
//! from article titles and kept unique by [`WorkDir::allocate`], which claims a
//! name by creating the file, so two concurrent requests for articles with the
//! same title still end up with distinct files.

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::Result;

/// Handle to the working directory.
#[derive(Debug, Clone)]
pub struct WorkDir {
    root: PathBuf,
}

impl WorkDir {
    /// Opens the working directory, creating it (and its parents) if missing.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The directory itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of a file inside the working directory.
    pub fn path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Allocates a file name `base.ext` that does not exist yet.
    ///
    /// On collision a counter is appended (`base_1.ext`, `base_2.ext`, ...)
    /// until a free name is found. The returned name is claimed by creating an
    /// empty file with create-new semantics, so the next call with the same
    /// base moves on to the next counter.
    pub fn allocate(&self, base: &str, extension: &str) -> Result<String> {
        let mut file_name = format!("{base}.{extension}");
        let mut counter = 1u32;

        loop {
            match OpenOptions::new().write(true).create_new(true).open(self.path(&file_name)) {
                Ok(_) => break,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    info!("File {file_name} already exists. Renaming...");
                    file_name = format!("{base}_{counter}.{extension}");
                    counter += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        info!("Saving file as {file_name}");
        Ok(file_name)
    }

    /// Deletes every regular file in the working directory.
    ///
    /// Subdirectories and their contents are left alone. Returns the number of
    /// files removed.
    pub fn cleanup(&self) -> Result<usize> {
        let mut removed = 0;

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                let path = entry.path();
                fs::remove_file(&path)?;
                info!("Deleted file: {}", path.display());
                removed += 1;
            }
        }

        Ok(removed)
    }
}
