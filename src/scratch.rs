//! Scratch-file staging for uploaded artifacts.
//!
//! Collaborator clients read their inputs from disk, so each upload is
//! written to a uniquely named file first. The uploaded filename contributes
//! only its extension; the name itself is a fresh UUID, so concurrent
//! requests carrying identical filenames can never collide. Removal is tied
//! to the handle's lifetime: dropping a [`ScratchFile`] deletes the file on
//! every exit path, success or failure.

use std::path::{Path, PathBuf};

use tracing::warn;
use uuid::Uuid;

use crate::Result;

const SCRATCH_PREFIX: &str = "consult";
const MAX_EXTENSION_LEN: usize = 16;

/// A staged upload on disk, removed when the handle drops.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// Write `contents` to a uniquely named file under `dir`.
    ///
    /// The extension of `uploaded_name` is preserved (lowercased) when it is
    /// plain ASCII alphanumeric; anything else is dropped. The rest of the
    /// uploaded name never reaches the filesystem.
    pub async fn stage(dir: &Path, uploaded_name: &str, contents: &[u8]) -> Result<Self> {
        let path = dir.join(scratch_name(uploaded_name));
        tokio::fs::write(&path, contents).await?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        // Best effort: a failed removal must never mask the request outcome.
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "failed to remove scratch file"
                );
            }
        }
    }
}

fn scratch_name(uploaded_name: &str) -> String {
    let stem = Uuid::new_v4().simple().to_string();
    match sanitized_extension(uploaded_name) {
        Some(ext) => format!("{}-{}.{}", SCRATCH_PREFIX, stem, ext),
        None => format!("{}-{}", SCRATCH_PREFIX, stem),
    }
}

fn sanitized_extension(uploaded_name: &str) -> Option<String> {
    let ext = Path::new(uploaded_name).extension()?.to_str()?;
    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
