use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use blogmark_core::CollisionPolicy;
use blogmark_logging::{bm_debug, bm_info};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::filename::{disambiguated_filename, slug_filename};
use crate::frontmatter::quote;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Writes files under one directory through a temp file and a rename, so a
/// reader never sees a half-written document.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Write `{dir}/{filename}`, replacing an existing file.
    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        let target = self.dir.join(filename);
        self.persist(content, &target, true)?;
        Ok(target)
    }

    /// Write a document named after `title`.
    ///
    /// With [`CollisionPolicy::Suffix`] an existing `{slug}.md` converted from a
    /// different URL is kept and the document goes to `{slug}-{hash of url}.md`
    /// instead. Both names are replaced when re-converting the same URL.
    pub fn write_titled(
        &self,
        title: &str,
        url: &str,
        content: &str,
        collision: CollisionPolicy,
    ) -> Result<PathBuf, PersistError> {
        let target = self.dir.join(slug_filename(title));
        match collision {
            CollisionPolicy::Overwrite => {
                self.persist(content, &target, true)?;
                Ok(target)
            }
            CollisionPolicy::Suffix => {
                if self.persist(content, &target, false)? {
                    return Ok(target);
                }
                if written_from(&target, url) {
                    self.persist(content, &target, true)?;
                    return Ok(target);
                }
                let fallback = self.dir.join(disambiguated_filename(title, url));
                bm_info!(
                    "{} already exists, writing {} instead",
                    target.display(),
                    fallback.display()
                );
                self.persist(content, &fallback, true)?;
                Ok(fallback)
            }
        }
    }

    /// Returns `false` without writing when `replace` is off and `target` exists.
    fn persist(&self, content: &str, target: &Path, replace: bool) -> Result<bool, PersistError> {
        ensure_output_dir(&self.dir)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        if replace {
            tmp.persist(target).map_err(|e| PersistError::Io(e.error))?;
            bm_debug!("Wrote {} bytes to {}", content.len(), target.display());
            return Ok(true);
        }
        match tmp.persist_noclobber(target) {
            Ok(_) => {
                bm_debug!("Wrote {} bytes to {}", content.len(), target.display());
                Ok(true)
            }
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(PersistError::Io(e.error)),
        }
    }
}

/// Whether the frontmatter of the document at `path` names `url` as its source.
fn written_from(path: &Path, url: &str) -> bool {
    let needle = format!("{}: {}", quote("url"), quote(url));
    match fs::read_to_string(path) {
        Ok(text) => text
            .lines()
            .skip(1)
            .take_while(|line| *line != "---")
            .any(|line| line == needle),
        Err(_) => false,
    }
}

/// Write `content` to an explicit file path, creating parent directories.
pub fn write_to_path(path: &Path, content: &str) -> Result<PathBuf, PersistError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| PersistError::OutputDir(format!("{} has no file name", path.display())))?;
    AtomicFileWriter::new(parent).write(filename, content)?;
    Ok(path.to_path_buf())
}
