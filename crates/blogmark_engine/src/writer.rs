use std::io;
use std::path::PathBuf;

use blogmark_core::CollisionPolicy;
use blogmark_logging::bm_debug;

use crate::persist::{write_to_path, AtomicFileWriter, PersistError};

/// Where a converted document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Exactly this file, replaced if present.
    File(PathBuf),
    /// A title-derived name inside this directory.
    Directory {
        dir: PathBuf,
        collision: CollisionPolicy,
    },
}

impl OutputTarget {
    pub fn directory(dir: impl Into<PathBuf>) -> Self {
        OutputTarget::Directory {
            dir: dir.into(),
            collision: CollisionPolicy::default(),
        }
    }
}

#[async_trait::async_trait]
pub trait Writer: Send + Sync {
    async fn write(
        &self,
        markdown: &str,
        title: &str,
        url: &str,
        target: &OutputTarget,
    ) -> Result<PathBuf, PersistError>;
}

/// Filesystem writer; the blocking IO runs off the async task.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsWriter;

#[async_trait::async_trait]
impl Writer for FsWriter {
    async fn write(
        &self,
        markdown: &str,
        title: &str,
        url: &str,
        target: &OutputTarget,
    ) -> Result<PathBuf, PersistError> {
        let markdown = markdown.to_string();
        let title = title.to_string();
        let url = url.to_string();
        let target = target.clone();

        let path = tokio::task::spawn_blocking(move || match target {
            OutputTarget::File(path) => write_to_path(&path, &markdown),
            OutputTarget::Directory { dir, collision } => {
                AtomicFileWriter::new(dir).write_titled(&title, &url, &markdown, collision)
            }
        })
        .await
        .map_err(|err| PersistError::Io(io::Error::other(err)))??;

        bm_debug!("Document written to {}", path.display());
        Ok(path)
    }
}
