use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use shared::status::{read_log, StatusEntry};
use tokio::{fs, io::AsyncWriteExt};

/// Append-only text file holding one closed status interval per line.
#[derive(Debug, Clone)]
pub struct StatusLog {
    path: PathBuf,
}

impl StatusLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty log.
    pub async fn entries(&self) -> io::Result<Vec<StatusEntry>> {
        match fs::read_to_string(&self.path).await {
            Ok(text) => Ok(read_log(&text)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(error) => Err(error),
        }
    }

    pub async fn append(&self, entry: &StatusEntry) -> io::Result<()> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{}\n", entry.to_log_line()).as_bytes())
            .await?;
        file.flush().await
    }
}
