use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Upper bound on `_N` suffixes tried within the same second
const MAX_SUFFIX: u32 = 1000;

/// Writes synthesized audio as `<provider>_test_<YYYYMMDD_HHMMSS>.<ext>`
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist `audio` under a fresh timestamped name and return its path
    ///
    /// Never overwrites: a name already taken in the same second gets a
    /// `_1`, `_2`, ... suffix.
    pub async fn write(&self, provider: &str, extension: &str, audio: &[u8]) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let stem = format!("{provider}_test_{}", timestamp());

        for attempt in 0..MAX_SUFFIX {
            let name = if attempt == 0 {
                format!("{stem}.{extension}")
            } else {
                format!("{stem}_{attempt}.{extension}")
            };
            let path = self.dir.join(name);

            let file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            };

            persist(&path, file, audio).await?;

            tracing::debug!(path = %path.display(), bytes = audio.len(), "audio artifact written");

            return Ok(path);
        }

        Err(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("no free file name for {stem}.{extension}"),
        ))
    }
}

/// Write `audio` to the freshly created `path`, removing it again on failure
async fn persist<W: AsyncWrite + Unpin>(path: &Path, mut out: W, audio: &[u8]) -> std::io::Result<()> {
    let written = match out.write_all(audio).await {
        Ok(()) => out.flush().await,
        Err(e) => Err(e),
    };

    if let Err(e) = written {
        drop(out);
        if let Err(remove_err) = tokio::fs::remove_file(path).await {
            tracing::warn!(path = %path.display(), error = %remove_err, "failed to remove partial audio file");
        }
        return Err(e);
    }

    Ok(())
}

fn timestamp() -> String {
    jiff::Zoned::now().strftime("%Y%m%d_%H%M%S").to_string()
}
