use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Image bytes on disk for the lifetime of one pipeline invocation. The file is removed when
/// the value is dropped, on every exit path.
#[derive(Debug)]
pub struct ScopedImage {
    file: NamedTempFile,
}

impl ScopedImage {
    /// Writes `bytes` to a new file in `dir` (system temp dir when `None`).
    pub fn write(dir: Option<&Path>, bytes: &[u8], extension: &str) -> io::Result<Self> {
        let suffix = format!(".{}", extension);
        let mut builder = tempfile::Builder::new();
        builder.prefix("translator-bot-").suffix(&suffix);
        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(bytes)?;
        file.flush()?;
        debug!(path = %file.path().display(), bytes = bytes.len(), "Wrote temp image");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl Drop for ScopedImage {
    fn drop(&mut self) {
        debug!(path = %self.file.path().display(), "Releasing temp image");
    }
}
