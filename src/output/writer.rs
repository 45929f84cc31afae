use crate::ai::mime::extension_for_mime;
use crate::{Error, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Highest numeric suffix tried when the target name is already taken.
pub const MAX_DEDUP_SUFFIX: usize = 999;

const FILENAME_PREFIX: &str = "naba";

/// Writes decoded images to disk without clobbering existing files.
#[derive(Debug, Clone, Default)]
pub struct OutputWriter {
    default_dir: Option<PathBuf>,
}

impl OutputWriter {
    pub fn new(default_dir: Option<PathBuf>) -> Self {
        Self { default_dir }
    }

    /// Write one image and return the absolute path it landed at.
    ///
    /// `index` is the position of this image among the outputs of one
    /// invocation; every image after the first gets a `-{index+1}` suffix.
    pub fn write_image(
        &self,
        data: &[u8],
        mime_type: &str,
        requested: Option<&Path>,
        command: &str,
        index: usize,
    ) -> Result<PathBuf> {
        let timestamp = Local::now().format("%Y%m%d-%H%M%S").to_string();
        let target = self.resolve_path(mime_type, requested, command, index, &timestamp);

        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(Error::CreateDir)?;
            }
        }

        let target = dedup(&target)?;
        fs::write(&target, data).map_err(Error::WriteImage)?;
        tracing::info!("Wrote {} bytes to {}", data.len(), target.display());

        Ok(std::path::absolute(&target).unwrap_or(target))
    }

    fn resolve_path(
        &self,
        mime_type: &str,
        requested: Option<&Path>,
        command: &str,
        index: usize,
        timestamp: &str,
    ) -> PathBuf {
        match requested {
            Some(dir) if dir.is_dir() => {
                dir.join(synthesize_filename(command, mime_type, index, timestamp))
            }
            Some(path) if index > 0 => with_suffix(path, index + 1),
            Some(path) => path.to_path_buf(),
            None => {
                let name = synthesize_filename(command, mime_type, index, timestamp);
                match &self.default_dir {
                    Some(dir) => dir.join(name),
                    None => PathBuf::from(name),
                }
            }
        }
    }
}

/// `naba-{command}-{timestamp}{ext}`, with `-{index+1}` for later images.
pub fn synthesize_filename(command: &str, mime_type: &str, index: usize, timestamp: &str) -> String {
    let ext = extension_for_mime(mime_type);
    if index > 0 {
        format!("{}-{}-{}-{}{}", FILENAME_PREFIX, command, timestamp, index + 1, ext)
    } else {
        format!("{}-{}-{}{}", FILENAME_PREFIX, command, timestamp, ext)
    }
}

/// Insert `-{suffix}` between the file stem and its extension.
pub fn with_suffix(path: &Path, suffix: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}-{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}-{}", stem, suffix),
    };
    path.with_file_name(name)
}

/// First of `path`, `path-1`, `path-2`, ... that does not exist yet.
fn dedup(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Ok(path.to_path_buf());
    }

    for i in 1..=MAX_DEDUP_SUFFIX {
        let candidate = with_suffix(path, i);
        if !candidate.exists() {
            tracing::debug!(
                "{} exists, writing to {} instead",
                path.display(),
                candidate.display()
            );
            return Ok(candidate);
        }
    }

    Err(Error::NameExhausted(path.to_path_buf()))
}
