//! Loading and saving documents, plus the editing session.
//!
//! Format is chosen by file extension: `.rtf` goes through the RTF codec,
//! everything else is a raw UTF-8 text dump. Loads read the file exactly
//! once; saves build the full byte string in memory before a single write
//! call, so a failed save never leaves a half-written document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::rtf;
use crate::surface::TextSurface;

/// On-disk formats a document can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Rtf,
    Plain,
}

impl FileFormat {
    /// Pick a format from the file extension (`.rtf`, case-insensitive).
    pub fn detect(path: &Path) -> Self {
        let is_rtf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("rtf"));
        if is_rtf { Self::Rtf } else { Self::Plain }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not valid UTF-8", path.display())]
    InvalidUtf8 { path: PathBuf },
}

/// A freshly loaded document.
#[derive(Debug)]
pub struct LoadedDocument {
    pub surface: TextSurface,
    /// True when an RTF load hit the fatal parse path and the same bytes
    /// were re-read as plain text instead.
    pub fell_back_to_plain: bool,
}

/// Read `path` into a new text surface.
///
/// The RTF parser itself is total; the one structural failure an RTF load
/// can hit is undecodable bytes. In that case the loader warns, re-reads
/// the same bytes as lossy plain text, and reports the fallback so the UI
/// can tell the user, rather than leaving them with a blank document.
/// Plain-text loads surface the encoding error instead of guessing.
pub fn load_document(path: &Path, format: FileFormat) -> Result<LoadedDocument, StorageError> {
    let bytes = fs::read(path).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    match format {
        FileFormat::Rtf => match String::from_utf8(bytes) {
            Ok(text) => {
                let mut surface = TextSurface::empty();
                rtf::decode(&text, &mut surface);
                surface.mark_clean();
                Ok(LoadedDocument {
                    surface,
                    fell_back_to_plain: false,
                })
            }
            Err(err) => {
                warn!(path = %path.display(), "RTF load failed, falling back to plain text");
                let text = String::from_utf8_lossy(err.as_bytes());
                Ok(LoadedDocument {
                    surface: TextSurface::from_text(&text),
                    fell_back_to_plain: true,
                })
            }
        },
        FileFormat::Plain => {
            let text = String::from_utf8(bytes).map_err(|_| StorageError::InvalidUtf8 {
                path: path.to_path_buf(),
            })?;
            Ok(LoadedDocument {
                surface: TextSurface::from_text(&text),
                fell_back_to_plain: false,
            })
        }
    }
}

/// Write the surface to `path` in the given format.
pub fn save_document(
    path: &Path,
    surface: &TextSurface,
    format: FileFormat,
) -> Result<(), StorageError> {
    let bytes = match format {
        FileFormat::Rtf => rtf::encode(surface),
        FileFormat::Plain => surface.text(),
    };
    fs::write(path, bytes).map_err(|source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// The editing session: which file the buffer belongs to.
#[derive(Debug, Clone, Default)]
pub struct Session {
    path: Option<PathBuf>,
    force_plain: bool,
}

impl Session {
    /// An unsaved, untitled session.
    pub const fn untitled() -> Self {
        Self {
            path: None,
            force_plain: false,
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            force_plain: false,
        }
    }

    /// Force plain-text interpretation regardless of extension.
    #[must_use]
    pub const fn force_plain(mut self, force: bool) -> Self {
        self.force_plain = force;
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub const fn forced_plain(&self) -> bool {
        self.force_plain
    }

    pub fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    /// The format the session saves and loads in.
    pub fn format(&self) -> FileFormat {
        if self.force_plain {
            return FileFormat::Plain;
        }
        self.path.as_deref().map_or(FileFormat::Plain, FileFormat::detect)
    }

    /// The file name shown in the title bar.
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map_or_else(|| "Untitled".to_string(), |n| n.to_string_lossy().into_owned())
    }

    /// Window/status title, with a marker for unsaved changes.
    pub fn title(&self, dirty: bool) -> String {
        let marker = if dirty { " [+]" } else { "" };
        format!("scriv - {}{marker}", self.display_name())
    }
}
