//! mdnov format engine: whole-document text serialization.
//!
//! # Responsibility
//! - Read and write the single-file line-oriented project format:
//!   `@@` element blocks with `---` metadata fences and `%%` tagged
//!   bodies, plus the trailing `@@Progress` word-count block.
//! - Keep the backup-then-replace write discipline.
//!
//! # Invariants
//! - Reading is one forward scan; block order carries parentage
//!   (sections follow their chapter, plot points their plot line).
//! - A structural violation is fatal to the read and reported as
//!   corrupt project data; dangling references are not structural and
//!   are left for the reconciler.
//! - Body and link lines whose first token is an `@@` or `%%` marker
//!   are backslash-escaped on write and unescaped on read, so prose
//!   never collides with structure.

mod reader;
mod writer;

pub use reader::parse_mdnov;
pub use writer::render_mdnov;

use crate::model::id::{Category, ElementId, ParseIdError};
use crate::model::novel::Novel;
use crate::wc::WcLog;
use log::info;
use std::borrow::Cow;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// File extension of mdnov projects.
pub const EXTENSION: &str = "mdnov";

/// Structural corruption inside an mdnov document.
#[derive(Debug)]
pub enum FormatError {
    /// An `@@` tag that is neither `book`, `Progress`, nor a valid
    /// element ID.
    BadElementId(ParseIdError),
    /// An inline ID of the wrong category, e.g. a `%%Plotline:` tag
    /// naming a section.
    WrongCategory {
        id: ElementId,
        expected: Category,
    },
    /// A `%%` body tag with no open element block.
    TagOutsideElement(String),
    /// A section block before any chapter block.
    OrphanSection(ElementId),
    /// A plot point block before any plot line block.
    OrphanPlotPoint(ElementId),
    /// A metadata fence opened but never closed within its block.
    UnclosedMeta(String),
    /// A `%%Plotline note:` tag without a preceding `%%Plotline:` tag.
    NoteWithoutPlotline,
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadElementId(err) => write!(f, "{err}"),
            Self::WrongCategory { id, expected } => {
                write!(f, "expected a {expected} ID, got `{id}`")
            }
            Self::TagOutsideElement(tag) => {
                write!(f, "body tag `%%{tag}:` outside any element block")
            }
            Self::OrphanSection(id) => {
                write!(f, "section `{id}` appears before any chapter block")
            }
            Self::OrphanPlotPoint(id) => {
                write!(f, "plot point `{id}` appears before any plot line block")
            }
            Self::UnclosedMeta(id) => {
                write!(f, "unclosed metadata block in `{id}`")
            }
            Self::NoteWithoutPlotline => {
                write!(f, "plot line note without a preceding `%%Plotline:` tag")
            }
        }
    }
}

impl Error for FormatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::BadElementId(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseIdError> for FormatError {
    fn from(value: ParseIdError) -> Self {
        Self::BadElementId(value)
    }
}

/// Errors from reading or writing a project file.
#[derive(Debug)]
pub enum MdnovError {
    /// Structurally corrupt project data.
    Corrupt {
        path: PathBuf,
        source: FormatError,
    },
    /// The file could not be read.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file could not be written (the backup, if any, has been
    /// restored).
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The pre-write backup rename failed; the target is untouched.
    Backup {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for MdnovError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Corrupt { path, source } => {
                write!(f, "corrupt project data in `{}`: {source}", path.display())
            }
            Self::Read { path, source } => {
                write!(f, "cannot read `{}`: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "cannot write `{}`: {source}", path.display())
            }
            Self::Backup { path, source } => {
                write!(f, "cannot back up `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for MdnovError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Corrupt { source, .. } => Some(source),
            Self::Read { source, .. } | Self::Write { source, .. } | Self::Backup { source, .. } => {
                Some(source)
            }
        }
    }
}

/// Reads `path` into `novel` and `wc_log`.
///
/// A failed read can leave `novel` partially populated; callers must
/// discard it instead of reusing it.
pub fn read_mdnov_file(path: &Path, novel: &mut Novel, wc_log: &mut WcLog) -> Result<(), MdnovError> {
    let text = std::fs::read_to_string(path).map_err(|source| MdnovError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_mdnov(&text, novel, wc_log).map_err(|source| MdnovError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "event=project_read status=ok path={} chapters={} sections={}",
        path.display(),
        novel.chapters.len(),
        novel.sections.len()
    );
    Ok(())
}

/// Renders and writes the project, backup-then-replace.
///
/// An existing target is renamed to `<path>.bak` first. When the write
/// fails the backup is restored and the error propagated; when it
/// succeeds the backup remains as a recovery artifact.
pub fn write_mdnov_file(path: &Path, novel: &Novel, wc_log: &WcLog) -> Result<(), MdnovError> {
    let text = render_mdnov(novel, wc_log);
    let backup = backup_path(path);
    let mut backed_up = false;
    if path.is_file() {
        std::fs::rename(path, &backup).map_err(|source| MdnovError::Backup {
            path: path.to_path_buf(),
            source,
        })?;
        backed_up = true;
    }
    if let Err(source) = std::fs::write(path, text) {
        if backed_up {
            // Best effort: the original error is the one worth reporting.
            let _ = std::fs::rename(&backup, path);
        }
        return Err(MdnovError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    info!("event=project_write status=ok path={}", path.display());
    Ok(())
}

fn backup_path(path: &Path) -> PathBuf {
    let mut backup = path.as_os_str().to_os_string();
    backup.push(".bak");
    PathBuf::from(backup)
}

/// True when the first token after the optional backslash run is a
/// structural marker.
fn leads_with_marker(stripped: &str) -> bool {
    let bare = stripped.trim_start_matches('\\');
    bare.starts_with("@@") || bare.starts_with("%%")
}

/// Escapes a body or link line that would otherwise be read back as
/// structure. Lines already carrying backslashes in front of a marker
/// get one more, keeping the pair with [`unescape_marker_line`]
/// lossless.
pub(crate) fn escape_marker_line(line: &str) -> Cow<'_, str> {
    let stripped = line.trim_start();
    if !leads_with_marker(stripped) {
        return Cow::Borrowed(line);
    }
    let indent = line.len() - stripped.len();
    let mut escaped = String::with_capacity(line.len() + 1);
    escaped.push_str(&line[..indent]);
    escaped.push('\\');
    escaped.push_str(stripped);
    Cow::Owned(escaped)
}

/// Reverses [`escape_marker_line`]: drops one backslash in front of a
/// marker token, leaving any other line untouched.
pub(crate) fn unescape_marker_line(line: &str) -> Cow<'_, str> {
    let stripped = line.trim_start();
    if !stripped.starts_with('\\') || !leads_with_marker(stripped) {
        return Cow::Borrowed(line);
    }
    let indent = line.len() - stripped.len();
    let mut unescaped = String::with_capacity(line.len() - 1);
    unescaped.push_str(&line[..indent]);
    unescaped.push_str(&stripped[1..]);
    Cow::Owned(unescaped)
}

#[cfg(test)]
mod tests {
    use super::{escape_marker_line, unescape_marker_line};

    #[test]
    fn marker_lines_are_escaped_and_restored() {
        let cases = [
            ("@@ch9 on the forum", "\\@@ch9 on the forum"),
            ("%%Notes: she wrote", "\\%%Notes: she wrote"),
            ("  @@indented", "  \\@@indented"),
            ("\\@@already literal", "\\\\@@already literal"),
        ];
        for (plain, escaped) in cases {
            assert_eq!(escape_marker_line(plain), escaped);
            assert_eq!(unescape_marker_line(escaped), plain);
        }
    }

    #[test]
    fn ordinary_lines_pass_through() {
        for line in ["plain prose", "", "a @@ in the middle", "---", "\\no marker"] {
            assert_eq!(escape_marker_line(line), line);
            assert_eq!(unescape_marker_line(line), line);
        }
    }
}
