//! Input and output file locations. Allows use of "-" as a way to specify
//! stdin or stdout.

use std::fmt;
use std::fs::File;
use std::io::{self, stdin, stdout, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tempfile::{NamedTempFile, TempPath};

use crate::error::{ConvertError, Result};

/// Specifies a file to read from to write to (depending on context).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileSpec {
    /// Read from stdin or write to stdout.
    Stdio,
    /// Read from or write to the file at the given path.
    Path(PathBuf),
}

impl fmt::Display for FileSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use FileSpec::*;
        match self {
            Stdio => f.write_str("<stdio>"),
            Path(path) => write!(f, "{:?}", path),
        }
    }
}

impl FileSpec {
    pub fn reader(&self) -> Result<Box<dyn Read>> {
        use FileSpec::*;
        Ok(match self {
            Stdio => Box::new(stdin()),
            Path(path) => Box::new(File::open(path).map_err(|source| ConvertError::File {
                path: path.clone(),
                source,
            })?),
        })
    }

    /// Writes `content` to a temporary file next to the destination, without
    /// touching the destination yet. Nothing is staged for stdout.
    pub fn stage(&self, content: Vec<u8>) -> Result<StagedFile> {
        use FileSpec::*;
        match self {
            Stdio => Ok(StagedFile::Stdout(content)),
            Path(path) => {
                let file_err = |source| ConvertError::File {
                    path: path.clone(),
                    source,
                };
                let mut tmp = NamedTempFile::new_in(parent_dir(path)).map_err(file_err)?;
                tmp.write_all(&content).map_err(file_err)?;
                tmp.as_file().sync_all().map_err(file_err)?;
                Ok(StagedFile::Path {
                    tmp,
                    dest: path.clone(),
                })
            }
        }
    }
}

impl FromStr for FileSpec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use FileSpec::*;
        if s == "-" {
            Ok(Stdio)
        } else {
            Ok(Path(s.into()))
        }
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// Fully written output that has not yet replaced its destination. Dropping
/// it without committing removes the temporary file.
#[derive(Debug)]
pub enum StagedFile {
    Stdout(Vec<u8>),
    Path { tmp: NamedTempFile, dest: PathBuf },
}

impl StagedFile {
    /// Fails if the destination cannot be replaced by a file.
    pub fn check(&self) -> Result<()> {
        match self {
            StagedFile::Path { dest, .. } if dest.is_dir() => Err(ConvertError::File {
                path: dest.clone(),
                source: io::Error::new(io::ErrorKind::Other, "is a directory"),
            }),
            _ => Ok(()),
        }
    }

    /// Moves the staged content into place, keeping any file it replaces
    /// aside until the returned `Committed` is finished or rolled back.
    pub fn commit_reversibly(self) -> Result<Committed> {
        match self {
            StagedFile::Stdout(content) => {
                StagedFile::Stdout(content).commit()?;
                Ok(Committed::Stdout)
            }
            StagedFile::Path { tmp, dest } => {
                let file_err = |source| ConvertError::File {
                    path: dest.clone(),
                    source,
                };
                let previous = if dest.is_file() {
                    let backup = NamedTempFile::new_in(parent_dir(&dest))
                        .map_err(file_err)?
                        .into_temp_path();
                    std::fs::rename(&dest, &backup).map_err(file_err)?;
                    Some(backup)
                } else {
                    None
                };
                if let Err(e) = tmp.persist(&dest) {
                    if let Some(backup) = previous {
                        // Best effort; the persist error is the one reported.
                        let _ = backup.persist(&dest);
                    }
                    return Err(file_err(e.error));
                }
                Ok(Committed::Path { dest, previous })
            }
        }
    }

    /// Moves the staged content into place.
    pub fn commit(self) -> Result<()> {
        match self {
            StagedFile::Stdout(content) => {
                let mut out = stdout();
                out.write_all(&content)?;
                out.flush()?;
                Ok(())
            }
            StagedFile::Path { tmp, dest } => {
                tmp.persist(&dest).map_err(|e| ConvertError::File {
                    path: dest.clone(),
                    source: e.error,
                })?;
                Ok(())
            }
        }
    }
}

/// A committed output that can still be reverted.
#[derive(Debug)]
pub enum Committed {
    /// Already written, cannot be reverted.
    Stdout,
    Path {
        dest: PathBuf,
        /// The replaced file, if there was one.
        previous: Option<TempPath>,
    },
}

impl Committed {
    /// Puts back whatever was at the destination before the commit.
    pub fn rollback(self) -> Result<()> {
        match self {
            Committed::Stdout => Ok(()),
            Committed::Path { dest, previous } => {
                let result = match previous {
                    Some(backup) => backup.persist(&dest).map_err(|e| e.error),
                    None => std::fs::remove_file(&dest),
                };
                result.map_err(|source| ConvertError::File { path: dest, source })
            }
        }
    }

    /// Discards the replaced file.
    pub fn finish(self) {}
}
