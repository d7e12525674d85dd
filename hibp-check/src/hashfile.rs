//! Building hash files: one uppercase SHA-1 password digest per line.
//!
//! Edits are staged in a temporary file next to the target and only become
//! visible when [`HashFileBuilder::commit`] renames it over the target. Dropping
//! the builder on any other path deletes the staged file and leaves the target
//! untouched.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use hibp_range::PasswordDigest;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::Error;
use crate::password::PasswordSource;

pub struct HashFileBuilder {
    target: PathBuf,
    staged: NamedTempFile,
    added: usize,
}

impl HashFileBuilder {
    /// Starts an edit of `target`, which does not need to exist yet.
    ///
    /// Existing lines are copied into the staging file first, so a commit
    /// appends to them. The staging file takes over the target's permissions.
    pub fn open(target: impl Into<PathBuf>) -> Result<Self, Error> {
        let target = target.into();
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut staged = tempfile::Builder::new().prefix(".tmphash").tempfile_in(&dir)?;

        match fs::read(&target) {
            Ok(existing) => {
                staged.write_all(&existing)?;
                if !existing.is_empty() && !existing.ends_with(b"\n") {
                    staged.write_all(b"\n")?;
                }
                let permissions = fs::metadata(&target)?.permissions();
                staged.as_file().set_permissions(permissions)?;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        debug!(target = %target.display(), staged = %staged.path().display(), "staging hash file");
        Ok(Self { target, staged, added: 0 })
    }

    pub fn add(&mut self, digest: &PasswordDigest) -> Result<(), Error> {
        writeln!(self.staged, "{digest}")?;
        self.added += 1;
        Ok(())
    }

    /// Number of digests staged so far.
    pub fn added(&self) -> usize {
        self.added
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Atomically replaces the target with the staged contents.
    pub fn commit(self) -> Result<usize, Error> {
        let Self { target, mut staged, added } = self;

        staged.flush()?;
        staged.as_file().sync_all()?;
        staged
            .persist(&target)
            .map_err(|e| Error::Persist { path: target.clone(), source: e.error })?;

        Ok(added)
    }
}

/// How an interactive build session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Written { added: usize },
    Aborted,
}

/// Runs the interactive hash file editor.
///
/// Reads one command per line from `commands`: `a` reads a password from
/// `passwords` and stages its digest, `w` commits and ends the session, blank
/// lines prompt again, and anything else (including end of input) discards every
/// staged change.
pub fn run_builder<R, W, P>(
    mut builder: HashFileBuilder,
    mut commands: R,
    out: &mut W,
    passwords: &mut P,
) -> Result<BuildOutcome, Error>
where
    R: BufRead,
    W: Write,
    P: PasswordSource,
{
    writeln!(out, "Create/Edit a hash file. No changes will be saved until a write.\n")?;
    writeln!(out, "Commands:")?;
    writeln!(out, "a - add a password to the hash file.")?;
    writeln!(out, "w - write changes to the hash file.")?;
    writeln!(out, "anything else - abort all changes.\n")?;

    let mut line = String::new();
    loop {
        write!(out, ">> ")?;
        out.flush()?;

        line.clear();
        if commands.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        match line.trim() {
            "" => continue,
            "a" => {
                let password = passwords.read_password()?;
                let digest = PasswordDigest::of_password(&password);
                builder.add(&digest)?;
                writeln!(out, "{digest}")?;
            }
            "w" => {
                let added = builder.commit()?;
                writeln!(out, "Hash file modified.")?;
                return Ok(BuildOutcome::Written { added });
            }
            _ => break,
        }
    }

    writeln!(out, "No changes made. Exiting.")?;
    Ok(BuildOutcome::Aborted)
}
