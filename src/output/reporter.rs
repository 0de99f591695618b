//! Progress reporting for bump runs
//!
//! Progress goes to stdout and problems to stderr, both through `termcolor`
//! so labels are coloured on a terminal and plain in CI logs.

use crate::engine::bump::VersionChange;
use crate::types::{LibraryRef, ThemeRef};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use termcolor::{Color, ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

/// Writes progress and diagnostics for a bump run
pub struct Reporter {
    out: Box<dyn WriteColor>,
    err: Box<dyn WriteColor>,
}

impl Reporter {
    /// Creates a reporter on the process's stdout and stderr
    pub fn stdio(choice: ColorChoice) -> Self {
        Self {
            out: Box::new(StandardStream::stdout(choice)),
            err: Box::new(StandardStream::stderr(choice)),
        }
    }

    /// Creates a reporter that writes uncoloured text into memory
    pub fn capture() -> (Self, CapturedOutput) {
        let captured = CapturedOutput::default();
        let reporter = Self {
            out: Box::new(NoColor::new(captured.stdout.clone())),
            err: Box::new(NoColor::new(captured.stderr.clone())),
        };
        (reporter, captured)
    }

    /// Announces the library whose consumers are being searched
    pub fn library(&mut self, library: &LibraryRef) {
        let out = &mut *self.out;
        let result = write_label(out, "lib", Color::Cyan).and_then(|()| {
            writeln!(out, "{} (token '{}')", library, library.search_token())
        });
        best_effort(result);
    }

    /// Announces a theme whose consumers are being searched
    pub fn theme(&mut self, theme: &ThemeRef) {
        let out = &mut *self.out;
        let result = write_label(out, "theme", Color::Magenta).and_then(|()| {
            writeln!(out, "{} (token \"{}\")", theme, theme.search_token())
        });
        best_effort(result);
    }

    /// Reports the version transitions applied to one manifest
    pub fn bumped(&mut self, path: &Path, changes: &[VersionChange]) {
        best_effort(write_bumped(&mut *self.out, path, changes));
    }

    /// Reports the commit step
    pub fn publishing(&mut self, count: usize) {
        let out = &mut *self.out;
        let result = write_label(out, "git", Color::Green)
            .and_then(|()| writeln!(out, "committing {} bumped manifest(s)", count));
        best_effort(result);
    }

    /// Reports that nothing was bumped
    pub fn nothing_to_commit(&mut self) {
        best_effort(writeln!(self.out, "No manifests bumped, skipping commit"));
    }

    /// Writes an error to stderr
    pub fn error(&mut self, message: impl std::fmt::Display) {
        let err = &mut *self.err;
        let result =
            write_label(err, "Error:", Color::Red).and_then(|()| writeln!(err, "{}", message));
        best_effort(result);
    }
}

/// Progress output never decides the outcome of a run: manifests may already
/// be rewritten, so a closed stdout must not abort before the commit step.
fn best_effort(result: io::Result<()>) {
    let _ = result;
}

fn write_bumped(out: &mut dyn WriteColor, path: &Path, changes: &[VersionChange]) -> io::Result<()> {
    if changes.is_empty() {
        write!(out, "{}: ", path.display())?;
        write_label(out, "unchanged", Color::Yellow)?;
        return writeln!(out, "no version marker");
    }
    for change in changes {
        writeln!(out, "{}: {} -> {}", path.display(), change.old, change.new)?;
    }
    Ok(())
}

fn write_label(w: &mut dyn WriteColor, label: &str, color: Color) -> io::Result<()> {
    w.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(w, "{}", label)?;
    w.reset()?;
    write!(w, " ")
}

/// Shared in-memory sink
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Returns everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .0
            .lock()
            .map_err(|_| io::Error::other("output buffer poisoned"))?;
        inner.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Output captured by [`Reporter::capture`]
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    stdout: SharedBuffer,
    stderr: SharedBuffer,
}

impl CapturedOutput {
    pub fn stdout(&self) -> String {
        self.stdout.contents()
    }

    pub fn stderr(&self) -> String {
        self.stderr.contents()
    }
}
