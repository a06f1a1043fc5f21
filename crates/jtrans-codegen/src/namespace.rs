//! Nested C++ namespace openings and closings in the head section.

use crate::error::Result;
use crate::sections::{Section, SectionBuffers};
use crate::validate::check_identifier;
use jtrans_ast::NamespacePath;
use smol_str::SmolStr;

/// Tracks which namespace segments are currently open.
#[derive(Debug, Default, Clone)]
pub struct NamespaceResolver {
    open: Vec<SmolStr>,
}

impl NamespaceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Segments currently open, outermost first.
    pub fn open_segments(&self) -> &[SmolStr] {
        &self.open
    }

    /// Make `path` the current namespace.
    ///
    /// Segments already open as a common prefix are reused. Open segments
    /// past that prefix are closed innermost first, then the remainder of
    /// `path` is opened, separated from the closings by a blank line. An
    /// empty path does nothing. Returns the number of lines written.
    pub fn open_namespace(&mut self, out: &mut SectionBuffers, path: &NamespacePath) -> Result<usize> {
        if path.is_root() {
            return Ok(0);
        }
        let context = path.to_string();
        for segment in path.segments() {
            check_identifier(&context, "namespace segment", segment)?;
        }

        let common = self
            .open
            .iter()
            .zip(path.segments())
            .take_while(|(open, wanted)| open == wanted)
            .count();

        let mut written = self.close_to(out, common);
        if written > 0 && common < path.len() {
            out.blank(Section::Head);
        }
        for segment in &path.segments()[common..] {
            out.line(Section::Head, &format!("namespace {} {{", segment));
            out.indent(Section::Head);
            self.open.push(segment.clone());
            written += 1;
        }
        Ok(written)
    }

    /// Close every open segment in reverse order, returning the head's
    /// indent depth to where it was before the first opening.
    pub fn close_all(&mut self, out: &mut SectionBuffers) -> usize {
        self.close_to(out, 0)
    }

    fn close_to(&mut self, out: &mut SectionBuffers, depth: usize) -> usize {
        let mut written = 0;
        while self.open.len() > depth {
            self.open.pop();
            out.dedent(Section::Head);
            out.line(Section::Head, "}");
            written += 1;
        }
        written
    }
}
