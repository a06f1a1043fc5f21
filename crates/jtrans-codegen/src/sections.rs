//! Output buffers for the three sections of a generated header.
//!
//! Each section owns its own indent depth. Namespaces opened in the head do
//! not shift the class declarations, and indenting a struct body never leaks
//! into the vtable section.

/// A region of the generated header. Rendered in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Preamble and namespace openings/closings.
    Head,
    /// Forward declarations and struct bodies.
    ClassDecls,
    /// Vtable structs.
    VTables,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Head, Section::ClassDecls, Section::VTables];

    fn index(self) -> usize {
        match self {
            Section::Head => 0,
            Section::ClassDecls => 1,
            Section::VTables => 2,
        }
    }
}

#[derive(Debug, Default, Clone)]
struct Buffer {
    text: String,
    depth: usize,
}

/// Append-only section buffers with per-section indentation.
#[derive(Debug, Clone)]
pub struct SectionBuffers {
    buffers: [Buffer; 3],
    indent_unit: String,
    /// Sections already rendered by [`SectionBuffers::flush`].
    flushed: String,
}

impl Default for SectionBuffers {
    fn default() -> Self {
        Self::new("    ")
    }
}

impl SectionBuffers {
    pub fn new(indent_unit: impl Into<String>) -> Self {
        Self {
            buffers: Default::default(),
            indent_unit: indent_unit.into(),
            flushed: String::new(),
        }
    }

    /// Append `text` to `section`, optionally prefixed by the section's
    /// current indentation, followed by `trailing_newlines` newlines.
    ///
    /// Empty text is never indented so blank lines carry no whitespace.
    pub fn write(&mut self, section: Section, text: &str, indent_before: bool, trailing_newlines: usize) {
        let buffer = &mut self.buffers[section.index()];
        if indent_before && !text.is_empty() {
            for _ in 0..buffer.depth {
                buffer.text.push_str(&self.indent_unit);
            }
        }
        buffer.text.push_str(text);
        for _ in 0..trailing_newlines {
            buffer.text.push('\n');
        }
    }

    /// Write one indented line.
    pub fn line(&mut self, section: Section, text: &str) {
        self.write(section, text, true, 1);
    }

    /// Write an empty line.
    pub fn blank(&mut self, section: Section) {
        self.write(section, "", false, 1);
    }

    pub fn indent(&mut self, section: Section) {
        self.buffers[section.index()].depth += 1;
    }

    pub fn dedent(&mut self, section: Section) {
        let buffer = &mut self.buffers[section.index()];
        buffer.depth = buffer.depth.saturating_sub(1);
    }

    pub fn depth(&self, section: Section) -> usize {
        self.buffers[section.index()].depth
    }

    /// Text written to `section` since the last flush.
    pub fn pending(&self, section: Section) -> &str {
        &self.buffers[section.index()].text
    }

    /// Move the pending text of all sections, in render order, into the
    /// finished output. Indent depths are kept.
    pub fn flush(&mut self) {
        for section in Section::ALL {
            let buffer = &mut self.buffers[section.index()];
            self.flushed.push_str(&buffer.text);
            buffer.text.clear();
        }
    }

    /// Everything written so far: flushed output followed by the pending
    /// head, class declarations and vtables.
    pub fn render(&self) -> String {
        let mut out = self.flushed.clone();
        for section in Section::ALL {
            out.push_str(&self.buffers[section.index()].text);
        }
        out
    }

    pub fn into_string(mut self) -> String {
        self.flush();
        self.flushed
    }
}
