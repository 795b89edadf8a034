//! Operator console abstraction for hook runs.

/// Console surface the hook writes operator messages to.
///
/// Mirrors the host package manager's IO interface: normal lines, error
/// lines, and a verbosity switch controlling subprocess passthrough. The
/// library crates stay free of logging dependencies; the CLI supplies the
/// real implementation.
pub trait HookIo {
    fn write(&mut self, line: &str);
    fn write_error(&mut self, line: &str);
    fn is_verbose(&self) -> bool {
        false
    }
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullIo;

impl HookIo for NullIo {
    fn write(&mut self, _line: &str) {}
    fn write_error(&mut self, _line: &str) {}
}

/// Buffers lines in memory, for tests asserting on notifications.
#[derive(Debug, Default)]
pub struct BufferedIo {
    pub lines: Vec<String>,
    pub errors: Vec<String>,
    pub verbose: bool,
}

impl HookIo for BufferedIo {
    fn write(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn write_error(&mut self, line: &str) {
        self.errors.push(line.to_string());
    }

    fn is_verbose(&self) -> bool {
        self.verbose
    }
}
