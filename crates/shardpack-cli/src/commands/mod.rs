pub mod hook;
pub mod install;
pub mod publish;

use shardpack_core::assets::HookIo;

/// Forwards hook output to the operator's console.
pub struct ConsoleIo {
    verbose: bool,
}

impl ConsoleIo {
    #[must_use]
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl HookIo for ConsoleIo {
    fn write(&mut self, line: &str) {
        println!("{line}");
    }

    fn write_error(&mut self, line: &str) {
        eprintln!("{line}");
    }

    fn is_verbose(&self) -> bool {
        self.verbose
    }
}
