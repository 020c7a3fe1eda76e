// ABOUTME: Version and banner constants surfaced by the CLI and REPL

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const WELCOME_MESSAGE: &str = "Lisp Interpreter";
pub const WELCOME_SUBTITLE: &str = "A small Scheme-flavored Lisp with a mark-and-sweep heap";

/// The global binding name under which the standard output port lives.
pub const STD_OUTPUT_PORT: &str = "std-output-port";
