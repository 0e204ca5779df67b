/// The channels a [`CommandParser`](crate::CommandParser) reports to.
pub trait UserInterface {
    /// Write to the output channel (help and version text).
    fn print(&self, message: &str);

    /// Write to the error channel (error message followed by the usage text).
    fn print_error(&self, message: &str);
}

/// The process's standard output and error.
#[derive(Debug, Default)]
pub struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: &str) {
        print!("{message}");
    }

    fn print_error(&self, message: &str) {
        eprint!("{message}");
    }
}
