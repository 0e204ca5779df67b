pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_SHORT: char = 'h';
pub(crate) const HELP_MESSAGE: &str = "display this help message";
pub(crate) const VERSION_NAME: &str = "version";
pub(crate) const VERSION_MESSAGE: &str = "display version string";
pub(crate) const SEPARATOR: &str = "--";
pub(crate) const DEFAULT_STDIN_NAME: &str = "data";
