pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, ExtractArgs, OutputFormatArg, ValidateArgs};
pub use handlers::{handle_extract, handle_validate, ConsoleSink};
pub use output::{OutputFormat, OutputFormatter};
