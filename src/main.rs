use varextract::cli::commands::{CliArgs, Commands};
use varextract::cli::handlers::{handle_extract, handle_validate};
use varextract::util::{init_logging, LoggingConfig};
use varextract::VERSION;

use clap::Parser;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();
    init_logging(LoggingConfig::from_cli(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
    ));

    debug!("varextract v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Extract(extract_args) => handle_extract(extract_args, args.quiet),
        Commands::Validate(validate_args) => handle_validate(validate_args, args.quiet),
    };

    std::process::exit(exit_code);
}
