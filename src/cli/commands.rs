use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Extract build variables from files and command output
#[derive(Parser, Debug)]
#[command(
    name = "varextract",
    about = "Extract build variables from files and command output",
    version,
    long_about = "varextract runs an ordered list of extractors (file name, file content, \
                  command output, properties file) against a workspace and prints the \
                  merged variables. Extractor settings may reference ${NAME} or $NAME \
                  placeholders resolved from the environment."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress audit output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Run the configured extractors and print the variables",
        long_about = "Runs every extractor in the spec file in order. Later extractors \
                      overwrite variables of earlier ones. Any failure aborts the run and \
                      prints nothing on stdout.\n\n\
                      Examples:\n  \
                      varextract extract -c varextract.yaml\n  \
                      varextract extract -c spec.toml --root /build/checkout --format json\n  \
                      varextract extract -c spec.yaml --env BUILD_NUMBER=42 --clean-env"
    )]
    Extract(ExtractArgs),

    #[command(
        about = "Check that a spec file parses and its patterns compile",
        long_about = "Loads the spec file, expands placeholders and compiles every \
                      pattern without touching the workspace.\n\n\
                      Examples:\n  \
                      varextract validate -c varextract.yaml"
    )]
    Validate(ValidateArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(
        short = 'c',
        long,
        value_name = "FILE",
        help = "Extractor spec file (.yaml, .yml, .json or .toml)"
    )]
    pub config: PathBuf,

    #[arg(
        long,
        value_name = "DIR",
        help = "Workspace root (defaults to VAREXTRACT_ROOT or the current directory)"
    )]
    pub root: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        help = "Output format (defaults to VAREXTRACT_FORMAT or properties)"
    )]
    pub format: Option<OutputFormatArg>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        short = 'e',
        long = "env",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        help = "Add or override a placeholder variable (repeatable)"
    )]
    pub env: Vec<(String, String)>,

    #[arg(
        long,
        help = "Expand placeholders from --env entries only; commands still inherit the process environment"
    )]
    pub clean_env: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(
        short = 'c',
        long,
        value_name = "FILE",
        help = "Extractor spec file (.yaml, .yml, .json or .toml)"
    )]
    pub config: PathBuf,

    #[arg(
        short = 'e',
        long = "env",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        help = "Add or override a placeholder variable (repeatable)"
    )]
    pub env: Vec<(String, String)>,

    #[arg(
        long,
        help = "Expand placeholders from --env entries only; commands still inherit the process environment"
    )]
    pub clean_env: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Properties,
    Shell,
    Json,
    Yaml,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Properties => super::output::OutputFormat::Properties,
            OutputFormatArg::Shell => super::output::OutputFormat::Shell,
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
        }
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid KEY=VALUE: no '=' found in '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Invalid KEY=VALUE: empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}
