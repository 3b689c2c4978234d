use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tuiarea")]
#[command(about = "Multi-line terminal text input with wide-character aware navigation")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Start in overwrite mode
    #[arg(long)]
    pub overwrite: bool,

    /// Initial text placed in the input
    #[arg(short, long)]
    pub text: Option<String>,

    /// Print the final content and cursor as JSON on exit
    #[arg(long)]
    pub print_json: bool,
}
