//! cfgxml CLI: reads a configuration document from stdin and writes XML

use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};

use cfgxml::error::report_error;
use cfgxml::ConfigError;

/// Name shown in diagnostics for the stdin document
const INPUT_NAME: &str = "<stdin>";

#[derive(Parser)]
#[command(
    name = "cfgxml",
    version,
    about = "Compile a configuration document read from stdin into XML"
)]
struct Cli {
    /// Destination XML file
    #[arg(short, long, value_name = "PATH")]
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let mut source = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut source) {
        eprintln!("Error: failed to read stdin: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(&source, &cli.output) {
        report(&source, &e);
        std::process::exit(1);
    }
}

fn run(source: &str, output: &Path) -> cfgxml::Result<()> {
    let env = cfgxml::compile(source)?;
    let tree = cfgxml::tree::to_tree(&env);
    cfgxml::tree::write_file(output, &tree)
}

fn report(source: &str, error: &ConfigError) {
    // Span-less errors read better as one line than as an empty report
    if error.span().is_none() || report_error(INPUT_NAME, source, error).is_err() {
        eprintln!("Error: {error}");
    }
}
