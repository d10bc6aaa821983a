use breakscan::cli::{Cli, run};
use clap::Parser;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    breakscan::logging::init(cli.verbose);
    run(cli)
}
