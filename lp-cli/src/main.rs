use clap::Parser;
use env_logger::{Builder, Env};

use lp_cordic_cli::cli::{Cli, Commands};
use lp_cordic_cli::config::load_config;
use lp_cordic_cli::messages::print_error;
use lp_cordic_cli::{compute, tables};

fn main() {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    if let Err(e) = run(cli) {
        print_error(&format!("{e:#}"), &["Run with -v for more detail"]);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Compute(args) => compute::handle_compute(args, config),
        Commands::Tables(args) => tables::handle_tables(args, config),
    }
}
