mod cli;
mod commands;
mod config;
mod document;
mod error;
mod prompt;
mod repl;
mod session;
mod tools;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use config::ScanConfig;
use error::Result;
use repl::Repl;
use tools::{scanner, SystemRunner, ToolRunner};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let config = ScanConfig::default();

    if let Some(Commands::ScanOnce {
        resolution,
        output,
        device,
    }) = cli.command
    {
        let device = match device {
            Some(device) => device,
            None => {
                eprintln!("{} SCAN_DEVICE is not set", "Error:".bright_red().bold());
                eprintln!();
                eprintln!("Please set the scanner device identifier:");
                eprintln!("  export SCAN_DEVICE='epkowa:interpreter:001:002'");
                eprintln!("Or use the --device flag:");
                eprintln!("  paperbind scan-once 200 page.png --device 'epkowa:interpreter:001:002'");
                std::process::exit(1);
            }
        };

        let runner = SystemRunner::from_env();
        let invocation = scanner::scan_page(&device, resolution, &config.scan_area, &output);
        runner.run(&invocation)?;
        return Ok(());
    }

    println!("{} {}", "Device:".bright_cyan(), config.device.dimmed());
    println!(
        "{} {}",
        "Output:".bright_green(),
        config.out_root.display()
    );
    println!();

    let mut repl = Repl::new(config);
    repl.run()
}
