use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "paperbind",
    about = "An interactive scanning session that binds paper coursework into PDFs",
    long_about = "Paperbind drives a flatbed scanner page by page and assembles the captured images into one PDF per document, organised by course under the out/ directory.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Capture a single page and exit, without starting a session
    ScanOnce {
        /// Horizontal and vertical scan resolution in DPI
        resolution: u32,

        /// Where to write the captured PNG
        output: PathBuf,

        #[arg(long, env = "SCAN_DEVICE")]
        device: Option<String>,
    },
}
