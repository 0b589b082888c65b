use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "contact-manager")]
#[command(about = "An interactive terminal contact manager")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, value_name = "FILE", help = "Use an alternate config file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Write debug output to the log file")]
    pub debug: bool,
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        if self.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        }
    }
}
