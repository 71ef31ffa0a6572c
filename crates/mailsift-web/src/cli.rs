use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mailsift")]
#[command(
    author,
    version,
    about = "MailSift spam classification web front-end",
    long_about = None
)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "mailsift.yaml", env = "MAILSIFT_CONFIG")]
    pub config: String,

    /// Model artifact path (overrides the config file)
    #[arg(short, long, env = "MAILSIFT_MODEL")]
    pub model: Option<PathBuf>,

    /// Listen address
    #[arg(short = 'l', long)]
    pub listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long)]
    pub port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
