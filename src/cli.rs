use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "AI-enhanced interactive terminal", long_about = None)]
pub struct Args {
    /// Run a single command line and exit
    #[arg(short, long, value_name = "LINE")]
    pub command: Option<String>,

    /// Path to the JSON config file [default: ~/.swabox/config.json]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory to load plugins from (overrides the config)
    #[arg(long, value_name = "DIR")]
    pub plugins_dir: Option<PathBuf>,

    /// Do not load any plugins
    #[arg(long)]
    pub no_plugins: bool,

    /// Turn AI features on at startup (saved to the config)
    #[arg(long)]
    pub ai: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
