use clap::Parser;
use std::path::PathBuf;
use viewbench::config::BenchConfig;

#[derive(Parser, Debug)]
#[command(name = "viewbench", version, about = "Replay a CDC view map over a JSON sample", long_about = None)]
struct Cli {
    /// Path to a config file (TOML)
    #[arg(long, help = "Path to a config file (TOML). Defaults to ./viewbench.toml when present.")]
    config: Option<PathBuf>,
    #[arg(long, help = "JSON file holding a top-level array of rows (default tmp/mcc.json)")]
    input: Option<PathBuf>,
    #[arg(long, help = "Row count the sample is replayed up to (default 12339702)")]
    target: Option<u64>,
    #[arg(long, help = "Directory for app.log and metrics.log. Logging is off unless set.")]
    log_dir: Option<PathBuf>,
    #[arg(long, help = "Log level: error|warn|info|debug|trace")]
    log_level: Option<String>,
    #[arg(long, help = "log4rs YAML file; replaces the built-in appenders when set")]
    log_config: Option<PathBuf>,
    #[arg(long, help = "Rolled log files to keep per appender (default 7)")]
    log_retention: Option<usize>,
}

impl Cli {
    /// Flags given on the command line, as the topmost config layer.
    fn overrides(&self) -> BenchConfig {
        BenchConfig {
            input: self.input.clone(),
            target: self.target,
            log_dir: self.log_dir.clone(),
            log_level: self.log_level.clone(),
            log_retention: self.log_retention,
            log_config: self.log_config.clone(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let loaded = match BenchConfig::load(cli.config.as_deref(), |k| std::env::var(k).ok()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let cfg = cli.overrides().or(loaded);

    if let Err(e) = viewbench::init_logging(&cfg) {
        eprintln!("error: logging: {e}");
        std::process::exit(1);
    }

    if let Err(e) = viewbench::run(&cfg, std::io::stdout().lock()) {
        log::error!("benchmark failed: {e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
