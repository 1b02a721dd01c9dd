use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use viewbench::benchlog::log_to_records;

#[derive(Parser, Debug)]
#[command(name = "bm2json", version, about = "Convert benchmark logs to newline-delimited JSON", long_about = None)]
struct Cli {
    #[arg(help = "Benchmark log files, read in order. Reads stdin when empty or '-'.")]
    files: Vec<PathBuf>,
}

fn read_lines(files: &[PathBuf]) -> std::io::Result<Vec<String>> {
    let mut lines = Vec::new();
    if files.is_empty() {
        for line in std::io::stdin().lock().lines() {
            lines.push(line?);
        }
        return Ok(lines);
    }
    for path in files {
        if path.as_os_str() == "-" {
            for line in std::io::stdin().lock().lines() {
                lines.push(line?);
            }
        } else {
            let s = std::fs::read_to_string(path).map_err(|e| {
                std::io::Error::new(e.kind(), format!("cannot read {}: {}", path.display(), e))
            })?;
            lines.extend(s.lines().map(str::to_string));
        }
    }
    Ok(lines)
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let lines = read_lines(&cli.files)?;
    let records = log_to_records(&lines)?;
    let mut out = std::io::stdout().lock();
    for rec in records {
        writeln!(out, "{}", serde_json::to_string(&rec)?)?;
    }
    out.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
