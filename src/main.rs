use std::fs;
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "mdblocks")]
#[command(about = "Parse Markdown files into a renderer-ready block model")]
struct Cli {
    /// Input Markdown file
    input: PathBuf,

    /// Output JSON file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Paragraph indent width, overriding the config value
    #[arg(long)]
    indent: Option<usize>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Read input file
    let markdown = match fs::read_to_string(&cli.input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading {}: {}", cli.input.display(), e);
            std::process::exit(1);
        }
    };

    let mut config = mdblocks::Config::load(&cli.config);
    if let Some(indent) = cli.indent {
        config.paragraph.indent = indent;
    }

    let blocks = mdblocks::parse_with_config(&markdown, &config);

    let json = match serde_json::to_string_pretty(&blocks) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match cli.output {
        Some(path) => {
            if let Err(e) = fs::write(&path, json) {
                eprintln!("Error writing {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
        None => println!("{}", json),
    }
}
