use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
    process::ExitCode,
    time::{Duration, Instant},
};

use clap::{Parser, Subcommand};
use cyascript::{display_error, parser::parser::parse, Node};
use log::{error, info};

const DEFAULT_EXTENSION: &str = "cyas";

/// Front end for CyaScript source files.
#[derive(Debug, Parser)]
#[command(name = "cyascript", version, about = "Parse CyaScript source files.")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a file and report how long it took.
    Compile {
        /// Script to parse; `.cyas` is added when the extension is missing.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Parse a file and print its syntax tree.
    Run {
        /// Script to parse; `.cyas` is added when the extension is missing.
        #[arg(required = true)]
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    let (file, print_tree) = match args.command {
        Command::Compile { file } => (file, false),
        Command::Run { file } => (file, true),
    };

    let path = with_default_extension(file);
    let Some(source) = load_source(&path) else {
        return ExitCode::FAILURE;
    };

    let file_name = path.to_string_lossy();
    let start = Instant::now();
    let parsed = parse(&source, &file_name);
    let elapsed = start.elapsed();

    match parsed {
        Ok(node) if print_tree => print!("{}", node.pretty_print()),
        Ok(node) => println!("{}", summary(&node, &file_name, elapsed)),
        Err(error) => {
            info!("parse failed after {:?}", elapsed);
            eprint!("{}", display_error(&error, &source));
        }
    }

    ExitCode::SUCCESS
}

fn with_default_extension(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension(DEFAULT_EXTENSION);
    }
    path
}

fn load_source(path: &Path) -> Option<String> {
    if !path.exists() {
        eprintln!("File \"{}\" does not exist.", path.display());
        return None;
    }

    match read_to_string(path) {
        Ok(source) => Some(source),
        Err(err) => {
            error!("reading {} failed: {}", path.display(), err);
            eprintln!("Read file \"{}\" failed.", path.display());
            None
        }
    }
}

fn summary(node: &Node, file_name: &str, elapsed: Duration) -> String {
    let mut nodes = 0;
    node.walk(&mut |_| nodes += 1);

    format!(
        "{}: {} statements, {} nodes. Parsed in {:?}",
        file_name,
        node.children.len(),
        nodes,
        elapsed
    )
}
