//! uemacs-flash - replay editor commands and watch the highlights they trigger

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use crossterm::terminal;

use uemacs_flash::command::CommandStatus;
use uemacs_flash::render::Renderer;
use uemacs_flash::script::{self, Step};
use uemacs_flash::{logging, Editor, Flash, FlashError, Result, Settings};

/// Parsed command line
struct Options {
    config: Option<PathBuf>,
    script: Option<PathBuf>,
    color: bool,
    file: PathBuf,
}

fn main() {
    logging::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let Some(options) = parse_args(env::args().skip(1))? else {
        return Ok(());
    };

    let settings = match &options.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    // Fall back to a classic 80x24 screen when not on a terminal
    let (cols, rows) = terminal::size().unwrap_or((80, 24));
    let mut editor = Editor::open(&options.file, rows.saturating_sub(3).max(1))?;
    let flash = Flash::from_settings(&mut editor, &settings)?;

    let text = match &options.script {
        Some(path) => fs::read_to_string(path)?,
        None => io::read_to_string(io::stdin())?,
    };
    let steps = script::parse(&text)?;

    let renderer = Renderer::new(options.color, cols);
    let mut out = io::stdout().lock();

    let watching = flash.watched_commands();
    let caption = if watching.is_empty() {
        "watching nothing".to_string()
    } else {
        format!("watching {}", watching.join(", "))
    };
    renderer.render(&mut out, &editor, &caption)?;

    for step in steps {
        let caption = match step {
            Step::Run { command, count } => match editor.execute_command(&command, count) {
                Ok(CommandStatus::Success) => format!("{command} {count}"),
                Ok(status) => format!("{command} {count} ({status:?})"),
                Err(e @ FlashError::UnknownCommand(_)) => {
                    tracing::warn!(%command, "skipping unknown command");
                    e.to_string()
                }
                Err(e) => return Err(e),
            },
            Step::Wait(duration) => {
                editor.advance(duration);
                format!("wait {}", duration.as_secs_f64())
            }
        };
        writeln!(out)?;
        renderer.render(&mut out, &editor, &caption)?;
    }

    Ok(())
}

/// Parse arguments; `None` means help or version was printed
fn parse_args(args: impl Iterator<Item = String>) -> Result<Option<Options>> {
    let mut config = None;
    let mut script = None;
    let mut color = true;
    let mut file = None;

    let mut args = args;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                print_version();
                return Ok(None);
            }
            "--no-color" => color = false,
            "-c" | "--config" => config = Some(PathBuf::from(required(&mut args, &arg)?)),
            "-s" | "--script" => script = Some(PathBuf::from(required(&mut args, &arg)?)),
            other if other.starts_with('-') => {
                return Err(FlashError::Message(format!("unknown option: {other}")));
            }
            _ if file.is_none() => file = Some(PathBuf::from(&arg)),
            _ => return Err(FlashError::Message("only one file may be given".to_string())),
        }
    }

    let file = file.ok_or_else(|| FlashError::Message("no file given (try --help)".to_string()))?;
    Ok(Some(Options {
        config,
        script,
        color,
        file,
    }))
}

fn required(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| FlashError::Message(format!("{flag} needs an argument")))
}

fn print_usage() {
    println!("uemacs-flash {} - command-triggered transient highlighting", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: uemacs-flash [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  -c, --config FILE  Settings file (default ~/.uemacs-flash.toml)");
    println!("  -s, --script FILE  Command script (default: read stdin)");
    println!("      --no-color     Bracket highlights instead of coloring them");
    println!("  -h, --help         Show this help message");
    println!("  -V, --version      Show version information");
    println!();
    println!("Script lines:");
    println!("  COMMAND [COUNT]    Run an editor command, e.g. `forward-paragraph 2`");
    println!("  wait SECONDS       Let time pass so highlights can expire");
    println!("  # ...              Comment");
    println!();
    println!("Set RUST_LOG=debug to trace triggers and highlights on stderr.");
}

fn print_version() {
    println!("uemacs-flash {}", env!("CARGO_PKG_VERSION"));
}
