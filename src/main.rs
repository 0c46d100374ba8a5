mod app;
mod command;
mod config;
mod error;
mod fileio;
mod render;
mod screen;
mod selection;
mod string;
mod style;
mod table;
mod viewport;

use std::fs::OpenOptions;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

use ratatui::backend::CrosstermBackend;
use tracing::{error, info, warn, Level};

use app::App;
use config::AppConfig;
use error::ViewerError;
use fileio::Source;
use screen::{restore_terminal, Screen, TerminalSession};
use style::Palette;
use table::Table;

const LOG_ENV: &str = "TABLOOK_LOG";

#[derive(Debug, Default, PartialEq)]
struct Options {
    file_path: Option<PathBuf>,
    delimiter: Option<u8>,
    theme: Option<String>,
    log_file: Option<PathBuf>,
    verbose: bool,
    help: bool,
}

/// Parse command line arguments (without the program name)
fn parse_args(args: &[String]) -> Result<Options, ViewerError> {
    let mut opts = Options::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-d" | "--delimiter" => {
                let value = option_value(args, i)?;
                opts.delimiter = Some(parse_delimiter(value)?);
                i += 2;
            }
            "-t" | "--theme" => {
                opts.theme = Some(option_value(args, i)?.to_string());
                i += 2;
            }
            "--log" => {
                opts.log_file = Some(PathBuf::from(option_value(args, i)?));
                i += 2;
            }
            "-v" | "--verbose" => {
                opts.verbose = true;
                i += 1;
            }
            "-h" | "--help" => {
                opts.help = true;
                i += 1;
            }
            arg if arg.starts_with('-') && arg != "-" => {
                return Err(ViewerError::Usage(format!("unknown option: {}", arg)));
            }
            arg => {
                if opts.file_path.is_some() {
                    return Err(ViewerError::Usage(format!("unexpected argument: {}", arg)));
                }
                // "-" reads standard input, same as no file at all
                if arg != "-" {
                    opts.file_path = Some(PathBuf::from(arg));
                }
                i += 1;
            }
        }
    }

    Ok(opts)
}

fn option_value(args: &[String], i: usize) -> Result<&str, ViewerError> {
    args.get(i + 1)
        .map(|s| s.as_str())
        .ok_or_else(|| ViewerError::Usage(format!("{} requires an argument", args[i])))
}

/// Parse a delimiter string into a byte
fn parse_delimiter(s: &str) -> Result<u8, ViewerError> {
    match s.to_lowercase().as_str() {
        "comma" | "," => Ok(b','),
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        "semicolon" | ";" => Ok(b';'),
        "pipe" | "|" => Ok(b'|'),
        _ if s.len() == 1 => Ok(s.as_bytes()[0]),
        _ => Err(ViewerError::Usage(format!(
            "invalid delimiter: '{}'. Use comma, tab, semicolon, pipe, or a single character.",
            s
        ))),
    }
}

fn print_help() {
    eprintln!("tablook - scroll through a CSV table in the terminal");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    tablook [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -d, --delimiter <DELIM>  Set the field delimiter (comma, tab, semicolon, pipe, or char)");
    eprintln!("    -t, --theme <THEME>      Built-in theme ({}) or a TOML file", Palette::builtin_names().join(", "));
    eprintln!("        --log <FILE>         Append log output to FILE (or set {})", LOG_ENV);
    eprintln!("    -v, --verbose            Log debug output");
    eprintln!("    -h, --help               Print this help message");
    eprintln!();
    eprintln!("Reads standard input when no FILE is given. The first record is the header.");
    eprintln!();
    eprintln!("KEYS:");
    eprintln!("    h l / Left Right         Scroll horizontally");
    eprintln!("    Up Down                  Scroll vertically");
    eprintln!("    k j                      Select row");
    eprintln!("    H L / Shift-Tab Tab      Select column");
    eprintln!("    d / Delete               Hide selected column");
    eprintln!("    q / Esc / Ctrl-C         Quit");
}

/// Log to a file if one was asked for; the terminal itself belongs to the UI
fn init_logging(opts: &Options) -> Result<(), ViewerError> {
    let Some(path) = opts
        .log_file
        .clone()
        .or_else(|| std::env::var_os(LOG_ENV).map(PathBuf::from))
    else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let level = if opts.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

/// Put the terminal back before the default hook prints the panic
fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();

        if let Some(location) = info.location() {
            error!(
                file = location.file(),
                line = location.line(),
                "panic occured"
            );
        } else {
            error!("panic occured");
        }

        if let Some(s) = info.payload().downcast_ref::<&str>() {
            error!(message = %s);
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            error!(message = %s);
        }

        default_hook(info);
    }));
}

fn run(opts: Options) -> Result<(), ViewerError> {
    let source = Source::new(opts.file_path, opts.delimiter);
    let table = Table::new(source.load()?)?;
    if table.normalized_rows() > 0 {
        warn!(
            rows = table.normalized_rows(),
            columns = table.col_count(),
            "rows padded or cut to the header's column count"
        );
    }

    let palette = match &opts.theme {
        Some(theme) => Palette::resolve(theme)?,
        None => Palette::default(),
    };
    info!(theme = %palette.name, "palette");

    let _session = TerminalSession::start()?;
    let screen = Screen::new(CrosstermBackend::new(io::stdout()))?;
    let mut app = App::new(table, AppConfig::new(palette), screen);
    app.run()?;
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = parse_args(&args).and_then(|opts| {
        if opts.help {
            print_help();
            return Ok(());
        }
        init_logging(&opts)?;
        info!(version = env!("CARGO_PKG_VERSION"), "tablook started");
        install_panic_hook();
        run(opts)
    });

    if let Err(e) = result {
        error!(error = %e, "exiting");
        eprintln!("tablook: {}", e);
        std::process::exit(1);
    }
}
