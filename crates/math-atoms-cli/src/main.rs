use std::{
    fmt::Display,
    fs,
    io::{IsTerminal, Read},
    path::{Path, PathBuf},
};

use clap::{Parser, ValueEnum};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use math_atoms::{
    Atom, AtomRecord, Context, LatexError, MathStyle, SerializeOptions, build_box, parse_latex,
    parse_list, serialize_list, to_records,
};

mod config_file;

use config_file::{Config, load_config_file};

/// What to print for the formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    /// The laid-out box tree
    Boxes,
    /// The formula serialized back to LaTeX
    Latex,
    /// The persisted JSON records
    Json,
}

/// Lays out, serializes and persists LaTeX math formulas
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Specifies a single LaTeX formula (read from stdin if neither this nor --from-json is given)
    #[arg(short, long, conflicts_with = "from_json")]
    formula: Option<String>,

    /// Reads the formula as JSON records from the given file, or from stdin for "-"
    #[arg(long, value_name = "FILE")]
    from_json: Option<PathBuf>,

    /// What to print
    #[arg(short, long, value_enum, default_value_t = Output::Boxes)]
    output: Output,

    /// The math style to lay out in, e.g. "display" or "script-cramped"
    #[arg(short, long, value_name = "STYLE")]
    style: Option<MathStyle>,

    /// Leaves style switches out of the LaTeX output
    #[arg(long)]
    skip_styles: bool,

    /// Pretty-prints the JSON output
    #[arg(long)]
    pretty: bool,

    /// Reads settings from a TOML file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Logs debug information to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match args.config {
        Some(ref path) => {
            load_config_file(path).unwrap_or_else(|e| exit_with("Config error", e, 1))
        }
        None => Config::default(),
    };
    let style = args.style.or(config.style).unwrap_or_default();
    let options = SerializeOptions {
        skip_styles: args.skip_styles || config.skip_styles,
    };
    let pretty = args.pretty || config.pretty;
    debug!(style = style.as_str(), skip_styles = options.skip_styles, pretty, "settings");

    let mut context = Context::new(style);
    let atoms = if let Some(ref path) = args.from_json {
        load_records(path, &mut context)
    } else {
        let latex = match args.formula {
            Some(ref formula) => formula.clone(),
            None => read_stdin(),
        };
        parse_latex(&latex, &mut context).unwrap_or_else(|e| exit_latex_error(&e, &latex))
    };
    debug!(atoms = atoms.len(), "formula loaded");

    match args.output {
        Output::Boxes => {
            let Some(layout_box) = build_box(&mut context, &atoms) else {
                warn!("formula produced no box");
                return;
            };
            let mut out = String::new();
            layout_box
                .emit(&mut out, 0)
                .unwrap_or_else(|e| exit_with("Formatting error", e, 1));
            println!("{out}");
        }
        Output::Latex => println!("{}", serialize_list(&atoms, options)),
        Output::Json => {
            let records = to_records(&atoms);
            let json = if pretty {
                serde_json::to_string_pretty(&records)
            } else {
                serde_json::to_string(&records)
            };
            println!("{}", json.unwrap_or_else(|e| exit_with("JSON error", e, 1)));
        }
    }
}

fn load_records(path: &Path, context: &mut Context) -> Vec<Atom> {
    let json = if path == Path::new("-") {
        read_stdin()
    } else {
        fs::read_to_string(path).unwrap_or_else(|e| exit_with("IO Error", e, 1))
    };
    let records: Vec<AtomRecord> =
        serde_json::from_str(&json).unwrap_or_else(|e| exit_with("JSON error", e, 2));
    parse_list(&records, context).unwrap_or_else(|e| exit_with("Record error", e, 2))
}

fn read_stdin() -> String {
    let mut buffer = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
        exit_with("IO Error", e, 1);
    }
    buffer
}

fn exit_latex_error(e: &LatexError, latex: &str) -> ! {
    let report = e.to_report("<input>", std::io::stderr().is_terminal());
    if report
        .eprint(("<input>", ariadne::Source::from(latex)))
        .is_err()
    {
        eprintln!("Conversion error: {e}");
    }
    std::process::exit(2);
}

fn exit_with(kind: &str, e: impl Display, code: i32) -> ! {
    eprintln!("{kind}: {e}");
    std::process::exit(code);
}
