use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use advanced_variables::config::parse_variable_assignment;
use advanced_variables::error::{Error, IoContext, Result};
use advanced_variables::stylesheet::{self, tree_printer};
use advanced_variables::{logging, Diagnostics, Options, Processor};
use log::{info, LevelFilter};

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    variables: Vec<(String, String)>,
    no_warn: bool,
    dump_tree: bool,
    verbose: bool,
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS] <input>", program);
    eprintln!("  <input>                 Stylesheet to process, '-' for stdin");
    eprintln!("  --config <file>         Options file (.json, .yaml or .yml)");
    eprintln!("  --var NAME=VALUE        Initial variable, may be repeated");
    eprintln!("  --no-warn               Do not report unresolved variables");
    eprintln!("  --dump-tree             Print the processed syntax tree instead of CSS");
    eprintln!("  -o, --output <file>     Write the result to a file instead of stdout");
    eprintln!("  -v                      Verbose logging");
    eprintln!("Example: {} --var primary=#333 theme.css", program);
}

fn parse_args(raw: &[String]) -> Result<Args> {
    let mut args = Args::default();
    let mut iter = raw.iter().skip(1);

    while let Some(arg) = iter.next() {
        let mut value_for = |flag: &str| {
            iter.next().cloned().ok_or_else(|| Error::InvalidArgument {
                message: format!("{} expects a value", flag),
            })
        };

        match arg.as_str() {
            "--config" => args.config = Some(PathBuf::from(value_for("--config")?)),
            "--var" => args.variables.push(parse_variable_assignment(&value_for("--var")?)?),
            "-o" | "--output" => args.output = Some(PathBuf::from(value_for(arg.as_str())?)),
            "--no-warn" => args.no_warn = true,
            "--dump-tree" => args.dump_tree = true,
            "-v" | "--verbose" => args.verbose = true,
            flag if flag.starts_with('-') && flag != "-" => {
                return Err(Error::InvalidArgument {
                    message: format!("Unknown option '{}'", flag),
                });
            }
            input => {
                if args.input.replace(input.to_string()).is_some() {
                    return Err(Error::InvalidArgument {
                        message: "Only one input file can be given".to_string(),
                    });
                }
            }
        }
    }

    Ok(args)
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .with_io_context("Failed to read stdin")?;
        Ok(content)
    } else {
        fs::read_to_string(input).with_io_context(&format!("Failed to read {}", input))
    }
}

fn run(args: Args) -> Result<()> {
    let Some(input) = args.input else {
        return Err(Error::InvalidArgument {
            message: "Missing input file".to_string(),
        });
    };

    let mut options = match &args.config {
        Some(path) => Options::from_file(path)?,
        None => Options::default(),
    };
    options.merge_variables(args.variables);
    if args.no_warn {
        options.warn_of_unresolved = false;
    }

    let source = read_input(&input)?;
    let mut tree = stylesheet::parse(&source)?;
    info!("Parsed {} ({} bytes)", input, source.len());

    let mut diagnostics = Diagnostics::new();
    Processor::new(options).process(&mut tree, &mut diagnostics);

    for warning in diagnostics.warnings() {
        eprintln!("{}:{}", input, warning);
    }

    let output = if args.dump_tree {
        tree_printer::dump(&tree)
    } else {
        stylesheet::print(&tree)
    };

    match &args.output {
        Some(path) => fs::write(path, output)
            .with_io_context(&format!("Failed to write {}", path.display()))?,
        None => io::stdout()
            .write_all(output.as_bytes())
            .with_io_context("Failed to write stdout")?,
    }

    info!("Finished with {} warning(s)", diagnostics.len());
    Ok(())
}

fn main() {
    let raw: Vec<String> = env::args().collect();
    let program = raw.first().map(String::as_str).unwrap_or("advanced_variables");

    let args = match parse_args(&raw) {
        Ok(args) if args.input.is_some() => args,
        Ok(_) => {
            print_usage(program);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("{}", e);
            print_usage(program);
            process::exit(1);
        }
    };

    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    if let Err(e) = logging::init_logger(level) {
        eprintln!("Failed to initialize logger: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(args) {
        eprintln!("{}", e);
        process::exit(1);
    }
}
