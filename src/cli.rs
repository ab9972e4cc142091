use crate::config::{Config, OutputFormat};
use hellsharp::display::{error_to_json, format_context, format_outcome, format_tree, outcome_to_json};
use hellsharp::context::MAX_CAPACITY;
use hellsharp::program::demos;
use hellsharp::{Node, Program, ProgramError};
use std::process::ExitCode;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit code for evaluation errors
const EXIT_EVAL: u8 = 1;
/// Exit code for usage and load errors
const EXIT_USAGE: u8 = 2;

/// What the user asked to run
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Source {
    /// A program file
    File(String),
    /// Program JSON given with -e
    Inline(String),
    /// A built-in demo; None lists them
    Demo(Option<String>),
}

/// Parsed command-line arguments
#[derive(Debug, Default, PartialEq)]
pub(crate) struct CliArgs {
    pub(crate) source: Option<Source>,
    pub(crate) trace: bool,
    pub(crate) json: bool,
    pub(crate) capacity: Option<usize>,
    pub(crate) help: bool,
    pub(crate) version: bool,
}

/// Parse command-line arguments
pub(crate) fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();

    let mut i = 1; // Skip program name
    while i < args.len() {
        match args[i].as_str() {
            "--trace" => {
                cli.trace = true;
            }
            "--json" => {
                cli.json = true;
            }
            "--capacity" => {
                let raw = args
                    .get(i + 1)
                    .ok_or_else(|| "--capacity needs a value".to_string())?;
                let n = raw
                    .parse::<usize>()
                    .map_err(|_| format!("--capacity: not a number: {}", raw))?;
                if n > MAX_CAPACITY {
                    return Err(format!("--capacity: {} exceeds the maximum of {}", n, MAX_CAPACITY));
                }
                cli.capacity = Some(n);
                i += 1;
            }
            "-e" => {
                let json = args
                    .get(i + 1)
                    .ok_or_else(|| "-e needs a program".to_string())?;
                set_source(&mut cli, Source::Inline(json.clone()))?;
                i += 1;
            }
            "demo" => {
                // Optional demo name follows
                let name = args.get(i + 1).filter(|a| !a.starts_with('-')).cloned();
                if name.is_some() {
                    i += 1;
                }
                set_source(&mut cli, Source::Demo(name))?;
            }
            "--help" | "-h" => {
                cli.help = true;
            }
            "--version" | "-V" => {
                cli.version = true;
            }
            path => {
                if path.starts_with('-') {
                    return Err(format!("unknown option: {}", path));
                }
                set_source(&mut cli, Source::File(path.to_string()))?;
            }
        }
        i += 1;
    }

    Ok(cli)
}

fn set_source(cli: &mut CliArgs, source: Source) -> Result<(), String> {
    if cli.source.is_some() {
        return Err("only one program may be given".to_string());
    }
    cli.source = Some(source);
    Ok(())
}

pub(crate) fn print_help() {
    println!(
        r#"hellsharp-{} H# - evaluate addition trees against an operand stack

USAGE:
    hellsharp <program.json>    Run a program file
    hellsharp -e '<json>'       Run a program given inline
    hellsharp demo              List built-in demos
    hellsharp demo <name>       Run a built-in demo

OPTIONS:
    --trace                     Print the tree, the stack and each visited node (stderr)
    --json                      Print the result as JSON
    --capacity <n>              Preallocated context slots
    -h, --help                  Show this help message
    -V, --version               Show version

PROGRAM FORMAT:
    {{
      "operands": [["a", 3], ["b", 4]],
      "root": {{"composite": {{"first": "simple", "second": "simple"}}}}
    }}
    Operands are pushed in order; the last one is the top of the stack.
    "simple" pops the top two operands and adds them.
    "composite" evaluates first, then second, and adds the results.

CONFIG:
    ~/.hellsharp.toml           capacity, trace, format, log_level
    HELLSHARP_CONFIG=<path>     Use another config file
    HELLSHARP_LOG=<filter>      Log filter (e.g. debug, hellsharp=trace)

EXIT STATUS:
    0 success, 1 evaluation error, 2 usage or load error"#,
        VERSION
    );
}

pub(crate) fn print_version() {
    println!("hellsharp {}", VERSION);
}

/// Effective run settings: CLI flags over config file
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Settings {
    pub(crate) capacity: usize,
    pub(crate) trace: bool,
    pub(crate) format: OutputFormat,
}

impl Settings {
    pub(crate) fn merge(cli: &CliArgs, config: &Config) -> Self {
        Settings {
            capacity: cli.capacity.unwrap_or(config.capacity),
            trace: cli.trace || config.trace,
            format: if cli.json { OutputFormat::Json } else { config.format },
        }
    }
}

/// Resolve the source, run it, print the result
pub(crate) fn execute(source: &Source, settings: &Settings) -> ExitCode {
    let program = match source {
        Source::Demo(None) => {
            list_demos();
            return ExitCode::SUCCESS;
        }
        Source::Demo(Some(name)) => match demos::load(name) {
            Some(loaded) => loaded,
            None => {
                eprintln!("Error: no demo named '{}' (try 'hellsharp demo')", name);
                return ExitCode::from(EXIT_USAGE);
            }
        },
        Source::File(path) => Program::from_file(path),
        Source::Inline(json) => Program::from_json(json),
    };

    match program {
        Ok(program) => run_program(&program, settings),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn list_demos() {
    for (name, about) in demos::ALL {
        println!("{:<10} {}", name, about);
    }
}

fn run_program(program: &Program, settings: &Settings) -> ExitCode {
    if settings.trace {
        eprintln!("{}", format_tree(&program.root));
        if let Ok(ctx) = program.context(settings.capacity) {
            eprintln!("{}", format_context(&ctx));
        }
    }

    let trace = settings.trace;
    let result = program.run_with(settings.capacity, |node, depth| {
        if trace {
            let kind = match node {
                Node::Simple => "simple",
                Node::Composite { .. } => "composite",
            };
            eprintln!("{}-> {}", "  ".repeat(depth), kind);
        }
    });

    match (result, settings.format) {
        (Ok(outcome), OutputFormat::Text) => {
            println!("{}", format_outcome(&outcome));
            ExitCode::SUCCESS
        }
        (Ok(outcome), OutputFormat::Json) => {
            println!("{}", outcome_to_json(&outcome));
            ExitCode::SUCCESS
        }
        (Err(ProgramError::Eval(e)), OutputFormat::Json) => {
            println!("{}", error_to_json(&e));
            ExitCode::from(EXIT_EVAL)
        }
        (Err(ProgramError::Eval(e)), OutputFormat::Text) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_EVAL)
        }
        (Err(e), _) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_USAGE)
        }
    }
}
