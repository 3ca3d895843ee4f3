/// Opcode Explorer - Bitcoin Script stack simulator CLI
use opcode_explorer::backend::*;
use opcode_explorer::config::Config;
use opcode_explorer::repl;
use std::env;
use std::path::PathBuf;
use std::process;
use tracing::Level;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit status when an operation leaves a sentinel on the stack
const EXIT_HALTED: i32 = 2;

fn print_usage() {
    eprintln!("Opcode Explorer v{}", VERSION);
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    opcode-explorer [OPTIONS] [VALUES...]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -h, --help             Print this help message");
    eprintln!("        --version          Print version information");
    eprintln!("    -v, --verbose          More logging (repeat for trace)");
    eprintln!("        --op <NAME>        Apply an operation (repeatable, in order)");
    eprintln!("        --list             List simulated and documented opcodes");
    eprintln!("        --describe <NAME>  Show reference data for an opcode");
    eprintln!("        --json             Print --describe output as JSON");
    eprintln!("        --repl             Start the interactive stepper");
    eprintln!("        --config <FILE>    Read settings from FILE");
    eprintln!();
    eprintln!("ARGUMENTS:");
    eprintln!("    [VALUES...]            Initial stack, bottom first: integers,");
    eprintln!("                           true/false, or text");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("    opcode-explorer 2 3 --op OP_ADD");
    eprintln!("    opcode-explorer 5 --op OP_DUP --op OP_EQUAL");
    eprintln!("    opcode-explorer --describe OP_CHECKSIG --json");
    eprintln!("    opcode-explorer --repl 1 2");
}

fn print_version() {
    println!("opcode-explorer {}", VERSION);
}

struct Options {
    values: Vec<String>,
    ops: Vec<String>,
    list: bool,
    describe: Option<String>,
    json: bool,
    repl_mode: bool,
    config: Option<PathBuf>,
    verbosity: u8,
}

fn parse_args() -> Result<Options, String> {
    let args: Vec<String> = env::args().collect();

    let mut options = Options {
        values: Vec::new(),
        ops: Vec::new(),
        list: false,
        describe: None,
        json: false,
        repl_mode: false,
        config: None,
        verbosity: 0,
    };
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            "--version" => {
                print_version();
                process::exit(0);
            }
            "-v" | "--verbose" => options.verbosity = options.verbosity.saturating_add(1),
            "-vv" => options.verbosity = options.verbosity.saturating_add(2),
            "--op" => {
                i += 1;
                let name = args.get(i).ok_or("Missing operation name after --op")?;
                options.ops.push(name.clone());
            }
            "--describe" => {
                i += 1;
                let name = args.get(i).ok_or("Missing opcode name after --describe")?;
                options.describe = Some(name.clone());
            }
            "--config" => {
                i += 1;
                let path = args.get(i).ok_or("Missing file after --config")?;
                options.config = Some(PathBuf::from(path));
            }
            "--list" => options.list = true,
            "--json" => options.json = true,
            "--repl" => options.repl_mode = true,
            "--" => {
                options.values.extend(args[i + 1..].iter().cloned());
                break;
            }
            // Negative integers are values, not flags
            arg if arg.starts_with('-') && !is_negative_integer(arg) => {
                return Err(format!("Unknown option: {}", arg));
            }
            arg => options.values.push(arg.to_string()),
        }
        i += 1;
    }

    if options.json && options.describe.is_none() {
        return Err("--json requires --describe".to_string());
    }

    Ok(options)
}

fn is_negative_integer(arg: &str) -> bool {
    arg.len() > 1 && arg[1..].bytes().all(|b| b.is_ascii_digit())
}

fn load_config(options: &Options) -> Result<Config, String> {
    let loaded = match &options.config {
        Some(path) => Config::load(path),
        None => Config::load_default(),
    };
    loaded.map_err(|e| e.to_string())
}

fn init_logging(config: &Config, verbosity: u8) {
    let level = match verbosity {
        0 => config.logging.max_level().unwrap_or(Level::WARN),
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn initial_stack(values: &[String]) -> Result<Stack, String> {
    values
        .iter()
        .map(|v| parse_value(v).map_err(|e| format!("Invalid value '{}': {}", v, e)))
        .collect()
}

fn print_list() {
    println!("Simulated operations:");
    for def in operations() {
        println!("    {:<16} 0x{:02x}", def.name(), def.opcode.byte());
    }
    println!();
    println!("Documented opcodes:");
    for d in descriptors() {
        let mark = if d.is_simulated() { " (simulated)" } else { "" };
        println!("    {:<16} {}{}", d.name, d.hex, mark);
    }
}

fn describe(name: &str, json: bool) -> Result<(), String> {
    let d = descriptor(name).ok_or_else(|| format!("No reference entry for {}", name))?;
    if json {
        let text = serde_json::to_string_pretty(d).map_err(|e| e.to_string())?;
        println!("{}", text);
    } else {
        println!("{}", d);
    }
    Ok(())
}

/// Apply each operation in turn; returns false when a sentinel stops the run
fn run_ops(mut stack: Stack, ops: &[String]) -> Result<bool, String> {
    println!("{:<12} {}", "start", stack);
    for name in ops {
        stack = apply(&stack, name).ok_or_else(|| format!("Unknown operation: {}", name))?;
        println!("{:<12} {}", name, stack);
        if let Some(msg) = halt_message(&stack) {
            eprintln!("Halted: {}", msg);
            return Ok(false);
        }
    }
    Ok(true)
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn main() {
    let options = match parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    let config = load_config(&options).unwrap_or_else(|e| fail(&e));
    init_logging(&config, options.verbosity);

    let stack = initial_stack(&options.values).unwrap_or_else(|e| fail(&e));

    if options.list {
        print_list();
        return;
    }

    if let Some(name) = &options.describe {
        if let Err(e) = describe(name, options.json) {
            fail(&e);
        }
        return;
    }

    if options.repl_mode {
        if let Err(e) = repl::run(&config, stack) {
            fail(&e.to_string());
        }
        return;
    }

    if !options.ops.is_empty() {
        match run_ops(stack, &options.ops) {
            Ok(true) => {}
            Ok(false) => process::exit(EXIT_HALTED),
            Err(e) => fail(&e),
        }
        return;
    }

    if options.values.is_empty() {
        eprintln!("Error: Nothing to do");
        eprintln!();
        print_usage();
        process::exit(1);
    }

    println!("{}", stack);
}
