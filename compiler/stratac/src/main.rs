//! Strata CLI

use stratac::commands::{
    disassemble_file, parse_phase, run_demo, run_file, show_registers, CommandError,
};
use strata_eval::Phase;

fn main() {
    stratac::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let result = match args[1].as_str() {
        "regs" => show_registers(args.get(2).map(String::as_str)),
        "demo" => {
            let mut phase = Ok(Phase::Run);
            let mut emit = None;
            for arg in args.iter().skip(2) {
                if let Some(value) = arg.strip_prefix("--phase=") {
                    phase = parse_phase(value);
                } else if let Some(path) = arg.strip_prefix("--emit=") {
                    emit = Some(path);
                } else {
                    eprintln!("warning: ignoring unknown option '{arg}'");
                }
            }
            phase.and_then(|phase| run_demo(phase, emit))
        }
        "disasm" => {
            if args.len() < 3 {
                eprintln!("Usage: strata disasm <unit.bin>");
                std::process::exit(1);
            }
            disassemble_file(&args[2])
        }
        "run" => {
            let mut phase = Ok(Phase::Run);
            let mut file_path = None;
            for arg in args.iter().skip(2) {
                if let Some(value) = arg.strip_prefix("--phase=") {
                    phase = parse_phase(value);
                } else if !arg.starts_with('-') && file_path.is_none() {
                    file_path = Some(arg.as_str());
                }
            }

            let Some(path) = file_path else {
                eprintln!("error: missing file path");
                eprintln!("Usage: strata run <unit.bin> [--phase=static|run]");
                std::process::exit(1);
            };
            phase.and_then(|phase| run_file(path, phase))
        }
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        "version" | "--version" | "-V" => {
            println!("strata {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        unknown => {
            eprintln!("Unknown command: {unknown}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    report(result);
}

fn report(result: Result<String, CommandError>) {
    match result {
        Ok(text) => print!("{text}"),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Strata runtime core");
    println!();
    println!("Usage: strata <command> [options]");
    println!();
    println!("Commands:");
    println!("  regs [target]        Print a target's register model (default: host)");
    println!("  demo                 Run the nested-scope demo with a trace");
    println!("  disasm <unit.bin>    Disassemble a code unit");
    println!("  run <unit.bin>       Execute a code unit and print its result");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Targets: x64-sysv, x64-win64, x86, arm");
    println!();
    println!("Demo and run options:");
    println!("  --phase=static|run   Resolution phase (default: run)");
    println!("  --emit=<path>        (demo) Also write the demo unit to <path>");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=strata_eval=trace) for tracing output.");
}
