//! REPL and file-runner driver. Thin by design: every interesting
//! decision already lives in `glint-compiler`/`glint-vm` — this binary
//! only owns argument parsing, the two entry points, and the exit-code
//! mapping.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glint_vm::{InterpretResult, VM};

/// A bytecode compiler and virtual machine for a small expression
/// language.
#[derive(Parser, Debug)]
#[command(name = "glint")]
struct Cli {
  /// Script to run. Omit to start an interactive REPL.
  path: Option<PathBuf>,

  /// Print a disassembly of every instruction as it executes.
  #[cfg(feature = "trace_execution")]
  #[arg(short, long)]
  trace: bool,
}

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(_) => {
      eprint!("Usage: clox [path]\n");
      return ExitCode::from(64);
    }
  };
  let mut vm = VM::new();
  #[cfg(feature = "trace_execution")]
  vm.set_trace(cli.trace);

  match cli.path {
    None => run_repl(&mut vm),
    Some(path) => run_file(&mut vm, &path),
  }
}

fn run_repl(vm: &mut VM) -> ExitCode {
  let stdin = io::stdin();
  let mut line = String::new();

  loop {
    print!("> ");
    if io::stdout().flush().is_err() {
      return ExitCode::from(74);
    }

    line.clear();
    let mut handle = stdin.lock().take(1024);
    match handle.read_line(&mut line) {
      Ok(0) => {
        println!();
        return ExitCode::from(0);
      }
      Ok(_) => {
        vm.interpret(&line);
      }
      Err(_) => return ExitCode::from(74),
    }
  }
}

fn run_file(vm: &mut VM, path: &PathBuf) -> ExitCode {
  let source = match std::fs::read_to_string(path) {
    Ok(source) => source,
    Err(err) => {
      eprintln!("Could not read file \"{}\": {}", path.display(), err);
      return ExitCode::from(74);
    }
  };

  match vm.interpret(&source) {
    InterpretResult::Ok => ExitCode::from(0),
    InterpretResult::CompileError => ExitCode::from(65),
    InterpretResult::RuntimeError => ExitCode::from(70),
  }
}
