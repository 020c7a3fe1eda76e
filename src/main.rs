mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod heap;
mod lexer;
mod parser;
mod port;
mod value;

use builtins::register_builtins;
use clap::Parser as ClapParser;
use config::{VERSION, WELCOME_MESSAGE, WELCOME_SUBTITLE};
use env::{Env, GlobalEnv};
use error::EvalError;
use eval::eval;
use parser::Parser as LispParser;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::path::PathBuf;
use value::{to_readable, Value};

/// A small Scheme-flavored Lisp interpreter with a mark-and-sweep heap.
#[derive(ClapParser, Debug)]
#[command(name = "lisp-heap-interpreter")]
#[command(version = VERSION)]
#[command(about = "A small Scheme-flavored Lisp interpreter")]
struct CliArgs {
    /// Script file to execute (omit to start the REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,

    /// Arguments passed to the script as ARGV
    #[arg(value_name = "ARGV")]
    argv: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let global = GlobalEnv::new();
    register_builtins(&global);
    let env = Env::Global(global);

    match args.script {
        Some(path) => {
            bind_argv(&env, &args.argv);
            match run_script(&path, &env) {
                Ok(()) => Ok(()),
                Err(message) => {
                    eprintln!("{message}");
                    std::process::exit(1);
                }
            }
        }
        None => {
            run_repl(&env)?;
            Ok(())
        }
    }
}

fn bind_argv(env: &Env, argv: &[String]) {
    let handles: Vec<_> = argv
        .iter()
        .map(|s| env.manage(Value::String(s.clone())))
        .collect();
    let list = env.manage(Value::List(handles));
    env.define("ARGV", list).expect("ARGV binds at the global scope");
}

fn run_script(path: &PathBuf, env: &Env) -> Result<(), String> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read script file {}: {e}", path.display()))?;
    let filename = path.display().to_string();

    let mut parser = LispParser::new(&source);
    loop {
        let handle = match parser.parse_next(env) {
            Ok(Some(h)) => h,
            Ok(None) => break,
            Err(e) => return Err(format!("[{filename}:{}:{}] {}", e.line, e.col, e.message)),
        };
        match eval(handle, env) {
            Ok(_) => {}
            Err(EvalError::Exit) => return Ok(()),
            Err(e) => return Err(format!("[{filename}] {e}")),
        }
        env.global().collect().map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn run_repl(env: &Env) -> Result<(), Box<dyn std::error::Error>> {
    let mut rl: Editor<(), DefaultHistory> = Editor::new()?;
    let history_file = ".lisp_history";
    let _ = rl.load_history(history_file);

    println!("{WELCOME_MESSAGE}");
    println!("{WELCOME_SUBTITLE}");

    loop {
        match rl.readline("lisp> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                let mut parser = LispParser::new(&line);
                match parser.parse_next(env) {
                    Ok(Some(handle)) => match eval(handle, env) {
                        Ok(result) => match to_readable(result, env) {
                            Ok(text) => println!("=> {text}"),
                            Err(e) => eprintln!("Error: {e}"),
                        },
                        Err(EvalError::Exit) => {
                            println!("Goodbye!");
                            break;
                        }
                        Err(e) => eprintln!("Error: {e}"),
                    },
                    Ok(None) => {}
                    Err(e) => eprintln!("[{}:{}] {}", e.line, e.col, e.message),
                }

                if let Err(e) = env.global().collect() {
                    eprintln!("Error: {e}");
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(e) => {
                eprintln!("Error: {e}");
                break;
            }
        }
    }

    let _ = rl.save_history(history_file);
    Ok(())
}
