//! Port operations: open/close, display/displayln, port->string, read.
//!
//! I/O failures are signaled as `#f` rather than raised as errors, so
//! scripts can probe for them with `if`/`and` instead of needing a
//! condition system.

use crate::config::STD_OUTPUT_PORT;
use crate::env::{Env, GlobalEnv};
use crate::error::EvalError;
use crate::eval::eval_args;
use crate::heap::Handle;
use crate::port;
use crate::value::Value;
use std::rc::Rc;

fn string_arg(function: &str, env: &Env, handle: Handle) -> Result<String, EvalError> {
    match env.get(handle)? {
        Value::String(s) => Ok(s),
        other => Err(EvalError::type_error(function, "string", other.type_name())),
    }
}

pub fn open_output_port(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("open-output-port", "1", args.len()));
    }
    let values = eval_args(args, env)?;
    let name = string_arg("open-output-port", env, values[0])?;
    match port::open_output(&name) {
        Ok(p) => Ok(env.manage(Value::OutPort(p))),
        Err(_) => Ok(env.manage(Value::Bool(false))),
    }
}

pub fn open_input_port(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("open-input-port", "1", args.len()));
    }
    let values = eval_args(args, env)?;
    let name = string_arg("open-input-port", env, values[0])?;
    match port::open_input(&name) {
        Ok(p) => Ok(env.manage(Value::InPort(p))),
        Err(_) => Ok(env.manage(Value::Bool(false))),
    }
}

pub fn close_output_port(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("close-output-port", "1", args.len()));
    }
    let values = eval_args(args, env)?;
    match env.get(values[0])? {
        Value::OutPort(p) => {
            port::close(&p);
            Ok(env.manage(Value::List(vec![])))
        }
        other => Err(EvalError::type_error(
            "close-output-port",
            "output-port",
            other.type_name(),
        )),
    }
}

pub fn close_input_port(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("close-input-port", "1", args.len()));
    }
    let values = eval_args(args, env)?;
    match env.get(values[0])? {
        Value::InPort(p) => {
            port::close(&p);
            Ok(env.manage(Value::List(vec![])))
        }
        other => Err(EvalError::type_error(
            "close-input-port",
            "input-port",
            other.type_name(),
        )),
    }
}

fn out_port_arg(function: &str, env: &Env, args: &[Handle]) -> Result<port::Port, EvalError> {
    match args {
        [] => match env.get(
            env.lookup(STD_OUTPUT_PORT)
                .ok_or_else(|| EvalError::ImplementationError(format!("{STD_OUTPUT_PORT} is unbound")))?,
        )? {
            Value::OutPort(p) => Ok(p),
            other => Err(EvalError::type_error(function, "output-port", other.type_name())),
        },
        [port] => match env.get(*port)? {
            Value::OutPort(p) => Ok(p),
            other => Err(EvalError::type_error(function, "output-port", other.type_name())),
        },
        _ => Err(EvalError::arity(function, "1 or 2", args.len() + 1)),
    }
}

pub fn display(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.is_empty() || args.len() > 2 {
        return Err(EvalError::arity("display", "1 or 2", args.len()));
    }
    let values = eval_args(args, env)?;
    let port = out_port_arg("display", env, &values[1..])?;
    let text = crate::value::to_display(values[0], env)?;
    port::write_str(&port, &text).map_err(|e| EvalError::Io(e.to_string()))?;
    Ok(env.manage(Value::List(vec![])))
}

pub fn displayln(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.is_empty() || args.len() > 2 {
        return Err(EvalError::arity("displayln", "1 or 2", args.len()));
    }
    let values = eval_args(args, env)?;
    let port = out_port_arg("displayln", env, &values[1..])?;
    let text = crate::value::to_display(values[0], env)?;
    port::write_str(&port, &text).map_err(|e| EvalError::Io(e.to_string()))?;
    port::write_str(&port, "\n").map_err(|e| EvalError::Io(e.to_string()))?;
    Ok(env.manage(Value::List(vec![])))
}

pub fn port_to_string(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("port->string", "1", args.len()));
    }
    let values = eval_args(args, env)?;
    let in_port = match env.get(values[0])? {
        Value::InPort(p) => p,
        other => return Err(EvalError::type_error("port->string", "input-port", other.type_name())),
    };
    match port::read_to_string(&in_port) {
        Ok(s) => Ok(env.manage(Value::String(s))),
        Err(_) => Ok(env.manage(Value::Bool(false))),
    }
}

pub fn read(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("read", "1", args.len()));
    }
    let values = eval_args(args, env)?;
    let text = string_arg("read", env, values[0])?;
    let mut parser = crate::parser::Parser::new(&text);
    match parser.parse_next(env) {
        Ok(Some(h)) => Ok(h),
        Ok(None) => Err(EvalError::Io("read: empty input".to_string())),
        Err(e) => Err(EvalError::Io(e.to_string())),
    }
}

pub fn register(global: &Rc<GlobalEnv>) {
    let stdout = global.manage(Value::OutPort(port::stdout_port()));
    global.define(STD_OUTPUT_PORT, stdout);

    for (name, func) in [
        ("open-output-port", open_output_port as crate::value::PrimitiveFn),
        ("open-input-port", open_input_port),
        ("close-output-port", close_output_port),
        ("close-input-port", close_input_port),
        ("display", display),
        ("displayln", displayln),
        ("port->string", port_to_string),
        ("read", read),
    ] {
        let handle = global.manage(Value::PrimitiveFunction {
            name: name.to_string(),
            func,
        });
        global.define(name, handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::eval;
    use crate::parser::Parser;
    use crate::value::to_readable;

    fn setup() -> Env {
        let global = GlobalEnv::new();
        register(&global);
        Env::Global(global)
    }

    fn run_in(env: &Env, src: &str) -> String {
        let mut parser = Parser::new(src);
        let h = parser.parse_next(env).unwrap().unwrap();
        to_readable(eval(h, env).unwrap(), env).unwrap()
    }

    #[test]
    fn opening_a_missing_input_file_yields_false() {
        let env = setup();
        assert_eq!(
            run_in(&env, "(open-input-port \"/nonexistent/path/for/testing\")"),
            "#f"
        );
    }

    #[test]
    fn read_parses_a_single_expression_from_a_string() {
        let env = setup();
        assert_eq!(run_in(&env, "(read \"(1 2 3)\")"), "(1 2 3)");
    }

    #[test]
    fn display_returns_null() {
        let env = setup();
        assert_eq!(run_in(&env, "(displayln \"hi\")"), "()");
    }
}
