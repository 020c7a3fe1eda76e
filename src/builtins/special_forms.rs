//! Special forms, implemented as ordinary primitives that choose not to
//! evaluate (some of) their arguments: quote, define, lambda, if, and, or, not.

use crate::env::{Env, GlobalEnv};
use crate::error::EvalError;
use crate::eval::eval;
use crate::heap::Handle;
use crate::value::{LambdaFunction, Value};
use std::rc::Rc;

pub fn quote(args: &[Handle], _env: &Env) -> Result<Handle, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("quote", "1", args.len()));
    }
    Ok(args[0])
}

pub fn define(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("define", "2", args.len()));
    }
    let name = match env.get(args[0])? {
        Value::Atom(name) => name,
        other => {
            return Err(EvalError::type_error(
                "define",
                "atom",
                other.type_name(),
            ))
        }
    };
    let value = eval(args[1], env)?;
    env.define(&name, value)?;
    Ok(env.manage(Value::List(vec![])))
}

pub fn lambda(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.len() < 2 {
        return Err(EvalError::arity("lambda", "at least 2", args.len()));
    }
    let params = match env.get(args[0])? {
        Value::List(items) => {
            let mut names = Vec::with_capacity(items.len());
            for item in items {
                match env.get(item)? {
                    Value::Atom(name) => names.push(name),
                    other => {
                        return Err(EvalError::type_error(
                            "lambda",
                            "list of atoms",
                            other.type_name(),
                        ))
                    }
                }
            }
            names
        }
        other => {
            return Err(EvalError::type_error(
                "lambda",
                "list of atoms",
                other.type_name(),
            ))
        }
    };

    let closure = env.capture();
    let body = args[1..].to_vec();
    Ok(env.manage(Value::LambdaFunction(LambdaFunction {
        params,
        body,
        closure,
    })))
}

pub fn if_form(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.len() != 3 {
        return Err(EvalError::arity("if", "3", args.len()));
    }
    let predicate = eval(args[0], env)?;
    if env.get(predicate)?.is_truthy() {
        eval(args[1], env)
    } else {
        eval(args[2], env)
    }
}

pub fn and(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    for &arg in args {
        let h = eval(arg, env)?;
        if !env.get(h)?.is_truthy() {
            return Ok(env.manage(Value::Bool(false)));
        }
    }
    Ok(env.manage(Value::Bool(true)))
}

pub fn or(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    for &arg in args {
        let h = eval(arg, env)?;
        if env.get(h)?.is_truthy() {
            return Ok(env.manage(Value::Bool(true)));
        }
    }
    Ok(env.manage(Value::Bool(false)))
}

pub fn not(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("not", "1", args.len()));
    }
    let h = eval(args[0], env)?;
    let truthy = env.get(h)?.is_truthy();
    Ok(env.manage(Value::Bool(!truthy)))
}

pub fn register(global: &Rc<GlobalEnv>) {
    for (name, func) in [
        ("quote", quote as crate::value::PrimitiveFn),
        ("define", define),
        ("lambda", lambda),
        ("if", if_form),
        ("and", and),
        ("or", or),
        ("not", not),
    ] {
        let handle = global.manage(Value::PrimitiveFunction {
            name: name.to_string(),
            func,
        });
        global.define(name, handle);
    }
}
