//! Higher-order list operations: map, filter, fold.
//!
//! Each already-evaluated element is wrapped as `(quote v)` before being
//! passed to the user callback, so the callback's own argument-evaluation
//! step hands it back unchanged rather than re-evaluating it as code.

use crate::env::{Env, GlobalEnv};
use crate::error::EvalError;
use crate::eval::eval_args;
use crate::heap::Handle;
use crate::value::Value;
use std::rc::Rc;

fn apply(callee: Handle, arg_values: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    let quote = env.lookup("quote").ok_or_else(|| {
        EvalError::ImplementationError("quote is not bound in this environment".to_string())
    })?;
    let wrapped: Vec<Handle> = arg_values
        .iter()
        .map(|&v| env.manage(Value::List(vec![quote, v])))
        .collect();
    let mut call = Vec::with_capacity(wrapped.len() + 1);
    call.push(callee);
    call.extend(wrapped);
    let call_expr = env.manage(Value::List(call));
    crate::eval::eval(call_expr, env)
}

pub fn map(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("map", "2", args.len()));
    }
    let values = eval_args(args, env)?;
    let (callee, list) = (values[0], values[1]);
    let items = match env.get(list)? {
        Value::List(items) => items,
        other => return Err(EvalError::type_error("map", "list", other.type_name())),
    };
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        result.push(apply(callee, &[item], env)?);
    }
    Ok(env.manage(Value::List(result)))
}

pub fn filter(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("filter", "2", args.len()));
    }
    let values = eval_args(args, env)?;
    let (callee, list) = (values[0], values[1]);
    let items = match env.get(list)? {
        Value::List(items) => items,
        other => return Err(EvalError::type_error("filter", "list", other.type_name())),
    };
    let mut result = Vec::new();
    for item in items {
        let kept = apply(callee, &[item], env)?;
        if env.get(kept)?.is_truthy() {
            result.push(item);
        }
    }
    Ok(env.manage(Value::List(result)))
}

pub fn fold(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.len() != 3 {
        return Err(EvalError::arity("fold", "3", args.len()));
    }
    let values = eval_args(args, env)?;
    let (callee, init, list) = (values[0], values[1], values[2]);
    let items = match env.get(list)? {
        Value::List(items) => items,
        other => return Err(EvalError::type_error("fold", "list", other.type_name())),
    };
    let mut acc = init;
    for item in items {
        acc = apply(callee, &[acc, item], env)?;
    }
    Ok(acc)
}

pub fn register(global: &Rc<GlobalEnv>) {
    for (name, func) in [
        ("map", map as crate::value::PrimitiveFn),
        ("filter", filter),
        ("fold", fold),
    ] {
        let handle = global.manage(Value::PrimitiveFunction {
            name: name.to_string(),
            func,
        });
        global.define(name, handle);
    }
}
