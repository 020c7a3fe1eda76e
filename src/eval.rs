// ABOUTME: Evaluator: unifies special forms and ordinary functions behind one dispatch path

use crate::env::{Env, Scope};
use crate::error::EvalError;
use crate::heap::Handle;
use crate::value::{LambdaFunction, Value};
use std::collections::HashMap;
use std::rc::Rc;

/// Evaluates `handle` against `env`.
///
/// Every callable - special form or ordinary function alike - is invoked
/// with its argument expressions un-evaluated; it is the callable's own
/// responsibility to decide what, if anything, to evaluate. This is what
/// lets `if`, `quote`, `define`, `lambda`, `and`, and `or` live in the
/// primitive table next to `+` and `cons` rather than in a hardcoded switch.
pub fn eval(handle: Handle, env: &Env) -> Result<Handle, EvalError> {
    let value = env.get(handle)?;
    match value {
        Value::Number(_)
        | Value::Bool(_)
        | Value::String(_)
        | Value::PrimitiveFunction { .. }
        | Value::LambdaFunction(_)
        | Value::InPort(_)
        | Value::OutPort(_) => Ok(handle),

        Value::Atom(name) => env
            .lookup(&name)
            .ok_or(EvalError::UndefinedAtom(name)),

        Value::List(items) => {
            if items.is_empty() {
                return Err(EvalError::EmptyApplication);
            }
            let head = eval(items[0], env)?;
            match env.get(head)? {
                Value::PrimitiveFunction { func, .. } => func(&items[1..], env),
                Value::LambdaFunction(lambda) => call_lambda(&lambda, &items[1..], env),
                _ => Err(EvalError::NotCallable),
            }
        }
    }
}

/// Evaluates every argument expression in `caller_env`, left to right.
pub fn eval_args(args: &[Handle], caller_env: &Env) -> Result<Vec<Handle>, EvalError> {
    args.iter().map(|&a| eval(a, caller_env)).collect()
}

fn call_lambda(lambda: &LambdaFunction, arg_exprs: &[Handle], caller_env: &Env) -> Result<Handle, EvalError> {
    if arg_exprs.len() != lambda.params.len() {
        return Err(EvalError::arity(
            "lambda",
            lambda.params.len().to_string(),
            arg_exprs.len(),
        ));
    }

    let mut bindings: HashMap<String, Handle> = lambda.closure.bindings.clone();
    for (param, &arg_expr) in lambda.params.iter().zip(arg_exprs) {
        let value = eval(arg_expr, caller_env)?;
        bindings.insert(param.clone(), value);
    }

    let working_env = Env::Local(Rc::new(Scope {
        bindings,
        global: lambda.closure.global.clone(),
    }));

    let mut result = working_env.manage(Value::List(vec![]));
    for &expr in &lambda.body {
        result = eval(expr, &working_env)?;
    }
    Ok(result)
}
