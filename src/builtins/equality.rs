//! Equality: =, eq?
//!
//! `=` is a numeric-equality chain over at least two arguments. `eq?`
//! compares Number/String/Bool structurally and everything else by handle
//! identity (address equality), matching the original Lisp's simplification
//! of classical `eq` down to a single obvious notion of sameness.

use crate::env::{Env, GlobalEnv};
use crate::error::EvalError;
use crate::eval::eval_args;
use crate::heap::Handle;
use crate::value::Value;
use std::rc::Rc;

pub fn numeric_eq(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.len() < 2 {
        return Err(EvalError::arity("=", "at least 2", args.len()));
    }
    let values = eval_args(args, env)?;
    let mut nums = Vec::with_capacity(values.len());
    for h in values {
        match env.get(h)? {
            Value::Number(n) => nums.push(n),
            other => return Err(EvalError::type_error("=", "number", other.type_name())),
        }
    }
    let first = nums[0];
    let equal = nums[1..].iter().all(|n| *n == first);
    Ok(env.manage(Value::Bool(equal)))
}

pub fn eq(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("eq?", "2", args.len()));
    }
    let values = eval_args(args, env)?;
    let (a_handle, b_handle) = (values[0], values[1]);
    let a = env.get(a_handle)?;
    let b = env.get(b_handle)?;
    let result = match (&a, &b) {
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        _ => a_handle == b_handle,
    };
    Ok(env.manage(Value::Bool(result)))
}

pub fn register(global: &Rc<GlobalEnv>) {
    for (name, func) in [
        ("=", numeric_eq as crate::value::PrimitiveFn),
        ("eq?", eq),
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
    use crate::parser::Parser;

    fn eval_bool(src: &str) -> bool {
        let global = GlobalEnv::new();
        register(&global);
        let env = Env::Global(global);
        let mut parser = Parser::new(src);
        let h = parser.parse_next(&env).unwrap().unwrap();
        match env.get(crate::eval::eval(h, &env).unwrap()).unwrap() {
            Value::Bool(b) => b,
            _ => panic!("expected bool"),
        }
    }

    #[test]
    fn numeric_equality_accepts_integral_floats() {
        assert!(eval_bool("(= 1 1.0)"));
        assert!(!eval_bool("(= 1 2)"));
    }

    #[test]
    fn eq_compares_strings_structurally() {
        assert!(eval_bool("(eq? \"a\" \"a\")"));
        assert!(!eval_bool("(eq? \"a\" \"b\")"));
    }

    #[test]
    fn eq_compares_numbers() {
        assert!(eval_bool("(eq? 1 1)"));
    }

    #[test]
    fn eq_compares_atoms_by_handle_identity_not_structurally() {
        // The parser never interns atoms: each `(quote x)` allocates a fresh
        // `Value::Atom`, so two freshly-quoted occurrences of the same name
        // are distinct handles and therefore not `eq?`.
        let global = GlobalEnv::new();
        register(&global);
        crate::builtins::special_forms::register(&global);
        let env = Env::Global(global);
        let mut parser = Parser::new("(eq? (quote x) (quote x))");
        let h = parser.parse_next(&env).unwrap().unwrap();
        match env.get(crate::eval::eval(h, &env).unwrap()).unwrap() {
            Value::Bool(b) => assert!(!b),
            _ => panic!("expected bool"),
        }
    }
}
