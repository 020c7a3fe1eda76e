//! Numeric arithmetic: +, -, *, /, %
//!
//! All arguments are evaluated eagerly in the caller's environment; every
//! argument must evaluate to a Number.

use crate::env::{Env, GlobalEnv};
use crate::error::EvalError;
use crate::eval::eval_args;
use crate::heap::Handle;
use crate::value::Value;
use std::rc::Rc;

fn numbers(args: &[Handle], env: &Env, function: &str) -> Result<Vec<f64>, EvalError> {
    eval_args(args, env)?
        .into_iter()
        .map(|h| match env.get(h)? {
            Value::Number(n) => Ok(n),
            other => Err(EvalError::type_error(function, "number", other.type_name())),
        })
        .collect()
}

/// `(+ a b c ...)` folds left with 0 as the identity.
pub fn add(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity("+", "at least 1", 0));
    }
    let sum = numbers(args, env, "+")?.into_iter().sum::<f64>();
    Ok(env.manage(Value::Number(sum)))
}

/// `(- a b c ...)` subtracts the rest from the first; `(- a)` negates.
pub fn sub(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity("-", "at least 1", 0));
    }
    let nums = numbers(args, env, "-")?;
    let result = if nums.len() == 1 {
        -nums[0]
    } else {
        nums[1..].iter().fold(nums[0], |acc, n| acc - n)
    };
    Ok(env.manage(Value::Number(result)))
}

/// `(* a b c ...)` folds left with 1 as the identity.
pub fn mul(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity("*", "at least 1", 0));
    }
    let product = numbers(args, env, "*")?.into_iter().product::<f64>();
    Ok(env.manage(Value::Number(product)))
}

/// `(/ a b c ...)` divides the first by the rest; `(/ a)` reciprocates.
pub fn div(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity("/", "at least 1", 0));
    }
    let nums = numbers(args, env, "/")?;
    let result = if nums.len() == 1 {
        1.0 / nums[0]
    } else {
        nums[1..].iter().fold(nums[0], |acc, n| acc / n)
    };
    Ok(env.manage(Value::Number(result)))
}

/// `(% a b)` is floating modulo of exactly two numbers.
pub fn modulo(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("%", "2", args.len()));
    }
    let nums = numbers(args, env, "%")?;
    Ok(env.manage(Value::Number(nums[0] % nums[1])))
}

pub fn register(global: &Rc<GlobalEnv>) {
    for (name, func) in [
        ("+", add as crate::value::PrimitiveFn),
        ("-", sub),
        ("*", mul),
        ("/", div),
        ("%", modulo),
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

    fn eval_src(src: &str) -> f64 {
        let global = GlobalEnv::new();
        register(&global);
        let env = Env::Global(global);
        let mut parser = Parser::new(src);
        let h = parser.parse_next(&env).unwrap().unwrap();
        match env.get(crate::eval::eval(h, &env).unwrap()).unwrap() {
            Value::Number(n) => n,
            _ => panic!("expected number"),
        }
    }

    #[test]
    fn sum_of_several_arguments() {
        assert_eq!(eval_src("(+ 1 2 3)"), 6.0);
    }

    #[test]
    fn single_argument_subtraction_negates() {
        assert_eq!(eval_src("(- 5)"), -5.0);
    }

    #[test]
    fn division_chain() {
        assert_eq!(eval_src("(/ 100 2 5)"), 10.0);
    }

    #[test]
    fn modulo_of_two_numbers() {
        assert_eq!(eval_src("(% 17 5)"), 2.0);
    }
}
