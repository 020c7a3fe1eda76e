//! List operations: cons, car, cdr, list, null?
//!
//! There is no dotted-pair type: `cons` always prepends onto a list, and
//! `cdr` always returns a (possibly empty) list.

use crate::env::{Env, GlobalEnv};
use crate::error::EvalError;
use crate::eval::eval_args;
use crate::heap::Handle;
use crate::value::Value;
use std::rc::Rc;

pub fn cons(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("cons", "2", args.len()));
    }
    let values = eval_args(args, env)?;
    let (car, cdr) = (values[0], values[1]);
    match env.get(cdr)? {
        Value::List(items) => {
            let mut result = Vec::with_capacity(items.len() + 1);
            result.push(car);
            result.extend(items);
            Ok(env.manage(Value::List(result)))
        }
        other => Err(EvalError::type_error(
            "cons",
            "list",
            other.type_name(),
        )),
    }
}

pub fn car(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("car", "1", args.len()));
    }
    let values = eval_args(args, env)?;
    match env.get(values[0])? {
        Value::List(items) if !items.is_empty() => Ok(items[0]),
        Value::List(_) => Err(EvalError::type_error("car", "non-empty list", "empty list")),
        other => Err(EvalError::type_error("car", "list", other.type_name())),
    }
}

pub fn cdr(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("cdr", "1", args.len()));
    }
    let values = eval_args(args, env)?;
    match env.get(values[0])? {
        Value::List(items) if !items.is_empty() => {
            Ok(env.manage(Value::List(items[1..].to_vec())))
        }
        Value::List(_) => Err(EvalError::type_error("cdr", "non-empty list", "empty list")),
        other => Err(EvalError::type_error("cdr", "list", other.type_name())),
    }
}

pub fn list(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    let values = eval_args(args, env)?;
    Ok(env.manage(Value::List(values)))
}

pub fn is_null(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("null?", "1", args.len()));
    }
    let values = eval_args(args, env)?;
    let result = env.get(values[0])?.is_null();
    Ok(env.manage(Value::Bool(result)))
}

pub fn register(global: &Rc<GlobalEnv>) {
    let empty = global.manage(Value::List(vec![]));
    global.define("null", empty);

    for (name, func) in [
        ("cons", cons as crate::value::PrimitiveFn),
        ("car", car),
        ("cdr", cdr),
        ("list", list),
        ("null?", is_null),
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

    fn run(src: &str) -> String {
        let global = GlobalEnv::new();
        register(&global);
        crate::builtins::special_forms::register(&global);
        let env = Env::Global(global);
        let mut parser = Parser::new(src);
        let h = parser.parse_next(&env).unwrap().unwrap();
        to_readable(eval(h, &env).unwrap(), &env).unwrap()
    }

    #[test]
    fn cons_prepends() {
        assert_eq!(run("(cons 1 (quote (2 3)))"), "(1 2 3)");
    }

    #[test]
    fn cons_onto_non_list_is_an_error() {
        let global = GlobalEnv::new();
        register(&global);
        crate::builtins::special_forms::register(&global);
        let env = Env::Global(global);
        let mut parser = Parser::new("(cons 1 2)");
        let h = parser.parse_next(&env).unwrap().unwrap();
        assert!(eval(h, &env).is_err());
    }

    #[test]
    fn car_and_cdr() {
        assert_eq!(run("(car (quote (1 2 3)))"), "1");
        assert_eq!(run("(cdr (quote (1 2 3)))"), "(2 3)");
    }

    #[test]
    fn car_of_empty_list_is_an_error() {
        let global = GlobalEnv::new();
        register(&global);
        crate::builtins::special_forms::register(&global);
        let env = Env::Global(global);
        let mut parser = Parser::new("(car (quote ()))");
        let h = parser.parse_next(&env).unwrap().unwrap();
        assert!(eval(h, &env).is_err());
    }

    #[test]
    fn null_check() {
        assert_eq!(run("(null? null)"), "#t");
        assert_eq!(run("(null? (quote (1)))"), "#f");
    }
}
