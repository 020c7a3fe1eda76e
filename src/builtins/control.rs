//! Control and introspection: exit, eval, number?

use crate::env::{Env, GlobalEnv};
use crate::error::EvalError;
use crate::eval::eval_args;
use crate::heap::Handle;
use crate::value::Value;
use std::rc::Rc;

pub fn exit(args: &[Handle], _env: &Env) -> Result<Handle, EvalError> {
    if !args.is_empty() {
        return Err(EvalError::arity("exit", "0", args.len()));
    }
    Err(EvalError::Exit)
}

/// `(eval expr)` evaluates `expr` once to get a value, then evaluates that
/// value again as code — the usual two-step for data built with `quote`.
pub fn eval_primitive(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("eval", "1", args.len()));
    }
    let values = eval_args(args, env)?;
    crate::eval::eval(values[0], env)
}

pub fn is_number(args: &[Handle], env: &Env) -> Result<Handle, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("number?", "1", args.len()));
    }
    let values = eval_args(args, env)?;
    let result = matches!(env.get(values[0])?, Value::Number(_));
    Ok(env.manage(Value::Bool(result)))
}

pub fn register(global: &Rc<GlobalEnv>) {
    for (name, func) in [
        ("exit", exit as crate::value::PrimitiveFn),
        ("eval", eval_primitive),
        ("number?", is_number),
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
    use crate::builtins::special_forms;
    use crate::eval::eval;
    use crate::parser::Parser;
    use crate::value::to_readable;

    fn run(src: &str) -> String {
        let global = GlobalEnv::new();
        special_forms::register(&global);
        register(&global);
        let env = Env::Global(global);
        let mut parser = Parser::new(src);
        let h = parser.parse_next(&env).unwrap().unwrap();
        to_readable(eval(h, &env).unwrap(), &env).unwrap()
    }

    #[test]
    fn eval_runs_quoted_code() {
        assert_eq!(run("(eval (quote (quote 5)))"), "5");
    }

    #[test]
    fn number_predicate() {
        assert_eq!(run("(number? 5)"), "#t");
        assert_eq!(run("(number? (quote a))"), "#f");
    }

    #[test]
    fn exit_signals_exit() {
        let global = GlobalEnv::new();
        special_forms::register(&global);
        register(&global);
        let env = Env::Global(global);
        let mut parser = Parser::new("(exit)");
        let h = parser.parse_next(&env).unwrap().unwrap();
        assert!(matches!(eval(h, &env), Err(EvalError::Exit)));
    }
}
