// ABOUTME: End-to-end tests driving the full parse/eval/print pipeline

use lisp_heap_interpreter::builtins::register_builtins;
use lisp_heap_interpreter::env::{Env, GlobalEnv};
use lisp_heap_interpreter::error::EvalError;
use lisp_heap_interpreter::eval::eval;
use lisp_heap_interpreter::parser::Parser;
use lisp_heap_interpreter::value::to_readable;

fn run(src: &str) -> String {
    let global = GlobalEnv::new();
    register_builtins(&global);
    let env = Env::Global(global);
    let mut parser = Parser::new(src);
    let mut last = None;
    while let Some(h) = parser.parse_next(&env).unwrap() {
        last = Some(eval(h, &env).unwrap());
    }
    to_readable(last.unwrap(), &env).unwrap()
}

fn run_err(src: &str) -> EvalError {
    let global = GlobalEnv::new();
    register_builtins(&global);
    let env = Env::Global(global);
    let mut parser = Parser::new(src);
    let h = parser.parse_next(&env).unwrap().unwrap();
    eval(h, &env).unwrap_err()
}

#[test]
fn arithmetic_and_lists_compose() {
    assert_eq!(run("(+ 1 2 3)"), "6");
    assert_eq!(run("(car (cdr (list 1 2 3)))"), "2");
    assert_eq!(run("(cons 1 (cons 2 null))"), "(1 2)");
}

#[test]
fn closures_capture_definition_time_bindings() {
    assert_eq!(
        run("(define make-adder (lambda (n) (lambda (x) (+ x n)))) \
             (define add5 (make-adder 5)) \
             (add5 10)"),
        "15"
    );
}

#[test]
fn recursive_lambda_via_self_reference() {
    assert_eq!(
        run("(define fact (lambda (n) (if (eq? n 0) 1 (* n (fact (- n 1)))))) (fact 5)"),
        "120"
    );
}

#[test]
fn map_filter_fold_pipeline() {
    assert_eq!(
        run("(fold (lambda (acc x) (+ acc x)) 0 \
               (filter (lambda (x) (not (eq? x 3))) \
                 (map (lambda (x) (* x x)) (list 1 2 3))))"),
        "14"
    );
}

#[test]
fn quote_prevents_evaluation_and_eval_reverses_it() {
    assert_eq!(run("(quote (+ 1 2))"), "(+ 1 2)");
    assert_eq!(run("(eval (quote (+ 1 2)))"), "3");
}

#[test]
fn booleans_and_truthiness() {
    assert_eq!(run("(and (not #f) (or #f 1))"), "#t");
    assert_eq!(run("(if 0 \"zero-is-truthy\" \"unreachable\")"), "\"zero-is-truthy\"");
}

#[test]
fn undefined_atoms_and_arity_mismatches_surface_as_errors() {
    assert!(matches!(run_err("nope"), EvalError::UndefinedAtom(_)));
    assert!(matches!(run_err("(+ )"), EvalError::ArityError { .. }));
    assert!(matches!(run_err("(car null)"), EvalError::TypeError { .. }));
}

#[test]
fn define_outside_the_global_scope_is_illegal() {
    assert!(matches!(
        run_err("((lambda () (define x 1)))"),
        EvalError::IllegalContext(_)
    ));
}

#[test]
fn garbage_collection_reclaims_unreachable_intermediate_values() {
    let global = GlobalEnv::new();
    register_builtins(&global);
    let env = Env::Global(global);
    let mut parser = Parser::new("(+ (+ 1 2) (+ 3 4)) (+ (+ 1 2) (+ 3 4))");
    while let Some(h) = parser.parse_next(&env).unwrap() {
        eval(h, &env).unwrap();
    }
    let before = env.global().heap_len();
    env.global().collect().unwrap();
    let after = env.global().heap_len();
    assert!(after < before, "collection should reclaim dead intermediates ({after} >= {before})");
}

#[test]
fn read_round_trips_through_display() {
    assert_eq!(run("(display (read \"(1 2 3)\"))"), "()");
    assert_eq!(run("(read \"(a b c)\")"), "(a b c)");
}

#[test]
fn exit_signal_propagates_as_a_distinct_error_variant() {
    assert!(matches!(run_err("(exit)"), EvalError::Exit));
}
