//! Whole programs, parsed from source and run through both evaluators.

use pretty_assertions::assert_eq;
use tramp_ast::Expr;
use tramp_eval::{evaluate, interp, Env, EvalError, Mismatch, Value};
use tramp_parse::parse_str;

fn parse(src: &str) -> Expr {
    parse_str("<test>", src).expect("parse")
}

/// Run `src` on the step engine and the direct evaluator, require that they
/// agree, and return the shared result.
fn run(src: &str) -> Result<Value, EvalError> {
    let e = parse(src);
    let direct = interp(&e, &Env::empty());
    let stepped = evaluate(e);
    assert_eq!(stepped, direct, "evaluators disagree on {src}");
    stepped
}

#[test]
fn let_binding() {
    assert_eq!(run("_let x = 2 _in x + 8"), Ok(Value::Number(10)));
}

#[test]
fn factorial() {
    let src = "_let factrl = _fun (factrl) _fun (x) \
                 _if x == 1 _then 1 _else x * factrl(factrl)(x + -1) \
               _in factrl(factrl)(5)";
    assert_eq!(run(src), Ok(Value::Number(120)));
}

#[test]
fn fibonacci() {
    let src = "_let fib = _fun (fib) _fun (x) \
                 _if x == 0 _then 1 \
                 _else _if x == 1 _then 1 \
                 _else fib(fib)(x + -2) + fib(fib)(x + -1) \
               _in fib(fib)(10)";
    assert_eq!(run(src), Ok(Value::Number(89)));
}

#[test]
fn lexical_capture() {
    let src = "_let y = 8 _in _let f = _fun (x) x * y _in f (2)";
    assert_eq!(run(src), Ok(Value::Number(16)));
}

#[test]
fn capture_ignores_the_call_site_scope() {
    let src = "_let y = 8 _in _let f = _fun (x) x * y _in _let y = 100 _in f(2)";
    assert_eq!(run(src), Ok(Value::Number(16)));
}

#[test]
fn partial_application() {
    let src = "_let add = _fun (x) _fun (y) x + y _in _let addFive = add(5) _in addFive(10)";
    assert_eq!(run(src), Ok(Value::Number(15)));
}

#[test]
fn comparison_is_structural() {
    assert_eq!(run("1 + 1 == 2"), Ok(Value::Boolean(true)));
    assert_eq!(run("5 == _false"), Ok(Value::Boolean(false)));
    assert_eq!(run("0 == _false"), Ok(Value::Boolean(false)));
    assert_eq!(run("_true == _true"), Ok(Value::Boolean(true)));
}

#[test]
fn closures_compare_by_code_only() {
    let src = "_let f = _fun (x) x _in _let g = _let y = 1 _in _fun (x) x _in f == g";
    assert_eq!(run(src), Ok(Value::Boolean(true)));
    let src = "(_fun (x) x) == (_fun (y) y)";
    assert_eq!(run(src), Ok(Value::Boolean(false)));
}

#[test]
fn truthiness_in_conditions() {
    assert_eq!(run("_if 3 _then 1 _else 2"), Ok(Value::Number(1)));
    assert_eq!(run("_if 0 _then 1 _else 2"), Ok(Value::Number(2)));
    assert_eq!(run("_if _fun (x) x _then 1 _else 2"), Ok(Value::Number(2)));
}

#[test]
fn untaken_branch_is_never_evaluated() {
    assert_eq!(run("_if _true _then 1 _else nope"), Ok(Value::Number(1)));
}

#[test]
fn addition_wraps_at_32_bits() {
    assert_eq!(run("2147483647 + 1"), Ok(Value::Number(i32::MIN)));
    assert_eq!(run("-2147483648 + -1"), Ok(Value::Number(i32::MAX)));
    assert_eq!(run("65536 * 65536"), Ok(Value::Number(0)));
}

#[test]
fn function_results_render_as_literals() {
    let v = run("_let k = 1 _in _fun (x) x + k").unwrap();
    assert_eq!(v.to_string(), "_fun (x) x + k");
}

#[test]
fn unbound_variable() {
    assert_eq!(run("y"), Err(EvalError::UnboundVariable("y".into())));
    assert_eq!(
        run("y").unwrap_err().to_string(),
        "unbound variable: y"
    );
}

#[test]
fn adding_a_returned_boolean() {
    let err = run("(_fun (x) x)(_true) + 1").unwrap_err();
    assert_eq!(err, EvalError::TypeMismatch(Mismatch::AddBooleans));
    assert_eq!(err.to_string(), "type mismatch: cannot add booleans");
}

#[test]
fn type_mismatch_kinds() {
    let mismatch = |src| match run(src) {
        Err(EvalError::TypeMismatch(m)) => m,
        other => panic!("expected a type mismatch for {src}, got {other:?}"),
    };
    assert_eq!(mismatch("1 + _true"), Mismatch::NotANumber);
    assert_eq!(mismatch("2 * _fun (x) x"), Mismatch::NotANumber);
    assert_eq!(mismatch("_false * 2"), Mismatch::MultiplyBooleans);
    assert_eq!(mismatch("(_fun (x) x) + 1"), Mismatch::AddFunctions);
    assert_eq!(mismatch("(_fun (x) x) * 1"), Mismatch::MultiplyFunctions);
    assert_eq!(mismatch("1(2)"), Mismatch::NotCallable);
    assert_eq!(mismatch("_let f = _true _in f(1)"), Mismatch::NotCallable);
}

#[test]
fn a_failing_operand_stops_evaluation() {
    // the right operand's error is reported even though the left is also bad
    assert_eq!(run("_true + nope"), Err(EvalError::UnboundVariable("nope".into())));
}
