//! End-to-end behavior of parse plus evaluate on whole rule scripts.

use pretty_assertions::assert_eq;
use rulescript_eval::{templates, ErrorCategory, Session, Shape, SymbolDecl};

fn eval(source: &str) -> i32 {
    Session::new()
        .evaluate_source(source)
        .unwrap_or_else(|e| panic!("{source:?} failed: {e}"))
}

// =============================================================================
// ARITHMETIC
// =============================================================================

#[test]
fn test_subtraction_is_left_associative() {
    assert_eq!(eval("16-8+4-2+1"), 11);
    assert_eq!(eval("16-8-4-2-1"), 1);
    assert_eq!(eval("100/10/5"), 2);
}

#[test]
fn test_signs_inside_products() {
    assert_eq!(eval("1 * -(1+1)*+(1+1)+10"), 6);
    assert_eq!(eval("-(-1)"), 1);
}

#[test]
fn test_precedence_ladder() {
    assert_eq!(eval("1 + 2 * 3 == 7 && 4 > 3"), 1);
    assert_eq!(eval("a = b = 3; a + b"), 6);
}

// =============================================================================
// VECTORS AND SYMBOLS
// =============================================================================

#[test]
fn test_vector_creation_and_size() {
    let mut session = Session::new();
    session
        .declare_symbols([SymbolDecl::new("tt", "Split times", Shape::Vector)])
        .unwrap();
    session.set_symbol("tt", vec![120, 95, 210]).unwrap();

    let result = session
        .evaluate_source("a[3] = 12; tt.size() + a.size() + a[3]")
        .unwrap();
    assert_eq!(result, 19);
    assert_eq!(session.variable("a"), Some(&[0, 0, 0, 12][..]));
}

#[test]
fn test_assign_to_symbol_is_name_error() {
    let mut session = Session::new();
    session.declare_symbol("status", "", Shape::Scalar).unwrap();
    session.set_symbol("status", 0).unwrap();

    let error = session.evaluate_source("status = 1").unwrap_err();
    assert_eq!(error.category(), ErrorCategory::Name);
    assert_eq!(error.message().template(), templates::ASSIGN_TO_SYMBOL);
}

#[test]
fn test_index_past_end_names_symbol_and_index() {
    let mut session = Session::new();
    session.declare_symbol("tt", "", Shape::Vector).unwrap();
    session.set_symbol("tt", vec![1, 2, 3]).unwrap();

    let error = session.evaluate_source("tt[3]").unwrap_err();
    assert_eq!(error.category(), ErrorCategory::Shape);
    assert_eq!(error.message().args(), ["3", "tt"]);
    assert_eq!(error.to_string(), "shape error: index 3 is out of range for 'tt'");
}

// =============================================================================
// CONTROL FLOW
// =============================================================================

#[test]
fn test_break_unwinds_one_loop() {
    assert_eq!(eval("a=1; while(1) {a=a*2; if (a>60) break;} return a;"), 64);
}

#[test]
fn test_prefix_and_postfix_increment_order() {
    assert_eq!(
        eval("m = 1; n = 1; a = ++m + 4*n++; return a + 100*m + 1000*n"),
        2206
    );
}

#[test]
fn test_dangling_else_binds_innermost_if() {
    let source = "r = 0; if (1) if (0) r = 1; else r = 2; r";
    assert_eq!(eval(source), 2);

    let source = "r = 0; if (0) if (1) r = 1; else r = 2; r";
    assert_eq!(eval(source), 0);
}

#[test]
fn test_else_chain() {
    let source = "x = 5;
        if (x < 3) r = 1;
        else if (x < 6) r = 2;
        else r = 3;
        r";
    assert_eq!(eval(source), 2);
}

#[test]
fn test_runaway_loops_are_stopped() {
    for source in [
        "while (1) x = 1",
        "for (i = 0; i >= 0; i++) x = i",
        "for (;;) {}",
    ] {
        let error = Session::new().evaluate_source(source).unwrap_err();
        assert_eq!(error.category(), ErrorCategory::Runaway, "{source}");
    }
}

#[test]
fn test_syntax_errors_surface_from_evaluate_source() {
    for source in ["x = (1 + 2", "if x > 1 y = 2", "1 + 2 = 3", "break", "max(1)"] {
        let error = Session::new().evaluate_source(source).unwrap_err();
        assert_eq!(error.category(), ErrorCategory::Syntax, "{source}");
    }
}

// =============================================================================
// SESSION STATE
// =============================================================================

#[test]
fn test_redeclaring_does_not_leak_state() {
    let mut session = Session::new();
    session
        .declare_symbols([SymbolDecl::new("pts", "", Shape::Vector)])
        .unwrap();
    session.set_symbol("pts", vec![3, 4]).unwrap();
    assert_eq!(session.evaluate_source("tmp = pts[1]; pts[0] + tmp").unwrap(), 7);

    session
        .declare_symbols([SymbolDecl::new("pts", "", Shape::Scalar)])
        .unwrap();
    assert!(session.variable("tmp").is_none());
    assert_eq!(session.evaluate_source("pts").unwrap_err().category(), ErrorCategory::Name);

    session.set_symbol("pts", 10).unwrap();
    assert_eq!(session.evaluate_source("pts + 1").unwrap(), 11);
    assert_eq!(session.evaluate_source("tmp").unwrap_err().category(), ErrorCategory::Name);
}

#[test]
fn test_failed_evaluation_does_not_poison_session() {
    let mut session = Session::new();
    session.declare_symbol("d", "", Shape::Scalar).unwrap();
    session.set_symbol("d", 0).unwrap();

    let program = session.parse("x = 10; x / d").unwrap();
    assert_eq!(
        session.evaluate(&program).unwrap_err().category(),
        ErrorCategory::Arithmetic
    );

    session.set_symbol("d", 5).unwrap();
    assert_eq!(session.evaluate(&program).unwrap(), 2);
}

#[test]
fn test_same_program_twice() {
    let mut session = Session::new();
    let program = session
        .parse("s = 0; for (i = 1; i <= 10; i++) s = s + i * i; s")
        .unwrap();
    let first = session.evaluate(&program).unwrap();
    let second = session.evaluate(&program).unwrap();
    assert_eq!(first, 385);
    assert_eq!(first, second);
}
