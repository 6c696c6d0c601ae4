//! Symbol listings and debug dumps as a host UI sees them.

use pretty_assertions::assert_eq;
use rulescript_eval::{DumpRow, Program, Session, Shape, SymbolDecl, SymbolInfo};

fn event_session() -> Session {
    let mut session = Session::new();
    session
        .declare_symbols([
            SymbolDecl::new("status", "Runner status code", Shape::Scalar),
            SymbolDecl::new("legs", "Leg times in seconds", Shape::Vector),
            SymbolDecl::new("punches", "Punch times per control", Shape::Matrix),
        ])
        .unwrap();
    session
}

#[test]
fn test_symbols_in_declaration_order() {
    let session = event_session();
    let listed: Vec<(String, bool, bool)> = session
        .symbols()
        .into_iter()
        .map(|s| (s.name, s.is_vector, s.is_matrix))
        .collect();
    assert_eq!(
        listed,
        [
            ("status".to_string(), false, false),
            ("legs".to_string(), true, false),
            ("punches".to_string(), true, true),
        ]
    );
}

#[test]
fn test_symbol_info_serializes_for_editor() {
    let session = event_session();
    let json = serde_json::to_value(&session.symbols()[1]).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "legs",
            "description": "Leg times in seconds",
            "is_vector": true,
            "is_matrix": false,
        })
    );

    let back: SymbolInfo = serde_json::from_value(json).unwrap();
    assert_eq!(Shape::from_flags(back.is_vector, back.is_matrix), Shape::Vector);
}

#[test]
fn test_symbol_decls_load_from_json() {
    let decls: Vec<SymbolDecl> = serde_json::from_str(
        r#"[{"name": "bonus", "description": "Extra points", "shape": "Scalar"}]"#,
    )
    .unwrap();

    let mut session = Session::new();
    session.declare_symbols(decls).unwrap();
    assert_eq!(session.symbol_description("bonus"), Some("Extra points"));
}

#[test]
fn test_dump_after_evaluation() {
    let mut session = event_session();
    session.set_symbol("status", 0).unwrap();
    session.set_symbol("legs", vec![300, 280]).unwrap();

    let source = "total = 0;
        for (i = 0; i < legs.size(); i++) { t[i] = legs[i]; total = total + legs[i]; }";
    session.evaluate_source(source).unwrap();

    let variables: Vec<String> = session.dump_variables().iter().map(ToString::to_string).collect();
    assert_eq!(variables, ["i = 2", "t = [300, 280]", "total = 580"]);

    let symbols: Vec<String> = session.dump_symbols().iter().map(ToString::to_string).collect();
    assert_eq!(
        symbols,
        [
            "status = 0  // Runner status code",
            "legs = [300, 280]  // Leg times in seconds",
            "punches (unset)  // Punch times per control",
        ]
    );
}

#[test]
fn test_dump_row_fields() {
    let mut session = event_session();
    session.set_symbol("punches", vec![vec![10, 20], vec![30]]).unwrap();

    let row = session
        .dump_symbols()
        .into_iter()
        .find(|row| row.name == "punches")
        .unwrap();
    assert_eq!(
        row,
        DumpRow {
            name: "punches".to_string(),
            shape: Shape::Matrix,
            value: Some("[[10, 20], [30]]".to_string()),
            description: "Punch times per control".to_string(),
        }
    );
}

#[test]
fn test_stored_program_evaluates_after_reload() {
    let mut session = Session::new();
    let program = session.parse("s = 0; for (i = 1; i <= 4; i++) s = s + i; s").unwrap();
    let json = serde_json::to_string(&program).unwrap();

    let reloaded: Program = serde_json::from_str(&json).unwrap();
    assert_eq!(session.evaluate(&reloaded).unwrap(), 10);
}

#[test]
fn test_reload_rejects_broken_tree() {
    for json in [
        r#"{"arena":{"nodes":[{"Sequence":[7]}]},"root":0}"#,
        r#"{"arena":{"nodes":[{"Sequence":[0]}]},"root":0}"#,
    ] {
        assert!(serde_json::from_str::<Program>(json).is_err(), "{json}");
    }
}
