//! End-to-end translation scenarios.

use qasm2stim_core::{
    Found, GateTable, LineEnding, MAX_GATE_NAME_LEN, TranslateError, TranslateOptions, Translator,
};

fn translate(src: &str) -> Result<String, TranslateError> {
    let stim = Translator::default().translate(src.as_bytes())?;
    Ok(String::from_utf8(stim.into_bytes()).unwrap())
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn test_bell_pair() {
    let qasm = "OPENQASM 2.0;\nqreg q[2];\nh q[0];\nh q[1];\ncx q[0],q[1];\n";
    assert_eq!(translate(qasm).unwrap(), "#2\nH 0 1\nCX 0 1\n");
}

#[test]
fn test_sdg() {
    let out = translate("OPENQASM 2.0;\nqreg q[4];\nsdg q[3];\n").unwrap();
    assert!(out.contains("S_DAG 3"));
}

#[test]
fn test_measure_arrow_discarded() {
    let qasm = "OPENQASM 2.0;\nqreg q[1];\ncreg c[1];\nmeasure q[0] -> c[0];\n";
    let out = translate(qasm).unwrap();
    assert_eq!(out, "#1\nM 0\n");
    assert!(!out.contains('c'));
}

#[test]
fn test_measurements_coalesce() {
    let qasm = "qreg q[3];\nmeasure q[0] -> c[0];\nmeasure q[1] -> c[1];\nmeasure q[2] -> c[2];\n";
    assert_eq!(translate(qasm).unwrap(), "#3\nM 0 1 2\n");
}

#[test]
fn test_full_circuit() {
    let qasm = r#"OPENQASM 2.0;
include "qelib1.inc";
qreg q[4];
creg c[4];
h q[0];
cx q[0],q[1];
cx q[1],q[2];
cx q[2],q[3];
s q[1];
sdg q[2];
swap q[0],q[3];
iswap q[1],q[2];
cz q[0],q[2];
cy q[1],q[3];
x q[0];
y q[1];
z q[2];
i q[3];
reset q[0];
measure q[0] -> c[0];
measure q[1] -> c[1];
"#;
    let expected = "#4\nH 0\nCX 0 1 1 2 2 3\nS 1\nS_DAG 2\nSWAP 0 3\nISWAP 1 2\nCZ 0 2\nCY 1 3\nX 0\nY 1\nZ 2\nI 3\nR 0\nM 0 1\n";
    assert_eq!(translate(qasm).unwrap(), expected);
}

#[test]
fn test_header_is_first_line() {
    let out = translate("OPENQASM 2.0;\nqreg q[17];\nx q[16];\n").unwrap();
    assert_eq!(out.lines().next(), Some("#17"));
}

#[test]
fn test_crlf_line_endings() {
    let translator = Translator::new(
        GateTable::standard(),
        TranslateOptions::default().with_line_ending(LineEnding::Crlf),
    );
    let stim = translator
        .translate(b"OPENQASM 2.0;\r\nqreg q[2];\r\nh q[0];\r\nh q[1];\r\ncx q[0],q[1];\r\n")
        .unwrap();
    assert_eq!(stim.as_bytes(), &b"#2\r\nH 0 1\r\nCX 0 1\r\n"[..]);
}

// ============================================================================
// Whitespace, layout and skipped lines
// ============================================================================

#[test]
fn test_whitespace_between_tokens() {
    let qasm = "  OPENQASM   2.0 ;\n\tqreg q[2];\n\n  cx   q[0] ,\tq[1]  ;\n";
    assert_eq!(translate(qasm).unwrap(), "#2\nCX 0 1\n");
}

#[test]
fn test_multiple_operations_per_line() {
    assert_eq!(translate("h q[0]; h q[1]; x q[0];").unwrap(), "H 0 1\nX 0\n");
}

#[test]
fn test_skipped_lines_emit_nothing() {
    let qasm = "include \"qelib1.inc\";\ncreg c[100];\ngate foo a { h a; }\n// a comment\n";
    assert_eq!(translate(qasm).unwrap(), "");
}

#[test]
fn test_skipped_lines_do_not_break_coalescing() {
    let qasm = "h q[0];\ncreg c[2];\n// note\nh q[1];\n";
    assert_eq!(translate(qasm).unwrap(), "H 0 1\n");
}

#[test]
fn test_empty_input() {
    assert_eq!(translate("").unwrap(), "");
    assert_eq!(translate(" \n\t\r\n").unwrap(), "");
}

#[test]
fn test_header_only() {
    assert_eq!(translate("OPENQASM 2.0;\nqreg q[5];\n").unwrap(), "#5\n");
}

#[test]
fn test_indices_not_checked_against_register() {
    assert_eq!(translate("qreg q[2];\nx q[99];\n").unwrap(), "#2\nX 99\n");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_version_three_rejected() {
    let err = translate("OPENQASM 3.0;\nqreg q[1];\n").unwrap_err();
    assert!(matches!(
        err,
        TranslateError::UnsupportedVersion { line: 1, version } if (version - 3.0).abs() < 1e-9
    ));
}

#[test]
fn test_unknown_gate() {
    let err = translate("OPENQASM 2.0;\nqreg q[1];\nt q[0];\n").unwrap_err();
    match err {
        TranslateError::UnknownGate { line, name } => {
            assert_eq!(line, 3);
            assert_eq!(name, "t");
        }
        other => panic!("expected UnknownGate, got {other:?}"),
    }
}

#[test]
fn test_custom_gate_invocation_fails_lookup() {
    let qasm = "gate bell a, b { h a; cx a, b; }\nqreg q[2];\nbell q[0],q[1];\n";
    assert!(matches!(
        translate(qasm),
        Err(TranslateError::UnknownGate { ref name, .. }) if name == "bell"
    ));
}

#[test]
fn test_gate_name_too_long() {
    let long = "a".repeat(MAX_GATE_NAME_LEN + 1);
    let err = translate(&format!("{long} q[0];")).unwrap_err();
    assert!(matches!(err, TranslateError::GateNameTooLong { max, .. } if max == MAX_GATE_NAME_LEN));

    // exactly at the limit is a lookup failure, not a length failure
    let at_limit = "a".repeat(MAX_GATE_NAME_LEN);
    assert!(matches!(
        translate(&format!("{at_limit} q[0];")),
        Err(TranslateError::UnknownGate { .. })
    ));
}

#[test]
fn test_syntax_errors() {
    let cases: [(&str, &str, Found); 7] = [
        ("h r[0];", "'q'", Found::Byte(b'r')),
        ("h q(0);", "'['", Found::Byte(b'(')),
        ("h q[];", "a digit", Found::Byte(b']')),
        ("h q[0;", "']'", Found::Byte(b';')),
        ("cx q[0] q[1];", "',', ';' or '->'", Found::Byte(b'q')),
        ("h q[0]", "',', ';' or '->'", Found::EndOfInput),
        ("h;", "'q'", Found::Byte(b';')),
    ];
    for (src, want_expected, want_found) in cases {
        match translate(src) {
            Err(TranslateError::Syntax {
                expected, found, ..
            }) => {
                assert_eq!(expected, want_expected, "source: {src}");
                assert_eq!(found, want_found, "source: {src}");
            }
            other => panic!("{src}: expected syntax error, got {other:?}"),
        }
    }
}

#[test]
fn test_statement_without_mnemonic() {
    assert!(matches!(
        translate("qreg q[1];\n;"),
        Err(TranslateError::Syntax {
            expected: "a gate name",
            line: 2,
            ..
        })
    ));
}

#[test]
fn test_qreg_requires_q_register() {
    assert!(matches!(
        translate("qreg r[2];"),
        Err(TranslateError::Syntax { expected: "'q'", .. })
    ));
}

#[test]
fn test_error_reports_line() {
    let err = translate("OPENQASM 2.0;\nqreg q[2];\n\n\nh q[0;\n").unwrap_err();
    assert_eq!(err.line(), 5);
    assert!(err.to_string().contains("line 5"));
}
