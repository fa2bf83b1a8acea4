//! End-to-end conversion of a small calculator grammar.

use yacc2ebnf::{parse_ebnf, translate};

static YACC_SRC: &str = r#"
input : input line | line ;
line : expr '\n' { printf("%d\n", $1); } ;
expr : expr addop term { $$ = apply($2, $1, $3); } | term ;
term : term mulop factor | factor ;
factor : '(' expr ')' | NUMBER ;
addop : '+' | '-' ;
mulop : '*' | '/' ;
"#;

static EBNF_SRC: &str = "NUMBER ::= [0-9]+ ;";

#[test]
fn calculator_grammar_converts() {
    let translation =
        translate(YACC_SRC, Some(EBNF_SRC), 80).unwrap_or_else(|e| panic!("{e}"));

    assert_eq!(translation.yacc_leftover, None);
    assert_eq!(translation.ebnf_leftover, None);
    assert!(translation.undefined_references.is_empty());

    // Start symbol first, leaf vocabulary last, auxiliary definitions
    // appended. `line` is trivial and was inlined into `input`, but every
    // yacc production still prints; `addop`/`mulop` were inlined as nested
    // choices.
    assert_eq!(
        translation.rendered,
        "\
input ::= input expr '\\n' | expr '\\n'
line ::= expr '\\n'
expr ::= expr ('+' | '-') term | term
term ::= term ('*' | '/') factor | factor
factor ::= '(' expr ')' | NUMBER
mulop ::= '*' | '/'
addop ::= '+' | '-'
NUMBER ::= [0-9]+
"
    );
}

#[test]
fn printed_output_reparses_cleanly() {
    let translation =
        translate(YACC_SRC, Some(EBNF_SRC), 80).unwrap_or_else(|e| panic!("{e}"));

    let (productions, leftover) =
        parse_ebnf(&translation.rendered).unwrap_or_else(|e| panic!("{e}"));

    assert_eq!(leftover, None);
    assert_eq!(productions.len(), 8);
    assert_eq!(productions[0].name, "input");
    assert_eq!(productions[7].name, "NUMBER");
}

#[test]
fn one_line_per_production_at_default_width() {
    let translation =
        translate(YACC_SRC, Some(EBNF_SRC), 80).unwrap_or_else(|e| panic!("{e}"));

    assert_eq!(translation.rendered.lines().count(), 8);
    assert!(translation.rendered.lines().all(|l| l.contains("::=")));
}

#[test]
fn narrow_width_wraps_but_preserves_content() {
    let narrow = translate(YACC_SRC, Some(EBNF_SRC), 24).unwrap_or_else(|e| panic!("{e}"));

    assert!(narrow.rendered.lines().count() > 8);
    for line in narrow.rendered.lines() {
        assert!(line.len() <= 24, "overlong line: {line:?}");
    }

    // Wrapping only moves whitespace around.
    let wide = translate(YACC_SRC, Some(EBNF_SRC), 1000).unwrap_or_else(|e| panic!("{e}"));
    let squash = |s: &str| s.split_whitespace().collect::<Vec<_>>().join(" ");
    assert_eq!(squash(&narrow.rendered), squash(&wide.rendered));
}
