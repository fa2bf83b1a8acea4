use winnow::{
    ModalResult, Parser,
    combinator::{alt, opt, preceded, repeat, separated},
    error::{StrContext, StrContextValue},
    stream::LocatingSlice,
    token::{any, rest},
};

use crate::{
    Input,
    error::{GrammarError, Leftover},
    lexing::{ident, ws, yacc_literal},
    yacc::{Element, YaccGrammar, YaccRule},
};

/// Parse the grammar section of a yacc file (the text between the `%%`
/// separators, already sliced out by the caller).
///
/// Trailing text that is not a further production is returned as a
/// [`Leftover`] diagnostic rather than failing the parse.
pub fn parse_yacc(src: &str) -> Result<(YaccGrammar<'_>, Option<Leftover<'_>>), GrammarError<'_>> {
    let (productions, trailing) =
        (productions, preceded(ws, rest)).parse(LocatingSlice::new(src))?;

    let grammar = assemble(productions)?;
    let leftover = (!trailing.is_empty()).then(|| Leftover {
        offset: src.len() - trailing.len(),
        text: trailing,
    });
    Ok((grammar, leftover))
}

fn assemble<'a>(
    productions: Vec<(&'a str, Vec<YaccRule<'a>>)>,
) -> Result<YaccGrammar<'a>, GrammarError<'a>> {
    let mut grammar = YaccGrammar::default();
    for (name, rules) in productions {
        let empty_rules = rules.iter().filter(|r| r.is_empty()).count();
        if empty_rules > 1 {
            return Err(GrammarError::MultipleEmptyAlternatives {
                name,
                count: empty_rules,
            });
        }
        if grammar.productions.insert(name, rules).is_some() {
            return Err(GrammarError::DuplicateDefinition { name });
        }
        grammar.order.push(name);
    }
    Ok(grammar)
}

fn productions<'a>(input: &mut Input<'a>) -> ModalResult<Vec<(&'a str, Vec<YaccRule<'a>>)>> {
    repeat(1.., production).parse_next(input)
}

fn production<'a>(input: &mut Input<'a>) -> ModalResult<(&'a str, Vec<YaccRule<'a>>)> {
    let name = preceded(ws, ident)
        .context(StrContext::Label("production name"))
        .parse_next(input)?;
    preceded(ws, ':')
        .context(StrContext::Expected(StrContextValue::CharLiteral(':')))
        .parse_next(input)?;
    let rules = separated(1.., rule, preceded(ws, '|')).parse_next(input)?;
    preceded(ws, ';')
        .context(StrContext::Expected(StrContextValue::CharLiteral(';')))
        .parse_next(input)?;
    Ok((name, rules))
}

fn rule<'a>(input: &mut Input<'a>) -> ModalResult<YaccRule<'a>> {
    let elements: Vec<Element<'a>> = repeat(0.., element).parse_next(input)?;
    opt(preceded(ws, action_block)).parse_next(input)?;
    Ok(YaccRule { elements })
}

fn element<'a>(input: &mut Input<'a>) -> ModalResult<Element<'a>> {
    preceded(
        ws,
        alt((
            ident.map(Element::NonTerminal),
            yacc_literal.map(Element::Literal),
        )),
    )
    .context(StrContext::Label("rule element"))
    .parse_next(input)
}

/// `{ ... }` semantic action, discarded wholesale. Nesting is tracked with a
/// plain depth counter, not recursive descent.
fn action_block(input: &mut Input<'_>) -> ModalResult<()> {
    '{'.parse_next(input)?;
    let mut depth = 1usize;
    while depth > 0 {
        match any::<Input<'_>, winnow::error::ErrMode<winnow::error::ContextError>>.parse_next(input)
        {
            Ok('{') => depth += 1,
            Ok('}') => depth -= 1,
            Ok(_) => {}
            // An unclosed action block can never recover by backtracking.
            Err(e) => return Err(e.cut()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn basic_grammar() {
        let src = "expr : expr '+' term | term ; term : NUMBER ;";
        let (grammar, leftover) = parse_yacc(src).unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(leftover, None);
        insta::assert_compact_debug_snapshot!(grammar.order, @r#"["expr", "term"]"#);
        assert_eq!(
            grammar.rules("expr").unwrap(),
            &[
                YaccRule {
                    elements: vec![
                        Element::NonTerminal("expr"),
                        Element::Literal("+"),
                        Element::NonTerminal("term"),
                    ],
                },
                YaccRule {
                    elements: vec![Element::NonTerminal("term")],
                },
            ]
        );
        assert_eq!(
            grammar.rules("term").unwrap(),
            &[YaccRule {
                elements: vec![Element::NonTerminal("NUMBER")],
            }]
        );
    }

    #[test]
    fn one_empty_alternative_is_allowed() {
        let (grammar, _) = parse_yacc("a : | 'x' ;").unwrap_or_else(|e| panic!("{e}"));
        let rules = grammar.rules("a").unwrap();
        assert_eq!(rules.len(), 2);
        assert!(rules[0].is_empty());
        assert_eq!(rules[1].elements, vec![Element::Literal("x")]);
    }

    #[test]
    fn two_empty_alternatives_are_rejected() {
        let err = parse_yacc("a : | | 'x' ;").unwrap_err();
        assert_eq!(
            err,
            GrammarError::MultipleEmptyAlternatives {
                name: "a",
                count: 2
            }
        );
    }

    #[test]
    fn duplicate_definitions_are_rejected() {
        let err = parse_yacc("a : 'x' ; a : 'y' ;").unwrap_err();
        assert_eq!(err, GrammarError::DuplicateDefinition { name: "a" });
    }

    #[test]
    fn action_blocks_are_discarded() {
        let src = "expr : expr '+' expr { $$ = $1 + $3; if (x) { y(); } } | NUMBER { $$ = $1; } ;";
        let (grammar, leftover) = parse_yacc(src).unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(leftover, None);
        assert_eq!(
            grammar.rules("expr").unwrap(),
            &[
                YaccRule {
                    elements: vec![
                        Element::NonTerminal("expr"),
                        Element::Literal("+"),
                        Element::NonTerminal("expr"),
                    ],
                },
                YaccRule {
                    elements: vec![Element::NonTerminal("NUMBER")],
                },
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        let src = "/* lead */ a /* mid */ : 'x' ; /* trail\nover lines */";
        let (grammar, leftover) = parse_yacc(src).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(leftover, None);
        assert_eq!(grammar.order, vec!["a"]);
    }

    #[test]
    fn escaped_literals_keep_their_source_spelling() {
        let (grammar, _) = parse_yacc(r"esc : '\\' | '\'' ;").unwrap_or_else(|e| panic!("{e}"));
        insta::assert_compact_debug_snapshot!(
            grammar.rules("esc").unwrap()[0].elements,
            @r#"[Literal("\\\\")]"#
        );
        assert_eq!(
            grammar.rules("esc").unwrap(),
            &[
                YaccRule {
                    elements: vec![Element::Literal(r"\\")],
                },
                YaccRule {
                    elements: vec![Element::Literal(r"\'")],
                },
            ]
        );
    }

    #[test]
    fn trailing_garbage_is_a_leftover_not_an_error() {
        let (grammar, leftover) = parse_yacc("a : 'x' ; 123 junk").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(grammar.order, vec!["a"]);
        let leftover = leftover.unwrap();
        assert_eq!(leftover.offset, 10);
        assert_eq!(leftover.text, "123 junk");
    }

    #[test]
    fn structurally_broken_grammar_fails() {
        let err = parse_yacc("a 'x' ;").unwrap_err();
        assert!(matches!(err, GrammarError::Syntax(_)));
    }
}
