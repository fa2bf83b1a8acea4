#![forbid(unsafe_code)]
#![warn(explicit_outlives_requirements)]
#![warn(missing_debug_implementations)]
#![warn(clippy::pedantic)]
#![warn(missing_copy_implementations)]
#![warn(redundant_lifetimes)]
#![warn(unreachable_pub)]
#![warn(unused_qualifications)]
#![allow(clippy::must_use_candidate)]

mod convert;
mod debug;
mod deps;
mod ebnf;
mod ebnf_parser;
mod error;
mod layout;
mod lexing;
mod printer;
mod simplification;
mod yacc;
mod yacc_parser;

pub use convert::convert_production;
pub use deps::{dependency_components, print_order};
pub use ebnf::{Choice, EbnfMap, Item, Primary, Production, Quantifier, Sequence};
pub use ebnf_parser::parse_ebnf;
pub use error::{GrammarError, Leftover};
pub use layout::Doc;
pub use printer::print_grammar;
pub use simplification::{is_trivial, optimize_grammar, optimize_production};
pub use yacc::{Element, YaccGrammar, YaccRule};
pub use yacc_parser::parse_yacc;

/// Character stream both parsers consume: a `&str` tracking byte offsets.
pub type Input<'a> = winnow::stream::LocatingSlice<&'a str>;

/// Everything one conversion run produces besides its exit status.
#[derive(Debug)]
pub struct Translation<'a> {
    /// The finished grammar, rendered to width.
    pub rendered: String,
    pub yacc_leftover: Option<Leftover<'a>>,
    pub ebnf_leftover: Option<Leftover<'a>>,
    /// (defining production, referenced name) pairs with no definition in
    /// either input.
    pub undefined_references: Vec<(&'a str, &'a str)>,
}

/// Convert a yacc grammar section, with optional auxiliary EBNF terminal
/// definitions, into printed EBNF: parse both inputs, optimize in dependency
/// order, render to `width`.
pub fn translate<'a>(
    yacc_src: &'a str,
    ebnf_src: Option<&'a str>,
    width: usize,
) -> Result<Translation<'a>, GrammarError<'a>> {
    let (grammar, yacc_leftover) = parse_yacc(yacc_src)?;
    let (auxiliary, ebnf_leftover) = match ebnf_src {
        Some(src) => parse_ebnf(src)?,
        None => (vec![], None),
    };

    let aux_names: Vec<&str> = auxiliary.iter().map(|p| p.name.as_str()).collect();
    let undefined_references = grammar.undefined_references(&aux_names);

    let productions = optimize_grammar(&grammar, &auxiliary);
    Ok(Translation {
        rendered: print_grammar(&productions, width),
        yacc_leftover,
        ebnf_leftover,
        undefined_references,
    })
}

#[cfg(test)]
mod tests {
    use super::translate;

    #[test]
    fn conversion_inlines_terminal_definitions() {
        let yacc = "sum : sum addop NUMBER | NUMBER ;";
        let ebnf = "addop ::= '+' | '-' ; NUMBER ::= [0-9]+ ;";

        let translation = translate(yacc, Some(ebnf), 80).unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(
            translation.rendered,
            "sum ::= sum ('+' | '-') NUMBER | NUMBER\nNUMBER ::= [0-9]+\n"
        );
        assert!(translation.undefined_references.is_empty());
        assert_eq!(translation.yacc_leftover, None);
        assert_eq!(translation.ebnf_leftover, None);
    }

    #[test]
    fn undefined_references_are_reported() {
        let translation = translate("s : WORD ;", None, 80).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(translation.undefined_references, vec![("s", "WORD")]);
    }
}
