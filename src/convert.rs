use crate::{
    ebnf::{Choice, Item, Primary, Production, Sequence},
    yacc::{Element, YaccRule},
};

/// Structurally map one yacc production onto its EBNF counterpart: the same
/// alternatives in the same order, every element an unquantified item. No
/// simplification happens here.
pub fn convert_production(name: &str, rules: &[YaccRule<'_>]) -> Production {
    Production {
        name: name.to_string(),
        choice: Choice {
            alternatives: rules.iter().map(convert_rule).collect(),
        },
    }
}

fn convert_rule(rule: &YaccRule<'_>) -> Sequence {
    Sequence {
        items: rule
            .elements
            .iter()
            .map(|element| match element {
                Element::NonTerminal(name) => Item::plain(Primary::Name((*name).to_string())),
                Element::Literal(text) => Item::plain(Primary::Term(quote_terminal(text))),
            })
            .collect(),
    }
}

/// Render a yacc terminal in EBNF quoting. The text passes through verbatim
/// except for the escaped backslash, which yacc writes as `\\` and EBNF as a
/// lone backslash.
fn quote_terminal(text: &str) -> String {
    let body = if text == r"\\" { r"\" } else { text };
    format!("'{body}'")
}
