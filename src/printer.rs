use crate::{
    ebnf::{Choice, Item, Primary, Production, Sequence},
    layout::Doc,
};

const DEFINE: &str = "::=";

/// Render a whole grammar, one wrapped block per production.
pub fn print_grammar(productions: &[Production], width: usize) -> String {
    Doc::stack(productions.iter().map(production_doc).collect()).render(width)
}

fn production_doc(production: &Production) -> Doc {
    Doc::sep(vec![
        Doc::text(production.name.as_str()),
        Doc::text(DEFINE),
        choice_doc(&production.choice),
    ])
}

fn choice_doc(choice: &Choice) -> Doc {
    let mut docs = vec![];
    for (n, alternative) in choice.alternatives.iter().enumerate() {
        if n > 0 {
            docs.push(Doc::text("|"));
        }
        docs.push(sequence_doc(alternative));
    }
    Doc::sep(docs)
}

fn sequence_doc(sequence: &Sequence) -> Doc {
    Doc::sep(sequence.items.iter().map(item_doc).collect())
}

fn item_doc(item: &Item) -> Doc {
    let primary = match &item.primary {
        Primary::Name(name) => Doc::text(name.as_str()),
        Primary::Term(text) => Doc::text(text.as_str()),
        Primary::Group(choice) => Doc::cat(vec![
            Doc::text("("),
            choice_doc(choice),
            Doc::text(")"),
        ]),
    };
    match item.quantifier {
        Some(quantifier) => Doc::cat(vec![primary, Doc::text(quantifier.symbol())]),
        None => primary,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ebnf_parser::parse_ebnf;

    fn grammar(src: &str) -> Vec<Production> {
        parse_ebnf(src).unwrap_or_else(|e| panic!("{e}")).0
    }

    #[test]
    fn one_line_per_production() {
        let productions = grammar("a ::= 'x' | b c? ; b ::= ('p' | 'q')* ;");
        let printed = print_grammar(&productions, 80);
        assert_eq!(printed, "a ::= 'x' | b c?\nb ::= ('p' | 'q')*\n");
    }

    #[test]
    fn long_productions_wrap_to_width() {
        let productions = grammar(
            "statement ::= select_statement | insert_statement | update_statement | delete_statement ;",
        );
        let printed = print_grammar(&productions, 40);

        for line in printed.lines() {
            assert!(line.len() <= 40, "overlong line: {line:?}");
        }
        assert_eq!(
            printed,
            "statement ::= select_statement |\n      insert_statement |\n      update_statement |\n      delete_statement\n"
        );
    }

    #[test]
    fn empty_alternatives_render_as_nothing() {
        let productions = grammar("opt ::= 'x' | ;");
        assert_eq!(print_grammar(&productions, 80), "opt ::= 'x' |\n");
    }
}
