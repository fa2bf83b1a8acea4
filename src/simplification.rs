//! Inlining and flattening of converted productions.
//!
//! Both rewrites are pure: they take a production by reference and build a
//! replacement value. `optimize_grammar` drives them over a whole grammar in
//! dependency order, so every production is judged against dependencies that
//! are already in their final form.

use crate::{
    convert::convert_production,
    deps::{dependency_components, print_order},
    ebnf::{Choice, EbnfMap, Item, Primary, Production, Sequence},
    yacc::YaccGrammar,
};

const MAX_TRIVIAL_ALTERNATIVES: usize = 5;
const MAX_TRIVIAL_ITEMS: usize = 3;

/// Whether a production is small enough to substitute at its reference
/// sites without hurting readability: a handful of single-literal
/// alternatives, or one short run of plain literals and references. Nested
/// choices and quantifiers always disqualify.
pub fn is_trivial(production: &Production) -> bool {
    let alternatives = &production.choice.alternatives;

    let literal_menu = (1..=MAX_TRIVIAL_ALTERNATIVES).contains(&alternatives.len())
        && alternatives.iter().all(|sequence| {
            matches!(
                sequence.items[..],
                [Item {
                    primary: Primary::Term(_),
                    quantifier: None,
                }]
            )
        });

    let short_run = alternatives.len() == 1
        && alternatives[0].items.len() <= MAX_TRIVIAL_ITEMS
        && alternatives[0].items.iter().all(|item| {
            item.quantifier.is_none()
                && matches!(item.primary, Primary::Term(_) | Primary::Name(_))
        });

    literal_menu || short_run
}

/// Substitute every reference to a trivial production with that production's
/// alternatives, wrapped as a nested choice. Runs before flattening.
fn inline_choice(choice: &Choice, map: &EbnfMap) -> Choice {
    Choice {
        alternatives: choice
            .alternatives
            .iter()
            .map(|sequence| Sequence {
                items: sequence
                    .items
                    .iter()
                    .map(|item| inline_item(item, map))
                    .collect(),
            })
            .collect(),
    }
}

fn inline_item(item: &Item, map: &EbnfMap) -> Item {
    let primary = match &item.primary {
        Primary::Name(name) => match map.get(name) {
            Some(callee) if is_trivial(callee) => Primary::Group(callee.choice.clone()),
            _ => Primary::Name(name.clone()),
        },
        Primary::Term(text) => Primary::Term(text.clone()),
        Primary::Group(inner) => Primary::Group(inline_choice(inner, map)),
    };
    Item {
        primary,
        quantifier: item.quantifier,
    }
}

/// Remove redundant single-alternative grouping by splicing its content into
/// the surrounding sequence where the quantifiers allow it.
fn flatten_choice(choice: &Choice) -> Choice {
    Choice {
        alternatives: choice.alternatives.iter().map(flatten_sequence).collect(),
    }
}

fn flatten_sequence(sequence: &Sequence) -> Sequence {
    let mut items = vec![];
    for item in &sequence.items {
        flatten_item(item, &mut items);
    }
    Sequence { items }
}

fn flatten_item(item: &Item, out: &mut Vec<Item>) {
    let Primary::Group(inner) = &item.primary else {
        out.push(item.clone());
        return;
    };
    // A choice of several alternatives needs its parentheses.
    if inner.alternatives.len() != 1 {
        out.push(item.clone());
        return;
    }

    let mut flattened = flatten_sequence(&inner.alternatives[0]);
    if flattened.items.len() == 1 {
        let single = flattened.items.remove(0);
        match (item.quantifier, single.quantifier) {
            // `(x?)+` has no single-quantifier equivalent; keep the group.
            (Some(_), Some(_)) => out.push(Item {
                primary: Primary::Group(Choice::single(Sequence {
                    items: vec![single],
                })),
                quantifier: item.quantifier,
            }),
            (outer, inner_quantifier) => out.push(Item {
                primary: single.primary,
                quantifier: outer.or(inner_quantifier),
            }),
        }
    } else if item.quantifier.is_none() {
        out.extend(flattened.items);
    } else {
        out.push(Item {
            primary: Primary::Group(Choice::single(flattened)),
            quantifier: item.quantifier,
        });
    }
}

/// Inline-then-flatten one production against the map of its (already
/// resolved) dependencies.
pub fn optimize_production(production: &Production, map: &EbnfMap) -> Production {
    Production {
        name: production.name.clone(),
        choice: flatten_choice(&inline_choice(&production.choice, map)),
    }
}

/// Convert and optimize a whole grammar.
///
/// Components are visited dependencies-first. Within a component every
/// member is converted and inserted before any is optimized, so mutually
/// recursive productions can see each other. The returned productions are in
/// print order (reversed component concatenation), followed by whichever
/// auxiliary definitions the result still references.
pub fn optimize_grammar(grammar: &YaccGrammar<'_>, auxiliary: &[Production]) -> Vec<Production> {
    let mut map: EbnfMap = auxiliary
        .iter()
        .map(|p| (p.name.clone(), p.clone()))
        .collect();

    let components = dependency_components(grammar);
    for component in &components {
        for name in component {
            let converted = convert_production(name, grammar.rules(name).unwrap_or(&[]));
            map.insert((*name).to_string(), converted);
        }
        for name in component {
            let optimized = optimize_production(&map[*name], &map);
            map.insert((*name).to_string(), optimized);
        }
    }

    let mut output: Vec<Production> = print_order(&components)
        .iter()
        .map(|name| map[*name].clone())
        .collect();

    append_referenced_auxiliaries(&mut output, auxiliary, grammar);
    output
}

/// The output should stand alone: auxiliary definitions that are still
/// referenced after inlining get appended, in their source order.
fn append_referenced_auxiliaries(
    output: &mut Vec<Production>,
    auxiliary: &[Production],
    grammar: &YaccGrammar<'_>,
) {
    let mut wanted = vec![];
    for production in output.iter() {
        production.choice.referenced_names(&mut wanted);
    }

    let mut included = vec![];
    let mut cursor = 0;
    while cursor < wanted.len() {
        let name = wanted[cursor].clone();
        cursor += 1;
        if grammar.productions.contains_key(name.as_str()) {
            continue;
        }
        if let Some(aux) = auxiliary.iter().find(|p| p.name == name) {
            included.push(aux.name.clone());
            aux.choice.referenced_names(&mut wanted);
        }
    }

    for aux in auxiliary {
        if included.contains(&aux.name) {
            output.push(aux.clone());
        }
    }
}
