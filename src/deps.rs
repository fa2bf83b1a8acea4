//! Reference-graph analysis over a yacc grammar.
//!
//! Non-terminals form a directed graph (an edge for every reference from a
//! production body to a defined name). Tarjan's algorithm partitions it into
//! strongly connected components emitted dependencies-first: by the time a
//! component is produced, every component it references is already out. The
//! optimizer consumes that order directly; the printed output walks the
//! reversed concatenation, which puts the start symbol first and the leaf
//! vocabulary last.

use std::collections::HashMap;

use crate::yacc::YaccGrammar;

/// Strongly connected components of the grammar's reference graph,
/// dependencies before dependents.
pub fn dependency_components<'a>(grammar: &YaccGrammar<'a>) -> Vec<Vec<&'a str>> {
    let index_of: HashMap<&str, usize> = grammar
        .order
        .iter()
        .enumerate()
        .map(|(n, name)| (*name, n))
        .collect();

    let successors: Vec<Vec<usize>> = grammar
        .order
        .iter()
        .map(|name| {
            grammar
                .references(name)
                .into_iter()
                .filter_map(|referent| index_of.get(referent).copied())
                .collect()
        })
        .collect();

    let mut tarjan = Tarjan {
        successors: &successors,
        index: vec![None; successors.len()],
        lowlink: vec![0; successors.len()],
        on_stack: vec![false; successors.len()],
        stack: vec![],
        counter: 0,
        components: vec![],
    };

    for v in 0..successors.len() {
        if tarjan.index[v].is_none() {
            tarjan.connect(v);
        }
    }

    tarjan
        .components
        .into_iter()
        .map(|component| component.into_iter().map(|v| grammar.order[v]).collect())
        .collect()
}

/// The order productions appear in the final output: the reversal of the
/// flattened component concatenation, the exact mirror of the optimizer's
/// traversal.
pub fn print_order<'a>(components: &[Vec<&'a str>]) -> Vec<&'a str> {
    let mut order: Vec<&str> = components.iter().flatten().copied().collect();
    order.reverse();
    order
}

struct Tarjan<'g> {
    successors: &'g [Vec<usize>],
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    counter: usize,
    components: Vec<Vec<usize>>,
}

impl Tarjan<'_> {
    fn connect(&mut self, v: usize) {
        self.index[v] = Some(self.counter);
        self.lowlink[v] = self.counter;
        self.counter += 1;
        self.stack.push(v);
        self.on_stack[v] = true;

        for n in 0..self.successors[v].len() {
            let w = self.successors[v][n];
            if self.index[w].is_none() {
                self.connect(w);
                self.lowlink[v] = self.lowlink[v].min(self.lowlink[w]);
            } else if self.on_stack[w] {
                self.lowlink[v] = self.lowlink[v].min(self.index[w].unwrap());
            }
        }

        if Some(self.lowlink[v]) == self.index[v] {
            let mut component = vec![];
            loop {
                let w = self.stack.pop().unwrap();
                self.on_stack[w] = false;
                component.push(w);
                if w == v {
                    break;
                }
            }
            self.components.push(component);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::yacc_parser::parse_yacc;

    fn components_of(src: &str) -> Vec<Vec<&str>> {
        let (grammar, _) = parse_yacc(src).unwrap_or_else(|e| panic!("{e}"));
        dependency_components(&grammar)
    }

    #[test]
    fn chain_orders_leaves_first() {
        let components = components_of("a : b ; b : c ; c : 'x' ;");
        assert_eq!(components, vec![vec!["c"], vec!["b"], vec!["a"]]);
    }

    #[test]
    fn direct_cycle_is_one_component() {
        let components = components_of("x : y ; y : x | 'end' ;");
        assert_eq!(components.len(), 1);
        let mut members = components[0].clone();
        members.sort_unstable();
        assert_eq!(members, vec!["x", "y"]);
    }

    #[test]
    fn self_reference_is_a_singleton_component() {
        let components = components_of("list : list 'x' | 'x' ; start : list ;");
        assert_eq!(components, vec![vec!["list"], vec!["start"]]);
    }

    #[test]
    fn terminals_and_external_names_are_not_nodes() {
        // NUMBER has no definition here, so it contributes no edge.
        let components = components_of("expr : expr '+' NUMBER | NUMBER ;");
        assert_eq!(components, vec![vec!["expr"]]);
    }

    #[test]
    fn print_order_reverses_the_concatenation() {
        let components = components_of("a : b ; b : c ; c : 'x' ;");
        assert_eq!(print_order(&components), vec!["a", "b", "c"]);
    }
}
