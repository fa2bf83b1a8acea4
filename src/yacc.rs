use std::collections::HashMap;

/// One symbol on the right-hand side of a yacc rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element<'a> {
    /// A single-quoted token, stored without the surrounding quotes but with
    /// any backslash escapes intact.
    Literal(&'a str),
    /// A bare identifier referring to another production (or, in yacc terms,
    /// a token declared elsewhere).
    NonTerminal(&'a str),
}

/// One alternative of a production: an ordered, possibly empty, run of
/// elements. Action blocks have already been discarded by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YaccRule<'a> {
    pub elements: Vec<Element<'a>>,
}

impl<'a> YaccRule<'a> {
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &'a str> {
        self.elements.iter().filter_map(|e| match e {
            Element::NonTerminal(name) => Some(*name),
            Element::Literal(_) => None,
        })
    }
}

/// A whole yacc grammar: every non-terminal mapped to its alternatives.
///
/// `order` records definition order, which keys a `HashMap` loses; the
/// dependency analysis seeds its traversal from it so the output is stable
/// across runs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct YaccGrammar<'a> {
    pub order: Vec<&'a str>,
    pub productions: HashMap<&'a str, Vec<YaccRule<'a>>>,
}

impl<'a> YaccGrammar<'a> {
    pub fn rules(&self, name: &str) -> Option<&[YaccRule<'a>]> {
        self.productions.get(name).map(Vec::as_slice)
    }

    /// Names referenced by `name`'s rules, deduplicated, first occurrence
    /// first.
    pub fn references(&self, name: &str) -> Vec<&'a str> {
        let mut seen = vec![];
        if let Some(rules) = self.productions.get(name) {
            for rule in rules {
                for referent in rule.nonterminals() {
                    if !seen.contains(&referent) {
                        seen.push(referent);
                    }
                }
            }
        }
        seen
    }

    /// Pairs of (defining production, referenced name) where the referenced
    /// name has a definition in neither this grammar nor `external`, in
    /// definition order.
    pub fn undefined_references(&self, external: &[&str]) -> Vec<(&'a str, &'a str)> {
        let mut dangling = vec![];
        for name in &self.order {
            for referent in self.references(name) {
                if !self.productions.contains_key(referent) && !external.contains(&referent) {
                    dangling.push((*name, referent));
                }
            }
        }
        dangling
    }
}
