use std::collections::HashMap;
use std::fmt::Display;

use strum::{EnumProperty, IntoStaticStr};

/// Suffix operator on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumProperty, IntoStaticStr)]
pub enum Quantifier {
    #[strum(props(symbol = "?"))]
    Optional,
    #[strum(props(symbol = "*"))]
    ZeroOrMore,
    #[strum(props(symbol = "+"))]
    OneOrMore,
}

impl Quantifier {
    pub fn symbol(self) -> &'static str {
        self.get_str("symbol").unwrap()
    }
}

/// The atom of an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primary {
    /// Reference to another production by name.
    Name(String),
    /// A terminal carried verbatim in its source spelling, quotes or
    /// brackets included: `'+'`, `"::="`, `[a-z]`.
    Term(String),
    /// A parenthesized sub-choice.
    Group(Choice),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub primary: Primary,
    pub quantifier: Option<Quantifier>,
}

impl Item {
    pub fn plain(primary: Primary) -> Item {
        Item {
            primary,
            quantifier: None,
        }
    }
}

/// An ordered run of items. May be empty, which is how an empty yacc
/// alternative comes through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    pub items: Vec<Item>,
}

/// One or more alternative sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub alternatives: Vec<Sequence>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub name: String,
    pub choice: Choice,
}

/// Working table of the best-known form of every production, keyed by name.
/// Holds the auxiliary terminal definitions at the start of a run and
/// accumulates optimized productions as components are processed.
pub type EbnfMap = HashMap<String, Production>;

impl Choice {
    pub fn single(sequence: Sequence) -> Choice {
        Choice {
            alternatives: vec![sequence],
        }
    }

    /// Every production name referenced anywhere under this choice.
    pub fn referenced_names(&self, out: &mut Vec<String>) {
        for sequence in &self.alternatives {
            for item in &sequence.items {
                match &item.primary {
                    Primary::Name(name) => {
                        if !out.contains(name) {
                            out.push(name.clone());
                        }
                    }
                    Primary::Term(_) => {}
                    Primary::Group(inner) => inner.referenced_names(out),
                }
            }
        }
    }
}

impl Display for Primary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Primary::Name(name) => write!(f, "{name}"),
            Primary::Term(text) => write!(f, "{text}"),
            Primary::Group(choice) => write!(f, "({choice})"),
        }
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.primary)?;
        if let Some(quantifier) = self.quantifier {
            write!(f, "{}", quantifier.symbol())?;
        }
        Ok(())
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (n, item) in self.items.iter().enumerate() {
            if n > 0 {
                write!(f, " ")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

impl Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (n, alternative) in self.alternatives.iter().enumerate() {
            if n > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{alternative}")?;
        }
        Ok(())
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ::= {}", self.name, self.choice)
    }
}
