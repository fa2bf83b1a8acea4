//! Minimal line-layout engine for the pretty-printer.
//!
//! The printer describes output as a tree of documents: literal text,
//! juxtaposition (`cat`), space-joined runs (`sep`) and vertical stacking
//! (`stack`). Rendering flows the `sep` break points greedily against a
//! maximum width; `cat` glues its neighbours into unbreakable atoms.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Doc {
    Text(String),
    Cat(Vec<Doc>),
    Sep(Vec<Doc>),
    Stack(Vec<Doc>),
}

/// Continuation lines of a wrapped block are pushed in this far.
const WRAP_INDENT: usize = 6;

impl Doc {
    pub fn text(s: impl Into<String>) -> Doc {
        Doc::Text(s.into())
    }

    /// Juxtapose without spaces or break opportunities at the joins.
    pub fn cat(docs: Vec<Doc>) -> Doc {
        Doc::Cat(docs)
    }

    /// Join with single spaces; every join is a break opportunity.
    pub fn sep(docs: Vec<Doc>) -> Doc {
        Doc::Sep(docs)
    }

    /// One block per line.
    pub fn stack(docs: Vec<Doc>) -> Doc {
        Doc::Stack(docs)
    }

    /// Lay the document out against `width`. An atom longer than the width
    /// overflows its line rather than being split.
    pub fn render(&self, width: usize) -> String {
        match self {
            Doc::Stack(docs) => {
                let mut out = String::new();
                for doc in docs {
                    out.push_str(&doc.render(width));
                    out.push('\n');
                }
                out
            }
            flow => fill(&flow.atoms(), width),
        }
    }

    /// The unbreakable chunks of a flowing document, in order.
    fn atoms(&self) -> Vec<String> {
        match self {
            Doc::Text(s) => vec![s.clone()],
            Doc::Sep(docs) => docs.iter().flat_map(Doc::atoms).collect(),
            Doc::Cat(docs) => {
                let mut glued: Vec<String> = vec![];
                for doc in docs {
                    let mut child = doc.atoms();
                    if child.is_empty() {
                        continue;
                    }
                    // Glue across the join; breaks inside either side survive.
                    match glued.last_mut() {
                        Some(last) => {
                            last.push_str(&child.remove(0));
                            glued.extend(child);
                        }
                        None => glued = child,
                    }
                }
                glued
            }
            Doc::Stack(docs) => docs.iter().flat_map(Doc::atoms).collect(),
        }
    }
}

fn fill(atoms: &[String], width: usize) -> String {
    let mut lines: Vec<String> = vec![];
    let mut current = String::new();
    for atom in atoms {
        if current.is_empty() {
            current = atom.clone();
        } else if current.len() + 1 + atom.len() <= width {
            current.push(' ');
            current.push_str(atom);
        } else {
            lines.push(current);
            current = format!("{:WRAP_INDENT$}{atom}", "");
        }
    }
    lines.push(current);
    lines.join("\n")
}
