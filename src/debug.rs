//! Tree-shaped debug rendering of the EBNF AST, for tests and troubleshooting.

use display_tree::{AsTree, DisplayTree, Style};
use std::{
    fmt::{Formatter, Write},
    iter::once,
};

use crate::ebnf::{Item, Primary, Production, Sequence};

impl DisplayTree for Production {
    fn fmt(&self, f: &mut Formatter, style: Style) -> std::fmt::Result {
        let indentation = style.indentation as usize - 1;
        let horizontal_bar = format!("{:indentation$}", style.char_set.horizontal);
        writeln!(f, "{}", style.leaf_style.apply("Production"))?;
        writeln!(
            f,
            "{1}{horizontal_bar}name: {0}",
            &self.name, style.char_set.connector
        )?;
        print_vec_tree(f, style, &self.choice.alternatives)
    }
}

impl DisplayTree for Sequence {
    fn fmt(&self, f: &mut Formatter, style: Style) -> std::fmt::Result {
        writeln!(f, "{}", style.leaf_style.apply("Sequence"))?;
        print_vec_tree(f, style, &self.items)
    }
}

impl DisplayTree for Item {
    fn fmt(&self, f: &mut Formatter, style: Style) -> std::fmt::Result {
        let indentation = style.indentation as usize - 1;
        let horizontal_bar = format!("{:indentation$}", style.char_set.horizontal);

        let kind = match &self.primary {
            Primary::Name(_) => "Name",
            Primary::Term(_) => "Term",
            Primary::Group(_) => "Group",
        };
        let label = match self.quantifier {
            Some(quantifier) => format!("{kind} {}", quantifier.symbol()),
            None => kind.to_string(),
        };
        writeln!(f, "{}", style.leaf_style.apply(&label))?;

        match &self.primary {
            Primary::Name(text) | Primary::Term(text) => write!(
                f,
                "{}",
                style.branch_style.apply(&format!(
                    "{}{horizontal_bar} {}",
                    style.char_set.end_connector,
                    text.escape_debug()
                ))
            ),
            Primary::Group(choice) => print_vec_tree(f, style, &choice.alternatives),
        }
    }
}

const EMPTY_STRING: &str = "";

fn print_vec_tree<T: DisplayTree>(
    f: &mut impl Write,
    style: Style,
    body: &[T],
) -> Result<(), std::fmt::Error> {
    if body.is_empty() {
        return Ok(());
    }
    let indentation = style.indentation as usize - 1;
    let spacer = format!(" {EMPTY_STRING:indentation$}");
    let horizontal_bar = format!("{:indentation$}", style.char_set.horizontal);
    let vec_output = fmt_vec(body, style);

    for (block_no, block) in vec_output.into_iter().enumerate() {
        for (n, line) in block.lines().enumerate() {
            if n == 0 && block_no == 0 {
                write!(f, "{}{horizontal_bar}", style.char_set.end_connector)?;
            } else {
                write!(f, "{spacer}")?;
            }
            writeln!(f, "{line}")?;
        }
    }
    Ok(())
}

fn fmt_vec<T: DisplayTree>(v: &[T], style: Style) -> impl Iterator<Item = String> + '_ {
    let max_index = v.len().saturating_sub(1);
    let num_width = format!("{max_index}").len();

    let vertical = style
        .branch_style
        .apply(&style.char_set.vertical.to_string());

    v.iter().enumerate().map(move |(n, item)| {
        let vertical = vertical.clone();
        let continued_vertical = if n < max_index { &vertical } else { " " };

        let indent = format!(" {:num_width$}", "");
        let tree = AsTree::with_style(item, style).to_string();
        let mut tree_lines = tree.lines().enumerate().map(move |(line_num, line)| {
            let line = style.leaf_style.apply(line);
            if line_num > 0 {
                format!("{continued_vertical}{indent}{line}\n")
            } else {
                format!("{line}\n")
            }
        });
        let lead_line = tree_lines.next().unwrap_or_default();

        let lead = format!("{n:<0num_width$}: {lead_line}");

        once(lead).chain(tree_lines).collect()
    })
}

#[cfg(test)]
mod test {
    use display_tree::AsTree;

    use crate::ebnf_parser::parse_ebnf;

    #[test]
    fn tree_output_mentions_every_node() {
        let (productions, _) =
            parse_ebnf("a ::= 'x' | b ('y' c)* ;").unwrap_or_else(|e| panic!("{e}"));
        let tree = AsTree::new(&productions[0]).to_string();

        assert!(tree.contains("Production"));
        assert!(tree.contains("name: a"));
        assert!(tree.contains("Group *"));
        assert!(tree.contains("Term"));
    }
}
