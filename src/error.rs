use std::fmt::Display;

use ariadne::{Label, Report, ReportKind, Source};
use winnow::error::{ContextError, ParseError};

use crate::Input;

/// A fatal problem with one input grammar. Parsing stops at the first of
/// these; the driver reports it and produces no output.
#[derive(Debug, PartialEq)]
pub enum GrammarError<'a> {
    /// The text does not match the production/choice/sequence grammar.
    Syntax(ParseError<Input<'a>, ContextError>),
    /// The same non-terminal was defined twice.
    DuplicateDefinition { name: &'a str },
    /// A production had more than one empty alternative.
    MultipleEmptyAlternatives { name: &'a str, count: usize },
}

impl<'a> From<ParseError<Input<'a>, ContextError>> for GrammarError<'a> {
    fn from(value: ParseError<Input<'a>, ContextError>) -> Self {
        GrammarError::Syntax(value)
    }
}

impl Display for GrammarError<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarError::Syntax(e) => {
                write!(f, "syntax error at offset {}: {}", e.offset(), e.inner())
            }
            GrammarError::DuplicateDefinition { name } => {
                write!(f, "non-terminal `{name}` is defined more than once")
            }
            GrammarError::MultipleEmptyAlternatives { name, count } => {
                write!(f, "production `{name}` has {count} empty alternatives")
            }
        }
    }
}

impl GrammarError<'_> {
    /// Write the error to stderr, annotated against the source text where a
    /// position is known.
    pub fn emit(&self, file: &str, src: &str) {
        match self {
            GrammarError::Syntax(e) => {
                let at = e.offset().min(src.len());
                let end = src[at..]
                    .chars()
                    .next()
                    .map_or(at, |c| at + c.len_utf8());
                let _ = Report::build(ReportKind::Error, (file, at..end))
                    .with_message("grammar does not parse")
                    .with_label(Label::new((file, at..end)).with_message(e.inner().to_string()))
                    .finish()
                    .eprint((file, Source::from(src)));
            }
            other => eprintln!("{file}: {other}"),
        }
    }
}

/// Input remaining after a structurally complete parse. Not an error: the
/// driver surfaces it as a warning and carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leftover<'a> {
    pub offset: usize,
    pub text: &'a str,
}

const PREVIEW_LIMIT: usize = 60;

impl<'a> Leftover<'a> {
    /// A bounded excerpt of the unconsumed text, cut at a char boundary.
    pub fn preview(&self) -> &'a str {
        if self.text.len() <= PREVIEW_LIMIT {
            return self.text;
        }
        let mut end = PREVIEW_LIMIT;
        while !self.text.is_char_boundary(end) {
            end -= 1;
        }
        &self.text[..end]
    }
}

impl Display for Leftover<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Leftover { offset, text } = self;
        let preview = self.preview();
        let ellipsis = if preview.len() < text.len() { "..." } else { "" };
        write!(
            f,
            "{} bytes of input left unparsed at offset {offset}: {preview:?}{ellipsis}",
            text.len()
        )
    }
}
