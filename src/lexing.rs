//! Low-level token parsers shared by the two grammar front ends.

use winnow::{
    ModalResult, Parser,
    ascii::multispace1,
    combinator::{alt, delimited, repeat},
    token::{any, none_of, one_of, take_until, take_while},
};

use crate::Input;

/// `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn ident<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    (
        one_of(('a'..='z', 'A'..='Z', '_')),
        take_while(0.., ('a'..='z', 'A'..='Z', '0'..='9', '_')),
    )
        .take()
        .parse_next(input)
}

/// Skippable space: whitespace and non-nested C-style comments.
pub(crate) fn ws(input: &mut Input<'_>) -> ModalResult<()> {
    repeat::<_, _, (), _, _>(0.., alt((multispace1.void(), block_comment))).parse_next(input)
}

fn block_comment(input: &mut Input<'_>) -> ModalResult<()> {
    ("/*", take_until(0.., "*/"), "*/").void().parse_next(input)
}

/// Single-quoted yacc terminal. The quotes are stripped; a backslash keeps
/// its following character, so `'\''` comes out as `\'`.
pub(crate) fn yacc_literal<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    delimited('\'', yacc_literal_body.take(), '\'').parse_next(input)
}

fn yacc_literal_body(input: &mut Input<'_>) -> ModalResult<()> {
    repeat::<_, _, (), _, _>(0.., alt((('\\', any).void(), none_of(['\'', '\\']).void())))
        .parse_next(input)
}

/// EBNF terminals are carried verbatim, delimiters included, so these all
/// return the full source slice.
pub(crate) fn single_quoted<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    ('\'', take_until(0.., "'"), '\'').take().parse_next(input)
}

pub(crate) fn double_quoted<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    ('"', take_until(0.., "\""), '"').take().parse_next(input)
}

pub(crate) fn char_class<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    ('[', take_until(0.., "]"), ']').take().parse_next(input)
}
