use winnow::{
    ModalResult, Parser,
    combinator::{alt, delimited, not, opt, preceded, repeat, separated, terminated},
    error::StrContext,
    stream::LocatingSlice,
    token::rest,
};

use crate::{
    Input,
    ebnf::{Choice, Item, Primary, Production, Quantifier, Sequence},
    error::{GrammarError, Leftover},
    lexing::{char_class, double_quoted, ident, single_quoted, ws},
};

/// Parse a W3C EBNF grammar, as used for the auxiliary terminal-definition
/// file. This front end trusts its input: the duplicate-definition and
/// empty-alternative invariants of the yacc parser are not enforced here.
pub fn parse_ebnf(src: &str) -> Result<(Vec<Production>, Option<Leftover<'_>>), GrammarError<'_>> {
    let (productions, trailing) =
        (productions, preceded(ws, rest)).parse(LocatingSlice::new(src))?;

    let leftover = (!trailing.is_empty()).then(|| Leftover {
        offset: src.len() - trailing.len(),
        text: trailing,
    });
    Ok((productions, leftover))
}

fn productions(input: &mut Input<'_>) -> ModalResult<Vec<Production>> {
    repeat(1.., production).parse_next(input)
}

fn production(input: &mut Input<'_>) -> ModalResult<Production> {
    let name = preceded(ws, ident)
        .context(StrContext::Label("production name"))
        .parse_next(input)?;
    // `::=` is what this tool prints, `:` is the spelling the auxiliary
    // files use.
    preceded(ws, definition_separator)
        .context(StrContext::Label("definition separator"))
        .parse_next(input)?;
    let choice = choice.parse_next(input)?;
    // W3C notation has no terminator, so `;` is optional.
    opt(preceded(ws, ';')).parse_next(input)?;
    Ok(Production {
        name: name.to_string(),
        choice,
    })
}

fn definition_separator<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    alt(("::=", ":")).parse_next(input)
}

fn choice(input: &mut Input<'_>) -> ModalResult<Choice> {
    let alternatives = separated(1.., sequence, preceded(ws, '|')).parse_next(input)?;
    Ok(Choice { alternatives })
}

fn sequence(input: &mut Input<'_>) -> ModalResult<Sequence> {
    let items = repeat(0.., item).parse_next(input)?;
    Ok(Sequence { items })
}

fn item(input: &mut Input<'_>) -> ModalResult<Item> {
    let primary = primary.parse_next(input)?;
    let quantifier = opt(preceded(ws, quantifier)).parse_next(input)?;
    Ok(Item {
        primary,
        quantifier,
    })
}

fn primary(input: &mut Input<'_>) -> ModalResult<Primary> {
    preceded(
        ws,
        alt((
            reference,
            single_quoted.map(|term: &str| Primary::Term(term.to_string())),
            double_quoted.map(|term: &str| Primary::Term(term.to_string())),
            char_class.map(|term: &str| Primary::Term(term.to_string())),
            delimited('(', choice, preceded(ws, ')')).map(Primary::Group),
        )),
    )
    .context(StrContext::Label("item"))
    .parse_next(input)
}

/// A name used as an item. A name directly followed by a definition
/// separator is the start of the next production, not a reference, which is
/// what keeps terminator-less input unambiguous.
fn reference(input: &mut Input<'_>) -> ModalResult<Primary> {
    terminated(ident, not(preceded(ws, definition_separator)))
        .map(|name: &str| Primary::Name(name.to_string()))
        .parse_next(input)
}

fn quantifier(input: &mut Input<'_>) -> ModalResult<Quantifier> {
    alt((
        '?'.value(Quantifier::Optional),
        '*'.value(Quantifier::ZeroOrMore),
        '+'.value(Quantifier::OneOrMore),
    ))
    .parse_next(input)
}
