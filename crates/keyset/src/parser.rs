//! A `nom`-based parser for the key-set selector grammar.
//!
//! Precedence, lowest to highest: `|` < `&` < prefix `!` < `( )` < atom.
//! Atoms are runs of any characters other than the operators, so globs,
//! slices and keys containing spaces need no quoting.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::take_while1,
    character::complete::char,
    combinator::map,
    multi::many0,
    sequence::{delimited, preceded},
};

use crate::ast::{Selector, TokenAtom};
use crate::error::KeysetError;
use crate::slice::SliceExpr;

/// Characters that give a path segment selector meaning.
pub const WILD_CHARS: &[char] = &['*', '?', ':', '|', '&', '!', '(', ')'];

const OPERATOR_CHARS: &[char] = &['&', '|', '!', '(', ')'];

/// True iff `segment` contains selector metacharacters and must be parsed as
/// a key-set expression rather than used as a literal key.
pub fn is_wild(segment: &str) -> bool {
    segment.chars().any(|c| WILD_CHARS.contains(&c))
}

// --- Main Public Parser ---

pub fn parse(expression: &str) -> Result<Selector, KeysetError> {
    match raw_expr(expression) {
        Ok(("", raw)) => resolve(raw),
        Ok((rem, _)) => Err(KeysetError::parse(
            expression,
            format!("unexpected trailing input '{}'", rem),
        )),
        Err(e) => Err(KeysetError::parse(expression, e.to_string())),
    }
}

// --- Grammar ---

/// Parse tree before atoms are classified; classification can fail with a
/// better message than nom's, so it happens in a second pass.
enum RawExpr<'a> {
    Atom(&'a str),
    Not(Box<RawExpr<'a>>),
    And(Vec<RawExpr<'a>>),
    Or(Vec<RawExpr<'a>>),
}

fn raw_expr(input: &str) -> IResult<&str, RawExpr<'_>> {
    or_expr(input)
}

fn or_expr(input: &str) -> IResult<&str, RawExpr<'_>> {
    let (input, first) = and_expr(input)?;
    let (input, rest) = many0(preceded(char('|'), and_expr)).parse(input)?;
    if rest.is_empty() {
        return Ok((input, first));
    }
    let mut terms = vec![first];
    terms.extend(rest);
    Ok((input, RawExpr::Or(terms)))
}

fn and_expr(input: &str) -> IResult<&str, RawExpr<'_>> {
    let (input, first) = not_expr(input)?;
    let (input, rest) = many0(preceded(char('&'), not_expr)).parse(input)?;
    if rest.is_empty() {
        return Ok((input, first));
    }
    let mut terms = vec![first];
    terms.extend(rest);
    Ok((input, RawExpr::And(terms)))
}

fn not_expr(input: &str) -> IResult<&str, RawExpr<'_>> {
    alt((
        map(preceded(char('!'), not_expr), |e| RawExpr::Not(Box::new(e))),
        primary,
    ))
    .parse(input)
}

fn primary(input: &str) -> IResult<&str, RawExpr<'_>> {
    alt((
        delimited(char('('), raw_expr, char(')')),
        map(
            take_while1(|c: char| !OPERATOR_CHARS.contains(&c)),
            RawExpr::Atom,
        ),
    ))
    .parse(input)
}

// --- Atom classification ---

fn resolve(raw: RawExpr<'_>) -> Result<Selector, KeysetError> {
    Ok(match raw {
        RawExpr::Atom(token) => classify_atom(token)?,
        RawExpr::Not(inner) => Selector::Not(Box::new(resolve(*inner)?)),
        RawExpr::And(terms) => Selector::And(
            terms
                .into_iter()
                .map(resolve)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        RawExpr::Or(terms) => Selector::Or(
            terms
                .into_iter()
                .map(resolve)
                .collect::<Result<Vec<_>, _>>()?,
        ),
    })
}

fn classify_atom(token: &str) -> Result<Selector, KeysetError> {
    if token == "*" || token == ":" {
        return Ok(Selector::All);
    }
    if token.contains(':') {
        return Ok(Selector::Slice(SliceExpr::parse(token)?));
    }
    Ok(Selector::Token(TokenAtom::new(token)?))
}
