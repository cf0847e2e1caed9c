//! IDF/IDD tokenizer using nom
//!
//! Both formats share the same lexical rules: `!` starts a comment that runs
//! to the end of the line, `,` separates fields and `;` ends an object. The
//! IDD additionally uses `\` to start a directive (`\field Name`,
//! `\extensible:3`, ...) that also runs to the end of the line.

use nom::{
    branch::alt,
    bytes::complete::{take_till, take_till1},
    character::complete::{char, multispace1, not_line_ending, one_of},
    combinator::{map, value},
    multi::many0,
    sequence::{pair, preceded},
    IResult, Offset,
};

use crate::error::IdfError;

/// Skip whitespace and `!` comments
fn blank(input: &str) -> IResult<&str, ()> {
    value(
        (),
        many0(alt((
            value((), multispace1),
            value((), pair(char('!'), not_line_ending)),
        ))),
    )(input)
}

/// Field separator `,` or object terminator `;`
fn separator(input: &str) -> IResult<&str, char> {
    preceded(blank, one_of(",;"))(input)
}

/// Raw field text up to the next separator or comment, trimmed
fn field_text(input: &str) -> IResult<&str, &str> {
    map(take_till(|c| matches!(c, ',' | ';' | '!')), str::trim)(input)
}

/// Parse one IDF object: `Class, field, field, ... ;`
///
/// The first element of the returned list is the class name.
fn object(input: &str) -> IResult<&str, Vec<&str>> {
    let mut fields = Vec::new();
    let mut rest = input;
    loop {
        let (r, text) = preceded(blank, field_text)(rest)?;
        let (r, sep) = separator(r)?;
        fields.push(text);
        rest = r;
        if sep == ';' {
            return Ok((rest, fields));
        }
    }
}

/// 1-based line number of `part` within `input`.
fn line_of(input: &str, part: &str) -> usize {
    let offset = input.offset(part).min(input.len());
    input[..offset].matches('\n').count() + 1
}

/// A parsed object: class name, field values and the line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawObject<'a> {
    pub class: &'a str,
    pub fields: Vec<&'a str>,
    pub line: usize,
}

/// Parse a whole IDF document into raw objects.
pub(crate) fn parse_objects(input: &str) -> Result<Vec<RawObject<'_>>, IdfError> {
    let (rest, objects) = many0(object)(input).map_err(|e| IdfError::Parse {
        line: 1,
        message: format!("failed to parse objects: {e}"),
    })?;
    let (rest, ()) = blank(rest).map_err(|e| IdfError::Parse {
        line: line_of(input, rest),
        message: format!("failed to parse trailing input: {e}"),
    })?;
    if !rest.is_empty() {
        return Err(IdfError::Parse {
            line: line_of(input, rest),
            message: "object is not terminated by `;`".into(),
        });
    }

    let mut raw = Vec::with_capacity(objects.len());
    for fields in objects {
        let mut iter = fields.into_iter();
        let class = iter.next().unwrap_or_default();
        let line = line_of(input, class);
        if class.is_empty() {
            return Err(IdfError::Parse {
                line,
                message: "object without a class name".into(),
            });
        }
        raw.push(RawObject {
            class,
            fields: iter.collect(),
            line,
        });
    }
    Ok(raw)
}

/// IDD lexical item
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum IddItem<'a> {
    /// `\field Name`, `\extensible:3 ...`, `\memo ...` (without the backslash)
    Directive(&'a str),
    /// A class name or field code with its trailing separator
    Token(&'a str, char),
}

/// Parse a directive: `\` up to end of line
fn directive(input: &str) -> IResult<&str, IddItem> {
    map(preceded(char('\\'), not_line_ending), |d: &str| {
        IddItem::Directive(d.trim())
    })(input)
}

/// Parse a class name or field code followed by `,` or `;`
fn token(input: &str) -> IResult<&str, IddItem> {
    map(
        pair(
            take_till1(|c| matches!(c, ',' | ';' | '!' | '\\')),
            separator,
        ),
        |(text, sep): (&str, char)| IddItem::Token(text.trim(), sep),
    )(input)
}

/// Parse a whole IDD document into lexical items.
pub(crate) fn parse_idd_items(input: &str) -> Result<Vec<IddItem<'_>>, IdfError> {
    let (rest, items) =
        many0(preceded(blank, alt((directive, token))))(input).map_err(|e| IdfError::Parse {
            line: 1,
            message: format!("failed to parse dictionary: {e}"),
        })?;
    let (rest, ()) = blank(rest).map_err(|e| IdfError::Parse {
        line: line_of(input, rest),
        message: format!("failed to parse trailing input: {e}"),
    })?;
    if !rest.is_empty() {
        return Err(IdfError::Parse {
            line: line_of(input, rest),
            message: "dictionary entry is not terminated by `,` or `;`".into(),
        });
    }
    Ok(items)
}
