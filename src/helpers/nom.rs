// An error type for nom parsers that, unlike nom::error::VerboseError,
// can hold owned context strings, so errors coming from FromStr
// conversions inside map_res keep their message.

use nom::Finish;

#[derive(Clone, Debug, PartialEq)]
pub enum NomErrorKind {
    Context(String),
    Char(char),
    Nom(nom::error::ErrorKind),
}

#[derive(Clone, Debug, PartialEq)]
pub struct NomError<I> {
    pub errors: Vec<(I, NomErrorKind)>,
}

pub type IResult<'a, O> = nom::IResult<&'a str, O, NomError<&'a str>>;

impl<I> nom::error::ParseError<I> for NomError<I> {
    fn from_error_kind(input: I, kind: nom::error::ErrorKind) -> Self {
        Self {
            errors: vec![(input, NomErrorKind::Nom(kind))],
        }
    }

    fn append(input: I, kind: nom::error::ErrorKind, mut other: Self) -> Self {
        other.errors.push((input, NomErrorKind::Nom(kind)));
        other
    }

    fn from_char(input: I, c: char) -> Self {
        Self {
            errors: vec![(input, NomErrorKind::Char(c))],
        }
    }
}

impl<I, E> nom::error::FromExternalError<I, E> for NomError<I>
where
    E: std::fmt::Display,
{
    fn from_external_error(input: I, _kind: nom::error::ErrorKind, e: E) -> Self {
        Self {
            errors: vec![(input, NomErrorKind::Context(e.to_string()))],
        }
    }
}

impl<I> nom::error::ContextError<I> for NomError<I> {
    fn add_context(input: I, ctx: &'static str, mut other: Self) -> Self {
        other
            .errors
            .push((input, NomErrorKind::Context(ctx.to_owned())));
        other
    }
}

impl<I: std::fmt::Display> std::fmt::Display for NomError<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Parse error:")?;
        for (input, error) in &self.errors {
            match error {
                NomErrorKind::Nom(e) => writeln!(f, "{:?} at: {}", e, input)?,
                NomErrorKind::Char(c) => writeln!(f, "expected '{}' at: {}", c, input)?,
                NomErrorKind::Context(s) => writeln!(f, "in section '{}', at: {}", s, input)?,
            }
        }
        Ok(())
    }
}

/// Renders every error of the chain with its line number and a caret under
/// the offending column of `input`.
pub fn convert_error(input: &str, e: &NomError<&str>) -> String {
    use nom::Offset;
    use std::fmt::Write;

    let mut result = String::new();
    for (i, (substring, kind)) in e.errors.iter().enumerate() {
        let what = match kind {
            NomErrorKind::Char(c) => match substring.chars().next() {
                Some(actual) => format!("expected '{}', found {}", c, actual),
                None => format!("expected '{}', got end of input", c),
            },
            NomErrorKind::Context(s) => format!("in {}", s),
            NomErrorKind::Nom(e) => format!("in {:?}", e),
        };

        if input.is_empty() {
            // Writing into a String can't fail.
            let _ = write!(&mut result, "{}: {}, got empty input\n\n", i, what);
            continue;
        }

        let offset = input.offset(substring);
        let prefix = &input.as_bytes()[..offset];
        let line_number = bytecount::count(prefix, b'\n') + 1;
        let line_begin = prefix
            .iter()
            .rev()
            .position(|&b| b == b'\n')
            .map(|pos| offset - pos)
            .unwrap_or(0);
        let line = input[line_begin..]
            .lines()
            .next()
            .unwrap_or(&input[line_begin..])
            .trim_end();
        let column_number = offset - line_begin + 1;

        let _ = write!(
            &mut result,
            "{i}: at line {line_number}, {what}:\n{line}\n{caret:>column$}\n\n",
            i = i,
            line_number = line_number,
            what = what,
            line = line,
            caret = '^',
            column = column_number,
        );
    }
    result
}

/// Runs `parser` over the whole of `input`, turning leftovers and failures
/// into a readable error.
pub fn parse_all<'a, O, P>(parser: P, input: &'a str) -> anyhow::Result<O>
where
    P: nom::Parser<&'a str, O, NomError<&'a str>>,
{
    nom::combinator::all_consuming(parser)(input)
        .finish()
        .map(|(_, o)| o)
        .map_err(|e| anyhow::anyhow!("{}", convert_error(input, &e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nom::{
        bytes::complete::tag,
        character::complete::{newline, u32},
        combinator::map_res,
        error::context,
        multi::separated_list1,
        sequence::preceded,
    };

    fn numbers(i: &str) -> IResult<Vec<u32>> {
        separated_list1(newline, preceded(tag("n="), u32))(i)
    }

    #[test]
    fn test_parse_all() {
        assert_eq!(parse_all(numbers, "n=1\nn=22").unwrap(), vec![1, 22]);
    }

    #[test]
    fn test_error_report_points_to_line() {
        let err = parse_all(numbers, "n=1\nn=2\nx").unwrap_err().to_string();
        assert!(err.contains("at line 2, in Eof"), "{}", err);
        assert!(err.contains("n=2"), "{}", err);
    }

    #[test]
    fn test_external_error_keeps_message() {
        let mut parser = context(
            "digit",
            map_res(nom::character::complete::alpha1, |s: &str| s.parse::<u8>()),
        );
        let err: nom::Err<NomError<&str>> = parser("abc").unwrap_err();
        match err {
            nom::Err::Error(e) => {
                assert_eq!(e.errors.len(), 2);
                assert_eq!(e.errors[1].1, NomErrorKind::Context("digit".to_owned()));
                assert!(matches!(e.errors[0].1, NomErrorKind::Context(_)));
            }
            _ => panic!("Expected a recoverable error"),
        }
    }
}
