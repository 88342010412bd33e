//! DIMACS CNF reader and writer
//!
//! The wire format is line-oriented: `c` comment lines, one
//! `p cnf <atoms> <clauses>` header, then clauses as whitespace
//! separated nonzero integers terminated by `0`. Clauses may span
//! lines.

use crate::error::{Error, Result};
use crate::sat::{Clause, Cnf, Literal};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_till},
    character::complete::{char, digit1, multispace1},
    combinator::{map_res, opt, recognize},
    multi::many0,
    sequence::pair,
    IResult,
};
use std::io::{Read, Write};

/// Skip whitespace and comment lines between tokens.
fn junk(input: &str) -> IResult<&str, ()> {
    let comment = recognize(pair(char('c'), take_till(|c| c == '\n')));
    let (input, _) = many0(alt((multispace1, comment)))(input)?;
    Ok((input, ()))
}

fn number(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse)(input)
}

/// The `p cnf <atoms> <clauses>` problem line.
fn header(input: &str) -> IResult<&str, (usize, usize)> {
    let (input, _) = tag("p")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = tag("cnf")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, num_atoms) = number(input)?;
    let (input, _) = multispace1(input)?;
    let (input, num_clauses) = number(input)?;
    Ok((input, (num_atoms, num_clauses)))
}

fn integer(input: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(char('-')), digit1)), str::parse)(input)
}

/// Parse a DIMACS document from a reader.
pub fn parse<R: Read>(mut reader: R) -> Result<Cnf> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_str(&input)
}

/// Parse a DIMACS document from a string.
pub fn parse_str(input: &str) -> Result<Cnf> {
    let (rest, _) = junk(input).map_err(|_| Error::Dimacs("unreadable input".into()))?;
    let (mut rest, (num_atoms, num_clauses)) =
        header(rest).map_err(|_| Error::Dimacs("missing 'p cnf' header".into()))?;

    let mut clauses: Vec<Clause> = Vec::with_capacity(num_clauses);
    let mut current: Vec<Literal> = Vec::new();

    while clauses.len() < num_clauses {
        let (after_junk, _) =
            junk(rest).map_err(|_| Error::Dimacs("unreadable input".into()))?;
        rest = after_junk;
        if rest.is_empty() {
            break;
        }

        let (after_token, value) = integer(rest).map_err(|_| {
            let token: String = rest.chars().take(16).collect();
            Error::Dimacs(format!("expected a literal, found '{}'", token))
        })?;
        rest = after_token;

        match Literal::from_dimacs(value) {
            None => {
                clauses.push(Clause::new(current.drain(..)));
            }
            Some(literal) => {
                if literal.index() > num_atoms {
                    return Err(Error::Dimacs(format!(
                        "literal {} out of range for {} atoms",
                        value, num_atoms
                    )));
                }
                current.push(literal);
            }
        }
    }

    if !current.is_empty() {
        return Err(Error::Dimacs("clause not terminated by 0".into()));
    }
    if clauses.len() < num_clauses {
        return Err(Error::Dimacs(format!(
            "header declares {} clauses, found {}",
            num_clauses,
            clauses.len()
        )));
    }

    Ok(Cnf::new(num_atoms, clauses))
}

/// Write a CNF in DIMACS format, one clause per line.
pub fn write<W: Write>(cnf: &Cnf, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "p cnf {} {}", cnf.num_atoms, cnf.clauses.len())?;
    for clause in &cnf.clauses {
        for literal in clause.literals() {
            write!(writer, "{} ", literal.to_dimacs())?;
        }
        writeln!(writer, "0")?;
    }
    Ok(())
}

/// Render a CNF as a DIMACS string.
pub fn to_string(cnf: &Cnf) -> String {
    let mut buffer = Vec::new();
    // Writing to a Vec cannot fail.
    write(cnf, &mut buffer).expect("write to Vec");
    String::from_utf8(buffer).expect("DIMACS output is ASCII")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::Variable;

    #[test]
    fn parses_comments_header_and_clauses() {
        let text = "c example\nc\np cnf 3 2\n1 -3 0\n2 3 -1 0\n";
        let cnf = parse_str(text).unwrap();
        assert_eq!(cnf.num_atoms, 3);
        assert_eq!(cnf.clauses.len(), 2);

        let first: Vec<i64> = cnf.clauses[0].literals().map(Literal::to_dimacs).collect();
        assert_eq!(first, vec![1, -3]);
        let second: Vec<i64> = cnf.clauses[1].literals().map(Literal::to_dimacs).collect();
        assert_eq!(second, vec![2, 3, -1]);
    }

    #[test]
    fn clauses_may_span_lines() {
        let text = "p cnf 4 1\n1\n-2 3\n-4 0\n";
        let cnf = parse_str(text).unwrap();
        assert_eq!(cnf.clauses.len(), 1);
        assert_eq!(cnf.clauses[0].len(), 4);
    }

    #[test]
    fn missing_header_is_rejected() {
        assert!(matches!(
            parse_str("1 2 0\n"),
            Err(Error::Dimacs(message)) if message.contains("header")
        ));
    }

    #[test]
    fn missing_clauses_are_rejected() {
        let text = "p cnf 2 3\n1 2 0\n";
        assert!(matches!(
            parse_str(text),
            Err(Error::Dimacs(message)) if message.contains("declares 3 clauses")
        ));
    }

    #[test]
    fn out_of_range_literal_is_rejected() {
        let text = "p cnf 2 1\n1 5 0\n";
        assert!(matches!(
            parse_str(text),
            Err(Error::Dimacs(message)) if message.contains("out of range")
        ));
    }

    #[test]
    fn unterminated_clause_is_rejected() {
        let text = "p cnf 2 2\n1 0\n2";
        assert!(parse_str(text).is_err());
    }

    #[test]
    fn extra_clauses_beyond_declared_are_ignored() {
        let text = "p cnf 2 1\n1 0\n2 0\n";
        let cnf = parse_str(text).unwrap();
        assert_eq!(cnf.clauses.len(), 1);
    }

    #[test]
    fn emit_parse_round_trip() {
        let cnf = Cnf::new(
            3,
            vec![
                Clause::new(vec![
                    Literal::Positive(Variable(1)),
                    Literal::Negative(Variable(3)),
                ]),
                Clause::new(vec![Literal::Negative(Variable(2))]),
            ],
        );
        let text = to_string(&cnf);
        assert_eq!(text, "p cnf 3 2\n1 -3 0\n-2 0\n");
        assert_eq!(parse_str(&text).unwrap(), cnf);
    }
}
