use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace1},
    combinator::{map, value},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

use crate::ast::*;

// --- Whitespace & Comments ---

fn comment(input: &str) -> IResult<&str, ()> {
    value((), pair(tag("#"), take_while(|c| c != '\n')))(input)
}

fn sp(input: &str) -> IResult<&str, ()> {
    value((), many0(alt((value((), multispace1), comment))))(input)
}

// --- Net names ---

fn net_name(input: &str) -> IResult<&str, String> {
    map(
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.'),
        |s: &str| s.to_string(),
    )(input)
}

// --- Statements ---

fn input_decl(input: &str) -> IResult<&str, Statement> {
    map(
        preceded(
            tag("INPUT"),
            delimited(
                tuple((sp, char('('), sp)),
                net_name,
                tuple((sp, char(')'))),
            ),
        ),
        Statement::Input,
    )(input)
}

fn output_decl(input: &str) -> IResult<&str, Statement> {
    map(
        preceded(
            tag("OUTPUT"),
            delimited(
                tuple((sp, char('('), sp)),
                net_name,
                tuple((sp, char(')'))),
            ),
        ),
        Statement::Output,
    )(input)
}

fn gate_decl(input: &str) -> IResult<&str, Statement> {
    map(
        tuple((
            net_name,
            sp,
            char('='),
            sp,
            net_name,
            sp,
            delimited(
                char('('),
                separated_list1(tuple((sp, char(','))), preceded(sp, net_name)),
                tuple((sp, char(')'))),
            ),
        )),
        |(output, _, _, _, kind, _, inputs)| Statement::Gate {
            output,
            kind,
            inputs,
        },
    )(input)
}

fn statement(input: &str) -> IResult<&str, Statement> {
    preceded(
        sp,
        alt((
            input_decl,
            output_decl,
            gate_decl, // last: matches any `name = ...` line
        )),
    )(input)
}

// --- Netlist ---

pub fn parse_netlist_str(input: &str) -> crate::Result<Netlist> {
    let (input, statements) =
        many0(statement)(input).map_err(|e| crate::BenchError::ParseError(e.to_string()))?;

    // Anything left over past trailing whitespace is a malformed line.
    let input = sp(input).map(|(i, _)| i).unwrap_or(input);
    if !input.is_empty() {
        return Err(crate::BenchError::ParseError(format!(
            "Unparsed input: {}",
            input.lines().next().unwrap_or(input)
        )));
    }

    Ok(Netlist { statements })
}
