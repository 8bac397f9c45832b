//! Reverse a prepared `sp_executesql` invocation back into plain SQL for
//! plan-inspection display.
//!
//! The substitution is textual, not AST-based: a positional marker is assumed
//! never to occur as a literal substring inside unrelated quoted text except
//! as the exact marker token. Markers found inside quoted string literals are
//! skipped, which covers the common case of a bound string that mentions `@n`.

use crate::bind::EXEC_PREFIX;
use crate::error::{CompileError, CompileResult};
use nom::{
    IResult,
    bytes::complete::tag,
    character::complete::{char, digit1, multispace0},
    multi::separated_list1,
    sequence::delimited,
};

/// Turn a prepared invocation back into the literal-substituted template.
/// Input that is not a prepared invocation is returned unchanged.
pub fn unprepare(sql: &str) -> CompileResult<String> {
    let Some(rest) = sql.strip_prefix(EXEC_PREFIX) else {
        return Ok(sql.to_string());
    };

    let (rest, template) =
        n_string(rest).map_err(|_| CompileError::malformed("missing quoted template"))?;
    if rest.trim().is_empty() {
        return Ok(template);
    }

    let (rest, _) = comma(rest).map_err(|_| CompileError::malformed("missing type declarations"))?;
    let (rest, _types) =
        n_string(rest).map_err(|_| CompileError::malformed("missing type declarations"))?;
    let (rest, _) =
        comma(rest).map_err(|_| CompileError::malformed("missing parameter assignments"))?;
    let (rest, assignments) = separated_list1(char(','), assignment)(rest)
        .map_err(|_| CompileError::malformed("unparsable parameter assignments"))?;
    if !rest.trim().is_empty() {
        return Err(CompileError::malformed(format!(
            "trailing content after assignments: '{}'",
            rest.trim()
        )));
    }

    let mut out = template;
    for (ordinal, literal) in &assignments {
        let (substituted, replaced) = substitute_marker(&out, *ordinal, literal);
        if replaced == 0 {
            return Err(CompileError::malformed(format!(
                "marker @{} not found in template",
                ordinal
            )));
        }
        out = substituted;
    }
    Ok(out)
}

/// `N'...'` with `''` unescaped to `'`.
fn n_string(input: &str) -> IResult<&str, String> {
    let (input, _) = tag("N'")(input)?;
    let mut out = String::new();
    let mut rest = input;
    loop {
        let Some(i) = rest.find('\'') else {
            return Err(nom::Err::Error(nom::error::Error::new(
                rest,
                nom::error::ErrorKind::TakeUntil,
            )));
        };
        out.push_str(&rest[..i]);
        if rest[i + 1..].starts_with('\'') {
            out.push('\'');
            rest = &rest[i + 2..];
        } else {
            return Ok((&rest[i + 1..], out));
        }
    }
}

fn comma(input: &str) -> IResult<&str, ()> {
    let (input, _) = delimited(multispace0, char(','), multispace0)(input)?;
    Ok((input, ()))
}

/// `@<n> = <literal>`, returning the literal as raw text ready to substitute.
fn assignment(input: &str) -> IResult<&str, (usize, String)> {
    let (input, _) = multispace0(input)?;
    let (input, _) = char('@')(input)?;
    let (input, digits) = digit1(input)?;
    let (input, _) = delimited(multispace0, char('='), multispace0)(input)?;
    let (input, literal) = raw_literal(input)?;
    match digits.parse::<usize>() {
        Ok(ordinal) => Ok((input, (ordinal, literal))),
        Err(_) => Err(nom::Err::Failure(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Digit,
        ))),
    }
}

/// A quoted literal (kept verbatim, quotes included) or a bare token running
/// to the next comma.
fn raw_literal(input: &str) -> IResult<&str, String> {
    let quote_start = if input.starts_with("N'") {
        Some(2)
    } else if input.starts_with('\'') {
        Some(1)
    } else {
        None
    };

    if let Some(start) = quote_start {
        let bytes = input.as_bytes();
        let mut i = start;
        while i < bytes.len() {
            if bytes[i] == b'\'' {
                if bytes.get(i + 1) == Some(&b'\'') {
                    i += 2;
                    continue;
                }
                return Ok((&input[i + 1..], input[..i + 1].to_string()));
            }
            i += 1;
        }
        Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::TakeUntil,
        )))
    } else {
        let end = input.find(',').unwrap_or(input.len());
        let literal = input[..end].trim();
        if literal.is_empty() {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::TakeWhile1,
            )));
        }
        Ok((&input[end..], literal.to_string()))
    }
}

/// Replace every unquoted, token-bounded occurrence of `@<ordinal>` with the
/// literal, returning the new text and how many markers were replaced.
fn substitute_marker(template: &str, ordinal: usize, literal: &str) -> (String, usize) {
    let target = ordinal.to_string();
    let chars: Vec<char> = template.chars().collect();
    let mut out = String::with_capacity(template.len());
    let mut replaced = 0;
    let mut in_quote = false;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '\'' {
            in_quote = !in_quote;
            out.push(c);
            i += 1;
            continue;
        }
        if !in_quote && c == '@' {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            let digits: String = chars[i + 1..j].iter().collect();
            let bounded = j >= chars.len() || (!chars[j].is_alphanumeric() && chars[j] != '_');
            if digits == target && bounded {
                out.push_str(literal);
                replaced += 1;
                i = j;
                continue;
            }
        }
        out.push(c);
        i += 1;
    }
    (out, replaced)
}
