//! Recursive-descent parser for the bracketed keyword grammar.
//!
//! ```text
//! Formula := "not " Formula
//!          | "poss " Formula
//!          | "nec " Formula
//!          | "(" Formula (" and " | " or " | " then ") Formula ")"
//!          | Atom
//! ```
//!
//! There is no operator precedence: every binary expression is bracketed and
//! the leftmost operator at bracket depth 0 splits it.

use std::str::FromStr;

use crate::error::SyntaxError;
use crate::formula::Formula;

/// Substrings an atom may not contain.
pub const RESERVED_TOKENS: [&str; 9] = [
    "not ", " and ", " or ", " then ", "nec ", "poss ", ",", "(", ")",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOperator {
    And,
    Or,
    Then,
}

impl BinaryOperator {
    const ALL: [(&'static str, BinaryOperator); 3] = [
        (" and ", BinaryOperator::And),
        (" or ", BinaryOperator::Or),
        (" then ", BinaryOperator::Then),
    ];

    fn build(self, left: Formula, right: Formula) -> Formula {
        match self {
            Self::And => Formula::and(left, right),
            Self::Or => Formula::or(left, right),
            Self::Then => Formula::implies(left, right),
        }
    }
}

/// Parse formula text. Surrounding whitespace is ignored.
///
/// Keywords are matched with an ASCII space on each side where the grammar
/// shows one. Tabs or newlines in place of that space are not recognised: `(p\tand q)` has no top-level operator and `not\tp` is
/// read as a single atom.
pub fn parse(input: &str) -> Result<Formula, SyntaxError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(SyntaxError::Empty);
    }
    if let Some(rest) = input.strip_prefix("not ") {
        Ok(Formula::not(parse(rest)?))
    } else if let Some(rest) = input.strip_prefix("poss ") {
        Ok(Formula::possibly(parse(rest)?))
    } else if let Some(rest) = input.strip_prefix("nec ") {
        Ok(Formula::necessarily(parse(rest)?))
    } else if input.starts_with('(') {
        parse_binary(input)
    } else {
        parse_atom(input)
    }
}

impl FromStr for Formula {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

fn parse_atom(input: &str) -> Result<Formula, SyntaxError> {
    if let Some(token) = RESERVED_TOKENS
        .into_iter()
        .find(|token| input.contains(*token))
    {
        return Err(SyntaxError::ReservedToken {
            atom: input.to_string(),
            token,
        });
    }
    Ok(Formula::atom(input))
}

fn parse_binary(input: &str) -> Result<Formula, SyntaxError> {
    let inner = strip_outer_brackets(input)?;
    let (operator, index, keyword_len) = find_top_level_operator(inner)?;
    let left = parse(&inner[..index])?;
    let right = parse(&inner[index + keyword_len..])?;
    Ok(operator.build(left, right))
}

/// The text between the opening bracket and the bracket that closes it,
/// which must be the last character.
fn strip_outer_brackets(input: &str) -> Result<&str, SyntaxError> {
    let unbalanced = || SyntaxError::UnbalancedBrackets {
        input: input.to_string(),
    };
    let last = input.len() - 1;
    let mut depth = 0usize;
    for (index, ch) in input.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(unbalanced)?;
                if depth == 0 && index != last {
                    return Err(unbalanced());
                }
            }
            _ => {}
        }
    }
    if depth != 0 || !input.ends_with(')') {
        return Err(unbalanced());
    }
    Ok(&input[1..last])
}

fn find_top_level_operator(input: &str) -> Result<(BinaryOperator, usize, usize), SyntaxError> {
    let mut depth = 0usize;
    for (index, ch) in input.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if depth == 0 {
            let rest = &input[index..];
            if let Some((keyword, operator)) = BinaryOperator::ALL
                .into_iter()
                .find(|(keyword, _)| rest.starts_with(keyword))
            {
                return Ok((operator, index, keyword.len()));
            }
        }
    }
    Err(SyntaxError::NoTopLevelOperator {
        input: input.to_string(),
    })
}
