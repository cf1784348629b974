//! Formula tokenizer.
//!
//! Splits a formula body into numbers, identifiers, operators and parentheses.
//! Whitespace is insignificant. Identifiers are either plain
//! (`Basic`, `special_allowance`) or bracket-quoted (`[Special Allowance]`).
//!
//! Component names that are not plain identifiers (`Employer-PF`,
//! `Special Allowance`) can also be written bare when the lexer is given the
//! template's names: at each token start the longest such name that matches
//! is taken as one identifier before the ordinary rules apply.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::EvalError;

/// A single lexical token of a formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Number(Decimal),
    Identifier(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Star => write!(f, "'*'"),
            Token::Slash => write!(f, "'/'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
        }
    }
}

fn is_identifier_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Returns true if `name` can be written in a formula without brackets.
pub(crate) fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first == '_' || first.is_alphabetic())
        && chars.all(is_identifier_char)
}

struct Lexer<'a> {
    formula: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    // Longest first.
    known_names: Vec<&'a str>,
}

impl<'a> Lexer<'a> {
    fn new(formula: &'a str, names: &[&'a str]) -> Self {
        let mut known_names: Vec<&'a str> = names
            .iter()
            .copied()
            .filter(|name| !is_plain_identifier(name) && name.chars().any(char::is_alphabetic))
            .collect();
        known_names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        known_names.dedup();

        Self {
            formula,
            chars: formula.char_indices().peekable(),
            known_names,
        }
    }

    fn error(&self, message: impl Into<String>) -> EvalError {
        EvalError::invalid(self.formula, message)
    }

    fn next_token(&mut self) -> Result<Option<Token>, EvalError> {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}

        let Some(&(start, ch)) = self.chars.peek() else {
            return Ok(None);
        };

        if let Some(name) = self.scan_known_name(start) {
            return Ok(Some(name));
        }

        if ch.is_ascii_digit() || ch == '.' {
            return self.scan_number(start).map(Some);
        }

        if ch == '_' || ch.is_alphabetic() {
            return Ok(Some(self.scan_identifier(start)));
        }

        self.chars.next();
        let token = match ch {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '[' => return self.scan_quoted_identifier(start).map(Some),
            other => return Err(self.error(format!("unexpected character '{}'", other))),
        };
        Ok(Some(token))
    }

    /// Consumes the longest known component name starting at `start`.
    ///
    /// A name ending in an identifier character must not run straight into
    /// another one, so `Employer-PF` does not match the front of
    /// `Employer-PFX`.
    fn scan_known_name(&mut self, start: usize) -> Option<Token> {
        let rest = &self.formula[start..];
        let name = self.known_names.iter().copied().find(|name| {
            rest.strip_prefix(name).is_some_and(|after| {
                let joins = name.chars().next_back().is_some_and(is_identifier_char)
                    && after.chars().next().is_some_and(is_identifier_char);
                !joins
            })
        })?;

        let end = start + name.len();
        while self.chars.next_if(|&(idx, _)| idx < end).is_some() {}
        Some(Token::Identifier(name.to_string()))
    }

    fn scan_number(&mut self, start: usize) -> Result<Token, EvalError> {
        let mut end = start;
        let mut seen_dot = false;
        while let Some(&(idx, c)) = self.chars.peek() {
            if c.is_ascii_digit() {
                end = idx + 1;
            } else if c == '.' && !seen_dot {
                seen_dot = true;
                end = idx + 1;
            } else {
                break;
            }
            self.chars.next();
        }

        let text = &self.formula[start..end];
        if text == "." {
            return Err(self.error("a number needs at least one digit"));
        }
        // Read ".5" as "0.5" and "5." as "5".
        let trimmed = text.strip_suffix('.').unwrap_or(text);
        let normalized = if trimmed.starts_with('.') {
            format!("0{}", trimmed)
        } else {
            trimmed.to_string()
        };
        Decimal::from_str(&normalized)
            .map(Token::Number)
            .map_err(|e| self.error(format!("bad number '{}': {}", text, e)))
    }

    fn scan_identifier(&mut self, start: usize) -> Token {
        let mut end = start;
        while let Some(&(idx, c)) = self.chars.peek() {
            if is_identifier_char(c) {
                end = idx + c.len_utf8();
                self.chars.next();
            } else {
                break;
            }
        }
        Token::Identifier(self.formula[start..end].to_string())
    }

    fn scan_quoted_identifier(&mut self, open: usize) -> Result<Token, EvalError> {
        let body_start = open + 1;
        let Some((close, _)) = self.chars.by_ref().find(|&(_, c)| c == ']') else {
            return Err(self.error("unterminated '[' reference"));
        };

        let name = self.formula[body_start..close].trim();
        if name.is_empty() {
            return Err(self.error("empty '[]' reference"));
        }
        Ok(Token::Identifier(name.to_string()))
    }
}

/// Tokenizes a formula body (without any leading `=`).
#[cfg(test)]
pub(crate) fn tokenize(formula: &str) -> Result<Vec<Token>, EvalError> {
    tokenize_with(formula, &[])
}

/// Tokenizes a formula body, reading `names` as single identifiers.
pub(crate) fn tokenize_with<'a>(
    formula: &'a str,
    names: &[&'a str],
) -> Result<Vec<Token>, EvalError> {
    let mut lexer = Lexer::new(formula, names);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}
