//! Recursive-descent parser producing an [`Expr`] tree.
//!
//! Precedence, lowest to highest:
//! - `parse_expression`: binary `+` and `-`, left associative
//! - `parse_term`: binary `*` and `/`, left associative
//! - `parse_unary`: prefix `+` and `-`
//! - `parse_primary`: numbers, identifiers, parenthesised groups

use rust_decimal::Decimal;

use super::EvalError;
use super::lexer::{Token, tokenize_with};

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition.
    Add,
    /// Subtraction.
    Subtract,
    /// Multiplication.
    Multiply,
    /// Division.
    Divide,
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Subtract => write!(f, "-"),
            BinaryOp::Multiply => write!(f, "*"),
            BinaryOp::Divide => write!(f, "/"),
        }
    }
}

/// A parsed formula.
///
/// # Example
///
/// ```
/// use salary_engine::formula::{parse_formula, BinaryOp, Expr};
///
/// let expr = parse_formula("=CTC*0.5").unwrap().unwrap();
/// match expr {
///     Expr::Binary { op, .. } => assert_eq!(op, BinaryOp::Multiply),
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A decimal literal.
    Number(Decimal),
    /// A reference to CTC or another component.
    Variable(String),
    /// Arithmetic negation.
    Negate(Box<Expr>),
    /// A binary operation.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Negate(inner) => write!(f, "-({})", inner),
            Expr::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op, rhs),
        }
    }
}

struct Parser<'a> {
    formula: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(formula: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            formula,
            tokens,
            pos: 0,
        }
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn error(&self, message: impl Into<String>) -> EvalError {
        EvalError::invalid(self.formula, message)
    }

    fn parse_expression(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.current() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Subtract,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.parse_term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn parse_term(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.current() {
                Some(Token::Star) => BinaryOp::Multiply,
                Some(Token::Slash) => BinaryOp::Divide,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, EvalError> {
        match self.current() {
            Some(Token::Minus) => {
                self.advance();
                Ok(Expr::Negate(Box::new(self.parse_unary()?)))
            }
            Some(Token::Plus) => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, EvalError> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            Some(Token::Identifier(name)) => Ok(Expr::Variable(name)),
            Some(Token::LParen) => {
                let inner = self.parse_expression()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner),
                    Some(other) => Err(self.error(format!("expected ')', found {}", other))),
                    None => Err(self.error("missing ')'")),
                }
            }
            Some(other) => Err(self.error(format!("unexpected {}", other))),
            None => Err(self.error("unexpected end of formula")),
        }
    }
}

/// Strips the optional leading `=` and surrounding whitespace.
fn formula_body(formula: &str) -> &str {
    let trimmed = formula.trim();
    trimmed.strip_prefix('=').unwrap_or(trimmed).trim()
}

/// Parses a formula into an expression tree without evaluating it.
///
/// The formula may start with `=`. Returns `Ok(None)` when there is nothing
/// to parse (an empty string or a bare `=`).
///
/// # Errors
///
/// Returns [`EvalError::InvalidFormula`] for unbalanced parentheses, unknown
/// characters, missing operands, or trailing tokens.
pub fn parse_formula(formula: &str) -> Result<Option<Expr>, EvalError> {
    parse_formula_with(formula, &[])
}

/// Parses a formula, reading each of `names` written bare as one identifier.
///
/// Only names that are not plain identifiers are affected, and the longest
/// matching name wins. This lets a template refer to `Employer-PF` or
/// `Special Allowance` without brackets.
///
/// # Example
///
/// ```
/// use salary_engine::formula::{parse_formula_with, referenced_variables};
///
/// let expr = parse_formula_with("=Employer-PF * 2", &["Employer-PF"]).unwrap().unwrap();
/// assert_eq!(referenced_variables(&expr), vec!["Employer-PF"]);
/// ```
///
/// # Errors
///
/// As [`parse_formula`].
pub fn parse_formula_with(formula: &str, names: &[&str]) -> Result<Option<Expr>, EvalError> {
    let body = formula_body(formula);
    if body.is_empty() {
        return Ok(None);
    }

    let tokens = tokenize_with(body, names).map_err(|e| e.for_formula(formula))?;
    let mut parser = Parser::new(formula, tokens);
    let expr = parser.parse_expression()?;

    if let Some(extra) = parser.current() {
        return Err(parser.error(format!("unexpected {} after end of expression", extra)));
    }

    Ok(Some(expr))
}

/// Lists the identifiers an expression refers to, in first-seen order and
/// without duplicates.
///
/// # Example
///
/// ```
/// use salary_engine::formula::{parse_formula, referenced_variables};
///
/// let expr = parse_formula("=(Basic + HRA) * 0.1 + Basic").unwrap().unwrap();
/// assert_eq!(referenced_variables(&expr), vec!["Basic", "HRA"]);
/// ```
pub fn referenced_variables(expr: &Expr) -> Vec<String> {
    fn walk(expr: &Expr, out: &mut Vec<String>) {
        match expr {
            Expr::Number(_) => {}
            Expr::Variable(name) => {
                if !out.contains(name) {
                    out.push(name.clone());
                }
            }
            Expr::Negate(inner) => walk(inner, out),
            Expr::Binary { lhs, rhs, .. } => {
                walk(lhs, out);
                walk(rhs, out);
            }
        }
    }

    let mut out = Vec::new();
    walk(expr, &mut out);
    out
}
