use std::iter;
use std::ops::Deref;

use log::{debug, trace};
use thiserror::Error;

use crate::classify;
use crate::scanner::Scanner;
use crate::stack::Stack;
use crate::token::{Operator, Token};
use crate::variables::{NoVariables, Resolve, VariableScope, VariableTable};

#[derive(Clone, PartialEq, Debug, Error)]
pub enum ParseError {
    #[error("unexpected character '{0}'")]
    UnknownChar(char),
    #[error("'{open}' closed by '{close}'")]
    MismatchedParen { open: char, close: char },
    #[error("'{0}' has no opening bracket")]
    MissingOParen(char),
    #[error("unclosed bracket")]
    MissingCParen,
    #[error("no value for variable {0}")]
    Unresolved(char),
}

/// Postfix token sequence, oldest token first.
#[derive(Clone, PartialEq, Debug)]
pub struct RPNExpr(pub Vec<Token>);

impl Deref for RPNExpr {
    type Target = [Token];
    fn deref(&self) -> &[Token] { &self.0 }
}

// things waiting on the operator stack
#[derive(Clone, Copy, PartialEq, Debug)]
enum Pending {
    Open(char),
    Op(Operator),
}

/// Single pass infix to postfix converter.
///
/// Besides the usual shunting-yard moves it infers multiplications from
/// adjacency (`2x`, `3(4)`, `(1)(2)`, `x2`), folds a unary minus into the
/// number or variable that follows it, and turns `-(...)` into `-1 * (...)`.
/// The whole input is wrapped in a synthetic pair of parens so closing the
/// outer group flushes the operator stack.
///
/// Letters are looked up in a 26 slot variable table. Unbound letters are
/// handed to a [`Resolve`] strategy and the answer is stored. Whether the
/// table survives between calls depends on the [`VariableScope`].
pub struct ShuntingParser {
    digits: Stack<u8>,
    operators: Stack<Pending>,
    postfix: Stack<Token>,
    digit_count: usize,
    decimal_place: Option<usize>,
    negative: bool,
    variables: VariableTable,
    scope: VariableScope,
}

impl Default for ShuntingParser {
    fn default() -> Self { ShuntingParser::new() }
}

impl ShuntingParser {
    pub fn new() -> ShuntingParser {
        ShuntingParser::with_scope(VariableScope::default())
    }

    pub fn with_scope(scope: VariableScope) -> ShuntingParser {
        ShuntingParser {
            digits: Stack::new(),
            operators: Stack::new(),
            postfix: Stack::new(),
            digit_count: 0,
            decimal_place: None,
            negative: false,
            variables: VariableTable::new(),
            scope,
        }
    }

    pub fn scope(&self) -> VariableScope { self.scope }

    pub fn variables(&self) -> &VariableTable { &self.variables }

    /// Bind a variable ahead of time, false if name isn't a letter.
    pub fn define(&mut self, name: char, value: f64) -> bool {
        self.variables.set(name, value)
    }

    /// Parse an expression that can't reference unbound variables.
    pub fn parse_str(expr: &str) -> Result<RPNExpr, ParseError> {
        ShuntingParser::new().parse(expr, &mut NoVariables)
    }

    pub fn parse<R>(&mut self, expr: &str, resolver: &mut R) -> Result<RPNExpr, ParseError>
        where R: Resolve + ?Sized
    {
        debug!("parsing {:?}", expr);
        self.reset();
        let result = self.convert(expr, resolver);
        if self.scope == VariableScope::Expression {
            self.variables.clear();
        }
        match result {
            Ok(ref rpn) => debug!("{:?} -> {} tokens", expr, rpn.len()),
            Err(ref e) => debug!("{:?} rejected: {}", expr, e),
        }
        result
    }

    fn reset(&mut self) {
        self.digits.clear();
        self.operators.clear();
        self.postfix.clear();
        self.digit_count = 0;
        self.decimal_place = None;
        self.negative = false;
    }

    fn convert<R>(&mut self, expr: &str, resolver: &mut R) -> Result<RPNExpr, ParseError>
        where R: Resolve + ?Sized
    {
        let wrapped = iter::once('(').chain(expr.chars()).chain(iter::once(')'));
        let mut src = Scanner::new(wrapped);

        while let Some(c) = src.next() {
            let prev = src.lookbehind(1);

            if classify::is_digit(c) {
                self.implicit_mul(prev, true);
                self.digits.push(c as u8 - b'0');
                self.digit_count += 1;
                continue;
            }
            if c == '.' {
                self.implicit_mul(prev, true);
                self.decimal_place = Some(self.digit_count);
                continue;
            }

            // anything else ends the number being scanned
            self.flush_number();

            if classify::is_alphabetic(c) {
                self.implicit_mul(prev, false);
                let value = self.lookup(c, resolver)?;
                let value = self.signed(value);
                self.emit(Token::Operand(value));
            } else if classify::is_open_paren(c) {
                self.implicit_mul(prev, false);
                // a '-' that can't be binary negates the whole group
                if prev == Some('-') && !src.lookbehind(2).map_or(false, classify::ends_operand) {
                    debug!("negated group, emitting -1 *");
                    self.emit(Token::Operand(-1.0));
                    self.insert_operator(Operator::Mul);
                }
                self.operators.push(Pending::Open(c));
            } else if let Some(op) = Operator::from_char(c) {
                if op == Operator::Sub && !prev.map_or(false, classify::ends_operand) {
                    // unary: either sign the next operand or leave it to the
                    // open paren that follows
                    if !src.peek().map_or(false, classify::is_open_paren) {
                        self.negative = true;
                    }
                    continue;
                }
                self.insert_operator(op);
            } else if classify::is_close_paren(c) {
                self.close_group(c)?;
            } else {
                return Err(ParseError::UnknownChar(c));
            }
        }

        if !self.operators.is_empty() {
            return Err(ParseError::MissingCParen);
        }
        Ok(RPNExpr(self.postfix.take()))
    }

    fn emit(&mut self, token: Token) {
        trace!("emit {:?}", token);
        self.postfix.push(token);
    }

    // Adjacent operands multiply. A digit following another digit
    // continues the same number though.
    fn implicit_mul(&mut self, prev: Option<char>, digit_follows: bool) {
        let adjacent = match prev {
            Some(p) if classify::is_digit(p) => !digit_follows,
            Some(p) => classify::ends_operand(p),
            None => false,
        };
        if adjacent {
            debug!("implicit multiplication after '{}'", prev.unwrap_or(' '));
            self.insert_operator(Operator::Mul);
        }
    }

    // pop everything binding at least as tight as op, then park op
    fn insert_operator(&mut self, op: Operator) {
        let prec = classify::precedence(op.symbol());
        while let Some(&top) = self.operators.peek() {
            match top {
                Pending::Open(_) => break,
                Pending::Op(other) if prec > classify::precedence(other.symbol()) => break,
                Pending::Op(other) => {
                    self.operators.pop();
                    self.emit(Token::Operator(other));
                }
            }
        }
        self.operators.push(Pending::Op(op));
    }

    fn close_group(&mut self, close: char) -> Result<(), ParseError> {
        while let Some(top) = self.operators.pop() {
            match top {
                Pending::Op(op) => self.emit(Token::Operator(op)),
                Pending::Open(open) if classify::matches(open, close) => return Ok(()),
                Pending::Open(open) => return Err(ParseError::MismatchedParen{open, close}),
            }
        }
        Err(ParseError::MissingOParen(close))
    }

    // Combine scanned digits into a number, the decimal mark says how
    // many of them are fractional. Going through the decimal text keeps
    // long literals exact instead of overflowing a running power of ten.
    fn flush_number(&mut self) {
        let fractional = self.decimal_place.map_or(0, |place| self.digit_count - place);
        self.digit_count = 0;
        self.decimal_place = None;
        if self.digits.is_empty() {
            return;
        }
        let mut text = String::from("0");
        text.extend(self.digits.take().into_iter().map(|d| char::from(b'0' + d)));
        if fractional > 0 {
            text.insert(text.len() - fractional, '.');
        }
        // only ascii digits and at most one '.', always a valid float
        let value = self.signed(text.parse::<f64>().unwrap_or(f64::NAN));
        self.emit(Token::Operand(value));
    }

    fn signed(&mut self, value: f64) -> f64 {
        if self.negative {
            self.negative = false;
            -value
        } else {
            value
        }
    }

    fn lookup<R>(&mut self, name: char, resolver: &mut R) -> Result<f64, ParseError>
        where R: Resolve + ?Sized
    {
        let name = name.to_ascii_uppercase();
        if let Some(value) = self.variables.get(name) {
            return Ok(value);
        }
        debug!("variable {} is unbound, resolving", name);
        let value = resolver.resolve(name).ok_or(ParseError::Unresolved(name))?;
        self.variables.set(name, value);
        Ok(value)
    }
}
