use log::debug;
use thiserror::Error;

use crate::parser::RPNExpr;
use crate::stack::Stack;
use crate::token::{Operator, Token};

#[derive(Clone, PartialEq, Debug, Error)]
pub enum EvalErr {
    #[error("not enough operands for '{}'", .0.symbol())]
    WrongNumberOfArgs(Operator),
    #[error("nothing to evaluate")]
    Empty,
    #[error("{0} values left on the stack")]
    Leftover(usize),
}

/// Reduce a postfix sequence to a single value. Division by zero and
/// friends aren't errors, they yield inf or NaN.
pub fn evaluate(rpn: &RPNExpr) -> Result<f64, EvalErr> {
    let mut operands = Stack::new();

    for token in rpn.iter() {
        match *token {
            Token::Operand(num) => operands.push(num),
            Token::Operator(op) => {
                let b = operands.pop().ok_or(EvalErr::WrongNumberOfArgs(op))?;
                let a = operands.pop().ok_or(EvalErr::WrongNumberOfArgs(op))?;
                operands.push(op.apply(a, b));
            }
        }
    }

    match operands.len() {
        0 => Err(EvalErr::Empty),
        1 => operands.pop().ok_or(EvalErr::Empty),
        n => {
            debug!("malformed postfix {}", rpn);
            Err(EvalErr::Leftover(n))
        }
    }
}

impl RPNExpr {
    pub fn eval(&self) -> Result<f64, EvalErr> {
        evaluate(self)
    }
}
