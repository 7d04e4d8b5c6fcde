use crate::parser::RPNExpr;
use crate::token::{Operator, Token};
use std::fmt;

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Token::Operand(num) => write!(f, "{}", num),
            Token::Operator(op) => write!(f, "{}", op),
        }
    }
}

// tokens oldest first, separated by a space
impl fmt::Display for RPNExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tokens = self.iter()
            .map(|t| t.to_string())
            .collect::<Vec<String>>()
            .join(" ");
        write!(f, "{}", tokens)
    }
}

/// Results too big or too small for plain notation go scientific.
pub fn format_value(x: f64) -> String {
    let mag = x.abs();
    if mag.is_finite() && (mag >= 1e10 || (mag > 0.0 && mag < 1e-4)) {
        format!("{:e}", x)
    } else {
        format!("{}", x)
    }
}
