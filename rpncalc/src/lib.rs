pub use classify::precedence;
pub use config::Config;
pub use parser::{ParseError, RPNExpr, ShuntingParser};
pub use rpneval::{evaluate, EvalErr};
pub use rpnprint::format_value;
pub use stack::Stack;
pub use token::{Operator, Token};
pub use variables::{LinePrompt, NoVariables, Resolve, VariableScope, VariableTable};

pub mod classify;
pub mod config;
pub mod parser;
mod rpneval;
mod rpnprint;
mod scanner;
pub mod stack;
mod token;
mod variables;
