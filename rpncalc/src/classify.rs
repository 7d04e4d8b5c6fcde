// Character classes the shunting parser dispatches on. Only ASCII
// digits and letters are accepted, letters name one of 26 variables.

pub fn is_digit(c: char) -> bool { c.is_ascii_digit() }

pub fn is_alphabetic(c: char) -> bool { c.is_ascii_alphabetic() }

pub fn is_whitespace(c: char) -> bool { c.is_whitespace() }

// 0 means c isn't an operator
pub fn precedence(c: char) -> u8 {
    match c {
        '+' | '-' => 1,
        '*' | '/' => 2,
        '^' => 3,
        _ => 0,
    }
}

pub fn is_open_paren(c: char) -> bool { matches!(c, '(' | '[' | '{') }

pub fn is_close_paren(c: char) -> bool { matches!(c, ')' | ']' | '}') }

// both brackets must belong to the same family
pub fn matches(open: char, close: char) -> bool {
    matches!((open, close), ('(', ')') | ('[', ']') | ('{', '}'))
}

// A char that closes an operand: a following operand or group
// implies a multiplication, and a following '-' is binary.
pub fn ends_operand(c: char) -> bool {
    is_digit(c) || is_alphabetic(c) || is_close_paren(c)
}
