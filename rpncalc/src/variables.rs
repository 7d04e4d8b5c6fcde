use log::debug;

use crate::classify;

/// How long variable bindings live inside a parser.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, clap::ValueEnum)]
pub enum VariableScope {
    /// Bindings survive across expressions: each letter is defined once.
    #[default]
    Session,
    /// Bindings are dropped after every parse.
    Expression,
}

/// Strategy used by the parser when it meets a letter with no value.
/// Returning None aborts the parse.
pub trait Resolve {
    fn resolve(&mut self, name: char) -> Option<f64>;
}

impl<F> Resolve for F where F: FnMut(char) -> Option<f64> {
    fn resolve(&mut self, name: char) -> Option<f64> { self(name) }
}

/// Resolver for headless use where every variable must already be bound.
pub struct NoVariables;

impl Resolve for NoVariables {
    fn resolve(&mut self, _: char) -> Option<f64> { None }
}

/// Asks for a value with a `Define <LETTER>: ` prompt until the answer is
/// a finite number. `read_line` shows the prompt and returns the answer,
/// None once input is exhausted.
pub struct LinePrompt<F> {
    read_line: F,
}

impl<F> LinePrompt<F> where F: FnMut(&str) -> Option<String> {
    pub fn new(read_line: F) -> LinePrompt<F> {
        LinePrompt{read_line}
    }
}

impl<F> Resolve for LinePrompt<F> where F: FnMut(&str) -> Option<String> {
    fn resolve(&mut self, name: char) -> Option<f64> {
        let prompt = format!("Define {}: ", name);
        loop {
            let line = (self.read_line)(&prompt)?;
            match line.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => return Some(value),
                _ => debug!("{:?} isn't a value for {}", line, name),
            }
        }
    }
}

/// One slot per letter A-Z, case insensitive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariableTable([Option<f64>; 26]);

impl VariableTable {
    pub fn new() -> VariableTable { VariableTable::default() }

    fn slot(name: char) -> Option<usize> {
        if !classify::is_alphabetic(name) {
            return None;
        }
        Some((name.to_ascii_uppercase() as u8 - b'A') as usize)
    }

    pub fn get(&self, name: char) -> Option<f64> {
        Self::slot(name).and_then(|idx| self.0[idx])
    }

    // returns false if name isn't a letter
    pub fn set(&mut self, name: char, value: f64) -> bool {
        match Self::slot(name) {
            Some(idx) => { self.0[idx] = Some(value); true },
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.0 = [None; 26];
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_slots() {
        let mut vars = VariableTable::new();
        assert!(vars.is_empty());
        assert!(vars.set('x', 5.0));
        assert_eq!(vars.get('X'), Some(5.0));
        assert_eq!(vars.get('x'), Some(5.0));
        assert_eq!(vars.get('y'), None);
        assert!(vars.set('Z', -1.5));
        assert_eq!(vars.get('z'), Some(-1.5));
    }

    #[test]
    fn non_letters_are_rejected() {
        let mut vars = VariableTable::new();
        assert!(!vars.set('1', 3.0));
        assert!(!vars.set('ß', 3.0));
        assert_eq!(vars.get('1'), None);
        assert!(vars.is_empty());
    }

    #[test]
    fn clear_drops_everything() {
        let mut vars = VariableTable::new();
        vars.set('q', 1.0);
        vars.clear();
        assert!(vars.is_empty());
        assert_eq!(vars.get('q'), None);
    }

    #[test]
    fn prompt_retries_until_numeric() {
        let mut answers = vec!["abc", "", "4"].into_iter();
        let mut prompts = Vec::new();
        let value = LinePrompt::new(|prompt: &str| {
            prompts.push(prompt.to_string());
            answers.next().map(String::from)
        }).resolve('X');
        assert_eq!(value, Some(4.0));
        assert_eq!(prompts, vec!["Define X: "; 3]);
    }

    #[test]
    fn prompt_rejects_non_finite() {
        let mut answers = vec!["inf", "NaN", " -2.5 "].into_iter();
        let mut prompt = LinePrompt::new(|_: &str| answers.next().map(String::from));
        assert_eq!(prompt.resolve('Y'), Some(-2.5));
    }

    #[test]
    fn prompt_gives_up_at_end_of_input() {
        let mut answers = vec!["x"].into_iter();
        let mut prompt = LinePrompt::new(|_: &str| answers.next().map(String::from));
        assert_eq!(prompt.resolve('Q'), None);
        let mut silent = LinePrompt::new(|_: &str| None);
        assert_eq!(silent.resolve('Q'), None);
    }

    #[test]
    fn closures_resolve() {
        let mut asked = Vec::new();
        let mut resolver = |name: char| { asked.push(name); Some(1.0) };
        assert_eq!(resolver.resolve('k'), Some(1.0));
        assert_eq!(NoVariables.resolve('k'), None);
        assert_eq!(asked, vec!['k']);
    }
}
