use std::io::Write;

use log::{debug, warn, LevelFilter, Log, Metadata, Record};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use clap::Parser;

use rpncalc::{Config, LinePrompt, ShuntingParser};

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

// Asks for unbound variables on the same editor as the main loop
fn prompt(rl: &mut DefaultEditor) -> LinePrompt<impl FnMut(&str) -> Option<String> + '_> {
    LinePrompt::new(move |prompt: &str| match rl.readline(prompt) {
        Ok(line) => Some(line),
        Err(e) => {
            debug!("stopped reading a definition: {:?}", e);
            None
        }
    })
}

mod repl {
    use super::prompt;
    use rpncalc::{format_value, ShuntingParser};
    use rustyline::DefaultEditor;

    pub fn evalexpr(parser: &mut ShuntingParser, rl: &mut DefaultEditor, input: &str) {
        match parser.parse(input, &mut prompt(rl)) {
            Err(e) => println!("Parse error: {}", e),
            Ok(rpn) => match rpn.eval() {
                Err(e) => println!("Eval error: {}", e),
                Ok(result) => println!("{} = {}", rpn, format_value(result)),
            },
        }
    }

    pub fn statement(parser: &mut ShuntingParser, rl: &mut DefaultEditor, input: &str) {
        let rpn = match parser.parse(input, &mut prompt(rl)) {
            Ok(rpn) => rpn,
            Err(e) => {
                log::debug!("parse error: {}", e);
                println!("Invalid expression");
                return;
            }
        };
        match rpn.eval() {
            Ok(result) => {
                println!("Postfix: {}", rpn);
                println!("Result: {}", format_value(result));
            }
            Err(e) => {
                log::debug!("eval error on {}: {}", rpn, e);
                println!("Invalid expression");
            }
        }
    }
}

fn main() -> Result<(), String> {
    let config = Config::parse();
    init_logging(config.log_level);
    debug!("{:?}", config);

    let mut rl = DefaultEditor::new().map_err(|e| e.to_string())?;
    let mut parser = ShuntingParser::with_scope(config.scope);

    if let Some(ref input) = config.expression() {
        repl::evalexpr(&mut parser, &mut rl, input);
        return Ok(());
    }

    let history = config.history();
    if let Some(ref path) = history {
        if rl.load_history(path).is_err() {
            debug!("No history yet at {:?}", path);
        }
    }

    println!("Type in a mathematical expression. Enter nothing to exit.");
    loop {
        match rl.readline(" > ") {
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(format!("Readline err: {:?}", e)),
            Ok(line) if line.is_empty() => break,
            Ok(line) => {
                if let Err(e) = rl.add_history_entry(line.as_str()) {
                    debug!("history entry not added: {}", e);
                }
                repl::statement(&mut parser, &mut rl, &line);
            }
        }
    }

    if let Some(ref path) = history {
        if let Err(e) = rl.save_history(path) {
            warn!("couldn't save history to {:?}: {}", path, e);
        }
    }
    Ok(())
}
