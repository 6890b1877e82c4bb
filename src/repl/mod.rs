//! REPL for the Capuchin programming language.
//!
//! Reads a line, lexes and parses it, and evaluates the program against an
//! environment that persists for the whole session, so `let` bindings and
//! function definitions carry over from line to line. Parse errors are
//! printed and the line is discarded without touching the environment.

use crate::{
    evaluator::eval_program,
    lexer::Lexer,
    object::environment::Environment,
    parser::Parser,
};
use display::{CYAN, RESET, print_parser_errors, print_welcome};
pub use display::CAPUCHIN_LOGO;
use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

mod display;

const PROMPT: &str = ">>";

/// Starts the REPL
/// # Parameters
/// - `input`: The input reader to read the lines from
/// - `output`: The output writer to write the lines to
/// # Returns
/// - `Ok(())` if the REPL was started successfully
/// - `Err(e)` if an error occurred while starting the REPL
pub fn repl<R: BufRead, W: Write>(input: R, mut output: W) -> io::Result<()> {
    print_welcome();

    let env = Rc::new(RefCell::new(Environment::new()));
    let mut reader = input;
    let mut line = String::new();

    loop {
        // Print prompt
        write!(output, "{}{}{} ", CYAN, PROMPT, RESET)?;
        output.flush()?;
        line.clear();
        // Read line from input
        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            // If no bytes read, print goodbye message and exit
            writeln!(output, "\nGoodbye!")?;
            return Ok(());
        }
        // If line is empty, continue to next iteration
        let trimmed_line = line.trim_end_matches(['\n', '\r']);
        if trimmed_line.is_empty() {
            continue;
        }

        // Create lexer and parse tokens
        let lexer = Lexer::new(trimmed_line.to_string());
        let mut parser = Parser::new(lexer);
        let program = parser.parse_program();

        // If there are parser errors, print them and continue to next iteration
        if !parser.errors.is_empty() {
            print_parser_errors(&mut output, &parser.errors)?;
            continue;
        }

        let evaluated = eval_program(&program, &env);
        writeln!(output, "{}", evaluated.inspect())?;
    }
}
