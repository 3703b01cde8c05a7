use cilly::{render, styled_error};
use std::io::{self, Write};
use std::{env, fs, process};

fn main() -> io::Result<()> {
    match env::args().nth(1) {
        Some(path) => run_file(&path),
        None => repl(),
    }
}

/// Parses the script at `path` and prints its AST. Exits with status `1` on a syntax error.
fn run_file(path: &str) -> io::Result<()> {
    let content = fs::read_to_string(path)?;
    match render(&content) {
        Ok(ast) => {
            println!("{}", ast);
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", styled_error(&err));
            process::exit(1);
        }
    }
}

/// Every line is parsed as a program of its own.
fn repl() -> io::Result<()> {
    let mut stdout = io::stdout();
    let stdin = io::stdin();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            println!();
            return Ok(());
        }

        match render(&input) {
            Ok(ast) => println!("{}", ast),
            Err(err) => eprintln!("{}", styled_error(&err)),
        }
    }
}
