use std::io;
use std::io::prelude::*;
use std::process;

use clap::Parser;
use shunting_calc::lexer::{tokenize, tokenize_rpn};
use shunting_calc::{evaluate_postfix, parser, Error, Postfix, Span};
use tracing_subscriber::EnvFilter;

/// Evaluates arithmetic expressions with + - * / ^ and parentheses.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Read input as whitespace separated postfix, e.g. `3 4 2 * +`.
    #[arg(long)]
    rpn: bool,

    /// Print the postfix form of each expression before its value.
    #[arg(short, long)]
    postfix: bool,

    /// Expression to evaluate. Starts an interactive prompt when omitted.
    expression: Option<String>,
}

fn print_error(line: &str, err: &Error) {
    eprintln!("{}", line.trim_end());

    if let Some(Span(a, b)) = err.span() {
        let mut msg = String::new();
        (0..a).for_each(|_| msg.push(' '));
        (a..b).for_each(|_| msg.push('^'));
        eprintln!("{}", msg);
    }

    eprintln!("error: {}", err);
}

fn execute_line(line: &str, args: &Args) -> Result<f64, Error> {
    let postfix = if args.rpn {
        Postfix::from_rpn(tokenize_rpn(line))
    } else {
        parser::parse(tokenize(line))?
    };

    if args.postfix {
        println!(" {}", postfix);
    }

    evaluate_postfix(&postfix)
}

fn run_line(line: &str, args: &Args) -> bool {
    match execute_line(line, args) {
        Ok(x) => {
            println!(" {:?}", x);
            true
        }
        Err(err) => {
            print_error(line, &err);
            false
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if let Some(expression) = &args.expression {
        if !run_line(expression, &args) {
            process::exit(1);
        }
        return Ok(());
    }

    let exit_cmds = ["exit", "quit", ""];
    let input = io::stdin();
    let mut output = io::stdout();

    loop {
        output.write_all(b">>> ")?;
        output.flush()?;

        let mut line = String::new();
        input.read_line(&mut line)?;

        if exit_cmds.contains(&line.trim()) {
            break;
        }

        run_line(&line, &args);
    }

    Ok(())
}
