//! The REPL driver.
//!
//! Loops: parse one top-level expression, evaluate it (interpreted or
//! JIT-compiled, depending on the selected mode), print the result followed
//! by a space. Stops on `Nothing` (end of input); a final newline is
//! emitted at EOF. Any fatal error is printed to stderr and the process
//! exits nonzero — there is no resynchronization after a failure.

use std::io::{self, Read, Write};

use clap::Parser;

use dotjit::front::lex::Lexer;
use dotjit::front::{parse, Expr};
use dotjit::runtime::FuncTable;

/// Evaluation mode, selected at runtime on top of the `jit` build-time
/// feature (spec.md treats mode selection as a pure compile-time flag; this
/// adds a runtime override on top so one binary can exercise both paths).
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
enum Mode {
    Interp,
    #[cfg(feature = "jit")]
    Jit,
}

impl Default for Mode {
    fn default() -> Self {
        #[cfg(feature = "jit")]
        {
            Mode::Jit
        }
        #[cfg(not(feature = "jit"))]
        {
            Mode::Interp
        }
    }
}

#[derive(Debug, Parser)]
#[command(version, about = "a tiny JIT-compiled expression language", long_about = None)]
struct Args {
    /// which evaluator to use for top-level expressions
    #[arg(value_enum, short, long, default_value_t = Mode::default())]
    mode: Mode,

    /// size in bytes of the JIT's executable memory arena
    #[arg(long, default_value_t = 1024 * 1024)]
    arena_size: usize,
}

fn main() {
    let args = Args::parse();

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .expect("stdin should be readable");

    let mut lexer = Lexer::new(&input);
    let mut table = FuncTable::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    #[cfg(feature = "jit")]
    let mut arena = if args.mode == Mode::Jit {
        Some(dotjit::runtime::jit::JitArena::new(args.arena_size).unwrap_or_else(|e| fatal(&e)))
    } else {
        None
    };

    loop {
        let expr = parse(&mut lexer).unwrap_or_else(|e| fatal(&e));
        if matches!(expr, Expr::Nothing) {
            break;
        }

        let result = match args.mode {
            #[cfg(feature = "jit")]
            Mode::Jit => dotjit::runtime::jit::eval_top_level(
                &expr,
                &mut table,
                arena.as_mut().expect("jit mode allocates an arena"),
            ),
            Mode::Interp => dotjit::runtime::eval(&expr, &mut table, 0),
        };
        let result = result.unwrap_or_else(|e| fatal(&e));

        write!(out, "{result} ").expect("stdout should be writable");
    }
    writeln!(out).expect("stdout should be writable");
}

fn fatal(err: &dotjit::Error) -> ! {
    eprintln!("{err}");
    std::process::exit(1);
}
