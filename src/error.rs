//! The crate's single error type.
//!
//! Every fatal condition in this language (spec: lexical/parse misuse,
//! undeclared function calls, arena exhaustion) funnels through here so the
//! driver has one place to print a diagnostic and exit nonzero.

use std::fmt::Debug;

use derive_more::Display;

use crate::common::Id;

#[derive(Display)]
pub enum Error {
    /// Identifier followed by neither `=` nor `.`, or any other unexpected
    /// token position. The lexer itself never errors — an unrecognized
    /// character just lexes as `End` (see `front::lex`) — so every lexical
    /// surprise surfaces here, at the parser, instead.
    #[display("parse error: {_0}")]
    Parse(String),
    #[display("undeclared {_0} function")]
    UndeclaredFunction(Id),
    #[display("jit arena exhausted: requested {requested} bytes, {available} available")]
    ArenaExhausted { requested: usize, available: usize },
}

impl Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

pub type Result<T> = std::result::Result<T, Error>;
