//! The parser: recursive descent over a stream of single-token lookaheads.
//!
//! `parse` is called once per top-level expression by the driver; the same
//! [`Lexer`] is reused across calls so terminators (`End`) only close the
//! expression they terminate, not the whole input stream.

use super::ast::Expr;
use super::lex::{Lexer, Token};
use crate::common::Id;
use crate::error::Error;

/// Parse one full expression: a primary, optionally followed by a
/// left-associative chain of `+ - <` operators. `FuncDef` and `If` are
/// already complete forms and never enter the operator loop. Any token that
/// isn't `+ - <` or `End` ends the chain rather than erroring: it belongs
/// to whatever enclosing form called `parse` (an `if`'s next branch, the
/// next top-level form, …), so it's pushed back onto the lexer instead of
/// being consumed.
pub fn parse(lexer: &mut Lexer) -> Result<Expr, Error> {
    let mut left = parse_primary(lexer)?;
    if matches!(left, Expr::FuncDef(..) | Expr::If(..)) {
        return Ok(left);
    }
    loop {
        let op = lexer.next();
        left = match op {
            Token::End => return Ok(left),
            Token::Plus => Expr::Add(Box::new(left), Box::new(parse_primary(lexer)?)),
            Token::Minus => Expr::Sub(Box::new(left), Box::new(parse_primary(lexer)?)),
            Token::Lesser => Expr::Lesser(Box::new(left), Box::new(parse_primary(lexer)?)),
            other => {
                lexer.push_back_token(other);
                return Ok(left);
            }
        };
    }
}

fn parse_primary(lexer: &mut Lexer) -> Result<Expr, Error> {
    match lexer.next() {
        Token::IntLit(n) => Ok(Expr::Int(n)),
        Token::LParen => parse(lexer),
        Token::Dot => Ok(Expr::Arg),
        Token::Ident(name) => parse_after_ident(lexer, name),
        Token::End => Ok(Expr::Nothing),
        other => Err(Error::Parse(format!("unexpected token {other:?} in primary position"))),
    }
}

fn parse_after_ident(lexer: &mut Lexer, name: Id) -> Result<Expr, Error> {
    if name.as_str() == "if" {
        let cond = parse(lexer)?;
        let tbranch = parse(lexer)?;
        let fbranch = parse(lexer)?;
        return Ok(Expr::If(Box::new(cond), Box::new(tbranch), Box::new(fbranch)));
    }
    match lexer.next() {
        Token::Eq => Ok(Expr::FuncDef(name, Box::new(parse(lexer)?))),
        Token::Dot => Ok(Expr::FuncCall(name, Box::new(parse(lexer)?))),
        other => Err(Error::Parse(format!(
            "identifier `{name}` must be followed by `=` (definition) or `.` (call), found {other:?}"
        ))),
    }
}
