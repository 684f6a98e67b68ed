//! The abstract syntax tree.

use crate::common::Id;

/// An expression. Each non-leaf child is exclusively owned by its parent;
/// the tree is never shared and never cyclic. `Clone` exists only so a
/// `FuncDef`'s body can be deep-copied into the function table, independent
/// of the top-level tree that produced it.
#[derive(Debug, Clone)]
pub enum Expr {
    /// An integer literal.
    Int(i64),
    /// Reference to the implicit argument (`.`) of the enclosing function.
    Arg,
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    /// Yields 0 or 1.
    Lesser(Box<Expr>, Box<Expr>),
    /// Defines a function with the given name and body.
    FuncDef(Id, Box<Expr>),
    /// Invokes the named function with a single argument expression.
    FuncCall(Id, Box<Expr>),
    /// Any nonzero `cond` picks the first branch.
    If(Box<Expr>, Box<Expr>, Box<Expr>),
    /// No expression was parsed: end of input, or an empty form.
    Nothing,
}
