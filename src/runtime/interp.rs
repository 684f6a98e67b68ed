//! The tree-walking interpreter.
//!
//! `cur_arg` — the value currently bound to `.` — is threaded explicitly
//! through every call instead of living in a global, per the dot-argument
//! design note: pass `.` as an explicit parameter to the evaluator, don't
//! reintroduce global state.

use std::rc::Rc;

use crate::error::Error;
use crate::front::Expr;

use super::FuncTable;

/// Evaluate `expr` with `cur_arg` bound to `.`, installing any `FuncDef`s
/// encountered into `table`. Signed 64-bit arithmetic wraps.
pub fn eval(expr: &Expr, table: &mut FuncTable, cur_arg: i64) -> Result<i64, Error> {
    match expr {
        Expr::Int(n) => Ok(*n),
        Expr::Arg => Ok(cur_arg),
        Expr::Add(l, r) => Ok(eval(l, table, cur_arg)?.wrapping_add(eval(r, table, cur_arg)?)),
        Expr::Sub(l, r) => Ok(eval(l, table, cur_arg)?.wrapping_sub(eval(r, table, cur_arg)?)),
        Expr::Lesser(l, r) => {
            Ok((eval(l, table, cur_arg)? < eval(r, table, cur_arg)?) as i64)
        }
        Expr::FuncDef(name, body) => {
            // The body stored in the table must outlive this call's `&Expr`
            // borrow of the defining AST, so it is deep-copied into an `Rc`.
            table.define(*name, Rc::new((**body).clone()));
            Ok(0)
        }
        Expr::FuncCall(name, arg) => {
            let arg_value = eval(arg, table, cur_arg)?;
            let func = table
                .lookup(*name)
                .ok_or(Error::UndeclaredFunction(*name))?;
            let body = Rc::clone(&func.body);
            eval(&body, table, arg_value)
        }
        Expr::If(cond, t, f) => {
            if eval(cond, table, cur_arg)? != 0 {
                eval(t, table, cur_arg)
            } else {
                eval(f, table, cur_arg)
            }
        }
        Expr::Nothing => Ok(0),
    }
}
