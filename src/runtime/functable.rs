//! The function table: a process-wide, append-only registry mapping
//! function names to their definition body and, in JIT mode, to the byte
//! offset where their emitted code starts.
//!
//! Name lookup is linear, first match wins. The table is shared between the
//! interpreter and the JIT emitter: a `FuncDef` installs a body regardless
//! of evaluation mode, and the JIT emitter additionally fills in
//! `jit_offset` at the moment the body's code is emitted.

use std::rc::Rc;

use crate::common::Id;
use crate::front::Expr;

/// A registered function: name, body, and (once JIT-compiled) the arena
/// offset of its entry point.
pub struct Function {
    pub name: Id,
    pub body: Rc<Expr>,
    pub jit_offset: Option<usize>,
}

/// Append-only, ordered registry of functions. Cannot shadow or remove
/// earlier entries: emitted relative-call displacements for already-compiled
/// call sites depend on the index-to-offset mapping staying stable.
#[derive(Default)]
pub struct FuncTable {
    funcs: Vec<Function>,
}

impl FuncTable {
    pub fn new() -> Self {
        FuncTable::default()
    }

    /// Register a new function body, returning its index in the table. The
    /// JIT emitter calls this before emitting the body, so a function can
    /// call itself recursively.
    pub fn define(&mut self, name: Id, body: Rc<Expr>) -> usize {
        let index = self.funcs.len();
        self.funcs.push(Function {
            name,
            body,
            jit_offset: None,
        });
        index
    }

    pub fn set_jit_offset(&mut self, index: usize, offset: usize) {
        self.funcs[index].jit_offset = Some(offset);
    }

    /// First-match-wins lookup by name.
    pub fn lookup(&self, name: Id) -> Option<&Function> {
        self.funcs.iter().find(|f| f.name == name)
    }

    pub fn lookup_index(&self, name: Id) -> Option<usize> {
        self.funcs.iter().position(|f| f.name == name)
    }

    pub fn get(&self, index: usize) -> &Function {
        &self.funcs[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::front::Expr;

    #[test]
    fn first_match_wins() {
        let mut table = FuncTable::new();
        table.define(Id::new("f".to_string()), Rc::new(Expr::Int(1)));
        table.define(Id::new("f".to_string()), Rc::new(Expr::Int(2)));
        let found = table.lookup(Id::new("f".to_string())).unwrap();
        assert!(matches!(*found.body, Expr::Int(1)));
    }

    #[test]
    fn missing_name_is_none() {
        let table = FuncTable::new();
        assert!(table.lookup(Id::new("nope".to_string())).is_none());
    }

    #[test]
    fn jit_offset_starts_unset() {
        let mut table = FuncTable::new();
        let idx = table.define(Id::new("f".to_string()), Rc::new(Expr::Int(1)));
        assert_eq!(table.get(idx).jit_offset, None);
        table.set_jit_offset(idx, 42);
        assert_eq!(table.get(idx).jit_offset, Some(42));
    }
}
