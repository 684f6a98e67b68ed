//! The x86-64 JIT backend — the core of this crate.
//!
//! A stack-machine code generator: every sub-expression's emitted code
//! leaves exactly one 64-bit value pushed on the machine stack. Two
//! registers are reserved architecturally: `r8` holds the current
//! function's `.` argument, and `rax` is the System V integer-return
//! register. There is no register allocator and no stack frame — functions
//! use the machine stack directly.
//!
//! Byte encodings are grounded in the reference C implementation this
//! language is distilled from (see DESIGN.md); this module is a direct,
//! idiomatic-Rust re-expression of its `jit_codegen`/`jit_call`.

use std::rc::Rc;

use crate::common::Id;
use crate::error::Error;
use crate::front::Expr;

use super::FuncTable;

mod arena;
mod emit;
mod trampoline;

pub use arena::JitArena;
pub use trampoline::call_native;

/// Emits machine code for `expr` into `arena`, registering any `FuncDef`
/// into `table`. Used both by the top-level driver (for a bare `FuncDef`)
/// and recursively by the emitter itself (for nested sub-expressions).
pub struct Emitter<'a> {
    arena: &'a mut JitArena,
    table: &'a mut FuncTable,
}

impl<'a> Emitter<'a> {
    pub fn new(arena: &'a mut JitArena, table: &'a mut FuncTable) -> Self {
        Emitter { arena, table }
    }

    /// Emit code for one expression. On return, exactly one more 64-bit
    /// value has been pushed onto the machine stack than was present on
    /// entry (the stack-balance invariant).
    pub fn emit(&mut self, expr: &Expr) -> Result<(), Error> {
        match expr {
            Expr::Int(n) => self.emit_int(*n),
            Expr::Arg => self.emit_arg(),
            Expr::Add(l, r) => self.emit_binop(l, r, emit::add_rax_rcx),
            Expr::Sub(l, r) => self.emit_binop(l, r, emit::sub_rax_rcx),
            Expr::Lesser(l, r) => self.emit_binop(l, r, emit::setlt_rax_rcx),
            Expr::FuncDef(name, body) => self.emit_funcdef(*name, body),
            Expr::FuncCall(name, arg) => self.emit_funccall(*name, arg),
            Expr::If(cond, t, f) => self.emit_if(cond, t, f),
            Expr::Nothing => Ok(()),
        }
    }

    fn emit_int(&mut self, n: i64) -> Result<(), Error> {
        // push imm32, sign-extended on push to 64 bits by the CPU; integer
        // literals outside i32 range are out of scope (spec non-goal).
        self.arena.write(&[0x68])?;
        self.arena.write(&(n as i32).to_le_bytes())
    }

    fn emit_arg(&mut self) -> Result<(), Error> {
        self.arena.write(&emit::PUSH_R8)
    }

    fn emit_binop(
        &mut self,
        l: &Expr,
        r: &Expr,
        op_bytes: fn() -> &'static [u8],
    ) -> Result<(), Error> {
        self.emit(l)?;
        self.emit(r)?;
        self.arena.write(op_bytes())
    }

    fn emit_funcdef(&mut self, name: Id, body: &Expr) -> Result<(), Error> {
        // Registered before the body is emitted, so the body can call
        // itself recursively (forward-reference policy, spec §4.5.2).
        let index = self.table.define(name, Rc::new(body.clone()));
        self.table.set_jit_offset(index, self.arena.pos());
        self.emit(body)?;
        self.arena.write(&emit::EPILOGUE) // pop rax; ret
    }

    fn emit_funccall(&mut self, name: Id, arg: &Expr) -> Result<(), Error> {
        let index = self
            .table
            .lookup_index(name)
            .ok_or(Error::UndeclaredFunction(name))?;
        let jit_offset = self
            .table
            .get(index)
            .jit_offset
            .expect("a function registered before this call site has already been emitted");

        self.arena.write(&emit::PUSH_R8)?; // save caller's `.`
        self.emit(arg)?;
        self.arena.write(&emit::POP_R8)?; // install callee's `.`

        self.arena.write(&[0xe8])?; // call rel32
        let call_operand_end = self.arena.pos() + 4;
        let rel = (jit_offset as i64) - (call_operand_end as i64);
        self.arena.write(&(rel as i32).to_le_bytes())?;

        self.arena.write(&emit::POP_R8)?; // restore caller's `.`
        self.arena.write(&emit::PUSH_RAX) // push the call's return value
    }

    fn emit_if(&mut self, cond: &Expr, t: &Expr, f: &Expr) -> Result<(), Error> {
        self.emit(cond)?;
        self.arena.write(&emit::POP_RAX_CMP_ZERO)?;

        self.arena.write(&emit::JZ_OPCODE)?;
        let fixup_f = self.arena.pos();
        self.arena.write(&0i32.to_le_bytes())?;

        self.emit(t)?;

        self.arena.write(&emit::JMP_OPCODE)?;
        let fixup_e = self.arena.pos();
        self.arena.write(&0i32.to_le_bytes())?;

        let f_label = self.arena.pos();
        self.emit(f)?;
        let e_label = self.arena.pos();

        self.arena.patch_rel32(fixup_f, f_label)?;
        self.arena.patch_rel32(fixup_e, e_label)
    }
}

/// The top-level JIT driver (spec §4.5.4): a bare `FuncDef` emits code and
/// evaluates to 0; a top-level `FuncCall` computes its argument through
/// *this* driver (host-evaluated, not emitted) and trampolines into the
/// named function; anything else — arithmetic, `if` — falls back to the
/// tree-walking interpreter, since only function bodies are compiled.
pub fn eval_top_level(
    expr: &Expr,
    table: &mut FuncTable,
    arena: &mut JitArena,
) -> Result<i64, Error> {
    match expr {
        Expr::FuncDef(name, body) => {
            Emitter::new(arena, table).emit_funcdef(*name, body)?;
            Ok(0)
        }
        Expr::FuncCall(name, arg) => {
            let arg_value = eval_top_level(arg, table, arena)?;
            let func = table
                .lookup(*name)
                .ok_or(Error::UndeclaredFunction(*name))?;
            let offset = func
                .jit_offset
                .expect("a function reachable by name has already been emitted");
            let entry = arena.entry_point(offset);
            Ok(call_native(entry, arg_value))
        }
        _ => super::interp::eval(expr, table, 0),
    }
}
