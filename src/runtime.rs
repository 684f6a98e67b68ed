//! The runtime: the function table shared by both evaluation paths, the
//! tree-walking interpreter, and (behind the `jit` feature) the x86-64 JIT
//! backend.

pub mod functable;
pub mod interp;

#[cfg(feature = "jit")]
pub mod jit;

pub use functable::FuncTable;
pub use interp::eval;
