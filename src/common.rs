//! Common definitions that are shared between different parts of the compiler.

/// Identifiers.
pub type Id = internment::Intern<String>;
