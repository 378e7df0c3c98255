//! Infrastructure layer implementing the domain repository traits.
//!
//! Rule persistence belongs to the surrounding product; this crate ships only
//! [`memory::InMemoryRuleRepository`], fed from a JSON rule file or built in code.

pub mod memory;
