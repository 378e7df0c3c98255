//! In-memory implementations of the domain repositories.

mod in_memory_rule_repository;

pub use in_memory_rule_repository::InMemoryRuleRepository;
