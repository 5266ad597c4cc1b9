//! Shared lookups used by the commands.

pub mod issue;
pub mod team;
