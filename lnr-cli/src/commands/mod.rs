//! Command implementations.

pub mod auth;
pub mod comment;
pub mod config;
pub mod cycle;
pub mod doc;
pub mod issue;
pub mod label;
pub mod me;
pub mod project;
pub mod search;
pub mod team;

use anyhow::Result;
use lnr::LinearClient;

use crate::config::{build_client, Config};
use crate::output::OutputOptions;

/// State shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub output: OutputOptions,
}

impl Context {
    pub fn new(config: Config, output: OutputOptions) -> Self {
        Self { config, output }
    }

    /// Build an authenticated client.
    pub fn client(&self) -> Result<LinearClient> {
        build_client(&self.config)
    }
}

/// First eight characters of an ID, for confirmations.
pub(crate) fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0f3c9a2e-77aa-4b51"), "0f3c9a2e");
        assert_eq!(short_id("abc"), "abc");
    }
}
