//! Output formatting.

mod emoji;
pub(crate) mod table;
mod text;
mod thread;

pub use emoji::shortcode_to_emoji;
pub use table::TableColumn;
pub use text::{format_date, format_priority, format_relative_time, truncate};
pub use thread::output_comment_threads;

use table::output_table;

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned columns
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Identifiers only, one per line
    Quiet,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Quiet => "quiet",
        };
        f.write_str(name)
    }
}

/// Resolved output settings for one command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub verbose: bool,
}

impl OutputOptions {
    /// Pick the format: `--json`, then `--quiet`, then `--format`, then the configured default.
    pub fn resolve(
        json: bool,
        quiet: bool,
        format: Option<OutputFormat>,
        configured: Option<OutputFormat>,
        verbose: bool,
    ) -> Self {
        let format = if json {
            OutputFormat::Json
        } else if quiet {
            OutputFormat::Quiet
        } else {
            format.or(configured).unwrap_or_default()
        };
        Self { format, verbose }
    }
}

/// Print `data` as JSON with two-space indentation.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Print one identifier per line.
pub fn print_quiet<I, S>(ids: I)
where
    I: IntoIterator<Item = S>,
    S: fmt::Display,
{
    for id in ids {
        println!("{}", id);
    }
}

/// Print records in the selected format.
pub fn print_records<T, F>(
    items: &[T],
    columns: &[TableColumn<T>],
    id: F,
    options: OutputOptions,
) -> Result<()>
where
    T: Serialize,
    F: Fn(&T) -> String,
{
    match options.format {
        OutputFormat::Json => print_json(items)?,
        OutputFormat::Quiet => print_quiet(items.iter().map(id)),
        OutputFormat::Table => output_table(items, columns, options.verbose),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_precedence() {
        let opts = OutputOptions::resolve(true, true, Some(OutputFormat::Table), None, false);
        assert_eq!(opts.format, OutputFormat::Json);

        let opts = OutputOptions::resolve(false, true, Some(OutputFormat::Json), None, false);
        assert_eq!(opts.format, OutputFormat::Quiet);

        let opts = OutputOptions::resolve(
            false,
            false,
            Some(OutputFormat::Table),
            Some(OutputFormat::Json),
            false,
        );
        assert_eq!(opts.format, OutputFormat::Table);

        let opts = OutputOptions::resolve(false, false, None, Some(OutputFormat::Quiet), true);
        assert_eq!(opts.format, OutputFormat::Quiet);
        assert!(opts.verbose);

        let opts = OutputOptions::resolve(false, false, None, None, false);
        assert_eq!(opts.format, OutputFormat::Table);
    }

    #[test]
    fn test_format_serde() {
        let parsed: OutputFormat = serde_json::from_str("\"quiet\"").unwrap();
        assert_eq!(parsed, OutputFormat::Quiet);
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
