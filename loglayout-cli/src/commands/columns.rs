//! `loglayout columns` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use loglayout_html::{ConverterChain, ConverterRegistry};

use crate::cli::ColumnsArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `columns` command.
pub fn execute(args: ColumnsArgs, writer: &OutputWriter) -> Result<(), CliError> {
    let report = build_report(&args.pattern)?;
    info!(pattern = %report.pattern, columns = report.columns.len(), "pattern compiled");
    writer.render(&report)
}

/// Compile a pattern against the built-in conversion words and collect
/// the header cells it would produce.
pub fn build_report(pattern: &str) -> Result<ColumnsReport, CliError> {
    let registry = ConverterRegistry::with_defaults();
    let chain = ConverterChain::compile(pattern, &registry)?;
    Ok(ColumnsReport {
        pattern: pattern.to_owned(),
        columns: chain.column_names().into_iter().map(str::to_owned).collect(),
        converters: chain.len(),
    })
}

/// Header columns of a compiled pattern.
#[derive(Debug, Serialize)]
pub struct ColumnsReport {
    pub pattern: String,
    /// Header cell names, in render order.
    pub columns: Vec<String>,
    /// Total converters, literals included.
    pub converters: usize,
}

impl Render for ColumnsReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Pattern: {}", self.pattern.bold())?;
        if self.columns.is_empty() {
            writeln!(w, "  (no columns)")?;
        }
        for (index, name) in self.columns.iter().enumerate() {
            writeln!(w, "  {:>2}  {}", index + 1, name)?;
        }
        writeln!(
            w,
            "{} column(s), {} converter(s)",
            self.columns.len(),
            self.converters
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pattern_columns() {
        let report = build_report(loglayout_core::config::DEFAULT_CONVERSION_PATTERN)
            .expect("default pattern should compile");
        assert_eq!(
            report.columns,
            vec!["Date", "Thread", "Level", "Logger", "Mdc", "Message"]
        );
        assert_eq!(report.converters, 6);
    }

    #[test]
    fn test_literals_are_not_columns() {
        let report = build_report("[%thread] %level - %msg%n").expect("should compile");
        assert_eq!(report.columns, vec!["Thread", "Level", "Message"]);
        assert!(report.converters > report.columns.len());
    }

    #[test]
    fn test_unknown_word_fails() {
        let err = build_report("%level %nosuchword").expect_err("unknown word");
        assert!(matches!(
            err,
            CliError::Layout(loglayout_html::HtmlLayoutError::PatternSyntax { offset: 7, .. })
        ));
    }

    #[test]
    fn test_text_render_lists_columns() {
        let report = build_report("%level%msg").expect("should compile");
        let mut buf = Vec::new();
        report.render_text(&mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("Level"));
        assert!(text.contains("Message"));
        assert!(text.contains("2 column(s)"));
    }
}
