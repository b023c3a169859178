//! `loglayout render` command handler

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing::{debug, info, warn};

use loglayout_core::event::LoggingEvent;
use loglayout_html::{HtmlLayoutBuilder, HtmlLayoutConfig};

use crate::cli::RenderArgs;
use crate::commands::load_config;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `render` command.
///
/// Without `--out` the document itself is written to stdout and no report
/// is printed.
pub async fn execute(
    args: RenderArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = load_config(config_path).await?;

    let mut layout_config = HtmlLayoutConfig::from_core(&config.layout)?;
    apply_overrides(&mut layout_config, &args);

    info!(
        input = %args.input.display(),
        pattern = %layout_config.pattern,
        row_limit = layout_config.row_limit,
        "rendering events"
    );

    let input = read_input(&args.input).await?;
    let document = render_document(layout_config, &input)?;

    match args.out {
        Some(path) => {
            tokio::fs::write(&path, document.html.as_bytes()).await?;
            info!(path = %path.display(), rows = document.rows, "document written");
            let report = RenderReport::new(&args.input, Some(&path), &document);
            writer.render(&report)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(document.html.as_bytes())?;
            writeln!(handle)?;
        }
    }

    Ok(())
}

/// Apply command-line overrides on top of the configured layout.
pub fn apply_overrides(config: &mut HtmlLayoutConfig, args: &RenderArgs) {
    if let Some(ref pattern) = args.pattern {
        config.pattern.clone_from(pattern);
    }
    if let Some(ref title) = args.title {
        config.title.clone_from(title);
    }
    if let Some(row_limit) = args.row_limit {
        config.row_limit = row_limit;
    }
}

async fn read_input(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut input = String::new();
        tokio::io::stdin().read_to_string(&mut input).await?;
        return Ok(input);
    }
    Ok(tokio::fs::read_to_string(path).await?)
}

/// A fully rendered document with render statistics.
#[derive(Debug)]
pub struct RenderedDocument {
    pub html: String,
    pub rows: u64,
    pub pages: u64,
    pub skipped: u64,
}

/// Render JSON-lines input into one HTML document.
///
/// Blank lines are ignored. Lines that are not a valid event are skipped
/// with a warning and counted.
pub fn render_document(config: HtmlLayoutConfig, input: &str) -> Result<RenderedDocument, CliError> {
    let row_limit = config.effective_row_limit();
    let mut layout = HtmlLayoutBuilder::new().config(config).build()?;
    layout.start()?;

    let mut html = layout.header()?;
    let mut rows = 0u64;
    let mut skipped = 0u64;

    for (index, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<LoggingEvent>(line) {
            Ok(event) => {
                html.push_str(&layout.do_layout(&event)?);
                rows += 1;
            }
            Err(e) => {
                warn!(line = index + 1, error = %e, "skipping malformed event");
                skipped += 1;
            }
        }
    }

    html.push_str(&layout.footer()?);
    layout.stop()?;

    let pages = page_count(rows, row_limit);
    debug!(rows, pages, skipped, "render finished");

    Ok(RenderedDocument {
        html,
        rows,
        pages,
        skipped,
    })
}

/// Number of tables a document with `rows` rows contains.
pub fn page_count(rows: u64, row_limit: u64) -> u64 {
    if rows == 0 {
        return 1;
    }
    (rows - 1) / row_limit.max(1) + 1
}

/// Summary printed after writing a document to a file.
#[derive(Debug, Serialize)]
pub struct RenderReport {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub rows: u64,
    pub pages: u64,
    pub skipped: u64,
}

impl RenderReport {
    pub fn new(input: &Path, output: Option<&PathBuf>, document: &RenderedDocument) -> Self {
        Self {
            input: input.display().to_string(),
            output: output.map(|p| p.display().to_string()),
            rows: document.rows,
            pages: document.pages,
            skipped: document.skipped,
        }
    }
}

impl Render for RenderReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Rendered {}", self.input.bold())?;
        if let Some(ref output) = self.output {
            writeln!(w, "  output:  {}", output)?;
        }
        writeln!(w, "  rows:    {}", self.rows)?;
        writeln!(w, "  pages:   {}", self.pages)?;
        if self.skipped > 0 {
            writeln!(w, "  skipped: {}", self.skipped.to_string().yellow())?;
        } else {
            writeln!(w, "  skipped: 0")?;
        }
        Ok(())
    }
}
