use anyhow::{Context, Result};
use relative_path::RelativePath;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use url_to_markdown_engine::{
    BlockProcessor, ProcessReport, Resolve, RewriteLimit, SharedOutline, io,
};

#[derive(Debug, Default)]
pub struct ConvertSummary {
    pub files_scanned: usize,
    pub files_changed: usize,
    pub blocks: ProcessReport,
}

impl ConvertSummary {
    fn add(&mut self, report: ProcessReport) {
        self.blocks.updated += report.updated;
        self.blocks.unchanged += report.unchanged;
        self.blocks.suppressed += report.suppressed;
        self.blocks.failed += report.failed;
    }
}

pub struct ConvertOptions {
    pub limit: RewriteLimit,
    pub suppression_window: Duration,
    pub dry_run: bool,
}

/// Converts raw URLs in every markdown file under `notes_root`.
pub async fn convert_notes<R>(
    notes_root: &Path,
    resolver: Arc<R>,
    options: &ConvertOptions,
) -> Result<ConvertSummary>
where
    R: Resolve + 'static,
{
    let files = io::scan_markdown_files(notes_root)?;
    log::info!("found {} markdown files in {}", files.len(), notes_root.display());

    let mut summary = ConvertSummary::default();
    for file in &files {
        summary.files_scanned += 1;
        let (report, changed) = convert_file(file, notes_root, Arc::clone(&resolver), options)
            .await
            .with_context(|| format!("Failed to convert {file}"))?;

        if changed {
            summary.files_changed += 1;
            let verb = if options.dry_run { "would update" } else { "updated" };
            println!("{verb} {file} ({} block(s))", report.updated);
        }
        summary.add(report);
    }

    Ok(summary)
}

async fn convert_file<R>(
    file: &RelativePath,
    notes_root: &Path,
    resolver: Arc<R>,
    options: &ConvertOptions,
) -> Result<(ProcessReport, bool)>
where
    R: Resolve + 'static,
{
    let content = io::read_file(file, notes_root)?;
    let processor = BlockProcessor::new(SharedOutline::parse(&content), resolver)
        .with_limit(options.limit)
        .with_suppression_window(options.suppression_window);

    let changes = processor.store().changes()?;
    let report = processor.process_changes(&changes).await;

    let doc = processor.store().snapshot()?;
    if !doc.is_dirty() {
        return Ok((report, false));
    }
    if !options.dry_run {
        io::write_file(file, notes_root, &doc.text())?;
    }
    Ok((report, true))
}
