//! Split command handler.
//!
//! Splits files (or a directory of page files) with one shared splitter.
//! Documents are split concurrently on the blocking pool; output keeps the
//! order the inputs were given in.

use clap::Args;
use futures::future::try_join_all;
use seam_core::{config::AppConfig, AppError, AppResult};
use seam_split::config::load_config;
use seam_split::{ChunkRecord, Document, PlaceholderMode, RecursiveSplitter, SplitConfig};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

/// Split one or more documents into chunks
#[derive(Args, Debug)]
pub struct SplitCommand {
    /// Text files to split, each as a single document
    pub files: Vec<PathBuf>,

    /// Directory whose files (sorted by name) are the pages of one document
    #[arg(long)]
    pub pages_dir: Option<PathBuf>,

    /// Target chunk size in characters
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Characters borrowed from each neighbouring chunk (negative values are clamped)
    #[arg(long, allow_hyphen_values = true)]
    pub overlap: Option<i64>,

    /// Separator, coarsest first; repeat to build the cascade (accepts \n, \t, \r)
    #[arg(long = "separator")]
    pub separators: Vec<String>,

    /// Replace separators with same-length filler instead of markers
    #[arg(long)]
    pub length_preserving: bool,

    /// Emit per-fragment trace events
    #[arg(long)]
    pub trace: bool,

    /// JSON object of per-chunk metadata lists (single document only)
    #[arg(long)]
    pub metadata: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One input document and where it came from.
#[derive(Debug)]
struct Input {
    source: String,
    document: Document,
}

/// Split result for one input, as printed.
#[derive(Debug, Serialize)]
struct DocumentReport {
    source: String,
    chunks: Vec<ChunkRecord>,
}

impl SplitCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing split command");
        tracing::debug!("Split options: {:?}", self);

        let split_config = self.resolve_config(load_config(&config.workspace)?);
        let splitter = Arc::new(RecursiveSplitter::new(split_config)?);

        let inputs = self.read_inputs().await?;
        let metadata = self.read_metadata(inputs.len()).await?;

        let sources: Vec<String> = inputs.iter().map(|i| i.source.clone()).collect();
        let tasks = inputs.into_iter().map(|input| {
            let splitter = Arc::clone(&splitter);
            tokio::task::spawn_blocking(move || splitter.split(input.document))
        });
        let outputs = try_join_all(tasks)
            .await
            .map_err(|e| AppError::Other(format!("Split task failed: {}", e)))?;

        let mut reports = Vec::with_capacity(outputs.len());
        for (source, output) in sources.into_iter().zip(outputs) {
            let chunks = match &metadata {
                Some(metadata) => output.create_documents(metadata)?,
                None => output.to_documents(),
            };
            reports.push(DocumentReport { source, chunks });
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        } else {
            print_reports(&reports);
        }

        Ok(())
    }

    /// Apply command-line flags over the workspace splitter config.
    fn resolve_config(&self, mut config: SplitConfig) -> SplitConfig {
        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }
        if let Some(overlap) = self.overlap {
            config.overlap = overlap.unsigned_abs() as usize;
        }
        if !self.separators.is_empty() {
            config.separators = self.separators.iter().map(|s| unescape(s)).collect();
        }
        if self.length_preserving {
            config.mode = PlaceholderMode::PreserveLength;
        }
        if self.trace {
            config.trace = true;
        }
        config
    }

    async fn read_inputs(&self) -> AppResult<Vec<Input>> {
        let mut inputs = Vec::new();

        for path in &self.files {
            let text = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| AppError::Other(format!("Failed to read {:?}: {}", path, e)))?;
            inputs.push(Input {
                source: path.display().to_string(),
                document: Document::Text(text),
            });
        }

        if let Some(dir) = &self.pages_dir {
            let pages = read_pages(dir)?;
            tracing::debug!("Read {} pages from {:?}", pages.len(), dir);
            inputs.push(Input {
                source: dir.display().to_string(),
                document: Document::Pages(pages),
            });
        }

        if inputs.is_empty() {
            return Err(AppError::Config(
                "Nothing to split: pass files or --pages-dir".to_string(),
            ));
        }

        Ok(inputs)
    }

    async fn read_metadata(
        &self,
        document_count: usize,
    ) -> AppResult<Option<BTreeMap<String, Vec<serde_json::Value>>>> {
        let Some(path) = &self.metadata else {
            return Ok(None);
        };

        if document_count != 1 {
            return Err(AppError::Config(format!(
                "--metadata applies to a single document, got {}",
                document_count
            )));
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Other(format!("Failed to read {:?}: {}", path, e)))?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}

/// Read every regular file directly under `dir`, sorted by file name.
fn read_pages(dir: &Path) -> AppResult<Vec<String>> {
    let mut pages = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let text = std::fs::read_to_string(entry.path()).map_err(|e| {
            AppError::Other(format!("Failed to read page {:?}: {}", entry.path(), e))
        })?;
        pages.push(text);
    }

    if pages.is_empty() {
        return Err(AppError::Config(format!("No page files found in {:?}", dir)));
    }

    Ok(pages)
}

/// Expand `\n`, `\t`, `\r` and `\\` in a separator given on the command line.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

fn print_reports(reports: &[DocumentReport]) {
    for report in reports {
        let oversize = report.chunks.iter().filter(|c| c.oversize).count();
        println!(
            "{}: {} chunks ({} oversize)",
            report.source,
            report.chunks.len(),
            oversize
        );

        for (i, chunk) in report.chunks.iter().enumerate() {
            let flag = if chunk.oversize { " oversize" } else { "" };
            if chunk.page_numbers.is_empty() {
                println!("--- chunk {} [{} chars{}]", i, chunk.text.chars().count(), flag);
            } else {
                println!(
                    "--- chunk {} [{} chars, pages {:?}{}]",
                    i,
                    chunk.text.chars().count(),
                    chunk.page_numbers,
                    flag
                );
            }
            println!("{}", chunk.text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn command() -> SplitCommand {
        SplitCommand {
            files: Vec::new(),
            pages_dir: None,
            chunk_size: None,
            overlap: None,
            separators: Vec::new(),
            length_preserving: false,
            trace: false,
            metadata: None,
            json: false,
        }
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("\\n\\n"), "\n\n");
        assert_eq!(unescape("\\t|\\r"), "\t|\r");
        assert_eq!(unescape("a\\\\b"), "a\\b");
        assert_eq!(unescape("\\x"), "\\x");
        assert_eq!(unescape("trailing\\"), "trailing\\");
        assert_eq!(unescape(". "), ". ");
    }

    #[test]
    fn test_flags_override_workspace_config() {
        let mut cmd = command();
        cmd.chunk_size = Some(200);
        cmd.overlap = Some(-5);
        cmd.separators = vec!["\\n".to_string(), " ".to_string()];
        cmd.length_preserving = true;

        let config = cmd.resolve_config(SplitConfig::default());

        assert_eq!(config.chunk_size, 200);
        assert_eq!(config.overlap, 5);
        assert_eq!(config.separators, vec!["\n", " "]);
        assert_eq!(config.mode, PlaceholderMode::PreserveLength);
    }

    #[test]
    fn test_no_flags_keeps_workspace_config() {
        let base = SplitConfig::builder().chunk_size(42).overlap(3).build();
        assert_eq!(command().resolve_config(base.clone()), base);
    }

    #[test]
    fn test_read_pages_sorted_by_name() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("02.txt"), "second").unwrap();
        fs::write(temp.path().join("01.txt"), "first").unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("nested").join("00.txt"), "ignored").unwrap();

        let pages = read_pages(temp.path()).unwrap();
        assert_eq!(pages, vec!["first", "second"]);
    }

    #[test]
    fn test_read_pages_empty_dir() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(read_pages(temp.path()), Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_metadata_requires_single_document() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("meta.json");
        fs::write(&path, r#"{"source": ["a.txt"]}"#).unwrap();

        let mut cmd = command();
        cmd.metadata = Some(path);

        assert!(cmd.read_metadata(2).await.is_err());
        let metadata = cmd.read_metadata(1).await.unwrap().unwrap();
        assert_eq!(metadata["source"], vec![serde_json::json!("a.txt")]);
    }

    #[tokio::test]
    async fn test_execute_splits_files_and_pages() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("doc.txt");
        fs::write(&file, "one two three four").unwrap();
        let pages = temp.path().join("pages");
        fs::create_dir(&pages).unwrap();
        fs::write(pages.join("1.txt"), "Page one text. ").unwrap();
        fs::write(pages.join("2.txt"), "Page two text.").unwrap();

        let mut cmd = command();
        cmd.files = vec![file];
        cmd.pages_dir = Some(pages);
        cmd.chunk_size = Some(8);
        cmd.json = true;

        let config = AppConfig {
            workspace: temp.path().to_path_buf(),
            ..AppConfig::default()
        };
        cmd.execute(&config).await.unwrap();
    }

    #[tokio::test]
    async fn test_execute_without_inputs_fails() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig {
            workspace: temp.path().to_path_buf(),
            ..AppConfig::default()
        };
        assert!(command().execute(&config).await.is_err());
    }
}
