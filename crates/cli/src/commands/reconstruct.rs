//! Reconstruct command handler.
//!
//! Decodes placeholder markers in encoded chunk text back into the
//! separators they stand for.

use clap::Args;
use seam_core::{config::AppConfig, AppError, AppResult};
use seam_split::config::load_config;
use seam_split::RecursiveSplitter;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

/// Decode placeholder markers back into source text
#[derive(Args, Debug)]
pub struct ReconstructCommand {
    /// Encoded text file (reads stdin when omitted)
    pub file: Option<PathBuf>,
}

impl ReconstructCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing reconstruct command");
        tracing::debug!("Reconstruct options: {:?}", self);

        let splitter = RecursiveSplitter::new(load_config(&config.workspace)?)?;
        let encoded = self.read_input().await?;

        print!("{}", splitter.reconstruct(&encoded));
        Ok(())
    }

    async fn read_input(&self) -> AppResult<String> {
        match &self.file {
            Some(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| AppError::Other(format!("Failed to read {:?}: {}", path, e))),
            None => {
                let mut buffer = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut buffer)
                    .await
                    .map_err(|e| AppError::Other(format!("Failed to read stdin: {}", e)))?;
                Ok(buffer)
            }
        }
    }
}
