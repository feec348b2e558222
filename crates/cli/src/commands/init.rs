//! Init command handler.

use clap::Args;
use seam_core::{config::AppConfig, AppError, AppResult};
use seam_split::config::{get_config_path, save_config};
use seam_split::SplitConfig;

/// Write the default splitter configuration
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Overwrite an existing splitter.yaml
    #[arg(short, long)]
    pub force: bool,
}

impl InitCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing init command");

        let path = get_config_path(&config.workspace);
        if path.exists() && !self.force {
            return Err(AppError::Config(format!(
                "{:?} already exists (use --force to overwrite)",
                path
            )));
        }

        config.ensure_seam_dir()?;
        save_config(&config.workspace, &SplitConfig::default())?;

        println!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seam_split::config::load_config;
    use tempfile::TempDir;

    fn app_config(workspace: &std::path::Path) -> AppConfig {
        AppConfig {
            workspace: workspace.to_path_buf(),
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_init_writes_defaults_once() {
        let temp = TempDir::new().unwrap();
        let config = app_config(temp.path());

        InitCommand { force: false }.execute(&config).await.unwrap();
        assert_eq!(load_config(temp.path()).unwrap(), SplitConfig::default());

        let again = InitCommand { force: false }.execute(&config).await;
        assert!(matches!(again, Err(AppError::Config(_))));

        InitCommand { force: true }.execute(&config).await.unwrap();
    }
}
