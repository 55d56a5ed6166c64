//! CLI mode
//!
//! 不需要启动服务器的辅助命令。

use anyhow::{Context, Result, bail};
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::StaticConfig;
use crate::utils::password::hash_password;

/// `handline hash-password <password>`
pub fn run_hash_password(password: &str) -> Result<()> {
    if password.is_empty() {
        bail!("Password must not be empty");
    }
    let hash = hash_password(password).map_err(|e| anyhow::anyhow!("{}", e))?;
    println!("{}", hash);
    eprintln!(
        "{} Put this value in api.admin_password",
        "ℹ".bold().blue()
    );
    Ok(())
}

/// `handline config <action>`
pub fn run_config(action: &ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Generate { output_path, force } => {
            let sample = StaticConfig::generate_sample_config();
            let Some(path) = output_path else {
                println!("{}", sample);
                return Ok(());
            };

            if std::path::Path::new(path).exists() && !force {
                bail!("{} already exists, use --force to overwrite", path);
            }
            StaticConfig::default()
                .save_to_file(path)
                .with_context(|| format!("Failed to write {}", path))?;
            println!(
                "{} Example configuration written to {}",
                "✓".bold().green(),
                path.cyan()
            );
            Ok(())
        }
    }
}
