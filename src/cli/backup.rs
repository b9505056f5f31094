//! Backup CLI commands
//!
//! Implements CLI commands for deck backup management.

use clap::Subcommand;

use crate::backup::BackupManager;
use crate::config::paths::LeitnerPaths;
use crate::config::settings::Settings;
use crate::error::{LeitnerError, LeitnerResult};

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// List available backups, newest first
    List {
        /// Only show backups of this deck
        deck: Option<String>,

        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Restore a deck from a backup
    Restore {
        /// Backup filename (as shown by `backup list`)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &LeitnerPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> LeitnerResult<()> {
    let manager = BackupManager::new(paths, settings.backup_retention.clone());

    match cmd {
        BackupCommands::List { deck, verbose } => {
            let backups = manager.list_backups(deck.as_deref())?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Backups are taken automatically each time a deck is saved.");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            println!();

            for (i, backup) in backups.iter().enumerate() {
                let age = chrono::Utc::now().signed_duration_since(backup.created_at);

                if verbose {
                    println!(
                        "{}. {}\n   Deck: {}\n   Created: {}\n   Size: {}\n   Age: {}\n",
                        i + 1,
                        backup.filename,
                        backup.deck,
                        backup.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                        format_size(backup.size_bytes),
                        format_duration(age),
                    );
                } else {
                    println!(
                        "  {}. {} ({} ago, {})",
                        i + 1,
                        backup.filename,
                        format_duration(age),
                        format_size(backup.size_bytes),
                    );
                }
            }

            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Restore { backup, force } => {
            let filename = resolve_backup_filename(&manager, &backup)?;
            let info = manager
                .get_backup(&filename)
                .ok_or_else(|| LeitnerError::backup_not_found(&backup))?;

            println!("Backup Information");
            println!("==================");
            println!("File: {}", info.path.display());
            println!("Deck: {}", info.deck);
            println!(
                "Created: {}",
                info.created_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!();

            if !force {
                println!("WARNING: This will overwrite deck '{}'!", info.deck);
                println!("To proceed, run again with --force flag:");
                println!("  leitner backup restore {} --force", backup);
                return Ok(());
            }

            let restored = manager.restore(&filename, paths)?;
            log::info!("Restored {} from {}", restored.display(), info.filename);
            println!("Restore complete: {}", restored.display());
        }
    }

    Ok(())
}

/// Accept a backup filename with or without its extension
fn resolve_backup_filename(manager: &BackupManager, backup: &str) -> LeitnerResult<String> {
    if manager.get_backup(backup).is_some() {
        return Ok(backup.to_string());
    }

    let with_ext = format!("{}.json", backup);
    if manager.get_backup(&with_ext).is_some() {
        return Ok(with_ext);
    }

    Err(LeitnerError::backup_not_found(backup))
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }

    format!("{}mo", days / 30)
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(chrono::Duration::seconds(42)), "42s");
        assert_eq!(format_duration(chrono::Duration::minutes(5)), "5m");
        assert_eq!(format_duration(chrono::Duration::hours(3)), "3h");
        assert_eq!(format_duration(chrono::Duration::days(45)), "1mo");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
    }

    #[test]
    fn test_resolve_backup_filename() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LeitnerPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        fs::write(paths.backup_dir().join("spanish-20240101-120000-000.json"), "{}").unwrap();

        let manager = BackupManager::new(&paths, Default::default());
        assert_eq!(
            resolve_backup_filename(&manager, "spanish-20240101-120000-000").unwrap(),
            "spanish-20240101-120000-000.json"
        );
        assert!(resolve_backup_filename(&manager, "nope").unwrap_err().is_not_found());
    }
}
