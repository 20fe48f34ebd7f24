use color_eyre::{eyre::eyre, Result};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::{channel, Sender};
use tokio::sync::oneshot;
use tracing::{debug, error, info};

use crate::config::AppConfig;

const DIALOG_FILTER_NAME: &str = "Arma Reforger Config";
const DIALOG_FILTER_EXTENSIONS: &[&str] = &["conf"];

macro_rules! handle_action {
    ($action:expr, $response_tx:expr) => {
        if $response_tx.send($action.await).is_err() {
            error!("Failed to send response");
        }
    };
}

/// Where a file operation reads from or writes to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileTarget {
    Path(PathBuf),
    /// Ask the user with a native dialog
    Dialog {
        suggested_name: String,
        start_dir: Option<PathBuf>,
    },
}

/// Result of an operation the user may abort in a dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileOutcome<T> {
    Done(T),
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportedFile {
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug)]
pub enum FileAction {
    Export {
        target: FileTarget,
        contents: String,
        response_tx: oneshot::Sender<Result<FileOutcome<PathBuf>>>,
    },
    Import {
        target: FileTarget,
        response_tx: oneshot::Sender<Result<FileOutcome<ImportedFile>>>,
    },
    SaveSettings {
        path: PathBuf,
        config: AppConfig,
        response_tx: oneshot::Sender<Result<()>>,
    },
}

/// Background task doing all file I/O for the UI thread. The task ends once
/// every sender is dropped.
pub struct PersistenceWorker {
    tx: Sender<FileAction>,
}

impl PersistenceWorker {
    /// Spawns the worker; must be called inside a tokio runtime.
    pub fn spawn() -> Self {
        let (tx, mut rx) = channel::<FileAction>(32);
        tokio::spawn(async move {
            while let Some(action) = rx.recv().await {
                match action {
                    FileAction::Export {
                        target,
                        contents,
                        response_tx,
                    } => {
                        handle_action!(export_to(target, contents), response_tx);
                    }
                    FileAction::Import {
                        target,
                        response_tx,
                    } => {
                        handle_action!(import_from(target), response_tx);
                    }
                    FileAction::SaveSettings {
                        path,
                        config,
                        response_tx,
                    } => {
                        handle_action!(config.save(&path), response_tx);
                    }
                }
            }
            debug!("File worker stopped");
        });

        Self { tx }
    }

    pub fn get_sender(&self) -> Sender<FileAction> {
        self.tx.clone()
    }
}

async fn export_to(target: FileTarget, contents: String) -> Result<FileOutcome<PathBuf>> {
    let path = match target {
        FileTarget::Path(path) => path,
        FileTarget::Dialog {
            suggested_name,
            start_dir,
        } => {
            let mut dialog = rfd::AsyncFileDialog::new()
                .add_filter(DIALOG_FILTER_NAME, DIALOG_FILTER_EXTENSIONS)
                .set_title("Save Config")
                .set_file_name(suggested_name);
            if let Some(dir) = start_dir {
                dialog = dialog.set_directory(dir);
            }
            match dialog.save_file().await {
                Some(handle) => handle.path().to_path_buf(),
                None => {
                    debug!("Export cancelled");
                    return Ok(FileOutcome::Cancelled);
                }
            }
        }
    };

    write_config(&path, &contents).await?;
    info!("Config exported to {}", path.display());
    Ok(FileOutcome::Done(path))
}

async fn import_from(target: FileTarget) -> Result<FileOutcome<ImportedFile>> {
    let path = match target {
        FileTarget::Path(path) => path,
        FileTarget::Dialog { start_dir, .. } => {
            let mut dialog = rfd::AsyncFileDialog::new()
                .add_filter(DIALOG_FILTER_NAME, DIALOG_FILTER_EXTENSIONS)
                .set_title("Load Config");
            if let Some(dir) = start_dir {
                dialog = dialog.set_directory(dir);
            }
            match dialog.pick_file().await {
                Some(handle) => handle.path().to_path_buf(),
                None => {
                    debug!("Import cancelled");
                    return Ok(FileOutcome::Cancelled);
                }
            }
        }
    };

    let contents = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;
    info!("Config read from {}", path.display());
    Ok(FileOutcome::Done(ImportedFile { path, contents }))
}

async fn write_config(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| eyre!("Failed to create export directory: {}", e))?;
    }
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| eyre!("Failed to write config file {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn export_then_import_through_worker() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("stick.conf");
        let worker = PersistenceWorker::spawn();
        let sender = worker.get_sender();

        let (tx, rx) = oneshot::channel();
        sender
            .send(FileAction::Export {
                target: FileTarget::Path(path.clone()),
                contents: "ActionManager {\n}\n".to_string(),
                response_tx: tx,
            })
            .await
            .unwrap();
        assert_eq!(rx.await.unwrap().unwrap(), FileOutcome::Done(path.clone()));

        let (tx, rx) = oneshot::channel();
        sender
            .send(FileAction::Import {
                target: FileTarget::Path(path.clone()),
                response_tx: tx,
            })
            .await
            .unwrap();
        assert_eq!(
            rx.await.unwrap().unwrap(),
            FileOutcome::Done(ImportedFile {
                path,
                contents: "ActionManager {\n}\n".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn missing_import_file_is_an_error() {
        let dir = tempdir().unwrap();
        let worker = PersistenceWorker::spawn();

        let (tx, rx) = oneshot::channel();
        worker
            .get_sender()
            .send(FileAction::Import {
                target: FileTarget::Path(dir.path().join("nope.conf")),
                response_tx: tx,
            })
            .await
            .unwrap();
        assert!(rx.await.unwrap().is_err());
    }

    #[tokio::test]
    async fn settings_are_saved_by_worker() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let worker = PersistenceWorker::spawn();
        let config = AppConfig {
            hat_mode: true,
            ..AppConfig::default()
        };

        let (tx, rx) = oneshot::channel();
        worker
            .get_sender()
            .send(FileAction::SaveSettings {
                path: path.clone(),
                config: config.clone(),
                response_tx: tx,
            })
            .await
            .unwrap();
        rx.await.unwrap().unwrap();
        assert_eq!(AppConfig::load(&path).await.unwrap(), config);
    }
}
