//! # Persistence Module
//!
//! All file access of the application goes through one background task, the
//! [`PersistenceWorker`]. The UI sends a [`FileAction`] with a `oneshot`
//! sender and polls the reply on later frames, so a slow disk or an open
//! file dialog never stalls input sampling.
//!
//! ## Error Handling
//! Worker replies are `color_eyre::Result`s with context on what failed. A
//! dialog the user closed is not an error but [`FileOutcome::Cancelled`].
//!
//! [`export_name`] holds the naming rules for exported configs.

pub mod export_name;
pub mod persistence_worker;

pub use export_name::{default_export_name, ensure_conf_extension, export_file_name};
pub use persistence_worker::{FileAction, FileOutcome, FileTarget, ImportedFile, PersistenceWorker};
