//! Data models for PEFix.
//!
//! - [`FilePath`]: a queued file, compared and ordered by its path text
//! - [`WorkList`]: the sorted, deduplicated set of files waiting for a batch
//! - [`UserConfig`]: patch tool and dialog settings loaded from `PEFix Config.yaml`

pub mod config;
pub mod file_path;
pub mod work_list;

pub use config::{FILE_PLACEHOLDER, PefixSettings, UserConfig};
pub use file_path::FilePath;
pub use work_list::WorkList;
