//! Services module - the moving parts behind a patch session.
//!
//! These services carry no UI code and receive everything they touch as
//! explicit parameters, so they can be driven by the console front end or by
//! tests with mocked collaborators.
//!
//! # Components
//!
//! - [`selector`]: asks a [`FilePicker`] for files, merges them into the work
//!   list and logs what was just selected.
//! - [`processor`]: runs a [`Patcher`] over every pending file in order,
//!   logging each attempt and any failure, then empties the work list.
//! - [`patcher`]: the [`Patcher`] seam and [`ExternalPatcher`], which runs a
//!   configured patch tool once per file.
//! - [`picker`]: the [`FilePicker`] seam, with a native dialog
//!   ([`DialogPicker`]) and a fixed path list ([`PathListPicker`]).
//! - [`text`]: decoding of the patch tool's diagnostic output.

pub mod patcher;
pub mod picker;
pub mod processor;
pub mod selector;
pub mod text;

pub use patcher::{ExternalPatcher, PatchError, Patcher, PatcherConfigError};
pub use picker::{DialogPicker, FilePicker, PathListPicker, Selection};
pub use processor::run_batch;
pub use selector::select_files;
pub use text::NativeText;
