use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Placeholder replaced by the target path in `Patch Tool Args`.
pub const FILE_PLACEHOLDER: &str = "{file}";

/// User configuration from PEFix Config.yaml
///
/// Contains the patch tool setup and file dialog preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(rename = "PEFix_Settings")]
    pub settings: PefixSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PefixSettings {
    #[serde(rename = "Patch Tool", default)]
    pub patch_tool: String,

    #[serde(rename = "Patch Tool Args", default = "default_patch_tool_args")]
    pub patch_tool_args: Vec<String>,

    #[serde(rename = "Message Encoding", default = "default_message_encoding")]
    pub message_encoding: String,

    #[serde(rename = "Dialog Title", default = "default_dialog_title")]
    pub dialog_title: String,

    #[serde(rename = "Dialog Filters", default = "default_dialog_filters")]
    pub dialog_filters: IndexMap<String, Vec<String>>,

    #[serde(rename = "Start Directory", default)]
    pub start_directory: String,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,
}

impl Default for PefixSettings {
    fn default() -> Self {
        Self {
            patch_tool: String::new(),
            patch_tool_args: default_patch_tool_args(),
            message_encoding: default_message_encoding(),
            dialog_title: default_dialog_title(),
            dialog_filters: default_dialog_filters(),
            start_directory: String::new(),
            debug_mode: false,
        }
    }
}

impl PefixSettings {
    pub fn is_patch_tool_configured(&self) -> bool {
        !self.patch_tool.trim().is_empty()
    }
}

fn default_patch_tool_args() -> Vec<String> {
    vec![FILE_PLACEHOLDER.to_string()]
}

fn default_message_encoding() -> String {
    "utf-8".to_string()
}

fn default_dialog_title() -> String {
    "Select executables".to_string()
}

fn default_dialog_filters() -> IndexMap<String, Vec<String>> {
    let mut filters = IndexMap::new();
    filters.insert(
        "Executables".to_string(),
        ["exe", "dll", "sys", "ocx", "scr", "cpl"]
            .iter()
            .map(|ext| ext.to_string())
            .collect(),
    );
    filters
}
