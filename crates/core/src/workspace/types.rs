//! Types for the workspace module.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// The kind of a launchable item.
///
/// Stored as the `type` tag (`app`, `browser`, `folder`). An unknown tag is
/// rejected while parsing, so a constructed item always has a known kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ItemKind {
    /// A desktop application, optionally opened with a companion folder.
    App,
    /// One or more URLs opened in the default browser.
    Browser,
    /// A folder opened in the file manager.
    Folder,
}

impl ItemKind {
    /// Tag used in the workspace file.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::App => "app",
            ItemKind::Browser => "browser",
            ItemKind::Folder => "folder",
        }
    }

    /// Capitalized label used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::App => "App",
            ItemKind::Browser => "Browser",
            ItemKind::Folder => "Folder",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "app" => Ok(ItemKind::App),
            "browser" => Ok(ItemKind::Browser),
            "folder" => Ok(ItemKind::Folder),
            other => Err(ValidationError::UnknownKind(other.to_string())),
        }
    }
}

impl TryFrom<String> for ItemKind {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ItemKind> for String {
    fn from(kind: ItemKind) -> Self {
        kind.as_str().to_string()
    }
}

/// One launchable unit of a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceItem {
    /// Item kind.
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Display name, unique within a workspace.
    pub name: String,
    /// Optional grouping label shown by the UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Application or folder path (required for `app` and `folder`).
    #[serde(rename = "path", default, skip_serializing_if = "Option::is_none")]
    pub target_path: Option<String>,
    /// URLs to open, in order (required for `browser`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
    /// Folder handed to an application as its launch argument.
    #[serde(rename = "folder", default, skip_serializing_if = "Option::is_none")]
    pub companion_folder: Option<String>,
    /// Delay in seconds applied before this item during a workspace launch.
    #[serde(rename = "waitTime", default, skip_serializing_if = "Option::is_none")]
    pub wait_secs: Option<f64>,
    /// Name of the item this one is meant to start after.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<String>,
}

impl WorkspaceItem {
    fn new(kind: ItemKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            category: None,
            target_path: None,
            urls: Vec::new(),
            companion_folder: None,
            wait_secs: None,
            depends_on: None,
        }
    }

    /// Creates an application item.
    pub fn app(name: impl Into<String>, path: impl Into<String>) -> Self {
        let mut item = Self::new(ItemKind::App, name);
        item.target_path = Some(path.into());
        item
    }

    /// Creates a browser item opening the given URLs.
    pub fn browser<I, S>(name: impl Into<String>, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut item = Self::new(ItemKind::Browser, name);
        item.urls = urls.into_iter().map(Into::into).collect();
        item
    }

    /// Creates a folder item.
    pub fn folder(name: impl Into<String>, path: impl Into<String>) -> Self {
        let mut item = Self::new(ItemKind::Folder, name);
        item.target_path = Some(path.into());
        item
    }

    /// Sets the companion folder.
    pub fn with_companion_folder(mut self, folder: impl Into<String>) -> Self {
        self.companion_folder = Some(folder.into());
        self
    }

    /// Sets the startup delay.
    pub fn with_wait_secs(mut self, secs: f64) -> Self {
        self.wait_secs = Some(secs);
        self
    }

    /// Sets the dependency name.
    pub fn with_depends_on(mut self, name: impl Into<String>) -> Self {
        self.depends_on = Some(name.into());
        self
    }

    /// Sets the category label.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Target path, if present and non-empty.
    pub fn target_path(&self) -> Option<&str> {
        non_empty(self.target_path.as_deref())
    }

    /// Companion folder, if present and non-empty.
    pub fn companion_folder(&self) -> Option<&str> {
        non_empty(self.companion_folder.as_deref())
    }

    /// Dependency name, if present and non-empty.
    pub fn depends_on(&self) -> Option<&str> {
        non_empty(self.depends_on.as_deref())
    }

    /// Startup delay as a duration. `None` unless the wait is finite and positive.
    pub fn wait_duration(&self) -> Option<Duration> {
        match self.wait_secs {
            // Values too large for a Duration saturate; callers clamp to their ceiling.
            Some(secs) if secs.is_finite() && secs > 0.0 => {
                Some(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
            }
            _ => None,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A named subset of a workspace's items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspacePreset {
    /// Preset name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Names of the items included in this preset.
    #[serde(default)]
    pub item_names: Vec<String>,
}

/// A named, ordered collection of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    /// UUID (v4).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Items in launch order.
    #[serde(default)]
    pub items: Vec<WorkspaceItem>,
    /// Named item subsets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub presets: Vec<WorkspacePreset>,
    /// Free-form tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Workspace {
    /// Creates an empty workspace with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            items: Vec::new(),
            presets: Vec::new(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Appends an item.
    pub fn with_item(mut self, item: WorkspaceItem) -> Self {
        self.items.push(item);
        self
    }

    /// Appends a preset.
    pub fn with_preset(mut self, preset: WorkspacePreset) -> Self {
        self.presets.push(preset);
        self
    }

    /// Finds an item by name.
    pub fn item(&self, name: &str) -> Option<&WorkspaceItem> {
        self.items.iter().find(|i| i.name == name)
    }

    /// Finds a preset by name.
    pub fn preset(&self, name: &str) -> Option<&WorkspacePreset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Items selected by a preset, in workspace order.
    ///
    /// Returns `None` when the preset does not exist. Preset entries naming
    /// items that no longer exist are ignored.
    pub fn preset_items(&self, preset_name: &str) -> Option<Vec<WorkspaceItem>> {
        let preset = self.preset(preset_name)?;
        let wanted: HashSet<&str> = preset.item_names.iter().map(String::as_str).collect();
        Some(
            self.items
                .iter()
                .filter(|item| wanted.contains(item.name.as_str()))
                .cloned()
                .collect(),
        )
    }

    /// Checks the invariants the launcher relies on.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if uuid::Uuid::parse_str(&self.id).is_err() {
            return Err(ValidationError::InvalidWorkspaceId(self.id.clone()));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyWorkspaceName);
        }

        let mut seen = HashSet::new();
        for item in &self.items {
            if item.name.trim().is_empty() {
                return Err(ValidationError::EmptyItemName);
            }
            if !seen.insert(item.name.as_str()) {
                return Err(ValidationError::DuplicateItemName(item.name.clone()));
            }
            if let Some(value) = item.wait_secs {
                if !value.is_finite() || value < 0.0 {
                    return Err(ValidationError::InvalidWaitTime {
                        item: item.name.clone(),
                        value,
                    });
                }
            }
        }

        for preset in &self.presets {
            if let Some(missing) = preset
                .item_names
                .iter()
                .find(|name| !seen.contains(name.as_str()))
            {
                return Err(ValidationError::UnknownPresetItem {
                    preset: preset.name.clone(),
                    item: missing.clone(),
                });
            }
        }

        Ok(())
    }
}
