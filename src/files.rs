use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An action file as served by the code-editor files endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionFile {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, rename = "type")]
    pub file_type: Option<String>,
    #[serde(default)]
    pub bot_id: Option<String>,
}

impl ActionFile {
    pub fn new(location: &str) -> Self {
        let name = location
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or_default()
            .to_string();

        ActionFile {
            name,
            location: location.to_string(),
            content: String::new(),
            file_type: Some("action".to_string()),
            bot_id: None,
        }
    }

    /// Non-empty path segments of `location`.
    pub fn segments(&self) -> Vec<&str> {
        self.location
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect()
    }
}

/// The two groups the navigator shows. Either may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCollections {
    #[serde(default)]
    pub actions_bot: Option<Vec<ActionFile>>,
    #[serde(default)]
    pub actions_global: Option<Vec<ActionFile>>,
}

/// Shared handle to a [`FileCollections`] value.
///
/// Two handles are equal only when they point at the same allocation, so a
/// freshly fetched listing always counts as a change even if its contents
/// match the previous one.
#[derive(Debug, Clone)]
pub struct FilesHandle(Arc<FileCollections>);

impl FilesHandle {
    pub fn new(files: FileCollections) -> Self {
        FilesHandle(Arc::new(files))
    }

    pub fn same_as(&self, other: &FilesHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for FilesHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl std::ops::Deref for FilesHandle {
    type Target = FileCollections;

    fn deref(&self) -> &FileCollections {
        &self.0
    }
}
