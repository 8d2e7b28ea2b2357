use serde::{Deserialize, Serialize};
use std::fmt;

/// Image format a template renders to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileExtension {
    Jpg,
    Gif,
}

impl FileExtension {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileExtension::Jpg => "jpg",
            FileExtension::Gif => "gif",
        }
    }

    pub fn parse(ext: &str) -> Option<Self> {
        match ext {
            "jpg" => Some(FileExtension::Jpg),
            "gif" => Some(FileExtension::Gif),
            _ => None,
        }
    }

    /// Content type the renderer serves for this extension.
    pub fn content_type(&self) -> String {
        mime_guess::from_ext(self.as_str())
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string()
    }
}

impl fmt::Display for FileExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the catalog service's template listing.
/// Only the fields the bot reads are declared; the rest are ignored.
#[derive(Deserialize, Debug, Clone)]
pub struct CatalogRecord {
    pub id: String,
    pub name: String,
    pub lines: u32,
    #[serde(default)]
    pub styles: Vec<String>,
}

/// A two-line meme template offered in the form.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: String,
    pub display_name: String,
    pub file_extension: FileExtension,
    pub selector_value: String,
}

impl Template {
    pub fn new(id: String, display_name: String, file_extension: FileExtension) -> Self {
        let selector_value = format!("{}.{}", id, file_extension);
        Self {
            id,
            display_name,
            file_extension,
            selector_value,
        }
    }
}

/// The values of one submitted form, consumed right away by validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemeRequest {
    pub selected_template: String,
    pub top_text: String,
    pub bottom_text: String,
}

/// The rendered image URL handed back to the transport.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReference {
    pub url: String,
    pub file_extension: FileExtension,
    pub content_type: String,
}
