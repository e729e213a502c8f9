use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An unread notification as returned by the host platform.
///
/// The core only ever reads these and asks the host to mark them as read; it
/// never creates or deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NotificationRecord {
    /// Opaque record identifier.
    #[serde(rename = "name")]
    pub id: String,
    #[serde(default)]
    pub subject: Option<String>,
    /// Type of the document the notification points at.
    #[serde(default)]
    pub document_type: Option<String>,
    /// Identifier of the document the notification points at.
    #[serde(default)]
    pub document_name: Option<String>,
    #[serde(with = "timestamp")]
    pub creation: NaiveDateTime,
}

/// A document inside the host application, addressable by type and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentTarget {
    pub document_type: String,
    pub document_name: String,
}

impl DocumentTarget {
    pub fn new(document_type: impl Into<String>, document_name: impl Into<String>) -> Self {
        Self {
            document_type: document_type.into(),
            document_name: document_name.into(),
        }
    }

    /// Builds a target only when both parts are present and non-empty.
    pub fn from_parts(document_type: Option<&str>, document_name: Option<&str>) -> Option<Self> {
        let document_type = document_type.filter(|value| !value.is_empty())?;
        let document_name = document_name.filter(|value| !value.is_empty())?;
        Some(Self::new(document_type, document_name))
    }

    /// Route slug of the document type: lowercase with spaces turned into hyphens.
    pub fn slug(&self) -> String {
        self.document_type.to_lowercase().replace(' ', "-")
    }

    /// Location path used when in-app routing is unavailable.
    pub fn url_path(&self) -> String {
        format!(
            "/app/{}/{}",
            self.slug(),
            urlencoding::encode(&self.document_name)
        )
    }
}

/// Result payload of the mark-as-read remote call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MarkReadResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl MarkReadResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
            message: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Serde adapter for the host's `YYYY-MM-DD HH:MM:SS[.ffffff]` timestamps.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

    pub fn parse(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(raw.trim(), FORMAT)
    }

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }
}
