use crate::model::Id;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A document as returned by the collection store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "$id")]
    pub id: Id,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentList {
    pub total: u64,
    pub documents: Vec<Document>,
}

/// An object held in the blob store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFile {
    #[serde(rename = "$id")]
    pub id: Id,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileList {
    pub total: u64,
    pub files: Vec<StoredFile>,
}
