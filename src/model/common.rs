use uuid::Uuid;

pub type Id = String;

/// Marker the remote store understands as "assign a fresh document id".
pub const UNIQUE_ID: &str = "unique()";

pub fn generate_id() -> Id {
    Uuid::new_v4().simple().to_string()
}

/// Resolve a requested document id, generating one when the caller asked for `unique()`
pub fn resolve_document_id(requested: &str) -> Id {
    if requested == UNIQUE_ID {
        generate_id()
    } else {
        requested.to_string()
    }
}

/// Implemented by every seed record that is addressed by a human-readable name
pub trait Named {
    /// Label used in logs and error messages ("category", "customization", ...)
    const KIND: &'static str;

    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_marker_generates_fresh_ids() {
        let first = resolve_document_id(UNIQUE_ID);
        let second = resolve_document_id(UNIQUE_ID);
        assert_ne!(first, second);
        assert_eq!(first.len(), 32);
        assert_eq!(resolve_document_id("pizza"), "pizza");
    }
}
