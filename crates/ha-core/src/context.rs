//! Origin tracking for state writes and service calls

use std::fmt;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Identifies the action a state write or service call belongs to
///
/// Actions triggered by another one carry a [`Context::child`] of its
/// context, which links them back through `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl Context {
    pub fn new() -> Self {
        Self {
            id: Ulid::new().to_string(),
            parent_id: None,
        }
    }

    pub fn child(&self) -> Self {
        Self {
            parent_id: Some(self.id.clone()),
            ..Self::new()
        }
    }

    pub fn is_child_of(&self, parent: &Context) -> bool {
        self.parent_id.as_deref() == Some(parent.id.as_str())
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_links_parent() {
        let parent = Context::new();
        let child = parent.child();

        assert_ne!(child.id, parent.id);
        assert!(child.is_child_of(&parent));
        assert!(!parent.is_child_of(&child));
    }

    #[test]
    fn test_root_context_omits_parent() {
        let json = serde_json::to_value(Context::new()).unwrap();
        assert!(json.get("parent_id").is_none());

        let parsed: Context =
            serde_json::from_str(r#"{"id": "01J0000000000000000000000"}"#).unwrap();
        assert_eq!(parsed.parent_id, None);
    }
}
