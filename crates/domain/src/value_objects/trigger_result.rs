//! Outcome of a trigger phase or a full trigger execution

use serde::{Deserialize, Serialize};

/// Result reported by each trigger phase and by the trigger as a whole.
///
/// Failures carry a human-readable `message` that is shown to users as-is,
/// so its text is part of the contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl TriggerResult {
    /// A successful outcome with no payload.
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
            data: None,
        }
    }

    /// A successful outcome carrying outcome details.
    pub fn success_with(data: serde_json::Value) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// A failed outcome. A message is mandatory for failures.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_always_has_message() {
        let result = TriggerResult::failure("Recompensa demasiado alta");
        assert!(!result.is_success());
        assert_eq!(result.message(), Some("Recompensa demasiado alta"));
        assert!(result.data.is_none());
    }

    #[test]
    fn serializes_in_camel_case_without_empty_fields() {
        let json = serde_json::to_value(TriggerResult::success()).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true }));
    }
}
