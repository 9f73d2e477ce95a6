use serde::{Deserialize, Serialize};
use std::fmt;

/// A milestone in the run's history, stamped with the character's age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub age: u32,
    pub event: String,
    pub details: String,
}

impl HistoryEntry {
    pub fn new(age: u32, event: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            age,
            event: event.into(),
            details: details.into(),
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}岁 [{}] {}", self.age, self.event, self.details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let entry = HistoryEntry::new(23, "境界突破", "从淬体境突破到炼气境");
        assert_eq!(entry.to_string(), "23岁 [境界突破] 从淬体境突破到炼气境");
    }

    #[test]
    fn test_entry_without_age_decodes() {
        let json = r#"{"timestamp": 1700000000000, "event": "境界突破", "details": "从淬体境突破到炼气境"}"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.age, 0);
        assert_eq!(entry.event, "境界突破");
    }
}
