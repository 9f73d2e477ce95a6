//! Save document encoding and defensive decoding.
//!
//! Required sections (`character`, `resources`, `quests`) must be present
//! and well-formed or the whole import is rejected. Optional sections fall
//! back to their defaults when missing or malformed. A character whose
//! `maxHp` is zero is rejected as malformed.

use crate::character::history::HistoryEntry;
use crate::character::types::Character;
use crate::core::constants::EXPORT_FILE_PREFIX;
use crate::core::error::GameError;
use crate::core::game_state::GameState;
use crate::core::stats::GameStats;
use crate::economy::resources::Resources;
use crate::items::equipment::EquipmentSlots;
use crate::items::types::EquipmentItem;
use crate::quests::types::Quest;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const REQUIRED_SECTIONS: [&str; 3] = ["character", "resources", "quests"];

/// The persisted shape of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDocument {
    pub character: Character,
    pub resources: Resources,
    #[serde(default, alias = "equipment")]
    pub equipment_slots: EquipmentSlots,
    #[serde(default)]
    pub inventory: Vec<EquipmentItem>,
    pub quests: Vec<Quest>,
    #[serde(default)]
    pub stats: GameStats,
    #[serde(default, rename = "gameHistory", alias = "history")]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub auto_play: bool,
    /// Informational only; never checked on import.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_time: Option<String>,
}

impl SaveDocument {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            character: state.character.clone(),
            resources: state.resources.clone(),
            equipment_slots: state.equipment.clone(),
            inventory: state.inventory.clone(),
            quests: state.quests.clone(),
            stats: state.stats.clone(),
            history: state.history.clone(),
            auto_play: state.auto_play,
            export_time: None,
        }
    }

    /// Document for a user-facing export, stamped with `at`.
    pub fn for_export(state: &GameState, at: DateTime<Utc>) -> Self {
        Self {
            export_time: Some(at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            ..Self::from_state(state)
        }
    }

    /// Rebuild a fresh session state; transient parts start empty.
    pub fn into_state(self) -> GameState {
        let mut character = self.character;
        character.normalize();

        let mut stats = self.stats;
        stats.record_realm(character.realm);

        let mut state = GameState::new(character);
        state.resources = self.resources;
        state.equipment = self.equipment_slots;
        state.inventory = self.inventory;
        state.quests = self.quests;
        state.stats = stats;
        state.history = self.history;
        state.auto_play = self.auto_play;
        state.next_item_serial =
            (state.inventory.len() + state.equipment.iter_equipped().count()) as u64 + 1;
        state
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        serde_json::to_string_pretty(self).map_err(|e| GameError::InvalidFormat(e.to_string()))
    }
}

fn required<T: DeserializeOwned>(object: &mut Map<String, Value>, key: &str) -> Result<T, GameError> {
    let value = object
        .remove(key)
        .filter(|v| !v.is_null())
        .ok_or_else(|| GameError::MalformedSave(format!("missing required field `{}`", key)))?;
    serde_json::from_value(value).map_err(|e| GameError::MalformedSave(format!("`{}`: {}", key, e)))
}

fn optional<T: DeserializeOwned + Default>(object: &mut Map<String, Value>, keys: &[&str]) -> T {
    let Some(value) = keys.iter().find_map(|k| object.remove(*k)) else {
        return T::default();
    };
    if value.is_null() {
        return T::default();
    }
    serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::warn!(field = keys[0], error = %e, "ignoring malformed optional save field");
        T::default()
    })
}

/// Parse and validate an imported document.
pub fn decode(json: &str) -> Result<SaveDocument, GameError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| GameError::InvalidFormat(e.to_string()))?;
    let Value::Object(mut object) = value else {
        return Err(GameError::InvalidFormat(
            "save document must be a JSON object".to_string(),
        ));
    };

    for key in REQUIRED_SECTIONS {
        if object.get(key).map_or(true, Value::is_null) {
            return Err(GameError::MalformedSave(format!(
                "missing required field `{}`",
                key
            )));
        }
    }

    let character: Character = required(&mut object, "character")?;
    if character.attributes.max_hp == 0 {
        return Err(GameError::MalformedSave(
            "`character.attributes.maxHp` must be positive".to_string(),
        ));
    }

    Ok(SaveDocument {
        character,
        resources: required(&mut object, "resources")?,
        quests: required(&mut object, "quests")?,
        equipment_slots: optional(&mut object, &["equipmentSlots", "equipment"]),
        inventory: optional(&mut object, &["inventory"]),
        stats: optional(&mut object, &["stats"]),
        history: optional(&mut object, &["gameHistory", "history"]),
        auto_play: optional(&mut object, &["autoPlay"]),
        export_time: optional(&mut object, &["exportTime"]),
    })
}

/// `xianxia-{name}-{realm}-{unix_ms}.json`
pub fn export_file_name(character: &Character, unix_ms: i64) -> String {
    format!(
        "{}-{}-{}-{}.json",
        EXPORT_FILE_PREFIX, character.name, character.realm, unix_ms
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::types::{Profession, Realm, Talent};
    use crate::quests::types::QuestStatus;
    use chrono::TimeZone;

    fn state() -> GameState {
        let c = Character::new("韩立", Profession::Sword, Talent::Huanggu).unwrap();
        let mut s = GameState::new(c);
        s.character.experience = 250;
        s.character.level = 3;
        s.character.realm = Realm::QiRefining;
        s.stats.record_realm(Realm::QiRefining);
        s.character.age = 20;
        s.record_history("境界突破", "从淬体境突破到炼气境");
        s.resources.currency = 777;
        s.quests[0].progress = 2;
        s.quests[1].status = QuestStatus::Claimed;
        s.stats.victories = 12;
        s.auto_play = true;
        s
    }

    #[test]
    fn test_round_trip_preserves_persisted_state() {
        let original = state();
        let json = SaveDocument::from_state(&original).to_json().unwrap();
        let restored = decode(&json).unwrap().into_state();
        assert_eq!(restored.character, original.character);
        assert_eq!(restored.resources, original.resources);
        assert_eq!(restored.quests, original.quests);
        assert_eq!(restored.stats, original.stats);
        assert_eq!(restored.history, original.history);
        assert!(restored.auto_play);
    }

    #[test]
    fn test_highest_realm_follows_imported_realm() {
        let mut value = serde_json::to_value(SaveDocument::from_state(&state())).unwrap();
        value.as_object_mut().unwrap().remove("stats");
        let restored = decode(&value.to_string()).unwrap().into_state();
        assert_eq!(restored.stats.highest_realm, Realm::QiRefining);
    }

    #[test]
    fn test_zero_max_hp_is_malformed() {
        let mut value = serde_json::to_value(SaveDocument::from_state(&state())).unwrap();
        value["character"]["attributes"]["maxHp"] = Value::from(0);
        value["character"]["attributes"]["hp"] = Value::from(0);
        let err = decode(&value.to_string()).unwrap_err();
        assert!(matches!(err, GameError::MalformedSave(ref m) if m.contains("maxHp")));
    }

    #[test]
    fn test_history_defaults_to_empty() {
        let mut value = serde_json::to_value(SaveDocument::from_state(&state())).unwrap();
        assert!(value.get("gameHistory").is_some());
        value.as_object_mut().unwrap().remove("gameHistory");
        assert!(decode(&value.to_string()).unwrap().history.is_empty());

        value["gameHistory"] = Value::from("lost");
        assert!(decode(&value.to_string()).unwrap().history.is_empty());
    }

    #[test]
    fn test_non_object_is_invalid_format() {
        assert!(matches!(decode("[1, 2]"), Err(GameError::InvalidFormat(_))));
        assert!(matches!(decode("not json"), Err(GameError::InvalidFormat(_))));
    }

    #[test]
    fn test_missing_required_sections() {
        let mut value = serde_json::to_value(SaveDocument::from_state(&state())).unwrap();
        value.as_object_mut().unwrap().remove("quests");
        let err = decode(&value.to_string()).unwrap_err();
        assert!(matches!(err, GameError::MalformedSave(ref m) if m.contains("quests")));

        let mut value = serde_json::to_value(SaveDocument::from_state(&state())).unwrap();
        value["character"] = Value::Null;
        assert!(matches!(
            decode(&value.to_string()),
            Err(GameError::MalformedSave(_))
        ));
    }

    #[test]
    fn test_wrong_shape_in_required_section() {
        let mut value = serde_json::to_value(SaveDocument::from_state(&state())).unwrap();
        value["resources"] = Value::String("lots".to_string());
        assert!(matches!(
            decode(&value.to_string()),
            Err(GameError::MalformedSave(_))
        ));
    }

    #[test]
    fn test_optional_sections_default() {
        let mut value = serde_json::to_value(SaveDocument::from_state(&state())).unwrap();
        let object = value.as_object_mut().unwrap();
        object.remove("inventory");
        object.remove("autoPlay");
        object.remove("stats");
        object.insert("equipmentSlots".to_string(), Value::from(42));
        let doc = decode(&value.to_string()).unwrap();
        assert!(doc.inventory.is_empty());
        assert!(!doc.auto_play);
        assert_eq!(doc.stats, GameStats::default());
        assert_eq!(doc.equipment_slots, EquipmentSlots::default());
    }

    #[test]
    fn test_export_timestamp_is_informational() {
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 8, 30, 0).unwrap();
        let doc = SaveDocument::for_export(&state(), at);
        assert_eq!(doc.export_time.as_deref(), Some("2026-10-16T08:30:00.000Z"));

        let mut value = serde_json::to_value(&doc).unwrap();
        value["exportTime"] = Value::from("yesterday-ish");
        assert!(decode(&value.to_string()).is_ok());
    }

    #[test]
    fn test_export_file_name() {
        let s = state();
        assert_eq!(
            export_file_name(&s.character, 1_700_000_000_000),
            "xianxia-韩立-炼气-1700000000000.json"
        );
    }

    #[test]
    fn test_decode_original_save_shape() {
        let json = r#"{
            "player": {"name": "ignored"},
            "character": {
                "name": "道友", "profession": "sword", "talent": "normal",
                "level": 2, "realm": "淬体", "exp": 120, "age": 18, "lifespan": 100,
                "sect": "", "pet": "",
                "attributes": {"attack": 10, "defense": 5, "hp": 90, "maxHp": 100, "crit": 0.05}
            },
            "resources": {"gold": 150, "spiritStone": 12, "pills": 3},
            "quests": [{"id": 1, "name": "初试锋芒", "type": "monster_kill", "target": "山妖",
                        "progress": 1, "goal": 3, "status": "in_progress",
                        "rewards": {"exp": 50, "gold": 100}}]
        }"#;
        let state = decode(json).unwrap().into_state();
        assert_eq!(state.character.experience, 120);
        assert_eq!(state.character.level, 2);
        assert_eq!(state.resources.currency, 150);
        assert_eq!(state.quests[0].progress, 1);
        assert!(state.character.sect.is_none());
        assert!(state.inventory.is_empty());
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_decode_original_history_entries() {
        let mut value = serde_json::to_value(SaveDocument::from_state(&state())).unwrap();
        value["gameHistory"] = serde_json::json!([
            {"timestamp": 1700000000000i64, "event": "境界突破", "details": "从炼气境突破到筑基境"}
        ]);
        let doc = decode(&value.to_string()).unwrap();
        assert_eq!(doc.history.len(), 1);
        assert_eq!(doc.history[0].details, "从炼气境突破到筑基境");
    }
}
