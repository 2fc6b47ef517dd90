use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use actiontail_types::{
    AbsolutePosition, AnimationPlayerChanged, Dialogue, DialogueEventType, InventoryChange,
    LogEvent, UnknownEvent, VarChange, VarType,
};

use crate::error::{Error, Result};

/// Fields every record carries, whatever its kind
#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    tick: i64,
    ts: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VarData {
    id: i64,
    old_value: i64,
    new_value: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DialogueData {
    actor_name: String,
    #[serde(rename = "actorID", default = "unset_id")]
    actor_id: i64,
    #[serde(default)]
    last_interacted_name: String,
    #[serde(rename = "lastInteractedID", default = "unset_id")]
    last_interacted_id: i64,
    #[serde(default)]
    last_interacted_position: Option<AbsolutePosition>,
    player_position: AbsolutePosition,
    dialogue_text: String,
    #[serde(default)]
    dialogue_options: Vec<String>,
    #[serde(default = "unset_id")]
    dialogue_option_chosen: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InventoryData {
    old_inventory: Vec<i64>,
    old_quantities: Vec<i64>,
    new_inventory: Vec<i64>,
    new_quantities: Vec<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnimationData {
    animation: i64,
    pose_animation: i64,
    old_animation: i64,
    old_pose_animation: i64,
    player_position: AbsolutePosition,
    interaction_id: i64,
    #[serde(default)]
    interaction_menu_option: String,
    #[serde(default)]
    interaction_menu_target: String,
    #[serde(default)]
    interaction_position: Option<AbsolutePosition>,
}

fn unset_id() -> i64 {
    -1
}

/// Classifies raw Action Logger lines into typed events
pub struct LogParser;

impl LogParser {
    /// Parse one complete JSON line into exactly one event
    ///
    /// Unrecognised `type` values become [`LogEvent::Unknown`] carrying the
    /// whole decoded object. Invalid JSON, or a recognised kind missing a
    /// required field, is a [`Error::MalformedRecord`].
    pub fn parse(line: &str) -> Result<LogEvent> {
        let value: Value = serde_json::from_str(line)
            .map_err(|e| Error::malformed(format!("invalid JSON: {e}")))?;
        let Envelope { kind, tick, ts } = Envelope::deserialize(&value)
            .map_err(|e| Error::malformed(format!("invalid record header: {e}")))?;

        let event = match kind.as_str() {
            "VARPLAYER_CHANGED" | "VARBIT_CHANGED" => {
                let data: VarData = Self::data(&kind, &value)?;
                LogEvent::VarChange(VarChange {
                    var_type: if kind == "VARBIT_CHANGED" {
                        VarType::Varbit
                    } else {
                        VarType::Varp
                    },
                    tick,
                    ts,
                    id: data.id,
                    old_value: data.old_value,
                    new_value: data.new_value,
                })
            }

            "DIALOGUE_STARTED" | "DIALOGUE_ENDED" => {
                let data: DialogueData = Self::data(&kind, &value)?;
                LogEvent::Dialogue(Dialogue {
                    event_type: if kind == "DIALOGUE_STARTED" {
                        DialogueEventType::Started
                    } else {
                        DialogueEventType::Ended
                    },
                    tick,
                    ts,
                    actor_name: data.actor_name,
                    actor_id: data.actor_id,
                    last_interacted_name: data.last_interacted_name,
                    last_interacted_id: data.last_interacted_id,
                    last_interacted_position: data.last_interacted_position,
                    player_position: data.player_position,
                    text: data.dialogue_text,
                    dialogue_options: data.dialogue_options,
                    dialogue_option_chosen: data.dialogue_option_chosen,
                })
            }

            "INVENTORY_CHANGED" => {
                let data: InventoryData = Self::data(&kind, &value)?;
                LogEvent::InventoryChange(InventoryChange {
                    tick,
                    ts,
                    old_inventory: data.old_inventory,
                    old_quantities: data.old_quantities,
                    new_inventory: data.new_inventory,
                    new_quantities: data.new_quantities,
                })
            }

            "ANIMATION_PLAYER_CHANGED" => {
                let data: AnimationData = Self::data(&kind, &value)?;
                LogEvent::AnimationPlayerChanged(AnimationPlayerChanged {
                    tick,
                    ts,
                    animation: data.animation,
                    pose_animation: data.pose_animation,
                    old_animation: data.old_animation,
                    old_pose_animation: data.old_pose_animation,
                    player_position: data.player_position,
                    interaction_id: data.interaction_id,
                    interaction_menu_option: data.interaction_menu_option,
                    interaction_menu_target: data.interaction_menu_target,
                    interaction_position: data.interaction_position,
                })
            }

            _ => LogEvent::Unknown(UnknownEvent {
                tick,
                ts,
                kind,
                raw: value,
            }),
        };

        Ok(event)
    }

    /// Decode the kind-specific `data` object of a record
    fn data<T: DeserializeOwned>(kind: &str, value: &Value) -> Result<T> {
        let data = value
            .get("data")
            .ok_or_else(|| Error::malformed(format!("{kind}: missing field `data`")))?;
        T::deserialize(data).map_err(|e| Error::malformed(format!("{kind}: {e}")))
    }
}
