//! Shared types for actiontail
//!
//! This crate contains the event values produced by the record parser and
//! consumed by the dispatcher. Every value is built once per log line and
//! never mutated afterwards.

use serde::Deserialize;
use std::fmt;

// ============================================================================
// World Types
// ============================================================================

/// A coordinate in the game world
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct AbsolutePosition {
    pub x: i64,
    pub y: i64,
    pub plane: i64,
}

impl AbsolutePosition {
    pub fn new(x: i64, y: i64, plane: i64) -> Self {
        Self { x, y, plane }
    }
}

impl fmt::Display for AbsolutePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.plane)
    }
}

// ============================================================================
// Event Types
// ============================================================================

/// Which variable namespace an id belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VarType {
    Varbit,
    Varp,
}

impl VarType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Varbit => "varbit",
            Self::Varp => "varp",
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A varbit or varp changed value
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarChange {
    pub var_type: VarType,
    pub tick: i64,
    pub ts: String,
    pub id: i64,
    pub old_value: i64,
    pub new_value: i64,
}

/// The player's inventory changed
///
/// `old_inventory`/`old_quantities` and `new_inventory`/`new_quantities` are
/// parallel arrays, one index per slot. Lengths are passed through as logged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InventoryChange {
    pub tick: i64,
    pub ts: String,
    pub old_inventory: Vec<i64>,
    pub old_quantities: Vec<i64>,
    pub new_inventory: Vec<i64>,
    pub new_quantities: Vec<i64>,
}

/// Whether a dialogue opened or closed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DialogueEventType {
    Started,
    Ended,
}

impl DialogueEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Ended => "ended",
        }
    }
}

impl fmt::Display for DialogueEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dialogue box opened or closed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dialogue {
    pub event_type: DialogueEventType,
    pub tick: i64,
    pub ts: String,
    pub actor_name: String,
    /// -1 when the producer did not log an actor id
    pub actor_id: i64,
    pub last_interacted_name: String,
    pub last_interacted_id: i64,
    pub last_interacted_position: Option<AbsolutePosition>,
    pub player_position: AbsolutePosition,
    pub text: String,
    pub dialogue_options: Vec<String>,
    /// -1 when no option was chosen
    pub dialogue_option_chosen: i64,
}

/// The local player's animation changed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationPlayerChanged {
    pub tick: i64,
    pub ts: String,
    pub animation: i64,
    pub pose_animation: i64,
    pub old_animation: i64,
    pub old_pose_animation: i64,
    pub player_position: AbsolutePosition,
    pub interaction_id: i64,
    pub interaction_menu_option: String,
    pub interaction_menu_target: String,
    pub interaction_position: Option<AbsolutePosition>,
}

/// A record whose kind is not understood; keeps the whole payload
#[derive(Clone, Debug, PartialEq)]
pub struct UnknownEvent {
    pub tick: i64,
    pub ts: String,
    pub kind: String,
    pub raw: serde_json::Value,
}

/// One parsed log line
#[derive(Clone, Debug, PartialEq)]
pub enum LogEvent {
    VarChange(VarChange),
    Dialogue(Dialogue),
    InventoryChange(InventoryChange),
    AnimationPlayerChanged(AnimationPlayerChanged),
    Unknown(UnknownEvent),
}

impl LogEvent {
    /// Game tick the record was logged at
    pub fn tick(&self) -> i64 {
        match self {
            Self::VarChange(e) => e.tick,
            Self::Dialogue(e) => e.tick,
            Self::InventoryChange(e) => e.tick,
            Self::AnimationPlayerChanged(e) => e.tick,
            Self::Unknown(e) => e.tick,
        }
    }

    /// Producer timestamp, verbatim
    pub fn ts(&self) -> &str {
        match self {
            Self::VarChange(e) => &e.ts,
            Self::Dialogue(e) => &e.ts,
            Self::InventoryChange(e) => &e.ts,
            Self::AnimationPlayerChanged(e) => &e.ts,
            Self::Unknown(e) => &e.ts,
        }
    }

    /// Short kind label, used in diagnostics
    pub fn kind(&self) -> &str {
        match self {
            Self::VarChange(e) => e.var_type.as_str(),
            Self::Dialogue(_) => "dialogue",
            Self::InventoryChange(_) => "inventory",
            Self::AnimationPlayerChanged(_) => "animation",
            Self::Unknown(e) => &e.kind,
        }
    }
}
