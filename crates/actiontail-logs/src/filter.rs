use std::collections::HashSet;

use actiontail_types::{LogEvent, VarType};

/// Decides which events reach the feed
///
/// Built once at startup. [`EventFilter::allows`] only looks at the event it
/// is given, so the decision never depends on event order.
#[derive(Clone, Debug)]
pub struct EventFilter {
    /// Varbit ids to hide
    filtered_varbits: HashSet<i64>,

    /// Varp ids to hide
    filtered_varps: HashSet<i64>,

    show_inventory_changes: bool,
    show_dialogue_events: bool,
    show_animation_changes: bool,
}

impl EventFilter {
    /// A filter that lets everything through
    pub fn new() -> Self {
        Self {
            filtered_varbits: HashSet::new(),
            filtered_varps: HashSet::new(),
            show_inventory_changes: true,
            show_dialogue_events: true,
            show_animation_changes: true,
        }
    }

    pub fn with_filtered_varbits(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.filtered_varbits = ids.into_iter().collect();
        self
    }

    pub fn with_filtered_varps(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.filtered_varps = ids.into_iter().collect();
        self
    }

    pub fn show_inventory_changes(mut self, show: bool) -> Self {
        self.show_inventory_changes = show;
        self
    }

    pub fn show_dialogue_events(mut self, show: bool) -> Self {
        self.show_dialogue_events = show;
        self
    }

    pub fn show_animation_changes(mut self, show: bool) -> Self {
        self.show_animation_changes = show;
        self
    }

    /// Ids hidden for one variable namespace
    pub fn filtered_ids(&self, var_type: VarType) -> &HashSet<i64> {
        match var_type {
            VarType::Varbit => &self.filtered_varbits,
            VarType::Varp => &self.filtered_varps,
        }
    }

    /// Check if an event should be rendered
    pub fn allows(&self, event: &LogEvent) -> bool {
        match event {
            LogEvent::VarChange(change) => {
                !self.filtered_ids(change.var_type).contains(&change.id)
            }
            LogEvent::Dialogue(_) => self.show_dialogue_events,
            LogEvent::InventoryChange(_) => self.show_inventory_changes,
            LogEvent::AnimationPlayerChanged(_) => self.show_animation_changes,
            // Unrecognised kinds always surface
            LogEvent::Unknown(_) => true,
        }
    }

    /// Human readable notes on what is hidden, for startup output
    pub fn describe(&self) -> Vec<String> {
        let mut notes = Vec::new();
        if !self.show_inventory_changes {
            notes.push("Hiding inventory changes".to_string());
        }
        if !self.show_dialogue_events {
            notes.push("Hiding dialogue events".to_string());
        }
        if !self.show_animation_changes {
            notes.push("Hiding animation changes".to_string());
        }
        if !self.filtered_varbits.is_empty() {
            notes.push(format!("Filtering {} varbits", self.filtered_varbits.len()));
        }
        if !self.filtered_varps.is_empty() {
            notes.push(format!("Filtering {} varps", self.filtered_varps.len()));
        }
        notes
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::new()
    }
}
