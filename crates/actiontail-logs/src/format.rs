use actiontail_types::{
    AbsolutePosition, AnimationPlayerChanged, Dialogue, InventoryChange, LogEvent, UnknownEvent,
    VarChange,
};

use crate::lookup::Lookups;

/// Renders events as single feed lines
pub struct EventFormatter {
    lookups: Lookups,
}

impl EventFormatter {
    pub fn new(lookups: Lookups) -> Self {
        Self { lookups }
    }

    /// Render one event as `[ts tick] <summary>`
    pub fn format(&self, event: &LogEvent) -> String {
        let summary = match event {
            LogEvent::VarChange(change) => self.var_change_summary(change),
            LogEvent::Dialogue(dialogue) => dialogue_summary(dialogue),
            LogEvent::InventoryChange(change) => inventory_summary(change),
            LogEvent::AnimationPlayerChanged(change) => animation_summary(change),
            LogEvent::Unknown(unknown) => unknown_summary(unknown),
        };

        let mut line = format!("[{} {}] ", event.ts(), event.tick());
        line.push_str(&summary);
        line
    }

    fn var_change_summary(&self, change: &VarChange) -> String {
        let name = self.lookups.name(change.var_type, change.id);
        format!(
            "{} {} ({}) {} -> {}",
            change.var_type, name, change.id, change.old_value, change.new_value
        )
    }
}

fn dialogue_summary(d: &Dialogue) -> String {
    format!(
        "dialogue {}: actor={} ({}) last_interacted={} ({}) at {} player={} text={:?} options={:?} chosen={}",
        d.event_type,
        d.actor_name,
        d.actor_id,
        d.last_interacted_name,
        d.last_interacted_id,
        position(d.last_interacted_position.as_ref()),
        d.player_position,
        d.text,
        d.dialogue_options,
        d.dialogue_option_chosen,
    )
}

fn inventory_summary(c: &InventoryChange) -> String {
    format!(
        "inventory change: old items={:?} quantities={:?} new items={:?} quantities={:?}",
        c.old_inventory, c.old_quantities, c.new_inventory, c.new_quantities,
    )
}

fn animation_summary(a: &AnimationPlayerChanged) -> String {
    format!(
        "animation change: {}/{} -> {}/{} player={} interaction={} option={:?} target={:?} at {}",
        a.old_animation,
        a.old_pose_animation,
        a.animation,
        a.pose_animation,
        a.player_position,
        a.interaction_id,
        a.interaction_menu_option,
        a.interaction_menu_target,
        position(a.interaction_position.as_ref()),
    )
}

fn unknown_summary(u: &UnknownEvent) -> String {
    format!("unhandled event {}: {}", u.kind, u.raw)
}

/// Position as `(x, y, plane)`, or `-` when absent
fn position(pos: Option<&AbsolutePosition>) -> String {
    pos.map(ToString::to_string).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::LogParser;
    use std::collections::HashMap;

    fn formatter() -> EventFormatter {
        let varbits = HashMap::from([("10".to_string(), "SOME_VARBIT".to_string())]);
        let varps = HashMap::from([("10".to_string(), "SOME_VARP".to_string())]);
        EventFormatter::new(Lookups::new(varbits, varps))
    }

    fn render(line: &str) -> String {
        formatter().format(&LogParser::parse(line).unwrap())
    }

    #[test]
    fn test_var_change_named() {
        let out = render(
            r#"{"type":"VARPLAYER_CHANGED","tick":5,"ts":"T","data":{"id":10,"oldValue":2,"newValue":3}}"#,
        );
        assert_eq!(out, "[T 5] varp SOME_VARP (10) 2 -> 3");
    }

    #[test]
    fn test_var_change_unnamed() {
        let out = render(
            r#"{"type":"VARBIT_CHANGED","tick":5,"ts":"T","data":{"id":42,"oldValue":0,"newValue":1}}"#,
        );
        assert_eq!(out, "[T 5] varbit _unnamed_ (42) 0 -> 1");
    }

    #[test]
    fn test_dialogue_renders_every_field() {
        let out = render(
            r#"{"type":"DIALOGUE_STARTED","tick":100,"ts":"T","data":{"actorName":"Hans","actorID":3105,"lastInteractedName":"Guard","lastInteractedID":3010,"lastInteractedPosition":{"x":1,"y":2,"plane":0},"playerPosition":{"x":3,"y":4,"plane":1},"dialogueText":"Hello there.","dialogueOptions":["Yes","No"],"dialogueOptionChosen":0}}"#,
        );
        assert!(out.starts_with("[T 100] dialogue started: "));
        for needle in [
            "actor=Hans (3105)",
            "last_interacted=Guard (3010) at (1, 2, 0)",
            "player=(3, 4, 1)",
            r#"text="Hello there.""#,
            r#"options=["Yes", "No"]"#,
            "chosen=0",
        ] {
            assert!(out.contains(needle), "{out} missing {needle}");
        }
    }

    #[test]
    fn test_dialogue_without_last_interacted_position() {
        let out = render(
            r#"{"type":"DIALOGUE_ENDED","tick":1,"ts":"T","data":{"actorName":"Hans","playerPosition":{"x":3,"y":4,"plane":1},"dialogueText":""}}"#,
        );
        assert!(out.contains("dialogue ended: "));
        assert!(out.contains("last_interacted= (-1) at -"));
    }

    #[test]
    fn test_inventory_renders_both_sides() {
        let out = render(
            r#"{"type":"INVENTORY_CHANGED","tick":7,"ts":"T","data":{"oldInventory":[995],"oldQuantities":[100],"newInventory":[995,1511],"newQuantities":[90,1]}}"#,
        );
        assert_eq!(
            out,
            "[T 7] inventory change: old items=[995] quantities=[100] new items=[995, 1511] quantities=[90, 1]"
        );
    }

    #[test]
    fn test_animation_renders_every_field() {
        let out = render(
            r#"{"type":"ANIMATION_PLAYER_CHANGED","tick":8,"ts":"T","data":{"animation":879,"poseAnimation":808,"oldAnimation":-1,"oldPoseAnimation":809,"playerPosition":{"x":3200,"y":3200,"plane":0},"interactionId":1276,"interactionMenuOption":"Chop down","interactionMenuTarget":"Tree","interactionPosition":{"x":3201,"y":3200,"plane":0}}}"#,
        );
        assert_eq!(
            out,
            r#"[T 8] animation change: -1/809 -> 879/808 player=(3200, 3200, 0) interaction=1276 option="Chop down" target="Tree" at (3201, 3200, 0)"#
        );
    }

    #[test]
    fn test_unknown_renders_raw_payload() {
        let out = render(r#"{"type":"SOMETHING_NEW","tick":3,"ts":"T","data":{"a":1}}"#);
        assert!(out.starts_with("[T 3] unhandled event SOMETHING_NEW: {"));
        assert!(out.contains(r#""data":{"a":1}"#));
    }

    #[test]
    fn test_absent_position_renders_dash() {
        assert_eq!(position(None), "-");
        assert_eq!(position(Some(&AbsolutePosition::new(1, -2, 3))), "(1, -2, 3)");
    }
}
