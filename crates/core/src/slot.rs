//! Slot module - acceptance zones and their rotation rules
//!
//! A slot accepts at most one piece. Acceptance is decided by, in order:
//!
//! 1. the slot's own occupancy,
//! 2. the occupancy of every slot listed as blocking it,
//! 3. its rule table, which fails closed when empty.
//!
//! Rules of the same kind are alternatives: the first one that passes accepts.
//! A failing rule never vetoes a later rule of the same kind.

use serde::{Deserialize, Serialize};

use crate::types::{
    circular_distance, PieceKind, SlotId, Vec2, DEFAULT_ROTATION_TOLERANCE_DEG,
};

/// One entry of a slot's acceptance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationRule {
    #[serde(rename = "piece")]
    pub kind: PieceKind,
    #[serde(default)]
    pub restrict_rotation: bool,
    /// Single accepted angle, used unless the multi-angle list applies
    #[serde(default)]
    pub required_rotation: f32,
    #[serde(default)]
    pub allow_multiple_rotations: bool,
    #[serde(default)]
    pub allowed_rotations: Vec<f32>,
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
}

fn default_tolerance() -> f32 {
    DEFAULT_ROTATION_TOLERANCE_DEG
}

impl RotationRule {
    /// Accept `kind` at any orientation
    pub fn any_rotation(kind: PieceKind) -> Self {
        Self {
            kind,
            restrict_rotation: false,
            required_rotation: 0.0,
            allow_multiple_rotations: false,
            allowed_rotations: Vec::new(),
            tolerance: DEFAULT_ROTATION_TOLERANCE_DEG,
        }
    }

    /// Accept `kind` within `tolerance` of a single angle
    pub fn fixed(kind: PieceKind, required: f32, tolerance: f32) -> Self {
        Self {
            restrict_rotation: true,
            required_rotation: required,
            tolerance,
            ..Self::any_rotation(kind)
        }
    }

    /// Accept `kind` within `tolerance` of any listed angle
    pub fn multiple(kind: PieceKind, allowed: impl Into<Vec<f32>>, tolerance: f32) -> Self {
        Self {
            restrict_rotation: true,
            allow_multiple_rotations: true,
            allowed_rotations: allowed.into(),
            tolerance,
            ..Self::any_rotation(kind)
        }
    }

    /// Orientation check for a piece already known to be of this rule's kind
    pub fn matches_orientation(&self, orientation: f32) -> bool {
        if !self.restrict_rotation {
            return true;
        }

        if self.allow_multiple_rotations && !self.allowed_rotations.is_empty() {
            self.allowed_rotations
                .iter()
                .any(|&angle| circular_distance(orientation, angle) <= self.tolerance)
        } else {
            circular_distance(orientation, self.required_rotation) <= self.tolerance
        }
    }

    pub fn matches(&self, kind: PieceKind, orientation: f32) -> bool {
        self.kind == kind && self.matches_orientation(orientation)
    }
}

/// A fixed acceptance zone on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    id: SlotId,
    name: String,
    position: Vec2,
    snap_target: Option<Vec2>,
    rules: Vec<RotationRule>,
    blocking: Vec<SlotId>,
    occupied: bool,
}

impl Slot {
    pub(crate) fn new(id: SlotId, spec: SlotSpec) -> Self {
        Self {
            id,
            name: spec.name,
            position: spec.position,
            snap_target: spec.snap_target,
            rules: spec.rules,
            blocking: spec.blocking,
            occupied: false,
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn snap_target(&self) -> Option<Vec2> {
        self.snap_target
    }

    /// Where a placed piece ends up: the snap target if set, else the slot position
    pub fn target(&self) -> Vec2 {
        self.snap_target.unwrap_or(self.position)
    }

    pub fn rules(&self) -> &[RotationRule] {
        &self.rules
    }

    /// Slots whose occupancy disables this one
    pub fn blocking(&self) -> &[SlotId] {
        &self.blocking
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// Rule table check only, ignoring occupancy and blocking
    pub fn rules_accept(&self, kind: PieceKind, orientation: f32) -> bool {
        self.rules.iter().any(|rule| rule.matches(kind, orientation))
    }

    /// Full acceptance check
    ///
    /// `is_occupied` answers for the slots listed in [`Slot::blocking`]; the
    /// board passes a lookup into its own table.
    pub fn can_accept<F>(&self, kind: PieceKind, orientation: f32, is_occupied: F) -> bool
    where
        F: Fn(SlotId) -> bool,
    {
        if self.occupied {
            return false;
        }
        if self.blocking.iter().any(|&id| is_occupied(id)) {
            return false;
        }
        if self.rules.is_empty() {
            return false;
        }
        self.rules_accept(kind, orientation)
    }

    pub(crate) fn occupy(&mut self) {
        self.occupied = true;
    }

    /// Mark the slot free. Releasing a free slot is a no-op.
    pub(crate) fn release(&mut self) {
        self.occupied = false;
    }

    pub(crate) fn push_blocking(&mut self, blocker: SlotId) {
        if !self.blocking.contains(&blocker) {
            self.blocking.push(blocker);
        }
    }
}

/// Construction parameters for a slot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SlotSpec {
    pub name: String,
    pub position: Vec2,
    pub snap_target: Option<Vec2>,
    pub rules: Vec<RotationRule>,
    pub blocking: Vec<SlotId>,
}

impl SlotSpec {
    pub fn new(name: impl Into<String>, position: Vec2) -> Self {
        Self {
            name: name.into(),
            position,
            ..Self::default()
        }
    }

    pub fn snap_to(mut self, target: Vec2) -> Self {
        self.snap_target = Some(target);
        self
    }

    pub fn rule(mut self, rule: RotationRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn blocked_by(mut self, slot: SlotId) -> Self {
        self.blocking.push(slot);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot_with(rules: Vec<RotationRule>) -> Slot {
        let mut spec = SlotSpec::new("s", Vec2::ZERO);
        spec.rules = rules;
        Slot::new(SlotId(0), spec)
    }

    fn never_occupied(_: SlotId) -> bool {
        false
    }

    #[test]
    fn test_empty_rule_table_rejects_everything() {
        let slot = slot_with(Vec::new());
        for kind in PieceKind::ALL {
            assert!(!slot.can_accept(kind, 0.0, never_occupied));
        }
    }

    #[test]
    fn test_unrestricted_rule_ignores_orientation() {
        let slot = slot_with(vec![RotationRule::any_rotation(PieceKind::LargeTriangle)]);
        assert!(slot.can_accept(PieceKind::LargeTriangle, 0.0, never_occupied));
        assert!(slot.can_accept(PieceKind::LargeTriangle, 137.0, never_occupied));
        assert!(!slot.can_accept(PieceKind::SmallTriangle, 0.0, never_occupied));
    }

    #[test]
    fn test_fixed_rule_is_circular() {
        let slot = slot_with(vec![RotationRule::fixed(PieceKind::Square, 0.0, 5.0)]);
        assert!(slot.can_accept(PieceKind::Square, 359.0, never_occupied));
        assert!(slot.can_accept(PieceKind::Square, 5.0, never_occupied));
        assert!(!slot.can_accept(PieceKind::Square, 185.0, never_occupied));
        assert!(!slot.can_accept(PieceKind::Square, 5.5, never_occupied));
    }

    #[test]
    fn test_multiple_rotations() {
        let slot = slot_with(vec![RotationRule::multiple(
            PieceKind::Square,
            vec![0.0, 90.0, 180.0, 270.0],
            5.0,
        )]);
        assert!(slot.can_accept(PieceKind::Square, 0.0, never_occupied));
        assert!(slot.can_accept(PieceKind::Square, 268.0, never_occupied));
        assert!(!slot.can_accept(PieceKind::Square, 45.0, never_occupied));
    }

    #[test]
    fn test_multiple_flag_with_empty_list_uses_required_rotation() {
        let mut rule = RotationRule::fixed(PieceKind::Parallelogram, 90.0, 2.0);
        rule.allow_multiple_rotations = true;
        let slot = slot_with(vec![rule]);
        assert!(slot.can_accept(PieceKind::Parallelogram, 91.0, never_occupied));
        assert!(!slot.can_accept(PieceKind::Parallelogram, 0.0, never_occupied));
    }

    #[test]
    fn test_duplicate_kind_rules_are_alternatives() {
        let slot = slot_with(vec![
            RotationRule::fixed(PieceKind::MediumTriangle, 0.0, 5.0),
            RotationRule::fixed(PieceKind::MediumTriangle, 135.0, 5.0),
        ]);
        assert!(slot.can_accept(PieceKind::MediumTriangle, 2.0, never_occupied));
        assert!(slot.can_accept(PieceKind::MediumTriangle, 133.0, never_occupied));
        assert!(!slot.can_accept(PieceKind::MediumTriangle, 90.0, never_occupied));
    }

    #[test]
    fn test_occupied_slot_rejects() {
        let mut slot = slot_with(vec![RotationRule::any_rotation(PieceKind::Square)]);
        slot.occupy();
        assert!(!slot.can_accept(PieceKind::Square, 0.0, never_occupied));
        slot.release();
        slot.release();
        assert!(!slot.is_occupied());
        assert!(slot.can_accept(PieceKind::Square, 0.0, never_occupied));
    }

    #[test]
    fn test_blocking_slot_vetoes_matching_rule() {
        let spec = SlotSpec::new("b", Vec2::ZERO)
            .rule(RotationRule::any_rotation(PieceKind::Square))
            .blocked_by(SlotId(7));
        let slot = Slot::new(SlotId(1), spec);

        assert!(!slot.can_accept(PieceKind::Square, 0.0, |id| id == SlotId(7)));
        assert!(slot.can_accept(PieceKind::Square, 0.0, |id| id == SlotId(8)));
    }

    #[test]
    fn test_target_prefers_snap_target() {
        let plain = Slot::new(SlotId(0), SlotSpec::new("a", Vec2::new(1.0, 1.0)));
        assert_eq!(plain.target(), Vec2::new(1.0, 1.0));

        let snapped = Slot::new(
            SlotId(1),
            SlotSpec::new("b", Vec2::new(1.0, 1.0)).snap_to(Vec2::new(1.5, 0.5)),
        );
        assert_eq!(snapped.target(), Vec2::new(1.5, 0.5));
    }

    #[test]
    fn test_rule_serde_defaults() {
        let rule: RotationRule = serde_json::from_str(r#"{"piece":"square"}"#).unwrap();
        assert_eq!(rule, RotationRule::any_rotation(PieceKind::Square));
        assert_eq!(rule.tolerance, DEFAULT_ROTATION_TOLERANCE_DEG);
    }
}
