//! Axis-aligned snapping for drag interactions.
//!
//! DESIGN
//! ======
//! Snapping is computed on the selection's union bounding box, not on each
//! rectangle: the union is virtually translated by the drag movement, its 9
//! anchor points are compared against the anchor points of every candidate
//! object per axis, and the nearest in-threshold alignment per axis yields a
//! correction delta. "What snapped" ([`SnapResult`]) is returned separately
//! from "where each rectangle lands" so the host can draw snap guides
//! without re-deriving the alignment from the applied positions.
//!
//! Tie-break: the strictly nearest candidate wins; at equal distance the
//! earliest candidate in input order is kept (objects in slice order, anchor
//! points in [`cmath::rect::NinePoints::to_array`] row-major order). This is
//! deliberate and stable so repeated drags snap identically.
//!
//! Failure semantics: empty selections, empty candidate sets, and
//! non-finite thresholds degrade to "no snap" — the movement is applied
//! unmodified and never blocks the drag.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use std::collections::HashSet;

use cmath::rect::{self, Rect};
use cmath::vector2::{self, Vector2};

use crate::doc::NodeId;
use crate::hierarchy::HierarchyContext;

/// A single-axis alignment between a moving anchor and a target anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisHit {
    /// Signed correction on this axis: `target - source`.
    pub offset: f64,
    /// Coordinate of the target anchor that matched.
    pub target: f64,
    /// Coordinate of the moving anchor before correction.
    pub source: f64,
}

/// Which axes snapped and the correction applied, independent of how the
/// selection repositions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// Correction added to the movement: zero on axes that did not snap.
    pub delta: Vector2,
    pub x: Option<AxisHit>,
    pub y: Option<AxisHit>,
}

impl SnapResult {
    /// A result with no alignment on either axis.
    #[must_use]
    pub fn none() -> Self {
        Self { delta: vector2::ZERO, x: None, y: None }
    }

    #[must_use]
    pub fn snapped(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }
}

/// Snapped placement for a dragged selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SnappedMovement {
    /// Snapped top-left position for each input selection rectangle, in
    /// input order. Relative placement within the selection is preserved.
    pub positions: Vec<Vector2>,
    pub result: SnapResult,
}

/// Translate `selection` by `movement`, snapping the union bounding box to
/// the anchor points of `objects` within the per-axis `threshold`.
#[must_use]
pub fn snap_movement_to_objects(
    selection: &[Rect],
    objects: &[Rect],
    movement: Vector2,
    threshold: Vector2,
) -> SnappedMovement {
    let result = rect::union(selection).map_or_else(SnapResult::none, |bounds| {
        let sources = bounds.translate(movement).nine_points().to_array();
        let mut best_x: Option<AxisHit> = None;
        let mut best_y: Option<AxisHit> = None;

        for object in objects {
            for target in object.nine_points().to_array() {
                for source in sources {
                    consider(&mut best_x, source[0], target[0], threshold[0]);
                    consider(&mut best_y, source[1], target[1], threshold[1]);
                }
            }
        }

        SnapResult {
            delta: [
                best_x.map_or(0.0, |hit| hit.offset),
                best_y.map_or(0.0, |hit| hit.offset),
            ],
            x: best_x,
            y: best_y,
        }
    });

    let shift = vector2::add(movement, result.delta);
    let positions = selection.iter().map(|r| vector2::add(r.position(), shift)).collect();
    SnappedMovement { positions, result }
}

/// Keep the nearer of the current best hit and a new source/target pair.
/// Strict comparison keeps the earlier candidate on ties.
fn consider(best: &mut Option<AxisHit>, source: f64, target: f64, threshold: f64) {
    let offset = target - source;
    // Negated comparison so a NaN threshold or offset disables snapping.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    if !(offset.abs() <= threshold) {
        return;
    }
    if best.is_none_or(|b| offset.abs() < b.offset.abs()) {
        *best = Some(AxisHit { offset, target, source });
    }
}

/// Candidate node ids a dragged selection may snap to: the de-duplicated
/// siblings and parents of every selected node, excluding the selection
/// itself and any descendant of a selected node (no self-snap).
///
/// Order is deterministic: selection order, parent before siblings.
#[must_use]
pub fn snap_targets(selection: &[NodeId], ctx: &HierarchyContext) -> Vec<NodeId> {
    let selected: HashSet<&NodeId> = selection.iter().collect();
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut out: Vec<NodeId> = Vec::new();

    for id in selection {
        let siblings = ctx.siblings(id);
        for candidate in ctx.parent_id(id).into_iter().chain(siblings.iter()) {
            if selected.contains(candidate) || seen.contains(candidate) {
                continue;
            }
            if selection.iter().any(|s| ctx.is_descendant(candidate, s)) {
                continue;
            }
            seen.insert(candidate.clone());
            out.push(candidate.clone());
        }
    }
    out
}
