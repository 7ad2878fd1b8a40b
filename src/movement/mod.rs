// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Anchor-driven mark movement and propagation to linked neighbors.
//!
//! Targets are region-relative points in the dragged mark's own region. Which endpoints move
//! depends on the mark's [`Anchor`]:
//!
//! | anchor   | horizontal          | omnidirectional      |
//! |----------|---------------------|----------------------|
//! | proximal | proximal x          | proximal point       |
//! | distal   | distal x            | distal point         |
//! | middle   | both x, keep width  | both points, keep Δ  |
//! | none     | nothing             | nothing              |

pub mod drag;

pub use drag::{settle_mark, DragOutcome, DragSession};

use crate::geometry::{distance_to_segment, Point, Segment, Viewport};
use crate::model::{Anchor, Ladder, LadderError, LinkSlot, MarkId};

/// Supplied by the cursor/input subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Movement {
    #[default]
    Horizontal,
    Omnidirectional,
}

/// Where `segment` ends up when its `anchor` is dragged to `target`.
pub fn moved_segment(segment: &Segment, anchor: Anchor, movement: Movement, target: Point) -> Segment {
    let mut moved = *segment;
    match (anchor, movement) {
        (Anchor::None, _) => return moved,
        (Anchor::Proximal, Movement::Horizontal) => moved.proximal.x = target.x,
        (Anchor::Distal, Movement::Horizontal) => moved.distal.x = target.x,
        (Anchor::Proximal, Movement::Omnidirectional) => moved.proximal = target,
        (Anchor::Distal, Movement::Omnidirectional) => moved.distal = target,
        (Anchor::Middle, Movement::Horizontal) => {
            let half_dx = (segment.proximal.x - segment.distal.x) / 2.0;
            moved.proximal.x = target.x + half_dx;
            moved.distal.x = target.x - half_dx;
        }
        (Anchor::Middle, Movement::Omnidirectional) => {
            let half_dx = (segment.proximal.x - segment.distal.x) / 2.0;
            let half_dy = (segment.proximal.y - segment.distal.y) / 2.0;
            moved.proximal = Point::new(target.x + half_dx, target.y + half_dy);
            moved.distal = Point::new(target.x - half_dx, target.y - half_dy);
        }
    }
    match movement {
        Movement::Horizontal => moved,
        Movement::Omnidirectional => moved.normalized(),
    }
}

/// Moves a mark by its anchor and drags its linked neighbors along.
///
/// Returns every mark whose geometry changed, the moved mark first. A mark anchored at
/// [`Anchor::None`] stays put and the result is empty.
pub fn move_mark(
    ladder: &mut Ladder,
    mark_id: MarkId,
    movement: Movement,
    target: Point,
    viewport: &Viewport,
) -> Result<Vec<MarkId>, LadderError> {
    let mark = ladder.require_mark_mut(mark_id)?;
    let before = *mark.segment();
    let after = moved_segment(&before, mark.anchor(), movement, target);
    if after == before {
        return Ok(Vec::new());
    }
    mark.set_segment(after);

    let mut updated = vec![mark_id];
    updated.extend(propagate_to_neighbors(ladder, mark_id, viewport)?);
    ladder.reassess(updated.iter().copied());
    tracing::trace!(%mark_id, ?movement, ?after, "moved mark");
    Ok(updated)
}

/// Re-attaches linked neighbors to `mark_id`'s current geometry.
///
/// Neighbors above take the mark's proximal x on their distal end, neighbors below take its
/// distal x on their proximal end. Same-region neighbors slide their end nearest the mark
/// onto the mark's line. Returns the neighbors that changed.
pub fn propagate_to_neighbors(
    ladder: &mut Ladder,
    mark_id: MarkId,
    viewport: &Viewport,
) -> Result<Vec<MarkId>, LadderError> {
    let mark = ladder.require_mark(mark_id)?;
    let segment = *mark.segment();
    let links = mark.linked().iter().collect::<Vec<_>>();
    let span = ladder
        .region_of(mark_id)
        .ok_or(LadderError::MarkNotFound { mark_id })?
        .span();
    let view_segment = viewport.to_view_segment(&segment, span);

    let mut changed = Vec::new();
    for (slot, neighbor_id) in links {
        let Some(neighbor) = ladder.mark_mut(neighbor_id) else {
            tracing::warn!(%mark_id, %neighbor_id, "linked mark is missing");
            continue;
        };
        let before = *neighbor.segment();
        let mut after = before;
        match slot {
            LinkSlot::Proximal => after.distal.x = segment.proximal.x,
            LinkSlot::Distal => after.proximal.x = segment.distal.x,
            LinkSlot::Middle => {
                let proximal_gap =
                    distance_to_segment(viewport.to_view_point(before.proximal, span), &view_segment);
                let distal_gap =
                    distance_to_segment(viewport.to_view_point(before.distal, span), &view_segment);
                let end = if proximal_gap <= distal_gap {
                    &mut after.proximal
                } else {
                    &mut after.distal
                };
                end.x = segment.x_at_y_or_nearest(*end);
            }
        }
        if after != before {
            neighbor.set_segment(after);
            changed.push(neighbor_id);
        }
    }
    Ok(changed)
}
