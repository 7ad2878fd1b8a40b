// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::config::EngineConfig;
use crate::geometry::{Point, Segment, Viewport};
use crate::linking::{
    find_nearby_marks, link_nearby_marks, remove_overlapping_marks, snap_to_nearby_marks,
    Proximity,
};
use crate::model::{Anchor, Ladder, LadderError, MarkId, MarkMode};

use super::{move_mark, propagate_to_neighbors, Movement};

/// What a finished drag did to the ladder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DragOutcome {
    /// Marks that gained a link to the dragged mark.
    pub linked: Vec<MarkId>,
    /// Duplicates absorbed by the dragged mark.
    pub removed: Vec<MarkId>,
    /// Marks whose geometry or links changed while finishing, the dragged mark included.
    /// Neighbors handed over from an absorbed duplicate count as changed.
    pub updated: Vec<MarkId>,
}

/// One drag gesture over a single mark: `begin`, any number of `drag_to`, then `end` or
/// `cancel`.
///
/// Links are only created in [`DragSession::end`], so abandoning a session (or calling
/// [`DragSession::cancel`]) never leaves half-linked marks behind.
#[derive(Debug, Clone)]
pub struct DragSession {
    mark_id: MarkId,
    movement: Movement,
    snapshot: Vec<(MarkId, Segment)>,
}

impl DragSession {
    /// Attaches `mark_id` with `anchor` and remembers the geometry `cancel` restores.
    pub fn begin(
        ladder: &mut Ladder,
        mark_id: MarkId,
        anchor: Anchor,
        movement: Movement,
    ) -> Result<Self, LadderError> {
        let mark = ladder.require_mark_mut(mark_id)?;
        mark.set_anchor(anchor);
        mark.set_mode(MarkMode::Attached);

        let mark = ladder.require_mark(mark_id)?;
        let mut snapshot = vec![(mark_id, *mark.segment())];
        snapshot.extend(
            mark.linked()
                .iter()
                .filter_map(|(_, id)| ladder.mark(id).map(|m| (id, *m.segment()))),
        );
        tracing::debug!(%mark_id, ?anchor, ?movement, "drag began");
        Ok(Self { mark_id, movement, snapshot })
    }

    pub fn mark_id(&self) -> MarkId {
        self.mark_id
    }

    pub fn movement(&self) -> Movement {
        self.movement
    }

    /// Moves the dragged mark to a region-relative target.
    pub fn drag_to(
        &mut self,
        ladder: &mut Ladder,
        target: Point,
        viewport: &Viewport,
    ) -> Result<Vec<MarkId>, LadderError> {
        move_mark(ladder, self.mark_id, self.movement, target, viewport)
    }

    /// Moves the dragged mark to a view-space target, interpreted in the mark's own region.
    pub fn drag_to_view(
        &mut self,
        ladder: &mut Ladder,
        view_point: Point,
        viewport: &Viewport,
    ) -> Result<Vec<MarkId>, LadderError> {
        let span = ladder
            .region_of(self.mark_id)
            .ok_or(LadderError::MarkNotFound { mark_id: self.mark_id })?
            .span();
        let target = viewport.to_region_point(view_point, span);
        self.drag_to(ladder, target, viewport)
    }

    /// Settles the mark where it was dropped (see [`settle_mark`]) and releases it.
    pub fn end(
        self,
        ladder: &mut Ladder,
        viewport: &Viewport,
        config: &EngineConfig,
    ) -> Result<DragOutcome, LadderError> {
        let outcome = settle_mark(ladder, self.mark_id, viewport, config)?;
        ladder.unattach_mark(self.mark_id)?;
        tracing::debug!(
            mark_id = %self.mark_id,
            linked = outcome.linked.len(),
            removed = outcome.removed.len(),
            "drag ended"
        );
        Ok(outcome)
    }

    /// Puts every touched mark back where it was when the drag began and releases the mark.
    ///
    /// Returns the marks whose geometry was restored.
    pub fn cancel(self, ladder: &mut Ladder) -> Result<Vec<MarkId>, LadderError> {
        let mut restored = Vec::new();
        for (mark_id, segment) in &self.snapshot {
            let Some(mark) = ladder.mark_mut(*mark_id) else {
                continue;
            };
            if mark.segment() != segment {
                mark.set_segment(*segment);
                restored.push(*mark_id);
            }
        }
        ladder.reassess(restored.iter().copied());
        ladder.unattach_mark(self.mark_id)?;
        tracing::debug!(mark_id = %self.mark_id, restored = restored.len(), "drag cancelled");
        Ok(restored)
    }
}

/// Links and snaps `mark_id` to whatever it sits near, pulls its linked neighbors onto it
/// and absorbs same-region duplicates.
pub fn settle_mark(
    ladder: &mut Ladder,
    mark_id: MarkId,
    viewport: &Viewport,
    config: &EngineConfig,
) -> Result<DragOutcome, LadderError> {
    let linking = Proximity::linking(*viewport, config);
    let nearby = find_nearby_marks(ladder, mark_id, &linking)?;
    let linked = link_nearby_marks(ladder, mark_id, &nearby)?;

    let mut updated = Vec::new();
    if snap_to_nearby_marks(ladder, mark_id, &nearby, viewport)? {
        updated.push(mark_id);
    }
    for neighbor_id in propagate_to_neighbors(ladder, mark_id, viewport)? {
        if !updated.contains(&neighbor_id) {
            updated.push(neighbor_id);
        }
    }

    let overlap = remove_overlapping_marks(ladder, &[mark_id], &linking)?;
    updated.retain(|id| !overlap.removed.contains(id));
    if !overlap.relinked.is_empty() && !updated.contains(&mark_id) {
        updated.push(mark_id);
    }
    for neighbor_id in overlap.relinked {
        if !updated.contains(&neighbor_id) {
            updated.push(neighbor_id);
        }
    }

    ladder.reassess(updated.iter().copied().chain(linked.iter().copied()));
    Ok(DragOutcome { linked, removed: overlap.removed, updated })
}
