// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Proximity linking: discovering, recording and snapping contiguous marks.
//!
//! All distances are measured in view space so that the threshold means the same thing in
//! every region regardless of its height or the current zoom. Links are stored on both marks
//! (see [`LinkSlot::reciprocal`]) and every function here keeps them symmetric.

use std::fmt;

use smallvec::SmallVec;

use crate::config::{EngineConfig, DEFAULT_PARALLEL_EPSILON};
use crate::geometry::{are_parallel, distance_to_segment, endpoint_distance, Segment, Viewport};
use crate::model::{Ladder, LadderError, LinkSlot, LinkedMarkIds, MarkId};

/// Marks found near a given mark, grouped by where they sit relative to it.
pub type NearbyMarks = LinkedMarkIds;

/// Distance parameters for proximity queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proximity {
    pub viewport: Viewport,
    /// Strict upper bound on the view-space distance between two marks.
    pub threshold: f64,
    pub parallel_epsilon: f64,
}

impl Proximity {
    pub fn new(viewport: Viewport, threshold: f64) -> Self {
        Self { viewport, threshold, parallel_epsilon: DEFAULT_PARALLEL_EPSILON }
    }

    /// Linking parameters from `config`. Overlap removal measures against the same threshold.
    pub fn linking(viewport: Viewport, config: &EngineConfig) -> Self {
        Self {
            viewport,
            threshold: config.link_threshold,
            parallel_epsilon: config.parallel_epsilon,
        }
    }
}

fn neighbor_regions(region_index: usize, region_count: usize) -> SmallVec<[(LinkSlot, usize); 3]> {
    let mut regions = SmallVec::new();
    if let Some(above) = region_index.checked_sub(1) {
        regions.push((LinkSlot::Proximal, above));
    }
    regions.push((LinkSlot::Middle, region_index));
    if region_index + 1 < region_count {
        regions.push((LinkSlot::Distal, region_index + 1));
    }
    regions
}

fn owned_view_segment(
    ladder: &Ladder,
    mark_id: MarkId,
    viewport: &Viewport,
) -> Result<(usize, Segment), LadderError> {
    ladder.require_mark(mark_id)?;
    let region_index = ladder
        .region_index_of(mark_id)
        .ok_or(LadderError::MarkNotFound { mark_id })?;
    let segment = ladder
        .view_segment(mark_id, viewport)
        .ok_or(LadderError::MarkNotFound { mark_id })?;
    Ok((region_index, segment))
}

/// Marks in the region above, the same region and the region below that come within the
/// proximity threshold of `mark_id`.
///
/// Same-region candidates parallel to the mark are skipped: two parallel marks side by side
/// are separate events, not one event continuing.
pub fn find_nearby_marks(
    ladder: &Ladder,
    mark_id: MarkId,
    proximity: &Proximity,
) -> Result<NearbyMarks, LadderError> {
    let (region_index, segment) = owned_view_segment(ladder, mark_id, &proximity.viewport)?;
    let mut nearby = NearbyMarks::default();

    for (slot, candidate_region) in neighbor_regions(region_index, ladder.region_count()) {
        let Some(region) = ladder.region(candidate_region) else {
            continue;
        };
        let span = region.span();
        for candidate in ladder.marks_in_region(candidate_region) {
            if candidate.id() == mark_id {
                continue;
            }
            let candidate_segment = proximity.viewport.to_view_segment(candidate.segment(), span);
            let distance = endpoint_distance(&segment, &candidate_segment);
            if distance >= proximity.threshold {
                continue;
            }
            if slot == LinkSlot::Middle
                && are_parallel(&segment, &candidate_segment, proximity.parallel_epsilon)
            {
                tracing::trace!(%mark_id, candidate = %candidate.id(), "skipping parallel mark");
                continue;
            }
            tracing::trace!(%mark_id, candidate = %candidate.id(), ?slot, distance, "nearby mark");
            nearby.slot_mut(slot).insert(candidate.id());
        }
    }

    Ok(nearby)
}

/// The slot a mark in region `to` occupies from the point of view of a mark in region `from`.
fn slot_between(from: usize, to: usize) -> Option<LinkSlot> {
    match to as isize - from as isize {
        -1 => Some(LinkSlot::Proximal),
        0 => Some(LinkSlot::Middle),
        1 => Some(LinkSlot::Distal),
        _ => None,
    }
}

/// Records symmetric links between `mark_id` and every mark in `nearby`.
///
/// Ids that no longer resolve are skipped. Every remaining neighbor must sit in the region its
/// slot names; otherwise nothing is linked and the mismatch is returned. Returns the neighbors
/// that gained a link.
pub fn link_nearby_marks(
    ladder: &mut Ladder,
    mark_id: MarkId,
    nearby: &NearbyMarks,
) -> Result<Vec<MarkId>, LadderError> {
    let from = ladder
        .region_index_of(mark_id)
        .ok_or(LadderError::MarkNotFound { mark_id })?;
    let mut pending = Vec::with_capacity(nearby.len());
    for (slot, neighbor_id) in nearby.iter() {
        if neighbor_id == mark_id {
            continue;
        }
        let Some(to) = ladder.region_index_of(neighbor_id) else {
            tracing::warn!(%mark_id, %neighbor_id, "nearby mark vanished before linking");
            continue;
        };
        match slot_between(from, to) {
            Some(expected) if expected == slot => pending.push((slot, neighbor_id)),
            Some(_) => return Err(LadderError::LinkSlotMismatch { mark_id, neighbor_id }),
            None => return Err(LadderError::RegionsNotAdjacent { from, to }),
        }
    }

    let mut linked = Vec::with_capacity(pending.len());
    for (slot, neighbor_id) in pending {
        ladder
            .require_mark_mut(neighbor_id)?
            .linked_mut()
            .slot_mut(slot.reciprocal())
            .insert(mark_id);
        ladder
            .require_mark_mut(mark_id)?
            .linked_mut()
            .slot_mut(slot)
            .insert(neighbor_id);
        linked.push(neighbor_id);
    }

    ladder.reassess(std::iter::once(mark_id).chain(linked.iter().copied()));
    tracing::debug!(%mark_id, count = linked.len(), "linked nearby marks");
    Ok(linked)
}

/// Links two specific marks. They must be in the same or vertically adjacent regions.
///
/// Returns the slot `b` occupies in `a`'s link sets.
pub fn link_marks(ladder: &mut Ladder, a: MarkId, b: MarkId) -> Result<LinkSlot, LadderError> {
    if a == b {
        return Err(LadderError::SelfLink { mark_id: a });
    }
    let from = ladder
        .region_index_of(a)
        .ok_or(LadderError::MarkNotFound { mark_id: a })?;
    let to = ladder
        .region_index_of(b)
        .ok_or(LadderError::MarkNotFound { mark_id: b })?;
    let slot = slot_between(from, to).ok_or(LadderError::RegionsNotAdjacent { from, to })?;

    let mut nearby = NearbyMarks::default();
    nearby.slot_mut(slot).insert(b);
    link_nearby_marks(ladder, a, &nearby)?;
    Ok(slot)
}

/// Removes every link touching `mark_id`, on both sides. Already-unlinked marks are fine.
///
/// Returns the former neighbors.
pub fn unlink(ladder: &mut Ladder, mark_id: MarkId) -> Result<Vec<MarkId>, LadderError> {
    let mark = ladder.require_mark_mut(mark_id)?;
    let former = mark.linked().iter().map(|(_, id)| id).collect::<Vec<_>>();
    mark.linked_mut().clear();

    for neighbor_id in &former {
        if let Some(neighbor) = ladder.mark_mut(*neighbor_id) {
            neighbor.linked_mut().remove(mark_id);
        }
    }

    ladder.reassess(std::iter::once(mark_id).chain(former.iter().copied()));
    if !former.is_empty() {
        tracing::debug!(%mark_id, count = former.len(), "unlinked mark");
    }
    Ok(former)
}

/// Moves `mark_id`'s endpoints onto the marks in `nearby` so linked ends coincide.
///
/// Across regions the neighbor keeps its x and the mark's end is pinned to the shared
/// boundary; the earliest-created neighbor wins when several qualify. Within a region the
/// mark's closer end slides along its y onto the neighbor's line. Returns whether the mark
/// changed.
pub fn snap_to_nearby_marks(
    ladder: &mut Ladder,
    mark_id: MarkId,
    nearby: &NearbyMarks,
    viewport: &Viewport,
) -> Result<bool, LadderError> {
    let original = *ladder.require_mark(mark_id)?.segment();
    let span = ladder
        .region_of(mark_id)
        .ok_or(LadderError::MarkNotFound { mark_id })?
        .span();
    let mut segment = original;
    let mut proximal_snapped = false;
    let mut distal_snapped = false;

    if let Some(above) = nearby.proximal.iter().find_map(|id| ladder.mark(*id)) {
        segment.proximal.x = above.segment().distal.x;
        segment.proximal.y = 0.0;
        proximal_snapped = true;
    }
    if let Some(below) = nearby.distal.iter().find_map(|id| ladder.mark(*id)) {
        segment.distal.x = below.segment().proximal.x;
        segment.distal.y = 1.0;
        distal_snapped = true;
    }

    for neighbor in nearby.middle.iter().filter_map(|id| ladder.mark(*id)) {
        let target = neighbor.segment();
        let view_target = viewport.to_view_segment(target, span);
        let proximal_gap =
            distance_to_segment(viewport.to_view_point(segment.proximal, span), &view_target);
        let distal_gap =
            distance_to_segment(viewport.to_view_point(segment.distal, span), &view_target);

        let (end, already) = if proximal_gap <= distal_gap {
            (&mut segment.proximal, &mut proximal_snapped)
        } else {
            (&mut segment.distal, &mut distal_snapped)
        };
        if *already {
            continue;
        }
        end.x = target.x_at_y_or_nearest(*end);
        *already = true;
    }

    if segment == original {
        return Ok(false);
    }
    ladder.require_mark_mut(mark_id)?.set_segment(segment);
    ladder.reassess([mark_id]);
    tracing::trace!(%mark_id, ?segment, "snapped mark");
    Ok(true)
}

/// What [`remove_overlapping_marks`] changed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverlapRemoval {
    /// Duplicates that were deleted.
    pub removed: Vec<MarkId>,
    /// Former neighbors of the deleted marks whose link sets changed, kept marks excluded.
    pub relinked: Vec<MarkId>,
}

/// Deletes marks that duplicate any of `keeping`: same region, with both ends within the
/// threshold of the kept mark's ends. The deleted marks' links move to the mark that
/// absorbed them, and the neighbors on the other end of those links are reported as
/// relinked.
pub fn remove_overlapping_marks(
    ladder: &mut Ladder,
    keeping: &[MarkId],
    proximity: &Proximity,
) -> Result<OverlapRemoval, LadderError> {
    let mut outcome = OverlapRemoval::default();

    for &kept_id in keeping {
        let (region_index, kept) = owned_view_segment(ladder, kept_id, &proximity.viewport)?;
        let Some(span) = ladder.region(region_index).map(|region| region.span()) else {
            continue;
        };

        let duplicates = ladder
            .marks_in_region(region_index)
            .filter(|candidate| candidate.id() != kept_id && !keeping.contains(&candidate.id()))
            .filter(|candidate| {
                let other = proximity.viewport.to_view_segment(candidate.segment(), span);
                kept.proximal.distance(other.proximal) < proximity.threshold
                    && kept.distal.distance(other.distal) < proximity.threshold
            })
            .map(|candidate| candidate.id())
            .collect::<SmallVec<[MarkId; 4]>>();

        for duplicate_id in duplicates {
            let absorbed = ladder.delete_mark(duplicate_id)?;
            for (slot, neighbor_id) in absorbed.linked().iter() {
                if neighbor_id == kept_id || !ladder.contains_mark(neighbor_id) {
                    continue;
                }
                let mut transfer = NearbyMarks::default();
                transfer.slot_mut(slot).insert(neighbor_id);
                link_nearby_marks(ladder, kept_id, &transfer)?;
                if !keeping.contains(&neighbor_id) && !outcome.relinked.contains(&neighbor_id) {
                    outcome.relinked.push(neighbor_id);
                }
            }
            outcome.removed.push(duplicate_id);
        }
    }

    outcome.relinked.retain(|id| !outcome.removed.contains(id));
    if !outcome.removed.is_empty() {
        tracing::debug!(
            removed = outcome.removed.len(),
            relinked = outcome.relinked.len(),
            "removed overlapping marks"
        );
    }
    Ok(outcome)
}

/// A link that breaks the symmetry or adjacency invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkViolation {
    Dangling { mark_id: MarkId, neighbor_id: MarkId },
    Asymmetric { mark_id: MarkId, neighbor_id: MarkId, slot: LinkSlot },
    WrongRegion { mark_id: MarkId, neighbor_id: MarkId, slot: LinkSlot },
}

impl fmt::Display for LinkViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dangling { mark_id, neighbor_id } => {
                write!(f, "mark {mark_id} links to missing mark {neighbor_id}")
            }
            Self::Asymmetric { mark_id, neighbor_id, slot } => write!(
                f,
                "mark {mark_id} links {neighbor_id} as {slot:?} without a reciprocal link"
            ),
            Self::WrongRegion { mark_id, neighbor_id, slot } => write!(
                f,
                "mark {mark_id} links {neighbor_id} as {slot:?} but their regions disagree"
            ),
        }
    }
}

impl std::error::Error for LinkViolation {}

/// Verifies that every link is reciprocated from the matching slot and points at a mark in
/// the region that slot implies.
pub fn check_link_symmetry(ladder: &Ladder) -> Result<(), LinkViolation> {
    for (mark_id, mark) in ladder.marks() {
        let mark_id = *mark_id;
        let region_index = ladder.region_index_of(mark_id);
        for (slot, neighbor_id) in mark.linked().iter() {
            let Some(neighbor) = ladder.mark(neighbor_id) else {
                return Err(LinkViolation::Dangling { mark_id, neighbor_id });
            };
            if !neighbor.linked().slot(slot.reciprocal()).contains(&mark_id) {
                return Err(LinkViolation::Asymmetric { mark_id, neighbor_id, slot });
            }
            let expected = region_index.and_then(|index| match slot {
                LinkSlot::Proximal => index.checked_sub(1),
                LinkSlot::Middle => Some(index),
                LinkSlot::Distal => Some(index + 1),
            });
            if expected.is_none() || expected != ladder.region_index_of(neighbor_id) {
                return Err(LinkViolation::WrongRegion { mark_id, neighbor_id, slot });
            }
        }
    }
    Ok(())
}
