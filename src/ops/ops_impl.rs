// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Per-op mutation helpers used by `apply_ops`.
/// Keeps `ops::mod` focused on public op types and orchestration.
fn apply_ladder_op(
    ladder: &mut Ladder,
    op: &LadderOp,
    context: &OpContext,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    let viewport = &context.viewport;
    match op {
        LadderOp::AddMark { region_index, segment } => {
            let mark_id = ladder.add_mark(*region_index, *segment)?;
            delta.record_added(mark_id);
        }
        LadderOp::DeleteMark { mark_id } => {
            let removed = ladder.delete_mark(*mark_id)?;
            delta.record_removed(*mark_id);
            delta.record_all_updated(removed.linked().iter().map(|(_, id)| id));
        }
        LadderOp::DeleteMarksInRegion { region_index } => {
            // Neighbors across the region boundaries lose their links.
            let touched = ladder
                .marks_in_region(*region_index)
                .flat_map(|mark| mark.linked().iter().map(|(_, id)| id))
                .collect::<Vec<_>>();
            for mark_id in ladder.delete_marks_in_region(*region_index)? {
                delta.record_removed(mark_id);
            }
            delta.record_all_updated(touched.into_iter().filter(|id| ladder.contains_mark(*id)));
        }
        LadderOp::MoveMark { mark_id, movement, target } => {
            let moved = move_mark(ladder, *mark_id, *movement, *target, viewport)?;
            delta.record_all_updated(moved);
        }
        LadderOp::SetAnchor { mark_id, anchor } => {
            ladder.require_mark_mut(*mark_id)?.set_anchor(*anchor);
            delta.record_updated(*mark_id);
        }
        LadderOp::SetLineStyle { mark_id, line_style } => {
            ladder.require_mark_mut(*mark_id)?.set_line_style(*line_style);
            delta.record_updated(*mark_id);
        }
        LadderOp::Attach { mark_id } => {
            ladder.attach_mark(*mark_id)?;
            delta.record_updated(*mark_id);
        }
        LadderOp::Unattach { mark_id } => {
            ladder.unattach_mark(*mark_id)?;
            delta.record_updated(*mark_id);
        }
        LadderOp::LinkNearby { mark_id } => {
            let proximity = Proximity::linking(*viewport, &context.config);
            let nearby = find_nearby_marks(ladder, *mark_id, &proximity)?;
            let linked = link_nearby_marks(ladder, *mark_id, &nearby)?;
            if !linked.is_empty() {
                delta.record_updated(*mark_id);
                delta.record_all_updated(linked);
            }
        }
        LadderOp::Link { a, b } => {
            link_marks(ladder, *a, *b)?;
            delta.record_updated(*a);
            delta.record_updated(*b);
        }
        LadderOp::Unlink { mark_id } => {
            let former = unlink(ladder, *mark_id)?;
            if !former.is_empty() {
                delta.record_updated(*mark_id);
                delta.record_all_updated(former);
            }
        }
        LadderOp::Snap { mark_id } => {
            let linked = ladder.require_mark(*mark_id)?.linked().clone();
            if snap_to_nearby_marks(ladder, *mark_id, &linked, viewport)? {
                delta.record_updated(*mark_id);
            }
        }
        LadderOp::RemoveOverlapping { keeping } => {
            let proximity = Proximity::linking(*viewport, &context.config);
            let outcome = remove_overlapping_marks(ladder, keeping, &proximity)?;
            if !outcome.removed.is_empty() {
                for mark_id in outcome.removed {
                    delta.record_removed(mark_id);
                }
                let kept = keeping.iter().copied().filter(|id| ladder.contains_mark(*id));
                delta.record_all_updated(kept);
                delta.record_all_updated(outcome.relinked);
            }
        }
        LadderOp::Settle { mark_id } => {
            let outcome = settle_mark(ladder, *mark_id, viewport, &context.config)?;
            for removed in outcome.removed {
                delta.record_removed(removed);
            }
            if !outcome.linked.is_empty() {
                delta.record_updated(*mark_id);
            }
            delta.record_all_updated(outcome.linked);
            delta.record_all_updated(outcome.updated);
        }
    }
    Ok(())
}
