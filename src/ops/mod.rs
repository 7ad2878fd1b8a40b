// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for ladders.
//!
//! Operations are applied with optimistic concurrency (revision checks) and produce a minimal
//! delta that the UI can use to decide what to redraw.

use std::collections::HashSet;
use std::fmt;

use crate::config::EngineConfig;
use crate::geometry::{Point, Segment, Viewport};
use crate::linking::{
    check_link_symmetry, find_nearby_marks, link_marks, link_nearby_marks,
    remove_overlapping_marks, snap_to_nearby_marks, unlink, Proximity,
};
use crate::model::{Anchor, Ladder, LadderError, LineStyle, MarkId};
use crate::movement::{move_mark, settle_mark, Movement};

#[derive(Debug, Clone, PartialEq)]
pub enum LadderOp {
    AddMark { region_index: usize, segment: Segment },
    DeleteMark { mark_id: MarkId },
    DeleteMarksInRegion { region_index: usize },
    MoveMark { mark_id: MarkId, movement: Movement, target: Point },
    SetAnchor { mark_id: MarkId, anchor: Anchor },
    SetLineStyle { mark_id: MarkId, line_style: Option<LineStyle> },
    Attach { mark_id: MarkId },
    Unattach { mark_id: MarkId },
    /// Links `mark_id` to every mark within the configured link threshold.
    LinkNearby { mark_id: MarkId },
    Link { a: MarkId, b: MarkId },
    Unlink { mark_id: MarkId },
    /// Snaps `mark_id` onto the marks it is already linked to.
    Snap { mark_id: MarkId },
    RemoveOverlapping { keeping: Vec<MarkId> },
    /// The drop half of a drag gesture: link, snap, propagate and absorb duplicates.
    Settle { mark_id: MarkId },
}

/// Viewport and tunables the geometric ops measure against.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OpContext {
    pub viewport: Viewport,
    pub config: EngineConfig,
}

impl OpContext {
    pub fn new(viewport: Viewport, config: EngineConfig) -> Self {
        Self { viewport, config }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub new_rev: u64,
    pub applied: usize,
    pub delta: Delta,
}

/// Minimal delta describing which marks changed as the result of applying ops.
///
/// `updated` covers geometry, links, style and derived state alike. Each list is sorted by id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<MarkId>,
    pub removed: Vec<MarkId>,
    pub updated: Vec<MarkId>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: HashSet<MarkId>,
    removed: HashSet<MarkId>,
    updated: HashSet<MarkId>,
}

impl DeltaBuilder {
    fn record_added(&mut self, mark_id: MarkId) {
        self.removed.remove(&mark_id);
        self.updated.remove(&mark_id);
        self.added.insert(mark_id);
    }

    fn record_removed(&mut self, mark_id: MarkId) {
        self.updated.remove(&mark_id);
        // Added and removed within one batch: the caller never saw it.
        if !self.added.remove(&mark_id) {
            self.removed.insert(mark_id);
        }
    }

    fn record_updated(&mut self, mark_id: MarkId) {
        if self.added.contains(&mark_id) || self.removed.contains(&mark_id) {
            return;
        }
        self.updated.insert(mark_id);
    }

    fn record_all_updated<I>(&mut self, mark_ids: I)
    where
        I: IntoIterator<Item = MarkId>,
    {
        for mark_id in mark_ids {
            self.record_updated(mark_id);
        }
    }

    fn finish(self) -> Delta {
        let mut added = self.added.into_iter().collect::<Vec<_>>();
        let mut removed = self.removed.into_iter().collect::<Vec<_>>();
        let mut updated = self.updated.into_iter().collect::<Vec<_>>();

        added.sort_unstable();
        removed.sort_unstable();
        updated.sort_unstable();

        Delta { added, removed, updated }
    }
}

pub fn apply_ops(
    ladder: &mut Ladder,
    base_rev: u64,
    ops: &[LadderOp],
    context: &OpContext,
) -> Result<ApplyResult, ApplyError> {
    let current_rev = ladder.rev();
    if base_rev != current_rev {
        return Err(ApplyError::Conflict { base_rev, current_rev });
    }

    if ops.is_empty() {
        return Ok(ApplyResult { new_rev: current_rev, applied: 0, delta: Delta::default() });
    }

    let mut next = ladder.clone();
    let mut delta = DeltaBuilder::default();

    for op in ops {
        apply_ladder_op(&mut next, op, context, &mut delta)?;
    }
    debug_assert!(
        check_link_symmetry(&next).is_ok(),
        "ops left asymmetric links: {:?}",
        check_link_symmetry(&next)
    );
    debug_assert!(next.check_registry().is_ok(), "ops left an inconsistent registry");

    next.bump_rev();
    *ladder = next;
    let new_rev = ladder.rev();
    tracing::debug!(applied = ops.len(), new_rev, "applied ladder ops");

    Ok(ApplyResult { new_rev, applied: ops.len(), delta: delta.finish() })
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApplyError {
    Conflict { base_rev: u64, current_rev: u64 },
    Ladder(LadderError),
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict { base_rev, current_rev } => {
                write!(f, "stale base_rev (base_rev={base_rev}, current_rev={current_rev})")
            }
            Self::Ladder(err) => write!(f, "ladder op failed: {err}"),
        }
    }
}

impl std::error::Error for ApplyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Conflict { .. } => None,
            Self::Ladder(err) => Some(err),
        }
    }
}

impl From<LadderError> for ApplyError {
    fn from(err: LadderError) -> Self {
        Self::Ladder(err)
    }
}

// Extracted per-op application.
include!("ops_impl.rs");
