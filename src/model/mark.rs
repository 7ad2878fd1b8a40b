// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use crate::geometry::Segment;

use super::ids::MarkId;

/// Which part of a mark stays under the user's finger while it is dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    Proximal,
    #[default]
    Middle,
    Distal,
    None,
}

impl Anchor {
    /// Next anchor in the proximal → middle → distal cycle used when a mark is tapped
    /// repeatedly.
    pub fn cycled(self) -> Self {
        match self {
            Self::Proximal => Self::Middle,
            Self::Middle => Self::Distal,
            Self::Distal | Self::None => Self::Proximal,
        }
    }
}

/// An end of a mark, or neither. Used for inferred block and impulse origin sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endpoint {
    #[default]
    None,
    Proximal,
    Distal,
}

/// Presentation state. Only `Attached` matters to the engine: it marks the drag target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MarkMode {
    #[default]
    Normal,
    Attached,
    Selected,
    Linked,
    Grouped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Where a linked neighbor sits relative to a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkSlot {
    /// Region directly above.
    Proximal,
    /// Same region.
    Middle,
    /// Region directly below.
    Distal,
}

impl LinkSlot {
    /// The slot the neighbor uses to point back at us.
    pub fn reciprocal(self) -> Self {
        match self {
            Self::Proximal => Self::Distal,
            Self::Middle => Self::Middle,
            Self::Distal => Self::Proximal,
        }
    }

    pub const ALL: [LinkSlot; 3] = [LinkSlot::Proximal, LinkSlot::Middle, LinkSlot::Distal];
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkedMarkIds {
    pub proximal: BTreeSet<MarkId>,
    pub middle: BTreeSet<MarkId>,
    pub distal: BTreeSet<MarkId>,
}

impl LinkedMarkIds {
    pub fn slot(&self, slot: LinkSlot) -> &BTreeSet<MarkId> {
        match slot {
            LinkSlot::Proximal => &self.proximal,
            LinkSlot::Middle => &self.middle,
            LinkSlot::Distal => &self.distal,
        }
    }

    pub fn slot_mut(&mut self, slot: LinkSlot) -> &mut BTreeSet<MarkId> {
        match slot {
            LinkSlot::Proximal => &mut self.proximal,
            LinkSlot::Middle => &mut self.middle,
            LinkSlot::Distal => &mut self.distal,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.proximal.is_empty() && self.middle.is_empty() && self.distal.is_empty()
    }

    pub fn len(&self) -> usize {
        self.proximal.len() + self.middle.len() + self.distal.len()
    }

    pub fn contains(&self, mark_id: MarkId) -> bool {
        self.slot_of(mark_id).is_some()
    }

    pub fn slot_of(&self, mark_id: MarkId) -> Option<LinkSlot> {
        LinkSlot::ALL
            .into_iter()
            .find(|slot| self.slot(*slot).contains(&mark_id))
    }

    /// Removes `mark_id` from whichever slot holds it. Returns whether anything changed.
    pub fn remove(&mut self, mark_id: MarkId) -> bool {
        let mut removed = false;
        for slot in LinkSlot::ALL {
            removed |= self.slot_mut(slot).remove(&mark_id);
        }
        removed
    }

    /// Every linked id paired with its slot, proximal first.
    pub fn iter(&self) -> impl Iterator<Item = (LinkSlot, MarkId)> + '_ {
        LinkSlot::ALL
            .into_iter()
            .flat_map(move |slot| self.slot(slot).iter().map(move |id| (slot, *id)))
    }

    pub fn clear(&mut self) {
        self.proximal.clear();
        self.middle.clear();
        self.distal.clear();
    }
}

/// A conduction event drawn as a segment inside one region.
///
/// The segment is region-relative: x is the shared horizontal position, y is the fraction of
/// the owning region's height (`0` = proximal boundary, `1` = distal boundary).
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    id: MarkId,
    segment: Segment,
    anchor: Anchor,
    linked: LinkedMarkIds,
    line_style: Option<LineStyle>,
    block_site: Endpoint,
    impulse_origin_site: Endpoint,
    mode: MarkMode,
}

impl Mark {
    pub(crate) fn new(id: MarkId, segment: Segment) -> Self {
        Self {
            id,
            segment,
            anchor: Anchor::default(),
            linked: LinkedMarkIds::default(),
            line_style: None,
            block_site: Endpoint::None,
            impulse_origin_site: Endpoint::None,
            mode: MarkMode::Normal,
        }
    }

    pub fn id(&self) -> MarkId {
        self.id
    }

    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    pub fn set_segment(&mut self, segment: Segment) {
        self.segment = segment;
    }

    pub(crate) fn segment_mut(&mut self) -> &mut Segment {
        &mut self.segment
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = anchor;
    }

    pub fn linked(&self) -> &LinkedMarkIds {
        &self.linked
    }

    /// Link sets are kept symmetric by [`crate::linking`]; direct edits stay in-crate.
    pub(crate) fn linked_mut(&mut self) -> &mut LinkedMarkIds {
        &mut self.linked
    }

    /// Explicit style override; `None` means the region's style applies.
    pub fn line_style(&self) -> Option<LineStyle> {
        self.line_style
    }

    pub fn set_line_style(&mut self, line_style: Option<LineStyle>) {
        self.line_style = line_style;
    }

    pub fn block_site(&self) -> Endpoint {
        self.block_site
    }

    pub fn impulse_origin_site(&self) -> Endpoint {
        self.impulse_origin_site
    }

    pub(crate) fn set_derived(&mut self, block_site: Endpoint, impulse_origin_site: Endpoint) {
        self.block_site = block_site;
        self.impulse_origin_site = impulse_origin_site;
    }

    pub fn mode(&self) -> MarkMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: MarkMode) {
        self.mode = mode;
    }

    pub fn is_attached(&self) -> bool {
        self.mode == MarkMode::Attached
    }
}
