// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use smol_str::SmolStr;

use crate::geometry::{Segment, Viewport};
use crate::query::derived::{assess_block_site, assess_impulse_origin_site};

use super::ids::MarkId;
use super::mark::{Mark, MarkMode};
use super::region::Region;

/// Default height of a template region, in view units.
pub const DEFAULT_REGION_HEIGHT: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub enum LadderError {
    MarkNotFound { mark_id: MarkId },
    RegionNotFound { index: usize },
    RegionNotMarkable { index: usize },
    InvalidRegionBoundaries { proximal: f64, distal: f64 },
    RegionsNotAdjacent { from: usize, to: usize },
    SelfLink { mark_id: MarkId },
    LinkSlotMismatch { mark_id: MarkId, neighbor_id: MarkId },
}

impl fmt::Display for LadderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MarkNotFound { mark_id } => write!(f, "mark not found (id={mark_id})"),
            Self::RegionNotFound { index } => write!(f, "region not found (index={index})"),
            Self::RegionNotMarkable { index } => {
                write!(f, "region does not accept marks (index={index})")
            }
            Self::InvalidRegionBoundaries { proximal, distal } => write!(
                f,
                "invalid region boundaries (proximal={proximal}, distal={distal})"
            ),
            Self::RegionsNotAdjacent { from, to } => {
                write!(f, "regions are not adjacent (from={from}, to={to})")
            }
            Self::SelfLink { mark_id } => write!(f, "mark cannot link to itself (id={mark_id})"),
            Self::LinkSlotMismatch { mark_id, neighbor_id } => write!(
                f,
                "link slot does not match the neighbor's region (id={mark_id}, neighbor={neighbor_id})"
            ),
        }
    }
}

impl std::error::Error for LadderError {}

/// The top-level container: regions top to bottom, plus the arena that owns every mark.
///
/// Marks refer to each other by [`MarkId`]; `registry` answers "which region owns this mark"
/// without scanning region lists.
#[derive(Debug, Clone, PartialEq)]
pub struct Ladder {
    regions: Vec<Region>,
    marks: BTreeMap<MarkId, Mark>,
    registry: BTreeMap<MarkId, usize>,
    next_mark_id: MarkId,
    rev: u64,
}

impl Default for Ladder {
    fn default() -> Self {
        Self::new()
    }
}

impl Ladder {
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
            marks: BTreeMap::new(),
            registry: BTreeMap::new(),
            next_mark_id: MarkId::new(1),
            rev: 0,
        }
    }

    /// Evenly stacked regions, each `region_height` tall, starting at view y = 0.
    pub fn with_regions<I, S>(names: I, region_height: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let mut ladder = Self::new();
        for (idx, name) in names.into_iter().enumerate() {
            let top = idx as f64 * region_height;
            ladder.push_region_unchecked(Region::new(name, top, top + region_height));
        }
        if !ladder.regions.is_empty() {
            ladder.regions[0].set_activated(true);
        }
        ladder
    }

    /// The standard atrium / AV node / ventricle ladder.
    pub fn default_ladder() -> Self {
        let mut ladder = Self::with_regions(["A", "AV", "V"], DEFAULT_REGION_HEIGHT);
        let descriptions = ["Atrium", "Atrioventricular node", "Ventricle"];
        for (region, description) in ladder.regions.iter_mut().zip(descriptions) {
            region.set_description(description);
        }
        ladder
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    pub fn region_mut(&mut self, index: usize) -> Option<&mut Region> {
        self.regions.get_mut(index)
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Appends a region below the current bottom region.
    pub fn add_region(&mut self, region: Region) -> Result<usize, LadderError> {
        let (proximal, distal) = (region.proximal_boundary(), region.distal_boundary());
        let below_previous = self
            .regions
            .last()
            .map_or(true, |last| proximal >= last.distal_boundary());
        if !(distal > proximal) || !below_previous {
            return Err(LadderError::InvalidRegionBoundaries { proximal, distal });
        }
        Ok(self.push_region_unchecked(region))
    }

    fn push_region_unchecked(&mut self, mut region: Region) -> usize {
        let index = self.regions.len();
        region.set_index(index);
        self.regions.push(region);
        index
    }

    /// Removes a region together with every mark it owns. Returns the deleted mark ids.
    pub fn remove_region(&mut self, index: usize) -> Result<Vec<MarkId>, LadderError> {
        let deleted = self.delete_marks_in_region(index)?;
        let removed = self.regions.remove(index);
        for (idx, region) in self.regions.iter_mut().enumerate().skip(index) {
            region.set_index(idx);
        }
        for owner in self.registry.values_mut() {
            if *owner > index {
                *owner -= 1;
            }
        }
        if removed.is_activated() && !self.regions.is_empty() {
            let fallback = index.min(self.regions.len() - 1);
            self.regions[fallback].set_activated(true);
        }
        tracing::debug!(index, deleted = deleted.len(), "removed region");
        Ok(deleted)
    }

    /// Moves a region's boundaries. The top-to-bottom order must still hold afterwards.
    pub fn set_region_boundaries(
        &mut self,
        index: usize,
        proximal: f64,
        distal: f64,
    ) -> Result<(), LadderError> {
        if index >= self.regions.len() {
            return Err(LadderError::RegionNotFound { index });
        }
        let above_ok = index == 0 || self.regions[index - 1].distal_boundary() <= proximal;
        let below_ok = self
            .regions
            .get(index + 1)
            .map_or(true, |below| distal <= below.proximal_boundary());
        if !(distal > proximal) || !above_ok || !below_ok {
            return Err(LadderError::InvalidRegionBoundaries { proximal, distal });
        }
        self.regions[index].set_boundaries(proximal, distal);
        Ok(())
    }

    /// Makes `index` the only activated region (the one new marks go to).
    pub fn activate_region(&mut self, index: usize) -> Result<(), LadderError> {
        if index >= self.regions.len() {
            return Err(LadderError::RegionNotFound { index });
        }
        for region in &mut self.regions {
            region.set_activated(region.index() == index);
        }
        Ok(())
    }

    pub fn activated_region(&self) -> Option<usize> {
        self.regions.iter().position(Region::is_activated)
    }

    /// Index of the region whose vertical span contains `view_y`.
    pub fn region_at_view_y(&self, view_y: f64) -> Option<usize> {
        self.regions
            .iter()
            .position(|region| region.span().contains_view_y(view_y))
    }

    pub fn marks(&self) -> &BTreeMap<MarkId, Mark> {
        &self.marks
    }

    pub fn mark(&self, mark_id: MarkId) -> Option<&Mark> {
        self.marks.get(&mark_id)
    }

    pub fn mark_mut(&mut self, mark_id: MarkId) -> Option<&mut Mark> {
        self.marks.get_mut(&mark_id)
    }

    pub fn contains_mark(&self, mark_id: MarkId) -> bool {
        self.marks.contains_key(&mark_id)
    }

    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }

    pub(crate) fn require_mark(&self, mark_id: MarkId) -> Result<&Mark, LadderError> {
        self.marks
            .get(&mark_id)
            .ok_or(LadderError::MarkNotFound { mark_id })
    }

    pub(crate) fn require_mark_mut(&mut self, mark_id: MarkId) -> Result<&mut Mark, LadderError> {
        self.marks
            .get_mut(&mark_id)
            .ok_or(LadderError::MarkNotFound { mark_id })
    }

    /// Index of the region that owns `mark_id`.
    pub fn region_index_of(&self, mark_id: MarkId) -> Option<usize> {
        self.registry.get(&mark_id).copied()
    }

    pub fn region_of(&self, mark_id: MarkId) -> Option<&Region> {
        self.region_index_of(mark_id)
            .and_then(|index| self.regions.get(index))
    }

    /// Marks of one region, in the region's insertion order.
    pub fn marks_in_region(&self, index: usize) -> impl Iterator<Item = &Mark> + '_ {
        self.regions
            .get(index)
            .map(Region::marks)
            .unwrap_or_default()
            .iter()
            .filter_map(|mark_id| self.marks.get(mark_id))
    }

    /// The mark's segment in view coordinates.
    pub fn view_segment(&self, mark_id: MarkId, viewport: &Viewport) -> Option<Segment> {
        let mark = self.marks.get(&mark_id)?;
        let region = self.region_of(mark_id)?;
        Some(viewport.to_view_segment(mark.segment(), region.span()))
    }

    pub fn add_mark(&mut self, region_index: usize, segment: Segment) -> Result<MarkId, LadderError> {
        let region = self
            .regions
            .get_mut(region_index)
            .ok_or(LadderError::RegionNotFound { index: region_index })?;
        if !region.is_markable() {
            return Err(LadderError::RegionNotMarkable { index: region_index });
        }

        let mark_id = self.next_mark_id;
        self.next_mark_id = mark_id.next();
        region.push_mark(mark_id);
        self.registry.insert(mark_id, region_index);
        self.marks.insert(mark_id, Mark::new(mark_id, segment));
        self.reassess([mark_id]);
        tracing::debug!(%mark_id, region_index, "added mark");
        Ok(mark_id)
    }

    /// Deletes a mark and scrubs its id from every neighbor. Returns the removed mark, whose
    /// link sets still name the former neighbors.
    pub fn delete_mark(&mut self, mark_id: MarkId) -> Result<Mark, LadderError> {
        let mark = self
            .marks
            .remove(&mark_id)
            .ok_or(LadderError::MarkNotFound { mark_id })?;
        let neighbors = mark.linked().iter().map(|(_, id)| id).collect::<Vec<_>>();
        for neighbor_id in &neighbors {
            if let Some(neighbor) = self.marks.get_mut(neighbor_id) {
                neighbor.linked_mut().remove(mark_id);
            }
        }

        match self.registry.remove(&mark_id) {
            Some(index) => {
                let removed = self
                    .regions
                    .get_mut(index)
                    .is_some_and(|region| region.remove_mark(mark_id));
                debug_assert!(removed, "registry pointed at a region without the mark");
            }
            None => debug_assert!(false, "mark {mark_id} had no registry entry"),
        }

        self.reassess(neighbors);
        tracing::debug!(%mark_id, "deleted mark");
        Ok(mark)
    }

    pub fn delete_marks_in_region(&mut self, index: usize) -> Result<Vec<MarkId>, LadderError> {
        let mark_ids = self
            .regions
            .get(index)
            .ok_or(LadderError::RegionNotFound { index })?
            .marks()
            .to_vec();
        for mark_id in &mark_ids {
            self.delete_mark(*mark_id)?;
        }
        Ok(mark_ids)
    }

    pub fn attach_mark(&mut self, mark_id: MarkId) -> Result<(), LadderError> {
        self.require_mark_mut(mark_id)?.set_mode(MarkMode::Attached);
        Ok(())
    }

    pub fn unattach_mark(&mut self, mark_id: MarkId) -> Result<(), LadderError> {
        self.require_mark_mut(mark_id)?.set_mode(MarkMode::Normal);
        Ok(())
    }

    /// The mark currently receiving drag input, if any.
    pub fn attached_mark(&self) -> Option<MarkId> {
        self.marks
            .values()
            .find(|mark| mark.is_attached())
            .map(Mark::id)
    }

    /// Recomputes block and impulse origin for the given marks. Unknown ids are skipped.
    pub fn reassess<I>(&mut self, mark_ids: I)
    where
        I: IntoIterator<Item = MarkId>,
    {
        for mark_id in mark_ids {
            let Some(mark) = self.marks.get_mut(&mark_id) else {
                continue;
            };
            let block = assess_block_site(mark);
            let origin = assess_impulse_origin_site(mark);
            mark.set_derived(block, origin);
        }
    }

    pub fn reassess_all(&mut self) {
        let ids = self.marks.keys().copied().collect::<Vec<_>>();
        self.reassess(ids);
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn set_rev(&mut self, rev: u64) {
        self.rev = rev;
    }

    pub fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }

    /// Checks that every mark has exactly one owner and that region lists and the registry
    /// agree. Returns the first inconsistent mark id.
    pub fn check_registry(&self) -> Result<(), MarkId> {
        let mut listed = 0usize;
        for region in &self.regions {
            for mark_id in region.marks() {
                listed += 1;
                if self.registry.get(mark_id) != Some(&region.index())
                    || !self.marks.contains_key(mark_id)
                {
                    return Err(*mark_id);
                }
            }
        }
        if listed != self.registry.len() || listed != self.marks.len() {
            let orphan = self
                .marks
                .keys()
                .find(|id| !self.registry.contains_key(id))
                .or_else(|| self.registry.keys().find(|id| !self.marks.contains_key(id)))
                .copied()
                .unwrap_or(MarkId::new(0));
            return Err(orphan);
        }
        Ok(())
    }
}
