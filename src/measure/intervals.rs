// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smallvec::SmallVec;

use super::Calibration;
use crate::geometry::GEOMETRY_EPSILON;
use crate::model::{Ladder, LadderError, MarkId};

/// Which region boundary an interval is measured along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    Proximal,
    Distal,
}

/// Horizontal distance between two consecutive marks touching the same boundary.
///
/// Positions are kept in region coordinates; conversion to time happens through the
/// calibration at read time so intervals survive zoom changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    boundary: Boundary,
    first_mark: MarkId,
    second_mark: MarkId,
    first_x: f64,
    second_x: f64,
}

impl Interval {
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn first_mark(&self) -> MarkId {
        self.first_mark
    }

    pub fn second_mark(&self) -> MarkId {
        self.second_mark
    }

    pub fn first_x(&self) -> f64 {
        self.first_x
    }

    pub fn second_x(&self) -> f64 {
        self.second_x
    }

    pub fn region_width(&self) -> f64 {
        self.second_x - self.first_x
    }

    /// Calibrated value rounded to whole time units.
    pub fn value(&self, calibration: &Calibration) -> Option<i64> {
        let time = calibration.region_width_to_time(self.region_width())?;
        Some(time.round() as i64)
    }

    pub fn display_value(&self, calibration: &Calibration) -> Option<String> {
        let value = self.value(calibration)?;
        let mut buffer = itoa::Buffer::new();
        Some(buffer.format(value).to_owned())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionIntervals {
    pub proximal: Vec<Interval>,
    pub distal: Vec<Interval>,
}

impl RegionIntervals {
    pub fn is_empty(&self) -> bool {
        self.proximal.is_empty() && self.distal.is_empty()
    }

    pub fn boundary(&self, boundary: Boundary) -> &[Interval] {
        match boundary {
            Boundary::Proximal => &self.proximal,
            Boundary::Distal => &self.distal,
        }
    }

    /// Both boundaries, proximal first.
    pub fn iter(&self) -> impl Iterator<Item = &Interval> + '_ {
        self.proximal.iter().chain(self.distal.iter())
    }
}

/// Collects the intervals between marks that touch either boundary of `region_index`.
///
/// A mark touches the proximal boundary when its proximal y is within `tolerance` of 0, and
/// the distal boundary when its distal y is within `tolerance` of 1. Marks are ordered by the
/// x of the touching endpoint, ties by id.
pub fn region_intervals(
    ladder: &Ladder,
    region_index: usize,
    tolerance: f64,
) -> Result<RegionIntervals, LadderError> {
    if ladder.region(region_index).is_none() {
        return Err(LadderError::RegionNotFound { index: region_index });
    }

    let mut proximal: SmallVec<[(f64, MarkId); 16]> = SmallVec::new();
    let mut distal: SmallVec<[(f64, MarkId); 16]> = SmallVec::new();
    for mark in ladder.marks_in_region(region_index) {
        let segment = mark.segment();
        if segment.proximal.y <= tolerance + GEOMETRY_EPSILON {
            proximal.push((segment.proximal.x, mark.id()));
        }
        if 1.0 - segment.distal.y <= tolerance + GEOMETRY_EPSILON {
            distal.push((segment.distal.x, mark.id()));
        }
    }

    Ok(RegionIntervals {
        proximal: consecutive(Boundary::Proximal, proximal),
        distal: consecutive(Boundary::Distal, distal),
    })
}

fn consecutive(boundary: Boundary, mut touching: SmallVec<[(f64, MarkId); 16]>) -> Vec<Interval> {
    touching.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    touching
        .windows(2)
        .map(|pair| Interval {
            boundary,
            first_mark: pair[0].1,
            second_mark: pair[1].1,
            first_x: pair[0].0,
            second_x: pair[1].0,
        })
        .collect()
}
