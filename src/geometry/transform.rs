// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Conversion between region-relative and view coordinates.
//!
//! Region-relative x is a zoom-independent horizontal position shared by every region; view x
//! is that position after scaling and scrolling. Region-relative y is a fraction of the owning
//! region's height, view y is absolute.

use super::{Point, Segment};

pub fn to_view_x(region_x: f64, offset: f64, scale: f64) -> f64 {
    scale * region_x - offset
}

pub fn to_region_x(view_x: f64, offset: f64, scale: f64) -> f64 {
    (view_x + offset) / scale
}

/// Horizontal zoom and scroll state supplied by the scroll/zoom subsystem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub offset: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { scale: 1.0, offset: 0.0 }
    }
}

impl Viewport {
    pub fn new(scale: f64, offset: f64) -> Self {
        Self { scale, offset }
    }

    /// Like [`Viewport::new`] but rejects a scale that cannot be inverted.
    pub fn try_new(scale: f64, offset: f64) -> Option<Self> {
        (scale.is_finite() && scale > 0.0 && offset.is_finite()).then_some(Self { scale, offset })
    }

    pub fn to_view_x(&self, region_x: f64) -> f64 {
        to_view_x(region_x, self.offset, self.scale)
    }

    pub fn to_region_x(&self, view_x: f64) -> f64 {
        to_region_x(view_x, self.offset, self.scale)
    }

    pub fn to_view_point(&self, point: Point, span: RegionSpan) -> Point {
        Point::new(self.to_view_x(point.x), span.to_view_y(point.y))
    }

    pub fn to_region_point(&self, point: Point, span: RegionSpan) -> Point {
        Point::new(self.to_region_x(point.x), span.to_region_y(point.y))
    }

    pub fn to_view_segment(&self, segment: &Segment, span: RegionSpan) -> Segment {
        Segment::new(
            self.to_view_point(segment.proximal, span),
            self.to_view_point(segment.distal, span),
        )
    }

    pub fn to_region_segment(&self, segment: &Segment, span: RegionSpan) -> Segment {
        Segment::new(
            self.to_region_point(segment.proximal, span),
            self.to_region_point(segment.distal, span),
        )
    }
}

/// Vertical extent of a region in view space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionSpan {
    pub proximal: f64,
    pub distal: f64,
}

impl RegionSpan {
    pub fn new(proximal: f64, distal: f64) -> Self {
        Self { proximal, distal }
    }

    pub fn try_new(proximal: f64, distal: f64) -> Option<Self> {
        let height = distal - proximal;
        (proximal.is_finite() && distal.is_finite() && height.abs() > f64::EPSILON)
            .then_some(Self { proximal, distal })
    }

    pub fn height(&self) -> f64 {
        self.distal - self.proximal
    }

    pub fn to_view_y(&self, region_y: f64) -> f64 {
        self.proximal + region_y * self.height()
    }

    pub fn to_region_y(&self, view_y: f64) -> f64 {
        (view_y - self.proximal) / self.height()
    }

    pub fn contains_view_y(&self, view_y: f64) -> bool {
        view_y >= self.proximal && view_y <= self.distal
    }
}
