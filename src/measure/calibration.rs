// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::geometry::Segment;

/// Pixel-to-time conversion that stays valid across zoom changes.
///
/// The factor is recorded at the zoom level in effect when the user calibrated; afterwards
/// `current_cal_factor` rescales it so the same on-screen span keeps reading the same time.
///
/// `current_zoom` is the only zoom the measurement code reads. Region-space widths are scaled
/// by it before conversion, so keep it current with [`Calibration::set_zoom`] whenever the
/// viewport scale changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    original_zoom: f64,
    current_zoom: f64,
    original_cal_factor: f64,
    is_calibrated: bool,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            original_zoom: 1.0,
            current_zoom: 1.0,
            original_cal_factor: 1.0,
            is_calibrated: false,
        }
    }
}

impl Calibration {
    /// Records that `view_width` pixels at `zoom` span `reference_interval` time units.
    ///
    /// Returns `None` (and leaves the calibration untouched) for a non-positive width or
    /// zoom.
    pub fn calibrate(&mut self, view_width: f64, zoom: f64, reference_interval: f64) -> Option<()> {
        let valid = |value: f64| value.is_finite() && value > 0.0;
        if !valid(view_width) || !valid(zoom) || !valid(reference_interval) {
            return None;
        }
        self.original_cal_factor = reference_interval / view_width;
        self.original_zoom = zoom;
        self.current_zoom = zoom;
        self.is_calibrated = true;
        tracing::debug!(view_width, zoom, reference_interval, "calibrated");
        Some(())
    }

    pub fn clear(&mut self) {
        *self = Self { current_zoom: self.current_zoom, ..Self::default() };
    }

    /// Tracks the scroll/zoom subsystem's current scale. Non-positive zooms are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() && zoom > 0.0 {
            self.current_zoom = zoom;
        }
    }

    pub fn is_calibrated(&self) -> bool {
        self.is_calibrated
    }

    pub fn original_zoom(&self) -> f64 {
        self.original_zoom
    }

    pub fn current_zoom(&self) -> f64 {
        self.current_zoom
    }

    pub fn original_cal_factor(&self) -> f64 {
        self.original_cal_factor
    }

    pub fn current_cal_factor(&self) -> f64 {
        (self.original_zoom * self.original_cal_factor) / self.current_zoom
    }

    /// Calibrated time for a view-space horizontal distance.
    pub fn to_time(&self, view_width: f64) -> Option<f64> {
        self.is_calibrated
            .then(|| view_width.abs() * self.current_cal_factor())
    }

    /// Calibrated time for a region-space horizontal distance, scaled by `current_zoom`.
    pub fn region_width_to_time(&self, region_width: f64) -> Option<f64> {
        self.to_time(region_width * self.current_zoom)
    }

    /// Calibrated horizontal extent of a segment given in view coordinates.
    pub fn mark_measurement(&self, view_segment: &Segment) -> Option<f64> {
        self.to_time(view_segment.proximal.x - view_segment.distal.x)
    }
}
