// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Calibration and interval measurement.
//!
//! Measurements are only available once a [`Calibration`] has been set; until then every
//! query answers `None` and collaborators simply do not show values.
//!
//! Region-space widths are converted with the calibration's own zoom, so the viewport is not
//! consulted here.

pub mod calibration;
pub mod intervals;

pub use calibration::Calibration;
pub use intervals::{region_intervals, Boundary, Interval, RegionIntervals};

use crate::model::{Ladder, MarkId};

/// Calibrated duration of a mark's horizontal extent, in the calibration's time unit.
pub fn measure_mark(ladder: &Ladder, mark_id: MarkId, calibration: &Calibration) -> Option<f64> {
    let segment = ladder.mark(mark_id)?.segment();
    calibration.region_width_to_time(segment.proximal.x - segment.distal.x)
}
