// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Endpoint, Mark};

/// How far from `0`/`1` an endpoint y may be and still count as touching the boundary.
const BOUNDARY_EPSILON: f64 = 1e-6;

fn touches_proximal_boundary(y: f64) -> bool {
    y.abs() < BOUNDARY_EPSILON
}

fn touches_distal_boundary(y: f64) -> bool {
    (y - 1.0).abs() < BOUNDARY_EPSILON
}

/// Where conduction through this mark stops short of the region boundary.
///
/// A mark whose proximal end floats inside the region and leans forward (proximal x at or
/// after distal x) blocks proximally; one whose distal end floats and leans forward blocks
/// distally.
pub fn assess_block_site(mark: &Mark) -> Endpoint {
    let segment = mark.segment();
    if !touches_proximal_boundary(segment.proximal.y) && segment.proximal.x >= segment.distal.x {
        return Endpoint::Proximal;
    }
    if !touches_distal_boundary(segment.distal.y) && segment.distal.x > segment.proximal.x {
        return Endpoint::Distal;
    }
    Endpoint::None
}

/// The end the impulse presumably started from: the earlier end with nothing linked to it.
pub fn assess_impulse_origin_site(mark: &Mark) -> Endpoint {
    let segment = mark.segment();
    let linked = mark.linked();
    if linked.proximal.is_empty() && segment.proximal.x <= segment.distal.x {
        return Endpoint::Proximal;
    }
    if linked.distal.is_empty() && segment.distal.x < segment.proximal.x {
        return Endpoint::Distal;
    }
    Endpoint::None
}
