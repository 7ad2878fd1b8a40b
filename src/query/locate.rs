// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::geometry::{closest_point_on_segment, Point, Viewport};
use crate::model::{Anchor, Ladder, MarkId};

/// Result of hit-testing a view-space point against the marks of a ladder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkLocation {
    pub mark_id: MarkId,
    pub region_index: usize,
    /// Anchor implied by which third of the mark was hit.
    pub anchor: Anchor,
    pub distance: f64,
}

/// Finds the mark closest to `view_point` within `accuracy` view units.
///
/// Only marks of the region containing the point are considered.
pub fn locate_mark(
    ladder: &Ladder,
    viewport: &Viewport,
    view_point: Point,
    accuracy: f64,
) -> Option<MarkLocation> {
    let region_index = ladder.region_at_view_y(view_point.y)?;
    let span = ladder.region(region_index)?.span();

    ladder
        .marks_in_region(region_index)
        .filter_map(|mark| {
            let segment = viewport.to_view_segment(mark.segment(), span);
            let closest = closest_point_on_segment(view_point, &segment);
            let distance = closest.distance(view_point);
            if distance > accuracy {
                return None;
            }
            let length = segment.length();
            let along = if length > 0.0 {
                segment.proximal.distance(closest) / length
            } else {
                0.5
            };
            let anchor = if along < 1.0 / 3.0 {
                Anchor::Proximal
            } else if along > 2.0 / 3.0 {
                Anchor::Distal
            } else {
                Anchor::Middle
            };
            Some(MarkLocation { mark_id: mark.id(), region_index, anchor, distance })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

#[cfg(test)]
mod tests {
    use super::locate_mark;
    use crate::geometry::{Point, Segment, Viewport};
    use crate::model::{Anchor, Ladder};

    #[test]
    fn locate_picks_nearest_mark_and_anchor() {
        let mut ladder = Ladder::default_ladder();
        let near = ladder.add_mark(1, Segment::vertical(100.0)).expect("add");
        let far = ladder.add_mark(1, Segment::vertical(130.0)).expect("add");
        let viewport = Viewport::default();

        let hit = locate_mark(&ladder, &viewport, Point::new(104.0, 110.0), 20.0).expect("hit");
        assert_eq!(hit.mark_id, near);
        assert_eq!(hit.region_index, 1);
        assert_eq!(hit.anchor, Anchor::Proximal);

        let hit = locate_mark(&ladder, &viewport, Point::new(128.0, 150.0), 20.0).expect("hit");
        assert_eq!(hit.mark_id, far);
        assert_eq!(hit.anchor, Anchor::Middle);

        let hit = locate_mark(&ladder, &viewport, Point::new(131.0, 195.0), 20.0).expect("hit");
        assert_eq!(hit.anchor, Anchor::Distal);
    }

    #[test]
    fn locate_misses_outside_accuracy_or_region() {
        let mut ladder = Ladder::default_ladder();
        ladder.add_mark(1, Segment::vertical(100.0)).expect("add");
        let viewport = Viewport::default();

        assert!(locate_mark(&ladder, &viewport, Point::new(160.0, 150.0), 20.0).is_none());
        assert!(locate_mark(&ladder, &viewport, Point::new(100.0, 50.0), 20.0).is_none());
        assert!(locate_mark(&ladder, &viewport, Point::new(100.0, 900.0), 20.0).is_none());
    }
}
