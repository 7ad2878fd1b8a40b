// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Property-based invariant tests for the ladder engine.
//!
//! 1. Region/view transforms round-trip for any valid viewport and region span.
//! 2. Links stay symmetric and the registry stays consistent under arbitrary link, unlink,
//!    settle and delete sequences.
//! 3. Horizontal moves never change a mark's y coordinates.
//! 4. Calibrated measurements do not depend on the zoom level.

use epladder::config::EngineConfig;
use epladder::geometry::{Point, RegionSpan, Segment, Viewport};
use epladder::linking::{check_link_symmetry, link_marks, unlink};
use epladder::measure::Calibration;
use epladder::model::{Anchor, Ladder, MarkId};
use epladder::movement::{moved_segment, settle_mark, Movement};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn viewport_strategy() -> impl Strategy<Value = Viewport> {
    (0.1f64..10.0, -1_000.0f64..1_000.0).prop_map(|(scale, offset)| Viewport::new(scale, offset))
}

fn span_strategy() -> impl Strategy<Value = RegionSpan> {
    (0.0f64..500.0, 1.0f64..300.0)
        .prop_map(|(proximal, height)| RegionSpan::new(proximal, proximal + height))
}

fn segment_strategy() -> impl Strategy<Value = Segment> {
    (0.0f64..400.0, 0.0f64..=1.0, 0.0f64..400.0, 0.0f64..=1.0)
        .prop_map(|(px, py, dx, dy)| Segment::new(Point::new(px, py), Point::new(dx, dy)))
}

fn anchor_strategy() -> impl Strategy<Value = Anchor> {
    prop_oneof![
        Just(Anchor::Proximal),
        Just(Anchor::Middle),
        Just(Anchor::Distal),
        Just(Anchor::None),
    ]
}

#[derive(Debug, Clone)]
enum Step {
    Link(usize, usize),
    Unlink(usize),
    Settle(usize),
    Delete(usize),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0usize..32, 0usize..32).prop_map(|(a, b)| Step::Link(a, b)),
        (0usize..32).prop_map(Step::Unlink),
        (0usize..32).prop_map(Step::Settle),
        (0usize..32).prop_map(Step::Delete),
    ]
}

fn populated_ladder(marks: &[(usize, Segment)]) -> (Ladder, Vec<MarkId>) {
    let mut ladder = Ladder::default_ladder();
    let ids = marks
        .iter()
        .map(|(region, segment)| ladder.add_mark(*region, *segment).expect("add mark"))
        .collect();
    (ladder, ids)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Transform round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn transform_round_trips(
        viewport in viewport_strategy(),
        span in span_strategy(),
        x in -10_000.0f64..10_000.0,
        y in 0.0f64..=1.0,
    ) {
        let point = Point::new(x, y);
        let back = viewport.to_region_point(viewport.to_view_point(point, span), span);
        prop_assert!((back.x - point.x).abs() < 1e-4, "x drifted: {:?} -> {:?}", point, back);
        prop_assert!((back.y - point.y).abs() < 1e-4, "y drifted: {:?} -> {:?}", point, back);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Link symmetry under arbitrary edits
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn links_stay_symmetric(
        marks in prop::collection::vec((0usize..3, segment_strategy()), 1..24),
        steps in prop::collection::vec(step_strategy(), 0..40),
    ) {
        let (mut ladder, ids) = populated_ladder(&marks);
        let viewport = Viewport::default();
        let config = EngineConfig::default();
        let pick = |index: usize| ids[index % ids.len()];

        for step in steps {
            // Referential and adjacency errors are expected here; they must not corrupt state.
            let _ = match step {
                Step::Link(a, b) => link_marks(&mut ladder, pick(a), pick(b)).map(|_| ()),
                Step::Unlink(a) => unlink(&mut ladder, pick(a)).map(|_| ()),
                Step::Settle(a) => settle_mark(&mut ladder, pick(a), &viewport, &config).map(|_| ()),
                Step::Delete(a) => ladder.delete_mark(pick(a)).map(|_| ()),
            };
            prop_assert_eq!(check_link_symmetry(&ladder), Ok(()));
            prop_assert_eq!(ladder.check_registry(), Ok(()));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Horizontal moves keep y
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn horizontal_move_keeps_y(
        segment in segment_strategy(),
        anchor in anchor_strategy(),
        x in -500.0f64..500.0,
        y in -1.0f64..2.0,
    ) {
        let moved = moved_segment(&segment, anchor, Movement::Horizontal, Point::new(x, y));
        prop_assert_eq!(moved.proximal.y, segment.proximal.y);
        prop_assert_eq!(moved.distal.y, segment.distal.y);
        if anchor == Anchor::None {
            prop_assert_eq!(moved, segment);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Calibration is zoom-independent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn measurement_is_zoom_independent(
        calibration_px in 10.0f64..500.0,
        zoom in 0.25f64..8.0,
        width in 1.0f64..400.0,
    ) {
        let mut calibration = Calibration::default();
        calibration.calibrate(calibration_px, 1.0, 1000.0).expect("calibrate");
        let segment = Segment::new(Point::new(0.0, 0.0), Point::new(width, 1.0));
        let at_unit = calibration.mark_measurement(&segment).expect("calibrated");

        calibration.set_zoom(zoom);
        let zoomed = Segment::new(Point::new(0.0, 0.0), Point::new(width * zoom, 1.0));
        let at_zoom = calibration.mark_measurement(&zoomed).expect("calibrated");
        prop_assert!((at_unit - at_zoom).abs() < 1e-6 * at_unit.max(1.0));
    }
}
