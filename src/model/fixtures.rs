// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::geometry::{Point, Segment};
use crate::linking::link_marks;

use super::ids::MarkId;
use super::ladder::Ladder;

pub(crate) fn seg(px: f64, py: f64, dx: f64, dy: f64) -> Segment {
    Segment::new(Point::new(px, py), Point::new(dx, dy))
}

/// One conducted beat: a vertical atrial mark at x=100, an AV mark slanting to x=130, and a
/// vertical ventricular mark at x=130, linked top to bottom.
pub(crate) fn conducted_beat() -> (Ladder, [MarkId; 3]) {
    let mut ladder = Ladder::default_ladder();
    let a = ladder.add_mark(0, Segment::vertical(100.0)).expect("atrial mark");
    let av = ladder.add_mark(1, seg(100.0, 0.0, 130.0, 1.0)).expect("av mark");
    let v = ladder.add_mark(2, Segment::vertical(130.0)).expect("ventricular mark");
    link_marks(&mut ladder, a, av).expect("link a-av");
    link_marks(&mut ladder, av, v).expect("link av-v");
    (ladder, [a, av, v])
}

/// Two unlinked atrial marks and nothing else.
pub(crate) fn atrial_pair(first_x: f64, second_x: f64) -> (Ladder, [MarkId; 2]) {
    let mut ladder = Ladder::default_ladder();
    let first = ladder.add_mark(0, Segment::vertical(first_x)).expect("first mark");
    let second = ladder.add_mark(0, Segment::vertical(second_x)).expect("second mark");
    (ladder, [first, second])
}
