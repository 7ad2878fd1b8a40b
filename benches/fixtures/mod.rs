// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use epladder::geometry::{Point, Segment};
use epladder::linking::link_marks;
use epladder::model::{Ladder, MarkId};

#[derive(Debug, Clone, Copy)]
pub enum Case {
    /// One rhythm strip's worth of beats.
    Small,
    /// A long recording.
    Large,
}

impl Case {
    pub fn beats(self) -> usize {
        match self {
            Self::Small => 12,
            Self::Large => 600,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Large => "large",
        }
    }
}

pub const BEAT_SPACING: f64 = 80.0;
pub const CONDUCTION: f64 = 24.0;

/// A strip of conducted beats: every beat has a linked A, AV and V mark.
///
/// Returns the ladder and the AV mark of every beat.
pub fn conducted_strip(case: Case) -> (Ladder, Vec<MarkId>) {
    let mut ladder = Ladder::default_ladder();
    let mut av_marks = Vec::with_capacity(case.beats());
    for beat in 0..case.beats() {
        let x = 50.0 + beat as f64 * BEAT_SPACING;
        // Every third beat conducts a little slower.
        let delay = if beat % 3 == 0 { CONDUCTION * 1.5 } else { CONDUCTION };
        let a = ladder.add_mark(0, Segment::vertical(x)).expect("atrial mark");
        let av = ladder
            .add_mark(1, Segment::new(Point::new(x, 0.0), Point::new(x + delay, 1.0)))
            .expect("av mark");
        let v = ladder.add_mark(2, Segment::vertical(x + delay)).expect("ventricular mark");
        link_marks(&mut ladder, a, av).expect("link a-av");
        link_marks(&mut ladder, av, v).expect("link av-v");
        av_marks.push(av);
    }
    (ladder, av_marks)
}

/// Same beats as [`conducted_strip`] but without any links, so linking has work to do.
pub fn unlinked_strip(case: Case) -> (Ladder, Vec<MarkId>) {
    let (mut ladder, av_marks) = conducted_strip(case);
    for av in &av_marks {
        epladder::linking::unlink(&mut ladder, *av).expect("unlink");
    }
    (ladder, av_marks)
}
