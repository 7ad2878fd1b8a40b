// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only analyses over the ladder.
//!
//! Nothing here mutates the model; [`Ladder::reassess`](crate::model::Ladder::reassess)
//! stores the derived results on each mark.

pub mod derived;
pub mod locate;

pub use derived::{assess_block_site, assess_impulse_origin_site};
pub use locate::{locate_mark, MarkLocation};
