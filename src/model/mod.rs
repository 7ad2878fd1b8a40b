// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: the ladder, its regions, and the marks they own.
//!
//! Marks live in a single arena on the [`Ladder`] and refer to one another by [`MarkId`], so
//! the cyclic "linked neighbor" graph never forms ownership cycles.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod ladder;
pub mod mark;
pub mod region;

pub use ids::{Id, IdError, MarkId};
pub use ladder::{Ladder, LadderError, DEFAULT_REGION_HEIGHT};
pub use mark::{Anchor, Endpoint, LineStyle, LinkSlot, LinkedMarkIds, Mark, MarkMode};
pub use region::Region;
