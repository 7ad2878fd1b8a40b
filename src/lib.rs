// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! EPLadder: ladder diagram engine for annotating ECG rhythm strips.
//!
//! A [`model::Ladder`] is a stack of regions (A, AV, V, ...) holding marks: line segments
//! that show where and when an impulse travelled. The crate moves marks by their anchors,
//! links marks that touch across regions, infers block and impulse origin sites, and
//! measures calibrated intervals between marks.
//!
//! All mutations are available directly on the engine modules and as revision-checked
//! batches through [`ops::apply_ops`].

pub mod config;
pub mod geometry;
pub mod linking;
pub mod measure;
pub mod model;
pub mod movement;
pub mod ops;
pub mod query;
