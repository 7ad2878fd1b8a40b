// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-EPLadder-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of EPLadder and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smol_str::SmolStr;

use crate::geometry::RegionSpan;

use super::ids::MarkId;
use super::mark::LineStyle;

/// One horizontal band of the ladder (for example "A", "AV" or "V").
///
/// Marks are kept in insertion order. Anything that needs them ordered by position sorts on
/// demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    index: usize,
    name: SmolStr,
    description: String,
    proximal_boundary: f64,
    distal_boundary: f64,
    activated: bool,
    markable: bool,
    line_style: LineStyle,
    marks: Vec<MarkId>,
}

impl Region {
    pub fn new(name: impl Into<SmolStr>, proximal_boundary: f64, distal_boundary: f64) -> Self {
        Self {
            index: 0,
            name: name.into(),
            description: String::new(),
            proximal_boundary,
            distal_boundary,
            activated: false,
            markable: true,
            line_style: LineStyle::Solid,
            marks: Vec::new(),
        }
    }

    /// Position from the top of the ladder. Maintained by the ladder on insert/remove.
    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<SmolStr>) {
        self.name = name.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn proximal_boundary(&self) -> f64 {
        self.proximal_boundary
    }

    pub fn distal_boundary(&self) -> f64 {
        self.distal_boundary
    }

    pub fn set_boundaries(&mut self, proximal_boundary: f64, distal_boundary: f64) {
        self.proximal_boundary = proximal_boundary;
        self.distal_boundary = distal_boundary;
    }

    pub fn height(&self) -> f64 {
        self.distal_boundary - self.proximal_boundary
    }

    pub fn span(&self) -> RegionSpan {
        RegionSpan::new(self.proximal_boundary, self.distal_boundary)
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub(crate) fn set_activated(&mut self, activated: bool) {
        self.activated = activated;
    }

    pub fn is_markable(&self) -> bool {
        self.markable
    }

    pub fn set_markable(&mut self, markable: bool) {
        self.markable = markable;
    }

    /// Default style for marks that do not override it.
    pub fn line_style(&self) -> LineStyle {
        self.line_style
    }

    pub fn set_line_style(&mut self, line_style: LineStyle) {
        self.line_style = line_style;
    }

    pub fn marks(&self) -> &[MarkId] {
        &self.marks
    }

    pub fn contains_mark(&self, mark_id: MarkId) -> bool {
        self.marks.contains(&mark_id)
    }

    pub(crate) fn push_mark(&mut self, mark_id: MarkId) {
        self.marks.push(mark_id);
    }

    pub(crate) fn remove_mark(&mut self, mark_id: MarkId) -> bool {
        let before = self.marks.len();
        self.marks.retain(|id| *id != mark_id);
        self.marks.len() != before
    }
}
