//! Plot line and plot point elements.
//!
//! The plot line's section list and the plot point's section association
//! are the source of truth; the matching back-references on `Section`
//! are derived by the reference reconciler.

use crate::model::element::{ChangeSignal, ElementCore};
use crate::model::id::ElementId;

/// A named throughline over the manuscript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotLine {
    core: ElementCore,
    notes: Option<String>,
    short_name: Option<String>,
    sections: Vec<ElementId>,
}

impl PlotLine {
    pub fn new(signal: ChangeSignal) -> Self {
        Self {
            core: ElementCore::new(signal),
            notes: None,
            short_name: None,
            sections: Vec::new(),
        }
    }

    pub fn core(&self) -> &ElementCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn set_notes(&mut self, value: Option<String>) {
        if self.notes != value {
            self.notes = value;
            self.core.signal().notify();
        }
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    pub fn set_short_name(&mut self, value: Option<String>) {
        if self.short_name != value {
            self.short_name = value;
            self.core.signal().notify();
        }
    }

    /// Sections associated with this plot line, in display order.
    pub fn sections(&self) -> &[ElementId] {
        &self.sections
    }

    pub fn set_sections(&mut self, value: Vec<ElementId>) {
        if self.sections != value {
            self.sections = value;
            self.core.signal().notify();
        }
    }
}

/// An ordered milestone of a plot line, optionally anchored to one
/// section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotPoint {
    core: ElementCore,
    notes: Option<String>,
    section: Option<ElementId>,
}

impl PlotPoint {
    pub fn new(signal: ChangeSignal) -> Self {
        Self {
            core: ElementCore::new(signal),
            notes: None,
            section: None,
        }
    }

    pub fn core(&self) -> &ElementCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn set_notes(&mut self, value: Option<String>) {
        if self.notes != value {
            self.notes = value;
            self.core.signal().notify();
        }
    }

    pub fn section(&self) -> Option<ElementId> {
        self.section
    }

    pub fn set_section(&mut self, value: Option<ElementId>) {
        if self.section != value {
            self.section = value;
            self.core.signal().notify();
        }
    }
}
