//! Chapter element.

use crate::model::element::{ChangeSignal, ElementCore};

/// Chapter usage type.
///
/// Stored as `0`/`1` in the formats; out-of-range values fall back to
/// `Unused` on import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChapterType {
    #[default]
    Normal,
    Unused,
}

impl ChapterType {
    pub fn as_number(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Unused => 1,
        }
    }
}

/// Heading level: a part groups the chapters that follow it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChapterLevel {
    Part,
    #[default]
    Chapter,
}

/// Chapter representation: title/desc/links plus notes and structural
/// flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    core: ElementCore,
    notes: Option<String>,
    ch_type: ChapterType,
    level: ChapterLevel,
    is_trash: bool,
    no_number: bool,
}

impl Chapter {
    pub fn new(signal: ChangeSignal) -> Self {
        Self {
            core: ElementCore::new(signal),
            notes: None,
            ch_type: ChapterType::default(),
            level: ChapterLevel::default(),
            is_trash: false,
            no_number: false,
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

    pub fn ch_type(&self) -> ChapterType {
        self.ch_type
    }

    pub fn set_ch_type(&mut self, value: ChapterType) {
        if self.ch_type != value {
            self.ch_type = value;
            self.core.signal().notify();
        }
    }

    pub fn level(&self) -> ChapterLevel {
        self.level
    }

    pub fn set_level(&mut self, value: ChapterLevel) {
        if self.level != value {
            self.level = value;
            self.core.signal().notify();
        }
    }

    pub fn is_trash(&self) -> bool {
        self.is_trash
    }

    pub fn set_is_trash(&mut self, value: bool) {
        if self.is_trash != value {
            self.is_trash = value;
            self.core.signal().notify();
        }
    }

    pub fn no_number(&self) -> bool {
        self.no_number
    }

    pub fn set_no_number(&mut self, value: bool) {
        if self.no_number != value {
            self.no_number = value;
            self.core.signal().notify();
        }
    }
}
