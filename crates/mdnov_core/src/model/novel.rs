//! Novel aggregate.
//!
//! # Responsibility
//! - Own every element collection, the ordering tree, and the
//!   project-level preferences.
//! - Distribute one shared change signal to all elements it creates.
//!
//! # Invariants
//! - Elements inserted through the factory methods carry the novel's
//!   change signal.
//! - `reference_weekday` is derived from `reference_date` and never set
//!   directly.

use crate::model::chapter::Chapter;
use crate::model::element::{ChangeSignal, ElementCore, ProjectNote};
use crate::model::id::ElementId;
use crate::model::plot::{PlotLine, PlotPoint};
use crate::model::section::{Section, Status};
use crate::model::tree::Tree;
use crate::model::world::{Character, WorldElement};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashMap;

/// Singleton aggregate for one open project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Novel {
    core: ElementCore,
    signal: ChangeSignal,

    author_name: Option<String>,
    language_code: Option<String>,
    country_code: Option<String>,
    renumber_chapters: bool,
    renumber_parts: bool,
    renumber_within_parts: bool,
    roman_chapter_numbers: bool,
    roman_part_numbers: bool,
    save_word_count: bool,
    work_phase: Option<Status>,
    chapter_heading_prefix: Option<String>,
    chapter_heading_suffix: Option<String>,
    part_heading_prefix: Option<String>,
    part_heading_suffix: Option<String>,
    custom_plot_progress: Option<String>,
    custom_characterization: Option<String>,
    custom_world_building: Option<String>,
    custom_goal: Option<String>,
    custom_conflict: Option<String>,
    custom_outcome: Option<String>,
    custom_chr_bio: Option<String>,
    custom_chr_goals: Option<String>,
    word_count_start: Option<u32>,
    word_target: Option<u32>,
    reference_date: Option<NaiveDate>,

    pub chapters: HashMap<ElementId, Chapter>,
    pub sections: HashMap<ElementId, Section>,
    pub characters: HashMap<ElementId, Character>,
    pub locations: HashMap<ElementId, WorldElement>,
    pub items: HashMap<ElementId, WorldElement>,
    pub plot_lines: HashMap<ElementId, PlotLine>,
    pub plot_points: HashMap<ElementId, PlotPoint>,
    pub project_notes: HashMap<ElementId, ProjectNote>,
    pub tree: Tree,
}

impl Novel {
    /// Creates an empty novel wired to `signal`.
    pub fn new(signal: ChangeSignal) -> Self {
        Self {
            core: ElementCore::new(signal.clone()),
            signal,
            author_name: None,
            language_code: None,
            country_code: None,
            renumber_chapters: false,
            renumber_parts: false,
            renumber_within_parts: false,
            roman_chapter_numbers: false,
            roman_part_numbers: false,
            save_word_count: false,
            work_phase: None,
            chapter_heading_prefix: None,
            chapter_heading_suffix: None,
            part_heading_prefix: None,
            part_heading_suffix: None,
            custom_plot_progress: None,
            custom_characterization: None,
            custom_world_building: None,
            custom_goal: None,
            custom_conflict: None,
            custom_outcome: None,
            custom_chr_bio: None,
            custom_chr_goals: None,
            word_count_start: None,
            word_target: None,
            reference_date: None,
            chapters: HashMap::new(),
            sections: HashMap::new(),
            characters: HashMap::new(),
            locations: HashMap::new(),
            items: HashMap::new(),
            plot_lines: HashMap::new(),
            plot_points: HashMap::new(),
            project_notes: HashMap::new(),
            tree: Tree::new(),
        }
    }

    pub fn signal(&self) -> &ChangeSignal {
        &self.signal
    }

    pub fn core(&self) -> &ElementCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }

    // Element factories: every element shares the novel's change signal.

    pub fn make_chapter(&self) -> Chapter {
        Chapter::new(self.signal.clone())
    }

    pub fn make_section(&self) -> Section {
        Section::new(self.signal.clone())
    }

    pub fn make_character(&self) -> Character {
        Character::new(self.signal.clone())
    }

    pub fn make_world_element(&self) -> WorldElement {
        WorldElement::new(self.signal.clone())
    }

    pub fn make_plot_line(&self) -> PlotLine {
        PlotLine::new(self.signal.clone())
    }

    pub fn make_plot_point(&self) -> PlotPoint {
        PlotPoint::new(self.signal.clone())
    }

    pub fn make_project_note(&self) -> ProjectNote {
        ProjectNote::new(self.signal.clone())
    }

    pub fn author_name(&self) -> Option<&str> {
        self.author_name.as_deref()
    }

    pub fn set_author_name(&mut self, value: Option<String>) {
        if self.author_name != value {
            self.author_name = value;
            self.signal.notify();
        }
    }

    pub fn language_code(&self) -> Option<&str> {
        self.language_code.as_deref()
    }

    pub fn set_language_code(&mut self, value: Option<String>) {
        if self.language_code != value {
            self.language_code = value;
            self.signal.notify();
        }
    }

    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    pub fn set_country_code(&mut self, value: Option<String>) {
        if self.country_code != value {
            self.country_code = value;
            self.signal.notify();
        }
    }

    pub fn renumber_chapters(&self) -> bool {
        self.renumber_chapters
    }

    pub fn set_renumber_chapters(&mut self, value: bool) {
        if self.renumber_chapters != value {
            self.renumber_chapters = value;
            self.signal.notify();
        }
    }

    pub fn renumber_parts(&self) -> bool {
        self.renumber_parts
    }

    pub fn set_renumber_parts(&mut self, value: bool) {
        if self.renumber_parts != value {
            self.renumber_parts = value;
            self.signal.notify();
        }
    }

    pub fn renumber_within_parts(&self) -> bool {
        self.renumber_within_parts
    }

    pub fn set_renumber_within_parts(&mut self, value: bool) {
        if self.renumber_within_parts != value {
            self.renumber_within_parts = value;
            self.signal.notify();
        }
    }

    pub fn roman_chapter_numbers(&self) -> bool {
        self.roman_chapter_numbers
    }

    pub fn set_roman_chapter_numbers(&mut self, value: bool) {
        if self.roman_chapter_numbers != value {
            self.roman_chapter_numbers = value;
            self.signal.notify();
        }
    }

    pub fn roman_part_numbers(&self) -> bool {
        self.roman_part_numbers
    }

    pub fn set_roman_part_numbers(&mut self, value: bool) {
        if self.roman_part_numbers != value {
            self.roman_part_numbers = value;
            self.signal.notify();
        }
    }

    pub fn save_word_count(&self) -> bool {
        self.save_word_count
    }

    pub fn set_save_word_count(&mut self, value: bool) {
        if self.save_word_count != value {
            self.save_word_count = value;
            self.signal.notify();
        }
    }

    pub fn work_phase(&self) -> Option<Status> {
        self.work_phase
    }

    pub fn set_work_phase(&mut self, value: Option<Status>) {
        if self.work_phase != value {
            self.work_phase = value;
            self.signal.notify();
        }
    }

    pub fn chapter_heading_prefix(&self) -> Option<&str> {
        self.chapter_heading_prefix.as_deref()
    }

    pub fn set_chapter_heading_prefix(&mut self, value: Option<String>) {
        if self.chapter_heading_prefix != value {
            self.chapter_heading_prefix = value;
            self.signal.notify();
        }
    }

    pub fn chapter_heading_suffix(&self) -> Option<&str> {
        self.chapter_heading_suffix.as_deref()
    }

    pub fn set_chapter_heading_suffix(&mut self, value: Option<String>) {
        if self.chapter_heading_suffix != value {
            self.chapter_heading_suffix = value;
            self.signal.notify();
        }
    }

    pub fn part_heading_prefix(&self) -> Option<&str> {
        self.part_heading_prefix.as_deref()
    }

    pub fn set_part_heading_prefix(&mut self, value: Option<String>) {
        if self.part_heading_prefix != value {
            self.part_heading_prefix = value;
            self.signal.notify();
        }
    }

    pub fn part_heading_suffix(&self) -> Option<&str> {
        self.part_heading_suffix.as_deref()
    }

    pub fn set_part_heading_suffix(&mut self, value: Option<String>) {
        if self.part_heading_suffix != value {
            self.part_heading_suffix = value;
            self.signal.notify();
        }
    }

    pub fn custom_plot_progress(&self) -> Option<&str> {
        self.custom_plot_progress.as_deref()
    }

    pub fn set_custom_plot_progress(&mut self, value: Option<String>) {
        if self.custom_plot_progress != value {
            self.custom_plot_progress = value;
            self.signal.notify();
        }
    }

    pub fn custom_characterization(&self) -> Option<&str> {
        self.custom_characterization.as_deref()
    }

    pub fn set_custom_characterization(&mut self, value: Option<String>) {
        if self.custom_characterization != value {
            self.custom_characterization = value;
            self.signal.notify();
        }
    }

    pub fn custom_world_building(&self) -> Option<&str> {
        self.custom_world_building.as_deref()
    }

    pub fn set_custom_world_building(&mut self, value: Option<String>) {
        if self.custom_world_building != value {
            self.custom_world_building = value;
            self.signal.notify();
        }
    }

    pub fn custom_goal(&self) -> Option<&str> {
        self.custom_goal.as_deref()
    }

    pub fn set_custom_goal(&mut self, value: Option<String>) {
        if self.custom_goal != value {
            self.custom_goal = value;
            self.signal.notify();
        }
    }

    pub fn custom_conflict(&self) -> Option<&str> {
        self.custom_conflict.as_deref()
    }

    pub fn set_custom_conflict(&mut self, value: Option<String>) {
        if self.custom_conflict != value {
            self.custom_conflict = value;
            self.signal.notify();
        }
    }

    pub fn custom_outcome(&self) -> Option<&str> {
        self.custom_outcome.as_deref()
    }

    pub fn set_custom_outcome(&mut self, value: Option<String>) {
        if self.custom_outcome != value {
            self.custom_outcome = value;
            self.signal.notify();
        }
    }

    pub fn custom_chr_bio(&self) -> Option<&str> {
        self.custom_chr_bio.as_deref()
    }

    pub fn set_custom_chr_bio(&mut self, value: Option<String>) {
        if self.custom_chr_bio != value {
            self.custom_chr_bio = value;
            self.signal.notify();
        }
    }

    pub fn custom_chr_goals(&self) -> Option<&str> {
        self.custom_chr_goals.as_deref()
    }

    pub fn set_custom_chr_goals(&mut self, value: Option<String>) {
        if self.custom_chr_goals != value {
            self.custom_chr_goals = value;
            self.signal.notify();
        }
    }

    pub fn word_count_start(&self) -> Option<u32> {
        self.word_count_start
    }

    pub fn set_word_count_start(&mut self, value: Option<u32>) {
        if self.word_count_start != value {
            self.word_count_start = value;
            self.signal.notify();
        }
    }

    pub fn word_target(&self) -> Option<u32> {
        self.word_target
    }

    pub fn set_word_target(&mut self, value: Option<u32>) {
        if self.word_target != value {
            self.word_target = value;
            self.signal.notify();
        }
    }

    pub fn reference_date(&self) -> Option<NaiveDate> {
        self.reference_date
    }

    pub fn set_reference_date(&mut self, value: Option<NaiveDate>) {
        if self.reference_date != value {
            self.reference_date = value;
            self.signal.notify();
        }
    }

    /// Weekday of the reference date, for day-number to date conversion.
    pub fn reference_weekday(&self) -> Option<Weekday> {
        self.reference_date.map(|date| date.weekday())
    }
}
