//! Section element: the atomic narrative unit inside a chapter.
//!
//! # Responsibility
//! - Hold the per-scene prose and planning fields.
//! - Keep `word_count` derived from the content on every update.
//!
//! # Invariants
//! - `word_count` always reflects the current content.
//! - The plot-line / plot-point back-reference fields are derived state,
//!   rebuilt by the reference reconciler and never read back from disk.

use crate::model::element::{ChangeSignal, ElementCore};
use crate::model::id::ElementId;
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

// Word counting like in LibreOffice: sentence dashes and paragraph ends
// become separators, note/comment spans and remaining markup disappear.
static WORD_SEPARATORS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"--|—|–|</p>").expect("valid separator regex"));
static NON_WORDS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<note>.*?</note>|<comment>.*?</comment>|<.+?>").expect("valid markup regex")
});

/// Counts words the way the manuscript statistics do.
pub fn count_content_words(text: &str) -> u32 {
    let text = WORD_SEPARATORS_RE.replace_all(text, " ");
    let text = NON_WORDS_RE.replace_all(&text, "");
    text.split_whitespace().count() as u32
}

/// Section usage type. `Stage1`/`Stage2` are structural markers, not
/// prose; out-of-range stored values fall back to `Unused`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SectionType {
    #[default]
    Normal,
    Unused,
    Stage1,
    Stage2,
}

impl SectionType {
    pub fn as_number(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Unused => 1,
            Self::Stage1 => 2,
            Self::Stage2 => 3,
        }
    }

    /// Stages are structural markers rather than narrative text.
    pub fn is_stage(self) -> bool {
        matches!(self, Self::Stage1 | Self::Stage2)
    }
}

/// Completion status, 1..=5 on disk; out-of-range falls back to
/// `Outline`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Outline,
    Draft,
    FirstEdit,
    SecondEdit,
    Done,
}

impl Status {
    pub fn as_number(self) -> u8 {
        match self {
            Self::Outline => 1,
            Self::Draft => 2,
            Self::FirstEdit => 3,
            Self::SecondEdit => 4,
            Self::Done => 5,
        }
    }

    pub fn from_number(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Outline),
            2 => Some(Self::Draft),
            3 => Some(Self::FirstEdit),
            4 => Some(Self::SecondEdit),
            5 => Some(Self::Done),
            _ => None,
        }
    }
}

/// Scene classification; out-of-range falls back to `NotAScene`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SceneKind {
    #[default]
    NotAScene,
    Action,
    Reaction,
    Other,
}

impl SceneKind {
    pub fn as_number(self) -> u8 {
        match self {
            Self::NotAScene => 0,
            Self::Action => 1,
            Self::Reaction => 2,
            Self::Other => 3,
        }
    }
}

/// Section representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    core: ElementCore,
    notes: Option<String>,
    tags: Vec<String>,
    sc_type: SectionType,
    status: Status,
    scene: SceneKind,
    append_to_prev: bool,
    goal: Option<String>,
    conflict: Option<String>,
    outcome: Option<String>,
    content: Option<String>,
    word_count: u32,
    date: Option<NaiveDate>,
    day: Option<String>,
    time: Option<NaiveTime>,
    lasts_days: Option<String>,
    lasts_hours: Option<String>,
    lasts_minutes: Option<String>,
    characters: Vec<ElementId>,
    locations: Vec<ElementId>,
    items: Vec<ElementId>,
    plotline_notes: Vec<(ElementId, String)>,
    // Derived back-references, reconciler-owned.
    plot_line_refs: Vec<ElementId>,
    plot_point_refs: Vec<(ElementId, ElementId)>,
}

impl Section {
    pub fn new(signal: ChangeSignal) -> Self {
        Self {
            core: ElementCore::new(signal),
            notes: None,
            tags: Vec::new(),
            sc_type: SectionType::default(),
            status: Status::default(),
            scene: SceneKind::default(),
            append_to_prev: false,
            goal: None,
            conflict: None,
            outcome: None,
            content: None,
            word_count: 0,
            date: None,
            day: None,
            time: None,
            lasts_days: None,
            lasts_hours: None,
            lasts_minutes: None,
            characters: Vec::new(),
            locations: Vec::new(),
            items: Vec::new(),
            plotline_notes: Vec::new(),
            plot_line_refs: Vec::new(),
            plot_point_refs: Vec::new(),
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

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn set_tags(&mut self, value: Vec<String>) {
        if self.tags != value {
            self.tags = value;
            self.core.signal().notify();
        }
    }

    pub fn sc_type(&self) -> SectionType {
        self.sc_type
    }

    pub fn set_sc_type(&mut self, value: SectionType) {
        if self.sc_type != value {
            self.sc_type = value;
            self.core.signal().notify();
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn set_status(&mut self, value: Status) {
        if self.status != value {
            self.status = value;
            self.core.signal().notify();
        }
    }

    pub fn scene(&self) -> SceneKind {
        self.scene
    }

    pub fn set_scene(&mut self, value: SceneKind) {
        if self.scene != value {
            self.scene = value;
            self.core.signal().notify();
        }
    }

    pub fn append_to_prev(&self) -> bool {
        self.append_to_prev
    }

    pub fn set_append_to_prev(&mut self, value: bool) {
        if self.append_to_prev != value {
            self.append_to_prev = value;
            self.core.signal().notify();
        }
    }

    pub fn goal(&self) -> Option<&str> {
        self.goal.as_deref()
    }

    pub fn set_goal(&mut self, value: Option<String>) {
        if self.goal != value {
            self.goal = value;
            self.core.signal().notify();
        }
    }

    pub fn conflict(&self) -> Option<&str> {
        self.conflict.as_deref()
    }

    pub fn set_conflict(&mut self, value: Option<String>) {
        if self.conflict != value {
            self.conflict = value;
            self.core.signal().notify();
        }
    }

    pub fn outcome(&self) -> Option<&str> {
        self.outcome.as_deref()
    }

    pub fn set_outcome(&mut self, value: Option<String>) {
        if self.outcome != value {
            self.outcome = value;
            self.core.signal().notify();
        }
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Replaces the prose, recomputing the word count.
    pub fn set_content(&mut self, value: Option<String>) {
        if self.content != value {
            self.word_count = value.as_deref().map(count_content_words).unwrap_or(0);
            self.content = value;
            self.core.signal().notify();
        }
    }

    pub fn word_count(&self) -> u32 {
        self.word_count
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn set_date(&mut self, value: Option<NaiveDate>) {
        if self.date != value {
            self.date = value;
            self.core.signal().notify();
        }
    }

    pub fn day(&self) -> Option<&str> {
        self.day.as_deref()
    }

    pub fn set_day(&mut self, value: Option<String>) {
        if self.day != value {
            self.day = value;
            self.core.signal().notify();
        }
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    pub fn set_time(&mut self, value: Option<NaiveTime>) {
        if self.time != value {
            self.time = value;
            self.core.signal().notify();
        }
    }

    pub fn lasts_days(&self) -> Option<&str> {
        self.lasts_days.as_deref()
    }

    pub fn set_lasts_days(&mut self, value: Option<String>) {
        if self.lasts_days != value {
            self.lasts_days = value;
            self.core.signal().notify();
        }
    }

    pub fn lasts_hours(&self) -> Option<&str> {
        self.lasts_hours.as_deref()
    }

    pub fn set_lasts_hours(&mut self, value: Option<String>) {
        if self.lasts_hours != value {
            self.lasts_hours = value;
            self.core.signal().notify();
        }
    }

    pub fn lasts_minutes(&self) -> Option<&str> {
        self.lasts_minutes.as_deref()
    }

    pub fn set_lasts_minutes(&mut self, value: Option<String>) {
        if self.lasts_minutes != value {
            self.lasts_minutes = value;
            self.core.signal().notify();
        }
    }

    pub fn characters(&self) -> &[ElementId] {
        &self.characters
    }

    pub fn set_characters(&mut self, value: Vec<ElementId>) {
        if self.characters != value {
            self.characters = value;
            self.core.signal().notify();
        }
    }

    pub fn locations(&self) -> &[ElementId] {
        &self.locations
    }

    pub fn set_locations(&mut self, value: Vec<ElementId>) {
        if self.locations != value {
            self.locations = value;
            self.core.signal().notify();
        }
    }

    pub fn items(&self) -> &[ElementId] {
        &self.items
    }

    pub fn set_items(&mut self, value: Vec<ElementId>) {
        if self.items != value {
            self.items = value;
            self.core.signal().notify();
        }
    }

    /// Free-text notes attached per plot line, in insertion order.
    pub fn plotline_notes(&self) -> &[(ElementId, String)] {
        &self.plotline_notes
    }

    pub fn set_plotline_note(&mut self, plot_line: ElementId, note: String) {
        match self
            .plotline_notes
            .iter_mut()
            .find(|(id, _)| *id == plot_line)
        {
            Some((_, existing)) if *existing == note => return,
            Some((_, existing)) => *existing = note,
            None => self.plotline_notes.push((plot_line, note)),
        }
        self.core.signal().notify();
    }

    /// Derived: plot lines this section belongs to. Reconciler-owned.
    pub fn plot_line_refs(&self) -> &[ElementId] {
        &self.plot_line_refs
    }

    /// Derived: plot point -> owning plot line. Reconciler-owned.
    pub fn plot_point_refs(&self) -> &[(ElementId, ElementId)] {
        &self.plot_point_refs
    }

    pub(crate) fn clear_derived_refs(&mut self) {
        self.plot_line_refs.clear();
        self.plot_point_refs.clear();
    }

    pub(crate) fn push_plot_line_ref(&mut self, plot_line: ElementId) {
        self.plot_line_refs.push(plot_line);
    }

    pub(crate) fn register_plot_point_ref(&mut self, plot_point: ElementId, plot_line: ElementId) {
        self.plot_point_refs.push((plot_point, plot_line));
    }
}

#[cfg(test)]
mod tests {
    use super::{count_content_words, Section, SectionType};
    use crate::model::element::ChangeSignal;

    #[test]
    fn counts_paragraph_markup_as_separators() {
        assert_eq!(count_content_words("<p>Hello world</p><p>Foo</p>"), 3);
    }

    #[test]
    fn strips_note_and_comment_spans() {
        assert_eq!(
            count_content_words("One <note>skip me</note>two--three <comment>x</comment>"),
            3
        );
    }

    #[test]
    fn dashes_separate_words() {
        assert_eq!(count_content_words("wait—what–now--go"), 4);
    }

    #[test]
    fn content_setter_updates_word_count() {
        let mut section = Section::new(ChangeSignal::new());
        section.set_content(Some("<p>One two</p>".to_string()));
        assert_eq!(section.word_count(), 2);
        section.set_content(None);
        assert_eq!(section.word_count(), 0);
    }

    #[test]
    fn stage_types_are_flagged() {
        assert!(SectionType::Stage1.is_stage());
        assert!(SectionType::Stage2.is_stage());
        assert!(!SectionType::Unused.is_stage());
    }

    #[test]
    fn plotline_note_replaces_existing_entry() {
        use crate::model::id::ElementId;
        let mut section = Section::new(ChangeSignal::new());
        let arc = ElementId::PlotLine(1);
        section.set_plotline_note(arc, "first".to_string());
        section.set_plotline_note(arc, "second".to_string());
        assert_eq!(section.plotline_notes(), [(arc, "second".to_string())]);
    }
}
