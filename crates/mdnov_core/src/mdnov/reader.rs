//! mdnov reader: one forward scan with a small state machine.

use crate::mdnov::{unescape_marker_line, FormatError};
use crate::meta::{verified_date, MetaCodec, MetaMap};
use crate::model::element::Link;
use crate::model::id::{Category, ElementId};
use crate::model::novel::Novel;
use crate::model::tree::ParentKey;
use crate::wc::{WcLog, WordCount};

/// Which block the scan is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    None,
    Book,
    Element(ElementId),
    Progress,
}

/// Target field of an open `%%` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Desc,
    Notes,
    Goal,
    Conflict,
    Outcome,
    Content,
    Bio,
    Goals,
    PlotlineNote(ElementId),
    /// Unrecognized tag: buffered and dropped (forward compatibility).
    Unknown,
}

struct Parser<'a> {
    novel: &'a mut Novel,
    wc_log: &'a mut WcLog,
    block: Block,
    meta: Option<Vec<String>>,
    meta_done: bool,
    body: Option<(Field, Vec<String>)>,
    link: Option<Vec<String>>,
    pending_plotline: Option<ElementId>,
    last_chapter: Option<ElementId>,
    last_plot_line: Option<ElementId>,
}

/// Parses one mdnov document into `novel` and `wc_log`.
///
/// `novel` is expected to be freshly created; a previous failed parse
/// must not be fed back in.
pub fn parse_mdnov(text: &str, novel: &mut Novel, wc_log: &mut WcLog) -> Result<(), FormatError> {
    let mut parser = Parser {
        novel,
        wc_log,
        block: Block::None,
        meta: None,
        meta_done: false,
        body: None,
        link: None,
        pending_plotline: None,
        last_chapter: None,
        last_plot_line: None,
    };
    for line in text.lines() {
        parser.handle_line(line)?;
    }
    parser.finish()
}

impl Parser<'_> {
    fn handle_line(&mut self, line: &str) -> Result<(), FormatError> {
        let trimmed = line.trim();

        if let Some(lines) = &mut self.link {
            // Two payload lines per link; a new tag or block boundary
            // also closes it.
            if !trimmed.starts_with("%%") && !trimmed.starts_with("@@") {
                if !trimmed.is_empty() {
                    lines.push(unescape_marker_line(trimmed).into_owned());
                }
                if self.link.as_ref().is_some_and(|lines| lines.len() == 2) {
                    self.close_link();
                }
                return Ok(());
            }
            self.close_link();
        }

        if self.meta.is_some() {
            if trimmed == "---" {
                self.close_meta();
            } else if let Some(lines) = &mut self.meta {
                lines.push(line.to_string());
            }
            return Ok(());
        }

        if let Some(tag) = trimmed.strip_prefix("@@") {
            self.close_body();
            self.check_meta_closed()?;
            return self.open_block(tag);
        }

        if trimmed == "---" && !self.meta_done && self.body.is_none() {
            match self.block {
                Block::Book | Block::Element(_) => {
                    self.meta = Some(Vec::new());
                    return Ok(());
                }
                Block::None | Block::Progress => {}
            }
        }

        if let Some(rest) = trimmed.strip_prefix("%%") {
            if let Some((name, value)) = rest.split_once(':') {
                return self.open_tag(name.trim(), value.trim());
            }
        }

        if self.block == Block::Progress {
            self.read_progress_line(trimmed);
            return Ok(());
        }

        if let Some((_, lines)) = &mut self.body {
            lines.push(unescape_marker_line(line).into_owned());
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), FormatError> {
        self.close_body();
        self.close_link();
        self.check_meta_closed()
    }

    fn check_meta_closed(&self) -> Result<(), FormatError> {
        if self.meta.is_some() {
            let id = match self.block {
                Block::Book => "@@book".to_string(),
                Block::Element(id) => id.to_string(),
                Block::None | Block::Progress => "?".to_string(),
            };
            return Err(FormatError::UnclosedMeta(id));
        }
        Ok(())
    }

    fn open_block(&mut self, tag: &str) -> Result<(), FormatError> {
        self.pending_plotline = None;
        self.meta_done = false;
        if tag == "book" {
            self.block = Block::Book;
            return Ok(());
        }
        if tag == "Progress" {
            self.block = Block::Progress;
            return Ok(());
        }
        let id: ElementId = tag.parse()?;
        match id.category() {
            Category::Chapter => {
                self.novel.chapters.insert(id, self.novel.make_chapter());
                self.novel.tree.append(ParentKey::Root(Category::Chapter), id);
                self.last_chapter = Some(id);
            }
            Category::Section => {
                let chapter = self.last_chapter.ok_or(FormatError::OrphanSection(id))?;
                self.novel.sections.insert(id, self.novel.make_section());
                self.novel.tree.append(ParentKey::Element(chapter), id);
            }
            Category::Character => {
                self.novel.characters.insert(id, self.novel.make_character());
                self.novel
                    .tree
                    .append(ParentKey::Root(Category::Character), id);
            }
            Category::Location => {
                self.novel
                    .locations
                    .insert(id, self.novel.make_world_element());
                self.novel
                    .tree
                    .append(ParentKey::Root(Category::Location), id);
            }
            Category::Item => {
                self.novel.items.insert(id, self.novel.make_world_element());
                self.novel.tree.append(ParentKey::Root(Category::Item), id);
            }
            Category::PlotLine => {
                self.novel.plot_lines.insert(id, self.novel.make_plot_line());
                self.novel
                    .tree
                    .append(ParentKey::Root(Category::PlotLine), id);
                self.last_plot_line = Some(id);
            }
            Category::PlotPoint => {
                let plot_line = self
                    .last_plot_line
                    .ok_or(FormatError::OrphanPlotPoint(id))?;
                self.novel.plot_points.insert(id, self.novel.make_plot_point());
                self.novel.tree.append(ParentKey::Element(plot_line), id);
            }
            Category::ProjectNote => {
                self.novel
                    .project_notes
                    .insert(id, self.novel.make_project_note());
                self.novel
                    .tree
                    .append(ParentKey::Root(Category::ProjectNote), id);
            }
        }
        self.block = Block::Element(id);
        Ok(())
    }

    fn open_tag(&mut self, name: &str, value: &str) -> Result<(), FormatError> {
        self.close_body();
        match self.block {
            Block::None | Block::Progress => {
                return Err(FormatError::TagOutsideElement(name.to_string()));
            }
            Block::Book | Block::Element(_) => {}
        }
        match name {
            "Link" => {
                self.link = Some(Vec::new());
            }
            "Plotline" => {
                let id: ElementId = value.parse()?;
                if id.category() != Category::PlotLine {
                    return Err(FormatError::WrongCategory {
                        id,
                        expected: Category::PlotLine,
                    });
                }
                self.pending_plotline = Some(id);
            }
            "Plotline note" => {
                let plot_line = self
                    .pending_plotline
                    .take()
                    .ok_or(FormatError::NoteWithoutPlotline)?;
                self.body = Some((Field::PlotlineNote(plot_line), Vec::new()));
            }
            "Desc" => self.body = Some((Field::Desc, Vec::new())),
            "Notes" => self.body = Some((Field::Notes, Vec::new())),
            "Goal" => self.body = Some((Field::Goal, Vec::new())),
            "Conflict" => self.body = Some((Field::Conflict, Vec::new())),
            "Outcome" => self.body = Some((Field::Outcome, Vec::new())),
            "Content" => self.body = Some((Field::Content, Vec::new())),
            "Bio" => self.body = Some((Field::Bio, Vec::new())),
            "Goals" => self.body = Some((Field::Goals, Vec::new())),
            _ => self.body = Some((Field::Unknown, Vec::new())),
        }
        Ok(())
    }

    fn close_meta(&mut self) {
        let Some(lines) = self.meta.take() else {
            return;
        };
        self.meta_done = true;
        let map = MetaMap::parse(&lines);
        match self.block {
            Block::Book => self.novel.import_meta(&map),
            Block::Element(id) => match id.category() {
                Category::Chapter => {
                    if let Some(chapter) = self.novel.chapters.get_mut(&id) {
                        chapter.import_meta(&map);
                    }
                }
                Category::Section => {
                    if let Some(section) = self.novel.sections.get_mut(&id) {
                        section.import_meta(&map);
                    }
                }
                Category::Character => {
                    if let Some(character) = self.novel.characters.get_mut(&id) {
                        character.import_meta(&map);
                    }
                }
                Category::Location => {
                    if let Some(location) = self.novel.locations.get_mut(&id) {
                        location.import_meta(&map);
                    }
                }
                Category::Item => {
                    if let Some(item) = self.novel.items.get_mut(&id) {
                        item.import_meta(&map);
                    }
                }
                Category::PlotLine => {
                    if let Some(plot_line) = self.novel.plot_lines.get_mut(&id) {
                        plot_line.import_meta(&map);
                    }
                }
                Category::PlotPoint => {
                    if let Some(plot_point) = self.novel.plot_points.get_mut(&id) {
                        plot_point.import_meta(&map);
                    }
                }
                Category::ProjectNote => {
                    if let Some(note) = self.novel.project_notes.get_mut(&id) {
                        note.import_meta(&map);
                    }
                }
            },
            Block::None | Block::Progress => {}
        }
    }

    fn close_body(&mut self) {
        let Some((field, lines)) = self.body.take() else {
            return;
        };
        let text = lines.join("\n").trim().to_string();
        if text.is_empty() {
            return;
        }
        let value = Some(text);
        match self.block {
            Block::Book => {
                if field == Field::Desc {
                    self.novel.core_mut().set_desc(value);
                }
            }
            Block::Element(id) => self.assign_body(id, field, value),
            Block::None | Block::Progress => {}
        }
    }

    fn assign_body(&mut self, id: ElementId, field: Field, value: Option<String>) {
        match id.category() {
            Category::Chapter => {
                if let Some(chapter) = self.novel.chapters.get_mut(&id) {
                    match field {
                        Field::Desc => chapter.core_mut().set_desc(value),
                        Field::Notes => chapter.set_notes(value),
                        _ => {}
                    }
                }
            }
            Category::Section => {
                if let Some(section) = self.novel.sections.get_mut(&id) {
                    match field {
                        Field::Desc => section.core_mut().set_desc(value),
                        Field::Notes => section.set_notes(value),
                        Field::Goal => section.set_goal(value),
                        Field::Conflict => section.set_conflict(value),
                        Field::Outcome => section.set_outcome(value),
                        Field::Content => section.set_content(value),
                        Field::PlotlineNote(plot_line) => {
                            if let Some(note) = value {
                                section.set_plotline_note(plot_line, note);
                            }
                        }
                        _ => {}
                    }
                }
            }
            Category::Character => {
                if let Some(character) = self.novel.characters.get_mut(&id) {
                    match field {
                        Field::Desc => character.core_mut().set_desc(value),
                        Field::Notes => character.world_mut().set_notes(value),
                        Field::Bio => character.set_bio(value),
                        Field::Goals => character.set_goals(value),
                        _ => {}
                    }
                }
            }
            Category::Location | Category::Item => {
                let collection = if id.category() == Category::Location {
                    &mut self.novel.locations
                } else {
                    &mut self.novel.items
                };
                if let Some(world) = collection.get_mut(&id) {
                    match field {
                        Field::Desc => world.core_mut().set_desc(value),
                        Field::Notes => world.set_notes(value),
                        _ => {}
                    }
                }
            }
            Category::PlotLine => {
                if let Some(plot_line) = self.novel.plot_lines.get_mut(&id) {
                    match field {
                        Field::Desc => plot_line.core_mut().set_desc(value),
                        Field::Notes => plot_line.set_notes(value),
                        _ => {}
                    }
                }
            }
            Category::PlotPoint => {
                if let Some(plot_point) = self.novel.plot_points.get_mut(&id) {
                    match field {
                        Field::Desc => plot_point.core_mut().set_desc(value),
                        Field::Notes => plot_point.set_notes(value),
                        _ => {}
                    }
                }
            }
            Category::ProjectNote => {
                if let Some(note) = self.novel.project_notes.get_mut(&id) {
                    if field == Field::Desc {
                        note.core_mut().set_desc(value);
                    }
                }
            }
        }
    }

    fn close_link(&mut self) {
        let Some(mut lines) = self.link.take() else {
            return;
        };
        if lines.is_empty() {
            return;
        }
        let path = lines.remove(0);
        let full_path = lines.pop();
        let link = Link { path, full_path };
        match self.block {
            Block::Book => self.novel.core_mut().add_link(link),
            Block::Element(id) => match id.category() {
                Category::Chapter => {
                    if let Some(chapter) = self.novel.chapters.get_mut(&id) {
                        chapter.core_mut().add_link(link);
                    }
                }
                Category::Section => {
                    if let Some(section) = self.novel.sections.get_mut(&id) {
                        section.core_mut().add_link(link);
                    }
                }
                Category::Character => {
                    if let Some(character) = self.novel.characters.get_mut(&id) {
                        character.core_mut().add_link(link);
                    }
                }
                Category::Location => {
                    if let Some(location) = self.novel.locations.get_mut(&id) {
                        location.core_mut().add_link(link);
                    }
                }
                Category::Item => {
                    if let Some(item) = self.novel.items.get_mut(&id) {
                        item.core_mut().add_link(link);
                    }
                }
                Category::PlotLine => {
                    if let Some(plot_line) = self.novel.plot_lines.get_mut(&id) {
                        plot_line.core_mut().add_link(link);
                    }
                }
                Category::PlotPoint => {
                    if let Some(plot_point) = self.novel.plot_points.get_mut(&id) {
                        plot_point.core_mut().add_link(link);
                    }
                }
                Category::ProjectNote => {
                    if let Some(note) = self.novel.project_notes.get_mut(&id) {
                        note.core_mut().add_link(link);
                    }
                }
            },
            Block::None | Block::Progress => {}
        }
    }

    /// `- <iso-date>;<count>;<totalCount>`; malformed lines are skipped.
    fn read_progress_line(&mut self, trimmed: &str) {
        let Some(entry) = trimmed.strip_prefix("- ") else {
            return;
        };
        let mut parts = entry.split(';');
        let date = verified_date(parts.next());
        let count = parts.next().and_then(|value| value.trim().parse().ok());
        let with_unused = parts.next().and_then(|value| value.trim().parse().ok());
        if let (Some(date), Some(count), Some(with_unused)) = (date, count, with_unused) {
            self.wc_log.insert(date, WordCount { count, with_unused });
        }
    }
}
