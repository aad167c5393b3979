//! Project file lifecycle.
//!
//! # Responsibility
//! - Own the on-disk project: read, normalize, reconcile, count words,
//!   maintain the word-count ledger, write.
//!
//! # Invariants
//! - After `read`, section types agree with their chapter and part, and
//!   every cross-reference points at an existing element.
//! - The word-count ledger is only persisted through `write`.

use chrono::{DateTime, Local, NaiveDate};
use log::debug;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::mdnov::{read_mdnov_file, write_mdnov_file, MdnovError};
use crate::model::chapter::{ChapterLevel, ChapterType};
use crate::model::element::ChangeSignal;
use crate::model::id::Category;
use crate::model::novel::Novel;
use crate::model::section::SectionType;
use crate::model::tree::ParentKey;
use crate::reconcile::reconcile_references;
use crate::wc::{WcLog, WordCount};

/// One mdnov project on disk.
pub struct ProjectFile {
    path: PathBuf,
    pub novel: Novel,
    pub wc_log: WcLog,
    timestamp: Option<SystemTime>,
}

impl ProjectFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            novel: Novel::new(ChangeSignal::new()),
            wc_log: WcLog::new(),
            timestamp: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the project from disk, replacing the in-memory state.
    ///
    /// Section types are normalized, cross-references reconciled, and
    /// when the ledger's latest entry disagrees with the actual counts,
    /// a catch-up entry is staged under the file's modification date.
    pub fn read(&mut self) -> Result<(), MdnovError> {
        let mut novel = Novel::new(ChangeSignal::new());
        let mut wc_log = WcLog::new();
        read_mdnov_file(&self.path, &mut novel, &mut wc_log)?;
        self.novel = novel;
        self.wc_log = wc_log;
        self.timestamp = file_timestamp(&self.path);
        self.adjust_section_types();
        reconcile_references(&mut self.novel);
        let actual = self.count_words();
        let date = self
            .timestamp
            .map(local_date)
            .unwrap_or_else(|| Local::now().date_naive());
        self.wc_log.keep_actual(actual, date);
        self.novel.signal().take();
        Ok(())
    }

    /// Writes the project to disk, updating the word-count ledger first.
    pub fn write(&mut self) -> Result<(), MdnovError> {
        let actual = self.count_words();
        self.wc_log.update_on_write(
            self.novel.save_word_count(),
            Local::now().date_naive(),
            actual,
        );
        write_mdnov_file(&self.path, &self.novel, &self.wc_log)?;
        self.timestamp = file_timestamp(&self.path);
        self.novel.signal().take();
        Ok(())
    }

    /// Totals over all sections in non-trash chapters: narrative words,
    /// and narrative plus unused words.
    pub fn count_words(&self) -> WordCount {
        let mut count = 0;
        let mut with_unused = 0;
        for &ch_id in self.novel.tree.get_children(ParentKey::Root(Category::Chapter)) {
            let Some(chapter) = self.novel.chapters.get(&ch_id) else {
                continue;
            };
            if chapter.is_trash() {
                continue;
            }
            for &sc_id in self.novel.tree.get_children(ParentKey::Element(ch_id)) {
                let Some(section) = self.novel.sections.get(&sc_id) else {
                    continue;
                };
                if section.sc_type().is_stage() {
                    continue;
                }
                with_unused += section.word_count();
                if section.sc_type() == SectionType::Normal {
                    count += section.word_count();
                }
            }
        }
        WordCount { count, with_unused }
    }

    /// True when the file on disk was modified after the last read or
    /// write. A missing file counts as unchanged.
    pub fn has_changed_on_disk(&self) -> bool {
        match (self.timestamp, file_timestamp(&self.path)) {
            (Some(stored), Some(on_disk)) => stored != on_disk,
            _ => false,
        }
    }

    /// Makes section types consistent with chapter structure: an unused
    /// part propagates to the chapters under it, an unused chapter to
    /// its sections. The trash chapter, if any, goes last.
    pub fn adjust_section_types(&mut self) {
        let chapter_ids: Vec<_> = self
            .novel
            .tree
            .get_children(ParentKey::Root(Category::Chapter))
            .to_vec();
        let mut part_type = ChapterType::Normal;
        let mut trash_chapter = None;
        for ch_id in &chapter_ids {
            let Some(chapter) = self.novel.chapters.get_mut(ch_id) else {
                continue;
            };
            if chapter.level() == ChapterLevel::Part {
                part_type = chapter.ch_type();
            } else if part_type != ChapterType::Normal && !chapter.is_trash() {
                chapter.set_ch_type(part_type);
            }
            if chapter.is_trash() {
                trash_chapter = Some(*ch_id);
            }
            if chapter.ch_type() == ChapterType::Normal {
                continue;
            }
            for sc_id in self
                .novel
                .tree
                .get_children(ParentKey::Element(*ch_id))
                .to_vec()
            {
                if let Some(section) = self.novel.sections.get_mut(&sc_id) {
                    if !section.sc_type().is_stage() {
                        section.set_sc_type(SectionType::Unused);
                    }
                }
            }
        }
        if let Some(trash) = trash_chapter {
            if chapter_ids.last() != Some(&trash) {
                debug!("event=trash_moved chapter={trash}");
                self.novel
                    .tree
                    .move_to(trash, ParentKey::Root(Category::Chapter), None);
            }
        }
    }
}

fn file_timestamp(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|meta| meta.modified()).ok()
}

fn local_date(timestamp: SystemTime) -> NaiveDate {
    DateTime::<Local>::from(timestamp).date_naive()
}
