//! Per-type metadata field orders.
//!
//! Export emits a line only for non-default values; import falls back to
//! the documented defaults when a key is missing or out of range
//! (forward-compatible tolerance, never a hard error).

use crate::meta::{
    join_list, split_id_list, split_list, verified_date, verified_int_string, verified_time,
    MetaMap,
};
use crate::model::chapter::{Chapter, ChapterLevel, ChapterType};
use crate::model::element::ProjectNote;
use crate::model::novel::Novel;
use crate::model::plot::{PlotLine, PlotPoint};
use crate::model::section::{SceneKind, Section, SectionType, Status};
use crate::model::world::{Character, WorldElement};

/// Conversion between an element and its `Key: value` metadata lines.
pub trait MetaCodec {
    /// Appends this element's metadata lines in the fixed field order.
    fn export_meta(&self, out: &mut Vec<String>);

    /// Applies parsed metadata, defaulting missing or invalid values.
    fn import_meta(&mut self, meta: &MetaMap);
}

fn push_string(out: &mut Vec<String>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        if !value.is_empty() {
            out.push(format!("{key}: {value}"));
        }
    }
}

fn push_flag(out: &mut Vec<String>, key: &str, value: bool) {
    if value {
        out.push(format!("{key}: 1"));
    }
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

impl MetaCodec for Chapter {
    fn export_meta(&self, out: &mut Vec<String>) {
        push_string(out, "Title", self.core().title());
        if self.ch_type() != ChapterType::Normal {
            out.push(format!("type: {}", self.ch_type().as_number()));
        }
        if self.level() == ChapterLevel::Part {
            out.push("level: 1".to_string());
        }
        push_flag(out, "isTrash", self.is_trash());
        push_flag(out, "noNumber", self.no_number());
    }

    fn import_meta(&mut self, meta: &MetaMap) {
        self.core_mut().set_title(owned(meta.get("Title")));
        // Unknown stored type defaults to Unused.
        self.set_ch_type(match meta.get("type") {
            None | Some("0") => ChapterType::Normal,
            _ => ChapterType::Unused,
        });
        self.set_level(if meta.get("level") == Some("1") {
            ChapterLevel::Part
        } else {
            ChapterLevel::Chapter
        });
        self.set_is_trash(meta.flag("isTrash"));
        self.set_no_number(meta.flag("noNumber"));
    }
}

impl MetaCodec for Section {
    fn export_meta(&self, out: &mut Vec<String>) {
        push_string(out, "Title", self.core().title());
        if !self.tags().is_empty() {
            out.push(format!("Tags: {}", join_list(self.tags())));
        }
        if self.sc_type() != SectionType::Normal {
            out.push(format!("type: {}", self.sc_type().as_number()));
        }
        if self.status().as_number() > 1 {
            out.push(format!("status: {}", self.status().as_number()));
        }
        if self.scene() != SceneKind::NotAScene {
            out.push(format!("scene: {}", self.scene().as_number()));
        }
        push_flag(out, "append", self.append_to_prev());
        if let Some(date) = self.date() {
            out.push(format!("Date: {}", date.format("%Y-%m-%d")));
        } else if let Some(day) = self.day() {
            out.push(format!("Day: {day}"));
        }
        if let Some(time) = self.time() {
            out.push(format!("Time: {}", time.format("%H:%M:%S")));
        }
        for (key, value) in [
            ("LastsDays", self.lasts_days()),
            ("LastsHours", self.lasts_hours()),
            ("LastsMinutes", self.lasts_minutes()),
        ] {
            if let Some(value) = value {
                if value != "0" {
                    out.push(format!("{key}: {value}"));
                }
            }
        }
        if !self.characters().is_empty() {
            out.push(format!("Characters: {}", join_list(self.characters())));
        }
        if !self.locations().is_empty() {
            out.push(format!("Locations: {}", join_list(self.locations())));
        }
        if !self.items().is_empty() {
            out.push(format!("Items: {}", join_list(self.items())));
        }
    }

    fn import_meta(&mut self, meta: &MetaMap) {
        self.core_mut().set_title(owned(meta.get("Title")));
        self.set_tags(meta.get("Tags").map(split_list).unwrap_or_default());
        // Unknown stored type defaults to Unused.
        self.set_sc_type(match meta.get("type") {
            None | Some("0") => SectionType::Normal,
            Some("1") => SectionType::Unused,
            Some("2") => SectionType::Stage1,
            Some("3") => SectionType::Stage2,
            Some(_) => SectionType::Unused,
        });
        self.set_status(
            meta.get("status")
                .and_then(|value| value.parse::<u8>().ok())
                .and_then(Status::from_number)
                .unwrap_or(Status::Outline),
        );
        self.set_scene(match meta.get("scene") {
            Some("1") => SceneKind::Action,
            Some("2") => SceneKind::Reaction,
            Some("3") => SceneKind::Other,
            _ => SceneKind::NotAScene,
        });
        self.set_append_to_prev(meta.flag("append"));
        self.set_date(verified_date(meta.get("Date")));
        if self.date().is_none() {
            self.set_day(verified_int_string(meta.get("Day")));
        } else {
            self.set_day(None);
        }
        self.set_time(verified_time(meta.get("Time")));
        self.set_lasts_days(verified_int_string(meta.get("LastsDays")));
        self.set_lasts_hours(verified_int_string(meta.get("LastsHours")));
        self.set_lasts_minutes(verified_int_string(meta.get("LastsMinutes")));
        self.set_characters(meta.get("Characters").map(split_id_list).unwrap_or_default());
        self.set_locations(meta.get("Locations").map(split_id_list).unwrap_or_default());
        self.set_items(meta.get("Items").map(split_id_list).unwrap_or_default());
    }
}

impl MetaCodec for WorldElement {
    fn export_meta(&self, out: &mut Vec<String>) {
        push_string(out, "Title", self.core().title());
        if !self.tags().is_empty() {
            out.push(format!("Tags: {}", join_list(self.tags())));
        }
        push_string(out, "Aka", self.aka());
    }

    fn import_meta(&mut self, meta: &MetaMap) {
        self.core_mut().set_title(owned(meta.get("Title")));
        self.set_tags(meta.get("Tags").map(split_list).unwrap_or_default());
        self.set_aka(owned(meta.get("Aka")));
    }
}

impl MetaCodec for Character {
    fn export_meta(&self, out: &mut Vec<String>) {
        self.world().export_meta(out);
        push_flag(out, "major", self.is_major());
        push_string(out, "FullName", self.full_name());
        if let Some(date) = self.birth_date() {
            out.push(format!("BirthDate: {}", date.format("%Y-%m-%d")));
        }
        if let Some(date) = self.death_date() {
            out.push(format!("DeathDate: {}", date.format("%Y-%m-%d")));
        }
    }

    fn import_meta(&mut self, meta: &MetaMap) {
        self.world_mut().import_meta(meta);
        self.set_is_major(meta.flag("major"));
        self.set_full_name(owned(meta.get("FullName")));
        self.set_birth_date(verified_date(meta.get("BirthDate")));
        self.set_death_date(verified_date(meta.get("DeathDate")));
    }
}

impl MetaCodec for PlotLine {
    fn export_meta(&self, out: &mut Vec<String>) {
        push_string(out, "Title", self.core().title());
        push_string(out, "ShortName", self.short_name());
        if !self.sections().is_empty() {
            out.push(format!("Sections: {}", join_list(self.sections())));
        }
    }

    fn import_meta(&mut self, meta: &MetaMap) {
        self.core_mut().set_title(owned(meta.get("Title")));
        self.set_short_name(owned(meta.get("ShortName")));
        self.set_sections(meta.get("Sections").map(split_id_list).unwrap_or_default());
    }
}

impl MetaCodec for PlotPoint {
    fn export_meta(&self, out: &mut Vec<String>) {
        push_string(out, "Title", self.core().title());
        if let Some(section) = self.section() {
            out.push(format!("Section: {section}"));
        }
    }

    fn import_meta(&mut self, meta: &MetaMap) {
        self.core_mut().set_title(owned(meta.get("Title")));
        self.set_section(meta.get("Section").and_then(|token| token.parse().ok()));
    }
}

impl MetaCodec for ProjectNote {
    fn export_meta(&self, out: &mut Vec<String>) {
        push_string(out, "Title", self.core().title());
    }

    fn import_meta(&mut self, meta: &MetaMap) {
        self.core_mut().set_title(owned(meta.get("Title")));
    }
}

impl MetaCodec for Novel {
    fn export_meta(&self, out: &mut Vec<String>) {
        push_string(out, "Title", self.core().title());
        push_string(out, "Language", self.language_code());
        push_string(out, "Country", self.country_code());
        push_flag(out, "renumberChapters", self.renumber_chapters());
        push_flag(out, "renumberParts", self.renumber_parts());
        push_flag(out, "renumberWithinParts", self.renumber_within_parts());
        push_flag(out, "romanChapterNumbers", self.roman_chapter_numbers());
        push_flag(out, "romanPartNumbers", self.roman_part_numbers());
        push_flag(out, "saveWordCount", self.save_word_count());
        if let Some(phase) = self.work_phase() {
            out.push(format!("workPhase: {}", phase.as_number()));
        }
        push_string(out, "Author", self.author_name());
        // Heading decorations are quoted so surrounding blanks survive.
        for (key, value) in [
            ("ChapterHeadingPrefix", self.chapter_heading_prefix()),
            ("ChapterHeadingSuffix", self.chapter_heading_suffix()),
            ("PartHeadingPrefix", self.part_heading_prefix()),
            ("PartHeadingSuffix", self.part_heading_suffix()),
        ] {
            if let Some(value) = value {
                if !value.is_empty() {
                    out.push(format!("{key}: \"{value}\""));
                }
            }
        }
        push_string(out, "CustomPlotProgress", self.custom_plot_progress());
        push_string(out, "CustomCharacterization", self.custom_characterization());
        push_string(out, "CustomWorldBuilding", self.custom_world_building());
        push_string(out, "CustomGoal", self.custom_goal());
        push_string(out, "CustomConflict", self.custom_conflict());
        push_string(out, "CustomOutcome", self.custom_outcome());
        push_string(out, "CustomChrBio", self.custom_chr_bio());
        push_string(out, "CustomChrGoals", self.custom_chr_goals());
        if let Some(count) = self.word_count_start().filter(|count| *count > 0) {
            out.push(format!("WordCountStart: {count}"));
        }
        if let Some(target) = self.word_target().filter(|target| *target > 0) {
            out.push(format!("WordTarget: {target}"));
        }
        if let Some(date) = self.reference_date() {
            out.push(format!("ReferenceDate: {}", date.format("%Y-%m-%d")));
        }
    }

    fn import_meta(&mut self, meta: &MetaMap) {
        self.core_mut().set_title(owned(meta.get("Title")));
        self.set_language_code(owned(meta.get("Language")));
        self.set_country_code(owned(meta.get("Country")));
        self.set_renumber_chapters(meta.flag("renumberChapters"));
        self.set_renumber_parts(meta.flag("renumberParts"));
        self.set_renumber_within_parts(meta.flag("renumberWithinParts"));
        self.set_roman_chapter_numbers(meta.flag("romanChapterNumbers"));
        self.set_roman_part_numbers(meta.flag("romanPartNumbers"));
        self.set_save_word_count(meta.flag("saveWordCount"));
        // Out-of-range work phase reads as unset.
        self.set_work_phase(
            meta.get("workPhase")
                .and_then(|value| value.parse::<u8>().ok())
                .and_then(Status::from_number),
        );
        self.set_author_name(owned(meta.get("Author")));
        self.set_chapter_heading_prefix(unquote(meta.get("ChapterHeadingPrefix")));
        self.set_chapter_heading_suffix(unquote(meta.get("ChapterHeadingSuffix")));
        self.set_part_heading_prefix(unquote(meta.get("PartHeadingPrefix")));
        self.set_part_heading_suffix(unquote(meta.get("PartHeadingSuffix")));
        self.set_custom_plot_progress(owned(meta.get("CustomPlotProgress")));
        self.set_custom_characterization(owned(meta.get("CustomCharacterization")));
        self.set_custom_world_building(owned(meta.get("CustomWorldBuilding")));
        self.set_custom_goal(owned(meta.get("CustomGoal")));
        self.set_custom_conflict(owned(meta.get("CustomConflict")));
        self.set_custom_outcome(owned(meta.get("CustomOutcome")));
        self.set_custom_chr_bio(owned(meta.get("CustomChrBio")));
        self.set_custom_chr_goals(owned(meta.get("CustomChrGoals")));
        self.set_word_count_start(meta.get("WordCountStart").and_then(|v| v.parse().ok()));
        self.set_word_target(meta.get("WordTarget").and_then(|v| v.parse().ok()));
        self.set_reference_date(verified_date(meta.get("ReferenceDate")));
    }
}

fn unquote(value: Option<&str>) -> Option<String> {
    let value = value?;
    let trimmed = value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(value);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::MetaCodec;
    use crate::meta::MetaMap;
    use crate::model::chapter::{ChapterLevel, ChapterType};
    use crate::model::element::ChangeSignal;
    use crate::model::novel::Novel;
    use crate::model::section::{SceneKind, Section, SectionType, Status};

    #[test]
    fn section_round_trips_through_meta_lines() {
        let mut section = Section::new(ChangeSignal::new());
        section.core_mut().set_title(Some("Ambush".to_string()));
        section.set_tags(vec!["night".to_string(), "rain".to_string()]);
        section.set_sc_type(SectionType::Unused);
        section.set_status(Status::Draft);
        section.set_scene(SceneKind::Reaction);
        section.set_day(Some("12".to_string()));
        section.set_lasts_hours(Some("2".to_string()));
        section.set_characters(vec![crate::model::id::ElementId::Character(1)]);

        let mut lines = Vec::new();
        section.export_meta(&mut lines);
        let mut restored = Section::new(ChangeSignal::new());
        restored.import_meta(&MetaMap::parse(&lines));
        assert_eq!(restored, section);
    }

    #[test]
    fn out_of_range_values_fall_back_to_defaults() {
        let mut section = Section::new(ChangeSignal::new());
        section.import_meta(&MetaMap::parse(&[
            "type: 9",
            "status: 7",
            "scene: 42",
            "Date: not-a-date",
        ]));
        assert_eq!(section.sc_type(), SectionType::Unused);
        assert_eq!(section.status(), Status::Outline);
        assert_eq!(section.scene(), SceneKind::NotAScene);
        assert_eq!(section.date(), None);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut chapter = crate::model::chapter::Chapter::new(ChangeSignal::new());
        chapter.import_meta(&MetaMap::parse(&["Title: One", "futureKey: whatever"]));
        assert_eq!(chapter.core().title(), Some("One"));
        assert_eq!(chapter.ch_type(), ChapterType::Normal);
        assert_eq!(chapter.level(), ChapterLevel::Chapter);
    }

    #[test]
    fn heading_decorations_keep_spacing_through_quotes() {
        let mut novel = Novel::new(ChangeSignal::new());
        novel.set_chapter_heading_prefix(Some("Chapter ".to_string()));
        let mut lines = Vec::new();
        novel.export_meta(&mut lines);
        assert!(lines.contains(&"ChapterHeadingPrefix: \"Chapter \"".to_string()));

        let mut restored = Novel::new(ChangeSignal::new());
        restored.import_meta(&MetaMap::parse(&lines));
        assert_eq!(restored.chapter_heading_prefix(), Some("Chapter "));
    }
}
