//! mdnov writer.
//!
//! # Responsibility
//! - Render a `Novel` and its word-count ledger into the canonical
//!   mdnov text, deterministically: tree order for structure, element
//!   order for bodies, compacted ledger last.

use std::collections::HashMap;
use std::fmt::Write;

use crate::mdnov::escape_marker_line;
use crate::meta::MetaCodec;
use crate::model::element::{ElementCore, Link};
use crate::model::id::{Category, ElementId};
use crate::model::novel::Novel;
use crate::model::tree::ParentKey;
use crate::model::world::WorldElement;
use crate::wc::WcLog;

/// Renders the whole project as mdnov text.
pub fn render_mdnov(novel: &Novel, wc_log: &WcLog) -> String {
    let mut out = String::new();

    write_header(&mut out, "book", novel);
    write_links(&mut out, novel.core());
    write_body(&mut out, "Desc", novel.core().desc());

    for &ch_id in novel.tree.get_children(ParentKey::Root(Category::Chapter)) {
        if let Some(chapter) = novel.chapters.get(&ch_id) {
            write_header(&mut out, &ch_id.to_string(), chapter);
            write_links(&mut out, chapter.core());
            write_body(&mut out, "Desc", chapter.core().desc());
            write_body(&mut out, "Notes", chapter.notes());
        }
        for &sc_id in novel.tree.get_children(ParentKey::Element(ch_id)) {
            let Some(section) = novel.sections.get(&sc_id) else {
                continue;
            };
            write_header(&mut out, &sc_id.to_string(), section);
            write_links(&mut out, section.core());
            write_body(&mut out, "Desc", section.core().desc());
            write_body(&mut out, "Notes", section.notes());
            write_body(&mut out, "Goal", section.goal());
            write_body(&mut out, "Conflict", section.conflict());
            write_body(&mut out, "Outcome", section.outcome());
            for (plot_line, note) in section.plotline_notes() {
                if note.is_empty() {
                    continue;
                }
                let _ = write!(out, "%%Plotline: {plot_line}\n\n");
                write_body(&mut out, "Plotline note", Some(note.as_str()));
            }
            write_body(&mut out, "Content", section.content());
        }
    }

    for &cr_id in novel.tree.get_children(ParentKey::Root(Category::Character)) {
        let Some(character) = novel.characters.get(&cr_id) else {
            continue;
        };
        write_header(&mut out, &cr_id.to_string(), character);
        write_links(&mut out, character.core());
        write_body(&mut out, "Desc", character.core().desc());
        write_body(&mut out, "Bio", character.bio());
        write_body(&mut out, "Goals", character.goals());
        write_body(&mut out, "Notes", character.world().notes());
    }

    write_world(&mut out, novel, Category::Location, &novel.locations);
    write_world(&mut out, novel, Category::Item, &novel.items);

    for &ac_id in novel.tree.get_children(ParentKey::Root(Category::PlotLine)) {
        if let Some(plot_line) = novel.plot_lines.get(&ac_id) {
            write_header(&mut out, &ac_id.to_string(), plot_line);
            write_links(&mut out, plot_line.core());
            write_body(&mut out, "Desc", plot_line.core().desc());
            write_body(&mut out, "Notes", plot_line.notes());
        }
        for &ap_id in novel.tree.get_children(ParentKey::Element(ac_id)) {
            let Some(plot_point) = novel.plot_points.get(&ap_id) else {
                continue;
            };
            write_header(&mut out, &ap_id.to_string(), plot_point);
            write_links(&mut out, plot_point.core());
            write_body(&mut out, "Desc", plot_point.core().desc());
            write_body(&mut out, "Notes", plot_point.notes());
        }
    }

    for &pn_id in novel.tree.get_children(ParentKey::Root(Category::ProjectNote)) {
        let Some(note) = novel.project_notes.get(&pn_id) else {
            continue;
        };
        write_header(&mut out, &pn_id.to_string(), note);
        write_links(&mut out, note.core());
        write_body(&mut out, "Desc", note.core().desc());
    }

    if novel.save_word_count() && !wc_log.is_empty() {
        out.push_str("@@Progress\n\n");
        for (date, wc) in wc_log.compacted() {
            let _ = writeln!(out, "- {date};{};{}", wc.count, wc.with_unused);
        }
        out.push('\n');
    }

    out
}

fn write_world(
    out: &mut String,
    novel: &Novel,
    category: Category,
    collection: &HashMap<ElementId, WorldElement>,
) {
    for &id in novel.tree.get_children(ParentKey::Root(category)) {
        let Some(world) = collection.get(&id) else {
            continue;
        };
        write_header(out, &id.to_string(), world);
        write_links(out, world.core());
        write_body(out, "Desc", world.core().desc());
        write_body(out, "Notes", world.notes());
    }
}

/// `@@{tag}` line plus the fenced metadata block.
fn write_header(out: &mut String, tag: &str, element: &impl MetaCodec) {
    let _ = write!(out, "@@{tag}\n\n---\n");
    let mut meta = Vec::new();
    element.export_meta(&mut meta);
    for line in meta {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str("---\n\n");
}

fn write_links(out: &mut String, core: &ElementCore) {
    for Link { path, full_path } in core.links() {
        out.push_str("%%Link:\n\n");
        out.push_str(&escape_marker_line(path));
        out.push('\n');
        if let Some(full_path) = full_path {
            out.push_str(&escape_marker_line(full_path));
            out.push('\n');
        }
        out.push('\n');
    }
}

fn write_body(out: &mut String, key: &str, text: Option<&str>) {
    let Some(text) = text else {
        return;
    };
    if text.is_empty() {
        return;
    }
    let _ = write!(out, "%%{key}:\n\n");
    for line in text.lines() {
        out.push_str(&escape_marker_line(line));
        out.push('\n');
    }
    out.push('\n');
}
