//! Reference reconciler.
//!
//! # Responsibility
//! - Drop dangling cross-references after a full read and rebuild the
//!   derived back-references sections hold to plot lines and plot
//!   points.
//!
//! # Invariants
//! - Idempotent: derived fields are recomputed from the source-of-truth
//!   lists, never appended to.
//! - Dangling references are repaired silently; they are tolerated
//!   hand-edit damage, not errors.

use crate::model::id::{Category, ElementId};
use crate::model::novel::Novel;
use crate::model::tree::ParentKey;
use log::debug;

/// Runs the full reconciliation pass over `novel`.
pub fn reconcile_references(novel: &mut Novel) {
    let character_ids: Vec<ElementId> = novel.characters.keys().copied().collect();
    let location_ids: Vec<ElementId> = novel.locations.keys().copied().collect();
    let item_ids: Vec<ElementId> = novel.items.keys().copied().collect();
    let section_ids: Vec<ElementId> = novel.sections.keys().copied().collect();

    let mut dropped = 0usize;

    // Section reference lists against the collections that exist.
    for section in novel.sections.values_mut() {
        section.clear_derived_refs();
        if let Some(kept) = intersect(section.characters(), &character_ids) {
            dropped += section.characters().len() - kept.len();
            section.set_characters(kept);
        }
        if let Some(kept) = intersect(section.locations(), &location_ids) {
            dropped += section.locations().len() - kept.len();
            section.set_locations(kept);
        }
        if let Some(kept) = intersect(section.items(), &item_ids) {
            dropped += section.items().len() - kept.len();
            section.set_items(kept);
        }
    }

    // Plot line section lists, then the derived section -> plot line
    // back-references, in plot line display order.
    let plot_line_ids: Vec<ElementId> = novel
        .tree
        .get_children(ParentKey::Root(Category::PlotLine))
        .to_vec();
    for plot_line_id in &plot_line_ids {
        let Some(plot_line) = novel.plot_lines.get_mut(plot_line_id) else {
            continue;
        };
        if let Some(kept) = intersect(plot_line.sections(), &section_ids) {
            dropped += plot_line.sections().len() - kept.len();
            plot_line.set_sections(kept);
        }
        for section_id in plot_line.sections().to_vec() {
            if let Some(section) = novel.sections.get_mut(&section_id) {
                section.push_plot_line_ref(*plot_line_id);
            }
        }
    }

    // Plot point associations, again in display order per plot line.
    for plot_line_id in &plot_line_ids {
        for plot_point_id in novel
            .tree
            .get_children(ParentKey::Element(*plot_line_id))
            .to_vec()
        {
            let Some(plot_point) = novel.plot_points.get_mut(&plot_point_id) else {
                continue;
            };
            let Some(section_id) = plot_point.section() else {
                continue;
            };
            if let Some(section) = novel.sections.get_mut(&section_id) {
                section.register_plot_point_ref(plot_point_id, *plot_line_id);
            } else {
                // Repaired, not raised: the association is simply gone.
                plot_point.set_section(None);
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        debug!("event=reconcile_refs status=repaired dropped={dropped}");
    }
}

/// Returns the ordered subset of `candidates` that also appears in
/// `existing`, or `None` when nothing needs to change.
fn intersect(candidates: &[ElementId], existing: &[ElementId]) -> Option<Vec<ElementId>> {
    let kept: Vec<ElementId> = candidates
        .iter()
        .copied()
        .filter(|id| existing.contains(id))
        .collect();
    if kept.len() == candidates.len() {
        None
    } else {
        Some(kept)
    }
}
