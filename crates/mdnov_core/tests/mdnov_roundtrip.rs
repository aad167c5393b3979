use chrono::{NaiveDate, NaiveTime};
use mdnov_core::mdnov::{parse_mdnov, render_mdnov};
use mdnov_core::model::chapter::ChapterLevel;
use mdnov_core::model::element::{ChangeSignal, Link};
use mdnov_core::model::id::ElementId;
use mdnov_core::model::section::{SceneKind, Status};
use mdnov_core::model::tree::ParentKey;
use mdnov_core::{reconcile_references, Category, Novel, WcLog, WordCount};

fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, n).unwrap()
}

fn sample_project() -> (Novel, WcLog) {
    let mut novel = Novel::new(ChangeSignal::new());
    novel.core_mut().set_title(Some("The Long Rain".to_string()));
    novel.core_mut().set_desc(Some("A novel in two parts.".to_string()));
    novel.core_mut().add_link(Link {
        path: "notes/worldbuilding.md".to_string(),
        full_path: Some("/home/author/notes/worldbuilding.md".to_string()),
    });
    novel.set_author_name(Some("A. Writer".to_string()));
    novel.set_language_code(Some("en".to_string()));
    novel.set_country_code(Some("US".to_string()));
    novel.set_save_word_count(true);
    novel.set_work_phase(Status::from_number(2));
    novel.set_chapter_heading_prefix(Some("Chapter ".to_string()));
    novel.set_word_target(Some(80000));
    novel.set_reference_date(Some(day(1)));

    let part = ElementId::Chapter(1);
    let mut chapter = novel.make_chapter();
    chapter.core_mut().set_title(Some("Part One".to_string()));
    chapter.set_level(ChapterLevel::Part);
    novel.chapters.insert(part, chapter);
    novel.tree.append(ParentKey::Root(Category::Chapter), part);

    let ch = ElementId::Chapter(2);
    let mut chapter = novel.make_chapter();
    chapter.core_mut().set_title(Some("Arrival".to_string()));
    chapter.set_notes(Some("Opens on the pier.".to_string()));
    novel.chapters.insert(ch, chapter);
    novel.tree.append(ParentKey::Root(Category::Chapter), ch);

    let cr = ElementId::Character(1);
    let mut character = novel.make_character();
    character.core_mut().set_title(Some("Mara".to_string()));
    character.set_full_name(Some("Mara Voss".to_string()));
    character.set_is_major(true);
    character.set_birth_date(NaiveDate::from_ymd_opt(1990, 2, 11));
    character.set_bio(Some("Grew up on the coast.".to_string()));
    character.set_goals(Some("Find her brother.".to_string()));
    character.world_mut().set_tags(vec!["pov".to_string()]);
    novel.characters.insert(cr, character);
    novel.tree.append(ParentKey::Root(Category::Character), cr);

    let lc = ElementId::Location(1);
    let mut location = novel.make_world_element();
    location.core_mut().set_title(Some("The pier".to_string()));
    location.set_aka(Some("Old harbor".to_string()));
    novel.locations.insert(lc, location);
    novel.tree.append(ParentKey::Root(Category::Location), lc);

    let it = ElementId::Item(1);
    let mut item = novel.make_world_element();
    item.core_mut().set_title(Some("Brass compass".to_string()));
    item.set_notes(Some("Stops working in the rain.".to_string()));
    novel.items.insert(it, item);
    novel.tree.append(ParentKey::Root(Category::Item), it);

    let ac = ElementId::PlotLine(1);
    let sc = ElementId::Section(1);
    let mut plot_line = novel.make_plot_line();
    plot_line.core_mut().set_title(Some("The search".to_string()));
    plot_line.set_short_name(Some("A".to_string()));
    plot_line.set_sections(vec![sc]);
    novel.plot_lines.insert(ac, plot_line);
    novel.tree.append(ParentKey::Root(Category::PlotLine), ac);

    let ap = ElementId::PlotPoint(1);
    let mut plot_point = novel.make_plot_point();
    plot_point.core_mut().set_title(Some("First clue".to_string()));
    plot_point.set_section(Some(sc));
    novel.plot_points.insert(ap, plot_point);
    novel.tree.append(ParentKey::Element(ac), ap);

    let mut section = novel.make_section();
    section.core_mut().set_title(Some("Landfall".to_string()));
    section.core_mut().set_desc(Some("Mara steps off the ferry.".to_string()));
    section.set_notes(Some("Check ferry schedule.".to_string()));
    section.set_tags(vec!["rain".to_string(), "opening".to_string()]);
    section.set_status(Status::from_number(3).unwrap());
    section.set_scene(SceneKind::Action);
    section.set_goal(Some("Reach the harbor office.".to_string()));
    section.set_conflict(Some("The office is closed.".to_string()));
    section.set_outcome(Some("She climbs in through a window.".to_string()));
    section.set_date(Some(day(3)));
    section.set_time(NaiveTime::from_hms_opt(18, 30, 0));
    section.set_lasts_hours(Some("2".to_string()));
    section.set_characters(vec![cr]);
    section.set_locations(vec![lc]);
    section.set_items(vec![it]);
    section.set_plotline_note(ac, "The clue is planted here.".to_string());
    section.set_content(Some(
        "<p>The ferry groaned against the pilings.</p>\n\n<p>Mara was first down the ramp.</p>"
            .to_string(),
    ));
    novel.sections.insert(sc, section);
    novel.tree.append(ParentKey::Element(ch), sc);

    let pn = ElementId::ProjectNote(1);
    let mut note = novel.make_project_note();
    note.core_mut().set_title(Some("Loose ends".to_string()));
    note.core_mut().set_desc(Some("Who owns the compass?".to_string()));
    novel.project_notes.insert(pn, note);
    novel.tree.append(ParentKey::Root(Category::ProjectNote), pn);

    let mut wc_log = WcLog::new();
    wc_log.insert(
        day(10),
        WordCount {
            count: 120,
            with_unused: 150,
        },
    );
    wc_log.insert(
        day(11),
        WordCount {
            count: 180,
            with_unused: 210,
        },
    );

    (novel, wc_log)
}

#[test]
fn render_then_parse_reproduces_the_project() {
    let (mut novel, wc_log) = sample_project();
    reconcile_references(&mut novel);

    let text = render_mdnov(&novel, &wc_log);

    let mut restored = Novel::new(ChangeSignal::new());
    let mut restored_log = WcLog::new();
    parse_mdnov(&text, &mut restored, &mut restored_log).unwrap();
    reconcile_references(&mut restored);

    assert_eq!(restored, novel);
    assert_eq!(
        restored_log.entries().collect::<Vec<_>>(),
        wc_log.entries().collect::<Vec<_>>()
    );
}

#[test]
fn rendering_is_stable_across_a_round_trip() {
    let (mut novel, wc_log) = sample_project();
    reconcile_references(&mut novel);
    let first = render_mdnov(&novel, &wc_log);

    let mut restored = Novel::new(ChangeSignal::new());
    let mut restored_log = WcLog::new();
    parse_mdnov(&first, &mut restored, &mut restored_log).unwrap();
    let second = render_mdnov(&restored, &restored_log);

    assert_eq!(second, first);
}

#[test]
fn bodies_holding_marker_lines_round_trip() {
    let mut novel = Novel::new(ChangeSignal::new());
    novel.core_mut().set_title(Some("Drafts".to_string()));
    novel.core_mut().add_link(Link {
        path: "@@scratch/outline.md".to_string(),
        full_path: None,
    });

    let ch = ElementId::Chapter(1);
    novel.chapters.insert(ch, novel.make_chapter());
    novel.tree.append(ParentKey::Root(Category::Chapter), ch);

    let sc = ElementId::Section(1);
    let mut section = novel.make_section();
    section.set_content(Some(
        "<p>Her handle was</p>\n@@ch9 on the forum\n%%Notes: she wrote".to_string(),
    ));
    section.set_notes(Some("\\@@ stays literal\n---\nso does the rule".to_string()));
    section.core_mut().set_desc(Some("@@ch1 would be a chapter header".to_string()));
    novel.sections.insert(sc, section);
    novel.tree.append(ParentKey::Element(ch), sc);

    let wc_log = WcLog::new();
    let text = render_mdnov(&novel, &wc_log);

    let mut restored = Novel::new(ChangeSignal::new());
    let mut restored_log = WcLog::new();
    parse_mdnov(&text, &mut restored, &mut restored_log).unwrap();

    assert_eq!(restored, novel);
    assert_eq!(render_mdnov(&restored, &restored_log), text);
}

#[test]
fn link_without_full_path_survives() {
    let mut novel = Novel::new(ChangeSignal::new());
    novel.core_mut().set_title(Some("Links".to_string()));
    novel.core_mut().add_link(Link {
        path: "outline.md".to_string(),
        full_path: None,
    });
    let wc_log = WcLog::new();
    let text = render_mdnov(&novel, &wc_log);

    let mut restored = Novel::new(ChangeSignal::new());
    let mut restored_log = WcLog::new();
    parse_mdnov(&text, &mut restored, &mut restored_log).unwrap();
    assert_eq!(
        restored.core().links(),
        &[Link {
            path: "outline.md".to_string(),
            full_path: None,
        }]
    );
}

#[test]
fn progress_block_is_omitted_without_save_word_count() {
    let (mut novel, wc_log) = sample_project();
    novel.set_save_word_count(false);
    let text = render_mdnov(&novel, &wc_log);
    assert!(!text.contains("@@Progress"));

    let mut restored = Novel::new(ChangeSignal::new());
    let mut restored_log = WcLog::new();
    parse_mdnov(&text, &mut restored, &mut restored_log).unwrap();
    assert!(restored_log.is_empty());
}
