use chrono::NaiveDate;
use mdnov_core::json::{export_json, import_json, read_json_file, write_json_file, JsonError};
use mdnov_core::model::element::ChangeSignal;
use mdnov_core::model::id::ElementId;
use mdnov_core::model::section::Status;
use mdnov_core::model::tree::ParentKey;
use mdnov_core::{reconcile_references, Category, Novel, WcLog, WordCount};
use serde_json::json;

fn sample_project() -> (Novel, WcLog) {
    let mut novel = Novel::new(ChangeSignal::new());
    novel.core_mut().set_title(Some("Mirror".to_string()));
    novel.set_author_name(Some("A. Writer".to_string()));
    novel.set_save_word_count(true);
    novel.set_work_phase(Status::from_number(1));

    let ch = ElementId::Chapter(1);
    let mut chapter = novel.make_chapter();
    chapter.core_mut().set_title(Some("One".to_string()));
    novel.chapters.insert(ch, chapter);
    novel.tree.append(ParentKey::Root(Category::Chapter), ch);

    let cr = ElementId::Character(1);
    let mut character = novel.make_character();
    character.core_mut().set_title(Some("Mara".to_string()));
    character.set_is_major(true);
    novel.characters.insert(cr, character);
    novel.tree.append(ParentKey::Root(Category::Character), cr);

    let sc = ElementId::Section(1);
    let mut section = novel.make_section();
    section.core_mut().set_title(Some("Landfall".to_string()));
    section.set_characters(vec![cr]);
    section.set_content(Some("<p>Hello world</p><p>Foo</p>".to_string()));
    novel.sections.insert(sc, section);
    novel.tree.append(ParentKey::Element(ch), sc);

    let ac = ElementId::PlotLine(1);
    let mut plot_line = novel.make_plot_line();
    plot_line.set_short_name(Some("A".to_string()));
    plot_line.set_sections(vec![sc]);
    novel.plot_lines.insert(ac, plot_line);
    novel.tree.append(ParentKey::Root(Category::PlotLine), ac);

    let ap = ElementId::PlotPoint(1);
    let mut plot_point = novel.make_plot_point();
    plot_point.set_section(Some(sc));
    novel.plot_points.insert(ap, plot_point);
    novel.tree.append(ParentKey::Element(ac), ap);

    let mut wc_log = WcLog::new();
    wc_log.insert(
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        WordCount {
            count: 3,
            with_unused: 3,
        },
    );

    (novel, wc_log)
}

#[test]
fn export_then_import_reproduces_the_project() {
    let (mut novel, wc_log) = sample_project();
    reconcile_references(&mut novel);

    let data = export_json(&novel, &wc_log);

    let mut restored = Novel::new(ChangeSignal::new());
    let mut restored_log = WcLog::new();
    import_json(&data, &mut restored, &mut restored_log).unwrap();

    assert_eq!(restored, novel);
    assert_eq!(
        restored_log.entries().collect::<Vec<_>>(),
        wc_log.entries().collect::<Vec<_>>()
    );
}

#[test]
fn exported_document_carries_the_expected_shape() {
    let (mut novel, wc_log) = sample_project();
    reconcile_references(&mut novel);
    let data = export_json(&novel, &wc_log);

    let root = &data["mdnov"];
    assert_eq!(root["version"], json!("1.0"));
    assert_eq!(root["PROJECT"]["Title"], json!("Mirror"));
    assert_eq!(root["CHAPTERS"]["ch1"]["SECTIONS"]["sc1"]["Title"], json!("Landfall"));
    assert_eq!(root["ARCS"]["ac1"]["POINTS"]["ap1"]["Section"], json!("sc1"));
    assert_eq!(root["PROGRESS"]["2024-06-01"], json!([3, 3]));
    // Defaults stay absent.
    assert!(root["CHAPTERS"]["ch1"].get("type").is_none());
    assert!(root["PROJECT"].get("renumberChapters").is_none());
}

#[test]
fn import_rejects_incompatible_versions() {
    let mut novel = Novel::new(ChangeSignal::new());
    let mut wc_log = WcLog::new();

    let newer = json!({"mdnov": {"version": "2.0"}});
    assert!(matches!(
        import_json(&newer, &mut novel, &mut wc_log),
        Err(JsonError::Version(_))
    ));

    let rootless = json!({"novel": {}});
    assert!(matches!(
        import_json(&rootless, &mut novel, &mut wc_log),
        Err(JsonError::Version(_))
    ));
}

#[test]
fn import_rejects_wrong_category_keys() {
    let mut novel = Novel::new(ChangeSignal::new());
    let mut wc_log = WcLog::new();
    let data = json!({"mdnov": {
        "version": "1.0",
        "CHAPTERS": {"sc1": {"Title": "Not a chapter"}},
    }});
    assert!(matches!(
        import_json(&data, &mut novel, &mut wc_log),
        Err(JsonError::BadId(_))
    ));
}

#[test]
fn json_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mirror.json");

    let (mut novel, wc_log) = sample_project();
    reconcile_references(&mut novel);
    write_json_file(&path, &novel, &wc_log).unwrap();

    let mut restored = Novel::new(ChangeSignal::new());
    let mut restored_log = WcLog::new();
    read_json_file(&path, &mut restored, &mut restored_log).unwrap();
    assert_eq!(restored, novel);
}
