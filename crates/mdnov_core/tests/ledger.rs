use chrono::NaiveDate;
use mdnov_core::model::element::ChangeSignal;
use mdnov_core::model::id::ElementId;
use mdnov_core::model::tree::ParentKey;
use mdnov_core::{Category, Novel, ProjectFile, WcLog, WordCount};

fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, n).unwrap()
}

fn wc(count: u32) -> WordCount {
    WordCount {
        count,
        with_unused: count,
    }
}

#[test]
fn consecutive_duplicates_are_compacted() {
    let mut log = WcLog::new();
    log.insert(day(1), wc(100));
    log.insert(day(2), wc(100));
    log.insert(day(3), wc(120));
    log.insert(day(4), wc(120));
    log.insert(day(5), wc(100));

    let compacted = log.compacted();
    assert_eq!(
        compacted,
        vec![(day(1), wc(100)), (day(3), wc(120)), (day(5), wc(100))]
    );
}

#[test]
fn keep_actual_stages_only_on_disagreement() {
    let mut log = WcLog::new();
    log.insert(day(1), wc(100));

    log.keep_actual(wc(100), day(5));
    assert!(!log.has_pending());

    log.keep_actual(wc(130), day(5));
    assert!(log.has_pending());
}

#[test]
fn keep_actual_never_seeds_an_empty_log() {
    let mut log = WcLog::new();
    log.keep_actual(wc(10), day(1));
    assert!(!log.has_pending());
    assert!(log.is_empty());
}

#[test]
fn write_merges_pending_only_when_logging_is_enabled() {
    let mut log = WcLog::new();
    log.insert(day(1), wc(100));
    log.stage(day(2), wc(110));

    let mut disabled = log.clone();
    disabled.update_on_write(false, day(3), wc(120));
    assert!(!disabled.has_pending());
    assert_eq!(disabled.latest(), Some((day(1), wc(100))));

    log.update_on_write(true, day(3), wc(120));
    assert!(!log.has_pending());
    assert_eq!(
        log.entries().collect::<Vec<_>>(),
        vec![(day(1), wc(100)), (day(2), wc(110)), (day(3), wc(120))]
    );
}

#[test]
fn repeated_writes_do_not_grow_the_persisted_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.mdnov");

    let mut project = ProjectFile::new(&path);
    project.novel = sample_novel();
    project.write().unwrap();
    project.write().unwrap();
    project.write().unwrap();

    let mut restored = ProjectFile::new(&path);
    restored.read().unwrap();
    // Same counts every day, so compaction keeps a single entry.
    assert_eq!(restored.wc_log.entries().count(), 1);
    let (_, words) = restored.wc_log.latest().unwrap();
    assert_eq!(words.count, 2);
    assert_eq!(words.with_unused, 2);
}

fn sample_novel() -> Novel {
    let mut novel = Novel::new(ChangeSignal::new());
    novel.core_mut().set_title(Some("Ledger".to_string()));
    novel.set_save_word_count(true);

    let ch = ElementId::Chapter(1);
    novel.chapters.insert(ch, novel.make_chapter());
    novel.tree.append(ParentKey::Root(Category::Chapter), ch);

    let sc = ElementId::Section(1);
    let mut section = novel.make_section();
    section.set_content(Some("two words".to_string()));
    novel.sections.insert(sc, section);
    novel.tree.append(ParentKey::Element(ch), sc);

    novel
}
