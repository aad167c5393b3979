use mdnov_core::mdnov::parse_mdnov;
use mdnov_core::model::element::ChangeSignal;
use mdnov_core::{FormatError, MdnovError, Novel, ProjectFile, WcLog};

fn parse(text: &str) -> Result<Novel, FormatError> {
    let mut novel = Novel::new(ChangeSignal::new());
    let mut wc_log = WcLog::new();
    parse_mdnov(text, &mut novel, &mut wc_log)?;
    Ok(novel)
}

#[test]
fn unknown_id_prefix_is_rejected() {
    let err = parse("@@xx1\n\n---\nTitle: ?\n---\n").unwrap_err();
    assert!(matches!(err, FormatError::BadElementId(_)));
}

#[test]
fn section_before_any_chapter_is_rejected() {
    let err = parse("@@sc1\n\n---\nTitle: Orphan\n---\n").unwrap_err();
    assert!(matches!(err, FormatError::OrphanSection(_)));
}

#[test]
fn plot_point_before_any_plot_line_is_rejected() {
    let err = parse("@@ap1\n\n---\nTitle: Orphan\n---\n").unwrap_err();
    assert!(matches!(err, FormatError::OrphanPlotPoint(_)));
}

#[test]
fn body_tag_outside_any_block_is_rejected() {
    let err = parse("%%Desc:\n\nLost text\n").unwrap_err();
    assert!(matches!(err, FormatError::TagOutsideElement(_)));
}

#[test]
fn unclosed_metadata_fence_is_rejected() {
    let err = parse("@@ch1\n\n---\nTitle: Broken\n").unwrap_err();
    assert!(matches!(err, FormatError::UnclosedMeta(_)));
}

#[test]
fn plotline_note_without_plotline_is_rejected() {
    let text = "@@ch1\n\n---\nTitle: One\n---\n\n@@sc1\n\n---\nTitle: S\n---\n\n\
                %%Plotline note:\n\nnote\n";
    let err = parse(text).unwrap_err();
    assert!(matches!(err, FormatError::NoteWithoutPlotline));
}

#[test]
fn plotline_tag_must_name_a_plot_line() {
    let text = "@@ch1\n\n---\nTitle: One\n---\n\n@@sc1\n\n---\nTitle: S\n---\n\n\
                %%Plotline: sc1\n";
    let err = parse(text).unwrap_err();
    assert!(matches!(err, FormatError::WrongCategory { .. }));
}

#[test]
fn project_read_reports_corrupt_data_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.mdnov");
    std::fs::write(&path, "@@xx1\n\n---\nTitle: ?\n---\n").unwrap();

    let mut project = ProjectFile::new(&path);
    let err = project.read().unwrap_err();
    assert!(matches!(err, MdnovError::Corrupt { .. }));
    assert!(err.to_string().contains("corrupt project data"));
    assert!(err.to_string().contains("broken.mdnov"));
}

#[test]
fn reading_a_missing_file_is_a_read_error() {
    let mut project = ProjectFile::new("no-such-file.mdnov");
    let err = project.read().unwrap_err();
    assert!(matches!(err, MdnovError::Read { .. }));
}
