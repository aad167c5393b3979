//! JSON mirror of the project.
//!
//! # Responsibility
//! - Export and import the whole project as one versioned JSON tree,
//!   carrying the same entity set as the mdnov text format.
//!
//! # Invariants
//! - Only non-default values are emitted; missing or out-of-range
//!   values fall back to the documented defaults on import.
//! - Object order carries structure: chapters hold their `SECTIONS`,
//!   plot lines their `POINTS`, both in tree order.

use log::info;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use crate::meta::{verified_date, verified_int_string, verified_time};
use crate::model::chapter::{Chapter, ChapterLevel, ChapterType};
use crate::model::element::{ElementCore, Link, ProjectNote};
use crate::model::id::{Category, ElementId};
use crate::model::novel::Novel;
use crate::model::plot::{PlotLine, PlotPoint};
use crate::model::section::{SceneKind, Section, SectionType, Status};
use crate::model::tree::ParentKey;
use crate::model::world::{Character, WorldElement};
use crate::reconcile::reconcile_references;
use crate::wc::{WcLog, WordCount};

/// File extension of the JSON mirror.
pub const EXTENSION: &str = "json";

const MAJOR_VERSION: u32 = 1;
const MINOR_VERSION: u32 = 0;

/// Errors from the JSON mirror.
#[derive(Debug)]
pub enum JsonError {
    /// Missing root element, or an incompatible document version.
    Version(String),
    /// A malformed or wrong-category element ID key.
    BadId(String),
    /// The document is not valid JSON.
    Parse(serde_json::Error),
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for JsonError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Version(message) => write!(f, "{message}"),
            Self::BadId(message) => write!(f, "{message}"),
            Self::Parse(err) => write!(f, "invalid JSON document: {err}"),
            Self::Read { path, source } => {
                write!(f, "cannot read `{}`: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "cannot write `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for JsonError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Version(_) | Self::BadId(_) => None,
        }
    }
}

/// `[narrative, narrative+unused]` ledger entry as stored on disk.
#[derive(Deserialize)]
struct ProgressEntry(u32, u32);

/// Reads `path` into `novel` and `wc_log`.
pub fn read_json_file(path: &Path, novel: &mut Novel, wc_log: &mut WcLog) -> Result<(), JsonError> {
    let text = std::fs::read_to_string(path).map_err(|source| JsonError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let data: Value = serde_json::from_str(&text).map_err(JsonError::Parse)?;
    import_json(&data, novel, wc_log)?;
    info!(
        "event=json_read status=ok path={} chapters={} sections={}",
        path.display(),
        novel.chapters.len(),
        novel.sections.len()
    );
    Ok(())
}

/// Renders and writes the project as pretty-printed JSON.
pub fn write_json_file(path: &Path, novel: &Novel, wc_log: &WcLog) -> Result<(), JsonError> {
    let data = export_json(novel, wc_log);
    let text = serde_json::to_string_pretty(&data).map_err(JsonError::Parse)?;
    std::fs::write(path, text).map_err(|source| JsonError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("event=json_write status=ok path={}", path.display());
    Ok(())
}

/// Exports the whole project as one JSON tree.
pub fn export_json(novel: &Novel, wc_log: &WcLog) -> Value {
    let mut root = Map::new();
    root.insert(
        "version".to_string(),
        json!(format!("{MAJOR_VERSION}.{MINOR_VERSION}")),
    );
    root.insert("PROJECT".to_string(), Value::Object(novel_data(novel)));

    let mut chapters = Map::new();
    for &ch_id in novel.tree.get_children(ParentKey::Root(Category::Chapter)) {
        let Some(chapter) = novel.chapters.get(&ch_id) else {
            continue;
        };
        let mut data = chapter_data(chapter);
        let mut sections = Map::new();
        for &sc_id in novel.tree.get_children(ParentKey::Element(ch_id)) {
            if let Some(section) = novel.sections.get(&sc_id) {
                sections.insert(sc_id.to_string(), Value::Object(section_data(section)));
            }
        }
        if !sections.is_empty() {
            data.insert("SECTIONS".to_string(), Value::Object(sections));
        }
        chapters.insert(ch_id.to_string(), Value::Object(data));
    }
    if !chapters.is_empty() {
        root.insert("CHAPTERS".to_string(), Value::Object(chapters));
    }

    insert_collection(&mut root, "CHARACTERS", novel, Category::Character, |id| {
        novel.characters.get(id).map(character_data)
    });
    insert_collection(&mut root, "LOCATIONS", novel, Category::Location, |id| {
        novel.locations.get(id).map(world_data)
    });
    insert_collection(&mut root, "ITEMS", novel, Category::Item, |id| {
        novel.items.get(id).map(world_data)
    });

    let mut plot_lines = Map::new();
    for &ac_id in novel.tree.get_children(ParentKey::Root(Category::PlotLine)) {
        let Some(plot_line) = novel.plot_lines.get(&ac_id) else {
            continue;
        };
        let mut data = plot_line_data(plot_line);
        let mut points = Map::new();
        for &ap_id in novel.tree.get_children(ParentKey::Element(ac_id)) {
            if let Some(plot_point) = novel.plot_points.get(&ap_id) {
                points.insert(ap_id.to_string(), Value::Object(plot_point_data(plot_point)));
            }
        }
        if !points.is_empty() {
            data.insert("POINTS".to_string(), Value::Object(points));
        }
        plot_lines.insert(ac_id.to_string(), Value::Object(data));
    }
    if !plot_lines.is_empty() {
        root.insert("ARCS".to_string(), Value::Object(plot_lines));
    }

    insert_collection(&mut root, "PROJECTNOTES", novel, Category::ProjectNote, |id| {
        novel.project_notes.get(id).map(project_note_data)
    });

    if novel.save_word_count() {
        let mut progress = Map::new();
        for (date, wc) in wc_log.compacted() {
            progress.insert(date.to_string(), json!([wc.count, wc.with_unused]));
        }
        if !progress.is_empty() {
            root.insert("PROGRESS".to_string(), Value::Object(progress));
        }
    }

    json!({ "mdnov": Value::Object(root) })
}

/// Imports one JSON tree into `novel` and `wc_log`, then reconciles
/// cross-references.
pub fn import_json(data: &Value, novel: &mut Novel, wc_log: &mut WcLog) -> Result<(), JsonError> {
    let root = check_version(data)?;

    if let Some(project) = root.get("PROJECT").and_then(Value::as_object) {
        read_novel(novel, project);
    }
    if let Some(locations) = root.get("LOCATIONS").and_then(Value::as_object) {
        for (key, value) in locations {
            let id = checked_id(key, Category::Location)?;
            let Some(data) = value.as_object() else {
                continue;
            };
            let mut location = novel.make_world_element();
            read_world(&mut location, data);
            novel.locations.insert(id, location);
            novel.tree.append(ParentKey::Root(Category::Location), id);
        }
    }
    if let Some(items) = root.get("ITEMS").and_then(Value::as_object) {
        for (key, value) in items {
            let id = checked_id(key, Category::Item)?;
            let Some(data) = value.as_object() else {
                continue;
            };
            let mut item = novel.make_world_element();
            read_world(&mut item, data);
            novel.items.insert(id, item);
            novel.tree.append(ParentKey::Root(Category::Item), id);
        }
    }
    if let Some(characters) = root.get("CHARACTERS").and_then(Value::as_object) {
        for (key, value) in characters {
            let id = checked_id(key, Category::Character)?;
            let Some(data) = value.as_object() else {
                continue;
            };
            let mut character = novel.make_character();
            read_character(&mut character, data);
            novel.characters.insert(id, character);
            novel.tree.append(ParentKey::Root(Category::Character), id);
        }
    }
    if let Some(chapters) = root.get("CHAPTERS").and_then(Value::as_object) {
        for (key, value) in chapters {
            let ch_id = checked_id(key, Category::Chapter)?;
            let Some(data) = value.as_object() else {
                continue;
            };
            let mut chapter = novel.make_chapter();
            read_chapter(&mut chapter, data);
            novel.chapters.insert(ch_id, chapter);
            novel.tree.append(ParentKey::Root(Category::Chapter), ch_id);
            if let Some(sections) = data.get("SECTIONS").and_then(Value::as_object) {
                for (key, value) in sections {
                    let sc_id = checked_id(key, Category::Section)?;
                    let Some(data) = value.as_object() else {
                        continue;
                    };
                    let mut section = novel.make_section();
                    read_section(&mut section, data);
                    novel.sections.insert(sc_id, section);
                    novel.tree.append(ParentKey::Element(ch_id), sc_id);
                }
            }
        }
    }
    if let Some(plot_lines) = root.get("ARCS").and_then(Value::as_object) {
        for (key, value) in plot_lines {
            let ac_id = checked_id(key, Category::PlotLine)?;
            let Some(data) = value.as_object() else {
                continue;
            };
            let mut plot_line = novel.make_plot_line();
            read_plot_line(&mut plot_line, data);
            novel.plot_lines.insert(ac_id, plot_line);
            novel.tree.append(ParentKey::Root(Category::PlotLine), ac_id);
            if let Some(points) = data.get("POINTS").and_then(Value::as_object) {
                for (key, value) in points {
                    let ap_id = checked_id(key, Category::PlotPoint)?;
                    let Some(data) = value.as_object() else {
                        continue;
                    };
                    let mut plot_point = novel.make_plot_point();
                    read_plot_point(&mut plot_point, data);
                    novel.plot_points.insert(ap_id, plot_point);
                    novel.tree.append(ParentKey::Element(ac_id), ap_id);
                }
            }
        }
    }
    if let Some(notes) = root.get("PROJECTNOTES").and_then(Value::as_object) {
        for (key, value) in notes {
            let id = checked_id(key, Category::ProjectNote)?;
            let Some(data) = value.as_object() else {
                continue;
            };
            let mut note = novel.make_project_note();
            read_basic(note.core_mut(), data);
            novel.project_notes.insert(id, note);
            novel.tree.append(ParentKey::Root(Category::ProjectNote), id);
        }
    }
    if let Some(progress) = root.get("PROGRESS").and_then(Value::as_object) {
        for (key, value) in progress {
            let date = verified_date(Some(key));
            let entry: Option<ProgressEntry> = serde_json::from_value(value.clone()).ok();
            if let (Some(date), Some(ProgressEntry(count, with_unused))) = (date, entry) {
                wc_log.insert(date, WordCount { count, with_unused });
            }
        }
    }

    reconcile_references(novel);
    Ok(())
}

fn check_version(data: &Value) -> Result<&Map<String, Value>, JsonError> {
    let root = data
        .get("mdnov")
        .and_then(Value::as_object)
        .ok_or_else(|| JsonError::Version("no `mdnov` root element".to_string()))?;
    let version = root
        .get("version")
        .and_then(Value::as_str)
        .ok_or_else(|| JsonError::Version("no document version".to_string()))?;
    let parsed = version
        .split_once('.')
        .and_then(|(major, minor)| Some((major.parse::<u32>().ok()?, minor.parse::<u32>().ok()?)));
    let Some((major, minor)) = parsed else {
        return Err(JsonError::Version(format!(
            "unreadable document version `{version}`"
        )));
    };
    if major != MAJOR_VERSION || minor > MINOR_VERSION {
        return Err(JsonError::Version(format!(
            "unsupported document version {major}.{minor}, this build reads \
             {MAJOR_VERSION}.{MINOR_VERSION}"
        )));
    }
    Ok(root)
}

fn checked_id(key: &str, expected: Category) -> Result<ElementId, JsonError> {
    let id: ElementId = key
        .parse()
        .map_err(|err| JsonError::BadId(format!("{err}")))?;
    if id.category() != expected {
        return Err(JsonError::BadId(format!(
            "expected a {expected} ID, got `{id}`"
        )));
    }
    Ok(id)
}

fn insert_collection(
    root: &mut Map<String, Value>,
    key: &str,
    novel: &Novel,
    category: Category,
    data_for: impl Fn(&ElementId) -> Option<Map<String, Value>>,
) {
    let mut collection = Map::new();
    for id in novel.tree.get_children(ParentKey::Root(category)) {
        if let Some(data) = data_for(id) {
            collection.insert(id.to_string(), Value::Object(data));
        }
    }
    if !collection.is_empty() {
        root.insert(key.to_string(), Value::Object(collection));
    }
}

fn insert_string(data: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        if !value.is_empty() {
            data.insert(key.to_string(), json!(value));
        }
    }
}

fn insert_flag(data: &mut Map<String, Value>, key: &str, value: bool) {
    if value {
        data.insert(key.to_string(), json!(true));
    }
}

fn insert_id_list(data: &mut Map<String, Value>, key: &str, ids: &[ElementId]) {
    if !ids.is_empty() {
        let ids: Vec<String> = ids.iter().map(ElementId::to_string).collect();
        data.insert(key.to_string(), json!(ids));
    }
}

fn get_string(data: &Map<String, Value>, key: &str) -> Option<String> {
    data.get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn get_str<'a>(data: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    data.get(key).and_then(Value::as_str)
}

fn get_flag(data: &Map<String, Value>, key: &str) -> bool {
    data.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn get_number(data: &Map<String, Value>, key: &str) -> Option<u32> {
    data.get(key)
        .and_then(Value::as_u64)
        .and_then(|value| u32::try_from(value).ok())
}

fn get_id_list(data: &Map<String, Value>, key: &str) -> Vec<ElementId> {
    data.get(key)
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .filter_map(|token| token.parse().ok())
                .collect()
        })
        .unwrap_or_default()
}

fn basic_data(core: &ElementCore) -> Map<String, Value> {
    let mut data = Map::new();
    insert_string(&mut data, "Title", core.title());
    insert_string(&mut data, "Desc", core.desc());
    if !core.links().is_empty() {
        let mut links = Map::new();
        for Link { path, full_path } in core.links() {
            links.insert(
                path.clone(),
                full_path.as_ref().map_or(Value::Null, |full| json!(full)),
            );
        }
        data.insert("Links".to_string(), Value::Object(links));
    }
    data
}

fn read_basic(core: &mut ElementCore, data: &Map<String, Value>) {
    core.set_title(get_string(data, "Title"));
    core.set_desc(get_string(data, "Desc"));
    if let Some(links) = data.get("Links").and_then(Value::as_object) {
        let links = links
            .iter()
            .map(|(path, full)| Link {
                path: path.clone(),
                full_path: full.as_str().map(str::to_string),
            })
            .collect();
        core.set_links(links);
    }
}

fn project_note_data(note: &ProjectNote) -> Map<String, Value> {
    basic_data(note.core())
}

fn chapter_data(chapter: &Chapter) -> Map<String, Value> {
    let mut data = basic_data(chapter.core());
    insert_string(&mut data, "Notes", chapter.notes());
    if chapter.ch_type() != ChapterType::Normal {
        data.insert("type".to_string(), json!(chapter.ch_type().as_number()));
    }
    if chapter.level() == ChapterLevel::Part {
        data.insert("level".to_string(), json!(1));
    }
    insert_flag(&mut data, "isTrash", chapter.is_trash());
    insert_flag(&mut data, "noNumber", chapter.no_number());
    data
}

fn read_chapter(chapter: &mut Chapter, data: &Map<String, Value>) {
    read_basic(chapter.core_mut(), data);
    chapter.set_notes(get_string(data, "Notes"));
    chapter.set_ch_type(match get_number(data, "type") {
        None | Some(0) => ChapterType::Normal,
        _ => ChapterType::Unused,
    });
    chapter.set_level(if get_number(data, "level") == Some(1) {
        ChapterLevel::Part
    } else {
        ChapterLevel::Chapter
    });
    chapter.set_is_trash(get_flag(data, "isTrash"));
    chapter.set_no_number(get_flag(data, "noNumber"));
}

fn section_data(section: &Section) -> Map<String, Value> {
    let mut data = basic_data(section.core());
    insert_string(&mut data, "Notes", section.notes());
    if !section.tags().is_empty() {
        data.insert("Tags".to_string(), json!(section.tags()));
    }
    if section.sc_type() != SectionType::Normal {
        data.insert("type".to_string(), json!(section.sc_type().as_number()));
    }
    if section.status().as_number() > 1 {
        data.insert("status".to_string(), json!(section.status().as_number()));
    }
    if section.scene() != SceneKind::NotAScene {
        data.insert("scene".to_string(), json!(section.scene().as_number()));
    }
    insert_flag(&mut data, "append", section.append_to_prev());
    insert_string(&mut data, "Content", section.content());
    insert_string(&mut data, "Goal", section.goal());
    insert_string(&mut data, "Conflict", section.conflict());
    insert_string(&mut data, "Outcome", section.outcome());
    if let Some(date) = section.date() {
        data.insert("Date".to_string(), json!(date.to_string()));
    } else if let Some(day) = section.day() {
        data.insert("Day".to_string(), json!(day));
    }
    if let Some(time) = section.time() {
        data.insert("Time".to_string(), json!(time.format("%H:%M:%S").to_string()));
    }
    for (key, value) in [
        ("LastsDays", section.lasts_days()),
        ("LastsHours", section.lasts_hours()),
        ("LastsMinutes", section.lasts_minutes()),
    ] {
        if let Some(value) = value {
            if value != "0" {
                data.insert(key.to_string(), json!(value));
            }
        }
    }
    insert_id_list(&mut data, "Characters", section.characters());
    insert_id_list(&mut data, "Locations", section.locations());
    insert_id_list(&mut data, "Items", section.items());
    if !section.plotline_notes().is_empty() {
        let mut notes = Map::new();
        for (plot_line, note) in section.plotline_notes() {
            if !note.is_empty() {
                notes.insert(plot_line.to_string(), json!(note));
            }
        }
        if !notes.is_empty() {
            data.insert("PlotNotes".to_string(), Value::Object(notes));
        }
    }
    data
}

fn read_section(section: &mut Section, data: &Map<String, Value>) {
    read_basic(section.core_mut(), data);
    section.set_notes(get_string(data, "Notes"));
    if let Some(tags) = data.get("Tags").and_then(Value::as_array) {
        section.set_tags(
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        );
    }
    section.set_sc_type(match get_number(data, "type") {
        None | Some(0) => SectionType::Normal,
        Some(2) => SectionType::Stage1,
        Some(3) => SectionType::Stage2,
        Some(_) => SectionType::Unused,
    });
    section.set_status(
        get_number(data, "status")
            .and_then(|value| u8::try_from(value).ok())
            .and_then(Status::from_number)
            .unwrap_or(Status::Outline),
    );
    section.set_scene(match get_number(data, "scene") {
        Some(1) => SceneKind::Action,
        Some(2) => SceneKind::Reaction,
        Some(3) => SceneKind::Other,
        _ => SceneKind::NotAScene,
    });
    section.set_append_to_prev(get_flag(data, "append"));
    section.set_content(get_string(data, "Content"));
    section.set_goal(get_string(data, "Goal"));
    section.set_conflict(get_string(data, "Conflict"));
    section.set_outcome(get_string(data, "Outcome"));
    section.set_date(verified_date(get_str(data, "Date")));
    if section.date().is_none() {
        section.set_day(verified_int_string(get_str(data, "Day")));
    }
    section.set_time(verified_time(get_str(data, "Time")));
    section.set_lasts_days(verified_int_string(get_str(data, "LastsDays")));
    section.set_lasts_hours(verified_int_string(get_str(data, "LastsHours")));
    section.set_lasts_minutes(verified_int_string(get_str(data, "LastsMinutes")));
    section.set_characters(get_id_list(data, "Characters"));
    section.set_locations(get_id_list(data, "Locations"));
    section.set_items(get_id_list(data, "Items"));
    if let Some(notes) = data.get("PlotNotes").and_then(Value::as_object) {
        for (key, value) in notes {
            let id: Option<ElementId> = key.parse().ok();
            if let (Some(id), Some(note)) = (id, value.as_str()) {
                if id.category() == Category::PlotLine {
                    section.set_plotline_note(id, note.to_string());
                }
            }
        }
    }
}

fn world_data(world: &WorldElement) -> Map<String, Value> {
    let mut data = basic_data(world.core());
    insert_string(&mut data, "Notes", world.notes());
    if !world.tags().is_empty() {
        data.insert("Tags".to_string(), json!(world.tags()));
    }
    insert_string(&mut data, "Aka", world.aka());
    data
}

fn read_world(world: &mut WorldElement, data: &Map<String, Value>) {
    read_basic(world.core_mut(), data);
    world.set_notes(get_string(data, "Notes"));
    if let Some(tags) = data.get("Tags").and_then(Value::as_array) {
        world.set_tags(
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        );
    }
    world.set_aka(get_string(data, "Aka"));
}

fn character_data(character: &Character) -> Map<String, Value> {
    let mut data = world_data(character.world());
    insert_flag(&mut data, "major", character.is_major());
    insert_string(&mut data, "FullName", character.full_name());
    if let Some(date) = character.birth_date() {
        data.insert("BirthDate".to_string(), json!(date.to_string()));
    }
    if let Some(date) = character.death_date() {
        data.insert("DeathDate".to_string(), json!(date.to_string()));
    }
    insert_string(&mut data, "Bio", character.bio());
    insert_string(&mut data, "Goals", character.goals());
    data
}

fn read_character(character: &mut Character, data: &Map<String, Value>) {
    read_world(character.world_mut(), data);
    character.set_is_major(get_flag(data, "major"));
    character.set_full_name(get_string(data, "FullName"));
    character.set_birth_date(verified_date(get_str(data, "BirthDate")));
    character.set_death_date(verified_date(get_str(data, "DeathDate")));
    character.set_bio(get_string(data, "Bio"));
    character.set_goals(get_string(data, "Goals"));
}

fn plot_line_data(plot_line: &PlotLine) -> Map<String, Value> {
    let mut data = basic_data(plot_line.core());
    insert_string(&mut data, "Notes", plot_line.notes());
    insert_string(&mut data, "ShortName", plot_line.short_name());
    insert_id_list(&mut data, "Sections", plot_line.sections());
    data
}

fn read_plot_line(plot_line: &mut PlotLine, data: &Map<String, Value>) {
    read_basic(plot_line.core_mut(), data);
    plot_line.set_notes(get_string(data, "Notes"));
    plot_line.set_short_name(get_string(data, "ShortName"));
    plot_line.set_sections(get_id_list(data, "Sections"));
}

fn plot_point_data(plot_point: &PlotPoint) -> Map<String, Value> {
    let mut data = basic_data(plot_point.core());
    insert_string(&mut data, "Notes", plot_point.notes());
    if let Some(section) = plot_point.section() {
        data.insert("Section".to_string(), json!(section.to_string()));
    }
    data
}

fn read_plot_point(plot_point: &mut PlotPoint, data: &Map<String, Value>) {
    read_basic(plot_point.core_mut(), data);
    plot_point.set_notes(get_string(data, "Notes"));
    plot_point.set_section(get_str(data, "Section").and_then(|token| token.parse().ok()));
}

fn novel_data(novel: &Novel) -> Map<String, Value> {
    let mut data = basic_data(novel.core());
    insert_string(&mut data, "Language", novel.language_code());
    insert_string(&mut data, "Country", novel.country_code());
    insert_flag(&mut data, "renumberChapters", novel.renumber_chapters());
    insert_flag(&mut data, "renumberParts", novel.renumber_parts());
    insert_flag(&mut data, "renumberWithinParts", novel.renumber_within_parts());
    insert_flag(&mut data, "romanChapterNumbers", novel.roman_chapter_numbers());
    insert_flag(&mut data, "romanPartNumbers", novel.roman_part_numbers());
    insert_flag(&mut data, "saveWordCount", novel.save_word_count());
    if let Some(phase) = novel.work_phase() {
        data.insert("workPhase".to_string(), json!(phase.as_number()));
    }
    insert_string(&mut data, "Author", novel.author_name());
    insert_string(&mut data, "ChapterHeadingPrefix", novel.chapter_heading_prefix());
    insert_string(&mut data, "ChapterHeadingSuffix", novel.chapter_heading_suffix());
    insert_string(&mut data, "PartHeadingPrefix", novel.part_heading_prefix());
    insert_string(&mut data, "PartHeadingSuffix", novel.part_heading_suffix());
    insert_string(&mut data, "CustomPlotProgress", novel.custom_plot_progress());
    insert_string(
        &mut data,
        "CustomCharacterization",
        novel.custom_characterization(),
    );
    insert_string(&mut data, "CustomWorldBuilding", novel.custom_world_building());
    insert_string(&mut data, "CustomGoal", novel.custom_goal());
    insert_string(&mut data, "CustomConflict", novel.custom_conflict());
    insert_string(&mut data, "CustomOutcome", novel.custom_outcome());
    insert_string(&mut data, "CustomChrBio", novel.custom_chr_bio());
    insert_string(&mut data, "CustomChrGoals", novel.custom_chr_goals());
    if let Some(count) = novel.word_count_start().filter(|count| *count > 0) {
        data.insert("WordCountStart".to_string(), json!(count));
    }
    if let Some(target) = novel.word_target().filter(|target| *target > 0) {
        data.insert("WordTarget".to_string(), json!(target));
    }
    if let Some(date) = novel.reference_date() {
        data.insert("ReferenceDate".to_string(), json!(date.to_string()));
    }
    data
}

fn read_novel(novel: &mut Novel, data: &Map<String, Value>) {
    read_basic(novel.core_mut(), data);
    novel.set_language_code(get_string(data, "Language"));
    novel.set_country_code(get_string(data, "Country"));
    novel.set_renumber_chapters(get_flag(data, "renumberChapters"));
    novel.set_renumber_parts(get_flag(data, "renumberParts"));
    novel.set_renumber_within_parts(get_flag(data, "renumberWithinParts"));
    novel.set_roman_chapter_numbers(get_flag(data, "romanChapterNumbers"));
    novel.set_roman_part_numbers(get_flag(data, "romanPartNumbers"));
    novel.set_save_word_count(get_flag(data, "saveWordCount"));
    novel.set_work_phase(
        get_number(data, "workPhase")
            .and_then(|value| u8::try_from(value).ok())
            .and_then(Status::from_number),
    );
    novel.set_author_name(get_string(data, "Author"));
    novel.set_chapter_heading_prefix(get_string(data, "ChapterHeadingPrefix"));
    novel.set_chapter_heading_suffix(get_string(data, "ChapterHeadingSuffix"));
    novel.set_part_heading_prefix(get_string(data, "PartHeadingPrefix"));
    novel.set_part_heading_suffix(get_string(data, "PartHeadingSuffix"));
    novel.set_custom_plot_progress(get_string(data, "CustomPlotProgress"));
    novel.set_custom_characterization(get_string(data, "CustomCharacterization"));
    novel.set_custom_world_building(get_string(data, "CustomWorldBuilding"));
    novel.set_custom_goal(get_string(data, "CustomGoal"));
    novel.set_custom_conflict(get_string(data, "CustomConflict"));
    novel.set_custom_outcome(get_string(data, "CustomOutcome"));
    novel.set_custom_chr_bio(get_string(data, "CustomChrBio"));
    novel.set_custom_chr_goals(get_string(data, "CustomChrGoals"));
    novel.set_word_count_start(get_number(data, "WordCountStart"));
    novel.set_word_target(get_number(data, "WordTarget"));
    novel.set_reference_date(verified_date(get_str(data, "ReferenceDate")));
}
