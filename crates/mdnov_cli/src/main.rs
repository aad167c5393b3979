//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to inspect an mdnov project file.
//! - Keep output deterministic for quick local sanity checks.

use std::process::ExitCode;

use mdnov_core::ProjectFile;

fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        println!("mdnov_core version={}", mdnov_core::core_version());
        println!("usage: mdnov_cli <project.mdnov>");
        return ExitCode::SUCCESS;
    };
    let mut project = ProjectFile::new(&path);
    if let Err(err) = project.read() {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }
    let title = project.novel.core().title().unwrap_or("(untitled)");
    let words = project.count_words();
    println!("title={title}");
    println!(
        "chapters={} sections={} characters={} locations={} items={} plot_lines={}",
        project.novel.chapters.len(),
        project.novel.sections.len(),
        project.novel.characters.len(),
        project.novel.locations.len(),
        project.novel.items.len(),
        project.novel.plot_lines.len()
    );
    println!("words={} words_with_unused={}", words.count, words.with_unused);
    ExitCode::SUCCESS
}
