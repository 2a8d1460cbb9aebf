use std::path::Path;
use std::process::ExitCode;
use owo_colors::OwoColorize;
use rollbook::config::{self, Backend, RollbookConfig, Settings};
use rollbook::query::parse_marks;
use rollbook::storage::{open_blob_store, RecordStore};
use rollbook::ui::{self, Icons, header, section, stats_table, student_table, success, theme};
use rollbook::{Outcome, Roster, StudentPatch, StudentRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(&self) -> bool {
        matches!(self, OutputMode::Human)
    }
}

fn emit(command: &str, success: bool, data: serde_json::Value) -> anyhow::Result<()> {
    let envelope = serde_json::json!({
        "command": command,
        "success": success,
        "data": data,
    });
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn exit_code(success: bool) -> ExitCode {
    if success { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn report(output_mode: OutputMode, command: &str, outcome: Outcome) -> anyhow::Result<ExitCode> {
    if output_mode.is_human() {
        if outcome.success {
            success(&outcome.message);
        } else {
            ui::error(&outcome.message);
        }
    } else {
        emit(command, outcome.success, serde_json::to_value(&outcome)?)?;
    }
    Ok(exit_code(outcome.success))
}

fn warn_on_marks(output_mode: OutputMode, marks: &str) {
    if !output_mode.is_human() || marks.is_empty() {
        return;
    }
    let value = parse_marks(marks);
    if !(0..=100).contains(&value) || value.to_string() != marks {
        ui::warn(&format!("Marks '{}' are not a whole number between 0 and 100", marks));
    }
}

pub async fn run_add(
    output_mode: OutputMode,
    roster: &dyn Roster,
    student: StudentRecord,
) -> anyhow::Result<ExitCode> {
    warn_on_marks(output_mode, &student.marks);
    let outcome = roster.add(student).await;
    report(output_mode, "add", outcome)
}

pub async fn run_update(
    output_mode: OutputMode,
    roster: &dyn Roster,
    roll: &str,
    patch: StudentPatch,
) -> anyhow::Result<ExitCode> {
    if patch.is_empty() {
        anyhow::bail!("nothing to update (pass --name, --age, --branch or --marks)");
    }
    if let Some(marks) = &patch.marks {
        warn_on_marks(output_mode, marks);
    }
    let outcome = roster.update(roll, patch).await;
    report(output_mode, "update", outcome)
}

pub async fn run_remove(
    output_mode: OutputMode,
    roster: &dyn Roster,
    roll: &str,
) -> anyhow::Result<ExitCode> {
    let outcome = roster.remove(roll).await;
    report(output_mode, "remove", outcome)
}

pub async fn run_find(
    output_mode: OutputMode,
    roster: &dyn Roster,
    roll: &str,
) -> anyhow::Result<ExitCode> {
    let found = roster.find(roll).await;
    let found_any = found.is_some();

    if output_mode.is_human() {
        match found {
            Some(student) => {
                println!("{} Found: {}", Icons::PERSON, student.roll.bold());
                println!("{}", student_table(std::slice::from_ref(&student)));
            }
            None => ui::error("Student not found!"),
        }
    } else {
        emit("find", found_any, serde_json::to_value(&found)?)?;
    }
    Ok(exit_code(found_any))
}

pub async fn run_list(output_mode: OutputMode, roster: &dyn Roster) -> anyhow::Result<ExitCode> {
    let students = roster.load().await;
    print_students(output_mode, "list", &students)?;
    Ok(ExitCode::SUCCESS)
}

pub async fn run_search(
    output_mode: OutputMode,
    roster: &dyn Roster,
    query: &str,
) -> anyhow::Result<ExitCode> {
    let hits = roster.search(query).await;
    if output_mode.is_human() {
        println!("{} Searching for: '{}'...", Icons::SEARCH, query.trim());
    }
    print_students(output_mode, "search", &hits)?;
    Ok(ExitCode::SUCCESS)
}

fn print_students(output_mode: OutputMode, command: &str, students: &[StudentRecord]) -> anyhow::Result<()> {
    if !output_mode.is_human() {
        return emit(command, true, serde_json::to_value(students)?);
    }

    if students.is_empty() {
        println!("∅ No records found.");
    } else {
        header(&format!("{} students", students.len()));
        println!("{}", student_table(students));
    }
    Ok(())
}

pub async fn run_stats(output_mode: OutputMode, roster: &dyn Roster) -> anyhow::Result<ExitCode> {
    let stats = roster.stats().await;
    if output_mode.is_human() {
        println!("{} {}", Icons::STATS, "Roster Statistics".style(theme().header.clone()));
        println!("{}", stats_table(&stats));
    } else {
        emit("stats", true, serde_json::to_value(stats)?)?;
    }
    Ok(ExitCode::SUCCESS)
}

pub async fn run_serve(settings: &Settings) -> anyhow::Result<ExitCode> {
    if settings.backend == Backend::Remote {
        anyhow::bail!("serve needs a local backend (json or sqlite), not remote");
    }

    let blobs = open_blob_store(settings.backend, &settings.path)?;
    let store = RecordStore::new(blobs);

    println!("{} Server running at http://127.0.0.1:{}", Icons::GLOBE, settings.port);
    ui::info(
        &format!("{} {} store", Icons::DATABASE, settings.backend),
        &settings.path.display().to_string(),
    );
    rollbook::server::start_server(settings.port, store).await?;
    Ok(ExitCode::SUCCESS)
}

pub fn run_init(
    output_mode: OutputMode,
    path: &Path,
    settings: &Settings,
    force: bool,
) -> anyhow::Result<ExitCode> {
    let config = RollbookConfig {
        backend: Some(settings.backend),
        path: Some(settings.path.display().to_string()),
        api_url: Some(settings.api_url.clone()),
        timeout_secs: Some(settings.timeout.as_secs()),
        port: Some(settings.port),
    };
    config::write_config(path, &config, force)?;

    if output_mode.is_human() {
        section("Config");
        success(&format!("Wrote {}", path.display()));
        ui::summary_row("backend", settings.backend.as_str());
        ui::summary_row("path", &settings.path.display().to_string());
        ui::summary_row("api_url", &settings.api_url);
    } else {
        emit("init", true, serde_json::to_value(&config)?)?;
    }
    Ok(ExitCode::SUCCESS)
}
