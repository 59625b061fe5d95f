use anyhow::Result;
use lembrademim_lib::types::{Biography, Folder, FolderEntry, User};
use lembrademim_lib::ConnectivityReport;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

const NOTES_PREVIEW_CHARS: usize = 40;

#[derive(Tabled, Serialize)]
struct BiographyRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Phone")]
    #[serde(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Birthday")]
    #[serde(rename = "Birthday")]
    birthday: String,
    #[tabled(rename = "Tags")]
    #[serde(rename = "Tags")]
    tags: String,
    #[tabled(rename = "Notes")]
    #[serde(rename = "Notes")]
    notes: String,
}

#[derive(Tabled, Serialize)]
struct FolderRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Biographies")]
    #[serde(rename = "Biographies")]
    biographies: String,
    #[tabled(rename = "Created")]
    #[serde(rename = "Created")]
    created: String,
}

#[derive(Tabled, Serialize)]
struct EntryRow {
    #[tabled(rename = "Biography ID")]
    #[serde(rename = "Biography ID")]
    biography_id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Phone")]
    #[serde(rename = "Phone")]
    phone: String,
}

#[derive(Tabled, Serialize)]
struct UserRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    #[serde(rename = "Email")]
    email: String,
}

#[derive(Tabled, Serialize)]
struct ProbeRow {
    #[tabled(rename = "Endpoint")]
    #[serde(rename = "Endpoint")]
    endpoint: String,
    #[tabled(rename = "Result")]
    #[serde(rename = "Result")]
    result: String,
}

// -- Row builders --

fn build_biography_rows(biographies: &[Biography]) -> Vec<BiographyRow> {
    biographies
        .iter()
        .map(|b| BiographyRow {
            id: b.id.to_string(),
            name: b.name.clone(),
            phone: b.cellphone_number.clone(),
            birthday: format_birthday(b),
            tags: b.tags.join(", "),
            notes: preview(&b.notes, NOTES_PREVIEW_CHARS),
        })
        .collect()
}

fn build_folder_rows(folders: &[Folder]) -> Vec<FolderRow> {
    folders
        .iter()
        .map(|f| FolderRow {
            id: f.id.to_string(),
            name: f.name.clone(),
            biographies: f
                .biography_count
                .map(|n| n.to_string())
                .unwrap_or_default(),
            created: f
                .created_at
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        })
        .collect()
}

fn build_entry_rows(entries: &[FolderEntry]) -> Vec<EntryRow> {
    entries
        .iter()
        .map(|e| EntryRow {
            biography_id: e.biography_ref().map(|id| id.to_string()).unwrap_or_default(),
            name: e
                .biography
                .as_ref()
                .map(|b| b.name.clone())
                .unwrap_or_default(),
            phone: e
                .biography
                .as_ref()
                .map(|b| b.cellphone_number.clone())
                .unwrap_or_default(),
        })
        .collect()
}

fn build_user_rows(user: &User) -> Vec<UserRow> {
    vec![UserRow {
        id: user.id.to_string(),
        name: user.name.clone(),
        email: user.email.clone(),
    }]
}

fn build_probe_rows(report: &ConnectivityReport) -> Vec<ProbeRow> {
    let mut rows: Vec<ProbeRow> = report
        .failures
        .iter()
        .map(|line| match line.split_once(": ") {
            Some((endpoint, reason)) => ProbeRow {
                endpoint: endpoint.to_string(),
                result: reason.to_string(),
            },
            None => ProbeRow {
                endpoint: line.clone(),
                result: String::new(),
            },
        })
        .collect();
    if let Some(ref working) = report.working {
        rows.push(ProbeRow {
            endpoint: working.clone(),
            result: "OK".to_string(),
        });
    }
    rows
}

// -- Rendering --

fn print_rows<R: Tabled + Serialize>(rows: Vec<R>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&rows),
    }
    Ok(())
}

pub fn print_biographies(biographies: &[Biography], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&biographies);
            Ok(())
        }
        _ => print_rows(build_biography_rows(biographies), format),
    }
}

pub fn print_folders(folders: &[Folder], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&folders);
            Ok(())
        }
        _ => print_rows(build_folder_rows(folders), format),
    }
}

pub fn print_entries(entries: &[FolderEntry], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&entries);
            Ok(())
        }
        _ => print_rows(build_entry_rows(entries), format),
    }
}

pub fn print_user(user: &User, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(user);
            Ok(())
        }
        _ => print_rows(build_user_rows(user), format),
    }
}

pub fn print_report(report: &ConnectivityReport, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(report);
            Ok(())
        }
        _ => print_rows(build_probe_rows(report), format),
    }
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// Birthdays are shown day-first, the way the app displays them.
fn format_birthday(biography: &Biography) -> String {
    match biography.birth_day() {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => biography.birth_date.clone(),
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() <= max_chars {
        return single_line;
    }
    let cut: String = single_line.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
