mod assets;
mod export;
mod form;
mod model;
mod render;

use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use comfy_table::{Attribute, Cell, Table};
use directories::{BaseDirs, ProjectDirs};
use inquire::{Select, Text};
use serde::{Deserialize, Serialize};
use slug::slugify;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::export::PdfConverter;
use crate::model::SenderConfig;

// ==========================================
// Constants & Embeds
// ==========================================

// Embed default sender config at compile time to ensure availability
const DEFAULT_SENDER_TEMPLATE: &str = include_str!("../sender.toml");

// ==========================================
// Structs & Enums
// ==========================================

#[derive(Debug, Serialize, Deserialize)]
struct AppSettings {
    data_root: String,
}

#[derive(Parser)]
#[command(name = "proposal-maker")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new proposal
    New,
    /// Configure data directory
    Config,
    /// List exported proposals
    List,
    /// Open output folder
    Open,
}

// ==========================================
// Main Function
// ==========================================

fn main() {
    let cli = Cli::parse();

    // 1. Initialize configuration
    let settings = load_settings().unwrap_or_else(|| setup_config_wizard());
    let expanded_path = expand_home_dir(&settings.data_root);
    let root = PathBuf::from(expanded_path);

    // Materialize the default template on first run
    if let Err(e) = render::ensure_default_template(&root.join("templates")) {
        eprintln!("❌ Error: Failed to initialize template directory: {}", e);
        return;
    }

    // Load sender configuration
    let sender_config = load_sender_config(&root);

    if cli.command.is_none() {
        use clap::CommandFactory;
        Cli::command().print_help().unwrap();
        return;
    }

    match cli.command.unwrap() {
        Commands::New => {
            run_new(&root, &sender_config);
        }
        Commands::Config => {
            setup_config_wizard();
        }
        Commands::List => {
            list_proposals(&root);
        }
        Commands::Open => {
            open_folder_wizard(&root);
        }
    }
}

// ==========================================
// 1. Proposal Pipeline
// ==========================================

// collect -> render -> export, strictly linear. HTML always lands on disk
// before the PDF attempt; a failed conversion only prints a warning.
fn run_new(root: &Path, sender: &SenderConfig) {
    let context = form::collect(sender);

    let template_dir = root.join("templates");
    let html = match render::render(&context, &template_dir, render::TEMPLATE_NAME) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("❌ Template Error: {}", e);
            return;
        }
    };

    let output_dir = root.join("output").join(slugify(&context.client.name));
    if let Err(e) = fs::create_dir_all(&output_dir) {
        eprintln!("❌ Error: Failed to create output directory: {}", e);
        return;
    }

    let html_path = output_dir.join(export::HTML_FILENAME);
    if let Err(e) = fs::write(&html_path, export::to_html_bytes(&html)) {
        eprintln!("❌ Error: Failed to write HTML: {}", e);
        return;
    }
    println!("✅ HTML saved: {:?}", html_path);

    println!("\n🔨 Converting to PDF...");
    let converter = PdfConverter::default();
    match converter.to_pdf_bytes(&html) {
        Ok(pdf_bytes) => {
            let pdf_path = output_dir.join(export::PDF_FILENAME);
            match fs::write(&pdf_path, pdf_bytes) {
                Ok(()) => println!("✅ PDF saved: {:?}", pdf_path),
                Err(e) => println!("⚠️  Failed to write PDF: {}", e),
            }
        }
        Err(e) => {
            println!("⚠️  PDF export failed: {}", e);
            println!("   The HTML file is still available. Open it in a browser and print to PDF.");
        }
    }

    open_and_reveal(&html_path);
}

// ==========================================
// 2. List Logic
// ==========================================

fn list_proposals(root: &Path) {
    let output_dir = root.join("output");
    if !output_dir.exists() {
        println!("❌ No output directory found. Nothing exported yet.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Client").add_attribute(Attribute::Bold),
        Cell::new("HTML"),
        Cell::new("PDF"),
        Cell::new("Last Export"),
    ]);

    let mut count = 0;
    if let Ok(entries) = fs::read_dir(&output_dir) {
        let mut dirs: Vec<PathBuf> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        dirs.sort();

        for dir in dirs {
            let html_path = dir.join(export::HTML_FILENAME);
            let pdf_path = dir.join(export::PDF_FILENAME);
            if !html_path.exists() && !pdf_path.exists() {
                continue;
            }

            let modified = [&html_path, &pdf_path]
                .iter()
                .filter_map(|p| fs::metadata(p).and_then(|m| m.modified()).ok())
                .max();
            let modified_str = modified
                .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default();

            table.add_row(vec![
                Cell::new(dir.file_name().unwrap_or_default().to_string_lossy()),
                Cell::new(if html_path.exists() { "yes" } else { "-" }),
                Cell::new(if pdf_path.exists() { "yes" } else { "-" }),
                Cell::new(modified_str),
            ]);
            count += 1;
        }
    }

    if count == 0 {
        println!("(None found)");
    } else {
        println!("\n--- Exported Proposals ---");
        println!("{table}");
    }
}

// ==========================================
// 3. Open Folder Logic
// ==========================================

fn open_folder_wizard(root: &Path) {
    let output_root = root.join("output");
    let root_opt = "📂 Open Root Output Directory".to_string();
    let mut options = vec![root_opt.clone()];

    if output_root.exists() {
        if let Ok(entries) = fs::read_dir(&output_root) {
            let mut clients: Vec<String> = entries
                .flatten()
                .filter(|e| e.path().is_dir())
                .map(|e| e.file_name().to_string_lossy().to_string())
                .collect();
            clients.sort();
            options.extend(clients);
        }
    }

    match Select::new("Select Folder to Open:", options).prompt() {
        Ok(choice) => {
            let target_path = if choice == root_opt {
                output_root
            } else {
                output_root.join(&choice)
            };
            println!("🚀 Opening: {:?}", target_path);

            #[cfg(target_os = "macos")]
            Command::new("open").arg(&target_path).spawn().ok();
            #[cfg(target_os = "windows")]
            Command::new("explorer").arg(&target_path).spawn().ok();
            #[cfg(target_os = "linux")]
            Command::new("xdg-open").arg(&target_path).spawn().ok();
        }
        Err(_) => println!("Operation cancelled."),
    }
}

// ==========================================
// 4. Config & Utilities
// ==========================================

fn get_config_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "proposal-maker", "app") {
        let config_dir = proj_dirs.config_dir();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).ok();
        }
        return config_dir.join("settings.toml");
    }
    PathBuf::from("settings.toml")
}

fn load_settings() -> Option<AppSettings> {
    let path = get_config_path();
    if !path.exists() {
        return None;
    }
    let content = fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

fn load_sender_config(root: &Path) -> SenderConfig {
    let path = root.join("sender.toml");
    if path.exists() {
        let content = fs::read_to_string(&path).expect("Failed to read sender.toml");
        toml::from_str(&content).expect("Failed to parse sender.toml")
    } else {
        println!("✨ Initializing default sender configuration...");
        let default_sender: SenderConfig =
            toml::from_str(DEFAULT_SENDER_TEMPLATE).expect("Failed to parse default sender.toml");
        fs::write(&path, DEFAULT_SENDER_TEMPLATE).expect("Failed to write sender.toml");
        default_sender
    }
}

fn setup_config_wizard() -> AppSettings {
    println!("\n⚙️  --- Configuration Setup ---");
    let current = load_settings();
    let default_val = current
        .map(|s| s.data_root)
        .unwrap_or_else(|| "~/Documents/Proposals".to_string());

    println!("📂 Opening folder picker...");
    let picked_path = rfd::FileDialog::new()
        .set_title("Select Root Data Directory")
        .pick_folder();

    let new_root = if let Some(path) = picked_path {
        path.to_string_lossy().to_string()
    } else {
        println!("❌ No folder selected. Falling back to manual input.");
        Text::new("Enter Root Data Directory:")
            .with_default(&default_val)
            .prompt()
            .unwrap()
    };

    let settings = AppSettings { data_root: new_root };

    let path = get_config_path();
    let toml_str = toml::to_string_pretty(&settings).unwrap();
    fs::write(&path, toml_str).expect("Failed to save settings");
    println!("✅ Settings saved.");
    settings
}

fn expand_home_dir(path: &str) -> String {
    if path.starts_with("~") {
        if let Some(base_dirs) = BaseDirs::new() {
            let home = base_dirs.home_dir().to_string_lossy();
            return path.replacen("~", &home, 1);
        }
    }
    path.to_string()
}

// Helper: Open file and reveal in Finder/Explorer
fn open_and_reveal(path: &Path) {
    #[cfg(target_os = "macos")]
    Command::new("open").arg("-R").arg(path).spawn().ok();

    #[cfg(target_os = "windows")]
    Command::new("explorer")
        .arg(format!("/select,{}", path.to_string_lossy()))
        .spawn()
        .ok();

    #[cfg(target_os = "linux")]
    Command::new("xdg-open").arg(path.parent().unwrap()).spawn().ok();

    #[cfg(target_os = "macos")]
    Command::new("open").arg(path).spawn().ok();

    #[cfg(target_os = "windows")]
    Command::new("explorer").arg(path).spawn().ok();

    #[cfg(target_os = "linux")]
    Command::new("xdg-open").arg(path).spawn().ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home_dir_replaces_leading_tilde() {
        let Some(base_dirs) = BaseDirs::new() else {
            return;
        };
        let home = base_dirs.home_dir().to_string_lossy().to_string();
        let expanded = expand_home_dir("~/Documents/Proposals");
        assert_eq!(expanded, format!("{}/Documents/Proposals", home));
    }

    #[test]
    fn test_expand_home_dir_leaves_absolute_paths_alone() {
        assert_eq!(expand_home_dir("/srv/proposals"), "/srv/proposals");
    }

    #[test]
    fn test_app_settings_toml_round_trip() {
        let settings = AppSettings {
            data_root: "~/Documents/Proposals".to_string(),
        };
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let parsed: AppSettings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.data_root, settings.data_root);
    }

    #[test]
    fn test_default_sender_template_parses() {
        let sender: SenderConfig = toml::from_str(DEFAULT_SENDER_TEMPLATE).unwrap();
        assert!(!sender.name.is_empty());
        assert!(sender.email.contains('@'));
    }
}
