use chrono::Local;
use inquire::{Confirm, DateSelect, Select, Text};

use crate::assets;
use crate::model::{
    AccentTheme, AssetRefs, ClientInfo, ProjectDetails, ProposalContext, SenderConfig,
    StyleOptions, format_valid_until, split_list_lines,
};

/// Runs the interactive wizard and assembles a fresh ProposalContext.
/// Nothing collected here outlives the returned value.
pub fn collect(sender: &SenderConfig) -> ProposalContext {
    println!("\n--- Proposal Style ---");
    let accent = match Select::new("Accent Style:", AccentTheme::ALL.to_vec()).prompt() {
        Ok(choice) => choice,
        Err(_) => std::process::exit(0),
    };
    let include_terms = Confirm::new("Include Terms & Acceptance?")
        .with_default(true)
        .prompt()
        .unwrap();
    let show_page_numbers = Confirm::new("Show Page Numbers?")
        .with_default(true)
        .prompt()
        .unwrap();

    println!("\n--- Client ---");
    let client_name = Text::new("Client name:")
        .with_default("Acme Corp")
        .prompt()
        .unwrap();
    let client_contact = Text::new("Client contact (email/phone):")
        .with_default("jane@acme.com | +1 (555) 555-0199")
        .prompt()
        .unwrap();
    println!("Client address, one line at a time. (Leave empty to finish)");
    let client_address = enter_lines("Address line:").join("\n");

    println!("\n--- Project Details ---");
    let title = Text::new("Project title:")
        .with_default("Website Redesign & Optimization")
        .prompt()
        .unwrap();
    let summary = Text::new("Executive summary:")
        .with_default(
            "We will redesign the client's marketing site with a clean aesthetic, \
             improve conversion UX, and automate proposal generation.",
        )
        .prompt()
        .unwrap();

    println!("\nScope items, one per line. (Leave empty to finish)");
    let scope_text = enter_lines("Scope item:").join("\n");
    println!("Deliverables, one per line. (Leave empty to finish)");
    let deliverables_text = enter_lines("Deliverable:").join("\n");

    let timeline = Text::new("Timeline:").with_default("4-6 weeks").prompt().unwrap();
    let price = Text::new("Price:").with_default("$6,500 fixed").prompt().unwrap();

    // Calendar widget; a malformed date is unrepresentable here.
    let valid_until = DateSelect::new("Quote valid until:")
        .with_default(Local::now().date_naive())
        .prompt()
        .unwrap();

    let payment_terms = Text::new("Payment terms:")
        .with_default("50% upfront, 25% mid-project, 25% on delivery.")
        .prompt()
        .unwrap();
    let notes = Text::new("Notes (optional):").prompt().unwrap();

    println!("\n--- Branding (optional) ---");
    let logo_data_uri = pick_image("logo");
    let signature_data_uri = pick_image("signature");

    ProposalContext {
        style: StyleOptions {
            accent,
            include_terms,
            show_page_numbers,
        },
        client: ClientInfo {
            name: client_name,
            contact: client_contact,
            address: client_address,
        },
        sender: sender.clone(),
        project: ProjectDetails {
            title,
            summary,
            scope: split_list_lines(&scope_text),
            deliverables: split_list_lines(&deliverables_text),
            timeline,
            price,
            valid_until: format_valid_until(valid_until),
            payment_terms,
            notes,
        },
        assets: AssetRefs {
            logo_data_uri,
            signature_data_uri,
        },
    }
}

fn enter_lines(prompt: &str) -> Vec<String> {
    let mut lines = Vec::new();
    loop {
        let line = Text::new(prompt).prompt().unwrap();
        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }
    lines
}

// Optional image attachment. Declined prompt, cancelled picker, or a file
// outside the accepted types all resolve to None.
fn pick_image(label: &str) -> Option<String> {
    let attach = Confirm::new(&format!("Attach a {}?", label))
        .with_default(false)
        .prompt()
        .unwrap();
    if !attach {
        return None;
    }

    let picked = rfd::FileDialog::new()
        .set_title(format!("Select {} image", label))
        .add_filter("Images", &assets::IMAGE_EXTENSIONS)
        .pick_file();

    match picked {
        Some(path) => match assets::image_file_to_data_uri(&path) {
            Ok(uri) => {
                println!("✅ Attached {}: {:?}", label, path.file_name().unwrap_or_default());
                Some(uri)
            }
            Err(e) => {
                println!("⚠️  Skipping {}: {}", label, e);
                None
            }
        },
        None => {
            println!("No file selected. Skipping {}.", label);
            None
        }
    }
}
