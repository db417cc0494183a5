use std::fs;
use std::path::Path;

use tera::{Context, Tera};

use crate::model::ProposalContext;

// Embed template at compile time to ensure availability
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/proposal.html");
pub const TEMPLATE_NAME: &str = "proposal.html";

/// Template problems are deployment defects, not data errors.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
    #[error("template directory error: {0}")]
    Io(#[from] std::io::Error),
}

/// Creates the template directory and materializes the embedded default
/// template on first run. Existing files are left alone.
pub fn ensure_default_template(template_dir: &Path) -> Result<(), RenderError> {
    if !template_dir.exists() {
        fs::create_dir_all(template_dir)?;
    }
    let template_path = template_dir.join(TEMPLATE_NAME);
    if !template_path.exists() {
        println!("✨ Initializing default template...");
        fs::write(&template_path, DEFAULT_TEMPLATE)?;
    }
    Ok(())
}

/// Renders the proposal context through the named template into a complete
/// HTML document. The engine is rebuilt per call, so concurrent sessions
/// never share mutable template state, and identical inputs always produce
/// identical output.
pub fn render(
    context: &ProposalContext,
    template_dir: &Path,
    template_name: &str,
) -> Result<String, RenderError> {
    let glob = format!("{}/*.html", template_dir.display());
    let mut tera = Tera::new(&glob)?;
    // Free-text proposal fields must never inject markup.
    tera.autoescape_on(vec![".html"]);

    let ctx = Context::from_serialize(context)?;
    Ok(tera.render(template_name, &ctx)?)
}
