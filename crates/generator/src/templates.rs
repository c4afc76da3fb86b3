//! Template loading

use protodoc_common::{DocError, Result};
use tera::Tera;

/// Load the embedded templates
pub(crate) fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.add_raw_template("markdown.md", include_str!("../templates/markdown.md.tera"))
        .map_err(|e| DocError::Render(format!("Failed to load markdown template: {}", e)))?;

    Ok(tera)
}
