use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use toptions::{Definition, opt};

pub const DEFAULT_DEFINITION_NAME: &str = "toptions.json";

/// Read a JSON definition (option name -> `{ "type": ..., ... }`).
pub fn load_definition(path: &Path) -> Result<Definition> {
    if !path.exists() {
        bail!("definition not found: {}", path.display());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read definition: {}", path.display()))?;
    let definition: Definition = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse definition JSON: {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        options = definition.len(),
        "loaded definition"
    );
    Ok(definition)
}

/// A small definition using every option kind, as a starting point.
pub fn starter_definition() -> Definition {
    Definition::new()
        .option("input", opt::arg_or(0, "-"))
        .option("output", opt::flag('o'))
        .option("force", opt::bit('f'))
        .option("verbose", opt::level('v'))
        .option("include", opt::list('I'))
        .option("files", opt::args())
        .option("passthrough", opt::raw())
}

pub fn write_default_definition(project_dir: &Path, overwrite: bool) -> Result<PathBuf> {
    let dest = project_dir.join(DEFAULT_DEFINITION_NAME);
    if dest.exists() && !overwrite {
        bail!("{} already exists", dest.display());
    }

    let bytes = serde_json::to_vec_pretty(&starter_definition())
        .context("failed to serialize definition")?;
    let mut out = String::from_utf8(bytes).context("definition is not valid UTF-8")?;
    out.push('\n');

    let tmp = dest.with_extension("tmp");
    fs::write(&tmp, out.as_bytes())
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    if overwrite && dest.exists() {
        fs::remove_file(&dest).with_context(|| format!("failed to remove {}", dest.display()))?;
    }
    fs::rename(&tmp, &dest)
        .with_context(|| format!("failed to move {} into place", dest.display()))?;
    Ok(dest)
}
