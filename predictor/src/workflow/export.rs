use anyhow::Context;
use energycore::state::CsvExport;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the CSV export into `dir`, creating it when missing.
pub fn write_export(dir: &Path, export: &CsvExport) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating export dir {}", dir.display()))?;
    let path = dir.join(export.filename);
    fs::write(&path, export.contents.as_bytes())
        .with_context(|| format!("writing {}", path.display()))?;
    info!("exported {} ({}) to {}", export.filename, export.mime, path.display());
    Ok(path)
}
