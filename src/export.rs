use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::constants::EXPORT_FILENAME;
use crate::meal_plan::MealPlanData;

/// Write the plan as `prompt_output.json` in the given directory.
///
/// Serialization is pretty-printed and key order follows the plan's schema
/// declaration, so repeated exports diff cleanly.
pub fn save_meal_plan(plan: &MealPlanData, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(EXPORT_FILENAME);
    let json = serde_json::to_string_pretty(plan).context("failed to serialize meal plan")?;
    fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "meal plan exported");
    Ok(path)
}
