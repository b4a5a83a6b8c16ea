//! Storage initialization
//!
//! Handles first-run setup and default data creation

use tracing::info;

use crate::config::paths::FintrackPaths;
use crate::config::Settings;
use crate::error::FinanceError;
use crate::models::category::default_categories;
use crate::models::UserId;

use super::categories::CategoryRepository;

/// Initialize storage for a fresh installation
///
/// Writes the settings file (creating the profile owner) and seeds the
/// starter categories. Existing files are left untouched.
pub fn initialize_storage(paths: &FintrackPaths) -> Result<Settings, FinanceError> {
    paths.ensure_directories()?;

    let settings = Settings::load_or_create(paths)?;
    if !paths.settings_file().exists() {
        settings.save(paths)?;
        info!(user = %settings.user_id, "created settings");
    }

    if !paths.categories_file().exists() {
        create_default_categories(paths, settings.user_id)?;
    }

    Ok(settings)
}

fn create_default_categories(paths: &FintrackPaths, user_id: UserId) -> Result<(), FinanceError> {
    let repo = CategoryRepository::new(paths.categories_file());
    let defaults = default_categories(user_id);
    let count = defaults.len();
    for category in defaults {
        repo.upsert(category)?;
    }
    repo.save()?;

    info!(count, "seeded default categories");
    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &FintrackPaths) -> bool {
    !paths.is_initialized()
}
