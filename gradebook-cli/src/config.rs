//! Configuration loading
//!
//! Settings come from CLI flags, then environment variables, then `.env`
//! files. dotenvy never overwrites variables that are already set, so the
//! first file to define a key wins.

use std::path::PathBuf;

use tracing::debug;

/// Directory holding the user-level `.env` (~/.gradebook)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".gradebook"))
}

/// Load environment variables from .env files.
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.gradebook/.env
///
/// Returns the files that were loaded.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from current directory: {}", path.display());
        loaded_from.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => {
                    debug!("Loaded .env from {}", env_file.display());
                    loaded_from.push(env_file);
                }
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }

    loaded_from
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_dir_is_under_home() {
        if let (Some(home), Some(dir)) = (dirs::home_dir(), config_dir()) {
            assert_eq!(dir, home.join(".gradebook"));
        }
    }
}
