use crate::config::Config;
use crate::constants::ADDRESS_HEADER;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Creates the files a first run needs: an address CSV with only the header row,
/// the ADI data directory and a `.env` holding a placeholder API key. Existing files
/// are left alone. Returns what was created.
pub fn create_templates(config: &Config, env_file: &Path) -> io::Result<Vec<PathBuf>> {
    let mut created = Vec::new();

    let addresses = &config.paths.addresses_file;
    if !addresses.exists() {
        if let Some(parent) = addresses.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(addresses, ADDRESS_HEADER)?;
        created.push(addresses.clone());
    }

    let adi_dir = &config.paths.adi_data_dir;
    if !adi_dir.is_dir() {
        fs::create_dir_all(adi_dir)?;
        created.push(adi_dir.clone());
    }

    if !env_file.exists() {
        fs::write(
            env_file,
            format!("{}=YOUR_API_KEY_HERE\n", config.geocoder.api_key_env),
        )?;
        created.push(env_file.to_path_buf());
    }

    Ok(created)
}
