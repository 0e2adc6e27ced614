use std::error::Error;
use std::path::Path;

use log::{info, warn};

use crate::types::AthleteProfile;

/// Load an athlete profile (FTP plus zone tables) from a JSON file.
/// A missing file is not an error: the default profile comes back and the
/// caller decides whether zero FTP is acceptable.
pub fn load_profile(path: &str) -> Result<AthleteProfile, Box<dyn Error>> {
    if Path::new(path).exists() {
        let contents = std::fs::read_to_string(path)?;
        let profile: AthleteProfile = serde_json::from_str(&contents)?;
        info!("profile loaded from {path} (ftp={})", profile.ftp);
        Ok(profile)
    } else {
        warn!("no profile at {path}, using defaults");
        Ok(AthleteProfile::default())
    }
}

/// Save an athlete profile to disk as pretty-printed JSON.
pub fn save_profile(profile: &AthleteProfile, path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(profile)?;
    std::fs::write(path, json)?;
    info!("profile saved to {path} (ftp={})", profile.ftp);
    Ok(())
}
