use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const PROFILE_SCHEMA_VERSION: u32 = 1;

/// Progress that outlives a single run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub version: u32,
    #[serde(default)]
    pub meta_zenny: i64,
    #[serde(default)]
    pub runs_played: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub best_day: u8,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            version: PROFILE_SCHEMA_VERSION,
            meta_zenny: 0,
            runs_played: 0,
            wins: 0,
            best_day: 0,
        }
    }
}

pub fn default_profile_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("GEMWITCH_PROFILE") {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".gemwitch_profile.json"))
}

pub fn save_profile(profile: &Profile, path: &Path) -> Result<(), String> {
    let body = serde_json::to_string_pretty(profile).map_err(|err| err.to_string())?;
    fs::write(path, body).map_err(|err| err.to_string())
}

pub fn load_profile(path: &Path) -> Result<Profile, String> {
    let body = fs::read_to_string(path).map_err(|err| err.to_string())?;
    let profile: Profile = serde_json::from_str(&body).map_err(|err| err.to_string())?;
    if profile.version != PROFILE_SCHEMA_VERSION {
        return Err(format!(
            "unsupported profile version {} (expected {})",
            profile.version, PROFILE_SCHEMA_VERSION
        ));
    }
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn profile_roundtrip() {
        let file = unique_temp_file();
        let profile = Profile {
            version: PROFILE_SCHEMA_VERSION,
            meta_zenny: 77,
            runs_played: 4,
            wins: 1,
            best_day: 5,
        };
        save_profile(&profile, &file).expect("save");
        let loaded = load_profile(&file).expect("load");
        assert_eq!(loaded.meta_zenny, 77);
        assert_eq!(loaded.runs_played, 4);
        assert_eq!(loaded.wins, 1);
        assert_eq!(loaded.best_day, 5);
        let _ = std::fs::remove_file(file);
    }

    #[test]
    fn rejects_unknown_profile_version() {
        let file = unique_temp_file();
        std::fs::write(&file, r#"{"version":9,"meta_zenny":1}"#).expect("write");
        let err = load_profile(&file).expect_err("version gate");
        assert!(err.contains("unsupported profile version 9"));
        let _ = std::fs::remove_file(file);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let file = unique_temp_file();
        std::fs::write(&file, r#"{"version":1}"#).expect("write");
        let loaded = load_profile(&file).expect("load");
        assert_eq!(loaded.meta_zenny, 0);
        assert_eq!(loaded.best_day, 0);
        let _ = std::fs::remove_file(file);
    }

    fn unique_temp_file() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "gemwitch_profile_test_{}_{}.json",
            std::process::id(),
            nanos
        ))
    }
}
