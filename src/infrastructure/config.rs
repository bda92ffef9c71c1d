//! Environment-driven application configuration.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::GeoLocation;

pub const DEFAULT_DATA_DIR: &str = "kissankart_data";
pub const DEFAULT_LOG_FILE: &str = "kissankart.log";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// Runtime configuration, read once at startup.
///
/// All knobs are environment variables so the binary needs no flags:
/// `KK_DATA_DIR`, `KK_LOG_FILE`, `GEMINI_API_KEY`, `KK_GEMINI_MODEL`, and
/// the viewer coordinates `KK_LAT` / `KK_LNG` (both or neither).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub viewer_location: Option<GeoLocation>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let data_dir = env::var("KK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));
        let log_file = env::var("KK_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_FILE));
        let gemini_api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let gemini_model =
            env::var("KK_GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());

        let viewer_location = match (env::var("KK_LAT").ok(), env::var("KK_LNG").ok()) {
            (Some(lat), Some(lng)) => {
                let lat: f64 = lat.parse().context("KK_LAT is not a valid latitude")?;
                let lng: f64 = lng.parse().context("KK_LNG is not a valid longitude")?;
                Some(GeoLocation::new(lat, lng))
            }
            _ => None,
        };

        Ok(Self {
            data_dir,
            log_file,
            gemini_api_key,
            gemini_model,
            viewer_location,
        })
    }
}
