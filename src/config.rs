use clap::Parser;
use std::time::Duration;
use url::Url;

use crate::error::Result;
use crate::state::Location;

/// Runtime configuration, read from the command line with environment fallbacks
#[derive(Debug, Clone, Parser)]
#[command(name = "portfolio-gallery", version, about = "Browse a photography portfolio gallery")]
pub struct Config {
    /// Page address the gallery is served from. An `open` parameter
    /// reopens that item on start.
    #[arg(long, env = "GALLERY_LOCATION", default_value = "http://localhost:8080/")]
    pub location: Location,

    /// Manifest path, resolved against the page address
    #[arg(long, env = "GALLERY_MANIFEST", default_value = "/content/gallery.json")]
    pub manifest: String,

    /// Request timeout in seconds
    #[arg(long, env = "GALLERY_TIMEOUT_SECS", default_value_t = 20)]
    pub timeout_secs: u64,
}

impl Config {
    pub fn manifest_url(&self) -> Result<Url> {
        Ok(self.location.resolve(&self.manifest)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["portfolio-gallery"]);
        assert_eq!(
            config.manifest_url().unwrap().as_str(),
            "http://localhost:8080/content/gallery.json"
        );
        assert_eq!(config.timeout(), Duration::from_secs(20));
        assert_eq!(config.location.open_param(), None);
    }

    #[test]
    fn test_deep_link_location() {
        let config = Config::parse_from([
            "portfolio-gallery",
            "--location",
            "https://fotos.example.com/portfolio/?open=abc",
            "--manifest",
            "data/gallery.json",
        ]);
        assert_eq!(config.location.open_param().as_deref(), Some("abc"));
        assert_eq!(
            config.manifest_url().unwrap().as_str(),
            "https://fotos.example.com/portfolio/data/gallery.json"
        );
    }

    #[test]
    fn test_invalid_location_is_rejected() {
        assert!(Config::try_parse_from(["portfolio-gallery", "--location", "not a url"]).is_err());
    }
}
