use crate::events::AppEvent;
use crate::layout::{
    CENTER_LINE_SLOTS, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, MAX_GROUPS, MAX_RADIUS, PathId,
    PathVariant,
};
use crate::theme::{Color, Theme};
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use typekit::{Alternate, LanguageCode, StrokeTable, TesterId, TranslationTable, Weight};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GroupConfig {
    #[serde(default)]
    pub text: String,
    pub radius: f64,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Falls back to the theme's glyph color.
    pub color: Option<Color>,
    #[serde(default)]
    pub show_guide: bool,
    #[serde(default)]
    pub start_angle: f64,
    #[serde(default = "default_end_angle")]
    pub end_angle: f64,
    #[serde(default)]
    pub reversed: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathConfig {
    pub id: PathId,
    #[serde(default)]
    pub variant: PathVariant,
    /// Initial weight; defaults per path.
    pub weight: Option<Weight>,
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
    #[serde(default)]
    pub center_lines: Vec<String>,
    #[serde(default = "default_font_size")]
    pub center_font_size: f64,
    /// SVG path data drawn with a weight-dependent stroke width.
    #[serde(default)]
    pub stroke_paths: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CharsetConfig {
    #[serde(default)]
    pub glyphs: String,
    #[serde(default = "default_columns")]
    pub columns: usize,
    #[serde(default = "default_specimen_size")]
    pub font_size: f64,
    #[serde(default)]
    pub weight: Weight,
}

impl Default for CharsetConfig {
    fn default() -> Self {
        Self {
            glyphs: String::new(),
            columns: default_columns(),
            font_size: default_specimen_size(),
            weight: Weight::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpecimenConfig {
    pub id: TesterId,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_specimen_size")]
    pub font_size: f64,
    /// Specimens with a weight get a weight control.
    pub weight: Option<Weight>,
    pub language: Option<LanguageCode>,
    #[serde(default)]
    pub alternates: Vec<Alternate>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub strokes: StrokeTable,
    #[serde(default)]
    pub charset: CharsetConfig,
    #[serde(default)]
    pub paths: Vec<PathConfig>,
    #[serde(default)]
    pub specimens: Vec<SpecimenConfig>,
    #[serde(default)]
    pub translations: TranslationTable,
}

fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE
}

fn default_end_angle() -> f64 {
    360.0
}

fn default_columns() -> usize {
    13
}

fn default_specimen_size() -> f64 {
    32.0
}

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("orbtype-out")
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid config: {0}")]
    Invalid(String),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| -> Result<(), ConfigError> { Err(ConfigError::Invalid(msg)) };

        let mut seen = HashSet::new();
        for path in &self.paths {
            if !seen.insert(path.id) {
                return invalid(format!("{} is defined more than once", path.id));
            }
            if path.groups.is_empty() || path.groups.len() > MAX_GROUPS {
                return invalid(format!(
                    "{} has {} groups, expected 1 to {}",
                    path.id,
                    path.groups.len(),
                    MAX_GROUPS
                ));
            }
            if path.center_lines.len() > CENTER_LINE_SLOTS {
                return invalid(format!(
                    "{} has {} center lines, at most {} are shown",
                    path.id,
                    path.center_lines.len(),
                    CENTER_LINE_SLOTS
                ));
            }
            if let Some(g) = path
                .groups
                .iter()
                .find(|g| !(0.0..=MAX_RADIUS).contains(&g.radius))
            {
                return invalid(format!("{} has invalid radius {}", path.id, g.radius));
            }
        }

        if self.charset.columns == 0 {
            return invalid("charset columns must be at least 1".to_string());
        }

        let mut seen = HashSet::new();
        if let Some(s) = self.specimens.iter().find(|s| !seen.insert(&s.id)) {
            return invalid(format!("specimen {} is defined more than once", s.id));
        }

        Ok(())
    }
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "orbtype", "orbtype").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn build(source: impl config::Source + Send + Sync + 'static) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(source)
        .add_source(config::Environment::with_prefix("ORBTYPE"))
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    build(config::File::from(path.to_path_buf()).format(config::FileFormat::Toml))
}

pub fn default_config() -> Result<Config, ConfigError> {
    build(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
}

/// A missing file means the built-in defaults; a broken one is an error.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        log::info!("No config at {}, using built-in defaults", path.display());
        return default_config();
    }
    load_config(path)
}

pub fn write_default_config(path: &Path) -> std::io::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(path.to_path_buf())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let config_dir = match config_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    let file_name = config_path.file_name().map(|n| n.to_os_string());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = default_config().unwrap();

        assert_eq!(config.paths.len(), 3);
        let path2 = config.paths.iter().find(|p| p.id == PathId::Path2).unwrap();
        assert_eq!(path2.variant, PathVariant::FullCircle);
        let radii: Vec<f64> = path2.groups.iter().map(|g| g.radius).collect();
        assert_eq!(radii, vec![130.0, 90.0, 50.0]);

        let path3 = config.paths.iter().find(|p| p.id == PathId::Path3).unwrap();
        assert_eq!(path3.weight, Some(Weight::Bold));
        assert_eq!(path3.center_lines.len(), 4);
        assert_eq!(path3.stroke_paths.len(), 2);

        let tester = config
            .specimens
            .iter()
            .find(|s| s.id == TesterId::new("tester1"))
            .unwrap();
        assert_eq!(tester.weight, Some(Weight::Light));
        assert!(tester.text.contains('\n'));
    }

    fn group(radius: f64) -> GroupConfig {
        GroupConfig {
            text: "ABC".into(),
            radius,
            font_size: 20.0,
            color: None,
            show_guide: false,
            start_angle: 0.0,
            end_angle: 360.0,
            reversed: false,
        }
    }

    fn path(id: PathId, groups: Vec<GroupConfig>) -> PathConfig {
        PathConfig {
            id,
            variant: PathVariant::Arc,
            weight: None,
            groups,
            center_lines: Vec::new(),
            center_font_size: 20.0,
            stroke_paths: Vec::new(),
        }
    }

    fn with_paths(paths: Vec<PathConfig>) -> Config {
        let mut config = default_config().unwrap();
        config.paths = paths;
        config
    }

    #[test]
    fn test_validation() {
        assert!(with_paths(vec![path(PathId::Path1, vec![group(10.0)])])
            .validate()
            .is_ok());

        let too_many = path(PathId::Path1, vec![group(1.0); 4]);
        assert!(matches!(
            with_paths(vec![too_many]).validate(),
            Err(ConfigError::Invalid(_))
        ));

        let duplicate = vec![
            path(PathId::Path2, vec![group(1.0)]),
            path(PathId::Path2, vec![group(1.0)]),
        ];
        assert!(with_paths(duplicate).validate().is_err());

        let negative = path(PathId::Path1, vec![group(-5.0)]);
        assert!(with_paths(vec![negative]).validate().is_err());

        let huge = path(PathId::Path1, vec![group(1e308)]);
        assert!(with_paths(vec![huge]).validate().is_err());
        let capped = path(PathId::Path1, vec![group(MAX_RADIUS)]);
        assert!(with_paths(vec![capped]).validate().is_ok());

        let mut lines = path(PathId::Path3, vec![group(1.0)]);
        lines.center_lines = vec![String::new(); 5];
        assert!(with_paths(vec![lines]).validate().is_err());
    }

    #[test]
    fn test_path_config_deserialization() {
        let json = r##"{
            "id": "path1",
            "variant": "arc-with-center-block",
            "groups": [{"radius": 80, "color": "#ff0000", "reversed": true}]
        }"##;
        let path: PathConfig = serde_json::from_str(json).unwrap();

        assert_eq!(path.variant, PathVariant::ArcWithCenterBlock);
        assert_eq!(path.weight, None);
        let g = &path.groups[0];
        assert_eq!(g.end_angle, 360.0);
        assert_eq!(g.font_size, DEFAULT_FONT_SIZE);
        assert_eq!(g.color.map(|c| c.to_string()).as_deref(), Some("#ff0000"));
    }
}
