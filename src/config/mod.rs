// SPDX-License-Identifier: MPL-2.0
//! Toast options: built-in defaults, per-call overrides and the optional
//! site-wide `toast.toml` file.
//!
//! # Layers
//!
//! Every toast is rendered with a full [`Options`] snapshot, produced by
//! merging [`OptionsOverride`] layers over [`Options::default`]:
//! 1. Built-in defaults from [`defaults`]
//! 2. Site defaults loaded from `toast.toml` (see [`load`])
//! 3. Notifier-wide overrides
//! 4. Per-call overrides
//!
//! Override keys use the same camelCase names as the classic toastr options
//! (`timeOut`, `newestOnTop`, `positionClass`, ...).
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `TOAST_NOTIFY_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use toast_notify::config::{self, Options, OptionsOverride};
//!
//! let site = config::load();
//! let call = OptionsOverride {
//!     time_out: Some(0),
//!     close_button: Some(true),
//!     ..OptionsOverride::default()
//! };
//! let options = Options::default().merged(&site).merged(&call);
//! assert_eq!(options.time_out, 0);
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

const CONFIG_FILE: &str = "toast.toml";

/// Application name used for directory naming.
const APP_NAME: &str = "ToastNotify";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "TOAST_NOTIFY_CONFIG_DIR";

// =============================================================================
// Position
// =============================================================================

/// Placement of the container, expressed as its CSS class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum Position {
    #[default]
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
    TopFullWidth,
    BottomFullWidth,
    TopCenter,
    BottomCenter,
}

impl Position {
    pub const ALL: [Position; 8] = [
        Position::TopRight,
        Position::TopLeft,
        Position::BottomRight,
        Position::BottomLeft,
        Position::TopFullWidth,
        Position::BottomFullWidth,
        Position::TopCenter,
        Position::BottomCenter,
    ];

    /// Returns the CSS class for this placement.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Position::TopRight => "toast-top-right",
            Position::TopLeft => "toast-top-left",
            Position::BottomRight => "toast-bottom-right",
            Position::BottomLeft => "toast-bottom-left",
            Position::TopFullWidth => "toast-top-full-width",
            Position::BottomFullWidth => "toast-bottom-full-width",
            Position::TopCenter => "toast-top-center",
            Position::BottomCenter => "toast-bottom-center",
        }
    }

    /// Parses a placement class. Unknown keywords return `None`.
    #[must_use]
    pub fn from_class_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.class_name().eq_ignore_ascii_case(name))
    }
}

impl From<String> for Position {
    fn from(raw: String) -> Self {
        Self::from_class_name(&raw).unwrap_or_else(|| {
            tracing::warn!(position = %raw, "unknown position class, using default");
            Position::default()
        })
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.class_name().to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

// =============================================================================
// Click Handler
// =============================================================================

/// Callback invoked when the body of a toast is clicked.
///
/// Panics raised by the callback are not caught.
#[derive(Clone)]
pub struct ClickHandler(Rc<dyn Fn()>);

impl ClickHandler {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self) {
        (self.0)();
    }
}

impl fmt::Debug for ClickHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClickHandler(..)")
    }
}

// =============================================================================
// Options
// =============================================================================

/// Fully resolved options for a single toast.
#[derive(Debug, Clone)]
pub struct Options {
    pub tap_to_dismiss: bool,
    pub toast_class: String,
    pub container_id: String,
    pub position: Position,
    /// Auto-dismiss delay in milliseconds; `0` persists until dismissed.
    pub time_out: u64,
    pub extended_time_out: u64,
    pub close_button: bool,
    pub debug: bool,
    pub newest_on_top: bool,
    pub progress_bar: bool,
    pub prevent_duplicates: bool,
    pub on_click: Option<ClickHandler>,
    pub show_duration: u64,
    pub hide_duration: u64,
    pub show_easing: String,
    pub hide_easing: String,
    pub show_method: String,
    pub hide_method: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tap_to_dismiss: DEFAULT_TAP_TO_DISMISS,
            toast_class: DEFAULT_TOAST_CLASS.to_string(),
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            position: Position::default(),
            time_out: DEFAULT_TIMEOUT_MS,
            extended_time_out: DEFAULT_EXTENDED_TIMEOUT_MS,
            close_button: DEFAULT_CLOSE_BUTTON,
            debug: DEFAULT_DEBUG,
            newest_on_top: DEFAULT_NEWEST_ON_TOP,
            progress_bar: DEFAULT_PROGRESS_BAR,
            prevent_duplicates: DEFAULT_PREVENT_DUPLICATES,
            on_click: None,
            show_duration: DEFAULT_SHOW_DURATION_MS,
            hide_duration: DEFAULT_HIDE_DURATION_MS,
            show_easing: DEFAULT_SHOW_EASING.to_string(),
            hide_easing: DEFAULT_HIDE_EASING.to_string(),
            show_method: DEFAULT_SHOW_METHOD.to_string(),
            hide_method: DEFAULT_HIDE_METHOD.to_string(),
        }
    }
}

impl Options {
    /// Returns a copy of these options with every field set in `layer`
    /// replaced. Negative durations clamp to zero.
    #[must_use]
    pub fn merged(&self, layer: &OptionsOverride) -> Options {
        let mut out = self.clone();
        if let Some(v) = layer.tap_to_dismiss {
            out.tap_to_dismiss = v;
        }
        if let Some(v) = &layer.toast_class {
            out.toast_class.clone_from(v);
        }
        if let Some(v) = &layer.container_id {
            out.container_id.clone_from(v);
        }
        if let Some(v) = layer.position {
            out.position = v;
        }
        if let Some(v) = layer.time_out {
            out.time_out = clamp_ms(v);
        }
        if let Some(v) = layer.extended_time_out {
            out.extended_time_out = clamp_ms(v);
        }
        if let Some(v) = layer.close_button {
            out.close_button = v;
        }
        if let Some(v) = layer.debug {
            out.debug = v;
        }
        if let Some(v) = layer.newest_on_top {
            out.newest_on_top = v;
        }
        if let Some(v) = layer.progress_bar {
            out.progress_bar = v;
        }
        if let Some(v) = layer.prevent_duplicates {
            out.prevent_duplicates = v;
        }
        if let Some(v) = &layer.on_click {
            out.on_click = Some(v.clone());
        }
        if let Some(v) = layer.show_duration {
            out.show_duration = clamp_ms(v);
        }
        if let Some(v) = layer.hide_duration {
            out.hide_duration = clamp_ms(v);
        }
        if let Some(v) = &layer.show_easing {
            out.show_easing.clone_from(v);
        }
        if let Some(v) = &layer.hide_easing {
            out.hide_easing.clone_from(v);
        }
        if let Some(v) = &layer.show_method {
            out.show_method.clone_from(v);
        }
        if let Some(v) = &layer.hide_method {
            out.hide_method.clone_from(v);
        }
        out
    }
}

fn clamp_ms(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

/// Deserializes one option field, leaving it unset when the value has the
/// wrong type.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    if raw.is_null() {
        return Ok(None);
    }
    match T::deserialize(raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            tracing::warn!(%err, "ignoring ill-typed toast option");
            Ok(None)
        }
    }
}

/// A partial set of options. Unset fields keep the value of the layer below.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionsOverride {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub tap_to_dismiss: Option<bool>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub toast_class: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    #[serde(
        rename = "positionClass",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<Position>,
    #[serde(
        rename = "timeOut",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_out: Option<i64>,
    #[serde(
        rename = "extendedTimeOut",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub extended_time_out: Option<i64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub close_button: Option<bool>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub newest_on_top: Option<bool>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub progress_bar: Option<bool>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub prevent_duplicates: Option<bool>,
    #[serde(skip)]
    pub on_click: Option<ClickHandler>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub show_duration: Option<i64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub hide_duration: Option<i64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub show_easing: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub hide_easing: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub show_method: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub hide_method: Option<String>,
}

impl OptionsOverride {
    /// Reads overrides from a loosely-typed options object.
    ///
    /// Anything that is not an object yields an empty override. Ill-typed
    /// fields are left unset; the other fields still apply.
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        match serde_json::from_value(value.clone()) {
            Ok(layer) => layer,
            Err(err) => {
                tracing::warn!(%err, "ignoring malformed toast options");
                Self::default()
            }
        }
    }

    /// Sets the click callback.
    #[must_use]
    pub fn with_on_click(mut self, f: impl Fn() + 'static) -> Self {
        self.on_click = Some(ClickHandler::new(f));
        self
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the site config file path with an optional override directory.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    let dir = base_dir
        .or_else(|| std::env::var_os(ENV_CONFIG_DIR).map(PathBuf::from))
        .or_else(|| {
            dirs::config_dir().map(|mut path| {
                path.push(APP_NAME);
                path
            })
        });
    dir.map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads site-wide overrides from the default path.
///
/// A missing or unreadable file yields an empty override.
pub fn load() -> OptionsOverride {
    load_with_override(None)
}

/// Loads site-wide overrides from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> OptionsOverride {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(layer) => return layer,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "failed to load toast config");
                }
            }
        }
    }
    OptionsOverride::default()
}

/// Loads overrides from a specific path. Invalid TOML yields defaults.
pub fn load_from_path(path: &Path) -> Result<OptionsOverride> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), %err, "invalid toast config, using defaults");
        OptionsOverride::default()
    }))
}

/// Saves overrides to the default path.
pub fn save(layer: &OptionsOverride) -> Result<()> {
    if let Some(path) = get_config_path_with_override(None) {
        return save_to_path(layer, &path);
    }
    Ok(())
}

/// Saves overrides to a specific path, creating parent directories.
pub fn save_to_path(layer: &OptionsOverride, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(layer)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_classic_toastr() {
        let options = Options::default();
        assert!(options.tap_to_dismiss);
        assert_eq!(options.toast_class, "toast");
        assert_eq!(options.container_id, "toast-container");
        assert_eq!(options.position, Position::TopRight);
        assert_eq!(options.time_out, 5000);
        assert_eq!(options.extended_time_out, 1000);
        assert!(!options.close_button);
        assert!(options.newest_on_top);
        assert!(!options.prevent_duplicates);
        assert_eq!(options.hide_duration, 1000);
        assert_eq!(options.show_method, "fadeIn");
        assert!(options.on_click.is_none());
    }

    #[test]
    fn merged_replaces_only_set_fields() {
        let layer = OptionsOverride {
            time_out: Some(0),
            close_button: Some(true),
            ..OptionsOverride::default()
        };
        let options = Options::default().merged(&layer);
        assert_eq!(options.time_out, 0);
        assert!(options.close_button);
        assert_eq!(options.hide_duration, DEFAULT_HIDE_DURATION_MS);
        assert_eq!(options.toast_class, DEFAULT_TOAST_CLASS);
    }

    #[test]
    fn negative_durations_clamp_to_zero() {
        let layer = OptionsOverride {
            time_out: Some(-50),
            hide_duration: Some(-1),
            ..OptionsOverride::default()
        };
        let options = Options::default().merged(&layer);
        assert_eq!(options.time_out, 0);
        assert_eq!(options.hide_duration, 0);
    }

    #[test]
    fn later_layers_win() {
        let site = OptionsOverride {
            time_out: Some(100),
            debug: Some(true),
            ..OptionsOverride::default()
        };
        let call = OptionsOverride {
            time_out: Some(200),
            ..OptionsOverride::default()
        };
        let options = Options::default().merged(&site).merged(&call);
        assert_eq!(options.time_out, 200);
        assert!(options.debug);
    }

    #[test]
    fn from_value_reads_camel_case_keys() {
        let layer = OptionsOverride::from_value(&json!({
            "timeOut": 250,
            "newestOnTop": false,
            "positionClass": "toast-bottom-left",
            "preventDuplicates": true,
        }));
        assert_eq!(layer.time_out, Some(250));
        assert_eq!(layer.newest_on_top, Some(false));
        assert_eq!(layer.position, Some(Position::BottomLeft));
        assert_eq!(layer.prevent_duplicates, Some(true));
    }

    #[test]
    fn from_value_ignores_malformed_input() {
        let layer = OptionsOverride::from_value(&json!({ "timeOut": "soon" }));
        assert!(layer.time_out.is_none());

        let layer = OptionsOverride::from_value(&json!({ "timeOut": null }));
        assert!(layer.time_out.is_none());

        let layer = OptionsOverride::from_value(&json!("not an object"));
        assert!(layer.time_out.is_none());

        // Functions cannot cross a JSON boundary; the key is simply ignored.
        let layer = OptionsOverride::from_value(&json!({ "onclick": "alert(1)" }));
        assert!(layer.on_click.is_none());
    }

    #[test]
    fn ill_typed_field_keeps_the_others() {
        let layer = OptionsOverride::from_value(&json!({
            "closeButton": true,
            "timeOut": "soon",
        }));
        assert_eq!(layer.close_button, Some(true));
        assert!(layer.time_out.is_none());

        let layer = OptionsOverride::from_value(&json!({
            "timeOut": 0,
            "newestOnTop": "no",
            "positionClass": 3,
            "toastClass": "toast-lg",
        }));
        assert_eq!(layer.time_out, Some(0));
        assert!(layer.newest_on_top.is_none());
        assert!(layer.position.is_none());
        assert_eq!(layer.toast_class.as_deref(), Some("toast-lg"));
    }

    #[test]
    fn ill_typed_toml_field_keeps_the_others() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("toast.toml");
        fs::write(&config_path, "timeOut = \"later\"\ncloseButton = true\n")
            .expect("failed to write config");

        let loaded = load_from_path(&config_path).expect("failed to load config");
        assert!(loaded.time_out.is_none());
        assert_eq!(loaded.close_button, Some(true));
    }

    #[test]
    fn unknown_position_falls_back_to_default() {
        let layer = OptionsOverride::from_value(&json!({ "positionClass": "toast-middle" }));
        assert_eq!(layer.position, Some(Position::TopRight));
    }

    #[test]
    fn position_class_names_round_trip() {
        for position in Position::ALL {
            assert_eq!(
                Position::from_class_name(position.class_name()),
                Some(position)
            );
        }
    }

    #[test]
    fn click_handler_merges_through() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let layer = OptionsOverride::default().with_on_click(move || counter.set(counter.get() + 1));
        let options = Options::default().merged(&layer);
        options.on_click.as_ref().expect("handler set").call();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn save_and_load_round_trip_preserves_overrides() {
        let layer = OptionsOverride {
            time_out: Some(1500),
            position: Some(Position::BottomCenter),
            close_button: Some(true),
            ..OptionsOverride::default()
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("toast.toml");

        save_to_path(&layer, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.time_out, Some(1500));
        assert_eq!(loaded.position, Some(Position::BottomCenter));
        assert_eq!(loaded.close_button, Some(true));
        assert!(loaded.debug.is_none());
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("toast.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.time_out.is_none());
    }

    #[test]
    fn load_with_override_reads_directory() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "timeOut = 42\n")
            .expect("failed to write config");

        let loaded = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(loaded.time_out, Some(42));
    }

    #[test]
    fn load_with_override_missing_file_is_empty() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let loaded = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert!(loaded.time_out.is_none());
    }
}
