//! User settings, read from a TOML file in the platform config directory
//!
//! Every section and field is optional. Anything missing takes its default,
//! and a file that fails to parse is ignored as a whole.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub keys: KeyBindings,
    pub visual: VisualSettings,
    pub gameplay: GameplaySettings,
}

/// Key names bound to one action
///
/// Written as a bare string when a single key is bound and as an array
/// otherwise, so `hold = "c"` and `hold = ["c", "Shift"]` both load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OneOrMany", into = "OneOrMany")]
pub struct KeyList(Vec<String>);

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for KeyList {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(key) => KeyList(vec![key]),
            OneOrMany::Many(keys) => KeyList(keys),
        }
    }
}

impl From<KeyList> for OneOrMany {
    fn from(mut list: KeyList) -> Self {
        match list.0.len() {
            1 => OneOrMany::One(list.0.remove(0)),
            _ => OneOrMany::Many(list.0),
        }
    }
}

impl KeyList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KeyList(names.into_iter().map(Into::into).collect())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }
}

/// Key names per action, resolved to key codes by the input layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_left: KeyList,
    pub move_right: KeyList,
    pub soft_drop: KeyList,
    pub hard_drop: KeyList,
    pub rotate_cw: KeyList,
    pub rotate_ccw: KeyList,
    pub hold: KeyList,
    pub pause: KeyList,
    pub reset: KeyList,
    pub quit: KeyList,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: KeyList::new(["Left"]),
            move_right: KeyList::new(["Right"]),
            soft_drop: KeyList::new(["Down"]),
            hard_drop: KeyList::new(["Space"]),
            rotate_cw: KeyList::new(["Up", "x"]),
            rotate_ccw: KeyList::new(["z"]),
            hold: KeyList::new(["c"]),
            pause: KeyList::new(["p"]),
            reset: KeyList::new(["r"]),
            quit: KeyList::new(["Esc", "q"]),
        }
    }
}

/// How cells are drawn on the board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockStyle {
    #[default]
    Solid,
    Bracket,
    Round,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Draw the landing position of the falling piece
    pub show_ghost: bool,
    pub block_style: BlockStyle,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            show_ghost: true,
            block_style: BlockStyle::Solid,
        }
    }
}

impl VisualSettings {
    /// Block and ghost glyphs, two columns per cell
    pub fn block_chars(&self) -> (&'static str, &'static str) {
        match self.block_style {
            BlockStyle::Solid => ("██", "░░"),
            BlockStyle::Bracket => ("[]", ".."),
            BlockStyle::Round => ("()", ".."),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Fixed seed for the piece randomizer, random when unset
    pub seed: Option<u64>,
    /// Score file location, platform data directory when unset
    pub score_file: Option<PathBuf>,
}

impl Settings {
    fn settings_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "blockfall", "blockfall")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    /// Load settings from the config directory, defaults when absent
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!("Loaded settings from {}", path.display());
                Self::parse(&contents)
            }
            Err(_) => Self::default(),
        }
    }

    /// Parse settings, falling back to defaults on malformed input
    pub fn parse(contents: &str) -> Self {
        toml::from_str(contents).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed settings: {}", e);
            Self::default()
        })
    }

    /// Write the settings file, creating the config directory if needed
    pub fn save(&self) -> Result<(), String> {
        let path = Self::settings_path().ok_or("Could not determine config directory")?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| format!("Failed to create config dir: {}", e))?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize: {}", e))?;
        fs::write(&path, contents).map_err(|e| format!("Failed to write settings: {}", e))
    }
}
