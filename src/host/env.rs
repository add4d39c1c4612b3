// File: src/host/env.rs
use clap::builder::FalseyValueParser;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR: &str = "live-dictionary";

/// LaunchBar's preferences file, relative to the home directory.
pub const LAUNCHER_PREFERENCES: &str = "Library/Preferences/at.obdev.LaunchBar.plist";
const WINDOW_WIDTH_KEY: &str = "LaunchBarWindowWidth";

/// Command line and environment the launcher runs the action with.
///
/// The launcher passes its input as positional arguments and describes
/// itself through `LB_*` environment variables.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "dict",
    about = "Look up dictionary definitions for the launcher",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct LaunchArgs {
    /// Raw launcher input: a query, file paths, or a JSON item
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,

    #[arg(long, env = "LB_SUPPORT_PATH", hide = true)]
    pub support_path: Option<PathBuf>,

    #[arg(long, env = "LB_CACHE_PATH", hide = true)]
    pub cache_path: Option<PathBuf>,

    #[arg(long, env = "LB_DEBUG_LOG_ENABLED", value_parser = FalseyValueParser::new(), hide = true)]
    pub debug_log: bool,

    #[arg(long, env = "LB_OPTION_SHIFT_KEY", value_parser = FalseyValueParser::new(), hide = true)]
    pub shift_key: bool,

    #[arg(long, env = "LB_OPTION_CONTROL_KEY", value_parser = FalseyValueParser::new(), hide = true)]
    pub control_key: bool,
}

/// Modifier keys held while the action was started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
}

impl LaunchArgs {
    /// Directory for persistent data (config, word list, log).
    pub fn support_dir(&self) -> PathBuf {
        self.support_path.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
        })
    }

    /// Directory for data that can be rebuilt (word index, lookup cache).
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_path.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(APP_DIR)
        })
    }

    pub fn modifiers(&self) -> Modifiers {
        Modifiers {
            shift: self.shift_key,
            control: self.control_key,
        }
    }
}

pub fn launcher_preferences() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(LAUNCHER_PREFERENCES))
}

/// Launcher window width in pixels as stored in its preferences, if set.
pub fn preferred_window_width(preferences: &Path) -> Option<f64> {
    let value = plist::Value::from_file(preferences).ok()?;
    let width = value.as_dictionary()?.get(WINDOW_WIDTH_KEY)?;
    width
        .as_real()
        .or_else(|| width.as_signed_integer().map(|w| w as f64))
        .filter(|w| *w > 0.0)
}

/// Width to truncate subtitles to: the launcher's own setting, or `fallback`
/// when its preferences are missing or do not have one.
pub fn window_width(preferences: Option<&Path>, fallback: f64) -> f64 {
    match preferences.and_then(preferred_window_width) {
        Some(width) => {
            debug!(width, "window width from launcher preferences");
            width
        }
        None => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_input_accepts_hyphens() {
        let args = LaunchArgs::try_parse_from(["dict", "-ly", "suffix"]).unwrap();
        assert_eq!(args.args, vec!["-ly".to_string(), "suffix".to_string()]);
    }

    #[test]
    fn flags_accept_launcher_style_values() {
        let args = LaunchArgs::try_parse_from([
            "dict",
            "--shift-key",
            "--support-path",
            "/tmp/support",
            "word",
        ])
        .unwrap();
        assert!(args.modifiers().shift);
        assert!(!args.modifiers().control);
        assert_eq!(args.support_dir(), PathBuf::from("/tmp/support"));
        assert_eq!(args.args, vec!["word".to_string()]);
    }

    const PREFERENCES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>LaunchBarWindowWidth</key>
    <real>640</real>
    <key>ShowDockIcon</key>
    <false/>
</dict>
</plist>
"#;

    #[test]
    fn window_width_comes_from_launcher_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("at.obdev.LaunchBar.plist");
        std::fs::write(&path, PREFERENCES).unwrap();

        assert_eq!(preferred_window_width(&path), Some(640.0));
        assert_eq!(window_width(Some(&path), 300.0), 640.0);
    }

    #[test]
    fn integer_window_width_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("at.obdev.LaunchBar.plist");
        std::fs::write(&path, PREFERENCES.replace("<real>640</real>", "<integer>512</integer>")).unwrap();
        assert_eq!(window_width(Some(&path), 300.0), 512.0);
    }

    #[test]
    fn window_width_falls_back_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.plist");
        assert_eq!(window_width(Some(&missing), 300.0), 300.0);
        assert_eq!(window_width(None, 420.0), 420.0);

        let unset = dir.path().join("unset.plist");
        std::fs::write(&unset, PREFERENCES.replace("LaunchBarWindowWidth", "SomethingElse")).unwrap();
        assert_eq!(window_width(Some(&unset), 300.0), 300.0);

        let garbage = dir.path().join("garbage.plist");
        std::fs::write(&garbage, "not a plist").unwrap();
        assert_eq!(window_width(Some(&garbage), 300.0), 300.0);
    }

    #[test]
    fn directories_fall_back_to_user_dirs() {
        let args = LaunchArgs::default();
        assert!(args.support_dir().ends_with(APP_DIR));
        assert!(args.cache_dir().ends_with(APP_DIR));
    }
}
