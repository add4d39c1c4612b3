// File: src/host/actions.rs
use crate::error::{DictError, Result};
use crate::host::env::Modifiers;
use crate::host::input::Input;
use std::process::Command;
use tracing::{info, warn};

pub const OPEN_DICTIONARY: &str = "openDictionary";

#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(not(target_os = "macos"))]
const OPENER: &str = "xdg-open";

/// `dict://` URL that shows `word` in the Dictionary app.
pub fn dictionary_url(word: &str) -> String {
    format!("dict://{}", urlencoding::encode(word))
}

pub fn open_command(word: &str) -> Command {
    let mut cmd = Command::new(OPENER);
    cmd.arg(dictionary_url(word));
    cmd
}

/// Asks the launcher to paste `word` into the frontmost application.
pub fn paste_command(word: &str) -> Command {
    let literal = word.replace('\\', "\\\\").replace('"', "\\\"");
    let script = format!(
        "tell application \"LaunchBar\"\n  perform action \"Paste in Frontmost Application\" with string \"{literal}\"\nend tell"
    );
    let mut cmd = Command::new("osascript");
    cmd.arg("-e").arg(script);
    cmd
}

/// The command `openDictionary` runs for this input, if it has a word.
///
/// Control uses the typed text instead of the selected row's word; Shift
/// pastes the word instead of opening it.
pub fn open_dictionary_command(input: &Input, modifiers: Modifiers) -> Option<Command> {
    let word = if modifiers.control {
        input.text()
    } else {
        input.func_arg().unwrap_or_default()
    };
    if word.trim().is_empty() {
        return None;
    }
    Some(if modifiers.shift {
        paste_command(&word)
    } else {
        open_command(&word)
    })
}

/// Runs the function a selected item asked for. Unknown names are ignored.
pub fn dispatch(func: &str, input: &Input, modifiers: Modifiers) -> Result<()> {
    match func {
        OPEN_DICTIONARY => {
            let Some(mut cmd) = open_dictionary_command(input, modifiers) else {
                return Ok(());
            };
            let program = cmd.get_program().to_string_lossy().to_string();
            info!(program = program.as_str(), "opening dictionary");
            cmd.spawn()
                .map(drop)
                .map_err(|source| DictError::Spawn { program, source })
        }
        other => {
            warn!(func = other, "unknown action function");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn selected(word: &str, typed: &str) -> Input {
        let raw = serde_json::json!({
            "x-func": OPEN_DICTIONARY,
            "x-funcarg": word,
            "x-arg": typed,
        });
        Input::parse(&[raw.to_string()])
    }

    fn args(cmd: &Command) -> Vec<&OsStr> {
        cmd.get_args().collect()
    }

    #[test]
    fn url_escapes_the_word() {
        assert_eq!(dictionary_url("ice cream"), "dict://ice%20cream");
        assert_eq!(dictionary_url("a&b"), "dict://a%26b");
    }

    #[test]
    fn opens_selected_word() {
        let cmd = open_dictionary_command(&selected("happy", "hapy"), Modifiers::default()).unwrap();
        assert_eq!(cmd.get_program(), OPENER);
        assert_eq!(args(&cmd), vec![OsStr::new("dict://happy")]);
    }

    #[test]
    fn control_uses_typed_text() {
        let modifiers = Modifiers {
            control: true,
            ..Modifiers::default()
        };
        let cmd = open_dictionary_command(&selected("happy", "hapy"), modifiers).unwrap();
        assert_eq!(args(&cmd), vec![OsStr::new("dict://hapy")]);
    }

    #[test]
    fn shift_pastes_with_escaped_literal() {
        let modifiers = Modifiers {
            shift: true,
            ..Modifiers::default()
        };
        let cmd = open_dictionary_command(&selected("say \"hi\"", "x"), modifiers).unwrap();
        assert_eq!(cmd.get_program(), "osascript");
        let script = args(&cmd)[1].to_string_lossy().to_string();
        assert!(script.contains(r#"with string "say \"hi\"""#));
    }

    #[test]
    fn nothing_to_open() {
        assert!(open_dictionary_command(&selected("", ""), Modifiers::default()).is_none());
        assert!(dispatch("somethingElse", &Input::Empty, Modifiers::default()).is_ok());
    }
}
