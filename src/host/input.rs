// File: src/host/input.rs
use crate::host::item::Item;
use std::path::{Path, PathBuf};

/// What the launcher passed to the action.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Empty,
    /// Typed text, possibly spread over several arguments.
    Text(Vec<String>),
    /// Files dropped onto the action.
    Paths(Vec<PathBuf>),
    /// A previously emitted item, sent back when the user selected it.
    Item(Box<Item>),
}

impl Input {
    pub fn parse(args: &[String]) -> Self {
        match args {
            [] => Input::Empty,
            [arg] if Path::new(arg).exists() => Input::Paths(vec![PathBuf::from(arg)]),
            [arg] => match parse_item(arg) {
                Some(item) => Input::Item(Box::new(item)),
                None => Input::Text(args.to_vec()),
            },
            _ => Input::Paths(args.iter().map(PathBuf::from).collect()),
        }
    }

    /// The user's text: the echoed `x-arg` for items, otherwise the raw
    /// arguments joined by newlines.
    pub fn text(&self) -> String {
        match self {
            Input::Empty => String::new(),
            Input::Text(args) => args.join("\n"),
            Input::Paths(paths) => paths
                .iter()
                .map(|p| p.to_string_lossy())
                .collect::<Vec<_>>()
                .join("\n"),
            Input::Item(item) => item.arg.clone(),
        }
    }

    pub fn item(&self) -> Option<&Item> {
        match self {
            Input::Item(item) => Some(item.as_ref()),
            _ => None,
        }
    }

    /// Name of the action function requested by a selected item.
    pub fn func(&self) -> Option<&str> {
        self.item()
            .map(|item| item.func.as_str())
            .filter(|func| !func.is_empty())
    }

    /// First argument of the requested function: the first element when
    /// `x-funcarg` holds a JSON array, the raw string otherwise.
    pub fn func_arg(&self) -> Option<String> {
        let raw = &self.item()?.func_arg;
        match serde_json::from_str::<Vec<serde_json::Value>>(raw) {
            Ok(values) => values.first().map(|value| match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
            Err(_) => Some(raw.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}

fn parse_item(arg: &str) -> Option<Item> {
    match serde_json::from_str::<serde_json::Value>(arg) {
        Ok(value @ serde_json::Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn plain_text_query() {
        let input = Input::parse(&args(&["hapy "]));
        assert_eq!(input, Input::Text(args(&["hapy "])));
        assert_eq!(input.text(), "hapy ");
        assert_eq!(input.func(), None);
    }

    #[test]
    fn no_arguments_is_empty() {
        assert!(Input::parse(&[]).is_empty());
    }

    #[test]
    fn json_item_with_function() {
        let input = Input::parse(&args(&[
            r#"{"title":"happy","x-func":"openDictionary","x-funcarg":"happy","x-arg":"hapy"}"#,
        ]));
        assert_eq!(input.func(), Some("openDictionary"));
        assert_eq!(input.func_arg().as_deref(), Some("happy"));
        assert_eq!(input.text(), "hapy");
    }

    #[test]
    fn func_arg_array_takes_first_element() {
        let input = Input::parse(&args(&[r#"{"x-func":"f","x-funcarg":"[\"a\",2]"}"#]));
        assert_eq!(input.func_arg().as_deref(), Some("a"));
    }

    #[test]
    fn json_scalars_are_text() {
        assert!(matches!(Input::parse(&args(&["42"])), Input::Text(_)));
        assert!(matches!(Input::parse(&args(&["[1]"])), Input::Text(_)));
    }

    #[test]
    fn existing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_string_lossy().to_string();
        assert_eq!(Input::parse(&args(&[path.as_str()])), Input::Paths(vec![dir.path().to_path_buf()]));
        assert!(matches!(Input::parse(&args(&["a", "b"])), Input::Paths(_)));
    }
}
