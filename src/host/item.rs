// File: src/host/item.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn is_zero(n: &usize) -> bool {
    *n == 0
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// A launcher result row, serialized with the launcher's JSON keys.
/// Empty fields are left out; the `x-*` keys are echoed back by the launcher
/// when the row is selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Item {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subtitle: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub action: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub action_argument: String,
    #[serde(skip_serializing_if = "is_false")]
    pub action_returns_items: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub action_runs_in_background: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Item>,

    #[serde(rename = "x-id", skip_serializing_if = "is_zero")]
    pub id: usize,
    #[serde(rename = "x-order", skip_serializing_if = "is_zero")]
    pub order: usize,
    #[serde(rename = "x-func", skip_serializing_if = "String::is_empty")]
    pub func: String,
    #[serde(rename = "x-funcarg", skip_serializing_if = "String::is_empty")]
    pub func_arg: String,
    #[serde(rename = "x-arg", skip_serializing_if = "String::is_empty")]
    pub arg: String,
    #[serde(rename = "x-data", skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}

impl Item {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) -> &mut Self {
        self.subtitle = subtitle.into();
        self
    }

    pub fn set_icon(&mut self, icon: impl Into<String>) -> &mut Self {
        self.icon = icon.into();
        self
    }

    /// Makes selecting the item call the action function `func` with `arg`.
    pub fn run(&mut self, func: &str, arg: impl Into<String>) -> &mut Self {
        self.func = func.to_string();
        self.func_arg = arg.into();
        self
    }
}

/// Serializes rows for the launcher. Never fails: a serialization error
/// becomes a single row describing it.
pub fn compile_items(items: &[Item]) -> String {
    serde_json::to_string(items).unwrap_or_else(|e| {
        let title = serde_json::to_string(&e.to_string()).unwrap_or_else(|_| "\"\"".to_string());
        format!(r#"[{{"title": {title},"subtitle":"error"}}]"#)
    })
}

/// An ordered collection of items shown together.
#[derive(Debug, Clone)]
pub struct View {
    default_action: String,
    items: Vec<Item>,
}

impl View {
    pub fn new(default_action: impl Into<String>) -> Self {
        Self {
            default_action: default_action.into(),
            items: Vec::new(),
        }
    }

    /// Appends an item that runs the default script in the background.
    pub fn new_item(&mut self, title: impl Into<String>) -> &mut Item {
        let position = self.items.len();
        let mut item = Item::new(title);
        item.action = self.default_action.clone();
        item.action_runs_in_background = true;
        item.id = position + 1;
        item.order = position;
        self.items.push(item);
        &mut self.items[position]
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [Item] {
        &mut self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders the view as the launcher payload, stamping the current input
    /// on every row.
    pub fn compile(&self, input_text: &str) -> String {
        let mut items = self.items.clone();
        for item in &mut items {
            item.arg = input_text.to_string();
        }
        items.sort_by_key(|item| item.order);
        compile_items(&items)
    }
}
