//! Default task colors
//!
//! A task without an explicit color gets one from the palette by its position
//! in the project's task list. Pure: the input task is never modified, the
//! rendering layer memoizes the result.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Built-in palette, cycled when there are more tasks than colors
pub const DEFAULT_PALETTE: &[&str] = &[
    "#F44336", "#2196F3", "#4CAF50", "#FF9800", "#9C27B0", "#00BCD4", "#FFEB3B", "#795548",
    "#E91E63", "#3F51B5", "#8BC34A", "#607D8B",
];

/// A project task as the UI stores it. Fields other than `value` and `color`
/// pass through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            color: None,
            extra: Map::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Copy of `task` with a color. An explicit color wins; an empty palette
/// leaves the task as it is.
pub fn assign_color<S: AsRef<str>>(task: &Task, index: usize, palette: &[S]) -> Task {
    let mut colored = task.clone();
    if colored.color.as_deref().map_or(true, str::is_empty) && !palette.is_empty() {
        colored.color = Some(palette[index % palette.len()].as_ref().to_string());
    }
    colored
}

/// `assign_color` over a whole task list, by position.
pub fn assign_colors<S: AsRef<str>>(tasks: &[Task], palette: &[S]) -> Vec<Task> {
    tasks
        .iter()
        .enumerate()
        .map(|(i, t)| assign_color(t, i, palette))
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assigns_by_index() {
        let task = Task::new("PER");
        assert_eq!(assign_color(&task, 1, DEFAULT_PALETTE).color.as_deref(), Some("#2196F3"));
        assert!(task.color.is_none());
    }

    #[test]
    fn test_palette_cycles() {
        let palette = ["red", "blue"];
        assert_eq!(assign_color(&Task::new("A"), 5, &palette).color.as_deref(), Some("blue"));
    }

    #[test]
    fn test_explicit_color_kept() {
        let task = Task::new("LOC").with_color("#000000");
        assert_eq!(assign_color(&task, 0, DEFAULT_PALETTE).color.as_deref(), Some("#000000"));
    }

    #[test]
    fn test_empty_color_replaced() {
        let task = Task::new("LOC").with_color("");
        assert_eq!(assign_color(&task, 0, &["teal"]).color.as_deref(), Some("teal"));
    }

    #[test]
    fn test_empty_palette() {
        let palette: [&str; 0] = [];
        assert!(assign_color(&Task::new("A"), 0, &palette).color.is_none());
    }

    #[test]
    fn test_assign_colors_and_extra_fields() {
        let tasks: Vec<Task> = serde_json::from_value(json!([
            { "value": "PER", "type": "NER" },
            { "value": "LOC", "color": "#123456" }
        ]))
        .unwrap();
        let colored = assign_colors(&tasks, &["a", "b"]);
        assert_eq!(colored[0].color.as_deref(), Some("a"));
        assert_eq!(colored[0].extra.get("type"), Some(&json!("NER")));
        assert_eq!(colored[1].color.as_deref(), Some("#123456"));
    }
}
