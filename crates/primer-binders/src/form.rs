use std::collections::BTreeMap;
use std::fmt;

use primer_core::{Signal, signal};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Number(f64),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

pub type FieldSet = BTreeMap<String, FieldValue>;

/// The kind of input a change came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Raw value stored verbatim.
    Text,
    /// Only the checked flag is stored; the raw value is ignored.
    Checkbox { checked: bool },
    /// Parsed as a number; unparsable input is kept verbatim as text.
    Number,
}

/// Field-by-field form state, resettable to the mapping it was created with.
///
/// Field names are not validated: updating an unknown name adds it.
pub struct FormBinder {
    initial: FieldSet,
    values: Signal<FieldSet>,
}

impl FormBinder {
    pub fn new<K: Into<String>>(initial: impl IntoIterator<Item = (K, FieldValue)>) -> Self {
        let initial: FieldSet = initial.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            values: signal(initial.clone()),
            initial,
        }
    }

    pub fn update(&self, name: &str, raw: &str, kind: FieldKind) {
        let value = match kind {
            FieldKind::Text => FieldValue::Text(raw.to_string()),
            FieldKind::Checkbox { checked } => FieldValue::Bool(checked),
            FieldKind::Number => raw
                .trim()
                .parse::<f64>()
                .map(FieldValue::Number)
                .unwrap_or_else(|_| FieldValue::Text(raw.to_string())),
        };
        self.values.update(|values| {
            values.insert(name.to_string(), value);
        });
    }

    pub fn reset(&self) {
        self.values.set(self.initial.clone());
    }

    pub fn values(&self) -> FieldSet {
        self.values.get()
    }

    pub fn get(&self, name: &str) -> Option<FieldValue> {
        self.values.with(|v| v.get(name).cloned())
    }

    pub fn signal(&self) -> Signal<FieldSet> {
        self.values.clone()
    }

    /// JSON rendering of the current values, for display.
    pub fn to_json(&self) -> String {
        self.values
            .with(serde_json::to_string)
            .unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup() -> FormBinder {
        FormBinder::new([
            ("name", FieldValue::from("")),
            ("email", FieldValue::from("")),
            ("subscribe", FieldValue::from(false)),
        ])
    }

    #[test]
    fn text_and_checkbox_updates() {
        let form = signup();
        form.update("name", "Ada", FieldKind::Text);
        form.update("subscribe", "on", FieldKind::Checkbox { checked: true });

        assert_eq!(form.get("name"), Some(FieldValue::from("Ada")));
        assert_eq!(form.get("subscribe").and_then(|v| v.as_bool()), Some(true));
        assert_eq!(form.get("email"), Some(FieldValue::from("")));
    }

    #[test]
    fn unknown_field_is_added() {
        let form = signup();
        form.update("nickname", "ace", FieldKind::Text);
        assert_eq!(form.values().len(), 4);
    }

    #[test]
    fn number_fields_parse_or_keep_text() {
        let form = FormBinder::new([("age", FieldValue::from(25.0))]);
        form.update("age", " 31 ", FieldKind::Number);
        assert_eq!(form.get("age").and_then(|v| v.as_number()), Some(31.0));

        form.update("age", "thirty", FieldKind::Number);
        assert_eq!(form.get("age"), Some(FieldValue::from("thirty")));
    }

    #[test]
    fn reset_restores_seed() {
        let form = signup();
        let seed = form.values();
        form.update("name", "Ada", FieldKind::Text);
        form.update("extra", "x", FieldKind::Text);
        form.reset();
        assert_eq!(form.values(), seed);
    }

    #[test]
    fn json_view_is_plain_object() {
        let form = signup();
        form.update("name", "Ada", FieldKind::Text);
        assert_eq!(
            form.to_json(),
            r#"{"email":"","name":"Ada","subscribe":false}"#
        );
    }
}
