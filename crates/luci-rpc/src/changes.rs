//! Pending (staged but uncommitted) UCI changes.

use std::fmt;

use luci_types::UciOption;
use serde_json::Value;

/// The kind of staged mutation, as spelled by `uci changes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOperation {
    Set,
    Add,
    Remove,
    Rename,
    ListAdd,
    ListDel,
    Order,
    Other(String),
}

impl ChangeOperation {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ChangeOperation::Set => "set",
            ChangeOperation::Add => "add",
            ChangeOperation::Remove => "remove",
            ChangeOperation::Rename => "rename",
            ChangeOperation::ListAdd => "list-add",
            ChangeOperation::ListDel => "list-del",
            ChangeOperation::Order => "order",
            ChangeOperation::Other(other) => other,
        }
    }
}

impl From<&str> for ChangeOperation {
    fn from(s: &str) -> Self {
        match s {
            "set" => ChangeOperation::Set,
            "add" => ChangeOperation::Add,
            "remove" => ChangeOperation::Remove,
            "rename" => ChangeOperation::Rename,
            "list-add" => ChangeOperation::ListAdd,
            "list-del" => ChangeOperation::ListDel,
            "order" => ChangeOperation::Order,
            other => ChangeOperation::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ChangeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One staged change to a config.
///
/// For `add` and section-level `set`, `option` holds the section type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub operation: ChangeOperation,
    pub section: String,
    pub option: Option<String>,
    pub value: Option<UciOption>,
}

impl Change {
    fn from_tuple(raw: &Value) -> Result<Self, String> {
        let Value::Array(fields) = raw else {
            return Err(format!("change record is not an array: {raw}"));
        };

        let text = |index: usize, name: &str| -> Result<Option<String>, String> {
            match fields.get(index) {
                None | Some(Value::Null) => Ok(None),
                Some(Value::String(s)) => Ok(Some(s.clone())),
                Some(other) => Err(format!("change {name} is not a string: {other}")),
            }
        };

        let operation = text(0, "operation")?.ok_or("change record has no operation")?;
        let section = text(1, "section")?.ok_or("change record has no section")?;
        let option = text(2, "option")?;
        let value = match fields.get(3) {
            None | Some(Value::Null) => None,
            Some(raw_value) => Some(
                UciOption::from_json(raw_value).map_err(|e| format!("change value: {e}"))?,
            ),
        };

        Ok(Self {
            operation: ChangeOperation::from(operation.as_str()),
            section,
            option,
            value,
        })
    }
}

/// Decode the result of a `changes` call for `config`.
///
/// The device answers with either a list of change tuples or an object keyed
/// by config name. Empty containers, `null`, and `false` all mean no changes.
pub(crate) fn parse_changes(config: &str, result: &Value) -> Result<Vec<Change>, String> {
    let records = match result {
        Value::Null | Value::Bool(false) => return Ok(Vec::new()),
        Value::Array(records) => records,
        Value::Object(by_config) => match by_config.get(config) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(records)) => records,
            Some(other) => return Err(format!("changes for {config:?} are not a list: {other}")),
        },
        other => return Err(format!("unexpected changes result: {other}")),
    };

    records.iter().map(Change::from_tuple).collect()
}
