//! Validation of untrusted question payloads.
//!
//! # Accepted shapes
//! ```json
//! [{ "id": "q1", "question": "...", "options": ["a", "b"],
//!    "correct_options": [0], "difficulty": "easy", "image": "https://..." }]
//! ```
//! or the same array wrapped as `{ "questions": [...] }`.

use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::error::{Result, ValidationError};
use crate::types::{Difficulty, Question};

/// Validate an already-parsed JSON value into questions.
///
/// Fails on the first invalid entry; nothing is partially accepted.
pub fn validate(raw: &Value) -> Result<Vec<Question>> {
    let entries = match raw {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("questions") {
            Some(Value::Array(items)) => items,
            _ => return Err(ValidationError::Shape),
        },
        _ => return Err(ValidationError::Shape),
    };

    let mut seen_ids = HashSet::new();
    let mut questions = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let question = validate_entry(entry, index)?;
        if !seen_ids.insert(question.id.clone()) {
            return Err(ValidationError::entry(question.id, "duplicate id"));
        }
        questions.push(question);
    }

    Ok(questions)
}

fn validate_entry(entry: &Value, index: usize) -> Result<Question> {
    let fields = entry
        .as_object()
        .ok_or_else(|| ValidationError::entry(format!("#{}", index), "entry is not an object"))?;

    let id = match fields.get("id") {
        Some(Value::String(id)) if !id.trim().is_empty() => id.clone(),
        _ => {
            return Err(ValidationError::entry(
                format!("#{}", index),
                "`id` must be a non-empty string",
            ))
        }
    };

    let question = required_string(fields, "question", &id)?;
    let options = string_array(fields, "options", &id)?;
    if options.len() < 2 {
        return Err(ValidationError::entry(id, "`options` needs at least 2 entries"));
    }

    let correct_options = index_array(fields, "correct_options", &id, options.len())?;

    let difficulty = match fields.get("difficulty") {
        Some(Value::String(label)) => Difficulty::from_label(label).ok_or_else(|| {
            ValidationError::entry(&id, format!("unknown difficulty `{}`", label))
        })?,
        _ => return Err(ValidationError::entry(id, "`difficulty` must be a string")),
    };

    let image = match fields.get("image") {
        None | Some(Value::Null) => None,
        Some(Value::String(uri)) => Some(uri.clone()),
        Some(_) => return Err(ValidationError::entry(id, "`image` must be a string")),
    };

    Ok(Question {
        id,
        question,
        options,
        correct_options,
        difficulty,
        image,
    })
}

fn required_string(fields: &Map<String, Value>, key: &str, id: &str) -> Result<String> {
    match fields.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(ValidationError::entry(id, format!("`{}` must be a string", key))),
    }
}

fn string_array(fields: &Map<String, Value>, key: &str, id: &str) -> Result<Vec<String>> {
    let items = fields
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| ValidationError::entry(id, format!("`{}` must be an array", key)))?;

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                ValidationError::entry(id, format!("`{}` must contain only strings", key))
            })
        })
        .collect()
}

fn index_array(
    fields: &Map<String, Value>,
    key: &str,
    id: &str,
    option_count: usize,
) -> Result<Vec<usize>> {
    let items = fields
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| ValidationError::entry(id, format!("`{}` must be an array", key)))?;

    if items.is_empty() {
        return Err(ValidationError::entry(id, format!("`{}` must not be empty", key)));
    }

    let mut indices = Vec::with_capacity(items.len());
    for item in items {
        let index = item.as_u64().ok_or_else(|| {
            ValidationError::entry(id, format!("`{}` must contain non-negative integers", key))
        })? as usize;
        if index >= option_count {
            return Err(ValidationError::entry(
                id,
                format!("correct option {} out of range for {} options", index, option_count),
            ));
        }
        if !indices.contains(&index) {
            indices.push(index);
        }
    }

    Ok(indices)
}
