use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use serde_json::{Map, Value};

static ENGLISH_TEMPLATE: LazyLock<Value> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../../assets/form_template.en.json"))
        .expect("bundled English form template is valid JSON")
});

static HEBREW_TEMPLATE: LazyLock<Value> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../../assets/form_template.he.json"))
        .expect("bundled Hebrew form template is valid JSON")
});

/// Language of the extracted form, which decides the expected key set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormLanguage {
    English,
    Hebrew,
}

impl FormLanguage {
    /// Hebrew when any key of the extracted form contains Hebrew script.
    pub fn detect(form: &Value) -> Self {
        let hebrew = flatten_json(form).keys().any(|k| contains_hebrew(k));
        if hebrew { Self::Hebrew } else { Self::English }
    }

    pub fn template(&self) -> &'static Value {
        match self {
            Self::English => &ENGLISH_TEMPLATE,
            Self::Hebrew => &HEBREW_TEMPLATE,
        }
    }
}

pub fn contains_hebrew(text: &str) -> bool {
    text.chars().any(|c| ('\u{0590}'..='\u{05FF}').contains(&c))
}

/// Replaces gershayim and single quotes in keys with a plain double quote, recursively.
pub fn normalize_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.replace(['״', '\''], "\""), normalize_keys(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(normalize_keys).collect()),
        other => other.clone(),
    }
}

/// Flattens nested objects into dotted keys. Non-object input yields an empty map.
pub fn flatten_json(value: &Value) -> BTreeMap<String, Value> {
    let mut items = BTreeMap::new();
    if let Value::Object(map) = value {
        flatten_into(map, "", &mut items);
    }
    items
}

fn flatten_into(map: &Map<String, Value>, parent: &str, out: &mut BTreeMap<String, Value>) {
    for (key, value) in map {
        let full_key = if parent.is_empty() {
            key.clone()
        } else {
            format!("{parent}.{key}")
        };
        match value {
            Value::Object(nested) => flatten_into(nested, &full_key, out),
            other => {
                out.insert(full_key, other.clone());
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldMismatch {
    pub expected: Value,
    pub actual: Value,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroundTruthReport {
    pub accuracy: f64,
    pub completeness: f64,
    pub missing_fields: Vec<String>,
    pub mismatched_fields: BTreeMap<String, FieldMismatch>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicReport {
    pub completeness: f64,
    pub missing_fields: Vec<String>,
    pub invalid_fields: BTreeMap<String, String>,
}

pub fn validate_with_ground_truth(extracted: &Value, ground_truth: &Value) -> GroundTruthReport {
    let flat_extracted = flatten_json(&normalize_keys(extracted));
    let flat_truth = flatten_json(&normalize_keys(ground_truth));

    let total = flat_truth.len();
    let missing_fields: Vec<String> = flat_truth
        .keys()
        .filter(|k| !flat_extracted.contains_key(*k))
        .cloned()
        .collect();

    let empty = Value::String(String::new());
    let mut correct = 0usize;
    let mut mismatched_fields = BTreeMap::new();

    for (key, expected) in &flat_truth {
        let actual = flat_extracted.get(key).unwrap_or(&empty);
        if actual == expected {
            correct += 1;
        } else {
            mismatched_fields.insert(
                key.clone(),
                FieldMismatch {
                    expected: expected.clone(),
                    actual: actual.clone(),
                },
            );
        }
    }

    GroundTruthReport {
        accuracy: percentage(correct, total),
        completeness: percentage(total - missing_fields.len(), total),
        missing_fields,
        mismatched_fields,
    }
}

/// Completeness against `template` plus plausibility checks on dates, ids and phones.
pub fn validate_dynamic(extracted: &Value, template: &Value) -> DynamicReport {
    let flat_extracted = flatten_json(&normalize_keys(extracted));
    let expected_keys: BTreeSet<String> = flatten_json(&normalize_keys(template))
        .into_keys()
        .collect();

    let missing_fields: Vec<String> = expected_keys
        .iter()
        .filter(|k| !flat_extracted.contains_key(*k))
        .cloned()
        .collect();

    let mut invalid_fields = BTreeMap::new();
    for (field, value) in &flat_extracted {
        let Some(value) = value.as_str().filter(|v| !v.is_empty()) else {
            continue;
        };
        if let Some(reason) = check_field(field, value) {
            invalid_fields.insert(field.clone(), reason.to_string());
        }
    }

    let total = expected_keys.len();
    DynamicReport {
        completeness: percentage(total - missing_fields.len(), total),
        missing_fields,
        invalid_fields,
    }
}

fn check_field(field: &str, value: &str) -> Option<&'static str> {
    let leaf = field.rsplit('.').next().unwrap_or(field);
    let is_date = field.contains("תאריך") || field.to_lowercase().contains("date");

    if is_date {
        let is_day = leaf == "יום" || leaf == "day";
        let is_month = leaf == "חודש" || leaf == "month";
        let is_year = leaf == "שנה" || leaf == "year";

        if is_day || is_month {
            let Some(number) = parse_digits(value) else {
                return Some("Invalid day or month value");
            };
            if number == 0 {
                return Some("Invalid day or month value");
            }
            if is_month && number > 12 {
                return Some("Invalid month value");
            }
        } else if is_year && (parse_digits(value).is_none() || value.chars().count() != 4) {
            return Some("Invalid year value");
        }
        return None;
    }

    match leaf {
        "מספר זהות" | "idNumber" if !(is_digits(value) && value.len() == 9) => {
            Some("Invalid ID number")
        }
        "טלפון נייד" | "mobilePhone" if !(is_digits(value) && matches!(value.len(), 9 | 10)) => {
            Some("Invalid phone number")
        }
        _ => None,
    }
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

fn parse_digits(value: &str) -> Option<u64> {
    if is_digits(value) { value.parse().ok() } else { None }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}
