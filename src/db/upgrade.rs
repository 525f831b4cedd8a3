//! Versioned upgrades of the stored JSON document.
//!
//! Documents written before versioning carry no `version` field and are
//! treated as version 1. Upgrades run on the raw JSON, before it is decoded
//! into a [`Document`](crate::models::Document), so shapes the current types
//! cannot express (the flat limit map) can still be read.

use anyhow::{anyhow, Result};
use chrono::Month;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::models::{month_name, CategoryLimits, CATEGORIES, DOCUMENT_VERSION};

type UpgradeStep = fn(&mut Map<String, Value>, Month) -> Result<()>;

/// Upgrades from version N to N+1.
/// Each entry is (from_version, step).
const UPGRADES: &[(u32, UpgradeStep)] = &[(1, month_keyed_limits)];

/// Bring a raw document up to [`DOCUMENT_VERSION`]. `now` is the month that
/// legacy limits get filed under. Returns whether anything ran.
pub(crate) fn upgrade(value: &mut Value, now: Month) -> Result<bool> {
    let doc = value
        .as_object_mut()
        .ok_or_else(|| anyhow!("Stored document is not a JSON object"))?;

    let stored = stored_version(doc);
    if stored > DOCUMENT_VERSION {
        warn!(stored, "document written by a newer version");
    }
    if stored >= DOCUMENT_VERSION {
        return Ok(false);
    }

    for &(from_version, step) in UPGRADES {
        if stored <= from_version {
            step(doc, now)?;
        }
    }
    doc.insert("version".into(), Value::from(DOCUMENT_VERSION));
    info!(from = stored, to = DOCUMENT_VERSION, "document upgraded");
    Ok(true)
}

fn stored_version(doc: &Map<String, Value>) -> u32 {
    doc.get("version")
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(1)
}

/// Version 1 -> 2.
///
/// Older documents kept a single flat `category -> limit` map. Numeric entries
/// of `categoryLimits` are lifted into the `now` month, merged over a zeroed
/// category set, and that month's budget becomes their sum. The legacy global
/// `budget` is zeroed. Missing top-level collections are created and the id
/// counter is seeded past the largest id in use, when there is room for one.
///
/// Applying this step to an already month-keyed document changes nothing.
pub(crate) fn month_keyed_limits(doc: &mut Map<String, Value>, now: Month) -> Result<()> {
    let mut limits = take_object(doc, "categoryLimits");
    let mut budgets = take_object(doc, "monthlyBudget");

    let flat: Vec<(String, Decimal)> = limits
        .iter()
        .filter(|(_, v)| v.is_number())
        .map(|(k, v)| -> Result<(String, Decimal)> {
            Ok((k.clone(), serde_json::from_value(v.clone())?))
        })
        .collect::<Result<_>>()?;

    if !flat.is_empty() {
        let month = month_name(now);
        let mut merged: CategoryLimits = CATEGORIES
            .iter()
            .map(|c| (c.to_string(), Decimal::ZERO))
            .collect();
        if let Some(existing) = limits.get(month).filter(|v| v.is_object()) {
            let existing: CategoryLimits = serde_json::from_value(existing.clone())?;
            merged.extend(existing);
        }
        merged.extend(flat.iter().cloned());
        let total: Decimal = merged.values().copied().sum();

        for (category, _) in &flat {
            limits.remove(category);
        }
        limits.insert(month.into(), serde_json::to_value(&merged)?);
        budgets.insert(month.into(), serde_json::to_value(total)?);
        doc.insert("budget".into(), serde_json::to_value(Decimal::ZERO)?);
        info!(month, %total, categories = flat.len(), "legacy category limits moved to month");
    }

    doc.insert("categoryLimits".into(), Value::Object(limits));
    doc.insert("monthlyBudget".into(), Value::Object(budgets));
    if !doc.get("expenses").is_some_and(Value::is_array) {
        doc.insert("expenses".into(), Value::Array(Vec::new()));
    }

    let max_id = doc
        .get("expenses")
        .and_then(Value::as_array)
        .and_then(|expenses| {
            expenses
                .iter()
                .filter_map(|e| e.get("id").and_then(Value::as_u64))
                .max()
        })
        .unwrap_or(0);
    let next_id = doc.get("nextId").and_then(Value::as_u64).unwrap_or(0);
    match max_id.checked_add(1) {
        Some(first_free) => {
            doc.insert("nextId".into(), Value::from(next_id.max(first_free)));
        }
        // Adding expenses will fail; reading and deleting still work.
        None => warn!(max_id, "no expense ids left above the largest id in use"),
    }
    Ok(())
}

/// Remove the object stored under `key`. Missing, null and non-object values
/// come back as an empty map.
fn take_object(doc: &mut Map<String, Value>, key: &str) -> Map<String, Value> {
    match doc.remove(key) {
        Some(Value::Object(map)) => map,
        Some(Value::Null) | None => Map::new(),
        Some(other) => {
            warn!(key, value = %other, "replacing non-object value");
            Map::new()
        }
    }
}

#[cfg(test)]
#[path = "upgrade_tests.rs"]
mod tests;
