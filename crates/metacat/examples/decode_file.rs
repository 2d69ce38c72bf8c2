//! Simple decoder to inspect entity envelope dumps.
//!
//! Reads a JSON file containing one envelope or an array of envelopes and
//! prints a summary of each decoded asset.

use std::fs;

use metacat::model::{AttrValue, FieldState};
use metacat::registry::TypeRegistry;
use metacat::serde::SerdeContext;
use metacat::translate::StaticTranslator;

fn format_value(v: &AttrValue) -> String {
    match v {
        AttrValue::Text(s) => {
            let preview: String = s.chars().take(80).collect();
            if s.len() > 80 {
                format!("\"{}...\"", preview)
            } else {
                format!("\"{}\"", preview)
            }
        }
        AttrValue::Bool(b) => format!("{}", b),
        AttrValue::Int(i) => format!("{}", i),
        AttrValue::Float(f) => format!("{:.6}", f),
        AttrValue::List(items) => format!("LIST[{}]", items.len()),
        AttrValue::Set(items) => format!("SET[{}]", items.len()),
        AttrValue::Map(entries) => format!("MAP[{}]", entries.len()),
        AttrValue::Struct(s) => format!("STRUCT({})", s.type_name),
        AttrValue::Relation(r) => match (&r.guid, &r.unique_attributes) {
            (Some(guid), _) => format!("REF({} {})", r.type_name, guid),
            (None, Some(unique)) => format!("REF({} {:?})", r.type_name, unique.keys()),
            (None, None) => format!("REF({})", r.type_name),
        },
    }
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "entities.json".to_string());

    println!("Reading: {}", path);
    let data = fs::read_to_string(&path).expect("Failed to read file");
    let parsed: serde_json::Value = serde_json::from_str(&data).expect("Failed to parse JSON");

    let envelopes: Vec<serde_json::Value> = match parsed {
        serde_json::Value::Array(items) => items,
        single => vec![single],
    };
    println!("Envelopes: {}", envelopes.len());

    // A dump decoded without a live lookup service: hashed tag and custom
    // metadata IDs will only resolve if registered here.
    let translator = StaticTranslator::new();
    let ctx = SerdeContext::new(TypeRegistry::builtin(), &translator);

    for (i, envelope) in envelopes.iter().enumerate() {
        let asset = match ctx.deserialize_asset(envelope) {
            Ok(asset) => asset,
            Err(e) => {
                println!("[{}] FAILED: {}", i, e);
                continue;
            }
        };

        println!("\n=== [{}] {} ===", i, asset.type_name);
        if let Some(guid) = &asset.guid {
            println!("GUID: {}", guid);
        }
        if let Some(status) = asset.status {
            println!("Status: {}", status.as_wire());
        }
        if let Some(rel_guid) = &asset.relationship_guid {
            println!("Reference-shaped envelope, relationshipGuid: {}", rel_guid);
            continue;
        }

        let mut fields: Vec<_> = asset.fields().collect();
        fields.sort_by_key(|(name, _)| *name);
        println!("Fields ({}):", fields.len());
        for (name, state) in fields.iter().take(20) {
            match state {
                FieldState::Cleared => println!("  {} = <cleared>", name),
                FieldState::Present(value) => println!("  {} = {}", name, format_value(value)),
            }
        }
        if fields.len() > 20 {
            println!("  ... and {} more fields", fields.len() - 20);
        }

        if !asset.tags.is_empty() {
            println!("Tags: {:?}", asset.tags.iter().map(|t| &t.type_name).collect::<Vec<_>>());
        }
        if !asset.custom_metadata.is_empty() {
            println!("Custom metadata sets: {:?}", asset.custom_metadata.keys().collect::<Vec<_>>());
        }
        if !asset.unmapped.is_empty() {
            println!("Unmapped attributes: {:?}", asset.unmapped.keys().collect::<Vec<_>>());
        }
    }
}
