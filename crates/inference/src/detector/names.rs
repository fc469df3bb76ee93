// Class names as stored in the `names` metadata of exported YOLO models.
// Ultralytics writes a Python dict literal such as `{0: 'person', 1: 'bicycle'}`;
// other exporters write JSON, either an object keyed by id or a plain list.

use {super::types::fallback_name, std::collections::HashMap};

// ids beyond this are treated as garbage rather than allocating a huge table
const MAX_CLASSES: usize = 100_000;

/// Parse a `names` table into a list indexed by class id. Missing ids get a
/// `class<N>` placeholder; unparseable entries are skipped.
pub fn parse_names(raw: &str) -> Vec<String> {
    let json_object = serde_json::from_str::<HashMap<String, String>>(raw);
    let entries: Vec<(usize, String)> = if let Ok(map) = json_object {
        map.into_iter()
            .filter_map(|(key, name)| Some((key.trim().parse::<usize>().ok()?, name)))
            .collect()
    } else if let Ok(list) = serde_json::from_str::<Vec<String>>(raw) {
        list.into_iter().enumerate().collect()
    } else {
        parse_python_dict(raw)
    };

    let entries: Vec<(usize, String)> = entries
        .into_iter()
        .filter(|(id, _)| *id < MAX_CLASSES)
        .collect();
    let len = entries.iter().map(|(id, _)| id + 1).max().unwrap_or(0);
    let mut names: Vec<String> = (0..len).map(fallback_name).collect();
    for (id, name) in entries {
        names[id] = name;
    }
    names
}

fn parse_python_dict(raw: &str) -> Vec<(usize, String)> {
    let body = raw.trim();
    let body = body.strip_prefix('{').unwrap_or(body);
    let body = body.strip_suffix('}').unwrap_or(body);

    split_entries(body)
        .into_iter()
        .filter_map(|entry| {
            let (key, value) = entry.split_once(':')?;
            let id = unquote(key.trim()).parse::<usize>().ok()?;
            Some((id, unquote(value.trim()).to_string()))
        })
        .collect()
}

// split on commas outside quotes
fn split_entries(body: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match (quote, c) {
            (None, '\'' | '"') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, ',') => {
                entries.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&body[start..]);
    entries.into_iter().filter(|e| !e.trim().is_empty()).collect()
}

fn unquote(s: &str) -> &str {
    for q in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(q) && s.ends_with(q) {
            return &s[1..s.len() - 1];
        }
    }
    s
}
