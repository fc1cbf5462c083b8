use serde_json::{Map, Value};

/// Turns a spreadsheet `values` grid (header row first) into row objects.
///
/// Short rows are padded with nulls and rows with no non-blank cell are
/// dropped. Columns with an empty header are ignored.
pub fn rows_from_values(values: &[Vec<Value>]) -> Vec<Value> {
    let Some((header, body)) = values.split_first() else {
        return Vec::new();
    };
    let headers: Vec<Option<String>> = header
        .iter()
        .map(|h| h.as_str().map(str::trim).filter(|h| !h.is_empty()).map(String::from))
        .collect();

    body.iter()
        .filter(|cells| cells.iter().any(|c| crate::normalize::cell_text(c).is_some()))
        .map(|cells| {
            let row: Map<String, Value> = headers
                .iter()
                .enumerate()
                .filter_map(|(i, h)| {
                    let h = h.as_ref()?;
                    Some((h.clone(), cells.get(i).cloned().unwrap_or(Value::Null)))
                })
                .collect();
            Value::Object(row)
        })
        .collect()
}

/// Accepts either a plain array of row objects or an object carrying a
/// `values` grid, which is how sheet exports arrive.
pub fn rows_from_payload(payload: Value) -> Option<Vec<Value>> {
    match payload {
        Value::Array(rows) => Some(rows),
        Value::Object(mut obj) => match obj.remove("values")? {
            Value::Array(grid) => {
                let grid: Vec<Vec<Value>> = grid
                    .into_iter()
                    .map(|r| match r {
                        Value::Array(cells) => cells,
                        _ => Vec::new(),
                    })
                    .collect();
                Some(rows_from_values(&grid))
            }
            _ => None,
        },
        _ => None,
    }
}
