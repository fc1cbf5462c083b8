use serde_json::{Map, Value};
use shared_types::{Category, ResourceRecord, ResourceType};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::columns::{resolve_header, Field};
use crate::error::DirectoryError;

/// Text of a spreadsheet cell. Numbers and booleans are stringified, blank
/// strings and nulls count as missing.
pub fn cell_text(val: &Value) -> Option<String> {
    let text = match val {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Anything other than a literal "false" (any case) is active, including a
/// missing cell.
pub fn parse_is_active(val: Option<&Value>) -> bool {
    match val {
        Some(Value::Bool(active)) => *active,
        Some(Value::String(s)) => !s.trim().eq_ignore_ascii_case("false"),
        _ => true,
    }
}

pub fn parse_coordinate(val: Option<&Value>) -> Option<f64> {
    let parsed = match val? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|c| c.is_finite())
}

/// Picks, for every field, the cell under its most preferred header that has
/// a value.
fn collect_cells(row: &Map<String, Value>, kind: ResourceType) -> HashMap<Field, &Value> {
    let mut best: HashMap<Field, (usize, &Value)> = HashMap::new();
    for (header, val) in row {
        let Some((field, rank)) = resolve_header(kind, header) else {
            continue;
        };
        if val.is_null() || cell_text(val).is_none() {
            continue;
        }
        let preferred = best.get(&field).map_or(true, |(current, _)| rank < *current);
        if preferred {
            best.insert(field, (rank, val));
        }
    }
    best.into_iter().map(|(field, (_, val))| (field, val)).collect()
}

pub fn normalize_row(
    row: &Value,
    kind: ResourceType,
    index: usize,
) -> Result<ResourceRecord, DirectoryError> {
    let obj = row.as_object().ok_or(DirectoryError::InvalidRow { index })?;
    let cells = collect_cells(obj, kind);

    let text = |field: Field| cells.get(&field).and_then(|v| cell_text(v));
    let required = |field: Field| text(field).unwrap_or_default();

    let category = match (text(Field::Category), kind) {
        (Some(label), _) => Category::from_label(&label),
        (None, ResourceType::School) => Category::SchoolMealPickup,
        (None, ResourceType::Pantry) => Category::Other(String::new()),
    };
    let icon = category.icon();

    // Both feeds number their rows independently, so source ids are scoped to
    // the feed. Generated ids use `-` and can never collide with them.
    let id = match text(Field::Id) {
        Some(id) => format!("{}:{}", kind.as_str(), id),
        None => format!("{}-{}", kind.as_str(), index),
    };

    Ok(ResourceRecord {
        id,
        category,
        name: required(Field::Name),
        county: required(Field::County),
        town: required(Field::Town),
        address: required(Field::Address),
        phone: required(Field::Phone),
        last_updated: required(Field::LastUpdated),
        hours_of_operation: required(Field::HoursOfOperation),
        special_hours_of_operation: text(Field::SpecialHoursOfOperation),
        operational_notes: required(Field::OperationalNotes),
        special_notes: text(Field::SpecialNotes),
        web_link: required(Field::WebLink),
        web_link2: text(Field::WebLink2),
        latitude: parse_coordinate(cells.get(&Field::Latitude).copied()),
        longitude: parse_coordinate(cells.get(&Field::Longitude).copied()),
        is_active: parse_is_active(cells.get(&Field::IsActive).copied()),
        icon,
    })
}

/// Normalizes every row of one feed, skipping rows that are not objects.
pub fn normalize_rows(rows: &[Value], kind: ResourceType) -> Vec<ResourceRecord> {
    let records: Vec<ResourceRecord> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| match normalize_row(row, kind, index) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, kind = kind.as_str(), "Skipping malformed row");
                None
            }
        })
        .collect();

    debug!(
        kind = kind.as_str(),
        rows = rows.len(),
        records = records.len(),
        unplaceable = records.iter().filter(|r| r.position().is_none()).count(),
        "Normalized feed"
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared_types::MarkerIcon;

    #[test]
    fn only_literal_false_is_inactive() {
        for inactive in ["false", "FALSE", " False ", "\tfalse\n"] {
            assert!(!parse_is_active(Some(&json!(inactive))), "{inactive:?}");
        }
        assert!(!parse_is_active(Some(&json!(false))));

        for active in [json!("true"), json!("TRUE"), json!(""), json!("no"), json!(0), json!(null)] {
            assert!(parse_is_active(Some(&active)), "{active:?}");
        }
        assert!(parse_is_active(None));
    }

    #[test]
    fn coordinates_parse_from_strings_and_numbers() {
        assert_eq!(parse_coordinate(Some(&json!(" 41.1 "))), Some(41.1));
        assert_eq!(parse_coordinate(Some(&json!(-73.25))), Some(-73.25));
        assert_eq!(parse_coordinate(Some(&json!("n/a"))), None);
        assert_eq!(parse_coordinate(Some(&json!("NaN"))), None);
        assert_eq!(parse_coordinate(Some(&json!("inf"))), None);
        assert_eq!(parse_coordinate(None), None);
    }

    #[test]
    fn pantry_row_uses_legacy_headers() {
        let row = json!({
            "ID": 17,
            "Category": "Food Pantry",
            "Agency Name": "  Grace Church Pantry ",
            "City": "Hartford",
            "County": "Hartford",
            "Street Address": "12 Main St",
            "Hours": "Tue 9-12",
            "Special Hours": "",
            "Website": "https://example.org",
            "Lat": "41.76",
            "Lng": "-72.67",
        });

        let record = normalize_row(&row, ResourceType::Pantry, 0).unwrap();
        assert_eq!(record.id, "pantry:17");
        assert_eq!(record.category, Category::FoodPantry);
        assert_eq!(record.icon, MarkerIcon::Grocery);
        assert_eq!(record.name, "Grace Church Pantry");
        assert_eq!(record.town, "Hartford");
        assert_eq!(record.address, "12 Main St");
        assert_eq!(record.special_hours_of_operation, None);
        assert_eq!(record.hours_for_display(), "Tue 9-12");
        assert!(record.is_active);
        assert!(record.position().is_some());
    }

    #[test]
    fn preferred_header_wins_over_alias() {
        let row = json!({ "Notes": "alias", "OperationalNotes": "canonical" });
        let record = normalize_row(&row, ResourceType::Pantry, 3).unwrap();
        assert_eq!(record.operational_notes, "canonical");
        assert_eq!(record.id, "pantry-3");
    }

    #[test]
    fn school_rows_default_their_category() {
        let row = json!({
            "School Name": "Bulkeley High",
            "District": "Hartford",
            "Pickup Times": "Mon-Fri 11-1",
            "Latitude": "41.74",
            "Longitude": "-72.69",
        });

        let record = normalize_row(&row, ResourceType::School, 5).unwrap();
        assert_eq!(record.category, Category::SchoolMealPickup);
        assert_eq!(record.icon, MarkerIcon::Utensils);
        assert_eq!(record.name, "Bulkeley High");
        assert_eq!(record.town, "Hartford");
        assert_eq!(record.hours_of_operation, "Mon-Fri 11-1");
        assert_eq!(record.id, "school-5");
    }

    #[test]
    fn unknown_category_gets_star_and_bad_coordinates_are_unplaceable() {
        let row = json!({ "Category": "Shelter", "Latitude": "", "Longitude": "-72.1" });
        let record = normalize_row(&row, ResourceType::Pantry, 0).unwrap();
        assert_eq!(record.icon, MarkerIcon::Star);
        assert_eq!(record.latitude, None);
        assert_eq!(record.position(), None);
    }

    #[test]
    fn blank_active_column_falls_through_to_alias() {
        let row = json!({ "IsActive": "", "Active": "false" });
        assert!(!normalize_row(&row, ResourceType::Pantry, 0).unwrap().is_active);

        let row = json!({ "IsActive": " ", "Is Active": null });
        assert!(normalize_row(&row, ResourceType::Pantry, 0).unwrap().is_active);

        let row = json!({ "IsActive": "TRUE", "Active": "false" });
        assert!(normalize_row(&row, ResourceType::Pantry, 0).unwrap().is_active);
    }

    #[test]
    fn known_category_labels_are_canonicalized() {
        let shouted = normalize_row(&json!({ "Category": "FOOD PANTRY" }), ResourceType::Pantry, 0).unwrap();
        assert_eq!(shouted.category, Category::FoodPantry);
        assert_eq!(shouted.category.as_str(), "Food Pantry");

        let unknown = normalize_row(&json!({ "Category": "mobile PANTRY" }), ResourceType::Pantry, 1).unwrap();
        assert_eq!(unknown.category.as_str(), "mobile PANTRY");
    }

    #[test]
    fn source_ids_are_scoped_to_their_feed() {
        let pantry = normalize_row(&json!({ "Id": "1" }), ResourceType::Pantry, 0).unwrap();
        let school = normalize_row(&json!({ "Id": 1 }), ResourceType::School, 0).unwrap();
        let generated = normalize_row(&json!({}), ResourceType::Pantry, 1).unwrap();

        assert_eq!(pantry.id, "pantry:1");
        assert_eq!(school.id, "school:1");
        assert_eq!(generated.id, "pantry-1");
        assert_ne!(pantry.id, school.id);
    }

    #[test]
    fn non_object_rows_are_skipped() {
        let rows = vec![json!(["a", "b"]), json!({ "Name": "Kept" }), json!(null)];
        let records = normalize_rows(&rows, ResourceType::Pantry);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Kept");
        assert_eq!(records[0].id, "pantry-1");
    }
}
