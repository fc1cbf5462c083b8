//! Source column names for every canonical record field.
//!
//! Upstream spreadsheets have been re-shaped several times, so each field
//! lists the column headers it may arrive under, most preferred first. When a
//! data source changes its schema this table is the only thing to edit.
//! Header matching is case-insensitive and ignores surrounding whitespace.

use once_cell::sync::Lazy;
use shared_types::ResourceType;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Category,
    Name,
    County,
    Town,
    Address,
    Phone,
    LastUpdated,
    HoursOfOperation,
    SpecialHoursOfOperation,
    OperationalNotes,
    SpecialNotes,
    WebLink,
    WebLink2,
    Latitude,
    Longitude,
    IsActive,
}

pub type ColumnTable = &'static [(Field, &'static [&'static str])];

pub const PANTRY_COLUMNS: ColumnTable = &[
    (Field::Id, &["Id", "ID", "Record Id"]),
    (Field::Category, &["Category", "Type", "Resource Type"]),
    (Field::Name, &["Name", "Agency", "Agency Name", "Program Name"]),
    (Field::County, &["County"]),
    (Field::Town, &["Town", "City"]),
    (Field::Address, &["Address", "Street Address", "Location"]),
    (Field::Phone, &["Phone", "Phone Number", "Contact Phone"]),
    (Field::LastUpdated, &["LastUpdated", "Last Updated", "Updated"]),
    (Field::HoursOfOperation, &["HoursOfOperation", "Hours of Operation", "Hours"]),
    (Field::SpecialHoursOfOperation, &["SpecialHoursOfOperation", "Special Hours of Operation", "Special Hours"]),
    (Field::OperationalNotes, &["OperationalNotes", "Operational Notes", "Notes"]),
    (Field::SpecialNotes, &["SpecialNotes", "Special Notes"]),
    (Field::WebLink, &["WebLink", "Web Link", "Website"]),
    (Field::WebLink2, &["WebLink2", "Web Link 2", "Website 2"]),
    (Field::Latitude, &["Latitude", "Lat"]),
    (Field::Longitude, &["Longitude", "Lng", "Lon", "Long"]),
    (Field::IsActive, &["IsActive", "Is Active", "Active"]),
];

/// School meal sheets are keyed by school rather than agency and carry pickup
/// times instead of opening hours.
pub const SCHOOL_COLUMNS: ColumnTable = &[
    (Field::Id, &["Id", "ID", "Site Id"]),
    (Field::Category, &["Category", "Type"]),
    (Field::Name, &["School", "School Name", "Site Name", "Name"]),
    (Field::County, &["County"]),
    (Field::Town, &["Town", "City", "District"]),
    (Field::Address, &["Address", "Site Address", "Street Address"]),
    (Field::Phone, &["Phone", "Contact Phone"]),
    (Field::LastUpdated, &["LastUpdated", "Last Updated"]),
    (Field::HoursOfOperation, &["Meal Pickup Times", "Pickup Times", "Pickup Hours", "HoursOfOperation"]),
    (Field::SpecialHoursOfOperation, &["SpecialHoursOfOperation", "Special Pickup Times"]),
    (Field::OperationalNotes, &["Meal Notes", "Notes", "OperationalNotes"]),
    (Field::SpecialNotes, &["SpecialNotes", "Special Notes"]),
    (Field::WebLink, &["District Website", "Website", "WebLink"]),
    (Field::WebLink2, &["WebLink2", "Website 2"]),
    (Field::Latitude, &["Latitude", "Lat"]),
    (Field::Longitude, &["Longitude", "Lng", "Lon", "Long"]),
    (Field::IsActive, &["IsActive", "Active"]),
];

/// Lowercased header -> (field, alias rank). Lower rank wins.
type HeaderIndex = HashMap<String, (Field, usize)>;

fn build_index(table: ColumnTable) -> HeaderIndex {
    table
        .iter()
        .flat_map(|(field, aliases)| {
            aliases
                .iter()
                .enumerate()
                .map(move |(rank, alias)| (alias.to_lowercase(), (*field, rank)))
        })
        .collect()
}

static PANTRY_INDEX: Lazy<HeaderIndex> = Lazy::new(|| build_index(PANTRY_COLUMNS));
static SCHOOL_INDEX: Lazy<HeaderIndex> = Lazy::new(|| build_index(SCHOOL_COLUMNS));

/// Resolves a raw column header to the field it feeds, with its alias rank.
pub fn resolve_header(kind: ResourceType, header: &str) -> Option<(Field, usize)> {
    let index = match kind {
        ResourceType::Pantry => &*PANTRY_INDEX,
        ResourceType::School => &*SCHOOL_INDEX,
    };
    index.get(&header.trim().to_lowercase()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_are_unique_within_a_table() {
        for table in [PANTRY_COLUMNS, SCHOOL_COLUMNS] {
            let total: usize = table.iter().map(|(_, aliases)| aliases.len()).sum();
            assert_eq!(build_index(table).len(), total);
        }
    }

    #[test]
    fn headers_resolve_case_insensitively() {
        assert_eq!(
            resolve_header(ResourceType::Pantry, "  last updated "),
            Some((Field::LastUpdated, 1))
        );
        assert_eq!(
            resolve_header(ResourceType::School, "SCHOOL NAME"),
            Some((Field::Name, 1))
        );
        assert_eq!(resolve_header(ResourceType::Pantry, "School Name"), None);
    }
}
