use serde::{Deserialize, Serialize};
use shared_types::{GeoBounds, GeoPoint, MarkerIcon, ResourceRecord};
use std::collections::HashMap;

/// One record's line in a marker popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerEntry {
    pub record_id: String,
    pub name: String,
    pub category: String,
    pub hours: String,
    pub phone: String,
    pub web_link: String,
}

impl From<&ResourceRecord> for MarkerEntry {
    fn from(record: &ResourceRecord) -> Self {
        Self {
            record_id: record.id.clone(),
            name: record.name.clone(),
            category: record.category.to_string(),
            hours: record.hours_for_display().to_string(),
            phone: record.phone.clone(),
            web_link: record.web_link.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub key: String,
    pub address: String,
    pub position: GeoPoint,
    pub icon: MarkerIcon,
    pub entries: Vec<MarkerEntry>,
}

/// Markers keyed by address, so sites sharing a building share a pin.
#[derive(Debug, Clone, Default)]
pub struct MarkerRegistry {
    markers: Vec<MapMarker>,
    by_key: HashMap<String, usize>,
}

pub fn address_key(record: &ResourceRecord) -> String {
    let address = record.address.trim().to_lowercase();
    if address.is_empty() {
        format!("id:{}", record.id)
    } else {
        address
    }
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the marker for the record's address or adds the record to the
    /// existing one. Upserting the same record twice is a no-op. Records that
    /// cannot be placed are ignored.
    pub fn upsert(&mut self, record: &ResourceRecord) -> Option<&MapMarker> {
        let position = record.position()?;
        let key = address_key(record);

        let index = match self.by_key.get(&key) {
            Some(&index) => {
                let marker = &mut self.markers[index];
                if !marker.entries.iter().any(|e| e.record_id == record.id) {
                    marker.entries.push(MarkerEntry::from(record));
                }
                index
            }
            None => {
                self.markers.push(MapMarker {
                    key: key.clone(),
                    address: record.address.clone(),
                    position,
                    icon: record.icon,
                    entries: vec![MarkerEntry::from(record)],
                });
                self.by_key.insert(key, self.markers.len() - 1);
                self.markers.len() - 1
            }
        };
        self.markers.get(index)
    }

    pub fn rebuild(&mut self, records: &[ResourceRecord]) {
        self.clear();
        for record in records {
            self.upsert(record);
        }
    }

    pub fn clear(&mut self) {
        self.markers.clear();
        self.by_key.clear();
    }

    pub fn get(&self, key: &str) -> Option<&MapMarker> {
        self.by_key.get(key).and_then(|&i| self.markers.get(i))
    }

    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::enclosing(self.markers.iter().map(|m| m.position))
    }
}
