use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct GeoPoint {
    pub lat: f64,
    pub long: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct GeoBounds {
    pub north_east: GeoPoint,
    pub south_west: GeoPoint,
}

impl GeoBounds {
    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn enclosing(points: impl IntoIterator<Item = GeoPoint>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => GeoBounds {
                    north_east: p,
                    south_west: p,
                },
                Some(b) => GeoBounds {
                    north_east: GeoPoint::new(b.north_east.lat.max(p.lat), b.north_east.long.max(p.long)),
                    south_west: GeoPoint::new(b.south_west.lat.min(p.lat), b.south_west.long.min(p.long)),
                },
            })
        })
    }
}

/// Declared type of an upstream feed; selects the column table used to read its rows.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Pantry,
    School,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Pantry => "pantry",
            ResourceType::School => "school",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum Category {
    FoodPantry,
    MealSites,
    SchoolMealPickup,
    Other(String),
}

impl Category {
    pub const KNOWN: [Category; 3] = [
        Category::FoodPantry,
        Category::MealSites,
        Category::SchoolMealPickup,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::FoodPantry => "Food Pantry",
            Category::MealSites => "Meal Sites",
            Category::SchoolMealPickup => "School Meal Pickup",
            Category::Other(label) => label,
        }
    }

    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::KNOWN
            .into_iter()
            .find(|known| known.as_str().eq_ignore_ascii_case(label))
            .unwrap_or_else(|| Category::Other(label.to_string()))
    }

    pub fn icon(&self) -> MarkerIcon {
        match self {
            Category::FoodPantry => MarkerIcon::Grocery,
            Category::MealSites => MarkerIcon::Restaurant,
            Category::SchoolMealPickup => MarkerIcon::Utensils,
            Category::Other(_) => MarkerIcon::Star,
        }
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::from_label(&label)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerIcon {
    Grocery,
    Restaurant,
    Utensils,
    Star,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResourceRecord {
    pub id: String,
    pub category: Category,
    pub name: String,
    pub county: String,
    pub town: String,
    pub address: String,
    pub phone: String,
    pub last_updated: String,
    pub hours_of_operation: String,
    pub special_hours_of_operation: Option<String>,
    pub operational_notes: String,
    pub special_notes: Option<String>,
    pub web_link: String,
    pub web_link2: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: bool,
    pub icon: MarkerIcon,
}

impl ResourceRecord {
    /// Map position, present only when both coordinates are finite.
    pub fn position(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(long)) if lat.is_finite() && long.is_finite() => {
                Some(GeoPoint::new(lat, long))
            }
            _ => None,
        }
    }

    pub fn hours_for_display(&self) -> &str {
        self.special_hours_of_operation
            .as_deref()
            .filter(|hours| !hours.trim().is_empty())
            .unwrap_or(&self.hours_of_operation)
    }
}

/// Raw rows exactly as the data service returned them, grouped by declared type.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct FoodResourceFeed {
    pub pantries: Vec<Value>,
    pub schools: Vec<Value>,
}
