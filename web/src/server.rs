use leptos::prelude::*;
use leptos::server;
use shared_types::{FoodResourceFeed, GeoPoint};

#[server]
pub async fn get_cities() -> Result<Vec<String>, ServerFnError> {
    use crate::data::{config::source_config, feed::load_cities};

    match load_cities(source_config()).await {
        Ok(cities) => Ok(cities),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load cities");
            Err(ServerFnError::new(format!("Failed to load cities: {}", e)))
        }
    }
}

#[server]
pub async fn get_food_resources() -> Result<FoodResourceFeed, ServerFnError> {
    use crate::data::{config::source_config, feed::load_food_resources};

    match load_food_resources(source_config()).await {
        Ok(feed) => {
            tracing::info!(
                pantries = feed.pantries.len(),
                schools = feed.schools.len(),
                "Serving food resources"
            );
            Ok(feed)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load food resources");
            Err(ServerFnError::new(format!("Failed to load food resources: {}", e)))
        }
    }
}

#[server]
pub async fn locate_postal_code(zip_code: String) -> Result<GeoPoint, ServerFnError> {
    use crate::data::{config::source_config, geocoding};

    geocoding::locate_postal_code(source_config(), &zip_code)
        .await
        .map_err(|e| ServerFnError::new(format!("Could not locate {}: {}", zip_code.trim(), e)))
}
