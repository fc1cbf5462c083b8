use directory::normalize::cell_text;
use directory::sheet::rows_from_payload;
use serde_json::Value;
use shared_types::FoodResourceFeed;
use std::collections::BTreeSet;
use tracing::{debug, instrument};

use super::config::{FeedSource, SourceConfig};
use super::error::SourceError;

async fn load_payload(source: &FeedSource) -> Result<Value, SourceError> {
    match source {
        FeedSource::Url(url) => {
            let response = reqwest::Client::new()
                .get(url)
                .send()
                .await?
                .error_for_status()?;
            Ok(response.json().await?)
        }
        FeedSource::File(path) => {
            let body = tokio::fs::read_to_string(path).await?;
            Ok(serde_json::from_str(&body)?)
        }
    }
}

#[instrument(skip(source), fields(source = %source))]
pub async fn load_rows(source: &FeedSource) -> Result<Vec<Value>, SourceError> {
    let payload = load_payload(source).await?;
    let rows = rows_from_payload(payload).ok_or_else(|| SourceError::UnexpectedShape(source.to_string()))?;
    debug!(rows = rows.len(), "Loaded feed");
    Ok(rows)
}

pub async fn load_food_resources(config: &SourceConfig) -> Result<FoodResourceFeed, SourceError> {
    let pantries = load_rows(&config.pantries).await?;
    let schools = match &config.schools {
        Some(source) => load_rows(source).await?,
        None => Vec::new(),
    };
    Ok(FoodResourceFeed { pantries, schools })
}

/// A city feed is either a plain list of names or rows with a city column.
fn city_names(payload: Value) -> Option<Vec<String>> {
    if let Value::Array(items) = &payload {
        if items.iter().all(Value::is_string) {
            return Some(items.iter().filter_map(cell_text).collect());
        }
    }
    let rows = rows_from_payload(payload)?;
    Some(
        rows.iter()
            .filter_map(|row| {
                ["City", "Town", "Name"]
                    .iter()
                    .find_map(|column| row.get(*column).and_then(cell_text))
            })
            .collect(),
    )
}

fn sorted_unique(names: impl IntoIterator<Item = String>) -> Vec<String> {
    names
        .into_iter()
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Without a city feed this is empty and the browser lists the towns of the
/// loaded resources instead.
pub async fn load_cities(config: &SourceConfig) -> Result<Vec<String>, SourceError> {
    let Some(source) = &config.cities else {
        return Ok(Vec::new());
    };
    let payload = load_payload(source).await?;
    let names = city_names(payload).ok_or_else(|| SourceError::UnexpectedShape(source.to_string()))?;
    Ok(sorted_unique(names))
}
