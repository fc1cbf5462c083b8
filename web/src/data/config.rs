use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

const DEFAULT_PANTRY_SOURCE: &str = "data/food_resources.json";
const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";
const DEFAULT_USER_AGENT: &str = "FoodResourceMap/0.1 (food assistance directory)";

/// Where an upstream feed lives: anything starting with `http` is fetched,
/// everything else is read from disk.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedSource {
    Url(String),
    File(PathBuf),
}

impl FeedSource {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            FeedSource::Url(raw.to_string())
        } else {
            FeedSource::File(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::Url(url) => f.write_str(url),
            FeedSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub pantries: FeedSource,
    pub schools: Option<FeedSource>,
    /// When unset the city list is derived from the pantry towns.
    pub cities: Option<FeedSource>,
    pub geocoder_url: String,
    pub user_agent: String,
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl SourceConfig {
    pub fn from_env() -> Self {
        Self {
            pantries: FeedSource::parse(
                &optional_var("PANTRY_SOURCE").unwrap_or_else(|| DEFAULT_PANTRY_SOURCE.to_string()),
            ),
            schools: optional_var("SCHOOL_SOURCE").map(|v| FeedSource::parse(&v)),
            cities: optional_var("CITY_SOURCE").map(|v| FeedSource::parse(&v)),
            geocoder_url: optional_var("GEOCODER_URL").unwrap_or_else(|| DEFAULT_GEOCODER_URL.to_string()),
            user_agent: optional_var("GEOCODER_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        }
    }
}

static SOURCE_CONFIG: OnceLock<SourceConfig> = OnceLock::new();

/// Read from the environment on first use; `.env` must be loaded before that.
pub fn source_config() -> &'static SourceConfig {
    SOURCE_CONFIG.get_or_init(SourceConfig::from_env)
}
