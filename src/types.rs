use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub slack_webhook_url: Option<String>,
    pub catalogue_file: PathBuf,
    pub log_level: tracing::Level,
    pub api_base_url: String,
    pub lookahead_months: u32,
    pub request_timeout_secs: u64,
}

/// A product/version pair to look up. `name` and `version` form the lookup key,
/// `label` is only shown in notifications.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Product {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Product {
    pub fn new<N, V>(name: N, version: V) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            version: version.into(),
            label: None,
        }
    }

    pub fn with_label<L: Into<String>>(mut self, label: L) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// Ordered list of products; iteration order is the order of the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    products: Vec<Product>,
}

impl Catalogue {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }
}

impl IntoIterator for Catalogue {
    type Item = Product;
    type IntoIter = std::vec::IntoIter<Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.into_iter()
    }
}

/// Release and end-of-life dates as published by the lookup API (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReleaseInfo {
    #[serde(rename = "releaseDate")]
    pub release_date: String,
    #[serde(rename = "eol")]
    pub end_of_life_date: String,
}

impl ReleaseInfo {
    pub fn new<R, E>(release_date: R, end_of_life_date: E) -> Self
    where
        R: Into<String>,
        E: Into<String>,
    {
        Self {
            release_date: release_date.into(),
            end_of_life_date: end_of_life_date.into(),
        }
    }
}

#[derive(Serialize)]
pub struct SlackPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub blocks: Vec<serde_json::Value>,
}
