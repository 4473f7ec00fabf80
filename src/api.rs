//! PokeAPI client: one listing call, then a bounded detail fan-out.

use std::sync::{Arc, OnceLock};

use serde::Deserialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::state::{CatalogItem, StatValue};

const API_BASE: &str = "https://pokeapi.co/api/v2";
const DETAIL_CONCURRENCY: usize = 8;

#[derive(Debug)]
pub enum FetchError {
    /// Request or HTTP-status failure
    Network(reqwest::Error),
    /// Unexpected response shape
    Decode(String),
    /// A detail task died before reporting a result
    Task(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Network(err) => write!(f, "request failed: {err}"),
            FetchError::Decode(err) => write!(f, "unexpected response shape: {err}"),
            FetchError::Task(err) => write!(f, "detail task failed: {err}"),
        }
    }
}

impl std::error::Error for FetchError {}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<ListEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct ListEntry {
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct DetailResponse {
    id: u16,
    name: String,
    height: u16,
    weight: u16,
    types: Vec<TypeSlot>,
    stats: Vec<StatSlot>,
    sprites: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct StatSlot {
    base_stat: u16,
    stat: NamedResource,
}

/// Fetch the catalog listing, then every detail record concurrently
/// (at most `DETAIL_CONCURRENCY` in flight), preserving listing order.
///
/// Atomic over the whole batch: the first failure aborts the remaining
/// tasks and the load reports a single error with no partial results.
pub async fn fetch_catalog(limit: usize) -> Result<Vec<CatalogItem>, FetchError> {
    let url = format!("{API_BASE}/pokemon?limit={limit}");
    let listing: ListResponse = fetch_json(&url).await?;
    let count = listing.results.len();

    let semaphore = Arc::new(Semaphore::new(DETAIL_CONCURRENCY));
    let mut join_set = JoinSet::new();
    for (index, entry) in listing.results.into_iter().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        join_set.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|err| FetchError::Task(err.to_string()))?;
            let item = fetch_detail(&entry.url).await?;
            Ok::<(usize, CatalogItem), FetchError>((index, item))
        });
    }

    let mut slots: Vec<Option<CatalogItem>> = vec![None; count];
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok(Ok((index, item))) => {
                if let Some(slot) = slots.get_mut(index) {
                    *slot = Some(item);
                }
            }
            Ok(Err(err)) => {
                join_set.abort_all();
                return Err(err);
            }
            Err(err) => {
                join_set.abort_all();
                return Err(FetchError::Task(err.to_string()));
            }
        }
    }

    let items: Vec<CatalogItem> = slots.into_iter().flatten().collect();
    debug_assert_eq!(items.len(), count);
    Ok(items)
}

async fn fetch_detail(url: &str) -> Result<CatalogItem, FetchError> {
    let response: DetailResponse = fetch_json(url).await?;

    let image_url = response
        .sprites
        .pointer("/other/official-artwork/front_default")
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_string();
    let types = response
        .types
        .into_iter()
        .map(|slot| slot.type_info.name)
        .collect();
    let stats = response
        .stats
        .into_iter()
        .map(|slot| StatValue {
            name: slot.stat.name,
            base: slot.base_stat,
        })
        .collect();

    Ok(CatalogItem {
        id: response.id,
        name: response.name,
        image_url,
        types,
        stats,
        // Upstream reports tenths of the display unit.
        height_m: f32::from(response.height) / 10.0,
        weight_kg: f32::from(response.weight) / 10.0,
    })
}

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(FetchError::Network)?;
    let response = response.error_for_status().map_err(FetchError::Network)?;
    let bytes = response.bytes().await.map_err(FetchError::Network)?;
    serde_json::from_slice(&bytes).map_err(|err| FetchError::Decode(err.to_string()))
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_response_mapping() {
        let payload = serde_json::json!({
            "id": 1,
            "name": "bulbasaur",
            "height": 7,
            "weight": 69,
            "types": [
                {"slot": 1, "type": {"name": "grass", "url": ""}},
                {"slot": 2, "type": {"name": "poison", "url": ""}}
            ],
            "stats": [
                {"base_stat": 45, "stat": {"name": "hp", "url": ""}}
            ],
            "sprites": {
                "front_default": "ignored",
                "other": {"official-artwork": {"front_default": "https://img/1.png"}}
            }
        });

        let response: DetailResponse = serde_json::from_value(payload).expect("decode");
        assert_eq!(response.id, 1);
        assert_eq!(response.types[1].type_info.name, "poison");
        assert_eq!(response.stats[0].base_stat, 45);
        assert_eq!(
            response
                .sprites
                .pointer("/other/official-artwork/front_default")
                .and_then(|value| value.as_str()),
            Some("https://img/1.png")
        );
    }

    #[test]
    fn test_decode_error_classification() {
        let result: Result<DetailResponse, FetchError> =
            serde_json::from_slice(b"{\"unexpected\": true}")
                .map_err(|err| FetchError::Decode(err.to_string()));
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }
}
