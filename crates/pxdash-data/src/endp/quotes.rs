use anyhow::Result;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Deserializer};

/// Fetch the recent observations of a single security.
pub async fn fetch(client: &Client, url: String, sedol: &str) -> Result<Vec<Observation>> {
    let response: QuoteHistory = client.get(url).send().await?.json().await?;
    Ok(collect_observations(response, sedol))
}

/// Unpack the response envelope into a flat, oldest-first series.
///
/// A response with no result set is how the service answers for an
/// unknown or never-traded SEDOL; that is not an error here.
fn collect_observations(response: QuoteHistory, sedol: &str) -> Vec<Observation> {
    match response.quote.result {
        Some(data) if !data.is_empty() => {
            let base = &data[0];
            let mut observations = base
                .dates
                .iter()
                .zip(base.prices.iter())
                .map(|(dated, price)| Observation {
                    dated: *dated,
                    price: *price,
                })
                .collect::<Vec<_>>();
            // the change column diffs consecutive entries, so the order
            // has to be oldest-first regardless of how the service sorts
            observations.sort_by_key(|observation| observation.dated);
            observations
        }

        _ => {
            log::warn!("[{sedol}] no quote data returned; filling with an empty series instead");
            vec![]
        }
    }
}

/// One priced point in time for a security.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub dated: NaiveDate,
    pub price: f64,
}

// `quote` response schema
#[derive(Deserialize, Debug)]
pub struct QuoteHistory {
    pub quote: QuoteResponse,
}

#[derive(Deserialize, Debug)]
pub struct QuoteResponse {
    pub result: Option<Vec<QuoteSeries>>,
}

#[derive(Deserialize, Debug)]
pub struct QuoteSeries {
    pub sedol: String,
    #[serde(rename = "timestamp", deserialize_with = "de_timestamps_to_naive_date")]
    pub dates: Vec<NaiveDate>,
    #[serde(rename = "price")]
    pub prices: Vec<f64>,
}

/// Transform a `unix timestamp`    -> `naive date`, e.g.,
///             `1705795200`        -> `2024-01-21`
fn de_timestamps_to_naive_date<'de, D>(deserializer: D) -> Result<Vec<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let timestamps: Vec<i64> = Deserialize::deserialize(deserializer)?;
    timestamps
        .into_iter()
        .map(|timestamp| {
            chrono::DateTime::from_timestamp(timestamp, 0)
                .map(|datetime| datetime.date_naive())
                .ok_or_else(|| serde::de::Error::custom("timestamp out of range"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_quote_envelope() {
        let raw = r#"{
            "quote": {
                "result": [
                    {
                        "sedol": "B0YBKJ7",
                        "timestamp": [1754352000, 1754438400],
                        "price": [100.0, 89.0]
                    }
                ]
            }
        }"#;

        let response: QuoteHistory = serde_json::from_str(raw).unwrap();
        let observations = collect_observations(response, "B0YBKJ7");
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].price, 100.0);
        assert_eq!(
            observations[0].dated,
            NaiveDate::from_ymd_opt(2025, 8, 5).unwrap()
        );
        assert_eq!(observations[1].price, 89.0);
    }

    #[test]
    fn newest_first_series_is_reordered() {
        let raw = r#"{
            "quote": {
                "result": [
                    {
                        "sedol": "B0YBKJ7",
                        "timestamp": [1754438400, 1754352000],
                        "price": [89.0, 100.0]
                    }
                ]
            }
        }"#;

        let response: QuoteHistory = serde_json::from_str(raw).unwrap();
        let observations = collect_observations(response, "B0YBKJ7");
        assert_eq!(observations[0].price, 100.0);
        assert_eq!(observations[1].price, 89.0);
    }

    #[test]
    fn null_result_becomes_empty_series() {
        let raw = r#"{ "quote": { "result": null } }"#;
        let response: QuoteHistory = serde_json::from_str(raw).unwrap();
        assert!(collect_observations(response, "B0YBKJ7").is_empty());
    }

    #[test]
    fn empty_result_becomes_empty_series() {
        let raw = r#"{ "quote": { "result": [] } }"#;
        let response: QuoteHistory = serde_json::from_str(raw).unwrap();
        assert!(collect_observations(response, "B0YBKJ7").is_empty());
    }
}
