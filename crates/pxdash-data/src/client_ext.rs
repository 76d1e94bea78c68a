use crate::endp::quotes;
use crate::www;
use crate::SecuritySeries;
use anyhow::Result;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use std::future::Future;

pub trait ClientExt {
    fn fetch_quotes(
        &self,
        base: &str,
        sedol: &str,
    ) -> impl Future<Output = Result<Vec<quotes::Observation>>> + Send;

    fn fetch_universe(
        &self,
        base: &str,
        sedols: &[String],
    ) -> impl Future<Output = Result<Vec<SecuritySeries>>> + Send;
}

/// Add-on methods for [`reqwest::Client`].
///
/// [`reqwest::Client`]: https://docs.rs/reqwest/latest/reqwest/struct.Client.html
impl ClientExt for Client {
    /// Fetch the recent observations of a single security.
    async fn fetch_quotes(&self, base: &str, sedol: &str) -> Result<Vec<quotes::Observation>> {
        let url = www::quote_url(base, sedol);
        quotes::fetch(self, url, sedol).await
    }

    /// Fetch the whole universe, a few securities at a time.
    ///
    /// Output order follows `sedols`. A security whose fetch fails is
    /// logged and carried as an empty series, so one input row still
    /// produces one output row.
    async fn fetch_universe(&self, base: &str, sedols: &[String]) -> Result<Vec<SecuritySeries>> {
        let pb = progress_bar(sedols.len() as u64);
        let series = futures::stream::iter(sedols.iter().cloned())
            .map(|sedol| {
                let client = self.clone();
                let pb = pb.clone();
                async move {
                    let observations = match client.fetch_quotes(base, &sedol).await {
                        Ok(observations) => observations,
                        Err(e) => {
                            log::error!("[{sedol}] failed to fetch quotes: {e:#}");
                            vec![]
                        }
                    };
                    pb.inc(1);
                    SecuritySeries {
                        sedol: sedol.clone(),
                        observations,
                    }
                }
            })
            .buffered(num_cpus::get())
            .collect::<Vec<_>>()
            .await;
        pb.finish_and_clear();

        Ok(series)
    }
}

fn progress_bar(length: u64) -> ProgressBar {
    let pb = ProgressBar::new(length);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [ {bar:50} ] {pos}/{len} quotes {spinner}")
            .unwrap()
            .progress_chars("#|-"),
    );
    pb
}
