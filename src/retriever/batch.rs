//! Batch entry points: resolve identifiers, retrieve, isolate failures.
//!
//! Each mode mirrors one CLI subcommand. A single item failing (no match,
//! transport error, decode error, unparseable address line) is logged and
//! recorded in its [`Summary`]; the batch always continues with the next
//! item. Inter-item pacing applies before every item but the first.

use super::retriever::Retriever;
use super::summary::Summary;
use crate::address::DreamAddress;
use crate::pacing::PacingPolicy;
use crate::query::DreamFilter;
use crate::record::DreamRecord;

use tracing::{error, info};

impl Retriever {
    /// Downloads the first dream matching a numeric ID.
    pub async fn download_by_id(&self, id: u64) -> Summary {
        let address = DreamAddress::new(id);
        match self.query(&DreamFilter::Id(id)).await {
            Err(e) => {
                error!(%address, error = %e, "dream lookup failed");
                Summary::fail(address.to_string(), e)
            }
            Ok(records) if records.is_empty() => {
                error!(%address, "no dream found for that ID");
                Summary::no_match(address.to_string())
            }
            Ok(records) => {
                info!(%address, "found dream, downloading first result");
                self.retrieve_to_summary(&records[0]).await
            }
        }
    }

    /// Downloads a batch of dream addresses, one per line.
    ///
    /// Lines may use the plain numeric or the `DA-` grouped form; blank
    /// lines are skipped. An unparseable line is recorded as failed without
    /// triggering a pacing delay, since no request was made for it.
    pub async fn download_batch(&self, lines: &[String]) -> Vec<Summary> {
        let mut summaries = Vec::new();
        let mut first = true;

        for line in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let address = match line.parse::<DreamAddress>() {
                Ok(address) => address,
                Err(e) => {
                    error!(line, error = %e, "skipping unparseable dream address");
                    summaries.push(Summary::fail(line, e));
                    continue;
                }
            };

            if !first {
                pace(&self.config().batch_pacing).await;
            }
            first = false;

            summaries.push(self.download_by_id(address.id()).await);
        }

        summaries
    }

    /// Downloads the first dream matching an island name.
    pub async fn download_by_land_name(&self, name: &str) -> Summary {
        match self.query(&DreamFilter::LandName(name.to_string())).await {
            Err(e) => {
                error!(island = name, error = %e, "dream lookup failed");
                Summary::fail(name, e)
            }
            Ok(records) if records.is_empty() => {
                error!(island = name, "no dream found for that island name");
                Summary::no_match(name)
            }
            Ok(records) => {
                info!(island = name, "found dream, downloading first result");
                self.retrieve_to_summary(&records[0]).await
            }
        }
    }

    /// Downloads every dream on the server's recommended list for `lang`.
    pub async fn download_recommended(&self, lang: &str) -> Vec<Summary> {
        let filter = DreamFilter::Recommended {
            lang: lang.to_string(),
        };
        let records = match self.query(&filter).await {
            Err(e) => {
                error!(lang, error = %e, "recommendation lookup failed");
                return vec![Summary::fail(format!("recommended ({lang})"), e)];
            }
            Ok(records) => records,
        };

        if records.is_empty() {
            error!(lang, "no recommended dreams found");
            return Vec::new();
        }

        info!(
            count = records.len(),
            "found recommended dreams, beginning batch download"
        );

        let mut summaries = Vec::new();
        for (i, record) in records.iter().enumerate() {
            if i > 0 {
                pace(&self.config().recommend_pacing).await;
            }
            summaries.push(self.retrieve_to_summary(record).await);
        }

        info!("all recommended dreams processed");
        summaries
    }

    /// Runs one retrieval, converting errors into failed summaries.
    async fn retrieve_to_summary(&self, record: &DreamRecord) -> Summary {
        let address = record.address();
        match self.retrieve(record).await {
            Ok(summary) => summary,
            Err(e) => {
                error!(%address, error = %e, "retrieval failed");
                Summary::fail(address.to_string(), e)
            }
        }
    }
}

/// Sleeps one sampled inter-item delay, logging the chosen duration.
async fn pace(policy: &PacingPolicy) {
    let wait = policy.sample();
    if wait.is_zero() {
        return;
    }
    info!("sleeping {:.1}s before next download", wait.as_secs_f64());
    tokio::time::sleep(wait).await;
}
