//! Push-log client: query construction, response validation, and range /
//! date resolution against a json-pushes endpoint.

use std::sync::Arc;

use chrono::{DateTime, Days, NaiveDate, Utc};
use tracing::{debug, info};

use crate::error::{PushlogError, Result};
use crate::model::{PushLogSet, PushRecord, RangeBoundary};
use crate::transport::{Transport, TransportError};

/// Date format the json-pushes endpoint accepts.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Client for one repository's json-pushes endpoint.
///
/// Holds the repository URL and an injected [`Transport`]. Each resolution
/// method issues its one or two requests strictly in sequence and returns
/// either a defined domain error or the transport failure unchanged, never
/// a partial result. The client keeps no other state, so independent calls
/// from multiple tasks are safe whenever the transport is.
pub struct PushLogClient {
    repo_url: String,
    transport: Arc<dyn Transport>,
}

impl PushLogClient {
    pub fn new(repo_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        PushLogClient {
            repo_url: repo_url.into(),
            transport,
        }
    }

    /// Build a client for a named branch (see [`crate::branches`]).
    pub fn for_branch(branch: &str, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self::new(crate::branches::get_url(branch)?, transport))
    }

    pub fn repo_url(&self) -> &str {
        &self.repo_url
    }

    /// Compose a json-pushes query URL; parameters keep their given order.
    fn json_pushes_url(&self, params: &[(&str, String)]) -> String {
        let query = params
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        let url = format!("{}/json-pushes?{}", self.repo_url, query);
        debug!("using url: {}", url);
        url
    }

    /// Fetch one query and translate the outcome into domain terms.
    ///
    /// The only place transport and JSON concerns become domain errors:
    /// 404 becomes `NotFound`, an empty push object becomes `EmptyPushlog`,
    /// anything else propagates unchanged.
    async fn request(&self, url: &str) -> Result<PushLogSet> {
        let body = match self.transport.get_json(url).await {
            Ok(body) => body,
            Err(TransportError::Status { status: 404, .. }) => {
                return Err(PushlogError::NotFound {
                    url: url.to_string(),
                });
            }
            Err(err) => return Err(err.into()),
        };
        let pushes = PushLogSet::from_json(body).map_err(TransportError::Decode)?;
        if pushes.is_empty() {
            return Err(PushlogError::EmptyPushlog {
                url: url.to_string(),
            });
        }
        Ok(pushes)
    }

    /// Look up the single push containing `changeset`.
    pub async fn push_for_changeset(&self, changeset: &str) -> Result<PushRecord> {
        let url = self.json_pushes_url(&[("changeset", changeset.to_string())]);
        let pushes = self.request(&url).await?;
        pushes
            .into_ordered()
            .into_iter()
            .next()
            .ok_or(PushlogError::EmptyPushlog { url })
    }

    /// Resolve `from`/`to` boundaries into push records, ascending by push
    /// id and including both boundary pushes.
    pub async fn pushes_within_range(
        &self,
        from: RangeBoundary,
        to: RangeBoundary,
    ) -> Result<Vec<PushRecord>> {
        Ok(self.resolve_range(from, to).await?.into_ordered())
    }

    /// Same as [`pushes_within_range`](Self::pushes_within_range) but keeps
    /// the id-to-record mapping.
    pub async fn pushes_within_range_raw(
        &self,
        from: RangeBoundary,
        to: RangeBoundary,
    ) -> Result<PushLogSet> {
        self.resolve_range(from, to).await
    }

    async fn resolve_range(&self, from: RangeBoundary, to: RangeBoundary) -> Result<PushLogSet> {
        let mut params: Vec<(&str, String)> = Vec::new();
        let mut accumulated = PushLogSet::new();

        let from_date = match from {
            RangeBoundary::Changeset(changeset) => {
                // fromchange= is from-exclusive on the remote service, so
                // the push for the boundary changeset has to be fetched and
                // merged separately to guarantee its inclusion.
                let url = self.json_pushes_url(&[("changeset", changeset.clone())]);
                accumulated.merge(self.request(&url).await?);
                params.push(("fromchange", changeset));
                None
            }
            RangeBoundary::Date(date) => {
                params.push(("startdate", date.format(DATE_FORMAT).to_string()));
                Some(date)
            }
        };

        let to_date = match to {
            RangeBoundary::Changeset(changeset) => {
                params.push(("tochange", changeset));
                None
            }
            RangeBoundary::Date(date) => {
                // enddate is an exclusive day boundary: one day past the
                // requested date keeps that whole day in range.
                let end = date + Days::new(1);
                params.push(("enddate", end.format(DATE_FORMAT).to_string()));
                Some(date)
            }
        };

        let url = self.json_pushes_url(&params);
        accumulated.merge(self.request(&url).await?);

        if let Some(date) = from_date {
            if let Some((_, record)) = accumulated.first() {
                log_resolved_date(record, date);
            }
        }
        if let Some(date) = to_date {
            if let Some((_, record)) = accumulated.last() {
                log_resolved_date(record, date);
            }
        }

        Ok(accumulated)
    }

    /// Resolve one calendar date to a single head revision.
    ///
    /// With `last` false this is the first push on `date`; with `last` true
    /// it is the most recent push up to the end of `date`, looking back as
    /// far as four days so a Monday query can land on the previous Friday.
    /// An empty window propagates as `EmptyPushlog`; there is no further
    /// fallback widening.
    pub async fn revision_for_date(&self, date: NaiveDate, last: bool) -> Result<String> {
        let enddate = date + Days::new(1);
        let startdate = if last { date - Days::new(4) } else { date };
        let url = self.json_pushes_url(&[
            ("startdate", startdate.format(DATE_FORMAT).to_string()),
            ("enddate", enddate.format(DATE_FORMAT).to_string()),
        ]);
        let pushes = self.request(&url).await?;
        let selected = if last { pushes.last() } else { pushes.first() };
        selected
            .map(|(_, record)| record.head_changeset().to_string())
            .ok_or(PushlogError::EmptyPushlog { url })
    }
}

/// Observability contract: date boundaries name the push they resolved to.
fn log_resolved_date(record: &PushRecord, date: NaiveDate) {
    let pushed_at = DateTime::<Utc>::from_timestamp(record.timestamp, 0)
        .map(|time| time.to_string())
        .unwrap_or_else(|| format!("timestamp {}", record.timestamp));
    info!(
        "using {} (pushed on {}) for date {}",
        record.head_changeset(),
        pushed_at,
        date
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::ScriptedTransport;

    fn client() -> PushLogClient {
        PushLogClient::new(
            "https://hg.example.org/mozilla-central",
            Arc::new(ScriptedTransport::new()),
        )
    }

    #[test]
    fn test_json_pushes_url_keeps_parameter_order() {
        let url = client().json_pushes_url(&[
            ("fromchange", "aaa".to_string()),
            ("tochange", "ccc".to_string()),
        ]);
        assert_eq!(
            url,
            "https://hg.example.org/mozilla-central/json-pushes?fromchange=aaa&tochange=ccc"
        );
    }

    #[test]
    fn test_json_pushes_url_single_parameter() {
        let url = client().json_pushes_url(&[("changeset", "deadbeef".to_string())]);
        assert_eq!(
            url,
            "https://hg.example.org/mozilla-central/json-pushes?changeset=deadbeef"
        );
    }

    #[test]
    fn test_for_branch_resolves_repo_url() {
        let client =
            PushLogClient::for_branch("central", Arc::new(ScriptedTransport::new())).unwrap();
        assert_eq!(client.repo_url(), "https://hg.mozilla.org/mozilla-central");
    }
}
