use std::time::Duration;

use reqwest::{Request, StatusCode, Url};

use crate::{
    energy::{DailySeries, DayWindow},
    prelude::*,
    store::{
        Store,
        query::{QueryResponse, build_query},
    },
};

pub struct Client {
    inner: reqwest::Client,
    ping_url: Url,
    write_url: Url,
    query_url: Url,
    database: String,
}

impl Client {
    #[instrument(skip_all, fields(base_url = %base_url, database = database))]
    pub fn new(base_url: &Url, database: &str) -> Result<Self> {
        let inner = reqwest::Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            inner,
            ping_url: endpoint(base_url, "ping")?,
            write_url: endpoint(base_url, "write")?,
            query_url: endpoint(base_url, "query")?,
            database: database.to_owned(),
        })
    }

    fn write_request(&self, line: &str) -> reqwest::Result<Request> {
        self.inner
            .post(self.write_url.clone())
            .query(&[("db", &self.database)])
            .body(line.to_owned())
            .build()
    }

    fn query_request(&self, query: &str) -> reqwest::Result<Request> {
        self.inner
            .post(self.query_url.clone())
            .query(&[("epoch", "ms"), ("db", self.database.as_str()), ("q", query)])
            .build()
    }
}

/// Append the endpoint to the base URL path, keeping any path prefix.
fn endpoint(base_url: &Url, name: &str) -> Result<Url> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .ok()
        .with_context(|| format!("`{base_url}` cannot be a base URL"))?
        .pop_if_empty()
        .push(name);
    Ok(url)
}

/// `/ping` answers with 204 once the database accepts requests.
fn is_ready_status(status: StatusCode) -> bool {
    status == StatusCode::NO_CONTENT
}

impl Store for Client {
    #[instrument(skip_all, level = "debug")]
    async fn is_ready(&self) -> bool {
        match self.inner.get(self.ping_url.clone()).send().await {
            Ok(response) => is_ready_status(response.status()),
            Err(error) => {
                debug!("ping failed: {error:#}");
                false
            }
        }
    }

    #[instrument(skip_all, level = "debug")]
    async fn write_line(&self, line: &str) -> Result {
        self.inner
            .execute(self.write_request(line)?)
            .await
            .with_context(|| format!("failed to send `{line}`"))?
            .error_for_status()
            .with_context(|| format!("the store rejected `{line}`"))?;
        Ok(())
    }

    #[instrument(skip_all, fields(metric = metric))]
    async fn query_series(&self, metric: &str, window: &DayWindow) -> Result<DailySeries> {
        let query = build_query(metric, window);
        debug!(query, "querying…");
        self.inner
            .execute(self.query_request(&query)?)
            .await
            .context("failed to send the query")?
            .error_for_status()
            .context("the query failed")?
            .json::<QueryResponse>()
            .await
            .context("failed to deserialize the query response")?
            .into_series()
            .context("no series in the query response")
    }
}
