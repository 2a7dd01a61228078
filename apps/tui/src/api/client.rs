use crate::api::models::{BiomeList, StateList};
use crate::api::{
    ApiError, ApiStatus, BiomeDistribution, DailySeries, Endpoint, FireApi, FireMetrics,
    FireRecord, FrpByState, RiskDistribution,
};
use crate::config::AppConfig;
use crate::filters::FilterCriteria;
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// reqwest-backed client for the focos API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "not a hierarchical URL".to_string(),
            });
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(&config.api_base_url, config.request_timeout)
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL of `endpoint`, keeping any path prefix of the base URL.
    pub fn endpoint_url(&self, endpoint: Endpoint, params: &[(&'static str, String)]) -> Url {
        let mut url = self.base_url.clone();
        let prefix = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{prefix}{}", endpoint.path()));
        url.set_query(None);
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        url
    }

    async fn fetch(
        &self,
        endpoint: Endpoint,
        params: &[(&'static str, String)],
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.endpoint_url(endpoint, params);
        debug!("GET {url}");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ApiError::Request { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { endpoint, status });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        params: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let body = self
            .fetch(endpoint, params)
            .await?
            .bytes()
            .await
            .map_err(|source| ApiError::Request { endpoint, source })?;

        serde_json::from_slice(&body).map_err(|source| ApiError::Decode { endpoint, source })
    }
}

#[async_trait]
impl FireApi for ApiClient {
    async fn metrics(&self) -> Result<FireMetrics, ApiError> {
        self.get_json(Endpoint::Metrics, &[]).await
    }

    async fn occurrences_by_biome(&self) -> Result<BiomeDistribution, ApiError> {
        self.get_json(Endpoint::OccurrencesByBiome, &[]).await
    }

    async fn occurrences_by_day(&self) -> Result<DailySeries, ApiError> {
        self.get_json(Endpoint::OccurrencesByDay, &[]).await
    }

    async fn fire_risk(&self) -> Result<RiskDistribution, ApiError> {
        self.get_json(Endpoint::FireRisk, &[]).await
    }

    async fn frp_by_state(&self) -> Result<FrpByState, ApiError> {
        self.get_json(Endpoint::FrpByState, &[]).await
    }

    async fn states(&self) -> Result<Vec<String>, ApiError> {
        let list: StateList = self.get_json(Endpoint::States, &[]).await?;
        Ok(list.states)
    }

    async fn biomes(&self) -> Result<Vec<String>, ApiError> {
        let list: BiomeList = self.get_json(Endpoint::Biomes, &[]).await?;
        Ok(list.biomes)
    }

    async fn occurrences(&self, filters: &FilterCriteria) -> Result<Vec<FireRecord>, ApiError> {
        self.get_json(Endpoint::Occurrences, &filters.query_pairs())
            .await
    }

    async fn alerts(&self) -> Result<Vec<FireRecord>, ApiError> {
        self.get_json(Endpoint::Alerts, &[("critico", "true".to_string())])
            .await
    }

    async fn status(&self) -> Result<ApiStatus, ApiError> {
        self.get_json(Endpoint::Status, &[]).await
    }

    async fn export_csv(&self, filters: &FilterCriteria) -> Result<String, ApiError> {
        let endpoint = Endpoint::ExportCsv;
        self.fetch(endpoint, &filters.export_pairs())
            .await?
            .text()
            .await
            .map_err(|source| ApiError::Request { endpoint, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> Result<ApiClient, ApiError> {
        ApiClient::new(base, None)
    }

    #[test]
    fn plain_endpoints_have_no_query_string() -> Result<(), ApiError> {
        let api = client("http://localhost:8000")?;
        let url = api.endpoint_url(Endpoint::Metrics, &[]);
        assert_eq!(url.as_str(), "http://localhost:8000/metricas");
        assert_eq!(url.query(), None);
        Ok(())
    }

    #[test]
    fn occurrence_query_matches_filters() -> Result<(), ApiError> {
        let api = client("http://localhost:8000/")?;
        let filters = FilterCriteria {
            state: Some("SP".to_string()),
            limit: Some(1000),
            ..FilterCriteria::default()
        };
        let url = api.endpoint_url(Endpoint::Occurrences, &filters.query_pairs());
        assert_eq!(url.as_str(), "http://localhost:8000/focos?estado=SP&limit=1000");
        Ok(())
    }

    #[test]
    fn values_are_form_encoded() -> Result<(), ApiError> {
        let api = client("http://localhost:8000")?;
        let filters = FilterCriteria {
            biome: Some("Mata Atlântica".to_string()),
            ..FilterCriteria::default()
        };
        let url = api.endpoint_url(Endpoint::Occurrences, &filters.query_pairs());
        assert_eq!(url.query(), Some("bioma=Mata+Atl%C3%A2ntica&limit=1000"));
        Ok(())
    }

    #[test]
    fn base_path_prefix_is_kept() -> Result<(), ApiError> {
        let api = client("https://example.org/api/v1/")?;
        let url = api.endpoint_url(Endpoint::ExportCsv, &[]);
        assert_eq!(url.as_str(), "https://example.org/api/v1/exportar/csv");
        Ok(())
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            client("localhost:8000"),
            Err(ApiError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            client("not a url"),
            Err(ApiError::InvalidBaseUrl { .. })
        ));
    }
}
