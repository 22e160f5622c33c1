use std::borrow::Cow;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::entities::medicine::MedicineRecord;
use crate::error::MedFinderError;

const RXNAV_BASE: &str = "https://rxnav.nlm.nih.gov/REST";
const RXNAV_API: &str = "rxnav";
const RXNAV_BASE_ENV: &str = "MEDFINDER_RXNAV_BASE";

pub(crate) struct RxNormClient {
    client: reqwest::Client,
    base: Cow<'static, str>,
}

impl RxNormClient {
    pub(crate) fn new() -> Result<Self, MedFinderError> {
        Ok(Self {
            client: crate::sources::shared_client()?,
            base: crate::sources::env_base(RXNAV_BASE, RXNAV_BASE_ENV),
        })
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(base: String) -> Result<Self, MedFinderError> {
        Ok(Self {
            client: crate::sources::shared_client()?,
            base: Cow::Owned(base),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base.as_ref().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, MedFinderError> {
        let resp = req.send().await?;
        let status = resp.status();
        let bytes = crate::sources::read_limited_body(resp, RXNAV_API).await?;
        if !status.is_success() {
            let excerpt = crate::sources::body_excerpt(&bytes);
            return Err(MedFinderError::Api {
                api: RXNAV_API.to_string(),
                message: format!("HTTP {status}: {excerpt}"),
            });
        }
        serde_json::from_slice(&bytes).map_err(|source| MedFinderError::ApiJson {
            api: RXNAV_API.to_string(),
            source,
        })
    }

    /// Raw `drugs.json` fetch keyed by ingredient name.
    ///
    /// The name goes through verbatim as the `name` query parameter; only the
    /// transport layer percent-encodes it. Non-2xx statuses and malformed
    /// payloads are errors at this layer.
    pub(crate) async fn drugs_by_ingredient(
        &self,
        formula: &str,
    ) -> Result<DrugGroupResponse, MedFinderError> {
        let url = self.endpoint("drugs.json");
        self.get_json(self.client.get(&url).query(&[("name", formula)]))
            .await
    }

    /// Lookup contract used by the UI: fetch, flatten, truncate to `limit`.
    ///
    /// Never propagates a hard failure. The surrounding UI has only two
    /// states (found / not found), so any transport or format error degrades
    /// to an empty list.
    pub(crate) async fn search(&self, formula: &str, limit: usize) -> Vec<MedicineRecord> {
        match self.drugs_by_ingredient(formula).await {
            Ok(resp) => crate::transform::medicine::flatten(resp, limit),
            Err(err) => {
                warn!(source = RXNAV_API, error = %err, "drug lookup failed; returning no records");
                Vec::new()
            }
        }
    }
}

/// Top-level `drugs.json` shape. Every nesting level is optional; RxNav omits
/// whole branches rather than sending empty ones.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct DrugGroupResponse {
    #[serde(rename = "drugGroup")]
    pub drug_group: Option<DrugGroup>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct DrugGroup {
    #[serde(rename = "conceptGroup")]
    pub concept_group: Option<Vec<ConceptGroup>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ConceptGroup {
    #[serde(rename = "conceptProperties")]
    pub concept_properties: Option<Vec<ConceptProperty>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ConceptProperty {
    pub name: Option<String>,
    pub rxcui: Option<String>,
    pub synonym: Option<String>,
}
