//! Etherscan-compatible verification client (BaseScan and friends).
//!
//! # Responsibilities
//! - Submit `verifysourcecode` with the standard-JSON compiler input
//! - Poll `checkverifystatus` at a fixed interval, up to a fixed count
//! - Treat "already verified" as success
//!
//! Each HTTP request is bounded by the client timeout; nothing is retried
//! beyond the status polling itself.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tokio::time::sleep;
use url::Url;

use crate::config::{ExplorerSettings, Secret};
use crate::contracts::ArtifactStore;
use crate::verification::{
    SourceVerifier, VerificationOutcome, VerificationRequest, VerifyError,
};

const CODE_FORMAT: &str = "solidity-standard-json-input";

/// Raw explorer API envelope.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    #[serde(default)]
    message: String,
    result: String,
}

impl ApiResponse {
    fn is_ok(&self) -> bool {
        self.status == "1"
    }
}

fn is_already_verified(result: &str) -> bool {
    result.to_ascii_lowercase().contains("already verified")
}

fn is_pending(result: &str) -> bool {
    result.to_ascii_lowercase().contains("pending")
}

/// Verification client for one explorer and chain.
#[derive(Debug, Clone)]
pub struct EtherscanVerifier {
    http: Client,
    api_url: Url,
    browser_url: Option<String>,
    api_key: Secret,
    chain_id: u64,
    artifacts: ArtifactStore,
    poll_interval: Duration,
    max_polls: u32,
}

impl EtherscanVerifier {
    /// Build a verifier for `settings` on `chain_id`.
    pub fn new(
        settings: &ExplorerSettings,
        chain_id: u64,
        artifacts: ArtifactStore,
    ) -> Result<Self, VerifyError> {
        let http = Client::builder()
            .timeout(settings.request_timeout)
            .build()?;

        Ok(Self {
            http,
            api_url: settings.api_url.clone(),
            browser_url: settings.browser_url.clone(),
            api_key: settings.api_key.clone(),
            chain_id,
            artifacts,
            poll_interval: settings.poll_interval,
            max_polls: settings.max_polls,
        })
    }

    async fn submit(&self, request: &VerificationRequest) -> Result<ApiResponse, VerifyError> {
        let artifact = self.artifacts.load(request.contract)?;
        let build_info = self.artifacts.build_info(request.contract)?;
        let source_code = serde_json::to_string(&build_info.input)
            .map_err(|e| VerifyError::UnexpectedResponse(e.to_string()))?;

        let form: Vec<(&str, String)> = vec![
            ("apikey", self.api_key.expose().to_string()),
            ("module", "contract".to_string()),
            ("action", "verifysourcecode".to_string()),
            ("contractaddress", request.address.to_string()),
            ("sourceCode", source_code),
            ("codeformat", CODE_FORMAT.to_string()),
            ("contractname", artifact.fully_qualified_name()),
            (
                "compilerversion",
                format!("v{}", build_info.solc_long_version),
            ),
            // Misspelling is part of the explorer API.
            (
                "constructorArguements",
                request.constructor_args.abi_encode_hex(),
            ),
        ];

        let response = self
            .http
            .post(self.api_url.clone())
            .query(&[("chainid", self.chain_id)])
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json::<ApiResponse>()
            .await?;

        Ok(response)
    }

    async fn check_status(&self, guid: &str) -> Result<ApiResponse, VerifyError> {
        let chain_id = self.chain_id.to_string();
        let response = self
            .http
            .get(self.api_url.clone())
            .query(&[
                ("chainid", chain_id.as_str()),
                ("apikey", self.api_key.expose()),
                ("module", "contract"),
                ("action", "checkverifystatus"),
                ("guid", guid),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<ApiResponse>()
            .await?;

        Ok(response)
    }

    async fn poll(
        &self,
        request: &VerificationRequest,
        guid: &str,
    ) -> Result<VerificationOutcome, VerifyError> {
        for attempt in 1..=self.max_polls {
            sleep(self.poll_interval).await;

            let status = self.check_status(guid).await?;
            if is_already_verified(&status.result) {
                return Ok(VerificationOutcome::AlreadyVerified);
            }
            if status.is_ok() {
                return Ok(VerificationOutcome::Verified);
            }
            if !is_pending(&status.result) {
                return Err(VerifyError::Rejected {
                    contract: request.contract,
                    reason: status.result,
                });
            }

            tracing::debug!(
                contract = %request.contract,
                guid = guid,
                attempt = attempt,
                max_polls = self.max_polls,
                "Verification pending"
            );
        }

        Err(VerifyError::Timeout {
            contract: request.contract,
            polls: self.max_polls,
        })
    }

    fn explorer_link(&self, request: &VerificationRequest) -> Option<String> {
        self.browser_url.as_ref().map(|base| {
            format!(
                "{}/address/{}#code",
                base.trim_end_matches('/'),
                request.address
            )
        })
    }
}

impl SourceVerifier for EtherscanVerifier {
    async fn verify(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationOutcome, VerifyError> {
        let submission = self.submit(request).await?;

        let outcome = if submission.is_ok() {
            tracing::debug!(
                contract = %request.contract,
                guid = %submission.result,
                "Verification submitted"
            );
            self.poll(request, &submission.result).await?
        } else if is_already_verified(&submission.result) {
            VerificationOutcome::AlreadyVerified
        } else {
            return Err(VerifyError::Rejected {
                contract: request.contract,
                reason: if submission.message.is_empty() {
                    submission.result
                } else {
                    format!("{}: {}", submission.message, submission.result)
                },
            });
        };

        if let Some(link) = self.explorer_link(request) {
            tracing::info!(contract = %request.contract, link = %link, "Source published");
        }

        Ok(outcome)
    }
}
