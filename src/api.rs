// API client module: contains a small blocking HTTP client that talks to
// the remote face-swap service. It is intentionally small and synchronous,
// one human waits at the terminal for one image.

use anyhow::{Context, Result};
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

/// Simple API client that holds a reqwest blocking client, the base URL
/// of the face-swap service and the API key sent with every request.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: HeaderValue,
}

/// A detected face region in the target image. The service reports pixel
/// coordinates and may send them as integers or floats, so `f64` covers
/// both.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FaceBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Body of the face detection request. Field names mirror the backend
/// expectations (camelCase on the wire).
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct DetectFacesRequest<'a> {
    image_url: &'a str,
}

/// Expected response from the detection endpoint. An absent or empty
/// `detectedFaces` field means no faces, not a protocol error.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DetectFacesResponse {
    #[serde(default)]
    pub detected_faces: Vec<FaceBox>,
}

/// One face replacement: the source face URL paired with a detected
/// region of the target image.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SwapFace {
    pub new_face: String,
    pub original_face: FaceBox,
}

/// Swap job submission payload: the target image plus one entry per
/// detected face.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SwapJobRequest {
    pub media_url: String,
    pub faces: Vec<SwapFace>,
}

/// Acknowledgement of a submitted swap job. We keep `job_id` optional
/// because the service omits it when it refuses the job; the workflow
/// treats that as a submission failure.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SwapJobAck {
    #[serde(default)]
    pub job_id: Option<String>,
}

/// One poll of a running job. `status` is whatever string the service
/// sends; `result` only appears once the job has completed.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub result: Option<JobResult>,
}

/// Payload attached to a completed job.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JobResult {
    #[serde(default)]
    pub media_url: Option<String>,
}

/// The three job states the client distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Completed,
    Failed,
    InProgress,
}

impl JobStatusResponse {
    /// Collapse the service's status string into the states the client
    /// acts on. Anything unrecognized (or a missing status field) means
    /// the job is still running and polling should continue.
    pub fn state(&self) -> JobState {
        match self.status.as_deref() {
            Some("completed") => JobState::Completed,
            Some("failed") => JobState::Failed,
            _ => JobState::InProgress,
        }
    }
}

impl ApiClient {
    /// Create an ApiClient for the given API key. The base URL comes from
    /// the environment variable `FACESWAP_API_URL` or falls back to the
    /// public service endpoint.
    pub fn new(api_key: &str) -> Result<Self> {
        let base_url = std::env::var("FACESWAP_API_URL")
            .unwrap_or_else(|_| "https://api.maxstudio.ai".into());
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        let api_key = HeaderValue::from_str(api_key)
            .context("API key contains characters that cannot go into a header")?;
        Ok(ApiClient {
            client,
            base_url,
            api_key,
        })
    }

    /// Helper to build the `x-api-key` header map sent with every call.
    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", self.api_key.clone());
        headers
    }

    /// Ask the service for face bounding boxes in the target image.
    pub fn detect_faces(&self, image_url: &str) -> Result<Vec<FaceBox>> {
        let url = format!("{}/detect-face-image", &self.base_url);
        let res = self
            .client
            .post(&url)
            .headers(self.auth_headers())
            .json(&DetectFacesRequest { image_url })
            .send()
            .context("Failed to send face detection request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Face detection failed: {} - {}", status, txt);
        }
        let body: DetectFacesResponse = res.json().context("Parsing face detection response json")?;
        debug!("face detection response: {:?}", body);
        Ok(body.detected_faces)
    }

    /// Submit a swap job and return the service's acknowledgement.
    pub fn submit_swap(&self, job: &SwapJobRequest) -> Result<SwapJobAck> {
        let url = format!("{}/swap-image", &self.base_url);
        let res = self
            .client
            .post(&url)
            .headers(self.auth_headers())
            .json(job)
            .send()
            .context("Failed to send swap request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Swap submission failed: {} - {}", status, txt);
        }
        let ack: SwapJobAck = res.json().context("Parsing swap submission response json")?;
        debug!("swap submission response: {:?}", ack);
        Ok(ack)
    }

    /// Fetch the current status of a submitted job.
    pub fn job_status(&self, job_id: &str) -> Result<JobStatusResponse> {
        let url = format!("{}/swap-image/{}", &self.base_url, job_id);
        let res = self
            .client
            .get(&url)
            .headers(self.auth_headers())
            .send()
            .context("Failed to send job status request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Job status request failed: {} - {}", status, txt);
        }
        let body: JobStatusResponse = res.json().context("Parsing job status response json")?;
        debug!("job status response: {:?}", body);
        Ok(body)
    }
}
