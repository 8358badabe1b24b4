// Swap workflow: drives one face-swap job from detection to a terminal
// state. The HTTP client, the result downloader and the wait between
// polls are injected so tests can script the whole sequence without a
// live service or real delays.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::anyhow;
use log::{error, info, warn};
use thiserror::Error;

use crate::api::{FaceBox, JobState, JobStatusResponse, SwapFace, SwapJobAck, SwapJobRequest};
use crate::download::Downloader;

/// Fixed wait between two status polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Failures that abort a swap run. Each wraps the underlying cause from
/// the phase it happened in; none of them is retried.
#[derive(Debug, Error)]
pub enum SwapError {
    #[error("face detection failed: {0:#}")]
    Detection(anyhow::Error),
    #[error("swap submission failed: {0:#}")]
    Submission(anyhow::Error),
    #[error("job status poll failed: {0:#}")]
    Poll(anyhow::Error),
}

/// The remote operations the workflow needs. `ApiClient` is the real
/// implementation; tests use a scripted one.
pub trait SwapService {
    fn detect_faces(&self, image_url: &str) -> anyhow::Result<Vec<FaceBox>>;
    fn submit_swap(&self, job: &SwapJobRequest) -> anyhow::Result<SwapJobAck>;
    fn job_status(&self, job_id: &str) -> anyhow::Result<JobStatusResponse>;
}

impl SwapService for crate::api::ApiClient {
    fn detect_faces(&self, image_url: &str) -> anyhow::Result<Vec<FaceBox>> {
        crate::api::ApiClient::detect_faces(self, image_url)
    }

    fn submit_swap(&self, job: &SwapJobRequest) -> anyhow::Result<SwapJobAck> {
        crate::api::ApiClient::submit_swap(self, job)
    }

    fn job_status(&self, job_id: &str) -> anyhow::Result<JobStatusResponse> {
        crate::api::ApiClient::job_status(self, job_id)
    }
}

/// Wait between polls. The real implementation blocks the thread; the
/// process has nothing else to do while the remote job runs.
pub trait Sleep {
    fn sleep(&self, duration: Duration);
}

/// Blocking sleep on the current thread.
pub struct ThreadSleep;

impl Sleep for ThreadSleep {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// How a swap run ended when no error aborted it.
///
/// A job that the service reports as `failed`, or that completes without
/// a result URL, ends the run but is not an `Err`: the run did what it
/// could and the caller only needs to tell the user.
#[derive(Debug)]
pub enum SwapOutcome {
    /// Detection found nothing to swap; the job was never submitted.
    NoFacesDetected,
    /// The job reached `completed`. `saved` names the downloaded file,
    /// or is `None` when the service sent no result URL or the download
    /// itself failed.
    Completed { saved: Option<PathBuf> },
    /// The job reached `failed` on the service side.
    Failed,
}

/// Run one swap: detect faces in the target image, submit a job pairing
/// the source face with every detected region, poll until the job is
/// terminal, and hand a completed result to the downloader.
pub fn run_swap(
    service: &dyn SwapService,
    downloader: &dyn Downloader,
    sleep: &dyn Sleep,
    source_image_url: &str,
    target_image_url: &str,
) -> Result<SwapOutcome, SwapError> {
    let faces = service
        .detect_faces(target_image_url)
        .map_err(SwapError::Detection)?;
    info!("detected {} face(s) in target image", faces.len());

    if faces.is_empty() {
        warn!("no faces detected in the target image, nothing to swap");
        return Ok(SwapOutcome::NoFacesDetected);
    }

    // One entry per detected face, all of them replaced by the same
    // source face, in detection order.
    let job = SwapJobRequest {
        media_url: target_image_url.to_string(),
        faces: faces
            .into_iter()
            .map(|original_face| SwapFace {
                new_face: source_image_url.to_string(),
                original_face,
            })
            .collect(),
    };

    let ack = service.submit_swap(&job).map_err(SwapError::Submission)?;
    let job_id = match ack.job_id {
        Some(id) => id,
        None => return Err(SwapError::Submission(anyhow!("no jobId in swap response"))),
    };
    info!(
        "swap job {} submitted, polling every {}s",
        job_id,
        POLL_INTERVAL.as_secs()
    );

    loop {
        let status = service.job_status(&job_id).map_err(SwapError::Poll)?;
        match status.state() {
            JobState::Completed => {
                let result_url = status.result.and_then(|r| r.media_url);
                let saved = match result_url {
                    Some(url) => {
                        info!("job {} completed, result at {}", job_id, url);
                        match downloader.download(&url) {
                            Ok(path) => Some(path),
                            Err(e) => {
                                // The swap itself succeeded; losing the
                                // download is reported, not escalated.
                                error!("failed to download result image: {:#}", e);
                                None
                            }
                        }
                    }
                    None => {
                        warn!("job {} completed but the response carried no result URL", job_id);
                        None
                    }
                };
                return Ok(SwapOutcome::Completed { saved });
            }
            JobState::Failed => {
                error!("job {} failed on the service side", job_id);
                return Ok(SwapOutcome::Failed);
            }
            JobState::InProgress => {
                info!(
                    "job {} still processing, checking again in {}s",
                    job_id,
                    POLL_INTERVAL.as_secs()
                );
                sleep.sleep(POLL_INTERVAL);
            }
        }
    }
}
