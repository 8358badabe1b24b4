// UI layer: interactive prompts and terminal output for a single
// face-swap run, using `dialoguer`. The functions are small and
// synchronous to make the flow easy to follow.

use crate::api::ApiClient;
use crate::config::Config;
use crate::download::HttpDownloader;
use crate::workflow::{run_swap, SwapOutcome, ThreadSleep};
use anyhow::Result;
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Run one interactive face-swap session: fill in missing configuration,
/// ask for the target image, then drive the remote job to a terminal
/// state and report what happened.
pub fn run() -> Result<()> {
    let mut config = Config::load()?;

    // First run (or wiped config): ask for the values we do not have and
    // persist them so the next run skips the questions.
    let api_key = match config.api_key.clone() {
        Some(key) => key,
        None => {
            // `Password` hides the key while it is typed.
            let key: String = Password::new().with_prompt("Enter your API key").interact()?;
            let key = key.trim().to_string();
            config.api_key = Some(key.clone());
            key
        }
    };
    let source_image_url = match config.source_image_url.clone() {
        Some(url) => url,
        None => {
            let url: String = Input::new()
                .with_prompt("Enter the source image URL")
                .interact_text()?;
            let url = url.trim().to_string();
            config.source_image_url = Some(url.clone());
            url
        }
    };
    config.save()?;

    let target_image_url: String = Input::new()
        .with_prompt("Enter the target image URL")
        .interact_text()?;
    let target_image_url = target_image_url.trim().to_string();

    let api = ApiClient::new(&api_key)?;
    let downloader = HttpDownloader::new()?;

    // The whole run blocks this thread, so the spinner ticks from its
    // own timer thread while detection, submission and polling happen.
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message("Swapping faces...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let outcome = run_swap(&api, &downloader, &ThreadSleep, &source_image_url, &target_image_url);
    spinner.finish_and_clear();

    match outcome {
        Ok(SwapOutcome::NoFacesDetected) => {
            println!("No faces detected in the target image.");
        }
        Ok(SwapOutcome::Completed { saved: Some(path) }) => {
            println!("Face swap completed. Image saved as '{}'.", path.display());
        }
        Ok(SwapOutcome::Completed { saved: None }) => {
            println!("Face swap completed, but no result image was saved.");
        }
        Ok(SwapOutcome::Failed) => {
            println!("Face swap failed.");
        }
        Err(e) => {
            println!("Error during face swap: {}", e);
        }
    }
    Ok(())
}
