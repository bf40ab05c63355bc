//! # Background Jobs
//!
//! Runs encode and decode off the caller's thread so a front end stays
//! responsive. The codec itself stays synchronous; this module only moves it
//! onto tokio's blocking pool and forwards progress through a channel.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let image = image_io::load("cover.png")?;
//! let handle = worker::spawn(Job::Encode { image, payload: "hi".into() }, Framing::Terminated);
//! let output = handle.wait(|percent| println!("{}%", percent)).await?;
//! ```

use anyhow::Result;
use image::RgbaImage;
use log::{debug, info};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::processing::{self, Framing, StegoError};

/// Work to perform on a loaded image.
#[derive(Debug, Clone)]
pub enum Job {
    /// Hide `payload` in `image`
    Encode { image: RgbaImage, payload: String },
    /// Recover hidden text from `image`
    Decode { image: RgbaImage },
}

/// Successful result of a [`Job`].
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutput {
    /// The cover image with the payload written into it
    Encoded(RgbaImage),
    /// The recovered text
    Decoded(String),
}

/// A running job: its progress stream and its eventual result.
pub struct JobHandle {
    /// Percentages in emission order; closes when the job finishes
    pub progress: mpsc::UnboundedReceiver<u8>,
    result: JoinHandle<Result<JobOutput, StegoError>>,
}

/// Start `job` on the blocking thread pool.
///
/// Must be called from within a tokio runtime.
pub fn spawn(job: Job, framing: Framing) -> JobHandle {
    let (tx, rx) = mpsc::unbounded_channel();

    let result = tokio::task::spawn_blocking(move || {
        let mut tx = tx;
        run(job, framing, &mut tx)
    });

    JobHandle {
        progress: rx,
        result,
    }
}

/// Execute `job` on the current thread, reporting to `progress`.
fn run(
    job: Job,
    framing: Framing,
    progress: &mut mpsc::UnboundedSender<u8>,
) -> Result<JobOutput, StegoError> {
    match job {
        Job::Encode { mut image, payload } => {
            debug!("Encode job started ({} payload bytes)", payload.len());
            processing::encode_with(&mut image, &payload, framing, progress)?;
            Ok(JobOutput::Encoded(image))
        }
        Job::Decode { image } => {
            debug!("Decode job started ({}x{})", image.width(), image.height());
            let text = processing::decode_with(&image, framing, progress)?;
            Ok(JobOutput::Decoded(text))
        }
    }
}

impl JobHandle {
    /// Forward every progress event to `on_progress`, then return the job's
    /// result.
    ///
    /// # Errors
    /// - The codec error, if the job failed
    /// - An error if the worker thread panicked
    pub async fn wait<F: FnMut(u8)>(mut self, mut on_progress: F) -> Result<JobOutput> {
        // The sender is dropped when the job returns, which ends this loop
        while let Some(percent) = self.progress.recv().await {
            on_progress(percent);
        }

        let output = self
            .result
            .await
            .map_err(|e| anyhow::anyhow!("Steganography task panicked: {}", e))??;

        info!("✅ Job finished");
        Ok(output)
    }
}
