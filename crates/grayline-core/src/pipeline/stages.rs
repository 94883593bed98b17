//! The work done by each of the four stages.
//!
//! Both execution modes call these same bodies, so a job sees identical
//! processing whether stages overlap or not. CPU-heavy work runs on the
//! blocking pool to keep stage tasks responsive.

use image::GenericImageView;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::{spawn_blocking, JoinError};

use crate::config::{Config, TransformConfig};
use crate::error::{PipelineError, PipelineResult};
use crate::types::{Outcome, StageEvent, StageKind, StagePhase};

use super::codec::ImageCodec;
use super::job::{DestinationRule, Job};
use super::transform;

/// Callback that receives a [`StageEvent`] around every stage body.
pub type StageObserver = Arc<dyn Fn(&StageEvent) + Send + Sync>;

/// Stage bodies plus the settings they share.
#[derive(Clone)]
pub struct Stages {
    codec: ImageCodec,
    transform: TransformConfig,
    rule: DestinationRule,
    observer: Option<StageObserver>,
}

impl fmt::Debug for Stages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stages")
            .field("codec", &self.codec)
            .field("transform", &self.transform)
            .field("rule", &self.rule)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Stages {
    pub fn new(config: &Config) -> Self {
        Self {
            codec: ImageCodec::new(config.limits.clone(), config.output.clone()),
            transform: config.transform.clone(),
            rule: DestinationRule::from_config(&config.paths),
            observer: None,
        }
    }

    /// Report stage progress to `observer`.
    pub fn with_observer(mut self, observer: StageObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    fn notify(&self, stage: StageKind, phase: StagePhase, source_path: &str) {
        if let Some(observer) = &self.observer {
            observer(&StageEvent {
                stage,
                phase,
                source_path: source_path.to_string(),
            });
        }
    }

    /// Turn a source path into a job: derive its destination, read and decode it.
    pub async fn load(&self, source: String) -> PipelineResult<Job> {
        self.notify(StageKind::Load, StagePhase::Started, &source);
        let path = source.clone();
        let result = self.load_job(source).await;
        self.notify(StageKind::Load, StagePhase::Finished, &path);
        result
    }

    async fn load_job(&self, source: String) -> PipelineResult<Job> {
        let start = Instant::now();
        let dest = self.rule.dest_for(&source)?;

        let codec = self.codec.clone();
        let path = source.clone();
        let image = spawn_blocking(move || codec.read(&path))
            .await
            .map_err(|e| join_error("load", &source, e))??;

        let (width, height) = image.dimensions();
        tracing::debug!(
            "Loaded {} ({}x{}) in {:?}",
            source,
            width,
            height,
            start.elapsed()
        );
        Ok(Job::new(source, image, dest))
    }

    /// Replace the payload with its resized version.
    pub async fn resize(&self, job: Job) -> PipelineResult<Job> {
        let start = Instant::now();
        let TransformConfig {
            width,
            height,
            filter,
        } = self.transform.clone();
        let path = job.source_path().to_string();
        self.notify(StageKind::Resize, StagePhase::Started, &path);

        let result = spawn_blocking(move || {
            job.map_image(|img| transform::resize(&img, width, height, filter))
        })
        .await
        .map_err(|e| join_error("resize", &path, e));

        self.notify(StageKind::Resize, StagePhase::Finished, &path);
        tracing::trace!("  Resize {}: {:?}", path, start.elapsed());
        result
    }

    /// Replace the payload with its grayscale version.
    pub async fn grayscale(&self, job: Job) -> PipelineResult<Job> {
        let start = Instant::now();
        let path = job.source_path().to_string();
        self.notify(StageKind::Grayscale, StagePhase::Started, &path);

        let result = spawn_blocking(move || job.map_image(|img| transform::grayscale(&img)))
            .await
            .map_err(|e| join_error("grayscale", &path, e));

        self.notify(StageKind::Grayscale, StagePhase::Finished, &path);
        tracing::trace!("  Grayscale {}: {:?}", path, start.elapsed());
        result
    }

    /// Encode and write the job's image. Consumes the job whatever happens.
    pub async fn save(&self, job: Job) -> Outcome {
        let start = Instant::now();
        let source_path = job.source_path().to_string();
        let dest_path = job.dest_path().to_string();
        self.notify(StageKind::Save, StagePhase::Started, &source_path);

        let codec = self.codec.clone();
        let result = spawn_blocking(move || codec.write(job.image(), job.dest_path()))
            .await
            .map_err(|e| join_error("save", &source_path, e))
            .and_then(|r| r);

        let success = match result {
            Ok(()) => {
                tracing::debug!("Saved {} in {:?}", dest_path, start.elapsed());
                true
            }
            Err(e) => {
                tracing::error!("Can't save image {}: {}", dest_path, e);
                false
            }
        };
        self.notify(StageKind::Save, StagePhase::Finished, &source_path);

        Outcome {
            source_path,
            dest_path,
            success,
        }
    }
}

fn join_error(stage: &'static str, path: &str, e: JoinError) -> PipelineError {
    PipelineError::Stage {
        stage,
        path: path.to_string(),
        message: e.to_string(),
    }
}
