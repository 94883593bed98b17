//! Pipeline orchestration - wires the stages together and drains the results.

use std::sync::Arc;
use std::time::Instant;

use crate::config::{Config, PipelineConfig};
use crate::types::{ExecutionMode, Outcome, RunReport};

use super::channel::{handoff_channel, PipelineStage};
use super::job::Job;
use super::stages::{StageObserver, Stages};

/// Runs a list of sources through load → resize → grayscale → save.
pub struct Pipeline {
    stages: Arc<Stages>,
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            stages: Arc::new(Stages::new(config)),
            config: config.pipeline.clone(),
        }
    }

    /// Report every stage start and finish to `observer`, in both modes.
    pub fn with_observer(mut self, observer: StageObserver) -> Self {
        let stages = (*self.stages).clone().with_observer(observer);
        self.stages = Arc::new(stages);
        self
    }

    /// Process every source and return once the last outcome is in.
    ///
    /// `on_outcome` sees each save outcome as it arrives, which is always
    /// submission order. Sources that fail to load are logged and skipped;
    /// they produce no outcome. No single failure stops the run.
    pub async fn run<F>(
        &self,
        sources: Vec<String>,
        mode: ExecutionMode,
        on_outcome: F,
    ) -> RunReport
    where
        F: FnMut(&Outcome),
    {
        let start = Instant::now();
        let submitted = sources.len();
        tracing::debug!("Running {} source(s), mode {:?}", submitted, mode);

        let outcomes = match mode {
            ExecutionMode::Concurrent => self.run_concurrent(sources, on_outcome).await,
            ExecutionMode::Sequential => self.run_sequential(sources, on_outcome).await,
        };

        let report = RunReport {
            mode,
            submitted,
            outcomes,
            elapsed: start.elapsed(),
        };
        tracing::info!(
            "{} succeeded, {} failed, {} skipped in {:?}",
            report.succeeded(),
            report.failed(),
            report.skipped(),
            report.elapsed
        );
        report
    }

    /// One task per stage, joined by handoff queues.
    async fn run_concurrent<F>(&self, sources: Vec<String>, mut on_outcome: F) -> Vec<Outcome>
    where
        F: FnMut(&Outcome),
    {
        let (source_tx, source_rx) = handoff_channel::<String>(&self.config);
        let (loaded_tx, loaded_rx) = handoff_channel::<Job>(&self.config);
        let (resized_tx, resized_rx) = handoff_channel::<Job>(&self.config);
        let (gray_tx, gray_rx) = handoff_channel::<Job>(&self.config);
        let (outcome_tx, mut outcome_rx) = handoff_channel::<Outcome>(&self.config);

        let feeder = tokio::spawn(async move {
            for source in sources {
                if source_tx.send(source).await.is_err() {
                    break;
                }
            }
        });

        let stages = Arc::clone(&self.stages);
        let load = tokio::spawn(PipelineStage::new("load", source_rx, loaded_tx).run_fallible(
            move |source| {
                let stages = Arc::clone(&stages);
                async move { stages.load(source).await }
            },
        ));

        let stages = Arc::clone(&self.stages);
        let resize = tokio::spawn(
            PipelineStage::new("resize", loaded_rx, resized_tx).run_fallible(move |job| {
                let stages = Arc::clone(&stages);
                async move { stages.resize(job).await }
            }),
        );

        let stages = Arc::clone(&self.stages);
        let grayscale = tokio::spawn(
            PipelineStage::new("grayscale", resized_rx, gray_tx).run_fallible(move |job| {
                let stages = Arc::clone(&stages);
                async move { stages.grayscale(job).await }
            }),
        );

        let stages = Arc::clone(&self.stages);
        let save = tokio::spawn(PipelineStage::new("save", gray_rx, outcome_tx).run(
            move |job| {
                let stages = Arc::clone(&stages);
                async move { Some(stages.save(job).await) }
            },
        ));

        let mut outcomes = Vec::new();
        while let Some(outcome) = outcome_rx.recv().await {
            on_outcome(&outcome);
            outcomes.push(outcome);
        }

        for (name, handle) in [
            ("feeder", feeder),
            ("load", load),
            ("resize", resize),
            ("grayscale", grayscale),
            ("save", save),
        ] {
            if let Err(e) = handle.await {
                tracing::error!("{} task failed: {}", name, e);
            }
        }

        outcomes
    }

    /// Each source runs through every stage before the next one is loaded.
    async fn run_sequential<F>(&self, sources: Vec<String>, mut on_outcome: F) -> Vec<Outcome>
    where
        F: FnMut(&Outcome),
    {
        let mut outcomes = Vec::with_capacity(sources.len());

        for source in sources {
            let job = match self.stages.load(source).await {
                Ok(job) => job,
                Err(e) => {
                    tracing::error!("load stage: {}", e);
                    continue;
                }
            };
            let job = match self.stages.resize(job).await {
                Ok(job) => job,
                Err(e) => {
                    tracing::error!("resize stage: {}", e);
                    continue;
                }
            };
            let job = match self.stages.grayscale(job).await {
                Ok(job) => job,
                Err(e) => {
                    tracing::error!("grayscale stage: {}", e);
                    continue;
                }
            };

            let outcome = self.stages.save(job).await;
            on_outcome(&outcome);
            outcomes.push(outcome);
        }

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_source_list() {
        let pipeline = Pipeline::new(&Config::default());
        for mode in [ExecutionMode::Concurrent, ExecutionMode::Sequential] {
            let report = pipeline.run(Vec::new(), mode, |_| {}).await;
            assert_eq!(report.submitted, 0);
            assert!(report.outcomes.is_empty());
        }
    }

    #[tokio::test]
    async fn test_all_missing_sources_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.paths.source_segment = dir.path().to_string_lossy().into_owned();
        let pipeline = Pipeline::new(&config);

        let sources: Vec<String> = ["a.jpeg", "b.jpeg"]
            .iter()
            .map(|n| dir.path().join(n).to_string_lossy().into_owned())
            .collect();

        let mut seen = 0;
        let report = pipeline
            .run(sources, ExecutionMode::Concurrent, |_| seen += 1)
            .await;
        assert_eq!(seen, 0);
        assert_eq!(report.skipped(), 2);
    }

    #[tokio::test]
    async fn test_bounded_queues_drain() {
        let mut config = Config::default();
        config.pipeline.buffer_size = 1;
        let pipeline = Pipeline::new(&config);

        // Unmapped sources are skipped at load; the chain still shuts down.
        let sources = (0..10).map(|i| format!("elsewhere/{i}.jpeg")).collect();
        let report = pipeline.run(sources, ExecutionMode::Concurrent, |_| {}).await;
        assert_eq!(report.submitted, 10);
        assert_eq!(report.skipped(), 10);
    }
}
