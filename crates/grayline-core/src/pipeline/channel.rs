//! Handoff queues between pipeline stages.
//!
//! Queues are unbounded unless `pipeline.buffer_size` is set, in which case a
//! full queue suspends the sender until the downstream stage catches up.
//! Dropping every sender closes the queue; the receiver still drains buffered
//! items before observing the close.

use tokio::sync::mpsc;

use crate::config::PipelineConfig;

/// Sending half of a handoff queue.
pub enum HandoffSender<T> {
    Bounded(mpsc::Sender<T>),
    Unbounded(mpsc::UnboundedSender<T>),
}

/// Receiving half of a handoff queue.
pub enum HandoffReceiver<T> {
    Bounded(mpsc::Receiver<T>),
    Unbounded(mpsc::UnboundedReceiver<T>),
}

impl<T> HandoffSender<T> {
    /// Push an item, waiting for capacity on a bounded queue.
    ///
    /// Fails only when the receiving side has been dropped.
    pub async fn send(&self, item: T) -> Result<(), mpsc::error::SendError<T>> {
        match self {
            Self::Bounded(tx) => tx.send(item).await,
            Self::Unbounded(tx) => tx.send(item),
        }
    }
}

impl<T> HandoffReceiver<T> {
    /// Take the next item, or `None` once the queue is closed and drained.
    pub async fn recv(&mut self) -> Option<T> {
        match self {
            Self::Bounded(rx) => rx.recv().await,
            Self::Unbounded(rx) => rx.recv().await,
        }
    }
}

/// Create a handoff queue sized by the pipeline configuration.
pub fn handoff_channel<T>(config: &PipelineConfig) -> (HandoffSender<T>, HandoffReceiver<T>) {
    if config.buffer_size == 0 {
        let (tx, rx) = mpsc::unbounded_channel();
        (HandoffSender::Unbounded(tx), HandoffReceiver::Unbounded(rx))
    } else {
        let (tx, rx) = mpsc::channel(config.buffer_size);
        (HandoffSender::Bounded(tx), HandoffReceiver::Bounded(rx))
    }
}

/// One step of the pipeline: pulls from an input queue, pushes to an output queue.
///
/// Items are handled one at a time in arrival order. When the input is
/// exhausted the stage returns and drops its sender, which closes the output
/// and lets end-of-stream flow down the chain.
pub struct PipelineStage<I, O> {
    name: &'static str,
    input: HandoffReceiver<I>,
    output: HandoffSender<O>,
}

impl<I, O> PipelineStage<I, O> {
    /// Create a new pipeline stage.
    pub fn new(name: &'static str, input: HandoffReceiver<I>, output: HandoffSender<O>) -> Self {
        Self {
            name,
            input,
            output,
        }
    }

    /// Run the stage with a processing function.
    ///
    /// The function `f` is called for each input item. If it returns `Some(output)`,
    /// the output is sent to the next stage. If it returns `None`, the item is dropped.
    pub async fn run<F, Fut>(mut self, f: F)
    where
        F: Fn(I) -> Fut,
        Fut: std::future::Future<Output = Option<O>>,
    {
        while let Some(item) = self.input.recv().await {
            if let Some(result) = f(item).await {
                if self.output.send(result).await.is_err() {
                    tracing::debug!("{} stage: downstream closed, stopping", self.name);
                    break;
                }
            }
        }
        tracing::trace!("{} stage: input exhausted", self.name);
    }

    /// Run the stage with a fallible processing function.
    ///
    /// Similar to `run`, but the processing function can return a `Result`.
    /// Errors are logged and the item is skipped; the stage keeps going.
    pub async fn run_fallible<F, Fut, E>(mut self, f: F)
    where
        F: Fn(I) -> Fut,
        Fut: std::future::Future<Output = Result<O, E>>,
        E: std::fmt::Display,
    {
        while let Some(item) = self.input.recv().await {
            match f(item).await {
                Ok(result) => {
                    if self.output.send(result).await.is_err() {
                        tracing::debug!("{} stage: downstream closed, stopping", self.name);
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("{} stage: {}", self.name, e);
                }
            }
        }
        tracing::trace!("{} stage: input exhausted", self.name);
    }
}
