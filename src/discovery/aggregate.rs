//! Result Aggregation
//!
//! Workers never touch the shared result directly. They push items into two
//! bounded sinks (resources and errors) drained by a single collector task,
//! which is the only writer of the `DiscoveryResult` for the run.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::error;

use super::context::DiscoveryContext;
use super::types::{DiscoveryError, DiscoveryResult, Resource};

/// Producer side handed to workers
#[derive(Clone)]
pub struct Emitter {
    resources: mpsc::Sender<Resource>,
    errors: mpsc::Sender<DiscoveryError>,
    ctx: DiscoveryContext,
}

impl Emitter {
    /// Queue a resource. Returns `false` once the context is done; the
    /// resource is then discarded.
    pub async fn resource(&self, resource: Resource) -> bool {
        if self.ctx.is_done() {
            return false;
        }
        matches!(self.ctx.run(self.resources.send(resource)).await, Some(Ok(())))
    }

    pub async fn error(&self, discovery_error: DiscoveryError) -> bool {
        if self.ctx.is_done() {
            return false;
        }
        matches!(self.ctx.run(self.errors.send(discovery_error)).await, Some(Ok(())))
    }
}

/// Handle to the collector task
pub struct Aggregator {
    emitter: Emitter,
    handle: JoinHandle<DiscoveryResult>,
}

impl Aggregator {
    pub fn emitter(&self) -> Emitter {
        self.emitter.clone()
    }

    /// Close the sinks and wait for the collector to drain them. Emitters
    /// cloned out of this aggregator must be dropped first.
    pub async fn finish(self) -> DiscoveryResult {
        let Aggregator { emitter, handle } = self;
        drop(emitter);
        match handle.await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "Aggregation task failed");
                let mut result = DiscoveryResult::start();
                result.add_error(DiscoveryError::new(
                    "",
                    format!("aggregation task failed: {}", e),
                    false,
                ));
                result
            }
        }
    }
}

/// Start the collector that owns `result` for the rest of the run
pub fn spawn_aggregator(
    result: DiscoveryResult,
    resource_capacity: usize,
    error_capacity: usize,
    ctx: DiscoveryContext,
) -> Aggregator {
    let (resource_tx, resource_rx) = mpsc::channel(resource_capacity.max(1));
    let (error_tx, error_rx) = mpsc::channel(error_capacity.max(1));

    let handle = tokio::spawn(collect(result, resource_rx, error_rx));

    Aggregator {
        emitter: Emitter {
            resources: resource_tx,
            errors: error_tx,
            ctx,
        },
        handle,
    }
}

async fn collect(
    mut result: DiscoveryResult,
    mut resources: mpsc::Receiver<Resource>,
    mut errors: mpsc::Receiver<DiscoveryError>,
) -> DiscoveryResult {
    let mut resources_open = true;
    let mut errors_open = true;

    while resources_open || errors_open {
        tokio::select! {
            item = resources.recv(), if resources_open => match item {
                Some(resource) => result.add_resource(resource),
                None => resources_open = false,
            },
            item = errors.recv(), if errors_open => match item {
                Some(discovery_error) => result.add_error(discovery_error),
                None => errors_open = false,
            },
        }
    }

    result
}
