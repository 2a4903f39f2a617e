//! Background world generation on a worker pool.
//!
//! Large worlds can take a noticeable time to classify. This moves
//! [`BiomeGenerator::from_params`] onto worker threads, supports per-request
//! cancellation, and delivers finished worlds through a bounded channel. The
//! produced worlds are identical to ones built synchronously.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, bounded};
use dashmap::DashMap;

use crate::error::TerrainError;
use crate::generator::BiomeGenerator;
use crate::grid::WorldParams;

/// A request to generate one world.
#[derive(Clone, Debug)]
pub struct WorldRequest {
    /// Caller-chosen identifier echoed back in [`GeneratedWorld::id`].
    pub id: u64,
    pub params: WorldParams,
}

/// A finished (or rejected) generation request.
#[derive(Debug)]
pub struct GeneratedWorld {
    pub id: u64,
    pub result: Result<BiomeGenerator, TerrainError>,
    /// Wall time spent generating, in microseconds.
    pub generation_time_us: u64,
}

struct QueuedRequest {
    request: WorldRequest,
    cancelled: Arc<AtomicBool>,
}

/// A world on its way back, still tied to its request's cancellation flag.
struct FinishedRequest {
    world: GeneratedWorld,
    cancelled: Arc<AtomicBool>,
}

/// Worker pool that builds worlds off the calling thread.
///
/// Dropping the generator closes the task channel; workers exit once the
/// queue drains.
pub struct AsyncWorldGenerator {
    task_sender: Sender<QueuedRequest>,
    result_receiver: Receiver<FinishedRequest>,
    active: Arc<DashMap<u64, Arc<AtomicBool>>>,
    in_flight: Arc<AtomicU64>,
}

impl AsyncWorldGenerator {
    /// Spawn `thread_count` workers.
    ///
    /// At most `max_concurrent * 2` requests may be queued at once; finished
    /// worlds are buffered up to `result_capacity`.
    pub fn new(thread_count: usize, max_concurrent: usize, result_capacity: usize) -> Self {
        let (task_sender, task_receiver) = bounded::<QueuedRequest>(max_concurrent.max(1) * 2);
        let (result_sender, result_receiver) = bounded::<FinishedRequest>(result_capacity.max(1));
        let in_flight = Arc::new(AtomicU64::new(0));

        for worker in 0..thread_count.max(1) {
            let receiver = task_receiver.clone();
            let sender = result_sender.clone();
            let in_flight = Arc::clone(&in_flight);

            std::thread::Builder::new()
                .name(format!("worldgen-worker-{worker}"))
                .spawn(move || {
                    while let Ok(queued) = receiver.recv() {
                        let id = queued.request.id;
                        if queued.cancelled.load(Ordering::Relaxed) {
                            tracing::debug!(id, "skipping cancelled world request");
                            in_flight.fetch_sub(1, Ordering::Relaxed);
                            continue;
                        }

                        let start = Instant::now();
                        let result = BiomeGenerator::from_params(&queued.request.params);
                        let elapsed = start.elapsed().as_micros() as u64;

                        if !queued.cancelled.load(Ordering::Relaxed) {
                            let _ = sender.send(FinishedRequest {
                                world: GeneratedWorld {
                                    id,
                                    result,
                                    generation_time_us: elapsed,
                                },
                                cancelled: queued.cancelled,
                            });
                        }
                        in_flight.fetch_sub(1, Ordering::Relaxed);
                    }
                    tracing::debug!(worker, "worldgen worker exiting");
                })
                .expect("failed to spawn world generation worker thread");
        }

        Self {
            task_sender,
            result_receiver,
            active: Arc::new(DashMap::new()),
            in_flight,
        }
    }

    /// Pool sized to the machine, leaving two cores for the caller.
    pub fn with_defaults() -> Self {
        let cpus = num_cpus::get().max(2);
        Self::new((cpus - 2).max(1), 8, 16)
    }

    /// Queue a request.
    ///
    /// Returns the request back if the queue is full.
    #[allow(clippy::result_large_err)]
    pub fn submit(&self, request: WorldRequest) -> Result<(), WorldRequest> {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.active.insert(request.id, Arc::clone(&cancelled));
        self.in_flight.fetch_add(1, Ordering::Relaxed);

        self.task_sender
            .try_send(QueuedRequest { request, cancelled })
            .map_err(|e| {
                self.in_flight.fetch_sub(1, Ordering::Relaxed);
                let request = e.into_inner().request;
                self.active.remove(&request.id);
                request
            })
    }

    /// Cancel a request that has not been drained yet.
    ///
    /// Applies whether the request is queued, running or already finished:
    /// a cancelled world is never returned by [`drain_results`](Self::drain_results).
    /// No-op once the world has been drained.
    pub fn cancel(&self, id: u64) {
        if let Some((_, cancelled)) = self.active.remove(&id) {
            cancelled.store(true, Ordering::Relaxed);
        }
    }

    /// Collect every finished, uncancelled world without blocking.
    pub fn drain_results(&self) -> Vec<GeneratedWorld> {
        let mut results = Vec::new();
        while let Ok(FinishedRequest { world, cancelled }) = self.result_receiver.try_recv() {
            if cancelled.load(Ordering::Relaxed) {
                tracing::debug!(id = world.id, "dropping world cancelled after completion");
                continue;
            }
            // A resubmitted id owns a fresh flag; leave that entry alone.
            self.active
                .remove_if(&world.id, |_, flag| Arc::ptr_eq(flag, &cancelled));
            results.push(world);
        }
        results
    }

    /// Requests queued or executing.
    pub fn in_flight_count(&self) -> u64 {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Whether `id` has been submitted and not yet drained or cancelled.
    pub fn is_pending(&self, id: u64) -> bool {
        self.active.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn wait_for(generator: &AsyncWorldGenerator, count: usize) -> Vec<GeneratedWorld> {
        let deadline = Instant::now() + Duration::from_secs(30);
        let mut results = Vec::new();
        while results.len() < count && Instant::now() < deadline {
            results.extend(generator.drain_results());
            std::thread::sleep(Duration::from_millis(5));
        }
        results
    }

    #[test]
    fn test_async_matches_sync() {
        let generator = AsyncWorldGenerator::new(2, 4, 8);
        let params = WorldParams::new(1234, 2000.0, 1200.0);
        generator
            .submit(WorldRequest {
                id: 1,
                params: params.clone(),
            })
            .unwrap();

        let results = wait_for(&generator, 1);
        assert_eq!(results.len(), 1);
        let world = results[0].result.as_ref().unwrap();
        let sync = BiomeGenerator::from_params(&params).unwrap();
        assert_eq!(world.grid_array(), sync.grid_array());
        assert!(!generator.is_pending(1));
    }

    #[test]
    fn test_invalid_params_reported_not_panicked() {
        let generator = AsyncWorldGenerator::new(1, 2, 4);
        generator
            .submit(WorldRequest {
                id: 9,
                params: WorldParams::new(1, -5.0, 10.0),
            })
            .unwrap();
        let results = wait_for(&generator, 1);
        assert!(matches!(
            results[0].result,
            Err(TerrainError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_many_requests_all_complete() {
        let generator = AsyncWorldGenerator::new(3, 8, 16);
        for id in 0..6 {
            generator
                .submit(WorldRequest {
                    id,
                    params: WorldParams::new(id, 800.0, 600.0),
                })
                .unwrap();
        }
        let mut ids: Vec<u64> = wait_for(&generator, 6).iter().map(|w| w.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
        assert!((0..6).all(|id| !generator.is_pending(id)));
    }

    #[test]
    fn test_cancel_clears_pending() {
        let generator = AsyncWorldGenerator::new(1, 2, 4);
        generator
            .submit(WorldRequest {
                id: 3,
                params: WorldParams::new(3, 400.0, 400.0),
            })
            .unwrap();
        assert!(generator.is_pending(3));
        generator.cancel(3);
        assert!(!generator.is_pending(3));
        generator.cancel(3);
    }

    #[test]
    fn test_cancel_after_completion_drops_result() {
        let generator = AsyncWorldGenerator::new(1, 2, 4);
        generator
            .submit(WorldRequest {
                id: 1,
                params: WorldParams::new(1, 400.0, 400.0),
            })
            .unwrap();

        // The worker decrements the counter only after sending the result.
        let deadline = Instant::now() + Duration::from_secs(30);
        while generator.in_flight_count() > 0 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(generator.in_flight_count(), 0);

        generator.cancel(1);
        assert!(generator.drain_results().is_empty());
        assert!(!generator.is_pending(1));
    }

    #[test]
    fn test_full_queue_returns_request() {
        // No room for more than two queued requests and one buffered result.
        let generator = AsyncWorldGenerator::new(1, 1, 1);
        let big = WorldParams::new(5, 5000.0, 5000.0).with_cell_size(10.0);
        let mut rejected = None;
        for id in 0..16 {
            if let Err(request) = generator.submit(WorldRequest {
                id,
                params: big.clone(),
            }) {
                rejected = Some(request.id);
                break;
            }
        }
        let id = rejected.expect("queue never filled");
        assert!(!generator.is_pending(id));
        for id in 0..16 {
            generator.cancel(id);
        }
    }
}
