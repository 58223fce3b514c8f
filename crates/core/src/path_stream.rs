use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use super::graph::DirectedGraph;
use super::simple_paths::{Step, all_simple_paths};

/// Paths buffered ahead of the consumer. With one slot the producer stays at
/// most one path ahead.
const PATH_BUFFER: usize = 1;

/// Simple-path enumeration running on a blocking worker.
///
/// The worker steps [`all_simple_paths`] and hands each path over a bounded
/// channel, blocking while the buffered path has not been taken. Dropping the
/// stream (or calling [`PathStream::cancel`]) closes the channel. The worker
/// checks the channel before every search step and exits once it is closed,
/// also when no further path would ever be found.
pub struct PathStream<V> {
    receiver: mpsc::Receiver<Vec<V>>,
    producer: JoinHandle<usize>,
}

impl<V> PathStream<V>
where
    V: Clone + Eq + Hash + Send + Sync + 'static,
{
    /// Starts enumerating simple paths from `from` to `to` with the given
    /// `cutoff`, see [`all_simple_paths`].
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime.
    pub fn spawn(graph: Arc<DirectedGraph<V>>, from: V, to: V, cutoff: usize) -> Self {
        let (sender, receiver) = mpsc::channel(PATH_BUFFER);

        let producer = tokio::task::spawn_blocking(move || {
            let mut search = all_simple_paths(&graph, &from, &to, cutoff);
            let mut sent = 0;
            loop {
                if sender.is_closed() {
                    debug!(sent, "Path consumer went away, stopping enumeration.");
                    return sent;
                }
                match search.step() {
                    Step::Found(path) => {
                        if sender.blocking_send(path).is_err() {
                            debug!(sent, "Path consumer went away, stopping enumeration.");
                            return sent;
                        }
                        sent += 1;
                    }
                    Step::Searching => {}
                    Step::Exhausted => break,
                }
            }
            trace!(sent, "Simple path enumeration exhausted.");
            sent
        });

        Self { receiver, producer }
    }
}

impl<V> PathStream<V> {
    /// Waits for the next path; `None` once the search is exhausted.
    pub async fn next(&mut self) -> Option<Vec<V>> {
        self.receiver.recv().await
    }

    /// Drains every remaining path.
    pub async fn collect_remaining(mut self) -> Vec<Vec<V>> {
        let mut paths = Vec::new();
        while let Some(path) = self.receiver.recv().await {
            paths.push(path);
        }
        paths
    }

    /// Stops the search early.
    ///
    /// Returns the worker's handle, which resolves to the number of paths it
    /// delivered into the channel once it has shut down.
    pub fn cancel(self) -> JoinHandle<usize> {
        let Self {
            mut receiver,
            producer,
        } = self;
        receiver.close();
        drop(receiver);
        producer
    }
}
