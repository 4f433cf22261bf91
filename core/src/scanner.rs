//! The fan-out/fan-in **worker pool** behind every scan.
//!
//! A feeder pushes every address onto a work queue and closes it. A fixed
//! number of workers pull from that queue, turn each address into exactly one
//! [`HostRecord`] through a [`HostScanner`], and push it onto a result queue.
//! A closer drops the last result sender once every worker has returned, so
//! the collector's drain loop ends exactly when the scan is complete.
//!
//! **Cancellation:** not supported mid-scan. A caller that needs it would pass a
//! cancellation token into each worker and race it against `scan_host`.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use hostmap_common::network::host::{HostRecord, ScanSummary};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{trace, warn};

pub mod identify;
pub mod probe;

/// Called by the collector with `(completed, total)` after every record.
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Produces the record for a single address. Must not fail: every outcome is a record.
#[async_trait]
pub trait HostScanner: Send + Sync {
    async fn scan_host(&self, addr: Ipv4Addr, timeout: Duration) -> HostRecord;
}

type WorkQueue = Arc<Mutex<mpsc::Receiver<Ipv4Addr>>>;

/// Runs `scanner` over `addresses` with `worker_count` concurrent workers.
///
/// `worker_count` is raised to 1 if zero. Records come back in completion order.
pub async fn run_pool(
    scanner: Arc<dyn HostScanner>,
    addresses: Vec<Ipv4Addr>,
    timeout: Duration,
    worker_count: usize,
    progress: Option<ProgressCallback>,
) -> ScanSummary {
    let start_time = Instant::now();
    let total = addresses.len();
    let worker_count = worker_count.max(1);
    // tokio channels reject a zero capacity
    let capacity = total.max(1);

    let (work_tx, work_rx) = mpsc::channel::<Ipv4Addr>(capacity);
    let (result_tx, mut result_rx) = mpsc::channel::<HostRecord>(capacity);
    let work_queue: WorkQueue = Arc::new(Mutex::new(work_rx));

    let workers: Vec<JoinHandle<()>> = (0..worker_count)
        .map(|id| {
            tokio::spawn(worker(
                id,
                scanner.clone(),
                work_queue.clone(),
                result_tx.clone(),
                timeout,
            ))
        })
        .collect();

    tokio::spawn(feed(addresses, work_tx));
    tokio::spawn(close_when_done(workers, result_tx));

    let mut records: Vec<HostRecord> = Vec::with_capacity(total);
    let mut reachable_count: usize = 0;

    while let Some(record) = result_rx.recv().await {
        if record.is_reachable {
            reachable_count += 1;
        }
        records.push(record);

        if let Some(cb) = &progress {
            cb(records.len(), total);
        }
    }

    if records.len() != total {
        warn!("Scan finished with {} of {total} records", records.len());
    }

    ScanSummary {
        range: String::new(),
        total_count: total,
        reachable_count,
        records,
        elapsed: start_time.elapsed(),
    }
}

async fn feed(addresses: Vec<Ipv4Addr>, work_tx: mpsc::Sender<Ipv4Addr>) {
    for addr in addresses {
        if work_tx.send(addr).await.is_err() {
            break;
        }
    }
}

async fn worker(
    id: usize,
    scanner: Arc<dyn HostScanner>,
    work_queue: WorkQueue,
    result_tx: mpsc::Sender<HostRecord>,
    timeout: Duration,
) {
    let mut handled: usize = 0;

    loop {
        let next = work_queue.lock().await.recv().await;
        let Some(addr) = next else {
            break;
        };

        let record = scanner.scan_host(addr, timeout).await;
        handled += 1;

        if result_tx.send(record).await.is_err() {
            break;
        }
    }

    trace!(worker = id, handled, "work queue drained");
}

/// Holds the collector's last sender until every worker has exited.
async fn close_when_done(workers: Vec<JoinHandle<()>>, result_tx: mpsc::Sender<HostRecord>) {
    for handle in workers {
        if let Err(e) = handle.await {
            warn!("Scan worker terminated abnormally: {e}");
        }
    }
    drop(result_tx);
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
