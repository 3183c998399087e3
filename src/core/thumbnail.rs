use crate::utils::data_uri;
use camino::{Utf8Path, Utf8PathBuf};
use image::ImageFormat;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

/// Longest edge of a decoded thumbnail, in pixels.
pub const THUMBNAIL_EDGE: u32 = 60;

#[derive(Debug, Clone)]
pub struct DecodedThumbnail {
    pub width: u32,
    pub height: u32,
    /// PNG-encoded pixels, ready to hand to an interface layer.
    pub png: Vec<u8>,
}

impl DecodedThumbnail {
    pub fn data_uri(&self) -> String {
        data_uri::png_data_uri(&self.png)
    }
}

#[derive(Debug)]
pub struct ThumbnailResult {
    pub token: u64,
    pub name: String,
    /// `None` when the preview file is missing or undecodable; the consumer
    /// falls back to a placeholder. Decode problems never propagate.
    pub image: Option<DecodedThumbnail>,
}

struct Job {
    token: u64,
    name: String,
    path: Utf8PathBuf,
}

/// Fixed pool of decode workers, fully decoupled from the lifecycle
/// operations: submissions are fire-and-forget, results arrive on the
/// receiver handed out at construction. Dropping the pool drains the workers.
pub struct ThumbnailPool {
    jobs: mpsc::Sender<Job>,
    counter: AtomicU64,
    _workers: Vec<thread::JoinHandle<()>>,
}

impl ThumbnailPool {
    pub fn new(worker_count: usize) -> (Self, mpsc::Receiver<ThumbnailResult>) {
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (result_tx, result_rx) = mpsc::channel();
        let job_rx = Arc::new(Mutex::new(job_rx));

        let workers = (0..worker_count.max(1))
            .map(|_| {
                let job_rx = Arc::clone(&job_rx);
                let result_tx = result_tx.clone();
                thread::spawn(move || loop {
                    // The guard is held across the blocking recv; workers
                    // take turns pulling jobs and decode outside the lock.
                    let job = {
                        let receiver = job_rx.lock();
                        receiver.recv()
                    };
                    let Ok(job) = job else {
                        break;
                    };
                    let image = decode(&job.path);
                    let result = ThumbnailResult {
                        token: job.token,
                        name: job.name,
                        image,
                    };
                    if result_tx.send(result).is_err() {
                        break;
                    }
                })
            })
            .collect();

        (
            Self {
                jobs: job_tx,
                counter: AtomicU64::new(0),
                _workers: workers,
            },
            result_rx,
        )
    }

    /// Queues a decode for a package's preview file and returns the token
    /// identifying this submission. Tokens increase monotonically.
    pub fn submit(&self, name: impl Into<String>, path: impl Into<Utf8PathBuf>) -> u64 {
        let token = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let _ = self.jobs.send(Job {
            token,
            name: name.into(),
            path: path.into(),
        });
        token
    }
}

/// Tracks the latest token issued per package so stale results can be
/// discarded instead of suppressed: a result is applied only when its token
/// matches the newest submission for that name.
#[derive(Debug, Default)]
pub struct TokenLedger {
    latest: BTreeMap<String, u64>,
}

impl TokenLedger {
    pub fn note(&mut self, name: &str, token: u64) {
        self.latest.insert(name.to_string(), token);
    }

    pub fn accepts(&self, result: &ThumbnailResult) -> bool {
        self.latest.get(&result.name) == Some(&result.token)
    }

    /// Drops tracking for an item no longer displayed; any in-flight result
    /// for it becomes stale.
    pub fn forget(&mut self, name: &str) {
        self.latest.remove(name);
    }
}

fn decode(path: &Utf8Path) -> Option<DecodedThumbnail> {
    if !path.exists() {
        return None;
    }
    let img = image::open(path).ok()?;
    let thumb = img.thumbnail(THUMBNAIL_EDGE, THUMBNAIL_EDGE);
    let mut png = Vec::new();
    thumb
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .ok()?;
    Some(DecodedThumbnail {
        width: thumb.width(),
        height: thumb.height(),
        png,
    })
}
