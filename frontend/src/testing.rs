//! Test doubles for the gateway and stream connector seams.

use crate::core::error::{FrontendError, Result};
use crate::core::service::{ConcallGateway, FrameStream, StreamConnector};
use async_trait::async_trait;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::stream::{self, StreamExt};
use parking_lot::Mutex;
use shared::{AnalyticsSnapshot, ConcallPage, ConcallSummary, PageMeta};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::Instant;

/// Let spawned tasks on the current-thread runtime run until they park.
pub(crate) async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

pub(crate) fn update_frame(total_visits: u64) -> String {
    format!(r#"{{"type":"analytics_update","total_visits":{total_visits}}}"#)
}

/// A page of `count` generated summaries
pub(crate) fn sample_page(page: u32, count: usize, total: u64, total_pages: u32) -> ConcallPage {
    ConcallPage {
        data: (0..count)
            .map(|i| ConcallSummary {
                name: format!("Company {page}-{i}"),
                date: "2024-05-14".to_string(),
                guidance: if i % 2 == 0 {
                    "Revenue growth of 12% expected".to_string()
                } else {
                    "NA".to_string()
                },
            })
            .collect(),
        meta: PageMeta {
            page,
            limit: None,
            total,
            total_pages,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PageRequest {
    List { page: u32, limit: u32 },
    Search { name: String, page: u32, limit: u32 },
}

impl PageRequest {
    pub(crate) fn page(&self) -> u32 {
        match self {
            PageRequest::List { page, .. } | PageRequest::Search { page, .. } => *page,
        }
    }
}

type PageResponder = Box<dyn Fn(&PageRequest) -> (Duration, Result<ConcallPage>) + Send + Sync>;

/// Scripted gateway that records every call.
pub(crate) struct FakeGateway {
    analytics: Mutex<VecDeque<Result<AnalyticsSnapshot>>>,
    analytics_calls: AtomicUsize,
    gate: Option<Semaphore>,
    pages: PageResponder,
    page_requests: Mutex<Vec<PageRequest>>,
}

impl FakeGateway {
    /// Analytics answers `total_visits: 0`, pages answer empty.
    pub(crate) fn new() -> Self {
        Self {
            analytics: Mutex::new(VecDeque::new()),
            analytics_calls: AtomicUsize::new(0),
            gate: None,
            pages: Box::new(|request| (Duration::ZERO, Ok(sample_page(request.page(), 0, 0, 1)))),
            page_requests: Mutex::new(Vec::new()),
        }
    }

    /// Analytics fetches answer from `results` in order, then fall back to zero.
    pub(crate) fn with_analytics(results: Vec<Result<AnalyticsSnapshot>>) -> Self {
        let gateway = Self::new();
        *gateway.analytics.lock() = results.into();
        gateway
    }

    /// Hold every analytics fetch until [`release`](Self::release) is called.
    pub(crate) fn gated(mut self) -> Self {
        self.gate = Some(Semaphore::new(0));
        self
    }

    pub(crate) fn release(&self, fetches: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(fetches);
        }
    }

    pub(crate) fn with_pages(
        mut self,
        responder: impl Fn(&PageRequest) -> (Duration, Result<ConcallPage>) + Send + Sync + 'static,
    ) -> Self {
        self.pages = Box::new(responder);
        self
    }

    pub(crate) fn analytics_calls(&self) -> usize {
        self.analytics_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn page_requests(&self) -> Vec<PageRequest> {
        self.page_requests.lock().clone()
    }

    async fn answer(&self, request: PageRequest) -> Result<ConcallPage> {
        let (delay, result) = (self.pages)(&request);
        self.page_requests.lock().push(request);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }
}

#[async_trait]
impl ConcallGateway for FakeGateway {
    async fn list_page(&self, page: u32, limit: u32) -> Result<ConcallPage> {
        self.answer(PageRequest::List { page, limit }).await
    }

    async fn search_page(&self, name: &str, page: u32, limit: u32) -> Result<ConcallPage> {
        self.answer(PageRequest::Search {
            name: name.to_string(),
            page,
            limit,
        })
        .await
    }

    async fn fetch_analytics(&self) -> Result<AnalyticsSnapshot> {
        self.analytics_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(FrontendError::network)?
                .forget();
        }
        self.analytics
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(AnalyticsSnapshot::with_total_visits(0)))
    }
}

/// Outcome of one scripted connection attempt
pub(crate) enum Script {
    Fail,
    Open(UnboundedReceiver<Result<String>>),
}

impl Script {
    /// An attempt that opens; frames are pushed through the returned sender and
    /// dropping it closes the connection.
    pub(crate) fn open() -> (Self, UnboundedSender<Result<String>>) {
        let (tx, rx) = mpsc::unbounded();
        (Script::Open(rx), tx)
    }
}

enum Fallback {
    Fail,
    Idle,
}

/// Stream connector that plays back scripted attempts and records when each
/// attempt was made.
pub(crate) struct FakeConnector {
    scripts: Mutex<VecDeque<Script>>,
    fallback: Fallback,
    attempts: Mutex<Vec<Instant>>,
}

impl FakeConnector {
    /// Every attempt opens a connection that stays silent forever.
    pub(crate) fn idle() -> Self {
        Self {
            scripts: Mutex::new(VecDeque::new()),
            fallback: Fallback::Idle,
            attempts: Mutex::new(Vec::new()),
        }
    }

    /// Every attempt fails.
    pub(crate) fn failing() -> Self {
        Self {
            fallback: Fallback::Fail,
            ..Self::idle()
        }
    }

    /// Attempts follow `scripts`, then fail.
    pub(crate) fn scripted(scripts: Vec<Script>) -> Self {
        let connector = Self::failing();
        *connector.scripts.lock() = scripts.into();
        connector
    }

    pub(crate) fn attempts(&self) -> Vec<Instant> {
        self.attempts.lock().clone()
    }
}

#[async_trait]
impl StreamConnector for FakeConnector {
    async fn connect(&self, _url: &str) -> Result<FrameStream> {
        self.attempts.lock().push(Instant::now());
        let script = self.scripts.lock().pop_front();
        match (script, &self.fallback) {
            (Some(Script::Open(frames)), _) => Ok(frames.boxed()),
            (Some(Script::Fail), _) | (None, Fallback::Fail) => {
                Err(FrontendError::network("connection refused"))
            }
            (None, Fallback::Idle) => Ok(stream::pending().boxed()),
        }
    }
}
