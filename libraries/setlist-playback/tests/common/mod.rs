//! Shared test doubles for the playback integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use setlist_core::{Resolver, SetlistError, SettingsStore, Track};
use setlist_playback::{MediaDevice, PlaybackError, PointerCapture, StartFuture};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// ============================================================================
// Tracks
// ============================================================================

/// Track with artist "Artist" and the given title; query is "Artist - {title}"
pub fn track(id: &str, position: u32) -> Track {
    Track::new(id, "Artist", id, position)
}

pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| track(id, i as u32))
        .collect()
}

pub fn url_for(query: &str) -> String {
    format!("https://cdn.test/{}", query.replace(' ', "_"))
}

// ============================================================================
// Resolvers
// ============================================================================

/// Resolves immediately and counts calls
#[derive(Default)]
pub struct CountingResolver {
    calls: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
    failing: Mutex<HashSet<String>>,
    fail_all: bool,
    yields: usize,
}

impl CountingResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Yield to the scheduler `yields` times before answering
    pub fn with_yields(yields: usize) -> Self {
        Self {
            yields,
            ..Self::default()
        }
    }

    pub fn fail_query(&self, query: &str) {
        self.failing.lock().unwrap().insert(query.to_string());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Resolver for CountingResolver {
    async fn resolve(&self, query: &str) -> setlist_core::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);

        for _ in 0..self.yields {
            tokio::task::yield_now().await;
        }

        self.active.fetch_sub(1, Ordering::SeqCst);

        if self.fail_all || self.failing.lock().unwrap().contains(query) {
            Err(SetlistError::resolution(format!("no source for {query}")))
        } else {
            Ok(url_for(query))
        }
    }
}

/// Always panics
pub struct PanickingResolver;

#[async_trait]
impl Resolver for PanickingResolver {
    async fn resolve(&self, query: &str) -> setlist_core::Result<String> {
        panic!("resolver blew up on {query}");
    }
}

/// A resolver call waiting for the test to answer it
pub struct ResolveCall {
    pub query: String,
    reply: oneshot::Sender<Result<String, String>>,
}

impl ResolveCall {
    /// Title part of the query
    pub fn title(&self) -> &str {
        self.query.rsplit(" - ").next().unwrap_or(&self.query)
    }

    pub fn succeed(self) {
        let url = url_for(&self.query);
        let _ = self.reply.send(Ok(url));
    }

    pub fn succeed_with(self, url: &str) {
        let _ = self.reply.send(Ok(url.to_string()));
    }

    pub fn fail(self, message: &str) {
        let _ = self.reply.send(Err(message.to_string()));
    }
}

/// Resolver whose calls only complete when the test says so
///
/// Every call is reported on the channel returned by `new`.
pub struct GatedResolver {
    calls: mpsc::UnboundedSender<ResolveCall>,
    started: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl GatedResolver {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ResolveCall>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let resolver = Self {
            calls: tx,
            started: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
        };
        (resolver, rx)
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Resolver for GatedResolver {
    async fn resolve(&self, query: &str) -> setlist_core::Result<String> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);

        let (reply, answer) = oneshot::channel();
        let _ = self.calls.send(ResolveCall {
            query: query.to_string(),
            reply,
        });

        let result = answer.await;
        self.active.fetch_sub(1, Ordering::SeqCst);

        match result {
            Ok(Ok(url)) => Ok(url),
            Ok(Err(message)) => Err(SetlistError::resolution(message)),
            Err(_) => Err(SetlistError::resolution("call abandoned")),
        }
    }
}

/// Receive the next `n` calls, sorted by title
pub async fn next_calls(rx: &mut mpsc::UnboundedReceiver<ResolveCall>, n: usize) -> Vec<ResolveCall> {
    let mut calls = Vec::with_capacity(n);
    for _ in 0..n {
        calls.push(rx.recv().await.expect("resolver channel closed"));
    }
    calls.sort_by(|a, b| a.query.cmp(&b.query));
    calls
}

// ============================================================================
// Device
// ============================================================================

#[derive(Debug, Default)]
pub struct DeviceState {
    pub source: Option<String>,
    pub sources: Vec<String>,
    pub playing: bool,
    pub position: f64,
    pub duration: Option<f64>,
    pub gain: f32,
    pub start_calls: usize,
    pub pause_calls: usize,
    /// Next start request is refused with this message
    pub reject_next_start: Option<String>,
    /// Seeking panics inside the device
    pub panic_on_seek: bool,
}

pub type DeviceHandle = Arc<Mutex<DeviceState>>;

/// In-memory playback device
pub struct MockDevice {
    state: DeviceHandle,
}

impl MockDevice {
    pub fn boxed() -> (Box<dyn MediaDevice>, DeviceHandle) {
        let state = Arc::new(Mutex::new(DeviceState::default()));
        let device = Self {
            state: Arc::clone(&state),
        };
        (Box::new(device), state)
    }
}

impl MediaDevice for MockDevice {
    fn set_source(&mut self, url: &str) {
        let mut state = self.state.lock().unwrap();
        state.source = Some(url.to_string());
        state.sources.push(url.to_string());
        state.playing = false;
        state.position = 0.0;
    }

    fn clear_source(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.source = None;
        state.playing = false;
        state.position = 0.0;
    }

    fn start(&mut self) -> StartFuture {
        let mut state = self.state.lock().unwrap();
        state.start_calls += 1;

        let outcome = match state.reject_next_start.take() {
            Some(message) => Err(PlaybackError::Device(message)),
            None => {
                state.playing = true;
                Ok(())
            }
        };

        Box::pin(std::future::ready(outcome))
    }

    fn pause(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.playing = false;
        state.pause_calls += 1;
    }

    fn position(&self) -> f64 {
        self.state.lock().unwrap().position
    }

    fn set_position(&mut self, seconds: f64) {
        let mut state = self.state.lock().unwrap();
        if state.panic_on_seek {
            drop(state);
            panic!("device failed to seek to {seconds}");
        }
        state.position = seconds;
    }

    fn duration(&self) -> Option<f64> {
        self.state.lock().unwrap().duration
    }

    fn set_volume(&mut self, gain: f32) {
        self.state.lock().unwrap().gain = gain;
    }
}

// ============================================================================
// Pointer capture
// ============================================================================

#[derive(Debug, Default)]
pub struct CaptureCounts {
    pub acquired: AtomicUsize,
    pub released: AtomicUsize,
}

impl CaptureCounts {
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

pub struct RecordingCapture(pub Arc<CaptureCounts>);

impl RecordingCapture {
    pub fn boxed() -> (Box<dyn PointerCapture>, Arc<CaptureCounts>) {
        let counts = Arc::new(CaptureCounts::default());
        (Box::new(Self(Arc::clone(&counts))), counts)
    }
}

impl PointerCapture for RecordingCapture {
    fn acquire(&mut self) {
        self.0.acquired.fetch_add(1, Ordering::SeqCst);
    }

    fn release(&mut self) {
        self.0.released.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Settings store whose writes always fail
pub struct ReadOnlySettings(pub Option<String>);

impl SettingsStore for ReadOnlySettings {
    fn load(&self, _key: &str) -> Option<String> {
        self.0.clone()
    }

    fn save(&self, _key: &str, _value: &str) -> setlist_core::Result<()> {
        Err(SetlistError::storage("read-only"))
    }
}
