#![allow(dead_code)]

use setlist_playback::{MediaDevice, StartFuture};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
pub struct DeviceState {
    pub source: Option<String>,
    pub playing: bool,
    pub position: f64,
    pub duration: Option<f64>,
    pub gain: f32,
}

pub type DeviceHandle = Arc<Mutex<DeviceState>>;

/// Device that accepts every start request
pub struct TestDevice(DeviceHandle);

impl TestDevice {
    pub fn boxed() -> (Box<dyn MediaDevice>, DeviceHandle) {
        let state = DeviceHandle::default();
        (Box::new(Self(Arc::clone(&state))), state)
    }
}

impl MediaDevice for TestDevice {
    fn set_source(&mut self, url: &str) {
        let mut state = self.0.lock().unwrap();
        state.source = Some(url.to_string());
        state.position = 0.0;
    }

    fn clear_source(&mut self) {
        let mut state = self.0.lock().unwrap();
        state.source = None;
        state.playing = false;
    }

    fn start(&mut self) -> StartFuture {
        self.0.lock().unwrap().playing = true;
        Box::pin(std::future::ready(Ok(())))
    }

    fn pause(&mut self) {
        self.0.lock().unwrap().playing = false;
    }

    fn position(&self) -> f64 {
        self.0.lock().unwrap().position
    }

    fn set_position(&mut self, seconds: f64) {
        self.0.lock().unwrap().position = seconds;
    }

    fn duration(&self) -> Option<f64> {
        self.0.lock().unwrap().duration
    }

    fn set_volume(&mut self, gain: f32) {
        self.0.lock().unwrap().gain = gain;
    }
}
