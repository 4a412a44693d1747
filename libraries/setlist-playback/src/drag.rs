//! Drag-seek session
//!
//! A drag holds the global pointer capture for exactly as long as the
//! `DragSession` value lives. Release happens in `Drop`, so normal release,
//! pointer cancel, replacement by a new drag and unwinding all detach the
//! listeners.

use crate::device::PointerCapture;
use crate::types::ElementBounds;
use std::sync::{Arc, Mutex, PoisonError};

/// Pointer capture shared between the controller and its drag sessions
pub(crate) type SharedCapture = Arc<Mutex<Box<dyn PointerCapture>>>;

/// Active drag gesture over the progress element
pub struct DragSession {
    capture: SharedCapture,
    bounds: ElementBounds,
}

impl DragSession {
    /// Acquire the global capture and start a drag over `bounds`
    pub(crate) fn begin(capture: SharedCapture, bounds: ElementBounds) -> Self {
        capture
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .acquire();

        tracing::trace!(left = bounds.left, width = bounds.width, "Drag started");

        Self { capture, bounds }
    }

    /// Bounds captured when the drag started
    pub fn bounds(&self) -> ElementBounds {
        self.bounds
    }

    /// Map a pointer position to a seek fraction
    pub fn fraction_at(&self, pointer_x: f64) -> f64 {
        self.bounds.fraction_at(pointer_x)
    }
}

impl Drop for DragSession {
    fn drop(&mut self) {
        self.capture
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .release();

        tracing::trace!("Drag capture released");
    }
}
