//! Button event model
//!
//! Each button has two independent facets:
//! - `pressed`: a one-shot latch set by the falling-edge interrupt and
//!   consumed by the query
//! - `held`: the live pin level, read fresh on every call
//!
//! Buttons are active-low with the internal pull-up enabled, so a press is a
//! high-to-low transition and a held button reads low.

use crate::backend::{BackendError, Callback, DigitalBackend};
use crate::config::ButtonConfig;
use crate::gamepad::types::{ButtonId, PinName};
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Edge latch shared between the interrupt handler and the application.
///
/// The handler only ever sets it and the application only ever clears it,
/// so a single atomic flag is enough.
#[derive(Debug, Default)]
pub struct ButtonLatch {
    fall: AtomicBool,
}

impl ButtonLatch {
    pub const fn new() -> Self {
        Self { fall: AtomicBool::new(false) }
    }

    /// Record a press. Safe to call from an interrupt context.
    pub fn on_falling_edge(&self) {
        self.fall.store(true, Ordering::Release);
    }

    /// Consume a pending press. Returns true at most once per latched edge.
    pub fn take(&self) -> bool {
        self.fall.swap(false, Ordering::AcqRel)
    }

    /// Whether a press is pending, without consuming it
    pub fn is_set(&self) -> bool {
        self.fall.load(Ordering::Acquire)
    }

    pub fn clear(&self) {
        self.fall.store(false, Ordering::Release);
    }
}

/// The five board buttons, indexed by [`ButtonId`]
#[derive(Debug)]
pub struct ButtonBank {
    pins: [PinName; 5],
    latches: [Arc<ButtonLatch>; 5],
}

impl ButtonBank {
    pub fn new(config: &ButtonConfig) -> Self {
        Self {
            pins: ButtonId::ALL.map(|id| config.pin(id).clone()),
            latches: ButtonId::ALL.map(|_| Arc::new(ButtonLatch::new())),
        }
    }

    /// Pin a button is wired to
    pub fn pin(&self, id: ButtonId) -> &PinName {
        &self.pins[id.index()]
    }

    /// Shared handle to a button's latch
    pub fn latch(&self, id: ButtonId) -> Arc<ButtonLatch> {
        Arc::clone(&self.latches[id.index()])
    }

    /// Enable pull-ups, hook every button's falling edge to its latch and
    /// clear all latches.
    pub fn attach<D: DigitalBackend + ?Sized>(&self, hw: &D) -> Result<(), BackendError> {
        for id in ButtonId::ALL {
            let pin = self.pin(id);
            hw.set_pull_up(pin)?;

            let latch = self.latch(id);
            let handler: Callback = Arc::new(move || latch.on_falling_edge());
            hw.attach_falling_edge(pin, handler)?;
            debug!("Button {} wired to {}", id, pin);
        }

        self.reset_all();
        Ok(())
    }

    /// True if the button was pressed since the last call
    pub fn pressed(&self, id: ButtonId) -> bool {
        self.latches[id.index()].take()
    }

    /// True while the button is physically held down
    pub fn held<D: DigitalBackend + ?Sized>(&self, id: ButtonId, hw: &D) -> bool {
        !hw.read_level(self.pin(id))
    }

    /// Drop every pending press. Useful between scenes so presses from the
    /// previous one don't leak into the next.
    pub fn reset_all(&self) {
        for latch in &self.latches {
            latch.clear();
        }
    }
}
