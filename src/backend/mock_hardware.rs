//! Mock gamepad board for testing.
//!
//! This backend keeps pin state in memory instead of touching real
//! peripherals. Tests drive the analog channels and button levels directly
//! and inspect what the driver wrote to the LEDs and the DAC. Timers run on
//! real threads via `timer_thread`.

use super::{
    AnalogBackend, BackendError, Callback, DigitalBackend, PwmBackend, ThreadTicker, ThreadTimeout,
    TimerBackend,
};
use crate::gamepad::types::PinName;
use log::{debug, info};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Default)]
struct PinState {
    analog: HashMap<PinName, f32>,
    dac: HashMap<PinName, f32>,
    dac_writes: usize,
    levels: HashMap<PinName, bool>,
    pull_ups: HashSet<PinName>,
    duty: HashMap<PinName, f32>,
    edge_handlers: HashMap<PinName, Callback>,
}

/// Mock board that records pin activity instead of driving hardware.
#[derive(Default)]
pub struct MockHardware {
    pins: Mutex<PinState>,
    ticker: Mutex<Option<ThreadTicker>>,
    timeout: Mutex<Option<ThreadTimeout>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockHardware {
    /// Create a new mock board. Every digital pin idles high, every analog
    /// channel reads 0.0 until set.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Stimulus
    // ------------------------------------------------------------------

    /// Set the value an analog channel reads (clamped to 0.0..=1.0)
    pub fn set_analog(&self, channel: &PinName, value: f32) {
        lock(&self.pins).analog.insert(channel.clone(), value.clamp(0.0, 1.0));
    }

    /// Set both joystick axes at once
    pub fn set_joystick(&self, horizontal: &PinName, vertical: &PinName, h: f32, v: f32) {
        let mut pins = lock(&self.pins);
        pins.analog.insert(horizontal.clone(), h.clamp(0.0, 1.0));
        pins.analog.insert(vertical.clone(), v.clamp(0.0, 1.0));
    }

    /// Drive a button pin low. Fires the falling-edge handler if the pin was high.
    pub fn press(&self, pin: &PinName) {
        let handler = {
            let mut pins = lock(&self.pins);
            let was_high = pins.levels.insert(pin.clone(), false).unwrap_or(true);
            if was_high {
                pins.edge_handlers.get(pin).cloned()
            } else {
                None
            }
        };

        if let Some(handler) = handler {
            info!("[MOCK HW] Falling edge on {}", pin);
            handler();
        }
    }

    /// Drive a button pin high again
    pub fn release(&self, pin: &PinName) {
        debug!("[MOCK HW] Release {}", pin);
        lock(&self.pins).levels.insert(pin.clone(), true);
    }

    /// Invoke a pin's falling-edge handler without changing its level
    /// (contact bounce, injected interrupt). Returns false if none is attached.
    pub fn fire_falling_edge(&self, pin: &PinName) -> bool {
        let handler = lock(&self.pins).edge_handlers.get(pin).cloned();
        match handler {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    /// Last duty cycle written to a PWM pin
    pub fn duty(&self, pin: &PinName) -> Option<f32> {
        lock(&self.pins).duty.get(pin).copied()
    }

    /// Whether the pull-up was enabled on a pin
    pub fn has_pull_up(&self, pin: &PinName) -> bool {
        lock(&self.pins).pull_ups.contains(pin)
    }

    /// Whether a falling-edge handler is attached to a pin
    pub fn has_edge_handler(&self, pin: &PinName) -> bool {
        lock(&self.pins).edge_handlers.contains_key(pin)
    }

    /// Number of DAC writes since creation
    pub fn dac_writes(&self) -> usize {
        lock(&self.pins).dac_writes
    }

    /// Whether a ticker is currently attached
    pub fn ticker_active(&self) -> bool {
        lock(&self.ticker).is_some()
    }

    /// Period of the attached ticker
    pub fn ticker_period(&self) -> Option<Duration> {
        lock(&self.ticker).as_ref().map(ThreadTicker::period)
    }
}

impl AnalogBackend for MockHardware {
    fn read_analog(&self, channel: &PinName) -> f32 {
        lock(&self.pins).analog.get(channel).copied().unwrap_or(0.0)
    }

    fn write_dac(&self, channel: &PinName, value: f32) {
        let mut pins = lock(&self.pins);
        pins.dac.insert(channel.clone(), value.clamp(0.0, 1.0));
        pins.dac_writes += 1;
    }

    fn read_dac(&self, channel: &PinName) -> f32 {
        lock(&self.pins).dac.get(channel).copied().unwrap_or(0.0)
    }
}

impl DigitalBackend for MockHardware {
    fn set_pull_up(&self, pin: &PinName) -> Result<(), BackendError> {
        debug!("[MOCK HW] Pull-up on {}", pin);
        let mut pins = lock(&self.pins);
        pins.pull_ups.insert(pin.clone());
        pins.levels.entry(pin.clone()).or_insert(true);
        Ok(())
    }

    fn read_level(&self, pin: &PinName) -> bool {
        lock(&self.pins).levels.get(pin).copied().unwrap_or(true)
    }

    fn attach_falling_edge(&self, pin: &PinName, handler: Callback) -> Result<(), BackendError> {
        debug!("[MOCK HW] Falling-edge handler attached to {}", pin);
        lock(&self.pins).edge_handlers.insert(pin.clone(), handler);
        Ok(())
    }
}

impl PwmBackend for MockHardware {
    fn set_duty(&self, pin: &PinName, duty: f32) -> Result<(), BackendError> {
        debug!("[MOCK HW] PWM {} duty={:.2}", pin, duty);
        lock(&self.pins).duty.insert(pin.clone(), duty);
        Ok(())
    }
}

impl TimerBackend for MockHardware {
    fn attach_ticker(&self, period: Duration, callback: Callback) -> Result<(), BackendError> {
        debug!("[MOCK HW] Ticker attached ({:?})", period);
        let ticker = ThreadTicker::spawn("mock-ticker", period, callback)?;
        *lock(&self.ticker) = Some(ticker);
        Ok(())
    }

    fn detach_ticker(&self) {
        if lock(&self.ticker).take().is_some() {
            debug!("[MOCK HW] Ticker detached");
        }
    }

    fn attach_timeout(&self, delay: Duration, callback: Callback) -> Result<(), BackendError> {
        debug!("[MOCK HW] Timeout attached ({:?})", delay);
        let timeout = ThreadTimeout::spawn("mock-timeout", delay, callback)?;
        *lock(&self.timeout) = Some(timeout);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn mock_pins_idle_high_and_zero() {
        let hw = MockHardware::new();
        let pin = PinName::from("PTC7");
        assert!(hw.read_level(&pin));
        assert_eq!(hw.read_analog(&pin), 0.0);
        assert_eq!(hw.duty(&pin), None);
    }

    #[test]
    fn press_fires_handler_only_on_transition() {
        let hw = MockHardware::new();
        let pin = PinName::from("PTC7");
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        hw.attach_falling_edge(&pin, Arc::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();

        hw.press(&pin);
        hw.press(&pin); // already low
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!hw.read_level(&pin));

        hw.release(&pin);
        hw.press(&pin);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn fire_falling_edge_without_handler() {
        let hw = MockHardware::new();
        assert!(!hw.fire_falling_edge(&PinName::from("PTC0")));
    }

    #[test]
    fn analog_values_are_clamped() {
        let hw = MockHardware::new();
        let pin = PinName::from("PTB2");
        hw.set_analog(&pin, 1.7);
        assert_eq!(hw.read_analog(&pin), 1.0);
        hw.set_analog(&pin, -0.2);
        assert_eq!(hw.read_analog(&pin), 0.0);
    }

    #[test]
    fn dac_writes_are_counted() {
        let hw = MockHardware::new();
        let dac = PinName::from("DAC0_OUT");
        hw.write_dac(&dac, 1.0);
        hw.write_dac(&dac, 0.0);
        assert_eq!(hw.dac_writes(), 2);
        assert_eq!(hw.read_dac(&dac), 0.0);
    }
}
