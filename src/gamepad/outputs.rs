//! LED and speaker outputs

use crate::backend::{AnalogBackend, BackendError, Callback, HardwareBackend, PwmBackend};
use crate::config::{LedConfig, SpeakerConfig};
use crate::gamepad::constants::{DAC_HIGH, DAC_LOW, MIN_TONE_FREQUENCY_HZ};
use crate::gamepad::controller::GamepadError;
use crate::gamepad::types::PinName;
use log::{debug, warn};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// The six PWM LEDs. They are active-low: full brightness is duty 0.0.
#[derive(Debug, Clone)]
pub struct Leds {
    pins: Vec<PinName>,
}

impl Leds {
    pub fn new(config: &LedConfig) -> Self {
        Self { pins: config.pins.clone() }
    }

    pub fn count(&self) -> usize {
        self.pins.len()
    }

    /// Set every LED to a brightness (clamped to 0.0..=1.0)
    pub fn set_all<P: PwmBackend + ?Sized>(&self, hw: &P, brightness: f32) -> Result<(), BackendError> {
        let duty = active_low(brightness);
        for pin in &self.pins {
            hw.set_duty(pin, duty)?;
        }
        Ok(())
    }

    /// Set LED `n` (1-based) to a brightness (clamped to 0.0..=1.0)
    pub fn set<P: PwmBackend + ?Sized>(&self, hw: &P, n: u8, brightness: f32) -> Result<(), GamepadError> {
        let pin = usize::from(n)
            .checked_sub(1)
            .and_then(|i| self.pins.get(i))
            .ok_or(GamepadError::InvalidLed(n))?;

        hw.set_duty(pin, active_low(brightness))?;
        Ok(())
    }
}

fn active_low(brightness: f32) -> f32 {
    1.0 - brightness.clamp(0.0, 1.0)
}

/// Piezo speaker driven as a square wave from the DAC
#[derive(Debug, Clone)]
pub struct Speaker {
    dac: PinName,
    /// Id of the most recent tone. A timeout only stops the ticker of its own tone.
    current_tone: Arc<Mutex<u64>>,
}

impl Speaker {
    pub fn new(config: &SpeakerConfig) -> Self {
        Self {
            dac: config.dac.clone(),
            current_tone: Arc::new(Mutex::new(0)),
        }
    }

    pub fn dac(&self) -> &PinName {
        &self.dac
    }

    /// Drive the speaker low
    pub fn silence<A: AnalogBackend + ?Sized>(&self, hw: &A) {
        hw.write_dac(&self.dac, DAC_LOW);
    }

    /// Play a tone for `duration_s` seconds.
    ///
    /// Frequencies below 1 kHz are refused since they can damage the piezo.
    pub fn tone<H: HardwareBackend>(&self, hw: &Arc<H>, frequency_hz: f32, duration_s: f32) -> Result<(), GamepadError> {
        if !frequency_hz.is_finite() || frequency_hz < MIN_TONE_FREQUENCY_HZ {
            warn!("Refusing tone at {} Hz (minimum {} Hz)", frequency_hz, MIN_TONE_FREQUENCY_HZ);
            return Ok(());
        }
        if !duration_s.is_finite() || duration_s <= 0.0 {
            return Err(GamepadError::InvalidTone(format!("duration {} s", duration_s)));
        }

        let duration = Duration::try_from_secs_f32(duration_s)
            .map_err(|e| GamepadError::InvalidTone(format!("duration {} s: {}", duration_s, e)))?;
        // flip the DAC every half period
        let half_period = Duration::try_from_secs_f32(0.5 / frequency_hz)
            .ok()
            .filter(|d| !d.is_zero())
            .ok_or_else(|| GamepadError::InvalidTone(format!("frequency {} Hz", frequency_hz)))?;
        debug!("Tone {} Hz for {:?} (half period {:?})", frequency_hz, duration, half_period);

        let flip: Callback = {
            let hw = Arc::clone(hw);
            let dac = self.dac.clone();
            Arc::new(move || flip_dac(hw.as_ref(), &dac))
        };

        // Held until both timers are in place, so a stale timeout firing
        // meanwhile waits and then sees a newer id.
        let mut current = self.current_tone.lock().unwrap_or_else(PoisonError::into_inner);
        *current += 1;
        hw.attach_timeout(duration, self.tone_off(hw, *current))?;
        hw.attach_ticker(half_period, flip)?;

        Ok(())
    }

    /// Timeout handler that stops the ticker if tone `id` is still the current one
    fn tone_off<H: HardwareBackend>(&self, hw: &Arc<H>, id: u64) -> Callback {
        let hw = Arc::clone(hw);
        let current_tone = Arc::clone(&self.current_tone);
        Arc::new(move || {
            let current = current_tone.lock().unwrap_or_else(PoisonError::into_inner);
            if *current == id {
                hw.detach_ticker();
            } else {
                debug!("Timeout of tone {} ignored (tone {} playing)", id, *current);
            }
        })
    }
}

fn flip_dac<A: AnalogBackend + ?Sized>(hw: &A, dac: &PinName) {
    if hw.read_dac(dac) == DAC_HIGH {
        hw.write_dac(dac, DAC_LOW);
    } else {
        hw.write_dac(dac, DAC_HIGH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockHardware;

    #[test]
    fn test_leds_are_active_low_and_clamped() {
        let hw = MockHardware::new();
        let config = LedConfig::default();
        let leds = Leds::new(&config);

        leds.set_all(&hw, 1.0).unwrap();
        assert_eq!(hw.duty(&config.pins[0]), Some(0.0));

        leds.set_all(&hw, 2.5).unwrap();
        assert_eq!(hw.duty(&config.pins[5]), Some(0.0));

        leds.set_all(&hw, -1.0).unwrap();
        assert_eq!(hw.duty(&config.pins[3]), Some(1.0));
    }

    #[test]
    fn test_single_led() {
        let hw = MockHardware::new();
        let config = LedConfig::default();
        let leds = Leds::new(&config);

        leds.set(&hw, 2, 0.25).unwrap();
        assert_eq!(hw.duty(&config.pins[1]), Some(0.75));
        assert_eq!(hw.duty(&config.pins[0]), None);
    }

    #[test]
    fn test_led_number_out_of_range() {
        let hw = MockHardware::new();
        let leds = Leds::new(&LedConfig::default());

        assert!(matches!(leds.set(&hw, 0, 1.0), Err(GamepadError::InvalidLed(0))));
        assert!(matches!(leds.set(&hw, 7, 1.0), Err(GamepadError::InvalidLed(7))));
    }

    #[test]
    fn test_flip_dac_toggles() {
        let hw = MockHardware::new();
        let dac = PinName::from("DAC0_OUT");

        flip_dac(&hw, &dac);
        assert_eq!(hw.read_dac(&dac), DAC_HIGH);
        flip_dac(&hw, &dac);
        assert_eq!(hw.read_dac(&dac), DAC_LOW);
    }

    #[test]
    fn test_low_tone_refused() {
        let hw = Arc::new(MockHardware::new());
        let speaker = Speaker::new(&SpeakerConfig::default());

        speaker.tone(&hw, 440.0, 0.5).unwrap();
        assert!(!hw.ticker_active());
    }

    #[test]
    fn test_bad_duration() {
        let hw = Arc::new(MockHardware::new());
        let speaker = Speaker::new(&SpeakerConfig::default());

        assert!(matches!(speaker.tone(&hw, 2000.0, 0.0), Err(GamepadError::InvalidTone(_))));
        assert!(!hw.ticker_active());
    }

    #[test]
    fn test_unrepresentable_half_period() {
        let hw = Arc::new(MockHardware::new());
        let speaker = Speaker::new(&SpeakerConfig::default());

        assert!(matches!(speaker.tone(&hw, f32::MAX, 0.5), Err(GamepadError::InvalidTone(_))));
        assert!(!hw.ticker_active());
    }

    #[test]
    fn test_stale_timeout_leaves_new_tone_playing() {
        let hw = Arc::new(MockHardware::new());
        let speaker = Speaker::new(&SpeakerConfig::default());

        speaker.tone(&hw, 2000.0, 5.0).unwrap();
        let first = *speaker.current_tone.lock().unwrap();
        let stale = speaker.tone_off(&hw, first);

        speaker.tone(&hw, 3000.0, 5.0).unwrap();
        stale();
        assert!(hw.ticker_active());

        let second = *speaker.current_tone.lock().unwrap();
        assert_ne!(first, second);
        speaker.tone_off(&hw, second)();
        assert!(!hw.ticker_active());
    }
}
