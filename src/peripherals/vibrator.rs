//! Control the vibration motor
//!
//! Implementation based upon https://github.com/tstellanova/cst816s/blob/master/examples/touchpad.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{gpio::Output, peripherals::P0_16};
use embassy_time::Timer;

#[allow(unused)]
#[derive(Clone, Copy)]
/// Pulse length in milliseconds
pub enum PulseLength {
    /// 200ms pulse
    SHORT = 200,
    /// 400 ms pulse
    LONG = 400,
}

/// Controller for the internal vibration motor
pub struct Vibrator<'a> {
    /// Pin P0.16: High = off, Low = on
    pin_enable: Output<'a, P0_16>,
}

impl<'a> Vibrator<'a> {
    /// Configure vibrator on boot
    pub fn init(mut enable_pin: Output<'a, P0_16>) -> Self {
        enable_pin.set_high();
        Self {
            pin_enable: enable_pin,
        }
    }

    /// Pulse the vibrator for the set amount of times and
    /// the specified pulse length, with equally long pauses in between.
    pub async fn pulse(&mut self, length: PulseLength, times: u8) {
        for i in 0..times {
            if i > 0 {
                Timer::after_millis(length as u64).await;
            }
            self.pin_enable.set_low();
            Timer::after_millis(length as u64).await;
            self.pin_enable.set_high();
        }
    }
}
