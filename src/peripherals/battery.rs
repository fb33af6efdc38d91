//! Battery status check
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{gpio::Input, peripherals::P0_12, saadc::Saadc};

use pinetime_watchface::battery::{self, BatteryInfo, Error};

/// Battery API
pub struct Battery<'a> {
    /// ADC instance for battery voltage measurement
    adc: Saadc<'a, 1>,
    /// Charge indication pin:
    /// high = battery, low = charging
    pin_charge_indication: Input<'a, P0_12>,
    /// Last measured state
    info: BatteryInfo,
}

impl<'a> Battery<'a> {
    /// Configure battery on boot and take a first measurement
    pub async fn init(adc: Saadc<'a, 1>, charge_pin: Input<'a, P0_12>) -> Result<Self, Error> {
        let mut battery = Self {
            adc,
            pin_charge_indication: charge_pin,
            info: BatteryInfo::default(),
        };
        battery.update().await?;
        Ok(battery)
    }

    /// Last measured state. To fetch current data, call `update()` first.
    pub fn info(&self) -> BatteryInfo {
        self.info
    }

    /// Charging state of the battery
    fn is_charging(&self) -> bool {
        self.pin_charge_indication.is_low()
    }

    /// Battery voltage in millivolts
    async fn voltage(&mut self) -> Result<u16, Error> {
        let mut buf = [0; 1];
        self.adc.sample(&mut buf).await;
        battery::millivolts_from_adc(buf[0])
    }

    /// Update the battery state by reading information from the hardware.
    /// Return whether or not the values changed.
    pub async fn update(&mut self) -> Result<bool, Error> {
        let voltage = self.voltage().await?;
        let info = BatteryInfo::from_millivolts(voltage, self.is_charging());

        let changed = info != self.info;
        self.info = info;
        Ok(changed)
    }
}
