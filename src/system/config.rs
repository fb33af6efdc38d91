//! General system configuration

use embassy_nrf::{
    config::{Config, Debug, HfclkSource, LfclkSource},
    interrupt::{self, InterruptExt, Priority},
};

/// Priority for peripheral interrupts, clear of the SoftDevice's 0, 1 and 4
const PERIPHERAL_PRIORITY: Priority = Priority::P2;

pub struct SystemConfig {}

impl SystemConfig {
    /// Create new system configuration
    pub fn new() -> Config {
        // Generate default config, required because Config is set as
        // `non_exhaustive`
        let mut config = Config::default();

        // Set high-frequency and low-frequency clock sources to external
        config.hfclk_source = HfclkSource::ExternalXtal;
        config.lfclk_source = LfclkSource::ExternalXtal;

        // Enable DC/DC regulator to massively reduce runtime current consumption
        config.dcdc.reg1 = true;

        config.gpiote_interrupt_priority = PERIPHERAL_PRIORITY;
        config.time_interrupt_priority = PERIPHERAL_PRIORITY;

        // Allow debugging
        config.debug = Debug::Allowed;

        config
    }

    /// Move the driver interrupts used by the firmware off the default
    /// priority 0, which the SoftDevice reserves.
    pub fn configure_interrupts() {
        interrupt::SAADC.set_priority(PERIPHERAL_PRIORITY);
        interrupt::SPIM2_SPIS2_SPI2.set_priority(PERIPHERAL_PRIORITY);
    }
}
