#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pull},
    peripherals::SPI2,
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use embassy_time::{Delay, Duration, Instant, Ticker, Timer};
use nrf_softdevice::Softdevice;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{
    backlight::Backlight,
    battery::Battery,
    display::Display,
    vibrator::{PulseLength, Vibrator},
};
use pinetime_watchface::{
    battery::BatteryInfo,
    config::WatchfaceConfig,
    time::{MinuteTicker, TimeReference, CTS_LEN},
    ui::{DefaultWatchface, WatchFace, WatchFaceState},
};
use system::{
    bluetooth::{self, Server},
    config::SystemConfig,
};

// Others
use chrono::{NaiveDateTime, Timelike};

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

const CONFIG: WatchfaceConfig = WatchfaceConfig {
    utc_offset_secs: 1 * 3_600,
    ..WatchfaceConfig::new()
};

// Communication channels
static BATTERY_STATUS: Signal<ThreadModeRawMutex, BatteryInfo> = Signal::new();
static CONNECTION: Signal<ThreadModeRawMutex, bool> = Signal::new();
static NOTIFY: Signal<ThreadModeRawMutex, u8> = Signal::new();
static TIME: Signal<ThreadModeRawMutex, NaiveDateTime> = Signal::new();
static TIME_SYNC: Signal<ThreadModeRawMutex, [u8; CTS_LEN]> = Signal::new();

static SERVER: StaticCell<Server> = StaticCell::new();

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// Advertise and track the phone connection
#[embassy_executor::task(pool_size = 1)]
async fn bluetooth_task(sd: &'static Softdevice, server: &'static Server) {
    bluetooth::run(
        sd,
        server,
        |connected| {
            CONNECTION.signal(connected);
            if !connected && CONFIG.vibrate_on_disconnect {
                NOTIFY.signal(CONFIG.disconnect_pulses);
            }
        },
        |bytes| TIME_SYNC.signal(bytes),
    )
    .await
}

/// Vibrate when signaled
#[embassy_executor::task(pool_size = 1)]
async fn notify(mut vibrator: Vibrator<'static>) {
    loop {
        // Vibrate signaled amount of times
        let count = NOTIFY.wait().await;
        vibrator.pulse(PulseLength::SHORT, count).await;
    }
}

/// Fetch the battery status from the hardware.
#[embassy_executor::task(pool_size = 1)]
async fn update_battery_status(mut battery: Battery<'static>, server: &'static Server) {
    loop {
        match battery.update().await {
            Ok(true) => {
                // Battery status changed
                let info = battery.info();
                defmt::info!("Battery status updated");
                bluetooth::set_battery_level(server, info.percent);
                BATTERY_STATUS.signal(info);
            }
            Ok(false) => {}
            Err(e) => defmt::warn!("Battery measurement failed: {}", e),
        }

        // Re-schedule the timer interrupt in 1s
        Timer::after(Duration::from_secs(1)).await;
    }
}

#[embassy_executor::task(pool_size = 1)]
async fn update_lcd(mut display: Display<'static, SPI2>, mut face: DefaultWatchface) {
    let mut tick = Ticker::every(Duration::from_millis(100));
    loop {
        if BATTERY_STATUS.signaled() {
            let status = BATTERY_STATUS.wait().await;
            defmt::info!(
                "Battery status: {} ({})",
                status.percent,
                if status.charging {
                    "charging"
                } else {
                    "discharging"
                }
            );
            face.on_battery(status);
        }

        if CONNECTION.signaled() {
            let connected = CONNECTION.wait().await;
            defmt::info!("Phone connected: {}", connected);
            face.on_connection(connected);
        }

        if TIME.signaled() {
            let time = TIME.wait().await;
            defmt::info!("Current time: {}:{}", time.hour(), time.minute());
            face.on_tick(time);
        }

        if face.is_dirty() {
            if let Err(e) = display.render(&mut face) {
                defmt::warn!("Redraw failed: {}", e);
            }
        }

        tick.next().await;
    }
}

/// Keep the local time and signal every new minute.
#[embassy_executor::task(pool_size = 1)]
async fn update_time(mut reference: TimeReference) {
    let mut minutes = MinuteTicker::new();
    let mut tick = Ticker::every(Duration::from_secs(1));
    loop {
        let uptime = Instant::now().as_secs();

        if TIME_SYNC.signaled() {
            let bytes = TIME_SYNC.wait().await;
            match TimeReference::from_cts_bytes(&bytes, uptime) {
                Ok(synced) => {
                    defmt::info!("Time synchronized");
                    reference = synced;
                    minutes.reset();
                }
                Err(e) => defmt::warn!("Invalid current time: {}", e),
            }
        }

        // Send time to channel
        if let Some(minute) = minutes.poll(reference.now(uptime)) {
            TIME.signal(minute);
        }

        // Re-schedule the timer interrupt
        tick.next().await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(SystemConfig::new());
    SystemConfig::configure_interrupts();
    defmt::info!("Initializing");

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    // Initialize Backlight
    let mut backlight = Backlight::init(
        Output::new(p.P0_14, Level::High, OutputDrive::Standard),
        Output::new(p.P0_22, Level::High, OutputDrive::Standard),
        Output::new(p.P0_23, Level::High, OutputDrive::Standard),
    );

    // Initialize Battery
    let battery = unwrap!(Battery::init(saadc, Input::new(p.P0_12, Pull::None)).await);

    // Initialize vibration motor
    let vibrator = Vibrator::init(Output::new(p.P0_16, Level::High, OutputDrive::Standard));

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25, Level::High, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
        &mut Delay,
    ));
    unwrap!(backlight.set(CONFIG.backlight_level));

    // Initialize Bluetooth
    let sd = Softdevice::enable(&bluetooth::softdevice_config());
    let server: &'static Server = SERVER.init(unwrap!(Server::new(sd)));
    let sd: &'static Softdevice = sd;
    bluetooth::set_battery_level(server, battery.info().percent);

    // Start from the build time until the phone sends the current time
    let boot_time = unwrap!(TimeReference::from_timestamp(UTC_EPOCH, 0));
    let reference = TimeReference::new(CONFIG.local_time(boot_time.now(0)), 0);

    let face = DefaultWatchface::new(
        CONFIG,
        WatchFaceState {
            time: reference.now(0),
            battery: battery.info(),
            connected: false,
        },
    );

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(bluetooth_task(sd, server)));
    unwrap!(spawner.spawn(update_battery_status(battery, server)));
    unwrap!(spawner.spawn(update_lcd(display, face)));
    unwrap!(spawner.spawn(update_time(reference)));
    unwrap!(spawner.spawn(notify(vibrator)));
}
