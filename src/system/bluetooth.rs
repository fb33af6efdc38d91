//! Bluetooth module
//!
//! Connectable peripheral exposing the battery level and accepting the
//! current time from the phone. The link state drives the watchface's
//! connection indicator.

// Core
use core::mem;

// BLE
use nrf_softdevice::{
    self,
    ble::{
        advertisement_builder::{
            Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload, ServiceList,
            ServiceUuid16,
        },
        gatt_server, peripheral,
    },
    raw, Config, Softdevice,
};

use embassy_time::{Duration, Timer};

use pinetime_watchface::{retry::Backoff, time::CTS_LEN};

pub static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .services_16(ServiceList::Complete, &[ServiceUuid16::BATTERY])
    .full_name("PineTime")
    .build();

pub static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .services_16(ServiceList::Complete, &[ServiceUuid16::BATTERY])
    .build();

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub bas: BatteryService,
    pub cts: CurrentTimeService,
}

#[nrf_softdevice::gatt_service(uuid = "180f")]
pub struct BatteryService {
    #[characteristic(uuid = "2a19", read, notify)]
    pub battery_level: u8,
}

#[nrf_softdevice::gatt_service(uuid = "1805")]
pub struct CurrentTimeService {
    #[characteristic(uuid = "2a2b", read, write)]
    pub current_time: [u8; 10],
}

pub fn softdevice_config() -> Config {
    Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 256 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: b"PineTime" as *const u8 as _,
            current_len: 8,
            max_len: 8,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

/// Publish a new battery level to the Battery Service.
pub fn set_battery_level(server: &Server, percent: u8) {
    if server.bas.battery_level_set(&percent).is_err() {
        defmt::warn!("Failed to update battery service");
    }
}

/// Advertise, serve one connection at a time, and report link changes.
///
/// `on_connection` is called with `true` once a central connected and with
/// `false` once it is gone. `on_time` receives Current Time Service writes.
pub async fn run<C, T>(sd: &Softdevice, server: &Server, on_connection: C, mut on_time: T) -> !
where
    C: Fn(bool),
    T: FnMut([u8; CTS_LEN]),
{
    let config = peripheral::Config::default();
    let mut backoff = Backoff::new();

    loop {
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &ADV_DATA,
            scan_data: &SCAN_DATA,
        };
        let conn = match peripheral::advertise_connectable(sd, adv, &config).await {
            Ok(conn) => conn,
            Err(e) => {
                // Failures return without awaiting; yield before retrying
                let delay = backoff.next_delay_secs();
                defmt::warn!("Advertising failed: {:?}, retrying in {}s", e, delay);
                Timer::after(Duration::from_secs(delay)).await;
                continue;
            }
        };
        backoff.reset();

        defmt::info!("Connected");
        on_connection(true);

        let reason = gatt_server::run(&conn, server, |event| match event {
            ServerEvent::Cts(CurrentTimeServiceEvent::CurrentTimeWrite(bytes)) => on_time(bytes),
            ServerEvent::Bas(BatteryServiceEvent::BatteryLevelCccdWrite { notifications }) => {
                defmt::debug!("Battery notifications: {}", notifications)
            }
        })
        .await;

        defmt::info!("Disconnected: {:?}", reason);
        on_connection(false);
    }
}
