//! Digital watchface for the PineTime
//!
//! Hardware independent part of the firmware: battery and time models,
//! configuration, and the watchface renderer. Everything in here draws to an
//! `embedded_graphics::DrawTarget` and can be exercised on the host.

#![cfg_attr(not(test), no_std)]

pub mod battery;
pub mod config;
pub mod retry;
pub mod time;
pub mod ui;
