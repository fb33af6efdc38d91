//! Display control module for PineTime

use display_interface_spi::SPIInterface;
use embassy_nrf::{
    gpio::Output,
    peripherals::{P0_18, P0_25, P0_26},
    spim::{self, Spim},
};
use embassy_time::Delay;
use embedded_graphics::draw_target::DrawTarget;
use mipidsi::{models::ST7789, Builder, Orientation};

use pinetime_watchface::ui::{self, WatchFace, BACKGROUND_COLOR};

const LCD_W: u16 = 240;
const LCD_H: u16 = 240;

type Lcd<'a, SPI> = mipidsi::Display<
    SPIInterface<Spim<'a, SPI>, Output<'a, P0_18>, Output<'a, P0_25>>,
    ST7789,
    Output<'a, P0_26>,
>;

/// Error of the LCD draw target
pub type DrawError<'a, SPI> = <Lcd<'a, SPI> as DrawTarget>::Error;

pub struct Display<'a, SPI>
where
    SPI: spim::Instance,
{
    /// ST7789 panel
    lcd: Lcd<'a, SPI>,
}

impl<'a, SPI> Display<'a, SPI>
where
    SPI: spim::Instance,
{
    /// Configure and clear the display on boot
    pub fn init(
        spim: Spim<'a, SPI>,
        cs: Output<'a, P0_25>,
        dc: Output<'a, P0_18>,
        rst: Output<'a, P0_26>,
        delay: &mut Delay,
    ) -> Result<Self, Error> {
        let mut lcd = Builder::st7789(SPIInterface::new(spim, dc, cs))
            .with_display_size(LCD_W, LCD_H)
            .with_orientation(Orientation::Portrait(false))
            .init(delay, Some(rst))
            .map_err(|_| Error::Init)?;
        lcd.clear(BACKGROUND_COLOR).map_err(|_| Error::Interface)?;

        Ok(Self { lcd })
    }

    /// Bring the panel up to date with the watchface
    pub fn render<F>(&mut self, face: &mut F) -> Result<(), ui::Error<DrawError<'a, SPI>>>
    where
        F: WatchFace,
    {
        face.draw(&mut self.lcd)
    }
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    /// Panel did not initialize
    Init,
    /// SPI transfer failed
    Interface,
}
