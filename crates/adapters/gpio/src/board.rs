use envmon_app::ports::{ActuatorError, ActuatorPort, SensorPort};
use envmon_domain::actuator::{ActuatorState, Led};
use envmon_domain::sensor::{Climate, Extras, SensorError, SensorId};
use rppal::gpio::{Gpio, InputPin, IoPin, Mode, OutputPin};
use rppal::spi::{self, Bus, SlaveSelect, Spi};

use crate::pins::PinConfig;
use crate::{dht22, hcsr04, mcp3008};

/// Failure to claim the board's pins or buses at startup.
#[derive(Debug, thiserror::Error)]
pub enum GpioError {
    #[error("failed to open GPIO controller: {0}")]
    Controller(#[source] rppal::gpio::Error),

    #[error("failed to claim GPIO {pin} for {role}: {source}")]
    Pin {
        pin: u8,
        role: &'static str,
        #[source]
        source: rppal::gpio::Error,
    },

    #[error("failed to open SPI0: {0}")]
    Spi(#[from] spi::Error),

    #[error("MCP3008 channel {channel} for {role} does not exist")]
    AdcChannel { channel: u8, role: &'static str },
}

/// The extended board's ultrasonic sensor.
struct Ultrasonic {
    trigger: OutputPin,
    echo: InputPin,
}

/// Live sensors. Created once by [`open_board`]; pins are released on drop.
pub struct GpioSensors {
    dht: IoPin,
    pir: InputPin,
    adc: Spi,
    ultrasonic: Option<Ultrasonic>,
    pins: PinConfig,
}

/// Live indicator LEDs. Every LED is driven low on drop.
pub struct GpioLeds {
    red: OutputPin,
    blue: OutputPin,
    yellow: OutputPin,
    white: OutputPin,
}

/// Claim every pin and bus the board uses.
///
/// The ultrasonic pins are only claimed when `extended` is set.
///
/// # Errors
///
/// Returns [`GpioError`] when the controller, a pin or the SPI bus cannot
/// be opened, or when an ADC channel is out of range.
pub fn open_board(pins: &PinConfig, extended: bool) -> Result<(GpioSensors, GpioLeds), GpioError> {
    for (channel, role) in [
        (pins.ldr_channel, "ldr"),
        (pins.gas_channel, "mq135"),
        (pins.mic_channel, "mic"),
    ] {
        if channel > mcp3008::MAX_CHANNEL {
            return Err(GpioError::AdcChannel { channel, role });
        }
    }

    let gpio = Gpio::new().map_err(GpioError::Controller)?;
    let claim = |pin: u8, role: &'static str| {
        gpio.get(pin)
            .map_err(|source| GpioError::Pin { pin, role, source })
    };

    let dht = claim(pins.dht22, "dht22")?.into_io(Mode::Input);
    let pir = claim(pins.pir, "pir")?.into_input();
    let ultrasonic = if extended {
        Some(Ultrasonic {
            trigger: claim(pins.ultrasonic_trigger, "hcsr04 trigger")?.into_output_low(),
            echo: claim(pins.ultrasonic_echo, "hcsr04 echo")?.into_input(),
        })
    } else {
        None
    };
    let adc = Spi::new(Bus::Spi0, SlaveSelect::Ss0, pins.spi_clock_hz, spi::Mode::Mode0)?;

    let leds = GpioLeds {
        red: claim(pins.led_red, "red led")?.into_output_low(),
        blue: claim(pins.led_blue, "blue led")?.into_output_low(),
        yellow: claim(pins.led_yellow, "yellow led")?.into_output_low(),
        white: claim(pins.led_white, "white led")?.into_output_low(),
    };

    tracing::info!(
        dht22 = pins.dht22,
        pir = pins.pir,
        extended,
        spi_clock_hz = pins.spi_clock_hz,
        "gpio board opened"
    );

    let sensors = GpioSensors {
        dht,
        pir,
        adc,
        ultrasonic,
        pins: pins.clone(),
    };
    Ok((sensors, leds))
}

impl SensorPort for GpioSensors {
    fn name(&self) -> &'static str {
        "gpio"
    }

    fn read_climate(&mut self) -> Result<Climate, SensorError> {
        dht22::read(&mut self.dht)
    }

    fn read_light(&mut self) -> Result<u16, SensorError> {
        mcp3008::read_channel(&self.adc, self.pins.ldr_channel, SensorId::Ldr)
    }

    fn read_motion(&mut self) -> Result<bool, SensorError> {
        Ok(self.pir.is_high())
    }

    fn read_extras(&mut self) -> Extras {
        let Some(ultrasonic) = self.ultrasonic.as_mut() else {
            return Extras::NOT_FITTED;
        };
        let distance = hcsr04::measure(&mut ultrasonic.trigger, &ultrasonic.echo);
        let gas_level = mcp3008::read_channel(&self.adc, self.pins.gas_channel, SensorId::Mq135)
            .map(f64::from);
        let sound_level = mcp3008::read_channel(&self.adc, self.pins.mic_channel, SensorId::Mic)
            .map(f64::from);
        Extras {
            distance: Some(distance),
            gas_level: Some(gas_level),
            sound_level: Some(sound_level),
        }
    }
}

impl GpioLeds {
    fn pin(&mut self, led: Led) -> &mut OutputPin {
        match led {
            Led::Red => &mut self.red,
            Led::Blue => &mut self.blue,
            Led::Yellow => &mut self.yellow,
            Led::White => &mut self.white,
        }
    }
}

impl ActuatorPort for GpioLeds {
    fn apply(&mut self, state: ActuatorState) -> Result<(), ActuatorError> {
        for led in Led::ALL {
            let pin = self.pin(led);
            if state.is_on(led) {
                pin.set_high();
            } else {
                pin.set_low();
            }
        }
        Ok(())
    }
}

impl Drop for GpioLeds {
    fn drop(&mut self) {
        for led in Led::ALL {
            self.pin(led).set_low();
        }
        tracing::debug!("indicator LEDs released");
    }
}
