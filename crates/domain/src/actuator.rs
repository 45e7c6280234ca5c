//! Actuator state: the four indicator LEDs.

use serde::{Deserialize, Serialize};

/// Desired state of the indicator LEDs for one cycle.
///
/// Recomputed from scratch every cycle; nothing carries over except through
/// the motion counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActuatorState {
    /// Temperature above the ceiling.
    pub led_red: bool,
    /// Sustained motion.
    pub led_blue: bool,
    /// Humidity outside the comfort band.
    pub led_yellow: bool,
    /// Light level below the night ceiling.
    pub led_white: bool,
}

/// One physical LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Led {
    Red,
    Blue,
    Yellow,
    White,
}

impl Led {
    pub const ALL: [Self; 4] = [Self::Red, Self::Blue, Self::Yellow, Self::White];
}

impl std::fmt::Display for Led {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Red => f.write_str("red"),
            Self::Blue => f.write_str("blue"),
            Self::Yellow => f.write_str("yellow"),
            Self::White => f.write_str("white"),
        }
    }
}

impl ActuatorState {
    /// Known-safe state: every LED off.
    pub const OFF: Self = Self {
        led_red: false,
        led_blue: false,
        led_yellow: false,
        led_white: false,
    };

    /// Whether the given LED should be lit.
    #[must_use]
    pub fn is_on(&self, led: Led) -> bool {
        match led {
            Led::Red => self.led_red,
            Led::Blue => self.led_blue,
            Led::Yellow => self.led_yellow,
            Led::White => self.led_white,
        }
    }

    /// LEDs that are lit, in a stable order.
    pub fn lit(&self) -> impl Iterator<Item = Led> + '_ {
        Led::ALL.into_iter().filter(|led| self.is_on(*led))
    }
}

impl std::fmt::Display for ActuatorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut lit = self.lit().peekable();
        if lit.peek().is_none() {
            return f.write_str("all off");
        }
        let mut first = true;
        for led in lit {
            if !first {
                f.write_str("+")?;
            }
            write!(f, "{led}")?;
            first = false;
        }
        Ok(())
    }
}
