//! Status LED pair

use std::fmt;

use ignition_hal::{Led, StatusLeds};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimLeds {
    status_a: bool,
    status_b: bool,
}

impl SimLeds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusLeds for SimLeds {
    fn set(&mut self, led: Led, on: bool) {
        match led {
            Led::StatusA => self.status_a = on,
            Led::StatusB => self.status_b = on,
        }
    }

    fn is_on(&self, led: Led) -> bool {
        match led {
            Led::StatusA => self.status_a,
            Led::StatusB => self.status_b,
        }
    }
}

impl fmt::Display for SimLeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lamp = |on: bool| if on { "on" } else { "off" };
        write!(
            f,
            "green={} red={}",
            lamp(self.status_a),
            lamp(self.status_b)
        )
    }
}
