//! Pin interrupt controller abstraction

use crate::error::HalResult;
use crate::gpio::Edge;

/// Index of a pin-interrupt channel (PINT0..PINT7 on LPC8xx parts)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PinInterruptSlot(pub u8);

#[cfg(feature = "defmt")]
impl defmt::Format for PinInterruptSlot {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "PINT{}", self.0);
    }
}

/// Routes GPIO edges to interrupt channels
pub trait PinInterruptController {
    /// Bind `pin` to `slot` and select the triggering edge
    fn attach(&mut self, slot: PinInterruptSlot, pin: u32, edge: Edge) -> HalResult<()>;

    /// Enable the callback for a slot
    fn enable(&mut self, slot: PinInterruptSlot) -> HalResult<()>;

    /// Disable the callback for a slot
    fn disable(&mut self, slot: PinInterruptSlot) -> HalResult<()>;

    /// Clear a pending edge
    fn clear_pending(&mut self, slot: PinInterruptSlot) -> HalResult<()>;
}
