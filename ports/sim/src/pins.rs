//! Pin-interrupt router and input pins

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ignition_hal::{
    Edge, GpioPin, HalError, HalResult, Level, PinInterruptController, PinInterruptSlot,
};

/// Pin-interrupt channels on the simulated part
pub const SIM_PINT_COUNT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Binding {
    pin: u32,
    edge: Edge,
    enabled: bool,
    pending: bool,
}

/// Software pin-interrupt controller
///
/// Records which pin and edge each slot watches; [`SimPins::trigger`] turns
/// a pin transition into the slot whose callback would run.
#[derive(Debug, Clone, Default)]
pub struct SimPins {
    bindings: [Option<Binding>; SIM_PINT_COUNT],
}

impl SimPins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin and edge bound to `slot`
    pub fn binding(&self, slot: PinInterruptSlot) -> Option<(u32, Edge)> {
        self.bindings
            .get(usize::from(slot.0))
            .copied()
            .flatten()
            .map(|b| (b.pin, b.edge))
    }

    pub fn is_enabled(&self, slot: PinInterruptSlot) -> bool {
        self.bindings
            .get(usize::from(slot.0))
            .copied()
            .flatten()
            .is_some_and(|b| b.enabled)
    }

    /// Slot whose callback a `transition` on `pin` raises, marking it pending
    ///
    /// `transition` is [`Edge::Rising`] or [`Edge::Falling`].
    pub fn trigger(&mut self, pin: u32, transition: Edge) -> Option<PinInterruptSlot> {
        let (index, binding) = self
            .bindings
            .iter_mut()
            .enumerate()
            .filter_map(|(i, b)| b.as_mut().map(|b| (i, b)))
            .find(|(_, b)| b.enabled && b.pin == pin && edge_matches(b.edge, transition))?;
        binding.pending = true;
        Some(PinInterruptSlot(index as u8))
    }

    pub fn is_pending(&self, slot: PinInterruptSlot) -> bool {
        self.bindings
            .get(usize::from(slot.0))
            .copied()
            .flatten()
            .is_some_and(|b| b.pending)
    }

    fn binding_mut(&mut self, slot: PinInterruptSlot) -> HalResult<&mut Binding> {
        self.bindings
            .get_mut(usize::from(slot.0))
            .and_then(Option::as_mut)
            .ok_or(HalError::InvalidParameter)
    }
}

fn edge_matches(trigger: Edge, transition: Edge) -> bool {
    matches!(
        (trigger, transition),
        (Edge::Both, _) | (Edge::Rising, Edge::Rising) | (Edge::Falling, Edge::Falling)
    )
}

impl PinInterruptController for SimPins {
    fn attach(&mut self, slot: PinInterruptSlot, pin: u32, edge: Edge) -> HalResult<()> {
        let entry = self
            .bindings
            .get_mut(usize::from(slot.0))
            .ok_or(HalError::InvalidParameter)?;
        *entry = Some(Binding {
            pin,
            edge,
            enabled: false,
            pending: false,
        });
        Ok(())
    }

    fn enable(&mut self, slot: PinInterruptSlot) -> HalResult<()> {
        self.binding_mut(slot)?.enabled = true;
        Ok(())
    }

    fn disable(&mut self, slot: PinInterruptSlot) -> HalResult<()> {
        self.binding_mut(slot)?.enabled = false;
        Ok(())
    }

    fn clear_pending(&mut self, slot: PinInterruptSlot) -> HalResult<()> {
        self.binding_mut(slot)?.pending = false;
        Ok(())
    }
}

/// Input pin whose level can be changed from another thread
#[derive(Debug, Clone)]
pub struct SimPin {
    pin: u32,
    level: Arc<AtomicBool>,
}

impl SimPin {
    /// Pin idling at `level` (encoder phases and the button idle high)
    pub fn new(pin: u32, level: Level) -> Self {
        Self {
            pin,
            level: Arc::new(AtomicBool::new(level.is_high())),
        }
    }

    /// Current level without going through [`GpioPin`]
    pub fn level(&self) -> Level {
        Level::from(self.level.load(Ordering::SeqCst))
    }
}

impl GpioPin for SimPin {
    fn read(&self) -> HalResult<Level> {
        Ok(self.level())
    }

    fn write(&mut self, level: Level) -> HalResult<()> {
        self.level.store(level.is_high(), Ordering::SeqCst);
        Ok(())
    }

    fn pin_number(&self) -> u32 {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_respects_edge_and_enable() {
        let mut pins = SimPins::new();
        pins.attach(PinInterruptSlot(1), 10, Edge::Rising).unwrap();
        assert_eq!(pins.trigger(10, Edge::Rising), None);

        pins.enable(PinInterruptSlot(1)).unwrap();
        assert_eq!(pins.trigger(10, Edge::Falling), None);
        assert_eq!(pins.trigger(10, Edge::Rising), Some(PinInterruptSlot(1)));
        assert!(pins.is_pending(PinInterruptSlot(1)));

        pins.clear_pending(PinInterruptSlot(1)).unwrap();
        assert!(!pins.is_pending(PinInterruptSlot(1)));
    }

    #[test]
    fn both_edges_binding() {
        let mut pins = SimPins::new();
        pins.attach(PinInterruptSlot(2), 11, Edge::Both).unwrap();
        pins.enable(PinInterruptSlot(2)).unwrap();
        assert_eq!(pins.trigger(11, Edge::Rising), Some(PinInterruptSlot(2)));
        assert_eq!(pins.trigger(11, Edge::Falling), Some(PinInterruptSlot(2)));
    }

    #[test]
    fn unbound_slot_rejected() {
        let mut pins = SimPins::new();
        assert_eq!(
            pins.enable(PinInterruptSlot(3)),
            Err(HalError::InvalidParameter)
        );
        assert_eq!(
            pins.attach(PinInterruptSlot(9), 1, Edge::Falling),
            Err(HalError::InvalidParameter)
        );
    }

    #[test]
    fn pin_clones_share_level() {
        let pin = SimPin::new(1, Level::High);
        let mut handle = pin.clone();
        handle.write(Level::Low).unwrap();
        assert_eq!(pin.read().unwrap(), Level::Low);
    }
}
