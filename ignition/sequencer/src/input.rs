//! Operator inputs and their pin-interrupt bindings

use ignition_core::Command;
use ignition_hal::{Edge, HalResult, PinInterruptController, PinInterruptSlot};

/// One physical operator control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// Encoder channel A; wired but not armed
    EncoderPhaseA,
    /// Encoder channel B; its falling edge samples phase A for direction
    EncoderPhaseB,
    /// Encoder push button
    Button,
    /// Fine-step toggle switch
    Switch,
}

#[cfg(feature = "defmt")]
impl defmt::Format for InputSource {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.name());
    }
}

/// How one input reaches the interrupt controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputBinding {
    pub source: InputSource,
    pub slot: PinInterruptSlot,
    /// Triggering edge; `None` leaves the input unarmed
    pub trigger: Option<Edge>,
}

/// Binding table, indexed by pin-interrupt slot
pub const INPUT_BINDINGS: [InputBinding; 4] = [
    InputBinding {
        source: InputSource::EncoderPhaseA,
        slot: PinInterruptSlot(0),
        trigger: None,
    },
    InputBinding {
        source: InputSource::Button,
        slot: PinInterruptSlot(1),
        trigger: Some(Edge::Rising),
    },
    InputBinding {
        source: InputSource::Switch,
        slot: PinInterruptSlot(2),
        trigger: Some(Edge::Both),
    },
    InputBinding {
        source: InputSource::EncoderPhaseB,
        slot: PinInterruptSlot(3),
        trigger: Some(Edge::Falling),
    },
];

impl InputSource {
    pub const fn name(self) -> &'static str {
        match self {
            InputSource::EncoderPhaseA => "EncoderPhaseA",
            InputSource::EncoderPhaseB => "EncoderPhaseB",
            InputSource::Button => "Button",
            InputSource::Switch => "Switch",
        }
    }

    /// Entry of this input in [`INPUT_BINDINGS`]
    pub fn binding(self) -> InputBinding {
        let index = match self {
            InputSource::EncoderPhaseA => 0,
            InputSource::Button => 1,
            InputSource::Switch => 2,
            InputSource::EncoderPhaseB => 3,
        };
        INPUT_BINDINGS[index]
    }

    /// Input served by a pin-interrupt slot
    pub fn from_slot(slot: PinInterruptSlot) -> Option<InputSource> {
        INPUT_BINDINGS
            .iter()
            .find(|b| b.slot == slot)
            .map(|b| b.source)
    }

    /// Whether edges on this input are routed to the sequencer
    pub fn is_armed(self) -> bool {
        self.binding().trigger.is_some()
    }
}

/// Encoder direction from the phase A level sampled on a phase B edge
pub fn encoder_command(phase_a_high: bool) -> Command {
    if phase_a_high {
        Command::Decrease
    } else {
        Command::Increase
    }
}

/// GPIO numbers of the operator controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputPins {
    pub phase_a: u32,
    pub phase_b: u32,
    pub button: u32,
    pub switch: u32,
}

impl Default for InputPins {
    /// LPC824 board wiring: PIO0_1, PIO0_15, PIO0_10, PIO0_11
    fn default() -> Self {
        Self {
            phase_a: 1,
            phase_b: 15,
            button: 10,
            switch: 11,
        }
    }
}

impl InputPins {
    pub fn pin_for(&self, source: InputSource) -> u32 {
        match source {
            InputSource::EncoderPhaseA => self.phase_a,
            InputSource::EncoderPhaseB => self.phase_b,
            InputSource::Button => self.button,
            InputSource::Switch => self.switch,
        }
    }
}

/// Attach and enable every armed input on `controller`
///
/// Unarmed inputs are left detached.
pub fn register_inputs<C: PinInterruptController>(
    controller: &mut C,
    pins: &InputPins,
) -> HalResult<()> {
    for binding in INPUT_BINDINGS.iter() {
        let Some(edge) = binding.trigger else {
            log::debug!("input {} left unarmed", binding.source.name());
            continue;
        };
        let pin = pins.pin_for(binding.source);
        controller.attach(binding.slot, pin, edge)?;
        controller.clear_pending(binding.slot)?;
        controller.enable(binding.slot)?;
        log::debug!(
            "input {} on pin {} -> slot {}",
            binding.source.name(),
            pin,
            binding.slot.0
        );
    }
    Ok(())
}
