//! APU frame sequencer.
//!
//! Divides the CPU clock by 7457 into quarter- and half-frame clocks for
//! the envelope, linear counter, length counter and sweep units. 4-step
//! mode raises the frame IRQ on its last step; 5-step mode never does,
//! and selecting it clocks every unit immediately.

/// Frame sequencer state.
#[derive(Debug, Clone, Default)]
pub struct FrameCounter {
    cycle: u16,
    step: u8,
    five_step: bool,
    irq_inhibit: bool,
    irq_flag: bool,
}

/// CPU cycles between sequencer steps.
const STEP_PERIOD: u16 = 7457;

impl FrameCounter {
    /// $4017 write. Returns true when the write should immediately clock
    /// the quarter- and half-frame units (5-step mode selected).
    pub fn write(&mut self, val: u8) -> bool {
        self.five_step = val & 0x80 != 0;
        self.irq_inhibit = val & 0x40 != 0;
        if self.irq_inhibit {
            self.irq_flag = false;
        }
        self.cycle = 0;
        self.step = 0;
        self.five_step
    }

    /// One CPU cycle. Returns (quarter, half) clock pulses.
    pub fn tick(&mut self) -> (bool, bool) {
        self.cycle += 1;
        if self.cycle < STEP_PERIOD {
            return (false, false);
        }
        self.cycle = 0;
        self.step += 1;

        if self.five_step {
            match self.step {
                1 | 3 => (true, false),
                2 => (true, true),
                5 => {
                    self.step = 0;
                    (true, true)
                }
                // Step 4 of the 5-step sequence clocks nothing
                _ => (false, false),
            }
        } else {
            match self.step {
                1 | 3 => (true, false),
                2 => (true, true),
                _ => {
                    if !self.irq_inhibit {
                        self.irq_flag = true;
                    }
                    self.step = 0;
                    (true, true)
                }
            }
        }
    }

    /// Whether the frame IRQ is asserted.
    pub fn irq_flag(&self) -> bool {
        self.irq_flag
    }

    /// Clear the frame IRQ ($4015 read).
    pub fn clear_irq(&mut self) {
        self.irq_flag = false;
    }
}
