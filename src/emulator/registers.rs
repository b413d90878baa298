use super::basics::{Address, Register, FLAG_REGISTER, PROGRAM_START, REGISTER_COUNT, STACK_DEPTH};
use super::errors::VmError;
use arrayvec::ArrayVec;

/// General registers V0-VF, the index register, the program counter, the call
/// stack and both timers.
pub struct RegisterFile {
    registers: [u8; REGISTER_COUNT],
    pub index: Address,
    pub program_counter: Address,
    stack: ArrayVec<Address, STACK_DEPTH>,
    pub delay_timer: u8,
    pub sound_timer: u8,
}

impl RegisterFile {
    pub fn new() -> RegisterFile {
        RegisterFile {
            registers: [0; REGISTER_COUNT],
            index: Address(0),
            program_counter: Address(PROGRAM_START),
            stack: ArrayVec::new(),
            delay_timer: 0,
            sound_timer: 0,
        }
    }

    /// Returns the value of one of the general registers.
    pub fn get(&self, reg: Register) -> u8 {
        self.registers[reg.0 as usize & 0xF]
    }

    pub fn set(&mut self, reg: Register, value: u8) {
        self.registers[reg.0 as usize & 0xF] = value;
    }

    /// Sets the VF register to a given value.
    pub fn set_flag(&mut self, value: u8) {
        self.set(FLAG_REGISTER, value);
    }

    /// Pushes a return address. A full stack is left as it is.
    pub fn push(&mut self, addr: Address) -> Result<(), VmError> {
        self.stack.try_push(addr).map_err(|_| VmError::StackOverflow {
            pc: self.program_counter.0,
        })
    }

    pub fn pop(&mut self) -> Result<Address, VmError> {
        self.stack.pop().ok_or(VmError::StackUnderflow {
            pc: self.program_counter.0,
        })
    }

    /// Number of return addresses currently on the stack.
    pub fn stack_pointer(&self) -> usize {
        self.stack.len()
    }

    /// Counts both timers down by one, stopping at zero. Returns true when the
    /// sound timer ran out on this tick.
    pub fn tick_timers(&mut self) -> bool {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        let sound_expired = self.sound_timer == 1;
        self.sound_timer = self.sound_timer.saturating_sub(1);
        sound_expired
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        RegisterFile::new()
    }
}
