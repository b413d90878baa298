use super::basics::{Address, Register, FONT_GLYPH_SIZE, FONT_OFFSET};
use super::display::Framebuffer;
use super::errors::VmError;
use super::memory::Memory;
use super::observer::{LogObserver, Observer};
use super::program::Instruction;
use super::registers::RegisterFile;
use arrayvec::ArrayVec;
use log::{info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Holds the logic of a virtual machine in action: memory, registers, screen
/// and the sinks it reports to.
pub struct VirtualMachine {
    pub registers: RegisterFile,
    pub memory: Memory,
    pub display: Framebuffer,
    rng: StdRng,
    observer: Box<dyn Observer + Send>,
}

impl VirtualMachine {
    /// Creates a new VM with the font loaded and the program counter at 0x200.
    pub fn new() -> VirtualMachine {
        VirtualMachine::with_rng(StdRng::from_entropy())
    }

    /// Same as `new`, but `CXNN` draws from a seeded generator so runs repeat.
    pub fn with_seed(seed: u64) -> VirtualMachine {
        VirtualMachine::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> VirtualMachine {
        VirtualMachine {
            registers: RegisterFile::new(),
            memory: Memory::new(),
            display: Framebuffer::new(),
            rng,
            observer: Box::new(LogObserver),
        }
    }

    pub fn set_observer(&mut self, observer: Box<dyn Observer + Send>) {
        self.observer = observer;
    }

    /// Loads a program at 0x200. Nothing changes if it is too large.
    pub fn load(&mut self, program: &[u8]) -> Result<(), VmError> {
        self.memory.load(program)?;
        info!("loaded program ({} bytes)", program.len());
        Ok(())
    }

    fn report(&mut self, fault: &VmError) {
        self.observer.fault(fault);
    }

    /// Fetches, decodes and executes the instruction at the program counter.
    ///
    /// An error means the run cannot go on: the word was not a known
    /// instruction or could not be fetched. The program counter is left
    /// pointing at it.
    pub fn step(&mut self) -> Result<(), VmError> {
        let pc = self.registers.program_counter;
        let word = match self.memory.read_word(pc) {
            Ok(word) => word,
            Err(fault) => {
                self.report(&fault);
                return Err(fault);
            }
        };
        let instruction = match Instruction::decode(word) {
            Some(instruction) => instruction,
            None => {
                let fault = VmError::UnknownOpcode {
                    opcode: word,
                    pc: pc.0,
                };
                self.report(&fault);
                return Err(fault);
            }
        };
        trace!("{:#05X}: {:04X} {:?}", pc.0, word, instruction);
        self.execute_instruction(&instruction);
        Ok(())
    }

    /// Counts the timers down once, notifying the observer when the sound
    /// timer runs out.
    pub fn tick_timers(&mut self) {
        if self.registers.tick_timers() {
            self.observer.sound();
        }
    }

    /// Executes a single instruction. The program counter moves on by one
    /// word, except for jumps, calls and returns which set it directly and
    /// taken skips which move it by two words.
    pub fn execute_instruction(&mut self, instruction: &Instruction) {
        let pc = self.registers.program_counter;
        let mut next = pc.offset(2);
        match *instruction {
            // Jumps
            Instruction::CallSubroutine(addr) => match self.registers.push(next) {
                Ok(()) => next = addr,
                Err(fault) => {
                    self.report(&fault);
                    next = pc;
                }
            },
            Instruction::ReturnSubroutine => match self.registers.pop() {
                Ok(addr) => next = addr,
                Err(fault) => {
                    self.report(&fault);
                    next = pc;
                }
            },
            Instruction::Jump(addr) => next = addr,
            Instruction::JumpAdd(addr) => {
                next = addr.offset(self.registers.get(Register(0)) as u16);
            }

            // Conditionals
            Instruction::SkipIfEqualConst(vx, n) => {
                if self.registers.get(vx) == n.0 {
                    next.advance();
                }
            }
            Instruction::SkipIfNotEqualConst(vx, n) => {
                if self.registers.get(vx) != n.0 {
                    next.advance();
                }
            }
            Instruction::SkipIfEqual(vx, vy) => {
                if self.registers.get(vx) == self.registers.get(vy) {
                    next.advance();
                }
            }
            Instruction::SkipIfNotEqual(vx, vy) => {
                if self.registers.get(vx) != self.registers.get(vy) {
                    next.advance();
                }
            }

            // Register arithmetic
            Instruction::SetConst(vx, n) => self.registers.set(vx, n.0),
            Instruction::AddConst(vx, n) => {
                let value = self.registers.get(vx).wrapping_add(n.0);
                self.registers.set(vx, value);
            }
            Instruction::Set(vx, vy) => {
                let value = self.registers.get(vy);
                self.registers.set(vx, value);
            }
            Instruction::Or(vx, vy) => {
                let value = self.registers.get(vx) | self.registers.get(vy);
                self.registers.set(vx, value);
            }
            Instruction::And(vx, vy) => {
                let value = self.registers.get(vx) & self.registers.get(vy);
                self.registers.set(vx, value);
            }
            Instruction::Xor(vx, vy) => {
                let value = self.registers.get(vx) ^ self.registers.get(vy);
                self.registers.set(vx, value);
            }
            Instruction::Add(vx, vy) => {
                let (sum, carry) = self
                    .registers
                    .get(vx)
                    .overflowing_add(self.registers.get(vy));
                self.registers.set_flag(carry as u8);
                self.registers.set(vx, sum);
            }
            Instruction::Sub(vx, vy) => {
                let value_vx = self.registers.get(vx);
                let value_vy = self.registers.get(vy);
                self.registers.set_flag((value_vx >= value_vy) as u8);
                self.registers.set(vx, value_vx.wrapping_sub(value_vy));
            }
            Instruction::NegSub(vx, vy) => {
                let value_vx = self.registers.get(vx);
                let value_vy = self.registers.get(vy);
                self.registers.set_flag((value_vy >= value_vx) as u8);
                self.registers.set(vx, value_vy.wrapping_sub(value_vx));
            }
            Instruction::RightShift(vx) => {
                let value_vx = self.registers.get(vx);
                self.registers.set_flag(value_vx & 0x01);
                self.registers.set(vx, value_vx >> 1);
            }
            Instruction::LeftShift(vx) => {
                let value_vx = self.registers.get(vx);
                self.registers.set_flag(value_vx >> 7);
                self.registers.set(vx, value_vx << 1);
            }

            // Graphics
            Instruction::ClearDisplay => self.display.clear(),
            Instruction::Draw(vx, vy, n) => {
                let x = self.registers.get(vx);
                let y = self.registers.get(vy);
                let mut rows = ArrayVec::<u8, 15>::new();
                for row in 0..n.0 as usize {
                    let address = self.registers.index.0 as usize + row;
                    match self.memory.read_byte(address) {
                        Ok(byte) => rows.push(byte),
                        Err(fault) => {
                            self.report(&fault);
                            break;
                        }
                    }
                }
                let collision = self.display.draw_sprite(x, y, &rows);
                self.registers.set_flag(collision as u8);
            }
            Instruction::SpriteAddr(vx) => {
                let digit = (self.registers.get(vx) & 0x0F) as u16;
                self.registers.index = Address(FONT_OFFSET + digit * FONT_GLYPH_SIZE);
            }

            // Timers
            Instruction::GetDelayTimer(vx) => {
                let value = self.registers.delay_timer;
                self.registers.set(vx, value);
            }
            Instruction::SetDelayTimer(vx) => self.registers.delay_timer = self.registers.get(vx),
            Instruction::SetSoundTimer(vx) => self.registers.sound_timer = self.registers.get(vx),

            // I register
            Instruction::SetI(addr) => self.registers.index = addr,
            Instruction::AddToI(vx) => {
                self.registers.index = self.registers.index.offset(self.registers.get(vx) as u16);
            }
            Instruction::Decimal(vx) => {
                let value = self.registers.get(vx);
                let digits = [value / 100, value / 10 % 10, value % 10];
                self.store(&digits);
            }
            Instruction::StoreRegisters(vx) => {
                let values: ArrayVec<u8, 16> =
                    (0..=vx.0).map(|i| self.registers.get(Register(i))).collect();
                self.store(&values);
            }
            Instruction::LoadRegisters(vx) => {
                let index = self.registers.index.0 as usize;
                for i in 0..=vx.0 {
                    match self.memory.read_byte(index + i as usize) {
                        Ok(value) => self.registers.set(Register(i), value),
                        Err(fault) => {
                            self.report(&fault);
                            break;
                        }
                    }
                }
            }

            // Misc
            Instruction::Rand(vx, n) => {
                let value = self.rng.gen::<u8>() & n.0;
                self.registers.set(vx, value);
            }
        }
        self.registers.program_counter = next;
    }

    /// Writes consecutive bytes from the index register on, stopping at the
    /// first address that cannot be written.
    fn store(&mut self, bytes: &[u8]) {
        let index = self.registers.index.0 as usize;
        for (offset, byte) in bytes.iter().enumerate() {
            if let Err(fault) = self.memory.write_byte(index + offset, *byte) {
                self.report(&fault);
                break;
            }
        }
    }
}

impl Default for VirtualMachine {
    fn default() -> Self {
        VirtualMachine::new()
    }
}
