use super::basics::{
    Address, FONT_END, FONT_OFFSET, FONT_SPRITES, MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START,
};
use super::errors::VmError;

/// The 4K address space: font at the bottom, program from 0x200 upwards.
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Creates zeroed memory with the built-in font in place.
    pub fn new() -> Memory {
        let mut bytes = [0; MEMORY_SIZE];
        for (mem_cell, font_byte) in bytes
            .iter_mut()
            .skip(FONT_OFFSET as usize)
            .zip(FONT_SPRITES.iter())
        {
            *mem_cell = *font_byte;
        }
        Memory { bytes }
    }

    /// Copies a program to 0x200. Memory is untouched if it does not fit.
    pub fn load(&mut self, program: &[u8]) -> Result<(), VmError> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(VmError::CapacityExceeded {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn read_byte(&self, address: usize) -> Result<u8, VmError> {
        self.bytes
            .get(address)
            .copied()
            .ok_or(VmError::MemoryOutOfBounds { address })
    }

    /// Writes one byte. The font area is read-only.
    pub fn write_byte(&mut self, address: usize, value: u8) -> Result<(), VmError> {
        if (FONT_OFFSET as usize..FONT_END as usize).contains(&address) {
            return Err(VmError::ReadOnlyAddress { address });
        }
        let cell = self
            .bytes
            .get_mut(address)
            .ok_or(VmError::MemoryOutOfBounds { address })?;
        *cell = value;
        Ok(())
    }

    /// Reads the big-endian instruction word at `addr`.
    pub fn read_word(&self, addr: Address) -> Result<u16, VmError> {
        let address = addr.0 as usize;
        let high = self.read_byte(address)?;
        let low = self.read_byte(address + 1)?;
        Ok(u16::from_be_bytes([high, low]))
    }

    pub fn slice(&self, start: usize, len: usize) -> Option<&[u8]> {
        self.bytes.get(start..start.checked_add(len)?)
    }
}

impl Default for Memory {
    fn default() -> Self {
        Memory::new()
    }
}
