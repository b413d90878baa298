use thiserror::Error;

/// Everything that can go wrong while loading or running a program.
///
/// Stack misuse and stray memory accesses are reported and the machine carries
/// on; an unknown opcode or a fetch outside memory ends the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    #[error("program is {size} bytes, at most {max} bytes fit in memory")]
    CapacityExceeded { size: usize, max: usize },

    #[error("call at {pc:#05X} exceeds the maximal stack depth")]
    StackOverflow { pc: u16 },

    #[error("return at {pc:#05X} with an empty stack")]
    StackUnderflow { pc: u16 },

    #[error("unknown opcode {opcode:#06X} at {pc:#05X}")]
    UnknownOpcode { opcode: u16, pc: u16 },

    #[error("memory access out of bounds at {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("write to read-only font memory at {address:#05X}")]
    ReadOnlyAddress { address: usize },
}

