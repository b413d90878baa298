use super::basics::{Address, Register, Value};

/// One decoded instruction word.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Instruction {
    ClearDisplay,
    ReturnSubroutine,
    Jump(Address),
    CallSubroutine(Address),
    SkipIfEqualConst(Register, Value),
    SkipIfNotEqualConst(Register, Value),
    SkipIfEqual(Register, Register),
    SetConst(Register, Value),
    AddConst(Register, Value),
    Set(Register, Register),
    Or(Register, Register),
    And(Register, Register),
    Xor(Register, Register),
    Add(Register, Register),
    Sub(Register, Register),
    RightShift(Register),
    NegSub(Register, Register),
    LeftShift(Register),
    SkipIfNotEqual(Register, Register),
    SetI(Address),
    JumpAdd(Address),
    Rand(Register, Value),
    Draw(Register, Register, Value),
    GetDelayTimer(Register),
    SetDelayTimer(Register),
    SetSoundTimer(Register),
    AddToI(Register),
    SpriteAddr(Register),
    Decimal(Register),
    StoreRegisters(Register),
    LoadRegisters(Register),
}

macro_rules! NNN {
    ($x:expr) => {
        Address(($x.1 as u16) * 256 + ($x.2 as u16) * 16 + ($x.3 as u16))
    };
}

macro_rules! NN {
    ($x:expr) => {
        Value($x.2 * 16 + $x.3)
    };
}

macro_rules! N {
    ($x:expr) => {
        Value($x.3)
    };
}

macro_rules! X {
    ($x:expr) => {
        Register($x.1)
    };
}

macro_rules! Y {
    ($x:expr) => {
        Register($x.2)
    };
}

impl Instruction {
    /// Splits a big-endian word into its nibbles and matches them against the
    /// instruction table. Returns `None` for anything the machine cannot run,
    /// including the input instructions and machine code routines.
    pub fn decode(word: u16) -> Option<Instruction> {
        let [a, b] = word.to_be_bytes();
        Instruction::from_16bit(a, b)
    }

    pub fn from_16bit(a: u8, b: u8) -> Option<Instruction> {
        let nibbles = (a >> 4 & 0x0F, a & 0x0F, b >> 4 & 0x0F, b & 0x0F);
        let instruction = match nibbles {
            (0, 0, 14, 0) => Instruction::ClearDisplay,
            (0, 0, 14, 14) => Instruction::ReturnSubroutine,
            (1, _, _, _) => Instruction::Jump(NNN!(nibbles)),
            (2, _, _, _) => Instruction::CallSubroutine(NNN!(nibbles)),
            (3, _, _, _) => Instruction::SkipIfEqualConst(X!(nibbles), NN!(nibbles)),
            (4, _, _, _) => Instruction::SkipIfNotEqualConst(X!(nibbles), NN!(nibbles)),
            (5, _, _, 0) => Instruction::SkipIfEqual(X!(nibbles), Y!(nibbles)),
            (6, _, _, _) => Instruction::SetConst(X!(nibbles), NN!(nibbles)),
            (7, _, _, _) => Instruction::AddConst(X!(nibbles), NN!(nibbles)),
            (8, _, _, 0) => Instruction::Set(X!(nibbles), Y!(nibbles)),
            (8, _, _, 1) => Instruction::Or(X!(nibbles), Y!(nibbles)),
            (8, _, _, 2) => Instruction::And(X!(nibbles), Y!(nibbles)),
            (8, _, _, 3) => Instruction::Xor(X!(nibbles), Y!(nibbles)),
            (8, _, _, 4) => Instruction::Add(X!(nibbles), Y!(nibbles)),
            (8, _, _, 5) => Instruction::Sub(X!(nibbles), Y!(nibbles)),
            (8, _, _, 6) => Instruction::RightShift(X!(nibbles)),
            (8, _, _, 7) => Instruction::NegSub(X!(nibbles), Y!(nibbles)),
            (8, _, _, 14) => Instruction::LeftShift(X!(nibbles)),
            (9, _, _, 0) => Instruction::SkipIfNotEqual(X!(nibbles), Y!(nibbles)),
            (10, _, _, _) => Instruction::SetI(NNN!(nibbles)),
            (11, _, _, _) => Instruction::JumpAdd(NNN!(nibbles)),
            (12, _, _, _) => Instruction::Rand(X!(nibbles), NN!(nibbles)),
            (13, _, _, _) => Instruction::Draw(X!(nibbles), Y!(nibbles), N!(nibbles)),
            (15, _, 0, 7) => Instruction::GetDelayTimer(X!(nibbles)),
            (15, _, 1, 5) => Instruction::SetDelayTimer(X!(nibbles)),
            (15, _, 1, 8) => Instruction::SetSoundTimer(X!(nibbles)),
            (15, _, 1, 14) => Instruction::AddToI(X!(nibbles)),
            (15, _, 2, 9) => Instruction::SpriteAddr(X!(nibbles)),
            (15, _, 3, 3) => Instruction::Decimal(X!(nibbles)),
            (15, _, 5, 5) => Instruction::StoreRegisters(X!(nibbles)),
            (15, _, 6, 5) => Instruction::LoadRegisters(X!(nibbles)),
            _ => return None,
        };
        Some(instruction)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_decode_fields() {
        assert_eq!(
            Instruction::decode(0x1ABC),
            Some(Instruction::Jump(Address(0xABC)))
        );
        assert_eq!(
            Instruction::decode(0x2345),
            Some(Instruction::CallSubroutine(Address(0x345)))
        );
        assert_eq!(
            Instruction::decode(0x3A7F),
            Some(Instruction::SkipIfEqualConst(Register(0xA), Value(0x7F)))
        );
        assert_eq!(
            Instruction::decode(0x8BC4),
            Some(Instruction::Add(Register(0xB), Register(0xC)))
        );
        assert_eq!(
            Instruction::decode(0xD12F),
            Some(Instruction::Draw(Register(1), Register(2), Value(0xF)))
        );
        assert_eq!(
            Instruction::decode(0xF533),
            Some(Instruction::Decimal(Register(5)))
        );
    }

    #[test]
    fn test_decode_system_family() {
        assert_eq!(Instruction::decode(0x00E0), Some(Instruction::ClearDisplay));
        assert_eq!(
            Instruction::decode(0x00EE),
            Some(Instruction::ReturnSubroutine)
        );
        assert_eq!(Instruction::decode(0x0000), None);
        assert_eq!(Instruction::decode(0x0123), None);
        assert_eq!(Instruction::decode(0x00E1), None);
    }

    #[test]
    fn test_secondary_nibble_must_match() {
        assert_eq!(Instruction::decode(0x5121), None);
        assert_eq!(Instruction::decode(0x9121), None);
        assert_eq!(Instruction::decode(0x8128), None);
        assert_eq!(Instruction::decode(0xF1FF), None);
    }

    #[test]
    fn test_input_instructions_are_unknown() {
        assert_eq!(Instruction::decode(0xE19E), None);
        assert_eq!(Instruction::decode(0xE1A1), None);
        assert_eq!(Instruction::decode(0xF10A), None);
    }
}
