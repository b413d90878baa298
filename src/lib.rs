//! A CHIP-8 virtual machine: a 4K memory, sixteen 8-bit registers, a 64x32
//! monochrome screen and two 60 Hz timers, driven one instruction per tick.
//!
//! The machine takes a ROM as bytes and hands out copies of its screen
//! whenever it changes; reading files and putting pixels on a real display
//! are left to the caller.

pub mod emulator;
pub mod rom_config;
