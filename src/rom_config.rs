use crate::emulator::errors::VmError;
use crate::emulator::scheduler::{tick_interval, Scheduler, DEFAULT_TICK_RATE};
use crate::emulator::vm::VirtualMachine;
use lazy_static::lazy_static;
use log::info;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::{fs::File, io, io::Read};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RomError {
    #[error("could not read ROM {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Load(#[from] VmError),
}

/// How to run one ROM.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub filename: PathBuf,
    /// Ticks per second; zero runs as fast as possible.
    pub tick_rate: u32,
    pub tick_limit: Option<u64>,
    pub seed: Option<u64>,
    pub pixel_on: char,
    pub pixel_off: char,
}

impl Config {
    pub fn new(filename: impl Into<PathBuf>) -> Config {
        Config {
            filename: filename.into(),
            tick_rate: DEFAULT_TICK_RATE,
            tick_limit: None,
            seed: None,
            pixel_on: '@',
            pixel_off: ' ',
        }
    }

    /// Looks `name` up in the known ROMs, falling back to treating it as a
    /// path.
    pub fn resolve(name: &str) -> Config {
        match ROM_MAP.get(name.to_lowercase().as_str()) {
            Some(config) => config.clone(),
            None => Config::new(name),
        }
    }

    /// Reads the ROM and sets up a machine and scheduler for it.
    pub fn build(&self) -> Result<Scheduler, RomError> {
        let rom = load_rom_file(&self.filename)?;
        let mut vm = match self.seed {
            Some(seed) => VirtualMachine::with_seed(seed),
            None => VirtualMachine::new(),
        };
        vm.load(&rom)?;
        let mut scheduler = Scheduler::new(vm, tick_interval(self.tick_rate));
        scheduler.set_tick_limit(self.tick_limit);
        Ok(scheduler)
    }
}

fn profile(filename: &str, tick_rate: u32) -> Config {
    Config {
        tick_rate,
        ..Config::new(filename)
    }
}

lazy_static! {
    static ref ROM_MAP: HashMap<&'static str, Config> = vec![
        ("15puzzle", profile("roms/15PUZZLE", DEFAULT_TICK_RATE)),
        ("blinky", profile("roms/BLINKY", DEFAULT_TICK_RATE)),
        ("brix", profile("roms/BRIX", DEFAULT_TICK_RATE)),
        ("ibm", profile("roms/IBM", DEFAULT_TICK_RATE)),
        ("kaleid", profile("roms/KALEID", DEFAULT_TICK_RATE)),
        // draws a line per instruction, nicer to watch slowed down
        ("maze", profile("roms/MAZE", 30)),
        ("pong", profile("roms/PONG", DEFAULT_TICK_RATE)),
        ("test_opcode", profile("roms/test_opcode.ch8", 0)),
        ("tetris", profile("roms/TETRIS", DEFAULT_TICK_RATE)),
        ("ufo", profile("roms/UFO", DEFAULT_TICK_RATE)),
    ]
    .into_iter()
    .collect();
}

pub fn known_roms() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = ROM_MAP.keys().copied().collect();
    names.sort_unstable();
    names
}

pub fn load_rom_file(filename: &Path) -> Result<Vec<u8>, RomError> {
    let io_error = |source| RomError::Io {
        path: filename.to_path_buf(),
        source,
    };
    let mut file = File::open(filename).map_err(io_error)?;
    let mut raw_rom = Vec::new();
    file.read_to_end(&mut raw_rom).map_err(io_error)?;
    info!("read {} bytes from {}", raw_rom.len(), filename.display());
    Ok(raw_rom)
}
