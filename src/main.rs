use anyhow::Context;
use chip8vm::emulator::ascii_display::AsciiRenderer;
use chip8vm::emulator::scheduler::stop_on_input;
use chip8vm::rom_config::{known_roms, Config};
use clap::Parser;
use std::io;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(version, about = "Runs a CHIP-8 ROM and prints its screen as text")]
struct Args {
    /// Path to a ROM file, or the name of a known ROM
    rom: String,

    /// Ticks per second, 0 for as fast as possible
    #[arg(long)]
    hz: Option<u32>,

    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Seed for the random number instruction
    #[arg(long)]
    seed: Option<u64>,

    /// Run without printing frames
    #[arg(long)]
    headless: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = Config::resolve(&args.rom);
    if let Some(hz) = args.hz {
        config.tick_rate = hz;
    }
    config.tick_limit = args.ticks.or(config.tick_limit);
    config.seed = args.seed.or(config.seed);

    let mut scheduler = config.build().with_context(|| {
        format!(
            "could not start {} (known ROMs: {})",
            args.rom,
            known_roms().join(", ")
        )
    })?;
    if !args.headless {
        scheduler.set_renderer(Box::new(AsciiRenderer::stdout(
            config.pixel_on,
            config.pixel_off,
        )));
    }

    // press Enter to stop; the input thread is left behind when the run ends
    let stopper = Arc::new(AtomicBool::new(false));
    stop_on_input(io::BufReader::new(io::stdin()), stopper.clone());
    let (scheduler, result) = scheduler
        .spawn(stopper)
        .join()
        .map_err(|_| anyhow::anyhow!("scheduler thread panicked"))?;
    let halt = result?;
    log::info!("{:?} after {} ticks", halt, scheduler.ticks());
    Ok(())
}
