use super::errors::VmError;
use super::renderer::Renderer;
use super::vm::VirtualMachine;
use log::{debug, info};
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

pub const DEFAULT_TICK_RATE: u32 = 60;

pub fn tick_interval(hz: u32) -> Duration {
    if hz == 0 {
        Duration::ZERO
    } else {
        Duration::from_secs(1) / hz
    }
}

/// Sets `stopper` once a line arrives on `input`, e.g. Enter on stdin.
/// Running out of input does not stop the run, so a closed stdin keeps
/// headless runs going.
pub fn stop_on_input<R>(input: R, stopper: Arc<AtomicBool>) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        let mut line = String::new();
        let mut input = input;
        match input.read_line(&mut line) {
            Ok(0) => debug!("input closed, not watching for stop requests"),
            Ok(_) => {
                info!("stop requested");
                stopper.store(true, Ordering::Release);
            }
            Err(e) => debug!("could not read stop requests: {}", e),
        }
    })
}

/// Why a run ended without an error.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Halt {
    Stopped,
    TickLimit,
}

/// Drives a machine at a fixed cadence. Each tick runs one instruction,
/// counts the timers down once and passes the screen to the renderer if it
/// changed.
pub struct Scheduler {
    vm: VirtualMachine,
    renderer: Option<Box<dyn Renderer + Send>>,
    interval: Duration,
    tick_limit: Option<u64>,
    ticks: u64,
}

impl Scheduler {
    pub fn new(vm: VirtualMachine, interval: Duration) -> Scheduler {
        Scheduler {
            vm,
            renderer: None,
            interval,
            tick_limit: None,
            ticks: 0,
        }
    }

    /// Without a renderer, changed frames are simply discarded.
    pub fn set_renderer(&mut self, renderer: Box<dyn Renderer + Send>) {
        self.renderer = Some(renderer);
    }

    pub fn set_tick_limit(&mut self, limit: Option<u64>) {
        self.tick_limit = limit;
    }

    pub fn vm(&self) -> &VirtualMachine {
        &self.vm
    }

    pub fn vm_mut(&mut self) -> &mut VirtualMachine {
        &mut self.vm
    }

    pub fn into_vm(self) -> VirtualMachine {
        self.vm
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Runs a single tick. An error is fatal for the run and leaves the timers
    /// and the screen as they were.
    pub fn tick(&mut self) -> Result<(), VmError> {
        self.vm.step()?;
        self.vm.tick_timers();
        if self.vm.display.is_dirty() {
            let frame = self.vm.display.take_snapshot();
            if let Some(renderer) = self.renderer.as_mut() {
                renderer.render(frame);
            }
        }
        self.ticks += 1;
        Ok(())
    }

    /// Ticks until `stopper` is set, the tick limit is reached or the machine
    /// fails. The flag is only looked at between ticks.
    pub fn run_until(&mut self, stopper: &AtomicBool) -> Result<Halt, VmError> {
        info!("running at {:?} per tick", self.interval);
        let mut next_tick = Instant::now();
        loop {
            if stopper.load(Ordering::Acquire) {
                info!("stopped after {} ticks", self.ticks);
                return Ok(Halt::Stopped);
            }
            if self.tick_limit.map_or(false, |limit| self.ticks >= limit) {
                info!("tick limit of {} reached", self.ticks);
                return Ok(Halt::TickLimit);
            }

            let now = Instant::now();
            if next_tick > now {
                thread::sleep(next_tick - now);
            } else if now - next_tick > self.interval * 4 && !self.interval.is_zero() {
                debug!("running {:?} behind, skipping ahead", now - next_tick);
                next_tick = now;
            }
            next_tick += self.interval;

            // the fault itself already went to the observer
            if let Err(e) = self.tick() {
                info!("halted after {} ticks", self.ticks);
                return Err(e);
            }
        }
    }

    /// Moves the scheduler to its own thread. Joining gives it back, machine
    /// state intact, together with the reason the run ended.
    pub fn spawn(
        mut self,
        stopper: Arc<AtomicBool>,
    ) -> JoinHandle<(Scheduler, Result<Halt, VmError>)> {
        thread::spawn(move || {
            let result = self.run_until(&stopper);
            (self, result)
        })
    }
}
