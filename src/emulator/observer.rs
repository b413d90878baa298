use super::errors::VmError;
use log::{error, info, warn};
use std::sync::{Arc, Mutex};

/// Receives the events a running machine reports. Nothing an observer does
/// feeds back into execution.
pub trait Observer {
    /// A fault was detected. Recoverable faults are reported here and the
    /// machine carries on; fatal ones are also returned from `step`.
    fn fault(&mut self, fault: &VmError);

    /// The sound timer reached zero.
    fn sound(&mut self) {}
}

/// Forwards every event to the `log` facade.
#[derive(Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn fault(&mut self, fault: &VmError) {
        match fault {
            VmError::UnknownOpcode { .. } => error!("{}", fault),
            _ => warn!("{}", fault),
        }
    }

    fn sound(&mut self) {
        info!("beep");
    }
}

/// Keeps every event in memory. Clones share the same record, so one clone
/// can be handed to the machine and the other inspected afterwards.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    faults: Arc<Mutex<Vec<VmError>>>,
    sounds: Arc<Mutex<usize>>,
}

impl RecordingObserver {
    pub fn new() -> RecordingObserver {
        RecordingObserver::default()
    }

    pub fn faults(&self) -> Vec<VmError> {
        self.faults.lock().map(|f| f.clone()).unwrap_or_default()
    }

    pub fn sound_count(&self) -> usize {
        self.sounds.lock().map(|s| *s).unwrap_or_default()
    }
}

impl Observer for RecordingObserver {
    fn fault(&mut self, fault: &VmError) {
        if let Ok(mut faults) = self.faults.lock() {
            faults.push(fault.clone());
        }
    }

    fn sound(&mut self) {
        if let Ok(mut sounds) = self.sounds.lock() {
            *sounds += 1;
        }
    }
}
