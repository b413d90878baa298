extern crate chip8vm;
use chip8vm::emulator::{
    ascii_display::frame_to_string,
    basics::{Address, Register, STACK_DEPTH},
    errors::VmError,
    observer::RecordingObserver,
    scheduler::{Halt, Scheduler},
    vm::VirtualMachine,
};
use std::sync::atomic::AtomicBool;
use std::time::Duration;

// Prints 137 in the built-in font: BCD into memory, load the digits back
// into V0-V2, then draw each glyph five pixels apart.
const DECIMAL_ROM: [u16; 15] = [
    0x6089, 0xA300, 0xF033, 0xF265, 0x6300, 0x6400, 0xF029, 0xD345, 0x7305, 0xF129, 0xD345,
    0x7305, 0xF229, 0xD345, 0x121C,
];

const EXPECTED_OUTPUT: &str = "  @  @@@@ @@@@
 @@     @    @
  @  @@@@   @
  @     @  @
 @@@ @@@@  @";

fn assemble(words: &[u16]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_be_bytes()).collect()
}

fn load_rom(words: &[u16]) -> (VirtualMachine, RecordingObserver) {
    let mut vm = VirtualMachine::with_seed(0);
    let recorder = RecordingObserver::new();
    vm.set_observer(Box::new(recorder.clone()));
    vm.load(&assemble(words)).unwrap();
    (vm, recorder)
}

fn run_until_loop(vm: &mut VirtualMachine) {
    loop {
        let pc = vm.registers.program_counter;
        vm.step().unwrap();
        if vm.registers.program_counter == pc {
            break;
        }
    }
}

#[test]
fn test_decimal_digits_on_screen() {
    let (mut vm, recorder) = load_rom(&DECIMAL_ROM);
    run_until_loop(&mut vm);
    let text = frame_to_string(vm.display.pixels(), '@', ' ');
    let lines: Vec<&str> = text.lines().map(|l| l.trim_end()).collect();
    let expected: Vec<&str> = EXPECTED_OUTPUT.lines().collect();
    assert_eq!(lines[..5], expected[..]);
    assert!(lines[5..].iter().all(|l| l.is_empty()));
    assert_eq!(vm.registers.get(Register(0xF)), 0);
    assert!(recorder.faults().is_empty());
}

#[test]
fn test_redraw_collides_and_erases() {
    // draw the 8 glyph twice; skip the loop on collision and set V5
    let (mut vm, _) = load_rom(&[
        0xA028, 0xD015, 0xD015, 0x3F01, 0x1208, 0x6501, 0x120C,
    ]);
    run_until_loop(&mut vm);
    assert_eq!(vm.registers.get(Register(5)), 1);
    assert_eq!(vm.registers.program_counter, Address(0x20C));
    assert!(vm.display.pixels().iter().flatten().all(|p| !*p));
}

#[test]
fn test_call_return_through_rom() {
    // 0x200: call 0x300, 0x202: V1 = 1, loop; 0x300: V0 = 9, return
    let mut words = vec![0x2300, 0x6101, 0x1204];
    words.resize(0x80, 0x0000);
    words.extend_from_slice(&[0x6009, 0x00EE]);
    let (mut vm, _) = load_rom(&words);
    vm.step().unwrap();
    assert_eq!(vm.registers.program_counter, Address(0x300));
    assert_eq!(vm.registers.stack_pointer(), 1);
    run_until_loop(&mut vm);
    assert_eq!(vm.registers.get(Register(0)), 9);
    assert_eq!(vm.registers.get(Register(1)), 1);
    assert_eq!(vm.registers.stack_pointer(), 0);
}

#[test]
fn test_runaway_recursion_overflows() {
    let (vm, recorder) = load_rom(&[0x2200]);
    let mut scheduler = Scheduler::new(vm, Duration::ZERO);
    scheduler.set_tick_limit(Some(STACK_DEPTH as u64 + 3));
    let stopper = AtomicBool::new(false);
    assert_eq!(scheduler.run_until(&stopper), Ok(Halt::TickLimit));
    assert_eq!(scheduler.vm().registers.stack_pointer(), STACK_DEPTH);
    assert_eq!(scheduler.vm().registers.program_counter, Address(0x200));
    assert_eq!(
        recorder.faults(),
        vec![VmError::StackOverflow { pc: 0x200 }; 3]
    );
}

#[test]
fn test_unknown_opcode_stops_scheduler() {
    let (vm, recorder) = load_rom(&[0x6001, 0x7001, 0xE09E]);
    let mut scheduler = Scheduler::new(vm, Duration::ZERO);
    let stopper = AtomicBool::new(false);
    assert_eq!(
        scheduler.run_until(&stopper),
        Err(VmError::UnknownOpcode {
            opcode: 0xE09E,
            pc: 0x204
        })
    );
    assert_eq!(scheduler.vm().registers.get(Register(0)), 2);
    assert_eq!(scheduler.vm().registers.program_counter, Address(0x204));
    assert_eq!(recorder.faults().len(), 1);
}
