pub mod ascii_display;
pub mod basics;
pub mod display;
pub mod errors;
pub mod memory;
pub mod observer;
pub mod program;
pub mod registers;
pub mod renderer;
pub mod scheduler;
pub mod vm;
