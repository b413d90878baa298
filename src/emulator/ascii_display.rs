use super::{
    basics::{Frame, SCREEN_HEIGHT, SCREEN_WIDTH},
    renderer::Renderer,
};
use log::warn;
use std::io::{self, Write};

/// Turns a frame into text, one line per screen row.
pub fn frame_to_string(frame: &Frame, on: char, off: char) -> String {
    let mut text = String::with_capacity((SCREEN_WIDTH as usize + 1) * SCREEN_HEIGHT as usize);
    for y in 0..SCREEN_HEIGHT as usize {
        for x in 0..SCREEN_WIDTH as usize {
            text.push(if frame[x][y] { on } else { off });
        }
        text.push('\n');
    }
    text
}

/// Prints every frame it gets as text to a writer, stdout by default.
pub struct AsciiRenderer<W: Write> {
    out: W,
    on: char,
    off: char,
}

impl AsciiRenderer<io::Stdout> {
    pub fn stdout(on: char, off: char) -> AsciiRenderer<io::Stdout> {
        AsciiRenderer::new(io::stdout(), on, off)
    }
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W, on: char, off: char) -> AsciiRenderer<W> {
        AsciiRenderer { out, on, off }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for AsciiRenderer<W> {
    fn render(&mut self, frame: Frame) {
        let text = frame_to_string(&frame, self.on, self.off);
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            warn!("could not draw frame: {}", e);
        }
    }
}
