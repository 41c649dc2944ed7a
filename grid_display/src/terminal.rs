// terminal.rs - Truecolor terminal standing in for the LED panel
//
// Two panel rows per text line: the upper pixel is the foreground of a
// half block, the lower pixel its background.

use std::io::{self, Stdout, Write};

use conway::{Bitmap, DisplayError, DisplaySink, Rgb};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};

use crate::panel::PanelOptions;

pub struct TerminalPanel {
    width: usize,
    height: usize,
    brightness: u8,
    out: Stdout,
    active: bool,
}

impl TerminalPanel {
    /// Fails if the options are invalid or the terminal is too small.
    pub fn open(options: &PanelOptions) -> Result<Self, DisplayError> {
        options.validate()?;
        let (width, height) = (options.width(), options.height());

        let (cols, lines) = terminal::size()?;
        let needed_lines = height.div_ceil(2);
        if (cols as usize) < width || (lines as usize) < needed_lines {
            return Err(DisplayError::Init(format!(
                "terminal is {cols}x{lines} but the panel needs {width}x{needed_lines}"
            )));
        }

        // No raw mode: Ctrl+C has to keep raising SIGINT
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
        Ok(Self {
            width,
            height,
            brightness: options.brightness,
            out,
            active: true,
        })
    }

    fn color(&self, pixel: Rgb) -> Color {
        let lit = pixel.dimmed(self.brightness);
        Color::Rgb { r: lit.r, g: lit.g, b: lit.b }
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            LeaveAlternateScreen
        )
    }
}

impl DisplaySink for TerminalPanel {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn push_frame(&mut self, frame: &Bitmap) -> Result<(), DisplayError> {
        self.check_frame(frame)?;
        let rows: Vec<&[Rgb]> = frame.rows().collect();
        for (line, pair) in rows.chunks(2).enumerate() {
            queue!(self.out, cursor::MoveTo(0, line as u16))?;
            for col in 0..self.width {
                let upper = pair[0][col];
                let lower = pair.get(1).map_or(Rgb::BLACK, |row| row[col]);
                let (fg, bg) = (self.color(upper), self.color(lower));
                queue!(
                    self.out,
                    SetForegroundColor(fg),
                    SetBackgroundColor(bg),
                    Print('▀')
                )?;
            }
            queue!(self.out, ResetColor)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.restore()?;
        Ok(())
    }
}

impl Drop for TerminalPanel {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            log::warn!("could not restore the terminal: {err}");
        }
    }
}
