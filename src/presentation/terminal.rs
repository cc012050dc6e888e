//! Entering and leaving the full-screen terminal mode.
//!
//! Every path out of the UI, including a failed setup and a panic, goes
//! through [`leave`] so the shell is never left in raw mode.

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Switches to raw mode and the alternate screen.
///
/// If the alternate screen cannot be entered, raw mode is switched off again
/// before the error is returned.
pub fn enter<W: Write>(out: &mut W) -> io::Result<()> {
    enable_raw_mode()?;
    if let Err(error) = execute!(out, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(error);
    }
    Ok(())
}

/// Restores the normal screen, raw mode off and a visible cursor.
pub fn leave<W: Write>(out: &mut W) -> io::Result<()> {
    let raw = disable_raw_mode();
    execute!(out, LeaveAlternateScreen, Show)?;
    raw
}

/// Chains a panic hook that restores the terminal before the panic message
/// is printed.
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = leave(&mut io::stdout());
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::terminal::is_raw_mode_enabled;

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_failed_enter_leaves_raw_mode_off() {
        assert!(enter(&mut BrokenWriter).is_err());
        assert!(!is_raw_mode_enabled().unwrap());
    }

    #[test]
    fn test_leave_restores_screen_and_cursor() {
        let mut out = Vec::new();
        leave(&mut out).unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\u{1b}[?1049l"));
        assert!(written.contains("\u{1b}[?25h"));
    }
}
