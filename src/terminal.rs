use std::io::{self, Read, Write};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use termios::{tcsetattr, Termios, ECHO, ICANON, TCSANOW};

use crate::log;

const STDIN_FD: i32 = 0;

/// Puts stdin in non-canonical, no-echo mode and restores it when dropped.
pub struct RawModeGuard {
    old_termios: Termios,
}

impl RawModeGuard {
    pub fn enable() -> Result<Self, String> {
        let old_termios = Termios::from_fd(STDIN_FD)
            .map_err(|e| format!("Failed to read terminal settings: {}", e))?;
        let mut new_termios = old_termios;
        new_termios.c_lflag &= !(ICANON | ECHO);
        tcsetattr(STDIN_FD, TCSANOW, &new_termios)
            .map_err(|e| format!("Failed to switch terminal to raw mode: {}", e))?;
        hide_cursor();
        Ok(Self { old_termios })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        show_cursor();
        if let Err(e) = tcsetattr(STDIN_FD, TCSANOW, &self.old_termios) {
            log!("Failed to restore terminal settings: {}", e);
        }
    }
}

/// Forwards stdin one byte at a time. The channel disconnects when stdin closes.
pub fn spawn_stdin_channel() -> Receiver<u8> {
    let (tx, rx) = mpsc::channel::<u8>();
    thread::spawn(move || {
        let mut reader = io::stdin();
        let mut buffer: [u8; 1] = [0; 1];
        loop {
            if reader.read_exact(&mut buffer).is_err() {
                break;
            }
            if tx.send(buffer[0]).is_err() {
                break;
            }
        }
    });
    rx
}

pub fn clear_screen() {
    print!("{}[2J", 27 as char);
    print!("{}[1;1H", 27 as char);
}

fn hide_cursor() {
    print!("{}[?25l", 27 as char);
}

fn show_cursor() {
    print!("{}[?25h", 27 as char);
    let _ = io::stdout().flush();
}

pub fn draw(frame: &str) -> io::Result<()> {
    clear_screen();
    let mut stdout = io::stdout().lock();
    stdout.write_all(frame.as_bytes())?;
    stdout.flush()
}
