#![forbid(unsafe_code)]

//! Terminal ownership for the demo.
//!
//! [`TerminalSession`] puts the tty into raw mode on the alternate screen
//! with the cursor hidden, and puts it back when dropped. A panic or a
//! SIGINT/SIGTERM takes the same restore path before the process goes away.

use std::io::{self, Write};
use std::sync::Once;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};

/// Input the demo reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Quit,
    Resize { width: u16, height: u16 },
}

#[derive(Debug)]
pub struct TerminalSession {
    on_alt_screen: bool,
    #[cfg(unix)]
    signals: Option<signals::Watcher>,
}

impl TerminalSession {
    /// Take over the terminal.
    ///
    /// # Errors
    ///
    /// Any failure to switch modes. Whatever was already switched is undone
    /// by the drop of the partially built session.
    pub fn new() -> io::Result<Self> {
        install_panic_restore();

        terminal::enable_raw_mode()?;
        let mut session = TerminalSession {
            on_alt_screen: false,
            #[cfg(unix)]
            signals: None,
        };
        #[cfg(unix)]
        {
            session.signals = Some(signals::Watcher::spawn()?);
        }

        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        session.on_alt_screen = true;
        tracing::info!("terminal session started");
        Ok(session)
    }

    /// Current terminal size as (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Block for at most `timeout` waiting for something the demo cares about.
    ///
    /// `Ok(None)` covers both the timeout and ignored events.
    pub fn next_input(&self, timeout: Duration) -> io::Result<Option<Input>> {
        if crossterm::event::poll(timeout)? {
            crossterm::event::read().map(map_event)
        } else {
            Ok(None)
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        #[cfg(unix)]
        drop(self.signals.take());

        restore_terminal(self.on_alt_screen);
        self.on_alt_screen = false;
        tracing::info!("terminal session ended");
    }
}

/// Undo everything [`TerminalSession::new`] may have done. Errors are
/// ignored: this runs from drop, panic and signal paths.
fn restore_terminal(leave_alt_screen: bool) {
    let mut out = io::stdout();
    let _ = execute!(out, cursor::Show);
    if leave_alt_screen {
        let _ = execute!(out, terminal::LeaveAlternateScreen);
    }
    // Raw mode goes last so the sequences above are not echoed.
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}

fn install_panic_restore() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let chained = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_terminal(true);
            chained(info);
        }));
    });
}

pub(crate) fn map_event(event: Event) -> Option<Input> {
    match event {
        Event::Key(key) if is_quit_key(&key) => Some(Input::Quit),
        Event::Resize(width, height) => Some(Input::Resize { width, height }),
        _ => None,
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char(c) if c.eq_ignore_ascii_case(&'q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(unix)]
mod signals {
    use std::io;
    use std::thread::JoinHandle;

    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    use signal_hook::iterator::{Handle, Signals};

    /// Background thread that restores the terminal and exits on SIGINT or
    /// SIGTERM. Dropping it stops the thread.
    #[derive(Debug)]
    pub(super) struct Watcher {
        handle: Handle,
        thread: Option<JoinHandle<()>>,
    }

    impl Watcher {
        pub(super) fn spawn() -> io::Result<Self> {
            let mut signals = Signals::new([SIGINT, SIGTERM])?;
            let handle = signals.handle();
            let thread = std::thread::Builder::new()
                .name("sparkstack-signals".into())
                .spawn(move || {
                    // The iterator ends once the handle is closed.
                    let Some(signal) = signals.forever().next() else {
                        return;
                    };
                    tracing::warn!(signal, "exiting on signal");
                    super::restore_terminal(true);
                    std::process::exit(128 + signal);
                })?;
            Ok(Watcher {
                handle,
                thread: Some(thread),
            })
        }
    }

    impl Drop for Watcher {
        fn drop(&mut self) {
            self.handle.close();
            if let Some(thread) = self.thread.take() {
                let _ = thread.join();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn press(code: KeyCode) -> Event {
        key(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    #[test]
    fn q_esc_and_ctrl_c_quit() {
        let quits = [
            press(KeyCode::Char('q')),
            press(KeyCode::Char('Q')),
            press(KeyCode::Esc),
            key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press),
        ];
        for event in quits {
            assert_eq!(map_event(event), Some(Input::Quit));
        }
    }

    #[test]
    fn other_keys_do_nothing() {
        for code in [KeyCode::Char('c'), KeyCode::Char('x'), KeyCode::Enter] {
            assert_eq!(map_event(press(code)), None);
        }
    }

    #[test]
    fn releases_and_repeats_do_not_quit() {
        for kind in [KeyEventKind::Release, KeyEventKind::Repeat] {
            let event = key(KeyCode::Char('q'), KeyModifiers::NONE, kind);
            assert_eq!(map_event(event), None);
        }
    }

    #[test]
    fn resize_carries_new_size() {
        assert_eq!(
            map_event(Event::Resize(132, 43)),
            Some(Input::Resize {
                width: 132,
                height: 43
            })
        );
    }

    #[test]
    fn focus_changes_are_ignored() {
        assert_eq!(map_event(Event::FocusLost), None);
        assert_eq!(map_event(Event::FocusGained), None);
    }
}
