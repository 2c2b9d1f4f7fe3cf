#![forbid(unsafe_code)]

//! Demo model and main loop.

use std::io;
use std::time::{Duration, Instant};

use sparkstack_core::geometry::Rect;
use sparkstack_render::buffer::Buffer;
use sparkstack_render::presenter::Presenter;
use sparkstack_style::{Color, Style};
use sparkstack_widgets::borders::BorderType;
use sparkstack_widgets::{Block, GlyphRamp, Sparkline, SparklineGroup};

use crate::cli::{MAX_LINES, Opts};
use crate::feed::Feed;
use crate::session::{Input, TerminalSession};

/// Title, subtitle and color for each demo series.
const SERIES: [(&str, &str, Color); MAX_LINES] = [
    ("CPU", "user + system", Color::Green),
    ("Memory", "resident", Color::Yellow),
    ("Net rx", "bytes/s", Color::Cyan),
    ("Net tx", "bytes/s", Color::Magenta),
    ("Disk read", "ops/s", Color::Blue),
    ("Disk write", "ops/s", Color::Red),
    ("Load", "1 min", Color::White),
    ("Temp", "package", Color::Rgb(255, 165, 0)),
];

const FEED_SEED: u64 = 0x5eed_cafe;

pub struct App {
    group: SparklineGroup,
    feed: Feed,
}

impl App {
    pub fn new(opts: &Opts) -> Self {
        let count = opts.lines.clamp(1, MAX_LINES);
        let lines = SERIES[..count]
            .iter()
            .map(|&(title1, title2, color)| {
                Sparkline::new()
                    .title1(title1)
                    .title2(title2)
                    .title_color(color)
                    .line_color(opts.line_color.unwrap_or(color))
            })
            .collect();

        let (border_type, ramp) = if opts.ascii {
            (BorderType::Ascii, GlyphRamp::ascii())
        } else {
            (BorderType::Rounded, GlyphRamp::default())
        };
        let block = Block::bordered()
            .border_type(border_type)
            .border_style(Style::new().fg(Color::White))
            .title(" sparkstack (q to quit) ");

        Self {
            group: SparklineGroup::new(lines).block(block).with_ramp(ramp),
            feed: Feed::new(count, FEED_SEED),
        }
    }

    /// Append one sample to every line.
    pub fn step(&mut self) {
        let samples = self.feed.next_samples();
        for (line, value) in self.group.lines_mut().iter_mut().zip(samples) {
            line.push(value);
        }
    }

    /// Draw the group into a fresh buffer of the given size.
    pub fn render(&mut self, width: u16, height: u16) -> Buffer {
        let mut buf = Buffer::new(width, height);
        self.group.draw(Rect::from_size(width, height), &mut buf);
        buf
    }

    pub fn group(&self) -> &SparklineGroup {
        &self.group
    }
}

/// Run the demo until the user quits or `exit_after_ms` elapses.
///
/// # Errors
///
/// Returns terminal I/O errors.
pub fn run(opts: &Opts) -> io::Result<()> {
    let session = TerminalSession::new()?;
    let mut presenter = Presenter::new(io::stdout()).with_sync_output(true);
    let mut app = App::new(opts);

    let (mut width, mut height) = session.size()?;
    let tick = Duration::from_millis(opts.tick_ms);
    let deadline = (opts.exit_after_ms > 0)
        .then(|| Instant::now() + Duration::from_millis(opts.exit_after_ms));
    let mut next_tick = Instant::now();

    tracing::info!(width, height, lines = opts.lines, tick_ms = opts.tick_ms, "demo started");
    presenter.clear_screen()?;

    loop {
        let now = Instant::now();
        if deadline.is_some_and(|d| now >= d) {
            tracing::info!("exit-after deadline reached");
            break;
        }

        if now >= next_tick {
            app.step();
            presenter.present(&app.render(width, height))?;
            next_tick = now + tick;
        }

        let mut timeout = next_tick.saturating_duration_since(Instant::now());
        if let Some(d) = deadline {
            timeout = timeout.min(d.saturating_duration_since(Instant::now()));
        }

        match session.next_input(timeout)? {
            Some(Input::Quit) => {
                tracing::info!("quit requested");
                break;
            }
            Some(Input::Resize {
                width: w,
                height: h,
            }) => {
                tracing::debug!(width = w, height = h, "resize");
                width = w;
                height = h;
                presenter.clear_screen()?;
                presenter.present(&app.render(width, height))?;
            }
            None => {}
        }
    }

    drop(session);
    Ok(())
}
