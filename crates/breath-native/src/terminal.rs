use breath_core::{Frame, RenderSink, Theme, INHALE_MAX_LIMIT};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, queue};
use std::io::Write;

const GAUGE_WIDTH: usize = 40;

/// Redraws a single status line per frame: phase label, indicator bar and a
/// size gauge tinted with the theme's phase colour.
pub struct TerminalSink<W: Write> {
    out: W,
    color: bool,
    label: String,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            label: String::new(),
        }
    }

    /// Text shown after the gauge, e.g. the current sequence step.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn finish(&mut self) -> anyhow::Result<()> {
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// `width` cells, the first `fraction` of them filled.
pub fn gauge(fraction: f32, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f32).round() as usize;
    let mut bar = "#".repeat(filled);
    bar.push_str(&".".repeat(width - filled));
    bar
}

fn rgb(color: glam::Vec4) -> Color {
    let [r, g, b, _] = (color * 255.0).to_array().map(|c| c.clamp(0.0, 255.0) as u8);
    Color::Rgb { r, g, b }
}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn render(&mut self, frame: &Frame) -> anyhow::Result<()> {
        let indicator = frame.indicator();
        let bar = gauge(frame.value / INHALE_MAX_LIMIT, GAUGE_WIDTH);
        let fill = gauge(indicator.fill, 10);
        queue!(
            self.out,
            cursor::MoveToColumn(0),
            Print(format!("{:<7} [{fill}] ", indicator.label))
        )?;
        if self.color {
            queue!(
                self.out,
                SetForegroundColor(rgb(frame.visual.color)),
                Print(bar),
                ResetColor
            )?;
        } else {
            queue!(self.out, Print(bar))?;
        }
        queue!(
            self.out,
            Print(format!(" {:>4.2} {}", frame.visual.scale, self.label)),
            Clear(ClearType::UntilNewLine)
        )?;
        self.out.flush()?;
        Ok(())
    }
}

/// `Theme` name plus colour swatch for the startup banner.
pub fn theme_swatch(theme: &Theme, color: bool) -> String {
    if color {
        format!("{} {}", "##".with(rgb(theme.colors.primary)), theme.name)
    } else {
        theme.name.to_string()
    }
}
