//! Terminal canvas
//!
//! The playfield is scaled onto a pixel buffer with two pixels per terminal
//! cell (upper half block glyph, foreground = top pixel, background = bottom).

use std::io::{self, Stdout, Write};
use std::path::Path;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::style::{self, Color as TermColor};
use crossterm::{cursor, execute, queue, terminal};
use glam::IVec2;

use super::{Canvas, Color, Flip, Rect, RenderError, Texture, font};

/// Raw mode + alternate screen for the lifetime of the guard
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let entered = execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            EnableMouseCapture,
        );
        if let Err(e) = entered {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Pixel buffer, `h` is twice the terminal row count
#[derive(Debug, Clone)]
pub struct PixelBuf {
    w: usize,
    h: usize,
    px: Vec<Color>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![Color::BLACK; w * h],
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, Color::BLACK);
    }

    fn fill(&mut self, c: Color) {
        self.px.fill(c);
    }

    fn set(&mut self, x: i32, y: i32, c: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Color {
        self.px[y * self.w + x]
    }

    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev_fg = None;
        let mut prev_bg = None;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if top == bot {
                    if prev_bg != Some(top) {
                        queue!(out, style::SetBackgroundColor(term_color(top)))?;
                        prev_bg = Some(top);
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if prev_fg != Some(top) {
                        queue!(out, style::SetForegroundColor(term_color(top)))?;
                        prev_fg = Some(top);
                    }
                    if prev_bg != Some(bot) {
                        queue!(out, style::SetBackgroundColor(term_color(bot)))?;
                        prev_bg = Some(bot);
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                prev_fg = None;
                prev_bg = None;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Map a playfield coordinate onto `buf_len` buffer pixels
fn scale(v: i32, buf_len: usize, playfield_len: i32) -> i32 {
    (v as i64 * buf_len as i64).div_euclid(playfield_len as i64) as i32
}

/// Buffer pixel center back to a playfield coordinate
fn unscale(p: i32, buf_len: usize, playfield_len: i32) -> i32 {
    ((p as i64 * 2 + 1) * playfield_len as i64).div_euclid(2 * buf_len as i64) as i32
}

/// Canvas that rasterizes into a terminal-sized pixel buffer
pub struct TerminalCanvas<W: Write> {
    out: W,
    playfield: IVec2,
    buf: PixelBuf,
    /// Re-read the terminal size at every `clear`
    follow_terminal: bool,
}

impl TerminalCanvas<Stdout> {
    /// Canvas over stdout, sized to the current terminal
    pub fn stdout(playfield: IVec2) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let mut canvas = Self::new(io::stdout(), playfield, cols, rows);
        canvas.follow_terminal = true;
        Ok(canvas)
    }
}

impl<W: Write> TerminalCanvas<W> {
    /// Fixed-size canvas over any writer
    pub fn new(out: W, playfield: IVec2, cols: u16, rows: u16) -> Self {
        Self {
            out,
            playfield,
            buf: PixelBuf::new(cols as usize, rows as usize * 2),
            follow_terminal: false,
        }
    }

    pub fn buffer(&self) -> &PixelBuf {
        &self.buf
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    fn sync_size(&mut self) {
        match terminal::size() {
            Ok((cols, rows)) => {
                let (w, h) = (cols as usize, rows as usize * 2);
                if (w, h) != (self.buf.w, self.buf.h) {
                    log::debug!("Terminal resized to {}x{}", cols, rows);
                    self.buf.resize(w, h);
                }
            }
            Err(e) => log::warn!("Could not read terminal size: {}", e),
        }
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn clear(&mut self) {
        if self.follow_terminal {
            self.sync_size();
        }
        self.buf.fill(Color::BLACK);
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.buf.render(&mut self.out)?;
        Ok(())
    }

    fn draw_image(&mut self, texture: &Texture, src: Option<Rect>, dest: Rect, flip: Flip) {
        let src = src.unwrap_or(Rect::new(0, 0, texture.width(), texture.height()));
        if dest.w <= 0 || dest.h <= 0 || src.w <= 0 || src.h <= 0 {
            return;
        }
        let (bw, bh) = (self.buf.w, self.buf.h);
        let pf = self.playfield;

        let bx0 = scale(dest.x, bw, pf.x).max(0);
        let bx1 = scale(dest.x + dest.w, bw, pf.x).min(bw as i32);
        let by0 = scale(dest.y, bh, pf.y).max(0);
        let by1 = scale(dest.y + dest.h, bh, pf.y).min(bh as i32);

        for by in by0..by1 {
            let v = unscale(by, bh, pf.y) - dest.y;
            if v < 0 || v >= dest.h {
                continue;
            }
            let mut ty = v * src.h / dest.h;
            if flip == Flip::Vertical {
                ty = src.h - 1 - ty;
            }
            let ty = src.y + ty;

            for bx in bx0..bx1 {
                let u = unscale(bx, bw, pf.x) - dest.x;
                if u < 0 || u >= dest.w {
                    continue;
                }
                let tx = src.x + u * src.w / dest.w;
                if let Some(c) = texture.pixel(tx, ty) {
                    if c.a >= 128 {
                        self.buf.set(bx, by, c);
                    }
                }
            }
        }
    }

    fn load_texture(&mut self, path: &Path) -> Result<Texture, RenderError> {
        Texture::load(path)
    }

    fn render_text(&mut self, text: &str, color: Color) -> Result<Texture, RenderError> {
        Ok(Texture::from_image(
            format!("text:{}", text),
            font::rasterize(text, color),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn canvas() -> TerminalCanvas<Vec<u8>> {
        // 80x30 cells -> 80x60 pixels, 10 playfield pixels per buffer pixel
        TerminalCanvas::new(Vec::new(), IVec2::new(800, 600), 80, 30)
    }

    fn two_tone() -> Texture {
        // Top row red, bottom row blue
        let mut image = RgbaImage::new(1, 2);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(0, 1, Rgba([0, 0, 255, 255]));
        Texture::from_image("two-tone", image)
    }

    #[test]
    fn test_scale_maps_playfield_to_buffer() {
        assert_eq!(scale(0, 80, 800), 0);
        assert_eq!(scale(800, 80, 800), 80);
        assert_eq!(scale(-15, 80, 800), -2);
        assert_eq!(unscale(0, 80, 800), 5);
    }

    #[test]
    fn test_draw_image_fills_dest() {
        let mut c = canvas();
        c.clear();
        c.draw_image(&two_tone(), None, Rect::new(100, 100, 100, 100), Flip::None);

        let buf = c.buffer();
        assert_eq!(buf.get(10, 10), Color::rgb(255, 0, 0));
        assert_eq!(buf.get(19, 19), Color::rgb(0, 0, 255));
        assert_eq!(buf.get(9, 10), Color::BLACK);
        assert_eq!(buf.get(20, 10), Color::BLACK);
    }

    #[test]
    fn test_vertical_flip() {
        let mut c = canvas();
        c.clear();
        c.draw_image(&two_tone(), None, Rect::new(0, 0, 100, 100), Flip::Vertical);
        assert_eq!(c.buffer().get(0, 0), Color::rgb(0, 0, 255));
        assert_eq!(c.buffer().get(0, 9), Color::rgb(255, 0, 0));
    }

    #[test]
    fn test_transparent_pixels_are_skipped() {
        let mut c = canvas();
        c.clear();
        let clear = Texture::from_image("clear", RgbaImage::new(4, 4));
        c.draw_image(&two_tone(), None, Rect::new(0, 0, 800, 600), Flip::None);
        c.draw_image(&clear, None, Rect::new(0, 0, 800, 600), Flip::None);
        assert_eq!(c.buffer().get(0, 0), Color::rgb(255, 0, 0));
    }

    #[test]
    fn test_offscreen_draw_is_clipped() {
        let mut c = canvas();
        c.clear();
        c.draw_image(&two_tone(), None, Rect::new(-50, 0, 100, 600), Flip::None);
        c.draw_image(&two_tone(), None, Rect::new(900, 0, 100, 600), Flip::None);
        assert_eq!(c.buffer().get(0, 0), Color::rgb(255, 0, 0));
        assert_eq!(c.buffer().get(5, 0), Color::BLACK);
    }

    #[test]
    fn test_present_writes_half_blocks() {
        let mut c = canvas();
        c.clear();
        c.draw_image(&two_tone(), None, Rect::new(0, 0, 800, 20), Flip::None);
        c.present().unwrap();
        let text = String::from_utf8_lossy(c.output());
        assert!(text.contains('\u{2580}'));
    }

    #[test]
    fn test_render_text_uses_bitmap_font() {
        let mut c = canvas();
        let tex = c.render_text("42", Color::WHITE).unwrap();
        assert_eq!((tex.width(), tex.height()), (7, 5));
    }
}
