//! Terminal presentation: the 400x600 world scaled into a half-block pixel
//! buffer and flushed with crossterm.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
};

use crate::entities::{
    Bird, CANVAS_HEIGHT, CANVAS_WIDTH, Cloud, GROUND_HEIGHT, Obstacle, PIPE_WIDTH,
    PLAYFIELD_HEIGHT, WingPhase,
};
use crate::error::Result;
use crate::game::{GameEvent, Phase, Snapshot};
use crate::profile::Difficulty;
use crate::scheduler::Presenter;

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    const fn halved(self) -> Rgb {
        Rgb(self.0 / 2, self.1 / 2, self.2 / 2)
    }
}

const LETTERBOX: Rgb = Rgb(24, 28, 34);
const SKY_TOP: Rgb = Rgb(112, 197, 206);
const SKY_MID: Rgb = Rgb(90, 155, 164);
const CLOUD: Rgb = Rgb(238, 246, 248);
const PIPE_L: Rgb = Rgb(48, 118, 48);
const PIPE_M: Rgb = Rgb(74, 165, 74);
const PIPE_R: Rgb = Rgb(88, 184, 88);
const PIPE_HI: Rgb = Rgb(128, 212, 118);
const PIPE_CAP: Rgb = Rgb(58, 138, 58);
const BIRD_BODY: Rgb = Rgb(255, 204, 0);
const BIRD_WING: Rgb = Rgb(230, 184, 0);
const BIRD_BEAK: Rgb = Rgb(255, 102, 0);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_PUPIL: Rgb = Rgb(0, 0, 0);
const GROUND: Rgb = Rgb(222, 184, 135);
const GROUND_DETAIL: Rgb = Rgb(184, 134, 11);
const PANEL_EDGE: Rgb = Rgb(185, 160, 90);
const PANEL: Rgb = Rgb(220, 195, 120);
const WHITE: Rgb = Rgb(255, 255, 255);
const SHADOW: Rgb = Rgb(30, 30, 30);

fn difficulty_color(d: Difficulty) -> Rgb {
    match d {
        Difficulty::Easy => Rgb(110, 200, 70),
        Difficulty::Medium => Rgb(245, 200, 66),
        Difficulty::Hard => Rgb(225, 75, 35),
    }
}

// ── Pixel buffer with half-block rendering ──────────────────────────────────

pub struct PixelBuf {
    w: usize,
    h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![LETTERBOX; w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, LETTERBOX);
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    fn clear(&mut self, c: Rgb) {
        self.px.fill(c);
    }

    fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    fn outline_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dx in 0..w {
            self.set(x + dx, y, c);
            self.set(x + dx, y + h - 1, c);
        }
        for dy in 0..h {
            self.set(x, y + dy, c);
            self.set(x + w - 1, y + dy, c);
        }
    }

    fn dim(&mut self) {
        for c in &mut self.px {
            *c = c.halved();
        }
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev_fg = Rgb(0, 0, 0);
        let mut prev_bg = Rgb(0, 0, 0);
        let mut need_fg = true;
        let mut need_bg = true;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if top == bot {
                    if need_bg || prev_bg != top {
                        queue!(out, style::SetBackgroundColor(term_color(top)))?;
                        prev_bg = top;
                        need_bg = false;
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if need_fg || prev_fg != top {
                        queue!(out, style::SetForegroundColor(term_color(top)))?;
                        prev_fg = top;
                        need_fg = false;
                    }
                    if need_bg || prev_bg != bot {
                        queue!(out, style::SetBackgroundColor(term_color(bot)))?;
                        prev_bg = bot;
                        need_bg = false;
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                need_fg = true;
                need_bg = true;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

fn term_color(c: Rgb) -> CColor {
    CColor::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

// ── 3x5 bitmap digits ──────────────────────────────────────────────────────

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

/// `size` is the edge of one font pixel in buffer pixels.
fn draw_digit(buf: &mut PixelBuf, x: i32, y: i32, d: u8, fg: Rgb, size: i32) {
    let glyph = &DIGITS[d as usize];
    for row in 0..5 {
        for col in 0..3 {
            if glyph[row * 3 + col] == 1 {
                let px = x + col as i32 * size;
                let py = y + row as i32 * size;
                buf.fill_rect(px + 1, py + 1, size, size, SHADOW);
                buf.fill_rect(px, py, size, size, fg);
            }
        }
    }
}

fn draw_number(buf: &mut PixelBuf, cx: i32, y: i32, n: u32, fg: Rgb, size: i32) {
    let s = n.to_string();
    let advance = 4 * size; // 3 font px per digit + 1 px spacing
    let total_w = s.len() as i32 * advance - size;
    let start_x = cx - total_w / 2;
    for (i, ch) in s.chars().enumerate() {
        let d = ch as u8 - b'0';
        draw_digit(buf, start_x + i as i32 * advance, y, d, fg, size);
    }
}

// ── World to buffer mapping ─────────────────────────────────────────────────

/// Uniform scale that fits the canvas into the buffer, centred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub ox: f64,
    pub oy: f64,
}

impl Viewport {
    pub fn fit(pw: usize, ph: usize) -> Self {
        let scale = (pw as f64 / CANVAS_WIDTH).min(ph as f64 / CANVAS_HEIGHT);
        Self {
            scale,
            ox: ((pw as f64 - CANVAS_WIDTH * scale) / 2.0).floor(),
            oy: ((ph as f64 - CANVAS_HEIGHT * scale) / 2.0).floor(),
        }
    }

    pub fn px(&self, x: f64) -> i32 {
        (self.ox + x * self.scale).round() as i32
    }

    pub fn py(&self, y: f64) -> i32 {
        (self.oy + y * self.scale).round() as i32
    }

    /// Font pixel size for on-screen numbers.
    fn font_size(&self) -> i32 {
        ((self.scale * 8.0) as i32).max(1)
    }
}

struct Canvas<'a> {
    buf: &'a mut PixelBuf,
    view: Viewport,
}

impl Canvas<'_> {
    /// Sets a pixel, clipped to the canvas area so nothing leaks into the
    /// letterbox.
    fn put(&mut self, px: i32, py: i32, c: Rgb) {
        let v = self.view;
        if px >= v.px(0.0) && px < v.px(CANVAS_WIDTH) && py >= v.py(0.0) && py < v.py(CANVAS_HEIGHT) {
            self.buf.set(px, py, c);
        }
    }

    fn fill(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, c: Rgb) {
        for py in y0..y1 {
            for px in x0..x1 {
                self.put(px, py, c);
            }
        }
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, c: Rgb) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let (x0, y0) = (self.view.px(x), self.view.py(y));
        let x1 = self.view.px(x + w).max(x0 + 1);
        let y1 = self.view.py(y + h).max(y0 + 1);
        self.fill(x0, y0, x1, y1, c);
    }

    /// A rect shaded column by column like a lit cylinder.
    fn pipe_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let (x0, y0) = (self.view.px(x), self.view.py(y));
        let x1 = self.view.px(x + w).max(x0 + 1);
        let y1 = self.view.py(y + h).max(y0 + 1);
        for col in x0..x1 {
            let c = pipe_shade(col - x0, x1 - x0);
            self.fill(col, y0, col + 1, y1, c);
        }
    }

    fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, c: Rgb) {
        let v = self.view;
        let (x0, x1) = (v.px(cx - rx), v.px(cx + rx));
        let (y0, y1) = (v.py(cy - ry), v.py(cy + ry));
        let mut hit = false;
        for py in y0..=y1 {
            for px in x0..=x1 {
                let wx = (px as f64 + 0.5 - v.ox) / v.scale;
                let wy = (py as f64 + 0.5 - v.oy) / v.scale;
                let (dx, dy) = ((wx - cx) / rx, (wy - cy) / ry);
                if dx * dx + dy * dy <= 1.0 {
                    self.put(px, py, c);
                    hit = true;
                }
            }
        }
        // Too small to cover any pixel centre: still show a dot.
        if !hit {
            self.put(v.px(cx), v.py(cy), c);
        }
    }

    fn circle(&mut self, cx: f64, cy: f64, r: f64, c: Rgb) {
        self.ellipse(cx, cy, r, r, c);
    }
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}

// ── Scene ───────────────────────────────────────────────────────────────────

/// UI state owned by the presentation, not the simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overlay {
    pub settings_open: bool,
    /// Whether the run that just ended beat the previous best.
    pub new_best: bool,
}

/// Paints one full frame into `buf`.
pub fn draw_scene(buf: &mut PixelBuf, view: &Snapshot<'_>, overlay: Overlay) {
    let vp = Viewport::fit(buf.width(), buf.height());
    buf.clear(LETTERBOX);
    {
        let mut canvas = Canvas { buf: &mut *buf, view: vp };
        draw_sky(&mut canvas);
        for cloud in view.clouds {
            draw_cloud(&mut canvas, cloud);
        }
        for pipe in view.obstacles {
            draw_pipe(&mut canvas, pipe, view.gap);
        }
        draw_bird(&mut canvas, view.bird);
        draw_ground(&mut canvas);
    }

    let size = vp.font_size();
    if view.phase == Phase::Running {
        draw_number(buf, vp.px(CANVAS_WIDTH / 2.0), vp.py(0.0) + 2 * size, view.score, WHITE, size);
    }

    match view.phase {
        Phase::Idle => draw_title(buf, vp, view),
        Phase::Over => draw_game_over(buf, vp, view, overlay.new_best),
        Phase::Running => {}
    }
    if overlay.settings_open && view.phase != Phase::Running {
        draw_settings(buf, vp, view.selected);
    }
}

fn draw_sky(canvas: &mut Canvas<'_>) {
    let v = canvas.view;
    let (top, bottom) = (v.py(0.0), v.py(PLAYFIELD_HEIGHT));
    let (left, right) = (v.px(0.0), v.px(CANVAS_WIDTH));
    for py in top..bottom {
        // Gradient stops at half the canvas height, flat below.
        let wy = (py as f64 + 0.5 - v.oy) / v.scale;
        let t = ((wy / (CANVAS_HEIGHT / 2.0)).clamp(0.0, 1.0) * 256.0) as u16;
        let c = Rgb::lerp(SKY_TOP, SKY_MID, t);
        canvas.fill(left, py, right, py + 1, c);
    }
}

fn draw_cloud(canvas: &mut Canvas<'_>, cloud: &Cloud) {
    let (x, y) = (cloud.x, cloud.y);
    let r = cloud.width / 3.0;
    canvas.circle(x, y, r, CLOUD);
    canvas.circle(x + r * 0.7, y - r * 0.4, r * 0.8, CLOUD);
    canvas.circle(x + r * 1.5, y, r * 0.7, CLOUD);
    canvas.circle(x + r * 1.3, y + r * 0.4, r * 0.6, CLOUD);
    canvas.circle(x + r * 0.5, y + r * 0.3, r * 0.7, CLOUD);
}

fn draw_pipe(canvas: &mut Canvas<'_>, pipe: &Obstacle, gap: f64) {
    let gap_bottom = pipe.gap_bottom(gap);
    canvas.pipe_rect(pipe.x, 0.0, PIPE_WIDTH, pipe.top_height);
    canvas.pipe_rect(pipe.x, gap_bottom, PIPE_WIDTH, pipe.bottom_height(gap));

    // Lips hang 5px over each side
    canvas.rect(pipe.x - 5.0, pipe.top_height - 20.0, PIPE_WIDTH + 10.0, 20.0, PIPE_CAP);
    let lip = pipe.bottom_height(gap).min(20.0);
    canvas.rect(pipe.x - 5.0, gap_bottom, PIPE_WIDTH + 10.0, lip, PIPE_CAP);
}

fn draw_bird(canvas: &mut Canvas<'_>, bird: &Bird) {
    let (x, y, w, h) = (bird.x, bird.y, bird.width, bird.height);

    canvas.ellipse(x + w / 2.0, y + h / 2.0, w / 2.0, h / 2.0, BIRD_BODY);
    canvas.circle(x + w, y + h / 3.0, h / 2.0, BIRD_BODY);

    canvas.circle(x + w + 5.0, y + h / 3.0 - 2.0, 3.0, BIRD_EYE);
    canvas.circle(x + w + 5.0, y + h / 3.0 - 2.0, 1.5, BIRD_PUPIL);

    canvas.rect(x + w + 10.0, y + h / 3.0, 10.0, 3.0, BIRD_BEAK);
    canvas.rect(x + w + 10.0, y + h / 3.0 + 3.0, 5.0, 2.0, BIRD_BEAK);

    let wing_dy = match bird.wing {
        WingPhase::Up => -7.0,
        WingPhase::Down => 7.0,
    };
    canvas.ellipse(x + w / 2.0 - 7.0, y + h / 2.0 + wing_dy, 9.0, 5.0, BIRD_WING);
}

fn draw_ground(canvas: &mut Canvas<'_>) {
    // Bumps first: the ground hides their lower halves.
    let mut bx = 0.0;
    while bx < CANVAS_WIDTH {
        canvas.circle(bx, PLAYFIELD_HEIGHT, 5.0, GROUND_DETAIL);
        bx += 30.0;
    }
    canvas.rect(0.0, PLAYFIELD_HEIGHT, CANVAS_WIDTH, GROUND_HEIGHT, GROUND);
}

fn draw_panel(buf: &mut PixelBuf, cx: i32, cy: i32, w: i32, h: i32) -> (i32, i32) {
    let px = cx - w / 2;
    let py = cy - h / 2;
    buf.fill_rect(px - 1, py - 1, w + 2, h + 2, SHADOW);
    buf.fill_rect(px, py, w, h, PANEL_EDGE);
    buf.fill_rect(px + 1, py + 1, w - 2, h - 2, PANEL);
    (px, py)
}

/// Three swatches, the selected one framed in white.
fn draw_difficulty_row(buf: &mut PixelBuf, cx: i32, y: i32, selected: Difficulty, size: i32, labels: bool) {
    let sw = 4 * size;
    let spacing = sw + 3 * size;
    let start = cx - (spacing * 2 + sw) / 2;
    for (i, d) in Difficulty::ALL.into_iter().enumerate() {
        let x = start + i as i32 * spacing;
        buf.fill_rect(x, y, sw, sw, difficulty_color(d));
        if d == selected {
            buf.outline_rect(x - 1, y - 1, sw + 2, sw + 2, WHITE);
        }
        if labels {
            draw_number(buf, x + sw / 2, y + sw + 2 * size, i as u32 + 1, WHITE, size);
        }
    }
}

fn draw_title(buf: &mut PixelBuf, vp: Viewport, view: &Snapshot<'_>) {
    let size = vp.font_size();
    let cx = vp.px(CANVAS_WIDTH / 2.0);
    let cy = vp.py(CANVAS_HEIGHT / 5.0);

    // "FLAPPY" in blocky letters
    let letters = 6;
    let char_w = 4 * size;
    let char_h = 6 * size;
    let sx = cx - letters * char_w / 2;
    for i in 0..letters {
        let bx = sx + i * char_w;
        buf.fill_rect(bx + 1, cy + 1, char_w - size, char_h, SHADOW);
        buf.fill_rect(bx, cy, char_w - size, char_h, BIRD_BODY);
        buf.fill_rect(bx, cy, char_w - size, size, WHITE);
    }

    let row_y = cy + char_h + 4 * size;
    draw_difficulty_row(buf, cx, row_y, view.selected, size, false);

    if view.high_score > 0 {
        draw_number(buf, cx, row_y + 8 * size, view.high_score, BIRD_BODY, size);
    }
}

fn draw_game_over(buf: &mut PixelBuf, vp: Viewport, view: &Snapshot<'_>, new_best: bool) {
    let size = vp.font_size();
    let cx = vp.px(CANVAS_WIDTH / 2.0);
    let cy = vp.py(CANVAS_HEIGHT / 2.0);
    let panel_w = ((CANVAS_WIDTH * 0.6 * vp.scale) as i32).max(20 * size);
    let panel_h = 20 * size;

    buf.dim();
    let (px, py) = draw_panel(buf, cx, cy, panel_w, panel_h);

    draw_number(buf, cx, py + 3 * size, view.score, WHITE, size);
    draw_number(buf, cx, py + 11 * size, view.high_score, BIRD_BODY, size);

    if new_best {
        // Badge in the panel's top-right corner
        let badge = 3 * size;
        buf.fill_rect(px + panel_w - badge - 2 * size, py + 2 * size, badge, badge, BIRD_BEAK);
        buf.outline_rect(px + panel_w - badge - 2 * size, py + 2 * size, badge, badge, WHITE);
    }
}

fn draw_settings(buf: &mut PixelBuf, vp: Viewport, selected: Difficulty) {
    let size = vp.font_size();
    let cx = vp.px(CANVAS_WIDTH / 2.0);
    let cy = vp.py(CANVAS_HEIGHT * 0.55);
    let (_, py) = draw_panel(buf, cx, cy, 26 * size, 16 * size);
    draw_difficulty_row(buf, cx, py + 3 * size, selected, size, true);
}

// ── Presenter ───────────────────────────────────────────────────────────────

pub struct TerminalPresenter<W: Write> {
    out: W,
    buf: PixelBuf,
    pub overlay: Overlay,
}

impl<W: Write> TerminalPresenter<W> {
    /// `cols` x `rows` terminal cells, i.e. `cols` x `rows * 2` pixels.
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            buf: PixelBuf::new(cols as usize, rows as usize * 2),
            overlay: Overlay::default(),
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.buf.resize(cols as usize, rows as usize * 2);
    }

    pub fn toggle_settings(&mut self) {
        self.overlay.settings_open = !self.overlay.settings_open;
    }

    pub fn out_mut(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn present(&mut self, view: &Snapshot<'_>, events: &[GameEvent]) -> Result<()> {
        if view.phase == Phase::Running {
            self.overlay = Overlay::default();
        }
        for event in events {
            if let GameEvent::RunOver { new_high_score, .. } = event {
                self.overlay.new_best = *new_high_score;
            }
        }
        draw_scene(&mut self.buf, view, self.overlay);
        self.buf.render(&mut self.out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use crate::score_store::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn game() -> Game<MemoryStore, StdRng> {
        Game::new(Difficulty::Hard, MemoryStore::default(), StdRng::seed_from_u64(9))
    }

    #[test]
    fn test_viewport_letterboxes_wide_terminal() {
        let vp = Viewport::fit(200, 60);
        assert!((vp.scale - 0.1).abs() < 1e-12);
        assert_eq!(vp.px(0.0), 80);
        assert_eq!(vp.px(CANVAS_WIDTH), 120);
        assert_eq!(vp.py(0.0), 0);
        assert_eq!(vp.py(CANVAS_HEIGHT), 60);
    }

    #[test]
    fn test_ground_and_letterbox_colors() {
        let g = game();
        let mut buf = PixelBuf::new(200, 60);
        draw_scene(&mut buf, &g.snapshot(), Overlay::default());
        assert_eq!(buf.get(0, 30), LETTERBOX);
        assert_eq!(buf.get(100, 58), GROUND);
    }

    #[test]
    fn test_bird_is_drawn_at_its_position() {
        let mut g = game();
        g.restart();
        let mut buf = PixelBuf::new(400, 600);
        draw_scene(&mut buf, &g.snapshot(), Overlay::default());
        // Body centre at (120, 315) on a 1:1 viewport
        assert_eq!(buf.get(112, 320), BIRD_BODY);
    }

    #[test]
    fn test_render_writes_half_blocks() {
        let mut buf = PixelBuf::new(4, 4);
        buf.set(0, 0, WHITE);
        let mut out = Vec::new();
        buf.render(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains('\u{2580}'));
    }

    #[test]
    fn test_presenter_tracks_new_best() {
        let g = game();
        let mut presenter = TerminalPresenter::new(Vec::new(), 40, 30);
        let events = [GameEvent::RunOver {
            score: 3,
            new_high_score: true,
        }];
        presenter.present(&g.snapshot(), &events).unwrap();
        assert!(presenter.overlay.new_best);
        assert!(!presenter.out_mut().is_empty());
    }

    #[test]
    fn test_pipe_shade_edges_are_dark() {
        assert_eq!(pipe_shade(0, 10), PIPE_L);
        assert_eq!(pipe_shade(0, 1), PIPE_M);
    }
}
