use std::cell::Cell;

use alien_invasion::assets::Bitmap;
use alien_invasion::compute::Game;
use alien_invasion::entities::Rect;
use alien_invasion::hud::*;
use alien_invasion::session::Session;
use alien_invasion::settings::{Color, Settings};
use alien_invasion::surface::{draw_frame, Image, Surface};

fn ship() -> Bitmap {
    Bitmap::parse("  A\n /#\\\n<###>").unwrap()
}

/// Counts how often text gets rasterized.
#[derive(Default)]
struct CountingRasterizer {
    calls: Cell<usize>,
}

impl TextRasterizer for CountingRasterizer {
    fn render_text(&self, text: &str, color: Color, background: Color) -> TextImage {
        self.calls.set(self.calls.get() + 1);
        CellRasterizer.render_text(text, color, background)
    }
}

#[derive(Debug, PartialEq)]
enum Op {
    Fill(Color),
    Rect(Color, Rect),
    Sprite(Rect),
    Text(String, Rect),
    Present,
}

#[derive(Default)]
struct RecordingSurface {
    ops: Vec<Op>,
}

impl Surface for RecordingSurface {
    fn dimensions(&self) -> (u32, u32) {
        (80, 24)
    }

    fn fill(&mut self, color: Color) -> std::io::Result<()> {
        self.ops.push(Op::Fill(color));
        Ok(())
    }

    fn draw_rect(&mut self, color: Color, rect: Rect) -> std::io::Result<()> {
        self.ops.push(Op::Rect(color, rect));
        Ok(())
    }

    fn draw_image(&mut self, image: Image<'_>, at: Rect) -> std::io::Result<()> {
        self.ops.push(match image {
            Image::Sprite { .. } => Op::Sprite(at),
            Image::Text(text) => Op::Text(text.text.clone(), at),
        });
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.ops.push(Op::Present);
        Ok(())
    }
}

// ── format_score ──────────────────────────────────────────────────────────────

#[test]
fn score_is_rounded_and_grouped() {
    assert_eq!(format_score(0), "0");
    assert_eq!(format_score(50), "50");
    assert_eq!(format_score(1234), "1,230");
    assert_eq!(format_score(1236), "1,240");
    assert_eq!(format_score(1_000_000), "1,000,000");
    assert_eq!(format_score(1_234_567), "1,234,570");
}

#[test]
fn score_rounding_ties_go_to_even() {
    assert_eq!(format_score(15), "20");
    assert_eq!(format_score(25), "20");
    assert_eq!(format_score(1235), "1,240");
    assert_eq!(format_score(1245), "1,240");
}

#[test]
fn score_rounding_at_the_top_of_the_range() {
    assert_eq!(format_score(u32::MAX), "4,294,967,300");
}

// ── Scoreboard ────────────────────────────────────────────────────────────────

#[test]
fn scoreboard_layout() {
    let settings = Settings::default();
    let session = Session::new(settings.ship_limit);
    let board = Scoreboard::new(&session, &settings, &ship(), &CellRasterizer);

    assert_eq!(board.score_image().text, "0");
    assert_eq!(board.high_score_image().text, "0");
    assert_eq!(board.level_image().text, "1");
    assert_eq!(board.score_image().color, settings.text_color);
    assert_eq!(board.score_image().background, settings.bg_color);
    assert_eq!(
        board.lives(),
        &[Rect::new(1, 0, 5, 3), Rect::new(6, 0, 5, 3), Rect::new(11, 0, 5, 3)]
    );
}

#[test]
fn scoreboard_only_rerenders_changed_values() {
    let settings = Settings::default();
    let rasterizer = CountingRasterizer::default();
    let mut session = Session::new(settings.ship_limit);
    let mut board = Scoreboard::new(&session, &settings, &ship(), &rasterizer);
    rasterizer.calls.set(0);

    assert_eq!(board.refresh(&session, &rasterizer), 0);
    assert_eq!(rasterizer.calls.get(), 0);

    session.add_points(1500);
    assert_eq!(board.refresh(&session, &rasterizer), 2);
    assert_eq!(board.score_image().text, "1,500");
    assert_eq!(board.high_score_image().text, "1,500");

    session.reset_stats(settings.ship_limit);
    session.level = 2;
    assert_eq!(board.refresh(&session, &rasterizer), 2); // score and level
    assert_eq!(board.high_score_image().text, "1,500");
    assert_eq!(board.level_image().text, "2");

    session.lives_left = 1;
    assert_eq!(board.refresh(&session, &rasterizer), 0);
    assert_eq!(board.lives().len(), 1);
    assert_eq!(rasterizer.calls.get(), 4);
}

// ── Play button ───────────────────────────────────────────────────────────────

#[test]
fn play_label_is_centred() {
    let settings = Settings::default();
    let game = Game::new(settings.clone(), 5, 3).unwrap();
    let button = PlayButton::new(game.play_button(), &settings, &CellRasterizer);

    let mut surface = RecordingSurface::default();
    button.draw(&mut surface).unwrap();

    assert_eq!(
        surface.ops,
        vec![
            Op::Rect(settings.button_color, Rect::new(34, 11, 12, 3)),
            Op::Text("Play".to_string(), Rect::new(38, 12, 4, 1)),
        ]
    );
}

// ── draw_frame ────────────────────────────────────────────────────────────────

fn render(game: &Game) -> Vec<Op> {
    let ship = ship();
    let board = Scoreboard::new(&game.session, &game.settings, &ship, &CellRasterizer);
    let button = PlayButton::new(game.play_button(), &game.settings, &CellRasterizer);
    let mut surface = RecordingSurface::default();
    draw_frame(&mut surface, game, &ship, &board, &button).unwrap();
    surface.ops
}

#[test]
fn frame_draw_order() {
    let mut game = Game::new(Settings::default(), 5, 3).unwrap();
    game.start_game();
    game.fire();
    let ops = render(&game);

    assert_eq!(ops[0], Op::Fill(game.settings.bg_color));
    assert_eq!(ops[1], Op::Sprite(Rect::new(38, 21, 5, 3)));
    assert_eq!(ops[2], Op::Rect(game.settings.bullet_color, Rect::new(40, 21, 1, 1)));
    assert_eq!(ops[3], Op::Rect(game.settings.alien_color, Rect::new(3, 2, 3, 2)));
    assert_eq!(ops.last(), Some(&Op::Present));

    let enemies = ops
        .iter()
        .filter(|op| matches!(op, Op::Rect(c, _) if *c == game.settings.alien_color))
        .count();
    assert_eq!(enemies, 36);
}

#[test]
fn start_prompt_only_when_inactive() {
    let mut game = Game::new(Settings::default(), 5, 3).unwrap();
    let button = Op::Rect(game.settings.button_color, game.play_button());

    assert!(render(&game).contains(&button));

    game.start_game();
    assert!(!render(&game).contains(&button));
}

#[test]
fn hud_is_drawn_every_frame() {
    let game = Game::new(Settings::default(), 5, 3).unwrap();
    let ops = render(&game);
    let texts = ops.iter().filter(|op| matches!(op, Op::Text(..))).count();
    // score, high score, level, Play label
    assert_eq!(texts, 4);
    let sprites = ops.iter().filter(|op| matches!(op, Op::Sprite(_))).count();
    // the craft plus one icon per life
    assert_eq!(sprites, 1 + game.settings.ship_limit as usize);
}
