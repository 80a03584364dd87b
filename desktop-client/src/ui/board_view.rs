use eframe::egui;
use snake_common::{Direction, SnakeGameState, SnakeSegment};

use super::segments::{SegmentShape, Side, layout_snake};

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(24, 28, 24);
const GRID_LINE: egui::Color32 = egui::Color32::from_rgb(36, 42, 36);
const SNAKE_BODY: egui::Color32 = egui::Color32::from_rgb(80, 180, 80);
const SNAKE_HEAD: egui::Color32 = egui::Color32::from_rgb(120, 220, 100);
const DEAD_BODY: egui::Color32 = egui::Color32::from_gray(110);
const DEAD_HEAD: egui::Color32 = egui::Color32::from_gray(150);
const FOOD: egui::Color32 = egui::Color32::from_rgb(220, 70, 60);
const EYE: egui::Color32 = egui::Color32::from_gray(20);

/// Fraction of a cell covered by the snake's body width.
const BODY_WIDTH: f32 = 0.7;

pub fn render_board(ui: &mut egui::Ui, game: &SnakeGameState) -> egui::Rect {
    let rows = game.rows() as f32;
    let columns = game.columns() as f32;
    let available = ui.available_size();
    let cell_size = (available.x / columns).min(available.y / rows).floor().max(4.0);
    let board_size = egui::vec2(cell_size * columns, cell_size * rows);

    let (outer, _) = ui.allocate_exact_size(available, egui::Sense::hover());
    let rect = egui::Rect::from_center_size(outer.center(), board_size);
    let painter = ui.painter_at(outer);

    painter.rect_filled(rect, 4.0, BACKGROUND);
    for row in 1..game.rows() {
        let y = rect.top() + row as f32 * cell_size;
        painter.line_segment(
            [egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)],
            egui::Stroke::new(1.0, GRID_LINE),
        );
    }
    for column in 1..game.columns() {
        let x = rect.left() + column as f32 * cell_size;
        painter.line_segment(
            [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
            egui::Stroke::new(1.0, GRID_LINE),
        );
    }

    let cell_rect = |row: i32, column: i32| {
        egui::Rect::from_min_size(
            egui::pos2(
                rect.left() + column as f32 * cell_size,
                rect.top() + row as f32 * cell_size,
            ),
            egui::vec2(cell_size, cell_size),
        )
    };

    if let Some(food) = game.food() {
        let cell = cell_rect(food.row, food.column);
        painter.circle_filled(cell.center(), cell_size * 0.35, FOOD);
    }

    let segments: Vec<SnakeSegment> = game.snake_segments().copied().collect();
    let dead = game.is_game_over();
    let (body_color, head_color) = if dead {
        (DEAD_BODY, DEAD_HEAD)
    } else {
        (SNAKE_BODY, SNAKE_HEAD)
    };

    // Tail first so the head is painted on top.
    for (segment, shape) in segments.iter().zip(layout_snake(&segments)).rev() {
        let cell = cell_rect(segment.position.row, segment.position.column);
        let color = match shape {
            SegmentShape::Head { .. } => head_color,
            _ => body_color,
        };
        paint_segment(&painter, cell, &shape, color);
        if let SegmentShape::Head { facing } = shape {
            paint_eyes(&painter, cell, facing);
        }
    }

    rect
}

fn paint_segment(painter: &egui::Painter, cell: egui::Rect, shape: &SegmentShape, color: egui::Color32) {
    let width = cell.width() * BODY_WIDTH;
    let core = egui::Rect::from_center_size(cell.center(), egui::vec2(width, width));
    let rounding = match shape {
        SegmentShape::Straight { .. } => 0.0,
        _ => width * 0.35,
    };
    painter.rect_filled(core, rounding, color);

    for side in shape.connected_sides() {
        painter.rect_filled(bridge(cell, core, side), 0.0, color);
    }
}

/// Strip joining the segment core to the edge of its cell.
fn bridge(cell: egui::Rect, core: egui::Rect, side: Side) -> egui::Rect {
    let center = cell.center();
    match side {
        Side::Top => egui::Rect::from_x_y_ranges(core.x_range(), cell.top()..=center.y),
        Side::Bottom => egui::Rect::from_x_y_ranges(core.x_range(), center.y..=cell.bottom()),
        Side::Left => egui::Rect::from_x_y_ranges(cell.left()..=center.x, core.y_range()),
        Side::Right => egui::Rect::from_x_y_ranges(center.x..=cell.right(), core.y_range()),
    }
}

fn paint_eyes(painter: &egui::Painter, cell: egui::Rect, facing: Direction) {
    let center = cell.center();
    let forward = egui::vec2(facing.shift_column() as f32, facing.shift_row() as f32);
    let sideways = egui::vec2(-forward.y, forward.x);
    let size = cell.width();
    for offset in [-1.0, 1.0] {
        let eye = center + forward * size * 0.15 + sideways * offset * size * 0.18;
        painter.circle_filled(eye, size * 0.07, EYE);
    }
}
