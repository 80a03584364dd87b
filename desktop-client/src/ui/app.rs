use eframe::egui;
use snake_common::{DeathReason, Direction};

use crate::command_sender::CommandSender;
use crate::state::{ClientCommand, GameResult, SessionPhase, SharedState};

use super::board_view::render_board;

pub struct SnakeApp {
    shared_state: SharedState,
    command_sender: CommandSender,
    quit_sent: bool,
}

impl SnakeApp {
    pub fn new(shared_state: SharedState, command_sender: CommandSender) -> Self {
        Self {
            shared_state,
            command_sender,
            quit_sent: false,
        }
    }

    fn handle_input(&self, ctx: &egui::Context, phase: SessionPhase) {
        match phase {
            SessionPhase::Waiting | SessionPhase::GameOver => {
                let any_key = ctx.input(|i| {
                    i.events
                        .iter()
                        .any(|event| matches!(event, egui::Event::Key { pressed: true, repeat: false, .. }))
                });
                if any_key {
                    self.command_sender.send(ClientCommand::StartNewGame);
                }
            }
            SessionPhase::Countdown(_) | SessionPhase::Running => {
                let directions = ctx.input(|i| {
                    i.events
                        .iter()
                        .filter_map(|event| match event {
                            egui::Event::Key {
                                key,
                                pressed: true,
                                repeat: false,
                                ..
                            } => direction_for_key(*key),
                            _ => None,
                        })
                        .collect::<Vec<_>>()
                });
                // Two quick presses within one tick are both kept, in order.
                for direction in directions {
                    self.command_sender.send(ClientCommand::ChangeDirection(direction));
                }
            }
        }
    }

    fn render_hud(&self, ui: &mut egui::Ui) {
        let (score, best, speed) = self
            .shared_state
            .with_game(|game| (game.score(), game.best_score(), game.speed_display()));
        ui.horizontal(|ui| {
            ui.heading(format!("Score: {}", score));
            ui.separator();
            ui.label(format!("Best: {}", best));
            ui.separator();
            ui.label(format!("Speed: {}", speed));
        });
    }

    fn render_overlay(&self, ui: &mut egui::Ui, board_rect: egui::Rect, phase: SessionPhase) {
        let painter = ui.painter_at(board_rect);
        let center = board_rect.center();
        let dim = egui::Color32::from_black_alpha(150);

        match phase {
            SessionPhase::Running => {}
            SessionPhase::Countdown(step) => {
                painter.text(
                    center,
                    egui::Align2::CENTER_CENTER,
                    step.to_string(),
                    egui::FontId::proportional(72.0),
                    egui::Color32::WHITE,
                );
            }
            SessionPhase::GameOver => {
                painter.rect_filled(board_rect, 4.0, dim);
                painter.text(
                    center,
                    egui::Align2::CENTER_CENTER,
                    "Game Over",
                    egui::FontId::proportional(40.0),
                    egui::Color32::RED,
                );
            }
            SessionPhase::Waiting => {
                painter.rect_filled(board_rect, 4.0, dim);
                if let Some(result) = self.shared_state.last_result() {
                    painter.text(
                        center - egui::vec2(0.0, 36.0),
                        egui::Align2::CENTER_CENTER,
                        describe_result(result),
                        egui::FontId::proportional(22.0),
                        egui::Color32::LIGHT_GRAY,
                    );
                }
                painter.text(
                    center,
                    egui::Align2::CENTER_CENTER,
                    "Press any key to start",
                    egui::FontId::proportional(26.0),
                    egui::Color32::WHITE,
                );
                painter.text(
                    center + egui::vec2(0.0, 32.0),
                    egui::Align2::CENTER_CENTER,
                    "Arrow Keys or WASD to steer",
                    egui::FontId::proportional(16.0),
                    egui::Color32::GRAY,
                );
            }
        }
    }
}

impl eframe::App for SnakeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.shared_state.has_context() {
            self.shared_state.set_context(ctx.clone());
        }

        if ctx.input(|i| i.viewport().close_requested()) && !self.quit_sent {
            self.command_sender.send(ClientCommand::Quit);
            self.quit_sent = true;
        }

        let phase = self.shared_state.phase();
        self.handle_input(ctx, phase);

        egui::TopBottomPanel::top("hud").show(ctx, |ui| {
            self.render_hud(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let board_rect = self.shared_state.with_game(|game| render_board(ui, game));
            self.render_overlay(ui, board_rect, phase);
        });
    }
}

fn direction_for_key(key: egui::Key) -> Option<Direction> {
    match key {
        egui::Key::ArrowUp | egui::Key::W => Some(Direction::Up),
        egui::Key::ArrowDown | egui::Key::S => Some(Direction::Down),
        egui::Key::ArrowLeft | egui::Key::A => Some(Direction::Left),
        egui::Key::ArrowRight | egui::Key::D => Some(Direction::Right),
        _ => None,
    }
}

fn describe_result(result: GameResult) -> String {
    let cause = match result.reason {
        DeathReason::WallCollision => "Hit the wall",
        DeathReason::SelfCollision => "Bit itself",
    };
    format!("{} with a score of {}", cause, result.score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_and_arrows_map_to_directions() {
        assert_eq!(direction_for_key(egui::Key::W), Some(Direction::Up));
        assert_eq!(direction_for_key(egui::Key::ArrowUp), Some(Direction::Up));
        assert_eq!(direction_for_key(egui::Key::A), Some(Direction::Left));
        assert_eq!(direction_for_key(egui::Key::ArrowDown), Some(Direction::Down));
        assert_eq!(direction_for_key(egui::Key::D), Some(Direction::Right));
        assert_eq!(direction_for_key(egui::Key::Space), None);
    }

    #[test]
    fn test_describe_result() {
        let result = GameResult {
            reason: DeathReason::SelfCollision,
            score: 7,
        };
        assert_eq!(describe_result(result), "Bit itself with a score of 7");
    }
}
