use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::scene::{DrawCommand, Rgb, Scene};
use crate::metrics::GameMetrics;

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Color::Rgb(r, g, b)
    }
}

/// What ends up in one terminal cell after painting a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPaint {
    pub background: Rgb,
    /// Color of a rectangle smaller than a block painted inside this cell
    pub accent: Option<Rgb>,
}

/// Paint a scene onto a block grid, one entry per block, row-major
pub fn rasterize(scene: &Scene) -> Vec<Vec<CellPaint>> {
    let block = scene.block_size.max(1);
    let columns = (scene.width / block).max(0) as usize;
    let rows = (scene.height / block).max(0) as usize;

    let blank = CellPaint {
        background: Rgb(0, 0, 0),
        accent: None,
    };
    let mut grid = vec![vec![blank; columns]; rows];

    for command in &scene.commands {
        match command {
            DrawCommand::Fill(color) => {
                for cell in grid.iter_mut().flatten() {
                    *cell = CellPaint {
                        background: *color,
                        accent: None,
                    };
                }
            }
            DrawCommand::Rect {
                x,
                y,
                width,
                height,
                color,
            } => {
                if *width <= 0 || *height <= 0 {
                    continue;
                }
                let full_block = *width >= block && *height >= block;
                let first_col = x.div_euclid(block);
                let last_col = (x + width - 1).div_euclid(block);
                let first_row = y.div_euclid(block);
                let last_row = (y + height - 1).div_euclid(block);

                for row in first_row.max(0)..=last_row.min(rows as i32 - 1) {
                    for col in first_col.max(0)..=last_col.min(columns as i32 - 1) {
                        let cell = &mut grid[row as usize][col as usize];
                        if full_block {
                            *cell = CellPaint {
                                background: *color,
                                accent: None,
                            };
                        } else {
                            cell.accent = Some(*color);
                        }
                    }
                }
            }
            // Text goes to the header, not the grid
            DrawCommand::Text { .. } => {}
        }
    }

    grid
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, scene: &Scene, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(scene, metrics), chunks[0]);
        frame.render_widget(self.render_grid(scene), chunks[1]);
        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, scene: &Scene) -> Paragraph<'static> {
        let lines: Vec<Line> = rasterize(scene)
            .into_iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .into_iter()
                    .map(|cell| match cell.accent {
                        Some(accent) => Span::styled(
                            "▐▌",
                            Style::default().fg(accent.into()).bg(cell.background.into()),
                        ),
                        None => Span::styled("  ", Style::default().bg(cell.background.into())),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, scene: &Scene, metrics: &GameMetrics) -> Paragraph<'static> {
        let mut spans = Vec::new();
        for (text, color) in scene.texts() {
            spans.push(Span::styled(
                text.to_string(),
                Style::default()
                    .fg(color.into())
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw("    "));
        }
        if let Some(tally) = metrics.tally() {
            spans.extend([
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    tally.best_score.to_string(),
                    Style::default().fg(Color::White),
                ),
                Span::raw("    "),
                Span::styled("Episodes: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    tally.finished.to_string(),
                    Style::default().fg(Color::White),
                ),
                Span::raw("    "),
            ]);
        }
        spans.extend([
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.clock_label(), Style::default().fg(Color::White)),
        ]);

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Direction, GameState, Position, Snake};
    use crate::render::scene::{BLACK, BLUE1, BLUE2, RED};
    use ratatui::{backend::TestBackend, Terminal};

    fn scene() -> Scene {
        let snake = Snake::new(Position::new(60, 40), Direction::Right, 3, 20);
        let mut state = GameState::new(snake, Position::new(0, 0), Board::new(200, 100, 20), 10);
        state.score = 4;
        Scene::from_state(&state)
    }

    #[test]
    fn test_rasterize_cells() {
        let grid = rasterize(&scene());

        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0].len(), 10);

        assert_eq!(grid[0][0].background, RED);
        for col in 1..=3 {
            assert_eq!(grid[2][col].background, BLUE1);
            assert_eq!(grid[2][col].accent, Some(BLUE2));
        }
        assert_eq!(grid[4][9].background, BLACK);
        assert_eq!(grid[4][9].accent, None);
    }

    #[test]
    fn test_rasterize_clips_out_of_bounds() {
        let mut scene = scene();
        scene.commands.push(DrawCommand::Rect {
            x: -20,
            y: 80,
            width: 20,
            height: 20,
            color: RED,
        });
        let grid = rasterize(&scene);
        assert_eq!(grid[4][0].background, BLACK);
    }

    fn draw(metrics: &GameMetrics) -> String {
        let backend = TestBackend::new(80, 14);
        let mut terminal = Terminal::new(backend).unwrap();
        let renderer = Renderer::new();
        let scene = scene();

        terminal
            .draw(|frame| renderer.render(frame, &scene, metrics))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_shows_score() {
        let screen = draw(&GameMetrics::single_game());
        assert!(screen.contains("Score: 4"));
        assert!(screen.contains("Snake"));
        assert!(screen.contains("Time: 00:00"));
    }

    #[test]
    fn test_single_game_header_has_no_tally() {
        let screen = draw(&GameMetrics::single_game());
        assert!(!screen.contains("Best:"));
        assert!(!screen.contains("Episodes:"));
    }

    #[test]
    fn test_episode_header_shows_tally() {
        let mut metrics = GameMetrics::episodes();
        metrics.finish_episode(6);
        metrics.finish_episode(2);

        let screen = draw(&metrics);
        assert!(screen.contains("Best: 6"));
        assert!(screen.contains("Episodes: 2"));
    }
}
