//! Scene rendering for the play session.
//!
//! The 400x600 pixel field is scaled down to whatever terminal area is
//! available; simulation coordinates stay in field pixels.

use crate::constants::{
    BIRD_HEIGHT, BIRD_LEFT, BIRD_WIDTH, OBJ_GAP, OBJ_WIDTH, WALL_HEIGHT, WALL_WIDTH,
};
use crate::game::types::{GameSession, Phase};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the whole scene: score header, play field, status bar, and the
/// game-over overlay when the session has ended.
pub fn render(frame: &mut Frame, session: &GameSession) {
    let area = frame.size();

    let block = Block::default()
        .title(" Flappy Rewards ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(2),
        ])
        .split(inner);

    render_header(frame, chunks[0], session);
    render_play_field(frame, chunks[1], session);
    render_status_bar(frame, chunks[2], session);

    if session.state.game_over {
        render_game_over_overlay(frame, area, session);
    }
}

fn render_header(frame: &mut Frame, area: Rect, session: &GameSession) {
    let claim_text = match &session.claim {
        Some(claim) if claim.has_claimed => " (reward claimed)".to_string(),
        Some(claim) if claim.tokens_earned > 0 => {
            format!(" | Tokens: {}", claim.tokens_earned)
        }
        _ => String::new(),
    };

    let header = Line::from(vec![
        Span::styled(
            format!(" Score: {}", session.state.score),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(claim_text, Style::default().fg(Color::Yellow)),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Draw the field cell by cell, mapping each terminal cell back to a field
/// pixel and testing it against the bird and the obstacle pair.
fn render_play_field(frame: &mut Frame, area: Rect, session: &GameSession) {
    let width = area.width as usize;
    let height = area.height as usize;
    if width == 0 || height == 0 {
        return;
    }

    let bird_y = session.bird.y;
    let obj_x = session.obstacle.x;
    let gap_top = session.obstacle.gap_top;
    let gap_bottom = gap_top + OBJ_GAP;

    let mut lines = Vec::with_capacity(height);
    for row in 0..height {
        let row_px = (row as i32 * WALL_HEIGHT) / height as i32;
        let mut spans = Vec::with_capacity(width);

        for col in 0..width {
            let col_px = (col as i32 * WALL_WIDTH) / width as i32;

            let in_bird = col_px >= BIRD_LEFT
                && col_px < BIRD_LEFT + BIRD_WIDTH
                && row_px >= bird_y
                && row_px < bird_y + BIRD_HEIGHT;
            if in_bird {
                spans.push(Span::styled(
                    "█",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ));
                continue;
            }

            let in_obstacle_col = col_px >= obj_x && col_px < obj_x + OBJ_WIDTH;
            let in_obstacle = in_obstacle_col && (row_px < gap_top || row_px >= gap_bottom);
            if in_obstacle {
                spans.push(Span::styled("█", Style::default().fg(Color::Green)));
            } else if row == height - 1 {
                spans.push(Span::styled("▁", Style::default().fg(Color::DarkGray)));
            } else {
                spans.push(Span::raw(" "));
            }
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);

    if session.state.phase() == Phase::Idle {
        render_start_banner(frame, area);
    }
}

fn render_start_banner(frame: &mut Frame, area: Rect) {
    let banner = centered_rect(area, 26, 3);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(banner);
    frame.render_widget(Clear, banner);
    frame.render_widget(block, banner);
    frame.render_widget(
        Paragraph::new("Press Space to start").alignment(Alignment::Center),
        inner,
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, session: &GameSession) {
    let hints = Line::from(vec![
        Span::styled(" [Space/Click]", Style::default().fg(Color::Cyan)),
        Span::raw(" Flap  "),
        Span::styled("[Q/Esc]", Style::default().fg(Color::Cyan)),
        Span::raw(" Back"),
    ]);

    let log_line = Line::from(Span::styled(
        format!(" {}", session.log.latest().unwrap_or("")),
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(vec![log_line, hints]), area);
}

fn render_game_over_overlay(frame: &mut Frame, area: Rect, session: &GameSession) {
    let overlay = centered_rect(area, 40, 8);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .title(" Game Over ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let token_line = match &session.claim {
        Some(claim) if claim.tokens_earned > 0 => {
            format!("Earned {} tokens!", claim.tokens_earned)
        }
        Some(claim) if claim.has_claimed => "Reward already claimed.".to_string(),
        _ => "Thanks for playing!".to_string(),
    };

    let exit_line = if session.state.exit_allowed {
        Line::from(vec![
            Span::styled("[E]", Style::default().fg(Color::Cyan)),
            Span::raw(" Exit  "),
            Span::styled("[R]", Style::default().fg(Color::Cyan)),
            Span::raw(" Play Again"),
        ])
    } else {
        Line::from(vec![
            Span::styled(
                format!("Exit ({})", session.state.countdown),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw("  "),
            Span::styled("[R]", Style::default().fg(Color::Cyan)),
            Span::raw(" Play Again"),
        ])
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Game Over! Your Score: {}", session.state.score),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(token_line, Style::default().fg(Color::Yellow))),
        Line::from(""),
        exit_line,
    ];

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
