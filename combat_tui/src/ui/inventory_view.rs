//! Inventory view: healing items and the player's class stats

use super::stat_line;
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(36)])
        .split(area);

    draw_items(f, app, chunks[0]);
    draw_character(f, app, chunks[1]);
}

fn draw_items(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = match app.session.player().inventory() {
        Some(inventory) if !inventory.is_empty() => inventory
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let selected = i == app.selected_item;
                let style = if selected {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(if selected { "▶ " } else { "  " }, style),
                    Span::styled(format!("{:20}", item.name), style),
                    Span::styled(
                        format!("x{:<3}", item.quantity),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(
                        format!("  heals {}", item.heal_amount),
                        Style::default().fg(Color::LightGreen),
                    ),
                ]))
            })
            .collect(),
        _ => vec![ListItem::new(Span::styled(
            "  (no items left)",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Items "));
    f.render_widget(list, area);
}

fn draw_character(f: &mut Frame, app: &App, area: Rect) {
    let player = app.session.player();
    let wins = app
        .history
        .iter()
        .filter(|o| o.winner == combat_core::Side::Player)
        .count();

    let lines = vec![
        Line::from(Span::styled(
            player.name.clone(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        stat_line("Health", player.health()),
        stat_line("Max health", player.max_health()),
        stat_line("Melee power", player.melee_power),
        stat_line("Ranged power", player.ranged_power),
        stat_line("Armor", player.armor),
        stat_line("Initiative", player.initiative),
        Line::from(""),
        Line::from(Span::styled(
            "── Record ──",
            Style::default().fg(Color::Cyan),
        )),
        stat_line("Fights", app.history.len() as i32),
        stat_line("Wins", wins as i32),
    ];

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Character "));
    f.render_widget(paragraph, area);
}
