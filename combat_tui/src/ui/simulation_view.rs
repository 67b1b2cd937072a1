//! Simulation view: batch results for the selected matchup

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
        .constraints([Constraint::Length(30), Constraint::Min(40)])
        .split(area);

    draw_npc_list(f, app, chunks[0]);
    draw_results(f, app, chunks[1]);
}

fn draw_npc_list(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .templates
        .npcs()
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let style = if i == app.selected_npc {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(format!(" {}  {}", i + 1, t.name), style)))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Opponents "));
    f.render_widget(list, area);
}

fn draw_results(f: &mut Frame, app: &App, area: Rect) {
    let class = app.player_template().map_or("-", |t| t.name.as_str());
    let npc = app.npc_template().map_or("-", |t| t.name.as_str());

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Matchup: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{} vs {}", class, npc),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Encounters per run: ", Style::default().fg(Color::Gray)),
            Span::styled(app.sim_encounters.to_string(), Style::default().fg(Color::White)),
        ]),
        Line::from(""),
    ];

    match &app.simulation {
        Some(sim) => {
            let rate_color = if sim.win_rate() >= 50.0 {
                Color::Green
            } else {
                Color::Red
            };
            lines.push(Line::from(Span::styled(
                format!("── {} vs {} ──", sim.player, sim.npc),
                Style::default().fg(Color::Cyan),
            )));
            lines.push(Line::from(vec![
                Span::styled("Win rate:    ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{:.1}%", sim.win_rate()),
                    Style::default().fg(rate_color).add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Record:      ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{}W / {}L / {} stalemates", sim.wins, sim.losses, sim.stalemates),
                    Style::default().fg(Color::White),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Avg turns:   ", Style::default().fg(Color::Gray)),
                Span::styled(format!("{:.1}", sim.avg_turns()), Style::default().fg(Color::White)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Avg HP left: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{:.1}", sim.avg_health_left()),
                    Style::default().fg(Color::White),
                ),
            ]));
        }
        None => lines.push(Line::from(Span::styled(
            "Press [s] to simulate this matchup",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Simulation "));
    f.render_widget(paragraph, area);
}
