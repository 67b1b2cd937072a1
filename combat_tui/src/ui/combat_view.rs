//! Combat view: both fighters and the scrolling log

use super::{health_color, progress_bar};
use crate::app::App;
use combat_core::{Actor, CombatState, Side};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Fighters
            Constraint::Length(3), // Turn / status
            Constraint::Min(0),    // Combat log
        ])
        .split(area);

    let fighters = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    draw_fighter(f, app.session.player(), fighters[0]);
    draw_fighter(f, app.session.npc(), fighters[1]);
    draw_status_bar(f, app, chunks[1]);
    draw_combat_log(f, app, chunks[2]);
}

fn draw_fighter(f: &mut Frame, actor: &Actor, area: Rect) {
    let color = health_color(actor.health_percent());
    let bar_width = area.width.saturating_sub(4);

    let mut stance = vec![Span::styled(
        format!(
            "Melee {}  Ranged {}  Armor {}  Init {}",
            actor.melee_power, actor.ranged_power, actor.armor, actor.initiative
        ),
        Style::default().fg(Color::Gray),
    )];
    if actor.is_defending() {
        stance.push(Span::styled(
            "  [GUARD]",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    }
    for effect in actor.status.active() {
        stance.push(Span::styled(
            format!("  {:?}", effect),
            Style::default().fg(Color::Magenta),
        ));
    }

    let lines = vec![
        Line::from(vec![
            Span::styled("HP: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}/{}", actor.health(), actor.max_health()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({:.0}%)", actor.health_percent()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled(
            progress_bar(actor.health() as f64, actor.max_health() as f64, bar_width),
            Style::default().fg(color),
        )),
        Line::from(stance),
    ];

    let title = match actor.side {
        Side::Player => format!(" {} (you) ", actor.name),
        Side::Npc => format!(" {} ", actor.name),
    };
    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(paragraph, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let (text, color) = match app.session.state() {
        CombatState::AwaitingAction(Side::Player) => ("Your turn".to_string(), Color::Yellow),
        CombatState::AwaitingAction(Side::Npc) => ("Enemy turn".to_string(), Color::Gray),
        CombatState::Victory => ("VICTORY - press [n] for another fight".to_string(), Color::Green),
        CombatState::Defeat => ("DEFEAT - press [n] to try again".to_string(), Color::Red),
        CombatState::Aborted => ("Fight abandoned".to_string(), Color::DarkGray),
    };

    let mut spans = vec![
        Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("   Turn {}", app.session.turns() + 1),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if let Some(message) = &app.status_message {
        spans.push(Span::styled(
            format!("   {}", message),
            Style::default().fg(Color::Magenta),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Status "));

    f.render_widget(paragraph, area);
}

fn draw_combat_log(f: &mut Frame, app: &App, area: Rect) {
    let entries = app.session.log().entries();
    let height = area.height.saturating_sub(2) as usize;
    let end = entries.len().saturating_sub(app.log_scroll);
    let start = end.saturating_sub(height);
    let player = &app.session.player().name;

    let items: Vec<ListItem> = entries[start..end]
        .iter()
        .map(|line| {
            let style = if line.contains("Victory") {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if line.contains("Defeat") || line.contains("abandoned") {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else if line.contains("recovers") {
                Style::default().fg(Color::LightGreen)
            } else if line.contains("defensive stance") {
                Style::default().fg(Color::Cyan)
            } else if line.contains(" misses ") || line.contains("hesitates") {
                Style::default().fg(Color::DarkGray)
            } else if line.starts_with(player.as_str()) {
                // Outgoing damage
                Style::default().fg(Color::White)
            } else {
                // Incoming damage
                Style::default().fg(Color::LightRed)
            };
            ListItem::new(Line::from(Span::styled(line.clone(), style)))
        })
        .collect();

    let title = if app.log_scroll > 0 {
        format!(" Combat Log (↑{} lines) ", app.log_scroll)
    } else {
        " Combat Log ".to_string()
    };
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(list, area);
}
