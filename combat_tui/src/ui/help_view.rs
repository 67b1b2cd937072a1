//! Help tab view

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let defend = &app.constants.defend;
    let damage = &app.constants.damage;
    let ai = &app.constants.ai;

    let lines = vec![
        section("═══ Navigation ═══"),
        key_line("Tab / Shift+Tab", "Next/previous tab"),
        key_line("↑/k  ↓/j", "Scroll log / select item / change batch size"),
        key_line("q / Ctrl+C", "Quit"),
        key_line("?", "Show this help"),
        Line::from(""),
        section("═══ Combat ═══"),
        key_line("m", "Melee attack"),
        key_line("r", "Ranged attack"),
        key_line("d", "Defend until your next turn"),
        key_line("u / Enter", "Use the selected item"),
        key_line("w", "Wait"),
        key_line("n", "New encounter"),
        key_line("c", "Next character class (restarts)"),
        key_line("1-9", "Fight the numbered opponent"),
        key_line("x", "Export finished fights as JSON"),
        Line::from(""),
        section("═══ Simulation ═══"),
        key_line("s", "Simulate the current matchup"),
        Line::from(""),
        section("═══ Rules ═══"),
        Line::from(Span::styled("Damage:", Style::default().fg(Color::Yellow))),
        Line::from(format!(
            "  Power - Armor ± {} (rule: {:?}, minimum {})",
            damage.spread, damage.miss_rule, damage.min_damage
        )),
        Line::from(Span::styled("Defending:", Style::default().fg(Color::Yellow))),
        Line::from(format!(
            "  +max(Armor / {}, {}) armor until your next turn",
            defend.armor_divisor, defend.min_guard
        )),
        Line::from(Span::styled("Turn order:", Style::default().fg(Color::Yellow))),
        Line::from(format!(
            "  Higher initiative acts first, ties go to {:?}",
            app.constants.initiative.tie_break
        )),
        Line::from(Span::styled("Enemies:", Style::default().fg(Color::Yellow))),
        Line::from(format!(
            "  {}% chance to {:?}, otherwise attack with their best stat",
            ai.passive_chance, ai.passive_action
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help & Rules "));

    f.render_widget(paragraph, area);
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:20}", key),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
