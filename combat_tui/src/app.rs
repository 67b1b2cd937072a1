//! Application state

use crate::simulation::EncounterSimulation;
use combat_core::config::load_templates;
use combat_core::{
    default_templates, Action, ActorTemplate, AttackKind, CombatConstants, CombatError,
    CombatRng, CombatSession, PassiveChancePolicy, SessionOutcome, Side,
    TemplateSet, TurnReport,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Encounters played per simulation run
pub const DEFAULT_SIM_ENCOUNTERS: u32 = 200;

/// Where exported encounter history is written
pub const HISTORY_FILE: &str = "combat_history.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Combat,
    Inventory,
    Simulation,
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Combat, Tab::Inventory, Tab::Simulation, Tab::Help]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Combat => "Combat",
            Tab::Inventory => "Inventory",
            Tab::Simulation => "Simulate",
            Tab::Help => "Help",
        }
    }
}

pub struct App {
    pub current_tab: Tab,
    pub templates: TemplateSet,
    pub constants: CombatConstants,
    pub policy: PassiveChancePolicy,
    pub rng: CombatRng,
    pub session: CombatSession,
    // Selection state
    pub selected_class: usize,
    pub selected_npc: usize,
    pub selected_item: usize,
    /// Lines scrolled up from the newest log entry (0 follows the log)
    pub log_scroll: usize,
    pub status_message: Option<String>,
    // Results
    pub history: Vec<SessionOutcome>,
    pub simulation: Option<EncounterSimulation>,
    pub sim_encounters: u32,
}

impl App {
    /// Load config from disk if present and start the first encounter
    pub fn new() -> Result<Self, CombatError> {
        Self::with_config(
            Self::load_template_set(),
            Self::load_constants(),
            CombatRng::from_entropy(),
        )
    }

    pub fn with_config(
        templates: TemplateSet,
        constants: CombatConstants,
        rng: CombatRng,
    ) -> Result<Self, CombatError> {
        let session = Self::spawn_session(&templates, &constants, 0, 0)?;
        let mut app = App {
            current_tab: Tab::Combat,
            policy: PassiveChancePolicy::new(&constants.ai),
            templates,
            constants,
            rng,
            session,
            selected_class: 0,
            selected_npc: 0,
            selected_item: 0,
            log_scroll: 0,
            status_message: None,
            history: Vec::new(),
            simulation: None,
            sim_encounters: DEFAULT_SIM_ENCOUNTERS,
        };
        app.run_npc_if_due();
        Ok(app)
    }

    fn load_constants() -> CombatConstants {
        let paths = [
            "config/combat.toml",
            "combat_tui/config/combat.toml",
            "../combat_tui/config/combat.toml",
        ];

        for path in paths.iter().map(Path::new) {
            if !path.exists() {
                continue;
            }
            match CombatConstants::load(path) {
                Ok(constants) => {
                    info!(path = %path.display(), "loaded combat constants");
                    return constants;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load combat constants");
                }
            }
        }

        info!("no combat.toml found, using default constants");
        CombatConstants::default()
    }

    fn load_template_set() -> TemplateSet {
        let paths = [
            "config/templates.toml",
            "combat_core/config/templates.toml",
            "../combat_core/config/templates.toml",
        ];

        for path in paths.iter().map(Path::new) {
            if !path.exists() {
                continue;
            }
            match load_templates(path) {
                Ok(set) if !set.players().is_empty() && !set.npcs().is_empty() => {
                    info!(path = %path.display(), count = set.templates.len(), "loaded templates");
                    return set;
                }
                Ok(_) => {
                    warn!(
                        path = %path.display(),
                        "template file needs at least one player and one npc"
                    );
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load templates");
                }
            }
        }

        default_templates()
    }

    fn spawn_session(
        templates: &TemplateSet,
        constants: &CombatConstants,
        class: usize,
        npc: usize,
    ) -> Result<CombatSession, CombatError> {
        let player = templates
            .players()
            .get(class)
            .map(|t| t.spawn())
            .ok_or_else(|| CombatError::InvalidActor("no player class template".to_string()))?;
        let npc = templates
            .npcs()
            .get(npc)
            .map(|t| t.spawn())
            .ok_or_else(|| CombatError::InvalidActor("no npc template".to_string()))?;
        CombatSession::new(player, npc, constants.clone())
    }

    // === Templates ===

    pub fn player_template(&self) -> Option<&ActorTemplate> {
        self.templates.players().get(self.selected_class).copied()
    }

    pub fn npc_template(&self) -> Option<&ActorTemplate> {
        self.templates.npcs().get(self.selected_npc).copied()
    }

    // === Navigation ===

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let next_idx = (current_idx + 1) % tabs.len();
        self.current_tab = tabs[next_idx];
    }

    pub fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let prev_idx = if current_idx == 0 {
            tabs.len() - 1
        } else {
            current_idx - 1
        };
        self.current_tab = tabs[prev_idx];
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
    }

    pub fn on_up(&mut self) {
        match self.current_tab {
            Tab::Combat => {
                if self.log_scroll < self.session.log().len().saturating_sub(1) {
                    self.log_scroll += 1;
                }
            }
            Tab::Inventory => {
                if self.selected_item > 0 {
                    self.selected_item -= 1;
                }
            }
            Tab::Simulation => {
                self.sim_encounters = (self.sim_encounters * 2).min(10_000);
            }
            Tab::Help => {}
        }
    }

    pub fn on_down(&mut self) {
        match self.current_tab {
            Tab::Combat => {
                self.log_scroll = self.log_scroll.saturating_sub(1);
            }
            Tab::Inventory => {
                if self.selected_item < self.inventory_len().saturating_sub(1) {
                    self.selected_item += 1;
                }
            }
            Tab::Simulation => {
                self.sim_encounters = (self.sim_encounters / 2).max(1);
            }
            Tab::Help => {}
        }
    }

    fn inventory_len(&self) -> usize {
        self.session.player().inventory().map_or(0, |inv| inv.len())
    }

    // === Encounter control ===

    /// Start a fresh encounter with the selected class and NPC
    pub fn new_encounter(&mut self) {
        match Self::spawn_session(
            &self.templates,
            &self.constants,
            self.selected_class,
            self.selected_npc,
        ) {
            Ok(session) => {
                self.session = session;
                self.log_scroll = 0;
                self.selected_item = 0;
                self.status_message = None;
                self.run_npc_if_due();
            }
            Err(e) => {
                warn!(error = %e, "could not start encounter");
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Pick an NPC by its position in the template list and fight it
    pub fn choose_npc(&mut self, index: usize) {
        if index < self.templates.npcs().len() {
            self.selected_npc = index;
            self.new_encounter();
        }
    }

    /// Switch to the next player class and restart
    pub fn cycle_class(&mut self) {
        let classes = self.templates.players().len();
        if classes > 0 {
            self.selected_class = (self.selected_class + 1) % classes;
            self.new_encounter();
        }
    }

    pub fn melee(&mut self) {
        self.player_action(Action::Attack(AttackKind::Melee));
    }

    pub fn ranged(&mut self) {
        self.player_action(Action::Attack(AttackKind::Ranged));
    }

    pub fn defend(&mut self) {
        self.player_action(Action::Defend);
    }

    pub fn wait(&mut self) {
        self.player_action(Action::None);
    }

    pub fn use_selected_item(&mut self) {
        let name = self
            .session
            .player()
            .inventory()
            .and_then(|inv| inv.items().get(self.selected_item))
            .map(|item| item.name.clone());

        match name {
            Some(name) => self.player_action(Action::UseItem(name)),
            None => self.status_message = Some("No item selected".to_string()),
        }
    }

    /// Resolve the player's action, then let the NPC answer
    pub fn player_action(&mut self, action: Action) {
        match self.session.submit_player_action(action, &mut self.rng) {
            Ok(report) => {
                self.status_message = None;
                self.after_turn(&report);
                self.run_npc_if_due();
            }
            Err(CombatError::SessionOver) => {
                self.status_message =
                    Some("The fight is over. Press [n] for a new encounter".to_string());
            }
            Err(e) => {
                self.status_message = Some(e.to_string());
            }
        }

        let len = self.inventory_len();
        if self.selected_item >= len {
            self.selected_item = len.saturating_sub(1);
        }
    }

    fn run_npc_if_due(&mut self) {
        if self.session.whose_turn() != Some(Side::Npc) {
            return;
        }
        match self.session.run_npc_turn(&self.policy, &mut self.rng) {
            Ok(report) => self.after_turn(&report),
            Err(e) => {
                warn!(error = %e, "npc turn failed");
                self.status_message = Some(e.to_string());
            }
        }
    }

    fn after_turn(&mut self, report: &TurnReport) {
        self.log_scroll = 0;
        if report.state.is_terminal() {
            if let Some(outcome) = self.session.outcome() {
                info!(winner = %outcome.winner, turns = outcome.turns, "encounter finished");
                self.history.push(outcome);
            }
        }
    }

    // === Simulation ===

    /// Simulate the selected class against the selected NPC
    pub fn run_simulation(&mut self) {
        let (player, npc) = match (self.player_template(), self.npc_template()) {
            (Some(p), Some(n)) => (p.clone(), n.clone()),
            _ => return,
        };

        match EncounterSimulation::run(
            &player,
            &npc,
            self.sim_encounters,
            &self.policy,
            &self.constants,
            &mut self.rng,
        ) {
            Ok(result) => {
                self.status_message = Some(format!(
                    "Simulated {} encounters: {:.1}% wins",
                    result.encounters,
                    result.win_rate()
                ));
                self.simulation = Some(result);
            }
            Err(e) => {
                warn!(error = %e, "simulation failed");
                self.status_message = Some(e.to_string());
            }
        }
    }

    // === History ===

    /// Serialize finished encounters as JSON
    pub fn history_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.history)
    }

    /// Write finished encounters to [`HISTORY_FILE`]
    pub fn export_history(&mut self) -> io::Result<PathBuf> {
        let json = self
            .history_json()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let path = PathBuf::from(HISTORY_FILE);
        fs::write(&path, json)?;
        info!(path = %path.display(), encounters = self.history.len(), "exported history");
        self.status_message = Some(format!(
            "Exported {} encounters to {}",
            self.history.len(),
            path.display()
        ));
        Ok(path)
    }
}
