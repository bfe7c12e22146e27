use crate::persistence::{default_profile_path, load_profile, save_profile, Profile};
use crate::LaunchOptions;
use anyhow::{Context, Result};
use gemwitch_core::{
    Content, Event, EventBus, GameConfig, GemInstance, RunError, RunOutcome, RunState, Stage,
    StatusTarget,
};
use gemwitch_data::load_assets;
use std::collections::VecDeque;
use std::path::PathBuf;

pub const DEFAULT_RUN_SEED: u64 = 0x5EED;
const MAX_EVENT_LOG: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Title,
    Run,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Hand,
    Shop,
    Satchel,
    Events,
}

pub struct App {
    pub config: GameConfig,
    pub content: Content,
    pub profile: Profile,
    pub profile_path: Option<PathBuf>,
    pub seed_base: u64,
    pub runs_started: u64,
    pub screen: Screen,
    pub run: Option<RunState>,
    pub events: EventBus,
    pub run_settled: bool,
    pub focus: FocusPane,
    pub class_cursor: usize,
    pub hand_cursor: usize,
    pub shop_cursor: usize,
    pub satchel_cursor: usize,
    pub event_log: VecDeque<String>,
    pub status_line: String,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn bootstrap(options: &LaunchOptions) -> Result<Self> {
        let data_dir = options
            .data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("assets"));
        let (config, content) = load_assets(&data_dir)
            .with_context(|| format!("load game data from {}", data_dir.display()))?;
        let profile_path = options.profile_path.clone().or_else(default_profile_path);
        let profile = match profile_path.as_deref() {
            Some(path) if path.exists() => load_profile(path)
                .map_err(|err| anyhow::anyhow!(err))
                .with_context(|| format!("load profile {}", path.display()))?,
            _ => Profile::default(),
        };

        let mut app = Self {
            config,
            content,
            profile,
            profile_path,
            seed_base: options.seed.unwrap_or(DEFAULT_RUN_SEED),
            runs_started: 0,
            screen: Screen::Title,
            run: None,
            events: EventBus::default(),
            run_settled: false,
            focus: FocusPane::Hand,
            class_cursor: 0,
            hand_cursor: 0,
            shop_cursor: 0,
            satchel_cursor: 0,
            event_log: VecDeque::new(),
            status_line: "ready".to_string(),
            show_help: false,
            should_quit: false,
        };

        if let Some(class_id) = options.class.as_deref() {
            let index = app
                .content
                .classes
                .iter()
                .position(|class| class.id == class_id)
                .ok_or_else(|| anyhow::anyhow!("unknown class '{class_id}'"))?;
            app.start_class(index);
        }
        Ok(app)
    }

    pub fn on_tick(&mut self) {}

    pub fn focus_label(&self, pane: FocusPane) -> &'static str {
        match pane {
            FocusPane::Hand => "Hand",
            FocusPane::Shop => "Shop",
            FocusPane::Satchel => "Satchel",
            FocusPane::Events => "Events",
        }
    }

    pub fn cycle_focus(&mut self, forward: bool) {
        self.focus = match (self.focus, forward) {
            (FocusPane::Hand, true) => FocusPane::Shop,
            (FocusPane::Shop, true) => FocusPane::Satchel,
            (FocusPane::Satchel, true) => FocusPane::Events,
            (FocusPane::Events, true) => FocusPane::Hand,
            (FocusPane::Hand, false) => FocusPane::Events,
            (FocusPane::Shop, false) => FocusPane::Hand,
            (FocusPane::Satchel, false) => FocusPane::Shop,
            (FocusPane::Events, false) => FocusPane::Satchel,
        };
    }

    pub fn move_cursor(&mut self, down: bool) {
        if self.screen == Screen::Title {
            move_index(&mut self.class_cursor, self.content.classes.len(), down);
            return;
        }
        match self.focus {
            FocusPane::Hand => {
                let len = self.hand_len();
                move_index(&mut self.hand_cursor, len, down);
            }
            FocusPane::Shop => {
                let len = self.shop_len();
                move_index(&mut self.shop_cursor, len, down);
            }
            FocusPane::Satchel => {
                let len = self.satchel_len();
                move_index(&mut self.satchel_cursor, len, down);
            }
            FocusPane::Events => {}
        }
    }

    pub fn next_hint(&self) -> String {
        if self.screen == Screen::Title {
            return "enter: ride out".to_string();
        }
        let Some(run) = self.run.as_ref() else {
            return "enter: choose a class".to_string();
        };
        if run.state.run_outcome.is_some() {
            return "n: back to the crossroads".to_string();
        }
        match run.state.stage {
            Stage::Setup => "n: seek the next battle".to_string(),
            Stage::Battle => "p: cast gem  e: end turn".to_string(),
            Stage::Cleanup => "n: visit the shop".to_string(),
            Stage::Shop => "b buy  r restock  x toss  u upgrade  h heal  l leave".to_string(),
            Stage::Camp => "z: rest  t: train the focused gem".to_string(),
        }
    }

    pub fn hand_len(&self) -> usize {
        self.run.as_ref().map(|run| run.hand.len()).unwrap_or(0)
    }

    pub fn shop_len(&self) -> usize {
        self.run
            .as_ref()
            .and_then(|run| run.shop.as_ref())
            .map(|shop| shop.offers.len())
            .unwrap_or(0)
    }

    pub fn satchel_len(&self) -> usize {
        self.run
            .as_ref()
            .map(|run| run.satchel.draw.len())
            .unwrap_or(0)
    }

    pub fn gem_label(&self, index: usize, gem: &GemInstance) -> String {
        let Some(run) = self.run.as_ref() else {
            return format!("{index:>2}: {}", gem.def_id);
        };
        match run.gem_def(gem) {
            Ok(def) => format!(
                "{index:>2}: {} L{} {:?} {} (st {}, {}%)",
                def.name,
                gem.level,
                def.effect,
                def.amount_at(gem.level),
                def.cost,
                gem.proficiency
            ),
            Err(_) => format!("{index:>2}: {}", gem.def_id),
        }
    }

    pub fn shop_rows(&self) -> Vec<String> {
        let Some(shop) = self.run.as_ref().and_then(|run| run.shop.as_ref()) else {
            return Vec::new();
        };
        shop.offers
            .iter()
            .enumerate()
            .map(|(idx, offer)| format!("{idx:>2}: {} {}z", offer.name, offer.price))
            .collect()
    }

    pub fn satchel_rows(&self) -> Vec<String> {
        let Some(run) = self.run.as_ref() else {
            return Vec::new();
        };
        run.satchel
            .draw
            .iter()
            .enumerate()
            .map(|(idx, gem)| self.gem_label(idx, gem))
            .collect()
    }

    pub fn activate_primary(&mut self) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        if self.screen == Screen::Title {
            self.start_class(self.class_cursor);
            return;
        }
        let Some(run) = self.run.as_ref() else {
            return;
        };
        if run.state.run_outcome.is_some() {
            self.return_to_title();
            return;
        }
        let stage = run.state.stage;
        match self.focus {
            FocusPane::Hand => match stage {
                Stage::Battle => self.play_at_cursor(),
                Stage::Setup | Stage::Cleanup => self.next_step(),
                _ => {}
            },
            FocusPane::Shop => match stage {
                Stage::Shop => self.buy_at_cursor(),
                Stage::Cleanup => self.enter_shop(),
                _ => {}
            },
            FocusPane::Satchel => match stage {
                Stage::Shop => self.upgrade_at_cursor(),
                Stage::Camp => self.train_at_cursor(),
                _ => {}
            },
            FocusPane::Events => {}
        }
    }

    pub fn start_class(&mut self, index: usize) {
        let Some(class) = self.content.classes.get(index) else {
            self.push_status("no class selected");
            return;
        };
        let class_id = class.id.clone();
        let class_name = class.name.clone();
        let seed = self.seed_base.wrapping_add(self.runs_started);
        match RunState::new(self.config.clone(), self.content.clone(), &class_id, seed) {
            Ok(mut run) => match run.start_battle(&mut self.events) {
                Ok(()) => {
                    self.runs_started += 1;
                    self.run = Some(run);
                    self.run_settled = false;
                    self.screen = Screen::Run;
                    self.focus = FocusPane::Hand;
                    self.event_log.clear();
                    self.push_status(format!("riding out as the {class_name}"));
                }
                Err(err) => self.push_error(err),
            },
            Err(err) => self.push_error(err),
        }
        self.after_action();
    }

    pub fn return_to_title(&mut self) {
        self.run = None;
        self.events = EventBus::default();
        self.screen = Screen::Title;
        self.focus = FocusPane::Hand;
        self.push_status("back at the crossroads");
        self.normalize_cursors();
    }

    pub fn next_step(&mut self) {
        let Some(run) = self.run.as_ref() else {
            self.push_status("no run in progress");
            return;
        };
        let over = run.state.run_outcome.is_some();
        let stage = run.state.stage;
        if over {
            self.return_to_title();
            return;
        }
        match stage {
            Stage::Setup => self.ride_out(),
            Stage::Cleanup => self.enter_shop(),
            _ => self.push_status("nothing to advance"),
        }
    }

    pub fn ride_out(&mut self) {
        let result = {
            let Some(run) = self.run.as_mut() else {
                self.push_status("no run in progress");
                return;
            };
            run.start_battle(&mut self.events)
        };
        match result {
            Ok(()) => {
                self.focus = FocusPane::Hand;
                self.push_status("battle joined");
            }
            Err(err) => self.push_error(err),
        }
        self.after_action();
    }

    pub fn play_at_cursor(&mut self) {
        let cursor = self.hand_cursor;
        let result = {
            let Some(run) = self.run.as_mut() else {
                self.push_status("no run in progress");
                return;
            };
            run.play_gem(cursor, &mut self.events)
        };
        match result {
            Ok(play) => {
                if play.success {
                    self.push_status(format!("cast {} for {}", play.gem, play.amount));
                } else {
                    self.push_status(format!("{} fizzled", play.gem));
                }
            }
            Err(err) => self.push_error(err),
        }
        self.after_action();
    }

    pub fn end_turn(&mut self) {
        let result = {
            let Some(run) = self.run.as_mut() else {
                self.push_status("no run in progress");
                return;
            };
            run.end_turn(&mut self.events)
        };
        match result {
            Ok(()) => self.push_status("turn ended"),
            Err(err) => self.push_error(err),
        }
        self.after_action();
    }

    pub fn enter_shop(&mut self) {
        let result = {
            let Some(run) = self.run.as_mut() else {
                self.push_status("no run in progress");
                return;
            };
            run.enter_shop(&mut self.events)
        };
        match result {
            Ok(()) => {
                self.focus = FocusPane::Shop;
                self.push_status("browsing the wares");
            }
            Err(err) => self.push_error(err),
        }
        self.after_action();
    }

    pub fn buy_at_cursor(&mut self) {
        let cursor = self.shop_cursor;
        let result = {
            let Some(run) = self.run.as_mut() else {
                self.push_status("no run in progress");
                return;
            };
            run.buy_gem(cursor, &mut self.events)
        };
        match result {
            Ok(()) => self.push_status("bought"),
            Err(err) => self.push_error(err),
        }
        self.after_action();
    }

    pub fn restock_shop(&mut self) {
        let result = {
            let Some(run) = self.run.as_mut() else {
                self.push_status("no run in progress");
                return;
            };
            run.restock_shop(&mut self.events)
        };
        match result {
            Ok(()) => self.push_status("fresh wares"),
            Err(err) => self.push_error(err),
        }
        self.after_action();
    }

    pub fn toss_at_cursor(&mut self) {
        let cursor = self.satchel_cursor;
        let result = {
            let Some(run) = self.run.as_mut() else {
                self.push_status("no run in progress");
                return;
            };
            run.discard_gem(cursor, &mut self.events)
        };
        match result {
            Ok(()) => self.push_status("tossed"),
            Err(err) => self.push_error(err),
        }
        self.after_action();
    }

    pub fn upgrade_at_cursor(&mut self) {
        let cursor = self.satchel_cursor;
        let result = {
            let Some(run) = self.run.as_mut() else {
                self.push_status("no run in progress");
                return;
            };
            run.upgrade_gem(cursor, &mut self.events)
        };
        match result {
            Ok(()) => self.push_status("gem cut finer"),
            Err(err) => self.push_error(err),
        }
        self.after_action();
    }

    pub fn buy_heal(&mut self) {
        let result = {
            let Some(run) = self.run.as_mut() else {
                self.push_status("no run in progress");
                return;
            };
            run.buy_heal(&mut self.events)
        };
        match result {
            Ok(()) => self.push_status("wounds dressed"),
            Err(err) => self.push_error(err),
        }
        self.after_action();
    }

    pub fn leave_shop(&mut self) {
        let result = {
            let Some(run) = self.run.as_mut() else {
                self.push_status("no run in progress");
                return;
            };
            run.leave_shop(&mut self.events)
        };
        match result {
            Ok(()) => {
                self.focus = FocusPane::Hand;
                self.push_status("back on the road");
            }
            Err(err) => self.push_error(err),
        }
        self.after_action();
    }

    pub fn camp_rest(&mut self) {
        let result = {
            let Some(run) = self.run.as_mut() else {
                self.push_status("no run in progress");
                return;
            };
            run.camp_rest(&mut self.events)
        };
        match result {
            Ok(()) => self.push_status("slept by the fire"),
            Err(err) => self.push_error(err),
        }
        self.after_action();
    }

    pub fn train_at_cursor(&mut self) {
        let cursor = self.satchel_cursor;
        let result = {
            let Some(run) = self.run.as_mut() else {
                self.push_status("no run in progress");
                return;
            };
            run.camp_train(cursor, &mut self.events)
        };
        match result {
            Ok(()) => self.push_status("drilled until dawn"),
            Err(err) => self.push_error(err),
        }
        self.after_action();
    }

    pub fn normalize_cursors(&mut self) {
        clamp_index(&mut self.class_cursor, self.content.classes.len());
        let hand_len = self.hand_len();
        let shop_len = self.shop_len();
        let satchel_len = self.satchel_len();
        clamp_index(&mut self.hand_cursor, hand_len);
        clamp_index(&mut self.shop_cursor, shop_len);
        clamp_index(&mut self.satchel_cursor, satchel_len);
    }

    pub fn push_status(&mut self, value: impl Into<String>) {
        self.status_line = value.into();
    }

    pub fn push_error(&mut self, err: RunError) {
        self.status_line = format!("error: {err}");
    }

    fn after_action(&mut self) {
        self.flush_events();
        self.settle_run_if_over();
        self.normalize_cursors();
    }

    fn flush_events(&mut self) {
        let drained: Vec<_> = self.events.drain().collect();
        for event in drained {
            self.push_event_line(format_event(&event));
        }
    }

    fn push_event_line(&mut self, line: String) {
        if self.event_log.len() >= MAX_EVENT_LOG {
            let _ = self.event_log.pop_front();
        }
        self.event_log.push_back(line);
    }

    /// Fold a finished run into the profile exactly once.
    fn settle_run_if_over(&mut self) {
        if self.run_settled {
            return;
        }
        let Some(run) = self.run.as_ref() else {
            return;
        };
        let Some(outcome) = run.state.run_outcome else {
            return;
        };
        self.run_settled = true;
        self.profile.meta_zenny += run.state.meta_earned;
        self.profile.runs_played += 1;
        if outcome == RunOutcome::Victory {
            self.profile.wins += 1;
        }
        self.profile.best_day = self.profile.best_day.max(run.state.day);
        if let Some(path) = self.profile_path.clone() {
            if let Err(err) = save_profile(&self.profile, &path) {
                self.push_event_line(format!("profile save failed: {err}"));
            }
        }
    }
}

fn move_index(value: &mut usize, len: usize, down: bool) {
    if len == 0 {
        *value = 0;
        return;
    }
    if down {
        *value = (*value + 1) % len;
    } else if *value == 0 {
        *value = len - 1;
    } else {
        *value -= 1;
    }
}

fn clamp_index(value: &mut usize, len: usize) {
    if len == 0 {
        *value = 0;
    } else if *value >= len {
        *value = len - 1;
    }
}

fn format_event(event: &Event) -> String {
    match event {
        Event::BattleStarted {
            day,
            phase,
            enemy,
            hp,
        } => format!("day {day} {phase:?}: {enemy} bars the road ({hp} hp)"),
        Event::HandDrawn { count } => format!("drew {count}"),
        Event::GemPlayed {
            gem,
            effect,
            amount,
            success,
            stamina_left,
        } => {
            if *success {
                format!("cast {gem} {effect:?} {amount} (st {stamina_left})")
            } else {
                format!("{gem} fizzled (st {stamina_left})")
            }
        }
        Event::TurnEnded { turn } => format!("turn {turn} over"),
        Event::EnemyActed {
            enemy,
            kind,
            amount,
        } => format!("{enemy}: {kind:?} {amount}"),
        Event::PoisonTick { target, amount, hp } => {
            format!("poison gnaws {} for {amount} ({hp} hp)", side(target))
        }
        Event::BattleWon {
            enemy,
            reward,
            zenny,
        } => format!("{enemy} slain, +{reward}z ({zenny})"),
        Event::ShopEntered {
            offers,
            restock_cost,
        } => format!("shop open, {offers} offers, restock {restock_cost}z"),
        Event::ShopRestocked {
            offers,
            cost,
            zenny,
        } => format!("restocked {offers} offers, -{cost}z ({zenny})"),
        Event::GemBought { gem, cost, zenny } => format!("bought {gem}, -{cost}z ({zenny})"),
        Event::GemDiscarded { gem, cost, zenny } => format!("tossed {gem}, -{cost}z ({zenny})"),
        Event::GemUpgraded {
            gem,
            level,
            cost,
            zenny,
        } => format!("{gem} now L{level}, -{cost}z ({zenny})"),
        Event::Healed { amount, cost, hp } => format!("healed {amount}, -{cost}z ({hp} hp)"),
        Event::CampEntered { interest, zenny } => {
            format!("made camp, +{interest}z interest ({zenny})")
        }
        Event::CampRested { healed, hp } => format!("rested, +{healed} hp ({hp})"),
        Event::CampTrained { gem, proficiency } => format!("trained {gem} to {proficiency}%"),
        Event::DayStarted { day } => format!("day {day} breaks"),
        Event::RunEnded { victory, day, meta } => {
            if *victory {
                format!("the witch is slain, +{meta} meta zenny")
            } else {
                format!("fell on day {day}, +{meta} meta zenny")
            }
        }
    }
}

fn side(target: &StatusTarget) -> &'static str {
    match target {
        StatusTarget::Player => "you",
        StatusTarget::Enemy => "the foe",
    }
}
