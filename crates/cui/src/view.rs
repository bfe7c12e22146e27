use crate::app::{App, FocusPane, Screen};
use gemwitch_core::{EnemyAction, RunOutcome, RunState, Stage};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Line, Modifier, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Title => draw_title(frame, app),
        Screen::Run => draw_run(frame, app),
    }
    if app.show_help {
        draw_help_popup(frame);
    }
}

fn draw_title(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = vec![
        Line::from("GEMWITCH".bold()),
        Line::from("Three battles a day. Five days. The witch at the end."),
        Line::from(""),
        Line::from(format!(
            "meta {}z | runs {} | wins {} | best day {}",
            app.profile.meta_zenny, app.profile.runs_played, app.profile.wins, app.profile.best_day
        )),
        Line::from(format!("status: {}", app.status_line)),
    ];
    frame.render_widget(
        Paragraph::new(header).block(Block::default().borders(Borders::ALL).title("Gemwitch")),
        root[0],
    );

    let items: Vec<ListItem> = app
        .content
        .classes
        .iter()
        .map(|class| {
            ListItem::new(vec![
                Line::from(format!(
                    "{}  hp {}  st {}  {}z  favors {:?}",
                    class.name, class.max_hp, class.stamina, class.zenny, class.favored_color
                )),
                Line::from(format!("    {}", class.blurb)).dim(),
            ])
        })
        .collect();
    let mut state = ListState::default();
    if !app.content.classes.is_empty() {
        state.select(Some(app.class_cursor));
    }
    frame.render_stateful_widget(
        List::new(items)
            .block(pane_block("Choose a class", true))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .highlight_symbol(">> "),
        root[1],
        &mut state,
    );

    frame.render_widget(
        Paragraph::new("up/down: pick  enter: ride out  ?: help  q: quit")
            .block(Block::default().borders(Borders::ALL)),
        root[2],
    );
}

fn draw_run(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(8),
            Constraint::Length(10),
        ])
        .split(frame.area());

    draw_header(frame, root[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(root[1]);
    draw_hand(frame, middle[0], app);
    draw_board(frame, middle[1], app);

    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(root[2]);
    draw_satchel(frame, lower[0], app);
    draw_events(frame, lower[1], app);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let Some(run) = app.run.as_ref() else {
        frame.render_widget(
            Paragraph::new("no run").block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    };
    let state = &run.state;
    let verdict = match state.run_outcome {
        None => "-",
        Some(RunOutcome::Victory) => "victory",
        Some(RunOutcome::Defeat) => "defeat",
    };
    let lines = vec![
        Line::from(format!(
            "day {} {:?} | {:?} | focus {} | {}",
            state.day,
            state.phase,
            state.stage,
            app.focus_label(app.focus),
            app.next_hint()
        )),
        Line::from(format!(
            "hp {}/{}  shield {}  poison {}  st {}/{}  {}z  turn {}",
            state.hp,
            state.hp_max,
            state.shield,
            state.poison,
            state.stamina,
            state.stamina_max,
            state.zenny,
            state.turn
        )),
        Line::from(format!(
            "battles won {}  gems played {}  fizzled {}  outcome {}",
            state.battles_won, state.gems_played, state.gems_fizzled, verdict
        )),
        Line::from(format!("status: {}", app.status_line)),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Gemwitch")),
        area,
    );
}

fn draw_hand(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == FocusPane::Hand;
    let Some(run) = app.run.as_ref() else {
        frame.render_widget(pane_block("Hand", focused), area);
        return;
    };
    let title = format!("Hand ({})", run.hand.len());
    let items: Vec<ListItem> = run
        .hand
        .iter()
        .enumerate()
        .map(|(idx, gem)| ListItem::new(app.gem_label(idx, gem)))
        .collect();
    if items.is_empty() {
        frame.render_widget(
            Paragraph::new("empty").block(pane_block(&title, focused)),
            area,
        );
        return;
    }
    let mut state = ListState::default();
    state.select(Some(app.hand_cursor.min(items.len() - 1)));
    frame.render_stateful_widget(
        List::new(items)
            .block(pane_block(&title, focused))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .highlight_symbol(">> "),
        area,
        &mut state,
    );
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let Some(run) = app.run.as_ref() else {
        frame.render_widget(pane_block("Road", false), area);
        return;
    };
    if run.state.run_outcome.is_some() {
        draw_verdict(frame, area, run);
        return;
    }
    match run.state.stage {
        Stage::Shop => draw_shop(frame, area, app, run),
        Stage::Camp => draw_camp(frame, area, run),
        _ => draw_foe(frame, area, run),
    }
}

fn draw_foe(frame: &mut Frame, area: Rect, run: &RunState) {
    let Some(enemy) = run.battle.as_ref() else {
        frame.render_widget(
            Paragraph::new("the road is quiet").block(pane_block("Road", false)),
            area,
        );
        return;
    };
    let name = if enemy.witch {
        format!("{}  (the witch)", enemy.name)
    } else {
        enemy.name.clone()
    };
    let mut lines = vec![
        Line::from(name.bold()),
        Line::from(format!("hp {}/{}", enemy.hp, enemy.hp_max)),
        Line::from(format!("shield {}  poison {}", enemy.shield, enemy.poison)),
    ];
    if let Some(action) = enemy.next_action() {
        lines.push(Line::from(format!("next: {}", action_label(action))));
    }
    if let Some(action) = enemy.following_action() {
        lines.push(Line::from(format!("then: {}", action_label(action))).dim());
    }
    frame.render_widget(Paragraph::new(lines).block(pane_block("Foe", false)), area);
}

fn draw_shop(frame: &mut Frame, area: Rect, app: &App, run: &RunState) {
    let focused = app.focus == FocusPane::Shop;
    let restock = run
        .shop
        .as_ref()
        .map(|shop| shop.restock_cost)
        .unwrap_or(0);
    let title = format!(
        "Shop (restock {restock}z, heal {}z)",
        run.config.shop.heal_price
    );
    let rows = app.shop_rows();
    if rows.is_empty() {
        frame.render_widget(
            Paragraph::new("sold out").block(pane_block(&title, focused)),
            area,
        );
        return;
    }
    let len = rows.len();
    let items: Vec<ListItem> = rows.into_iter().map(ListItem::new).collect();
    let mut state = ListState::default();
    state.select(Some(app.shop_cursor.min(len - 1)));
    frame.render_stateful_widget(
        List::new(items)
            .block(pane_block(&title, focused))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .highlight_symbol(">> "),
        area,
        &mut state,
    );
}

fn draw_camp(frame: &mut Frame, area: Rect, run: &RunState) {
    let camp = &run.config.camp;
    let lines = vec![
        Line::from("the fire crackles"),
        Line::from(""),
        Line::from(format!("z: rest   (+{}% of max hp)", camp.rest_heal_pct)),
        Line::from(format!(
            "t: train  (+{} proficiency to the focused satchel gem)",
            camp.train_gain
        )),
        Line::from(""),
        Line::from("either one breaks camp into the next day").dim(),
    ];
    frame.render_widget(Paragraph::new(lines).block(pane_block("Camp", false)), area);
}

fn draw_verdict(frame: &mut Frame, area: Rect, run: &RunState) {
    let state = &run.state;
    let headline = match state.run_outcome {
        Some(RunOutcome::Victory) => "THE WITCH IS SLAIN",
        Some(RunOutcome::Defeat) => "YOU FELL",
        None => return,
    };
    let lines = vec![
        Line::from(headline.bold()),
        Line::from(format!(
            "day {}, {} battles won",
            state.day, state.battles_won
        )),
        Line::from(format!("+{} meta zenny banked", state.meta_earned)),
        Line::from(""),
        Line::from("n: back to the crossroads"),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(pane_block("Run over", false)),
        area,
    );
}

fn draw_satchel(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == FocusPane::Satchel;
    let Some(run) = app.run.as_ref() else {
        frame.render_widget(pane_block("Satchel", focused), area);
        return;
    };
    let title = format!(
        "Satchel ({} ready, {} spent)",
        run.satchel.draw.len(),
        run.satchel.discard.len()
    );
    let rows = app.satchel_rows();
    if rows.is_empty() {
        frame.render_widget(
            Paragraph::new("empty").block(pane_block(&title, focused)),
            area,
        );
        return;
    }
    let len = rows.len();
    let items: Vec<ListItem> = rows.into_iter().map(ListItem::new).collect();
    let mut state = ListState::default();
    state.select(Some(app.satchel_cursor.min(len - 1)));
    frame.render_stateful_widget(
        List::new(items)
            .block(pane_block(&title, focused))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .highlight_symbol(">> "),
        area,
        &mut state,
    );
}

fn draw_events(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == FocusPane::Events;
    let capacity = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = app
        .event_log
        .iter()
        .rev()
        .take(capacity.max(1))
        .rev()
        .map(|entry| Line::from(entry.as_str()))
        .collect();
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(pane_block("Events", focused)),
        area,
    );
}

fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from("keys".bold()),
        Line::from("tab / shift-tab  move focus"),
        Line::from("up/down or k/j   move cursor"),
        Line::from("enter            act on the focused pane"),
        Line::from("p  cast the focused gem    e  end turn"),
        Line::from("n  next step (battle, shop, verdict)"),
        Line::from("b  buy   r  restock   x  toss   u  upgrade"),
        Line::from("h  buy healing   l  leave the shop"),
        Line::from("z  rest at camp  t  train the focused gem"),
        Line::from("?  toggle help   esc  dismiss   q  quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Help")),
        area,
    );
}

fn action_label(action: &EnemyAction) -> String {
    format!("{:?} {}", action.kind, action.amount)
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let mut block = Block::default().borders(Borders::ALL).title(title);
    if focused {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }
    block
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemwitch_core::EnemyActionKind;

    #[test]
    fn centered_rect_sits_inside_the_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(60, 50, area);
        assert!(rect.x >= area.x && rect.y >= area.y);
        assert!(rect.right() <= area.right() && rect.bottom() <= area.bottom());
        assert!(rect.width > 0 && rect.height > 0);
    }

    #[test]
    fn action_labels_show_kind_and_amount() {
        let label = action_label(&EnemyAction {
            kind: EnemyActionKind::Attack,
            amount: 6,
        });
        assert_eq!(label, "Attack 6");
    }
}
