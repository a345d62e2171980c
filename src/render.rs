//! Terminal presentation for the interactive session.
//!
//! Keeps a local mirror of the form, prints engine updates as they arrive
//! and parses typed commands into input events.

use async_trait::async_trait;
use grade_calc::engine::types::Breakdown;
use grade_calc::events::{ComponentField, InputEvent};
use grade_calc::output;
use grade_calc::sink::{EngineUpdate, UpdateSink};
use std::sync::Arc;
use tokio::sync::Mutex;

/// One component row as the user last typed it.
#[derive(Debug, Default)]
pub struct RowView {
    pub id: u64,
    pub name: String,
    pub weight: String,
    pub score: String,
}

/// Local mirror of the form. Typed values land here immediately; rows,
/// the scenario value and results come back as engine updates. The session
/// holds the authoritative state.
#[derive(Debug, Default)]
pub struct FormView {
    pub rows: Vec<RowView>,
    pub final_weight: String,
    pub target: String,
    pub scenario_value: u8,
    pub total_weight: f64,
    pub last_result: Option<Breakdown>,
}

/// Prints engine updates to the terminal and records them in the shared
/// form view.
pub struct TerminalSink {
    view: Arc<Mutex<FormView>>,
}

impl TerminalSink {
    pub fn new(view: Arc<Mutex<FormView>>) -> Self {
        Self { view }
    }
}

#[async_trait]
impl UpdateSink for TerminalSink {
    async fn publish(&self, update: EngineUpdate) {
        let mut view = self.view.lock().await;
        match update {
            EngineUpdate::ComponentAdded { id } => {
                view.rows.push(RowView {
                    id,
                    ..RowView::default()
                });
                println!("component #{} added", id);
            }
            EngineUpdate::TotalWeight { total } => {
                view.total_weight = total;
                println!("{}", output::render_total_weight(total));
            }
            EngineUpdate::ScenarioValue { value } => {
                view.scenario_value = value;
                println!("assuming {}% on unscored components", value);
            }
            EngineUpdate::Result(result) => {
                // A failed calculation replaces the card with its message.
                view.last_result = result.breakdown().copied();
                println!();
                println!("{}", output::render_result(&result));
                println!();
            }
        }
    }
}

/// Mirrors a typed command into the local view before the engine sees it,
/// so `show` reflects what was typed even mid-debounce.
pub async fn apply_local(view: &Mutex<FormView>, event: &InputEvent) {
    let mut view = view.lock().await;
    match event {
        InputEvent::EditComponent { id, field, raw } => {
            if let Some(row) = view.rows.iter_mut().find(|r| r.id == *id) {
                match field {
                    ComponentField::Name => row.name = raw.clone(),
                    ComponentField::Weight => row.weight = raw.clone(),
                    ComponentField::Score => row.score = raw.clone(),
                }
            }
        }
        InputEvent::SetFinalWeight { raw } => view.final_weight = raw.clone(),
        InputEvent::SelectPresetTarget { grade } => view.target = format!("{}", grade),
        InputEvent::SetCustomTarget { raw } => view.target = raw.clone(),
        InputEvent::RemoveComponent { id } => view.rows.retain(|r| r.id != *id),
        InputEvent::Reset => {
            view.rows.clear();
            view.final_weight.clear();
            view.target.clear();
            view.last_result = None;
        }
        InputEvent::AddComponent
        | InputEvent::ScenarioSlider { .. }
        | InputEvent::ScenarioPreset { .. }
        | InputEvent::CalculateNow => {}
    }
}

/// Prints the current form mirror.
pub async fn render_form(view: &Mutex<FormView>) {
    let view = view.lock().await;
    println!("components:");
    for row in &view.rows {
        println!(
            "  #{} {} weight={} score={}",
            row.id,
            or_dash(&row.name),
            or_dash(&row.weight),
            or_dash(&row.score),
        );
    }
    println!("final exam weight: {}", or_dash(&view.final_weight));
    println!("target grade: {}", or_dash(&view.target));
    println!("assumed score for unscored components: {}%", view.scenario_value);
    println!("{}", output::render_total_weight(view.total_weight));
    if let Some(breakdown) = &view.last_result {
        println!("{}", output::render_breakdown(breakdown));
    }
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() { "-" } else { text }
}

/// Prints the command reference.
pub fn print_help() {
    println!("commands:");
    println!("  add                      add a component row");
    println!("  remove <id>              remove a component row");
    println!("  name <id> <text>         set a component name");
    println!("  weight <id> <percent>    set a component weight");
    println!("  score <id> [percent]     set or clear a component score");
    println!("  final <percent>          set the final exam weight");
    println!("  target <percent>         type a custom target grade");
    println!("  preset <percent>         pick a preset target grade");
    println!("  scenario <percent>       set the what-if score for unscored components");
    println!("  assume <percent>         jump the what-if score to a preset");
    println!("  calc                     calculate right now");
    println!("  reset                    start over");
    println!("  show                     print the current form");
    println!("  quit                     leave");
}

/// What one typed line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplAction {
    /// Forward an event to the session.
    Engine(InputEvent),
    Show,
    Help,
    Quit,
    Empty,
    /// Line could not be understood; kept for the error message.
    Unknown(String),
}

/// Parses one typed line into an action.
pub fn parse_line(line: &str) -> ReplAction {
    let line = line.trim();
    if line.is_empty() {
        return ReplAction::Empty;
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "add" => ReplAction::Engine(InputEvent::AddComponent),
        "remove" | "rm" => match rest.parse::<u64>() {
            Ok(id) => ReplAction::Engine(InputEvent::RemoveComponent { id }),
            Err(_) => ReplAction::Unknown(line.to_string()),
        },
        "name" => parse_field_edit(ComponentField::Name, line, rest),
        "weight" => parse_field_edit(ComponentField::Weight, line, rest),
        "score" => parse_field_edit(ComponentField::Score, line, rest),
        "final" => ReplAction::Engine(InputEvent::SetFinalWeight {
            raw: rest.to_string(),
        }),
        "target" => ReplAction::Engine(InputEvent::SetCustomTarget {
            raw: rest.to_string(),
        }),
        "preset" => match rest.parse::<f64>() {
            Ok(grade) => ReplAction::Engine(InputEvent::SelectPresetTarget { grade }),
            Err(_) => ReplAction::Unknown(line.to_string()),
        },
        "scenario" => match rest.parse::<i64>() {
            Ok(value) => ReplAction::Engine(InputEvent::ScenarioSlider { value }),
            Err(_) => ReplAction::Unknown(line.to_string()),
        },
        "assume" => match rest.parse::<i64>() {
            Ok(value) => ReplAction::Engine(InputEvent::ScenarioPreset { value }),
            Err(_) => ReplAction::Unknown(line.to_string()),
        },
        "calc" | "calculate" => ReplAction::Engine(InputEvent::CalculateNow),
        "reset" => ReplAction::Engine(InputEvent::Reset),
        "show" => ReplAction::Show,
        "help" | "?" => ReplAction::Help,
        "quit" | "exit" | "q" => ReplAction::Quit,
        _ => ReplAction::Unknown(line.to_string()),
    }
}

/// Splits "<id> [value]" after a field command; a missing value clears the
/// field.
fn parse_field_edit(field: ComponentField, line: &str, rest: &str) -> ReplAction {
    let (id_text, raw) = match rest.split_once(char::is_whitespace) {
        Some((id_text, raw)) => (id_text, raw.trim()),
        None => (rest, ""),
    };
    match id_text.parse::<u64>() {
        Ok(id) => ReplAction::Engine(InputEvent::EditComponent {
            id,
            field,
            raw: raw.to_string(),
        }),
        Err(_) => ReplAction::Unknown(line.to_string()),
    }
}
