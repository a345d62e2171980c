//! Session state: the component registry, final-exam weight, target grade
//! and scenario value, plus the rules for applying input events to them.

use tracing::debug;

use crate::engine::registry::Registry;
use crate::engine::scenario::Scenario;
use crate::engine::types::{CalculationInput, CalculationResult};
use crate::events::{ComponentField, InputEvent, parse_score, parse_target, parse_weight};
use crate::sink::EngineUpdate;

/// Number of blank components a fresh (or freshly reset) session starts
/// with.
const SEEDED_COMPONENTS: usize = 2;

/// Everything the calculator knows between events. Owned exclusively by the
/// controller task; never shared and never persisted.
#[derive(Debug, Default)]
pub struct Session {
    registry: Registry,
    final_weight: f64,
    target_grade: Option<f64>,
    scenario: Scenario,
}

/// What applying one event did: updates to publish right away, whether the
/// debounced recalculation should be re-armed, and whether an immediate
/// calculation was requested.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub updates: Vec<EngineUpdate>,
    pub schedule_recalc: bool,
    pub calculate_now: bool,
}

impl Applied {
    fn none() -> Self {
        Self {
            updates: Vec::new(),
            schedule_recalc: false,
            calculate_now: false,
        }
    }

    fn recalc(updates: Vec<EngineUpdate>) -> Self {
        Self {
            updates,
            schedule_recalc: true,
            calculate_now: false,
        }
    }
}

impl Session {
    /// An empty session with no components.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session seeded with the two blank components a new course starts
    /// with.
    pub fn seeded() -> Self {
        let mut session = Self::new();
        for _ in 0..SEEDED_COMPONENTS {
            session.add_component();
        }
        session
    }

    /// Applies one input event and reports what to publish and schedule.
    pub fn apply(&mut self, event: InputEvent) -> Applied {
        match event {
            InputEvent::EditComponent { id, field, raw } => {
                if !self.edit_component(id, field, &raw) {
                    return Applied::none();
                }
                match field {
                    // Names are display-only and never trigger a
                    // recalculation.
                    ComponentField::Name => Applied::none(),
                    ComponentField::Weight => Applied::recalc(vec![self.total_weight_update()]),
                    ComponentField::Score => Applied::recalc(Vec::new()),
                }
            }
            InputEvent::SetFinalWeight { raw } => {
                self.set_final_weight(parse_weight(&raw));
                Applied::recalc(vec![self.total_weight_update()])
            }
            InputEvent::SelectPresetTarget { grade } => {
                self.set_target_grade(Some(grade));
                Applied::recalc(Vec::new())
            }
            InputEvent::SetCustomTarget { raw } => {
                self.set_target_grade(parse_target(&raw));
                Applied::recalc(Vec::new())
            }
            InputEvent::ScenarioSlider { value } => {
                self.scenario.set_from_slider(value);
                Applied::recalc(vec![self.scenario_update()])
            }
            InputEvent::ScenarioPreset { value } => {
                self.scenario.set_from_preset(value);
                Applied::recalc(vec![self.scenario_update()])
            }
            InputEvent::AddComponent => {
                let id = self.add_component();
                Applied::recalc(vec![
                    EngineUpdate::ComponentAdded { id },
                    self.total_weight_update(),
                ])
            }
            InputEvent::RemoveComponent { id } => {
                if self.registry.remove(id) {
                    debug!(id, "component removed");
                    Applied::recalc(vec![self.total_weight_update()])
                } else {
                    debug!(id, "remove for unknown component ignored");
                    Applied::none()
                }
            }
            InputEvent::CalculateNow => Applied {
                updates: Vec::new(),
                schedule_recalc: false,
                calculate_now: true,
            },
            InputEvent::Reset => {
                let seeded = self.reset();
                let mut updates: Vec<EngineUpdate> = seeded
                    .into_iter()
                    .map(|id| EngineUpdate::ComponentAdded { id })
                    .collect();
                updates.push(self.total_weight_update());
                updates.push(self.scenario_update());
                Applied::recalc(updates)
            }
        }
    }

    /// Appends a blank component and returns its id.
    pub fn add_component(&mut self) -> u64 {
        let id = self.registry.add();
        debug!(id, "component added");
        id
    }

    /// Writes raw field text into a component, parsing numeric fields
    /// leniently. Returns false when no component has that id.
    pub fn edit_component(&mut self, id: u64, field: ComponentField, raw: &str) -> bool {
        let Some(component) = self.registry.get_mut(id) else {
            debug!(id, "edit for unknown component ignored");
            return false;
        };
        match field {
            ComponentField::Name => component.name = raw.to_string(),
            ComponentField::Weight => component.weight = parse_weight(raw),
            ComponentField::Score => component.score = parse_score(raw),
        }
        true
    }

    /// Sets the final-exam weight; 0 doubles as "not entered yet".
    pub fn set_final_weight(&mut self, weight: f64) {
        self.final_weight = if weight.is_finite() { weight } else { 0.0 };
    }

    /// Selects a target grade; non-finite values count as no selection.
    pub fn set_target_grade(&mut self, target: Option<f64>) {
        self.target_grade = target.filter(|t| t.is_finite());
    }

    /// Sets the scenario value through the shared setter both input modes
    /// funnel into.
    pub fn set_scenario(&mut self, value: i64) {
        self.scenario.set(value);
    }

    /// Clears everything back to the starting state and seeds the blank
    /// components again, returning their ids. The id counter keeps running.
    pub fn reset(&mut self) -> Vec<u64> {
        self.registry.clear();
        self.final_weight = 0.0;
        self.target_grade = None;
        self.scenario.reset();
        (0..SEEDED_COMPONENTS)
            .map(|_| self.add_component())
            .collect()
    }

    /// Builds the ephemeral input snapshot for one calculation.
    pub fn snapshot(&self) -> CalculationInput {
        CalculationInput {
            components: self.registry.components().to_vec(),
            final_weight: self.final_weight,
            target_grade: self.target_grade,
            scenario_value: self.scenario.value(),
        }
    }

    /// Runs one calculation over the current state.
    pub fn calculate(&self) -> CalculationResult {
        crate::engine::calculate::calculate(&self.snapshot())
    }

    /// The automatic (debounced) path only calculates once a final weight
    /// and a target are present; the explicit command has no such gate.
    pub fn can_auto_calculate(&self) -> bool {
        self.final_weight > 0.0 && self.target_grade.is_some()
    }

    /// Combined weight of all components plus the final exam.
    pub fn total_weight(&self) -> f64 {
        self.registry.total_weight(self.final_weight)
    }

    /// Current scenario value.
    pub fn scenario_value(&self) -> u8 {
        self.scenario.value()
    }

    /// All components in display order.
    pub fn components(&self) -> &[crate::engine::types::Component] {
        self.registry.components()
    }

    /// Updates a freshly attached presentation layer needs to draw the
    /// current state: one row per component, the live total weight and the
    /// scenario value.
    pub fn initial_updates(&self) -> Vec<EngineUpdate> {
        let mut updates: Vec<EngineUpdate> = self
            .registry
            .components()
            .iter()
            .map(|c| EngineUpdate::ComponentAdded { id: c.id })
            .collect();
        updates.push(self.total_weight_update());
        updates.push(self.scenario_update());
        updates
    }

    fn total_weight_update(&self) -> EngineUpdate {
        EngineUpdate::TotalWeight {
            total: self.total_weight(),
        }
    }

    fn scenario_update(&self) -> EngineUpdate {
        EngineUpdate::ScenarioValue {
            value: self.scenario.value(),
        }
    }
}
