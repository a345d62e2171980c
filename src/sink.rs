use async_trait::async_trait;

use crate::engine::types::CalculationResult;

/// A state change the presentation layer should re-render.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineUpdate {
    /// A fresh component was appended; the id labels its row.
    ComponentAdded { id: u64 },
    /// Live combined weight of all components plus the final exam.
    TotalWeight { total: f64 },
    /// Current scenario value, so both input controls stay in sync.
    ScenarioValue { value: u8 },
    /// Outcome of a calculation, successful or not.
    Result(CalculationResult),
}

/// Receives engine updates. Implemented by the terminal renderer in the
/// binary and by collecting sinks in tests.
#[async_trait]
pub trait UpdateSink: Send + Sync {
    async fn publish(&self, update: EngineUpdate);
}
