//! Step/trace recording.
//!
//! Every computed quantity is logged as a [`CalculationStep`] with its formula,
//! the substituted numbers and the result. The log is append-only and never
//! read back by the solver.

use serde::Serialize;

/// Grouping of steps for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepCategory {
    General,
    State1,
    State2,
    State2a,
    State2b,
    State2c,
    State3,
    State4,
    Regeneration,
    Intercooling,
}

impl StepCategory {
    pub const ALL: [StepCategory; 10] = [
        StepCategory::General,
        StepCategory::State1,
        StepCategory::State2,
        StepCategory::State2a,
        StepCategory::State2b,
        StepCategory::State2c,
        StepCategory::State3,
        StepCategory::State4,
        StepCategory::Regeneration,
        StepCategory::Intercooling,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            StepCategory::General => "general",
            StepCategory::State1 => "state_1",
            StepCategory::State2 => "state_2",
            StepCategory::State2a => "state_2a",
            StepCategory::State2b => "state_2b",
            StepCategory::State2c => "state_2c",
            StepCategory::State3 => "state_3",
            StepCategory::State4 => "state_4",
            StepCategory::Regeneration => "regeneration",
            StepCategory::Intercooling => "intercooling",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StepCategory::General => "General",
            StepCategory::State1 => "State 1",
            StepCategory::State2 => "State 2",
            StepCategory::State2a => "State 2a",
            StepCategory::State2b => "State 2b",
            StepCategory::State2c => "State 2c",
            StepCategory::State3 => "State 3",
            StepCategory::State4 => "State 4",
            StepCategory::Regeneration => "Regeneration",
            StepCategory::Intercooling => "Intercooling",
        }
    }
}

impl std::str::FromStr for StepCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '-'], "_");
        StepCategory::ALL
            .into_iter()
            .find(|c| c.key() == wanted)
            .ok_or_else(|| format!("unknown step category '{s}'"))
    }
}

impl std::fmt::Display for StepCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// One recorded calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationStep {
    pub title: String,
    pub formula: Option<String>,
    pub calculation: Option<String>,
    pub result: Option<f64>,
    pub unit: Option<String>,
    pub category: StepCategory,
}

impl CalculationStep {
    pub fn new(category: StepCategory, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            formula: None,
            calculation: None,
            result: None,
            unit: None,
            category,
        }
    }

    pub fn formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    pub fn calculation(mut self, calculation: impl Into<String>) -> Self {
        self.calculation = Some(calculation.into());
        self
    }

    /// Attach a numeric result and its unit.
    pub fn result(mut self, value: f64, unit: &str) -> Self {
        self.result = Some(value);
        self.unit = Some(unit.to_string());
        self
    }
}

/// Append-only, ordered step log.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StepLog(Vec<CalculationStep>);

impl StepLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: CalculationStep) {
        self.0.push(step);
    }

    pub fn extend(&mut self, steps: impl IntoIterator<Item = CalculationStep>) {
        self.0.extend(steps);
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalculationStep> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[CalculationStep] {
        &self.0
    }

    /// Steps partitioned by category, categories in first-seen order.
    pub fn by_category(&self) -> Vec<(StepCategory, Vec<&CalculationStep>)> {
        let mut groups: Vec<(StepCategory, Vec<&CalculationStep>)> = Vec::new();
        for step in &self.0 {
            match groups.iter_mut().find(|(c, _)| *c == step.category) {
                Some((_, steps)) => steps.push(step),
                None => groups.push((step.category, vec![step])),
            }
        }
        groups
    }

    /// Steps of one category in emission order.
    pub fn in_category(&self, category: StepCategory) -> impl Iterator<Item = &CalculationStep> {
        self.0.iter().filter(move |s| s.category == category)
    }
}

/// A computed value together with the steps that explain it.
#[derive(Debug, Clone, PartialEq)]
pub struct Traced<T> {
    pub value: T,
    pub steps: Vec<CalculationStep>,
}

impl<T> Traced<T> {
    pub fn new(value: T, steps: Vec<CalculationStep>) -> Self {
        Self { value, steps }
    }
}
