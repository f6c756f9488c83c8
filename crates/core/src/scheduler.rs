//! Ordered per-tick rule table
//!
//! Rules run once per tick in registration order. Each rule is a boxed
//! closure over a `TickContext`, so the scheduler knows nothing about the
//! physics it drives.

use crate::config::SimulationConfig;
use crate::error::{GridError, Result};
use crate::grid::PlanetGrid;
use crate::solver::{GridOps, ProfilerScope};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Everything a rule may touch during one tick
pub struct TickContext<'a> {
    pub grid: &'a mut PlanetGrid,
    pub ops: &'a dyn GridOps,
    pub config: &'a SimulationConfig,
}

/// Function that executes one tick rule
pub type RuleFn = Box<dyn FnMut(&mut TickContext<'_>) + Send>;

/// A named, enable-flagged update rule
pub struct TickRule {
    name: String,
    enabled: bool,
    action: RuleFn,
}

impl TickRule {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl std::fmt::Debug for TickRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickRule")
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Registry of tick rules, executed in registration order
#[derive(Debug, Default)]
pub struct TickScheduler {
    rules: Vec<TickRule>,
    /// Rule name to position in `rules`
    index: FxHashMap<String, usize>,
    ticks: u64,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule at the end of the table
    ///
    /// Registering a name that already exists replaces its action and flag
    /// but keeps its original position.
    pub fn register<F>(&mut self, name: impl Into<String>, enabled: bool, action: F)
    where
        F: FnMut(&mut TickContext<'_>) + Send + 'static,
    {
        let name = name.into();
        let action: RuleFn = Box::new(action);
        if let Some(&position) = self.index.get(&name) {
            let rule = &mut self.rules[position];
            rule.enabled = enabled;
            rule.action = action;
            return;
        }
        self.index.insert(name.clone(), self.rules.len());
        self.rules.push(TickRule {
            name,
            enabled,
            action,
        });
    }

    /// Set a rule's enabled flag
    ///
    /// # Errors
    ///
    /// Returns `UnknownRule` if no rule has this name.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<()> {
        let position = *self
            .index
            .get(name)
            .ok_or_else(|| GridError::UnknownRule(name.to_string()))?;
        self.rules[position].enabled = enabled;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `UnknownRule` if no rule has this name.
    pub fn enable(&mut self, name: &str) -> Result<()> {
        self.set_enabled(name, true)
    }

    /// # Errors
    ///
    /// Returns `UnknownRule` if no rule has this name.
    pub fn disable(&mut self, name: &str) -> Result<()> {
        self.set_enabled(name, false)
    }

    /// Whether a rule is registered and enabled
    pub fn is_enabled(&self, name: &str) -> bool {
        self.index
            .get(name)
            .is_some_and(|&position| self.rules[position].enabled)
    }

    /// Rule names in execution order
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(TickRule::name)
    }

    pub fn rules(&self) -> &[TickRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of completed ticks
    pub fn ticks_completed(&self) -> u64 {
        self.ticks
    }

    /// Run every enabled rule once, in order
    ///
    /// # Returns
    ///
    /// Number of rules executed
    pub fn tick(&mut self, ctx: &mut TickContext<'_>) -> usize {
        let mut executed = 0;
        for rule in self.rules.iter_mut().filter(|rule| rule.enabled) {
            let _scope = ProfilerScope::new(rule.name.as_str());
            (rule.action)(&mut *ctx);
            executed += 1;
        }
        self.ticks += 1;
        debug!(tick = self.ticks, rules = executed, "tick complete");
        executed
    }
}
