//! Search policy: which expansion order to run and how it is configured.

use std::str::FromStr;

use crate::error::SearchError;
use crate::order::{BestFirst, BreadthFirst, DepthFirst, ExpansionOrder, SelfLoopGuard};
use crate::state::State;

/// The built-in expansion orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderKind {
    #[default]
    BreadthFirst,
    DepthFirst,
    BestFirst,
}

impl OrderKind {
    /// Canonical name, as accepted by [`OrderKind::from_str`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BreadthFirst => "breadth-first",
            Self::DepthFirst => "depth-first",
            Self::BestFirst => "best-first",
        }
    }
}

impl FromStr for OrderKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breadth-first" | "bfs" => Ok(Self::BreadthFirst),
            "depth-first" | "dfs" => Ok(Self::DepthFirst),
            "best-first" | "astar" | "a*" => Ok(Self::BestFirst),
            _ => Err(SearchError::UnknownOrder { name: s.to_string() }),
        }
    }
}

impl std::fmt::Display for OrderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Expansion order to run.
    pub order: OrderKind,
    /// Self-loop guard for [`OrderKind::BestFirst`]; ignored otherwise.
    pub self_loop_guard: SelfLoopGuard,
    /// Keep per-expansion events in the audit trail. Counters are always kept.
    pub record_expansions: bool,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            order: OrderKind::BreadthFirst,
            self_loop_guard: SelfLoopGuard::StateEquality,
            record_expansions: true,
        }
    }
}

impl SearchPolicy {
    /// Policy running `order` with every other field at its default.
    #[must_use]
    pub fn with_order(order: OrderKind) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    /// Build the configured expansion order.
    #[must_use]
    pub fn build_order<S: State + PartialEq + 'static>(&self) -> Box<dyn ExpansionOrder<S>> {
        match self.order {
            OrderKind::BreadthFirst => Box::new(BreadthFirst),
            OrderKind::DepthFirst => Box::new(DepthFirst),
            OrderKind::BestFirst => Box::new(BestFirst::new(self.self_loop_guard)),
        }
    }

    /// Read a policy from a JSON object. Missing fields keep their defaults.
    ///
    /// Recognised fields: `"order"` (string), `"self_loop_guard"`
    /// (`"state_equality"` or `"off"`), `"record_expansions"` (bool).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for non-object input, wrongly
    /// typed fields or unknown guard names, and [`SearchError::UnknownOrder`]
    /// for unknown order names.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, SearchError> {
        let obj = value.as_object().ok_or_else(|| SearchError::InvalidPolicy {
            detail: "policy must be a JSON object".into(),
        })?;
        let mut policy = Self::default();

        if let Some(order) = obj.get("order") {
            let name = order.as_str().ok_or_else(|| SearchError::InvalidPolicy {
                detail: "order must be a string".into(),
            })?;
            policy.order = name.parse()?;
        }
        if let Some(guard) = obj.get("self_loop_guard") {
            policy.self_loop_guard = match guard.as_str() {
                Some("state_equality") => SelfLoopGuard::StateEquality,
                Some("off") => SelfLoopGuard::Off,
                _ => {
                    return Err(SearchError::InvalidPolicy {
                        detail: format!("unknown self_loop_guard: {guard}"),
                    })
                }
            };
        }
        if let Some(record) = obj.get("record_expansions") {
            policy.record_expansions = record.as_bool().ok_or_else(|| SearchError::InvalidPolicy {
                detail: "record_expansions must be a bool".into(),
            })?;
        }
        Ok(policy)
    }

    /// JSON echo of this policy, in the shape [`SearchPolicy::from_json`] reads.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "order": self.order.as_str(),
            "record_expansions": self.record_expansions,
            "self_loop_guard": guard_str(self.self_loop_guard),
        })
    }
}

fn guard_str(g: SelfLoopGuard) -> &'static str {
    match g {
        SelfLoopGuard::StateEquality => "state_equality",
        SelfLoopGuard::Off => "off",
    }
}
