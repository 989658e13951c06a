use super::Kernel;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Definition of an operator: numeric semantics, display form, arity, and
/// the structural complexity weight used by the generator's budget.
pub struct OperatorDefinition {
    /// Canonical token text (e.g. "add", "safe_log")
    pub name: &'static str,

    /// Number of operands
    pub arity: usize,

    /// Structural complexity weight; never below the terminal weight
    /// [`VAR_CONST_COMPLEXITY`](crate::VAR_CONST_COMPLEXITY). Scores
    /// generated trees, has no effect on evaluation.
    pub complexity: u32,

    /// Numeric kernel tag
    pub(crate) kernel: Kernel,

    /// Display renderer over already-rendered child strings
    pub(crate) render: fn(&[String]) -> String,
}

impl OperatorDefinition {
    /// Render this operator around already-rendered child strings.
    ///
    /// `children.len()` must equal `arity`; `Equation` rendering
    /// guarantees this.
    pub fn render(&self, children: &[String]) -> String {
        (self.render)(children)
    }
}

impl fmt::Debug for OperatorDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorDefinition")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("complexity", &self.complexity)
            .finish_non_exhaustive()
    }
}

/// Static registry storing all operator definitions
static REGISTRY: OnceLock<HashMap<&'static str, OperatorDefinition>> = OnceLock::new();

/// Initialize the registry with all operator definitions
fn init_registry() -> HashMap<&'static str, OperatorDefinition> {
    let mut map = HashMap::with_capacity(16);
    for def in super::definitions::all_definitions() {
        map.insert(def.name, def);
    }
    map
}

/// Central registry for operator lookups.
///
/// Populated once at first use from the fixed table in `definitions`;
/// there is no runtime mutation API. Adding an operator means extending
/// the table, not calling into an instance.
pub struct Registry;

impl Registry {
    /// Get an operator definition by token text - O(1) lookup
    pub fn get(name: &str) -> Option<&'static OperatorDefinition> {
        REGISTRY.get_or_init(init_registry).get(name)
    }

    /// Whether a token names a registered operator
    pub fn contains(name: &str) -> bool {
        Self::get(name).is_some()
    }

    /// All registered operator names, in no particular order
    pub fn names() -> impl Iterator<Item = &'static str> {
        REGISTRY.get_or_init(init_registry).keys().copied()
    }
}
