//! Operator definitions for the registry.
//!
//! Display forms follow the wire convention consumed by the experiment
//! loggers: binary arithmetic renders infix in parentheses, functions
//! render as `name(arg)`, exponentials as `(e^x)` / `(x^y)`.
//!
//! Complexity weights: elementary arithmetic 1, division 2, trig and
//! log/sqrt/exp 3, guarded power 4, nullary constants 1. The weights only
//! feed the generator's complexity budget.

use super::Kernel;
use super::registry::OperatorDefinition;

/// Return all operator definitions for populating the registry
pub(crate) fn all_definitions() -> Vec<OperatorDefinition> {
    vec![
        OperatorDefinition {
            name: "add",
            arity: 2,
            complexity: 1,
            kernel: Kernel::Add,
            render: |args| format!("({} + {})", args[0], args[1]),
        },
        OperatorDefinition {
            name: "sub",
            arity: 2,
            complexity: 1,
            kernel: Kernel::Sub,
            render: |args| format!("({} - {})", args[0], args[1]),
        },
        OperatorDefinition {
            name: "mul",
            arity: 2,
            complexity: 1,
            kernel: Kernel::Mul,
            render: |args| format!("({} * {})", args[0], args[1]),
        },
        OperatorDefinition {
            name: "sin",
            arity: 1,
            complexity: 3,
            kernel: Kernel::Sin,
            render: |args| format!("sin({})", args[0]),
        },
        OperatorDefinition {
            name: "cos",
            arity: 1,
            complexity: 3,
            kernel: Kernel::Cos,
            render: |args| format!("cos({})", args[0]),
        },
        OperatorDefinition {
            name: "safe_log",
            arity: 1,
            complexity: 3,
            kernel: Kernel::SafeLog,
            render: |args| format!("log({})", args[0]),
        },
        OperatorDefinition {
            name: "safe_sqrt",
            arity: 1,
            complexity: 3,
            kernel: Kernel::SafeSqrt,
            render: |args| format!("sqrt({})", args[0]),
        },
        OperatorDefinition {
            name: "safe_div",
            arity: 2,
            complexity: 2,
            kernel: Kernel::SafeDiv,
            render: |args| format!("({} / {})", args[0], args[1]),
        },
        OperatorDefinition {
            name: "safe_exp",
            arity: 1,
            complexity: 3,
            kernel: Kernel::SafeExp,
            render: |args| format!("(e^{})", args[0]),
        },
        OperatorDefinition {
            name: "safe_pow",
            arity: 2,
            complexity: 4,
            kernel: Kernel::SafePow,
            render: |args| format!("({}^{})", args[0], args[1]),
        },
        OperatorDefinition {
            name: "e",
            arity: 0,
            complexity: 1,
            kernel: Kernel::Euler,
            render: |_| "e".to_string(),
        },
        OperatorDefinition {
            name: "pi",
            arity: 0,
            complexity: 1,
            kernel: Kernel::Pi,
            render: |_| "pi".to_string(),
        },
    ]
}
