//! Policy checker adapters.

mod rules_policy_checker;

pub use rules_policy_checker::RulesPolicyChecker;
