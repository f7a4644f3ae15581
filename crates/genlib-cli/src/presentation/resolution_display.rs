//! Resolver output: actions, notes and violations.

use genlib_core::{
    DependencyViolation, DisableOutcome, EnableOutcome, ResolutionAction, ResolutionNote,
};

pub fn describe_action(action: &ResolutionAction) -> String {
    match action {
        ResolutionAction::Enabled {
            id,
            required_by: Some(by),
        } => format!("enabled {id} (required by {by})"),
        ResolutionAction::Enabled {
            id,
            required_by: None,
        } => format!("enabled {id}"),
        ResolutionAction::Replaced { id, replaced_by } => {
            format!("disabled {id} (replaced by {replaced_by})")
        }
    }
}

pub fn describe_note(note: &ResolutionNote) -> String {
    match note {
        ResolutionNote::AlreadyEnabled { id } => format!("{id} is already enabled"),
        ResolutionNote::Unresolvable {
            manifest_id,
            dependency_name,
        } => format!("no content in the pool satisfies '{dependency_name}' for {manifest_id}"),
        ResolutionNote::CycleDetected {
            manifest_id,
            candidate_id,
        } => format!("{candidate_id} was displaced earlier in this pass; left unresolved for {manifest_id}"),
    }
}

/// Print violations, one per line.
pub fn print_violations(violations: &[DependencyViolation]) {
    if violations.is_empty() {
        println!("✓ No dependency violations.");
        return;
    }
    println!("{} dependency violation(s):", violations.len());
    for violation in violations {
        println!("  ✗ {} ({})", violation.message, violation.manifest_id);
    }
}

pub fn print_enable_outcome(outcome: &EnableOutcome) {
    for action in &outcome.actions {
        println!("  {}", describe_action(action));
    }
    for note in &outcome.notes {
        println!("  note: {}", describe_note(note));
    }
    if !outcome.violations.is_empty() {
        print_violations(&outcome.violations);
    }
}

pub fn print_disable_outcome(outcome: &DisableOutcome) {
    if outcome.returned_to_discovery {
        println!("  returned to the discovery list");
    }
    if !outcome.violations.is_empty() {
        print_violations(&outcome.violations);
    }
}
