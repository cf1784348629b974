//! Integration tests for the Salary Engine.
//!
//! This suite loads the fixture catalog under `config/default` and covers:
//! - Fixed-value, literal and CTC-relative components
//! - Chained and case-insensitive references
//! - Inactive components and templates
//! - Invalid, duplicate and empty templates
//! - Declaration vs dependency ordering
//! - Strict handling of unresolved variables
//! - Component names that are not plain identifiers
//! - Overflowing totals
//! - JSON output shape

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use salary_engine::config::{ConfigLoader, EngineOptions, EvaluationOrder, UnresolvedVariablePolicy};
use salary_engine::engine::SalaryEngine;
use salary_engine::error::EngineError;
use salary_engine::models::{ComponentKind, SalaryBreakdown, SalaryComponent, SalaryTemplate};

// =============================================================================
// Test Helpers
// =============================================================================

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/default").expect("Failed to load config")
}

fn create_engine() -> SalaryEngine {
    SalaryEngine::new(load_config())
}

fn create_engine_with(options: EngineOptions) -> SalaryEngine {
    let templates: Vec<SalaryTemplate> = load_config().templates().cloned().collect();
    SalaryEngine::new(ConfigLoader::from_parts(options, templates))
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn single_component_engine(component: SalaryComponent) -> SalaryEngine {
    let template = SalaryTemplate::new("tpl_single", "Single", vec![component]);
    SalaryEngine::new(ConfigLoader::from_parts(EngineOptions::default(), vec![template]))
}

fn value(breakdown: &SalaryBreakdown, name: &str) -> Decimal {
    breakdown
        .value_of(name)
        .unwrap_or_else(|| panic!("component '{}' missing from breakdown", name))
}

// =============================================================================
// Standard template
// =============================================================================

#[test]
fn test_standard_template_breakdown() {
    let breakdown = create_engine()
        .calculate("tpl_standard", dec("100000"))
        .unwrap();

    assert_eq!(breakdown.template_id, "tpl_standard");
    assert_eq!(breakdown.template_name, "Standard Monthly");
    assert_eq!(breakdown.ctc, dec("100000"));

    assert_eq!(value(&breakdown, "Basic"), dec("50000"));
    assert_eq!(value(&breakdown, "HRA"), dec("20000"));
    assert_eq!(value(&breakdown, "Conveyance"), dec("1600"));
    assert_eq!(value(&breakdown, "Medical"), dec("1250"));
    assert_eq!(value(&breakdown, "PF"), dec("6000"));
    assert_eq!(value(&breakdown, "Special Allowance"), dec("21150"));
    assert_eq!(value(&breakdown, "Professional Tax"), dec("200"));
    assert_eq!(value(&breakdown, "EmployeePF"), dec("6000"));
    assert_eq!(value(&breakdown, "TDS"), dec("3500"));

    assert_eq!(breakdown.summary.total_earnings, dec("94000"));
    assert_eq!(breakdown.summary.total_deductions, dec("9700"));
    assert_eq!(breakdown.summary.total_contributions, dec("6000"));
    assert_eq!(breakdown.summary.net_salary, dec("84300"));
    assert_eq!(breakdown.summary.gross_salary, dec("94000"));
}

#[test]
fn test_standard_template_with_odd_ctc_rounds_each_component() {
    let breakdown = create_engine()
        .calculate("tpl_standard", dec("77777"))
        .unwrap();

    assert_eq!(value(&breakdown, "Basic"), dec("38888.50"));
    assert_eq!(value(&breakdown, "HRA"), dec("15555.40"));
    assert_eq!(value(&breakdown, "PF"), dec("4666.62"));
    assert_eq!(value(&breakdown, "Special Allowance"), dec("15816.48"));

    for component in &breakdown.components {
        assert!(component.calculated_value.scale() <= 2);
    }
}

#[test]
fn test_inactive_component_is_excluded() {
    let breakdown = create_engine()
        .calculate("tpl_standard", dec("100000"))
        .unwrap();

    assert_eq!(breakdown.value_of("LTA"), None);
    assert_eq!(breakdown.components.len(), 9);
    assert!(breakdown.components.iter().all(|c| c.component.is_active));
}

#[test]
fn test_idempotence_is_byte_identical() {
    let engine = create_engine();
    let first = serde_json::to_string(&engine.calculate("tpl_standard", dec("123456.78")).unwrap())
        .unwrap();
    let second =
        serde_json::to_string(&engine.calculate("tpl_standard", dec("123456.78")).unwrap())
            .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_net_salary_additivity() {
    let engine = create_engine();
    for ctc in ["0", "1", "15000", "99999.99", "2500000"] {
        let breakdown = engine.calculate("tpl_standard", dec(ctc)).unwrap();
        assert_eq!(
            breakdown.summary.net_salary,
            breakdown.summary.total_earnings - breakdown.summary.total_deductions,
            "additivity failed for CTC {}",
            ctc
        );
        assert_eq!(breakdown.summary.gross_salary, breakdown.summary.total_earnings);
    }
}

// =============================================================================
// Single component properties
// =============================================================================

#[test]
fn test_fixed_value_passthrough() {
    let engine = single_component_engine(SalaryComponent::fixed(
        "Medical",
        ComponentKind::Earning,
        dec("5000"),
    ));
    for ctc in ["0", "100000", "31415.92"] {
        let breakdown = engine.calculate("tpl_single", dec(ctc)).unwrap();
        assert_eq!(value(&breakdown, "Medical"), dec("5000"));
    }
}

#[test]
fn test_literal_formula() {
    let engine = single_component_engine(SalaryComponent::formula(
        "Conveyance",
        ComponentKind::Earning,
        "5000",
    ));
    let breakdown = engine.calculate("tpl_single", dec("100000")).unwrap();
    assert_eq!(value(&breakdown, "Conveyance"), dec("5000"));
}

#[test]
fn test_ctc_relative_formula() {
    let engine = single_component_engine(SalaryComponent::formula(
        "Basic",
        ComponentKind::Earning,
        "=CTC*0.3",
    ));
    let breakdown = engine.calculate("tpl_single", dec("100000")).unwrap();
    assert_eq!(value(&breakdown, "Basic"), dec("30000"));
}

#[test]
fn test_rounding_two_decimal_places() {
    let engine = single_component_engine(SalaryComponent::formula(
        "Third",
        ComponentKind::Earning,
        "=CTC/3",
    ));
    let breakdown = engine.calculate("tpl_single", dec("100")).unwrap();
    assert_eq!(value(&breakdown, "Third"), dec("33.33"));
}

// =============================================================================
// Error cases
// =============================================================================

#[test]
fn test_invalid_formula_rejected_without_partial_result() {
    match create_engine().calculate("tpl_broken", dec("100000")) {
        Err(EngineError::InvalidFormula {
            component, formula, ..
        }) => {
            assert_eq!(component, "HRA");
            assert_eq!(formula, "=CTC**");
        }
        other => panic!("Expected InvalidFormula, got {:?}", other),
    }
}

#[test]
fn test_check_template_catches_invalid_formula_up_front() {
    let engine = create_engine();
    assert!(engine.check_template("tpl_standard").is_ok());
    assert!(matches!(
        engine.check_template("tpl_broken"),
        Err(EngineError::InvalidFormula { .. })
    ));
}

#[test]
fn test_template_not_found() {
    let err = create_engine()
        .calculate("tpl_missing", dec("100000"))
        .unwrap_err();
    assert!(matches!(err, EngineError::TemplateNotFound { .. }));
    assert!(!err.is_client_error());
}

#[test]
fn test_inactive_template() {
    let err = create_engine()
        .calculate("tpl_legacy", dec("100000"))
        .unwrap_err();
    assert!(matches!(err, EngineError::TemplateInactive { ref id } if id == "tpl_legacy"));
    assert!(err.is_client_error());
}

#[test]
fn test_template_without_active_components() {
    let err = create_engine()
        .calculate("tpl_empty", dec("100000"))
        .unwrap_err();
    assert!(matches!(err, EngineError::EmptyTemplate { .. }));
}

#[test]
fn test_duplicate_component_names() {
    match create_engine().calculate("tpl_duplicate", dec("100000")) {
        Err(EngineError::DuplicateComponentName { name }) => assert_eq!(name, "Basic"),
        other => panic!("Expected DuplicateComponentName, got {:?}", other),
    }
}

#[test]
fn test_negative_ctc() {
    let err = create_engine()
        .calculate("tpl_standard", dec("-5"))
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidCtc { .. }));
}

// =============================================================================
// Ordering and strictness options
// =============================================================================

#[test]
fn test_forward_reference_defaults_to_zero_in_declaration_order() {
    let breakdown = create_engine()
        .calculate("tpl_forward", dec("100000"))
        .unwrap();
    assert_eq!(value(&breakdown, "HRA"), Decimal::ZERO);
    assert_eq!(value(&breakdown, "Basic"), dec("50000"));
}

#[test]
fn test_forward_reference_resolves_in_dependency_order() {
    let engine = create_engine_with(EngineOptions {
        evaluation_order: EvaluationOrder::Dependency,
        ..EngineOptions::default()
    });
    let breakdown = engine.calculate("tpl_forward", dec("100000")).unwrap();
    assert_eq!(value(&breakdown, "HRA"), dec("20000"));
    assert_eq!(value(&breakdown, "Basic"), dec("50000"));
}

#[test]
fn test_dependency_order_matches_declaration_order_without_forward_references() {
    let declaration = create_engine()
        .calculate("tpl_standard", dec("100000"))
        .unwrap();
    let dependency = create_engine_with(EngineOptions::strict())
        .calculate("tpl_standard", dec("100000"))
        .unwrap();
    assert_eq!(declaration, dependency);
}

#[test]
fn test_strict_mode_rejects_forward_reference_in_declaration_order() {
    let engine = create_engine_with(EngineOptions {
        unresolved_variables: UnresolvedVariablePolicy::Reject,
        evaluation_order: EvaluationOrder::Declaration,
    });

    match engine.calculate("tpl_forward", dec("100000")) {
        Err(EngineError::UnresolvedVariable {
            component,
            variable,
        }) => {
            assert_eq!(component, "HRA");
            assert_eq!(variable, "Basic");
        }
        other => panic!("Expected UnresolvedVariable, got {:?}", other),
    }
}

#[test]
fn test_circular_reference_in_caller_supplied_template() {
    let engine = create_engine_with(EngineOptions::strict());
    let template = SalaryTemplate::new(
        "tpl_cycle",
        "Cycle",
        vec![
            SalaryComponent::formula("Basic", ComponentKind::Earning, "=HRA*2"),
            SalaryComponent::formula("HRA", ComponentKind::Earning, "=Basic/2"),
        ],
    );

    match engine.calculate_template(&template, dec("100000")) {
        Err(EngineError::CircularDependency { components }) => {
            assert_eq!(components, vec!["Basic", "HRA", "Basic"]);
        }
        other => panic!("Expected CircularDependency, got {:?}", other),
    }
}

// =============================================================================
// Component names and overflow
// =============================================================================

#[test]
fn test_component_names_that_are_not_identifiers() {
    let template = SalaryTemplate::new(
        "tpl_names",
        "Names",
        vec![
            SalaryComponent::fixed("Employer-PF", ComponentKind::Contribution, dec("1800")),
            SalaryComponent::formula("Special Allowance", ComponentKind::Earning, "=CTC*0.1"),
            SalaryComponent::formula("PF Copy", ComponentKind::Deduction, "=Employer-PF"),
            SalaryComponent::formula("Double", ComponentKind::Earning, "=Special Allowance*2"),
            SalaryComponent::formula("Bracketed", ComponentKind::Earning, "=[Special Allowance]"),
        ],
    );

    let breakdown = create_engine()
        .calculate_template(&template, dec("100000"))
        .unwrap();
    assert_eq!(value(&breakdown, "PF Copy"), dec("1800"));
    assert_eq!(value(&breakdown, "Double"), dec("20000"));
    assert_eq!(value(&breakdown, "Bracketed"), dec("10000"));
}

#[test]
fn test_standard_template_accepts_bare_spaced_reference() {
    let mut template = create_engine()
        .templates()
        .into_iter()
        .find(|t| t.id == "tpl_standard")
        .cloned()
        .unwrap();
    template.components.push(SalaryComponent::formula(
        "Allowance Share",
        ComponentKind::Earning,
        "=Special Allowance / 2",
    ));

    let breakdown = create_engine()
        .calculate_template(&template, dec("100000"))
        .unwrap();
    assert_eq!(value(&breakdown, "Allowance Share"), dec("10575"));
}

#[test]
fn test_total_overflow_is_reported() {
    let huge = dec("50000000000000000000000000000");
    let template = SalaryTemplate::new(
        "tpl_huge",
        "Huge",
        vec![
            SalaryComponent::fixed("A", ComponentKind::Earning, huge),
            SalaryComponent::fixed("B", ComponentKind::Earning, huge),
        ],
    );

    match create_engine().calculate_template(&template, dec("1")) {
        Err(EngineError::TotalOverflow { total }) => assert_eq!(total, "totalEarnings"),
        other => panic!("Expected TotalOverflow, got {:?}", other),
    }
}

#[test]
fn test_evaluate_and_calculate_agree_on_literals() {
    use salary_engine::calculation::CalculationContext;
    use salary_engine::formula::evaluate;

    let context = CalculationContext::new(dec("100000"));
    for formula in ["7500", "=7500.555", "1_000", "12,000"] {
        let engine = single_component_engine(SalaryComponent::formula(
            "Fixed",
            ComponentKind::Earning,
            formula,
        ));
        let calculated = engine
            .calculate("tpl_single", dec("100000"))
            .ok()
            .and_then(|b| b.value_of("Fixed"));
        assert_eq!(evaluate(formula, &context).ok(), calculated, "formula {:?}", formula);
    }
}

// =============================================================================
// Output shape
// =============================================================================

#[test]
fn test_json_output_shape() {
    let breakdown = create_engine()
        .calculate("tpl_standard", dec("100000"))
        .unwrap();
    let json: Value = serde_json::to_value(&breakdown).unwrap();

    assert_eq!(json["templateId"], "tpl_standard");
    assert_eq!(json["templateName"], "Standard Monthly");
    assert_eq!(json["ctc"], "100000");

    let components = json["components"].as_array().unwrap();
    assert_eq!(components[0]["name"], "Basic");
    assert_eq!(components[0]["type"], "earning");
    assert_eq!(components[0]["isTaxable"], "yes");
    assert!(components[0]["calculatedValue"].is_string());

    let summary = &json["summary"];
    for field in [
        "totalEarnings",
        "totalDeductions",
        "totalContributions",
        "netSalary",
        "grossSalary",
    ] {
        assert!(summary[field].is_string(), "summary.{} missing", field);
    }
}
