//! Integration tests for bursar-core
//!
//! These tests exercise the full store → aggregate → compare → insights
//! workflow and the goal contribution path.

use std::sync::Arc;

use chrono::NaiveDate;

use bursar_core::{
    AnalyticsService, BudgetCategory, BudgetConfig, BudgetStore, CoreConfig, Error, GoalLedger,
    GoalStore, MemoryStore, SpendingModel, Transaction, TransactionDate, TrendPoint,
};

/// A March history with a clear concentration on Rent and an overspent
/// Food category (allocated 100, spent 120).
fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store
        .put_transactions(
            42,
            vec![
                tx(45.0, "Food", "2025-03-03"),
                tx(75.0, "Food", "2025-03-14"),
                tx(300.0, "Rent", "2025-03-01"),
                tx(30.0, "Travel", "2025-03-21"),
            ],
        )
        .unwrap();
    store
        .save_budget(
            42,
            BudgetConfig {
                budget: 500.0,
                spent: 450.0,
                categories: vec![
                    BudgetCategory {
                        name: "Food".to_string(),
                        allocated: 100.0,
                        spent: 120.0,
                    },
                    BudgetCategory {
                        name: "Rent".to_string(),
                        allocated: 320.0,
                        spent: 300.0,
                    },
                ],
                spending_trends: vec![],
            },
        )
        .unwrap();
    store
}

fn tx(amount: f64, category: &str, date: &str) -> Transaction {
    Transaction {
        amount,
        category: Some(category.to_string()),
        date: Some(TransactionDate::Text(date.to_string())),
    }
}

fn service(store: Arc<MemoryStore>) -> AnalyticsService {
    AnalyticsService::new(store.clone(), store.clone(), store, CoreConfig::default())
}

// =============================================================================
// Spending report workflow
// =============================================================================

#[test]
fn test_full_spending_report_workflow() {
    let service = service(seeded_store());
    let report = service.spending_report("42").unwrap();

    assert_eq!(report.highest_spending_category, "Rent");
    assert_eq!(report.lowest_spending_category, "Travel");
    // 450 over 4 transactions
    assert_eq!(report.daily_average_spending, 112.5);
    assert_eq!(report.largest_transaction.amount, 300.0);
    assert_eq!(report.largest_transaction.date, "2025-03-01");

    // Distribution mirrors the category totals (alphabetical)
    let names: Vec<&str> = report
        .spending_distribution
        .iter()
        .map(|slice| slice.name.as_str())
        .collect();
    assert_eq!(names, vec!["Food", "Rent", "Travel"]);
    let total: f64 = report
        .spending_distribution
        .iter()
        .map(|slice| slice.value)
        .sum();
    assert!((total - 450.0).abs() < 1e-9);

    // Trend is sorted by day of month
    let days: Vec<u32> = report.spending_trends.iter().map(|p| p.day).collect();
    assert_eq!(days, vec![1, 3, 14, 21]);
}

#[test]
fn test_report_recommendations_order_and_content() {
    let service = service(seeded_store());
    let report = service.spending_report("42").unwrap();

    // Overspent Food category (120 vs 100) leads the list with the exact
    // overage
    assert!(report.recommendations[0].contains("Food"));
    assert!(report.recommendations[0].contains("20"));

    // Savings suggestion for 35% of the remaining 50: £18
    assert!(report.recommendations[1].contains("savings"));
    assert!(report.recommendations[1].contains("£18"));

    // Rent is 300/450 = 67% of spend
    assert!(report.recommendations[2].contains("Rent"));
    assert!(report.recommendations[2].contains("67%"));

    // Report path appends even-share warnings (500/3 ≈ 166.67, Rent over)
    assert!(report
        .recommendations
        .iter()
        .any(|insight| insight.contains("even share")));
}

#[test]
fn test_report_without_transactions_is_not_found() {
    let store = Arc::new(MemoryStore::new());
    let service = service(store);
    assert!(matches!(
        service.spending_report("7"),
        Err(Error::NotFound(_))
    ));
}

// =============================================================================
// Budget snapshot workflow
// =============================================================================

#[test]
fn test_budget_snapshot_uses_fixed_literal_fallback() {
    let store = seeded_store();
    let service = service(store);

    let snapshot = service.budget_snapshot("42").unwrap();
    let pairs: Vec<(u32, f64)> = snapshot
        .spending_trends
        .iter()
        .map(|p| (p.day, p.amount))
        .collect();
    assert_eq!(
        pairs,
        vec![(1, 50.0), (2, 75.0), (3, 30.0), (4, 90.0), (5, 60.0)]
    );
}

#[test]
fn test_budget_snapshot_keeps_stored_trends() {
    let store = Arc::new(MemoryStore::new());
    store
        .save_budget(
            5,
            BudgetConfig {
                budget: 100.0,
                spent: 10.0,
                categories: vec![],
                spending_trends: vec![
                    TrendPoint { day: 9, amount: 4.0 },
                    TrendPoint { day: 2, amount: 6.0 },
                ],
            },
        )
        .unwrap();
    let service = service(store);

    let snapshot = service.budget_snapshot("5").unwrap();
    let days: Vec<u32> = snapshot.spending_trends.iter().map(|p| p.day).collect();
    assert_eq!(days, vec![2, 9]);
}

#[test]
fn test_save_then_read_budget_roundtrip() {
    let store = Arc::new(MemoryStore::new());
    let service = service(store);

    service
        .save_budget(
            "3",
            BudgetConfig {
                budget: 750.0,
                spent: 0.0,
                categories: vec![BudgetCategory {
                    name: "Housing".to_string(),
                    allocated: 400.0,
                    spent: 0.0,
                }],
                spending_trends: vec![],
            },
        )
        .unwrap();

    let snapshot = service.budget_snapshot("3").unwrap();
    assert_eq!(snapshot.budget, 750.0);
    assert_eq!(snapshot.categories.len(), 1);
}

// =============================================================================
// Forecast workflow
// =============================================================================

#[test]
fn test_forecast_pins_weighted_heuristic() {
    let store = Arc::new(MemoryStore::new());
    store
        .put_transactions(
            8,
            vec![
                tx(10.0, "Food", "2025-03-01"),
                tx(20.0, "Food", "2025-03-08"),
                tx(30.0, "Food", "2025-03-15"),
            ],
        )
        .unwrap();
    store
        .save_budget(
            8,
            BudgetConfig {
                budget: 200.0,
                ..BudgetConfig::default()
            },
        )
        .unwrap();
    let service = service(store);

    let report = service.forecast("8").unwrap();
    // 30*0.6 + 20*0.3 + 10*0.1
    assert_eq!(report.predicted_spending, 25.0);
    assert_eq!(report.remaining_budget, 175.0);
    assert!(report.predicted_explanation.contains("last 3 transactions"));
}

#[test]
fn test_forecast_mean_for_short_history() {
    let store = Arc::new(MemoryStore::new());
    store
        .put_transactions(
            8,
            vec![tx(40.0, "Food", "2025-03-01"), tx(60.0, "Food", "2025-03-08")],
        )
        .unwrap();
    let service = service(store);

    let report = service.forecast("8").unwrap();
    assert_eq!(report.predicted_spending, 50.0);
}

#[test]
fn test_forecast_empty_history_leaves_whole_budget() {
    let store = Arc::new(MemoryStore::new());
    store
        .save_budget(
            8,
            BudgetConfig {
                budget: 320.0,
                ..BudgetConfig::default()
            },
        )
        .unwrap();
    let service = service(store);

    let report = service.forecast("8").unwrap();
    assert_eq!(report.predicted_spending, 0.0);
    assert_eq!(report.remaining_budget, 320.0);
    assert!(report.predicted_explanation.contains("No spending history"));
}

// =============================================================================
// Model prediction workflow
// =============================================================================

#[test]
fn test_model_prediction_workflow() {
    use std::io::Write;

    let dir = tempfile::tempdir().unwrap();
    let artifact_path = dir.path().join("spending_model.json");
    let mut file = std::fs::File::create(&artifact_path).unwrap();
    file.write_all(
        br#"{
            "scaler": {"means": [20.0, 1000.0, 500.0, 4000.0], "stds": [2.0, 400.0, 250.0, 1000.0]},
            "categorical": [{"name": "gender", "values": ["Male", "Female"]}],
            "trees": [{"nodes": [{"value": 180.0}]}]
        }"#,
    )
    .unwrap();

    let store = Arc::new(MemoryStore::new());
    store
        .save_budget(
            6,
            BudgetConfig {
                budget: 150.0,
                ..BudgetConfig::default()
            },
        )
        .unwrap();
    let model = SpendingModel::load(&artifact_path).unwrap();
    let service = AnalyticsService::new(
        store.clone(),
        store.clone(),
        store,
        CoreConfig::default(),
    )
    .with_model(model);

    let prediction = service.predict_spending("6").unwrap();
    assert_eq!(prediction.predicted_spending, 180.0);
    assert_eq!(prediction.budget, 150.0);
    // 180 over a 150 budget produces an over-budget warning
    assert!(prediction.feedback[0].contains("exceeds"));
    assert!(prediction.feedback[0].contains("£30.00"));
}

#[test]
fn test_model_prediction_without_artifact_fails_loudly() {
    let missing = std::path::Path::new("/nonexistent/spending_model.json");
    assert!(matches!(
        SpendingModel::load(missing),
        Err(Error::Model(_))
    ));
}

// =============================================================================
// Goal ledger workflow
// =============================================================================

#[test]
fn test_goal_contribution_workflow() {
    let store = Arc::new(MemoryStore::new());
    let ledger = GoalLedger::new(store.clone());

    let deadline = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
    let goal = ledger.create(42, "Summer trip", 600.0, deadline).unwrap();
    assert_eq!(goal.saved, 0.0);

    ledger.contribute(goal.id, 150.0).unwrap();
    let updated = ledger.contribute(goal.id, 50.0).unwrap();
    assert_eq!(updated.saved, 200.0);

    let views = ledger.list(42).unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].id, goal.id.to_string());
    assert!((views[0].progress - 33.333).abs() < 0.01);

    ledger.delete(goal.id).unwrap();
    assert!(ledger.list(42).unwrap().is_empty());
}

#[test]
fn test_concurrent_contributions_sum_exactly() {
    let store = Arc::new(MemoryStore::new());
    let ledger = Arc::new(GoalLedger::new(store.clone()));

    let deadline = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let goal = ledger.create(1, "Emergency fund", 1000.0, deadline).unwrap();

    // Two simultaneous £10 contributions must both land: 20, not 10
    let mut handles = Vec::new();
    for _ in 0..2 {
        let ledger = Arc::clone(&ledger);
        let goal_id = goal.id;
        handles.push(std::thread::spawn(move || {
            ledger.contribute(goal_id, 10.0).unwrap();
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.goal(goal.id).unwrap().unwrap().saved, 20.0);
}

#[test]
fn test_goal_validation_rules() {
    let store = Arc::new(MemoryStore::new());
    let ledger = GoalLedger::new(store);
    let deadline = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

    assert!(matches!(
        ledger.create(1, "Trip", 0.0, deadline),
        Err(Error::Validation(_))
    ));

    let goal = ledger.create(1, "Trip", 100.0, deadline).unwrap();
    assert!(matches!(
        ledger.contribute(goal.id, -5.0),
        Err(Error::Validation(_))
    ));
    // Contributions past the target are rejected and leave the balance alone
    ledger.contribute(goal.id, 95.0).unwrap();
    assert!(matches!(
        ledger.contribute(goal.id, 10.0),
        Err(Error::Validation(_))
    ));
}
