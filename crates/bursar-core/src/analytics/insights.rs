//! Recommendation generation
//!
//! Rule-based, order-sensitive composition of the aggregation and
//! comparison outputs into human-readable strings. The list is returned
//! as-is: no deduplication, no ranking beyond append order.

use crate::models::BudgetCategory;

use super::compare::BudgetComparison;

/// Which entry point the insight list is built for. The report path appends
/// the comparator's even-share overspend warnings; the forecast path stops
/// after the concentration check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightPath {
    Report,
    Forecast,
}

/// Share of the remaining budget suggested for savings.
const SAVINGS_SHARE: f64 = 0.35;

/// Concentration threshold for the highest-spending category, in percent.
const CONCENTRATION_PCT: f64 = 50.0;

/// Compose the ordered recommendation list.
///
/// 1. One overspend sentence per budget category with `spent > allocated`,
///    stating the exact overage.
/// 2. A savings suggestion for 35% of any remaining budget.
/// 3. A concentration warning when the highest category exceeds half of
///    total spend.
/// 4. (report path only) the even-share overspend warnings.
pub fn generate_insights(
    categories: &[BudgetCategory],
    comparison: &BudgetComparison,
    path: InsightPath,
    currency: &str,
) -> Vec<String> {
    let mut insights = Vec::new();

    for category in categories {
        if category.spent > category.allocated {
            insights.push(format!(
                "You overspent on {} by {}{:.2}.",
                category.name,
                currency,
                category.spent - category.allocated
            ));
        }
    }

    if comparison.remaining_budget > 0.0 {
        let suggested = (comparison.remaining_budget * SAVINGS_SHARE).round() as i64;
        insights.push(format!(
            "You have {}{:.2} left in your budget. Consider allocating {}{} to savings.",
            currency, comparison.remaining_budget, currency, suggested
        ));
    }

    if comparison.highest_share_pct > CONCENTRATION_PCT {
        insights.push(format!(
            "{} accounts for {}% of your spending. Consider reducing discretionary spending there.",
            comparison.highest_category,
            comparison.highest_share_pct.round() as i64
        ));
    }

    if path == InsightPath::Report {
        insights.extend(comparison.overspend_warnings.iter().cloned());
    }

    tracing::debug!(count = insights.len(), path = ?path, "generated insights");
    insights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comparison(remaining: f64, highest: &str, share: f64, warnings: Vec<String>) -> BudgetComparison {
        BudgetComparison {
            remaining_budget: remaining,
            overspend_warnings: warnings,
            highest_category: highest.to_string(),
            lowest_category: "Travel".to_string(),
            highest_share_pct: share,
        }
    }

    fn category(name: &str, allocated: f64, spent: f64) -> BudgetCategory {
        BudgetCategory {
            name: name.to_string(),
            allocated,
            spent,
        }
    }

    #[test]
    fn test_overspend_insight_states_exact_overage() {
        let insights = generate_insights(
            &[category("Food", 100.0, 120.0)],
            &comparison(0.0, "Food", 0.0, vec![]),
            InsightPath::Forecast,
            "£",
        );

        assert_eq!(insights.len(), 1);
        assert!(insights[0].contains("Food"));
        assert!(insights[0].contains("20"));
    }

    #[test]
    fn test_savings_suggestion_takes_35_percent() {
        let insights = generate_insights(
            &[],
            &comparison(200.0, "Food", 0.0, vec![]),
            InsightPath::Forecast,
            "£",
        );

        assert_eq!(insights.len(), 1);
        assert!(insights[0].contains("£70"));
        assert!(insights[0].contains("savings"));
    }

    #[test]
    fn test_savings_suggestion_rounds_to_whole_unit() {
        let insights = generate_insights(
            &[],
            &comparison(10.0, "Food", 0.0, vec![]),
            InsightPath::Forecast,
            "£",
        );
        // 35% of 10 is 3.5, rounds to 4
        assert!(insights[0].contains("£4"));
    }

    #[test]
    fn test_concentration_warning_above_half() {
        let insights = generate_insights(
            &[],
            &comparison(0.0, "Rent", 62.4, vec![]),
            InsightPath::Forecast,
            "£",
        );

        assert_eq!(insights.len(), 1);
        assert!(insights[0].contains("Rent"));
        assert!(insights[0].contains("62%"));

        // Exactly 50% does not trigger
        let insights = generate_insights(
            &[],
            &comparison(0.0, "Rent", 50.0, vec![]),
            InsightPath::Forecast,
            "£",
        );
        assert!(insights.is_empty());
    }

    #[test]
    fn test_report_path_appends_even_share_warnings() {
        let warnings = vec!["Spending on Food is £30.00 over its even share of the budget.".to_string()];
        let categories = [category("Food", 100.0, 120.0)];

        let report = generate_insights(
            &categories,
            &comparison(50.0, "Food", 80.0, warnings.clone()),
            InsightPath::Report,
            "£",
        );
        let forecast = generate_insights(
            &categories,
            &comparison(50.0, "Food", 80.0, warnings),
            InsightPath::Forecast,
            "£",
        );

        assert_eq!(report.len(), forecast.len() + 1);
        assert!(report.last().unwrap().contains("even share"));
    }

    #[test]
    fn test_insight_ordering() {
        let warnings = vec!["even-share warning".to_string()];
        let insights = generate_insights(
            &[category("Food", 100.0, 150.0)],
            &comparison(40.0, "Food", 90.0, warnings),
            InsightPath::Report,
            "£",
        );

        assert_eq!(insights.len(), 4);
        assert!(insights[0].contains("overspent on Food"));
        assert!(insights[1].contains("savings"));
        assert!(insights[2].contains("90%"));
        assert!(insights[3].contains("even-share"));
    }
}
