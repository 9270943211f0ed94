//! Guided chat: keyword-matched, feature-templated responses
//!
//! The responder is an explicit ordered rule list - each rule pairs a
//! case-insensitive pattern with a handler that renders a response from
//! the current feature vector. Rules are evaluated top to bottom and the
//! first match wins, so precedence is the order of `rules()`. No rule
//! touches the billing store; everything is interpolated from the vector
//! the caller supplies.

use regex::Regex;

use crate::features::FeatureVector;

/// One chat rule: pattern plus response template
struct ChatRule {
    pattern: Regex,
    respond: fn(&FeatureVector) -> String,
}

impl ChatRule {
    fn new(pattern: &str, respond: fn(&FeatureVector) -> String) -> Self {
        Self {
            // Built-in patterns; compilation cannot fail
            pattern: Regex::new(&format!("(?i){}", pattern)).expect("valid chat rule pattern"),
            respond,
        }
    }
}

/// The guided-question responder
pub struct GuidedChat {
    rules: Vec<ChatRule>,
}

impl Default for GuidedChat {
    fn default() -> Self {
        Self::new()
    }
}

impl GuidedChat {
    pub fn new() -> Self {
        Self { rules: rules() }
    }

    /// Answer a free-text query from the supplied feature vector
    ///
    /// Deterministic and never fails: an unrecognized query gets the help
    /// message listing the supported topics.
    pub fn respond(&self, query: &str, features: &FeatureVector) -> String {
        for rule in &self.rules {
            if rule.pattern.is_match(query) {
                return (rule.respond)(features);
            }
        }

        "I can help with unpaid bills, cash-flow, growth, patterns, and what-if analysis."
            .to_string()
    }
}

/// The ordered rule list; first match wins
fn rules() -> Vec<ChatRule> {
    vec![
        ChatRule::new("unpaid|risk", |f| {
            if f.unpaid_ratio == 0.0 {
                "All your bills are paid. There is currently no cash-flow risk.".to_string()
            } else {
                format!(
                    "{}% of bills are unpaid. This can impact liquidity.",
                    (f.unpaid_ratio * 100.0) as i64
                )
            }
        }),
        ChatRule::new("cash", |f| {
            if f.unpaid_ratio > 0.3 {
                "Cash flow is under pressure due to unpaid bills.".to_string()
            } else {
                "Cash flow appears stable.".to_string()
            }
        }),
        ChatRule::new("growth", |f| {
            if f.avg_bill_value < 3000.0 {
                "Upselling and bundles can increase revenue.".to_string()
            } else {
                "Your order values are already healthy.".to_string()
            }
        }),
        ChatRule::new("trend|pattern", |f| {
            format!("Sales trend is currently {}.", f.sales_trend)
        }),
        ChatRule::new("this week", |_| {
            "This week, focus on collecting unpaid bills and sustaining current sales momentum."
                .to_string()
        }),
        ChatRule::new("what if", |_| {
            "If unpaid exposure continues, future liquidity risk will rise. \
             Reducing unpaid bills stabilizes growth."
                .to_string()
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::SalesTrend;

    fn features(unpaid_ratio: f64, avg_bill_value: f64, trend: SalesTrend) -> FeatureVector {
        FeatureVector {
            bills_count: 20,
            unpaid_ratio,
            total_sales: 10000.0,
            avg_bill_value,
            sales_trend: trend,
            risk_score: 0.4,
        }
    }

    #[test]
    fn test_risk_query_is_case_insensitive() {
        let chat = GuidedChat::new();
        let f = features(0.5, 2000.0, SalesTrend::Stable);

        let response = chat.respond("What is my RISK?", &f);
        assert_eq!(response, "50% of bills are unpaid. This can impact liquidity.");

        // Same rule, lower case
        assert_eq!(chat.respond("what is my risk?", &f), response);
    }

    #[test]
    fn test_risk_query_with_no_unpaid() {
        let chat = GuidedChat::new();
        let f = features(0.0, 2000.0, SalesTrend::Stable);

        let response = chat.respond("any unpaid bills?", &f);
        assert!(response.contains("no cash-flow risk"));
    }

    #[test]
    fn test_cash_branches_on_unpaid_ratio() {
        let chat = GuidedChat::new();

        let pressured = chat.respond("how is my cash flow", &features(0.5, 2000.0, SalesTrend::Stable));
        assert_eq!(pressured, "Cash flow is under pressure due to unpaid bills.");

        let stable = chat.respond("how is my cash flow", &features(0.1, 2000.0, SalesTrend::Stable));
        assert_eq!(stable, "Cash flow appears stable.");
    }

    #[test]
    fn test_growth_branches_on_avg_bill_value() {
        let chat = GuidedChat::new();

        let upsell = chat.respond("growth ideas?", &features(0.0, 800.0, SalesTrend::Stable));
        assert_eq!(upsell, "Upselling and bundles can increase revenue.");

        let healthy = chat.respond("growth ideas?", &features(0.0, 4500.0, SalesTrend::Stable));
        assert_eq!(healthy, "Your order values are already healthy.");
    }

    #[test]
    fn test_trend_echoes_current_direction() {
        let chat = GuidedChat::new();

        let response = chat.respond("any patterns?", &features(0.0, 2000.0, SalesTrend::Downward));
        assert_eq!(response, "Sales trend is currently downward.");
    }

    #[test]
    fn test_precedence_unpaid_beats_cash() {
        let chat = GuidedChat::new();
        let f = features(0.1, 2000.0, SalesTrend::Stable);

        // Both "unpaid" and "cash" appear; the unpaid rule is first
        let response = chat.respond("will unpaid bills hurt my cash?", &f);
        assert_eq!(response, "10% of bills are unpaid. This can impact liquidity.");
    }

    #[test]
    fn test_generic_guidance_rules() {
        let chat = GuidedChat::new();
        let f = features(0.0, 2000.0, SalesTrend::Stable);

        assert!(chat.respond("plans for this week", &f).contains("This week"));
        assert!(chat
            .respond("what if nothing changes?", &f)
            .contains("liquidity risk"));
    }

    #[test]
    fn test_unknown_query_gets_help() {
        let chat = GuidedChat::new();
        let f = features(0.0, 2000.0, SalesTrend::Stable);

        let response = chat.respond("tell me a joke", &f);
        assert!(response.starts_with("I can help with"));
    }
}
