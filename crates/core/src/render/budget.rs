use crate::domain::plan::BudgetBreakdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmountRow {
    pub label: &'static str,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetPanel {
    pub title: &'static str,
    pub headline: String,
    pub components: Vec<AmountRow>,
    pub total: AmountRow,
    pub user_budget: AmountRow,
    pub balance: AmountRow,
    pub tone: Tone,
}

pub fn currency(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${amount:.2}")
    }
}

/// Formats the producer's breakdown as-is. Nothing here is recomputed: the
/// sign framing follows `within_budget` and the magnitude is `|remaining|`.
pub fn budget_panel(budget: &BudgetBreakdown) -> BudgetPanel {
    let remaining = currency(budget.remaining.abs());

    let (headline, balance_label, sign, tone) = if budget.within_budget {
        let headline = if budget.remaining >= 0.0 {
            format!("You're within budget! {remaining} remaining")
        } else {
            "You're within budget!".to_string()
        };
        (headline, "Remaining", '+', Tone::Positive)
    } else {
        (
            format!("Budget exceeded by {remaining}"),
            "Over Budget",
            '-',
            Tone::Negative,
        )
    };

    BudgetPanel {
        title: "Budget Breakdown",
        headline,
        components: budget
            .components()
            .into_iter()
            .map(|(label, amount)| AmountRow {
                label,
                amount: currency(amount),
            })
            .collect(),
        total: AmountRow {
            label: "Total Estimated Cost",
            amount: currency(budget.total_estimated),
        },
        user_budget: AmountRow {
            label: "Your Budget",
            amount: currency(budget.user_budget),
        },
        balance: AmountRow {
            label: balance_label,
            amount: format!("{sign}{remaining}"),
        },
        tone,
    }
}
