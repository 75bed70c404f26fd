use crate::flags::{add_flag, find_directive, strip_flag, Flag};
use crate::models::{Transaction, TransactionUpdate};

pub struct UnflagPlan {
    pub updates: Vec<TransactionUpdate>,
    /// Split lines carrying the flag. The API cannot edit lines of an
    /// existing split, so these are reported instead of patched.
    pub skipped_subtransactions: Vec<String>,
}

pub fn plan_unflag(transactions: &[Transaction], flag: &Flag) -> UnflagPlan {
    let mut updates = Vec::new();
    let mut skipped_subtransactions = Vec::new();

    for t in transactions {
        if let Some(memo) = strip_flag(t.memo.as_deref(), flag) {
            updates.push(TransactionUpdate {
                id: t.id.clone(),
                memo,
            });
        }
        skipped_subtransactions.extend(
            t.subtransactions
                .iter()
                .filter(|st| find_directive(st.memo.as_deref(), flag).is_some())
                .map(|st| st.id.clone()),
        );
    }

    UnflagPlan {
        updates,
        skipped_subtransactions,
    }
}

/// Append the flag to every transaction in the category that lacks it.
pub fn plan_category_flag(
    transactions: &[Transaction],
    category_id: &str,
    flag: &Flag,
) -> Vec<TransactionUpdate> {
    transactions
        .iter()
        .filter(|t| t.category_id.as_deref() == Some(category_id))
        .filter_map(|t| {
            add_flag(t.memo.as_deref(), flag).map(|memo| TransactionUpdate {
                id: t.id.clone(),
                memo,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{sub, txn};

    fn churn() -> Flag {
        Flag::new("churn").unwrap()
    }

    #[test]
    fn test_plan_unflag_strips_flag_and_amount() {
        let txns = vec![
            txn("t1", -6000, Some("Dinner #churn half")),
            txn("t2", -6000, Some("Dinner")),
            txn("t3", -6000, None),
            txn("t4", -6000, Some("#CHURN")),
        ];
        let plan = plan_unflag(&txns, &churn());
        assert_eq!(
            plan.updates,
            vec![
                TransactionUpdate {
                    id: "t1".to_string(),
                    memo: "Dinner".to_string()
                },
                TransactionUpdate {
                    id: "t4".to_string(),
                    memo: String::new()
                },
            ]
        );
        assert!(plan.skipped_subtransactions.is_empty());
    }

    #[test]
    fn test_plan_unflag_reports_split_lines() {
        let mut parent = txn("t1", -6000, None);
        parent.subtransactions = vec![sub("s1", -3000, Some("#churn")), sub("s2", -3000, None)];
        let plan = plan_unflag(&[parent], &churn());
        assert!(plan.updates.is_empty());
        assert_eq!(plan.skipped_subtransactions, vec!["s1".to_string()]);
    }

    #[test]
    fn test_unflagged_memos_no_longer_match() {
        let txns = vec![
            txn("t1", -1, Some("#churn 5 #churn")),
            txn("t2", -1, Some("a #churn b")),
        ];
        for update in plan_unflag(&txns, &churn()).updates {
            assert!(find_directive(Some(&update.memo), &churn()).is_none());
        }
    }

    #[test]
    fn test_plan_category_flag() {
        let mut other = txn("t3", -100, Some("Gas"));
        other.category_id = Some("cat-9".to_string());
        let txns = vec![
            txn("t1", -100, None),
            txn("t2", -100, Some("Weekly shop #churn")),
            other,
            txn("t4", -100, Some("Milk")),
        ];
        let updates = plan_category_flag(&txns, "cat-1", &churn());
        assert_eq!(
            updates,
            vec![
                TransactionUpdate {
                    id: "t1".to_string(),
                    memo: "#churn".to_string()
                },
                TransactionUpdate {
                    id: "t4".to_string(),
                    memo: "Milk #churn".to_string()
                },
            ]
        );
    }
}
