//! Works out how a trip's costs are split.
//!
//! Every user is a participant of every trip, so the total cost is divided
//! evenly between all users. A user's balance is what they paid minus their
//! fair share: positive means the group owes them money, negative means they
//! owe the group.

use std::collections::HashMap;

use crate::{
    expense::{Expense, round_to_cents},
    user::{User, UserId},
};

/// Whether a user should get money back or pay money in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStatus {
    /// The user paid at least their fair share.
    Owed,
    /// The user paid less than their fair share.
    Owes,
}

/// How much one user paid and where that leaves them.
#[derive(Debug, Clone, PartialEq)]
pub struct UserBalance {
    /// The user the balance belongs to.
    pub user_id: UserId,
    /// The sum of the expenses the user paid for.
    pub paid: f64,
    /// `paid` minus the fair share.
    pub balance: f64,
}

impl UserBalance {
    /// Classify the balance by the sign of its value in cents, so that it
    /// agrees with the displayed amount. A balance that rounds to zero is
    /// [BalanceStatus::Owed].
    pub fn status(&self) -> BalanceStatus {
        if round_to_cents(self.balance) >= 0.0 {
            BalanceStatus::Owed
        } else {
            BalanceStatus::Owes
        }
    }
}

/// The split of a trip's costs.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    /// The sum of all expense amounts.
    pub total_spent: f64,
    /// `total_spent` divided by the number of users, or zero if there are no users.
    pub fair_share: f64,
    /// One balance per user, in the same order as the users passed to [calculate_settlement].
    pub balances: Vec<UserBalance>,
}

/// Split the cost of `expenses` evenly between `users`.
///
/// Expenses paid by someone not in `users` still count towards the total.
pub fn calculate_settlement(expenses: &[Expense], users: &[User]) -> Settlement {
    let total_spent: f64 = expenses.iter().map(|expense| expense.amount.as_f64()).sum();

    let fair_share = if users.is_empty() {
        0.0
    } else {
        total_spent / users.len() as f64
    };

    let mut paid_by_user: HashMap<UserId, f64> = HashMap::new();

    for expense in expenses {
        *paid_by_user.entry(expense.payer_id).or_default() += expense.amount.as_f64();
    }

    let balances = users
        .iter()
        .map(|user| {
            let paid = paid_by_user.get(&user.id).copied().unwrap_or(0.0);

            UserBalance {
                user_id: user.id,
                paid,
                balance: paid - fair_share,
            }
        })
        .collect();

    Settlement {
        total_spent,
        fair_share,
        balances,
    }
}

#[cfg(test)]
mod calculate_settlement_tests {
    use crate::{
        expense::{Amount, Expense, ExpenseId},
        html::format_signed_currency,
        settlement::{BalanceStatus, UserBalance, calculate_settlement},
        trip::TripId,
        user::{Email, User, UserId, UserName},
    };

    pub(super) fn user(id: i64) -> User {
        User {
            id: UserId::new(id),
            name: UserName::new_unchecked(&format!("User {id}")),
            email: Email::new_unchecked(&format!("user{id}@example.com")),
        }
    }

    pub(super) fn expense(id: i64, dollars: f64, payer_id: i64) -> Expense {
        Expense {
            id: ExpenseId::new(id),
            description: format!("Expense {id}"),
            amount: Amount::new_unchecked(dollars),
            trip_id: TripId::new(1),
            payer_id: UserId::new(payer_id),
        }
    }

    fn balance(user_id: i64, paid: f64, balance: f64) -> UserBalance {
        UserBalance {
            user_id: UserId::new(user_id),
            paid,
            balance,
        }
    }

    #[test]
    fn one_payer_two_users() {
        let users = [user(1), user(2)];
        let expenses = [expense(1, 100.0, 1)];

        let settlement = calculate_settlement(&expenses, &users);

        assert_eq!(settlement.total_spent, 100.0);
        assert_eq!(settlement.fair_share, 50.0);
        assert_eq!(
            settlement.balances,
            vec![balance(1, 100.0, 50.0), balance(2, 0.0, -50.0)]
        );
        assert_eq!(settlement.balances[0].status(), BalanceStatus::Owed);
        assert_eq!(settlement.balances[1].status(), BalanceStatus::Owes);
    }

    #[test]
    fn no_expenses() {
        let users = [user(1), user(2)];

        let settlement = calculate_settlement(&[], &users);

        assert_eq!(settlement.total_spent, 0.0);
        assert_eq!(settlement.fair_share, 0.0);
        assert_eq!(
            settlement.balances,
            vec![balance(1, 0.0, 0.0), balance(2, 0.0, 0.0)]
        );
    }

    #[test]
    fn three_users_two_payers() {
        let users = [user(1), user(2), user(3)];
        let expenses = [expense(1, 60.0, 1), expense(2, 30.0, 2)];

        let settlement = calculate_settlement(&expenses, &users);

        assert_eq!(settlement.total_spent, 90.0);
        assert_eq!(settlement.fair_share, 30.0);
        assert_eq!(
            settlement.balances,
            vec![
                balance(1, 60.0, 30.0),
                balance(2, 30.0, 0.0),
                balance(3, 0.0, -30.0)
            ]
        );
    }

    #[test]
    fn zero_balance_is_owed() {
        let users = [user(1), user(2), user(3)];
        let expenses = [expense(1, 60.0, 1), expense(2, 30.0, 2)];

        let settlement = calculate_settlement(&expenses, &users);

        assert_eq!(settlement.balances[1].status(), BalanceStatus::Owed);
    }

    #[test]
    fn equal_payers_are_all_owed() {
        let users = [user(1), user(2), user(3)];
        let expenses = [expense(1, 0.1, 1), expense(2, 0.1, 2), expense(3, 0.1, 3)];

        let settlement = calculate_settlement(&expenses, &users);

        for balance in &settlement.balances {
            assert!(balance.balance.abs() < 1e-9);
            assert_eq!(balance.status(), BalanceStatus::Owed);
            assert_eq!(format_signed_currency(balance.balance), "+$0.00");
        }
    }

    #[test]
    fn debt_below_half_a_cent_is_owed() {
        assert_eq!(balance(1, 0.0, -0.004).status(), BalanceStatus::Owed);
        assert_eq!(balance(1, 0.0, -0.006).status(), BalanceStatus::Owes);
        assert_eq!(format_signed_currency(-0.006), "-$0.01");
    }

    #[test]
    fn no_users() {
        let expenses = [expense(1, 60.0, 1), expense(2, 30.0, 2)];

        let settlement = calculate_settlement(&expenses, &[]);

        assert_eq!(settlement.total_spent, 90.0);
        assert_eq!(settlement.fair_share, 0.0);
        assert!(settlement.balances.is_empty());
    }

    #[test]
    fn sums_multiple_expenses_by_the_same_payer() {
        let users = [user(1), user(2)];
        let expenses = [expense(1, 10.0, 2), expense(2, 15.5, 2), expense(3, 4.5, 1)];

        let settlement = calculate_settlement(&expenses, &users);

        assert_eq!(
            settlement.balances,
            vec![balance(1, 4.5, -10.5), balance(2, 25.5, 10.5)]
        );
    }

    #[test]
    fn unknown_payer_counts_towards_total_only() {
        let users = [user(1), user(2)];
        let expenses = [expense(1, 40.0, 99)];

        let settlement = calculate_settlement(&expenses, &users);

        assert_eq!(settlement.total_spent, 40.0);
        assert_eq!(
            settlement.balances,
            vec![balance(1, 0.0, -20.0), balance(2, 0.0, -20.0)]
        );
    }
}
