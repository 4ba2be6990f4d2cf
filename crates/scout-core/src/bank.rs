//! The farm's bank account: an append-only record of every charge and sale.
//!
//! All amounts are [`Decimal`] dollars. Optional purchases are refused when
//! the balance cannot cover them. Replant charges and harvest sales are
//! always booked, so the balance may go negative after a replant.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors raised by the bank.
#[derive(Debug, thiserror::Error)]
pub enum BankError {
    /// The balance does not cover an optional purchase.
    #[error("insufficient funds: need ${needed}, have ${balance}")]
    InsufficientFunds {
        /// Purchase price.
        needed: Decimal,
        /// Current balance.
        balance: Decimal,
    },

    /// A booking would overflow the balance.
    #[error("bank balance overflow")]
    Overflow,
}

/// What a bank entry was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankEntryKind {
    /// A drone scouting mission.
    DroneMission,
    /// Replanting acres after a decision.
    Replant,
    /// Selling the harvest.
    HarvestSale,
}

/// One booking. Charges are negative, sales positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankEntry {
    /// What the booking was for.
    pub kind: BankEntryKind,
    /// Signed amount.
    pub amount: Decimal,
}

/// The farm's bank account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    starting_balance: Decimal,
    balance: Decimal,
    entries: Vec<BankEntry>,
}

impl Bank {
    /// Open an account holding `starting_balance`.
    pub const fn new(starting_balance: Decimal) -> Self {
        Self {
            starting_balance,
            balance: starting_balance,
            entries: Vec::new(),
        }
    }

    /// Current balance.
    pub const fn balance(&self) -> Decimal {
        self.balance
    }

    /// Every booking, oldest first.
    pub fn entries(&self) -> &[BankEntry] {
        &self.entries
    }

    /// Total spent on entries of `kind` (positive for charges).
    pub fn total_spent(&self, kind: BankEntryKind) -> Decimal {
        self.entries
            .iter()
            .filter(|e| e.kind == kind)
            .fold(Decimal::ZERO, |acc, e| acc.saturating_sub(e.amount))
    }

    /// Pay for an optional purchase, refusing if the balance is short.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::InsufficientFunds`] if `price` exceeds the
    /// balance; nothing is booked in that case.
    pub fn purchase(&mut self, kind: BankEntryKind, price: Decimal) -> Result<Decimal, BankError> {
        if price > self.balance {
            return Err(BankError::InsufficientFunds {
                needed: price,
                balance: self.balance,
            });
        }
        self.book(kind, negate(price)?)
    }

    /// Book a mandatory charge. The balance may go negative.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::Overflow`] if the balance would overflow.
    pub fn charge(&mut self, kind: BankEntryKind, amount: Decimal) -> Result<Decimal, BankError> {
        self.book(kind, negate(amount)?)
    }

    /// Book income.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::Overflow`] if the balance would overflow.
    pub fn deposit(&mut self, kind: BankEntryKind, amount: Decimal) -> Result<Decimal, BankError> {
        self.book(kind, amount)
    }

    /// Close the account and reopen it at the starting balance.
    pub fn reset(&mut self) {
        self.balance = self.starting_balance;
        self.entries.clear();
    }

    fn book(&mut self, kind: BankEntryKind, amount: Decimal) -> Result<Decimal, BankError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(BankError::Overflow)?;
        self.entries.push(BankEntry { kind, amount });
        Ok(self.balance)
    }
}

fn negate(amount: Decimal) -> Result<Decimal, BankError> {
    Decimal::ZERO.checked_sub(amount).ok_or(BankError::Overflow)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn purchase_within_balance() {
        let mut bank = Bank::new(Decimal::from(100_000));
        let left = bank
            .purchase(BankEntryKind::DroneMission, Decimal::from(160))
            .unwrap();
        assert_eq!(left, Decimal::from(99_840));
        assert_eq!(bank.entries().len(), 1);
        assert_eq!(bank.total_spent(BankEntryKind::DroneMission), Decimal::from(160));
    }

    #[test]
    fn purchase_refused_when_short() {
        let mut bank = Bank::new(Decimal::from(100));
        let err = bank
            .purchase(BankEntryKind::DroneMission, Decimal::from(160))
            .unwrap_err();
        assert!(matches!(err, BankError::InsufficientFunds { .. }));
        assert_eq!(bank.balance(), Decimal::from(100));
        assert!(bank.entries().is_empty());
    }

    #[test]
    fn exact_balance_is_enough() {
        let mut bank = Bank::new(Decimal::from(160));
        assert_eq!(
            bank.purchase(BankEntryKind::DroneMission, Decimal::from(160)).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn replant_charge_may_overdraw() {
        let mut bank = Bank::new(Decimal::from(1_000));
        let left = bank
            .charge(BankEntryKind::Replant, Decimal::from(8_750))
            .unwrap();
        assert_eq!(left, Decimal::from(-7_750));
    }

    #[test]
    fn reset_restores_starting_balance() {
        let mut bank = Bank::new(Decimal::from(500));
        bank.deposit(BankEntryKind::HarvestSale, Decimal::from(49_000)).unwrap();
        bank.reset();
        assert_eq!(bank.balance(), Decimal::from(500));
        assert!(bank.entries().is_empty());
    }
}
