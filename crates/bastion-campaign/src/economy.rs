//! Essence ledger and cost tables.
//!
//! The ledger is the only way to move essence. Its balance is unsigned and
//! every debit is checked, so it can never go negative.

use serde::{Deserialize, Serialize};

use bastion_core::constants::*;
use bastion_core::error::{ActionError, ActionResult};

/// Spendable essence balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    balance: u32,
}

impl Ledger {
    pub fn new(balance: u32) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    pub fn can_afford(&self, amount: u32) -> bool {
        self.balance >= amount
    }

    /// Debit `amount` if the balance covers it. Returns whether the debit happened.
    pub fn spend(&mut self, amount: u32) -> bool {
        if self.can_afford(amount) {
            self.balance -= amount;
            true
        } else {
            false
        }
    }

    /// Like `spend`, but reports the shortfall.
    pub fn try_spend(&mut self, amount: u32) -> ActionResult<()> {
        if self.spend(amount) {
            Ok(())
        } else {
            Err(ActionError::InsufficientEssence {
                needed: amount,
                available: self.balance,
            })
        }
    }

    pub fn grant(&mut self, amount: u32) {
        self.balance = self.balance.saturating_add(amount);
    }
}

/// Purchase prices for player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostTable {
    pub tower: u32,
    pub ally: u32,
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            tower: TOWER_COST,
            ally: ALLY_COST,
        }
    }
}

/// Essence needed to upgrade a tower to `target_level`.
/// Returns None for levels that cannot be upgraded into.
pub fn tower_upgrade_cost(target_level: u32) -> Option<u32> {
    TOWER_UPGRADE_COSTS
        .iter()
        .find(|(level, _)| *level == target_level)
        .map(|(_, cost)| *cost)
}

/// Essence needed to repair a tower of the given level.
pub fn tower_repair_cost(level: u32) -> u32 {
    TOWER_REPAIR_BASE_COST + TOWER_REPAIR_COST_PER_LEVEL * level
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn spend_exact_balance_empties_ledger() {
        let mut ledger = Ledger::new(50);
        assert!(ledger.spend(50));
        assert_eq!(ledger.balance(), 0);
        assert!(!ledger.spend(1));
        assert_eq!(ledger.balance(), 0);
    }

    #[test]
    fn try_spend_reports_shortfall() {
        let mut ledger = Ledger::new(30);
        assert_eq!(
            ledger.try_spend(50),
            Err(ActionError::InsufficientEssence {
                needed: 50,
                available: 30
            })
        );
        assert_eq!(ledger.balance(), 30);
    }

    #[test]
    fn grant_saturates() {
        let mut ledger = Ledger::new(u32::MAX - 1);
        ledger.grant(10);
        assert_eq!(ledger.balance(), u32::MAX);
    }

    #[test]
    fn upgrade_costs_follow_table() {
        assert_eq!(tower_upgrade_cost(1), None);
        assert_eq!(tower_upgrade_cost(2), Some(75));
        assert_eq!(tower_upgrade_cost(3), Some(100));
        assert_eq!(tower_upgrade_cost(4), Some(150));
        assert_eq!(tower_upgrade_cost(5), Some(200));
        assert_eq!(tower_upgrade_cost(TOWER_MAX_LEVEL + 1), None);
    }

    #[test]
    fn repair_cost_grows_with_level() {
        assert_eq!(tower_repair_cost(1), 35);
        assert_eq!(tower_repair_cost(5), 75);
    }

    #[test]
    fn default_costs() {
        let costs = CostTable::default();
        assert_eq!(costs.tower, 50);
        assert_eq!(costs.ally, 75);
    }

    proptest! {
        #[test]
        fn spend_succeeds_iff_affordable(balance in 0u32..10_000, amount in 0u32..10_000) {
            let mut ledger = Ledger::new(balance);
            let ok = ledger.spend(amount);
            prop_assert_eq!(ok, balance >= amount);
            if ok {
                prop_assert_eq!(ledger.balance(), balance - amount);
            } else {
                prop_assert_eq!(ledger.balance(), balance);
            }
        }
    }
}
