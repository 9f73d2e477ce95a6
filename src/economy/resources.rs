use crate::core::constants::{STARTING_CONSUMABLES, STARTING_CURRENCY, STARTING_RARE_CURRENCY};
use crate::core::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three ledger counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    #[serde(alias = "gold")]
    Currency,
    #[serde(alias = "spiritStone")]
    RareCurrency,
    #[serde(alias = "pills")]
    Consumables,
}

impl ResourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Currency => "金币",
            ResourceKind::RareCurrency => "灵石",
            ResourceKind::Consumables => "丹药",
        }
    }

    /// Accepts both the current keys and the ones older saves used.
    pub fn from_key(key: &str) -> Option<ResourceKind> {
        match key {
            "currency" | "gold" => Some(ResourceKind::Currency),
            "rareCurrency" | "spiritStone" => Some(ResourceKind::RareCurrency),
            "consumables" | "pills" => Some(ResourceKind::Consumables),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ResourceKind::Currency => "currency",
            ResourceKind::RareCurrency => "rareCurrency",
            ResourceKind::Consumables => "consumables",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resource ledger. Balances are unsigned; every debit is checked first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resources {
    #[serde(alias = "gold", default)]
    pub currency: u64,
    #[serde(alias = "spiritStone", default)]
    pub rare_currency: u64,
    #[serde(alias = "pills", default)]
    pub consumables: u64,
}

impl Default for Resources {
    fn default() -> Self {
        Self::starting()
    }
}

impl Resources {
    pub fn starting() -> Self {
        Self {
            currency: STARTING_CURRENCY,
            rare_currency: STARTING_RARE_CURRENCY,
            consumables: STARTING_CONSUMABLES,
        }
    }

    pub fn empty() -> Self {
        Self {
            currency: 0,
            rare_currency: 0,
            consumables: 0,
        }
    }

    pub fn get(&self, kind: ResourceKind) -> u64 {
        match kind {
            ResourceKind::Currency => self.currency,
            ResourceKind::RareCurrency => self.rare_currency,
            ResourceKind::Consumables => self.consumables,
        }
    }

    fn slot_mut(&mut self, kind: ResourceKind) -> &mut u64 {
        match kind {
            ResourceKind::Currency => &mut self.currency,
            ResourceKind::RareCurrency => &mut self.rare_currency,
            ResourceKind::Consumables => &mut self.consumables,
        }
    }

    pub fn add(&mut self, kind: ResourceKind, amount: u64) {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(amount);
    }

    pub fn can_afford(&self, kind: ResourceKind, amount: u64) -> bool {
        self.get(kind) >= amount
    }

    /// Debit `amount`, or fail without touching the balance.
    pub fn spend(&mut self, kind: ResourceKind, amount: u64) -> Result<(), GameError> {
        let available = self.get(kind);
        if available < amount {
            return Err(GameError::InsufficientResources {
                resource: kind,
                required: amount,
                available,
            });
        }
        *self.slot_mut(kind) = available - amount;
        Ok(())
    }

    /// Debit several balances at once; all are checked before any is changed.
    pub fn spend_all(&mut self, costs: &[(ResourceKind, u64)]) -> Result<(), GameError> {
        for &(kind, amount) in costs {
            let available = self.get(kind);
            if available < amount {
                return Err(GameError::InsufficientResources {
                    resource: kind,
                    required: amount,
                    available,
                });
            }
        }
        for &(kind, amount) in costs {
            self.spend(kind, amount)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_balances() {
        let r = Resources::starting();
        assert_eq!(r.currency, 100);
        assert_eq!(r.rare_currency, 10);
        assert_eq!(r.consumables, 5);
    }

    #[test]
    fn test_spend_rejects_overdraft_without_change() {
        let mut r = Resources::starting();
        let err = r.spend(ResourceKind::Currency, 101).unwrap_err();
        assert!(matches!(
            err,
            GameError::InsufficientResources {
                resource: ResourceKind::Currency,
                required: 101,
                available: 100
            }
        ));
        assert_eq!(r, Resources::starting());
    }

    #[test]
    fn test_spend_exact_balance() {
        let mut r = Resources::starting();
        r.spend(ResourceKind::Consumables, 5).unwrap();
        assert_eq!(r.consumables, 0);
    }

    #[test]
    fn test_spend_all_is_all_or_nothing() {
        let mut r = Resources::starting();
        let result = r.spend_all(&[
            (ResourceKind::Currency, 50),
            (ResourceKind::RareCurrency, 11),
        ]);
        assert!(result.is_err());
        assert_eq!(r, Resources::starting());

        r.spend_all(&[(ResourceKind::Currency, 50), (ResourceKind::RareCurrency, 10)])
            .unwrap();
        assert_eq!(r.currency, 50);
        assert_eq!(r.rare_currency, 0);
    }

    #[test]
    fn test_legacy_resource_keys() {
        let r: Resources =
            serde_json::from_str(r#"{"gold": 7, "spiritStone": 3, "pills": 2}"#).unwrap();
        assert_eq!(r.currency, 7);
        assert_eq!(r.rare_currency, 3);
        assert_eq!(r.consumables, 2);
        assert_eq!(ResourceKind::from_key("spiritStone"), Some(ResourceKind::RareCurrency));
        assert_eq!(ResourceKind::from_key("gold"), Some(ResourceKind::Currency));
        assert_eq!(ResourceKind::from_key("silver"), None);
    }
}
