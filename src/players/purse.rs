use super::spot::Spot;
use crate::Chips;

/// A player's bankroll and the three ways of answering a bet.
///
/// Calls and raises are capped at the remaining balance. The answer is the
/// player's new total bid for the phase, or none for a fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Purse {
    balance: Chips,
}

impl Purse {
    pub fn new(balance: Chips) -> Self {
        Self { balance }
    }
    pub fn balance(&self) -> Chips {
        self.balance
    }

    pub fn pay(&mut self, amount: Chips) -> anyhow::Result<()> {
        anyhow::ensure!(amount >= 0, "cannot pay a negative amount {}", amount);
        anyhow::ensure!(
            amount <= self.balance,
            "amount {} exceeds balance {}",
            amount,
            self.balance
        );
        self.balance -= amount;
        Ok(())
    }
    pub fn win(&mut self, pot: Chips) {
        self.balance += pot;
    }

    pub fn call_bet(&mut self, spot: &Spot) -> anyhow::Result<Option<Chips>> {
        self.commit(spot, spot.call)
    }
    pub fn raise_bet(&mut self, spot: &Spot, raise: Chips) -> anyhow::Result<Option<Chips>> {
        anyhow::ensure!(raise >= 0, "cannot raise by a negative amount {}", raise);
        self.commit(spot, spot.call + raise)
    }
    pub fn fold_bet(&self) -> Option<Chips> {
        None
    }

    fn commit(&mut self, spot: &Spot, amount: Chips) -> anyhow::Result<Option<Chips>> {
        let amount = amount.min(self.balance);
        self.pay(amount)?;
        Ok(Some(spot.bid + amount))
    }
}

impl std::fmt::Display for Purse {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "${}", self.balance)
    }
}
