use super::spot::Spot;
use crate::Chips;
use crate::betting::action::Action;
use crate::betting::seat::Seat;
use crate::betting::seating::Seating;

/// An agent at a limit table.
///
/// The game driver announces the seating at the start of every hand and
/// reports every action taken, the player's own included, before asking
/// the next seat to act.
pub trait Player {
    /// the player's new total bid for the phase, or none to fold
    fn make_bet(&mut self, spot: &Spot) -> anyhow::Result<Option<Chips>>;
    fn begin(&mut self, _seating: &Seating) {}
    fn observe(&mut self, _seat: Seat, _action: Action) {}
}
