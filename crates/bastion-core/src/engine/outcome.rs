//! Loss conditions.

use bastion_types::GameOverCause;

use crate::config::OutcomeConfig;
use crate::state::GameState;

/// The highest-priority loss that applies to `state`, if any.
///
/// Priority: Keep breached, revolt, total collapse, pandemic collapse.
pub fn loss_cause(config: &OutcomeConfig, state: &GameState) -> Option<GameOverCause> {
    if state.perimeter.keep_breached() {
        return Some(GameOverCause::KeepBreached);
    }
    if state.stats.unrest() >= config.revolt_unrest {
        return Some(GameOverCause::Revolt);
    }
    if state.tracking.both_empty_days >= config.collapse_days {
        return Some(GameOverCause::TotalCollapse);
    }
    if state.stats.sickness() >= config.pandemic_sickness && state.population.sick() > state.population.healthy() {
        return Some(GameOverCause::PandemicCollapse);
    }
    None
}
