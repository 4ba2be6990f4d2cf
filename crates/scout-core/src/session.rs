//! A single Smart Scout session: one field, one season at a time.
//!
//! The [`Session`] owns the field, its scouting mask, the bank, the clock,
//! and the session RNG. The presentation layer (or a scripted strategy)
//! drives it with discrete calls: [`move_to`](Session::move_to),
//! [`launch_drone`](Session::launch_drone), [`advance`](Session::advance),
//! and [`decide`](Session::decide). Every state change is reported through
//! [`drain_events`](Session::drain_events).
//!
//! # Decision flow
//!
//! When the clock stops on a decision point the client asks for a
//! [`DecisionPrompt`], lets the player choose, and calls `decide`. A
//! threshold replant is refused until every cell has been scouted. Once a
//! decision is accepted the remaining cells are revealed, the replant is
//! applied and settled against whole-field averages, the bank is charged,
//! and the drone becomes available again.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use scout_economics::{
    EconomicsError, EconomicsParams, ReplantReport, ThresholdOptimizer, YieldModel,
    apply_decision, settle,
};
use scout_field::{FieldError, FieldGenerator, ObservationTracker};
use scout_types::{CellPos, Decision, Grid, ObservationGrid, SessionId, TileRating};

use crate::bank::{Bank, BankEntryKind, BankError};
use crate::clock::{ClockError, ClockEvent, SeasonClock, SeasonStage};
use crate::config::ScoutConfig;
use crate::events::{EventQueue, SessionEvent};
use crate::score::{HarvestSummary, ScoreBoard, ScoreError, harvest};
use crate::walker::ScoutWalker;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned by session operations.
///
/// A failed operation leaves the session unchanged.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The target cell lies outside the field.
    #[error("cell {pos} is outside the {rows}x{cols} field")]
    OutOfBounds {
        /// The requested cell.
        pos: CellPos,
        /// Field rows.
        rows: usize,
        /// Field columns.
        cols: usize,
    },

    /// The scout cannot step onto the target cell from where it stands.
    #[error("cell {pos} is not reachable from the scout's position")]
    Unreachable {
        /// The requested cell.
        pos: CellPos,
    },

    /// The bank cannot cover an optional purchase.
    #[error("insufficient funds: need ${needed}, have ${balance}")]
    InsufficientFunds {
        /// Purchase price.
        needed: Decimal,
        /// Current balance.
        balance: Decimal,
    },

    /// The drone was already used in this decision window.
    #[error("drone mission already used in this decision window")]
    DroneUnavailable,

    /// `decide` was called while no decision is due.
    #[error("no replant decision is pending")]
    NoDecisionPending,

    /// Scouting was attempted while a decision is pending.
    #[error("a replant decision must be made first")]
    DecisionPending,

    /// The season has already ended.
    #[error("the season is over")]
    SeasonOver,

    /// Field generation or scouting failed.
    #[error("field error: {source}")]
    Field {
        /// The underlying field error.
        #[from]
        source: FieldError,
    },

    /// The replant engine refused the decision.
    #[error("replant error: {source}")]
    Replant {
        /// The underlying economics error.
        #[from]
        source: EconomicsError,
    },

    /// Invalid clock configuration.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// A booking failed.
    #[error("bank error: {source}")]
    Bank {
        /// The underlying bank error.
        source: BankError,
    },

    /// Harvest settlement failed.
    #[error("score error: {source}")]
    Score {
        /// The underlying score error.
        #[from]
        source: ScoreError,
    },
}

impl From<BankError> for SessionError {
    fn from(source: BankError) -> Self {
        match source {
            BankError::InsufficientFunds { needed, balance } => {
                Self::InsufficientFunds { needed, balance }
            }
            BankError::Overflow => Self::Bank { source },
        }
    }
}

// ---------------------------------------------------------------------------
// Views handed to clients
// ---------------------------------------------------------------------------

/// What the player sees when a replant decision is due.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionPrompt {
    /// Threshold offered for a smart replant.
    pub recommended_threshold: f64,
    /// Whether the optimizer found nothing profitable and the configured
    /// fallback threshold is offered instead.
    pub used_fallback: bool,
    /// Whether a smart replant may be chosen (every cell scouted).
    pub smart_replant_available: bool,
    /// Rounded mean of scouted cells, `None` before any scouting.
    pub scouted_average: Option<f64>,
}

/// Read-only view for scripted strategies.
#[derive(Debug, Clone)]
pub struct SessionView<'a> {
    /// Field rows.
    pub rows: usize,
    /// Field columns.
    pub cols: usize,
    /// Scout position, `None` before the first step.
    pub position: Option<CellPos>,
    /// Cells the scout may step onto next.
    pub reachable: Vec<CellPos>,
    /// Scouting mask.
    pub observation: &'a ObservationGrid,
    /// Whether every cell is scouted.
    pub fully_scouted: bool,
    /// Whether a drone mission may be bought in this window.
    pub drone_available: bool,
    /// Drone mission price.
    pub drone_cost: Decimal,
    /// Current bank balance.
    pub balance: Decimal,
    /// Seconds since planting.
    pub elapsed: u32,
}

/// Serializable summary of a session at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Session id.
    pub id: SessionId,
    /// Season number, starting at 1.
    pub season: u32,
    /// Seconds since planting.
    pub elapsed: u32,
    /// Timeline stage.
    pub stage: SeasonStage,
    /// Bank balance.
    pub balance: Decimal,
    /// Current yield estimate, bushels per acre.
    pub estimated_yield: f64,
    /// Number of scouted cells.
    pub scouted: usize,
    /// Scouted cell values; closed cells are `None`.
    pub visible: Vec<Vec<Option<f64>>>,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One field and everything that happens to it.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    season: u32,
    rows: usize,
    cols: usize,
    economics: EconomicsParams,
    model: YieldModel,
    optimizer: ThresholdOptimizer,
    generator: FieldGenerator,
    rng: ChaCha8Rng,
    grid: Grid,
    tracker: ObservationTracker,
    walker: ScoutWalker,
    bank: Bank,
    clock: SeasonClock,
    drone_cost: Decimal,
    drone_available: bool,
    last_estimate: f64,
    events: EventQueue,
    scores: ScoreBoard,
    harvest: Option<HarvestSummary>,
}

impl Session {
    /// Start a session seeded from `config.session.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if any configured parameter is invalid.
    pub fn new(config: &ScoutConfig) -> Result<Self, SessionError> {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(config.session.seed))
    }

    /// Start a session drawing from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if any configured parameter is invalid.
    pub fn with_rng(config: &ScoutConfig, mut rng: ChaCha8Rng) -> Result<Self, SessionError> {
        config.economics.validate()?;
        let generator = FieldGenerator::new(config.field.clone())?;
        let s = &config.session;
        let clock = SeasonClock::new(s.season_length_secs, s.decision_interval_secs)?;
        let grid = generator.generate_field(s.rows, s.cols, &mut rng)?;
        let model = config.economics.yield_model();

        let session = Self {
            id: SessionId::new(),
            season: 1,
            rows: s.rows,
            cols: s.cols,
            economics: config.economics.clone(),
            model,
            optimizer: config.economics.optimizer(),
            generator,
            rng,
            tracker: ObservationTracker::for_grid(&grid),
            walker: ScoutWalker::new(s.rows, s.cols),
            grid,
            bank: Bank::new(Decimal::from(s.starting_bank)),
            clock,
            drone_cost: Decimal::from(s.drone_mission_cost),
            drone_available: true,
            last_estimate: model.reference_yield.round(),
            events: EventQueue::new(),
            scores: ScoreBoard::new(),
            harvest: None,
        };
        info!(
            session_id = %session.id,
            rows = session.rows,
            cols = session.cols,
            seed = s.seed,
            "Session started"
        );
        Ok(session)
    }

    // -- Read-only accessors ------------------------------------------------

    /// Session id.
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Season number, starting at 1 and incremented by each restart.
    pub const fn season(&self) -> u32 {
        self.season
    }

    /// The field. Clients must only reveal values of scouted cells.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The scouting mask.
    pub const fn observation(&self) -> &ObservationGrid {
        self.tracker.grid()
    }

    /// The bank account.
    pub const fn bank(&self) -> &Bank {
        &self.bank
    }

    /// The season clock.
    pub const fn clock(&self) -> &SeasonClock {
        &self.clock
    }

    /// Best scores across seasons.
    pub const fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    /// Economic parameters in force.
    pub const fn economics(&self) -> &EconomicsParams {
        &self.economics
    }

    /// Harvest of the current season, once it is over.
    pub const fn harvest_summary(&self) -> Option<&HarvestSummary> {
        self.harvest.as_ref()
    }

    /// Scout position, `None` before the first step.
    pub const fn scout_position(&self) -> Option<CellPos> {
        self.walker.position()
    }

    /// Cells the scout may step onto next.
    pub fn reachable_cells(&self) -> Vec<CellPos> {
        self.walker.reachable_cells()
    }

    /// Whether a drone mission may be bought in this decision window.
    pub const fn drone_available(&self) -> bool {
        self.drone_available
    }

    /// Mean stand count of scouted cells, `None` before any scouting.
    pub fn average_of_opened(&self) -> Option<f64> {
        self.tracker.average_of_opened(&self.grid)
    }

    /// Projected yield from scouted cells, or the reference yield when
    /// nothing has been scouted.
    pub fn estimated_yield(&self) -> f64 {
        self.average_of_opened().map_or(self.model.reference_yield, |avg| {
            self.model.yield_from_stand_count(avg)
        })
    }

    /// Read-only view for strategies.
    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            rows: self.rows,
            cols: self.cols,
            position: self.walker.position(),
            reachable: self.walker.reachable_cells(),
            observation: self.tracker.grid(),
            fully_scouted: self.tracker.is_fully_opened(),
            drone_available: self.drone_available,
            drone_cost: self.drone_cost,
            balance: self.bank.balance(),
            elapsed: self.clock.elapsed(),
        }
    }

    /// Serializable summary of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let visible = self
            .grid
            .to_rows()
            .into_iter()
            .enumerate()
            .map(|(row, values)| {
                values
                    .into_iter()
                    .enumerate()
                    .map(|(col, v)| self.tracker.is_open(CellPos::new(row, col)).then_some(v))
                    .collect()
            })
            .collect();
        SessionSnapshot {
            id: self.id,
            season: self.season,
            elapsed: self.clock.elapsed(),
            stage: self.clock.stage(),
            balance: self.bank.balance(),
            estimated_yield: self.estimated_yield(),
            scouted: self.tracker.opened_count(),
            visible,
        }
    }

    /// Take every pending event, oldest first.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain()
    }

    // -- Scouting -----------------------------------------------------------

    /// Walk the scout onto `pos` and scout it.
    ///
    /// Returns `true` if the cell was newly scouted. Stepping onto an
    /// already scouted cell only moves the scout.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::OutOfBounds`] or [`SessionError::Unreachable`]
    /// for illegal steps, and [`SessionError::DecisionPending`] or
    /// [`SessionError::SeasonOver`] when scouting is closed.
    pub fn move_to(&mut self, pos: CellPos) -> Result<bool, SessionError> {
        self.ensure_scouting_open()?;
        if !self.walker.in_bounds(pos) {
            return Err(SessionError::OutOfBounds {
                pos,
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !self.walker.step(pos) {
            return Err(SessionError::Unreachable { pos });
        }
        self.reveal(pos)
    }

    /// Buy a drone mission that scouts every remaining cell.
    ///
    /// The drone sweeps columns right to left and each column top to
    /// bottom. Returns the newly scouted cells in sweep order.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::DroneUnavailable`] if the drone was already
    /// used in this window and [`SessionError::InsufficientFunds`] if the
    /// bank cannot pay for it.
    pub fn launch_drone(&mut self) -> Result<Vec<CellPos>, SessionError> {
        self.ensure_scouting_open()?;
        if !self.drone_available {
            return Err(SessionError::DroneUnavailable);
        }
        let balance = self
            .bank
            .purchase(BankEntryKind::DroneMission, self.drone_cost)?;
        self.drone_available = false;
        self.events.push(SessionEvent::BankChanged {
            balance,
            delta: Decimal::ZERO.saturating_sub(self.drone_cost),
        });

        let mut opened = Vec::new();
        for col in (0..self.cols).rev() {
            for row in 0..self.rows {
                let pos = CellPos::new(row, col);
                if self.reveal(pos)? {
                    opened.push(pos);
                }
            }
        }
        info!(
            session_id = %self.id,
            opened = opened.len(),
            %balance,
            "Drone mission flown"
        );
        Ok(opened)
    }

    // -- Time ---------------------------------------------------------------

    /// Advance the clock by up to `secs` seconds.
    ///
    /// Reaching the end of the season settles the harvest and records the
    /// score; later calls keep returning [`ClockEvent::SeasonOver`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the harvest cannot be settled.
    pub fn advance(&mut self, secs: u32) -> Result<ClockEvent, SessionError> {
        let was_pending = self.clock.is_decision_pending();
        let event = self.clock.advance(secs);
        match event {
            ClockEvent::DecisionDue if !was_pending => {
                let elapsed = self.clock.elapsed();
                debug!(session_id = %self.id, elapsed, "Decision due");
                self.events.push(SessionEvent::DecisionDue { elapsed });
            }
            ClockEvent::SeasonOver if self.harvest.is_none() => self.finish_season()?,
            ClockEvent::Running | ClockEvent::DecisionDue | ClockEvent::SeasonOver => {}
        }
        Ok(event)
    }

    // -- Decisions ----------------------------------------------------------

    /// The optimizer's recommendation for the current field.
    ///
    /// The optimizer sees the whole field, as a final walk-through would.
    /// When nothing is profitable the configured fallback threshold is
    /// offered instead.
    pub fn decision_prompt(&self) -> DecisionPrompt {
        let recommended = self.optimizer.calculate_smart_threshold(
            &self.grid,
            self.economics.target_stand_after_replant,
            self.economics.price_per_bushel,
        );
        let used_fallback = recommended.is_none();
        if used_fallback {
            warn!(
                session_id = %self.id,
                fallback = self.economics.fallback_threshold,
                "No profitable replant threshold, offering fallback"
            );
        }
        DecisionPrompt {
            recommended_threshold: recommended.unwrap_or(self.economics.fallback_threshold),
            used_fallback,
            smart_replant_available: self.tracker.is_fully_opened(),
            scouted_average: self.average_of_opened().map(f64::round),
        }
    }

    /// Resolve the pending decision.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoDecisionPending`] outside a decision point
    /// and [`SessionError::Replant`] if a threshold replant is chosen
    /// before the field is fully scouted. The session is unchanged on error.
    pub fn decide(&mut self, decision: Decision) -> Result<ReplantReport, SessionError> {
        if !self.clock.is_decision_pending() {
            return Err(SessionError::NoDecisionPending);
        }
        if let Decision::ThresholdReplant { threshold } = decision {
            if !threshold.is_finite() {
                return Err(EconomicsError::InvalidThreshold(threshold).into());
            }
            if !self.tracker.is_fully_opened() {
                return Err(EconomicsError::FieldNotFullyScouted {
                    closed: self.tracker.grid().closed_count(),
                }
                .into());
            }
        }

        // End-of-window walk-through.
        let closed: Vec<CellPos> = self.tracker.grid().closed_positions().collect();
        let mut walked: usize = 0;
        for pos in closed {
            if self.reveal(pos)? {
                walked = walked.saturating_add(1);
            }
        }

        let avg_before = self.grid.mean().unwrap_or(0.0);
        let outcome = apply_decision(
            &mut self.grid,
            self.tracker.grid(),
            decision,
            &self.generator,
            &self.model,
            &mut self.rng,
        )?;
        let avg_after = self.grid.mean().unwrap_or(0.0);
        let result = settle(
            avg_before,
            avg_after,
            self.grid.len(),
            &outcome,
            self.economics.price_per_bushel,
            &self.model,
        );

        if outcome.cost > 0 {
            let cost = Decimal::from(outcome.cost);
            let balance = self.bank.charge(BankEntryKind::Replant, cost)?;
            self.events.push(SessionEvent::BankChanged {
                balance,
                delta: Decimal::ZERO.saturating_sub(cost),
            });
        }
        for change in &outcome.changes {
            self.events.push(SessionEvent::CellReplanted(*change));
        }
        self.events.push(SessionEvent::DecisionResolved { decision, result });
        self.push_estimate_if_changed();

        self.drone_available = true;
        self.clock.resolve_decision();
        info!(
            session_id = %self.id,
            decision = decision.label(),
            walked,
            acres = result.acres_affected,
            cost = result.cost,
            net_benefit = result.net_benefit,
            "Decision resolved"
        );
        Ok(ReplantReport::new(result, self.economics.price_per_bushel))
    }

    // -- Lifecycle ----------------------------------------------------------

    /// Start a new season on a freshly generated field.
    ///
    /// The best score survives; everything else starts over.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Field`] if the field cannot be generated.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.grid = self
            .generator
            .generate_field(self.rows, self.cols, &mut self.rng)?;
        self.tracker.reset(&self.grid);
        self.walker.reset();
        self.bank.reset();
        self.clock.reset();
        self.drone_available = true;
        self.last_estimate = self.model.reference_yield.round();
        self.events.clear();
        self.harvest = None;
        self.season = self.season.saturating_add(1);
        info!(session_id = %self.id, season = self.season, "Session restarted");
        Ok(())
    }

    // -- Internals ----------------------------------------------------------

    fn ensure_scouting_open(&self) -> Result<(), SessionError> {
        if self.clock.is_season_over() {
            return Err(SessionError::SeasonOver);
        }
        if self.clock.is_decision_pending() {
            return Err(SessionError::DecisionPending);
        }
        Ok(())
    }

    /// Scout `pos` and queue the resulting events.
    fn reveal(&mut self, pos: CellPos) -> Result<bool, SessionError> {
        let newly_opened = self.tracker.open_cell(pos)?;
        if !newly_opened {
            return Ok(false);
        }
        let stand_count = self.grid.get(pos).ok_or(SessionError::OutOfBounds {
            pos,
            rows: self.rows,
            cols: self.cols,
        })?;
        self.events.push(SessionEvent::CellOpened {
            pos,
            stand_count,
            rating: TileRating::from_stand_count(stand_count),
        });
        self.push_estimate_if_changed();
        if self.tracker.is_fully_opened() {
            self.events.push(SessionEvent::FieldFullyScouted);
        }
        Ok(true)
    }

    fn push_estimate_if_changed(&mut self) {
        let estimate = self.estimated_yield().round();
        if (estimate - self.last_estimate).abs() >= 0.5 {
            self.last_estimate = estimate;
            self.events.push(SessionEvent::EstimatedYieldChanged {
                bushels_per_acre: estimate,
            });
        }
    }

    fn finish_season(&mut self) -> Result<(), SessionError> {
        let summary = harvest(
            &self.grid,
            &self.model,
            self.economics.price_per_bushel,
            self.bank.balance(),
        )?;
        let balance = self.bank.deposit(BankEntryKind::HarvestSale, summary.sale)?;
        self.events.push(SessionEvent::BankChanged {
            balance,
            delta: summary.sale,
        });
        let new_record = self.scores.record(summary.score);
        self.events.push(SessionEvent::SeasonOver {
            score: summary.score,
            new_record,
        });
        info!(
            session_id = %self.id,
            season = self.season,
            average_stand = summary.average_stand_count,
            average_yield = summary.average_yield,
            score = %summary.score,
            new_record,
            "Season over"
        );
        self.harvest = Some(summary);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(&ScoutConfig::default()).unwrap()
    }

    #[test]
    fn new_session_is_unscouted() {
        let session = session();
        assert_eq!(session.grid().len(), 70);
        assert_eq!(session.observation().open_count(), 0);
        assert_eq!(session.average_of_opened(), None);
        assert_eq!(session.estimated_yield(), 175.0);
        assert_eq!(session.bank().balance(), Decimal::from(100_000));
        assert_eq!(session.reachable_cells().len(), 10);
    }

    #[test]
    fn same_seed_same_field() {
        assert_eq!(session().grid(), session().grid());
    }

    #[test]
    fn walking_scouts_cells() {
        let mut session = session();
        assert!(session.move_to(CellPos::new(6, 4)).unwrap());
        assert!(session.move_to(CellPos::new(5, 4)).unwrap());
        assert!(!session.move_to(CellPos::new(6, 4)).unwrap());
        assert_eq!(session.observation().open_count(), 2);

        let events = session.drain_events();
        let opened = events
            .iter()
            .filter(|e| matches!(e, SessionEvent::CellOpened { .. }))
            .count();
        assert_eq!(opened, 2);
    }

    #[test]
    fn illegal_steps_are_rejected() {
        let mut session = session();
        assert!(matches!(
            session.move_to(CellPos::new(3, 3)),
            Err(SessionError::Unreachable { .. })
        ));
        assert!(matches!(
            session.move_to(CellPos::new(7, 0)),
            Err(SessionError::OutOfBounds { rows: 7, cols: 10, .. })
        ));
        assert_eq!(session.observation().open_count(), 0);
    }

    #[test]
    fn drone_sweeps_right_to_left_once_per_window() {
        let mut session = session();
        let opened = session.launch_drone().unwrap();
        assert_eq!(opened.len(), 70);
        assert_eq!(opened.first(), Some(&CellPos::new(0, 9)));
        assert_eq!(opened.get(1), Some(&CellPos::new(1, 9)));
        assert_eq!(opened.last(), Some(&CellPos::new(6, 0)));
        assert_eq!(session.bank().balance(), Decimal::from(99_840));
        assert!(matches!(
            session.launch_drone(),
            Err(SessionError::DroneUnavailable)
        ));
    }

    #[test]
    fn decide_requires_a_pending_decision() {
        let mut session = session();
        assert!(matches!(
            session.decide(Decision::DoNotReplant),
            Err(SessionError::NoDecisionPending)
        ));
    }

    #[test]
    fn scouting_is_closed_while_deciding() {
        let mut session = session();
        assert_eq!(session.advance(30).unwrap(), ClockEvent::DecisionDue);
        assert!(matches!(
            session.move_to(CellPos::new(6, 0)),
            Err(SessionError::DecisionPending)
        ));
        let _ = session.decide(Decision::DoNotReplant).unwrap();
        // The decision revealed the rest of the field.
        assert!(session.observation().is_fully_open());
        assert!(!session.move_to(CellPos::new(6, 0)).unwrap());
    }

    #[test]
    fn decision_walks_the_rest_of_the_field_and_resumes_the_clock() {
        let mut session = session();
        assert!(session.move_to(CellPos::new(6, 4)).unwrap());
        assert_eq!(session.advance(30).unwrap(), ClockEvent::DecisionDue);
        let _ = session.drain_events();

        let report = session.decide(Decision::DoNotReplant).unwrap();
        assert_eq!(report.result.acres_affected, 0);
        assert!(!session.clock().is_decision_pending());

        let events = session.drain_events();
        let opened = events
            .iter()
            .filter(|e| matches!(e, SessionEvent::CellOpened { .. }))
            .count();
        assert_eq!(opened, 69);
        let fully = events
            .iter()
            .filter(|e| matches!(e, SessionEvent::FieldFullyScouted))
            .count();
        assert_eq!(fully, 1);

        assert!(matches!(
            session.decide(Decision::DoNotReplant),
            Err(SessionError::NoDecisionPending)
        ));
        assert_eq!(session.advance(1).unwrap(), ClockEvent::Running);
    }

    #[test]
    fn prompt_reports_scouting_state() {
        let mut session = session();
        let prompt = session.decision_prompt();
        assert!(!prompt.smart_replant_available);
        assert_eq!(prompt.scouted_average, None);
        let _ = session.launch_drone().unwrap();
        let prompt = session.decision_prompt();
        assert!(prompt.smart_replant_available);
        assert_eq!(
            prompt.scouted_average,
            Some(session.grid().mean().unwrap().round())
        );
    }
}
