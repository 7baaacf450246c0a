use crate::belief::BeliefState;
use crate::board::{Board, Position};
use crate::game::accusation::{Verdict, validate};
use crate::game::disproval::{DisprovalOutcome, find_disprover, tie_break};
use crate::game::error::GameError;
use crate::game::phase::{GameOutcome, Phase, Resolution, RollOutcome};
use crate::game::replay::DriverInput;
use crate::game::rules::{AccusationRule, GameRules};
use crate::game::setup::{Deal, deal_with_rng};
use crate::game::view::SeatView;
use crate::model::assumption::{Assumption, Theory};
use crate::model::card::{Card, Room, Suspect, Weapon};
use crate::model::participant::{BehaviorMode, Participant, ParticipantConfig};
use crate::model::seat::{MAX_SEATS, MIN_SEATS, Seat, SeatRing};
use core::fmt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::{Level, event};

/// Observer for dice results, e.g. a view that animates the roll. It runs
/// after the state has already moved on and cannot influence it.
pub type RollAnnouncer = Arc<dyn Fn(&RollOutcome) + Send + Sync>;

const DIE_FACES: u8 = 6;

/// The authoritative game: one value owning the table, the hidden solution,
/// every automated seat's belief and the current phase.
#[derive(Clone)]
pub struct GameState {
    seed: u64,
    rules: GameRules,
    board: Board,
    configs: Vec<ParticipantConfig>,
    participants: Vec<Participant>,
    ring: SeatRing,
    solution: Theory,
    fixture: Option<Deal>,
    beliefs: Vec<Option<BeliefState>>,
    rng: StdRng,
    phase: Phase,
    turn: u32,
    current: Option<Seat>,
    inputs: Vec<DriverInput>,
    transitions: Vec<Phase>,
    announcer: Option<RollAnnouncer>,
}

impl GameState {
    pub fn new(configs: Vec<ParticipantConfig>, seed: u64) -> Result<Self, GameError> {
        Self::with_rules(configs, seed, GameRules::default())
    }

    /// Deals from a generator seeded with `seed`; the same generator then
    /// produces every movement roll.
    pub fn with_rules(
        configs: Vec<ParticipantConfig>,
        seed: u64,
        rules: GameRules,
    ) -> Result<Self, GameError> {
        check_participant_count(configs.len())?;
        let mut rng = StdRng::seed_from_u64(seed);
        let deal = deal_with_rng(configs.len(), &mut rng)?;
        Ok(Self::assemble(configs, deal, None, rng, seed, rules))
    }

    /// Starts from a fixed deal. `seed` only drives movement rolls.
    pub fn from_deal(
        configs: Vec<ParticipantConfig>,
        deal: Deal,
        seed: u64,
        rules: GameRules,
    ) -> Result<Self, GameError> {
        check_participant_count(configs.len())?;
        if deal.participant_count() != configs.len() {
            return Err(GameError::InvalidDeal(format!(
                "{} hands dealt for {} participants",
                deal.participant_count(),
                configs.len()
            )));
        }
        let rng = StdRng::seed_from_u64(seed);
        let fixture = Some(deal.clone());
        Ok(Self::assemble(configs, deal, fixture, rng, seed, rules))
    }

    fn assemble(
        configs: Vec<ParticipantConfig>,
        deal: Deal,
        fixture: Option<Deal>,
        rng: StdRng,
        seed: u64,
        rules: GameRules,
    ) -> Self {
        let ring = SeatRing::new(configs.len());
        let (hands, solution) = deal.into_parts();
        let hand_sizes: Vec<usize> = hands.iter().map(|hand| hand.len()).collect();
        let participants: Vec<Participant> = ring
            .seats()
            .zip(configs.iter().copied())
            .zip(hands)
            .map(|((seat, config), hand)| Participant::new(seat, config, hand))
            .collect();
        let beliefs = participants
            .iter()
            .map(|participant| {
                participant.mode().is_automated().then(|| {
                    BeliefState::new(
                        participant.seat(),
                        participant.hand(),
                        hand_sizes.clone(),
                        rules.suspicion,
                    )
                })
            })
            .collect();

        Self {
            seed,
            rules,
            board: Board::classic(),
            configs,
            participants,
            ring,
            solution,
            fixture,
            beliefs,
            rng,
            phase: Phase::TurnStart,
            turn: 0,
            current: None,
            inputs: Vec::new(),
            transitions: vec![Phase::TurnStart],
            announcer: None,
        }
    }

    pub fn with_roll_announcer(mut self, announcer: RollAnnouncer) -> Self {
        self.announcer = Some(announcer);
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ring(&self) -> SeatRing {
        self.ring
    }

    pub fn seat_count(&self) -> usize {
        self.participants.len()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Seat whose turn it is; `None` before the first turn starts.
    pub fn current_seat(&self) -> Option<Seat> {
        self.current
    }

    /// Seat the machine is waiting on: the disprover while a disproval
    /// choice is pending, otherwise the seat whose turn it is.
    pub fn acting_seat(&self) -> Option<Seat> {
        match &self.phase {
            Phase::AwaitingDisproval { disprover, .. } => Some(*disprover),
            Phase::GameOver(_) => None,
            _ => self.current,
        }
    }

    pub fn participant(&self, seat: Seat) -> Option<&Participant> {
        self.participants.get(seat.index())
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant_configs(&self) -> &[ParticipantConfig] {
        &self.configs
    }

    pub fn position(&self, seat: Seat) -> Option<Position> {
        self.participant(seat).map(Participant::position)
    }

    /// Belief of an automated seat; human seats have none.
    pub fn belief(&self, seat: Seat) -> Option<&BeliefState> {
        self.beliefs.get(seat.index()).and_then(Option::as_ref)
    }

    pub fn active_seats(&self) -> impl Iterator<Item = Seat> + '_ {
        self.participants
            .iter()
            .filter(|participant| !participant.is_eliminated())
            .map(Participant::seat)
    }

    /// The hidden solution, available once the game is over.
    pub fn solution(&self) -> Option<&Theory> {
        self.phase.is_over().then_some(&self.solution)
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.phase.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    /// Every driver input applied so far, in order.
    pub fn inputs(&self) -> &[DriverInput] {
        &self.inputs
    }

    /// Every phase entered so far, transient phases included.
    pub fn transitions(&self) -> &[Phase] {
        &self.transitions
    }

    /// What `seat` is entitled to see; automated decisions read only this.
    pub fn seat_view(&self, seat: Seat) -> SeatView<'_> {
        SeatView::new(seat, self)
    }

    pub(crate) fn fixture_deal(&self) -> Option<&Deal> {
        self.fixture.as_ref()
    }

    /// Hands the turn to the next active seat clockwise (seat 0 first).
    pub fn start_turn(&mut self) -> Result<Seat, GameError> {
        if !matches!(self.phase, Phase::TurnStart) {
            return Err(self.rejected("start_turn"));
        }
        let seat = self.next_active_seat().ok_or_else(|| self.rejected("start_turn"))?;
        let mode = self.participants[seat.index()].mode();

        self.turn += 1;
        self.current = Some(seat);
        self.record(DriverInput::StartTurn);
        self.enter(Phase::AwaitingMovementChoice { seat, mode });
        Ok(seat)
    }

    /// Rolls one die and moves the current seat's token toward `destination`.
    pub fn submit_destination(&mut self, destination: Room) -> Result<RollOutcome, GameError> {
        let Phase::AwaitingMovementChoice { seat, .. } = self.phase else {
            return Err(self.rejected("submit_destination"));
        };
        let route = self
            .board
            .route(self.participants[seat.index()].position(), destination)?;

        let roll = self.rng.gen_range(1..=DIE_FACES);
        let position = route.advance(roll);
        let resolution = match position {
            Position::InRoom(room) => Resolution::InRoom(room),
            _ => Resolution::InHallway {
                toward: destination,
                remaining: route.remaining() - roll,
            },
        };
        let outcome = RollOutcome {
            seat,
            roll,
            destination,
            position,
            resolution,
        };

        self.participants[seat.index()].set_position(position);
        self.record(DriverInput::Destination(destination));
        self.enter(Phase::Rolling { seat, destination });
        self.enter(Phase::Resolved { seat, resolution });
        match resolution {
            Resolution::InRoom(room) => self.enter(Phase::AwaitingAssumption { seat, room }),
            Resolution::InHallway { .. } => self.enter(Phase::TurnStart),
        }

        if let Some(announcer) = &self.announcer {
            announcer(&outcome);
        }
        Ok(outcome)
    }

    /// Names a suspect and weapon in the current room and runs the
    /// clockwise disproval search.
    pub fn submit_assumption(
        &mut self,
        suspect: Suspect,
        weapon: Weapon,
    ) -> Result<DisprovalOutcome, GameError> {
        let Phase::AwaitingAssumption { seat, room } = self.phase else {
            return Err(self.rejected("submit_assumption"));
        };
        let theory = Theory::new(suspect, weapon, room);
        let assumption = Assumption::new(seat, theory);

        self.record(DriverInput::Assume { suspect, weapon });
        for belief in self.beliefs.iter_mut().flatten() {
            belief.observe_assumption(&assumption);
        }

        let found = find_disprover(self.ring, &assumption, |holder| {
            self.participants[holder.index()].hand()
        });
        let outcome = match found {
            None => {
                for belief in self.beliefs.iter_mut().flatten() {
                    belief.observe_irrefutable(&assumption);
                }
                self.enter(Phase::AwaitingAccusation { seat });
                DisprovalOutcome::Irrefutable
            }
            Some((by, candidates))
                if self.participants[by.index()].mode() == BehaviorMode::Human
                    && candidates.len() > 1 =>
            {
                self.enter(Phase::AwaitingDisproval {
                    asserter: seat,
                    disprover: by,
                    theory,
                    candidates: candidates.clone(),
                });
                DisprovalOutcome::AwaitingChoice { by, candidates }
            }
            Some((by, candidates)) => {
                // A match was found, so the tie-break always yields a card.
                match tie_break(&candidates) {
                    Some(card) => {
                        self.reveal(&assumption, by, card);
                        DisprovalOutcome::Revealed { by, card }
                    }
                    None => DisprovalOutcome::Irrefutable,
                }
            }
        };

        event!(
            target: "clue_core::game",
            Level::DEBUG,
            turn = self.turn,
            asserter = seat.index(),
            theory = %theory,
            disprover = ?outcome.disprover().map(Seat::index),
            "assumption resolved"
        );
        Ok(outcome)
    }

    /// Accepts names as typed by a driver, e.g. `"plum"` and `"lead pipe"`.
    pub fn submit_assumption_named(
        &mut self,
        suspect: &str,
        weapon: &str,
    ) -> Result<DisprovalOutcome, GameError> {
        let suspect = suspect.parse::<Suspect>()?;
        let weapon = weapon.parse::<Weapon>()?;
        self.submit_assumption(suspect, weapon)
    }

    /// The human disprover's pick among their matching cards.
    pub fn submit_disproval_choice(&mut self, card: Card) -> Result<DisprovalOutcome, GameError> {
        let Phase::AwaitingDisproval {
            asserter,
            disprover,
            theory,
            ref candidates,
        } = self.phase
        else {
            return Err(self.rejected("submit_disproval_choice"));
        };
        if !candidates.contains(&card) {
            return Err(GameError::IllegalDisprovalCard {
                seat: disprover,
                card,
            });
        }

        self.record(DriverInput::DisprovalChoice(card));
        self.reveal(&Assumption::new(asserter, theory), disprover, card);
        Ok(DisprovalOutcome::Revealed { by: disprover, card })
    }

    pub fn decline_assumption(&mut self) -> Result<(), GameError> {
        if !matches!(self.phase, Phase::AwaitingAssumption { .. }) {
            return Err(self.rejected("decline_assumption"));
        }
        self.record(DriverInput::DeclineAssumption);
        self.enter(Phase::TurnStart);
        Ok(())
    }

    pub fn end_turn(&mut self) -> Result<(), GameError> {
        if !matches!(
            self.phase,
            Phase::AwaitingAccusation { .. } | Phase::AwaitingAssumption { .. }
        ) {
            return Err(self.rejected("end_turn"));
        }
        self.record(DriverInput::EndTurn);
        self.enter(Phase::TurnStart);
        Ok(())
    }

    /// Checks a final accusation by the current seat against the solution.
    pub fn submit_accusation(&mut self, accusation: Theory) -> Result<Verdict, GameError> {
        let seat = match self.phase {
            Phase::AwaitingMovementChoice { seat, .. }
            | Phase::AwaitingAssumption { seat, .. }
            | Phase::AwaitingAccusation { seat } => seat,
            _ => return Err(self.rejected("submit_accusation")),
        };

        let verdict = validate(&accusation, &self.solution);
        self.record(DriverInput::Accuse(accusation));
        let finish = |winner| GameOutcome {
            accuser: seat,
            accusation,
            verdict,
            winner,
            solution: self.solution,
            turn: self.turn,
        };

        let next = match (verdict, self.rules.accusation) {
            (Verdict::Win, _) => Phase::GameOver(finish(Some(seat))),
            (Verdict::Loss, AccusationRule::EndsGame) => Phase::GameOver(finish(None)),
            (Verdict::Loss, AccusationRule::EliminatesAccuser) => {
                let remaining: Vec<Seat> = self
                    .active_seats()
                    .filter(|active| *active != seat)
                    .collect();
                match remaining.as_slice() {
                    [] => Phase::GameOver(finish(None)),
                    [last] => Phase::GameOver(finish(Some(*last))),
                    _ => Phase::TurnStart,
                }
            }
        };

        if verdict == Verdict::Loss {
            self.participants[seat.index()].eliminate();
        }
        event!(
            target: "clue_core::game",
            Level::DEBUG,
            turn = self.turn,
            accuser = seat.index(),
            accusation = %accusation,
            verdict = ?verdict,
            "accusation checked"
        );
        self.enter(next);
        Ok(verdict)
    }

    pub fn submit_accusation_named(
        &mut self,
        suspect: &str,
        weapon: &str,
        room: &str,
    ) -> Result<Verdict, GameError> {
        let accusation = Theory::parse(suspect, weapon, room)?;
        self.submit_accusation(accusation)
    }

    fn reveal(&mut self, assumption: &Assumption, disprover: Seat, card: Card) {
        self.participants[disprover.index()]
            .hand_mut()
            .mark_revealed(card);
        let asserter = assumption.asserter;
        for (index, slot) in self.beliefs.iter_mut().enumerate() {
            let Some(belief) = slot else { continue };
            if index == asserter.index() {
                belief.observe_revealed_card(assumption, disprover, card);
            } else if index != disprover.index() {
                belief.observe_disproval_as_witness(assumption, disprover);
            }
        }
        self.enter(Phase::AwaitingAccusation { seat: asserter });
    }

    fn next_active_seat(&self) -> Option<Seat> {
        let active = |seat: &Seat| !self.participants[seat.index()].is_eliminated();
        match self.current {
            None => self.ring.seats().find(active),
            Some(current) => self
                .ring
                .clockwise_after(current)
                .chain(std::iter::once(current))
                .find(active),
        }
    }

    fn record(&mut self, input: DriverInput) {
        self.inputs.push(input);
    }

    fn enter(&mut self, phase: Phase) {
        event!(
            target: "clue_core::game",
            Level::DEBUG,
            turn = self.turn,
            seat = ?self.current.map(Seat::index),
            phase = %phase.kind(),
            "phase transition"
        );
        self.transitions.push(phase.clone());
        self.phase = phase;
    }

    fn rejected(&self, operation: &'static str) -> GameError {
        GameError::InvalidPhaseTransition {
            operation,
            phase: self.phase.kind(),
        }
    }
}

fn check_participant_count(count: usize) -> Result<(), GameError> {
    if (MIN_SEATS..=MAX_SEATS).contains(&count) {
        Ok(())
    } else {
        Err(GameError::InvalidParticipantCount {
            count,
            min: MIN_SEATS,
            max: MAX_SEATS,
        })
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("seed", &self.seed)
            .field("rules", &self.rules)
            .field("participants", &self.participants)
            .field("phase", &self.phase)
            .field("turn", &self.turn)
            .field("current", &self.current)
            .field("inputs", &self.inputs.len())
            .field("announcer", &self.announcer.is_some())
            .finish_non_exhaustive()
    }
}
