use log::{debug, error, info, trace};

use super::score_ledger::ScoreLedger;
use super::settings::Settings;
use crate::events::EventEmitter;
use crate::model::{
    ClockSignal, Countdown, Difficulty, DifficultySettings, GameEngineCommand, GameEngineEvent,
    HighScores, HintRejection, Outcome, PendingRequest, RequestTag, Riddle, RoundPhase,
    RoundState,
};

/// Owns the active round, the running score and the countdown, and applies
/// every command through a single `handle_command` entry point.
///
/// The controller never talks to the text generator directly. It queues
/// tagged [`PendingRequest`]s and only applies responses whose tag still
/// matches the current round.
pub struct RoundController<L: ScoreLedger> {
    difficulty: Difficulty,
    settings: DifficultySettings,
    current_tag: Option<RequestTag>,
    state: RoundState,
    score: i64,
    score_recorded: bool,
    countdown: Countdown,
    ledger: L,
    pending_requests: Vec<PendingRequest>,
    debug_mode: bool,
    game_engine_event_emitter: EventEmitter<GameEngineEvent>,
}

impl<L: ScoreLedger> RoundController<L> {
    pub fn new(ledger: L, game_engine_event_emitter: EventEmitter<GameEngineEvent>) -> Self {
        let difficulty = Difficulty::default();
        Self {
            difficulty,
            settings: difficulty.settings(),
            current_tag: None,
            state: RoundState::default(),
            score: 0,
            score_recorded: false,
            countdown: Countdown::default(),
            ledger,
            pending_requests: Vec::new(),
            debug_mode: Settings::is_debug_mode(),
            game_engine_event_emitter,
        }
    }

    pub fn handle_command(&mut self, command: GameEngineCommand) {
        trace!(target: "round_controller", "Handling command: {:?}", command);
        match command {
            GameEngineCommand::NewGame(difficulty) => self.new_game(difficulty),
            GameEngineCommand::RiddleFetched(tag, riddle) => self.apply_riddle(tag, riddle),
            GameEngineCommand::ClockTick(tag) => self.handle_clock_tick(tag),
            GameEngineCommand::UpdateGuess(text) => self.update_guess(text),
            GameEngineCommand::SubmitGuess(text) => self.submit_guess(text),
            GameEngineCommand::RequestHint => self.request_hint(),
            GameEngineCommand::HintFetched(tag, hint) => self.apply_hint(tag, hint),
            GameEngineCommand::NextRound => self.next_round(),
            GameEngineCommand::Quit => self.quit(),
        }
    }

    /// Drains the requests queued since the last call.
    pub fn take_pending_requests(&mut self) -> Vec<PendingRequest> {
        std::mem::take(&mut self.pending_requests)
    }

    pub fn phase(&self) -> RoundPhase {
        if self.current_tag.is_none() {
            RoundPhase::Idle
        } else {
            self.state.phase()
        }
    }

    pub fn round_state(&self) -> &RoundState {
        &self.state
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn settings(&self) -> DifficultySettings {
        self.settings
    }

    pub fn current_tag(&self) -> Option<RequestTag> {
        self.current_tag
    }

    pub fn is_clock_running(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn hint_available(&self) -> bool {
        self.check_hint().is_ok()
    }

    pub fn high_scores(&self) -> HighScores {
        self.ledger.load()
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    fn new_game(&mut self, difficulty: Difficulty) {
        if self.current_tag.is_some() {
            self.end_session();
        }
        self.difficulty = difficulty;
        self.settings = difficulty.settings();
        self.score = 0;
        info!(target: "round_controller", "New game on {difficulty}");
        self.game_engine_event_emitter
            .emit(GameEngineEvent::SessionStarted {
                difficulty,
                settings: self.settings,
            });
        self.game_engine_event_emitter
            .emit(GameEngineEvent::ScoreChanged(self.score));
        self.begin_round(RequestTag::new_session());
    }

    fn begin_round(&mut self, tag: RequestTag) {
        self.countdown.stop();
        self.current_tag = Some(tag);
        self.state = RoundState::loading(self.settings.timer_seconds);
        self.score_recorded = false;
        // responses for older rounds would be discarded anyway
        self.pending_requests.retain(|request| request.tag() == tag);
        self.pending_requests.push(PendingRequest::Riddle {
            tag,
            difficulty: self.difficulty,
        });
        debug!(target: "round_controller", "Requested riddle for round {tag}");
        self.game_engine_event_emitter
            .emit(GameEngineEvent::RiddleRequested(tag));
    }

    fn is_current(&self, tag: RequestTag) -> bool {
        self.current_tag == Some(tag)
    }

    fn apply_riddle(&mut self, tag: RequestTag, riddle: Riddle) {
        if !self.is_current(tag) || self.state.phase() != RoundPhase::Loading {
            debug!(target: "round_controller", "Discarding stale riddle for round {tag}");
            return;
        }
        if self.debug_mode {
            info!(target: "round_controller", "Round {tag} answer: {}", riddle.answer_name);
        }
        self.state.riddle = Some(riddle.clone());
        self.state.time_left_seconds = self.settings.timer_seconds;
        self.countdown.start(tag, self.settings.timer_seconds);
        self.game_engine_event_emitter
            .emit(GameEngineEvent::RoundStarted {
                tag,
                riddle,
                time_left_seconds: self.state.time_left_seconds,
            });
        self.sync_hint_availability();
    }

    fn handle_clock_tick(&mut self, tag: RequestTag) {
        if !self.is_current(tag) || !self.state.is_awaiting_guess() {
            trace!(target: "round_controller", "Ignoring tick for round {tag}");
            return;
        }
        match self.countdown.tick(tag) {
            None => (),
            Some(ClockSignal::Tick(remaining)) => {
                self.state.time_left_seconds = remaining;
                self.game_engine_event_emitter
                    .emit(GameEngineEvent::TimerTicked {
                        tag,
                        time_left_seconds: remaining,
                    });
            }
            Some(ClockSignal::Expired) => {
                self.state.time_left_seconds = 0;
                self.game_engine_event_emitter
                    .emit(GameEngineEvent::TimerTicked {
                        tag,
                        time_left_seconds: 0,
                    });
                let outcome = Outcome::timed_out(self.current_answer());
                self.resolve(outcome);
            }
        }
    }

    fn update_guess(&mut self, text: String) {
        if self.state.is_awaiting_guess() {
            self.state.guess_text = text;
        }
    }

    fn submit_guess(&mut self, text: String) {
        if self.current_tag.is_none() || !self.state.is_awaiting_guess() {
            debug!(target: "round_controller", "Ignoring guess outside of a running round");
            return;
        }
        if text.trim().is_empty() {
            trace!(target: "round_controller", "Ignoring blank guess");
            return;
        }
        self.state.guess_text = text;
        let Some(riddle) = &self.state.riddle else {
            return;
        };
        let outcome = if riddle.matches_guess(&self.state.guess_text) {
            let points = self.settings.points_for(self.state.time_left_seconds);
            self.score += points;
            self.game_engine_event_emitter
                .emit(GameEngineEvent::ScoreChanged(self.score));
            Outcome::correct(&riddle.answer_name, points)
        } else {
            Outcome::incorrect_guess(&riddle.answer_name)
        };
        self.resolve(outcome);
    }

    fn check_hint(&self) -> Result<(), HintRejection> {
        if self.current_tag.is_none() || !self.state.is_awaiting_guess() {
            return Err(HintRejection::NotAcceptingGuesses);
        }
        if self.state.hint_consumed {
            return Err(HintRejection::AlreadyUsed);
        }
        if self.score < self.settings.hint_cost {
            return Err(HintRejection::InsufficientScore {
                score: self.score,
                hint_cost: self.settings.hint_cost,
            });
        }
        Ok(())
    }

    fn request_hint(&mut self) {
        if let Err(rejection) = self.check_hint() {
            debug!(target: "round_controller", "Hint rejected: {:?}", rejection);
            self.game_engine_event_emitter
                .emit(GameEngineEvent::HintRejected(rejection));
            return;
        }
        let (Some(tag), Some(riddle)) = (self.current_tag, &self.state.riddle) else {
            return;
        };
        let answer_name = riddle.answer_name.clone();
        self.score -= self.settings.hint_cost;
        self.state.hint_consumed = true;
        self.pending_requests
            .push(PendingRequest::Hint { tag, answer_name });
        debug!(target: "round_controller", "Requested hint for round {tag}");
        self.game_engine_event_emitter
            .emit(GameEngineEvent::ScoreChanged(self.score));
        self.sync_hint_availability();
    }

    fn apply_hint(&mut self, tag: RequestTag, hint: String) {
        if !self.is_current(tag) || !self.state.hint_consumed || self.state.hint_text.is_some() {
            debug!(target: "round_controller", "Discarding stale hint for round {tag}");
            return;
        }
        self.state.hint_text = Some(hint.clone());
        self.game_engine_event_emitter
            .emit(GameEngineEvent::HintRevealed(hint));
    }

    fn resolve(&mut self, outcome: Outcome) {
        // stop first so no tick can land after the outcome is set
        self.countdown.stop();
        info!(target: "round_controller", "Round resolved: {}", outcome.message());
        let ends_session = outcome.ends_session();
        self.state.outcome = Some(outcome.clone());
        if ends_session {
            self.record_score();
        }
        self.game_engine_event_emitter
            .emit(GameEngineEvent::RoundResolved(outcome));
        self.sync_hint_availability();
    }

    fn next_round(&mut self) {
        let Some(tag) = self.current_tag else {
            debug!(target: "round_controller", "No session to continue");
            return;
        };
        let Some(outcome) = &self.state.outcome else {
            debug!(target: "round_controller", "Round {tag} is still in play");
            return;
        };
        if outcome.ends_session() {
            self.score = 0;
            self.game_engine_event_emitter
                .emit(GameEngineEvent::SessionStarted {
                    difficulty: self.difficulty,
                    settings: self.settings,
                });
            self.game_engine_event_emitter
                .emit(GameEngineEvent::ScoreChanged(self.score));
            self.begin_round(RequestTag::new_session());
        } else {
            self.begin_round(tag.next_round());
        }
    }

    fn quit(&mut self) {
        if self.current_tag.is_none() {
            return;
        }
        self.end_session();
        self.state = RoundState::default();
        self.pending_requests.clear();
    }

    /// Stops the clock and records the session's score unless a loss already did.
    fn end_session(&mut self) {
        self.countdown.stop();
        self.record_score();
        info!(target: "round_controller", "Session ended with score {}", self.score);
        self.game_engine_event_emitter
            .emit(GameEngineEvent::SessionEnded {
                final_score: self.score,
            });
        self.current_tag = None;
    }

    fn record_score(&mut self) {
        if self.score_recorded {
            return;
        }
        self.score_recorded = true;
        match self.ledger.record(self.score, self.difficulty) {
            Ok(()) if self.score <= 0 => {
                debug!(target: "round_controller", "Session ended without points");
            }
            Ok(()) => {
                self.game_engine_event_emitter
                    .emit(GameEngineEvent::HighScoreRecorded {
                        score: self.score,
                        difficulty: self.difficulty,
                    });
            }
            Err(err) => {
                error!(target: "round_controller", "Failed to record high score: {err}");
                self.game_engine_event_emitter
                    .emit(GameEngineEvent::HighScoreWriteFailed(err.to_string()));
            }
        }
    }

    fn current_answer(&self) -> &str {
        self.state
            .riddle
            .as_ref()
            .map(|riddle| riddle.answer_name.as_str())
            .unwrap_or_default()
    }

    fn sync_hint_availability(&mut self) {
        self.game_engine_event_emitter
            .emit(GameEngineEvent::HintAvailabilityChanged(self.hint_available()));
    }
}
