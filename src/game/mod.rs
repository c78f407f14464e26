pub mod deck_generator;
pub mod game_session;
pub mod ledger_storage;
pub mod riddle_source;
pub mod round_controller;
pub mod score_ledger;
pub mod settings;

pub use deck_generator::DeckGenerator;
pub use game_session::{GameSession, OfflineGameSession};
pub use ledger_storage::{FileStorage, LedgerStorage, MemoryStorage};
pub use riddle_source::{
    GenerationError, GenerationRequest, ResponseFormat, RiddleSource, TextGenerator,
    HINT_APOLOGY,
};
pub use round_controller::RoundController;
pub use score_ledger::{HighScoreLedger, LedgerError, ScoreLedger};
pub use settings::Settings;
