use log::trace;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use std::collections::HashMap;

use super::riddle_source::{GenerationError, GenerationRequest, TextGenerator};
use crate::helpers::AnswerText;
use crate::model::{Difficulty, Riddle};

struct DeckCard {
    difficulty: Difficulty,
    riddle: &'static str,
    name: &'static str,
    hint: &'static str,
}

const DECK: &[DeckCard] = &[
    DeckCard {
        difficulty: Difficulty::Easy,
        riddle: "I am the king of the gods, wielding a thunderbolt and riding a white elephant \
                 named Airavata. Who am I?",
        name: "Indra",
        hint: "He slew the serpent Vritra to release the waters.",
    },
    DeckCard {
        difficulty: Difficulty::Easy,
        riddle: "I am the fire that carries your offerings to the gods, the priest of the \
                 sacrifice and the first word of the Rigveda. Who am I?",
        name: "Agni",
        hint: "He is invoked at the start of every Vedic fire ritual.",
    },
    DeckCard {
        difficulty: Difficulty::Easy,
        riddle: "Seven horses pull my chariot across the sky each day, and I am called the eye \
                 of the gods. Who am I?",
        name: "Surya",
        hint: "His son Karna was born wearing golden armour.",
    },
    DeckCard {
        difficulty: Difficulty::Easy,
        riddle: "I am the wind and the breath of life, and the mighty Hanuman and Bhima are my \
                 sons. Who am I?",
        name: "Vayu",
        hint: "He moves everywhere yet cannot be seen.",
    },
    DeckCard {
        difficulty: Difficulty::Medium,
        riddle: "From the waters I guard the cosmic order, binding the wicked with my noose, and \
                 no secret of mankind escapes me. Who am I?",
        name: "Varuna",
        hint: "He is the lord of the oceans and of the western direction.",
    },
    DeckCard {
        difficulty: Difficulty::Medium,
        riddle: "One of the seven great sages, I kept the wish-fulfilling cow Nandini and served \
                 as priest to the solar dynasty of Rama. Who am I?",
        name: "Vasishtha",
        hint: "He clashed with a king-turned-sage over a wondrous cow.",
    },
    DeckCard {
        difficulty: Difficulty::Medium,
        riddle: "Born a king, I became a sage through fierce austerity and gave the world the \
                 Gayatri mantra. Who am I?",
        name: "Vishvamitra",
        hint: "He once created a second heaven for King Trishanku.",
    },
    DeckCard {
        difficulty: Difficulty::Medium,
        riddle: "I am the sacred drink pressed from a mountain plant, and an entire book of the \
                 Rigveda is devoted to me. Who am I?",
        name: "Soma",
        hint: "He is also identified with the moon.",
    },
    DeckCard {
        difficulty: Difficulty::Hard,
        riddle: "A radiant maiden, I unveil the world each morning and wake every living thing \
                 from sleep. Who am I?",
        name: "Ushas",
        hint: "Her name shares a root with Eos, the Greek goddess of the dawn.",
    },
    DeckCard {
        difficulty: Difficulty::Hard,
        riddle: "I am the boundless mother of the gods, and the sons of my womb uphold the \
                 cosmic order. Who am I?",
        name: "Aditi",
        hint: "She is often pictured as the limitless sky itself.",
    },
    DeckCard {
        difficulty: Difficulty::Hard,
        riddle: "Fashioned from the finest features of every creature, I married a sage and \
                 composed hymns of the Rigveda myself. Who am I?",
        name: "Lopamudra",
        hint: "She was the wife of the sage Agastya.",
    },
    DeckCard {
        difficulty: Difficulty::Hard,
        riddle: "With the head of a horse I taught the honey doctrine to the twin physicians, and \
                 my bones were shaped into a thunderbolt. Who am I?",
        name: "Dadhyanch",
        hint: "He was a son of the sage Atharvan.",
    },
];

/// Offline [`TextGenerator`] that deals riddles from a built-in deck.
///
/// Each difficulty is shuffled independently and reshuffled once exhausted,
/// so consecutive rounds do not repeat until the deck runs out.
pub struct DeckGenerator {
    rng: StdRng,
    seed: u64,
    draw_piles: HashMap<Difficulty, Vec<usize>>,
}

impl DeckGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().next_u64());
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            draw_piles: HashMap::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn draw(&mut self, difficulty: Difficulty) -> Option<&'static DeckCard> {
        let pile = self.draw_piles.entry(difficulty).or_default();
        if pile.is_empty() {
            pile.extend(
                DECK.iter()
                    .enumerate()
                    .filter(|(_, card)| card.difficulty == difficulty)
                    .map(|(index, _)| index),
            );
            pile.shuffle(&mut self.rng);
            trace!(target: "deck_generator", "Reshuffled {} {difficulty} cards", pile.len());
        }
        pile.pop().map(|index| &DECK[index])
    }
}

impl TextGenerator for DeckGenerator {
    fn generate(&mut self, request: &GenerationRequest) -> Result<String, GenerationError> {
        match request {
            GenerationRequest::Riddle { difficulty, .. } => {
                let card = self.draw(*difficulty).ok_or_else(|| {
                    GenerationError::Unavailable(format!("no {difficulty} cards in the deck"))
                })?;
                Ok(serde_json::to_string(&Riddle::new(card.riddle, card.name))?)
            }
            GenerationRequest::Hint { answer_name, .. } => DECK
                .iter()
                .find(|card| card.name.normalized_answer() == answer_name.normalized_answer())
                .map(|card| card.hint.to_string())
                .ok_or_else(|| {
                    GenerationError::Unavailable(format!("no hint for {answer_name} in the deck"))
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::riddle_source::{parse_riddle_response, RiddleSource, HINT_APOLOGY};
    use std::collections::HashSet;

    #[test]
    fn test_deck_never_gives_away_answers() {
        for card in DECK {
            assert!(!card.riddle.mentions(card.name), "riddle reveals {}", card.name);
            assert!(!card.hint.mentions(card.name), "hint reveals {}", card.name);
        }
    }

    #[test]
    fn test_every_difficulty_has_cards() {
        for difficulty in Difficulty::all() {
            assert!(DECK.iter().any(|card| card.difficulty == difficulty));
        }
    }

    #[test]
    fn test_deals_whole_pile_before_repeating() {
        let mut generator = DeckGenerator::new(Some(7));
        let request = GenerationRequest::riddle(Difficulty::Medium);
        let pile_size = DECK
            .iter()
            .filter(|card| card.difficulty == Difficulty::Medium)
            .count();

        let names: HashSet<String> = (0..pile_size)
            .map(|_| {
                let response = generator.generate(&request).unwrap();
                parse_riddle_response(&response).unwrap().answer_name
            })
            .collect();

        assert_eq!(names.len(), pile_size);
    }

    #[test]
    fn test_same_seed_deals_same_order() {
        let deal = |seed| {
            let mut source = RiddleSource::new(DeckGenerator::new(Some(seed)));
            (0..4)
                .map(|_| source.generate_riddle(Difficulty::Hard).answer_name)
                .collect::<Vec<_>>()
        };
        assert_eq!(deal(99), deal(99));
        assert_eq!(DeckGenerator::new(Some(99)).seed(), 99);
    }

    #[test]
    fn test_hints_come_from_the_matching_card() {
        let mut source = RiddleSource::new(DeckGenerator::new(Some(1)));
        assert_eq!(source.generate_hint("lopamudra"), "She was the wife of the sage Agastya.");
        assert_eq!(source.generate_hint("Zeus"), HINT_APOLOGY);
    }
}
