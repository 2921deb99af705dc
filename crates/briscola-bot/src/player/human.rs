use crate::player::Player;
use briscola_core::game::public_state::{CardCode, PublicState};
use briscola_core::model::card::Card;
use briscola_core::model::score::HandOutcome;
use std::io::{BufRead, BufReader, Stdin, Stdout, Write, stdin, stdout};
use tracing::warn;

/// Interactive player prompting on generic handles, so tests can drive it
/// with in-memory buffers instead of a terminal.
pub struct HumanPlayer<R, W> {
    input: R,
    output: W,
}

impl HumanPlayer<BufReader<Stdin>, Stdout> {
    pub fn from_stdio() -> Self {
        Self::new(BufReader::new(stdin()), stdout())
    }
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn render(&mut self, view: &PublicState) {
        let _ = writeln!(self.output, "--- turn {} ---", view.turn);
        let _ = writeln!(
            self.output,
            "trump {}   score {} - {}",
            describe(view.trump),
            view.my_points,
            view.other_points
        );
        if !view.table[0].is_none() {
            let _ = writeln!(self.output, "table: {}", describe(view.table[0]));
        }
        let cards: Vec<String> = view
            .hand
            .iter()
            .take(view.hand_size as usize)
            .enumerate()
            .map(|(index, code)| format!("[{index}] {}", describe(*code)))
            .collect();
        let _ = writeln!(self.output, "hand: {}", cards.join("  "));
    }
}

fn describe(code: CardCode) -> String {
    match code.decode() {
        Some(card) => card.to_string(),
        None => "--".to_string(),
    }
}

impl<R: BufRead + Send, W: Write + Send> Player for HumanPlayer<R, W> {
    fn name(&self) -> &str {
        "human"
    }

    fn choose_card(&mut self, view: &PublicState) -> usize {
        self.render(view);
        let limit = (view.hand_size as usize).max(1);
        loop {
            let _ = write!(self.output, "card to play (0-{}): ", limit - 1);
            let _ = self.output.flush();

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => {
                    // Closed input cannot produce a choice; fall back to the
                    // first card rather than spinning on EOF.
                    warn!("input closed, defaulting to card 0");
                    return 0;
                }
                Ok(_) => {}
            }

            match line.trim().parse::<usize>() {
                Ok(index) if index < limit => return index,
                _ => {
                    let _ = writeln!(self.output, "enter an index between 0 and {}", limit - 1);
                }
            }
        }
    }

    fn observe_opponent_card(&mut self, card: Card) {
        let _ = writeln!(self.output, "opponent plays {card}");
    }

    fn notify_trick_result(&mut self, delta: i16) {
        if delta >= 0 {
            let _ = writeln!(self.output, "you take the trick (+{delta})");
        } else {
            let _ = writeln!(self.output, "opponent takes the trick ({delta})");
        }
    }

    fn notify_hand_result(&mut self, outcome: HandOutcome) {
        let _ = writeln!(self.output, "hand over: {outcome}");
    }
}
