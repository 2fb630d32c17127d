use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::env::{ActionSpace, Env, EnvNotReady};

/// Lookup key for the tabular learners: the dealer's visible card value
/// (ace as 11) and the player's current hand total.
#[derive(Hash, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BlackJackObservation {
    pub d_score: u8,
    pub p_score: u8,
}

impl BlackJackObservation {
    pub fn new(d_score: u8, p_score: u8) -> Self {
        Self { d_score, p_score }
    }
}

/// Single-deck Blackjack: 52 cards reshuffled on every reset, dealer draws
/// to 17, aces count 11 and devalue to 1 while the hand would bust.
/// A push pays the player +1.
#[derive(Debug, Clone)]
pub struct BlackJackEnv {
    ready: bool,
    deck: Vec<u8>,
    player: Vec<u8>,
    dealer: Vec<u8>,
    rng: SmallRng,
}

impl BlackJackEnv {
    pub const ACTIONS: [&'static str; 2] = ["HIT", "STAND"];

    pub fn new(seed: u64) -> Self {
        let mut env = Self {
            ready: false,
            deck: Vec::with_capacity(52),
            player: Vec::with_capacity(12),
            dealer: Vec::with_capacity(12),
            rng: SmallRng::seed_from_u64(seed),
        };
        env.initialize_hands();
        env
    }

    fn initialize_hands(&mut self) {
        self.deck.clear();
        for _ in 0..4 {
            self.deck
                .extend_from_slice(&[2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 10, 11]);
        }
        self.deck.shuffle(&mut self.rng);
        self.player.clear();
        self.dealer.clear();
        let card = self.draw();
        self.player.push(card);
        let card = self.draw();
        self.player.push(card);
        let card = self.draw();
        self.dealer.push(card);
        let card = self.draw();
        self.dealer.push(card);
    }

    fn draw(&mut self) -> u8 {
        // One episode never consumes more cards than a single deck holds.
        self.deck.pop().expect("deck covers a single episode")
    }

    fn get_dealer_card(&self) -> u8 {
        self.dealer[0]
    }

    /// Hand total with every ace initially worth 11, devalued by 10 one at
    /// a time while the total busts.
    fn compute_score(hand: &[u8]) -> u8 {
        let mut score: u8 = hand.iter().sum();
        let mut aces = hand.iter().filter(|&&card| card == 11).count();
        while score > 21 && aces > 0 {
            score -= 10;
            aces -= 1;
        }
        score
    }

    fn observation(&self) -> BlackJackObservation {
        BlackJackObservation::new(self.get_dealer_card(), Self::compute_score(&self.player))
    }
}

impl Env<BlackJackObservation> for BlackJackEnv {
    fn reset(&mut self) -> BlackJackObservation {
        self.initialize_hands();
        self.ready = true;
        self.observation()
    }

    fn step(&mut self, action: usize) -> Result<(BlackJackObservation, f64, bool), EnvNotReady> {
        if !self.ready {
            return Err(EnvNotReady);
        }
        if action == 0 {
            let card = self.draw();
            self.player.push(card);
            let p_score = Self::compute_score(&self.player);
            if p_score > 21 {
                self.ready = false;
                let obs =
                    BlackJackObservation::new(Self::compute_score(&self.dealer), p_score);
                return Ok((obs, -1.0, true));
            }
            Ok((self.observation(), 0.0, false))
        } else {
            self.ready = false;
            let mut d_score = Self::compute_score(&self.dealer);
            while d_score < 17 {
                let card = self.draw();
                self.dealer.push(card);
                d_score = Self::compute_score(&self.dealer);
            }
            let p_score = Self::compute_score(&self.player);
            let obs = BlackJackObservation::new(d_score, p_score);
            if d_score > 21 {
                return Ok((obs, 1.0, true));
            }
            // A push counts as a player win.
            let reward = if p_score >= d_score { 1.0 } else { -1.0 };
            Ok((obs, reward, true))
        }
    }

    fn action_space(&self) -> ActionSpace {
        ActionSpace::new(2)
    }

    fn render(&self) -> String {
        let mut result;
        if self.ready {
            result = format!("Dealer: {} \nPlayer: ", self.dealer[0]);
        } else {
            let mut dealer_cards = "".to_string();
            for card in &self.dealer {
                dealer_cards.push_str(card.to_string().as_str());
                dealer_cards.push(' ');
            }
            result = format!("Dealer: {} \nPlayer: ", dealer_cards);
        }
        for card in &self.player {
            result.push_str(card.to_string().as_str());
            result.push(' ');
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::{BlackJackEnv, BlackJackObservation};
    use crate::env::Env;

    #[test]
    fn fresh_deck_holds_fifty_two_cards() {
        let mut env = BlackJackEnv::new(42);
        env.reset();
        // Four cards are dealt immediately.
        assert_eq!(env.deck.len(), 48);
        let tens = env.deck.iter().filter(|&&card| card == 10).count()
            + env.player.iter().filter(|&&card| card == 10).count()
            + env.dealer.iter().filter(|&&card| card == 10).count();
        assert_eq!(tens, 16);
    }

    #[test]
    fn aces_devalue_while_busting() {
        assert_eq!(BlackJackEnv::compute_score(&[11, 11]), 12);
        assert_eq!(BlackJackEnv::compute_score(&[11, 10]), 21);
        assert_eq!(BlackJackEnv::compute_score(&[11, 11, 10]), 12);
        assert_eq!(BlackJackEnv::compute_score(&[11, 5, 9]), 15);
        assert_eq!(BlackJackEnv::compute_score(&[10, 10, 5]), 25);
    }

    #[test]
    fn step_before_reset_is_rejected() {
        let mut env = BlackJackEnv::new(0);
        assert!(env.step(1).is_err());
    }

    #[test]
    fn dealer_draws_to_seventeen() {
        let mut env = BlackJackEnv::new(9);
        env.reset();
        let (obs, _, terminated) = env.step(1).unwrap();
        assert!(terminated);
        assert!(obs.d_score >= 17);
    }

    #[test]
    fn push_pays_the_player() {
        let mut env = BlackJackEnv::new(1);
        env.reset();
        env.player = vec![10, 10];
        env.dealer = vec![10, 10];
        let (obs, reward, terminated) = env.step(1).unwrap();
        assert!(terminated);
        assert_eq!(obs, BlackJackObservation::new(20, 20));
        assert_eq!(reward, 1.0);
    }

    #[test]
    fn busting_loses_immediately() {
        let mut env = BlackJackEnv::new(2);
        env.reset();
        env.player = vec![10, 9];
        env.deck.push(10);
        let (_, reward, terminated) = env.step(0).unwrap();
        assert!(terminated);
        assert_eq!(reward, -1.0);
    }

    #[test]
    fn hitting_below_twenty_one_continues_the_episode() {
        let mut env = BlackJackEnv::new(3);
        env.reset();
        env.player = vec![2, 3];
        env.deck.push(5);
        let (obs, reward, terminated) = env.step(0).unwrap();
        assert!(!terminated);
        assert_eq!(reward, 0.0);
        assert_eq!(obs.p_score, 10);
    }
}
