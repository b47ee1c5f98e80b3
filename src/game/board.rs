//! In-memory game board
//!
//! A provider owns the budget of each game; registered operators submit
//! their parameters once per game. After inputs close the provider either
//! runs the solver on the board or publishes externally computed results.

use crate::errors::{Result, StackelbergError};
use crate::game::events::GameEvent;
use crate::game::state::{GameAction, GameState};
use crate::solver::StackelbergSolver;
use crate::types::{ClientParams, GameInput};
use std::collections::{BTreeSet, HashMap};
use tracing::info;

/// Per-game record
#[derive(Debug, Clone, Default)]
struct Game {
    state: GameState,
    budget: f64,
    participants: Vec<String>,
    params: Vec<ClientParams>,
    prices: Vec<f64>,
    allocations: Vec<f64>,
}

/// Provider/operator game registry
#[derive(Debug, Clone)]
pub struct GameBoard {
    provider: String,
    operators: BTreeSet<String>,
    games: HashMap<u64, Game>,
    events: Vec<GameEvent>,
    solver: StackelbergSolver,
}

impl GameBoard {
    /// Create a board owned by `provider` with an initial operator set
    pub fn new<I, S>(provider: impl Into<String>, operators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            provider: provider.into(),
            operators: operators.into_iter().map(Into::into).collect(),
            games: HashMap::new(),
            events: Vec::new(),
            solver: StackelbergSolver::new(),
        }
    }

    /// Replace the solver used by [`GameBoard::solve`]
    pub fn with_solver(mut self, solver: StackelbergSolver) -> Self {
        self.solver = solver;
        self
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn is_operator(&self, who: &str) -> bool {
        self.operators.contains(who)
    }

    /// Register a new operator; returns `false` if already registered
    pub fn grant_operator(&mut self, caller: &str, operator: &str) -> Result<bool> {
        self.require_provider(caller, "grant operator role")?;
        let added = self.operators.insert(operator.to_string());
        if added {
            info!(operator, "operator granted");
            self.events.push(GameEvent::OperatorGranted {
                operator: operator.to_string(),
            });
        }
        Ok(added)
    }

    /// Remove an operator; returns `false` if it was not registered
    pub fn revoke_operator(&mut self, caller: &str, operator: &str) -> Result<bool> {
        self.require_provider(caller, "revoke operator role")?;
        let removed = self.operators.remove(operator);
        if removed {
            info!(operator, "operator revoked");
            self.events.push(GameEvent::OperatorRevoked {
                operator: operator.to_string(),
            });
        }
        Ok(removed)
    }

    /// Open game `id` with the shared `budget`
    pub fn initialize(&mut self, caller: &str, id: u64, budget: f64) -> Result<()> {
        self.require_provider(caller, "initialize a game")?;
        let next = self.state_of(id).transition(GameAction::Initialize)?;

        if !budget.is_finite() || budget < 0.0 {
            return Err(StackelbergError::InvalidInput(format!(
                "Initialize: budget must be finite and non-negative, got {}",
                budget
            )));
        }

        self.games.insert(
            id,
            Game {
                state: next,
                budget,
                ..Game::default()
            },
        );
        info!(id, budget, "game started");
        self.events.push(GameEvent::Start { id });
        Ok(())
    }

    /// Submit an operator's parameters to game `id`
    pub fn input(&mut self, caller: &str, id: u64, eta: f64, weight: f64, varrho: f64) -> Result<()> {
        if !self.is_operator(caller) {
            return Err(StackelbergError::Unauthorized {
                caller: caller.to_string(),
                action: "submit input".to_string(),
            });
        }
        let next = self.state_of(id).transition(GameAction::Input)?;

        if eta == 0.0 || weight == 0.0 || varrho == 0.0 {
            return Err(StackelbergError::InvalidInput(
                "Input: eta, w and varrho cannot be zero".to_string(),
            ));
        }

        let game = self.game_mut(id)?;
        if game.participants.iter().any(|p| p == caller) {
            return Err(StackelbergError::InvalidInput(
                "Input: operator is already a participant".to_string(),
            ));
        }

        let params = ClientParams::new(weight, varrho, eta);
        params.validate(game.participants.len())?;

        game.participants.push(caller.to_string());
        game.params.push(params);
        game.state = next;

        info!(id, operator = caller, "input accepted");
        self.events.push(GameEvent::Input {
            id,
            operator: caller.to_string(),
            eta,
            weight,
            varrho,
        });
        Ok(())
    }

    /// Close inputs of game `id`
    pub fn init_evaluation(&mut self, caller: &str, id: u64) -> Result<()> {
        self.require_provider(caller, "start evaluation")?;
        let next = self.state_of(id).transition(GameAction::InitEvaluation)?;

        self.game_mut(id)?.state = next;
        info!(id, "evaluation started");
        self.events.push(GameEvent::InitEvaluation { id });
        Ok(())
    }

    /// Run the solver over the participants of game `id` and publish the result
    pub fn solve(&mut self, caller: &str, id: u64) -> Result<()> {
        self.require_provider(caller, "solve a game")?;
        let next = self.state_of(id).transition(GameAction::Publish)?;

        let game = self.game_mut(id)?;
        let input = GameInput::from_clients(game.budget, &game.params);
        let allocation = self.solver.solve(&input)?;
        let (prices, allocations) = allocation.into_parts();

        self.publish(id, next, prices, allocations)
    }

    /// Publish externally computed results for game `id`
    pub fn output(&mut self, caller: &str, id: u64, prices: Vec<f64>, allocations: Vec<f64>) -> Result<()> {
        self.require_provider(caller, "publish output")?;
        let next = self.state_of(id).transition(GameAction::Publish)?;

        let participants = self.game_mut(id)?.participants.len();
        if prices.len() != participants || allocations.len() != participants {
            return Err(StackelbergError::InvalidInput(
                "Output: required equal length".to_string(),
            ));
        }

        self.publish(id, next, prices, allocations)
    }

    fn publish(&mut self, id: u64, next: GameState, prices: Vec<f64>, allocations: Vec<f64>) -> Result<()> {
        let game = self.game_mut(id)?;
        game.prices = prices.clone();
        game.allocations = allocations.clone();
        game.state = next;

        info!(id, "results published");
        self.events.push(GameEvent::Output {
            id,
            prices,
            allocations,
        });
        Ok(())
    }

    /// Lifecycle state of game `id`; unknown ids are `Undefined`
    pub fn state_of(&self, id: u64) -> GameState {
        self.games.get(&id).map(|g| g.state).unwrap_or_default()
    }

    /// Participants of game `id` in submission order
    pub fn participants_of(&self, id: u64) -> Vec<String> {
        self.games
            .get(&id)
            .map(|g| g.participants.clone())
            .unwrap_or_default()
    }

    /// Published price of `operator` in game `id`
    pub fn price_of(&self, id: u64, operator: &str) -> Option<f64> {
        self.published(id, operator).map(|(game, idx)| game.prices[idx])
    }

    /// Published allocation (bandwidth) of `operator` in game `id`
    pub fn bandwidth_of(&self, id: u64, operator: &str) -> Option<f64> {
        self.published(id, operator).map(|(game, idx)| game.allocations[idx])
    }

    /// All recorded events
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    fn published(&self, id: u64, operator: &str) -> Option<(&Game, usize)> {
        let game = self.games.get(&id)?;
        if game.state != GameState::Finished {
            return None;
        }
        let idx = game.participants.iter().position(|p| p == operator)?;
        Some((game, idx))
    }

    fn require_provider(&self, caller: &str, action: &str) -> Result<()> {
        if caller != self.provider {
            return Err(StackelbergError::Unauthorized {
                caller: caller.to_string(),
                action: action.to_string(),
            });
        }
        Ok(())
    }

    fn game_mut(&mut self, id: u64) -> Result<&mut Game> {
        self.games.get_mut(&id).ok_or(StackelbergError::UnknownGame(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> GameBoard {
        GameBoard::new("provider", ["op1", "op2", "op3"])
    }

    fn started() -> GameBoard {
        let mut board = board();
        board.initialize("provider", 0, 1.0).unwrap();
        board
    }

    #[test]
    fn test_initialize_requires_provider() {
        let mut board = board();
        assert!(matches!(
            board.initialize("op1", 0, 10.0),
            Err(StackelbergError::Unauthorized { .. })
        ));
        assert_eq!(board.state_of(0), GameState::Undefined);
    }

    #[test]
    fn test_initialize_twice_rejected() {
        let mut board = started();
        assert!(matches!(
            board.initialize("provider", 0, 1.0),
            Err(StackelbergError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_initialize_rejects_negative_budget() {
        let mut board = board();
        assert!(board.initialize("provider", 0, -1.0).is_err());
        assert_eq!(board.state_of(0), GameState::Undefined);
    }

    #[test]
    fn test_provider_cannot_input() {
        let mut board = started();
        assert!(matches!(
            board.input("provider", 0, 1.0, 1.0, 1.0),
            Err(StackelbergError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_input_rejects_zero_attributes() {
        let mut board = started();
        for (eta, w, varrho) in [(1.0, 0.0, 1.0), (0.0, 1.0, 1.0), (1.0, 1.0, 0.0)] {
            match board.input("op1", 0, eta, w, varrho) {
                Err(StackelbergError::InvalidInput(msg)) => {
                    assert!(msg.contains("cannot be zero"));
                }
                other => panic!("Expected InvalidInput, got {:?}", other),
            }
        }
        assert!(board.participants_of(0).is_empty());
    }

    #[test]
    fn test_input_once_per_operator() {
        let mut board = started();
        board.input("op1", 0, 1.0, 1.0, 1.0).unwrap();
        match board.input("op1", 0, 1.0, 1.0, 1.0) {
            Err(StackelbergError::InvalidInput(msg)) => assert!(msg.contains("already a participant")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_input_after_evaluation_rejected() {
        let mut board = started();
        board.init_evaluation("provider", 0).unwrap();
        assert!(matches!(
            board.input("op1", 0, 1.0, 1.0, 1.0),
            Err(StackelbergError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_init_evaluation_before_initialize_rejected() {
        let mut board = board();
        assert!(board.init_evaluation("provider", 0).is_err());
        assert!(board.init_evaluation("op1", 0).is_err());
    }

    #[test]
    fn test_solve_publishes_results() {
        let mut board = started();
        board.input("op1", 0, 1.0, 1.0, 1.0).unwrap();
        board.input("op2", 0, 1.0, 1.0, 1.0).unwrap();
        board.input("op3", 0, 1.0, 100.0, 1.0).unwrap();
        board.init_evaluation("provider", 0).unwrap();

        assert!(board.solve("op1", 0).is_err());
        board.solve("provider", 0).unwrap();

        assert_eq!(board.state_of(0), GameState::Finished);
        assert_eq!(board.price_of(0, "op1"), Some(0.0));
        assert_eq!(board.bandwidth_of(0, "op2"), Some(0.0));
        let price = board.price_of(0, "op3").unwrap();
        let bandwidth = board.bandwidth_of(0, "op3").unwrap();
        assert!((price - 50.0).abs() < 1e-9);
        assert!((bandwidth - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_solve_before_evaluation_rejected() {
        let mut board = started();
        board.input("op1", 0, 1.0, 1.0, 1.0).unwrap();
        assert!(matches!(
            board.solve("provider", 0),
            Err(StackelbergError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_output_requires_equal_length() {
        let mut board = started();
        board.input("op1", 0, 1.0, 1.0, 1.0).unwrap();
        board.input("op2", 0, 1.0, 1.0, 1.0).unwrap();
        board.init_evaluation("provider", 0).unwrap();

        match board.output("provider", 0, vec![1.0], vec![1.0, 2.0]) {
            Err(StackelbergError::InvalidInput(msg)) => assert!(msg.contains("required equal length")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
        assert_eq!(board.state_of(0), GameState::Evaluation);

        board.output("provider", 0, vec![0.5, 0.5], vec![1.0, 2.0]).unwrap();
        assert_eq!(board.state_of(0), GameState::Finished);
        assert_eq!(board.bandwidth_of(0, "op2"), Some(2.0));
    }

    #[test]
    fn test_results_hidden_until_finished() {
        let mut board = started();
        board.input("op1", 0, 1.0, 1.0, 1.0).unwrap();
        assert_eq!(board.price_of(0, "op1"), None);
        assert_eq!(board.price_of(7, "op1"), None);
    }

    #[test]
    fn test_operator_roles() {
        let mut board = board();
        assert!(board.grant_operator("op1", "op4").is_err());
        assert!(board.grant_operator("provider", "op4").unwrap());
        assert!(!board.grant_operator("provider", "op4").unwrap());
        assert!(board.is_operator("op4"));
        assert!(board.revoke_operator("provider", "op4").unwrap());
        assert!(!board.is_operator("op4"));
        assert_eq!(
            board.events(),
            &[
                GameEvent::OperatorGranted { operator: "op4".to_string() },
                GameEvent::OperatorRevoked { operator: "op4".to_string() },
            ]
        );
    }
}
