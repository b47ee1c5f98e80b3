//! Problem definition: budget plus per-client parameters

use crate::errors::{Result, StackelbergError};
use serde::{Deserialize, Serialize};

/// Parameters of a single client
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClientParams {
    /// Weight `w`
    pub weight: f64,

    /// Cost/variance coefficient `varrho`
    pub varrho: f64,

    /// Efficiency coefficient `eta`
    pub eta: f64,
}

impl ClientParams {
    pub fn new(weight: f64, varrho: f64, eta: f64) -> Self {
        Self { weight, varrho, eta }
    }

    /// `varrho / eta`
    pub fn cost_ratio(&self) -> f64 {
        self.varrho / self.eta
    }

    /// `sqrt(w * varrho / eta)`, this client's term in the multiplier numerator
    pub fn demand_root(&self) -> f64 {
        (self.weight * self.varrho / self.eta).sqrt()
    }

    /// `sqrt(eta * w / varrho)`, scales the multiplier into a unit price
    pub fn price_factor(&self) -> f64 {
        (self.eta * self.weight / self.varrho).sqrt()
    }

    /// Reject non-positive or non-finite parameters
    pub fn validate(&self, client: usize) -> Result<()> {
        for (name, value) in [("w", self.weight), ("varrho", self.varrho), ("eta", self.eta)] {
            if !value.is_finite() {
                return Err(StackelbergError::Domain {
                    client,
                    reason: format!("{} must be finite, got {}", name, value),
                });
            }
            if value <= 0.0 {
                return Err(StackelbergError::Domain {
                    client,
                    reason: format!("{} must be positive, got {}", name, value),
                });
            }
        }
        Ok(())
    }
}

/// Complete input of one solve: the shared budget and three aligned sequences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameInput {
    /// Total shared budget `B`
    pub budget: f64,

    /// Per-client weights `w`
    #[serde(alias = "w")]
    pub weights: Vec<f64>,

    /// Per-client cost coefficients
    pub varrho: Vec<f64>,

    /// Per-client efficiency coefficients
    pub eta: Vec<f64>,
}

impl GameInput {
    pub fn new(budget: f64, weights: Vec<f64>, varrho: Vec<f64>, eta: Vec<f64>) -> Self {
        Self {
            budget,
            weights,
            varrho,
            eta,
        }
    }

    /// Build an input from a list of client parameter records
    pub fn from_clients(budget: f64, clients: &[ClientParams]) -> Self {
        Self {
            budget,
            weights: clients.iter().map(|c| c.weight).collect(),
            varrho: clients.iter().map(|c| c.varrho).collect(),
            eta: clients.iter().map(|c| c.eta).collect(),
        }
    }

    /// Number of clients, taken from the weight sequence
    pub fn client_count(&self) -> usize {
        self.weights.len()
    }

    /// Parameters of client `c`
    ///
    /// Panics if `c` is out of range; callers validate the shape first.
    pub fn client(&self, c: usize) -> ClientParams {
        ClientParams::new(self.weights[c], self.varrho[c], self.eta[c])
    }

    /// Iterate over all clients in index order
    pub fn clients(&self) -> impl Iterator<Item = ClientParams> + '_ {
        (0..self.client_count()).map(move |c| self.client(c))
    }

    /// Check that all three sequences hold exactly `expected` entries
    pub fn check_shape(&self, expected: usize) -> Result<()> {
        if self.weights.len() != expected
            || self.varrho.len() != expected
            || self.eta.len() != expected
        {
            return Err(StackelbergError::ShapeMismatch {
                expected,
                weights: self.weights.len(),
                varrho: self.varrho.len(),
                eta: self.eta.len(),
            });
        }
        Ok(())
    }

    /// Validate shape, budget and every client's parameters
    pub fn validate(&self) -> Result<()> {
        self.check_shape(self.client_count())?;

        if self.client_count() == 0 {
            return Err(StackelbergError::InvalidInput(
                "at least one client is required".to_string(),
            ));
        }

        if !self.budget.is_finite() || self.budget < 0.0 {
            return Err(StackelbergError::InvalidInput(format!(
                "budget must be finite and non-negative, got {}",
                self.budget
            )));
        }

        for (c, params) in self.clients().enumerate() {
            params.validate(c)?;
        }

        Ok(())
    }
}
