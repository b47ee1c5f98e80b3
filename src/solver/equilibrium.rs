//! Closed-form Stackelberg equilibrium over an active client set
//!
//! For active set `S` and budget `B`:
//!
//! ```text
//! alpha  = Σ_S sqrt(w·varrho/eta) / (B + Σ_S varrho/eta)
//! p[c]   = alpha · sqrt(eta·w/varrho)
//! B_c[c] = w/p[c] − varrho/eta
//! ```

use crate::errors::{Result, StackelbergError};
use crate::types::{ClientParams, GameInput};

/// Shared multiplier `alpha` for the clients flagged in `active`
pub fn multiplier(input: &GameInput, active: &[bool]) -> Result<f64> {
    let (demand, cost) = input
        .clients()
        .zip(active)
        .filter(|(_, active)| **active)
        .fold((0.0, 0.0), |(demand, cost), (params, _)| {
            (demand + params.demand_root(), cost + params.cost_ratio())
        });

    let alpha = demand / (input.budget + cost);
    if !alpha.is_finite() || alpha <= 0.0 {
        return Err(StackelbergError::Degenerate(format!(
            "alpha = {} / ({} + {}) is not a positive finite number",
            demand, input.budget, cost
        )));
    }

    Ok(alpha)
}

/// Price and allocation of `client` under multiplier `alpha`
pub fn price_and_allocation(client: usize, params: ClientParams, alpha: f64) -> Result<(f64, f64)> {
    let price = alpha * params.price_factor();
    if !price.is_finite() || price <= 0.0 {
        return Err(StackelbergError::Domain {
            client,
            reason: format!("price {} is not a positive finite number", price),
        });
    }

    let allocation = params.weight / price - params.cost_ratio();
    if !allocation.is_finite() {
        return Err(StackelbergError::Domain {
            client,
            reason: format!("allocation {} is not finite", allocation),
        });
    }

    Ok((price, allocation))
}
