use nalgebra::DVector;
use rand::Rng;
use rand_distr::{Distribution, Exp};

// Supported mixture orders. K is inferred from the number of weights handed
// to the constructor, so this enum stays closed over 1..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixtureOrder {
    One,
    Two,
    Three,
    Four,
}

impl MixtureOrder {
    pub fn weight_count(&self) -> usize {
        match self {
            MixtureOrder::One => 1,
            MixtureOrder::Two => 2,
            MixtureOrder::Three => 3,
            MixtureOrder::Four => 4,
        }
    }

    pub fn try_from_weight_count(count: usize) -> Result<Self, MixtureError> {
        match count {
            1 => Ok(MixtureOrder::One),
            2 => Ok(MixtureOrder::Two),
            3 => Ok(MixtureOrder::Three),
            4 => Ok(MixtureOrder::Four),
            _ => Err(MixtureError::UnsupportedOrder { order: count }),
        }
    }
}

// K-component exponential mixture truncated to the observation window
// [t_min, t_max) and renormalized so it integrates to 1 over that window.
//
// Guard policy per order, kept exactly as downstream fitting code relies on:
//
//   K=1, K=2: no guards at all. Negative weights or densities are returned
//             as-is and are the caller's problem.
//   K=3, K=4: a negative last weight short-circuits to an all-zero density
//             (parameter-search excursion guard, not a derivation); any
//             negative value in the computed sum fails the whole call with
//             InvalidDensity.
//
// For K=4 the last weight must additionally satisfy
// w4 == 1 - w1 - w2 - w3 exactly. That is an asserted precondition on the
// caller, violating it is a programming error and panics.
#[derive(Debug, Clone)]
pub struct MixtureModel {
    order: MixtureOrder,
    weights: Vec<f64>,
    time_constants: Vec<f64>,
    t_min: f64,
    t_max: f64,
}

impl MixtureModel {
    pub fn new(
        weights: Vec<f64>,
        time_constants: Vec<f64>,
        t_min: f64,
        t_max: f64,
    ) -> Result<Self, MixtureError> {
        if weights.len() != time_constants.len() {
            return Err(MixtureError::MismatchedOrders {
                weights: weights.len(),
                time_constants: time_constants.len(),
            });
        }

        let order = MixtureOrder::try_from_weight_count(weights.len())?;

        for (index, &tau) in time_constants.iter().enumerate() {
            if !(tau.is_finite() && tau > 0.0) {
                return Err(MixtureError::InvalidTimeConstant { index, value: tau });
            }
        }

        // t_max may be +inf; NaN on either bound fails both comparisons
        if !(t_min >= 0.0 && t_max > t_min) {
            return Err(MixtureError::InvalidWindow { t_min, t_max });
        }

        if order == MixtureOrder::Four {
            let derived = 1.0 - weights[0] - weights[1] - weights[2];
            assert!(
                weights[3] == derived,
                "4-component mixture weight 4 must equal 1 - w1 - w2 - w3 exactly (got {}, expected {})",
                weights[3],
                derived,
            );
        }

        Ok(MixtureModel {
            order,
            weights,
            time_constants,
            t_min,
            t_max,
        })
    }

    pub fn get_order(&self) -> MixtureOrder {
        self.order
    }

    pub fn get_weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn get_time_constants(&self) -> &[f64] {
        &self.time_constants
    }

    pub fn get_window(&self) -> (f64, f64) {
        (self.t_min, self.t_max)
    }

    // Evaluate the mixture density at each time point.
    pub fn density(&self, t: &[f64]) -> Result<DVector<f64>, MixtureError> {
        let guarded = matches!(self.order, MixtureOrder::Three | MixtureOrder::Four);

        let last_weight = self.weights[self.order.weight_count() - 1];
        if guarded && last_weight < 0.0 {
            return Ok(DVector::zeros(t.len()));
        }

        let values = self.component_sum(t);

        if guarded {
            if let Some(index) = values.iter().position(|value| *value < 0.0) {
                return Err(MixtureError::InvalidDensity {
                    index,
                    value: values[index],
                });
            }
        }

        Ok(values)
    }

    fn component_sum(&self, t: &[f64]) -> DVector<f64> {
        let mut total = DVector::zeros(t.len());

        for (&weight, &tau) in self.weights.iter().zip(self.time_constants.iter()) {
            // Probability mass of the untruncated exponential inside the window
            let q = (-self.t_min / tau).exp() - (-self.t_max / tau).exp();

            let component = DVector::from_iterator(
                t.len(),
                t.iter().map(|&ti| weight / tau * (-ti / tau).exp() / q),
            );
            total += component;
        }

        total
    }

    // Draw synthetic dwell times from the truncated mixture: pick a component
    // by cumulative weight, sample its exponential, reject draws outside the
    // window. Weights must be non-negative with a positive sum here (the
    // fitting-side guard policy above does not apply to generation).
    pub fn sample<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<f64> {
        let total_weight: f64 = self.weights.iter().sum();

        let components: Vec<Exp<f64>> = self
            .time_constants
            .iter()
            .map(|&tau| Exp::new(1.0 / tau).expect("time constants are validated positive and finite"))
            .collect();

        let mut draws = Vec::with_capacity(count);

        while draws.len() < count {
            let random_value = rng.gen_range(0.0..total_weight);
            let mut cumulative_prob = 0.0;
            let mut chosen = components.len() - 1;

            for (k, &weight) in self.weights.iter().enumerate() {
                cumulative_prob += weight;
                if random_value < cumulative_prob {
                    chosen = k;
                    break;
                }
            }

            let value = components[chosen].sample(rng);
            if value >= self.t_min && value < self.t_max {
                draws.push(value);
            }
        }

        draws
    }
}

// Single-component density. The weight is implicitly 1.
pub fn exp1_density(
    t: &[f64],
    tau: f64,
    t_min: f64,
    t_max: f64,
) -> Result<DVector<f64>, MixtureError> {
    MixtureModel::new(vec![1.0], vec![tau], t_min, t_max)?.density(t)
}

pub fn exp2_density(
    t: &[f64],
    p1: f64,
    p2: f64,
    tau1: f64,
    tau2: f64,
    t_min: f64,
    t_max: f64,
) -> Result<DVector<f64>, MixtureError> {
    MixtureModel::new(vec![p1, p2], vec![tau1, tau2], t_min, t_max)?.density(t)
}

pub fn exp3_density(
    t: &[f64],
    p1: f64,
    p2: f64,
    p3: f64,
    tau1: f64,
    tau2: f64,
    tau3: f64,
    t_min: f64,
    t_max: f64,
) -> Result<DVector<f64>, MixtureError> {
    MixtureModel::new(vec![p1, p2, p3], vec![tau1, tau2, tau3], t_min, t_max)?.density(t)
}

pub fn exp4_density(
    t: &[f64],
    p1: f64,
    p2: f64,
    p3: f64,
    p4: f64,
    tau1: f64,
    tau2: f64,
    tau3: f64,
    tau4: f64,
    t_min: f64,
    t_max: f64,
) -> Result<DVector<f64>, MixtureError> {
    MixtureModel::new(vec![p1, p2, p3, p4], vec![tau1, tau2, tau3, tau4], t_min, t_max)?
        .density(t)
}

#[derive(Debug, Clone, PartialEq)]
pub enum MixtureError {
    InvalidDensity { index: usize, value: f64 },
    UnsupportedOrder { order: usize },
    MismatchedOrders { weights: usize, time_constants: usize },
    InvalidTimeConstant { index: usize, value: f64 },
    InvalidWindow { t_min: f64, t_max: f64 },
}
