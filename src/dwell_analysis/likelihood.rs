use super::exponential_mixture::{MixtureError, MixtureModel, MixtureOrder};

// Densities exactly equal to zero are clamped to this floor before the log,
// so a single unpopulated point does not drive the objective to +inf. This
// is a pragmatic regularization for the optimizer, not a principled
// probability floor.
const ZERO_DENSITY_FLOOR: f64 = 1e-30;

// Parameter vector for a likelihood evaluation. Optimizer libraries hand
// over positional slices; manual callers may prefer named parameters. Both
// reduce to the same ordered value sequence before reaching the model.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameters {
    Positional(Vec<f64>),
    Named(Vec<(String, f64)>),
}

impl Parameters {
    pub fn values(&self) -> Vec<f64> {
        match self {
            Parameters::Positional(values) => values.clone(),
            Parameters::Named(pairs) => pairs.iter().map(|(_, value)| *value).collect(),
        }
    }

    pub fn get_len(&self) -> usize {
        match self {
            Parameters::Positional(values) => values.len(),
            Parameters::Named(pairs) => pairs.len(),
        }
    }
}

// Negative log-likelihood of `data` under a K-component truncated
// exponential mixture.
//
// The parameter vector lays out the model arguments in call order: the K
// weights (skipped for K=1, whose weight is implicitly 1), then the K time
// constants, then optionally t_min and t_max (defaulting to 0 and +inf).
// Model errors, including InvalidDensity from the K=3/K=4 guards, propagate
// unchanged so an external optimizer can treat the point as infeasible.
pub fn neg_log_likelihood(
    parameters: &Parameters,
    order: MixtureOrder,
    data: &[f64],
) -> Result<f64, LikelihoodError> {
    let values = parameters.values();
    let model = build_model(&values, order)?;

    let mut densities = model
        .density(data)
        .map_err(|error| LikelihoodError::Mixture { error })?;

    for value in densities.iter_mut() {
        if *value == 0.0 {
            *value = ZERO_DENSITY_FLOOR;
        }
    }

    Ok(-densities.map(f64::ln).sum())
}

fn build_model(values: &[f64], order: MixtureOrder) -> Result<MixtureModel, LikelihoodError> {
    let weight_count = order.weight_count();
    // K=1 has no explicit weight parameter
    let base = if order == MixtureOrder::One {
        1
    } else {
        2 * weight_count
    };

    let window = values.len().checked_sub(base).filter(|extra| *extra <= 2);
    let window = match window {
        Some(extra) => extra,
        None => {
            return Err(LikelihoodError::WrongParameterCount {
                expected: base,
                got: values.len(),
            })
        }
    };

    let (weights, time_constants) = if order == MixtureOrder::One {
        (vec![1.0], values[..1].to_vec())
    } else {
        (
            values[..weight_count].to_vec(),
            values[weight_count..base].to_vec(),
        )
    };

    let t_min = if window >= 1 { values[base] } else { 0.0 };
    let t_max = if window == 2 { values[base + 1] } else { f64::INFINITY };

    MixtureModel::new(weights, time_constants, t_min, t_max)
        .map_err(|error| LikelihoodError::Mixture { error })
}

#[derive(Debug, Clone, PartialEq)]
pub enum LikelihoodError {
    WrongParameterCount { expected: usize, got: usize },
    Mixture { error: MixtureError },
}
