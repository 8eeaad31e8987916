// Cross-module checks: synthetic dwell times drawn from a mixture should be
// recognized by the likelihood and reproduced by the log-binned histogram.

#[cfg(test)]
mod tests {
    use crate::dwell_analysis::exponential_mixture::{MixtureModel, MixtureOrder};
    use crate::dwell_analysis::likelihood::{neg_log_likelihood, Parameters};
    use crate::dwell_analysis::log_binning::log_bin;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_true_parameters_beat_perturbed_parameters() {
        let mut rng = StdRng::seed_from_u64(42);

        let truth =
            MixtureModel::new(vec![0.3, 0.7], vec![0.5, 4.0], 0.0, f64::INFINITY).unwrap();
        let data = truth.sample(3000, &mut rng);

        let at_truth = neg_log_likelihood(
            &Parameters::Positional(vec![0.3, 0.7, 0.5, 4.0]),
            MixtureOrder::Two,
            &data,
        )
        .unwrap();

        let at_perturbed = neg_log_likelihood(
            &Parameters::Positional(vec![0.5, 0.5, 1.5, 1.6]),
            MixtureOrder::Two,
            &data,
        )
        .unwrap();

        assert!(
            at_truth < at_perturbed,
            "nll at truth {} vs perturbed {}",
            at_truth,
            at_perturbed
        );
    }

    #[test]
    fn test_histogram_tracks_model_density() {
        let mut rng = StdRng::seed_from_u64(1234);

        let model = MixtureModel::new(vec![1.0], vec![2.0], 0.0, f64::INFINITY).unwrap();
        let data = model.sample(20_000, &mut rng);

        let histogram = log_bin(&data, 0.2, true).unwrap();
        let expected = model.density(histogram.get_centers()).unwrap();

        // only judge well-populated bins away from the range edges
        for (i, &center) in histogram.get_centers().iter().enumerate() {
            if !(0.5..=4.0).contains(&center) {
                continue;
            }
            let empirical = histogram.get_densities()[i];
            let relative = (empirical - expected[i]).abs() / expected[i];
            assert!(
                relative < 0.15,
                "bin at {} off by {} (empirical {}, expected {})",
                center,
                relative,
                empirical,
                expected[i]
            );
        }
    }
}
