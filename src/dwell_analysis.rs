/********** Dwell-Time Analysis Module **********
* Tools for characterizing the kinetics of single-molecule fluorescence
* traces through their dwell-time distributions:
*
* - Truncated-and-renormalized exponential mixture densities (1 to 4
*   components). Dwell times are only observable inside the recording
*   window [Tmin, Tmax), so each component is renormalized to integrate
*   to 1 over that window rather than over [0, inf).
* - Logarithmic rebinning of dwell-time samples for multi-decade data.
* - Negative log-likelihood evaluation, to be minimized by an external
*   optimizer when fitting mixture parameters to observed dwell times.
**********/

pub mod exponential_mixture;
pub mod log_binning;
pub mod likelihood;

// Just for testing
#[cfg(test)]
mod dwell_tests;
