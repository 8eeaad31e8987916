// Readers for the two instrument output files produced per recording: the
// binary traces file holding raw intensity time series for every molecule
// and colour channel, and the text acquisition log holding the exposure
// time plus free-form metadata. Both are read in full and the handles
// released before returning; nothing here retries or recovers partial reads.

pub mod traces_file;
pub mod log_file;
