use std::fs::File;
use std::io::{self, Read};

// Intensity traces from one recording, reshaped to
// [colour][molecule][frame]. Read-only once constructed.
#[derive(Debug, Clone)]
pub struct TraceBundle {
    intensities: Vec<Vec<Vec<i16>>>,
    colour_count: usize,
    molecule_count: usize,
    frame_count: usize,
}

impl TraceBundle {
    pub fn get_colour_count(&self) -> usize {
        self.colour_count
    }

    pub fn get_molecule_count(&self) -> usize {
        self.molecule_count
    }

    pub fn get_frame_count(&self) -> usize {
        self.frame_count
    }

    // Full time series for one molecule in one colour channel
    pub fn trace(&self, colour: usize, molecule: usize) -> &[i16] {
        &self.intensities[colour][molecule]
    }

    pub fn intensity(&self, colour: usize, molecule: usize, frame: usize) -> i16 {
        self.intensities[colour][molecule][frame]
    }
}

// Read a traces file: i32 frame count, i16 trace count, then
// frame_count * trace_count i16 intensity samples, all little-endian.
pub fn read_traces(file_path: &str, colour_count: usize) -> Result<TraceBundle, TracesFileError> {
    let file = File::open(file_path)
        .map_err(|_| TracesFileError::FailedToOpenFile { file: file_path.to_string() })?;
    decode_traces(file, colour_count)
}

// Decode the binary traces layout from any byte source. The flat sample
// stream is column-major with respect to the [colour, molecule, frame]
// shape: sample (c, m, f) sits at index c + C*(m + M*f).
pub fn decode_traces<R: Read>(
    mut reader: R,
    colour_count: usize,
) -> Result<TraceBundle, TracesFileError> {
    if colour_count == 0 {
        return Err(TracesFileError::MalformedFile {
            reason: "Colour count must be at least 1.".to_string(),
        });
    }

    let frame_count = read_i32(&mut reader)?;
    let trace_count = read_i16(&mut reader)?;

    if frame_count <= 0 || trace_count <= 0 {
        return Err(TracesFileError::MalformedFile {
            reason: format!(
                "Non-positive frame count ({}) or trace count ({}).",
                frame_count, trace_count
            ),
        });
    }

    let frame_count = frame_count as usize;
    let trace_count = trace_count as usize;

    if trace_count % colour_count != 0 {
        return Err(TracesFileError::MalformedFile {
            reason: format!(
                "Trace count {} is not divisible by colour count {}.",
                trace_count, colour_count
            ),
        });
    }
    let molecule_count = trace_count / colour_count;

    let mut raw = vec![0i16; frame_count * trace_count];
    for sample in raw.iter_mut() {
        *sample = read_i16(&mut reader)?;
    }

    let intensities = (0..colour_count)
        .map(|c| {
            (0..molecule_count)
                .map(|m| {
                    (0..frame_count)
                        .map(|f| raw[c + colour_count * (m + molecule_count * f)])
                        .collect()
                })
                .collect()
        })
        .collect();

    Ok(TraceBundle {
        intensities,
        colour_count,
        molecule_count,
        frame_count,
    })
}

fn read_i32<R: Read>(reader: &mut R) -> Result<i32, TracesFileError> {
    let mut bytes = [0u8; 4];
    reader
        .read_exact(&mut bytes)
        .map_err(|error| read_error(&error))?;
    Ok(i32::from_le_bytes(bytes))
}

fn read_i16<R: Read>(reader: &mut R) -> Result<i16, TracesFileError> {
    let mut bytes = [0u8; 2];
    reader
        .read_exact(&mut bytes)
        .map_err(|error| read_error(&error))?;
    Ok(i16::from_le_bytes(bytes))
}

fn read_error(error: &io::Error) -> TracesFileError {
    TracesFileError::ReadFailed {
        kind: error.kind(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TracesFileError {
    FailedToOpenFile { file: String },
    ReadFailed { kind: io::ErrorKind },
    MalformedFile { reason: String },
}
