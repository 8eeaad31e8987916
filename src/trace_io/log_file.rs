use std::fs;

// Acquisition log for one recording. Only the exposure time is parsed; the
// raw text is kept around for display.
#[derive(Debug, Clone, PartialEq)]
pub struct AcquisitionLog {
    exposure_time: f64,
    details: String,
}

impl AcquisitionLog {
    pub fn get_exposure_time(&self) -> f64 {
        self.exposure_time
    }

    pub fn get_details(&self) -> &str {
        &self.details
    }
}

pub fn read_log(file_path: &str) -> Result<AcquisitionLog, LogFileError> {
    let text = fs::read_to_string(file_path)
        .map_err(|_| LogFileError::FailedToOpenFile { file: file_path.to_string() })?;
    parse_log(&text)
}

// The exposure time is the third whitespace-separated numeric field of the
// first line; the remaining lines are free-form metadata.
pub fn parse_log(text: &str) -> Result<AcquisitionLog, LogFileError> {
    let first_line = text.lines().next().ok_or(LogFileError::MalformedLog {
        reason: "Log file is empty.".to_string(),
    })?;

    let fields: Vec<&str> = first_line.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(LogFileError::MalformedLog {
            reason: format!(
                "First line has {} fields, expected at least 3.",
                fields.len()
            ),
        });
    }

    let exposure_time = fields[2].parse::<f64>().map_err(|_| LogFileError::MalformedLog {
        reason: format!("Exposure time field is not numeric: '{}'.", fields[2]),
    })?;

    Ok(AcquisitionLog {
        exposure_time,
        details: text.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFileError {
    FailedToOpenFile { file: String },
    MalformedLog { reason: String },
}
