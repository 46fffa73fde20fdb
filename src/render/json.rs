//! JSON export of a calculated land pattern.

use std::path::Path;

use crate::ipc7351::packages::LandPattern;
use crate::render::{write_output, RenderError, RenderResult};

/// Serialises a land pattern as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`RenderError::Json`] if serialisation fails.
pub fn to_json(pattern: &LandPattern) -> RenderResult<String> {
    serde_json::to_string_pretty(pattern).map_err(|source| RenderError::Json { source })
}

/// Writes a land pattern as JSON to `path`.
///
/// # Errors
///
/// Returns an error if serialisation fails or the file cannot be written.
pub fn write_json(pattern: &LandPattern, path: &Path) -> RenderResult<()> {
    let mut text = to_json(pattern)?;
    text.push('\n');
    write_output(path, text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipc7351::packages::qfp::QfpCalculator;
    use crate::ipc7351::packages::{ParameterOverrides, QfpParameters};

    #[test]
    fn json_lists_tagged_primitives() {
        let params =
            QfpParameters::resolve("QFP65P1200X1200-64L", &ParameterOverrides::default()).unwrap();
        let pattern = QfpCalculator::new()
            .calculate("QFP65P1200X1200-64L", &params)
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&to_json(&pattern).unwrap()).unwrap();
        assert_eq!(value["name"], "QFP65P1200X1200-64L");
        assert_eq!(value["parameters"]["density"], "least");
        assert_eq!(value["parameters"]["pin_count"], 64);

        let primitives = value["primitives"].as_array().unwrap();
        assert_eq!(primitives.len(), 64);
        assert_eq!(primitives[0]["kind"], "pad");
        assert_eq!(primitives[0]["number"], 1);
    }

    #[test]
    fn json_reads_back() {
        let params =
            QfpParameters::resolve("QFP50P900X900-48", &ParameterOverrides::default()).unwrap();
        let pattern = QfpCalculator::new()
            .calculate("QFP50P900X900-48", &params)
            .unwrap();

        let back: LandPattern = serde_json::from_str(&to_json(&pattern).unwrap()).unwrap();
        assert_eq!(back.name, pattern.name);
        assert_eq!(back.parameters.pin_count, 48);
        assert_eq!(back.pad_count(), 48);
        for (a, b) in back.pads().zip(pattern.pads()) {
            assert_eq!(a.number, b.number);
            assert!(a.centre.distance_to(b.centre) < 1e-9);
        }
    }
}
