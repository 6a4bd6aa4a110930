use crate::tab::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ScaleSettings {
    pub moderate: Option<f64>,
    pub strong: Option<f64>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ConvergenceSettings {
    pub tolerance: Option<f64>,
    #[serde(rename = "maxIterations")]
    pub max_iterations: Option<u32>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct TabConfig {
    #[serde(rename = "inputFile")]
    pub input_file: Option<String>,
    #[serde(rename = "infoSheetName")]
    pub info_sheet_name: Option<String>,
    #[serde(rename = "outputFile")]
    pub output_file: Option<String>,
    pub scale: Option<ScaleSettings>,
    pub convergence: Option<ConvergenceSettings>,
}

impl TabConfig {
    /// The scale of the configuration, on top of the given defaults.
    pub fn scale_rules(&self, defaults: &ScaleRules) -> ScaleRules {
        let mut rules = *defaults;
        if let Some(scale) = &self.scale {
            rules.moderate = scale.moderate.unwrap_or(rules.moderate);
            rules.strong = scale.strong.unwrap_or(rules.strong);
        }
        if let Some(conv) = &self.convergence {
            rules.tolerance = conv.tolerance.unwrap_or(rules.tolerance);
            rules.max_iterations = conv.max_iterations.unwrap_or(rules.max_iterations);
        }
        rules
    }
}

pub fn read_config(path: &str) -> BTabResult<TabConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: {:?}", contents);
    let config: TabConfig = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    Ok(config)
}

/// Reads a reference output.
pub fn read_summary(path: &str) -> BTabResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

/// Checks that the scale can be used for computations.
pub fn validate_rules(rules: &ScaleRules) -> TabResult<()> {
    for (name, factor) in [("moderate", rules.moderate), ("strong", rules.strong)] {
        if !(factor.is_finite() && factor > 0.0) {
            whatever!("The {} factor must be a positive number, got {}", name, factor)
        }
    }
    if !(rules.tolerance.is_finite() && rules.tolerance > 0.0) {
        whatever!(
            "The tolerance must be a positive number, got {}",
            rules.tolerance
        )
    }
    if rules.max_iterations == 0 {
        whatever!("The maximum number of iterations must be at least 1")
    }
    if rules.strong < rules.moderate {
        warn!(
            "The strong factor ({}) is smaller than the moderate factor ({})",
            rules.strong, rules.moderate
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config() {
        let js = r#"{
            "inputFile": "Jobs.xlsx",
            "infoSheetName": "groups",
            "outputFile": "out.json",
            "scale": { "moderate": 2, "strong": 5.5 },
            "convergence": { "tolerance": 1e-6, "maxIterations": 50 }
        }"#;
        let config: TabConfig = serde_json::from_str(js).unwrap();
        assert_eq!(config.input_file.as_deref(), Some("Jobs.xlsx"));
        assert_eq!(config.info_sheet_name.as_deref(), Some("groups"));
        let rules = config.scale_rules(&ScaleRules::DEFAULT_RULES);
        assert_eq!(
            rules,
            ScaleRules {
                moderate: 2.0,
                strong: 5.5,
                tolerance: 1e-6,
                max_iterations: 50,
            }
        );
    }

    #[test]
    fn minimal_config() {
        let config: TabConfig = serde_json::from_str(r#"{"inputFile": "a.xlsx"}"#).unwrap();
        assert_eq!(config.output_file, None);
        assert_eq!(
            config.scale_rules(&ScaleRules::DEFAULT_RULES),
            ScaleRules::DEFAULT_RULES
        );
    }

    #[test]
    fn partial_scale() {
        let config: TabConfig = serde_json::from_str(r#"{"scale": {"strong": 7}}"#).unwrap();
        let rules = config.scale_rules(&ScaleRules::DEFAULT_RULES);
        assert_eq!(rules.moderate, 3.0);
        assert_eq!(rules.strong, 7.0);
    }

    #[test]
    fn rules_validation() {
        assert!(validate_rules(&ScaleRules::DEFAULT_RULES).is_ok());
        let bad_factor = ScaleRules {
            moderate: 0.0,
            ..ScaleRules::DEFAULT_RULES
        };
        assert!(validate_rules(&bad_factor).is_err());
        let bad_tolerance = ScaleRules {
            tolerance: -1.0,
            ..ScaleRules::DEFAULT_RULES
        };
        assert!(validate_rules(&bad_tolerance).is_err());
        let no_iterations = ScaleRules {
            max_iterations: 0,
            ..ScaleRules::DEFAULT_RULES
        };
        assert!(validate_rules(&no_iterations).is_err());
    }

    #[test]
    fn missing_config_file() {
        let res = read_config("/nonexistent/pwtab_config.json");
        assert!(matches!(res.map_err(|e| *e), Err(TabError::OpeningJson { .. })));
    }
}
