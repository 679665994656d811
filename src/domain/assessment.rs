//! Mapping from a prediction to what the result overlay shows.

pub const HEALTHY: &str = "Healthy";
pub const AT_RISK: &str = "At risk of cancer";

const HEALTHY_DESCRIPTION: &str = "Based on your input, you are currently assessed as healthy. However, it's important to continue with regular check-ups and maintain a healthy lifestyle.";
const AT_RISK_DESCRIPTION: &str = "Based on your input, you are assessed to be at risk of cancer. It is strongly advised to consult with a healthcare professional for further examination and guidance.";
const UNEXPECTED_DESCRIPTION: &str = "The prediction service returned a response that could not be read. Please try again later.";

/// Display category of a result, carrying the style class it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCategory {
    Healthy,
    AtRisk,
    /// A prediction this client does not recognise
    Neutral,
    /// The service answered, but not with a usable prediction
    Unexpected,
}

impl ResultCategory {
    pub fn class_name(&self) -> &'static str {
        match self {
            ResultCategory::Healthy => "result-healthy",
            ResultCategory::AtRisk => "result-risk",
            ResultCategory::Neutral => "",
            ResultCategory::Unexpected => "result-unexpected",
        }
    }
}

/// Category for a prediction string. Total over all inputs.
pub fn classify(result: &str) -> ResultCategory {
    match result {
        HEALTHY => ResultCategory::Healthy,
        AT_RISK => ResultCategory::AtRisk,
        _ => ResultCategory::Neutral,
    }
}

/// Fixed explanation for a prediction string; empty when unrecognised.
pub fn describe(result: &str) -> &'static str {
    match result {
        HEALTHY => HEALTHY_DESCRIPTION,
        AT_RISK => AT_RISK_DESCRIPTION,
        _ => "",
    }
}

/// Content of the result overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assessment {
    /// The prediction string returned by the service
    Prediction(String),
    /// A 2xx response without a usable prediction, with the parse detail
    UnexpectedResponse(String),
}

impl Assessment {
    pub fn category(&self) -> ResultCategory {
        match self {
            Assessment::Prediction(result) => classify(result),
            Assessment::UnexpectedResponse(_) => ResultCategory::Unexpected,
        }
    }

    /// Headline text of the overlay.
    pub fn headline(&self) -> &str {
        match self {
            Assessment::Prediction(result) => result,
            Assessment::UnexpectedResponse(_) => "Unexpected response",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Assessment::Prediction(result) => describe(result),
            Assessment::UnexpectedResponse(_) => UNEXPECTED_DESCRIPTION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_predictions() {
        assert_eq!(classify("Healthy"), ResultCategory::Healthy);
        assert_eq!(classify("Healthy").class_name(), "result-healthy");
        assert!(describe("Healthy").contains("currently assessed as healthy"));

        assert_eq!(classify("At risk of cancer"), ResultCategory::AtRisk);
        assert_eq!(classify("At risk of cancer").class_name(), "result-risk");
        assert!(describe("At risk of cancer").contains("consult with a healthcare professional"));
    }

    #[test]
    fn test_unrecognised_predictions_are_neutral() {
        for result in ["Unknown", "", "healthy", "Healthy ", "At risk"] {
            assert_eq!(classify(result), ResultCategory::Neutral);
            assert_eq!(classify(result).class_name(), "");
            assert_eq!(describe(result), "");
        }
    }

    #[test]
    fn test_mapping_is_stable() {
        assert_eq!(classify(AT_RISK), classify(AT_RISK));
        assert_eq!(describe(HEALTHY), describe(HEALTHY));
        assert_ne!(describe(HEALTHY), describe(AT_RISK));
    }

    #[test]
    fn test_assessment_content() {
        let healthy = Assessment::Prediction("Healthy".to_string());
        assert_eq!(healthy.category(), ResultCategory::Healthy);
        assert_eq!(healthy.headline(), "Healthy");
        assert_eq!(healthy.description(), describe("Healthy"));

        let unknown = Assessment::Prediction("Unknown".to_string());
        assert_eq!(unknown.category(), ResultCategory::Neutral);
        assert_eq!(unknown.headline(), "Unknown");
        assert_eq!(unknown.description(), "");

        let broken = Assessment::UnexpectedResponse("missing `prediction` field".to_string());
        assert_eq!(broken.category(), ResultCategory::Unexpected);
        assert_eq!(broken.category().class_name(), "result-unexpected");
        assert!(!broken.description().is_empty());
    }
}
