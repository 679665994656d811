//! Wire format of the prediction service.
//!
//! The request mirrors the field names the service expects; numbers that
//! happen to be whole are written without a fractional part so the body
//! reads `"weight":60` rather than `"weight":60.0`.

use serde::{Deserialize, Serialize, Serializer};

use super::errors::{FormResult, SubmitError};
use super::models::{FieldId, FormState, parse_age, parse_measurement};

/// Body of `POST /predict/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    #[serde(rename = "BRCA")]
    pub brca: Vec<String>,
    #[serde(rename = "BMI_GROUP")]
    pub bmi_group: BodyMeasurements,
    #[serde(rename = "AGE_GROUP")]
    pub age_group: i64,
    #[serde(rename = "PROVINCE_GROUP")]
    pub province_group: Vec<String>,
    #[serde(rename = "GENDER_N")]
    pub gender: String,
}

/// Raw weight and height; the service derives the BMI group itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyMeasurements {
    #[serde(serialize_with = "serialize_number")]
    pub weight: f64,
    #[serde(serialize_with = "serialize_number")]
    pub height: f64,
}

impl PredictionRequest {
    /// Builds the request from a snapshot of the form.
    ///
    /// The form is validated first, so a request only exists for input the
    /// user could actually submit. When the "other" province is selected the
    /// free-text province is sent in its place.
    pub fn from_form(form: &FormState) -> FormResult<Self> {
        form.validate()?;

        let province = if form.is_other_province_visible() {
            form.other_province().trim().to_string()
        } else {
            form.province().to_string()
        };

        Ok(Self {
            brca: vec![form.brca().as_wire().to_string()],
            bmi_group: BodyMeasurements {
                weight: parse_measurement(FieldId::Weight, form.weight_kg())?,
                height: parse_measurement(FieldId::Height, form.height_cm())?,
            },
            age_group: parse_age(form.age())?,
            province_group: vec![province],
            gender: form.gender().as_wire().to_string(),
        })
    }
}

fn serialize_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    // Integers above 2^53 are not exact in f64 anyway.
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[derive(Debug, Deserialize)]
struct PredictionResponse {
    prediction: Option<String>,
}

/// Extracts the `prediction` field from a successful response body.
///
/// Anything other than an object with a non-empty string `prediction` is
/// reported as [`SubmitError::MalformedResponse`].
pub fn parse_prediction(body: &str) -> Result<String, SubmitError> {
    let response: PredictionResponse = serde_json::from_str(body)
        .map_err(|e| SubmitError::MalformedResponse(e.to_string()))?;

    match response.prediction {
        Some(prediction) if !prediction.is_empty() => Ok(prediction),
        Some(_) => Err(SubmitError::MalformedResponse(
            "`prediction` is empty".to_string(),
        )),
        None => Err(SubmitError::MalformedResponse(
            "missing `prediction` field".to_string(),
        )),
    }
}
