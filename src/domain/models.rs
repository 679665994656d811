use super::errors::{FormError, FormResult};

/// Sentinel province value that reveals the free-text province field.
pub const OTHER_PROVINCE: &str = "อื่นๆ";

/// Provinces offered in the selector, in display order.
pub const PROVINCES: [&str; 8] = [
    "ยะลา",
    "ปัตตานี",
    "นราธิวาส",
    "สงขลา",
    "สตูล",
    "พังงา",
    "พัทลุง",
    OTHER_PROVINCE,
];

pub const MAX_AGE: i64 = 120;

/// Identifies one input of the assessment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Brca,
    Weight,
    Height,
    Age,
    Province,
    OtherProvince,
    Gender,
}

/// How a field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Picked from a fixed list of options
    Choice,
    /// Non-negative decimal typed as text
    Decimal,
    /// Whole number typed as text
    Integer,
    /// Free text
    Text,
}

impl FieldId {
    /// All fields in form order, including the conditional one.
    pub const ALL: [FieldId; 7] = [
        FieldId::Brca,
        FieldId::Weight,
        FieldId::Height,
        FieldId::Age,
        FieldId::Province,
        FieldId::OtherProvince,
        FieldId::Gender,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FieldId::Brca => "BRCA",
            FieldId::Weight => "Weight (kg)",
            FieldId::Height => "Height (cm)",
            FieldId::Age => "Age",
            FieldId::Province => "Province",
            FieldId::OtherProvince => "Other Province",
            FieldId::Gender => "Gender",
        }
    }

    /// Prompt shown while a choice field is still unset.
    pub fn placeholder(&self) -> &'static str {
        match self {
            FieldId::Brca => "กรุณากรอกผลตรวจ BRCA",
            FieldId::Province => "กรุณากรอกจังหวัดที่อยู่อาศัย",
            FieldId::Gender => "กรุณาเลือกเพศ",
            _ => "",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldId::Brca | FieldId::Province | FieldId::Gender => FieldKind::Choice,
            FieldId::Weight | FieldId::Height => FieldKind::Decimal,
            FieldId::Age => FieldKind::Integer,
            FieldId::OtherProvince => FieldKind::Text,
        }
    }

    /// Wire values a choice field can take. Empty for typed fields.
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            FieldId::Brca => &["negative", "positive"],
            FieldId::Province => &PROVINCES,
            FieldId::Gender => &["Male", "Female"],
            _ => &[],
        }
    }

    /// Granularity of a decimal field, as value and display text.
    pub fn step(&self) -> Option<(f64, &'static str)> {
        match self {
            FieldId::Weight => Some((0.1, "0.1")),
            FieldId::Height => Some((0.01, "0.01")),
            _ => None,
        }
    }

    /// Whether `c` may be appended to `current`, following the rules of a
    /// numeric input: digits everywhere, one decimal point for decimals.
    pub fn accepts_char(&self, current: &str, c: char) -> bool {
        match self.kind() {
            FieldKind::Choice => false,
            FieldKind::Decimal => c.is_ascii_digit() || (c == '.' && !current.contains('.')),
            FieldKind::Integer => c.is_ascii_digit(),
            FieldKind::Text => !c.is_control(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Brca {
    #[default]
    Unset,
    Negative,
    Positive,
}

impl Brca {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "negative" => Brca::Negative,
            "positive" => Brca::Positive,
            _ => Brca::Unset,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            Brca::Unset => "",
            Brca::Negative => "negative",
            Brca::Positive => "positive",
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            Brca::Unset => "",
            Brca::Negative => "Negative",
            Brca::Positive => "Positive",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Gender {
    #[default]
    Unset,
    Male,
    Female,
}

impl Gender {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "Male" => Gender::Male,
            "Female" => Gender::Female,
            _ => Gender::Unset,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            Gender::Unset => "",
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// Everything the user has entered so far.
///
/// Numeric inputs stay as the text the user typed until a request is built.
/// `other_province` can only hold text while `province` is the
/// [`OTHER_PROVINCE`] sentinel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    brca: Brca,
    weight_kg: String,
    height_cm: String,
    age: String,
    province: String,
    other_province: String,
    gender: Gender,
}

impl FormState {
    pub fn brca(&self) -> Brca {
        self.brca
    }

    pub fn weight_kg(&self) -> &str {
        &self.weight_kg
    }

    pub fn height_cm(&self) -> &str {
        &self.height_cm
    }

    pub fn age(&self) -> &str {
        &self.age
    }

    pub fn province(&self) -> &str {
        &self.province
    }

    pub fn other_province(&self) -> &str {
        &self.other_province
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Current value of a field as the user sees it.
    pub fn display_value(&self, field: FieldId) -> &str {
        match field {
            FieldId::Brca => self.brca.display(),
            FieldId::Weight => &self.weight_kg,
            FieldId::Height => &self.height_cm,
            FieldId::Age => &self.age,
            FieldId::Province => &self.province,
            FieldId::OtherProvince => &self.other_province,
            FieldId::Gender => self.gender.as_wire(),
        }
    }

    /// Sets a field to `value` without checking it.
    ///
    /// Choice fields take their wire value; anything unknown leaves them
    /// unset. Province changes go through [`FormState::update_province`], and
    /// writes to the other-province field are dropped while it is hidden.
    pub fn update_field(&mut self, field: FieldId, value: &str) {
        match field {
            FieldId::Brca => self.brca = Brca::from_wire(value),
            FieldId::Weight => self.weight_kg = value.to_string(),
            FieldId::Height => self.height_cm = value.to_string(),
            FieldId::Age => self.age = value.to_string(),
            FieldId::Province => self.update_province(value),
            FieldId::OtherProvince => {
                if self.is_other_province_visible() {
                    self.other_province = value.to_string();
                } else {
                    tracing::debug!("ignoring other province edit while hidden");
                }
            }
            FieldId::Gender => self.gender = Gender::from_wire(value),
        }
    }

    /// Selects a province, clearing the free-text province unless the
    /// sentinel was picked.
    pub fn update_province(&mut self, value: &str) {
        self.province = value.to_string();
        if value != OTHER_PROVINCE {
            self.other_province.clear();
        }
    }

    pub fn is_other_province_visible(&self) -> bool {
        self.province == OTHER_PROVINCE
    }

    /// Fields the user can currently reach, in form order.
    pub fn visible_fields(&self) -> Vec<FieldId> {
        FieldId::ALL
            .into_iter()
            .filter(|field| *field != FieldId::OtherProvince || self.is_other_province_visible())
            .collect()
    }

    /// Moves a choice field to its next (or previous) option, wrapping
    /// around. An unset field starts at the first option going forward and
    /// at the last going backward.
    pub fn cycle_option(&mut self, field: FieldId, forward: bool) {
        let options = field.options();
        if options.is_empty() {
            return;
        }

        let current = match field {
            FieldId::Brca => self.brca.as_wire(),
            FieldId::Gender => self.gender.as_wire(),
            _ => self.province.as_str(),
        };
        let next = match options.iter().position(|option| *option == current) {
            Some(index) if forward => (index + 1) % options.len(),
            Some(index) => (index + options.len() - 1) % options.len(),
            None if forward => 0,
            None => options.len() - 1,
        };
        self.update_field(field, options[next]);
    }

    /// Appends a typed character, ignoring characters the field rejects.
    pub fn push_char(&mut self, field: FieldId, c: char) {
        if !field.accepts_char(self.display_value(field), c) {
            return;
        }
        let mut value = self.display_value(field).to_string();
        value.push(c);
        self.update_field(field, &value);
    }

    /// Removes the last character of a text field.
    pub fn pop_char(&mut self, field: FieldId) {
        if field.kind() == FieldKind::Choice {
            return;
        }
        let mut value = self.display_value(field).to_string();
        if value.pop().is_some() {
            self.update_field(field, &value);
        }
    }

    /// Checks the constraints a submission needs, reporting the first
    /// violation in form order.
    pub fn validate(&self) -> FormResult<()> {
        if self.brca == Brca::Unset {
            return Err(FormError::Missing(FieldId::Brca));
        }
        parse_measurement(FieldId::Weight, &self.weight_kg)?;
        parse_measurement(FieldId::Height, &self.height_cm)?;
        parse_age(&self.age)?;
        if self.province.is_empty() {
            return Err(FormError::Missing(FieldId::Province));
        }
        if self.is_other_province_visible() && self.other_province.trim().is_empty() {
            return Err(FormError::Missing(FieldId::OtherProvince));
        }
        if self.gender == Gender::Unset {
            return Err(FormError::Missing(FieldId::Gender));
        }
        Ok(())
    }
}

/// Parses a non-negative decimal measurement.
pub fn parse_measurement(field: FieldId, text: &str) -> FormResult<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(FormError::Missing(field));
    }
    let value = text
        .parse::<f64>()
        .map_err(|_| FormError::NotANumber(field))?;
    if !value.is_finite() {
        return Err(FormError::NotANumber(field));
    }
    if value < 0.0 {
        return Err(FormError::Negative(field));
    }
    if let Some((step, label)) = field.step() {
        let steps = value / step;
        if (steps - steps.round()).abs() > 1e-6 {
            return Err(FormError::StepMismatch { field, step: label });
        }
    }
    Ok(value)
}

/// Parses an age in whole years within `0..=MAX_AGE`.
pub fn parse_age(text: &str) -> FormResult<i64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(FormError::Missing(FieldId::Age));
    }
    let age = text
        .parse::<i64>()
        .map_err(|_| FormError::NotANumber(FieldId::Age))?;
    if !(0..=MAX_AGE).contains(&age) {
        return Err(FormError::OutOfRange {
            field: FieldId::Age,
            min: 0,
            max: MAX_AGE,
        });
    }
    Ok(age)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> FormState {
        let mut form = FormState::default();
        form.update_field(FieldId::Brca, "negative");
        form.update_field(FieldId::Weight, "60");
        form.update_field(FieldId::Height, "165");
        form.update_field(FieldId::Age, "30");
        form.update_province("สงขลา");
        form.update_field(FieldId::Gender, "Female");
        form
    }

    #[test]
    fn test_default_form_is_empty() {
        let form = FormState::default();
        assert_eq!(form.brca(), Brca::Unset);
        assert_eq!(form.gender(), Gender::Unset);
        assert!(form.weight_kg().is_empty());
        assert!(form.province().is_empty());
        assert!(!form.is_other_province_visible());
    }

    #[test]
    fn test_update_field_sets_values() {
        let form = filled_form();
        assert_eq!(form.brca(), Brca::Negative);
        assert_eq!(form.weight_kg(), "60");
        assert_eq!(form.height_cm(), "165");
        assert_eq!(form.age(), "30");
        assert_eq!(form.province(), "สงขลา");
        assert_eq!(form.gender(), Gender::Female);
    }

    #[test]
    fn test_unknown_choice_value_unsets_field() {
        let mut form = filled_form();
        form.update_field(FieldId::Brca, "maybe");
        form.update_field(FieldId::Gender, "");
        assert_eq!(form.brca(), Brca::Unset);
        assert_eq!(form.gender(), Gender::Unset);
    }

    #[test]
    fn test_leaving_other_province_clears_free_text() {
        let mut form = FormState::default();
        form.update_province(OTHER_PROVINCE);
        form.update_field(FieldId::OtherProvince, "Chiang Mai");
        assert_eq!(form.other_province(), "Chiang Mai");

        form.update_province("ยะลา");
        assert!(form.other_province().is_empty());

        form.update_province(OTHER_PROVINCE);
        assert!(form.other_province().is_empty());
    }

    #[test]
    fn test_generic_province_update_also_clears_free_text() {
        let mut form = FormState::default();
        form.update_field(FieldId::Province, OTHER_PROVINCE);
        form.update_field(FieldId::OtherProvince, "Phuket");
        form.update_field(FieldId::Province, "สตูล");
        assert!(form.other_province().is_empty());
    }

    #[test]
    fn test_other_province_stays_empty_for_listed_provinces() {
        let mut form = FormState::default();
        for province in PROVINCES.iter().filter(|p| **p != OTHER_PROVINCE) {
            form.update_province(OTHER_PROVINCE);
            form.update_field(FieldId::OtherProvince, "Bangkok");
            form.update_province(province);
            form.update_field(FieldId::OtherProvince, "Bangkok");
            form.push_char(FieldId::OtherProvince, 'x');
            assert_eq!(form.province(), *province);
            assert!(form.other_province().is_empty(), "leaked into {province}");
        }
    }

    #[test]
    fn test_visible_fields_follow_province() {
        let mut form = FormState::default();
        assert!(!form.visible_fields().contains(&FieldId::OtherProvince));
        assert_eq!(form.visible_fields().len(), 6);

        form.update_province(OTHER_PROVINCE);
        let fields = form.visible_fields();
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[5], FieldId::OtherProvince);
    }

    #[test]
    fn test_cycle_option_wraps() {
        let mut form = FormState::default();
        form.cycle_option(FieldId::Brca, true);
        assert_eq!(form.brca(), Brca::Negative);
        form.cycle_option(FieldId::Brca, true);
        assert_eq!(form.brca(), Brca::Positive);
        form.cycle_option(FieldId::Brca, true);
        assert_eq!(form.brca(), Brca::Negative);

        form.cycle_option(FieldId::Province, false);
        assert_eq!(form.province(), OTHER_PROVINCE);
        form.cycle_option(FieldId::Province, true);
        assert_eq!(form.province(), "ยะลา");

        form.cycle_option(FieldId::Weight, true);
        assert!(form.weight_kg().is_empty());
    }

    #[test]
    fn test_numeric_fields_filter_characters() {
        let mut form = FormState::default();
        for c in "6a0.5.x".chars() {
            form.push_char(FieldId::Weight, c);
        }
        assert_eq!(form.weight_kg(), "60.5");

        for c in "3-0.".chars() {
            form.push_char(FieldId::Age, c);
        }
        assert_eq!(form.age(), "30");

        form.pop_char(FieldId::Age);
        assert_eq!(form.age(), "3");
    }

    #[test]
    fn test_validate_accepts_complete_form() {
        assert_eq!(filled_form().validate(), Ok(()));
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let form = FormState::default();
        assert_eq!(form.validate(), Err(FormError::Missing(FieldId::Brca)));

        let mut form = filled_form();
        form.update_field(FieldId::Height, "");
        assert_eq!(form.validate(), Err(FormError::Missing(FieldId::Height)));
    }

    #[test]
    fn test_validate_requires_other_province_text() {
        let mut form = filled_form();
        form.update_province(OTHER_PROVINCE);
        form.update_field(FieldId::OtherProvince, "   ");
        assert_eq!(form.validate(), Err(FormError::Missing(FieldId::OtherProvince)));

        form.update_field(FieldId::OtherProvince, "Chiang Mai");
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_validate_age_range() {
        let mut form = filled_form();
        form.update_field(FieldId::Age, "121");
        let err = form.validate().unwrap_err();
        assert_eq!(err.field(), FieldId::Age);
        assert_eq!(err.to_string(), "Age must be between 0 and 120");

        form.update_field(FieldId::Age, "120");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_measurements_follow_step() {
        assert_eq!(parse_measurement(FieldId::Weight, "60.5"), Ok(60.5));
        assert_eq!(parse_measurement(FieldId::Weight, "0.1"), Ok(0.1));
        assert_eq!(
            parse_measurement(FieldId::Weight, "60.55"),
            Err(FormError::StepMismatch {
                field: FieldId::Weight,
                step: "0.1",
            })
        );
        assert_eq!(parse_measurement(FieldId::Height, "165.12"), Ok(165.12));
        assert_eq!(
            parse_measurement(FieldId::Height, "165.123"),
            Err(FormError::StepMismatch {
                field: FieldId::Height,
                step: "0.01",
            })
        );
    }

    #[test]
    fn test_validate_rejects_off_step_measurements() {
        let mut form = filled_form();
        form.update_field(FieldId::Weight, "60.55");
        form.update_field(FieldId::Height, "165.123");
        let err = form.validate().unwrap_err();
        assert_eq!(err.field(), FieldId::Weight);
        assert_eq!(err.to_string(), "Weight (kg) must be a multiple of 0.1");

        form.update_field(FieldId::Weight, "60.5");
        assert_eq!(
            form.validate(),
            Err(FormError::StepMismatch {
                field: FieldId::Height,
                step: "0.01",
            })
        );

        form.update_field(FieldId::Height, "165.12");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_parse_measurement() {
        assert_eq!(parse_measurement(FieldId::Weight, "60.5"), Ok(60.5));
        assert_eq!(parse_measurement(FieldId::Weight, "0"), Ok(0.0));
        assert_eq!(
            parse_measurement(FieldId::Weight, "."),
            Err(FormError::NotANumber(FieldId::Weight))
        );
        assert_eq!(
            parse_measurement(FieldId::Height, "-3"),
            Err(FormError::Negative(FieldId::Height))
        );
        assert_eq!(
            parse_measurement(FieldId::Height, "inf"),
            Err(FormError::NotANumber(FieldId::Height))
        );
    }
}
