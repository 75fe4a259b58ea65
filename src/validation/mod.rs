//! Declarative field checks applied to inbound payloads before any side effect.
//!
//! A payload implements [`Validate`] by declaring its fields in order against a
//! [`ValidationGate`]. Each field records at most one violation (its first failing
//! rule), and violations come back in declaration order.
//!
//! ```ignore
//! let mut gate = ValidationGate::new();
//! gate.text("name", Some(self.name.as_str())).required().max_len(255);
//! gate.number("price", Some(self.price)).greater_than(0.0);
//! gate.text("predicted_waste_score", self.score.as_deref()).optional().one_of(&["low", "medium", "high"]);
//! gate.finish()
//! ```

mod email;

pub use email::is_valid_email;

/// A payload that can be checked against declarative field rules
pub trait Validate {
    /// Violation messages in field declaration order; empty means valid
    fn validate(&self) -> Vec<String>;
}

#[derive(Debug, Default)]
pub struct ValidationGate {
    violations: Vec<String>,
}

impl ValidationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text<'g>(&'g mut self, field: &'static str, value: Option<&'g str>) -> TextRule<'g> {
        TextRule { gate: self, field, value, done: false }
    }

    pub fn number(&mut self, field: &'static str, value: Option<f64>) -> NumberRule<'_> {
        NumberRule { gate: self, field, value, done: false }
    }

    pub fn integer(&mut self, field: &'static str, value: Option<i64>) -> IntegerRule<'_> {
        IntegerRule { gate: self, field, value, done: false }
    }

    /// Presence check for values with no further rules (dates, attribute maps)
    pub fn require(&mut self, field: &'static str, present: bool) -> &mut Self {
        if !present {
            self.reject(format!("{} is required", field));
        }
        self
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn finish(self) -> Vec<String> {
        self.violations
    }

    fn reject(&mut self, message: String) {
        self.violations.push(message);
    }
}

/// Rules for one text field. Rules after `required` only run when a value is present.
pub struct TextRule<'g> {
    gate: &'g mut ValidationGate,
    field: &'static str,
    value: Option<&'g str>,
    done: bool,
}

impl<'g> TextRule<'g> {
    pub fn required(mut self) -> Self {
        if !self.done && self.value.map_or(true, str::is_empty) {
            self.fail(format!("{} is required", self.field));
        }
        self
    }

    /// Treat an empty string like an absent value for the remaining rules
    pub fn optional(mut self) -> Self {
        if self.value == Some("") {
            self.done = true;
        }
        self
    }

    pub fn min_len(mut self, min: usize) -> Self {
        if let Some(len) = self.pending_len() {
            if len < min {
                let message = match min {
                    1 => format!("{} must not be empty", self.field),
                    _ => format!("{} must be at least {} characters", self.field, min),
                };
                self.fail(message);
            }
        }
        self
    }

    pub fn max_len(mut self, max: usize) -> Self {
        if let Some(len) = self.pending_len() {
            if len > max {
                self.fail(format!("{} must be at most {} characters", self.field, max));
            }
        }
        self
    }

    pub fn one_of(mut self, allowed: &[&str]) -> Self {
        if let Some(value) = self.pending() {
            if !allowed.contains(&value) {
                self.fail(format!("{} must be one of: {}", self.field, allowed.join(", ")));
            }
        }
        self
    }

    pub fn email(mut self) -> Self {
        if let Some(value) = self.pending() {
            if !is_valid_email(value) {
                self.fail(format!("{} must be a valid email address", self.field));
            }
        }
        self
    }

    fn pending(&self) -> Option<&'g str> {
        if self.done {
            None
        } else {
            self.value
        }
    }

    fn pending_len(&self) -> Option<usize> {
        self.pending().map(|v| v.chars().count())
    }

    fn fail(&mut self, message: String) {
        self.gate.reject(message);
        self.done = true;
    }
}

pub struct NumberRule<'g> {
    gate: &'g mut ValidationGate,
    field: &'static str,
    value: Option<f64>,
    done: bool,
}

impl<'g> NumberRule<'g> {
    pub fn required(mut self) -> Self {
        if !self.done && self.value.is_none() {
            self.fail(format!("{} is required", self.field));
        }
        self
    }

    pub fn greater_than(mut self, bound: f64) -> Self {
        if let Some(value) = self.pending() {
            if !(value > bound) {
                self.fail(format!("{} must be greater than {}", self.field, bound));
            }
        }
        self
    }

    pub fn at_least(mut self, bound: f64) -> Self {
        if let Some(value) = self.pending() {
            if !(value >= bound) {
                self.fail(format!("{} must be at least {}", self.field, bound));
            }
        }
        self
    }

    pub fn at_most(mut self, bound: f64) -> Self {
        if let Some(value) = self.pending() {
            if !(value <= bound) {
                self.fail(format!("{} must be at most {}", self.field, bound));
            }
        }
        self
    }

    fn pending(&self) -> Option<f64> {
        if self.done {
            None
        } else {
            self.value
        }
    }

    fn fail(&mut self, message: String) {
        self.gate.reject(message);
        self.done = true;
    }
}

pub struct IntegerRule<'g> {
    gate: &'g mut ValidationGate,
    field: &'static str,
    value: Option<i64>,
    done: bool,
}

impl<'g> IntegerRule<'g> {
    pub fn required(mut self) -> Self {
        if !self.done && self.value.is_none() {
            self.fail(format!("{} is required", self.field));
        }
        self
    }

    pub fn at_least(mut self, bound: i64) -> Self {
        if let Some(value) = self.pending() {
            if value < bound {
                self.fail(format!("{} must be at least {}", self.field, bound));
            }
        }
        self
    }

    pub fn at_most(mut self, bound: i64) -> Self {
        if let Some(value) = self.pending() {
            if value > bound {
                self.fail(format!("{} must be at most {}", self.field, bound));
            }
        }
        self
    }

    fn pending(&self) -> Option<i64> {
        if self.done {
            None
        } else {
            self.value
        }
    }

    fn fail(&mut self, message: String) {
        self.gate.reject(message);
        self.done = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_payload_has_no_violations() {
        let mut gate = ValidationGate::new();
        gate.text("name", Some("Bread")).required().min_len(1).max_len(255);
        gate.number("price", Some(3.5)).required().greater_than(0.0);
        gate.integer("rating", Some(5)).at_least(1).at_most(5);
        assert!(gate.is_valid());
        assert!(gate.finish().is_empty());
    }

    #[test]
    fn violations_follow_declaration_order() {
        let mut gate = ValidationGate::new();
        gate.text("org_name", Some("")).required();
        gate.number("daily_capacity_kg", Some(0.0)).greater_than(0.0);
        gate.require("pickup_window", false);
        assert_eq!(
            gate.finish(),
            vec![
                "org_name is required",
                "daily_capacity_kg must be greater than 0",
                "pickup_window is required",
            ]
        );
    }

    #[test]
    fn one_violation_per_field() {
        let mut gate = ValidationGate::new();
        gate.text("name", None).required().min_len(1).max_len(3);
        assert_eq!(gate.finish(), vec!["name is required"]);
    }

    #[test]
    fn absent_values_skip_bound_rules() {
        let mut gate = ValidationGate::new();
        gate.text("name", None).min_len(1).max_len(255);
        gate.number("price", None).greater_than(0.0);
        gate.integer("rating", None).at_least(1).at_most(5);
        assert!(gate.finish().is_empty());
    }

    #[test]
    fn present_empty_text_hits_length_bounds() {
        let mut gate = ValidationGate::new();
        gate.text("name", Some("")).min_len(1);
        gate.text("unit", Some("g")).min_len(2);
        assert_eq!(
            gate.finish(),
            vec!["name must not be empty", "unit must be at least 2 characters"]
        );
    }

    #[test]
    fn optional_text_skips_empty_strings() {
        let mut gate = ValidationGate::new();
        gate.text("contact_email", Some("")).optional().email();
        gate.text("predicted_waste_score", Some("")).optional().one_of(&["low", "medium", "high"]);
        assert!(gate.finish().is_empty());
    }

    #[test]
    fn enumerated_membership() {
        let mut gate = ValidationGate::new();
        gate.text("storage_type", Some("ambient")).one_of(&["fresh", "chilled", "frozen", "dry"]);
        assert_eq!(
            gate.finish(),
            vec!["storage_type must be one of: fresh, chilled, frozen, dry"]
        );
    }

    #[test]
    fn integer_bounds_name_the_limit() {
        let mut gate = ValidationGate::new();
        gate.integer("rating", Some(6)).at_least(1).at_most(5);
        gate.integer("beneficiaries", Some(-1)).at_least(0);
        assert_eq!(
            gate.finish(),
            vec!["rating must be at most 5", "beneficiaries must be at least 0"]
        );
    }

    #[test]
    fn non_finite_numbers_fail_bounds() {
        let mut gate = ValidationGate::new();
        gate.number("quantity", Some(f64::NAN)).greater_than(0.0);
        assert_eq!(gate.finish().len(), 1);
    }

    #[test]
    fn max_len_counts_characters_not_bytes() {
        let mut gate = ValidationGate::new();
        gate.text("unit", Some("kilogrammé")).max_len(10);
        assert!(gate.finish().is_empty());
    }
}
