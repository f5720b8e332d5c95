//! Request validation.
//!
//! Every request body accepted by the API implements [`Validate`]. Problems are reported
//! as `"field: reason"` strings so a client can show all of them at once instead of
//! fixing one field per round trip.

/// A request payload that can check its own field constraints.
pub trait Validate {
    fn validate(&self) -> Result<(), Vec<String>>;
}

/// Collects field issues while a payload is being checked.
#[derive(Debug, Default)]
pub struct Issues(Vec<String>);

impl Issues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, ok: bool, field: &str, reason: &str) -> &mut Self {
        if !ok {
            self.0.push(format!("{field}: {reason}"));
        }
        self
    }

    pub fn positive_id(&mut self, field: &str, value: i64) -> &mut Self {
        self.check(value > 0, field, "must be a positive integer")
    }

    pub fn optional_positive_id(&mut self, field: &str, value: Option<i64>) -> &mut Self {
        match value {
            Some(id) => self.positive_id(field, id),
            None => self,
        }
    }

    pub fn not_blank(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(!value.trim().is_empty(), field, "must not be empty")
    }

    pub fn finish(self) -> Result<(), Vec<String>> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.0)
        }
    }
}
