//! Form state and local validation for the screens.
//!
//! Validation here runs before any request is built, so a rejected form
//! never reaches the network.

use crate::error::Error;
use crate::models::{DeliveryUpdate, NewDelivery};

/// Keep only ASCII digits, as numeric inputs do while typing
pub fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn parse_count(value: &str, field: &str) -> Result<u32, Error> {
    value
        .parse::<u32>()
        .map_err(|_| Error::Validation(format!("{} is too large.", field)))
}

/// Login form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(Error::Validation(
                "Please enter your email and password.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Delivery creation form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryForm {
    /// Selected driver id, empty when none
    pub driver: String,
    /// Selected truck id, empty when none
    pub truck: String,
    full_bottles_sent: String,
    empty_bottles_sent: String,
}

impl DeliveryForm {
    pub fn full_bottles_sent(&self) -> &str {
        &self.full_bottles_sent
    }

    pub fn empty_bottles_sent(&self) -> &str {
        &self.empty_bottles_sent
    }

    pub fn set_full_bottles_sent(&mut self, text: &str) {
        self.full_bottles_sent = digits_only(text);
    }

    pub fn set_empty_bottles_sent(&mut self, text: &str) {
        self.empty_bottles_sent = digits_only(text);
    }

    pub fn clear_counts(&mut self) {
        self.full_bottles_sent.clear();
        self.empty_bottles_sent.clear();
    }

    /// Build the request body, or reject the form locally
    pub fn validate(&self) -> Result<NewDelivery, Error> {
        if self.driver.is_empty()
            || self.truck.is_empty()
            || self.full_bottles_sent.trim().is_empty()
            || self.empty_bottles_sent.trim().is_empty()
        {
            return Err(Error::Validation(
                "Please select a driver and a truck, and fill in every quantity.".to_string(),
            ));
        }

        Ok(NewDelivery {
            driver: self.driver.clone(),
            truck: self.truck.clone(),
            full_bottles_sent: parse_count(&self.full_bottles_sent, "Full bottles sent")?,
            empty_bottles_sent: parse_count(&self.empty_bottles_sent, "Empty bottles sent")?,
        })
    }
}

/// Delivery edit form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditDeliveryForm {
    pub delivery_id: String,
    full_bottles_sent: String,
    empty_bottles_sent: String,
}

impl EditDeliveryForm {
    pub fn full_bottles_sent(&self) -> &str {
        &self.full_bottles_sent
    }

    pub fn empty_bottles_sent(&self) -> &str {
        &self.empty_bottles_sent
    }

    pub fn set_full_bottles_sent(&mut self, text: &str) {
        self.full_bottles_sent = digits_only(text);
    }

    pub fn set_empty_bottles_sent(&mut self, text: &str) {
        self.empty_bottles_sent = digits_only(text);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Build the target id and request body, or reject the form locally
    pub fn validate(&self) -> Result<(String, DeliveryUpdate), Error> {
        if self.delivery_id.trim().is_empty()
            || self.full_bottles_sent.trim().is_empty()
            || self.empty_bottles_sent.trim().is_empty()
        {
            return Err(Error::Validation(
                "Please enter the delivery ID and both quantities.".to_string(),
            ));
        }

        let update = DeliveryUpdate {
            full_bottles_sent: parse_count(&self.full_bottles_sent, "Full bottles sent")?,
            empty_bottles_sent: parse_count(&self.empty_bottles_sent, "Empty bottles sent")?,
        };
        Ok((self.delivery_id.trim().to_string(), update))
    }
}
