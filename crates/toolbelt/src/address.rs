//! Postal addresses.

use std::fmt;

use serde::{Deserialize, Serialize};

use toolbelt_macros::{reflect_methods, Reflect};

/// A postal address.
///
/// ```
/// use toolbelt::Address;
///
/// let address = Address::new("Warsaw", "00-001", "Marszalkowska", "12").with_flat_number("4");
/// assert_eq!(address.full_street(), "Marszalkowska 12/4");
/// assert_eq!(address.to_string(), "Marszalkowska 12/4, 00-001 Warsaw");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
#[reflect(methods)]
pub struct Address {
    pub street: String,
    pub building_number: String,
    pub flat_number: Option<String>,
    pub zip_code: String,
    pub city: String,
}

impl Address {
    /// Creates an address without a flat number.
    pub fn new(
        city: impl Into<String>,
        zip_code: impl Into<String>,
        street: impl Into<String>,
        building_number: impl Into<String>,
    ) -> Self {
        Address {
            street: street.into(),
            building_number: building_number.into(),
            flat_number: None,
            zip_code: zip_code.into(),
            city: city.into(),
        }
    }

    /// Sets the flat number.
    pub fn with_flat_number(mut self, flat_number: impl Into<String>) -> Self {
        self.flat_number = Some(flat_number.into());
        self
    }

    /// Returns the building number, followed by `/flat` when there is one.
    pub fn number(&self) -> String {
        match self.flat_number.as_deref().filter(|flat| !flat.is_empty()) {
            Some(flat) => format!("{}/{}", self.building_number, flat),
            None => self.building_number.clone(),
        }
    }

    /// Returns `street building/flat`, skipping empty parts.
    pub fn full_street(&self) -> String {
        join_non_empty(&[self.street.as_str(), self.number().as_str()], " ")
    }
}

#[reflect_methods]
impl Address {
    pub fn get_full_street(&self) -> String {
        self.full_street()
    }

    pub fn has_flat(&self) -> bool {
        self.flat_number.as_deref().is_some_and(|flat| !flat.is_empty())
    }
}

/// Renders `full street, zip city`, skipping empty parts.
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let locality = join_non_empty(&[self.zip_code.as_str(), self.city.as_str()], " ");
        let full_street = self.full_street();
        f.write_str(&join_non_empty(&[full_street.as_str(), locality.as_str()], ", "))
    }
}

fn join_non_empty(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(separator)
}
