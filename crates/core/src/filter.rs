//! Filter criteria for listing queries
//!
//! A [`FilterCriteria`] is an immutable value object holding the selected
//! filter dimensions. It is built once per filter-apply action and handed to
//! the query layer by value; new criteria replace old ones wholesale.

use serde::{Deserialize, Serialize};

use crate::price::PriceRange;

/// Whether a post offers the property for sale or for rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostType {
    Sale,
    Rent,
}

impl PostType {
    pub fn wire_value(self) -> &'static str {
        match self {
            PostType::Sale => "SALE",
            PostType::Rent => "RENT",
        }
    }
}

impl std::str::FromStr for PostType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sale" => Ok(PostType::Sale),
            "rent" => Ok(PostType::Rent),
            _ => Err(format!("Invalid post type: {s}. Valid types: sale, rent")),
        }
    }
}

/// The kind of real estate a post advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    House,
    Apartment,
    Land,
}

impl PropertyType {
    pub fn wire_value(self) -> &'static str {
        match self {
            PropertyType::House => "HOUSE",
            PropertyType::Apartment => "APARTMENT",
            PropertyType::Land => "LAND",
        }
    }
}

impl std::str::FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "house" => Ok(PropertyType::House),
            "apartment" => Ok(PropertyType::Apartment),
            "land" => Ok(PropertyType::Land),
            _ => Err(format!(
                "Invalid property type: {s}. Valid types: house, apartment, land"
            )),
        }
    }
}

/// Supported cities. The wire slugs follow the backend contract, including
/// the mixed-case `DaNang`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum City {
    #[serde(rename = "hanoi")]
    Hanoi,
    #[serde(rename = "hcm")]
    Hcm,
    #[serde(rename = "DaNang")]
    DaNang,
    #[serde(rename = "cantho")]
    CanTho,
}

impl City {
    pub fn wire_value(self) -> &'static str {
        match self {
            City::Hanoi => "hanoi",
            City::Hcm => "hcm",
            City::DaNang => "DaNang",
            City::CanTho => "cantho",
        }
    }
}

impl std::str::FromStr for City {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hanoi" => Ok(City::Hanoi),
            "hcm" => Ok(City::Hcm),
            "danang" => Ok(City::DaNang),
            "cantho" => Ok(City::CanTho),
            _ => Err(format!(
                "Invalid city: {s}. Valid cities: hanoi, hcm, danang, cantho"
            )),
        }
    }
}

/// The selected filter dimensions for a listing query. Any `None` dimension
/// is simply not filtered on and never appears in the query string.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub post_type: Option<PostType>,
    pub property_type: Option<PropertyType>,
    pub city: Option<City>,
    pub price_from: Option<i64>,
    pub price_to: Option<i64>,
}

impl FilterCriteria {
    pub fn new(
        post_type: Option<PostType>,
        property_type: Option<PropertyType>,
        city: Option<City>,
        price: PriceRange,
    ) -> Self {
        Self {
            post_type,
            property_type,
            city,
            price_from: price.from,
            price_to: price.to,
        }
    }

    /// True iff at least one dimension is set. Decides whether the filtered
    /// or the plain listing endpoint is queried.
    pub fn is_active(&self) -> bool {
        self.post_type.is_some()
            || self.property_type.is_some()
            || self.city.is_some()
            || self.price_from.is_some()
            || self.price_to.is_some()
    }

    /// Wire query parameters for the filtered listing endpoint, with unset
    /// dimensions omitted entirely.
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(post_type) = self.post_type {
            params.push(("postType".to_string(), post_type.wire_value().to_string()));
        }
        if let Some(property_type) = self.property_type {
            params.push((
                "realEstateType".to_string(),
                property_type.wire_value().to_string(),
            ));
        }
        if let Some(city) = self.city {
            params.push(("city".to_string(), city.wire_value().to_string()));
        }
        if let Some(from) = self.price_from {
            params.push(("priceFrom".to_string(), from.to_string()));
        }
        if let Some(to) = self.price_to {
            params.push(("priceTo".to_string(), to.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::{normalize, PricePreset, PriceSelection};

    #[test]
    fn test_empty_criteria_is_inactive() {
        assert!(!FilterCriteria::default().is_active());
    }

    #[test]
    fn test_single_dimension_is_active() {
        let criteria = FilterCriteria {
            post_type: Some(PostType::Sale),
            ..Default::default()
        };
        assert!(criteria.is_active());
    }

    #[test]
    fn test_price_only_is_active() {
        let criteria = FilterCriteria {
            price_to: Some(999_999_999),
            ..Default::default()
        };
        assert!(criteria.is_active());
    }

    #[test]
    fn test_query_params_omit_unset_dimensions() {
        let criteria = FilterCriteria {
            post_type: Some(PostType::Rent),
            city: Some(City::DaNang),
            ..Default::default()
        };
        let params = criteria.query_params();
        assert_eq!(
            params,
            vec![
                ("postType".to_string(), "RENT".to_string()),
                ("city".to_string(), "DaNang".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_params_carry_preset_boundaries_verbatim() {
        let price = normalize(PriceSelection::Preset(PricePreset::FiveToTen));
        let criteria = FilterCriteria::new(None, None, None, price);
        let params = criteria.query_params();
        assert_eq!(
            params,
            vec![
                ("priceFrom".to_string(), "5000000000".to_string()),
                ("priceTo".to_string(), "10000000000".to_string()),
            ]
        );
    }

    #[test]
    fn test_city_parsing_is_case_insensitive() {
        assert_eq!("DANANG".parse::<City>(), Ok(City::DaNang));
        assert_eq!(City::DaNang.wire_value(), "DaNang");
    }

    #[test]
    fn test_invalid_enum_inputs() {
        assert!("lease".parse::<PostType>().is_err());
        assert!("condo".parse::<PropertyType>().is_err());
        assert!("hue".parse::<City>().is_err());
    }
}
