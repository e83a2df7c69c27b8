use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Product;

/// Multi-select filter dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    Category,
    Brand,
    Type,
    Condition,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 4] = [
        FilterDimension::Category,
        FilterDimension::Brand,
        FilterDimension::Type,
        FilterDimension::Condition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterDimension::Category => "categoria",
            FilterDimension::Brand => "marca",
            FilterDimension::Type => "tipo",
            FilterDimension::Condition => "estado",
        }
    }
}

impl FromStr for FilterDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "categoria" => Ok(FilterDimension::Category),
            "marca" => Ok(FilterDimension::Brand),
            "tipo" => Ok(FilterDimension::Type),
            "estado" => Ok(FilterDimension::Condition),
            other => Err(format!("unknown filter dimension '{}'", other)),
        }
    }
}

/// How products without a price behave while a price bound is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnpricedPolicy {
    /// Unpriced products never satisfy a price bound.
    #[default]
    Exclude,
    /// Unpriced products are compared as if priced at 0.
    Zero,
}

/// Lowercases and replaces every whitespace run with a single `-`.
pub fn brand_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.extend(c.to_lowercase());
            in_space = false;
        }
    }
    slug
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    search: String,
    categories: BTreeSet<String>,
    brands: BTreeSet<String>,
    types: BTreeSet<String>,
    conditions: BTreeSet<String>,
    price_min: Option<f64>,
    price_max: Option<f64>,
}

impl FilterState {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn price_bounds(&self) -> (Option<f64>, Option<f64>) {
        (self.price_min, self.price_max)
    }

    pub fn selection(&self, dimension: FilterDimension) -> &BTreeSet<String> {
        match dimension {
            FilterDimension::Category => &self.categories,
            FilterDimension::Brand => &self.brands,
            FilterDimension::Type => &self.types,
            FilterDimension::Condition => &self.conditions,
        }
    }

    fn selection_mut(&mut self, dimension: FilterDimension) -> &mut BTreeSet<String> {
        match dimension {
            FilterDimension::Category => &mut self.categories,
            FilterDimension::Brand => &mut self.brands,
            FilterDimension::Type => &mut self.types,
            FilterDimension::Condition => &mut self.conditions,
        }
    }

    /// Returns `true` when the selection actually changed.
    pub fn set(&mut self, dimension: FilterDimension, value: &str, active: bool) -> bool {
        let selection = self.selection_mut(dimension);
        if active {
            selection.insert(value.to_string())
        } else {
            selection.remove(value)
        }
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_lowercase();
    }

    /// Negative or NaN bounds are dropped.
    pub fn set_price_bounds(&mut self, min: Option<f64>, max: Option<f64>) {
        self.price_min = sanitize_bound("minimum", min);
        self.price_max = sanitize_bound("maximum", max);
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && FilterDimension::ALL.iter().all(|d| self.selection(*d).is_empty())
            && self.price_min.is_none()
            && self.price_max.is_none()
    }

    pub fn clear(&mut self) {
        *self = FilterState::default();
    }

    pub fn matches(&self, product: &Product, unpriced: UnpricedPolicy) -> bool {
        self.matches_search(product)
            && allows(&self.categories, &product.categoria)
            && (self.brands.is_empty() || self.brands.contains(&product.brand_slug()))
            && allows(&self.types, &product.tipo)
            && allows(&self.conditions, &product.estado)
            && self.matches_price(product.precio, unpriced)
    }

    fn matches_search(&self, product: &Product) -> bool {
        if self.search.is_empty() {
            return true;
        }
        [&product.nombre, &product.marca, &product.descripcion]
            .iter()
            .any(|field| field.to_lowercase().contains(&self.search))
    }

    fn matches_price(&self, price: Option<f64>, unpriced: UnpricedPolicy) -> bool {
        if self.price_min.is_none() && self.price_max.is_none() {
            return true;
        }
        let price = match (price, unpriced) {
            (Some(price), _) => price,
            (None, UnpricedPolicy::Zero) => 0.0,
            (None, UnpricedPolicy::Exclude) => return false,
        };
        if let Some(min) = self.price_min {
            if price < min {
                return false;
            }
        }
        if let Some(max) = self.price_max {
            if price > max {
                return false;
            }
        }
        true
    }
}

// Empty selection means no constraint on the dimension.
fn allows(selection: &BTreeSet<String>, value: &str) -> bool {
    selection.is_empty() || selection.contains(value)
}

fn sanitize_bound(label: &str, bound: Option<f64>) -> Option<f64> {
    match bound {
        Some(value) if value.is_nan() || value < 0.0 => {
            log::warn!("ignoring invalid {} price bound {}", label, value);
            None
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_whitespace_runs() {
        assert_eq!(brand_slug("John Deere"), "john-deere");
        assert_eq!(brand_slug("Caterpillar"), "caterpillar");
        assert_eq!(brand_slug("New  Holland\tCE"), "new-holland-ce");
        assert_eq!(brand_slug(" JCB"), "-jcb");
    }

    #[test]
    fn set_is_idempotent() {
        let mut filters = FilterState::default();
        assert!(filters.set(FilterDimension::Type, "venta", true));
        assert!(!filters.set(FilterDimension::Type, "venta", true));
        assert_eq!(filters.selection(FilterDimension::Type).len(), 1);

        assert!(filters.set(FilterDimension::Type, "venta", false));
        assert!(!filters.set(FilterDimension::Type, "venta", false));
        assert!(filters.is_empty());
    }

    #[test]
    fn invalid_price_bounds_are_dropped() {
        let mut filters = FilterState::default();
        filters.set_price_bounds(Some(-5.0), Some(f64::NAN));
        assert_eq!(filters.price_bounds(), (None, None));

        filters.set_price_bounds(Some(0.0), Some(100.0));
        assert_eq!(filters.price_bounds(), (Some(0.0), Some(100.0)));
    }

    #[test]
    fn dimension_names_round_trip_through_from_str() {
        for dimension in FilterDimension::ALL {
            assert_eq!(dimension.as_str().parse::<FilterDimension>(), Ok(dimension));
        }
        assert!("modelo".parse::<FilterDimension>().is_err());
    }
}
