use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "precio-asc")]
    PriceAsc,
    #[serde(rename = "precio-desc")]
    PriceDesc,
    #[serde(rename = "año-asc")]
    YearAsc,
    #[serde(rename = "año-desc")]
    YearDesc,
    #[serde(rename = "nombre")]
    Name,
    /// Most recently published first.
    #[default]
    #[serde(rename = "fecha")]
    Newest,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PriceAsc => "precio-asc",
            SortKey::PriceDesc => "precio-desc",
            SortKey::YearAsc => "año-asc",
            SortKey::YearDesc => "año-desc",
            SortKey::Name => "nombre",
            SortKey::Newest => "fecha",
        }
    }

    /// Unknown keys fall back to the default ordering.
    pub fn parse_or_default(s: &str) -> SortKey {
        s.parse().unwrap_or_else(|err| {
            log::warn!("{}, using '{}'", err, SortKey::default());
            SortKey::default()
        })
    }

    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::PriceAsc => price(a).total_cmp(&price(b)),
            SortKey::PriceDesc => price(b).total_cmp(&price(a)),
            SortKey::YearAsc => year(a).cmp(&year(b)),
            SortKey::YearDesc => year(b).cmp(&year(a)),
            SortKey::Name => compare_names(&a.nombre, &b.nombre),
            // `None < Some`, so undated products end up last.
            SortKey::Newest => b.published_on().cmp(&a.published_on()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "precio-asc" => Ok(SortKey::PriceAsc),
            "precio-desc" => Ok(SortKey::PriceDesc),
            "año-asc" | "anio-asc" => Ok(SortKey::YearAsc),
            "año-desc" | "anio-desc" => Ok(SortKey::YearDesc),
            "nombre" => Ok(SortKey::Name),
            "fecha" => Ok(SortKey::Newest),
            other => Err(format!("unknown sort key '{}'", other)),
        }
    }
}

fn price(product: &Product) -> f64 {
    product.precio.unwrap_or(0.0)
}

fn year(product: &Product) -> i32 {
    product.anio.unwrap_or(0)
}

fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

// Case and Spanish accents only matter as a tie-breaker.
fn collation_key(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_ignore_case_and_accents() {
        assert_eq!(compare_names("área", "Bulldozer"), Ordering::Less);
        assert_eq!(compare_names("excavadora", "Excavadora"), Ordering::Greater);
        assert_eq!(compare_names("", "a"), Ordering::Less);
    }

    #[test]
    fn keys_parse_from_select_values() {
        for key in [
            SortKey::PriceAsc,
            SortKey::PriceDesc,
            SortKey::YearAsc,
            SortKey::YearDesc,
            SortKey::Name,
            SortKey::Newest,
        ] {
            assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
        }
        assert_eq!(SortKey::parse_or_default("relevancia"), SortKey::Newest);
    }
}
