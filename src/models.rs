use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::{brand_slug, Catalog, FilterDimension, SortKey};

// `null` and a missing key mean the same thing in the published data.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_currency() -> String {
    "USD".to_string()
}

fn null_as_default_currency<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_currency))
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nombre: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub marca: String,
    #[serde(default)]
    pub modelo: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categoria: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tipo: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub estado: String,
    #[serde(default)]
    pub precio: Option<f64>,
    #[serde(default = "default_currency", deserialize_with = "null_as_default_currency")]
    pub moneda: String,
    #[serde(rename = "año", alias = "anio", default)]
    pub anio: Option<i32>,
    #[serde(default)]
    pub horas: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ubicacion: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub descripcion: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub especificaciones: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub caracteristicas: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub imagenes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disponible: bool,
    #[serde(default)]
    pub fecha_publicacion: Option<String>,
}

impl Product {
    /// Brand id as used by the brand filter (`"John Deere"` -> `"john-deere"`).
    pub fn brand_slug(&self) -> String {
        brand_slug(&self.marca)
    }

    /// Publication date from `YYYY-MM-DD` or an ISO 8601 timestamp,
    /// `None` when absent or unparseable.
    pub fn published_on(&self) -> Option<NaiveDate> {
        let raw = self.fecha_publicacion.as_deref()?.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                    .iter()
                    .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                    .map(|timestamp| timestamp.date())
            })
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|timestamp| timestamp.date_naive()))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Category {
    pub id: String,
    pub nombre: String,
    #[serde(default, alias = "icon")]
    pub icono: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Brand {
    pub id: String,
    pub nombre: String,
    #[serde(default, alias = "icon")]
    pub icono: Option<String>,
}

/// The published JSON document, exactly as it is stored.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CatalogDocument {
    pub productos: Vec<Product>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categorias: Vec<Category>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub marcas: Vec<Brand>,
}

impl CatalogDocument {
    /// Drops every product not flagged `disponible`.
    pub fn into_available(self) -> CatalogData {
        let total = self.productos.len();
        let products: Vec<Product> = self.productos.into_iter().filter(|p| p.disponible).collect();
        log::debug!("{} of {} products are available", products.len(), total);
        CatalogData {
            products,
            categories: self.categorias,
            brands: self.marcas,
        }
    }
}

/// Working set of the catalog: available products plus filter metadata.
#[derive(Debug, Clone, Default)]
pub struct CatalogData {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
}

/// One-shot set of catalog parameters, e.g. from command-line flags.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct CatalogQuery {
    pub search_term: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub brands: Vec<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort_by: Option<String>,
    pub page_size: Option<usize>,
    pub page: Option<usize>,
}

impl CatalogQuery {
    pub fn apply(&self, catalog: &mut Catalog) {
        if let Some(size) = self.page_size {
            catalog.set_page_size(size);
        }
        if let Some(sort_by) = &self.sort_by {
            catalog.set_sort(SortKey::parse_or_default(sort_by));
        }

        let selections = [
            (FilterDimension::Category, &self.categories),
            (FilterDimension::Brand, &self.brands),
            (FilterDimension::Type, &self.types),
            (FilterDimension::Condition, &self.conditions),
        ];
        for (dimension, values) in selections {
            for value in values {
                catalog.set_filter(dimension, value, true);
            }
        }

        if let Some(term) = &self.search_term {
            catalog.set_search(term);
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            catalog.set_price_bounds(self.min_price, self.max_price);
        }

        // Filters reset the page, so navigation comes last.
        if let Some(page) = self.page {
            if !catalog.go_to_page(page) {
                log::warn!(
                    "page {} is out of range (1-{}), staying on page {}",
                    page,
                    catalog.pagination().total_pages(),
                    catalog.pagination().page()
                );
            }
        }
    }
}
