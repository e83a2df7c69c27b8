//! Rendering boundary: what a view layer needs for one render pass, plus the
//! plain-text renderer used by the command-line front end.

use std::fmt::Write;

use serde::Serialize;

use crate::catalog::{Catalog, PageToken};
use crate::models::Product;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Serialize)]
pub struct CatalogView<'a> {
    pub items: Vec<&'a Product>,
    pub total_filtered: usize,
    pub total_available: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub page_tokens: Vec<PageToken>,
    pub summary: String,
    pub count_label: String,
    pub error: Option<&'a str>,
}

impl<'a> CatalogView<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        let pagination = catalog.pagination();
        let total_filtered = catalog.filtered_count();
        Self {
            items: catalog.current_page_items(),
            total_filtered,
            total_available: catalog.products().len(),
            page: pagination.page(),
            page_size: pagination.page_size(),
            total_pages: pagination.total_pages(),
            has_previous: pagination.has_previous(),
            has_next: pagination.has_next(),
            page_tokens: pagination.tokens(),
            summary: results_summary(pagination.page(), pagination.page_size(), total_filtered),
            count_label: count_label(total_filtered),
            error: catalog.last_error(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// `Mostrando 1-12 de 15 productos`
pub fn results_summary(page: usize, page_size: usize, total: usize) -> String {
    if total == 0 {
        return "No se encontraron productos".to_string();
    }
    let start = ((page.max(1) - 1) * page_size + 1).min(total);
    let end = (page.max(1) * page_size).min(total);
    let noun = if total == 1 { "producto" } else { "productos" };
    format!("Mostrando {}-{} de {} {}", start, end, total, noun)
}

/// `15 productos encontrados`
pub fn count_label(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{} producto{} encontrado{}", count, plural, plural)
}

/// Thousands separated with `,`, at most three decimals: `150000.5` -> `150,000.5`.
pub fn format_amount(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let abs = rounded.abs();
    let integer = abs.trunc() as u64;
    let fraction = ((abs - abs.trunc()) * 1000.0).round() as u64;

    let digits = integer.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 5);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if fraction > 0 {
        let decimals = format!("{:03}", fraction);
        out.push('.');
        out.push_str(decimals.trim_end_matches('0'));
    }
    out
}

/// `USD 150,000`, or `N/A` for unpriced products.
pub fn price_label(product: &Product) -> String {
    match product.precio {
        Some(price) => format!("{} {}", product.moneda, format_amount(price)),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn hours_label(product: &Product) -> String {
    match product.horas {
        Some(hours) => format!("{} hrs", format_amount(hours)),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn year_label(product: &Product) -> String {
    product
        .anio
        .map(|year| year.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// `especificaciones` keys are stored snake_case (`peso_operativo`).
pub fn spec_label(key: &str) -> String {
    key.replace('_', " ")
}

pub fn render_text(view: &CatalogView) -> String {
    let mut out = String::new();

    if let Some(error) = view.error {
        let _ = writeln!(out, "Error al cargar productos");
        let _ = writeln!(out, "{}", error);
        return out;
    }

    let _ = writeln!(out, "{}", view.summary);
    if view.is_empty() {
        let _ = writeln!(out, "No hay productos que coincidan con los filtros seleccionados.");
        return out;
    }

    let _ = writeln!(out);
    for product in &view.items {
        let _ = writeln!(
            out,
            "#{:<4} {} [{}/{}]",
            product.id, product.nombre, product.tipo, product.estado
        );
        let _ = writeln!(
            out,
            "      {} | {} | {} | {} | {}",
            product.marca,
            year_label(product),
            hours_label(product),
            product.ubicacion,
            price_label(product)
        );
    }

    if view.total_pages > 1 {
        let controls: Vec<String> = view
            .page_tokens
            .iter()
            .map(|token| match token {
                PageToken::Page(page) if *page == view.page => format!("[{}]", page),
                other => other.to_string(),
            })
            .collect();
        let _ = writeln!(out);
        let _ = writeln!(out, "Páginas: {}", controls.join(" "));
    }
    out
}

pub fn render_detail(product: &Product) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", product.nombre);
    let _ = writeln!(out, "{}  [{}] [{}]", price_label(product), product.tipo, product.estado);
    let _ = writeln!(out);
    let _ = writeln!(out, "Marca:     {}", product.marca);
    let _ = writeln!(
        out,
        "Modelo:    {}",
        product.modelo.as_deref().unwrap_or(NOT_AVAILABLE)
    );
    let _ = writeln!(out, "Año:       {}", year_label(product));
    let _ = writeln!(out, "Horas:     {}", hours_label(product));
    let _ = writeln!(out, "Ubicación: {}", product.ubicacion);

    if !product.descripcion.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", product.descripcion);
    }

    if !product.especificaciones.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Especificaciones:");
        for (key, value) in &product.especificaciones {
            let _ = writeln!(out, "  {}: {}", spec_label(key), value);
        }
    }

    if !product.caracteristicas.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Características:");
        for feature in &product.caracteristicas {
            let _ = writeln!(out, "  - {}", feature);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_use_thousands_separators() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(950.0), "950");
        assert_eq!(format_amount(1200.0), "1,200");
        assert_eq!(format_amount(150000.0), "150,000");
        assert_eq!(format_amount(1234567.5), "1,234,567.5");
        assert_eq!(format_amount(1234.56), "1,234.56");
    }

    #[test]
    fn summary_covers_last_partial_page() {
        assert_eq!(results_summary(1, 12, 15), "Mostrando 1-12 de 15 productos");
        assert_eq!(results_summary(2, 12, 15), "Mostrando 13-15 de 15 productos");
        assert_eq!(results_summary(1, 12, 1), "Mostrando 1-1 de 1 producto");
        assert_eq!(results_summary(1, 12, 0), "No se encontraron productos");
    }

    #[test]
    fn count_label_pluralizes() {
        assert_eq!(count_label(0), "0 productos encontrados");
        assert_eq!(count_label(1), "1 producto encontrado");
        assert_eq!(count_label(7), "7 productos encontrados");
    }
}
