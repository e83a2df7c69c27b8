use std::path::Path;

use crate::error::LoadError;
use crate::models::{CatalogData, CatalogDocument};

/// Reads the catalog document at `path` and keeps only available products.
pub async fn load_catalog(path: impl AsRef<Path>) -> Result<CatalogData, LoadError> {
    let path = path.as_ref();
    log::debug!("loading catalog from {}", path.display());

    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let data = parse_catalog(&raw)?;
    log::info!(
        "loaded {} available products, {} categories, {} brands from {}",
        data.products.len(),
        data.categories.len(),
        data.brands.len(),
        path.display()
    );
    Ok(data)
}

pub fn parse_catalog(raw: &str) -> Result<CatalogData, LoadError> {
    let document: CatalogDocument = serde_json::from_str(raw)?;
    Ok(document.into_available())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_only_available_products() {
        let raw = r#"{
            "productos": [
                {"id": 1, "nombre": "Excavadora 320", "disponible": true},
                {"id": 2, "nombre": "Cargador 950", "disponible": false},
                {"id": 3, "nombre": "Rodillo CS56"}
            ],
            "categorias": [{"id": "excavadoras", "nombre": "Excavadoras"}]
        }"#;

        let data = parse_catalog(raw).unwrap();
        assert_eq!(data.products.len(), 1);
        assert_eq!(data.products[0].id, 1);
        assert_eq!(data.categories.len(), 1);
        assert!(data.brands.is_empty());
    }

    #[test]
    fn parse_classifies_failures() {
        assert!(matches!(parse_catalog("{\"productos\": ["), Err(LoadError::Malformed(_))));
        assert!(matches!(parse_catalog("not json"), Err(LoadError::Malformed(_))));
        assert!(matches!(parse_catalog("{\"categorias\": []}"), Err(LoadError::InvalidShape(_))));
        assert!(matches!(parse_catalog("[]"), Err(LoadError::InvalidShape(_))));
        assert!(matches!(
            parse_catalog("{\"productos\": [{\"id\": \"uno\"}]}"),
            Err(LoadError::InvalidShape(_))
        ));
    }

    #[test]
    fn null_currency_falls_back_to_usd() {
        let data = parse_catalog(
            r#"{"productos": [
                {"id": 1, "nombre": "A", "moneda": null, "disponible": true},
                {"id": 2, "nombre": "B", "moneda": "PEN", "disponible": true},
                {"id": 3, "nombre": "C", "disponible": true}
            ]}"#,
        )
        .unwrap();

        let currencies: Vec<&str> = data.products.iter().map(|p| p.moneda.as_str()).collect();
        assert_eq!(currencies, vec!["USD", "PEN", "USD"]);
    }

    #[test]
    fn publication_timestamps_keep_their_date() {
        let data = parse_catalog(
            r#"{"productos": [
                {"id": 1, "disponible": true, "fecha_publicacion": "2024-05-10"},
                {"id": 2, "disponible": true, "fecha_publicacion": "2024-05-11T10:00:00"},
                {"id": 3, "disponible": true, "fecha_publicacion": "2024-05-12T08:30:00.250Z"},
                {"id": 4, "disponible": true, "fecha_publicacion": "2024-05-13 09:15:00"},
                {"id": 5, "disponible": true, "fecha_publicacion": "pronto"}
            ]}"#,
        )
        .unwrap();

        let dates: Vec<Option<String>> = data
            .products
            .iter()
            .map(|p| p.published_on().map(|d| d.to_string()))
            .collect();
        assert_eq!(
            dates,
            vec![
                Some("2024-05-10".to_string()),
                Some("2024-05-11".to_string()),
                Some("2024-05-12".to_string()),
                Some("2024-05-13".to_string()),
                None,
            ]
        );
    }
}
