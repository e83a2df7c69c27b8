//! Catalog engine: the available product set plus the filter, sort and
//! pagination state that derives the page on display.
//!
//! Every mutator re-derives the visible sequence before returning, so a
//! [`Catalog`] never exposes a half-applied state.

pub mod filter;
pub mod pagination;
pub mod sort;

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::data::load_catalog;
use crate::error::LoadError;
use crate::models::{Brand, CatalogData, Category, Product};
use crate::view::CatalogView;

pub use filter::{brand_slug, FilterDimension, FilterState, UnpricedPolicy};
pub use pagination::{page_tokens, PageToken, Pagination, DEFAULT_PAGE_SIZE};
pub use sort::SortKey;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogOptions {
    pub page_size: usize,
    pub unpriced: UnpricedPolicy,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            unpriced: UnpricedPolicy::default(),
        }
    }
}

/// Available products per category id and per brand slug.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FacetCounts {
    pub categories: BTreeMap<String, usize>,
    pub brands: BTreeMap<String, usize>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    data: CatalogData,
    filters: FilterState,
    sort: SortKey,
    pagination: Pagination,
    unpriced: UnpricedPolicy,
    // Indices into `data.products`, filtered and sorted.
    visible: Vec<usize>,
    last_error: Option<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::new(CatalogOptions::default())
    }
}

impl Catalog {
    /// An empty catalog, waiting for [`Catalog::load`].
    pub fn new(options: CatalogOptions) -> Self {
        Self {
            data: CatalogData::default(),
            filters: FilterState::default(),
            sort: SortKey::default(),
            pagination: Pagination::new(options.page_size),
            unpriced: options.unpriced,
            visible: Vec::new(),
            last_error: None,
        }
    }

    pub fn with_data(data: CatalogData, options: CatalogOptions) -> Self {
        let mut catalog = Catalog::new(options);
        catalog.replace_data(data);
        catalog
    }

    /// Loads the document at `source`. On failure the previous product set
    /// is kept and the user-facing message is recorded in `last_error`.
    pub async fn load(&mut self, source: impl AsRef<Path>) -> Result<(), LoadError> {
        match load_catalog(source).await {
            Ok(data) => {
                self.replace_data(data);
                Ok(())
            }
            Err(err) => {
                log::error!("error loading products data: {}", err);
                self.last_error = Some(err.user_message().to_string());
                Err(err)
            }
        }
    }

    pub fn replace_data(&mut self, data: CatalogData) {
        self.data = data;
        self.last_error = None;
        self.apply_filters();
    }

    pub fn products(&self) -> &[Product] {
        &self.data.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.data.categories
    }

    pub fn brands(&self) -> &[Brand] {
        &self.data.brands
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn product(&self, id: i64) -> Option<&Product> {
        self.data.products.iter().find(|p| p.id == id)
    }

    pub fn set_filter(&mut self, dimension: FilterDimension, value: &str, active: bool) {
        if self.filters.set(dimension, value, active) {
            self.apply_filters();
        }
    }

    pub fn set_search(&mut self, text: &str) {
        self.filters.set_search(text);
        self.apply_filters();
    }

    pub fn set_price_bounds(&mut self, min: Option<f64>, max: Option<f64>) {
        self.filters.set_price_bounds(min, max);
        self.apply_filters();
    }

    /// Resets every filter and the page; the sort key is kept.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.apply_filters();
    }

    pub fn set_sort(&mut self, key: SortKey) {
        self.sort = key;
        self.sort_visible();
        self.pagination.set_total_items(self.visible.len());
    }

    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        self.pagination.set_page_size(page_size)
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.pagination.go_to(page)
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.pagination.page() + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        self.go_to_page(self.pagination.page().saturating_sub(1))
    }

    /// The full filtered sequence in display order.
    pub fn filtered(&self) -> impl Iterator<Item = &Product> + '_ {
        self.visible.iter().map(move |&i| &self.data.products[i])
    }

    pub fn filtered_count(&self) -> usize {
        self.visible.len()
    }

    pub fn current_page_items(&self) -> Vec<&Product> {
        self.visible[self.pagination.range()]
            .iter()
            .map(|&i| &self.data.products[i])
            .collect()
    }

    pub fn view(&self) -> CatalogView<'_> {
        CatalogView::new(self)
    }

    pub fn facet_counts(&self) -> FacetCounts {
        let mut counts = FacetCounts::default();
        for product in &self.data.products {
            *counts.categories.entry(product.categoria.clone()).or_insert(0) += 1;
            *counts.brands.entry(product.brand_slug()).or_insert(0) += 1;
        }
        counts
    }

    fn apply_filters(&mut self) {
        let filters = &self.filters;
        let unpriced = self.unpriced;
        self.visible = self
            .data
            .products
            .iter()
            .enumerate()
            .filter(|(_, product)| filters.matches(product, unpriced))
            .map(|(i, _)| i)
            .collect();
        self.sort_visible();

        self.pagination.reset();
        self.pagination.set_total_items(self.visible.len());
        log::debug!(
            "filters applied: {} of {} products visible",
            self.visible.len(),
            self.data.products.len()
        );
    }

    fn sort_visible(&mut self) {
        let products = &self.data.products;
        let sort = self.sort;
        // Ties fall back to dataset order, whatever the previous key was.
        self.visible.sort_by(|&a, &b| {
            sort.compare(&products[a], &products[b])
                .then_with(|| a.cmp(&b))
        });
    }
}
