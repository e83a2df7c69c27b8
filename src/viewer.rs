use crate::catalog::Catalog;
use crate::models::Product;

/// Detail viewer for a single product with an image gallery.
#[derive(Debug, Clone, Default)]
pub struct ProductViewer {
    product: Option<Product>,
    image_index: usize,
}

impl ProductViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, product: &Product) {
        self.product = Some(product.clone());
        self.image_index = 0;
    }

    /// Opens the available product with `id`; `false` when there is none.
    pub fn open_by_id(&mut self, catalog: &Catalog, id: i64) -> bool {
        match catalog.product(id) {
            Some(product) => {
                self.open(product);
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.product = None;
        self.image_index = 0;
    }

    pub fn is_open(&self) -> bool {
        self.product.is_some()
    }

    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    pub fn image_index(&self) -> usize {
        self.image_index
    }

    pub fn current_image(&self) -> Option<&str> {
        self.product
            .as_ref()
            .and_then(|p| p.imagenes.get(self.image_index))
            .map(String::as_str)
    }

    pub fn next_image(&mut self) {
        self.step(1);
    }

    pub fn previous_image(&mut self) {
        self.step(-1);
    }

    /// Jumps to `index`; out-of-range indices are ignored.
    pub fn set_image(&mut self, index: usize) -> bool {
        match &self.product {
            Some(product) if index < product.imagenes.len() => {
                self.image_index = index;
                true
            }
            _ => false,
        }
    }

    /// `(index, image, is_current)` for every image of the open product.
    pub fn thumbnails(&self) -> Vec<(usize, &str, bool)> {
        match &self.product {
            Some(product) => product
                .imagenes
                .iter()
                .enumerate()
                .map(|(i, image)| (i, image.as_str(), i == self.image_index))
                .collect(),
            None => Vec::new(),
        }
    }

    // Wraps around at both ends.
    fn step(&mut self, direction: isize) {
        let count = match &self.product {
            Some(product) if !product.imagenes.is_empty() => product.imagenes.len() as isize,
            _ => return,
        };
        let next = (self.image_index as isize + direction).rem_euclid(count);
        self.image_index = next as usize;
    }
}
