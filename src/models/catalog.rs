use crate::models::product::Product;

/// Products in file order. Ids are not unique; the first match wins.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.has_id(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub(crate) fn push(&mut self, product: Product) {
        self.products.push(product);
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
