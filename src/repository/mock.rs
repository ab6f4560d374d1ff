use mockall::mock;

use super::{ProductReader, ProductWriter, RepositoryResult};
use crate::domain::product::{Product, ProductData};

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self) -> RepositoryResult<Vec<Product>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, data: &ProductData) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, data: &ProductData) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    }
}
