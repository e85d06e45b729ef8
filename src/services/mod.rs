pub mod catalog;
pub mod dataset;
pub mod rating;
pub mod recommendations;
pub mod similarity;
pub mod text;
pub mod title_search;
pub mod top_rated;
pub mod vectorize;

pub use catalog::{Catalog, CatalogCache};
pub use dataset::{DatasetSource, FileCsvSource, InlineCsvSource, RemoteCsvSource};
pub use text::{EnglishStemmer, TokenStemmer};
