use crate::catalog::Catalog;
use crate::error::TutorError;

const ALGEBRA_CATALOG: &str = include_str!("../../data/catalog.json");

/// The algebra catalog bundled with the app.
pub fn algebra_catalog() -> Result<Catalog, TutorError> {
    Catalog::from_json(ALGEBRA_CATALOG)
        .map_err(|e| e.with_context("bundled algebra catalog"))
}
