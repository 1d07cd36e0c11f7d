//! Catalog walkthrough
//!
//! Mirrors the `catalog_trace` driver step by step.

use repokit::demo::Catalog;
use repokit::storage::RepositoryConfig;

#[test]
fn seeded_catalog_lists_every_kind() {
    let catalog = Catalog::default();
    catalog.seed().unwrap();

    let mut categories: Vec<String> = catalog
        .categories
        .find_all()
        .iter()
        .map(|c| c.read().name.clone())
        .collect();
    categories.sort();
    assert_eq!(categories, vec!["Lomos", "Pizzas", "Sandwich", "Supplies"]);
    assert_eq!(catalog.supplies.len(), 4);
    assert_eq!(catalog.manufactured.len(), 2);
}

#[test]
fn in_place_edit_through_returned_handle() {
    let catalog = Catalog::default();
    let (pizza, _) = catalog.seed().unwrap();

    if let Some(article) = catalog.manufactured.find_by_id(pizza) {
        article.write().description = "Pizza with pineapple and extra cheese".to_string();
    }

    let article = catalog.manufactured.find_by_id(pizza).unwrap();
    assert_eq!(article.read().description, "Pizza with pineapple and extra cheese");
}

#[test]
fn deleting_lomo_leaves_pizza() {
    let catalog = Catalog::default();
    let (pizza, lomo) = catalog.seed().unwrap();

    assert!(catalog.manufactured.delete(lomo));
    let remaining = catalog.manufactured.find_all();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].read().article.id, Some(pizza));
}

#[test]
fn strict_catalog_seeds_cleanly() {
    let catalog = Catalog::with_config(&RepositoryConfig::strict());
    let (pizza, lomo) = catalog.seed().unwrap();
    assert_ne!(pizza, lomo);
}

#[test]
fn supplies_found_by_preparation_flag() {
    let catalog = Catalog::default();
    catalog.seed().unwrap();

    catalog.supplies.update_field(3, "for_preparation", false).unwrap();
    assert_eq!(catalog.supplies.find_by_field("for_preparation", true).unwrap().len(), 3);
}
