//! Article catalog: categories, measurement units, supplies and
//! manufactured articles.
//!
//! All identities are `Long`. Supplies and manufactured articles embed a
//! common [`Article`] and expose its fields through [`HasArticle`].
//! References to categories, units and supplies are [`Shared`] handles as
//! returned by the repositories, so edits made through a repository are seen
//! by every article pointing at the same record.

use std::fmt;
use std::sync::Arc;

use repokit_foundation::{IdentityRepr, Result, Type, Value};
use repokit_storage::{
    Entity, EntitySchema, FieldSchema, Getter, IdentitySlot, Repository, RepositoryConfig, Setter, Shared,
};

fn long_identity<E: Entity>(get: Getter<E>, set: Setter<E>) -> IdentitySlot<E> {
    IdentitySlot::new(IdentityRepr::Long, get, set)
}

fn named_schema<E: Entity>(
    name: &'static str,
    get_id: Getter<E>,
    set_id: Setter<E>,
    get_name: Getter<E>,
    set_name: Setter<E>,
) -> EntitySchema<E> {
    EntitySchema::new(name)
        .with_identity(long_identity(get_id, set_id))
        .with_field(FieldSchema::new("name", Type::String, get_name, set_name))
}

// =============================================================================
// Lookup tables
// =============================================================================

/// An article category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub id: Option<i64>,
    pub name: String,
}

impl Category {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

impl Entity for Category {
    fn schema() -> EntitySchema<Self> {
        named_schema(
            "Category",
            |c: &Self| c.id.into(),
            |c: &mut Self, v| {
                c.id = v.extract()?;
                Ok(())
            },
            |c: &Self| Value::from(&c.name),
            |c: &mut Self, v| {
                c.name = v.extract()?;
                Ok(())
            },
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Category#{id} {}", self.name),
            None => write!(f, "Category#- {}", self.name),
        }
    }
}

/// A unit of measurement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeasurementUnit {
    pub id: Option<i64>,
    pub name: String,
}

impl MeasurementUnit {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

impl Entity for MeasurementUnit {
    fn schema() -> EntitySchema<Self> {
        named_schema(
            "MeasurementUnit",
            |u: &Self| u.id.into(),
            |u: &mut Self, v| {
                u.id = v.extract()?;
                Ok(())
            },
            |u: &Self| Value::from(&u.name),
            |u: &mut Self, v| {
                u.name = v.extract()?;
                Ok(())
            },
        )
    }
}

/// An image attached to an article. Images are not stored on their own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticleImage {
    pub id: Option<i64>,
    pub name: String,
}

impl ArticleImage {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

// =============================================================================
// Articles
// =============================================================================

/// Data common to every article.
#[derive(Clone, Debug, Default)]
pub struct Article {
    pub id: Option<i64>,
    pub name: String,
    pub sale_price: Option<f64>,
    pub unit: Option<Shared<MeasurementUnit>>,
    pub category: Option<Shared<Category>>,
    pub images: Vec<ArticleImage>,
}

impl Article {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sale_price(mut self, price: f64) -> Self {
        self.sale_price = Some(price);
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: &Shared<MeasurementUnit>) -> Self {
        self.unit = Some(Arc::clone(unit));
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: &Shared<Category>) -> Self {
        self.category = Some(Arc::clone(category));
        self
    }

    pub fn add_image(&mut self, image: ArticleImage) {
        self.images.push(image);
    }

    fn category_name(&self) -> Value {
        self.category
            .as_ref()
            .map_or(Value::Nil, |c| Value::from(&c.read().name))
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "#{id} {}", self.name)?,
            None => write!(f, "#- {}", self.name)?,
        }
        if let Some(price) = self.sale_price {
            write!(f, " price={price:.2}")?;
        }
        if let Some(unit) = &self.unit {
            write!(f, " unit={}", unit.read().name)?;
        }
        if let Some(category) = &self.category {
            write!(f, " category={}", category.read().name)?;
        }
        if !self.images.is_empty() {
            let names: Vec<&str> = self.images.iter().map(|i| i.name.as_str()).collect();
            write!(f, " images=[{}]", names.join(", "))?;
        }
        Ok(())
    }
}

/// Entities built around an embedded [`Article`].
pub trait HasArticle {
    fn article(&self) -> &Article;
    fn article_mut(&mut self) -> &mut Article;
}

/// Builds a schema with the identity and fields every article shares.
fn article_schema<E: Entity + HasArticle>(name: &'static str) -> EntitySchema<E> {
    EntitySchema::<E>::new(name)
        .with_identity(long_identity(
            |e| e.article().id.into(),
            |e, v| {
                e.article_mut().id = v.extract()?;
                Ok(())
            },
        ))
        .with_field(FieldSchema::new(
            "name",
            Type::String,
            |e| Value::from(&e.article().name),
            |e, v| {
                e.article_mut().name = v.extract()?;
                Ok(())
            },
        ))
        .with_field(FieldSchema::new(
            "sale_price",
            Type::option(Type::Double),
            |e| e.article().sale_price.into(),
            |e, v| {
                e.article_mut().sale_price = v.extract()?;
                Ok(())
            },
        ))
        .with_field(FieldSchema::read_only("category", Type::option(Type::String), |e| {
            e.article().category_name()
        }))
}

/// A raw material bought and kept in stock.
#[derive(Clone, Debug)]
pub struct SupplyArticle {
    pub article: Article,
    pub purchase_price: f64,
    pub current_stock: i32,
    pub max_stock: i32,
    pub min_stock: i32,
    pub for_preparation: bool,
}

impl SupplyArticle {
    #[must_use]
    pub fn new(article: Article, purchase_price: f64) -> Self {
        Self {
            article,
            purchase_price,
            current_stock: 0,
            max_stock: 0,
            min_stock: 0,
            for_preparation: false,
        }
    }

    /// Sets current stock and its bounds.
    #[must_use]
    pub fn with_stock(mut self, current: i32, min: i32, max: i32) -> Self {
        self.current_stock = current;
        self.min_stock = min;
        self.max_stock = max;
        self
    }

    #[must_use]
    pub fn for_preparation(mut self) -> Self {
        self.for_preparation = true;
        self
    }

    /// Returns true if stock has dropped to the minimum or below.
    #[must_use]
    pub fn needs_restock(&self) -> bool {
        self.current_stock <= self.min_stock
    }
}

impl HasArticle for SupplyArticle {
    fn article(&self) -> &Article {
        &self.article
    }

    fn article_mut(&mut self) -> &mut Article {
        &mut self.article
    }
}

impl Entity for SupplyArticle {
    fn schema() -> EntitySchema<Self> {
        article_schema::<Self>("SupplyArticle")
            .with_field(FieldSchema::new(
                "purchase_price",
                Type::Double,
                |s| Value::Double(s.purchase_price),
                |s, v| {
                    s.purchase_price = v.extract()?;
                    Ok(())
                },
            ))
            .with_field(FieldSchema::new(
                "current_stock",
                Type::Int,
                |s| Value::Int(s.current_stock),
                |s, v| {
                    s.current_stock = v.extract()?;
                    Ok(())
                },
            ))
            .with_field(FieldSchema::new(
                "max_stock",
                Type::Int,
                |s| Value::Int(s.max_stock),
                |s, v| {
                    s.max_stock = v.extract()?;
                    Ok(())
                },
            ))
            .with_field(FieldSchema::new(
                "min_stock",
                Type::Int,
                |s| Value::Int(s.min_stock),
                |s, v| {
                    s.min_stock = v.extract()?;
                    Ok(())
                },
            ))
            .with_field(FieldSchema::new(
                "for_preparation",
                Type::Bool,
                |s| Value::Bool(s.for_preparation),
                |s, v| {
                    s.for_preparation = v.extract()?;
                    Ok(())
                },
            ))
    }
}

impl fmt::Display for SupplyArticle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Supply{} cost={:.2} stock={} [{}..{}]",
            self.article, self.purchase_price, self.current_stock, self.min_stock, self.max_stock
        )?;
        if self.for_preparation {
            write!(f, " (for preparation)")?;
        }
        Ok(())
    }
}

/// One supply line in a manufactured article's recipe.
#[derive(Clone, Debug)]
pub struct ManufacturedArticleDetail {
    pub id: Option<i64>,
    pub quantity: i32,
    pub supply: Shared<SupplyArticle>,
}

impl ManufacturedArticleDetail {
    #[must_use]
    pub fn new(supply: &Shared<SupplyArticle>, quantity: i32) -> Self {
        Self {
            id: None,
            quantity,
            supply: Arc::clone(supply),
        }
    }
}

impl fmt::Display for ManufacturedArticleDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.quantity, self.supply.read().article.name)
    }
}

/// An article produced from supplies.
#[derive(Clone, Debug)]
pub struct ManufacturedArticle {
    pub article: Article,
    pub description: String,
    pub estimated_minutes: i32,
    pub preparation: String,
    pub details: Vec<ManufacturedArticleDetail>,
}

impl ManufacturedArticle {
    #[must_use]
    pub fn new(article: Article, description: impl Into<String>, estimated_minutes: i32) -> Self {
        Self {
            article,
            description: description.into(),
            estimated_minutes,
            preparation: String::new(),
            details: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_preparation(mut self, preparation: impl Into<String>) -> Self {
        self.preparation = preparation.into();
        self
    }

    /// Adds a recipe line for `quantity` units of `supply`.
    pub fn add_detail(&mut self, supply: &Shared<SupplyArticle>, quantity: i32) {
        self.details.push(ManufacturedArticleDetail::new(supply, quantity));
    }
}

impl HasArticle for ManufacturedArticle {
    fn article(&self) -> &Article {
        &self.article
    }

    fn article_mut(&mut self) -> &mut Article {
        &mut self.article
    }
}

impl Entity for ManufacturedArticle {
    fn schema() -> EntitySchema<Self> {
        article_schema::<Self>("ManufacturedArticle")
            .with_field(FieldSchema::new(
                "description",
                Type::String,
                |m| Value::from(&m.description),
                |m, v| {
                    m.description = v.extract()?;
                    Ok(())
                },
            ))
            .with_field(FieldSchema::new(
                "estimated_minutes",
                Type::Int,
                |m| Value::Int(m.estimated_minutes),
                |m, v| {
                    m.estimated_minutes = v.extract()?;
                    Ok(())
                },
            ))
            .with_field(FieldSchema::new(
                "preparation",
                Type::String,
                |m| Value::from(&m.preparation),
                |m, v| {
                    m.preparation = v.extract()?;
                    Ok(())
                },
            ))
    }
}

impl fmt::Display for ManufacturedArticle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Manufactured{} \"{}\" {}min",
            self.article, self.description, self.estimated_minutes
        )?;
        if !self.details.is_empty() {
            let lines: Vec<String> = self.details.iter().map(ToString::to_string).collect();
            write!(f, " recipe=[{}]", lines.join(", "))?;
        }
        Ok(())
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// One repository per catalog entity type.
#[derive(Debug, Default)]
pub struct Catalog {
    pub categories: Repository<Category>,
    pub units: Repository<MeasurementUnit>,
    pub supplies: Repository<SupplyArticle>,
    pub manufactured: Repository<ManufacturedArticle>,
}

impl Catalog {
    /// Creates an empty catalog whose repositories share `config`.
    #[must_use]
    pub fn with_config(config: &RepositoryConfig) -> Self {
        Self {
            categories: Repository::with_config(config.clone().with_name("categories")),
            units: Repository::with_config(config.clone().with_name("units")),
            supplies: Repository::with_config(config.clone().with_name("supplies")),
            manufactured: Repository::with_config(config.clone().with_name("manufactured")),
        }
    }

    /// Fills the catalog with the sample menu.
    ///
    /// Returns the identities of the two manufactured articles, pizza first.
    ///
    /// # Errors
    ///
    /// Propagates any repository error.
    pub fn seed(&self) -> Result<(i64, i64)> {
        let pizzas = self.categories.save(Category::new("Pizzas"))?;
        self.categories.save(Category::new("Sandwich"))?;
        let lomos = self.categories.save(Category::new("Lomos"))?;
        let supplies = self.categories.save(Category::new("Supplies"))?;

        let kg = self.units.save(MeasurementUnit::new("Kilograms"))?;
        let litre = self.units.save(MeasurementUnit::new("Litres"))?;
        let gram = self.units.save(MeasurementUnit::new("Grams"))?;

        let supply = |name: &str, sale: f64, unit: &Shared<MeasurementUnit>, cost: f64| {
            SupplyArticle::new(
                Article::new(name)
                    .with_sale_price(sale)
                    .with_unit(unit)
                    .with_category(&supplies),
                cost,
            )
            .for_preparation()
        };

        let salt = self
            .supplies
            .save(supply("Salt", 100.0, &gram, 60.0).with_stock(100, 10, 500))?;
        let oil = self
            .supplies
            .save(supply("Oil", 1200.0, &litre, 900.0).with_stock(30, 3, 60))?;
        let beef = self
            .supplies
            .save(supply("Beef", 6000.0, &kg, 4800.0).with_stock(50, 5, 80))?;
        let flour = self
            .supplies
            .save(supply("Flour", 1500.0, &kg, 1100.0).with_stock(200, 20, 400))?;

        let pizza = self.manufactured.save(
            ManufacturedArticle::new(
                Article::new("Hawaiian Pizza")
                    .with_sale_price(9000.0)
                    .with_unit(&kg)
                    .with_category(&pizzas),
                "Pizza with pineapple",
                20,
            )
            .with_preparation("Stretch the dough, add toppings and bake"),
        )?;
        {
            let mut pizza = pizza.write();
            for image in ["hawaiian1", "hawaiian2", "hawaiian3"] {
                pizza.article.add_image(ArticleImage::new(image));
            }
            pizza.add_detail(&flour, 2);
            pizza.add_detail(&salt, 1);
            pizza.add_detail(&oil, 1);
        }

        let lomo = self.manufactured.save(
            ManufacturedArticle::new(
                Article::new("Full Lomo")
                    .with_sale_price(7500.0)
                    .with_unit(&kg)
                    .with_category(&lomos),
                "Lomo with everything",
                15,
            )
            .with_preparation("Griddle and assemble in bread"),
        )?;
        {
            let mut lomo = lomo.write();
            for image in ["lomo1", "lomo2", "lomo3"] {
                lomo.article.add_image(ArticleImage::new(image));
            }
            lomo.add_detail(&salt, 1);
            lomo.add_detail(&oil, 1);
            lomo.add_detail(&beef, 1);
        }

        let pizza_id = pizza.read().article.id.unwrap_or_default();
        let lomo_id = lomo.read().article.id.unwrap_or_default();
        Ok((pizza_id, lomo_id))
    }
}
