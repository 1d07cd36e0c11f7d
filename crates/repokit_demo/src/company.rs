//! Company catalog: geography, addresses, branches and companies.
//!
//! Every entity here uses an `Int` identity. Upward references
//! (province to country, locality to province, address to locality) are
//! shared through `Arc`; a company owns its branches, and a branch owns its
//! address.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveTime;

use repokit_foundation::{IdentityRepr, Type, Value};
use repokit_storage::{Entity, EntitySchema, FieldSchema, IdentitySlot};

fn write_opt<T: fmt::Display>(f: &mut fmt::Formatter<'_>, id: Option<T>) -> fmt::Result {
    match id {
        Some(id) => write!(f, "#{id}"),
        None => write!(f, "#-"),
    }
}

/// Builds a time of day, falling back to midnight for out-of-range input.
#[must_use]
pub fn hour_minute(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

// =============================================================================
// Geography
// =============================================================================

/// A country.
#[derive(Clone, Debug, PartialEq)]
pub struct Country {
    pub id: Option<i32>,
    pub name: String,
}

impl Country {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

impl Entity for Country {
    fn schema() -> EntitySchema<Self> {
        EntitySchema::<Self>::new("Country")
            .with_identity(IdentitySlot::new(
                IdentityRepr::Int,
                |c| c.id.into(),
                |c, v| {
                    c.id = v.extract()?;
                    Ok(())
                },
            ))
            .with_field(FieldSchema::new(
                "name",
                Type::String,
                |c| Value::from(&c.name),
                |c, v| {
                    c.name = v.extract()?;
                    Ok(())
                },
            ))
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Country")?;
        write_opt(f, self.id)?;
        write!(f, " {}", self.name)
    }
}

/// A province within a country.
#[derive(Clone, Debug, PartialEq)]
pub struct Province {
    pub id: Option<i32>,
    pub name: String,
    pub country: Arc<Country>,
}

impl Province {
    #[must_use]
    pub fn new(name: impl Into<String>, country: &Arc<Country>) -> Self {
        Self {
            id: None,
            name: name.into(),
            country: Arc::clone(country),
        }
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.country.name)
    }
}

/// A locality within a province.
#[derive(Clone, Debug, PartialEq)]
pub struct Locality {
    pub id: Option<i32>,
    pub name: String,
    pub province: Arc<Province>,
}

impl Locality {
    #[must_use]
    pub fn new(name: impl Into<String>, province: &Arc<Province>) -> Self {
        Self {
            id: None,
            name: name.into(),
            province: Arc::clone(province),
        }
    }
}

impl fmt::Display for Locality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.province)
    }
}

/// A street address.
#[derive(Clone, Debug, PartialEq)]
pub struct Address {
    pub id: Option<i32>,
    pub street: String,
    /// Street number; some addresses have none.
    pub number: Option<i32>,
    pub postal_code: String,
    pub locality: Arc<Locality>,
}

impl Address {
    #[must_use]
    pub fn new(
        street: impl Into<String>,
        number: Option<i32>,
        postal_code: impl Into<String>,
        locality: &Arc<Locality>,
    ) -> Self {
        Self {
            id: None,
            street: street.into(),
            number,
            postal_code: postal_code.into(),
            locality: Arc::clone(locality),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.street)?;
        if let Some(number) = self.number {
            write!(f, " {number}")?;
        } else {
            write!(f, " s/n")?;
        }
        write!(f, " ({}), {}", self.postal_code, self.locality)
    }
}

// =============================================================================
// Branches and companies
// =============================================================================

/// A company branch with its opening hours.
#[derive(Clone, Debug, PartialEq)]
pub struct Branch {
    pub id: Option<i32>,
    pub name: String,
    pub opening: NaiveTime,
    pub closing: NaiveTime,
    pub is_head_office: bool,
    pub address: Address,
}

impl Branch {
    #[must_use]
    pub fn new(name: impl Into<String>, opening: NaiveTime, closing: NaiveTime, address: Address) -> Self {
        Self {
            id: None,
            name: name.into(),
            opening,
            closing,
            is_head_office: false,
            address,
        }
    }

    /// Marks this branch as the head office.
    #[must_use]
    pub fn head_office(mut self) -> Self {
        self.is_head_office = true;
        self
    }
}

impl Entity for Branch {
    fn schema() -> EntitySchema<Self> {
        EntitySchema::<Self>::new("Branch")
            .with_identity(IdentitySlot::new(
                IdentityRepr::Int,
                |b| b.id.into(),
                |b, v| {
                    b.id = v.extract()?;
                    Ok(())
                },
            ))
            .with_field(FieldSchema::new(
                "name",
                Type::String,
                |b| Value::from(&b.name),
                |b, v| {
                    b.name = v.extract()?;
                    Ok(())
                },
            ))
            .with_field(FieldSchema::new(
                "opening",
                Type::Time,
                |b| Value::Time(b.opening),
                |b, v| {
                    b.opening = v.extract()?;
                    Ok(())
                },
            ))
            .with_field(FieldSchema::new(
                "closing",
                Type::Time,
                |b| Value::Time(b.closing),
                |b, v| {
                    b.closing = v.extract()?;
                    Ok(())
                },
            ))
            .with_field(FieldSchema::new(
                "is_head_office",
                Type::Bool,
                |b| Value::Bool(b.is_head_office),
                |b, v| {
                    b.is_head_office = v.extract()?;
                    Ok(())
                },
            ))
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Branch")?;
        write_opt(f, self.id)?;
        write!(
            f,
            " {} [{}-{}]",
            self.name,
            self.opening.format("%H:%M"),
            self.closing.format("%H:%M")
        )?;
        if self.is_head_office {
            write!(f, " (head office)")?;
        }
        write!(f, " at {}", self.address)
    }
}

/// A company and the branches it owns.
#[derive(Clone, Debug, PartialEq)]
pub struct Company {
    pub id: Option<i32>,
    pub name: String,
    pub legal_name: String,
    pub cuit: i32,
    pub logo: String,
    pub branches: Vec<Branch>,
}

impl Company {
    #[must_use]
    pub fn new(name: impl Into<String>, legal_name: impl Into<String>, cuit: i32, logo: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            legal_name: legal_name.into(),
            cuit,
            logo: logo.into(),
            branches: Vec::new(),
        }
    }

    /// Adds a branch.
    #[must_use]
    pub fn with_branch(mut self, branch: Branch) -> Self {
        self.branches.push(branch);
        self
    }

    /// Returns the head office, if one is marked.
    #[must_use]
    pub fn head_office(&self) -> Option<&Branch> {
        self.branches.iter().find(|b| b.is_head_office)
    }
}

impl Entity for Company {
    fn schema() -> EntitySchema<Self> {
        EntitySchema::<Self>::new("Company")
            .with_identity(IdentitySlot::new(
                IdentityRepr::Int,
                |c| c.id.into(),
                |c, v| {
                    c.id = v.extract()?;
                    Ok(())
                },
            ))
            .with_field(FieldSchema::new(
                "name",
                Type::String,
                |c| Value::from(&c.name),
                |c, v| {
                    c.name = v.extract()?;
                    Ok(())
                },
            ))
            .with_field(FieldSchema::new(
                "legal_name",
                Type::String,
                |c| Value::from(&c.legal_name),
                |c, v| {
                    c.legal_name = v.extract()?;
                    Ok(())
                },
            ))
            .with_field(FieldSchema::new(
                "cuit",
                Type::Int,
                |c| Value::Int(c.cuit),
                |c, v| {
                    c.cuit = v.extract()?;
                    Ok(())
                },
            ))
            .with_field(FieldSchema::new(
                "logo",
                Type::String,
                |c| Value::from(&c.logo),
                |c, v| {
                    c.logo = v.extract()?;
                    Ok(())
                },
            ))
            .with_field(FieldSchema::read_only("branch_count", Type::Int, |c| {
                Value::Int(i32::try_from(c.branches.len()).unwrap_or(i32::MAX))
            }))
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Company")?;
        write_opt(f, self.id)?;
        write!(
            f,
            " {} ({}) cuit={} logo={}",
            self.name, self.legal_name, self.cuit, self.logo
        )?;
        for branch in &self.branches {
            write!(f, "\n    {branch}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Sample data
// =============================================================================

/// Builds the two sample companies with four branches across two provinces.
#[must_use]
pub fn sample_companies() -> [Company; 2] {
    let argentina = Arc::new(Country::new("Argentina"));

    let buenos_aires = Arc::new(Province::new("Buenos Aires", &argentina));
    let cordoba = Arc::new(Province::new("Córdoba", &argentina));

    let caba = Arc::new(Locality::new("CABA", &buenos_aires));
    let la_plata = Arc::new(Locality::new("La Plata", &buenos_aires));
    let cordoba_capital = Arc::new(Locality::new("Córdoba Capital", &cordoba));
    let carlos_paz = Arc::new(Locality::new("Villa Carlos Paz", &cordoba));

    let branch1 = Branch::new(
        "Branch 1 - CABA",
        hour_minute(9, 0),
        hour_minute(18, 0),
        Address::new("Cerrito", Some(628), "C1010", &caba),
    )
    .head_office();
    let branch2 = Branch::new(
        "Branch 2 - La Plata",
        hour_minute(8, 0),
        hour_minute(16, 30),
        Address::new("Paseo del Bosque", None, "B1900", &la_plata),
    );
    let branch3 = Branch::new(
        "Branch 3 - Córdoba Capital",
        hour_minute(8, 30),
        hour_minute(13, 30),
        Address::new("Jose Antonio Goyenechea", Some(2851), "X5009", &cordoba_capital),
    );
    let branch4 = Branch::new(
        "Branch 4 - Villa Carlos Paz",
        hour_minute(9, 0),
        hour_minute(20, 0),
        Address::new("Av. Illia", Some(899), "X5152", &carlos_paz),
    );

    [
        Company::new("Company 1", "Company One S.A.", 20_300_123, "logo1.png")
            .with_branch(branch1)
            .with_branch(branch2),
        Company::new("Company 2", "Company Two S.A.", 20_300_222, "logo2.png")
            .with_branch(branch3)
            .with_branch(branch4),
    ]
}
