//! Seeded in-memory table source.
//!
//! Feeds the dashboard and tests with plausible rows. Deterministic for
//! a given seed.

use async_trait::async_trait;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::DataError;
use crate::model::{Employee, GarageItem, Planset, TableKind, TeamMember};
use crate::source::{TableData, TableSource};

const FIRST_NAMES: &[&str] = &[
    "Amy", "Bob", "Cid", "Dana", "Eli", "Fran", "Gus", "Hana", "Ivan", "Jade",
];
const LAST_NAMES: &[&str] = &[
    "Alvarez", "Brooks", "Chen", "Dawson", "Ellis", "Flores", "Grant", "Hughes",
];
const STREETS: &[&str] = &["Oak St", "Maple Ave", "Cedar Ln", "Sunset Blvd", "Juniper Way"];
const STATES: &[&str] = &["CA", "AZ", "NV", "TX", "FL", "CO"];
const PORTALS: &[&str] = &["Aurora", "OpenSolar", "SolarEdge", "Enphase"];
const STATUSES: &[&str] = &["New", "In Design", "Approved", "Installed", "On Hold"];
const CUSTOMER_TYPES: &[&str] = &["Residential", "Commercial"];
const PROJECT_TAGS: &[&str] = &["rush", "battery", "reroof", "ground-mount", "permit-ready"];
const DETAILS: &[&str] = &[
    "Solar Install",
    "PV+Battery",
    "Panel Upgrade",
    "Ground Mount Array",
    "Reroof + Solar",
];
const ROLES: &[&str] = &["Designer", "Installer", "Electrician", "Surveyor", "Project Manager"];
const REGIONS: &[&str] = &["West", "Southwest", "Central", "Southeast"];
const GARAGE_ITEMS: &[&str] = &[
    "400W Panel",
    "Microinverter",
    "Rail Kit",
    "MC4 Connector",
    "Battery Module",
    "Roof Anchor",
];
const GARAGE_CATEGORIES: &[&str] = &["Modules", "Inverters", "Racking", "Electrical", "Storage"];
const GARAGE_STATUSES: &[&str] = &["In Stock", "Low", "Backordered"];

/// Rows generated per table.
const ROWS_PER_TABLE: usize = 24;

/// Deterministic mock table source.
#[derive(Debug, Clone)]
pub struct MockSource {
    seed: u64,
}

impl MockSource {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn rng_for(&self, kind: TableKind) -> StdRng {
        // Distinct stream per table so datasets do not mirror each other.
        StdRng::seed_from_u64(self.seed ^ kind.id().len() as u64)
    }

    fn plansets(&self) -> Vec<Planset> {
        let mut rng = self.rng_for(TableKind::Plansets);
        (0..ROWS_PER_TABLE)
            .map(|i| {
                let has_cost = rng.random_bool(0.9);
                let has_date = rng.random_bool(0.85);
                Planset {
                    id: format!("ps-{i:03}"),
                    customer_name: full_name(&mut rng),
                    customer_address: format!(
                        "{} {}",
                        rng.random_range(100..9999),
                        pick(&mut rng, STREETS)
                    ),
                    details: pick(&mut rng, DETAILS).to_string(),
                    status: pick(&mut rng, STATUSES).to_string(),
                    system_cost: has_cost.then(|| rng.random_range(8_000..45_000) as f64),
                    install_date: has_date.then(|| random_date(&mut rng)),
                    state: pick(&mut rng, STATES).to_string(),
                    portal: pick(&mut rng, PORTALS).to_string(),
                    customer_type: pick(&mut rng, CUSTOMER_TYPES).to_string(),
                    tags: pick_tags(&mut rng),
                }
            })
            .collect()
    }

    fn team(&self) -> Vec<TeamMember> {
        let mut rng = self.rng_for(TableKind::TeamPerformance);
        (0..ROWS_PER_TABLE)
            .map(|i| TeamMember {
                id: format!("tm-{i:03}"),
                name: full_name(&mut rng),
                role: pick(&mut rng, ROLES).to_string(),
                region: pick(&mut rng, REGIONS).to_string(),
                revenue: rng.random_range(20_000..250_000) as f64,
                efficiency: rng.random_range(55..100) as f64,
                hired: random_date(&mut rng),
            })
            .collect()
    }

    fn employees(&self) -> Vec<Employee> {
        let mut rng = self.rng_for(TableKind::Employees);
        (0..ROWS_PER_TABLE)
            .map(|i| {
                let name = full_name(&mut rng);
                let email = format!(
                    "{}@helioboard.example",
                    name.to_lowercase().replace(' ', ".")
                );
                Employee {
                    id: format!("emp-{i:03}"),
                    name,
                    role: pick(&mut rng, ROLES).to_string(),
                    email,
                    phone: format!(
                        "({:03}) 555-{:04}",
                        rng.random_range(200..990),
                        rng.random_range(0..10_000)
                    ),
                    status: if rng.random_bool(0.9) { "Active" } else { "On Leave" }.to_string(),
                    state: pick(&mut rng, STATES).to_string(),
                }
            })
            .collect()
    }

    fn garage(&self) -> Vec<GarageItem> {
        let mut rng = self.rng_for(TableKind::Garage);
        (0..ROWS_PER_TABLE)
            .map(|i| GarageItem {
                id: format!("gr-{i:03}"),
                item: pick(&mut rng, GARAGE_ITEMS).to_string(),
                category: pick(&mut rng, GARAGE_CATEGORIES).to_string(),
                quantity: rng.random_range(0..500),
                unit_cost: rng.random_range(4..900) as f64,
                status: pick(&mut rng, GARAGE_STATUSES).to_string(),
                tags: pick_tags(&mut rng),
            })
            .collect()
    }
}

#[async_trait]
impl TableSource for MockSource {
    async fn fetch(&self, kind: TableKind) -> Result<TableData, DataError> {
        let rows = match kind {
            TableKind::Plansets => self.plansets().iter().map(Planset::to_row).collect(),
            TableKind::TeamPerformance => self.team().iter().map(TeamMember::to_row).collect(),
            TableKind::Employees => self.employees().iter().map(Employee::to_row).collect(),
            TableKind::Garage => self.garage().iter().map(GarageItem::to_row).collect(),
        };
        Ok(TableData {
            columns: kind.columns(),
            rows,
        })
    }
}

fn pick<'a>(rng: &mut StdRng, pool: &'a [&'a str]) -> &'a str {
    pool[rng.random_range(0..pool.len())]
}

fn full_name(rng: &mut StdRng) -> String {
    format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

fn pick_tags(rng: &mut StdRng) -> Vec<String> {
    let count = rng.random_range(0..3);
    (0..count)
        .map(|_| pick(rng, PROJECT_TAGS).to_string())
        .collect()
}

fn random_date(rng: &mut StdRng) -> NaiveDate {
    let year = rng.random_range(2024..=2026);
    let month = rng.random_range(1..=12);
    let day = rng.random_range(1..=28);
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
