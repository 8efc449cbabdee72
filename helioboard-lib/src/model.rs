//! Domain records and their table representations.

use chrono::NaiveDate;
use sungrid::column::{Column, ColumnKind};
use sungrid::row::{CellValue, Row};

/// The dashboard's table domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TableKind {
    #[default]
    Plansets,
    TeamPerformance,
    Employees,
    Garage,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Plansets,
        TableKind::TeamPerformance,
        TableKind::Employees,
        TableKind::Garage,
    ];

    /// Stable id, used as the persistence namespace key.
    pub fn id(&self) -> &'static str {
        match self {
            TableKind::Plansets => "plansets",
            TableKind::TeamPerformance => "team",
            TableKind::Employees => "employees",
            TableKind::Garage => "garage",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TableKind::Plansets => "Plansets",
            TableKind::TeamPerformance => "Team Performance",
            TableKind::Employees => "Employees",
            TableKind::Garage => "Garage",
        }
    }

    pub fn from_id(id: &str) -> Option<TableKind> {
        TableKind::ALL.iter().copied().find(|k| k.id() == id)
    }

    /// Column descriptors for this table.
    pub fn columns(&self) -> Vec<Column> {
        match self {
            TableKind::Plansets => vec![
                Column::row_number(),
                Column::new("customer", "Customer", ColumnKind::Customer)
                    .sortable()
                    .filterable()
                    .resizable()
                    .min_width(14),
                Column::new("details", "Project Details", ColumnKind::Text)
                    .filterable()
                    .resizable()
                    .min_width(10),
                Column::new("status", "Status", ColumnKind::Status).sortable(),
                Column::new("cost", "System Cost", ColumnKind::Currency)
                    .sortable()
                    .resizable(),
                Column::new("install_date", "Install Date", ColumnKind::Date).sortable(),
                Column::new("state", "State", ColumnKind::Text).sortable(),
                Column::new("portal", "Portal", ColumnKind::Text),
                Column::new("tags", "Tags", ColumnKind::Tags).resizable(),
                Column::actions(),
            ],
            TableKind::TeamPerformance => vec![
                Column::row_number(),
                Column::new("name", "Name", ColumnKind::Text)
                    .sortable()
                    .resizable()
                    .min_width(10),
                Column::new("role", "Role", ColumnKind::Text).sortable(),
                Column::new("region", "Region", ColumnKind::Text).sortable(),
                Column::new("revenue", "Revenue", ColumnKind::Currency)
                    .sortable()
                    .resizable(),
                Column::new("efficiency", "Efficiency", ColumnKind::Percent).sortable(),
                Column::new("hired", "Hired", ColumnKind::Date).sortable(),
                Column::actions(),
            ],
            TableKind::Employees => vec![
                Column::row_number(),
                Column::new("name", "Name", ColumnKind::Text)
                    .sortable()
                    .resizable()
                    .min_width(10),
                Column::new("role", "Role", ColumnKind::Text).sortable(),
                Column::new("email", "Email", ColumnKind::Text).resizable().min_width(12),
                Column::new("phone", "Phone", ColumnKind::Text),
                Column::new("status", "Status", ColumnKind::Status).sortable(),
                Column::new("state", "State", ColumnKind::Text).sortable(),
                Column::actions(),
            ],
            TableKind::Garage => vec![
                Column::row_number(),
                Column::new("item", "Item", ColumnKind::Text)
                    .sortable()
                    .resizable()
                    .min_width(10),
                Column::new("category", "Category", ColumnKind::Text).sortable(),
                Column::new("quantity", "Qty", ColumnKind::Text).sortable(),
                Column::new("unit_cost", "Unit Cost", ColumnKind::Currency)
                    .sortable()
                    .resizable(),
                Column::new("status", "Status", ColumnKind::Status).sortable(),
                Column::new("tags", "Tags", ColumnKind::Tags).resizable(),
                Column::actions(),
            ],
        }
    }

    /// Optional columns not in the default set, offered by "Add Column".
    ///
    /// These cover row fields the default layout leaves off.
    pub fn extra_columns(&self) -> Vec<Column> {
        match self {
            TableKind::Plansets => vec![
                Column::new("customer_type", "Customer Type", ColumnKind::Text).sortable(),
            ],
            TableKind::TeamPerformance | TableKind::Employees | TableKind::Garage => Vec::new(),
        }
    }

    /// Field the date filter applies to, where the table has one.
    pub fn date_field(&self) -> Option<&'static str> {
        match self {
            TableKind::Plansets => Some("install_date"),
            TableKind::TeamPerformance => Some("hired"),
            TableKind::Employees | TableKind::Garage => None,
        }
    }

    /// Fields the free-text search matches against.
    pub fn search_fields(&self) -> Vec<String> {
        let fields: &[&str] = match self {
            TableKind::Plansets => &["customer", "details", "state"],
            TableKind::TeamPerformance => &["name", "role", "region"],
            TableKind::Employees => &["name", "role", "email"],
            TableKind::Garage => &["item", "category"],
        };
        fields.iter().map(|f| f.to_string()).collect()
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A solar installation project.
#[derive(Debug, Clone)]
pub struct Planset {
    pub id: String,
    pub customer_name: String,
    pub customer_address: String,
    pub details: String,
    pub status: String,
    pub system_cost: Option<f64>,
    pub install_date: Option<NaiveDate>,
    pub state: String,
    pub portal: String,
    pub customer_type: String,
    pub tags: Vec<String>,
}

impl Planset {
    pub fn to_row(&self) -> Row {
        let mut row = Row::new(self.id.clone())
            .field(
                "customer",
                CellValue::Customer {
                    name: self.customer_name.clone(),
                    address: self.customer_address.clone(),
                },
            )
            .field("details", self.details.clone())
            .field("status", CellValue::Status(self.status.clone()))
            .field("state", self.state.clone())
            .field("portal", self.portal.clone())
            .field("customer_type", self.customer_type.clone())
            .field("tags", CellValue::Tags(self.tags.clone()));
        if let Some(cost) = self.system_cost {
            row = row.field("cost", cost);
        }
        if let Some(date) = self.install_date {
            row = row.field("install_date", date);
        }
        row
    }
}

/// One row of the team performance table.
#[derive(Debug, Clone)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: String,
    pub region: String,
    pub revenue: f64,
    pub efficiency: f64,
    pub hired: NaiveDate,
}

impl TeamMember {
    pub fn to_row(&self) -> Row {
        Row::new(self.id.clone())
            .field("name", self.name.clone())
            .field("role", self.role.clone())
            .field("region", self.region.clone())
            .field("revenue", self.revenue)
            .field("efficiency", CellValue::Percent(self.efficiency))
            .field("hired", self.hired)
    }
}

/// An employee record.
#[derive(Debug, Clone)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub status: String,
    pub state: String,
}

impl Employee {
    pub fn to_row(&self) -> Row {
        Row::new(self.id.clone())
            .field("name", self.name.clone())
            .field("role", self.role.clone())
            .field("email", self.email.clone())
            .field("phone", self.phone.clone())
            .field("status", CellValue::Status(self.status.clone()))
            .field("state", self.state.clone())
    }
}

/// A garage/inventory catalog entry.
#[derive(Debug, Clone)]
pub struct GarageItem {
    pub id: String,
    pub item: String,
    pub category: String,
    pub quantity: u32,
    pub unit_cost: f64,
    pub status: String,
    pub tags: Vec<String>,
}

impl GarageItem {
    pub fn to_row(&self) -> Row {
        Row::new(self.id.clone())
            .field("item", self.item.clone())
            .field("category", self.category.clone())
            .field("quantity", self.quantity.to_string())
            .field("unit_cost", self.unit_cost)
            .field("status", CellValue::Status(self.status.clone()))
            .field("tags", CellValue::Tags(self.tags.clone()))
    }
}
