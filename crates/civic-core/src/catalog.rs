// Rust guideline compliant 2026-02-06

//! Reference data: departments, issue categories and known citizens.
//!
//! The catalog is loaded once at startup and never mutated afterwards.

use crate::{Error, Priority, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Longest resolution target a category may declare, in days.
pub const MAX_RESOLUTION_DAYS: u32 = 3650;

/// Municipal organizational unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Area of responsibility.
    #[serde(default)]
    pub description: Option<String>,
    /// Public contact address.
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Public contact phone number.
    #[serde(default)]
    pub contact_phone: Option<String>,
    /// Inactive departments are hidden from listings.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Classification of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCategory {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// What belongs in the category.
    #[serde(default)]
    pub description: Option<String>,
    /// Owning department.
    pub department_id: String,
    /// Default priority for new issues.
    #[serde(default)]
    pub priority: Priority,
    /// Resolution target in days, at most [`MAX_RESOLUTION_DAYS`].
    pub estimated_resolution_days: u32,
    /// Inactive categories are hidden from listings.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Role of a known user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Member of the public.
    #[default]
    Citizen,
    /// Municipal administrator.
    Admin,
    /// Head of a department.
    DepartmentHead,
    /// Staff working on site.
    FieldStaff,
}

/// A known user, used to resolve reporter names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citizen {
    /// Stable identifier.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact address.
    #[serde(default)]
    pub email: Option<String>,
    /// Role in the system.
    #[serde(default)]
    pub role: Role,
}

impl Citizen {
    /// Returns "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

fn default_active() -> bool {
    true
}

/// Read-only reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Catalog {
    /// Departments.
    #[serde(default)]
    pub departments: Vec<Department>,
    /// Issue categories.
    #[serde(default)]
    pub categories: Vec<IssueCategory>,
    /// Known users.
    #[serde(default)]
    pub citizens: Vec<Citizen>,
}

impl Catalog {
    /// Returns the built-in municipal reference data.
    #[must_use]
    pub fn builtin() -> Self {
        let departments = vec![
            department(
                "public-works",
                "Public Works",
                "Road maintenance, streetlights, and general infrastructure.",
                "publicworks@city.gov",
                "(555) 123-4567",
            ),
            department(
                "water-sewer",
                "Water & Sewer",
                "Water supply, sewer systems, and related infrastructure.",
                "water@city.gov",
                "(555) 123-4568",
            ),
            department(
                "parks",
                "Parks & Recreation",
                "Parks, playgrounds, and recreational facilities.",
                "parks@city.gov",
                "(555) 123-4569",
            ),
            department(
                "transportation",
                "Transportation",
                "Traffic signals, signage, and transportation infrastructure.",
                "transport@city.gov",
                "(555) 123-4570",
            ),
            department(
                "environment",
                "Environmental Services",
                "Waste management, recycling, and environmental compliance.",
                "environment@city.gov",
                "(555) 123-4571",
            ),
            department(
                "code-enforcement",
                "Code Enforcement",
                "Building codes, zoning violations, and property maintenance.",
                "code@city.gov",
                "(555) 123-4572",
            ),
        ];

        let categories = vec![
            category("pothole", "Pothole", "public-works", Priority::Medium, 7),
            category("streetlight", "Broken Streetlight", "public-works", Priority::Low, 3),
            category("water-main", "Water Main Break", "water-sewer", Priority::High, 2),
            category("sewer", "Sewer Backup", "water-sewer", Priority::High, 2),
            category("playground", "Damaged Playground", "parks", Priority::Medium, 14),
            category("graffiti", "Graffiti", "parks", Priority::Low, 14),
            category("traffic-light", "Traffic Light Malfunction", "transportation", Priority::High, 5),
            category("illegal-parking", "Illegal Parking", "transportation", Priority::Low, 5),
            category("trash", "Overflowing Trash", "environment", Priority::Medium, 1),
            category("dumping", "Illegal Dumping", "environment", Priority::Medium, 3),
        ];

        Self {
            departments,
            categories,
            citizens: Vec::new(),
        }
    }

    /// Loads a catalog from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the catalog file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file contains invalid TOML
    /// - The catalog fails validation
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog: Catalog = toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Invalid catalog file {}: {}", path.display(), e))
        })?;
        catalog.validate()?;
        tracing::debug!(
            path = %path.display(),
            departments = catalog.departments.len(),
            categories = catalog.categories.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Writes the catalog as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize catalog: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Checks identifiers are unique and every category names a known
    /// department.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first violation found.
    pub fn validate(&self) -> Result<()> {
        let mut department_ids = HashSet::new();
        for department in &self.departments {
            if department.id.trim().is_empty() {
                return Err(Error::Config("Department id cannot be empty".to_string()));
            }
            if !department_ids.insert(department.id.as_str()) {
                return Err(Error::Config(format!(
                    "Duplicate department id: {}",
                    department.id
                )));
            }
        }

        let mut category_ids = HashSet::new();
        for category in &self.categories {
            if category.id.trim().is_empty() {
                return Err(Error::Config("Category id cannot be empty".to_string()));
            }
            if !category_ids.insert(category.id.as_str()) {
                return Err(Error::Config(format!(
                    "Duplicate category id: {}",
                    category.id
                )));
            }
            if !department_ids.contains(category.department_id.as_str()) {
                return Err(Error::Config(format!(
                    "Category {} references unknown department {}",
                    category.id, category.department_id
                )));
            }
            if category.estimated_resolution_days > MAX_RESOLUTION_DAYS {
                return Err(Error::Config(format!(
                    "Category {} resolution target of {} days exceeds {}",
                    category.id, category.estimated_resolution_days, MAX_RESOLUTION_DAYS
                )));
            }
        }

        Ok(())
    }

    /// Looks up a category by id.
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&IssueCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Looks up a department by id.
    #[must_use]
    pub fn department(&self, id: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.id == id)
    }

    /// Looks up a citizen by id.
    #[must_use]
    pub fn citizen(&self, id: &str) -> Option<&Citizen> {
        self.citizens.iter().find(|c| c.id == id)
    }

    /// Active departments sorted by name.
    #[must_use]
    pub fn active_departments(&self) -> Vec<&Department> {
        let mut departments: Vec<&Department> =
            self.departments.iter().filter(|d| d.is_active).collect();
        departments.sort_by(|a, b| a.name.cmp(&b.name));
        departments
    }

    /// Active categories sorted by name.
    #[must_use]
    pub fn active_categories(&self) -> Vec<&IssueCategory> {
        let mut categories: Vec<&IssueCategory> =
            self.categories.iter().filter(|c| c.is_active).collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        categories
    }
}

fn department(id: &str, name: &str, description: &str, email: &str, phone: &str) -> Department {
    Department {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        contact_email: Some(email.to_string()),
        contact_phone: Some(phone.to_string()),
        is_active: true,
    }
}

fn category(
    id: &str,
    name: &str,
    department_id: &str,
    priority: Priority,
    days: u32,
) -> IssueCategory {
    IssueCategory {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        department_id: department_id.to_string(),
        priority,
        estimated_resolution_days: days,
        is_active: true,
    }
}
